//! Path list <-> editable text.
//! Emits one path per line for the editor session and parses the edited
//! buffer back into raw lines. Parsing deliberately does not trim or drop
//! anything: a blank or mangled line is an error signal the validator must
//! see, not noise to clean up here.

use std::path::Path;

/// Render paths one per line, input order, each line newline-terminated.
/// Non-UTF-8 path bytes are rendered lossily; the unchanged-line check
/// compares against the same lossy rendering, so unedited entries are left
/// alone even when the original name was not valid UTF-8.
pub fn emit<P: AsRef<Path>>(paths: &[P]) -> String {
    let mut out = String::new();
    for p in paths {
        out.push_str(&p.as_ref().to_string_lossy());
        out.push('\n');
    }
    out
}

/// Split the edited buffer into lines, preserving empty lines and interior
/// whitespace. A trailing `\r` per line is stripped (CRLF editors); the
/// single empty line produced by a terminating `\n` is not a data line.
pub fn parse(text: &str) -> Vec<String> {
    let mut lines: Vec<String> = text
        .split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l).to_string())
        .collect();
    if lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines
}
