//! Console lines shown to the person driving a rename session.
//!
//! These sit alongside the tracing pipeline, not inside it: tracing gets
//! the structured record, the console gets a short line a human can act
//! on mid-session ("fix the edit and retry"). Prefixes are colored only
//! when the stream is a TTY, so piped output stays grep-friendly.

use owo_colors::OwoColorize;

fn stdout_is_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

fn stderr_is_tty() -> bool {
    atty::is(atty::Stream::Stderr)
}

pub fn print_info(msg: &str) {
    if stdout_is_tty() {
        println!("{} {}", "info:".cyan().bold(), msg);
    } else {
        println!("info: {}", msg);
    }
}

pub fn print_warn(msg: &str) {
    if stderr_is_tty() {
        eprintln!("{} {}", "warn:".yellow().bold(), msg);
    } else {
        eprintln!("warn: {}", msg);
    }
}

/// Refusals and halted batches land here, on stderr, so a caller
/// capturing stdout for the rename summary never sees them interleaved.
pub fn print_error(msg: &str) {
    if stderr_is_tty() {
        eprintln!("{} {}", "error:".red().bold(), msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

pub fn print_success(msg: &str) {
    if stdout_is_tty() {
        println!("{} {}", "ok:".green().bold(), msg);
    } else {
        println!("ok: {}", msg);
    }
}

/// Unprefixed line for output users may pipe or script against, such as
/// the dry-run listing: `would rename 'draft.txt' -> 'notes.txt'`.
pub fn print_user(msg: &str) {
    println!("{}", msg);
}
