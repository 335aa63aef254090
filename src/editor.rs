//! External editor session.
//! Writes the emitted path list to a temp file, hands it to the configured
//! editor synchronously, and reads the buffer back once the editor exits.
//! A non-zero editor exit refuses the whole run before any plan is built.

use anyhow::{bail, Context, Result};
use std::io::Write;
use std::process::Command;
use tracing::{debug, info};

use crate::config::Config;

/// Run one edit session over `text` and return the edited buffer.
pub fn edit_text(cfg: &Config, text: &str) -> Result<String> {
    let mut file = tempfile::Builder::new()
        .prefix("edmv-")
        .suffix(".txt")
        .tempfile()
        .context("create temp file for edit session")?;
    file.write_all(text.as_bytes())
        .context("write path list to temp file")?;
    file.flush().context("flush path list to temp file")?;

    let path = file.path().to_path_buf();
    debug!(editor = %cfg.editor_command, file = %path.display(), "launching editor");

    let status = Command::new(&cfg.editor_command)
        .args(&cfg.editor_args)
        .arg(&path)
        .status()
        .with_context(|| format!("launch editor '{}'", cfg.editor_command))?;

    if !status.success() {
        bail!(
            "editor '{}' exited with {}; refusing to change any files",
            cfg.editor_command,
            status
        );
    }

    let edited =
        std::fs::read_to_string(&path).context("read edited path list back from temp file")?;
    info!(bytes = edited.len(), "edit session finished");
    Ok(edited)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Use standard tools as stand-in "editors" so the session logic is
    // exercised without an interactive program.

    #[cfg(unix)]
    #[test]
    fn passthrough_editor_returns_buffer_unchanged() {
        let mut cfg = Config::default();
        cfg.editor_command = "true".into(); // exits 0 without touching the file
        cfg.editor_args = Vec::new();
        let out = edit_text(&cfg, "/a\n/b\n").unwrap();
        assert_eq!(out, "/a\n/b\n");
    }

    #[cfg(unix)]
    #[test]
    fn failing_editor_refuses_the_run() {
        let mut cfg = Config::default();
        cfg.editor_command = "false".into(); // exits 1
        let err = edit_text(&cfg, "/a\n").unwrap_err();
        assert!(err.to_string().contains("refusing"), "{err}");
    }

    #[test]
    fn missing_editor_is_a_launch_error() {
        let mut cfg = Config::default();
        cfg.editor_command = "edmv-definitely-not-a-real-editor".into();
        let err = edit_text(&cfg, "/a\n").unwrap_err();
        assert!(err.to_string().contains("launch editor"), "{err}");
    }
}
