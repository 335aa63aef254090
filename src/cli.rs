//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - CLI flags override config-file values.
//! - --debug is a shorthand for --log-level debug.

use clap::{Parser, ValueHint};
use std::path::PathBuf;

use crate::config::{Config, LogLevel};

/// Rename the given files by editing their paths as a list in your editor.
/// Nothing is touched until the edited list validates as a whole.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Batch-rename files by editing the path list in a text editor")]
pub struct Args {
    /// Files to rename, in the order they will appear in the editor.
    #[arg(value_name = "FILES", value_hint = ValueHint::AnyPath, required = true, num_args = 1..)]
    pub files: Vec<PathBuf>,

    /// Editor command (overrides config and $EDITOR).
    #[arg(long, short = 'e', value_name = "CMD", help = "Editor command to launch")]
    pub editor: Option<String>,

    /// Extra argument passed to the editor before the list file; repeatable.
    #[arg(
        long = "editor-arg",
        value_name = "ARG",
        help = "Extra editor argument (repeat for several, e.g. --editor-arg=--wait)"
    )]
    pub editor_args: Vec<String>,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(short = 'd', long, help = "Enable debug logging (shorthand for --log-level debug)")]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<String>,

    /// Write tracing logs to this file in addition to stdout.
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,

    /// Where to write the per-invocation outcome records.
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub outcome_log: Option<PathBuf>,

    /// Show the validated plan but do not touch the filesystem.
    #[arg(long, help = "Show what would be renamed, but do not modify files")]
    pub dry_run: bool,

    /// Treat the filesystem as case-insensitive (allows case-only renames).
    #[arg(long, help = "Treat the filesystem as case-insensitive (permits case-only renames)")]
    pub case_insensitive: bool,

    /// Emit logs in structured JSON.
    #[arg(long, help = "Emit logs in structured JSON")]
    pub json: bool,

    /// Print where edmv looks for its config file (or EDMV_CONFIG if set), then exit.
    #[arg(long, help = "Print the config file location used by edmv and exit")]
    pub print_config: bool,
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(editor) = &self.editor {
            cfg.editor_command = editor.clone();
        }
        if !self.editor_args.is_empty() {
            cfg.editor_args = self.editor_args.clone();
        }
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if let Some(lf) = &self.log_file {
            cfg.log_file = Some(lf.clone());
        }
        if let Some(ol) = &self.outcome_log {
            cfg.outcome_log = Some(ol.clone());
        }
        if self.dry_run {
            cfg.dry_run = true;
        }
        if self.case_insensitive {
            cfg.case_insensitive_fs = true;
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
