//! Core configuration types.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::paths;
use super::FALLBACK_EDITOR;

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Informational output (default)
    #[default]
    Normal,
    /// More detail
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Runtime configuration for one rename invocation.
#[derive(Debug, Clone)]
pub struct Config {
    /// Command used to launch the external editor
    pub editor_command: String,
    /// Extra arguments passed before the list file (e.g. `--wait`)
    pub editor_args: Vec<String>,
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional tracing log file
    pub log_file: Option<PathBuf>,
    /// Where the per-invocation outcome records go
    pub outcome_log: Option<PathBuf>,
    /// Print the plan but do not touch the filesystem
    pub dry_run: bool,
    /// Treat the filesystem as case-insensitive: a destination differing
    /// from its own source only by case is a legitimate rename, not an
    /// occupied target.
    pub case_insensitive_fs: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            editor_command: std::env::var("EDITOR")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| FALLBACK_EDITOR.to_string()),
            editor_args: Vec::new(),
            log_level: LogLevel::Normal,
            log_file: paths::default_log_path(),
            outcome_log: paths::default_outcome_log_path(),
            dry_run: false,
            case_insensitive_fs: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loglevel_parses_aliases() {
        assert_eq!(LogLevel::parse("ERROR"), Some(LogLevel::Quiet));
        assert_eq!(LogLevel::parse("verbose"), Some(LogLevel::Info));
        assert_eq!(LogLevel::parse("trace"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::parse("nope"), None);
    }

    #[test]
    fn loglevel_display_round_trips() {
        for lvl in [
            LogLevel::Quiet,
            LogLevel::Normal,
            LogLevel::Info,
            LogLevel::Debug,
        ] {
            assert_eq!(lvl.to_string().parse::<LogLevel>().unwrap(), lvl);
        }
    }
}
