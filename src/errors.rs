//! Typed error definitions for edmv.
//! One variant per refusal/failure category so logs, tests and exit codes
//! can distinguish them without string matching.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenameError {
    #[error("Edited list has {actual} lines but {expected} were expected; refusing to pair by position")]
    CountMismatch { expected: usize, actual: usize },

    #[error("Original path no longer exists: {0}")]
    SourceMissing(PathBuf),

    #[error("Path listed more than once, will not continue: {0}")]
    DuplicateSource(PathBuf),

    #[error("Line {line} is not a usable destination ({reason}): '{text}'")]
    InvalidDestination {
        line: usize,
        text: String,
        reason: &'static str,
    },

    #[error("Two entries would be renamed to the same destination: {dest}")]
    DestinationCollision { dest: PathBuf },

    #[error("Destination already exists and is not part of the plan: {dest}")]
    TargetExists { dest: PathBuf },

    #[error("Destination appeared between validation and rename: {dest}")]
    RaceLost { dest: PathBuf },

    #[error("Rename '{from}' -> '{to}' failed: {source}")]
    RenameFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Operation interrupted by user")]
    Interrupted,
}

impl RenameError {
    /// Stable machine-readable code used in structured logs and outcome records.
    pub fn code(&self) -> &'static str {
        match self {
            RenameError::CountMismatch { .. } => "count_mismatch",
            RenameError::SourceMissing(_) => "source_missing",
            RenameError::DuplicateSource(_) => "duplicate_source",
            RenameError::InvalidDestination { .. } => "invalid_destination",
            RenameError::DestinationCollision { .. } => "destination_collision",
            RenameError::TargetExists { .. } => "target_exists",
            RenameError::RaceLost { .. } => "race_lost",
            RenameError::RenameFailed { .. } => "rename_failed",
            RenameError::Interrupted => "interrupted",
        }
    }

    /// Process exit code per failure category, so callers can tell a wholesale
    /// refusal (nothing touched) from a halt mid-execution.
    pub fn exit_code(&self) -> i32 {
        match self {
            RenameError::CountMismatch { .. } => 2,
            RenameError::SourceMissing(_)
            | RenameError::DuplicateSource(_)
            | RenameError::InvalidDestination { .. } => 3,
            RenameError::DestinationCollision { .. } | RenameError::TargetExists { .. } => 4,
            RenameError::RaceLost { .. } => 5,
            RenameError::RenameFailed { .. } => 6,
            RenameError::Interrupted => 130,
        }
    }

    /// True for errors raised before any filesystem mutation.
    pub fn is_refusal(&self) -> bool {
        matches!(
            self,
            RenameError::CountMismatch { .. }
                | RenameError::SourceMissing(_)
                | RenameError::DuplicateSource(_)
                | RenameError::InvalidDestination { .. }
                | RenameError::DestinationCollision { .. }
                | RenameError::TargetExists { .. }
        )
    }
}
