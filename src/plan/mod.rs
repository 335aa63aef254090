//! Rename planning: pairing, conflict validation and execution ordering.
//!
//! A plan is built once from the original/edited line pair, validated as a
//! whole (any single problem voids the entire batch), and turned into a flat
//! operation sequence that never renames onto a still-occupied path.

mod build;
mod order;
mod validate;

pub use build::build_plan;
pub use order::order_plan;
pub use validate::validate_plan;
pub(crate) use validate::differs_only_by_case;

use std::path::PathBuf;

/// One source -> destination rename requested by the edited list.
/// Exists only for entries whose edited line differs from the original.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameStep {
    pub source: PathBuf,
    pub dest: PathBuf,
    /// 0-based position in the original list, for error reporting.
    pub index: usize,
}

/// The full candidate plan for one invocation. Valid only as a whole;
/// unchanged entries are kept for reporting but never executed.
#[derive(Debug, Clone, Default)]
pub struct RenamePlan {
    pub steps: Vec<RenameStep>,
    pub unchanged: Vec<PathBuf>,
}

impl RenamePlan {
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// A single concrete filesystem rename, ready for the executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameOp {
    pub from: PathBuf,
    pub to: PathBuf,
    /// Set on the two extra hops introduced to break a cycle.
    pub via_temp: bool,
}

/// Ordered operations; executing them in sequence never requires
/// overwriting an existing, not-yet-vacated path.
#[derive(Debug, Clone, Default)]
pub struct ExecutionOrder {
    pub ops: Vec<RenameOp>,
}

impl ExecutionOrder {
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}
