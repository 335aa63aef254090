//! Rename execution.
//! Runs the ordered operations strictly in sequence, re-checking that each
//! destination is still free immediately before the rename. The first
//! failure halts the batch; already-completed renames stay as they are (no
//! rollback) and the outcome log shows exactly which operations ran.

use std::fs;
use tracing::{debug, info};

use crate::config::Config;
use crate::errors::RenameError;
use crate::fs_ops::checked_rename;
use crate::outcome::OutcomeLog;
use crate::plan::{differs_only_by_case, ExecutionOrder, RenameOp};
use crate::shutdown;

/// How far a (possibly halted) execution got.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutedReport {
    pub completed: usize,
    pub total: usize,
}

pub fn execute(
    order: &ExecutionOrder,
    log: &mut OutcomeLog,
    cfg: &Config,
) -> Result<ExecutedReport, RenameError> {
    let total = order.len();
    for (i, op) in order.ops.iter().enumerate() {
        if shutdown::is_requested() {
            return halt(order, log, i, op, RenameError::Interrupted);
        }

        // Narrow-race defence: validation happened before the editor exit
        // was even processed, so probe again right before mutating.
        if target_occupied(op, cfg) {
            let err = RenameError::RaceLost {
                dest: op.to.clone(),
            };
            return halt(order, log, i, op, err);
        }

        if let Err(e) = checked_rename(&op.from, &op.to) {
            let err = RenameError::RenameFailed {
                from: op.from.clone(),
                to: op.to.clone(),
                source: e,
            };
            return halt(order, log, i, op, err);
        }

        log.record_op_ok(op);
        info!(from = %op.from.display(), to = %op.to.display(), via_temp = op.via_temp, "renamed");
    }

    debug!(total, "execution complete");
    Ok(ExecutedReport {
        completed: total,
        total,
    })
}

fn target_occupied(op: &RenameOp, cfg: &Config) -> bool {
    if cfg.case_insensitive_fs && differs_only_by_case(&op.from, &op.to) {
        // The probe would hit the source file itself.
        return false;
    }
    fs::symlink_metadata(&op.to).is_ok()
}

/// Record the failing operation and every never-attempted successor, then
/// surface the error.
fn halt(
    order: &ExecutionOrder,
    log: &mut OutcomeLog,
    index: usize,
    op: &RenameOp,
    err: RenameError,
) -> Result<ExecutedReport, RenameError> {
    log.record_op_failed(op, &err);
    for skipped in &order.ops[index + 1..] {
        log.record_op_skipped(skipped);
    }
    Err(err)
}
