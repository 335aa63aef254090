//! Plan construction.
//! Pairs original paths with edited lines strictly by position and classifies
//! each pair as unchanged or renamed. Length disagreement means the editor
//! desynchronized the correspondence, so nothing can be trusted and the whole
//! build is refused up front.

use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

use crate::errors::RenameError;

use super::{RenamePlan, RenameStep};

/// Build a candidate plan from the original list and the edited lines.
/// Cross-entry conflicts (collisions, existing targets, cycles) are the
/// validator's job; this only judges each pair in isolation.
pub fn build_plan(originals: &[PathBuf], edited: &[String]) -> Result<RenamePlan, RenameError> {
    if originals.len() != edited.len() {
        return Err(RenameError::CountMismatch {
            expected: originals.len(),
            actual: edited.len(),
        });
    }

    // A repeated input path breaks positional pairing the same way a bad
    // line count does: two lines now claim the same file. Refuse before
    // pairing, even when the repeated entries are left unedited.
    let mut seen: HashSet<&Path> = HashSet::new();
    for orig in originals {
        if !seen.insert(orig.as_path()) {
            return Err(RenameError::DuplicateSource(orig.clone()));
        }
    }

    let mut plan = RenamePlan::default();
    for (i, (orig, line)) in originals.iter().zip(edited).enumerate() {
        // symlink_metadata: a dangling symlink is still a renameable entry.
        if fs::symlink_metadata(orig).is_err() {
            return Err(RenameError::SourceMissing(orig.clone()));
        }

        if line.as_str() == orig.to_string_lossy() {
            plan.unchanged.push(orig.clone());
            continue;
        }

        check_destination(i, line)?;
        let dest = PathBuf::from(line);
        if dest == *orig {
            // Encoding artifact (lossy round-trip); treat as unchanged.
            plan.unchanged.push(orig.clone());
            continue;
        }

        plan.steps.push(RenameStep {
            source: orig.clone(),
            dest,
            index: i,
        });
    }

    debug!(
        renames = plan.steps.len(),
        unchanged = plan.unchanged.len(),
        "built candidate plan"
    );
    Ok(plan)
}

/// Conservative per-line destination validation; when in doubt, reject.
fn check_destination(i: usize, line: &str) -> Result<(), RenameError> {
    let refuse = |reason: &'static str| {
        Err(RenameError::InvalidDestination {
            line: i + 1,
            text: line.to_string(),
            reason,
        })
    };

    if line.is_empty() {
        return refuse("empty line");
    }
    if line.contains('\0') {
        return refuse("contains NUL");
    }
    let path = Path::new(line);
    if !path.is_absolute() {
        return refuse("not an absolute path");
    }
    if line.ends_with('/') || line.ends_with(std::path::MAIN_SEPARATOR) {
        return refuse("trailing path separator");
    }
    match path.components().next_back() {
        Some(Component::Normal(_)) => {}
        _ => return refuse("no usable file name"),
    }
    // `.` and `..` segments make the destination ambiguous relative to what
    // was validated; require the edited line to be already-normalized.
    if path
        .components()
        .any(|c| matches!(c, Component::CurDir | Component::ParentDir))
    {
        return refuse("contains '.' or '..' segments");
    }
    Ok(())
}
