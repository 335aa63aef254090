//! Outcome log: an append-only JSON-lines record of what one invocation
//! planned, refused or actually did. The path is passed in explicitly and
//! the log lives for exactly one invocation; there is no process-global
//! sink. Each record is flushed as it is written so a halt mid-batch still
//! leaves an accurate prefix on disk.

use anyhow::{Context, Result};
use chrono::Local;
use serde::Serialize;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::config::path_has_symlink_ancestor;
use crate::errors::RenameError;
use crate::plan::{RenameOp, RenamePlan};

#[derive(Debug)]
pub struct OutcomeLog {
    path: PathBuf,
    file: File,
}

#[derive(Serialize)]
struct PlannedStep {
    from: String,
    to: String,
}

#[derive(Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum Record {
    Plan {
        ts: String,
        renames: Vec<PlannedStep>,
        unchanged: usize,
    },
    Rejected {
        ts: String,
        code: &'static str,
        detail: String,
    },
    OpOk {
        ts: String,
        from: String,
        to: String,
        via_temp: bool,
    },
    OpFailed {
        ts: String,
        from: String,
        to: String,
        code: &'static str,
        detail: String,
    },
    OpSkipped {
        ts: String,
        from: String,
        to: String,
    },
}

fn now() -> String {
    Local::now().to_rfc3339()
}

impl OutcomeLog {
    /// Open (append) the log at an explicit path, creating parent
    /// directories. Refuses a path with a symlinked ancestor, same as the
    /// tracing file layer.
    pub fn create(path: &Path) -> Result<Self> {
        if path_has_symlink_ancestor(path)? {
            anyhow::bail!(
                "refusing outcome log at '{}': an ancestor is a symlink",
                path.display()
            );
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create outcome log directory '{}'", parent.display()))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("open outcome log '{}'", path.display()))?;
        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn record_plan(&mut self, plan: &RenamePlan) {
        self.write(&Record::Plan {
            ts: now(),
            renames: plan
                .steps
                .iter()
                .map(|s| PlannedStep {
                    from: s.source.to_string_lossy().into_owned(),
                    to: s.dest.to_string_lossy().into_owned(),
                })
                .collect(),
            unchanged: plan.unchanged.len(),
        });
    }

    pub fn record_rejection(&mut self, err: &RenameError) {
        self.write(&Record::Rejected {
            ts: now(),
            code: err.code(),
            detail: err.to_string(),
        });
    }

    pub fn record_op_ok(&mut self, op: &RenameOp) {
        self.write(&Record::OpOk {
            ts: now(),
            from: op.from.to_string_lossy().into_owned(),
            to: op.to.to_string_lossy().into_owned(),
            via_temp: op.via_temp,
        });
    }

    pub fn record_op_failed(&mut self, op: &RenameOp, err: &RenameError) {
        self.write(&Record::OpFailed {
            ts: now(),
            from: op.from.to_string_lossy().into_owned(),
            to: op.to.to_string_lossy().into_owned(),
            code: err.code(),
            detail: err.to_string(),
        });
    }

    pub fn record_op_skipped(&mut self, op: &RenameOp) {
        self.write(&Record::OpSkipped {
            ts: now(),
            from: op.from.to_string_lossy().into_owned(),
            to: op.to.to_string_lossy().into_owned(),
        });
    }

    // A log write failure must not mask the rename outcome; warn and carry on.
    fn write(&mut self, record: &Record) {
        let res = serde_json::to_string(record)
            .map_err(std::io::Error::other)
            .and_then(|line| writeln!(self.file, "{line}").and_then(|()| self.file.flush()));
        if let Err(e) = res {
            warn!(path = %self.path.display(), error = %e, "failed to append outcome record");
        }
    }
}
