//! Core library for `edmv`.
//!
//! Batch rename driven by a text editor: the selected paths are emitted one
//! per line, the user edits the list, and the edited lines are paired back
//! by position. The resulting plan is validated as a whole (count mismatch,
//! duplicate or occupied destinations), ordered so no rename lands on a
//! still-occupied path (cycles broken via one temporary hop), and executed
//! sequentially with a re-check immediately before each rename. Everything
//! is recorded to a per-invocation outcome log; there is no rollback, by
//! design.

pub mod app;
pub mod cli;
pub mod codec;
pub mod config;
pub mod editor;
pub mod errors;
pub mod exec;
pub mod fs_ops;
pub mod logging;
pub mod outcome;
pub mod output;
pub mod plan;
pub mod shutdown;

pub use config::{Config, LogLevel};
pub use errors::RenameError;
pub use exec::{execute, ExecutedReport};
pub use outcome::OutcomeLog;
pub use plan::{build_plan, order_plan, validate_plan, ExecutionOrder, RenameOp, RenamePlan, RenameStep};
