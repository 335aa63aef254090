//! Filesystem primitives: the rename call with enriched errors, and
//! collision-checked temporary names for cycle breaking.

mod helpers;
mod rename;
mod temp;

pub use helpers::io_error_with_help_io;
pub use rename::checked_rename;
pub use temp::temp_sibling;
