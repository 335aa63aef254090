//! The rename primitive.
//! Plain `fs::rename` with enriched errors; on Unix the destination
//! directory is fsynced afterwards (best-effort) so the rename itself is
//! durable. Never removes an existing destination: the caller has already
//! verified the target is free, and overwriting would defeat the whole
//! validation story.

use std::fs;
use std::io;
use std::path::Path;

use super::helpers::io_error_with_help_io;

pub fn checked_rename(from: &Path, to: &Path) -> io::Result<()> {
    fs::rename(from, to).map_err(io_error_with_help_io("rename", from))?;

    #[cfg(unix)]
    if let Some(parent) = to.parent() {
        // Ignore fsync errors; the rename already succeeded.
        let _ = fsync_dir(parent);
    }

    Ok(())
}

#[cfg(unix)]
fn fsync_dir(dir: &Path) -> io::Result<()> {
    let f = fs::File::open(dir)?;
    f.sync_all()
}
