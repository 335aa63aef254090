//! io::Error enrichment for rename failures.
//! Maps the raw OS code to an actionable hint so a halted batch is
//! diagnosable from the outcome log alone.

use std::io;
use std::path::Path;

#[cfg(unix)]
use libc;

fn build_message(op: &str, path: &Path, e: &io::Error) -> String {
    let mut msg = format!("{} '{}': {}", op, path.display(), e);

    if let Some(code) = e.raw_os_error() {
        #[cfg(unix)]
        match code {
            libc::EACCES | libc::EPERM => {
                msg.push_str(" — permission denied; check ownership and directory write bits.");
            }
            libc::EXDEV => {
                msg.push_str(" — destination is on a different filesystem; rename cannot cross devices.");
            }
            libc::ENOENT => {
                msg.push_str(" — path not found; a component of the destination directory may be missing.");
            }
            libc::EEXIST | libc::ENOTEMPTY => {
                msg.push_str(" — destination already occupied.");
            }
            libc::EROFS => {
                msg.push_str(" — read-only filesystem.");
            }
            libc::ENAMETOOLONG => {
                msg.push_str(" — destination name too long.");
            }
            libc::EBUSY => {
                msg.push_str(" — resource busy; another process holds the file.");
            }
            _ => {}
        }
        #[cfg(windows)]
        match code {
            5 => msg.push_str(" — access denied; check permissions."), // ERROR_ACCESS_DENIED
            17 => msg.push_str(" — not same device; rename cannot cross filesystems."), // ERROR_NOT_SAME_DEVICE
            32 => msg.push_str(" — sharing violation; file is in use."), // ERROR_SHARING_VIOLATION
            2 | 3 => msg.push_str(" — path not found; verify the destination directory exists."),
            183 => msg.push_str(" — destination already exists."), // ERROR_ALREADY_EXISTS
            206 => msg.push_str(" — destination path too long."),  // ERROR_FILENAME_EXCED_RANGE
            _ => {}
        }
        msg.push_str(&format!(" [os code: {}]", code));
    }

    msg
}

/// Returns a closure for `.map_err(...)` that keeps the original ErrorKind
/// while enriching the message with platform hints.
pub fn io_error_with_help_io<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> io::Error + 'a {
    move |e: io::Error| io::Error::new(e.kind(), build_message(op, path, &e))
}
