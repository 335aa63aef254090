//! Default path helpers and symlink checks.
//! OS-appropriate config/log locations plus the symlinked-ancestor probe
//! used before any file sink is opened.

use dirs::{config_dir, data_dir};
use std::env;
use std::io;
use std::path::{Path, PathBuf};

/// Config file location: $EDMV_CONFIG wins, else the platform config dir.
pub fn default_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("EDMV_CONFIG") {
        return Some(PathBuf::from(p));
    }
    if let Some(mut base) = config_dir() {
        base.push("edmv");
        base.push("config.xml");
        Some(base)
    } else {
        env::var("HOME").ok().map(|h| {
            PathBuf::from(h)
                .join(".config")
                .join("edmv")
                .join("config.xml")
        })
    }
}

/// Default tracing log file (platform data dir).
pub fn default_log_path() -> Option<PathBuf> {
    app_data_file("edmv.log")
}

/// Default outcome-record file (platform data dir).
pub fn default_outcome_log_path() -> Option<PathBuf> {
    app_data_file("outcome.log")
}

fn app_data_file(name: &str) -> Option<PathBuf> {
    if let Some(mut base) = data_dir() {
        base.push("edmv");
        base.push(name);
        Some(base)
    } else {
        env::var("HOME").ok().map(|h| {
            PathBuf::from(h)
                .join(".local")
                .join("share")
                .join("edmv")
                .join(name)
        })
    }
}

/// Return true if any existing ancestor of `path` is a symlink.
pub fn path_has_symlink_ancestor(path: &Path) -> io::Result<bool> {
    let mut p = path.parent();
    while let Some(anc) = p {
        if anc.exists() {
            let meta = std::fs::symlink_metadata(anc)?;
            if meta.file_type().is_symlink() {
                return Ok(true);
            }
        }
        p = anc.parent();
    }
    Ok(false)
}
