//! Temporary sibling names for cycle breaking.
//! Pattern: .edmv.<pid>.<nanos>.<seq>.tmp, placed next to the eventual
//! destination so the final hop stays on the same filesystem.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static COUNTER: AtomicU64 = AtomicU64::new(0);

/// Generate a hidden sibling name guaranteed to collide neither with an
/// existing entry nor with any path in `avoid` (the plan's sources,
/// destinations and previously issued temp names).
pub fn temp_sibling(target: &Path, avoid: &HashSet<PathBuf>) -> PathBuf {
    let dir = target.parent().unwrap_or_else(|| Path::new("."));
    let pid = std::process::id();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    loop {
        let seq = COUNTER.fetch_add(1, Ordering::Relaxed);
        let candidate = dir.join(format!(".edmv.{pid}.{nanos}.{seq}.tmp"));
        if !avoid.contains(&candidate) && std::fs::symlink_metadata(&candidate).is_err() {
            return candidate;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sibling_lands_in_target_directory() {
        let avoid = HashSet::new();
        let t = temp_sibling(Path::new("/some/dir/file.txt"), &avoid);
        assert_eq!(t.parent(), Some(Path::new("/some/dir")));
        let name = t.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with(".edmv.") && name.ends_with(".tmp"));
    }

    #[test]
    fn avoided_names_are_skipped() {
        let mut avoid = HashSet::new();
        let first = temp_sibling(Path::new("/d/f"), &avoid);
        avoid.insert(first.clone());
        let second = temp_sibling(Path::new("/d/f"), &avoid);
        assert_ne!(first, second);
    }
}
