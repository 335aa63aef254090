#![cfg(unix)]

use edmv::OutcomeLog;
use std::fs;
use tempfile::tempdir;

#[test]
fn outcome_log_under_symlinked_dir_is_refused() {
    let td = tempdir().unwrap();
    let real = td.path().join("real");
    fs::create_dir(&real).unwrap();
    let link = td.path().join("link");
    std::os::unix::fs::symlink(&real, &link).unwrap();

    let err = OutcomeLog::create(&link.join("outcome.log")).unwrap_err();
    assert!(err.to_string().contains("symlink"), "{err}");
}

#[test]
fn outcome_log_creates_missing_parent_dirs() {
    let td = tempdir().unwrap();
    let nested = td.path().join("a").join("b").join("outcome.log");
    let log = OutcomeLog::create(&nested).unwrap();
    assert_eq!(log.path(), nested.as_path());
    assert!(nested.exists());
}
