//! Integration tests for CLI error reporting and exit codes.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_missing_source_exits_with_usage_error() {
    let dst = TempDir::new().unwrap();

    let mut cmd = cargo_bin_cmd!("mgather");
    cmd.arg("/nonexistent/source/tree")
        .arg(dst.path().join("out"))
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_source_is_a_file_exits_with_usage_error() {
    let src = TempDir::new().unwrap();
    let dst = TempDir::new().unwrap();

    let file = src.path().join("a.jpg");
    fs::write(&file, "x").unwrap();

    let mut cmd = cargo_bin_cmd!("mgather");
    cmd.arg(&file)
        .arg(dst.path().join("out"))
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("not a directory"));
}

#[test]
fn test_directory_conflict_exits_nonzero() {
    let src = TempDir::new().unwrap();
    let dst = TempDir::new().unwrap();

    fs::create_dir_all(src.path().join("pics")).unwrap();
    fs::write(src.path().join("pics/a.jpg"), "x").unwrap();

    let out = dst.path().join("out");
    fs::create_dir_all(out.join("pics")).unwrap();

    let mut cmd = cargo_bin_cmd!("mgather");
    cmd.arg(src.path())
        .arg(&out)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("already exists"));
}

#[cfg(unix)]
#[test]
fn test_best_effort_reports_every_failure() {
    use std::os::unix::fs::PermissionsExt;

    let src = TempDir::new().unwrap();
    let dst = TempDir::new().unwrap();

    fs::create_dir_all(src.path().join("pics")).unwrap();
    fs::write(src.path().join("pics/good.jpg"), "ok").unwrap();

    let bad = src.path().join("pics/bad.jpg");
    fs::write(&bad, "secret").unwrap();
    fs::set_permissions(&bad, fs::Permissions::from_mode(0o000)).unwrap();
    if fs::read(&bad).is_ok() {
        // Running as root: permission bits are not enforced, nothing to test
        return;
    }

    let out = dst.path().join("out");
    let mut cmd = cargo_bin_cmd!("mgather");
    cmd.arg("--best-effort")
        .arg(src.path())
        .arg(&out)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("bad.jpg"))
        .stderr(predicate::str::contains("1 of 2 files"));

    // The healthy file was still copied
    assert!(out.join("pics/good.jpg").exists());
}

#[cfg(unix)]
#[test]
fn test_fail_fast_default_aborts_on_failure() {
    use std::os::unix::fs::PermissionsExt;

    let src = TempDir::new().unwrap();
    let dst = TempDir::new().unwrap();

    fs::create_dir_all(src.path().join("pics")).unwrap();
    let bad = src.path().join("pics/bad.jpg");
    fs::write(&bad, "secret").unwrap();
    fs::set_permissions(&bad, fs::Permissions::from_mode(0o000)).unwrap();
    if fs::read(&bad).is_ok() {
        return;
    }

    let mut cmd = cargo_bin_cmd!("mgather");
    cmd.arg(src.path())
        .arg(dst.path().join("out"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Failed to copy"));
}
