//! Integration tests for destination-name collision handling.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_literal_duplicates_get_numbered_directories() {
    let src = TempDir::new().unwrap();
    let dst = TempDir::new().unwrap();

    for owner in ["alice", "bob", "carol"] {
        let dir = src.path().join(owner).join("photos");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(format!("{owner}.jpg")), owner).unwrap();
    }

    let mut cmd = cargo_bin_cmd!("mgather");
    cmd.arg(src.path())
        .arg(dst.path().join("out"))
        .assert()
        .success();

    let out = dst.path().join("out");
    assert!(out.join("photos/alice.jpg").exists());
    assert!(out.join("photos_1/bob.jpg").exists());
    assert!(out.join("photos_2/carol.jpg").exists());
}

#[test]
fn test_case_collision_gets_disambiguated_directory() {
    let src = TempDir::new().unwrap();
    let dst = TempDir::new().unwrap();

    fs::create_dir_all(src.path().join("holiday")).unwrap();
    fs::create_dir_all(src.path().join("jane.doe/holiday")).unwrap();
    fs::create_dir_all(src.path().join("john.doe/Holiday")).unwrap();
    fs::write(src.path().join("holiday/a.png"), "a").unwrap();
    fs::write(src.path().join("jane.doe/holiday/b.png"), "b").unwrap();
    fs::write(src.path().join("john.doe/Holiday/c.png"), "c").unwrap();

    let mut cmd = cargo_bin_cmd!("mgather");
    cmd.arg(src.path())
        .arg(dst.path().join("out"))
        .assert()
        .success();

    let out = dst.path().join("out");
    assert!(out.join("holiday/a.png").exists());
    assert!(out.join("holiday_1/b.png").exists());
    assert!(out.join("Holiday (1)/c.png").exists());
}

#[test]
fn test_same_source_directory_shares_destination() {
    let src = TempDir::new().unwrap();
    let dst = TempDir::new().unwrap();

    fs::create_dir_all(src.path().join("a/b")).unwrap();
    fs::write(src.path().join("a/b/one.jpg"), "1").unwrap();
    fs::write(src.path().join("a/b/two.jpg"), "2").unwrap();

    let mut cmd = cargo_bin_cmd!("mgather");
    cmd.arg(src.path())
        .arg(dst.path().join("out"))
        .assert()
        .success();

    let out = dst.path().join("out");
    assert!(out.join("b/one.jpg").exists());
    assert!(out.join("b/two.jpg").exists());
    // Exactly one data directory besides the manifest
    let dirs: Vec<_> = fs::read_dir(&out)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_dir())
        .collect();
    assert_eq!(dirs.len(), 1);
}

#[test]
fn test_prepopulated_destination_is_a_conflict() {
    let src = TempDir::new().unwrap();
    let dst = TempDir::new().unwrap();

    fs::create_dir_all(src.path().join("photos")).unwrap();
    fs::write(src.path().join("photos/a.jpg"), "a").unwrap();

    let out = dst.path().join("out");
    fs::create_dir_all(out.join("photos")).unwrap();

    let mut cmd = cargo_bin_cmd!("mgather");
    cmd.arg(src.path())
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    // Nothing was merged into the pre-existing directory
    assert!(!out.join("photos/a.jpg").exists());
}
