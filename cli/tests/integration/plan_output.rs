//! Integration tests for --plan (dry-run) output.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_plan_prints_mapping_without_copying() {
    let src = TempDir::new().unwrap();
    let dst = TempDir::new().unwrap();

    fs::create_dir_all(src.path().join("holiday")).unwrap();
    fs::write(src.path().join("holiday/lena.png"), "x").unwrap();

    let out = dst.path().join("out");
    let mut cmd = cargo_bin_cmd!("mgather");
    cmd.arg("--plan")
        .arg(src.path())
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Plan (1 files into 1 directories):"))
        .stdout(predicate::str::contains("lena.png"));

    // Dry run: destination untouched
    assert!(!out.exists());
}

#[test]
fn test_plan_shows_collision_suffixes() {
    let src = TempDir::new().unwrap();
    let dst = TempDir::new().unwrap();

    fs::create_dir_all(src.path().join("a/photos")).unwrap();
    fs::create_dir_all(src.path().join("b/photos")).unwrap();
    fs::write(src.path().join("a/photos/1.jpg"), "1").unwrap();
    fs::write(src.path().join("b/photos/2.jpg"), "2").unwrap();

    let mut cmd = cargo_bin_cmd!("mgather");
    cmd.arg("-n")
        .arg(src.path())
        .arg(dst.path().join("out"))
        .assert()
        .success()
        .stdout(predicate::str::contains("photos_1"));
}

#[test]
fn test_plan_json_output() {
    let src = TempDir::new().unwrap();
    let dst = TempDir::new().unwrap();

    fs::create_dir_all(src.path().join("holiday")).unwrap();
    fs::create_dir_all(src.path().join("jane/holiday")).unwrap();
    fs::write(src.path().join("holiday/a.png"), "a").unwrap();
    fs::write(src.path().join("jane/holiday/b.png"), "b").unwrap();

    let mut cmd = cargo_bin_cmd!("mgather");
    let assert = cmd
        .arg("--plan")
        .arg("--output")
        .arg("json")
        .arg(src.path())
        .arg(dst.path().join("out"))
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let payload: Value = serde_json::from_str(&stdout).unwrap();

    assert_eq!(payload["schema_version"], "1.0");
    assert_eq!(payload["mode"], "plan");
    assert_eq!(payload["items"].as_array().unwrap().len(), 2);
    assert_eq!(payload["dest_dirs"].as_array().unwrap().len(), 2);

    let dirs: Vec<&str> = payload["dest_dirs"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(Value::as_str)
        .collect();
    assert!(dirs[0].ends_with("holiday"));
    assert!(dirs[1].ends_with("holiday_1"));
}
