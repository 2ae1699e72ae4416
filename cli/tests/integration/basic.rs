//! Basic functionality integration tests for the mgather CLI.

use assert_cmd::cargo::cargo_bin_cmd;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_basic_gather() {
    let src = TempDir::new().unwrap();
    let dst = TempDir::new().unwrap();

    fs::create_dir_all(src.path().join("holiday")).unwrap();
    fs::write(src.path().join("holiday/lena.png"), "png-bytes").unwrap();
    fs::write(src.path().join("holiday/notes.txt"), "not media").unwrap();

    let mut cmd = cargo_bin_cmd!("mgather");
    cmd.arg(src.path())
        .arg(dst.path().join("out"))
        .assert()
        .success();

    let out = dst.path().join("out");
    assert!(out.join("holiday/lena.png").exists());
    assert!(!out.join("holiday/notes.txt").exists());
    assert_eq!(
        fs::read_to_string(out.join("holiday/lena.png")).unwrap(),
        "png-bytes"
    );
}

#[test]
fn test_manifest_written_by_default() {
    let src = TempDir::new().unwrap();
    let dst = TempDir::new().unwrap();

    fs::create_dir_all(src.path().join("pics")).unwrap();
    fs::write(src.path().join("pics/a.jpg"), "a").unwrap();
    fs::write(src.path().join("pics/b.jpg"), "b").unwrap();

    let mut cmd = cargo_bin_cmd!("mgather");
    cmd.arg(src.path())
        .arg(dst.path().join("out"))
        .assert()
        .success();

    let manifest = fs::read_to_string(dst.path().join("out/filepathlist.txt")).unwrap();
    assert_eq!(manifest.lines().count(), 2);
    assert!(manifest.lines().all(|line| line.ends_with(".jpg")));
}

#[test]
fn test_no_manifest_flag() {
    let src = TempDir::new().unwrap();
    let dst = TempDir::new().unwrap();

    fs::create_dir_all(src.path().join("pics")).unwrap();
    fs::write(src.path().join("pics/a.jpg"), "a").unwrap();

    let mut cmd = cargo_bin_cmd!("mgather");
    cmd.arg("--no-manifest")
        .arg(src.path())
        .arg(dst.path().join("out"))
        .assert()
        .success();

    assert!(!dst.path().join("out/filepathlist.txt").exists());
}

#[test]
fn test_custom_suffix_filter() {
    let src = TempDir::new().unwrap();
    let dst = TempDir::new().unwrap();

    fs::create_dir_all(src.path().join("mixed")).unwrap();
    fs::write(src.path().join("mixed/keep.jpg"), "x").unwrap();
    fs::write(src.path().join("mixed/drop.png"), "x").unwrap();

    let mut cmd = cargo_bin_cmd!("mgather");
    cmd.arg("-s")
        .arg("jpg")
        .arg(src.path())
        .arg(dst.path().join("out"))
        .assert()
        .success();

    let out = dst.path().join("out");
    assert!(out.join("mixed/keep.jpg").exists());
    assert!(!out.join("mixed/drop.png").exists());
}

#[test]
fn test_suffix_match_is_case_insensitive() {
    let src = TempDir::new().unwrap();
    let dst = TempDir::new().unwrap();

    fs::create_dir_all(src.path().join("cam")).unwrap();
    fs::write(src.path().join("cam/IMG_0001.JPG"), "x").unwrap();

    let mut cmd = cargo_bin_cmd!("mgather");
    cmd.arg(src.path())
        .arg(dst.path().join("out"))
        .assert()
        .success();

    assert!(dst.path().join("out/cam/IMG_0001.JPG").exists());
}

#[test]
fn test_quiet_mode() {
    let src = TempDir::new().unwrap();
    let dst = TempDir::new().unwrap();

    fs::create_dir_all(src.path().join("pics")).unwrap();
    fs::write(src.path().join("pics/a.jpg"), "x").unwrap();

    let mut cmd = cargo_bin_cmd!("mgather");
    cmd.arg("--quiet")
        .arg(src.path())
        .arg(dst.path().join("out"))
        .assert()
        .success();

    assert!(dst.path().join("out/pics/a.jpg").exists());
}

#[test]
fn test_hidden_directories_are_gathered() {
    let src = TempDir::new().unwrap();
    let dst = TempDir::new().unwrap();

    fs::create_dir_all(src.path().join(".hidden")).unwrap();
    fs::write(src.path().join(".hidden/lena.png"), "x").unwrap();

    let mut cmd = cargo_bin_cmd!("mgather");
    cmd.arg(src.path())
        .arg(dst.path().join("out"))
        .assert()
        .success();

    assert!(dst.path().join("out/.hidden/lena.png").exists());
}
