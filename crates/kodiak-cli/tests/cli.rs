//! Runs the `kodiak` binary end to end.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use kodiak_archive::{ArchiveFormat, create_archive};
use tempfile::TempDir;

fn kodiak(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_kodiak"))
        .current_dir(cwd)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn download(temp: &Path) -> PathBuf {
    let dir = temp.join("download");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("7-1 - Linus Pelt - Sep 5, 2023 859 AM - essay.md"), "v1").unwrap();
    fs::write(dir.join("7-2 - Linus Pelt - Sep 5, 2023 901 AM - essay.md"), "v2").unwrap();
    fs::write(dir.join("index.html"), "<html></html>").unwrap();
    let archive = temp.join("Essay.zip");
    create_archive(&dir, &archive, ArchiveFormat::Zip).unwrap();
    archive
}

#[test]
fn init_then_archive_from_submissions_dir() {
    let temp = TempDir::new().unwrap();
    download(temp.path());

    let output = kodiak(
        temp.path(),
        &["init", "essay", "Essay.zip", "--duplicates", "number-newer"],
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let student = temp.path().join("essay/submissions/Pelt_Linus");
    assert_eq!(fs::read_to_string(student.join("essay.md")).unwrap(), "v1");
    assert_eq!(fs::read_to_string(student.join("essay (1).md")).unwrap(), "v2");

    let output = kodiak(&student, &["archive", "--report", "json"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["originals"], 2);
    assert_eq!(report["replaced"], 2);
    assert!(temp.path().join("essay/gradedArchive/Essay.zip").is_file());
}

#[test]
fn log_file_receives_events() {
    let temp = TempDir::new().unwrap();
    download(temp.path());

    let output = kodiak(
        temp.path(),
        &["--log-level", "info", "--log-file", "kodiak.log", "init", "essay", "Essay.zip"],
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let log = fs::read_to_string(temp.path().join("kodiak.log")).unwrap();
    assert!(log.contains("Initialising project"));
    assert!(log.contains("Imported submissions"));
}

#[test]
fn init_twice_fails() {
    let temp = TempDir::new().unwrap();
    download(temp.path());

    assert!(kodiak(temp.path(), &["init", "essay", "Essay.zip"]).status.success());
    let output = kodiak(temp.path(), &["init", "essay", "Essay.zip"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("already a Kodiak project"));
    assert!(stderr.contains("hint: Delete"));
}

#[test]
fn archive_outside_project_fails() {
    let temp = TempDir::new().unwrap();
    let output = kodiak(temp.path(), &["archive"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("is not inside a Kodiak project"));
}

#[test]
fn formats_lists_extensions() {
    let temp = TempDir::new().unwrap();
    let output = kodiak(temp.path(), &["formats"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for extension in kodiak_archive::supported_extensions() {
        assert!(stdout.contains(extension), "missing {extension}");
    }
}
