//! End-to-end CLI tests for the reviewers binary.

mod support;

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Binary command isolated from the user's config and cache directories.
fn reviewers(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("reviewers").unwrap();
    cmd.env("XDG_CONFIG_HOME", home.join("config"))
        .env("XDG_CACHE_HOME", home.join("cache"))
        .env_remove("RUST_LOG");
    cmd
}

fn fixture_workbook(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("sheet.xlsx");
    support::write_reviewer_workbook(
        &path,
        &[
            ["@alice", "Python, R", "", "EPFL", "a@x.com", "Bioinformatics", "1", "3", "1", "0"],
            ["bob", "Rust", "C", "", "", "Systems", "0", "1", "0", "0"],
        ],
    );
    path
}

#[test]
fn test_binary_help_displays_usage() {
    let home = TempDir::new().unwrap();
    reviewers(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Normalize the JOSS reviewer sheet"));
}

#[test]
fn test_binary_version_displays_version() {
    let home = TempDir::new().unwrap();
    reviewers(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("reviewers"));
}

#[test]
fn test_binary_invalid_flag_returns_error() {
    let home = TempDir::new().unwrap();
    reviewers(home.path())
        .arg("--invalid-flag")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_binary_missing_rules_dir_fails() {
    let home = TempDir::new().unwrap();
    let workbook = fixture_workbook(home.path());
    reviewers(home.path())
        .arg("--input")
        .arg(&workbook)
        .arg("--rules-dir")
        .arg(home.path().join("no-rules"))
        .arg("--output-dir")
        .arg(home.path().join("out"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load rule tables"));
    assert!(!home.path().join("out").exists());
}

#[test]
fn test_binary_local_workbook_writes_exports() {
    let home = TempDir::new().unwrap();
    let workbook = fixture_workbook(home.path());
    let out = home.path().join("out");

    reviewers(home.path())
        .arg("-q")
        .arg("--input")
        .arg(&workbook)
        .arg("--rules-dir")
        .arg(support::sample_rules_dir())
        .arg("--output-dir")
        .arg(&out)
        .assert()
        .success();

    for file in [
        "topics.tsv",
        "affiliations.tsv",
        "full_table.tsv",
        "full.json",
        "bioinfo.tsv",
        "bioinfo.json",
        "triples.tsv",
    ] {
        assert!(out.join(file).exists(), "{file} should be written");
    }
    let full = std::fs::read_to_string(out.join("full_table.tsv")).unwrap();
    assert!(full.contains("alice\tpython|r\t"));
    assert!(full.contains("bob\trust\tc\t"));
}

#[test]
fn test_binary_reads_output_dir_from_config_file() {
    let home = TempDir::new().unwrap();
    let workbook = fixture_workbook(home.path());
    let config_dir = home.path().join("config").join("reviewers");
    std::fs::create_dir_all(&config_dir).unwrap();
    let out = home.path().join("from-config");
    std::fs::write(
        config_dir.join("config.toml"),
        format!("output_dir = \"{}\"\n", out.display()),
    )
    .unwrap();

    reviewers(home.path())
        .arg("--input")
        .arg(&workbook)
        .arg("--rules-dir")
        .arg(support::sample_rules_dir())
        .assert()
        .success();

    assert!(out.join("full.json").exists());
}

#[test]
fn test_binary_invalid_config_file_fails() {
    let home = TempDir::new().unwrap();
    let config_dir = home.path().join("config").join("reviewers");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("config.toml"), "skip_rows = many\n").unwrap();

    reviewers(home.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file"));
}
