//! Smoke tests to verify command wiring of the `ratings` binary

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_top_level_help_lists_commands() {
    let mut cmd = Command::cargo_bin("ratings").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("init-db"));
}

#[test]
fn test_serve_help() {
    let mut cmd = Command::cargo_bin("ratings").unwrap();
    cmd.arg("serve").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Address to bind to"))
        .stdout(predicate::str::contains("SQLite database file"));
}

#[test]
fn test_init_db_creates_file() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("ratings.db");

    let mut cmd = Command::cargo_bin("ratings").unwrap();
    cmd.arg("init-db").arg("--database").arg(&db);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Schema ready"));
    assert!(db.exists());
}

#[test]
fn test_init_db_is_repeatable() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("ratings.db");

    for _ in 0..2 {
        Command::cargo_bin("ratings")
            .unwrap()
            .arg("init-db")
            .arg("--database")
            .arg(&db)
            .assert()
            .success();
    }
}

#[test]
fn test_unknown_command_fails() {
    let mut cmd = Command::cargo_bin("ratings").unwrap();
    cmd.arg("frobnicate");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}
