//! CLI tests for the herokron binary
//!
//! Each test runs in its own temp directory with an explicit `--database`, so
//! nothing touches the user's real database or config.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::{tempdir, TempDir};

const KEY_A: &str = "aaaaaaaa-aaaa-aaaa-aaaa-aaaaaaaaaaaa";

fn herokron(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("herokron").unwrap();
    cmd.current_dir(dir.path())
        .arg("--database")
        .arg(dir.path().join("db.json"));
    cmd
}

fn read_db(path: &Path) -> serde_json::Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_config_show_json() {
    let dir = tempdir().unwrap();
    let output = herokron(&dir)
        .args(["config", "show", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let config: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(config["heroku"]["api_url"], "https://api.heroku.com");
    assert_eq!(config["heroku"]["timeout_secs"], 30);
}

#[test]
fn test_config_show_toml_and_json_conflict() {
    let dir = tempdir().unwrap();
    herokron(&dir)
        .args(["config", "show", "--toml", "--json"])
        .assert()
        .failure();
}

#[test]
fn test_webhook_without_url_shows_current() {
    let dir = tempdir().unwrap();
    herokron(&dir)
        .arg("webhook")
        .assert()
        .success()
        .stdout(predicate::str::contains("No webhook configured."));

    herokron(&dir)
        .args(["webhook", "https://ptb.discord.com/api/webhooks/42/tok"])
        .assert()
        .success();

    herokron(&dir)
        .arg("webhook")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "https://discord.com/api/webhooks/42/tok",
        ));
}

#[test]
fn test_color_sets_and_shows() {
    let dir = tempdir().unwrap();
    herokron(&dir)
        .args(["color", "#FFFFFF"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#FFFFFF (16777215)"));

    assert_eq!(read_db(&dir.path().join("db.json"))["color"], 16777215);
}

#[test]
fn test_sync_unknown_key_keeps_key_out_of_stderr() {
    let dir = tempdir().unwrap();
    herokron(&dir)
        .args(["sync", KEY_A])
        .assert()
        .failure()
        .stderr(predicate::str::contains("API key is not registered"))
        .stderr(predicate::str::contains(KEY_A).not());
}

#[test]
fn test_bad_color_leaves_database_alone() {
    let dir = tempdir().unwrap();
    herokron(&dir)
        .args(["color", "FFFFFFF"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));

    assert_eq!(read_db(&dir.path().join("db.json"))["color"], 7762880);
}
