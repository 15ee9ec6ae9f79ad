//! Integration tests for CLI functionality

use std::fs;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get path to compiled binary
fn zeabur_bin() -> &'static std::path::Path {
    assert_cmd::cargo::cargo_bin!("zeabur")
}

/// Command isolated from the user's config, token and API
fn zeabur(config_dir: &TempDir) -> Command {
    let mut cmd = Command::new(zeabur_bin());
    cmd.env("ZEABUR_CONFIG", config_dir.path().join("cli.yaml"))
        .env_remove("ZEABUR_TOKEN")
        .env("ZEABUR_SERVER_URL", "http://127.0.0.1:9");
    cmd
}

/// Test that help flag works
#[test]
fn test_help_flag() {
    let output = Command::new(zeabur_bin()).arg("--help").output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Manage Zeabur projects, services and deployments"));
    assert!(stdout.contains("context"));
    assert!(stdout.contains("template"));
}

/// Test that version flag works
#[test]
fn test_version_flag() {
    let output = Command::new(zeabur_bin()).arg("--version").output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("zeabur"));
}

/// Test invalid output format
#[test]
fn test_invalid_output_format() {
    let dir = TempDir::new().unwrap();
    zeabur(&dir)
        .args(["-o", "csv", "context", "get"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

/// Context get works without a token and marks empty slots
#[test]
fn test_context_get_empty() {
    let dir = TempDir::new().unwrap();
    zeabur(&dir)
        .args(["context", "get"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Project"))
        .stdout(predicate::str::contains("<not set>"));
}

/// Context get reads the saved context
#[test]
fn test_context_get_from_config_file() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("cli.yaml"),
        "context:\n  project:\n    id: p-1\n    name: blog\n",
    )
    .unwrap();

    zeabur(&dir)
        .args(["context", "get", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"blog\""))
        .stdout(predicate::str::contains("\"id\": \"p-1\""));
}

/// Context clear empties the saved context
#[test]
fn test_context_clear_persists() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cli.yaml");
    fs::write(&path, "context:\n  project:\n    id: p-1\n    name: blog\n").unwrap();

    zeabur(&dir).args(["context", "clear"]).assert().success();

    let saved = fs::read_to_string(&path).unwrap();
    assert!(!saved.contains("p-1"));
}

/// Logout drops the stored token
#[test]
fn test_logout_clears_token() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cli.yaml");
    fs::write(&path, "token: secret\nuser: Ada\nusername: ada\n").unwrap();

    zeabur(&dir)
        .args(["auth", "logout"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Logged out"));

    let saved = fs::read_to_string(&path).unwrap();
    assert!(!saved.contains("secret"));
}

/// API commands fail early without a token
#[test]
fn test_missing_token() {
    let dir = TempDir::new().unwrap();
    zeabur(&dir)
        .args(["project", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No API token found"));
}

/// Non-interactive login without a token cannot open the browser flow
#[test]
fn test_login_non_interactive_requires_token() {
    let dir = TempDir::new().unwrap();
    zeabur(&dir)
        .args(["-i", "false", "auth", "login"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ZEABUR_TOKEN"));
}

/// Non-interactive service commands need a project context
#[test]
fn test_non_interactive_requires_project_context() {
    let dir = TempDir::new().unwrap();
    zeabur(&dir)
        .args(["-i", "false", "--token", "tok", "service", "restart", "--name", "web", "-y"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("zeabur context set project"));
}

/// Template search needs a keyword when it cannot prompt
#[test]
fn test_template_search_non_interactive_requires_keyword() {
    let dir = TempDir::new().unwrap();
    zeabur(&dir)
        .args(["-i", "false", "--token", "tok", "template", "search"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("keyword is required"));
}

/// A missing .env file is reported before any API call
#[test]
fn test_variable_env_missing_file() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.env");
    zeabur(&dir)
        .args(["--token", "tok", "variable", "env", "-f"])
        .arg(&missing)
        .assert()
        .failure()
        .stderr(predicate::str::contains("file not found"));
}
