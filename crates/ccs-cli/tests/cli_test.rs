//! CLI integration tests using assert_cmd
//!
//! These tests verify the CLI commands work correctly end-to-end. Every test
//! points `CCS_CLAUDE_DIR` at a temporary directory.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Get a command instance for the ccs binary, isolated in `claude_dir`
fn ccs_cmd(claude_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("ccs").expect("Failed to find ccs binary");
    cmd.env("CCS_CLAUDE_DIR", claude_dir)
        .env("HOME", claude_dir)
        .env_remove("RUST_LOG");
    cmd
}

fn write_profiles(claude_dir: &Path, profiles: &Value) {
    fs::create_dir_all(claude_dir).expect("Failed to create claude dir");
    fs::write(
        claude_dir.join("profiles-settings.json"),
        serde_json::to_string_pretty(profiles).unwrap(),
    )
    .expect("Failed to write profiles");
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).expect("Failed to read")).expect("Invalid JSON")
}

fn sample_profiles() -> Value {
    json!({
        "work": {
            "description": "Work account",
            "model": "opus",
            "env": {
                "ANTHROPIC_AUTH_TOKEN": "sk-ant-REDACTED",
                "ANTHROPIC_BASE_URL": "https://a"
            }
        },
        "home": {"model": "sonnet"}
    })
}

#[test]
fn test_help_command() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    ccs_cmd(temp_dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "ccs - Claude Code configuration switcher",
        ));
}

#[test]
fn test_version_command() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    ccs_cmd(temp_dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("ccs"));
}

#[test]
fn test_project_help() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    ccs_cmd(temp_dir.path())
        .args(["project", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Manage project directories"));
}

#[test]
fn test_list_empty_creates_catalog() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    ccs_cmd(temp_dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No profiles found"));

    let catalog = temp_dir.path().join("profiles-settings.json");
    assert_eq!(read_json(&catalog), json!({}));
}

#[test]
fn test_list_shows_profiles_in_order() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    write_profiles(temp_dir.path(), &sample_profiles());

    ccs_cmd(temp_dir.path())
        .arg("ls")
        .assert()
        .success()
        .stdout(predicate::str::contains("1. work"))
        .stdout(predicate::str::contains("2. home"));
}

#[test]
fn test_list_with_broken_catalog_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    fs::write(temp_dir.path().join("profiles-settings.json"), "{ nope").unwrap();

    ccs_cmd(temp_dir.path())
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("JSON parse error"));
}

#[test]
fn test_switch_writes_settings() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    write_profiles(temp_dir.path(), &sample_profiles());

    ccs_cmd(temp_dir.path())
        .args(["switch", "home"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Switched to profile: home"))
        .stdout(predicate::str::contains("Model: sonnet"));

    let settings = read_json(&temp_dir.path().join("settings.json"));
    assert_eq!(settings, json!({"model": "sonnet"}));
    assert!(!temp_dir.path().join("providers.json").exists());
}

#[test]
fn test_use_alias_updates_providers() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    write_profiles(temp_dir.path(), &sample_profiles());
    fs::write(
        temp_dir.path().join("providers.json"),
        r#"{"anthropic": {"base_url": "https://old", "api_key": "old"}, "other": {"x": 1}}"#,
    )
    .unwrap();

    ccs_cmd(temp_dir.path())
        .args(["use", "work"])
        .assert()
        .success()
        .stdout(predicate::str::contains("API URL: https://a"));

    let providers = read_json(&temp_dir.path().join("providers.json"));
    assert_eq!(providers["anthropic"]["base_url"], "https://a");
    assert_eq!(providers["anthropic"]["api_key"], "sk-ant-REDACTED");
    assert_eq!(providers["other"], json!({"x": 1}));
}

#[test]
fn test_switch_unknown_profile_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    write_profiles(temp_dir.path(), &sample_profiles());

    ccs_cmd(temp_dir.path())
        .args(["switch", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Profile 'nope' not found"))
        .stderr(predicate::str::contains("work, home"));

    assert!(!temp_dir.path().join("settings.json").exists());
}

#[test]
fn test_switch_named_profile_on_empty_catalog_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    ccs_cmd(temp_dir.path())
        .args(["switch", "ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Profile 'ghost' not found"));

    assert!(!temp_dir.path().join("settings.json").exists());
}

#[test]
fn test_current_without_settings() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    ccs_cmd(temp_dir.path())
        .arg("current")
        .assert()
        .success()
        .stdout(predicate::str::contains("No settings.json found"));
}

#[test]
fn test_current_after_switch() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    write_profiles(temp_dir.path(), &sample_profiles());

    ccs_cmd(temp_dir.path())
        .args(["switch", "work"])
        .assert()
        .success();

    ccs_cmd(temp_dir.path())
        .arg("now")
        .assert()
        .success()
        .stdout(predicate::str::contains("Current profile: work"))
        .stdout(predicate::str::contains("Description: Work account"))
        .stdout(predicate::str::contains("API Key: sk-ant-api...abcd"));
}

#[test]
fn test_current_custom_settings() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    write_profiles(temp_dir.path(), &sample_profiles());
    fs::write(temp_dir.path().join("settings.json"), r#"{"model": "haiku"}"#).unwrap();

    ccs_cmd(temp_dir.path())
        .arg("current")
        .assert()
        .success()
        .stdout(predicate::str::contains("Current profile: custom"))
        .stdout(predicate::str::contains("Model: haiku"));
}

#[test]
fn test_open_seeds_example_and_runs_editor() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    ccs_cmd(temp_dir.path())
        .arg("open")
        .env("VISUAL", "true")
        .assert()
        .success()
        .stdout(predicate::str::contains("Opening profile file"));

    let catalog = read_json(&temp_dir.path().join("profiles-settings.json"));
    assert_eq!(catalog["example"]["model"], "opus");
}

#[test]
fn test_project_add_list_remove() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let project_dir = TempDir::new().expect("Failed to create project dir");
    let resolved = project_dir.path().canonicalize().unwrap();

    ccs_cmd(temp_dir.path())
        .args(["project", "add"])
        .arg(project_dir.path())
        .args(["--name", "site"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added project 'site'"));

    ccs_cmd(temp_dir.path())
        .args(["project", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1. site"))
        .stdout(predicate::str::contains(resolved.to_string_lossy().to_string()));

    ccs_cmd(temp_dir.path())
        .args(["project", "remove", "site", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed project 'site'"));

    let projects = read_json(&temp_dir.path().join("ccs-project.json"));
    assert_eq!(projects, json!([]));
}

#[test]
fn test_project_add_defaults_name_to_directory() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let parent = TempDir::new().expect("Failed to create project dir");
    let project_dir = parent.path().join("my-app");
    fs::create_dir_all(&project_dir).unwrap();

    ccs_cmd(temp_dir.path())
        .args(["project", "add"])
        .arg(&project_dir)
        .assert()
        .success();

    let projects = read_json(&temp_dir.path().join("ccs-project.json"));
    assert_eq!(projects[0]["name"], "my-app");
}

#[test]
fn test_project_add_duplicate_name_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let first = TempDir::new().expect("Failed to create project dir");
    let second = TempDir::new().expect("Failed to create project dir");

    ccs_cmd(temp_dir.path())
        .args(["project", "add"])
        .arg(first.path())
        .args(["--name", "site"])
        .assert()
        .success();

    ccs_cmd(temp_dir.path())
        .args(["project", "add"])
        .arg(second.path())
        .args(["--name", "site"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    let projects = read_json(&temp_dir.path().join("ccs-project.json"));
    assert_eq!(projects.as_array().unwrap().len(), 1);
}

#[test]
fn test_project_add_same_dir_relative_is_duplicate_path() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let project_dir = TempDir::new().expect("Failed to create project dir");

    ccs_cmd(temp_dir.path())
        .args(["project", "add"])
        .arg(project_dir.path())
        .args(["--name", "one"])
        .assert()
        .success();

    ccs_cmd(temp_dir.path())
        .current_dir(project_dir.path())
        .args(["project", "add", ".", "--name", "two"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Project path"));
}

#[test]
fn test_project_add_missing_dir_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    ccs_cmd(temp_dir.path())
        .args(["project", "add", "/definitely/not/here", "--name", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_project_remove_unknown_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    ccs_cmd(temp_dir.path())
        .args(["project", "remove", "ghost", "--force"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Project 'ghost' not found"));
}

#[test]
fn test_project_cd_prints_path_only() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let project_dir = TempDir::new().expect("Failed to create project dir");
    let resolved = project_dir.path().canonicalize().unwrap();

    ccs_cmd(temp_dir.path())
        .args(["project", "add"])
        .arg(project_dir.path())
        .args(["--name", "site"])
        .assert()
        .success();

    ccs_cmd(temp_dir.path())
        .args(["project", "cd", "site"])
        .assert()
        .success()
        .stdout(format!("{}\n", resolved.display()));
}

#[test]
fn test_project_list_empty() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    ccs_cmd(temp_dir.path())
        .args(["project", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No projects yet"));
}

#[cfg(unix)]
#[test]
fn test_code_runs_claude_in_project() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let project_dir = TempDir::new().expect("Failed to create project dir");

    ccs_cmd(temp_dir.path())
        .args(["project", "add"])
        .arg(project_dir.path())
        .args(["--name", "site"])
        .assert()
        .success();

    ccs_cmd(temp_dir.path())
        .args(["code", "site"])
        .env("CCS_CLAUDE_BIN", "true")
        .assert()
        .success()
        .stdout(predicate::str::contains("Launching project 'site'"));
}
