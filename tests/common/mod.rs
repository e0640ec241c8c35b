//! Shared test helpers for integration tests
//!
//! This module provides common utilities used across all test files.

#![allow(dead_code)]

use assert_cmd::cargo;
use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to get a dse command
pub fn dse() -> Command {
    Command::new(cargo::cargo_bin!("dse"))
}

/// Helper to get a dse command isolated from the real user config
///
/// Runs inside `tmp` and points the platform config directory there too.
pub fn dse_in(tmp: &TempDir) -> Command {
    let mut cmd = dse();
    cmd.current_dir(tmp.path())
        .env("XDG_CONFIG_HOME", tmp.path().join("xdg"))
        .env("HOME", tmp.path())
        .env_remove("DSE_NU_MAX")
        .env_remove("RUST_LOG");
    cmd
}

/// Helper to create an empty working directory
pub fn setup_test_dir() -> TempDir {
    TempDir::new().unwrap()
}

/// Helper to write a user-level config file for `tmp`
pub fn write_user_config(tmp: &TempDir, content: &str) -> PathBuf {
    let dir = tmp.path().join("xdg").join("dse");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("config.yaml");
    std::fs::write(&path, content).unwrap();
    path
}

/// Helper to write `.dse.yaml` in `tmp`
pub fn write_local_config(tmp: &TempDir, content: &str) -> PathBuf {
    let path = tmp.path().join(".dse.yaml");
    std::fs::write(&path, content).unwrap();
    path
}

/// Run an edit script with JSON output and return the published records
pub fn run_edit_json(tmp: &TempDir, extra_args: &[&str], script: &str) -> Vec<serde_json::Value> {
    let output = dse_in(tmp)
        .args(["edit", "--format", "json"])
        .args(extra_args)
        .write_stdin(script)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "dse edit failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    String::from_utf8_lossy(&output.stdout)
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}
