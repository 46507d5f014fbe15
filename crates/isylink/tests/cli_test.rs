//! Integration tests for the `isylink` CLI binary.
//!
//! Everything runs against the recorded gateway documents of the
//! `isylink-api` test fixtures, so no live gateway is needed.
#![allow(clippy::unwrap_used)]

use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// `isylink` with env isolation: no user config, no `ISYLINK_*` vars.
fn isylink_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("isylink");
    cmd.env("HOME", "/tmp/isylink-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/isylink-cli-test-nonexistent")
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("ISYLINK_CONFIG")
        .env_remove("ISYLINK_GATEWAY_ADDRESS")
        .env_remove("ISYLINK_LOGIN_NAME")
        .env_remove("ISYLINK_PASSWORD");
    cmd
}

fn recorded_gateway() -> String {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../isylink-api/tests/fixtures");
    format!("file://{}", dir.display())
}

/// `isylink --gateway <recorded> <args...>`
fn recorded(args: &[&str]) -> assert_cmd::Command {
    let mut cmd = isylink_cmd();
    cmd.arg("--gateway").arg(recorded_gateway()).args(args);
    cmd
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = isylink_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"), "Expected 'Usage' in output:\n{stderr}");
}

#[test]
fn test_help_flag() {
    isylink_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("ISY")
            .and(predicate::str::contains("poll"))
            .and(predicate::str::contains("switch"))
            .and(predicate::str::contains("nodes")),
    );
}

#[test]
fn test_version_flag() {
    isylink_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("isylink"));
}

#[test]
fn test_completions_bash() {
    isylink_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

// ── Recorded gateway ────────────────────────────────────────────────

#[test]
fn test_nodes_classifies_switches() {
    recorded(&["nodes", "-o", "plain"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("15 2D A 1\tswitch\tDeck Lights")
                .and(predicate::str::contains("1B 6E B2 1\tunsupported (16.1.65.0)"))
                .and(predicate::str::contains("30 0B 9 1\tswitch\tSpare Outlet")),
        );
}

#[test]
fn test_nodes_json_marks_subnodes() {
    let output = recorded(&["nodes", "-o", "json-compact"]).output().unwrap();
    assert!(output.status.success());
    let nodes: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let subnode = |address: &str| {
        nodes
            .as_array()
            .unwrap()
            .iter()
            .find(|n| n["address"] == address)
            .unwrap()["subnode"]
            .clone()
    };
    assert_eq!(subnode("1B 6E B2 1"), serde_json::Value::Bool(false));
    assert_eq!(subnode("1B 6E B2 2"), serde_json::Value::Bool(true));
}

#[test]
fn test_poll_publishes_initial_state() {
    recorded(&["poll", "-o", "plain"])
        .assert()
        .success()
        .stdout("15 2D A 1\ttrue\n16 3F E2 1\tfalse\n22 B4 5 1\tfalse\n");
}

#[test]
fn test_poll_json() {
    let output = recorded(&["poll", "-o", "json-compact"]).output().unwrap();
    assert!(output.status.success());
    let updates: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(updates[0]["node_id"], "15 2D A 1");
    assert_eq!(updates[0]["output_type"], "switch");
    assert_eq!(updates[0]["value"], "true");
    assert_eq!(updates.as_array().unwrap().len(), 3);
}

#[test]
fn test_status_lists_properties() {
    recorded(&["status", "-o", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("15 2D A 1\tST\t255"));
}

#[test]
fn test_info_shows_version() {
    recorded(&["info", "-o", "plain"])
        .assert()
        .success()
        .stdout("3.3.10\n");
}

#[test]
fn test_switch_on_recording_is_not_confirmed() {
    recorded(&["switch", "15 2D A 1", "off"])
        .assert()
        .success()
        .stderr(predicate::str::contains("has not reported the new state"));
}

#[test]
fn test_switch_unknown_node_is_not_found() {
    recorded(&["switch", "FF FF FF 1", "on"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("No switch registered"));
}

#[test]
fn test_switch_sensor_is_not_found() {
    recorded(&["switch", "1B 6E B2 1", "on"]).assert().code(4);
}

#[test]
fn test_missing_recording_is_connection_error() {
    isylink_cmd()
        .args(["--gateway", "file:///tmp/isylink-cli-test-nonexistent/gw", "poll"])
        .assert()
        .code(7);
}

// ── Configuration ───────────────────────────────────────────────────

#[test]
fn test_no_gateway_is_usage_error() {
    isylink_cmd()
        .arg("nodes")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No gateway address configured"));
}

#[test]
fn test_unsupported_scheme_is_usage_error() {
    isylink_cmd()
        .args(["--gateway", "ftp://isy.local", "nodes"])
        .assert()
        .code(2);
}

#[test]
fn test_config_file_is_used() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        format!("gateway_address = \"{}\"\npublisher_id = \"garage\"\n", recorded_gateway()),
    )
    .unwrap();

    isylink_cmd()
        .arg("--config")
        .arg(&path)
        .args(["info", "-o", "plain"])
        .assert()
        .success()
        .stdout("3.3.10\n");
}

#[test]
fn test_config_path_flag() {
    isylink_cmd()
        .args(["--config", "/tmp/isylink-custom.toml", "config", "path"])
        .assert()
        .success()
        .stdout("/tmp/isylink-custom.toml\n");
}

#[test]
fn test_config_show_masks_password() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        "gateway_address = \"http://192.168.1.50\"\nlogin_name = \"admin\"\npassword = \"hunter2\"\n",
    )
    .unwrap();

    isylink_cmd()
        .arg("--config")
        .arg(&path)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("login_name = \"admin\"")
                .and(predicate::str::contains("********"))
                .and(predicate::str::contains("hunter2").not()),
        );
}
