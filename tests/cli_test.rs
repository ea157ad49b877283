//! CLI integration tests for carpcheck
//!
//! These tests verify the CLI commands work correctly without touching real
//! interfaces: checks run against configs whose commands are stand-ins.
//! Run with: cargo test --test cli_test

use std::io::Write;
use std::process::{Command, Stdio};
use tempfile::NamedTempFile;

/// Get the path to the carpcheck binary
fn carpcheck_bin() -> &'static str {
    env!("CARGO_BIN_EXE_carpcheck")
}

/// Run carpcheck with given args and return (exit_code, stdout, stderr)
fn run_cmd(args: &[&str]) -> (i32, String, String) {
    let output = Command::new(carpcheck_bin())
        .args(args)
        .output()
        .expect("Failed to execute command");

    let exit_code = output.status.code().unwrap_or(-1);
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    (exit_code, stdout, stderr)
}

/// Write a config file and keep it alive for the test
fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp config");
    file.write_all(content.as_bytes())
        .expect("Failed to write temp config");
    file
}

// === Help and Version Tests ===

#[test]
fn test_help() {
    let (exit_code, stdout, _stderr) = run_cmd(&["--help"]);
    assert_eq!(exit_code, 0);
    assert!(stdout.contains("Verify CARP failover interfaces"));
    assert!(stdout.contains("check"));
    assert!(stdout.contains("status"));
    assert!(stdout.contains("parse"));
}

#[test]
fn test_version() {
    let (exit_code, stdout, _stderr) = run_cmd(&["--version"]);
    assert_eq!(exit_code, 0);
    assert!(stdout.contains("carpcheck"));
}

#[test]
fn test_check_help() {
    let (exit_code, stdout, _stderr) = run_cmd(&["check", "--help"]);
    assert_eq!(exit_code, 0);
    assert!(stdout.contains("--config"));
    assert!(stdout.contains("--node"));
    assert!(stdout.contains("--json"));
}

// === Check Tests ===

#[test]
fn test_check_missing_config() {
    let (exit_code, _stdout, stderr) =
        run_cmd(&["check", "--config", "/nonexistent/carpcheck.toml"]);
    assert_eq!(exit_code, 1);
    assert!(stderr.contains("Failed to read config file"));
}

#[test]
fn test_check_invalid_config() {
    let config = write_config(
        r#"
        [[interface]]
        name = "igb0"
        vhid = 300
        "#,
    );
    let (exit_code, _stdout, stderr) =
        run_cmd(&["check", "--config", config.path().to_str().unwrap()]);
    assert_eq!(exit_code, 1);
    assert!(stderr.contains("out of range"));
}

#[test]
fn test_check_rejects_unknown_node() {
    let config = write_config("");
    let (exit_code, _stdout, stderr) = run_cmd(&[
        "check",
        "--config",
        config.path().to_str().unwrap(),
        "--node",
        "C",
    ]);
    assert_ne!(exit_code, 0);
    assert!(stderr.contains("Unknown node"));
}

#[test]
fn test_check_unlicensed_is_healthy() {
    let config = write_config(
        r#"
        [failover]
        licensed = false

        [[interface]]
        name = "igb0"
        vhid = 10
        "#,
    );
    let (exit_code, stdout, _stderr) =
        run_cmd(&["check", "--config", config.path().to_str().unwrap()]);
    assert_eq!(exit_code, 0);
    assert!(stdout.contains("healthy"));
}

#[cfg(unix)]
#[test]
fn test_check_missing_command_raises_alert() {
    let config = write_config(
        r#"
        [failover]
        licensed = true
        node = "A"

        [commands]
        ifconfig = "/nonexistent/ifconfig"

        [[interface]]
        name = "igb0"
        vhid = 10
        dhcp = true
        "#,
    );
    let (exit_code, stdout, _stderr) =
        run_cmd(&["check", "--config", config.path().to_str().unwrap()]);
    assert_eq!(exit_code, 2);
    assert!(stdout.contains("CRITICAL [HA] Interface 'igb0'"));
    assert!(stdout.contains("not found in the system"));
}

#[cfg(unix)]
#[test]
fn test_check_json_report() {
    // `echo` prints the name back (no CARP line); `false` fails like a lost ping
    let config = write_config(
        r#"
        [failover]
        licensed = true

        [commands]
        ifconfig = "echo"
        ping = "false"

        [[interface]]
        name = "igb0"
        vhid = 10
        ipv4_address = "10.0.0.2"
        ipv4_address_b = "10.0.0.3"
        "#,
    );
    let (exit_code, stdout, _stderr) = run_cmd(&[
        "check",
        "--config",
        config.path().to_str().unwrap(),
        "--node",
        "B",
        "--json",
    ]);
    assert_eq!(exit_code, 2);

    let report: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON report");
    assert_eq!(report["node"], "B");
    assert!(report["checked_at"].is_string());
    let alerts = report["alerts"].as_array().unwrap();
    assert_eq!(alerts.len(), 2);
    assert_eq!(alerts[0]["kind"], "carp_not_configured");
    assert_eq!(alerts[0]["interface"], "igb0");
    assert_eq!(alerts[0]["level"], "CRITICAL");
    assert_eq!(alerts[1]["kind"], "reachability_failed");
    assert_eq!(alerts[1]["category"], "HA");
}

// === Parse Tests ===

#[test]
fn test_parse_file() {
    let capture = write_config(
        "igb0: flags=8843<UP,BROADCAST,RUNNING> mtu 1500\n\
         \tcarp: BACKUP vhid 12 advbase 1 advskew 100\n",
    );
    let (exit_code, stdout, _stderr) = run_cmd(&["parse", capture.path().to_str().unwrap()]);
    assert_eq!(exit_code, 0);
    assert_eq!(stdout.trim(), "BACKUP vhid 12");
}

#[test]
fn test_parse_stdin() {
    let mut child = Command::new(carpcheck_bin())
        .arg("parse")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("Failed to spawn carpcheck");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"em0: flags=8843<UP> mtu 1500\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "not configured");
}
