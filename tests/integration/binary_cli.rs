//! End-to-end tests against the compiled `gitops` binary

use std::process::Command;
use tempfile::TempDir;

fn gitops(test_dir: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_gitops"));
    cmd.env("HOME", test_dir.path())
        .env("XDG_CONFIG_HOME", test_dir.path())
        .env_remove("GITOPS_ENDPOINT")
        .env_remove("GITOPS_LOG")
        .env_remove("GITOPS_LOG_OUTPUT");
    cmd
}

#[test]
fn test_invalid_endpoint_exits_with_error() {
    let test_dir = TempDir::new().unwrap();
    let output = gitops(&test_dir)
        .args(["--endpoint", "not a url", "get", "templates"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("Error:"), "stderr was: {}", stderr);
}

#[test]
fn test_unknown_subcommand_is_a_usage_error() {
    let test_dir = TempDir::new().unwrap();
    let output = gitops(&test_dir)
        .args(["delete", "cluster"])
        .output()
        .unwrap();
    assert!(!output.status.success());
}

#[test]
fn test_help_lists_commands() {
    let test_dir = TempDir::new().unwrap();
    let output = gitops(&test_dir).arg("--help").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("get"));
    assert!(stdout.contains("add"));
}

#[test]
fn test_quiet_by_default() {
    let test_dir = TempDir::new().unwrap();
    let output = gitops(&test_dir)
        .args(["--endpoint", "not a url", "get", "credentials"])
        .output()
        .unwrap();
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.lines().count(), 1, "stderr was: {}", stderr);
}

#[test]
fn test_verbose_logs_to_file() {
    let test_dir = TempDir::new().unwrap();
    let log_file = test_dir.path().join("logs").join("gitops.log");
    let output = gitops(&test_dir)
        .arg("--verbose")
        .args(["--log-output", "file", "--log-file"])
        .arg(&log_file)
        .args(["--endpoint", "not a url", "get", "templates"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let logs = std::fs::read_to_string(&log_file).unwrap();
    assert!(logs.contains("GitOps CLI starting"), "logs were: {}", logs);
}
