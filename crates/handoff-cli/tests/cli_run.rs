// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Integration tests for `handoff run`.
//! Each test runs the built binary and checks its stdout, stderr and exit code.

use std::process::{Command, Output};

fn handoff(args: &[&str], capacity_env: Option<&str>) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_handoff"));
    cmd.args(args).env("NO_COLOR", "1").env_remove("RUST_LOG");
    match capacity_env {
        Some(value) => cmd.env("HANDOFF_CAPACITY", value),
        None => cmd.env_remove("HANDOFF_CAPACITY"),
    };
    cmd.output().expect("failed to run handoff")
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

#[test]
fn default_run_transfers_one_to_ten() {
    let out = handoff(&["run"], None);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let text = stdout(&out);
    assert!(text.contains("Source data:      [1, 2, 3, 4, 5, 6, 7, 8, 9, 10]"));
    assert!(text.contains("Destination data: [1, 2, 3, 4, 5, 6, 7, 8, 9, 10]"));
    assert!(text.contains("Transfer successful: true"));
}

#[test]
fn capacity_one_hundred_items() {
    let out = handoff(&["run", "--capacity", "1", "--count", "100"], None);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert!(stdout(&out).contains("Transfer successful: true"));
}

#[test]
fn empty_source() {
    let out = handoff(&["run", "--count", "0"], None);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("Destination data: []"));
    assert!(text.contains("Transfer successful: true"));
}

#[test]
fn zero_capacity_aborts() {
    let out = handoff(&["run", "--capacity", "0"], None);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("capacity must be at least 1"));
    assert!(!stdout(&out).contains("Source data"));
}

#[test]
fn capacity_from_environment() {
    let out = handoff(&["run"], Some("0"));
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("capacity must be at least 1"));

    let out = handoff(&["run"], Some("ten"));
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("HANDOFF_CAPACITY"));

    let out = handoff(&["run"], Some("2"));
    assert!(out.status.success());
}

#[test]
fn flag_overrides_environment() {
    let out = handoff(&["run", "--capacity", "5"], Some("0"));
    assert!(out.status.success(), "stderr: {}", stderr(&out));
}

#[test]
fn unknown_command() {
    let out = handoff(&["frobnicate"], None);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("unknown command: frobnicate"));
}

#[test]
fn version() {
    let out = handoff(&["--version"], None);
    assert!(out.status.success());
    assert!(stdout(&out).starts_with("handoff "));
}

/// Escape sequence that styles the header starting at `header`.
fn header_style(text: &str, header: &str) -> String {
    let at = text
        .find(header)
        .unwrap_or_else(|| panic!("{} missing from:\n{}", header, text));
    let start = text[..at]
        .rfind('\x1b')
        .unwrap_or_else(|| panic!("{} is not styled", header));
    text[start..at].to_string()
}

#[test]
fn run_help_headers_share_one_style() {
    let out = Command::new(env!("CARGO_BIN_EXE_handoff"))
        .args(["run", "--help"])
        .env_remove("NO_COLOR")
        .env("FORCE_COLOR", "1")
        .output()
        .expect("failed to run handoff");
    assert!(out.status.success());
    let text = stdout(&out);
    assert_eq!(header_style(&text, "Usage"), header_style(&text, "Options:"));
}
