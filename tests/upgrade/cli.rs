//! The compiled binary's command line contract.
//!
//! These spawn the real executable, so stdout routing and process exit
//! codes are checked the way a calling script sees them.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::process::{Command, Output};

fn run_binary(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_upgrade-chromedriver"))
        .args(args)
        .output()
        .expect("Failed to run the upgrade-chromedriver binary")
}

/// `--help` prints the usage synopsis on stdout and exits 1, which
/// scripted callers rely on.
#[test]
fn test_help_prints_usage_and_exits_one() {
    let output = run_binary(&["--help"]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage:"), "stdout was: {stdout}");
    assert_eq!(output.status.code(), Some(1));
}

/// The short help flag behaves exactly like the long one.
#[test]
fn test_short_help_flag() {
    let output = run_binary(&["-h"]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage:"), "stdout was: {stdout}");
    assert_eq!(output.status.code(), Some(1));
}

/// Giving the version both bare and through `--chrome` is refused with
/// the usage exit code.
#[test]
fn test_conflicting_versions_exit_two() {
    let output = run_binary(&["1.1.1.1", "--chrome", "2.2.2.2"]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("either bare or through --chrome"),
        "stdout was: {stdout}"
    );
    assert_eq!(output.status.code(), Some(2));
}
