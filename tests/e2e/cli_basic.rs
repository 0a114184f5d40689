//! Basic CLI tests for kv
//!
//! Tests for command-line argument parsing, help output, version display,
//! and error handling for invalid inputs.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;

use crate::Sandbox;

fn kv() -> Command {
    cargo_bin_cmd!("kv")
}

// =============================================================================
// Help and Version
// =============================================================================

#[test]
fn help_flag_shows_usage() {
    kv().arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("USAGE:"))
        .stdout(predicate::str::contains("kv"))
        .stdout(predicate::str::contains("COMMANDS:"));
}

#[test]
fn help_short_flag_shows_usage() {
    kv().arg("-h")
        .assert()
        .success()
        .stdout(predicate::str::contains("USAGE:"));
}

#[test]
fn help_shows_config_file_section() {
    kv().arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("CONFIG FILE:"))
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn version_flag_shows_version() {
    kv().arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn version_short_flag_shows_version() {
    kv().arg("-V")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

// =============================================================================
// Invalid Arguments (Exit Code 3)
// =============================================================================

#[test]
fn missing_command_returns_exit_code_3() {
    Sandbox::new()
        .kv()
        .assert()
        .code(3)
        .stderr(predicate::str::contains("No command"));
}

#[test]
fn unknown_option_returns_exit_code_3() {
    kv().arg("--unknown-option")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Unknown option"));
}

#[test]
fn unknown_table_returns_exit_code_3() {
    Sandbox::new()
        .kv()
        .args(["show", "volumes"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Unknown table: volumes"));
}

#[test]
fn unknown_column_returns_exit_code_3() {
    Sandbox::new()
        .kv()
        .args(["sort", "queueTable", "year"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Unknown column 'year'"));
}

#[test]
fn invalid_direction_returns_exit_code_3() {
    Sandbox::new()
        .kv()
        .args(["sort", "volumeIndex", "year", "sideways"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("direction"));
}

#[test]
fn config_without_path_returns_exit_code_3() {
    kv().arg("--config")
        .assert()
        .code(3)
        .stderr(predicate::str::is_empty().not());
}

#[test]
fn unreadable_config_returns_exit_code_3() {
    let sandbox = Sandbox::with_config("[storage\nautosave = ");
    sandbox
        .kv()
        .arg("tables")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Failed to load config"));
}

// =============================================================================
// Tables
// =============================================================================

#[test]
fn tables_lists_every_table() {
    Sandbox::new()
        .kv()
        .arg("tables")
        .assert()
        .success()
        .stdout(predicate::str::contains("volumeIndex"))
        .stdout(predicate::str::contains("issueTable"))
        .stdout(predicate::str::contains("queueTable"))
        .stdout(predicate::str::contains("searchResults"))
        .stdout(predicate::str::contains("historyTable"))
        .stdout(predicate::str::contains("blocklistTable"));
}
