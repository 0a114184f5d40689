//! E2E tests for table option commands
//!
//! Every command runs in a fresh process, so these also cover the state
//! file round trip.

use predicates::prelude::*;
use std::fs;

use crate::Sandbox;

// =============================================================================
// Sorting
// =============================================================================

#[test]
fn sort_same_column_flips_between_runs() {
    let sandbox = Sandbox::new();

    sandbox
        .kv()
        .args(["sort", "volumeIndex", "title"])
        .assert()
        .success()
        .stdout("volumeIndex sorted by title descending\n");

    sandbox
        .kv()
        .args(["sort", "volumeIndex", "title"])
        .assert()
        .success()
        .stdout("volumeIndex sorted by title ascending\n");
}

#[test]
fn sort_new_column_keeps_direction() {
    let sandbox = Sandbox::new();

    sandbox
        .kv()
        .args(["sort", "issueTable", "title"])
        .assert()
        .success()
        .stdout("issueTable sorted by title descending\n");

    let state = sandbox.state_json();
    assert_eq!(state["issueTable"]["sortKey"], "title");
    assert_eq!(state["issueTable"]["secondarySortKey"], serde_json::Value::Null);
}

#[test]
fn sort_explicit_direction() {
    let sandbox = Sandbox::new();
    sandbox
        .kv()
        .args(["sort", "queueTable", "speed", "desc"])
        .assert()
        .success()
        .stdout(predicate::str::contains("speed descending"));
}

#[test]
fn fixed_direction_column_ignores_request() {
    let sandbox = Sandbox::new();
    sandbox
        .kv()
        .args(["sort", "searchResults", "matchRejections", "desc"])
        .assert()
        .success()
        .stdout("searchResults sorted by matchRejections ascending\n");
}

#[test]
fn unsortable_column_is_rejected() {
    let sandbox = Sandbox::new();
    sandbox
        .kv()
        .args(["sort", "historyTable", "downloadedAt"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("not sortable"));
    assert!(!sandbox.state_path().exists());
}

// =============================================================================
// Columns and Filters
// =============================================================================

#[test]
fn column_visibility_persists() {
    let sandbox = Sandbox::new();
    sandbox
        .kv()
        .args(["column", "issueTable", "releaseGroup", "show"])
        .assert()
        .success();

    sandbox
        .kv()
        .args(["show", "issueTable"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"releaseGroup\s+visible").unwrap());
}

#[test]
fn locked_column_cannot_be_hidden() {
    let sandbox = Sandbox::new();
    sandbox
        .kv()
        .args(["column", "volumeIndex", "title", "hide"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("cannot be changed"));
}

#[test]
fn volume_index_columns_cannot_be_toggled() {
    let sandbox = Sandbox::new();
    sandbox
        .kv()
        .args(["column", "volumeIndex", "year", "hide"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("cannot be changed"));
    assert!(!sandbox.state_path().exists());
}

#[test]
fn search_results_default_to_issue_number_ascending() {
    Sandbox::new()
        .kv()
        .args(["show", "searchResults"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sort: issueNumber ascending"));
}

#[test]
fn move_column() {
    let sandbox = Sandbox::new();
    sandbox
        .kv()
        .args(["move", "queueTable", "progress", "1"])
        .assert()
        .success();

    let state = sandbox.state_json();
    assert_eq!(state["queueTable"]["columns"][1]["name"], "progress");
}

#[test]
fn search_filters_toggle() {
    let sandbox = Sandbox::new();
    sandbox
        .kv()
        .args(["filter", "searchResults", "hideDownloaded", "on"])
        .assert()
        .success()
        .stdout("searchResults hideDownloaded on\n");

    let state = sandbox.state_json();
    assert_eq!(state["searchResults"]["filters"]["hideDownloaded"], true);
    assert_eq!(state["searchResults"]["filters"]["hideUnmatched"], false);
}

#[test]
fn filter_on_table_without_filters_is_rejected() {
    Sandbox::new()
        .kv()
        .args(["filter", "queueTable", "hideDownloaded", "on"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("does not apply"));
}

#[test]
fn volume_index_filter_key_and_page_size() {
    let sandbox = Sandbox::new();
    sandbox.kv().args(["filter-key", "wanted"]).assert().success();
    sandbox.kv().args(["page-size", "50"]).assert().success();

    sandbox
        .kv()
        .args(["show", "volumeIndex"])
        .assert()
        .success()
        .stdout(predicate::str::contains("filter key: wanted"))
        .stdout(predicate::str::contains("page size: 50"));
}

// =============================================================================
// Show, Reset and Persistence
// =============================================================================

#[test]
fn show_json_is_parseable() {
    let sandbox = Sandbox::new();
    let output = sandbox
        .kv()
        .args(["show", "volumeIndex", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["table"], "volumeIndex");
    assert_eq!(summary["sortKey"], "title");
    assert_eq!(summary["sortDirection"], "ascending");
    assert_eq!(summary["pageSize"], 20);
}

#[test]
fn reset_single_table() {
    let sandbox = Sandbox::new();
    sandbox
        .kv()
        .args(["sort", "queueTable", "title"])
        .assert()
        .success();
    sandbox
        .kv()
        .args(["sort", "issueTable", "title"])
        .assert()
        .success();
    sandbox
        .kv()
        .args(["reset", "queueTable"])
        .assert()
        .success();

    let state = sandbox.state_json();
    assert_eq!(state["queueTable"]["sortKey"], "priority");
    assert_eq!(state["issueTable"]["sortKey"], "title");
}

#[test]
fn corrupt_table_entry_falls_back_to_defaults() {
    let sandbox = Sandbox::new();
    fs::create_dir_all(sandbox.state_path().parent().unwrap()).unwrap();
    fs::write(
        sandbox.state_path(),
        r#"{"volumeIndex": {"sortKey": 42}, "retiredTable": {}}"#,
    )
    .unwrap();

    sandbox
        .kv()
        .args(["show", "volumeIndex"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sort: title ascending"));
}

#[test]
fn non_object_state_file_is_error() {
    let sandbox = Sandbox::new();
    fs::create_dir_all(sandbox.state_path().parent().unwrap()).unwrap();
    fs::write(sandbox.state_path(), "[]").unwrap();

    sandbox
        .kv()
        .args(["show", "volumeIndex"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Persist error"));
}

#[test]
fn autosave_off_leaves_state_untouched() {
    let sandbox = Sandbox::with_config("[storage]\nautosave = false\n");
    sandbox
        .kv()
        .args(["sort", "volumeIndex", "year"])
        .assert()
        .success();
    assert!(!sandbox.state_path().exists());
}

#[test]
fn state_file_from_config() {
    let sandbox = Sandbox::new();
    let state = sandbox.path().join("from-config.json");
    fs::write(
        sandbox.config_path(),
        format!("[storage]\nstate_file = {:?}\n", state.to_string_lossy()),
    )
    .unwrap();

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("kv");
    cmd.arg("--config")
        .arg(sandbox.config_path())
        .args(["sort", "volumeIndex", "year"])
        .assert()
        .success();
    assert!(state.exists());
}
