//! E2E tests for the select command
//!
//! Selection scripts are piped on stdin; the selected ids come back in
//! item order.

use predicates::prelude::*;

use crate::Sandbox;

#[test]
fn click_and_shift_click_select_range() {
    Sandbox::new()
        .kv()
        .arg("select")
        .write_stdin("items 10 20 30 40 50\ntoggle 20\nshift 40\n")
        .assert()
        .success()
        .stdout("20\n30\n40\n");
}

#[test]
fn backwards_range_is_inclusive() {
    Sandbox::new()
        .kv()
        .arg("select")
        .write_stdin("items a b c d e\ntoggle d\nshift b\n")
        .assert()
        .success()
        .stdout("b\nc\nd\n");
}

#[test]
fn shift_click_can_unselect_range() {
    Sandbox::new()
        .kv()
        .arg("select")
        .write_stdin("items 1 2 3 4\nall\ntoggle 1 off\nshift 3\n")
        .assert()
        .success()
        .stdout("4\n");
}

#[test]
fn reconciliation_keeps_surviving_flags() {
    Sandbox::new()
        .kv()
        .arg("select")
        .write_stdin(
            "items 1 2 3\n\
             toggle 1\n\
             toggle 3\n\
             # 3 disappears, 4 arrives\n\
             items 1 2 4\n",
        )
        .assert()
        .success()
        .stdout("1\n");
}

#[test]
fn remove_and_reset() {
    Sandbox::new()
        .kv()
        .arg("select")
        .write_stdin("items 1 2 3\nall\nremove 2\n")
        .assert()
        .success()
        .stdout("1\n3\n");

    Sandbox::new()
        .kv()
        .arg("select")
        .write_stdin("items 1 2 3\nall\nreset\n")
        .assert()
        .success()
        .stdout("");
}

#[test]
fn json_output_is_bulk_payload() {
    Sandbox::new()
        .kv()
        .args(["select", "--json"])
        .write_stdin("items 7 8 9\ntoggle 9\ntoggle 7\n")
        .assert()
        .success()
        .stdout("{\"ids\":[7,9]}\n");
}

#[test]
fn string_ids_in_json() {
    Sandbox::new()
        .kv()
        .args(["select", "--json"])
        .write_stdin("items x y\nall\n")
        .assert()
        .success()
        .stdout("{\"ids\":[\"x\",\"y\"]}\n");
}

#[test]
fn range_fallback_from_config() {
    let script = "items 1 2 3\ntoggle 99\nshift 3\n";

    Sandbox::new()
        .kv()
        .arg("select")
        .write_stdin(script)
        .assert()
        .success()
        .stdout("3\n");

    Sandbox::with_config("[selection]\nrange_fallback = \"ignore\"\n")
        .kv()
        .arg("select")
        .write_stdin(script)
        .assert()
        .success()
        .stdout("");
}

#[test]
fn bad_script_reports_line() {
    Sandbox::new()
        .kv()
        .arg("select")
        .write_stdin("items 1 2\ntoggle\n")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("line 2"));
}

#[test]
fn select_never_writes_state() {
    let sandbox = Sandbox::new();
    sandbox
        .kv()
        .arg("select")
        .write_stdin("items 1 2\nall\n")
        .assert()
        .success();
    assert!(!sandbox.state_path().exists());
}
