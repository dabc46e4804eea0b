use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::Path;

/// A command isolated from the user's config dir.
fn qmsview(config_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("qmsview").unwrap();
    cmd.env_remove("RUST_LOG")
        .arg("--config-dir")
        .arg(config_dir);
    cmd
}

fn json_output(cmd: &mut Command) -> Value {
    let output = cmd.arg("--json").output().unwrap();
    assert!(output.status.success(), "command failed: {:?}", output);
    serde_json::from_slice(&output.stdout).unwrap()
}

const RECORDS: &str = r#"[
  {
    "id": "CAPA-7",
    "kind": "task",
    "title": "Close out corrective action for seal leak",
    "module": "CAPA",
    "priority": "High",
    "status": "In-Progress",
    "business_unit": "Packaging",
    "due": "2026-04-02",
    "progress": 40
  },
  {
    "id": "SOP-12",
    "kind": "document",
    "title": "Line clearance procedure",
    "author": "R. Okafor",
    "module": "Document Control",
    "priority": "Low",
    "status": "Reviewing",
    "business_unit": "Packaging",
    "created": "2026-03-20"
  }
]"#;

#[test]
fn list_defaults_to_sample_data() {
    let dir = tempfile::tempdir().unwrap();
    qmsview(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("TSK-001"))
        .stdout(predicate::str::contains("Showing 1-10 of 18 (page 1 of 2)"));
}

#[test]
fn no_subcommand_lists() {
    let dir = tempfile::tempdir().unwrap();
    qmsview(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("TSK-001"));
}

#[test]
fn json_list_filtered_by_status() {
    let dir = tempfile::tempdir().unwrap();
    let json = json_output(qmsview(dir.path()).args(["list", "--status", "Completed"]));

    let list = &json["list"];
    assert_eq!(list["total_items"], 4);
    let items = list["items"].as_array().unwrap();
    assert_eq!(items.len(), 4);
    assert!(items.iter().all(|r| r["status"] == "Completed"));
}

#[test]
fn list_page_is_clamped() {
    let dir = tempfile::tempdir().unwrap();
    qmsview(dir.path())
        .args(["list", "--page", "99"])
        .assert()
        .success()
        .stdout(predicate::str::contains("out of range"))
        .stdout(predicate::str::contains("page 2 of 2"));
}

#[test]
fn list_sorted_descending_by_date() {
    let dir = tempfile::tempdir().unwrap();
    let json = json_output(qmsview(dir.path()).args(["list", "--sort", "date", "--desc"]));
    assert_eq!(json["list"]["items"][0]["id"], "TSK-012");
}

#[test]
fn board_warns_about_unplaced_records() {
    let dir = tempfile::tempdir().unwrap();
    qmsview(dir.path())
        .arg("board")
        .assert()
        .success()
        .stdout(predicate::str::contains("Pending (5)"))
        .stdout(predicate::str::contains("2 record(s) with a status outside"));
}

#[test]
fn calendar_for_given_month() {
    let dir = tempfile::tempdir().unwrap();
    qmsview(dir.path())
        .args(["calendar", "--month", "2026-01", "--today", "2026-01-20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("January 2026"))
        .stdout(predicate::str::contains("+1 more"));
}

#[test]
fn calendar_rejects_bad_month() {
    let dir = tempfile::tempdir().unwrap();
    qmsview(dir.path())
        .args(["calendar", "--month", "2026-13"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid month"));
}

#[test]
fn calendar_rejects_month_past_date_range() {
    let dir = tempfile::tempdir().unwrap();
    qmsview(dir.path())
        .args(["calendar", "--month", "262142-12"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid month"));
}

#[test]
fn calendar_reports_malformed_month_input() {
    let dir = tempfile::tempdir().unwrap();
    qmsview(dir.path())
        .args(["calendar", "--month", "January"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid month 'January'"));
}

#[test]
fn gantt_zoom_is_clamped() {
    let dir = tempfile::tempdir().unwrap();
    let json = json_output(qmsview(dir.path()).args(["gantt", "--scale", "day", "--zoom", "500"]));

    let gantt = &json["gantt"];
    assert_eq!(gantt["scale"]["scale"], "day");
    assert_eq!(gantt["scale"]["px_per_day"], 150);
    assert_eq!(gantt["bars"].as_array().unwrap().len(), 18);
    assert_eq!(gantt["window"]["start"], "2025-12-26");
    assert_eq!(gantt["window"]["end"], "2026-03-16");
}

#[test]
fn malformed_filter_date_fails() {
    let dir = tempfile::tempdir().unwrap();
    qmsview(dir.path())
        .args(["list", "--from", "2026-1-5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date"));
}

#[test]
fn data_file_replaces_sample_data() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("records.json");
    std::fs::write(&data, RECORDS).unwrap();

    qmsview(dir.path())
        .arg("--data")
        .arg(&data)
        .args(["list", "--search", "okafor"])
        .assert()
        .success()
        .stdout(predicate::str::contains("SOP-12"))
        .stdout(predicate::str::contains("CAPA-7").not())
        .stdout(predicate::str::contains("TSK-001").not());
}

#[test]
fn malformed_data_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("records.json");
    std::fs::write(&data, RECORDS.replace("2026-04-02", "2026-4-2")).unwrap();

    qmsview(dir.path())
        .arg("--data")
        .arg(&data)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn config_changes_page_size_and_data_file() {
    let dir = tempfile::tempdir().unwrap();
    qmsview(dir.path())
        .args(["config", "page-size", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("page-size set to 5"));

    let json = json_output(qmsview(dir.path()).arg("list"));
    assert_eq!(json["list"]["total_pages"], 4);

    let data = dir.path().join("records.json");
    std::fs::write(&data, RECORDS).unwrap();
    qmsview(dir.path())
        .args(["config", "data-file"])
        .arg(&data)
        .assert()
        .success();

    let json = json_output(qmsview(dir.path()).arg("list"));
    assert_eq!(json["list"]["total_items"], 2);
}

#[test]
fn config_shows_all_keys() {
    let dir = tempfile::tempdir().unwrap();
    qmsview(dir.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("page-size"))
        .stdout(predicate::str::contains("gantt-zoom"));
}

#[test]
fn grouped_help() {
    let dir = tempfile::tempdir().unwrap();
    qmsview(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Views:"))
        .stdout(predicate::str::contains("calendar"));
}
