mod common;
use common::cli::{DeskWorkspace, run_desk, run_desk_ok, submit_issue};

use std::fs;

#[test]
fn test_corrupt_issues_are_reseeded_with_notice() {
    let workspace = DeskWorkspace::new();
    fs::create_dir_all(workspace.data_dir()).unwrap();
    fs::write(workspace.issues_file(), "{not json").unwrap();

    let text = run_desk_ok(&workspace, ["list"], "list");
    assert!(text.stdout.contains("! Saved issues were corrupt"));
    assert!(text.stdout.contains("oxy-beaumonde-issues.corrupt"));
    assert!(text.stdout.contains("Lift not working on odd floors"));

    let quarantined = workspace
        .data_dir()
        .join("oxy-beaumonde-issues.corrupt.json");
    assert_eq!(fs::read_to_string(quarantined).unwrap(), "{not json");

    // The reseeded sample was saved, so the notice is not repeated.
    let board = run_desk_ok(&workspace, ["list", "--json"], "list json").json();
    assert!(board.get("notices").is_none());
    assert_eq!(board["total"], 1);
}

#[test]
fn test_non_utf8_issues_are_moved_aside_before_submit() {
    let workspace = DeskWorkspace::new();
    let raw: &[u8] = b"[{\"id\":\"OB-1\xff\"}]";
    fs::create_dir_all(workspace.data_dir()).unwrap();
    fs::write(workspace.issues_file(), raw).unwrap();

    let text = run_desk_ok(&workspace, ["list"], "list");
    assert!(text.stdout.contains("! Saved issues could not be read"));

    submit_issue(&workspace, "Gate broken", "Asha", "B-2");

    let quarantined = workspace
        .data_dir()
        .join("oxy-beaumonde-issues.corrupt.json");
    assert_eq!(fs::read(quarantined).unwrap(), raw);
    let board = run_desk_ok(&workspace, ["list", "--json"], "list json").json();
    assert_eq!(board["cards"][0]["header"], "Maintenance: Gate broken");
}

#[test]
fn test_submit_after_corruption_replaces_data() {
    let workspace = DeskWorkspace::new();
    fs::create_dir_all(workspace.data_dir()).unwrap();
    fs::write(workspace.issues_file(), "[1, 2, 3]").unwrap();

    let id = submit_issue(&workspace, "Gate broken", "Asha", "B-2");

    let board = run_desk_ok(&workspace, ["list", "--json"], "list").json();
    assert_eq!(board["total"], 2);
    assert_eq!(board["cards"][0]["id"], id.as_str());
    assert!(board.get("notices").is_none());
}

#[test]
fn test_saved_file_is_a_camel_case_array() {
    let workspace = DeskWorkspace::new();
    let id = submit_issue(&workspace, "Gate broken", "Asha", "B-2");

    let raw = fs::read_to_string(workspace.issues_file()).unwrap();
    let saved: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let issues = saved.as_array().unwrap();
    assert_eq!(issues.len(), 2);
    assert_eq!(issues[0]["id"], id.as_str());
    assert_eq!(issues[0]["residentName"], "Asha");
    assert_eq!(issues[0]["unitNumber"], "B-2");
    assert_eq!(issues[0]["issueTitle"], "Gate broken");
    assert_eq!(issues[0]["status"], "Open");
    assert_eq!(issues[0]["updates"].as_array().unwrap().len(), 0);
    assert!(issues[0]["createdAt"].is_string());
    assert_eq!(issues[1]["residentName"], "Sample Resident");
}

#[test]
fn test_unknown_status_in_saved_data_is_kept() {
    let workspace = DeskWorkspace::new();
    fs::create_dir_all(workspace.data_dir()).unwrap();
    fs::write(
        workspace.issues_file(),
        r#"[{"id":"OB-1234","residentName":"Asha","unitNumber":"B-2","contactNumber":"1",
            "category":"Security","issueTitle":"Gate broken","issueDescription":"",
            "status":"Escalated","createdAt":"2026-10-17T09:05:00Z","updates":[]}]"#,
    )
    .unwrap();

    let card = run_desk_ok(&workspace, ["show", "OB-1234", "--committee", "--json"], "show").json();
    assert_eq!(card["status"], "Escalated");
    assert_eq!(card["status_class"], "status-open");
    assert_eq!(card["committee_form"]["selected_status"], "Open");
    assert_eq!(card["meta"], "Asha (B-2) • 17 Oct 2026, 9:05 am");

    let escalated = run_desk(&workspace, ["list", "-s", "Escalated"], "filter");
    assert!(!escalated.status.success());
}

#[test]
fn test_invalid_config_is_reported() {
    let workspace = DeskWorkspace::new();
    workspace.write_workspace_config("require_login: [oops\n");
    let output = run_desk(&workspace, ["list"], "list");
    assert!(!output.status.success());
    assert!(output.stderr.contains("Configuration error"));

    let mut workspace = DeskWorkspace::new();
    workspace.set_env("DESK_REQUIRE_LOGIN", "maybe");
    let output = run_desk(&workspace, ["list"], "list");
    assert!(output.stderr.contains("DESK_REQUIRE_LOGIN"));
}

#[test]
fn test_config_command_reports_effective_values() {
    let mut workspace = DeskWorkspace::new();
    workspace.set_env("DESK_ISSUES_KEY", "tower-b-issues");
    let config = run_desk_ok(&workspace, ["config", "--json"], "config").json();
    assert_eq!(config["issues_key"], "tower-b-issues");
    assert_eq!(config["user_key"], "oxy-beaumonde-user");
    assert_eq!(config["require_login"], false);
    assert_eq!(config["utc_offset_minutes"], 0);

    let yaml = run_desk_ok(&workspace, ["config"], "config yaml");
    assert!(yaml.stdout.contains("issues_key: tower-b-issues"));
}
