//! Basic CLI E2E tests.
//!
//! Each test runs the built binary against its own temporary HOME so the
//! data directory and config file start empty.

use std::path::Path;
use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_focusdesk"))
        .args(args)
        .env("HOME", home)
        .env_remove("FOCUSDESK_ENV")
        .env_remove("FOCUSDESK_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

/// Run a CLI command and expect success.
fn run_cli_success(home: &Path, args: &[&str]) -> String {
    let (stdout, stderr, code) = run_cli(home, args);
    assert_eq!(code, 0, "CLI command failed: {:?}\n{}", args, stderr);
    stdout
}

fn parse_json(stdout: &str) -> serde_json::Value {
    serde_json::from_str(stdout).expect("Failed to parse JSON output")
}

#[test]
fn test_task_add_and_list() {
    let home = tempfile::tempdir().unwrap();
    let out = run_cli_success(
        home.path(),
        &[
            "task",
            "add",
            "Write essay",
            "--date",
            "2026-10-19",
            "--time",
            "9:00",
            "--category",
            "work",
        ],
    );
    assert!(out.contains("Task created: 1"));

    let tasks = parse_json(&run_cli_success(home.path(), &["task", "list", "--json"]));
    let tasks = tasks.as_array().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["time"], "09:00");
    assert_eq!(tasks[0]["day"], "Monday");
    assert_eq!(tasks[0]["category"], "Work");
    assert_eq!(tasks[0]["completed"], false);
}

#[test]
fn test_task_toggle_and_delete_by_id() {
    let home = tempfile::tempdir().unwrap();
    for title in ["first", "second"] {
        run_cli_success(
            home.path(),
            &["task", "add", title, "--date", "2026-10-20", "--time", "14:30"],
        );
    }

    assert!(run_cli_success(home.path(), &["task", "delete", "1"]).contains("Task deleted: 1"));
    assert!(run_cli_success(home.path(), &["task", "toggle", "2"]).contains("Task toggled: 2"));
    assert!(run_cli_success(home.path(), &["task", "toggle", "7"]).contains("Task not found: 7"));

    let tasks = parse_json(&run_cli_success(home.path(), &["task", "list", "--json"]));
    let tasks = tasks.as_array().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["title"], "second");
    assert_eq!(tasks[0]["completed"], true);
}

#[test]
fn test_task_add_rejects_bad_time() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(
        home.path(),
        &["task", "add", "Late", "--date", "2026-10-19", "--time", "25:00"],
    );
    assert_eq!(code, 1);
    assert!(stderr.contains("Invalid time"), "stderr: {stderr}");
}

#[test]
fn test_timetable_has_seven_days() {
    let home = tempfile::tempdir().unwrap();
    run_cli_success(
        home.path(),
        &["task", "add", "Gym", "--date", "2026-10-23", "--time", "6:45", "--day", "fri"],
    );
    let table = parse_json(&run_cli_success(home.path(), &["task", "timetable"]));
    assert_eq!(table["days"].as_array().unwrap().len(), 7);
    assert_eq!(table["slots"][0], "06:45");
}

#[test]
fn test_links() {
    let home = tempfile::tempdir().unwrap();
    assert!(run_cli_success(home.path(), &["link", "add", "https://example.com"])
        .contains("Link created: 1"));
    let links = parse_json(&run_cli_success(home.path(), &["link", "list"]));
    assert_eq!(links[0]["url"], "https://example.com");
    assert!(run_cli_success(home.path(), &["link", "delete", "1"]).contains("Link deleted: 1"));
    let links = parse_json(&run_cli_success(home.path(), &["link", "list"]));
    assert!(links.as_array().unwrap().is_empty());
}

#[test]
fn test_stats_on_fresh_store() {
    let home = tempfile::tempdir().unwrap();
    let week = parse_json(&run_cli_success(home.path(), &["stats", "week"]));
    assert_eq!(week.as_array().unwrap().len(), 7);
    let months = parse_json(&run_cli_success(home.path(), &["stats", "month"]));
    assert!(months.as_array().unwrap().is_empty());
    let daily = parse_json(&run_cli_success(home.path(), &["stats", "daily", "--days", "30"]));
    assert_eq!(daily.as_array().unwrap().len(), 30);
    let summary = parse_json(&run_cli_success(home.path(), &["stats", "summary"]));
    assert_eq!(summary["total_focus_seconds"], 0);
}

#[test]
fn test_config_set_and_timer_status() {
    let home = tempfile::tempdir().unwrap();
    assert_eq!(
        run_cli_success(home.path(), &["config", "get", "timer.work_minutes"]).trim(),
        "25"
    );
    run_cli_success(home.path(), &["config", "set", "timer.work_minutes", "50"]);
    let (_, _, code) = run_cli(home.path(), &["config", "set", "timer.work_minutes", "500"]);
    assert_eq!(code, 1);

    let status = parse_json(&run_cli_success(home.path(), &["timer", "status"]));
    assert_eq!(status["type"], "StateSnapshot");
    assert_eq!(status["phase"], "work");
    assert_eq!(status["remaining_secs"], 3000);
    assert_eq!(status["running"], false);
}
