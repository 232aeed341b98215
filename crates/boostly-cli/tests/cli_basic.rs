//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary against a throwaway data directory and
//! verify outputs.

use std::path::Path;
use std::process::{Command, Stdio};
use std::time::Duration;

use boostly_core::{Database, TimerEngine, TimerMode};
use tempfile::TempDir;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_boostly"))
        .env("BOOSTLY_HOME", home)
        .env_remove("BOOSTLY_LOG")
        .args(args)
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
    assert_eq!(code, 0, "CLI command {args:?} failed: {stderr}");
    stdout
}

fn parse_json_lines(stdout: &str) -> Vec<serde_json::Value> {
    stdout
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str(l).expect("Failed to parse JSON line"))
        .collect()
}

/// Store a running pomodoro with `remaining_secs` left, last ticked
/// `ago_ms` milliseconds before now, as a previous invocation would have.
fn seed_running_timer(home: &Path, remaining_secs: u64, ago_ms: i64) {
    let mut engine = TimerEngine::new(TimerMode::Pomodoro);
    engine.start();
    let elapsed = engine.total_secs() - remaining_secs;
    engine.advance(elapsed);
    let record = serde_json::json!({
        "engine": engine,
        "last_tick_epoch_ms": chrono::Utc::now().timestamp_millis() - ago_ms,
    });
    let db = Database::open_at(&home.join("boostly.db")).unwrap();
    db.kv_set("timer_engine", &record.to_string()).unwrap();
}

#[test]
fn test_task_add_and_list() {
    let home = TempDir::new().unwrap();
    let out = run_cli_success(home.path(), &["task", "add", "Write report", "--priority", "high"]);
    assert!(out.contains("Task added: Write report [high]"));

    let out = run_cli_success(home.path(), &["task", "list", "--json"]);
    let tasks: serde_json::Value = serde_json::from_str(&out).unwrap();
    let tasks = tasks.as_array().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["text"], "Write report");
    assert_eq!(tasks[0]["done"], false);
    assert_eq!(tasks[0]["priority"], "high");
}

#[test]
fn test_task_add_rejects_blank() {
    let home = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["task", "add", "   "]);
    assert_eq!(code, 1);
    assert!(stderr.contains("must not be empty"));
}

#[test]
fn test_task_done_awards_points() {
    let home = TempDir::new().unwrap();
    run_cli_success(home.path(), &["task", "add", "Ship it"]);
    let out = run_cli_success(home.path(), &["--json", "task", "done", "0"]);
    let events = parse_json_lines(&out);
    assert_eq!(events[0]["type"], "task_toggled");
    assert_eq!(events[0]["done"], true);
    assert!(events
        .iter()
        .any(|e| e["type"] == "points_changed" && e["new"] == 10));

    let out = run_cli_success(home.path(), &["stats", "--json"]);
    let stats: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(stats["points"], 10);
    assert_eq!(stats["level"], 1);
    let week: u64 = stats["productivity"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_u64().unwrap())
        .sum();
    assert_eq!(week, 1);
}

#[test]
fn test_task_move_and_delete() {
    let home = TempDir::new().unwrap();
    for text in ["C", "B", "A"] {
        run_cli_success(home.path(), &["task", "add", text]);
    }
    run_cli_success(home.path(), &["task", "move", "0", "2"]);
    run_cli_success(home.path(), &["task", "delete", "0", "--yes"]);

    let out = run_cli_success(home.path(), &["task", "list", "--json"]);
    let tasks: Vec<serde_json::Value> = serde_json::from_str(&out).unwrap();
    let texts: Vec<_> = tasks.iter().map(|t| t["text"].as_str().unwrap()).collect();
    assert_eq!(texts, vec!["C", "A"]);
}

#[test]
fn test_task_index_out_of_range() {
    let home = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["task", "done", "3"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("No task at index 3"));
}

#[test]
fn test_timer_start_pause_status() {
    let home = TempDir::new().unwrap();
    run_cli_success(home.path(), &["timer", "start"]);
    run_cli_success(home.path(), &["timer", "pause"]);

    let out = run_cli_success(home.path(), &["--json", "timer", "status"]);
    let status: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(status["state"], "paused");
    assert_eq!(status["total_secs"], 1500);
    assert!(status["remaining_secs"].as_u64().unwrap() <= 1500);
}

#[test]
fn test_timer_mode_custom() {
    let home = TempDir::new().unwrap();
    run_cli_success(home.path(), &["timer", "mode", "custom", "--minutes", "10"]);
    let out = run_cli_success(home.path(), &["--json", "timer", "status"]);
    let status: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(status["state"], "idle");
    assert_eq!(status["remaining_secs"], 600);

    let out = run_cli_success(home.path(), &["config", "get", "timer.custom_minutes"]);
    assert_eq!(out.trim(), "10");
}

#[test]
fn test_config_set_rejects_unknown_key() {
    let home = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["config", "set", "timer.nope", "1"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Unknown configuration key"));
}

#[test]
fn test_export_import_reset() {
    let home = TempDir::new().unwrap();
    run_cli_success(home.path(), &["task", "add", "Keep me"]);
    let snapshot = run_cli_success(home.path(), &["export"]);

    run_cli_success(home.path(), &["reset", "--yes"]);
    let out = run_cli_success(home.path(), &["task", "list", "--json"]);
    assert_eq!(out.trim(), "[]");

    let file = home.path().join("snapshot.json");
    std::fs::write(&file, snapshot).unwrap();
    run_cli_success(home.path(), &["import", file.to_str().unwrap()]);
    let out = run_cli_success(home.path(), &["task", "list"]);
    assert!(out.contains("Keep me"));
}

#[test]
fn test_stats_json_stays_parseable_after_catch_up() {
    let home = TempDir::new().unwrap();
    seed_running_timer(home.path(), 1, 5_000);

    let (stdout, stderr, code) = run_cli(home.path(), &["--json", "stats"]);
    assert_eq!(code, 0, "stats failed: {stderr}");
    let stats: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(stats["points"], 50);
    assert!(stderr.contains("Focus session complete!"));
}

#[test]
fn test_task_list_json_stays_parseable_after_catch_up() {
    let home = TempDir::new().unwrap();
    run_cli_success(home.path(), &["task", "add", "Listed"]);
    seed_running_timer(home.path(), 1, 5_000);

    let out = run_cli_success(home.path(), &["--json", "task", "list"]);
    let tasks: Vec<serde_json::Value> = serde_json::from_str(&out).unwrap();
    assert_eq!(tasks.len(), 1);
}

#[test]
fn test_export_reports_catch_up_on_stderr() {
    let home = TempDir::new().unwrap();
    seed_running_timer(home.path(), 1, 5_000);

    let (stdout, stderr, code) = run_cli(home.path(), &["export"]);
    assert_eq!(code, 0, "export failed: {stderr}");
    let state: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(state["points"], 50);
    assert!(stderr.contains("+50 points (50 total)"));

    // Paid out once.
    let out = run_cli_success(home.path(), &["--json", "stats"]);
    let stats: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(stats["points"], 50);
}

#[test]
fn test_task_added_during_watch_survives_expiry() {
    let home = TempDir::new().unwrap();
    seed_running_timer(home.path(), 5, 0);

    let watch = Command::new(env!("CARGO_BIN_EXE_boostly"))
        .env("BOOSTLY_HOME", home.path())
        .env_remove("BOOSTLY_LOG")
        .args(["--json", "timer", "watch"])
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to start timer watch");

    std::thread::sleep(Duration::from_secs(1));
    run_cli_success(home.path(), &["task", "add", "added during watch"]);

    let output = watch.wait_with_output().unwrap();
    assert!(
        output.status.success(),
        "watch failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let events = parse_json_lines(&String::from_utf8_lossy(&output.stdout));
    assert!(events.iter().any(|e| e["type"] == "timer_expired"));

    let out = run_cli_success(home.path(), &["task", "list", "--json"]);
    let tasks: Vec<serde_json::Value> = serde_json::from_str(&out).unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["text"], "added during watch");

    let out = run_cli_success(home.path(), &["stats", "--json"]);
    let stats: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(stats["points"], 50);
}
