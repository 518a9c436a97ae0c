//! Basic CLI E2E tests.
//!
//! Each test runs the built binary against its own temporary home
//! directory, so the database and config start empty.

use std::io::{BufRead, BufReader, Write};
use std::process::{Command, Stdio};

use tempfile::TempDir;

struct Cli {
    home: TempDir,
}

impl Cli {
    fn new() -> Self {
        Self {
            home: tempfile::tempdir().unwrap(),
        }
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_castletics"));
        cmd.args(args)
            .env("HOME", self.home.path())
            .env_remove("CASTLETICS_ENV")
            .env("RUST_LOG", "warn");
        cmd
    }

    /// Run and return (code, stdout, stderr).
    fn run(&self, args: &[&str]) -> (i32, String, String) {
        let output = self.command(args).output().expect("failed to run castletics");
        (
            output.status.code().unwrap_or(-1),
            String::from_utf8_lossy(&output.stdout).to_string(),
            String::from_utf8_lossy(&output.stderr).to_string(),
        )
    }

    fn ok(&self, args: &[&str]) -> String {
        let (code, stdout, stderr) = self.run(args);
        assert_eq!(code, 0, "{args:?} failed: {stderr}");
        stdout
    }

    fn json(&self, args: &[&str]) -> serde_json::Value {
        serde_json::from_str(&self.ok(args)).expect("stdout is not JSON")
    }
}

#[test]
fn test_workout_today_and_show() {
    let cli = Cli::new();
    let today = cli.json(&["workout", "today", "--date", "2024-01-15"]);
    let name = today["name"].as_str().unwrap();
    let shown = cli.json(&["workout", "show", &name.to_lowercase()]);
    assert_eq!(shown["name"], name);
}

#[test]
fn test_workout_list_by_category() {
    let cli = Cli::new();
    let list = cli.json(&["workout", "list", "--category", "core"]);
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 10);
    assert!(list.iter().all(|w| w["category"] == "core"));
}

#[test]
fn test_unknown_workout_fails() {
    let cli = Cli::new();
    let (code, _, stderr) = cli.run(&["workout", "show", "Deadlift Day"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_register_log_and_streak() {
    let cli = Cli::new();
    let user = cli.json(&["user", "register", "--fid", "12345", "--username", "alice"]);
    assert_eq!(user["farcaster_id"], 12345);

    cli.ok(&["workout", "log", "--fid", "12345", "--at", "2024-01-14T09:00:00Z"]);
    cli.ok(&["workout", "log", "--fid", "12345", "--type", "abs attack", "--at", "2024-01-15T09:00:00Z"]);

    let streak = cli.json(&["streak", "show", "--fid", "12345"]);
    assert_eq!(streak["current_streak"], 2);
    assert_eq!(streak["last_activity_date"], "2024-01-15");

    let history = cli.json(&["workout", "history", "--fid", "12345", "--since", "2024-01-15"]);
    assert_eq!(history.as_array().unwrap().len(), 1);
    assert_eq!(history[0]["workout_type"], "Abs Attack");

    let stats = cli.json(&["workout", "stats", "--fid", "12345"]);
    assert_eq!(stats["total_workouts"], 2);

    let done = cli.ok(&["workout", "done", "--fid", "12345", "--date", "2024-01-15"]);
    assert_eq!(done.trim(), "true");
}

#[test]
fn test_workout_today_follows_reference_zone() {
    let cli = Cli::new();
    cli.ok(&["config", "set", "streak.utc_offset_minutes", "840"]);
    let local_day = (chrono::Utc::now() + chrono::Duration::minutes(840)).date_naive();
    let today = cli.json(&["workout", "today"]);
    let expected = cli.json(&["workout", "today", "--date", &local_day.to_string()]);
    assert_eq!(today["name"], expected["name"]);
}

#[test]
fn test_user_and_workout_update() {
    let cli = Cli::new();
    cli.ok(&["user", "register", "--fid", "9", "--username", "carol"]);
    let user = cli.json(&["user", "update", "--fid", "9", "--bio", "early riser"]);
    assert_eq!(user["username"], "carol");
    assert_eq!(user["bio"], "early riser");

    let (code, _, stderr) = cli.run(&["user", "update", "--fid", "9"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("nothing to update"));

    cli.ok(&["workout", "log", "--fid", "9", "--type", "Abs Attack", "--at", "2024-01-15T09:00:00Z"]);
    let history = cli.json(&["workout", "history", "--fid", "9"]);
    let id = history[0]["id"].as_str().unwrap().to_string();

    let updated = cli.json(&["workout", "update", "--fid", "9", &id, "--duration", "45", "--notes", "extra set"]);
    assert_eq!(updated["duration_minutes"], 45);
    assert_eq!(updated["notes"], "extra set");
    assert_eq!(updated["workout_type"], "Abs Attack");

    cli.ok(&["user", "register", "--fid", "10"]);
    let (code, _, stderr) = cli.run(&["workout", "update", "--fid", "10", &id, "--notes", "not mine"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("not found"));
}

#[test]
fn test_streak_check_breaks_and_reset() {
    let cli = Cli::new();
    cli.ok(&["user", "register", "--fid", "7"]);
    cli.ok(&["workout", "log", "--fid", "7", "--at", "2024-01-10T09:00:00Z"]);
    let out = cli.ok(&["streak", "check", "--fid", "7", "--date", "2024-01-13"]);
    assert!(out.contains("StreakBroken"));

    let reset = cli.json(&["streak", "reset", "--fid", "7"]);
    assert_eq!(reset["current_streak"], 0);
    assert_eq!(reset["longest_streak"], 1);
    assert!(reset["last_activity_date"].is_null());
}

#[test]
fn test_unknown_user_fails() {
    let cli = Cli::new();
    let (code, _, stderr) = cli.run(&["streak", "show", "--fid", "999"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("not found"));
}

#[test]
fn test_auth_round_trip() {
    let cli = Cli::new();
    cli.ok(&["config", "set", "auth.signing_secret", "test-secret"]);

    let nonce = cli.json(&["auth", "nonce"]);
    let nonce = nonce["nonce"].as_str().unwrap().to_string();
    assert_eq!(nonce.len(), 16);
    assert!(nonce.chars().all(|c| c.is_ascii_alphanumeric()));

    let signed = cli.json(&["auth", "sign", "--fid", "42", "--nonce", &nonce]);
    let message = signed["message"].as_str().unwrap();
    let signature = signed["signature"].as_str().unwrap();

    let output = cli
        .command(&["auth", "verify", "--message", message, "--signature", signature])
        .env("RUST_LOG", "info")
        .output()
        .unwrap();
    assert!(output.status.success());
    let verified: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(verified["fid"], 42);
    let log = String::from_utf8_lossy(&output.stderr);
    assert!(log.contains("auth_verify") && log.contains("signed in"), "{log}");
    cli.ok(&["user", "show", "--fid", "42"]);

    let (code, _, _) = cli.run(&["auth", "verify", "--message", message, "--signature", signature]);
    assert_eq!(code, 1, "nonce must not be reusable");
}

#[test]
fn test_auth_verify_requires_fields() {
    let cli = Cli::new();
    cli.ok(&["config", "set", "auth.signing_secret", "test-secret"]);
    let (code, _, stderr) = cli.run(&["auth", "verify"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Missing message or signature"));
}

#[test]
fn test_config_get_set_reset() {
    let cli = Cli::new();
    assert_eq!(cli.ok(&["config", "get", "timer.min_completion_percent"]).trim(), "70");
    cli.ok(&["config", "set", "timer.min_completion_floor_secs", "600"]);
    assert_eq!(cli.ok(&["config", "get", "timer.min_completion_floor_secs"]).trim(), "600");

    let (code, _, stderr) = cli.run(&["config", "set", "timer.min_completion_floor_secs", "0"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("at least 300"));
    assert_eq!(cli.ok(&["config", "get", "timer.min_completion_floor_secs"]).trim(), "600");

    let (code, _, _) = cli.run(&["config", "set", "timer.nope", "1"]);
    assert_eq!(code, 1);

    cli.ok(&["config", "reset"]);
    assert_eq!(cli.ok(&["config", "get", "timer.min_completion_floor_secs"]).trim(), "300");
}

#[test]
fn test_timer_plan() {
    let cli = Cli::new();
    let plan = cli.json(&["timer", "plan", "--workout", "Abs Attack"]);
    assert_eq!(plan["type"], "TimerSnapshot");
    assert_eq!(plan["state"], "idle");
    assert!(plan["min_required_secs"].as_u64().unwrap() >= 300);
}

#[test]
fn test_timer_run_quits_without_logging() {
    let cli = Cli::new();
    let mut child = cli
        .command(&["timer", "run", "--workout", "Abs Attack"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"pause\ncomplete\nquit\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("TimerStarted"));
    assert!(stdout.contains("TimerPaused"));
    assert!(!stdout.contains("WorkoutCompleted"));
    assert!(String::from_utf8_lossy(&output.stderr).contains("cannot complete yet"));
}

#[test]
fn test_timer_run_completes_and_logs() {
    let cli = Cli::new();
    cli.ok(&["user", "register", "--fid", "5"]);
    // 300 one-millisecond ticks to the minimum.
    cli.ok(&["config", "set", "timer.min_completion_percent", "0"]);
    cli.ok(&["config", "set", "timer.tick_interval_ms", "1"]);

    let mut child = cli
        .command(&["timer", "run", "--workout", "Abs Attack", "--fid", "5"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();
    let mut stdin = child.stdin.take().unwrap();
    let stdout = BufReader::new(child.stdout.take().unwrap());

    let mut lines = Vec::new();
    for line in stdout.lines() {
        let line = line.unwrap();
        if line.contains("MinimumReached") {
            stdin.write_all(b"complete\n").unwrap();
        }
        lines.push(line);
    }
    drop(stdin);
    assert!(child.wait().unwrap().success());
    let stdout = lines.join("\n");
    assert!(stdout.contains("MinimumReached"));
    assert!(stdout.contains("WorkoutCompleted"));
    assert!(stdout.contains("StreakUpdated"));

    let streak = cli.json(&["streak", "show", "--fid", "5"]);
    assert_eq!(streak["current_streak"], 1);
}
