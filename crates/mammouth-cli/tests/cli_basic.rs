//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary against a throwaway data directory.

use std::process::Command;

use tempfile::TempDir;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(data_dir: &TempDir, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_mammouth-cli"))
        .args(args)
        .env("MAMMOUTH_DATA_DIR", data_dir.path())
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_json(data_dir: &TempDir, args: &[&str]) -> serde_json::Value {
    let (stdout, stderr, code) = run_cli(data_dir, args);
    assert_eq!(code, 0, "command {:?} failed: {}", args, stderr);
    serde_json::from_str(&stdout).expect("Failed to parse JSON output")
}

#[test]
fn test_gm_twice_same_day() {
    let dir = TempDir::new().unwrap();

    let first = run_json(&dir, &["gm", "--json"]);
    assert_eq!(first["count"], 1);
    assert_eq!(first["checked_in_today"], true);

    let (stdout, _, code) = run_cli(&dir, &["gm"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("You already said GM today."));
    assert!(stdout.contains("Streak: 1"));
}

#[test]
fn test_streak_show_fresh() {
    let dir = TempDir::new().unwrap();
    let view = run_json(&dir, &["streak", "--json"]);
    assert_eq!(view["count"], 0);
    assert_eq!(view["status_flag"], "0");
}

#[test]
fn test_poll_vote_and_reset() {
    let dir = TempDir::new().unwrap();
    run_json(&dir, &["poll", "vote", "yes", "--json"]);
    run_json(&dir, &["poll", "vote", "no", "--json"]);
    let view = run_json(&dir, &["poll", "vote", "no", "--json"]);
    assert_eq!(view["pct_yes"], 33);
    assert_eq!(view["pct_no"], 67);
    assert_eq!(view["meta"], "3 votes total");

    let (_, stderr, code) = run_cli(&dir, &["poll", "vote", "maybe"]);
    assert_eq!(code, 0);
    assert!(!stderr.contains("maybe"));
    let view = run_json(&dir, &["poll", "show", "--json"]);
    assert_eq!(view["total"], 3);

    let (_, _, code) = run_cli(&dir, &["poll", "reset"]);
    assert_eq!(code, 0);
    let view = run_json(&dir, &["poll", "show", "--json"]);
    assert_eq!(view["total"], 0);
}

#[test]
fn test_corrupt_state_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("mammouth-app-state-v1.json"), "not json").unwrap();

    let view = run_json(&dir, &["poll", "show", "--json"]);
    assert_eq!(view["total"], 0);
}

#[test]
fn test_wallet_connect_from_browser_accounts() {
    let dir = TempDir::new().unwrap();
    let outcome = run_json(
        &dir,
        &["wallet", "connect", "--accounts", "0x1234567890abcdef,0xother", "--json"],
    );
    assert_eq!(outcome["status"], "connected");
    assert_eq!(outcome["address"], "0x1234567890abcdef");

    let (stdout, _, _) = run_cli(&dir, &["wallet", "show"]);
    assert!(stdout.contains("Connected: 0x1234...cdef"));
}

#[test]
fn test_wallet_connect_without_provider_alerts() {
    let dir = TempDir::new().unwrap();
    let (stdout, stderr, code) = run_cli(&dir, &["wallet", "connect"]);
    assert_eq!(code, 0);
    assert!(stderr.contains("alert: No wallet detected."));
    assert!(stdout.contains("No wallet connected"));
}

#[test]
fn test_wallet_rejected() {
    let dir = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(&dir, &["wallet", "connect", "--reject", "User denied"]);
    assert_eq!(code, 0);
    assert!(stderr.contains("alert: Could not connect to the wallet."));
}

#[test]
fn test_user_connect_via_host_file() {
    let dir = TempDir::new().unwrap();
    let host = dir.path().join("host.json");
    std::fs::write(
        &host,
        r#"{"context": {}, "signIn": {"user": {"fid": 77, "username": "dino"}}}"#,
    )
    .unwrap();

    let (stdout, _, code) = run_cli(&dir, &["user", "connect", "--host", host.to_str().unwrap()]);
    assert_eq!(code, 0);
    assert!(stdout.contains("dino"));
    assert!(stdout.contains("fid: 77"));
}

#[test]
fn test_user_connect_guest_mode() {
    let dir = TempDir::new().unwrap();
    let (stdout, stderr, code) = run_cli(&dir, &["user", "connect"]);
    assert_eq!(code, 0);
    assert!(stderr.contains("alert: User sign-in is only available inside the host app."));
    assert!(stdout.contains("No user"));
}

#[test]
fn test_env_hint_standalone() {
    let dir = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(&dir, &["env"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Outside the host app"));
}

#[test]
fn test_config_get_set() {
    let dir = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(&dir, &["config", "get", "storage.state_key"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "mammouth-app-state-v1");

    let (_, _, code) = run_cli(&dir, &["config", "set", "log.max_lines", "5"]);
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli(&dir, &["config", "get", "log.max_lines"]);
    assert_eq!(stdout.trim(), "5");

    let (_, stderr, code) = run_cli(&dir, &["config", "get", "nope.key"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown key"));
}

#[test]
fn test_malformed_config_warns_and_is_kept() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.toml");
    std::fs::write(&config_path, "[log\nlevel=").unwrap();

    let (_, stderr, code) = run_cli(&dir, &["streak"]);
    assert_eq!(code, 0);
    assert!(stderr.contains("config unavailable, using defaults"));
    assert_eq!(std::fs::read_to_string(&config_path).unwrap(), "[log\nlevel=");
}

#[test]
fn test_event_log_printed_once() {
    let dir = TempDir::new().unwrap();
    let (stdout, stderr, code) = run_cli(&dir, &["poll", "vote", "yes"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Vote YES recorded"));
    assert!(!stderr.contains("Vote YES recorded"));
}

#[test]
fn test_status_json() {
    let dir = TempDir::new().unwrap();
    run_cli(&dir, &["gm"]);
    let status = run_json(&dir, &["status", "--json"]);
    assert_eq!(status["streak"]["count"], 1);
    assert_eq!(status["wallet"]["connected"], false);
}
