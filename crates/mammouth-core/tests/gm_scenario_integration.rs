//! End-to-end check-in and poll scenarios against a file-backed store.

use chrono::{DateTime, FixedOffset, TimeZone};
use mammouth_core::{
    AppState, CheckInOutcome, Config, FileStore, KeyValueStore, LoadOutcome, MiniApp,
    StateStore, VoteOutcome,
};
use tempfile::TempDir;

fn local(day: u32, hour: u32) -> DateTime<FixedOffset> {
    FixedOffset::west_opt(5 * 3600)
        .unwrap()
        .with_ymd_and_hms(2024, 2, day, hour, 0, 0)
        .unwrap()
}

fn reopen(dir: &TempDir) -> MiniApp<FileStore> {
    MiniApp::open(FileStore::new(dir.path()), &Config::default())
}

#[test]
fn streak_scenario_survives_restarts() {
    let dir = TempDir::new().unwrap();

    let mut app = reopen(&dir);
    assert_eq!(app.check_in(&local(10, 9)).unwrap(), CheckInOutcome::First);
    assert_eq!(app.state().gm_streak, 1);

    let mut app = reopen(&dir);
    assert_eq!(
        app.check_in(&local(10, 22)).unwrap(),
        CheckInOutcome::AlreadyCheckedIn
    );
    assert_eq!(app.state().gm_streak, 1);

    let mut app = reopen(&dir);
    assert_eq!(app.check_in(&local(11, 8)).unwrap(), CheckInOutcome::Continued);
    assert_eq!(app.state().gm_streak, 2);

    let mut app = reopen(&dir);
    assert_eq!(app.check_in(&local(13, 8)).unwrap(), CheckInOutcome::Reset);
    assert_eq!(app.state().gm_streak, 1);

    let app = reopen(&dir);
    assert!(matches!(app.initial_load(), LoadOutcome::Loaded(_)));
    assert!(app.streak_view(&local(13, 20)).checked_in_today);
    assert!(!app.streak_view(&local(14, 1)).checked_in_today);
}

#[test]
fn poll_counts_survive_restarts() {
    let dir = TempDir::new().unwrap();

    let mut app = reopen(&dir);
    for choice in ["yes", "no", "no", "maybe", "YES"] {
        app.vote(choice).unwrap();
    }

    let mut app = reopen(&dir);
    assert_eq!((app.state().poll_yes, app.state().poll_no), (1, 2));
    let view = app.poll_view();
    assert_eq!((view.pct_yes, view.pct_no), (33, 67));

    assert!(matches!(app.vote("no").unwrap(), VoteOutcome::Recorded(_)));
    app.reset_poll().unwrap();

    let app = reopen(&dir);
    assert_eq!((app.state().poll_yes, app.state().poll_no), (0, 0));
}

#[test]
fn corrupt_file_is_replaced_on_next_save() {
    let dir = TempDir::new().unwrap();
    let mut kv = FileStore::new(dir.path());
    kv.set("mammouth-app-state-v1", "{\"gmStreak\": \"many\"}").unwrap();

    let mut app = reopen(&dir);
    assert!(app.initial_load().is_defaulted());
    assert_eq!(app.state(), &AppState::default());

    app.vote("yes").unwrap();
    let store = StateStore::new(FileStore::new(dir.path()));
    assert_eq!(store.load().into_state().poll_yes, 1);
}

#[test]
fn configured_state_key_is_used() {
    let dir = TempDir::new().unwrap();
    let mut config = Config::default();
    config.set_value("storage.state_key", "mammouth-test-v9").unwrap();

    let mut app = MiniApp::open(FileStore::new(dir.path()), &config);
    app.vote("yes").unwrap();

    assert!(dir.path().join("mammouth-test-v9.json").exists());
    assert!(!dir.path().join("mammouth-app-state-v1.json").exists());
}
