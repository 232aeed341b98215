//! Tracker state survives reopening an on-disk database.

use boostly_core::storage::database::APP_STATE_KEY;
use boostly_core::{Database, Event, FixedClock, PersistenceGateway, Priority, Tracker};
use tempfile::TempDir;

fn clock() -> FixedClock {
    FixedClock::on(2024, 6, 3)
}

#[test]
fn state_round_trips_through_sqlite() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("boostly.db");

    {
        let db = Database::open_at(&path).unwrap();
        let mut t = Tracker::open(db, clock());
        t.add_task("Plan week", Priority::High).unwrap();
        t.add_task("Inbox zero", Priority::Low).unwrap();
        t.toggle_done(1).unwrap();
        t.reorder(0, 1).unwrap();
    }

    let db = Database::open_at(&path).unwrap();
    let t = Tracker::open(db, clock());
    let state = t.state();
    assert_eq!(state.points, 10);
    assert_eq!(state.productivity[0], 1);
    let texts: Vec<_> = state.tasks.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["Plan week", "Inbox zero"]);
    assert!(state.tasks.get(0).unwrap().done);
}

#[test]
fn corrupt_snapshot_falls_back_to_default() {
    let db = Database::open_memory().unwrap();
    db.kv_set(APP_STATE_KEY, "definitely not json").unwrap();

    let mut t = Tracker::open(db, clock());
    assert_eq!(t.state().points, 0);
    assert!(t.state().tasks.is_empty());

    // The next mutation overwrites the bad snapshot.
    let outcome = t.add_task("fresh start", Priority::Medium).unwrap();
    assert!(!outcome.persistence_failed());
    let saved = t.gateway().load().unwrap().unwrap();
    assert_eq!(saved.tasks.len(), 1);
}

#[test]
fn reset_is_persisted() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("boostly.db");

    let mut t = Tracker::open(Database::open_at(&path).unwrap(), clock());
    t.add_task("temporary", Priority::Medium).unwrap();
    t.award_points(120);
    assert_eq!(t.reset().events, vec![Event::StateReset]);
    drop(t);

    let t = Tracker::open(Database::open_at(&path).unwrap(), clock());
    assert_eq!(t.state(), &boostly_core::AppState::default());
}

#[test]
fn timer_reward_keeps_tasks_written_by_another_tracker() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("boostly.db");

    let mut timer_side = Tracker::open(Database::open_at(&path).unwrap(), clock());
    timer_side.start_timer();
    timer_side.advance_timer(600);

    let mut task_side = Tracker::open(Database::open_at(&path).unwrap(), clock());
    task_side.add_task("added mid-session", Priority::Medium).unwrap();
    drop(task_side);

    let outcome = timer_side.advance_timer(900);
    assert!(outcome.events.contains(&Event::TimerExpired));
    assert!(!outcome.persistence_failed());

    let t = Tracker::open(Database::open_at(&path).unwrap(), clock());
    assert_eq!(t.state().points, 50);
    let texts: Vec<_> = t.state().tasks.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["added mid-session"]);
}

#[test]
fn import_with_extreme_values_stays_usable() {
    let snapshot = r#"{
        "points": 0, "level": 4294967295, "exp": 150,
        "tasks": [{"id": 18446744073709551615, "text": "last id", "done": false}]
    }"#;
    let state: boostly_core::AppState = serde_json::from_str(snapshot).unwrap();

    let mut t = Tracker::open(Database::open_memory().unwrap(), clock());
    t.import(state);
    assert_eq!(t.state().level, u32::MAX);
    assert_eq!(t.state().experience, 50);

    let id = t.add_task("after import", Priority::Low).unwrap().value;
    assert_ne!(id, u64::MAX);
    assert!(t.state().tasks.ids_unique());

    t.award_points(100);
    assert_eq!(t.state().level, u32::MAX);
}
