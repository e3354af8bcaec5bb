//! Integration tests for the Pomodoro engine driving the task store.
//!
//! Covers the full focus cycle from ticks to the persisted ledger,
//! including a round trip through an on-disk SQLite database.

use chrono::NaiveDate;
use focusdesk_core::{
    Category, Cue, Database, Day, Event, FixedClock, KvStore, MemoryStore, NewTask, Phase,
    PomodoroEngine, TaskStore, TickDriver,
};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

fn memory_store() -> TaskStore<MemoryStore, FixedClock> {
    TaskStore::with_clock(MemoryStore::new(), FixedClock::new(today()))
}

#[test]
fn test_one_minute_cycle_scenario() {
    let mut store = memory_store();
    let mut engine = PomodoroEngine::default();
    engine.configure_work(1);
    engine.configure_break(1);
    assert_eq!(engine.remaining_secs(), 60);

    engine.start();
    assert!(engine.tick(&mut store).is_none());
    assert_eq!(engine.remaining_secs(), 59);
    assert_eq!(store.total_seconds(), 1);

    let events: Vec<Event> = (0..59).filter_map(|_| engine.tick(&mut store)).collect();
    assert_eq!(engine.phase(), Phase::Break);
    assert_eq!(engine.remaining_secs(), 60);
    assert_eq!(store.total_seconds(), 60);
    assert!(matches!(
        events.as_slice(),
        [Event::PhaseChanged { from: Phase::Work, to: Phase::Break, cue: Cue::BreakStart, .. }]
    ));
}

#[test]
fn test_default_work_phase_logs_1500_seconds() {
    let mut store = memory_store();
    let mut engine = PomodoroEngine::default();
    assert_eq!(engine.work_secs(), 1500);
    engine.start();

    let mut transitions = 0;
    for _ in 0..1500 {
        assert_eq!(engine.phase(), Phase::Work);
        if let Some(Event::PhaseChanged { .. }) = engine.tick(&mut store) {
            transitions += 1;
        }
    }

    assert_eq!(transitions, 1);
    assert_eq!(engine.phase(), Phase::Break);
    assert_eq!(engine.remaining_secs(), engine.break_secs());
    assert_eq!(store.total_seconds(), 1500);
    assert_eq!(store.today_focus_minutes(), 25);
}

#[test]
fn test_break_time_is_not_logged() {
    let mut store = memory_store();
    let mut engine = PomodoroEngine::new(1, 5);
    engine.start();
    for _ in 0..(60 + 300) {
        engine.tick(&mut store);
    }
    assert_eq!(engine.phase(), Phase::Work);
    assert_eq!(store.total_seconds(), 60);
}

#[test]
fn test_reset_from_any_phase() {
    let mut store = memory_store();
    for ticks in [0usize, 1, 59, 60, 61, 119, 150] {
        let mut engine = PomodoroEngine::new(1, 1);
        engine.start();
        for _ in 0..ticks {
            engine.tick(&mut store);
        }
        engine.reset();
        assert_eq!(engine.phase(), Phase::Work);
        assert!(!engine.is_running());
        assert_eq!(engine.remaining_secs(), engine.work_secs());
    }
}

#[test]
fn test_paused_engine_does_not_log() {
    let mut store = memory_store();
    let mut engine = PomodoroEngine::new(1, 1);
    engine.start();
    engine.tick(&mut store);
    engine.pause();
    for _ in 0..10 {
        assert!(engine.tick(&mut store).is_none());
    }
    assert_eq!(engine.remaining_secs(), 59);
    assert_eq!(store.total_seconds(), 1);
}

#[test]
fn test_driver_feeds_store_after_gap() {
    let mut store = memory_store();
    let mut engine = PomodoroEngine::new(25, 5);
    let mut driver = TickDriver::new();
    engine.start();
    driver.arm(1_000_000);

    driver.drive(&mut engine, &mut store, 1_000_900);
    assert_eq!(store.total_seconds(), 0);
    driver.drive(&mut engine, &mut store, 1_600_500);
    assert_eq!(store.total_seconds(), 600);
    assert_eq!(engine.remaining_secs(), 900);
}

#[test]
fn test_sqlite_round_trip_restores_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("focusdesk.db");

    let (tasks, links, ledger) = {
        let mut store = TaskStore::with_clock(
            Database::open_at(&path).unwrap(),
            FixedClock::new(today()),
        );
        let id = store
            .add_task(NewTask {
                title: "Write report".into(),
                day: Day::Monday,
                date: today(),
                time: "9:00".into(),
                category: Category::Work,
            })
            .unwrap();
        store.toggle_task(id).unwrap();
        store.add_link("https://example.com/notes").unwrap();

        let mut engine = PomodoroEngine::new(1, 1);
        engine.start();
        for _ in 0..90 {
            engine.tick(&mut store);
        }
        (store.tasks().to_vec(), store.links().to_vec(), store.ledger().clone())
    };

    let reopened =
        TaskStore::with_clock(Database::open_at(&path).unwrap(), FixedClock::new(today()));
    assert_eq!(reopened.tasks(), tasks.as_slice());
    assert_eq!(reopened.links(), links.as_slice());
    assert_eq!(reopened.ledger(), &ledger);
    assert_eq!(reopened.total_seconds(), 60);
    assert_eq!(reopened.tasks()[0].time, "09:00");
}

#[test]
fn test_missing_keys_start_empty() {
    let db = Database::open_memory().unwrap();
    assert!(db.get("tasks").unwrap().is_none());
    let store = TaskStore::with_clock(db, FixedClock::new(today()));
    assert!(store.tasks().is_empty());
    assert!(store.links().is_empty());
    assert_eq!(store.total_seconds(), 0);
    assert!(store.daily_log().is_empty());
}
