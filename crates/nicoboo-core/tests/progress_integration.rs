//! Integration tests for the progress engine.
//!
//! These tests drive the engine through a real (in-memory or file-backed)
//! SQLite database: profile edits, ticks, seeding and partition switches.

use chrono::{DateTime, Duration, TimeZone, Utc};
use nicoboo_core::achievement::DEFAULT_CATALOG;
use nicoboo_core::{
    AchievementStore, Database, Event, Partition, Profile, ProfileStore, ProgressEngine,
    RequirementKind, SmokingType,
};

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 10, 12, 0, 0).unwrap()
}

fn smoker(stop_date: DateTime<Utc>) -> Profile {
    let mut p = Profile::new(SmokingType::Smoke, stop_date);
    p.cigarettes_per_day = Some(20);
    p.cigarettes_per_pack = Some(20);
    p.price_per_pack = Some(10.0);
    p
}

#[test]
fn test_two_days_five_hours_scenario() {
    let db = Database::open_memory().unwrap();
    let mut engine = ProgressEngine::open(db, Partition::Guest, None).unwrap();
    let now = t0();
    engine
        .update_profile(smoker(now - Duration::days(2) - Duration::hours(5)), now)
        .unwrap();

    let snap = engine.snapshot().unwrap();
    assert_eq!(snap.breakdown.days, 2);
    assert_eq!(snap.breakdown.hours, 5);
    assert_eq!(snap.units_avoided, 44);
    assert!((snap.money_saved - 22.0).abs() < 1e-9);

    let by_title = |title: &str| {
        engine
            .achievements()
            .iter()
            .find(|a| a.title == title)
            .unwrap()
            .is_unlocked
    };
    assert!(by_title("To Infinity and Beyond")); // 5 units
    assert!(!by_title("Century Breaker")); // 100 units
}

#[test]
fn test_ticks_do_not_duplicate_unlocks() {
    let db = Database::open_memory().unwrap();
    let mut engine = ProgressEngine::open(db, Partition::Guest, None).unwrap();
    let start = t0();
    let mut seen = Vec::new();
    let mut record = |events: Vec<Event>| {
        for event in events {
            if let Event::AchievementUnlocked { achievement_id, .. } = event {
                assert!(!seen.contains(&achievement_id), "unlocked twice");
                seen.push(achievement_id);
            }
        }
    };

    // Zero-requirement badges unlock on the profile update, the rest on ticks.
    record(engine.update_profile(smoker(start), start).unwrap());
    // One simulated day at one tick per minute.
    for minute in 1..=(24 * 60) {
        record(engine.tick(start + Duration::minutes(minute)));
    }

    assert_eq!(seen.len(), engine.unlocked_count());
    let stored = engine.store().fetch(&Partition::Guest).unwrap();
    assert_eq!(
        stored.iter().filter(|a| a.is_unlocked).count(),
        engine.unlocked_count()
    );
}

#[test]
fn test_unlock_timestamp_is_first_crossing() {
    let db = Database::open_memory().unwrap();
    let mut engine = ProgressEngine::open(db, Partition::Guest, None).unwrap();
    let start = t0();
    engine.update_profile(smoker(start), start).unwrap();

    let crossing = start + Duration::days(1);
    engine.tick(crossing - Duration::seconds(1));
    engine.tick(crossing);
    engine.tick(crossing + Duration::hours(6));

    let day_one = engine
        .achievements()
        .iter()
        .find(|a| a.kind == RequirementKind::DaysSmokeFree && a.requirement == 1.0)
        .unwrap();
    assert_eq!(day_one.unlocked_at, Some(crossing));
}

#[test]
fn test_later_stop_date_does_not_relock() {
    let db = Database::open_memory().unwrap();
    let mut engine = ProgressEngine::open(db, Partition::Guest, None).unwrap();
    let now = t0();
    engine.update_profile(smoker(now - Duration::days(7)), now).unwrap();
    let unlocked = engine.unlocked_count();

    // Relapse: quit date moves to now.
    engine.update_profile(smoker(now), now).unwrap();
    assert_eq!(engine.snapshot().unwrap().units_avoided, 0);
    assert_eq!(engine.unlocked_count(), unlocked);
}

#[test]
fn test_partitions_are_isolated_in_storage() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nicoboo.db");
    let now = t0();
    let alice = Partition::from_user_id(Some("alice"));

    {
        let db = Database::open_at(&path).unwrap();
        let mut engine = ProgressEngine::open(db, alice.clone(), None).unwrap();
        engine.update_profile(smoker(now - Duration::days(30)), now).unwrap();
        assert!(engine.unlocked_count() > 10);
    }

    let db = Database::open_at(&path).unwrap();
    assert!(db.load_profile(&Partition::Guest).unwrap().is_none());
    assert!(db.fetch(&Partition::Guest).unwrap().is_empty());

    let engine = ProgressEngine::open(db, Partition::Guest, None).unwrap();
    assert_eq!(engine.total_count(), DEFAULT_CATALOG.len());
    assert_eq!(engine.unlocked_count(), 0);

    let stored_alice = engine.store().fetch(&alice).unwrap();
    assert_eq!(stored_alice.len(), DEFAULT_CATALOG.len());
    assert!(stored_alice.iter().any(|a| a.is_unlocked));
}

#[test]
fn test_reopen_keeps_unlocks_and_reseeds_additively() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nicoboo.db");
    let now = t0();

    let unlocked = {
        let db = Database::open_at(&path).unwrap();
        let mut engine = ProgressEngine::open(db, Partition::Guest, None).unwrap();
        engine.update_profile(smoker(now - Duration::days(3)), now).unwrap();
        engine.unlocked_count()
    };

    // Drop a catalog row, as if the catalog grew since the last run.
    rusqlite::Connection::open(&path)
        .unwrap()
        .execute("DELETE FROM achievements WHERE title = 'Year One'", [])
        .unwrap();

    let db = Database::open_at(&path).unwrap();
    let engine = ProgressEngine::open(db, Partition::Guest, None).unwrap();
    assert_eq!(engine.total_count(), DEFAULT_CATALOG.len());
    assert_eq!(engine.unlocked_count(), unlocked);
    assert!(engine.profile().is_some());
}

#[test]
fn test_vape_and_both_modalities() {
    let now = t0();
    let mut vape = Profile::new(SmokingType::Vape, now - Duration::days(4));
    vape.pods_per_day = Some(1);
    vape.price_per_pod = Some(5.0);

    let mut engine =
        ProgressEngine::open(Database::open_memory().unwrap(), Partition::Guest, None).unwrap();
    engine.update_profile(vape.clone(), now).unwrap();
    let snap = engine.snapshot().unwrap();
    assert_eq!(snap.units_avoided, 4);
    assert!((snap.money_saved - 20.0).abs() < 1e-9);

    let mut both = smoker(now - Duration::days(4));
    both.smoking_type = SmokingType::Both;
    both.pods_per_day = vape.pods_per_day;
    both.price_per_pod = vape.price_per_pod;
    engine.update_profile(both, now).unwrap();
    let snap = engine.snapshot().unwrap();
    assert_eq!(snap.units_avoided, 80 + 4);
    assert!((snap.money_saved - 60.0).abs() < 1e-9);
}
