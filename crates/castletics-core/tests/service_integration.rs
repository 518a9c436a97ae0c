//! Integration tests for the workout log and streak service over SQLite.

use castletics_core::storage::{NewWorkout, Profile, WorkoutQuery};
use castletics_core::{Config, CoreError, Database, FitnessService, StreakChange, StreakRecord};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn workout(user_id: &str, name: &str, when: DateTime<Utc>) -> NewWorkout {
    NewWorkout {
        user_id: user_id.to_string(),
        workout_type: name.to_string(),
        duration_minutes: Some(25),
        calories_burned: Some(180),
        completed_at: Some(when),
        ..Default::default()
    }
}

#[test]
fn week_of_training_with_a_missed_day() {
    let svc = FitnessService::new(Database::open_memory().unwrap());
    let user = svc
        .get_or_create_user(&Profile {
            farcaster_id: 12345,
            username: Some("alice".into()),
            ..Default::default()
        })
        .unwrap();

    let plan = [
        (at(2024, 1, 1, 7, 0), StreakChange::Started, 1),
        (at(2024, 1, 2, 23, 59), StreakChange::Extended, 2),
        (at(2024, 1, 3, 0, 1), StreakChange::Extended, 3),
        (at(2024, 1, 3, 18, 0), StreakChange::Unchanged, 3),
        // Jan 4 skipped.
        (at(2024, 1, 5, 8, 0), StreakChange::Restarted, 1),
        (at(2024, 1, 6, 8, 0), StreakChange::Extended, 2),
    ];
    for (when, change, current) in plan {
        let logged = svc.log_workout(workout(&user.id, "Core Crusher", when)).unwrap();
        assert_eq!(logged.streak.change, change, "at {when}");
        assert_eq!(logged.streak.record.current_streak, current, "at {when}");
    }

    let record = svc.get_user_streak(&user.id).unwrap().unwrap();
    assert_eq!(
        record,
        StreakRecord {
            current_streak: 2,
            longest_streak: 3,
            last_activity_date: Some(day(2024, 1, 6)),
        }
    );

    let stats = svc.user_workout_stats(&user.id).unwrap();
    assert_eq!(stats.total_workouts, 6);
    assert_eq!(stats.total_duration, 150);
    assert_eq!(stats.total_calories, 1080);
    assert_eq!(stats.workout_types.get("Core Crusher"), Some(&6));
}

#[test]
fn decay_then_recovery() {
    let svc = FitnessService::new(Database::open_memory().unwrap());
    let user = svc.get_or_create_user(&Profile { farcaster_id: 1, ..Default::default() }).unwrap();
    for d in 10..=14 {
        svc.log_workout(workout(&user.id, "Leg Day", at(2024, 1, d, 12, 0))).unwrap();
    }

    // The day after the last workout is still within the grace period.
    let check = svc.check_streak_status(&user.id, day(2024, 1, 15)).unwrap();
    assert_eq!(check.record.current_streak, 5);

    let check = svc.check_streak_status(&user.id, day(2024, 1, 16)).unwrap();
    assert_eq!(check.broken_from, Some(5));
    assert_eq!(check.record.current_streak, 0);
    assert_eq!(check.record.longest_streak, 5);
    assert_eq!(check.record.last_activity_date, Some(day(2024, 1, 14)));

    let back = svc.log_workout(workout(&user.id, "Leg Day", at(2024, 1, 16, 9, 0))).unwrap();
    assert_eq!(back.streak.change, StreakChange::Restarted);
    assert_eq!(back.streak.record.current_streak, 1);
    assert_eq!(back.streak.record.longest_streak, 5);
}

#[test]
fn reference_offset_moves_day_boundary() {
    let mut config = Config::default();
    config.streak.utc_offset_minutes = 9 * 60;
    let svc = FitnessService::from_config(Database::open_memory().unwrap(), &config);
    let user = svc.get_or_create_user(&Profile { farcaster_id: 9, ..Default::default() }).unwrap();

    // 20:00 UTC on the 1st is 05:00 on the 2nd at UTC+9.
    svc.log_workout(workout(&user.id, "Abs Attack", at(2024, 1, 1, 20, 0))).unwrap();
    let logged = svc
        .log_workout(workout(&user.id, "Abs Attack", at(2024, 1, 2, 10, 0)))
        .unwrap();
    assert_eq!(logged.streak.change, StreakChange::Unchanged);
    assert_eq!(logged.streak.record.last_activity_date, Some(day(2024, 1, 2)));
}

#[test]
fn history_is_paged_newest_first() {
    let svc = FitnessService::new(Database::open_memory().unwrap());
    let user = svc.get_or_create_user(&Profile { farcaster_id: 3, ..Default::default() }).unwrap();
    for d in 1..=15 {
        svc.log_workout(workout(&user.id, &format!("W{d}"), at(2024, 2, d, 6, 0))).unwrap();
    }

    let page = svc
        .user_workouts(&user.id, &WorkoutQuery { offset: Some(2), ..Default::default() })
        .unwrap();
    assert_eq!(page.len(), 10);
    assert_eq!(page[0].workout_type, "W13");

    let window = svc
        .user_workouts(
            &user.id,
            &WorkoutQuery {
                start: Some(at(2024, 2, 5, 0, 0)),
                end: Some(at(2024, 2, 7, 23, 59)),
                ..Default::default()
            },
        )
        .unwrap();
    let names: Vec<_> = window.iter().map(|w| w.workout_type.as_str()).collect();
    assert_eq!(names, ["W7", "W6", "W5"]);
}

#[test]
fn feed_and_leaderboard_span_users() {
    let svc = FitnessService::new(Database::open_memory().unwrap());
    let alice = svc
        .get_or_create_user(&Profile { farcaster_id: 1, username: Some("alice".into()), ..Default::default() })
        .unwrap();
    let bob = svc
        .get_or_create_user(&Profile { farcaster_id: 2, username: Some("bob".into()), ..Default::default() })
        .unwrap();

    for d in 1..=3 {
        svc.log_workout(workout(&alice.id, "Push Power", at(2024, 3, d, 7, 0))).unwrap();
    }
    svc.log_workout(workout(&bob.id, "Full Body Blast", at(2024, 3, 4, 7, 0))).unwrap();

    let board = svc.streak_leaderboard(None).unwrap();
    assert_eq!(board[0].username, "alice");
    assert_eq!(board[0].streak.current_streak, 3);
    assert_eq!(board[1].username, "bob");

    let feed = svc.recent_workouts(Some(2)).unwrap();
    assert_eq!(feed.len(), 2);
    assert_eq!(feed[0].username.as_deref(), Some("bob"));
    assert_eq!(feed[1].username.as_deref(), Some("alice"));
}

#[test]
fn data_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("castletics.db");

    let user_id = {
        let svc = FitnessService::new(Database::open_at(&path).unwrap());
        let user = svc.get_or_create_user(&Profile { farcaster_id: 77, ..Default::default() }).unwrap();
        svc.log_workout(workout(&user.id, "Abs Attack", at(2024, 4, 1, 7, 0))).unwrap();
        user.id
    };

    let svc = FitnessService::new(Database::open_at(&path).unwrap());
    assert_eq!(svc.user_by_fid(77).unwrap().unwrap().id, user_id);
    assert_eq!(svc.get_user_streak(&user_id).unwrap().unwrap().current_streak, 1);
    assert_eq!(svc.user_workouts(&user_id, &WorkoutQuery::default()).unwrap().len(), 1);
}

#[test]
fn missing_streak_is_not_found() {
    let svc = FitnessService::new(Database::open_memory().unwrap());
    let err = svc.check_streak_status("nobody", day(2024, 1, 1)).unwrap_err();
    assert!(matches!(err, CoreError::NotFound { entity: "streak", .. }));
    assert!(svc.get_user_streak("nobody").unwrap().is_none());
}
