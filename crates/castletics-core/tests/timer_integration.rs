//! Integration tests for the workout timer driven by a Tokio session.

use std::time::Duration;

use castletics_core::timer::TimerAction;
use castletics_core::workouts::find_workout;
use castletics_core::{CompletionPolicy, Event, TimerSession, TimerState, WorkoutTimer};

async fn advance_secs(secs: u64) {
    for _ in 0..secs {
        tokio::time::advance(Duration::from_secs(1)).await;
    }
    tokio::task::yield_now().await;
}

#[test]
fn catalog_workout_thresholds() {
    let workout = find_workout("Abs Attack").unwrap();
    let timer = WorkoutTimer::new(workout);
    let expected = CompletionPolicy::default().min_required_secs(u64::from(workout.duration) * 60);
    assert_eq!(timer.min_required_secs(), expected);
    assert!(timer.min_required_secs() >= CompletionPolicy::DEFAULT_FLOOR_SECS);
    assert_eq!(timer.available_actions(), vec![TimerAction::Start]);
}

#[tokio::test(start_paused = true)]
async fn thirty_minute_session_end_to_end() {
    let timer = WorkoutTimer::with_policy("Core Crusher", 30, CompletionPolicy::default());
    let (mut session, mut events) = TimerSession::new(timer);

    assert!(matches!(session.start(), Some(Event::TimerStarted { min_required_secs: 1260, .. })));
    advance_secs(600).await;
    session.pause();
    advance_secs(120).await;
    assert_eq!(session.timer().elapsed_secs(), 600);
    assert!(session.complete().is_none());

    session.resume();
    advance_secs(659).await;
    assert!(!session.timer().can_complete());
    advance_secs(1).await;
    assert!(session.timer().can_complete());
    assert!(matches!(events.try_recv(), Ok(Event::MinimumReached { elapsed_secs: 1260, .. })));

    let done = session.complete().unwrap();
    assert!(matches!(
        done,
        Event::WorkoutCompleted { duration_minutes: 30, elapsed_secs: 1260, .. }
    ));
    assert_eq!(session.timer().state(), TimerState::Completed);
    assert!(matches!(events.try_recv(), Ok(Event::WorkoutCompleted { .. })));

    assert!(session.reset().is_some());
    assert!(session.start().is_some());
    advance_secs(5).await;
    assert_eq!(session.timer().elapsed_display(), "00:05");
}

#[tokio::test(start_paused = true)]
async fn short_workout_is_held_to_the_floor() {
    let timer = WorkoutTimer::with_policy("Quick Core", 3, CompletionPolicy::default());
    let (mut session, _events) = TimerSession::new(timer);
    session.start();
    advance_secs(180).await;
    assert_eq!(session.timer().progress(), 1.0);
    assert!(session.complete().is_none());
    advance_secs(120).await;
    assert!(session.complete().is_some());
}
