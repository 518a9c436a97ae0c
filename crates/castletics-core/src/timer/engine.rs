//! Workout timer state machine.
//!
//! The timer counts elapsed seconds up from zero. It does not own a clock:
//! whoever drives it calls `tick()` once per second while it is running
//! (see [`super::TimerSession`] for the Tokio-driven version).
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running <-> Paused
//!            |          |
//!            +-> Completed <-+      (only once the minimum is reached)
//! Running | Paused | Completed -> Idle   (reset)
//! ```
//!
//! Transitions that are not currently available return `None` and leave
//! the timer untouched. Completing early is simply not offered.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::events::Event;
use crate::workouts::Workout;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    Paused,
    Completed,
}

/// User-facing actions. [`WorkoutTimer::available_actions`] lists the ones
/// a UI should currently offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerAction {
    Start,
    Pause,
    Resume,
    Complete,
    Reset,
}

/// Completion threshold: a share of the nominal duration with an absolute
/// floor, so short workouts still require a real effort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionPolicy {
    /// Percentage of the nominal duration (70 means 70%).
    pub min_percent: u32,
    /// Lower bound in seconds, applied even when it exceeds the duration.
    pub floor_secs: u64,
}

impl CompletionPolicy {
    pub const DEFAULT_MIN_PERCENT: u32 = 70;
    pub const DEFAULT_FLOOR_SECS: u64 = 300;

    /// `max(floor(required * percent / 100), floor_secs)`.
    pub fn min_required_secs(&self, required_secs: u64) -> u64 {
        let share = required_secs.saturating_mul(u64::from(self.min_percent)) / 100;
        share.max(self.floor_secs)
    }
}

impl Default for CompletionPolicy {
    fn default() -> Self {
        Self {
            min_percent: Self::DEFAULT_MIN_PERCENT,
            floor_secs: Self::DEFAULT_FLOOR_SECS,
        }
    }
}

/// Countdown-free elapsed timer for one selected workout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutTimer {
    workout: String,
    duration_minutes: u32,
    state: TimerState,
    elapsed_secs: u64,
    required_secs: u64,
    min_required_secs: u64,
    #[serde(default)]
    started_at: Option<DateTime<Utc>>,
    /// Set once the completion event has been emitted; cleared by reset.
    #[serde(default)]
    completion_notified: bool,
}

impl WorkoutTimer {
    /// Timer for `workout` with the default 70% / 5 minute threshold.
    pub fn new(workout: &Workout) -> Self {
        Self::with_policy(workout.name, workout.duration, CompletionPolicy::default())
    }

    pub fn with_policy(workout: impl Into<String>, duration_minutes: u32, policy: CompletionPolicy) -> Self {
        let required_secs = u64::from(duration_minutes).saturating_mul(60);
        Self {
            workout: workout.into(),
            duration_minutes,
            state: TimerState::Idle,
            elapsed_secs: 0,
            required_secs,
            min_required_secs: policy.min_required_secs(required_secs),
            started_at: None,
            completion_notified: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn workout(&self) -> &str {
        &self.workout
    }

    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    pub fn required_secs(&self) -> u64 {
        self.required_secs
    }

    pub fn min_required_secs(&self) -> u64 {
        self.min_required_secs
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn minimum_reached(&self) -> bool {
        self.elapsed_secs >= self.min_required_secs
    }

    /// Whether the complete action is currently on offer.
    pub fn can_complete(&self) -> bool {
        matches!(self.state, TimerState::Running | TimerState::Paused) && self.minimum_reached()
    }

    /// Seconds still needed before completion is allowed.
    pub fn remaining_min_secs(&self) -> u64 {
        self.min_required_secs.saturating_sub(self.elapsed_secs)
    }

    /// 0.0 .. 1.0 progress towards the nominal duration.
    pub fn progress(&self) -> f64 {
        if self.required_secs == 0 {
            return 1.0;
        }
        (self.elapsed_secs as f64 / self.required_secs as f64).min(1.0)
    }

    /// Position of the minimum marker on the progress bar. Can exceed 1.0
    /// when the floor is longer than the workout itself.
    pub fn min_progress(&self) -> f64 {
        if self.required_secs == 0 {
            return 1.0;
        }
        self.min_required_secs as f64 / self.required_secs as f64
    }

    pub fn elapsed_display(&self) -> String {
        format_clock(self.elapsed_secs)
    }

    pub fn available_actions(&self) -> Vec<TimerAction> {
        let mut actions = match self.state {
            TimerState::Idle => vec![TimerAction::Start],
            TimerState::Running => vec![TimerAction::Pause, TimerAction::Reset],
            TimerState::Paused => vec![TimerAction::Resume, TimerAction::Reset],
            TimerState::Completed => vec![TimerAction::Reset],
        };
        if self.can_complete() {
            actions.push(TimerAction::Complete);
        }
        actions
    }

    /// One-line status for display.
    pub fn status_line(&self) -> String {
        match self.state {
            TimerState::Idle => format!("Ready to start {}", self.workout),
            TimerState::Running if self.minimum_reached() => {
                "Minimum time reached - you can complete now!".to_string()
            }
            TimerState::Running => format!(
                "Keep going! {} minimum remaining",
                format_clock(self.remaining_min_secs())
            ),
            TimerState::Paused => "Workout paused".to_string(),
            TimerState::Completed => "Workout completed!".to_string(),
        }
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::TimerSnapshot {
            state: self.state,
            workout: self.workout.clone(),
            elapsed_secs: self.elapsed_secs,
            required_secs: self.required_secs,
            min_required_secs: self.min_required_secs,
            can_complete: self.can_complete(),
            progress: self.progress(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        if self.state != TimerState::Idle {
            return None;
        }
        self.state = TimerState::Running;
        self.elapsed_secs = 0;
        self.completion_notified = false;
        let now = Utc::now();
        self.started_at = Some(now);
        Some(Event::TimerStarted {
            workout: self.workout.clone(),
            required_secs: self.required_secs,
            min_required_secs: self.min_required_secs,
            at: now,
        })
    }

    pub fn pause(&mut self) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        self.state = TimerState::Paused;
        Some(Event::TimerPaused {
            elapsed_secs: self.elapsed_secs,
            at: Utc::now(),
        })
    }

    pub fn resume(&mut self) -> Option<Event> {
        if self.state != TimerState::Paused {
            return None;
        }
        self.state = TimerState::Running;
        Some(Event::TimerResumed {
            elapsed_secs: self.elapsed_secs,
            at: Utc::now(),
        })
    }

    /// Returns the completion event the first time the threshold-gated
    /// transition succeeds, `None` otherwise.
    pub fn complete(&mut self) -> Option<Event> {
        if !self.can_complete() || self.completion_notified {
            return None;
        }
        self.state = TimerState::Completed;
        self.completion_notified = true;
        Some(Event::WorkoutCompleted {
            workout: self.workout.clone(),
            duration_minutes: self.duration_minutes,
            elapsed_secs: self.elapsed_secs,
            at: Utc::now(),
        })
    }

    pub fn reset(&mut self) -> Option<Event> {
        if self.state == TimerState::Idle {
            return None;
        }
        self.state = TimerState::Idle;
        self.elapsed_secs = 0;
        self.started_at = None;
        self.completion_notified = false;
        Some(Event::TimerReset { at: Utc::now() })
    }

    /// Advance one second. Only counts while running; returns
    /// `MinimumReached` on the tick that crosses the threshold.
    pub fn tick(&mut self) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        let was_reached = self.minimum_reached();
        self.elapsed_secs = self.elapsed_secs.saturating_add(1);
        if !was_reached && self.minimum_reached() {
            return Some(Event::MinimumReached {
                elapsed_secs: self.elapsed_secs,
                at: Utc::now(),
            });
        }
        None
    }
}

/// `MM:SS`, minutes not wrapped at the hour.
pub fn format_clock(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timer(minutes: u32) -> WorkoutTimer {
        WorkoutTimer::with_policy("Abs Attack", minutes, CompletionPolicy::default())
    }

    fn run_for(t: &mut WorkoutTimer, secs: u64) {
        for _ in 0..secs {
            t.tick();
        }
    }

    #[test]
    fn thirty_minute_workout_needs_seventy_percent() {
        let t = timer(30);
        assert_eq!(t.required_secs(), 1800);
        assert_eq!(t.min_required_secs(), 1260);
    }

    #[test]
    fn five_minute_workout_hits_the_floor() {
        let t = timer(5);
        assert_eq!(t.required_secs(), 300);
        assert_eq!(t.min_required_secs(), 300);
    }

    #[test]
    fn floor_can_exceed_short_workouts() {
        let t = timer(2);
        assert_eq!(t.min_required_secs(), 300);
        assert!(t.min_progress() > 1.0);
    }

    #[test]
    fn start_pause_resume() {
        let mut t = timer(30);
        assert_eq!(t.state(), TimerState::Idle);
        assert!(t.start().is_some());
        assert_eq!(t.state(), TimerState::Running);
        assert!(t.start().is_none());
        assert!(t.pause().is_some());
        assert_eq!(t.state(), TimerState::Paused);
        assert!(t.pause().is_none());
        assert!(t.resume().is_some());
        assert_eq!(t.state(), TimerState::Running);
    }

    #[test]
    fn ticks_only_count_while_running() {
        let mut t = timer(30);
        run_for(&mut t, 5);
        assert_eq!(t.elapsed_secs(), 0);
        t.start();
        run_for(&mut t, 65);
        assert_eq!(t.elapsed_display(), "01:05");
        t.pause();
        run_for(&mut t, 10);
        assert_eq!(t.elapsed_display(), "01:05");
        t.resume();
        run_for(&mut t, 15);
        assert_eq!(t.elapsed_display(), "01:20");
    }

    #[test]
    fn complete_unavailable_until_threshold() {
        let mut t = timer(30);
        t.start();
        run_for(&mut t, 1259);
        assert!(!t.can_complete());
        assert_eq!(t.available_actions(), vec![TimerAction::Pause, TimerAction::Reset]);
        assert!(t.complete().is_none());
        assert_eq!(t.state(), TimerState::Running);

        let reached = t.tick();
        assert!(matches!(reached, Some(Event::MinimumReached { elapsed_secs: 1260, .. })));
        assert!(t.can_complete());
        assert_eq!(
            t.available_actions(),
            vec![TimerAction::Pause, TimerAction::Reset, TimerAction::Complete]
        );
    }

    #[test]
    fn complete_fires_once_and_stops_counting() {
        let mut t = timer(5);
        t.start();
        run_for(&mut t, 300);
        t.pause();
        let event = t.complete();
        assert!(matches!(event, Some(Event::WorkoutCompleted { elapsed_secs: 300, .. })));
        assert_eq!(t.state(), TimerState::Completed);
        assert!(t.complete().is_none());
        run_for(&mut t, 10);
        assert_eq!(t.elapsed_secs(), 300);
        assert_eq!(t.available_actions(), vec![TimerAction::Reset]);
    }

    #[test]
    fn reset_returns_to_idle() {
        let mut t = timer(5);
        assert!(t.reset().is_none());
        t.start();
        run_for(&mut t, 42);
        assert!(t.reset().is_some());
        assert_eq!(t.state(), TimerState::Idle);
        assert_eq!(t.elapsed_secs(), 0);
        assert!(t.started_at().is_none());

        // A fresh run can complete again after reset.
        t.start();
        run_for(&mut t, 300);
        assert!(t.complete().is_some());
    }

    #[test]
    fn progress_is_capped() {
        let mut t = timer(5);
        t.start();
        run_for(&mut t, 150);
        assert!((t.progress() - 0.5).abs() < f64::EPSILON);
        run_for(&mut t, 600);
        assert_eq!(t.progress(), 1.0);
    }

    #[test]
    fn status_line_counts_down_minimum() {
        let mut t = timer(30);
        assert_eq!(t.status_line(), "Ready to start Abs Attack");
        t.start();
        run_for(&mut t, 60);
        assert_eq!(t.status_line(), "Keep going! 20:00 minimum remaining");
        run_for(&mut t, 1200);
        assert_eq!(t.status_line(), "Minimum time reached - you can complete now!");
    }

    #[test]
    fn format_clock_pads() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(45), "00:45");
        assert_eq!(format_clock(3725), "62:05");
    }

    #[test]
    fn snapshot_returns_valid_event() {
        let t = timer(30);
        match t.snapshot() {
            Event::TimerSnapshot {
                state,
                elapsed_secs,
                min_required_secs,
                can_complete,
                ..
            } => {
                assert_eq!(state, TimerState::Idle);
                assert_eq!(elapsed_secs, 0);
                assert_eq!(min_required_secs, 1260);
                assert!(!can_complete);
            }
            _ => panic!("Expected TimerSnapshot"),
        }
    }
}
