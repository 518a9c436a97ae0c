use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::streak::StreakChange;
use crate::timer::TimerState;

/// Every state change in the system produces an Event.
/// The CLI prints them as JSON; the timer session pushes the asynchronous
/// ones down its notification channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        workout: String,
        required_secs: u64,
        min_required_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        elapsed_secs: u64,
        at: DateTime<Utc>,
    },
    TimerResumed {
        elapsed_secs: u64,
        at: DateTime<Utc>,
    },
    /// Elapsed time just crossed the completion threshold.
    MinimumReached {
        elapsed_secs: u64,
        at: DateTime<Utc>,
    },
    WorkoutCompleted {
        workout: String,
        duration_minutes: u32,
        elapsed_secs: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        at: DateTime<Utc>,
    },
    TimerSnapshot {
        state: TimerState,
        workout: String,
        elapsed_secs: u64,
        required_secs: u64,
        min_required_secs: u64,
        can_complete: bool,
        progress: f64,
        at: DateTime<Utc>,
    },
    StreakUpdated {
        user_id: String,
        change: StreakChange,
        current_streak: u32,
        longest_streak: u32,
        at: DateTime<Utc>,
    },
    /// Daily check found a missed day and zeroed the current streak.
    StreakBroken {
        user_id: String,
        previous_streak: u32,
        at: DateTime<Utc>,
    },
}
