//! Calendar-day streak arithmetic.
//!
//! A streak is the number of consecutive calendar days with at least one
//! logged workout. Timestamps are folded to a calendar day in a fixed
//! reference offset before any comparison, so two workouts at 00:10 and
//! 23:50 on the same local day count once.

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};
use serde::{Deserialize, Serialize};

/// Gap (in days) that extends a streak on the next workout.
pub const CONSECUTIVE_DAY_GAP: i64 = 1;

/// A streak decays only once the gap since the last workout is strictly
/// larger than this many days. Missing yesterday is not yet a break; the
/// streak is still alive until today ends.
pub const DECAY_GRACE_DAYS: i64 = 1;

/// Persisted per-user streak state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StreakRecord {
    pub current_streak: u32,
    /// Always `>= current_streak`.
    pub longest_streak: u32,
    pub last_activity_date: Option<NaiveDate>,
}

impl StreakRecord {
    /// State of a freshly created user.
    pub fn new() -> Self {
        Self::default()
    }
}

/// How a workout moved the streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakChange {
    /// First workout ever.
    Started,
    /// Workout on the day after the previous one.
    Extended,
    /// Another workout on the same day.
    Unchanged,
    /// Gap of two or more days, or a back-dated workout.
    Restarted,
}

/// Result of applying a workout to a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakUpdate {
    pub record: StreakRecord,
    pub change: StreakChange,
}

/// Streak configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakCalculator {
    offset: FixedOffset,
}

impl StreakCalculator {
    /// Calculator using UTC calendar days.
    pub fn new() -> Self {
        Self { offset: Utc.fix() }
    }

    /// Calculator using calendar days at a fixed offset from UTC.
    ///
    /// Offsets outside +-24h fall back to UTC.
    pub fn with_offset_minutes(minutes: i32) -> Self {
        match FixedOffset::east_opt(minutes.saturating_mul(60)) {
            Some(offset) => Self { offset },
            None => Self::new(),
        }
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Calendar day of `at` in the reference offset.
    pub fn calendar_day(&self, at: DateTime<Utc>) -> NaiveDate {
        at.with_timezone(&self.offset).date_naive()
    }

    /// Apply a workout logged on `activity_day`.
    pub fn apply_activity(&self, record: &StreakRecord, activity_day: NaiveDate) -> StreakUpdate {
        let (current, change) = match record.last_activity_date {
            None => (1, StreakChange::Started),
            Some(last) => match days_between(last, activity_day) {
                0 => (record.current_streak, StreakChange::Unchanged),
                CONSECUTIVE_DAY_GAP => (
                    record.current_streak.saturating_add(1),
                    StreakChange::Extended,
                ),
                _ => (1, StreakChange::Restarted),
            },
        };

        StreakUpdate {
            record: StreakRecord {
                current_streak: current,
                longest_streak: record.longest_streak.max(current),
                last_activity_date: Some(activity_day),
            },
            change,
        }
    }

    /// New record after a workout on `activity_day`.
    pub fn update_after_activity(&self, record: &StreakRecord, activity_day: NaiveDate) -> StreakRecord {
        self.apply_activity(record, activity_day).record
    }

    /// New record after a workout completed at `at`.
    pub fn update_after_activity_at(&self, record: &StreakRecord, at: DateTime<Utc>) -> StreakRecord {
        self.update_after_activity(record, self.calendar_day(at))
    }

    /// Zero the current streak if the user skipped a whole day.
    ///
    /// `longest_streak` and `last_activity_date` are never touched.
    pub fn check_daily_decay(&self, record: &StreakRecord, today: NaiveDate) -> StreakRecord {
        let Some(last) = record.last_activity_date else {
            return *record;
        };
        if days_between(last, today) > DECAY_GRACE_DAYS && record.current_streak > 0 {
            StreakRecord {
                current_streak: 0,
                ..*record
            }
        } else {
            *record
        }
    }

    pub fn check_daily_decay_at(&self, record: &StreakRecord, now: DateTime<Utc>) -> StreakRecord {
        self.check_daily_decay(record, self.calendar_day(now))
    }

    /// Manual reset: drops the current run and forgets the last workout day.
    pub fn reset(&self, record: &StreakRecord) -> StreakRecord {
        StreakRecord {
            current_streak: 0,
            longest_streak: record.longest_streak,
            last_activity_date: None,
        }
    }
}

impl Default for StreakCalculator {
    fn default() -> Self {
        Self::new()
    }
}

/// Signed whole-day difference `to - from`.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}
