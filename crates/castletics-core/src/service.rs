//! User, workout-log and streak operations over an injected [`Store`].
//!
//! Every write that touches more than one table runs inside
//! [`Store::atomically`].

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::{CoreError, Result, ValidationError};
use crate::events::Event;
use crate::storage::{
    Config, FeedEntry, LeaderboardEntry, NewWorkout, Profile, Store, User, UserChanges,
    WorkoutChanges, WorkoutEntry, WorkoutQuery, WorkoutStats,
};
use crate::streak::{StreakCalculator, StreakRecord, StreakUpdate};

pub const DEFAULT_LEADERBOARD_LIMIT: usize = 10;
pub const DEFAULT_FEED_LIMIT: usize = 20;

/// Result of [`FitnessService::log_workout`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoggedWorkout {
    pub entry: WorkoutEntry,
    pub streak: StreakUpdate,
}

impl LoggedWorkout {
    pub fn event(&self) -> Event {
        Event::StreakUpdated {
            user_id: self.entry.user_id.clone(),
            change: self.streak.change,
            current_streak: self.streak.record.current_streak,
            longest_streak: self.streak.record.longest_streak,
            at: self.entry.completed_at,
        }
    }
}

/// Result of [`FitnessService::check_streak_status`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreakCheck {
    pub record: StreakRecord,
    /// Current streak before the check, when the check zeroed it.
    pub broken_from: Option<u32>,
}

impl StreakCheck {
    pub fn event(&self, user_id: &str, at: DateTime<Utc>) -> Option<Event> {
        self.broken_from.map(|previous_streak| Event::StreakBroken {
            user_id: user_id.to_string(),
            previous_streak,
            at,
        })
    }
}

pub struct FitnessService<S> {
    store: S,
    calculator: StreakCalculator,
    leaderboard_limit: usize,
    feed_limit: usize,
}

impl<S: Store> FitnessService<S> {
    pub fn new(store: S) -> Self {
        Self::with_calculator(store, StreakCalculator::new())
    }

    pub fn with_calculator(store: S, calculator: StreakCalculator) -> Self {
        Self {
            store,
            calculator,
            leaderboard_limit: DEFAULT_LEADERBOARD_LIMIT,
            feed_limit: DEFAULT_FEED_LIMIT,
        }
    }

    pub fn from_config(store: S, config: &Config) -> Self {
        Self {
            store,
            calculator: config.calculator(),
            leaderboard_limit: config.leaderboard.default_limit,
            feed_limit: config.feed.default_limit,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn calculator(&self) -> &StreakCalculator {
        &self.calculator
    }

    /// Today's calendar day in the reference time zone.
    pub fn today(&self) -> NaiveDate {
        self.calculator.calendar_day(Utc::now())
    }

    // ── Users ────────────────────────────────────────────────────────

    /// Find the user by fid and refresh the supplied profile fields, or
    /// create them together with an empty streak.
    pub fn get_or_create_user(&self, profile: &Profile) -> Result<User> {
        self.store.atomically(|store| {
            let now = Utc::now();
            if let Some(mut user) = store.user_by_fid(profile.farcaster_id)? {
                profile.changes().apply_to(&mut user);
                user.updated_at = now;
                store.update_user(&user)?;
                return Ok(user);
            }

            let user = User {
                id: Uuid::new_v4().to_string(),
                farcaster_id: profile.farcaster_id,
                username: profile.username.clone(),
                display_name: profile.display_name.clone(),
                bio: profile.bio.clone(),
                pfp_url: profile.pfp_url.clone(),
                created_at: now,
                updated_at: now,
            };
            store.insert_user(&user)?;
            store.save_streak(&user.id, &StreakRecord::new())?;
            tracing::info!(user_id = %user.id, fid = user.farcaster_id, "user created");
            Ok(user)
        })
    }

    pub fn user_by_id(&self, user_id: &str) -> Result<Option<User>> {
        self.store.user_by_id(user_id)
    }

    pub fn user_by_fid(&self, fid: u64) -> Result<Option<User>> {
        self.store.user_by_fid(fid)
    }

    /// Overwrite the supplied profile fields of an existing user.
    pub fn update_user(&self, user_id: &str, changes: &UserChanges) -> Result<User> {
        let user = self.store.atomically(|store| {
            let mut user = store
                .user_by_id(user_id)?
                .ok_or_else(|| CoreError::not_found("user", user_id))?;
            changes.apply_to(&mut user);
            user.updated_at = Utc::now();
            store.update_user(&user)?;
            Ok(user)
        })?;
        tracing::info!(%user_id, "user updated");
        Ok(user)
    }

    // ── Workout log ──────────────────────────────────────────────────

    /// Append a workout and fold it into the user's streak. Both writes
    /// land or neither does.
    pub fn log_workout(&self, new: NewWorkout) -> Result<LoggedWorkout> {
        if new.user_id.trim().is_empty() {
            return Err(ValidationError::MissingField("user_id").into());
        }
        if new.workout_type.trim().is_empty() {
            return Err(ValidationError::MissingField("workout_type").into());
        }

        let now = Utc::now();
        let entry = WorkoutEntry {
            id: Uuid::new_v4().to_string(),
            user_id: new.user_id,
            workout_type: new.workout_type,
            duration_minutes: new.duration_minutes,
            calories_burned: new.calories_burned,
            notes: new.notes,
            completed_at: new.completed_at.unwrap_or(now),
            created_at: now,
        };

        let streak = self.store.atomically(|store| {
            let record = store
                .load_streak(&entry.user_id)?
                .ok_or_else(|| CoreError::not_found("streak", entry.user_id.as_str()))?;
            store.insert_workout(&entry)?;
            let day = self.calculator.calendar_day(entry.completed_at);
            let update = self.calculator.apply_activity(&record, day);
            store.save_streak(&entry.user_id, &update.record)?;
            Ok(update)
        })?;

        tracing::info!(
            user_id = %entry.user_id,
            workout = %entry.workout_type,
            change = ?streak.change,
            current = streak.record.current_streak,
            "workout logged"
        );
        Ok(LoggedWorkout { entry, streak })
    }

    /// A user's workouts, newest first.
    pub fn user_workouts(&self, user_id: &str, query: &WorkoutQuery) -> Result<Vec<WorkoutEntry>> {
        if let (Some(start), Some(end)) = (query.start, query.end) {
            if end < start {
                return Err(ValidationError::InvalidTimeRange { start, end }.into());
            }
        }
        self.store.user_workouts(user_id, query)
    }

    /// Activity feed across all users.
    pub fn recent_workouts(&self, limit: Option<usize>) -> Result<Vec<FeedEntry>> {
        self.store.recent_workouts(limit.unwrap_or(self.feed_limit))
    }

    pub fn user_workout_stats(&self, user_id: &str) -> Result<WorkoutStats> {
        let entries = self.store.user_workouts(user_id, &WorkoutQuery::default())?;
        Ok(WorkoutStats::from_entries(&entries, &self.calculator))
    }

    /// Delete one of the user's own workouts. Streaks are left as they are.
    /// Edit one of the user's own workouts. Streaks are left as they are.
    pub fn update_workout(
        &self,
        workout_id: &str,
        user_id: &str,
        changes: WorkoutChanges,
    ) -> Result<WorkoutEntry> {
        if changes
            .workout_type
            .as_deref()
            .is_some_and(|t| t.trim().is_empty())
        {
            return Err(ValidationError::MissingField("workout_type").into());
        }
        let entry = self.store.atomically(|store| {
            let mut entry = store
                .workout_by_id(workout_id)?
                .filter(|e| e.user_id == user_id)
                .ok_or_else(|| CoreError::not_found("workout", workout_id))?;
            changes.apply_to(&mut entry);
            if !store.update_workout(&entry)? {
                return Err(CoreError::not_found("workout", workout_id));
            }
            Ok(entry)
        })?;
        tracing::info!(%workout_id, %user_id, "workout updated");
        Ok(entry)
    }

    pub fn delete_workout(&self, workout_id: &str, user_id: &str) -> Result<()> {
        if self.store.delete_workout(workout_id, user_id)? {
            tracing::info!(%workout_id, %user_id, "workout deleted");
            Ok(())
        } else {
            Err(CoreError::not_found("workout", workout_id))
        }
    }

    pub fn has_worked_out_today(&self, user_id: &str, today: NaiveDate) -> Result<bool> {
        let (start, end) = self.day_bounds(today);
        let query = WorkoutQuery {
            limit: Some(1),
            start: Some(start),
            end: Some(end),
            ..Default::default()
        };
        Ok(!self.store.user_workouts(user_id, &query)?.is_empty())
    }

    // ── Streaks ──────────────────────────────────────────────────────

    pub fn get_user_streak(&self, user_id: &str) -> Result<Option<StreakRecord>> {
        self.store.load_streak(user_id)
    }

    /// Apply the daily decay check for `today` and persist the result if
    /// it changed.
    pub fn check_streak_status(&self, user_id: &str, today: NaiveDate) -> Result<StreakCheck> {
        self.store.atomically(|store| {
            let record = store
                .load_streak(user_id)?
                .ok_or_else(|| CoreError::not_found("streak", user_id))?;
            let checked = self.calculator.check_daily_decay(&record, today);
            if checked == record {
                return Ok(StreakCheck {
                    record,
                    broken_from: None,
                });
            }
            store.save_streak(user_id, &checked)?;
            tracing::info!(%user_id, previous = record.current_streak, "streak broken");
            Ok(StreakCheck {
                record: checked,
                broken_from: Some(record.current_streak),
            })
        })
    }

    pub fn reset_user_streak(&self, user_id: &str) -> Result<StreakRecord> {
        self.store.atomically(|store| {
            let record = store
                .load_streak(user_id)?
                .ok_or_else(|| CoreError::not_found("streak", user_id))?;
            let reset = self.calculator.reset(&record);
            store.save_streak(user_id, &reset)?;
            tracing::info!(%user_id, "streak reset");
            Ok(reset)
        })
    }

    pub fn streak_leaderboard(&self, limit: Option<usize>) -> Result<Vec<LeaderboardEntry>> {
        self.store
            .streak_leaderboard(limit.unwrap_or(self.leaderboard_limit))
    }

    /// First and last instant of `day` in the reference time zone.
    pub fn day_bounds(&self, day: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
        let offset = Duration::seconds(i64::from(self.calculator.offset().local_minus_utc()));
        let start = Utc.from_utc_datetime(&(day.and_time(NaiveTime::MIN) - offset));
        let end = start + Duration::days(1) - Duration::microseconds(1);
        (start, end)
    }
}
