//! Persistence seams.
//!
//! Services only talk to these traits; [`super::Database`] is the SQLite
//! implementation. "Not found" is always `Ok(None)` / `Ok(false)`, never an
//! error.

use chrono::{DateTime, Utc};

use super::models::{FeedEntry, LeaderboardEntry, NonceRecord, User, WorkoutEntry, WorkoutQuery};
use crate::error::Result;
use crate::streak::StreakRecord;

pub trait UserStore {
    fn user_by_id(&self, id: &str) -> Result<Option<User>>;
    fn user_by_fid(&self, fid: u64) -> Result<Option<User>>;
    fn insert_user(&self, user: &User) -> Result<()>;
    /// Overwrites the profile columns and `updated_at`.
    fn update_user(&self, user: &User) -> Result<()>;
}

pub trait StreakStore {
    fn load_streak(&self, user_id: &str) -> Result<Option<StreakRecord>>;
    /// Insert or replace the record for `user_id`.
    fn save_streak(&self, user_id: &str, record: &StreakRecord) -> Result<()>;
    /// Highest current streaks first.
    fn streak_leaderboard(&self, limit: usize) -> Result<Vec<LeaderboardEntry>>;
}

pub trait ActivityLog {
    fn insert_workout(&self, entry: &WorkoutEntry) -> Result<()>;
    fn workout_by_id(&self, workout_id: &str) -> Result<Option<WorkoutEntry>>;
    /// Rewrites the editable columns. Only when the workout belongs to
    /// `entry.user_id`.
    fn update_workout(&self, entry: &WorkoutEntry) -> Result<bool>;
    fn user_workouts(&self, user_id: &str, query: &WorkoutQuery) -> Result<Vec<WorkoutEntry>>;
    fn recent_workouts(&self, limit: usize) -> Result<Vec<FeedEntry>>;
    /// Deletes only when the workout belongs to `user_id`.
    fn delete_workout(&self, workout_id: &str, user_id: &str) -> Result<bool>;
}

pub trait NonceStore {
    fn insert_nonce(&self, nonce: &str, issued_at: DateTime<Utc>) -> Result<()>;
    fn load_nonce(&self, nonce: &str) -> Result<Option<NonceRecord>>;
    /// Marks the nonce used. `false` if it was already used or unknown.
    fn mark_nonce_consumed(&self, nonce: &str, at: DateTime<Utc>) -> Result<bool>;
    /// Drops challenges issued before `cutoff`. Returns how many went.
    fn purge_nonces_before(&self, cutoff: DateTime<Utc>) -> Result<usize>;
}

/// Everything the fitness service needs, plus all-or-nothing batches.
pub trait Store: UserStore + StreakStore + ActivityLog {
    /// Runs `f` in a transaction. Any error rolls back every write made
    /// inside it.
    fn atomically<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Self) -> Result<T>;
}

impl<T: UserStore> UserStore for &T {
    fn user_by_id(&self, id: &str) -> Result<Option<User>> {
        (**self).user_by_id(id)
    }
    fn user_by_fid(&self, fid: u64) -> Result<Option<User>> {
        (**self).user_by_fid(fid)
    }
    fn insert_user(&self, user: &User) -> Result<()> {
        (**self).insert_user(user)
    }
    fn update_user(&self, user: &User) -> Result<()> {
        (**self).update_user(user)
    }
}

impl<T: StreakStore> StreakStore for &T {
    fn load_streak(&self, user_id: &str) -> Result<Option<StreakRecord>> {
        (**self).load_streak(user_id)
    }
    fn save_streak(&self, user_id: &str, record: &StreakRecord) -> Result<()> {
        (**self).save_streak(user_id, record)
    }
    fn streak_leaderboard(&self, limit: usize) -> Result<Vec<LeaderboardEntry>> {
        (**self).streak_leaderboard(limit)
    }
}

impl<T: ActivityLog> ActivityLog for &T {
    fn insert_workout(&self, entry: &WorkoutEntry) -> Result<()> {
        (**self).insert_workout(entry)
    }
    fn workout_by_id(&self, workout_id: &str) -> Result<Option<WorkoutEntry>> {
        (**self).workout_by_id(workout_id)
    }
    fn update_workout(&self, entry: &WorkoutEntry) -> Result<bool> {
        (**self).update_workout(entry)
    }
    fn user_workouts(&self, user_id: &str, query: &WorkoutQuery) -> Result<Vec<WorkoutEntry>> {
        (**self).user_workouts(user_id, query)
    }
    fn recent_workouts(&self, limit: usize) -> Result<Vec<FeedEntry>> {
        (**self).recent_workouts(limit)
    }
    fn delete_workout(&self, workout_id: &str, user_id: &str) -> Result<bool> {
        (**self).delete_workout(workout_id, user_id)
    }
}

impl<T: NonceStore> NonceStore for &T {
    fn insert_nonce(&self, nonce: &str, issued_at: DateTime<Utc>) -> Result<()> {
        (**self).insert_nonce(nonce, issued_at)
    }
    fn load_nonce(&self, nonce: &str) -> Result<Option<NonceRecord>> {
        (**self).load_nonce(nonce)
    }
    fn mark_nonce_consumed(&self, nonce: &str, at: DateTime<Utc>) -> Result<bool> {
        (**self).mark_nonce_consumed(nonce, at)
    }
    fn purge_nonces_before(&self, cutoff: DateTime<Utc>) -> Result<usize> {
        (**self).purge_nonces_before(cutoff)
    }
}

impl<S: Store> Store for &S {
    fn atomically<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Self) -> Result<T>,
    {
        (**self).atomically(|_| f(self))
    }
}
