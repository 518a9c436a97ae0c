//! Persisted row types and query parameters.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::streak::{StreakCalculator, StreakRecord};

/// A signed-in Farcaster user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub farcaster_id: u64,
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub pfp_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Profile fields supplied at sign-in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub farcaster_id: u64,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub pfp_url: Option<String>,
}

impl Profile {
    /// The profile fields as a partial update.
    pub fn changes(&self) -> UserChanges {
        UserChanges {
            username: self.username.clone(),
            display_name: self.display_name.clone(),
            bio: self.bio.clone(),
            pfp_url: self.pfp_url.clone(),
        }
    }
}

/// Partial profile update. `None` leaves a field as it is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserChanges {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub pfp_url: Option<String>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn apply_to(&self, user: &mut User) {
        let fields = [
            (&mut user.username, &self.username),
            (&mut user.display_name, &self.display_name),
            (&mut user.bio, &self.bio),
            (&mut user.pfp_url, &self.pfp_url),
        ];
        for (current, supplied) in fields {
            if supplied.is_some() {
                current.clone_from(supplied);
            }
        }
    }
}

/// One logged workout (an activity for streak purposes).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutEntry {
    pub id: String,
    pub user_id: String,
    pub workout_type: String,
    pub duration_minutes: Option<u32>,
    pub calories_burned: Option<u32>,
    pub notes: Option<String>,
    pub completed_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewWorkout {
    pub user_id: String,
    pub workout_type: String,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub calories_burned: Option<u32>,
    #[serde(default)]
    pub notes: Option<String>,
    /// Defaults to now.
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

/// Partial workout update. `None` leaves a field as it is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkoutChanges {
    #[serde(default)]
    pub workout_type: Option<String>,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub calories_burned: Option<u32>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl WorkoutChanges {
    pub fn apply_to(self, entry: &mut WorkoutEntry) {
        if let Some(workout_type) = self.workout_type {
            entry.workout_type = workout_type;
        }
        if self.duration_minutes.is_some() {
            entry.duration_minutes = self.duration_minutes;
        }
        if self.calories_burned.is_some() {
            entry.calories_burned = self.calories_burned;
        }
        if self.notes.is_some() {
            entry.notes = self.notes;
        }
        if let Some(completed_at) = self.completed_at {
            entry.completed_at = completed_at;
        }
    }
}

/// Filter for a user's workout history. Results are newest first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkoutQuery {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
    /// Inclusive lower bound on `completed_at`.
    pub start: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `completed_at`.
    pub end: Option<DateTime<Utc>>,
}

/// Workout with its author, for the activity feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedEntry {
    #[serde(flatten)]
    pub workout: WorkoutEntry,
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub pfp_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub user_id: String,
    pub username: String,
    pub display_name: String,
    #[serde(flatten)]
    pub streak: StreakRecord,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyCount {
    /// `YYYY-MM`
    pub month: String,
    pub count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutStats {
    pub total_workouts: u64,
    pub total_duration: u64,
    pub total_calories: u64,
    pub workout_types: BTreeMap<String, u64>,
    /// Sorted by month ascending.
    pub monthly_stats: Vec<MonthlyCount>,
}

impl WorkoutStats {
    /// Months are bucketed by calendar day in the calculator's reference
    /// time zone, the same days streaks are counted in.
    pub fn from_entries<'a>(
        entries: impl IntoIterator<Item = &'a WorkoutEntry>,
        calculator: &StreakCalculator,
    ) -> Self {
        let mut stats = WorkoutStats::default();
        let mut monthly: BTreeMap<String, u64> = BTreeMap::new();

        for entry in entries {
            stats.total_workouts += 1;
            stats.total_duration += u64::from(entry.duration_minutes.unwrap_or(0));
            stats.total_calories += u64::from(entry.calories_burned.unwrap_or(0));
            *stats.workout_types.entry(entry.workout_type.clone()).or_default() += 1;
            let day = calculator.calendar_day(entry.completed_at);
            *monthly.entry(day.format("%Y-%m").to_string()).or_default() += 1;
        }

        stats.monthly_stats = monthly
            .into_iter()
            .map(|(month, count)| MonthlyCount { month, count })
            .collect();
        stats
    }
}

/// A stored sign-in challenge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NonceRecord {
    pub nonce: String,
    pub issued_at: DateTime<Utc>,
    pub consumed_at: Option<DateTime<Utc>>,
}
