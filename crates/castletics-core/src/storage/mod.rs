mod config;
pub mod database;
pub mod models;
pub mod store;

pub use config::Config;
pub use database::Database;
pub use models::{
    FeedEntry, LeaderboardEntry, MonthlyCount, NewWorkout, NonceRecord, Profile, User,
    UserChanges, WorkoutChanges, WorkoutEntry, WorkoutQuery, WorkoutStats,
};
pub use store::{ActivityLog, NonceStore, Store, StreakStore, UserStore};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/castletics[-dev]/` based on CASTLETICS_ENV.
///
/// Set CASTLETICS_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("CASTLETICS_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("castletics-dev")
    } else {
        base_dir.join("castletics")
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
