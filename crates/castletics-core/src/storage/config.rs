//! TOML-based application configuration.
//!
//! Stores:
//! - The reference time zone used to turn timestamps into streak days
//! - Workout timer completion thresholds
//! - Sign-in challenge settings
//! - Default page sizes for the leaderboard and activity feed
//! - Log level
//!
//! Configuration is stored at `~/.config/castletics/config.toml`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::auth::MIN_NONCE_LENGTH;
use crate::error::ConfigError;
use crate::streak::StreakCalculator;
use crate::timer::CompletionPolicy;

/// Streak day boundaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreakConfig {
    /// Offset of the reference time zone from UTC, in minutes.
    #[serde(default)]
    pub utc_offset_minutes: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerConfig {
    #[serde(default = "default_min_completion_percent")]
    pub min_completion_percent: u32,
    #[serde(default = "default_min_completion_floor_secs")]
    pub min_completion_floor_secs: u64,
    /// Wall-clock length of one timer second. Lower it for demos.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_nonce_length")]
    pub nonce_length: usize,
    #[serde(default = "default_nonce_ttl_secs")]
    pub nonce_ttl_secs: i64,
    /// Shared secret for the local HMAC verifier. Sign-in is refused when unset.
    #[serde(default)]
    pub signing_secret: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardConfig {
    #[serde(default = "default_leaderboard_limit")]
    pub default_limit: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedConfig {
    #[serde(default = "default_feed_limit")]
    pub default_limit: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/castletics/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub streak: StreakConfig,
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub leaderboard: LeaderboardConfig,
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

// Default functions
fn default_min_completion_percent() -> u32 {
    CompletionPolicy::DEFAULT_MIN_PERCENT
}
fn default_min_completion_floor_secs() -> u64 {
    CompletionPolicy::DEFAULT_FLOOR_SECS
}
fn default_tick_interval_ms() -> u64 {
    1000
}
fn default_nonce_length() -> usize {
    16
}
fn default_nonce_ttl_secs() -> i64 {
    600
}
fn default_leaderboard_limit() -> usize {
    10
}
fn default_feed_limit() -> usize {
    20
}
fn default_log_level() -> String {
    "info".into()
}

impl Default for StreakConfig {
    fn default() -> Self {
        Self { utc_offset_minutes: 0 }
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            min_completion_percent: default_min_completion_percent(),
            min_completion_floor_secs: default_min_completion_floor_secs(),
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            nonce_length: default_nonce_length(),
            nonce_ttl_secs: default_nonce_ttl_secs(),
            signing_secret: None,
        }
    }
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self {
            default_limit: default_leaderboard_limit(),
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            default_limit: default_feed_limit(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_some() {
                current = current.get_mut(part).ok_or_else(unknown)?;
                continue;
            }

            let obj = current.as_object_mut().ok_or_else(unknown)?;
            let existing = obj.get(part).ok_or_else(unknown)?;

            let new_value = match existing {
                serde_json::Value::Bool(_) => serde_json::Value::Bool(
                    value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                ),
                serde_json::Value::Number(_) => {
                    if let Ok(n) = value.parse::<i64>() {
                        serde_json::Value::Number(n.into())
                    } else {
                        return Err(invalid(format!("cannot parse '{value}' as integer")));
                    }
                }
                // Optional fields serialize as null; any string replaces them.
                _ => serde_json::Value::String(value.into()),
            };

            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path, writing defaults there if it is missing.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key without saving. Returns error if the key is
    /// unknown or the resulting config is invalid.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config =
            serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Set a config value by key and save.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.apply(key, value)?;
        self.save()
    }

    /// Restore every value to its default and save.
    pub fn reset(&mut self) -> Result<(), ConfigError> {
        *self = Self::default();
        self.save()
    }

    /// Flattened `key = value` pairs, sorted by key.
    pub fn entries(&self) -> Vec<(String, String)> {
        fn walk(prefix: &str, value: &serde_json::Value, out: &mut Vec<(String, String)>) {
            match value {
                serde_json::Value::Object(map) => {
                    for (k, v) in map {
                        let key = if prefix.is_empty() {
                            k.clone()
                        } else {
                            format!("{prefix}.{k}")
                        };
                        walk(&key, v, out);
                    }
                }
                serde_json::Value::String(s) => out.push((prefix.to_string(), s.clone())),
                other => out.push((prefix.to_string(), other.to_string())),
            }
        }

        let mut out = Vec::new();
        if let Ok(json) = serde_json::to_value(self) {
            walk("", &json, &mut out);
        }
        out.sort();
        out
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |key: &str, message: &str| {
            Err(ConfigError::InvalidValue {
                key: key.to_string(),
                message: message.to_string(),
            })
        };
        if self.streak.utc_offset_minutes.abs() >= 24 * 60 {
            return invalid("streak.utc_offset_minutes", "must be within +/- 1439");
        }
        if self.timer.min_completion_percent > 100 {
            return invalid("timer.min_completion_percent", "must be 0..=100");
        }
        if self.timer.min_completion_floor_secs < CompletionPolicy::DEFAULT_FLOOR_SECS {
            return invalid("timer.min_completion_floor_secs", "must be at least 300");
        }
        if self.timer.tick_interval_ms == 0 {
            return invalid("timer.tick_interval_ms", "must be positive");
        }
        if self.auth.nonce_ttl_secs <= 0 {
            return invalid("auth.nonce_ttl_secs", "must be positive");
        }
        Ok(())
    }

    /// Calculator in the configured reference time zone.
    pub fn calculator(&self) -> StreakCalculator {
        StreakCalculator::with_offset_minutes(self.streak.utc_offset_minutes)
    }

    pub fn completion_policy(&self) -> CompletionPolicy {
        CompletionPolicy {
            min_percent: self.timer.min_completion_percent,
            floor_secs: self.timer.min_completion_floor_secs,
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.timer.tick_interval_ms)
    }

    /// Configured nonce length, never below [`MIN_NONCE_LENGTH`].
    pub fn nonce_length(&self) -> usize {
        self.auth.nonce_length.max(MIN_NONCE_LENGTH)
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to default configuration");
            Self::default()
        })
    }
}
