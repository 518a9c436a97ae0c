pub mod auth;
pub mod config;
pub mod streak;
pub mod timer;
pub mod user;
pub mod workout;

use std::error::Error;

use castletics_core::storage::User;
use castletics_core::{Config, CoreError, Database, FitnessService};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

pub type CmdResult = Result<(), Box<dyn Error>>;

/// Configuration and database for one command invocation.
pub struct Context {
    pub config: Config,
    pub db: Database,
}

impl Context {
    pub fn open() -> Result<Self, CoreError> {
        let config = Config::load()?;
        let db = Database::open()?;
        Ok(Self { config, db })
    }

    pub fn service(&self) -> FitnessService<&Database> {
        FitnessService::from_config(&self.db, &self.config)
    }

    /// Registered user for `fid`, or a not-found error.
    pub fn user(&self, fid: u64) -> Result<User, CoreError> {
        self.service()
            .user_by_fid(fid)?
            .ok_or_else(|| CoreError::not_found("user", format!("fid {fid}")))
    }
}

/// Today's calendar day in the configured reference time zone.
pub fn today(config: &Config) -> NaiveDate {
    config.calculator().calendar_day(Utc::now())
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// `YYYY-MM-DD`.
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("invalid date '{s}': {e}"))
}

/// RFC 3339 timestamp.
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("invalid timestamp '{s}': {e}"))
}
