//! # Castletics Core Library
//!
//! Business logic for the Castletics fitness mini app: daily workouts,
//! a completion-gated workout timer and consecutive-day streaks for
//! Farcaster users. Every operation is available through the standalone
//! `castletics` CLI, which is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Streaks**: pure calendar-day arithmetic in a fixed reference offset
//! - **Timer**: a state machine advanced by `tick()`, plus a Tokio-driven
//!   session that owns the cancellable ticking task
//! - **Storage**: SQLite persistence behind small store traits, and
//!   TOML-based configuration
//! - **Auth**: CSPRNG challenge nonces and signed sign-in messages
//!
//! ## Key Components
//!
//! - [`StreakCalculator`]: streak update and daily decay
//! - [`WorkoutTimer`] / [`TimerSession`]: workout timer
//! - [`FitnessService`]: users, workout log and streak operations
//! - [`Database`]: SQLite store
//! - [`Config`]: application configuration

pub mod api;
pub mod auth;
pub mod error;
pub mod events;
pub mod service;
pub mod storage;
pub mod streak;
pub mod timer;
pub mod workouts;

pub use auth::{ChallengeManager, HmacSignInVerifier, SignInFlow, SignInMessage, SignInVerifier};
pub use error::{AuthError, ConfigError, CoreError, DatabaseError, ValidationError};
pub use events::Event;
pub use service::{FitnessService, LoggedWorkout, StreakCheck};
pub use storage::{Config, Database};
pub use streak::{StreakCalculator, StreakChange, StreakRecord, StreakUpdate};
pub use timer::{CompletionPolicy, TimerSession, TimerState, WorkoutTimer};
pub use workouts::{Category, Workout};
