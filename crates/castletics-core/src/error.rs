//! Core error types for castletics-core.
//!
//! A single [`CoreError`] is surfaced to callers; the nested enums keep the
//! storage, configuration, sign-in and input-validation failures apart so
//! request handlers can map them onto client/server classes.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for castletics-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Sign-in and challenge errors
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A keyed record that the operation requires does not exist
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CoreError {
    pub fn not_found(entity: &'static str, key: impl Into<String>) -> Self {
        CoreError::NotFound {
            entity,
            key: key.into(),
        }
    }

    /// HTTP-style status class for this error.
    ///
    /// Client-input problems are 400, failed sign-ins 401, missing records
    /// 404 and everything else 500.
    pub fn status_code(&self) -> u16 {
        match self {
            CoreError::Validation(_) => 400,
            CoreError::Auth(_) => 401,
            CoreError::NotFound { .. } => 404,
            _ => 500,
        }
    }

    /// Whether retrying the same request could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CoreError::Database(DatabaseError::Locked))
    }
}

/// Database-specific errors.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Migration failed
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Data directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Sign-in errors. Every variant means the caller must restart the
/// challenge flow with a fresh nonce.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Signature does not match the message
    #[error("Invalid signature")]
    InvalidSignature,

    /// The signed message could not be parsed
    #[error("Malformed sign-in message: {0}")]
    MalformedMessage(String),

    /// Nonce was never issued by this server
    #[error("Unknown challenge nonce")]
    UnknownNonce,

    /// Nonce has already been consumed
    #[error("Challenge nonce already used")]
    NonceReused,

    /// Nonce is older than the configured lifetime
    #[error("Challenge nonce expired after {ttl_secs} seconds")]
    NonceExpired { ttl_secs: i64 },

    /// No signing secret configured for the local verifier
    #[error("Sign-in verifier is not configured")]
    VerifierNotConfigured,

    /// The OS random source failed
    #[error("Random source unavailable: {0}")]
    RandomUnavailable(String),
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// A required identifier or field was not supplied
    #[error("Missing {0}")]
    MissingField(&'static str),

    /// Invalid time range
    #[error("Invalid time range: end ({end}) must not be before start ({start})")]
    InvalidTimeRange {
        start: chrono::DateTime<chrono::Utc>,
        end: chrono::DateTime<chrono::Utc>,
    },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(code, _msg) => {
                if code.code == rusqlite::ErrorCode::DatabaseBusy
                    || code.code == rusqlite::ErrorCode::DatabaseLocked
                {
                    DatabaseError::Locked
                } else {
                    DatabaseError::QueryFailed(err.to_string())
                }
            }
            _ => DatabaseError::QueryFailed(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Database(err.into())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
