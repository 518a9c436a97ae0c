//! Request handlers for the mini app's three endpoints: nonce issuance,
//! sign-in verification and the streak read/log pair.
//!
//! Handlers take already-deserialized request bodies and return typed
//! responses. [`respond`] turns a handler result into a status code and
//! JSON body for whatever transport sits in front.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::auth::{ChallengeManager, SignInFlow, SignInVerifier};
use crate::error::{CoreError, Result, ValidationError};
use crate::service::FitnessService;
use crate::storage::{NewWorkout, NonceStore, Profile, Store};
use crate::streak::StreakRecord;
use crate::workouts;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NonceResponse {
    pub nonce: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifySignInRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub signature: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInResponse {
    pub fid: u64,
}

/// `fid` arrives as a query/body string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakQuery {
    #[serde(default)]
    pub fid: Option<String>,
}

impl StreakQuery {
    pub fn for_fid(fid: u64) -> Self {
        Self {
            fid: Some(fid.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakResponse {
    pub streak: u32,
    pub longest_streak: u32,
    pub last_workout: Option<NaiveDate>,
}

impl From<StreakRecord> for StreakResponse {
    fn from(record: StreakRecord) -> Self {
        Self {
            streak: record.current_streak,
            longest_streak: record.longest_streak,
            last_workout: record.last_activity_date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    /// Set when the same request may succeed if sent again.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub retryable: bool,
}

impl From<&CoreError> for ErrorResponse {
    fn from(err: &CoreError) -> Self {
        let retryable = err.is_retryable();
        let error = match err {
            CoreError::Validation(e) => e.to_string(),
            CoreError::Auth(_) => "Invalid signature".to_string(),
            CoreError::NotFound { .. } => err.to_string(),
            _ if retryable => "Temporarily unavailable, try again".to_string(),
            _ => "Internal error".to_string(),
        };
        Self { error, retryable }
    }
}

/// Status code and JSON body for a handler result.
pub fn respond<T: Serialize>(result: Result<T>) -> (u16, serde_json::Value) {
    let err = match result {
        Ok(body) => match serde_json::to_value(body) {
            Ok(json) => return (200, json),
            Err(e) => CoreError::from(e),
        },
        Err(e) => e,
    };
    if err.is_retryable() {
        tracing::warn!(error = %err, "request failed, retryable");
    } else if err.status_code() >= 500 {
        tracing::error!(error = %err, "request failed");
    }
    let body = serde_json::to_value(ErrorResponse::from(&err))
        .unwrap_or_else(|_| serde_json::Value::Null);
    (err.status_code(), body)
}

pub fn issue_nonce<S: NonceStore>(challenges: &ChallengeManager<S>) -> Result<NonceResponse> {
    Ok(NonceResponse {
        nonce: challenges.issue()?,
    })
}

pub fn verify_sign_in<S: NonceStore, V: SignInVerifier>(
    flow: &SignInFlow<S, V>,
    request: &VerifySignInRequest,
) -> Result<SignInResponse> {
    let (Some(message), Some(signature)) = (
        non_empty(request.message.as_deref()),
        non_empty(request.signature.as_deref()),
    ) else {
        return Err(ValidationError::MissingField("message or signature").into());
    };
    Ok(SignInResponse {
        fid: flow.verify(message, signature)?,
    })
}

/// Stored streak for `fid`; zero for users who never logged a workout.
pub fn get_streak<S: Store>(service: &FitnessService<S>, query: &StreakQuery) -> Result<StreakResponse> {
    let fid = parse_fid(query)?;
    let record = match service.user_by_fid(fid)? {
        Some(user) => service.get_user_streak(&user.id)?.unwrap_or_default(),
        None => StreakRecord::new(),
    };
    Ok(record.into())
}

/// Record today's workout for `fid`, creating the user on first use.
pub fn log_streak<S: Store>(service: &FitnessService<S>, query: &StreakQuery) -> Result<StreakResponse> {
    let fid = parse_fid(query)?;
    let user = service.get_or_create_user(&Profile {
        farcaster_id: fid,
        ..Default::default()
    })?;
    let workout = workouts::workout_of_the_day(service.today());
    let logged = service.log_workout(NewWorkout {
        user_id: user.id,
        workout_type: workout.name.to_string(),
        duration_minutes: Some(workout.duration),
        ..Default::default()
    })?;
    Ok(logged.streak.record.into())
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_fid(query: &StreakQuery) -> Result<u64> {
    let raw = non_empty(query.fid.as_deref()).ok_or(ValidationError::MissingField("fid"))?;
    raw.trim().parse::<u64>().map_err(|_| {
        ValidationError::InvalidValue {
            field: "fid".into(),
            message: format!("'{raw}' is not a numeric fid"),
        }
        .into()
    })
}
