//! User-facing result taxonomy for the attendance workflow.
//!
//! Every failure path returns one of these variants; nothing here aborts the
//! process. Display strings double as the messages a UI shell would show.

use crate::repo::StoreError;
use crate::utils::geo::format_distance;

#[derive(Debug, thiserror::Error)]
pub enum AttendanceError {
    #[error("User not found")]
    UserNotFound,

    #[error("You have already checked in today")]
    AlreadyCheckedIn,

    #[error("You have already checked out today")]
    AlreadyCheckedOut,

    #[error("You must check in before checking out")]
    NotCheckedIn,

    #[error("Unable to get location. Please enable GPS and try again")]
    LocationUnavailable,

    #[error("GPS accuracy is too low ({0:.0}m). Please wait for better signal")]
    LocationInaccurate(f64),

    #[error("You are not at office premises. Distance: {} from office", format_distance(*distance_m))]
    OutsideGeofence { distance_m: f64 },

    #[error("Biometric is not registered. Please register first")]
    BiometricNotRegistered,

    #[error("Authentication cancelled")]
    AuthenticationCancelled,

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Biometric unavailable: {0}")]
    BiometricUnavailable(String),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Error: {0}")]
    Internal(String),
}

impl From<anyhow::Error> for AttendanceError {
    fn from(err: anyhow::Error) -> Self {
        AttendanceError::Internal(err.to_string())
    }
}

/// Failures from the sign-up / sign-in flows.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(String),

    #[error("Email already registered")]
    EmailTaken,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Error: {0}")]
    Internal(String),
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        AuthError::Internal(err.to_string())
    }
}
