//! Device biometric prompt, seen from the core's side of the fence.
//!
//! The platform shell owns the actual prompt UI; the core only consumes the
//! outcome. Hardware or enrollment problems are reported apart from the user
//! pressing cancel so callers can phrase the two differently.

use async_trait::async_trait;
use std::sync::Mutex;

/// What the user is authenticating for. The prompt wording and the gating
/// rules differ per purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPurpose {
    Registration,
    CheckIn,
    CheckOut,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BiometricOutcome {
    Success,
    Cancelled,
    /// No hardware, or nothing enrolled on the device.
    Unavailable { reason: String },
    /// Sensor rejected the user.
    Failed { reason: String },
}

#[async_trait]
pub trait BiometricAuthenticator: Send + Sync {
    async fn authenticate(&self, purpose: AuthPurpose) -> BiometricOutcome;
}

/// Pops pre-scripted outcomes in order; repeats the last one when the script
/// runs dry. For tests and demos.
pub struct ScriptedBiometric {
    outcomes: Mutex<Vec<BiometricOutcome>>,
}

impl ScriptedBiometric {
    pub fn new(outcomes: Vec<BiometricOutcome>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes),
        }
    }

    pub fn always(outcome: BiometricOutcome) -> Self {
        Self::new(vec![outcome])
    }
}

#[async_trait]
impl BiometricAuthenticator for ScriptedBiometric {
    async fn authenticate(&self, _purpose: AuthPurpose) -> BiometricOutcome {
        let mut outcomes = self.outcomes.lock().unwrap();
        if outcomes.len() > 1 {
            outcomes.remove(0)
        } else {
            outcomes
                .first()
                .cloned()
                .unwrap_or(BiometricOutcome::Unavailable {
                    reason: "no scripted outcome".to_string(),
                })
        }
    }
}
