//! Orchestration over session, biometric, location and the engine — the
//! home-screen view-model's job, minus the screen.
//!
//! Gating order: resolve the session user, require a registered biometric
//! and a fresh purpose-specific confirmation, then fetch a location fix and
//! hand everything to the engine. A timed-out or denied location lookup
//! degrades to "no fix" (the engine reports it); it never half-applies a
//! mutation.

use crate::biometric::{AuthPurpose, BiometricAuthenticator, BiometricOutcome};
use crate::engine::{AttendanceEngine, CheckInSuccess, CheckOutSuccess};
use crate::error::AttendanceError;
use crate::location::{LocationFix, LocationProvider};
use crate::model::{AttendanceRecord, User};
use crate::repo::UserStore;
use crate::session::SessionStore;
use crate::utils::datetime;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

pub struct AttendanceWorkflow {
    engine: AttendanceEngine,
    users: Arc<dyn UserStore>,
    session: Arc<dyn SessionStore>,
    biometric: Arc<dyn BiometricAuthenticator>,
    location: Arc<dyn LocationProvider>,
    location_timeout: Duration,
}

impl AttendanceWorkflow {
    pub fn new(
        engine: AttendanceEngine,
        users: Arc<dyn UserStore>,
        session: Arc<dyn SessionStore>,
        biometric: Arc<dyn BiometricAuthenticator>,
        location: Arc<dyn LocationProvider>,
        location_timeout: Duration,
    ) -> Self {
        Self {
            engine,
            users,
            session,
            biometric,
            location,
            location_timeout,
        }
    }

    /// The signed-in user, if the session points at one that still exists.
    pub async fn current_user(&self) -> Result<Option<User>, AttendanceError> {
        let Some(user_id) = self.session.current_user_id()? else {
            return Ok(None);
        };
        Ok(self.users.find_by_id(user_id).await?)
    }

    /// One-time biometric enrollment; flips the user's flag only after the
    /// device confirms.
    pub async fn register_biometric(&self) -> Result<(), AttendanceError> {
        let user = self
            .current_user()
            .await?
            .ok_or(AttendanceError::UserNotFound)?;

        self.confirm_biometric(AuthPurpose::Registration).await?;

        self.users.set_biometric_registered(user.id, true).await?;
        info!(user_id = user.id, "biometric registered");
        Ok(())
    }

    pub async fn check_in(&self) -> Result<CheckInSuccess, AttendanceError> {
        let user = self
            .current_user()
            .await?
            .ok_or(AttendanceError::UserNotFound)?;

        self.gate_biometric(&user, AuthPurpose::CheckIn).await?;

        let fix = self.acquire_fix().await;
        self.engine
            .check_in(Some(&user), fix.as_ref(), datetime::today(), datetime::now())
            .await
    }

    pub async fn check_out(&self) -> Result<CheckOutSuccess, AttendanceError> {
        let user = self
            .current_user()
            .await?
            .ok_or(AttendanceError::UserNotFound)?;

        self.gate_biometric(&user, AuthPurpose::CheckOut).await?;

        let fix = self.acquire_fix().await;
        self.engine
            .check_out(Some(&user), fix.as_ref(), datetime::today(), datetime::now())
            .await
    }

    pub async fn today_attendance(&self) -> Result<Option<AttendanceRecord>, AttendanceError> {
        let user = self
            .current_user()
            .await?
            .ok_or(AttendanceError::UserNotFound)?;
        self.engine.today(user.id, datetime::today()).await
    }

    /// Chronological list, newest first.
    pub async fn history(&self) -> Result<Vec<AttendanceRecord>, AttendanceError> {
        let user = self
            .current_user()
            .await?
            .ok_or(AttendanceError::UserNotFound)?;
        self.engine.history(user.id).await
    }

    pub fn sign_out(&self) -> Result<(), AttendanceError> {
        self.session.clear()?;
        Ok(())
    }

    /// Registration must have happened at least once, then the prompt must
    /// confirm this specific action.
    async fn gate_biometric(
        &self,
        user: &User,
        purpose: AuthPurpose,
    ) -> Result<(), AttendanceError> {
        if !user.biometric_registered {
            return Err(AttendanceError::BiometricNotRegistered);
        }
        self.confirm_biometric(purpose).await
    }

    async fn confirm_biometric(&self, purpose: AuthPurpose) -> Result<(), AttendanceError> {
        match self.biometric.authenticate(purpose).await {
            BiometricOutcome::Success => Ok(()),
            BiometricOutcome::Cancelled => Err(AttendanceError::AuthenticationCancelled),
            BiometricOutcome::Unavailable { reason } => {
                Err(AttendanceError::BiometricUnavailable(reason))
            }
            BiometricOutcome::Failed { reason } => {
                Err(AttendanceError::AuthenticationFailed(reason))
            }
        }
    }

    /// Best-effort fix. Denied permission or a lookup that outlives the
    /// timeout yields `None`; the engine turns that into
    /// `LocationUnavailable`.
    async fn acquire_fix(&self) -> Option<LocationFix> {
        if !self.location.permission_granted() {
            warn!("location permission not granted");
            return None;
        }
        match tokio::time::timeout(self.location_timeout, self.location.last_known()).await {
            Ok(fix) => fix,
            Err(_) => {
                warn!("location lookup timed out");
                None
            }
        }
    }
}
