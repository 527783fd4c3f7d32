//! The daily attendance state machine.
//!
//! A (user, day) pair moves Unstarted -> CheckedIn -> CheckedOut and never
//! back. The engine is the only writer of attendance records: it validates
//! geo, time and state preconditions in a fixed order, then performs exactly
//! one insert (check-in) or one update (check-out). Biometric gating happens
//! above this layer; the engine never sees the prompt.

use crate::error::AttendanceError;
use crate::location::LocationFix;
use crate::model::{AttendanceRecord, User};
use crate::repo::{AttendanceStore, StoreError};
use crate::utils::datetime::format_duration;
use crate::utils::geo::OfficeGeofence;
use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use std::sync::Arc;
use tracing::{info, instrument};

#[derive(Debug, Clone)]
pub struct CheckInSuccess {
    pub record: AttendanceRecord,
    pub checked_in_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CheckOutSuccess {
    pub record: AttendanceRecord,
    pub checked_out_at: DateTime<Utc>,
    pub duration: TimeDelta,
}

impl CheckInSuccess {
    pub fn message(&self) -> String {
        format!(
            "Checked in successfully at {}",
            crate::utils::datetime::format_time(self.checked_in_at)
        )
    }
}

impl CheckOutSuccess {
    /// Worked-time label for the success message, e.g. "8h 30m".
    pub fn duration_label(&self) -> String {
        format_duration(self.duration)
    }

    pub fn message(&self) -> String {
        format!(
            "Checked out successfully at {}. Duration: {}",
            crate::utils::datetime::format_time(self.checked_out_at),
            self.duration_label()
        )
    }
}

pub struct AttendanceEngine {
    store: Arc<dyn AttendanceStore>,
    geofence: OfficeGeofence,
    accuracy_threshold_m: f64,
}

impl AttendanceEngine {
    pub fn new(
        store: Arc<dyn AttendanceStore>,
        geofence: OfficeGeofence,
        accuracy_threshold_m: f64,
    ) -> Self {
        Self {
            store,
            geofence,
            accuracy_threshold_m,
        }
    }

    /// Record the first check-in of the day.
    ///
    /// Precondition order is part of the contract; the first failure wins:
    /// user resolved, not yet checked in, location present, accuracy within
    /// threshold, inside the geofence.
    #[instrument(skip(self, user, location), fields(date = %today))]
    pub async fn check_in(
        &self,
        user: Option<&User>,
        location: Option<&LocationFix>,
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<CheckInSuccess, AttendanceError> {
        let user = user.ok_or(AttendanceError::UserNotFound)?;

        if self.store.has_checked_in(user.id, today).await? {
            return Err(AttendanceError::AlreadyCheckedIn);
        }

        let fix = location.ok_or(AttendanceError::LocationUnavailable)?;

        if let Some(accuracy) = fix.accuracy_m {
            if accuracy > self.accuracy_threshold_m {
                return Err(AttendanceError::LocationInaccurate(accuracy));
            }
        }

        self.require_inside_geofence(fix)?;

        let mut record = AttendanceRecord {
            id: 0,
            user_id: user.id,
            date: today,
            check_in_time: Some(now),
            check_out_time: None,
            check_in_latitude: Some(fix.latitude),
            check_in_longitude: Some(fix.longitude),
            check_out_latitude: None,
            check_out_longitude: None,
        };

        // Unique (user_id, date) index is the backstop against a racing
        // insert from another process.
        record.id = match self.store.insert(&record).await {
            Ok(id) => id,
            Err(StoreError::Duplicate) => return Err(AttendanceError::AlreadyCheckedIn),
            Err(e) => return Err(e.into()),
        };

        info!(user_id = user.id, "checked in");
        Ok(CheckInSuccess {
            record,
            checked_in_at: now,
        })
    }

    /// Complete the day's record with the check-out half.
    ///
    /// Precondition order: user resolved, checked in, not yet checked out,
    /// location present, inside the geofence. Accuracy is deliberately only
    /// gated on check-in, not here.
    #[instrument(skip(self, user, location), fields(date = %today))]
    pub async fn check_out(
        &self,
        user: Option<&User>,
        location: Option<&LocationFix>,
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<CheckOutSuccess, AttendanceError> {
        let user = user.ok_or(AttendanceError::UserNotFound)?;

        if !self.store.has_checked_in(user.id, today).await? {
            return Err(AttendanceError::NotCheckedIn);
        }
        if self.store.has_checked_out(user.id, today).await? {
            return Err(AttendanceError::AlreadyCheckedOut);
        }

        let fix = location.ok_or(AttendanceError::LocationUnavailable)?;
        self.require_inside_geofence(fix)?;

        let mut record = self
            .store
            .find_by_user_and_date(user.id, today)
            .await?
            .ok_or_else(|| AttendanceError::Internal("Attendance record not found".to_string()))?;

        let checked_in_at = record.check_in_time.ok_or_else(|| {
            AttendanceError::Internal("Attendance record has no check-in time".to_string())
        })?;

        record.check_out_time = Some(now);
        record.check_out_latitude = Some(fix.latitude);
        record.check_out_longitude = Some(fix.longitude);

        self.store.update(&record).await?;

        let duration = now - checked_in_at;
        info!(user_id = user.id, minutes = duration.num_minutes(), "checked out");
        Ok(CheckOutSuccess {
            record,
            checked_out_at: now,
            duration,
        })
    }

    pub async fn today(
        &self,
        user_id: i64,
        date: NaiveDate,
    ) -> Result<Option<AttendanceRecord>, AttendanceError> {
        Ok(self.store.find_by_user_and_date(user_id, date).await?)
    }

    /// Full history, newest day first.
    pub async fn history(&self, user_id: i64) -> Result<Vec<AttendanceRecord>, AttendanceError> {
        Ok(self.store.all_by_user(user_id).await?)
    }

    fn require_inside_geofence(&self, fix: &LocationFix) -> Result<(), AttendanceError> {
        let distance_m = self.geofence.distance_to(fix.latitude, fix.longitude);
        if distance_m > self.geofence.radius_m {
            return Err(AttendanceError::OutsideGeofence { distance_m });
        }
        Ok(())
    }
}
