use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One user's attendance for one calendar day. At most one row exists per
/// (user_id, date); the engine creates it on check-in and completes it on
/// check-out.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AttendanceRecord {
    pub id: i64,
    pub user_id: i64,
    pub date: NaiveDate,
    pub check_in_time: Option<DateTime<Utc>>,
    pub check_out_time: Option<DateTime<Utc>>,
    pub check_in_latitude: Option<f64>,
    pub check_in_longitude: Option<f64>,
    pub check_out_latitude: Option<f64>,
    pub check_out_longitude: Option<f64>,
}

/// Where a day's record sits in its one-way lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayStatus {
    Unstarted,
    CheckedIn,
    CheckedOut,
}

impl AttendanceRecord {
    pub fn status(&self) -> DayStatus {
        match (self.check_in_time, self.check_out_time) {
            (None, _) => DayStatus::Unstarted,
            (Some(_), None) => DayStatus::CheckedIn,
            (Some(_), Some(_)) => DayStatus::CheckedOut,
        }
    }
}
