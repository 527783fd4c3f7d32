//! Persistence collaborators. Dumb stores: lookup, insert, update — every
//! business rule lives in the engine and services above.

pub mod attendance;
pub mod user;

pub use attendance::SqliteAttendanceStore;
pub use user::SqliteUserStore;

use crate::model::{AttendanceRecord, NewUser, User};
use async_trait::async_trait;
use chrono::NaiveDate;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Unique-constraint violation (duplicate email, duplicate day record).
    #[error("duplicate record")]
    Duplicate,

    #[error(transparent)]
    Db(#[from] sqlx::Error),
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert(&self, user: &NewUser) -> Result<i64, StoreError>;
    async fn find_by_id(&self, user_id: i64) -> Result<Option<User>, StoreError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
    async fn email_exists(&self, email: &str) -> Result<bool, StoreError>;
    async fn set_biometric_registered(
        &self,
        user_id: i64,
        registered: bool,
    ) -> Result<(), StoreError>;
    /// Administrative purge: removes the user and all their attendance.
    async fn delete(&self, user_id: i64) -> Result<(), StoreError>;
}

#[async_trait]
pub trait AttendanceStore: Send + Sync {
    async fn insert(&self, record: &AttendanceRecord) -> Result<i64, StoreError>;
    async fn update(&self, record: &AttendanceRecord) -> Result<(), StoreError>;
    async fn find_by_user_and_date(
        &self,
        user_id: i64,
        date: NaiveDate,
    ) -> Result<Option<AttendanceRecord>, StoreError>;
    async fn has_checked_in(&self, user_id: i64, date: NaiveDate) -> Result<bool, StoreError>;
    async fn has_checked_out(&self, user_id: i64, date: NaiveDate) -> Result<bool, StoreError>;
    /// Full history for a user, newest day first.
    async fn all_by_user(&self, user_id: i64) -> Result<Vec<AttendanceRecord>, StoreError>;
}

/// Maps unique-constraint failures to [`StoreError::Duplicate`].
pub(crate) fn classify(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return StoreError::Duplicate;
        }
    }
    StoreError::Db(err)
}
