use super::{AttendanceStore, StoreError, classify};
use crate::model::AttendanceRecord;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct SqliteAttendanceStore {
    pool: SqlitePool,
}

impl SqliteAttendanceStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttendanceStore for SqliteAttendanceStore {
    async fn insert(&self, record: &AttendanceRecord) -> Result<i64, StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO attendance
                (user_id, date, check_in_time, check_out_time,
                 check_in_latitude, check_in_longitude, check_out_latitude, check_out_longitude)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(record.user_id)
        .bind(record.date)
        .bind(record.check_in_time)
        .bind(record.check_out_time)
        .bind(record.check_in_latitude)
        .bind(record.check_in_longitude)
        .bind(record.check_out_latitude)
        .bind(record.check_out_longitude)
        .execute(&self.pool)
        .await
        .map_err(classify)?;

        Ok(result.last_insert_rowid())
    }

    async fn update(&self, record: &AttendanceRecord) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            UPDATE attendance
            SET check_in_time = ?, check_out_time = ?,
                check_in_latitude = ?, check_in_longitude = ?,
                check_out_latitude = ?, check_out_longitude = ?
            WHERE id = ?
            "#,
        )
        .bind(record.check_in_time)
        .bind(record.check_out_time)
        .bind(record.check_in_latitude)
        .bind(record.check_in_longitude)
        .bind(record.check_out_latitude)
        .bind(record.check_out_longitude)
        .bind(record.id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_by_user_and_date(
        &self,
        user_id: i64,
        date: NaiveDate,
    ) -> Result<Option<AttendanceRecord>, StoreError> {
        let record = sqlx::query_as::<_, AttendanceRecord>(
            "SELECT * FROM attendance WHERE user_id = ? AND date = ? LIMIT 1",
        )
        .bind(user_id)
        .bind(date)
        .fetch_optional(&self.pool)
        .await?;
        Ok(record)
    }

    async fn has_checked_in(&self, user_id: i64, date: NaiveDate) -> Result<bool, StoreError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM attendance WHERE user_id = ? AND date = ? AND check_in_time IS NOT NULL)",
        )
        .bind(user_id)
        .bind(date)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn has_checked_out(&self, user_id: i64, date: NaiveDate) -> Result<bool, StoreError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM attendance WHERE user_id = ? AND date = ? AND check_out_time IS NOT NULL)",
        )
        .bind(user_id)
        .bind(date)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn all_by_user(&self, user_id: i64) -> Result<Vec<AttendanceRecord>, StoreError> {
        let records = sqlx::query_as::<_, AttendanceRecord>(
            "SELECT * FROM attendance WHERE user_id = ? ORDER BY date DESC, check_in_time DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(records)
    }
}
