#![allow(dead_code)]

use biometric_attendance::auth::password::{generate_salt, hash_password};
use biometric_attendance::db::init_db;
use biometric_attendance::engine::AttendanceEngine;
use biometric_attendance::model::{NewUser, User};
use biometric_attendance::repo::{SqliteAttendanceStore, SqliteUserStore, UserStore};
use biometric_attendance::utils::geo::OfficeGeofence;
use chrono::Utc;
use sqlx::SqlitePool;
use std::sync::Arc;

pub const OFFICE_LAT: f64 = -1.9441;
pub const OFFICE_LON: f64 = 30.0619;
pub const OFFICE_RADIUS_M: f64 = 200.0;
pub const ACCURACY_THRESHOLD_M: f64 = 50.0;

/// ~1 degree of latitude in meters on the 6,371 km sphere.
pub const DEG_LAT_M: f64 = 111_194.93;

pub async fn test_pool() -> SqlitePool {
    init_db("sqlite::memory:").await.expect("in-memory db")
}

pub fn office_geofence() -> OfficeGeofence {
    OfficeGeofence::new(OFFICE_LAT, OFFICE_LON, OFFICE_RADIUS_M)
}

pub fn engine(pool: &SqlitePool) -> AttendanceEngine {
    AttendanceEngine::new(
        Arc::new(SqliteAttendanceStore::new(pool.clone())),
        office_geofence(),
        ACCURACY_THRESHOLD_M,
    )
}

/// Latitude `meters` north of the office center.
pub fn lat_north_of_office(meters: f64) -> f64 {
    OFFICE_LAT + meters / DEG_LAT_M
}

pub async fn seed_user(pool: &SqlitePool, email: &str) -> User {
    let users = SqliteUserStore::new(pool.clone());
    let salt = generate_salt();
    let user_id = users
        .insert(&NewUser {
            name: "Test User".to_string(),
            email: email.to_string(),
            password_hash: hash_password("Passw0rd", &salt),
            password_salt: salt,
            created_at: Utc::now(),
        })
        .await
        .expect("seed user");
    users
        .find_by_id(user_id)
        .await
        .expect("load seeded user")
        .expect("seeded user exists")
}

pub async fn seed_registered_user(pool: &SqlitePool, email: &str) -> User {
    let user = seed_user(pool, email).await;
    let users = SqliteUserStore::new(pool.clone());
    users
        .set_biometric_registered(user.id, true)
        .await
        .expect("register biometric");
    users
        .find_by_id(user.id)
        .await
        .expect("reload user")
        .expect("user exists")
}
