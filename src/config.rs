use crate::utils::geo::OfficeGeofence;
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub session_file: PathBuf,
    pub log_dir: String,

    // Office geofence
    pub office_latitude: f64,
    pub office_longitude: f64,
    pub office_radius_m: f64,

    // Location quality
    pub gps_accuracy_threshold_m: f64,
    pub location_timeout_secs: u64,

    pub min_password_length: usize,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://attendance.db?mode=rwc".to_string()),
            session_file: env::var("SESSION_FILE")
                .unwrap_or_else(|_| "session.json".to_string())
                .into(),
            log_dir: env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string()),

            office_latitude: env::var("OFFICE_LATITUDE")
                .unwrap_or_else(|_| "-1.9441".to_string()) // Kigali office default
                .parse()
                .unwrap(),
            office_longitude: env::var("OFFICE_LONGITUDE")
                .unwrap_or_else(|_| "30.0619".to_string())
                .parse()
                .unwrap(),
            office_radius_m: env::var("OFFICE_RADIUS_METERS")
                .unwrap_or_else(|_| "200".to_string())
                .parse()
                .unwrap(),

            gps_accuracy_threshold_m: env::var("GPS_ACCURACY_THRESHOLD")
                .unwrap_or_else(|_| "50".to_string())
                .parse()
                .unwrap(),
            location_timeout_secs: env::var("LOCATION_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap(),

            min_password_length: env::var("MIN_PASSWORD_LENGTH")
                .unwrap_or_else(|_| "8".to_string())
                .parse()
                .unwrap(),
        }
    }

    pub fn office_geofence(&self) -> OfficeGeofence {
        OfficeGeofence::new(
            self.office_latitude,
            self.office_longitude,
            self.office_radius_m,
        )
    }
}
