//! Core of a biometric attendance app: sign-up/sign-in with salted-digest
//! credentials, device-biometric gating, and a geofenced daily
//! check-in/check-out state machine over SQLite. Platform concerns (UI,
//! biometric prompt, GPS) stay behind traits.

pub mod auth;
pub mod biometric;
pub mod config;
pub mod db;
pub mod engine;
pub mod error;
pub mod location;
pub mod logging;
pub mod model;
pub mod repo;
pub mod session;
pub mod utils;
pub mod workflow;

pub use auth::AuthService;
pub use config::Config;
pub use engine::{AttendanceEngine, CheckInSuccess, CheckOutSuccess};
pub use error::{AttendanceError, AuthError};
pub use workflow::AttendanceWorkflow;
