mod common;

use biometric_attendance::biometric::{BiometricOutcome, ScriptedBiometric};
use biometric_attendance::error::AttendanceError;
use biometric_attendance::location::{LocationFix, LocationProvider, SimulatedLocationProvider};
use biometric_attendance::model::DayStatus;
use biometric_attendance::repo::{SqliteUserStore, UserStore};
use biometric_attendance::session::{MemorySession, SessionStore};
use biometric_attendance::workflow::AttendanceWorkflow;
use common::*;
use sqlx::SqlitePool;
use std::sync::Arc;
use std::time::Duration;

fn workflow(
    pool: &SqlitePool,
    session: Arc<MemorySession>,
    biometric: ScriptedBiometric,
    location: Arc<dyn LocationProvider>,
) -> AttendanceWorkflow {
    AttendanceWorkflow::new(
        engine(pool),
        Arc::new(SqliteUserStore::new(pool.clone())),
        session,
        Arc::new(biometric),
        location,
        Duration::from_secs(5),
    )
}

fn office_fix() -> LocationFix {
    LocationFix::with_accuracy(OFFICE_LAT, OFFICE_LON, 10.0)
}

#[tokio::test]
async fn check_in_requires_a_session() {
    let pool = test_pool().await;
    let wf = workflow(
        &pool,
        Arc::new(MemorySession::new()),
        ScriptedBiometric::always(BiometricOutcome::Success),
        Arc::new(SimulatedLocationProvider::at(office_fix())),
    );

    let err = wf.check_in().await.unwrap_err();
    assert!(matches!(err, AttendanceError::UserNotFound));
}

#[tokio::test]
async fn check_in_requires_biometric_registration() {
    let pool = test_pool().await;
    let user = seed_user(&pool, "ada@example.com").await;

    let session = Arc::new(MemorySession::new());
    session.save(user.id, &user.email).unwrap();

    let wf = workflow(
        &pool,
        session,
        ScriptedBiometric::always(BiometricOutcome::Success),
        Arc::new(SimulatedLocationProvider::at(office_fix())),
    );

    let err = wf.check_in().await.unwrap_err();
    assert!(matches!(err, AttendanceError::BiometricNotRegistered));
    assert!(wf.today_attendance().await.unwrap().is_none());
}

#[tokio::test]
async fn register_biometric_flips_the_user_flag() {
    let pool = test_pool().await;
    let user = seed_user(&pool, "ada@example.com").await;

    let session = Arc::new(MemorySession::new());
    session.save(user.id, &user.email).unwrap();

    let wf = workflow(
        &pool,
        session,
        ScriptedBiometric::always(BiometricOutcome::Success),
        Arc::new(SimulatedLocationProvider::at(office_fix())),
    );

    assert!(!user.biometric_registered);
    wf.register_biometric().await.expect("enrollment confirmed");

    let reloaded = wf.current_user().await.unwrap().unwrap();
    assert!(reloaded.biometric_registered);
}

#[tokio::test]
async fn cancelled_registration_leaves_flag_unset() {
    let pool = test_pool().await;
    let user = seed_user(&pool, "ada@example.com").await;

    let session = Arc::new(MemorySession::new());
    session.save(user.id, &user.email).unwrap();

    let wf = workflow(
        &pool,
        session,
        ScriptedBiometric::always(BiometricOutcome::Cancelled),
        Arc::new(SimulatedLocationProvider::at(office_fix())),
    );

    let err = wf.register_biometric().await.unwrap_err();
    assert!(matches!(err, AttendanceError::AuthenticationCancelled));
    assert!(!wf.current_user().await.unwrap().unwrap().biometric_registered);
}

#[tokio::test]
async fn full_day_through_the_workflow() {
    let pool = test_pool().await;
    let user = seed_registered_user(&pool, "ada@example.com").await;

    let session = Arc::new(MemorySession::new());
    session.save(user.id, &user.email).unwrap();

    let wf = workflow(
        &pool,
        session,
        ScriptedBiometric::always(BiometricOutcome::Success),
        Arc::new(SimulatedLocationProvider::at(office_fix())),
    );

    let check_in = wf.check_in().await.expect("check-in succeeds");
    assert_eq!(check_in.record.user_id, user.id);

    let err = wf.check_in().await.unwrap_err();
    assert!(matches!(err, AttendanceError::AlreadyCheckedIn));

    let check_out = wf.check_out().await.expect("check-out succeeds");
    assert!(check_out.duration.num_seconds() >= 0);
    assert!(check_out.record.check_out_time >= check_out.record.check_in_time);
    assert_eq!(check_out.record.status(), DayStatus::CheckedOut);

    let history = wf.history().await.unwrap();
    assert_eq!(history.len(), 1);
}

#[tokio::test]
async fn cancelled_prompt_blocks_check_in_without_mutation() {
    let pool = test_pool().await;
    let user = seed_registered_user(&pool, "ada@example.com").await;

    let session = Arc::new(MemorySession::new());
    session.save(user.id, &user.email).unwrap();

    let wf = workflow(
        &pool,
        session,
        ScriptedBiometric::always(BiometricOutcome::Cancelled),
        Arc::new(SimulatedLocationProvider::at(office_fix())),
    );

    let err = wf.check_in().await.unwrap_err();
    assert!(matches!(err, AttendanceError::AuthenticationCancelled));
    assert!(wf.today_attendance().await.unwrap().is_none());
}

#[tokio::test]
async fn biometric_hardware_problems_are_not_cancellation() {
    let pool = test_pool().await;
    let user = seed_registered_user(&pool, "ada@example.com").await;

    let session = Arc::new(MemorySession::new());
    session.save(user.id, &user.email).unwrap();

    let wf = workflow(
        &pool,
        session,
        ScriptedBiometric::always(BiometricOutcome::Unavailable {
            reason: "No biometric hardware available on this device".to_string(),
        }),
        Arc::new(SimulatedLocationProvider::at(office_fix())),
    );

    match wf.check_in().await.unwrap_err() {
        AttendanceError::BiometricUnavailable(reason) => {
            assert!(reason.contains("hardware"));
        }
        other => panic!("expected BiometricUnavailable, got {other:?}"),
    }
}

#[tokio::test]
async fn rejected_scan_surfaces_the_reason() {
    let pool = test_pool().await;
    let user = seed_registered_user(&pool, "ada@example.com").await;

    let session = Arc::new(MemorySession::new());
    session.save(user.id, &user.email).unwrap();

    let wf = workflow(
        &pool,
        session,
        ScriptedBiometric::always(BiometricOutcome::Failed {
            reason: "Biometric not recognized".to_string(),
        }),
        Arc::new(SimulatedLocationProvider::at(office_fix())),
    );

    let err = wf.check_in().await.unwrap_err();
    assert!(matches!(err, AttendanceError::AuthenticationFailed(_)));
}

#[tokio::test]
async fn denied_location_permission_reads_as_unavailable() {
    let pool = test_pool().await;
    let user = seed_registered_user(&pool, "ada@example.com").await;

    let session = Arc::new(MemorySession::new());
    session.save(user.id, &user.email).unwrap();

    let wf = workflow(
        &pool,
        session,
        ScriptedBiometric::always(BiometricOutcome::Success),
        Arc::new(SimulatedLocationProvider::permission_denied()),
    );

    let err = wf.check_in().await.unwrap_err();
    assert!(matches!(err, AttendanceError::LocationUnavailable));
}

#[tokio::test]
async fn missing_fix_reads_as_unavailable() {
    let pool = test_pool().await;
    let user = seed_registered_user(&pool, "ada@example.com").await;

    let session = Arc::new(MemorySession::new());
    session.save(user.id, &user.email).unwrap();

    let wf = workflow(
        &pool,
        session,
        ScriptedBiometric::always(BiometricOutcome::Success),
        Arc::new(SimulatedLocationProvider::no_fix()),
    );

    let err = wf.check_in().await.unwrap_err();
    assert!(matches!(err, AttendanceError::LocationUnavailable));
}

#[tokio::test]
async fn sign_out_clears_the_session() {
    let pool = test_pool().await;
    let user = seed_registered_user(&pool, "ada@example.com").await;

    let session = Arc::new(MemorySession::new());
    session.save(user.id, &user.email).unwrap();

    let wf = workflow(
        &pool,
        session.clone(),
        ScriptedBiometric::always(BiometricOutcome::Success),
        Arc::new(SimulatedLocationProvider::at(office_fix())),
    );

    assert!(wf.current_user().await.unwrap().is_some());
    wf.sign_out().unwrap();
    assert!(!session.is_logged_in().unwrap());
    assert!(wf.current_user().await.unwrap().is_none());
}

#[tokio::test]
async fn stale_session_user_reads_as_not_found() {
    let pool = test_pool().await;
    let user = seed_registered_user(&pool, "ada@example.com").await;

    let session = Arc::new(MemorySession::new());
    session.save(user.id, &user.email).unwrap();

    // user purged behind the session's back
    SqliteUserStore::new(pool.clone())
        .delete(user.id)
        .await
        .unwrap();

    let wf = workflow(
        &pool,
        session,
        ScriptedBiometric::always(BiometricOutcome::Success),
        Arc::new(SimulatedLocationProvider::at(office_fix())),
    );

    let err = wf.check_in().await.unwrap_err();
    assert!(matches!(err, AttendanceError::UserNotFound));
}
