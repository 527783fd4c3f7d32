//! Device location, behind a trait so the core never touches platform GPS
//! APIs directly.

use async_trait::async_trait;
use futures::stream::BoxStream;
use serde::{Deserialize, Serialize};

/// One GPS sample. Accuracy is the radius of the 68% confidence circle in
/// meters when the platform reports one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationFix {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy_m: Option<f64>,
}

impl LocationFix {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            accuracy_m: None,
        }
    }

    pub fn with_accuracy(latitude: f64, longitude: f64, accuracy_m: f64) -> Self {
        Self {
            latitude,
            longitude,
            accuracy_m: Some(accuracy_m),
        }
    }
}

#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Whether the user has granted location permission.
    fn permission_granted(&self) -> bool;

    /// Most recent fix, if the device has one.
    async fn last_known(&self) -> Option<LocationFix>;

    /// Continuous location samples. Lazy and restartable; dropping the
    /// stream cancels the underlying subscription.
    fn watch(&self) -> BoxStream<'static, LocationFix>;
}

/// Fixed-position provider for tests and demos.
#[derive(Debug, Clone)]
pub struct SimulatedLocationProvider {
    fix: Option<LocationFix>,
    permission: bool,
}

impl SimulatedLocationProvider {
    pub fn at(fix: LocationFix) -> Self {
        Self {
            fix: Some(fix),
            permission: true,
        }
    }

    /// Permission granted, but no fix available (GPS off, cold start).
    pub fn no_fix() -> Self {
        Self {
            fix: None,
            permission: true,
        }
    }

    pub fn permission_denied() -> Self {
        Self {
            fix: None,
            permission: false,
        }
    }
}

#[async_trait]
impl LocationProvider for SimulatedLocationProvider {
    fn permission_granted(&self) -> bool {
        self.permission
    }

    async fn last_known(&self) -> Option<LocationFix> {
        self.fix
    }

    fn watch(&self) -> BoxStream<'static, LocationFix> {
        match self.fix {
            Some(fix) => Box::pin(futures::stream::repeat(fix)),
            None => Box::pin(futures::stream::empty()),
        }
    }
}
