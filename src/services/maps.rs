//! External mapping comparison.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Delivery, Depot};

/// Where the single-vehicle comparison figures came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapsStatus {
    /// No external credential configured; figures are the engine's estimate.
    NoKey,
    /// A credential exists but the service gave nothing usable; estimated.
    Estimated,
    /// The service answered for part of the route only.
    Limited,
    /// The service answered for the whole route.
    Actual,
}

/// Single-driver figures returned by a mapping service.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapsComparison {
    /// Kilometers.
    pub total_distance: f64,
    /// Minutes.
    pub total_time: f64,
    /// `false` when the service covered only some of the stops.
    pub complete: bool,
}

/// Failures from a [`MapsComparisonProvider`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapsError {
    /// The service could not be reached.
    #[error("maps service unavailable: {0}")]
    Unavailable(String),
    /// The service refused the request.
    #[error("maps service rejected the request: {0}")]
    Rejected(String),
    /// The caller gave up waiting.
    #[error("maps service timed out")]
    Timeout,
}

/// Fetches a "one driver with a generic map app" baseline.
///
/// Implementations do their own I/O, timeouts, and retries. The engine only
/// reads the outcome; a failure downgrades the reported status and never
/// fails the optimization.
pub trait MapsComparisonProvider: Send + Sync {
    /// Returns single-vehicle totals for visiting every delivery.
    fn fetch(&self, depot: &Depot, deliveries: &[Delivery]) -> Result<MapsComparison, MapsError>;
}
