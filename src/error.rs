//! Errors raised at the engine boundary.

use thiserror::Error;

/// A request the engine refuses to run on.
///
/// Raised before the route builder starts; a delivery that merely cannot be
/// placed is never a validation error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// The request has no deliveries.
    #[error("at least one delivery is required")]
    NoDeliveries,
    /// The request has no vehicles.
    #[error("at least one vehicle is required")]
    NoVehicles,
    /// Two deliveries share an id.
    #[error("duplicate delivery id `{0}`")]
    DuplicateDelivery(String),
    /// Demand is negative or not a number.
    #[error("delivery `{id}` has invalid demand {demand}")]
    InvalidDemand {
        /// Delivery id.
        id: String,
        /// Offending demand.
        demand: f64,
    },
    /// Service time is negative or not a number.
    #[error("delivery `{id}` has invalid service time {service_time}")]
    InvalidServiceTime {
        /// Delivery id.
        id: String,
        /// Offending service time.
        service_time: f64,
    },
    /// Capacity is zero or negative.
    #[error("vehicle `{id}` has non-positive capacity {capacity}")]
    NonPositiveCapacity {
        /// Vehicle id.
        id: String,
        /// Offending capacity.
        capacity: f64,
    },
    /// Stop limit of zero.
    #[error("vehicle `{id}` allows no stops")]
    ZeroMaxStops {
        /// Vehicle id.
        id: String,
    },
    /// Shift ends before it starts.
    #[error("vehicle `{id}` shift ends at {end} before it starts at {start}")]
    InvertedShift {
        /// Vehicle id.
        id: String,
        /// Shift start as `HH:MM`.
        start: String,
        /// Shift end as `HH:MM`.
        end: String,
    },
    /// Speed factor is zero, negative, or not finite.
    #[error("vehicle `{id}` has non-positive speed factor {speed_factor}")]
    NonPositiveSpeed {
        /// Vehicle id.
        id: String,
        /// Offending factor.
        speed_factor: f64,
    },
    /// Engine base speed is zero, negative, or not finite.
    #[error("base speed must be a positive number of km/h, got {speed}")]
    NonPositiveBaseSpeed {
        /// Offending speed.
        speed: f64,
    },
    /// A clock time could not be parsed.
    #[error("invalid clock time `{0}`")]
    InvalidClockTime(String),
    /// A time window closes before it opens.
    #[error("time window closes at {end} before it opens at {start}")]
    InvertedTimeWindow {
        /// Window start as given.
        start: String,
        /// Window end as given.
        end: String,
    },
    /// Objective name not recognized.
    #[error("unknown objective `{0}`")]
    UnknownObjective(String),
}

/// Errors returned by [`RouteEngine`](crate::engine::RouteEngine).
#[derive(Debug, Error)]
pub enum EngineError {
    /// The request failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// A JSON payload could not be read or written.
    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            ValidationError::DuplicateDelivery("d1".to_string()).to_string(),
            "duplicate delivery id `d1`"
        );
        let err = EngineError::from(ValidationError::NoVehicles);
        assert_eq!(err.to_string(), "at least one vehicle is required");
    }
}
