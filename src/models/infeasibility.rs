//! Reasons a delivery cannot be appended to a route.

use std::fmt;

use super::clock::format_clock;

/// Why the feasibility checker rejected a candidate stop.
///
/// Used for diagnostics only; control flow looks at whether a check passed,
/// not at which check failed.
#[derive(Debug, Clone, PartialEq)]
pub enum Infeasibility {
    /// The vehicle cannot carry the extra demand.
    CapacityExceeded {
        /// Load after taking the delivery.
        load: f64,
        /// Vehicle capacity.
        capacity: f64,
    },
    /// The route already has the maximum number of stops.
    StopLimitReached {
        /// Vehicle stop limit.
        max_stops: usize,
    },
    /// Arrival after the delivery's time window closes.
    TimeWindowClosed {
        /// Projected arrival.
        arrival: f64,
        /// Time window due.
        due: f64,
    },
    /// Serving the delivery would return the vehicle after its shift ends.
    ShiftExceeded {
        /// Projected return to the depot.
        return_at: f64,
        /// Vehicle shift end.
        shift_end: f64,
    },
}

impl fmt::Display for Infeasibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Infeasibility::CapacityExceeded { load, capacity } => {
                write!(f, "load {load} exceeds capacity {capacity}")
            }
            Infeasibility::StopLimitReached { max_stops } => {
                write!(f, "stop limit {max_stops} reached")
            }
            Infeasibility::TimeWindowClosed { arrival, due } => write!(
                f,
                "arrival {} after window close {}",
                format_clock(*arrival),
                format_clock(*due)
            ),
            Infeasibility::ShiftExceeded {
                return_at,
                shift_end,
            } => write!(
                f,
                "return {} after shift end {}",
                format_clock(*return_at),
                format_clock(*shift_end)
            ),
        }
    }
}
