//! Domain model types for delivery routing.
//!
//! Provides the core abstractions: deliveries with demands, time windows, and
//! priorities; vehicles with capacity, stop, and shift limits; routes as
//! ordered sequences of stops; and the request/result records exchanged at
//! the engine boundary.

mod clock;
mod delivery;
mod infeasibility;
mod location;
mod objective;
mod request;
mod result;
mod route;
mod vehicle;

pub use clock::{format_clock, minutes_of, parse_clock};
pub use delivery::{Delivery, TimeWindow, DEFAULT_DEMAND, DEFAULT_PRIORITY, DEFAULT_SERVICE_TIME};
pub use infeasibility::Infeasibility;
pub use location::{Coordinate, Depot};
pub use objective::Objective;
pub use request::OptimizationRequest;
pub use result::OptimizationResult;
pub use route::{Route, Stop};
pub use vehicle::{Vehicle, DEFAULT_SHIFT_END, DEFAULT_SHIFT_START};
