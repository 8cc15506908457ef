//! Route feasibility and forward simulation.
//!
//! - [`FeasibilityChecker`] decides whether one more delivery fits a route in
//!   progress (capacity, stop limit, time window, vehicle shift).
//! - [`RouteSimulator`] replays a finished sequence into [`Stop`](crate::models::Stop)
//!   records with arrival, wait, departure, and cumulative distance and load.

mod feasibility;
mod simulator;

pub use feasibility::{FeasibilityChecker, Projection, RouteState};
pub use simulator::RouteSimulator;
