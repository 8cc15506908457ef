//! Distance and travel time model.
//!
//! Great-circle distances in kilometers, travel times in minutes, a dense
//! per-run distance matrix, and compass hints for display.

mod directions;
mod haversine;
mod matrix;

pub use directions::compass_directions;
pub use haversine::{haversine, travel_time, DEFAULT_BASE_SPEED_KMH, EARTH_RADIUS_KM, MILES_PER_KM};
pub use matrix::{DistanceMatrix, DEPOT};
