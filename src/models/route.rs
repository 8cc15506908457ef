//! Route and stop types.

use serde::{Deserialize, Serialize};

use super::clock::format_clock;
use super::Coordinate;

/// A single delivery visit within a route.
///
/// Times are minutes since midnight. `departure_time` is
/// `arrival_time + wait_time + service time`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    /// 1-based position in the route; the depot is implicitly 0.
    pub sequence: usize,
    /// Delivery being served.
    pub delivery_id: String,
    /// Delivery location.
    pub location: Coordinate,
    /// Street address, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Customer name, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Arrival before any wait for the window to open.
    pub arrival_time: f64,
    /// Minutes waited for the window to open.
    pub wait_time: f64,
    /// Departure after waiting and service.
    pub departure_time: f64,
    /// Kilometers from the depot along the route, this leg included.
    pub cumulative_distance: f64,
    /// Load delivered so far, this stop included.
    pub cumulative_load: f64,
    /// Compass hint for the leg into this stop.
    pub directions: String,
}

impl Stop {
    /// Time service begins (arrival plus any wait).
    pub fn service_start(&self) -> f64 {
        self.arrival_time + self.wait_time
    }

    /// Arrival as `"HH:MM"`.
    pub fn arrival_clock(&self) -> String {
        format_clock(self.arrival_time)
    }

    /// Departure as `"HH:MM"`.
    pub fn departure_clock(&self) -> String {
        format_clock(self.departure_time)
    }
}

/// An ordered sequence of stops assigned to one vehicle.
///
/// A route starts and ends at the depot (not stored in `stops`).
///
/// # Examples
///
/// ```
/// use u_dispatch::models::Route;
///
/// let route = Route::new("v1");
/// assert!(route.is_empty());
/// assert_eq!(route.vehicle_id(), "v1");
/// assert_eq!(route.utilization(), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    vehicle_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    vehicle_name: Option<String>,
    stops: Vec<Stop>,
    start_time: f64,
    end_time: f64,
    total_distance: f64,
    total_time: f64,
    total_load: f64,
    utilization: f64,
}

impl Route {
    /// Creates an empty route for the given vehicle.
    pub fn new(vehicle_id: impl Into<String>) -> Self {
        Self {
            vehicle_id: vehicle_id.into(),
            vehicle_name: None,
            stops: Vec::new(),
            start_time: 0.0,
            end_time: 0.0,
            total_distance: 0.0,
            total_time: 0.0,
            total_load: 0.0,
            utilization: 0.0,
        }
    }

    /// Sets the vehicle display name.
    pub fn with_vehicle_name(mut self, name: Option<String>) -> Self {
        self.vehicle_name = name;
        self
    }

    /// Appends a stop to the end of this route.
    pub fn push_stop(&mut self, stop: Stop) {
        self.total_load = stop.cumulative_load;
        self.stops.push(stop);
    }

    /// Vehicle assigned to this route.
    pub fn vehicle_id(&self) -> &str {
        &self.vehicle_id
    }

    /// Vehicle display name, if any.
    pub fn vehicle_name(&self) -> Option<&str> {
        self.vehicle_name.as_deref()
    }

    /// Stops in visit order.
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// Number of stops (excluding the depot).
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Returns `true` if the route has no stops.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Delivery ids in visit order.
    pub fn delivery_ids(&self) -> Vec<&str> {
        self.stops.iter().map(|s| s.delivery_id.as_str()).collect()
    }

    /// Departure from the depot, minutes since midnight.
    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    /// Return to the depot, minutes since midnight.
    pub fn end_time(&self) -> f64 {
        self.end_time
    }

    /// Round-trip kilometers, depot to depot.
    pub fn total_distance(&self) -> f64 {
        self.total_distance
    }

    /// Minutes from departure to return.
    pub fn total_time(&self) -> f64 {
        self.total_time
    }

    /// Load delivered on this route.
    pub fn total_load(&self) -> f64 {
        self.total_load
    }

    /// Fraction of capacity used; 0 when capacity is unbounded.
    pub fn utilization(&self) -> f64 {
        self.utilization
    }

    /// Sets departure and return times and derives `total_time`.
    pub fn set_schedule(&mut self, start: f64, end: f64) {
        self.start_time = start;
        self.end_time = end;
        self.total_time = end - start;
    }

    /// Sets the round-trip distance.
    pub fn set_total_distance(&mut self, d: f64) {
        self.total_distance = d;
    }

    /// Derives utilization from the current load and a capacity.
    pub fn set_capacity(&mut self, capacity: Option<f64>) {
        self.utilization = match capacity {
            Some(c) if c > 0.0 => self.total_load / c,
            _ => 0.0,
        };
    }
}
