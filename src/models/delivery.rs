//! Deliveries and time windows.

use serde::{Deserialize, Serialize};

use super::clock::{format_clock, parse_clock};
use super::Coordinate;
use crate::error::ValidationError;

/// Demand assumed when a delivery does not state one.
pub const DEFAULT_DEMAND: f64 = 1.0;

/// Minutes spent at a stop when a delivery does not state a service time.
pub const DEFAULT_SERVICE_TIME: f64 = 5.0;

/// Priority assumed when a delivery does not state one (least urgent of 1..=3).
pub const DEFAULT_PRIORITY: u32 = 3;

/// A delivery time window, in minutes since midnight.
///
/// The vehicle must arrive no later than `due` and may arrive as early as it
/// likes: an early arrival waits until `ready`.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::TimeWindow;
///
/// let tw = TimeWindow::parse("09:00", "09:15").unwrap();
/// assert_eq!(tw.ready(), 540.0);
/// assert_eq!(tw.waiting_time(530.0), 10.0);
/// assert!(tw.is_violated(556.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTimeWindow", into = "RawTimeWindow")]
pub struct TimeWindow {
    ready: f64,
    due: f64,
}

impl TimeWindow {
    /// Creates a new time window.
    ///
    /// Returns `None` if `ready > due` or either value is non-finite.
    pub fn new(ready: f64, due: f64) -> Option<Self> {
        if !ready.is_finite() || !due.is_finite() || ready > due {
            return None;
        }
        Some(Self { ready, due })
    }

    /// Parses a window from two clock strings.
    pub fn parse(start: &str, end: &str) -> Result<Self, ValidationError> {
        let ready = parse_clock(start)?;
        let due = parse_clock(end)?;
        Self::new(ready, due).ok_or_else(|| ValidationError::InvertedTimeWindow {
            start: start.to_string(),
            end: end.to_string(),
        })
    }

    /// Earliest service start.
    pub fn ready(&self) -> f64 {
        self.ready
    }

    /// Latest allowable arrival.
    pub fn due(&self) -> f64 {
        self.due
    }

    /// Returns `true` if the given time falls within this window.
    pub fn contains(&self, time: f64) -> bool {
        time >= self.ready && time <= self.due
    }

    /// Minutes spent waiting when arriving at `arrival`.
    pub fn waiting_time(&self, arrival: f64) -> f64 {
        if arrival < self.ready {
            self.ready - arrival
        } else {
            0.0
        }
    }

    /// Returns `true` if arriving at the given time misses this window.
    pub fn is_violated(&self, arrival: f64) -> bool {
        arrival > self.due
    }
}

#[derive(Serialize, Deserialize)]
struct RawTimeWindow {
    start: String,
    end: String,
}

impl TryFrom<RawTimeWindow> for TimeWindow {
    type Error = ValidationError;

    fn try_from(raw: RawTimeWindow) -> Result<Self, Self::Error> {
        Self::parse(&raw.start, &raw.end)
    }
}

impl From<TimeWindow> for RawTimeWindow {
    fn from(tw: TimeWindow) -> Self {
        Self {
            start: format_clock(tw.ready),
            end: format_clock(tw.due),
        }
    }
}

/// A stop to be delivered.
///
/// Deliveries are immutable input to a run. Ids must be unique within a
/// request; priority is lower-is-more-urgent.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::{Coordinate, Delivery};
///
/// let d = Delivery::new("d1", Coordinate::new(37.78, -122.41)).with_demand(10.0);
/// assert_eq!(d.id(), "d1");
/// assert_eq!(d.demand(), 10.0);
/// assert_eq!(d.service_time(), 5.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delivery {
    id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(flatten)]
    location: Coordinate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    address: Option<String>,
    #[serde(default = "default_demand")]
    demand: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    time_window: Option<TimeWindow>,
    #[serde(default = "default_service_time")]
    service_time: f64,
    #[serde(default = "default_priority")]
    priority: u32,
}

fn default_demand() -> f64 {
    DEFAULT_DEMAND
}

fn default_service_time() -> f64 {
    DEFAULT_SERVICE_TIME
}

fn default_priority() -> u32 {
    DEFAULT_PRIORITY
}

impl Delivery {
    /// Creates a delivery with default demand, service time, and priority.
    pub fn new(id: impl Into<String>, location: Coordinate) -> Self {
        Self {
            id: id.into(),
            name: None,
            location,
            address: None,
            demand: DEFAULT_DEMAND,
            time_window: None,
            service_time: DEFAULT_SERVICE_TIME,
            priority: DEFAULT_PRIORITY,
        }
    }

    /// Sets the customer name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the street address.
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Sets the demand (load units).
    pub fn with_demand(mut self, demand: f64) -> Self {
        self.demand = demand;
        self
    }

    /// Sets a time window.
    pub fn with_time_window(mut self, tw: TimeWindow) -> Self {
        self.time_window = Some(tw);
        self
    }

    /// Sets the service time in minutes.
    pub fn with_service_time(mut self, minutes: f64) -> Self {
        self.service_time = minutes;
        self
    }

    /// Sets the priority (lower is more urgent).
    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self
    }

    /// Delivery id, unique within a request.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Customer name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Delivery location.
    pub fn location(&self) -> Coordinate {
        self.location
    }

    /// Street address, if any.
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    /// Load units delivered at this stop.
    pub fn demand(&self) -> f64 {
        self.demand
    }

    /// Time window constraint, if any.
    pub fn time_window(&self) -> Option<&TimeWindow> {
        self.time_window.as_ref()
    }

    /// Minutes spent at the stop.
    pub fn service_time(&self) -> f64 {
        self.service_time
    }

    /// Priority, lower is more urgent.
    pub fn priority(&self) -> u32 {
        self.priority
    }

    /// Checks the fields the engine relies on.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.demand.is_finite() || self.demand < 0.0 {
            return Err(ValidationError::InvalidDemand {
                id: self.id.clone(),
                demand: self.demand,
            });
        }
        if !self.service_time.is_finite() || self.service_time < 0.0 {
            return Err(ValidationError::InvalidServiceTime {
                id: self.id.clone(),
                service_time: self.service_time,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_window_valid() {
        let tw = TimeWindow::new(10.0, 20.0).expect("valid");
        assert_eq!(tw.ready(), 10.0);
        assert_eq!(tw.due(), 20.0);
    }

    #[test]
    fn test_time_window_invalid() {
        assert!(TimeWindow::new(20.0, 10.0).is_none());
        assert!(TimeWindow::new(f64::NAN, 10.0).is_none());
        assert!(TimeWindow::new(10.0, f64::INFINITY).is_none());
    }

    #[test]
    fn test_time_window_parse_inverted() {
        assert!(matches!(
            TimeWindow::parse("10:00", "09:00"),
            Err(ValidationError::InvertedTimeWindow { .. })
        ));
    }

    #[test]
    fn test_time_window_contains() {
        let tw = TimeWindow::new(10.0, 20.0).expect("valid");
        assert!(tw.contains(10.0));
        assert!(tw.contains(20.0));
        assert!(!tw.contains(9.9));
        assert!(!tw.contains(20.1));
    }

    #[test]
    fn test_time_window_waiting() {
        let tw = TimeWindow::new(10.0, 20.0).expect("valid");
        assert!((tw.waiting_time(5.0) - 5.0).abs() < 1e-10);
        assert!(tw.waiting_time(15.0).abs() < 1e-10);
    }

    #[test]
    fn test_time_window_json() {
        let tw: TimeWindow =
            serde_json::from_str(r#"{"start": "09:00", "end": "9:15"}"#).expect("valid");
        assert_eq!(tw, TimeWindow::new(540.0, 555.0).expect("valid"));
        let text = serde_json::to_string(&tw).expect("serializes");
        assert_eq!(text, r#"{"start":"09:00","end":"09:15"}"#);
        let inverted = r#"{"start": "10:00", "end": "09:00"}"#;
        assert!(serde_json::from_str::<TimeWindow>(inverted).is_err());
    }

    #[test]
    fn test_delivery_defaults_from_json() {
        let d: Delivery =
            serde_json::from_str(r#"{"id": "d1", "latitude": 1.0, "longitude": 2.0}"#)
                .expect("valid");
        assert_eq!(d.demand(), DEFAULT_DEMAND);
        assert_eq!(d.service_time(), DEFAULT_SERVICE_TIME);
        assert_eq!(d.priority(), DEFAULT_PRIORITY);
        assert!(d.time_window().is_none());
    }

    #[test]
    fn test_delivery_validate() {
        let loc = Coordinate::new(0.0, 0.0);
        assert!(Delivery::new("ok", loc).validate().is_ok());
        assert!(matches!(
            Delivery::new("neg", loc).with_demand(-1.0).validate(),
            Err(ValidationError::InvalidDemand { .. })
        ));
        assert!(matches!(
            Delivery::new("svc", loc).with_service_time(f64::NAN).validate(),
            Err(ValidationError::InvalidServiceTime { .. })
        ));
    }
}
