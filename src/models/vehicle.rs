//! Vehicle type with capacity, stop, and shift limits.

use serde::{Deserialize, Serialize};

use super::clock::{format_clock, hhmm};
use crate::error::ValidationError;

/// Default shift start (08:00), minutes since midnight.
pub const DEFAULT_SHIFT_START: f64 = 480.0;

/// Default shift end (18:00), minutes since midnight.
pub const DEFAULT_SHIFT_END: f64 = 1080.0;

/// A vehicle available for one run.
///
/// Capacity and stop limits are optional; a vehicle without a capacity
/// carries any load. The speed factor scales the base travel speed.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::Vehicle;
///
/// let v = Vehicle::new("v1").with_capacity(100.0).with_max_stops(12);
/// assert_eq!(v.id(), "v1");
/// assert_eq!(v.capacity(), Some(100.0));
/// assert_eq!(v.start_time(), 480.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    capacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_stops: Option<usize>,
    #[serde(with = "hhmm", default = "default_shift_start")]
    start_time: f64,
    #[serde(with = "hhmm", default = "default_shift_end")]
    end_time: f64,
    #[serde(default = "default_speed_factor")]
    speed_factor: f64,
}

fn default_shift_start() -> f64 {
    DEFAULT_SHIFT_START
}

fn default_shift_end() -> f64 {
    DEFAULT_SHIFT_END
}

fn default_speed_factor() -> f64 {
    1.0
}

impl Vehicle {
    /// Creates an unbounded vehicle working 08:00–18:00 at normal speed.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            capacity: None,
            max_stops: None,
            start_time: DEFAULT_SHIFT_START,
            end_time: DEFAULT_SHIFT_END,
            speed_factor: 1.0,
        }
    }

    /// Builds a homogeneous fleet `vehicle_1..=vehicle_n` named "Vehicle N".
    ///
    /// ```
    /// use u_dispatch::models::Vehicle;
    ///
    /// let fleet = Vehicle::fleet(3, 100.0);
    /// assert_eq!(fleet.len(), 3);
    /// assert_eq!(fleet[2].id(), "vehicle_3");
    /// assert_eq!(fleet[2].name(), Some("Vehicle 3"));
    /// ```
    pub fn fleet(count: usize, capacity: f64) -> Vec<Self> {
        (1..=count)
            .map(|n| {
                Self::new(format!("vehicle_{n}"))
                    .with_name(format!("Vehicle {n}"))
                    .with_capacity(capacity)
            })
            .collect()
    }

    /// Sets a display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the load capacity.
    pub fn with_capacity(mut self, capacity: f64) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Sets the maximum number of stops.
    pub fn with_max_stops(mut self, max_stops: usize) -> Self {
        self.max_stops = Some(max_stops);
        self
    }

    /// Sets the operating window in minutes since midnight.
    pub fn with_shift(mut self, start: f64, end: f64) -> Self {
        self.start_time = start;
        self.end_time = end;
        self
    }

    /// Sets the speed multiplier.
    pub fn with_speed_factor(mut self, factor: f64) -> Self {
        self.speed_factor = factor;
        self
    }

    /// Vehicle ID.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Load capacity; `None` means unbounded.
    pub fn capacity(&self) -> Option<f64> {
        self.capacity
    }

    /// Maximum stops per route, if limited.
    pub fn max_stops(&self) -> Option<usize> {
        self.max_stops
    }

    /// Shift start, minutes since midnight.
    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    /// Shift end, minutes since midnight.
    pub fn end_time(&self) -> f64 {
        self.end_time
    }

    /// Multiplier on the base travel speed.
    pub fn speed_factor(&self) -> f64 {
        self.speed_factor
    }

    /// Copy of this vehicle without capacity or stop limits.
    pub(crate) fn without_load_limits(&self) -> Self {
        Self {
            capacity: None,
            max_stops: None,
            ..self.clone()
        }
    }

    /// Copy of this vehicle with no limits at all, shift included.
    pub(crate) fn unconstrained(&self) -> Self {
        Self {
            end_time: f64::INFINITY,
            ..self.without_load_limits()
        }
    }

    /// Rejects configurations the builder cannot work with.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(capacity) = self.capacity {
            if capacity.is_nan() || capacity <= 0.0 {
                return Err(ValidationError::NonPositiveCapacity {
                    id: self.id.clone(),
                    capacity,
                });
            }
        }
        if self.max_stops == Some(0) {
            return Err(ValidationError::ZeroMaxStops {
                id: self.id.clone(),
            });
        }
        if self.end_time.is_nan() || self.start_time.is_nan() || self.end_time < self.start_time {
            return Err(ValidationError::InvertedShift {
                id: self.id.clone(),
                start: format_clock(self.start_time),
                end: format_clock(self.end_time),
            });
        }
        if !self.speed_factor.is_finite() || self.speed_factor <= 0.0 {
            return Err(ValidationError::NonPositiveSpeed {
                id: self.id.clone(),
                speed_factor: self.speed_factor,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vehicle_new() {
        let v = Vehicle::new("v0");
        assert_eq!(v.id(), "v0");
        assert!(v.capacity().is_none());
        assert!(v.max_stops().is_none());
        assert_eq!(v.start_time(), DEFAULT_SHIFT_START);
        assert_eq!(v.end_time(), DEFAULT_SHIFT_END);
        assert_eq!(v.speed_factor(), 1.0);
    }

    #[test]
    fn test_vehicle_builder() {
        let v = Vehicle::new("v1")
            .with_name("Van 1")
            .with_capacity(50.0)
            .with_max_stops(8)
            .with_shift(420.0, 900.0)
            .with_speed_factor(1.5);
        assert_eq!(v.name(), Some("Van 1"));
        assert_eq!(v.capacity(), Some(50.0));
        assert_eq!(v.max_stops(), Some(8));
        assert_eq!(v.start_time(), 420.0);
        assert_eq!(v.end_time(), 900.0);
        assert_eq!(v.speed_factor(), 1.5);
    }

    #[test]
    fn test_vehicle_json_shift() {
        let v: Vehicle = serde_json::from_str(
            r#"{"id": "v1", "capacity": 100, "start_time": "07:30", "end_time": "16:00"}"#,
        )
        .expect("valid");
        assert_eq!(v.start_time(), 450.0);
        assert_eq!(v.end_time(), 960.0);
        assert_eq!(v.speed_factor(), 1.0);
        let text = serde_json::to_string(&v).expect("serializes");
        assert!(text.contains(r#""start_time":"07:30""#));
    }

    #[test]
    fn test_vehicle_validate() {
        assert!(Vehicle::new("ok").with_capacity(1.0).validate().is_ok());
        assert!(matches!(
            Vehicle::new("cap").with_capacity(0.0).validate(),
            Err(ValidationError::NonPositiveCapacity { .. })
        ));
        assert!(matches!(
            Vehicle::new("stops").with_max_stops(0).validate(),
            Err(ValidationError::ZeroMaxStops { .. })
        ));
        assert!(matches!(
            Vehicle::new("shift").with_shift(600.0, 540.0).validate(),
            Err(ValidationError::InvertedShift { .. })
        ));
        assert!(matches!(
            Vehicle::new("speed").with_speed_factor(0.0).validate(),
            Err(ValidationError::NonPositiveSpeed { .. })
        ));
    }

    #[test]
    fn test_vehicle_validate_nan() {
        assert!(matches!(
            Vehicle::new("cap").with_capacity(f64::NAN).validate(),
            Err(ValidationError::NonPositiveCapacity { .. })
        ));
        assert!(matches!(
            Vehicle::new("shift").with_shift(f64::NAN, 540.0).validate(),
            Err(ValidationError::InvertedShift { .. })
        ));
        assert!(matches!(
            Vehicle::new("speed").with_speed_factor(f64::NAN).validate(),
            Err(ValidationError::NonPositiveSpeed { .. })
        ));
    }

    #[test]
    fn test_unconstrained_lifts_limits() {
        let v = Vehicle::new("v")
            .with_capacity(10.0)
            .with_max_stops(2)
            .with_speed_factor(2.0);
        let relaxed = v.without_load_limits();
        assert!(relaxed.capacity().is_none());
        assert!(relaxed.max_stops().is_none());
        assert_eq!(relaxed.end_time(), DEFAULT_SHIFT_END);
        let free = v.unconstrained();
        assert!(free.end_time().is_infinite());
        assert_eq!(free.speed_factor(), 2.0);
    }
}
