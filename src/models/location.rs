//! Coordinates and the depot.

use serde::{Deserialize, Serialize};

use crate::distance::haversine;

/// A point on the Earth's surface in decimal degrees.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::Coordinate;
///
/// let a = Coordinate::new(37.7749, -122.4194);
/// let b = Coordinate::new(37.7849, -122.4094);
/// assert!(a.distance_to(&b) > 1.0);
/// assert_eq!(a.distance_to(&a), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees, north positive.
    pub latitude: f64,
    /// Longitude in degrees, east positive.
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a coordinate from latitude and longitude.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance to another coordinate in kilometers.
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        haversine(self, other)
    }
}

/// The single start and end point shared by every vehicle in a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Depot {
    #[serde(default = "default_depot_id")]
    id: String,
    #[serde(default = "default_depot_name")]
    name: String,
    #[serde(flatten)]
    location: Coordinate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    address: Option<String>,
}

fn default_depot_id() -> String {
    "depot".to_string()
}

fn default_depot_name() -> String {
    "Depot".to_string()
}

impl Depot {
    /// Creates a depot at the given location.
    pub fn new(location: Coordinate) -> Self {
        Self {
            id: default_depot_id(),
            name: default_depot_name(),
            location,
            address: None,
        }
    }

    /// Sets the depot name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the street address.
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Depot identifier (defaults to `"depot"`).
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Depot location.
    pub fn location(&self) -> Coordinate {
        self.location
    }

    /// Street address, if known.
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }
}
