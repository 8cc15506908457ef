//! Monetary cost of driving distance and time.

use serde::{Deserialize, Serialize};

use crate::distance::MILES_PER_KM;

/// Unit the distance rate is quoted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceUnit {
    /// Rate per mile.
    #[default]
    Miles,
    /// Rate per kilometer.
    Kilometers,
}

impl DistanceUnit {
    /// Converts kilometers into this unit.
    pub fn convert_km(&self, km: f64) -> f64 {
        match self {
            DistanceUnit::Miles => km * MILES_PER_KM,
            DistanceUnit::Kilometers => km,
        }
    }
}

/// Rates used to price a plan.
///
/// Defaults to 0.585 per mile and 25.00 per driver hour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostSettings {
    /// Cost per distance unit.
    #[serde(alias = "cost_per_mile", default = "default_distance_rate")]
    pub cost_per_distance_unit: f64,
    /// Unit of `cost_per_distance_unit`.
    #[serde(default)]
    pub distance_unit: DistanceUnit,
    /// Cost per driver hour.
    #[serde(default = "default_hourly_rate")]
    pub cost_per_hour: f64,
}

fn default_distance_rate() -> f64 {
    0.585
}

fn default_hourly_rate() -> f64 {
    25.0
}

impl Default for CostSettings {
    fn default() -> Self {
        Self {
            cost_per_distance_unit: default_distance_rate(),
            distance_unit: DistanceUnit::default(),
            cost_per_hour: default_hourly_rate(),
        }
    }
}

impl CostSettings {
    /// Rates quoted per mile.
    pub fn per_mile(cost_per_mile: f64, cost_per_hour: f64) -> Self {
        Self {
            cost_per_distance_unit: cost_per_mile,
            distance_unit: DistanceUnit::Miles,
            cost_per_hour,
        }
    }

    /// Rates quoted per kilometer.
    pub fn per_km(cost_per_km: f64, cost_per_hour: f64) -> Self {
        Self {
            cost_per_distance_unit: cost_per_km,
            distance_unit: DistanceUnit::Kilometers,
            cost_per_hour,
        }
    }
}

/// Distance, time, and total cost of a plan, unrounded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostSummary {
    /// Cost of the distance driven.
    pub distance_cost: f64,
    /// Cost of the driver time.
    pub time_cost: f64,
    /// Sum of both.
    pub total_cost: f64,
}

impl CostSummary {
    /// Copy rounded to cents, for display.
    pub fn rounded(&self) -> Self {
        Self {
            distance_cost: round2(self.distance_cost),
            time_cost: round2(self.time_cost),
            total_cost: round2(self.total_cost),
        }
    }
}

/// Prices `distance_km` kilometers and `minutes` minutes of driving.
///
/// Distances stay in kilometers everywhere else; the unit conversion happens
/// here. Nothing is rounded.
///
/// # Examples
///
/// ```
/// use u_dispatch::comparison::{summarize_cost, CostSettings};
///
/// let cost = summarize_cost(100.0, 120.0, &CostSettings::per_km(0.5, 20.0));
/// assert_eq!(cost.distance_cost, 50.0);
/// assert_eq!(cost.time_cost, 40.0);
/// assert_eq!(cost.total_cost, 90.0);
/// ```
pub fn summarize_cost(distance_km: f64, minutes: f64, settings: &CostSettings) -> CostSummary {
    let distance_cost =
        settings.distance_unit.convert_km(distance_km) * settings.cost_per_distance_unit;
    let time_cost = minutes / 60.0 * settings.cost_per_hour;
    CostSummary {
        distance_cost,
        time_cost,
        total_cost: distance_cost + time_cost,
    }
}

/// Rounds to two decimals.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
