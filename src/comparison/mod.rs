//! Cost and before/after comparison.
//!
//! - [`summarize_cost`] — prices distance and driver time
//! - [`ScenarioComparator`] — unoptimized, single-vehicle, and multi-vehicle
//!   scenarios with [`SavingsSummary`]

mod cost;
mod scenario;

pub use cost::{round2, summarize_cost, CostSettings, CostSummary, DistanceUnit};
pub use scenario::{ComparisonSummary, SavingsSummary, ScenarioComparator, ScenarioMetrics};
