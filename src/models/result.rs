//! Optimization result.

use serde::{Deserialize, Serialize};

use super::Route;
use crate::comparison::{ComparisonSummary, CostSummary, SavingsSummary};
use crate::error::EngineError;

/// The outcome of one optimization run.
///
/// Every delivery id appears either in exactly one route or in
/// `unassigned_deliveries`. `success` is `false` only when nothing could be
/// routed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    /// At least one delivery was routed.
    pub success: bool,
    /// Human-readable summary.
    pub message: String,
    /// One route per vehicle that received stops, in fleet order.
    pub routes: Vec<Route>,
    /// Delivery ids no vehicle could take, in input order.
    pub unassigned_deliveries: Vec<String>,
    /// Kilometers across all routes.
    pub total_distance: f64,
    /// Minutes across all routes.
    pub total_time: f64,
    /// Load across all routes.
    pub total_load: f64,
    /// Wall-clock seconds spent computing.
    pub computation_time: f64,
    /// Money spent, when cost settings were supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_summary: Option<CostSummary>,
    /// Naive input order against the optimized routes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub savings_summary: Option<SavingsSummary>,
    /// Three-scenario before/after comparison.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparison: Option<ComparisonSummary>,
}

impl OptimizationResult {
    /// Number of routes (vehicles used).
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Number of deliveries placed on a route.
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(|r| r.len()).sum()
    }

    /// Number of deliveries left unassigned.
    pub fn num_unassigned(&self) -> usize {
        self.unassigned_deliveries.len()
    }

    /// Route served by the given vehicle, if it received any stops.
    pub fn route_for(&self, vehicle_id: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.vehicle_id() == vehicle_id)
    }

    /// Serializes this result as JSON.
    pub fn to_json(&self) -> Result<String, EngineError> {
        Ok(serde_json::to_string(self)?)
    }
}
