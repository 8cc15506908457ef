//! Optimization request.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{Delivery, Depot, Objective, Vehicle};
use crate::comparison::CostSettings;
use crate::error::{EngineError, ValidationError};

/// Everything one optimization run needs.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::OptimizationRequest;
///
/// let request = OptimizationRequest::from_json(r#"{
///     "depot": {"latitude": 37.7749, "longitude": -122.4194},
///     "deliveries": [{"id": "d1", "latitude": 37.7849, "longitude": -122.4094, "demand": 10}],
///     "vehicles": [{"id": "v1", "capacity": 100}],
///     "objective": "minimize_time"
/// }"#).unwrap();
/// assert_eq!(request.deliveries.len(), 1);
/// assert!(request.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationRequest {
    /// Shared start and end point.
    pub depot: Depot,
    /// Stops to route.
    pub deliveries: Vec<Delivery>,
    /// Available fleet, in preference order.
    pub vehicles: Vec<Vehicle>,
    /// Selection goal.
    #[serde(default)]
    pub objective: Objective,
    /// Rates for the cost summary; no summary when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_settings: Option<CostSettings>,
    /// Advisory time budget in seconds. The greedy pass is bounded, so this
    /// is only reported against, never enforced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_computation_time: Option<f64>,
}

impl OptimizationRequest {
    /// Creates a request with the default objective and no cost settings.
    pub fn new(depot: Depot, deliveries: Vec<Delivery>, vehicles: Vec<Vehicle>) -> Self {
        Self {
            depot,
            deliveries,
            vehicles,
            objective: Objective::default(),
            cost_settings: None,
            max_computation_time: None,
        }
    }

    /// Sets the objective.
    pub fn with_objective(mut self, objective: Objective) -> Self {
        self.objective = objective;
        self
    }

    /// Sets cost rates.
    pub fn with_cost_settings(mut self, settings: CostSettings) -> Self {
        self.cost_settings = Some(settings);
        self
    }

    /// Sets the advisory time budget in seconds.
    pub fn with_max_computation_time(mut self, seconds: f64) -> Self {
        self.max_computation_time = Some(seconds);
        self
    }

    /// Parses a request from JSON.
    pub fn from_json(text: &str) -> Result<Self, EngineError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Rejects requests the builder cannot run on.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.deliveries.is_empty() {
            return Err(ValidationError::NoDeliveries);
        }
        if self.vehicles.is_empty() {
            return Err(ValidationError::NoVehicles);
        }
        let mut seen = HashSet::with_capacity(self.deliveries.len());
        for delivery in &self.deliveries {
            delivery.validate()?;
            if !seen.insert(delivery.id()) {
                return Err(ValidationError::DuplicateDelivery(delivery.id().to_string()));
            }
        }
        for vehicle in &self.vehicles {
            vehicle.validate()?;
        }
        Ok(())
    }
}
