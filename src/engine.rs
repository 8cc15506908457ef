//! Optimization entry point.
//!
//! [`RouteEngine::optimize`] runs one request end to end:
//! validation, distance matrix, greedy construction, simulation, cost,
//! savings, and the optional scenario comparison. Each run touches only its
//! own data, so one engine can serve concurrent callers.

use std::time::Instant;

use crate::comparison::{summarize_cost, SavingsSummary, ScenarioComparator};
use crate::config::EngineConfig;
use crate::constructive::{strategy_for, RouteBuilder};
use crate::distance::DistanceMatrix;
use crate::error::EngineError;
use crate::models::{OptimizationRequest, OptimizationResult};
use crate::services::MapsComparisonProvider;

/// Plans delivery routes for a fleet.
///
/// # Examples
///
/// ```
/// use u_dispatch::engine::RouteEngine;
/// use u_dispatch::models::{Coordinate, Delivery, Depot, OptimizationRequest, Vehicle};
///
/// let request = OptimizationRequest::new(
///     Depot::new(Coordinate::new(37.7749, -122.4194)),
///     vec![
///         Delivery::new("d1", Coordinate::new(37.7849, -122.4094)).with_demand(10.0),
///         Delivery::new("d2", Coordinate::new(37.80, -122.40)).with_demand(15.0),
///     ],
///     vec![Vehicle::new("v1").with_capacity(100.0)],
/// );
///
/// let result = RouteEngine::default().optimize(&request).unwrap();
/// assert!(result.success);
/// assert_eq!(result.routes[0].delivery_ids(), vec!["d1", "d2"]);
/// assert_eq!(result.total_load, 25.0);
/// assert!(result.unassigned_deliveries.is_empty());
/// ```
#[derive(Default)]
pub struct RouteEngine {
    config: EngineConfig,
    maps: Option<Box<dyn MapsComparisonProvider>>,
}

impl RouteEngine {
    /// Creates an engine with the given configuration.
    pub fn new(config: EngineConfig) -> Self {
        Self { config, maps: None }
    }

    /// Consults `provider` for the single-vehicle comparison.
    pub fn with_maps_provider(mut self, provider: impl MapsComparisonProvider + 'static) -> Self {
        self.maps = Some(Box::new(provider));
        self
    }

    /// Engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Plans routes for `request`.
    ///
    /// Only an invalid request or configuration is an error. Deliveries no
    /// vehicle can take are listed in `unassigned_deliveries`; `success` is
    /// `false` only if none could be routed.
    pub fn optimize(
        &self,
        request: &OptimizationRequest,
    ) -> Result<OptimizationResult, EngineError> {
        let started = Instant::now();
        self.config.validate()?;
        request.validate()?;

        let depot = request.depot.location();
        let deliveries = &request.deliveries;
        let vehicles = &request.vehicles;
        let speed = self.config.base_speed_kmh;

        let distances = DistanceMatrix::for_deliveries(&depot, deliveries);
        let strategy = strategy_for(request.objective);
        let construction =
            RouteBuilder::new(&depot, deliveries, &distances, vehicles, strategy, speed).build();

        let routes = construction.routes;
        let unassigned_deliveries: Vec<String> = construction
            .unassigned
            .iter()
            .map(|&i| deliveries[i].id().to_string())
            .collect();

        let total_distance: f64 = routes.iter().map(|r| r.total_distance()).sum();
        let total_time: f64 = routes.iter().map(|r| r.total_time()).sum();
        let total_load: f64 = routes.iter().map(|r| r.total_load()).sum();

        let cost_settings = request.cost_settings.as_ref();
        let cost_summary = cost_settings.map(|c| summarize_cost(total_distance, total_time, c));

        let comparator = ScenarioComparator::new(
            &request.depot,
            deliveries,
            &distances,
            vehicles,
            strategy,
            speed,
        )
        .with_cost_settings(cost_settings);
        let optimized = comparator.metrics(&routes, unassigned_deliveries.len());

        let (savings_summary, comparison) = if self.config.include_comparison {
            let summary =
                comparator.compare(optimized, self.maps.as_deref(), self.config.has_maps_key());
            (summary.savings, Some(summary))
        } else {
            (SavingsSummary::between(&comparator.unoptimized(), &optimized), None)
        };

        let success = !routes.is_empty();
        let message = summary_message(routes.len(), unassigned_deliveries.len());
        let computation_time = started.elapsed().as_secs_f64();

        if let Some(limit) = request.max_computation_time {
            if computation_time > limit {
                log::warn!(
                    "optimization took {computation_time:.3}s, over the advisory {limit:.3}s"
                );
            }
        }
        log::info!(
            "{} objective: {} routes, {} unassigned, {:.2} km, {:.1} min in {:.3}s",
            request.objective,
            routes.len(),
            unassigned_deliveries.len(),
            total_distance,
            total_time,
            computation_time
        );

        Ok(OptimizationResult {
            success,
            message,
            routes,
            unassigned_deliveries,
            total_distance,
            total_time,
            total_load,
            computation_time,
            cost_summary,
            savings_summary: Some(savings_summary),
            comparison,
        })
    }

    /// JSON request in, JSON result out.
    pub fn optimize_json(&self, request: &str) -> Result<String, EngineError> {
        let request = OptimizationRequest::from_json(request)?;
        self.optimize(&request)?.to_json()
    }
}

fn summary_message(routes: usize, unassigned: usize) -> String {
    match (routes, unassigned) {
        (0, n) => format!("No deliveries could be routed. {n} deliveries unassigned."),
        (r, 0) => format!("Optimization complete. {r} routes created."),
        (r, n) => {
            format!("Optimization complete. {r} routes created. {n} deliveries unassigned.")
        }
    }
}
