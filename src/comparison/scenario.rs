//! Before/after scenario comparison.
//!
//! Three scenarios run over the same deliveries:
//!
//! - **unoptimized**: input order on one vehicle, no planning at all
//! - **single_vehicle**: the requested objective, one vehicle, no capacity
//!   or stop limit (shift kept)
//! - **multi_vehicle**: the routes the engine actually produced
//!
//! Savings are unoptimized minus multi_vehicle. A greedy pass is not
//! guaranteed to beat input order on every input, so savings may come out
//! negative; they are reported as computed.

use serde::{Deserialize, Serialize};

use super::cost::{summarize_cost, CostSettings};
use crate::constructive::{input_order, RouteBuilder, SelectionStrategy};
use crate::distance::DistanceMatrix;
use crate::evaluation::RouteSimulator;
use crate::models::{Delivery, Depot, Route, Vehicle};
use crate::services::{MapsComparison, MapsComparisonProvider, MapsStatus};

/// Totals for one scenario.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioMetrics {
    /// Kilometers.
    pub total_distance: f64,
    /// Minutes.
    pub total_time: f64,
    /// Vehicles that left the depot.
    pub vehicle_count: usize,
    /// Deliveries placed on a route.
    pub routed: usize,
    /// Deliveries left behind.
    pub unassigned: usize,
    /// Priced with the request's cost settings, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_cost: Option<f64>,
}

impl ScenarioMetrics {
    /// Sums a set of routes.
    pub fn from_routes(routes: &[Route], unassigned: usize, cost: Option<&CostSettings>) -> Self {
        let total_distance: f64 = routes.iter().map(|r| r.total_distance()).sum();
        let total_time: f64 = routes.iter().map(|r| r.total_time()).sum();
        Self {
            total_distance,
            total_time,
            vehicle_count: routes.iter().filter(|r| !r.is_empty()).count(),
            routed: routes.iter().map(|r| r.len()).sum(),
            unassigned,
            total_cost: cost.map(|c| summarize_cost(total_distance, total_time, c).total_cost),
        }
    }
}

/// What optimization saved over the naive baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SavingsSummary {
    /// Baseline kilometers.
    pub naive_distance: f64,
    /// Baseline minutes.
    pub naive_time: f64,
    /// Optimized kilometers.
    pub optimized_distance: f64,
    /// Optimized minutes.
    pub optimized_time: f64,
    /// `naive_distance - optimized_distance`.
    pub distance_saved: f64,
    /// `naive_time - optimized_time`.
    pub time_saved: f64,
    /// Share of the baseline distance saved, 0 to 100 (0 for an empty baseline).
    pub distance_saved_percent: f64,
    /// Share of the baseline time saved, 0 to 100 (0 for an empty baseline).
    pub time_saved_percent: f64,
    /// Cost difference, when both sides were priced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub money_saved: Option<f64>,
    /// Both sides routed the same number of deliveries. When `false`, the
    /// optimized side left stops behind and the figures above count the
    /// dropped stops as savings.
    pub comparable: bool,
}

impl SavingsSummary {
    /// Savings of `optimized` relative to `naive`.
    ///
    /// Only meaningful when [`comparable`](Self::comparable) is `true`.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_dispatch::comparison::{SavingsSummary, ScenarioMetrics};
    ///
    /// let naive = ScenarioMetrics {
    ///     total_distance: 20.0, total_time: 60.0,
    ///     vehicle_count: 1, routed: 4, unassigned: 0, total_cost: None,
    /// };
    /// let optimized = ScenarioMetrics { total_distance: 15.0, total_time: 45.0, ..naive };
    /// let savings = SavingsSummary::between(&naive, &optimized);
    /// assert_eq!(savings.distance_saved, 5.0);
    /// assert_eq!(savings.distance_saved_percent, 25.0);
    /// assert_eq!(savings.money_saved, None);
    /// assert!(savings.comparable);
    /// ```
    pub fn between(naive: &ScenarioMetrics, optimized: &ScenarioMetrics) -> Self {
        let distance_saved = naive.total_distance - optimized.total_distance;
        let time_saved = naive.total_time - optimized.total_time;
        Self {
            naive_distance: naive.total_distance,
            naive_time: naive.total_time,
            optimized_distance: optimized.total_distance,
            optimized_time: optimized.total_time,
            distance_saved,
            time_saved,
            distance_saved_percent: percent_of(distance_saved, naive.total_distance),
            time_saved_percent: percent_of(time_saved, naive.total_time),
            money_saved: naive
                .total_cost
                .zip(optimized.total_cost)
                .map(|(before, after)| before - after),
            comparable: naive.routed == optimized.routed,
        }
    }
}

fn percent_of(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        part / whole * 100.0
    } else {
        0.0
    }
}

/// The three scenarios side by side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSummary {
    /// Input order, one vehicle.
    pub unoptimized: ScenarioMetrics,
    /// Requested objective, one vehicle.
    pub single_vehicle: ScenarioMetrics,
    /// The engine's routes.
    pub multi_vehicle: ScenarioMetrics,
    /// Unoptimized against multi_vehicle.
    pub savings: SavingsSummary,
    /// Where the single-vehicle figures came from.
    pub google_status: MapsStatus,
}

/// Runs the baseline scenarios for one request.
///
/// # Examples
///
/// ```
/// use u_dispatch::comparison::ScenarioComparator;
/// use u_dispatch::constructive::strategy_for;
/// use u_dispatch::distance::DistanceMatrix;
/// use u_dispatch::models::{Coordinate, Delivery, Depot, Objective, Vehicle};
///
/// let depot = Depot::new(Coordinate::new(0.0, 0.0));
/// let deliveries = vec![
///     Delivery::new("far", Coordinate::new(0.0, 0.3)),
///     Delivery::new("near", Coordinate::new(0.0, 0.1)),
///     Delivery::new("mid", Coordinate::new(0.0, 0.2)),
/// ];
/// let dm = DistanceMatrix::for_deliveries(&depot.location(), &deliveries);
/// let vehicles = vec![Vehicle::new("v1")];
/// let comparator = ScenarioComparator::new(
///     &depot, &deliveries, &dm, &vehicles,
///     strategy_for(Objective::MinimizeDistance), 40.0,
/// );
///
/// let naive = comparator.unoptimized();
/// let planned = comparator.single_vehicle();
/// assert_eq!(naive.routed, 3);
/// assert!(planned.total_distance < naive.total_distance);
/// ```
pub struct ScenarioComparator<'a> {
    depot: &'a Depot,
    deliveries: &'a [Delivery],
    distances: &'a DistanceMatrix,
    vehicles: &'a [Vehicle],
    strategy: &'a dyn SelectionStrategy,
    base_speed_kmh: f64,
    cost: Option<&'a CostSettings>,
}

impl<'a> ScenarioComparator<'a> {
    /// Creates a comparator over one request's data.
    pub fn new(
        depot: &'a Depot,
        deliveries: &'a [Delivery],
        distances: &'a DistanceMatrix,
        vehicles: &'a [Vehicle],
        strategy: &'a dyn SelectionStrategy,
        base_speed_kmh: f64,
    ) -> Self {
        Self {
            depot,
            deliveries,
            distances,
            vehicles,
            strategy,
            base_speed_kmh,
            cost: None,
        }
    }

    /// Prices every scenario with these settings.
    pub fn with_cost_settings(mut self, cost: Option<&'a CostSettings>) -> Self {
        self.cost = cost;
        self
    }

    /// Totals for a set of routes priced with this comparator's settings.
    pub fn metrics(&self, routes: &[Route], unassigned: usize) -> ScenarioMetrics {
        ScenarioMetrics::from_routes(routes, unassigned, self.cost)
    }

    /// Every delivery in input order on the first vehicle.
    ///
    /// Capacity, stop limit and shift end are lifted, so nothing is left
    /// behind. Time windows still cause waiting.
    pub fn unoptimized(&self) -> ScenarioMetrics {
        let Some(first) = self.vehicles.first() else {
            return self.metrics(&[], self.deliveries.len());
        };
        let vehicle = first.unconstrained();
        let home = self.depot.location();
        let route = RouteSimulator::new(
            &home,
            self.deliveries,
            self.distances,
            &vehicle,
            self.base_speed_kmh,
        )
        .simulate(&input_order(self.deliveries));
        self.metrics(&[route], 0)
    }

    /// The requested objective on the first vehicle alone.
    pub fn single_vehicle(&self) -> ScenarioMetrics {
        let Some(first) = self.vehicles.first() else {
            return self.metrics(&[], self.deliveries.len());
        };
        let fleet = [first.without_load_limits()];
        let home = self.depot.location();
        let construction = RouteBuilder::new(
            &home,
            self.deliveries,
            self.distances,
            &fleet,
            self.strategy,
            self.base_speed_kmh,
        )
        .build();
        self.metrics(&construction.routes, construction.unassigned.len())
    }

    /// All three scenarios plus savings.
    ///
    /// `multi_vehicle` is the engine's own result. When a maps provider
    /// answers, its figures replace the single-vehicle estimate; when it
    /// fails, the estimate stands and the status says so.
    pub fn compare(
        &self,
        multi_vehicle: ScenarioMetrics,
        maps: Option<&dyn MapsComparisonProvider>,
        has_maps_key: bool,
    ) -> ComparisonSummary {
        let unoptimized = self.unoptimized();
        let mut single_vehicle = self.single_vehicle();

        let (google_status, external) = self.consult_maps(maps, has_maps_key);
        if let Some(external) = external {
            single_vehicle.total_distance = external.total_distance;
            single_vehicle.total_time = external.total_time;
            single_vehicle.total_cost = self.cost.map(|c| {
                summarize_cost(external.total_distance, external.total_time, c).total_cost
            });
        }

        ComparisonSummary {
            savings: SavingsSummary::between(&unoptimized, &multi_vehicle),
            unoptimized,
            single_vehicle,
            multi_vehicle,
            google_status,
        }
    }

    fn consult_maps(
        &self,
        maps: Option<&dyn MapsComparisonProvider>,
        has_maps_key: bool,
    ) -> (MapsStatus, Option<MapsComparison>) {
        let Some(provider) = maps else {
            let status = if has_maps_key {
                MapsStatus::Estimated
            } else {
                MapsStatus::NoKey
            };
            return (status, None);
        };
        match provider.fetch(self.depot, self.deliveries) {
            Ok(found) if found.complete => (MapsStatus::Actual, Some(found)),
            Ok(found) => (MapsStatus::Limited, Some(found)),
            Err(err) => {
                log::warn!("maps comparison unavailable: {err}; using estimate");
                (MapsStatus::Estimated, None)
            }
        }
    }
}
