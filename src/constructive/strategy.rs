//! Objective strategies for greedy construction.
//!
//! A strategy is a scoring rule for candidate deliveries plus a rule for
//! which vehicle to extend next. It is chosen once per run from the
//! [`Objective`] and passed explicitly to the builder.

use crate::evaluation::Projection;
use crate::models::Objective;

/// Construction progress of one vehicle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleProgress {
    /// Position in the fleet.
    pub index: usize,
    /// Load delivered so far.
    pub load: f64,
    /// Stops made so far.
    pub stops: usize,
    /// `false` once no remaining delivery fits this vehicle.
    pub open: bool,
}

impl VehicleProgress {
    /// An untouched vehicle at fleet position `index`.
    pub fn new(index: usize) -> Self {
        Self {
            index,
            load: 0.0,
            stops: 0,
            open: true,
        }
    }
}

/// Selection rule used by [`RouteBuilder`](super::RouteBuilder).
pub trait SelectionStrategy: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Score of a feasible candidate; lower is better.
    fn score(&self, projection: &Projection) -> f64;

    /// The vehicle to extend next, or `None` when every vehicle is closed.
    ///
    /// Defaults to the first open vehicle in fleet order, which fills one
    /// vehicle completely before starting the next.
    fn next_vehicle(&self, fleet: &[VehicleProgress]) -> Option<usize> {
        fleet.iter().find(|v| v.open).map(|v| v.index)
    }
}

/// Nearest feasible delivery by distance.
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestDistance;

impl SelectionStrategy for NearestDistance {
    fn name(&self) -> &'static str {
        "nearest_distance"
    }

    fn score(&self, projection: &Projection) -> f64 {
        projection.distance
    }
}

/// Delivery whose service can start soonest: driving plus waiting.
#[derive(Debug, Clone, Copy, Default)]
pub struct EarliestService;

impl SelectionStrategy for EarliestService {
    fn name(&self) -> &'static str {
        "earliest_service"
    }

    fn score(&self, projection: &Projection) -> f64 {
        projection.travel_time + projection.wait
    }
}

/// Nearest delivery, always extending the least-loaded open vehicle.
///
/// Vehicles are re-ranked every round by load, then stop count, then fleet
/// position, so routes grow side by side instead of one after another.
#[derive(Debug, Clone, Copy, Default)]
pub struct BalancedLoad;

impl SelectionStrategy for BalancedLoad {
    fn name(&self) -> &'static str {
        "balanced_load"
    }

    fn score(&self, projection: &Projection) -> f64 {
        projection.distance
    }

    fn next_vehicle(&self, fleet: &[VehicleProgress]) -> Option<usize> {
        fleet
            .iter()
            .filter(|v| v.open)
            .min_by(|a, b| {
                a.load
                    .total_cmp(&b.load)
                    .then(a.stops.cmp(&b.stops))
                    .then(a.index.cmp(&b.index))
            })
            .map(|v| v.index)
    }
}

/// The strategy implementing an objective.
///
/// ```
/// use u_dispatch::constructive::strategy_for;
/// use u_dispatch::models::Objective;
///
/// assert_eq!(strategy_for(Objective::BalanceRoutes).name(), "balanced_load");
/// ```
pub fn strategy_for(objective: Objective) -> &'static dyn SelectionStrategy {
    match objective {
        Objective::MinimizeDistance => &NearestDistance,
        Objective::MinimizeTime => &EarliestService,
        Objective::BalanceRoutes => &BalancedLoad,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn projection(distance: f64, travel_time: f64, wait: f64) -> Projection {
        Projection {
            delivery: 0,
            distance,
            travel_time,
            arrival: 0.0,
            wait,
            departure: 0.0,
            return_at: 0.0,
            load: 0.0,
        }
    }

    #[test]
    fn test_scores() {
        let p = projection(3.0, 4.5, 10.0);
        assert_eq!(NearestDistance.score(&p), 3.0);
        assert_eq!(EarliestService.score(&p), 14.5);
        assert_eq!(BalancedLoad.score(&p), 3.0);
    }

    #[test]
    fn test_sequential_vehicle_order() {
        let mut fleet = vec![VehicleProgress::new(0), VehicleProgress::new(1)];
        fleet[0].load = 50.0;
        assert_eq!(NearestDistance.next_vehicle(&fleet), Some(0));
        fleet[0].open = false;
        assert_eq!(NearestDistance.next_vehicle(&fleet), Some(1));
        fleet[1].open = false;
        assert_eq!(NearestDistance.next_vehicle(&fleet), None);
    }

    #[test]
    fn test_balanced_vehicle_order() {
        let mut fleet: Vec<_> = (0..3).map(VehicleProgress::new).collect();
        assert_eq!(BalancedLoad.next_vehicle(&fleet), Some(0));
        fleet[0].load = 10.0;
        fleet[0].stops = 1;
        assert_eq!(BalancedLoad.next_vehicle(&fleet), Some(1));
        fleet[1].load = 5.0;
        fleet[1].stops = 1;
        fleet[2].load = 5.0;
        fleet[2].stops = 2;
        assert_eq!(BalancedLoad.next_vehicle(&fleet), Some(1));
        fleet[1].open = false;
        assert_eq!(BalancedLoad.next_vehicle(&fleet), Some(2));
    }

    #[test]
    fn test_strategy_for() {
        assert_eq!(strategy_for(Objective::MinimizeDistance).name(), "nearest_distance");
        assert_eq!(strategy_for(Objective::MinimizeTime).name(), "earliest_service");
    }
}
