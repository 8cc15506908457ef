//! Greedy nearest-feasible-neighbor route construction.
//!
//! # Algorithm
//!
//! Every vehicle starts at the depot at its shift start with no load. Each
//! round the strategy names a vehicle to extend; among all unassigned
//! deliveries that the feasibility checker accepts for that vehicle, the one
//! with the lowest score is appended. Ties go to the lower priority value,
//! then to the lexicographically smaller id. A vehicle with no feasible
//! candidate is closed for the rest of the run.
//!
//! Deliveries rejected by one vehicle stay in the shared pool and compete
//! for every later vehicle. Whatever no vehicle takes is reported as
//! unassigned; that is partial success, not failure.
//!
//! There is no backtracking: once appended, a stop is never moved.
//!
//! # Complexity
//!
//! O(m · n²) for m vehicles and n deliveries.

use std::cmp::Ordering;

use super::strategy::{SelectionStrategy, VehicleProgress};
use crate::distance::DistanceMatrix;
use crate::evaluation::{FeasibilityChecker, Projection, RouteSimulator, RouteState};
use crate::models::{Coordinate, Delivery, Route, Vehicle};

/// Scores closer than this are treated as equal and go to the tie-break.
const SCORE_TOLERANCE: f64 = 1e-9;

/// The output of one construction pass.
#[derive(Debug, Clone)]
pub struct Construction {
    /// Delivery indices per vehicle, in fleet order (empty if unused).
    pub sequences: Vec<Vec<usize>>,
    /// Simulated routes for vehicles that received stops, in fleet order.
    pub routes: Vec<Route>,
    /// Indices of deliveries no vehicle could take, in input order.
    pub unassigned: Vec<usize>,
}

impl Construction {
    /// Ids of the unassigned deliveries.
    pub fn unassigned_ids(&self, deliveries: &[Delivery]) -> Vec<String> {
        self.unassigned
            .iter()
            .map(|&i| deliveries[i].id().to_string())
            .collect()
    }
}

/// Builds one route per vehicle with a greedy selection rule.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::{Coordinate, Delivery, Objective, Vehicle};
/// use u_dispatch::distance::DistanceMatrix;
/// use u_dispatch::constructive::{strategy_for, RouteBuilder};
///
/// let depot = Coordinate::new(37.7749, -122.4194);
/// let deliveries = vec![
///     Delivery::new("d2", Coordinate::new(37.80, -122.40)).with_demand(15.0),
///     Delivery::new("d1", Coordinate::new(37.7849, -122.4094)).with_demand(10.0),
/// ];
/// let dm = DistanceMatrix::for_deliveries(&depot, &deliveries);
/// let vehicles = vec![Vehicle::new("v1").with_capacity(100.0)];
///
/// let builder = RouteBuilder::new(
///     &depot, &deliveries, &dm, &vehicles,
///     strategy_for(Objective::MinimizeDistance), 40.0,
/// );
/// let construction = builder.build();
/// assert_eq!(construction.routes[0].delivery_ids(), vec!["d1", "d2"]);
/// assert!(construction.unassigned.is_empty());
/// ```
pub struct RouteBuilder<'a> {
    depot: &'a Coordinate,
    deliveries: &'a [Delivery],
    distances: &'a DistanceMatrix,
    vehicles: &'a [Vehicle],
    strategy: &'a dyn SelectionStrategy,
    base_speed_kmh: f64,
}

impl<'a> RouteBuilder<'a> {
    /// Creates a builder for one run.
    pub fn new(
        depot: &'a Coordinate,
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
        }
    }

    /// Runs the greedy pass and simulates the resulting sequences.
    pub fn build(&self) -> Construction {
        let sequences = self.assign();

        let mut assigned = vec![false; self.deliveries.len()];
        for &i in sequences.iter().flatten() {
            assigned[i] = true;
        }
        let unassigned: Vec<usize> = (0..self.deliveries.len())
            .filter(|&i| !assigned[i])
            .collect();

        let routes = sequences
            .iter()
            .zip(self.vehicles)
            .filter(|(sequence, _)| !sequence.is_empty())
            .map(|(sequence, vehicle)| {
                RouteSimulator::new(
                    self.depot,
                    self.deliveries,
                    self.distances,
                    vehicle,
                    self.base_speed_kmh,
                )
                .simulate(sequence)
            })
            .collect();

        Construction {
            sequences,
            routes,
            unassigned,
        }
    }

    /// Greedy assignment: delivery indices per vehicle.
    fn assign(&self) -> Vec<Vec<usize>> {
        let checkers: Vec<FeasibilityChecker<'_>> = self
            .vehicles
            .iter()
            .map(|v| {
                FeasibilityChecker::new(self.deliveries, self.distances, v, self.base_speed_kmh)
            })
            .collect();
        let mut states: Vec<RouteState> = self.vehicles.iter().map(RouteState::start).collect();
        let mut fleet: Vec<VehicleProgress> =
            (0..self.vehicles.len()).map(VehicleProgress::new).collect();
        let mut sequences = vec![Vec::new(); self.vehicles.len()];
        let mut assigned = vec![false; self.deliveries.len()];
        let mut remaining = self.deliveries.len();

        while remaining > 0 {
            let Some(v) = self.strategy.next_vehicle(&fleet) else {
                break;
            };
            match self.best_candidate(&checkers[v], &states[v], &assigned) {
                Some(projection) => {
                    assigned[projection.delivery] = true;
                    remaining -= 1;
                    states[v].advance(&projection);
                    sequences[v].push(projection.delivery);
                    fleet[v].load = states[v].load;
                    fleet[v].stops = states[v].stops;
                }
                None => {
                    fleet[v].open = false;
                    log::debug!(
                        "vehicle {} closed with {} stops, load {:.1}, {:.2} km",
                        self.vehicles[v].id(),
                        states[v].stops,
                        states[v].load,
                        states[v].distance
                    );
                }
            }
        }

        sequences
    }

    /// Lowest-scoring feasible delivery for a vehicle, with tie-breaks.
    fn best_candidate(
        &self,
        checker: &FeasibilityChecker<'_>,
        state: &RouteState,
        assigned: &[bool],
    ) -> Option<Projection> {
        let mut best: Option<(Projection, f64)> = None;

        for (i, &taken) in assigned.iter().enumerate() {
            if taken {
                continue;
            }
            let projection = match checker.check(state, i) {
                Ok(p) => p,
                Err(reason) => {
                    log::trace!(
                        "{} rejected for {}: {reason}",
                        self.deliveries[i].id(),
                        checker.vehicle().id()
                    );
                    continue;
                }
            };
            let score = self.strategy.score(&projection);
            let replace = match &best {
                None => true,
                Some((incumbent, incumbent_score)) => {
                    self.compare(i, score, incumbent.delivery, *incumbent_score) == Ordering::Less
                }
            };
            if replace {
                best = Some((projection, score));
            }
        }

        best.map(|(projection, _)| projection)
    }

    /// Orders two candidates: score, then priority, then id.
    fn compare(&self, a: usize, a_score: f64, b: usize, b_score: f64) -> Ordering {
        if (a_score - b_score).abs() > SCORE_TOLERANCE {
            return a_score.total_cmp(&b_score);
        }
        let (da, db) = (&self.deliveries[a], &self.deliveries[b]);
        da.priority()
            .cmp(&db.priority())
            .then_with(|| da.id().cmp(db.id()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constructive::strategy_for;
    use crate::models::{Objective, TimeWindow};

    const SPEED: f64 = 40.0;

    fn run(
        depot: &Coordinate,
        deliveries: &[Delivery],
        vehicles: &[Vehicle],
        objective: Objective,
    ) -> Construction {
        let dm = DistanceMatrix::for_deliveries(depot, deliveries);
        RouteBuilder::new(depot, deliveries, &dm, vehicles, strategy_for(objective), SPEED).build()
    }

    fn line(n: usize) -> Vec<Delivery> {
        (1..=n)
            .map(|i| Delivery::new(format!("d{i}"), Coordinate::new(0.01 * i as f64, 0.0)))
            .collect()
    }

    #[test]
    fn test_nearest_order_single_vehicle() {
        let depot = Coordinate::new(0.0, 0.0);
        let mut deliveries = line(3);
        deliveries.reverse();
        let c = run(&depot, &deliveries, &[Vehicle::new("v")], Objective::MinimizeDistance);
        assert_eq!(c.routes.len(), 1);
        assert_eq!(c.routes[0].delivery_ids(), vec!["d1", "d2", "d3"]);
        assert!(c.unassigned.is_empty());
    }

    #[test]
    fn test_demand_over_capacity_unassigned() {
        let depot = Coordinate::new(37.7749, -122.4194);
        let deliveries =
            vec![Delivery::new("big", Coordinate::new(37.7849, -122.4094)).with_demand(15.0)];
        let c = run(
            &depot,
            &deliveries,
            &[Vehicle::new("v").with_capacity(10.0)],
            Objective::MinimizeDistance,
        );
        assert!(c.routes.is_empty());
        assert_eq!(c.unassigned_ids(&deliveries), vec!["big".to_string()]);
    }

    #[test]
    fn test_capacity_spills_to_next_vehicle() {
        let depot = Coordinate::new(0.0, 0.0);
        let deliveries: Vec<Delivery> = line(4).into_iter().map(|d| d.with_demand(10.0)).collect();
        let vehicles = vec![
            Vehicle::new("v1").with_capacity(20.0),
            Vehicle::new("v2").with_capacity(20.0),
        ];
        let c = run(&depot, &deliveries, &vehicles, Objective::MinimizeDistance);
        assert_eq!(c.routes[0].delivery_ids(), vec!["d1", "d2"]);
        assert_eq!(c.routes[1].delivery_ids(), vec!["d3", "d4"]);
        assert!(c.routes.iter().all(|r| r.total_load() <= 20.0));
    }

    #[test]
    fn test_rejected_delivery_retried_by_later_vehicle() {
        let depot = Coordinate::new(0.0, 0.0);
        let deliveries = vec![
            Delivery::new("small", Coordinate::new(0.01, 0.0)).with_demand(5.0),
            Delivery::new("heavy", Coordinate::new(0.02, 0.0)).with_demand(50.0),
        ];
        let vehicles = vec![
            Vehicle::new("van").with_capacity(10.0),
            Vehicle::new("truck").with_capacity(100.0),
        ];
        let c = run(&depot, &deliveries, &vehicles, Objective::MinimizeDistance);
        assert_eq!(c.routes[0].vehicle_id(), "van");
        assert_eq!(c.routes[0].delivery_ids(), vec!["small"]);
        assert_eq!(c.routes[1].vehicle_id(), "truck");
        assert_eq!(c.routes[1].delivery_ids(), vec!["heavy"]);
        assert!(c.unassigned.is_empty());
    }

    #[test]
    fn test_unreachable_window_goes_to_faster_vehicle() {
        let depot = Coordinate::new(0.0, 0.0);
        // ~55.6 km: 83 min at 40 km/h (arrive ~09:23), 42 min at double speed.
        let deliveries = vec![Delivery::new("rush", Coordinate::new(0.5, 0.0))
            .with_time_window(TimeWindow::parse("09:00", "09:15").expect("valid"))];
        let vehicles = vec![
            Vehicle::new("slow"),
            Vehicle::new("fast").with_speed_factor(2.0),
        ];
        let c = run(&depot, &deliveries, &vehicles, Objective::MinimizeDistance);
        assert_eq!(c.routes.len(), 1);
        assert_eq!(c.routes[0].vehicle_id(), "fast");

        let c = run(&depot, &deliveries, &vehicles[..1], Objective::MinimizeDistance);
        assert_eq!(c.unassigned, vec![0]);
    }

    #[test]
    fn test_tie_break_priority_then_id() {
        let depot = Coordinate::new(0.0, 0.0);
        let p = Coordinate::new(0.01, 0.0);
        let deliveries = vec![
            Delivery::new("b", p).with_priority(2),
            Delivery::new("c", p).with_priority(1),
            Delivery::new("a", p).with_priority(2),
        ];
        let c = run(&depot, &deliveries, &[Vehicle::new("v")], Objective::MinimizeDistance);
        assert_eq!(c.routes[0].delivery_ids(), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_minimize_time_counts_waiting() {
        let depot = Coordinate::new(0.0, 0.0);
        let deliveries = vec![
            Delivery::new("near_late", Coordinate::new(0.01, 0.0))
                .with_time_window(TimeWindow::parse("12:00", "13:00").expect("valid")),
            Delivery::new("far_now", Coordinate::new(0.05, 0.0)),
        ];
        let vehicles = [Vehicle::new("v")];
        let by_distance = run(&depot, &deliveries, &vehicles, Objective::MinimizeDistance);
        assert_eq!(by_distance.routes[0].delivery_ids(), vec!["near_late", "far_now"]);
        let by_time = run(&depot, &deliveries, &vehicles, Objective::MinimizeTime);
        assert_eq!(by_time.routes[0].delivery_ids(), vec!["far_now", "near_late"]);
    }

    #[test]
    fn test_balance_spreads_across_vehicles() {
        let depot = Coordinate::new(0.0, 0.0);
        let deliveries = line(4);
        let vehicles = vec![Vehicle::new("v1"), Vehicle::new("v2")];
        let sequential = run(&depot, &deliveries, &vehicles, Objective::MinimizeDistance);
        assert_eq!(sequential.routes.len(), 1);
        let balanced = run(&depot, &deliveries, &vehicles, Objective::BalanceRoutes);
        assert_eq!(balanced.routes.len(), 2);
        assert_eq!(balanced.routes[0].len(), 2);
        assert_eq!(balanced.routes[1].len(), 2);
        assert_eq!(balanced.routes[0].delivery_ids(), vec!["d1", "d3"]);
        assert_eq!(balanced.routes[1].delivery_ids(), vec!["d2", "d4"]);
    }

    #[test]
    fn test_stop_limit_respected() {
        let depot = Coordinate::new(0.0, 0.0);
        let deliveries = line(5);
        let vehicles = vec![
            Vehicle::new("v1").with_max_stops(2),
            Vehicle::new("v2").with_max_stops(2),
        ];
        let c = run(&depot, &deliveries, &vehicles, Objective::MinimizeDistance);
        assert!(c.routes.iter().all(|r| r.len() <= 2));
        assert_eq!(c.unassigned_ids(&deliveries), vec!["d5".to_string()]);
    }

    #[test]
    fn test_partition_of_deliveries() {
        let depot = Coordinate::new(0.0, 0.0);
        let deliveries: Vec<Delivery> = line(6).into_iter().map(|d| d.with_demand(7.0)).collect();
        let vehicles = vec![Vehicle::new("v1").with_capacity(15.0)];
        let c = run(&depot, &deliveries, &vehicles, Objective::MinimizeDistance);
        let mut seen: Vec<usize> = c.sequences.iter().flatten().copied().collect();
        seen.extend(&c.unassigned);
        seen.sort_unstable();
        assert_eq!(seen, (0..6).collect::<Vec<_>>());
    }
}
