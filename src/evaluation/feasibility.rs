//! Feasibility of appending one delivery to a route in progress.

use crate::distance::{travel_time, DistanceMatrix, DEPOT};
use crate::models::{Delivery, Infeasibility, Vehicle};

/// The end of a partial route: where the vehicle is, when, and how loaded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteState {
    /// Matrix index of the current location.
    pub node: usize,
    /// Current time of day (minutes since midnight).
    pub time: f64,
    /// Load delivered so far.
    pub load: f64,
    /// Stops made so far.
    pub stops: usize,
    /// Kilometers driven so far.
    pub distance: f64,
}

impl RouteState {
    /// A vehicle parked at the depot at the start of its shift.
    pub fn start(vehicle: &Vehicle) -> Self {
        Self {
            node: DEPOT,
            time: vehicle.start_time(),
            load: 0.0,
            stops: 0,
            distance: 0.0,
        }
    }

    /// Moves the route end onto a projected stop.
    pub fn advance(&mut self, projection: &Projection) {
        self.node = DistanceMatrix::node(projection.delivery);
        self.time = projection.departure;
        self.load = projection.load;
        self.stops += 1;
        self.distance += projection.distance;
    }
}

/// What happens if a delivery is appended to a route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Index of the delivery in the run's delivery list.
    pub delivery: usize,
    /// Kilometers from the current location.
    pub distance: f64,
    /// Minutes of driving from the current location.
    pub travel_time: f64,
    /// Arrival before any wait.
    pub arrival: f64,
    /// Minutes waited for the window to open.
    pub wait: f64,
    /// Departure after waiting and service.
    pub departure: f64,
    /// Return to the depot if the route ended here.
    pub return_at: f64,
    /// Load after the delivery.
    pub load: f64,
}

/// Decides whether a delivery can be appended to a vehicle's route.
///
/// Checks, in order: stop limit, capacity, time window, and vehicle shift
/// (departure plus the return leg must end by the shift end). An early
/// arrival waits for the window to open without penalty.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::{Coordinate, Delivery, Vehicle};
/// use u_dispatch::distance::DistanceMatrix;
/// use u_dispatch::evaluation::{FeasibilityChecker, RouteState};
///
/// let depot = Coordinate::new(37.7749, -122.4194);
/// let deliveries = vec![
///     Delivery::new("d1", Coordinate::new(37.7849, -122.4094)).with_demand(15.0),
/// ];
/// let dm = DistanceMatrix::for_deliveries(&depot, &deliveries);
/// let vehicle = Vehicle::new("v1").with_capacity(10.0);
///
/// let checker = FeasibilityChecker::new(&deliveries, &dm, &vehicle, 40.0);
/// let state = RouteState::start(&vehicle);
/// assert!(!checker.is_feasible(&state, 0));
/// ```
pub struct FeasibilityChecker<'a> {
    deliveries: &'a [Delivery],
    distances: &'a DistanceMatrix,
    vehicle: &'a Vehicle,
    base_speed_kmh: f64,
}

impl<'a> FeasibilityChecker<'a> {
    /// Creates a checker for one vehicle over one run's deliveries.
    pub fn new(
        deliveries: &'a [Delivery],
        distances: &'a DistanceMatrix,
        vehicle: &'a Vehicle,
        base_speed_kmh: f64,
    ) -> Self {
        Self {
            deliveries,
            distances,
            vehicle,
            base_speed_kmh,
        }
    }

    /// The vehicle being checked.
    pub fn vehicle(&self) -> &Vehicle {
        self.vehicle
    }

    /// Minutes to drive `distance_km` in this vehicle.
    pub fn minutes_for(&self, distance_km: f64) -> f64 {
        travel_time(distance_km, self.vehicle.speed_factor(), self.base_speed_kmh)
    }

    /// Projects appending `delivery` without judging it.
    pub fn project(&self, state: &RouteState, delivery: usize) -> Projection {
        let target = &self.deliveries[delivery];
        let node = DistanceMatrix::node(delivery);

        let distance = self.distances.get(state.node, node);
        let travel = self.minutes_for(distance);
        let arrival = state.time + travel;
        let wait = target
            .time_window()
            .map_or(0.0, |tw| tw.waiting_time(arrival));
        let departure = arrival + wait + target.service_time();
        let return_at = departure + self.minutes_for(self.distances.get(node, DEPOT));

        Projection {
            delivery,
            distance,
            travel_time: travel,
            arrival,
            wait,
            departure,
            return_at,
            load: state.load + target.demand(),
        }
    }

    /// Projects appending `delivery`, or explains why it cannot be appended.
    pub fn check(&self, state: &RouteState, delivery: usize) -> Result<Projection, Infeasibility> {
        if let Some(max_stops) = self.vehicle.max_stops() {
            if state.stops >= max_stops {
                return Err(Infeasibility::StopLimitReached { max_stops });
            }
        }

        let projection = self.project(state, delivery);

        if let Some(capacity) = self.vehicle.capacity() {
            if projection.load > capacity {
                return Err(Infeasibility::CapacityExceeded {
                    load: projection.load,
                    capacity,
                });
            }
        }

        if let Some(tw) = self.deliveries[delivery].time_window() {
            if tw.is_violated(projection.arrival) {
                return Err(Infeasibility::TimeWindowClosed {
                    arrival: projection.arrival,
                    due: tw.due(),
                });
            }
        }

        if projection.return_at > self.vehicle.end_time() {
            return Err(Infeasibility::ShiftExceeded {
                return_at: projection.return_at,
                shift_end: self.vehicle.end_time(),
            });
        }

        Ok(projection)
    }

    /// Returns `true` if `delivery` can be appended.
    pub fn is_feasible(&self, state: &RouteState, delivery: usize) -> bool {
        self.check(state, delivery).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Coordinate, TimeWindow};

    const SPEED: f64 = 40.0;

    // Roughly 1.11 km per 0.01 degree of latitude near the equator.
    fn setup() -> (Vec<Delivery>, DistanceMatrix) {
        let depot = Coordinate::new(0.0, 0.0);
        let deliveries = vec![
            Delivery::new("near", Coordinate::new(0.01, 0.0)).with_demand(10.0),
            Delivery::new("far", Coordinate::new(0.5, 0.0)).with_demand(15.0),
        ];
        let dm = DistanceMatrix::for_deliveries(&depot, &deliveries);
        (deliveries, dm)
    }

    #[test]
    fn test_feasible_projection() {
        let (deliveries, dm) = setup();
        let vehicle = Vehicle::new("v").with_capacity(100.0);
        let checker = FeasibilityChecker::new(&deliveries, &dm, &vehicle, SPEED);
        let state = RouteState::start(&vehicle);
        let p = checker.check(&state, 0).expect("feasible");
        let travel = dm.get(DEPOT, 1) / SPEED * 60.0;
        assert!((p.arrival - (480.0 + travel)).abs() < 1e-10);
        assert!((p.departure - (p.arrival + 5.0)).abs() < 1e-10);
        assert!((p.return_at - (p.departure + travel)).abs() < 1e-10);
        assert_eq!(p.load, 10.0);
    }

    #[test]
    fn test_capacity() {
        let (deliveries, dm) = setup();
        let vehicle = Vehicle::new("v").with_capacity(12.0);
        let checker = FeasibilityChecker::new(&deliveries, &dm, &vehicle, SPEED);
        let state = RouteState::start(&vehicle);
        assert!(checker.is_feasible(&state, 0));
        assert!(matches!(
            checker.check(&state, 1),
            Err(Infeasibility::CapacityExceeded { capacity, .. }) if capacity == 12.0
        ));
    }

    #[test]
    fn test_unbounded_capacity() {
        let (deliveries, dm) = setup();
        let vehicle = Vehicle::new("v");
        let checker = FeasibilityChecker::new(&deliveries, &dm, &vehicle, SPEED);
        let mut state = RouteState::start(&vehicle);
        state.load = 1.0e9;
        assert!(checker.is_feasible(&state, 1));
    }

    #[test]
    fn test_stop_limit() {
        let (deliveries, dm) = setup();
        let vehicle = Vehicle::new("v").with_max_stops(1);
        let checker = FeasibilityChecker::new(&deliveries, &dm, &vehicle, SPEED);
        let mut state = RouteState::start(&vehicle);
        let p = checker.check(&state, 0).expect("first stop fits");
        state.advance(&p);
        assert_eq!(
            checker.check(&state, 1),
            Err(Infeasibility::StopLimitReached { max_stops: 1 })
        );
    }

    #[test]
    fn test_time_window_closed() {
        let depot = Coordinate::new(0.0, 0.0);
        // ~55.6 km away: 83 minutes at 40 km/h, so arrival is ~09:23.
        let deliveries = vec![Delivery::new("late", Coordinate::new(0.5, 0.0))
            .with_time_window(TimeWindow::parse("09:00", "09:15").expect("valid"))];
        let dm = DistanceMatrix::for_deliveries(&depot, &deliveries);
        let vehicle = Vehicle::new("v");
        let checker = FeasibilityChecker::new(&deliveries, &dm, &vehicle, SPEED);
        let state = RouteState::start(&vehicle);
        assert!(matches!(
            checker.check(&state, 0),
            Err(Infeasibility::TimeWindowClosed { .. })
        ));
    }

    #[test]
    fn test_early_arrival_waits() {
        let (deliveries, dm) = setup();
        let deliveries = vec![deliveries[0]
            .clone()
            .with_time_window(TimeWindow::parse("10:00", "11:00").expect("valid"))];
        let vehicle = Vehicle::new("v");
        let checker = FeasibilityChecker::new(&deliveries, &dm, &vehicle, SPEED);
        let state = RouteState::start(&vehicle);
        let p = checker.check(&state, 0).expect("wait is allowed");
        assert!((p.arrival + p.wait - 600.0).abs() < 1e-10);
        assert!((p.departure - 605.0).abs() < 1e-10);
    }

    #[test]
    fn test_shift_end() {
        let (deliveries, dm) = setup();
        // 55.6 km each way is ~83 minutes; a 2-hour shift cannot fit both legs.
        let vehicle = Vehicle::new("v").with_shift(480.0, 600.0);
        let checker = FeasibilityChecker::new(&deliveries, &dm, &vehicle, SPEED);
        let state = RouteState::start(&vehicle);
        assert!(checker.is_feasible(&state, 0));
        assert!(matches!(
            checker.check(&state, 1),
            Err(Infeasibility::ShiftExceeded { .. })
        ));
    }

    #[test]
    fn test_speed_factor_shortens_travel() {
        let (deliveries, dm) = setup();
        let slow = Vehicle::new("slow");
        let fast = Vehicle::new("fast").with_speed_factor(2.0);
        let slow_p = FeasibilityChecker::new(&deliveries, &dm, &slow, SPEED)
            .project(&RouteState::start(&slow), 1);
        let fast_p = FeasibilityChecker::new(&deliveries, &dm, &fast, SPEED)
            .project(&RouteState::start(&fast), 1);
        assert!((slow_p.travel_time - 2.0 * fast_p.travel_time).abs() < 1e-10);
    }
}
