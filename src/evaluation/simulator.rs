//! Forward simulation of a sequenced route.

use crate::distance::{compass_directions, travel_time, DistanceMatrix, DEPOT};
use crate::models::{Coordinate, Delivery, Route, Stop, Vehicle};

/// Replays a delivery sequence from the depot, producing stop records.
///
/// For each stop it derives travel from the previous location, arrival, any
/// wait for the window to open, departure, and cumulative distance and load;
/// the return leg then closes the route. The vehicle leaves the depot at its
/// shift start, or later if that only means waiting at the first stop.
///
/// Time windows are not enforced here: an over-late arrival is simulated as
/// is. The route builder only hands over feasible sequences.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::{Coordinate, Delivery, Vehicle};
/// use u_dispatch::distance::DistanceMatrix;
/// use u_dispatch::evaluation::RouteSimulator;
///
/// let depot = Coordinate::new(37.7749, -122.4194);
/// let deliveries = vec![
///     Delivery::new("d1", Coordinate::new(37.7849, -122.4094)).with_demand(10.0),
///     Delivery::new("d2", Coordinate::new(37.80, -122.40)).with_demand(15.0),
/// ];
/// let dm = DistanceMatrix::for_deliveries(&depot, &deliveries);
/// let vehicle = Vehicle::new("v1").with_capacity(100.0);
///
/// let sim = RouteSimulator::new(&depot, &deliveries, &dm, &vehicle, 40.0);
/// let route = sim.simulate(&[0, 1]);
/// assert_eq!(route.len(), 2);
/// assert_eq!(route.total_load(), 25.0);
/// assert!((route.utilization() - 0.25).abs() < 1e-10);
/// ```
pub struct RouteSimulator<'a> {
    depot: &'a Coordinate,
    deliveries: &'a [Delivery],
    distances: &'a DistanceMatrix,
    vehicle: &'a Vehicle,
    base_speed_kmh: f64,
}

impl<'a> RouteSimulator<'a> {
    /// Creates a simulator for one vehicle over one run's deliveries.
    pub fn new(
        depot: &'a Coordinate,
        deliveries: &'a [Delivery],
        distances: &'a DistanceMatrix,
        vehicle: &'a Vehicle,
        base_speed_kmh: f64,
    ) -> Self {
        Self {
            depot,
            deliveries,
            distances,
            vehicle,
            base_speed_kmh,
        }
    }

    fn minutes_for(&self, distance_km: f64) -> f64 {
        travel_time(distance_km, self.vehicle.speed_factor(), self.base_speed_kmh)
    }

    /// Departure from the depot for a sequence starting with `first`.
    fn departure(&self, first: Option<usize>) -> f64 {
        let shift_start = self.vehicle.start_time();
        let Some(first) = first else {
            return shift_start;
        };
        let lead = self.minutes_for(self.distances.get(DEPOT, DistanceMatrix::node(first)));
        self.deliveries[first]
            .time_window()
            .map_or(shift_start, |tw| shift_start.max(tw.ready() - lead))
    }

    /// Simulates the given sequence of delivery indices.
    pub fn simulate(&self, sequence: &[usize]) -> Route {
        let mut route = Route::new(self.vehicle.id())
            .with_vehicle_name(self.vehicle.name().map(str::to_string));

        let start = self.departure(sequence.first().copied());
        let mut current_time = start;
        let mut current_load = 0.0;
        let mut cumulative_distance = 0.0;
        let mut prev_node = DEPOT;
        let mut prev_location = *self.depot;

        for (position, &index) in sequence.iter().enumerate() {
            let delivery = &self.deliveries[index];
            let node = DistanceMatrix::node(index);

            let leg = self.distances.get(prev_node, node);
            cumulative_distance += leg;
            let arrival = current_time + self.minutes_for(leg);
            let wait = delivery
                .time_window()
                .map_or(0.0, |tw| tw.waiting_time(arrival));
            let departure = arrival + wait + delivery.service_time();
            current_load += delivery.demand();

            route.push_stop(Stop {
                sequence: position + 1,
                delivery_id: delivery.id().to_string(),
                location: delivery.location(),
                address: delivery.address().map(str::to_string),
                name: delivery.name().map(str::to_string),
                arrival_time: arrival,
                wait_time: wait,
                departure_time: departure,
                cumulative_distance,
                cumulative_load: current_load,
                directions: compass_directions(&prev_location, &delivery.location(), leg),
            });

            current_time = departure;
            prev_node = node;
            prev_location = delivery.location();
        }

        let return_leg = self.distances.get(prev_node, DEPOT);
        let end = current_time + self.minutes_for(return_leg);

        route.set_total_distance(cumulative_distance + return_leg);
        route.set_schedule(start, end);
        route.set_capacity(self.vehicle.capacity());
        route
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimeWindow;

    const SPEED: f64 = 40.0;

    fn setup() -> (Coordinate, Vec<Delivery>, DistanceMatrix) {
        let depot = Coordinate::new(0.0, 0.0);
        let deliveries = vec![
            Delivery::new("a", Coordinate::new(0.1, 0.0)).with_demand(10.0),
            Delivery::new("b", Coordinate::new(0.2, 0.0)).with_demand(20.0),
            Delivery::new("c", Coordinate::new(0.2, 0.1)).with_demand(15.0),
        ];
        let dm = DistanceMatrix::for_deliveries(&depot, &deliveries);
        (depot, deliveries, dm)
    }

    #[test]
    fn test_simulate_empty() {
        let (depot, deliveries, dm) = setup();
        let vehicle = Vehicle::new("v");
        let sim = RouteSimulator::new(&depot, &deliveries, &dm, &vehicle, SPEED);
        let route = sim.simulate(&[]);
        assert!(route.is_empty());
        assert_eq!(route.total_distance(), 0.0);
        assert_eq!(route.total_time(), 0.0);
    }

    #[test]
    fn test_simulate_single() {
        let (depot, deliveries, dm) = setup();
        let vehicle = Vehicle::new("v");
        let sim = RouteSimulator::new(&depot, &deliveries, &dm, &vehicle, SPEED);
        let route = sim.simulate(&[0]);
        let leg = dm.get(DEPOT, 1);
        assert!((route.total_distance() - 2.0 * leg).abs() < 1e-10);
        let expected_time = 2.0 * leg / SPEED * 60.0 + 5.0;
        assert!((route.total_time() - expected_time).abs() < 1e-10);
        assert_eq!(route.stops()[0].sequence, 1);
        assert_eq!(route.utilization(), 0.0);
    }

    #[test]
    fn test_timing_chain() {
        let (depot, deliveries, dm) = setup();
        let vehicle = Vehicle::new("v");
        let sim = RouteSimulator::new(&depot, &deliveries, &dm, &vehicle, SPEED);
        let route = sim.simulate(&[0, 1, 2]);
        let stops = route.stops();
        for pair in stops.windows(2) {
            let leg = pair[1].cumulative_distance - pair[0].cumulative_distance;
            let expected = pair[0].departure_time + leg / SPEED * 60.0;
            assert!((pair[1].arrival_time - expected).abs() < 1e-9);
            assert!(pair[1].cumulative_distance >= pair[0].cumulative_distance);
        }
        assert_eq!(
            stops.iter().map(|s| s.sequence).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(route.total_load(), 45.0);
    }

    #[test]
    fn test_waiting_mid_route() {
        let (depot, mut deliveries, dm) = setup();
        deliveries[1] = deliveries[1]
            .clone()
            .with_time_window(TimeWindow::parse("12:00", "13:00").expect("valid"));
        let vehicle = Vehicle::new("v");
        let sim = RouteSimulator::new(&depot, &deliveries, &dm, &vehicle, SPEED);
        let route = sim.simulate(&[0, 1]);
        let second = &route.stops()[1];
        assert!(second.wait_time > 0.0);
        assert!((second.service_start() - 720.0).abs() < 1e-10);
        assert!((second.departure_time - 725.0).abs() < 1e-10);
    }

    #[test]
    fn test_delayed_departure_for_first_window() {
        let (depot, mut deliveries, dm) = setup();
        deliveries[0] = deliveries[0]
            .clone()
            .with_time_window(TimeWindow::parse("10:00", "10:30").expect("valid"));
        let vehicle = Vehicle::new("v");
        let sim = RouteSimulator::new(&depot, &deliveries, &dm, &vehicle, SPEED);
        let route = sim.simulate(&[0]);
        let first = &route.stops()[0];
        assert!(first.wait_time.abs() < 1e-9);
        assert!((first.arrival_time - 600.0).abs() < 1e-9);
        assert!(route.start_time() > vehicle.start_time());
        let leg = dm.get(DEPOT, 1) / SPEED * 60.0;
        assert!((route.total_time() - (2.0 * leg + 5.0)).abs() < 1e-9);
    }

    #[test]
    fn test_utilization_with_capacity() {
        let (depot, deliveries, dm) = setup();
        let vehicle = Vehicle::new("v").with_capacity(90.0);
        let sim = RouteSimulator::new(&depot, &deliveries, &dm, &vehicle, SPEED);
        let route = sim.simulate(&[2, 0]);
        assert!((route.utilization() - 25.0 / 90.0).abs() < 1e-10);
        assert_eq!(route.delivery_ids(), vec!["c", "a"]);
    }
}
