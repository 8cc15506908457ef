//! Input-order baseline.

use crate::models::Delivery;

/// Visits every delivery in the order given, skipping no one.
///
/// This is the "no route planning" baseline: no scoring, no feasibility
/// filter. The caller simulates it on a vehicle without load limits.
///
/// # Examples
///
/// ```
/// use u_dispatch::constructive::input_order;
/// use u_dispatch::models::{Coordinate, Delivery};
///
/// let deliveries = vec![
///     Delivery::new("b", Coordinate::new(0.0, 0.0)),
///     Delivery::new("a", Coordinate::new(1.0, 1.0)),
/// ];
/// assert_eq!(input_order(&deliveries), vec![0, 1]);
/// ```
pub fn input_order(deliveries: &[Delivery]) -> Vec<usize> {
    (0..deliveries.len()).collect()
}
