//! Dense distance matrix.

use super::haversine;
use crate::models::{Coordinate, Delivery};

/// Matrix index of the depot.
pub const DEPOT: usize = 0;

/// A dense n×n distance matrix in kilometers, stored in row-major order.
///
/// When built with [`DistanceMatrix::for_deliveries`] the depot sits at
/// index [`DEPOT`] and delivery `i` at index `i + 1` (see
/// [`DistanceMatrix::node`]).
///
/// # Examples
///
/// ```
/// use u_dispatch::models::{Coordinate, Delivery};
/// use u_dispatch::distance::{DistanceMatrix, DEPOT};
///
/// let depot = Coordinate::new(0.0, 0.0);
/// let deliveries = vec![Delivery::new("a", Coordinate::new(0.0, 1.0))];
/// let dm = DistanceMatrix::for_deliveries(&depot, &deliveries);
/// assert_eq!(dm.size(), 2);
/// assert!(dm.get(DEPOT, DistanceMatrix::node(0)) > 111.0);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a distance matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Computes haversine distances between every pair of coordinates.
    pub fn from_coordinates(points: &[Coordinate]) -> Self {
        let n = points.len();
        let mut dm = Self::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let d = haversine(&points[i], &points[j]);
                dm.set(i, j, d);
                dm.set(j, i, d);
            }
        }
        dm
    }

    /// Builds the matrix for one run: depot first, then deliveries in order.
    pub fn for_deliveries(depot: &Coordinate, deliveries: &[Delivery]) -> Self {
        let points: Vec<Coordinate> = std::iter::once(*depot)
            .chain(deliveries.iter().map(Delivery::location))
            .collect();
        Self::from_coordinates(&points)
    }

    /// Matrix index of the delivery at `delivery_index`.
    pub const fn node(delivery_index: usize) -> usize {
        delivery_index + 1
    }

    /// Returns the distance from location `from` to location `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    fn set(&mut self, from: usize, to: usize, distance: f64) {
        self.data[from * self.size + to] = distance;
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }
}
