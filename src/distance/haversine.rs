//! Great-circle distance and travel time.

use crate::models::Coordinate;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Average urban delivery speed in km/h.
pub const DEFAULT_BASE_SPEED_KMH: f64 = 40.0;

/// Miles per kilometer.
pub const MILES_PER_KM: f64 = 0.621371;

/// Haversine distance between two coordinates in kilometers.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::Coordinate;
/// use u_dispatch::distance::haversine;
///
/// let a = Coordinate::new(0.0, 0.0);
/// let b = Coordinate::new(0.0, 1.0);
/// assert!((haversine(&a, &b) - 111.195).abs() < 1e-3);
/// ```
pub fn haversine(a: &Coordinate, b: &Coordinate) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).max(0.0).sqrt());

    EARTH_RADIUS_KM * c
}

/// Minutes needed to cover `distance_km` at `base_speed_kmh × speed_factor`.
///
/// Speed factors are validated positive with the vehicle.
///
/// ```
/// use u_dispatch::distance::travel_time;
///
/// assert!((travel_time(20.0, 1.0, 40.0) - 30.0).abs() < 1e-10);
/// assert!((travel_time(20.0, 2.0, 40.0) - 15.0).abs() < 1e-10);
/// ```
pub fn travel_time(distance_km: f64, speed_factor: f64, base_speed_kmh: f64) -> f64 {
    distance_km / (base_speed_kmh * speed_factor) * 60.0
}
