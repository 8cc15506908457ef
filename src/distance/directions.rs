//! Compass hints for route legs.

use super::MILES_PER_KM;
use crate::models::Coordinate;

/// Degree offset under which a secondary heading is not worth mentioning.
const SECONDARY_THRESHOLD_DEG: f64 = 0.001;

/// Describes a leg as a compass heading and a distance in miles.
///
/// The primary heading follows the larger of the latitude and longitude
/// offsets; a secondary heading is added when both offsets are significant.
///
/// # Examples
///
/// ```
/// use u_dispatch::models::Coordinate;
/// use u_dispatch::distance::compass_directions;
///
/// let from = Coordinate::new(37.77, -122.42);
/// let to = Coordinate::new(37.80, -122.41);
/// assert_eq!(compass_directions(&from, &to, 3.0), "Head north, then east for 1.9 miles");
/// ```
pub fn compass_directions(from: &Coordinate, to: &Coordinate, distance_km: f64) -> String {
    let d_lat = to.latitude - from.latitude;
    let d_lon = to.longitude - from.longitude;
    let north_south = if d_lat > 0.0 { "north" } else { "south" };
    let east_west = if d_lon > 0.0 { "east" } else { "west" };

    let (primary, secondary) = if d_lat.abs() > d_lon.abs() {
        (north_south, east_west)
    } else {
        (east_west, north_south)
    };
    let miles = distance_km * MILES_PER_KM;

    if d_lat.abs() > SECONDARY_THRESHOLD_DEG && d_lon.abs() > SECONDARY_THRESHOLD_DEG {
        format!("Head {primary}, then {secondary} for {miles:.1} miles")
    } else {
        format!("Head {primary} for {miles:.1} miles")
    }
}
