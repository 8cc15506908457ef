//! Road geometry for map display.
//!
//! Geometry is fetched after optimization and never feeds back into it. When
//! the provider fails, the route is drawn as straight lines between its stops.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Coordinate, Depot, Route};

/// Coordinate precision of encoded paths (5 decimal places).
const POLYLINE_FACTOR: f64 = 1e5;

/// Failures from a [`RoadGeometryProvider`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// No credential for the routing service.
    #[error("routing service credential not configured")]
    MissingCredential,
    /// The routing service answered with an error.
    #[error("routing service error {status}: {detail}")]
    Service {
        /// HTTP-like status code.
        status: u16,
        /// Body or reason.
        detail: String,
    },
    /// The caller gave up waiting.
    #[error("routing service timed out")]
    Timeout,
    /// An encoded path could not be decoded.
    #[error("invalid polyline encoding")]
    InvalidPolyline,
}

/// Fetches a road-following path for a route.
///
/// Implementations own their I/O, cancellation, and retries.
pub trait RoadGeometryProvider: Send + Sync {
    /// Encoded path (precision 5) from the depot through every stop and back.
    fn fetch(&self, route: &Route, depot: &Depot) -> Result<String, GeometryError>;
}

/// How a [`RouteGeometry`] was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeometrySource {
    /// Returned by the routing service.
    Road,
    /// Straight lines between waypoints.
    StraightLine,
}

/// Display path for one route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteGeometry {
    /// Vehicle serving the route.
    pub vehicle_id: String,
    /// Encoded polyline.
    pub encoded_path: String,
    /// Where the path came from.
    pub source: GeometrySource,
    /// Provider error that forced the fallback, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Depot, every stop in order, depot.
pub fn waypoints(route: &Route, depot: &Depot) -> Vec<Coordinate> {
    let home = depot.location();
    std::iter::once(home)
        .chain(route.stops().iter().map(|s| s.location))
        .chain(std::iter::once(home))
        .collect()
}

/// Fetches geometry for every route, falling back to straight lines.
///
/// With no provider every route gets a straight-line path. The routes
/// themselves are never touched.
pub fn attach_geometries(
    provider: Option<&dyn RoadGeometryProvider>,
    routes: &[Route],
    depot: &Depot,
) -> Vec<RouteGeometry> {
    routes
        .iter()
        .map(|route| {
            let fetched = provider.map(|p| p.fetch(route, depot));
            match fetched {
                Some(Ok(encoded_path)) => RouteGeometry {
                    vehicle_id: route.vehicle_id().to_string(),
                    encoded_path,
                    source: GeometrySource::Road,
                    error: None,
                },
                Some(Err(err)) => {
                    log::warn!(
                        "road geometry failed for vehicle {}: {err}; using straight lines",
                        route.vehicle_id()
                    );
                    straight_line(route, depot, Some(err.to_string()))
                }
                None => straight_line(route, depot, None),
            }
        })
        .collect()
}

fn straight_line(route: &Route, depot: &Depot, error: Option<String>) -> RouteGeometry {
    RouteGeometry {
        vehicle_id: route.vehicle_id().to_string(),
        encoded_path: encode_polyline(&waypoints(route, depot)),
        source: GeometrySource::StraightLine,
        error,
    }
}

/// Encodes coordinates in the precision-5 polyline format.
///
/// ```
/// use u_dispatch::models::Coordinate;
/// use u_dispatch::services::encode_polyline;
///
/// let path = [
///     Coordinate::new(38.5, -120.2),
///     Coordinate::new(40.7, -120.95),
///     Coordinate::new(43.252, -126.453),
/// ];
/// assert_eq!(encode_polyline(&path), "_p~iF~ps|U_ulLnnqC_mqNvxq`@");
/// ```
pub fn encode_polyline(points: &[Coordinate]) -> String {
    let mut out = String::new();
    let (mut prev_lat, mut prev_lng) = (0i64, 0i64);
    for point in points {
        let lat = (point.latitude * POLYLINE_FACTOR).round() as i64;
        let lng = (point.longitude * POLYLINE_FACTOR).round() as i64;
        encode_value(lat - prev_lat, &mut out);
        encode_value(lng - prev_lng, &mut out);
        prev_lat = lat;
        prev_lng = lng;
    }
    out
}

fn encode_value(delta: i64, out: &mut String) {
    let mut v = if delta < 0 { !(delta << 1) } else { delta << 1 } as u64;
    while v >= 0x20 {
        out.push(char::from((0x20 | (v & 0x1f)) as u8 + 63));
        v >>= 5;
    }
    out.push(char::from(v as u8 + 63));
}

/// Decodes a precision-5 polyline.
pub fn decode_polyline(encoded: &str) -> Result<Vec<Coordinate>, GeometryError> {
    let bytes = encoded.as_bytes();
    let mut i = 0;
    let (mut lat, mut lng) = (0i64, 0i64);
    let mut points = Vec::new();

    while i < bytes.len() {
        lat += decode_value(bytes, &mut i)?;
        lng += decode_value(bytes, &mut i)?;
        points.push(Coordinate::new(
            lat as f64 / POLYLINE_FACTOR,
            lng as f64 / POLYLINE_FACTOR,
        ));
    }
    Ok(points)
}

fn decode_value(bytes: &[u8], i: &mut usize) -> Result<i64, GeometryError> {
    let mut shift = 0;
    let mut result = 0i64;
    loop {
        let byte = i64::from(*bytes.get(*i).ok_or(GeometryError::InvalidPolyline)?) - 63;
        if !(0..64).contains(&byte) || shift > 60 {
            return Err(GeometryError::InvalidPolyline);
        }
        *i += 1;
        result |= (byte & 0x1f) << shift;
        shift += 5;
        if byte < 0x20 {
            break;
        }
    }
    Ok(if result & 1 != 0 {
        !(result >> 1)
    } else {
        result >> 1
    })
}
