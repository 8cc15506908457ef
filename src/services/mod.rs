//! Injectable external collaborators.
//!
//! The engine never performs I/O. Callers plug in implementations of these
//! traits; failures degrade the output and never fail an optimization.

mod geometry;
mod maps;

pub use geometry::{
    attach_geometries, decode_polyline, encode_polyline, waypoints, GeometryError,
    GeometrySource, RoadGeometryProvider, RouteGeometry,
};
pub use maps::{MapsComparison, MapsComparisonProvider, MapsError, MapsStatus};
