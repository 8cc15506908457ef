//! # u-dispatch
//!
//! Delivery route construction and fleet assignment: a deterministic greedy
//! builder over haversine distances with capacity, stop-limit, time-window,
//! and shift constraints, plus cost and before/after savings reporting.
//!
//! ## Modules
//!
//! - [`models`] — Domain types (Depot, Delivery, Vehicle, Route, request/result)
//! - [`distance`] — Haversine distance, travel time, and the distance matrix
//! - [`evaluation`] — Feasibility checking and route simulation
//! - [`constructive`] — Greedy route builder and objective strategies
//! - [`comparison`] — Cost summary and scenario comparison
//! - [`services`] — Injectable road-geometry and maps collaborators
//! - [`engine`] — End-to-end optimization entry point
//! - [`config`] — Engine configuration
//! - [`error`] — Validation and engine errors

pub mod comparison;
pub mod config;
pub mod constructive;
pub mod distance;
pub mod engine;
pub mod error;
pub mod evaluation;
pub mod models;
pub mod services;
