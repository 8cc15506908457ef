//! Greedy route construction.
//!
//! - [`RouteBuilder`] — nearest-feasible-neighbor construction over the whole
//!   fleet, O(m·n²)
//! - [`SelectionStrategy`] — scoring and vehicle-order rules, one per
//!   [`Objective`](crate::models::Objective), picked with [`strategy_for`]
//! - [`input_order`] — the unplanned baseline

mod builder;
mod naive;
mod strategy;

pub use builder::{Construction, RouteBuilder};
pub use naive::input_order;
pub use strategy::{
    strategy_for, BalancedLoad, EarliestService, NearestDistance, SelectionStrategy,
    VehicleProgress,
};
