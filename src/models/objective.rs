//! Optimization objectives.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// The goal that parameterizes the greedy selection rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Objective {
    /// Pick the nearest feasible delivery; fill vehicles one at a time.
    #[default]
    MinimizeDistance,
    /// Pick the delivery reachable soonest, counting time-window waits.
    MinimizeTime,
    /// Pick the nearest delivery, but always extend the least-loaded vehicle.
    BalanceRoutes,
}

impl Objective {
    /// Wire name of this objective.
    pub fn as_str(&self) -> &'static str {
        match self {
            Objective::MinimizeDistance => "minimize_distance",
            Objective::MinimizeTime => "minimize_time",
            Objective::BalanceRoutes => "balance_routes",
        }
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Objective {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "minimize_distance" => Ok(Objective::MinimizeDistance),
            "minimize_time" => Ok(Objective::MinimizeTime),
            "balance_routes" => Ok(Objective::BalanceRoutes),
            other => Err(ValidationError::UnknownObjective(other.to_string())),
        }
    }
}
