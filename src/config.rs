//! Engine configuration.

use serde::{Deserialize, Serialize};

use crate::distance::DEFAULT_BASE_SPEED_KMH;
use crate::error::ValidationError;

/// Environment variable overriding [`EngineConfig::base_speed_kmh`].
pub const ENV_BASE_SPEED: &str = "U_DISPATCH_BASE_SPEED_KMH";

/// Environment variable holding the external maps credential.
pub const ENV_MAPS_API_KEY: &str = "U_DISPATCH_MAPS_API_KEY";

/// Settings shared by every run of a [`RouteEngine`](crate::engine::RouteEngine).
///
/// # Examples
///
/// ```
/// use u_dispatch::config::EngineConfig;
///
/// let config = EngineConfig::default()
///     .with_base_speed_kmh(30.0)
///     .with_comparison(false);
/// assert_eq!(config.base_speed_kmh, 30.0);
/// assert!(!config.include_comparison);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Average urban delivery speed in km/h before the vehicle speed factor.
    pub base_speed_kmh: f64,
    /// Run the three-scenario comparison alongside each optimization.
    pub include_comparison: bool,
    /// Credential for the external maps comparison. Only its presence is
    /// inspected by the engine.
    #[serde(skip_serializing)]
    pub maps_api_key: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_speed_kmh: DEFAULT_BASE_SPEED_KMH,
            include_comparison: true,
            maps_api_key: None,
        }
    }
}

impl EngineConfig {
    /// Reads overrides from the process environment.
    ///
    /// Unparseable or non-positive speeds are ignored with a warning.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(raw) = lookup(ENV_BASE_SPEED) {
            match raw.trim().parse::<f64>() {
                Ok(speed) if speed > 0.0 && speed.is_finite() => config.base_speed_kmh = speed,
                _ => log::warn!("ignoring {ENV_BASE_SPEED}={raw:?}: expected a positive number"),
            }
        }
        config.maps_api_key = lookup(ENV_MAPS_API_KEY)
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());
        config
    }

    /// Sets the base speed in km/h.
    pub fn with_base_speed_kmh(mut self, speed: f64) -> Self {
        self.base_speed_kmh = speed;
        self
    }

    /// Enables or disables the scenario comparison.
    pub fn with_comparison(mut self, enabled: bool) -> Self {
        self.include_comparison = enabled;
        self
    }

    /// Sets the external maps credential.
    pub fn with_maps_api_key(mut self, key: impl Into<String>) -> Self {
        self.maps_api_key = Some(key.into());
        self
    }

    /// Rejects settings the engine cannot run with.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.base_speed_kmh.is_finite() || self.base_speed_kmh <= 0.0 {
            return Err(ValidationError::NonPositiveBaseSpeed {
                speed: self.base_speed_kmh,
            });
        }
        Ok(())
    }

    /// Returns `true` if an external maps credential is configured.
    pub fn has_maps_key(&self) -> bool {
        self.maps_api_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = EngineConfig::default();
        assert_eq!(c.base_speed_kmh, DEFAULT_BASE_SPEED_KMH);
        assert!(c.include_comparison);
        assert!(!c.has_maps_key());
    }

    #[test]
    fn test_from_lookup() {
        let c = EngineConfig::from_lookup(|key| match key {
            ENV_BASE_SPEED => Some("25".to_string()),
            ENV_MAPS_API_KEY => Some(" secret ".to_string()),
            _ => None,
        });
        assert_eq!(c.base_speed_kmh, 25.0);
        assert_eq!(c.maps_api_key.as_deref(), Some("secret"));
    }

    #[test]
    fn test_from_lookup_ignores_bad_values() {
        let c = EngineConfig::from_lookup(|key| match key {
            ENV_BASE_SPEED => Some("-3".to_string()),
            ENV_MAPS_API_KEY => Some("   ".to_string()),
            _ => None,
        });
        assert_eq!(c.base_speed_kmh, DEFAULT_BASE_SPEED_KMH);
        assert!(!c.has_maps_key());
    }

    #[test]
    fn test_validate_base_speed() {
        assert!(EngineConfig::default().validate().is_ok());
        for speed in [0.0, -40.0, f64::NAN, f64::INFINITY] {
            let c = EngineConfig::default().with_base_speed_kmh(speed);
            assert!(matches!(
                c.validate(),
                Err(ValidationError::NonPositiveBaseSpeed { .. })
            ));
        }
    }

    #[test]
    fn test_deserialize_partial() {
        let c: EngineConfig = serde_json::from_str(r#"{"base_speed_kmh": 35.0}"#).expect("valid");
        assert_eq!(c.base_speed_kmh, 35.0);
        assert!(c.include_comparison);
    }
}
