//! Configuration management for the `TrailPlan` planner
//!
//! Handles loading configuration from an optional file plus environment
//! variables, and validates all settings before the planner is built.

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::PlannerError;
use crate::Result;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// External conditions provider settings
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// External conditions provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Which implementation to use: "offline" or "http"
    #[serde(default = "default_provider_kind")]
    pub kind: String,
    /// Assumed driving speed for offline leg estimates
    #[serde(default = "default_avg_speed_kmh")]
    pub avg_speed_kmh: f64,
    /// Factor applied to great-circle distance when estimating road legs
    #[serde(default = "default_road_detour_factor")]
    pub road_detour_factor: f64,
    /// Per-request timeout for the HTTP provider, in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions
fn default_provider_kind() -> String {
    "offline".to_string()
}

fn default_avg_speed_kmh() -> f64 {
    60.0
}

fn default_road_detour_factor() -> f64 {
    1.25
}

fn default_timeout_seconds() -> u64 {
    8
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: default_provider_kind(),
            avg_speed_kmh: default_avg_speed_kmh(),
            road_detour_factor: default_road_detour_factor(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl PlannerConfig {
    /// Load configuration from an optional file and `TRAILPLAN_*`
    /// environment variables, then validate it.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path));
        } else {
            builder = builder.add_source(File::with_name("trailplan").required(false));
        }
        builder = builder.add_source(Environment::with_prefix("TRAILPLAN").separator("__"));

        let settings: Self = builder
            .build()
            .map_err(|e| PlannerError::config(format!("failed to load configuration: {e}")))?
            .try_deserialize()
            .map_err(|e| PlannerError::config(format!("invalid configuration: {e}")))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Validate all settings
    pub fn validate(&self) -> Result<()> {
        match self.provider.kind.trim().to_lowercase().as_str() {
            "offline" | "http" | "real" | "real_http" => {}
            other => {
                return Err(PlannerError::config(format!(
                    "unknown provider kind '{other}', expected 'offline' or 'http'"
                )))
            }
        }
        if self.provider.avg_speed_kmh <= 0.0 {
            return Err(PlannerError::config("avg_speed_kmh must be positive"));
        }
        if self.provider.road_detour_factor < 1.0 {
            return Err(PlannerError::config("road_detour_factor must be >= 1.0"));
        }
        if self.provider.timeout_seconds == 0 {
            return Err(PlannerError::config("timeout_seconds must be positive"));
        }
        match self.logging.level.as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => Ok(()),
            other => Err(PlannerError::config(format!("unknown log level '{other}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = PlannerConfig::default();
        config.validate().unwrap();
        assert_eq!(config.provider.kind, "offline");
        assert_eq!(config.provider.avg_speed_kmh, 60.0);
        assert_eq!(config.provider.timeout_seconds, 8);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_rejects_unknown_provider_kind() {
        let mut config = PlannerConfig::default();
        config.provider.kind = "carrier-pigeon".to_string();
        assert!(matches!(
            config.validate().unwrap_err(),
            PlannerError::Config { .. }
        ));
    }

    #[test]
    fn test_rejects_bad_numbers() {
        let mut config = PlannerConfig::default();
        config.provider.avg_speed_kmh = 0.0;
        assert!(config.validate().is_err());

        let mut config = PlannerConfig::default();
        config.provider.road_detour_factor = 0.8;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_unknown_log_level() {
        let mut config = PlannerConfig::default();
        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());
    }
}
