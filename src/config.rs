//! Analysis configuration.
//!
//! All tunable distances of the workflow in one place, loadable from a
//! TOML file so a study area can carry its parameters next to its data:
//!
//! ```toml
//! ray_length_m = 10000.0
//! point_spacing_m = 25.0
//! small_run_max_length_m = 25.1
//! endpoint_tolerance_m = 0.25
//!
//! [thresholds]
//! low_max_m = 804.67
//! moderate_max_m = 3218.69
//!
//! [datums]
//! mlw_m = -0.432
//! mhw_m = 0.259
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::arcs::DEFAULT_RAY_LENGTH_M;
use crate::fetch::ExposureThresholds;
use crate::marsh::TidalDatums;
use crate::segments::{FlagParams, ENDPOINT_TOLERANCE_M, SMALL_RUN_MAX_LENGTH_M};

/// Default shoreline sample spacing in meters.
pub const DEFAULT_POINT_SPACING_M: f64 = 25.0;

/// Error type for configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML syntax or shape error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A parameter failed validation
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Workflow parameters.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Maximum fetch ray length (meters).
    pub ray_length_m: f64,
    /// Shoreline sample spacing (meters).
    pub point_spacing_m: f64,
    /// Exposure band thresholds.
    pub thresholds: ExposureThresholds,
    /// Maximum dissolved-run length flagged for review (meters).
    pub small_run_max_length_m: f64,
    /// Endpoint tolerance for run adjacency (meters).
    pub endpoint_tolerance_m: f64,
    /// Tidal datums for the marsh classification, when that stage runs.
    pub datums: Option<TidalDatums>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            ray_length_m: DEFAULT_RAY_LENGTH_M,
            point_spacing_m: DEFAULT_POINT_SPACING_M,
            thresholds: ExposureThresholds::default(),
            small_run_max_length_m: SMALL_RUN_MAX_LENGTH_M,
            endpoint_tolerance_m: ENDPOINT_TOLERANCE_M,
            datums: None,
        }
    }
}

impl AnalysisConfig {
    /// Parse a configuration from TOML text and validate it.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: AnalysisConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a TOML file and validate it.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Self::from_toml(&fs::read_to_string(path)?)
    }

    /// Check every parameter.
    ///
    /// Rays must be long enough to reach past the moderate/high bound,
    /// otherwise "high" exposure could never be observed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.thresholds.is_valid() {
            return Err(ConfigError::Invalid(format!(
                "thresholds must be positive and ordered (low {} m, moderate {} m)",
                self.thresholds.low_max_m, self.thresholds.moderate_max_m
            )));
        }
        if !self.ray_length_m.is_finite() || self.ray_length_m <= self.thresholds.moderate_max_m {
            return Err(ConfigError::Invalid(format!(
                "ray length {} m must exceed the moderate/high bound {} m",
                self.ray_length_m, self.thresholds.moderate_max_m
            )));
        }
        if !(self.point_spacing_m > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "point spacing {} m must be positive",
                self.point_spacing_m
            )));
        }
        if !(self.small_run_max_length_m > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "small run length {} m must be positive",
                self.small_run_max_length_m
            )));
        }
        if !(self.endpoint_tolerance_m > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "endpoint tolerance {} m must be positive",
                self.endpoint_tolerance_m
            )));
        }
        if let Some(datums) = &self.datums {
            if !datums.is_valid() {
                return Err(ConfigError::Invalid(format!(
                    "tidal datums must be ordered (mlw {} m, mhw {} m)",
                    datums.mlw_m, datums.mhw_m
                )));
            }
        }
        Ok(())
    }

    /// Flagging parameters for the small-segment pass.
    pub fn flag_params(&self) -> FlagParams {
        FlagParams {
            max_length_m: self.small_run_max_length_m,
            endpoint_tolerance_m: self.endpoint_tolerance_m,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AnalysisConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.ray_length_m, 10_000.0);
        assert_eq!(config.point_spacing_m, 25.0);
        assert_eq!(config.small_run_max_length_m, 25.1);
    }

    #[test]
    fn test_toml_overrides() {
        let config = AnalysisConfig::from_toml(
            r#"
            ray_length_m = 20000.0
            point_spacing_m = 50.0

            [thresholds]
            low_max_m = 500.0
            moderate_max_m = 4000.0

            [datums]
            mlw_m = -0.432
            mhw_m = 0.259
            "#,
        )
        .unwrap();

        assert_eq!(config.ray_length_m, 20_000.0);
        assert_eq!(config.thresholds.low_max_m, 500.0);
        assert_eq!(config.datums.unwrap().mhw_m, 0.259);
        // Untouched keys keep their defaults
        assert_eq!(config.endpoint_tolerance_m, ENDPOINT_TOLERANCE_M);
    }

    #[test]
    fn test_short_rays_rejected() {
        let err = AnalysisConfig::from_toml("ray_length_m = 3000.0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_bad_datums_rejected() {
        let err = AnalysisConfig::from_toml(
            r#"
            [datums]
            mlw_m = 1.0
            mhw_m = -1.0
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}
