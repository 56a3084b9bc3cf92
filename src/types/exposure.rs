//! Exposure classification codes.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Three-band wave-exposure classification of a shoreline point or
/// segment, plus the sentinel for points with no ray data at all.
///
/// Labels match the attribute values used in exported tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExposureCode {
    Low,
    Moderate,
    High,
    /// All 16 rays were absent; the sample point likely sits on land.
    PointMisplacement,
}

/// Error parsing an exposure code label.
#[derive(Debug, Error)]
#[error("Unknown exposure code: {0}")]
pub struct ParseExposureError(pub String);

impl ExposureCode {
    /// Lowercase table label ("low", "moderate", "high",
    /// "point misplacement").
    pub fn label(self) -> &'static str {
        match self {
            ExposureCode::Low => "low",
            ExposureCode::Moderate => "moderate",
            ExposureCode::High => "high",
            ExposureCode::PointMisplacement => "point misplacement",
        }
    }

    /// The three real exposure bands, excluding the misplacement sentinel.
    pub fn bands() -> [ExposureCode; 3] {
        [ExposureCode::Low, ExposureCode::Moderate, ExposureCode::High]
    }
}

impl fmt::Display for ExposureCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ExposureCode {
    type Err = ParseExposureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(ExposureCode::Low),
            "moderate" => Ok(ExposureCode::Moderate),
            "high" => Ok(ExposureCode::High),
            "point misplacement" => Ok(ExposureCode::PointMisplacement),
            other => Err(ParseExposureError(other.to_string())),
        }
    }
}
