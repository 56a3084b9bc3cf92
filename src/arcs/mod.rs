//! Water-arc geometry: shoreline sampling, ray fans, and land/water
//! clipping.
//!
//! This is the upstream side of the fetch analysis. A shoreline polyline
//! is split into segments with midpoint sample points; every sample
//! point gets a 16-direction ray fan of a configured maximum length; and
//! each ray is clipped against the study area's land polygons, yielding
//! the open-water lengths the classifier consumes.
//!
//! Everything here works on explicit geometry handles in a planar CRS
//! (meters); there is no ambient workspace state.

mod cast;
mod mask;
mod sample;

pub use cast::{Ray, RayCaster, DEFAULT_RAY_LENGTH_M, HIGH_FETCH_CAPTURE_MIN_M};
pub use mask::{LandWaterMask, MIN_OPEN_WATER_M};
pub use sample::{sample_shoreline, SampledSegment};

use thiserror::Error;

/// Error type for water-arc geometry.
#[derive(Debug, Error)]
pub enum ArcError {
    /// Sample spacing must be positive.
    #[error("Invalid sample spacing: {0} m")]
    InvalidSpacing(f64),

    /// Shoreline has fewer than two vertices or zero length.
    #[error("Shoreline polyline is degenerate")]
    DegenerateShoreline,

    /// Configured ray length cannot capture the high-exposure band.
    #[error("Ray length {meters} m too short; must exceed {minimum} m")]
    RayTooShort {
        /// The rejected length.
        meters: f64,
        /// Minimum acceptable length.
        minimum: f64,
    },
}
