//! Fetch exposure classification core.
//!
//! Given, for each shoreline sample point, the open-water length of 16
//! compass-direction rays, this module derives:
//!
//! - the longest single ray and its direction,
//! - the four quadrant ray counts and means (with the deliberate cardinal
//!   overlap between adjacent quadrants),
//! - the maximum quadrant fetch, with the single-ray override and its
//!   audit trail,
//! - a three-band exposure code (low / moderate / high).
//!
//! The whole stage is a pure batch transform: identical inputs always
//! yield identical classification records, and malformed input fails the
//! run instead of producing a partial dataset.
//!
//! # Example
//!
//! ```
//! use fetch_rs::fetch::{classify_points, ExposureThresholds, RaySet, SamplePoint};
//! use fetch_rs::types::CompassDirection;
//!
//! let mut rays = RaySet::new();
//! rays.set(CompassDirection::E, 1500.0).unwrap();
//! rays.set(CompassDirection::Se, 2000.0).unwrap();
//!
//! let points = vec![SamplePoint::new(1, 370_000.0, 4_100_000.0, rays)];
//! let classified = classify_points(&points, &ExposureThresholds::default()).unwrap();
//! println!("{}", classified[0].exposure);
//! ```

mod classify;
mod quadrants;
mod rays;

pub use classify::{
    classify_rays, ExposureThresholds, PointClassification, LOW_FETCH_MAX_M,
    MODERATE_FETCH_MAX_M, SECOND_HIGHEST_NOTE,
};
pub use quadrants::{
    max_quadrant_direction, max_quadrant_mean, quadrant_stats, round_mean, second_highest_mean,
    QuadrantStats, MEAN_ROUND_DECIMALS,
};
pub use rays::RaySet;

use log::debug;
use thiserror::Error;

use crate::types::CompassDirection;

/// Error type for the fetch classification stage.
#[derive(Debug, Error)]
pub enum FetchError {
    /// A ray length was negative or non-finite.
    #[error("Invalid ray length {meters} toward {direction}")]
    InvalidRayLength {
        /// Direction of the offending ray.
        direction: CompassDirection,
        /// The rejected value.
        meters: f64,
    },

    /// A ray length was negative or non-finite, with the point identified.
    #[error("Point {id}: invalid ray length {meters} toward {direction}")]
    InvalidPointRay {
        /// Sample point id.
        id: u32,
        /// Direction of the offending ray.
        direction: CompassDirection,
        /// The rejected value.
        meters: f64,
    },

    /// Two sample points share an id.
    #[error("Duplicate sample point id {0}")]
    DuplicateId(u32),
}

/// One shoreline sample location with its ray lengths.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SamplePoint {
    /// Stable integer id, shared with the corresponding shoreline segment.
    pub id: u32,
    /// Easting in the working planar CRS (meters).
    pub x: f64,
    /// Northing in the working planar CRS (meters).
    pub y: f64,
    /// Open-water ray lengths.
    pub rays: RaySet,
}

impl SamplePoint {
    /// Create a sample point.
    pub fn new(id: u32, x: f64, y: f64, rays: RaySet) -> Self {
        Self { id, x, y, rays }
    }
}

/// Classify a batch of sample points.
///
/// Validates every ray set up front (the whole run fails on the first
/// negative or non-finite length, or on a duplicate id) and then applies
/// [`classify_rays`] to each point in order. Points with no rays at all
/// are classified "point misplacement" and kept.
pub fn classify_points(
    points: &[SamplePoint],
    thresholds: &ExposureThresholds,
) -> Result<Vec<PointClassification>, FetchError> {
    validate_points(points)?;
    debug!("classifying {} sample points", points.len());
    Ok(points
        .iter()
        .map(|p| classify_rays(p.id, &p.rays, thresholds))
        .collect())
}

/// Parallel variant of [`classify_points`].
///
/// Identical output; the per-point stage is embarrassingly parallel.
#[cfg(feature = "parallel")]
pub fn classify_points_parallel(
    points: &[SamplePoint],
    thresholds: &ExposureThresholds,
) -> Result<Vec<PointClassification>, FetchError> {
    use rayon::prelude::*;

    validate_points(points)?;
    debug!("classifying {} sample points (parallel)", points.len());
    Ok(points
        .par_iter()
        .map(|p| classify_rays(p.id, &p.rays, thresholds))
        .collect())
}

fn validate_points(points: &[SamplePoint]) -> Result<(), FetchError> {
    let mut seen = std::collections::HashSet::with_capacity(points.len());
    for point in points {
        if !seen.insert(point.id) {
            return Err(FetchError::DuplicateId(point.id));
        }
        point.rays.validate().map_err(|e| match e {
            FetchError::InvalidRayLength { direction, meters } => FetchError::InvalidPointRay {
                id: point.id,
                direction,
                meters,
            },
            other => other,
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CompassDirection::*;
    use crate::types::ExposureCode;

    #[test]
    fn test_batch_keeps_order_and_empty_points() {
        let mut rays = RaySet::new();
        rays.set(E, 5000.0).unwrap();

        let points = vec![
            SamplePoint::new(3, 0.0, 0.0, rays),
            SamplePoint::new(4, 25.0, 0.0, RaySet::new()),
        ];
        let out = classify_points(&points, &ExposureThresholds::default()).unwrap();

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].id, 3);
        assert_eq!(out[1].id, 4);
        assert_eq!(out[1].exposure, ExposureCode::PointMisplacement);
    }

    #[test]
    fn test_duplicate_id_fails_run() {
        let points = vec![
            SamplePoint::new(1, 0.0, 0.0, RaySet::new()),
            SamplePoint::new(1, 25.0, 0.0, RaySet::new()),
        ];
        let err = classify_points(&points, &ExposureThresholds::default()).unwrap_err();
        assert!(matches!(err, FetchError::DuplicateId(1)));
    }
}
