//! Per-point exposure classification.
//!
//! Takes one sample point's ray set through the full decision sequence:
//! maximum ray, quadrant statistics, maximum-quadrant resolution, the
//! single-ray override, and exposure thresholding. Pure functions of
//! their inputs; the pre-override values are kept for audit.

use serde::Deserialize;

use crate::types::{CompassDirection, ExposureCode, Quadrant, COUNT_ONE_CHECK_ORDER};

use super::quadrants::{
    max_quadrant_direction, max_quadrant_mean, quadrant_stats, round_mean, second_highest_mean,
    QuadrantStats,
};
use super::rays::RaySet;

/// Upper bound of the "low" exposure band in meters (~0.5 nautical mile).
pub const LOW_FETCH_MAX_M: f64 = 804.67;

/// Upper bound of the "moderate" exposure band in meters (~2 statute miles).
pub const MODERATE_FETCH_MAX_M: f64 = 3218.69;

/// Audit note recorded when a single-ray quadrant override fires.
pub const SECOND_HIGHEST_NOTE: &str = "Use second highest quad fetch";

/// Distance thresholds separating the three exposure bands.
///
/// The defaults are the Chesapeake-region class boundaries; other regions
/// or standards can override them through configuration.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExposureThresholds {
    /// Fetch at or below this is "low" (meters).
    pub low_max_m: f64,
    /// Fetch above `low_max_m` and at or below this is "moderate";
    /// anything greater is "high" (meters).
    pub moderate_max_m: f64,
}

impl Default for ExposureThresholds {
    fn default() -> Self {
        Self {
            low_max_m: LOW_FETCH_MAX_M,
            moderate_max_m: MODERATE_FETCH_MAX_M,
        }
    }
}

impl ExposureThresholds {
    /// Classify a fetch distance into an exposure band.
    ///
    /// `None` (no ray data at all) classifies as "point misplacement".
    pub fn classify(&self, fetch_m: Option<f64>) -> ExposureCode {
        match fetch_m {
            None => ExposureCode::PointMisplacement,
            Some(d) if d <= self.low_max_m => ExposureCode::Low,
            Some(d) if d <= self.moderate_max_m => ExposureCode::Moderate,
            Some(_) => ExposureCode::High,
        }
    }

    /// Thresholds must be positive and ordered.
    pub fn is_valid(&self) -> bool {
        self.low_max_m > 0.0 && self.moderate_max_m > self.low_max_m
    }
}

/// Full classification record for one sample point.
#[derive(Clone, Debug, PartialEq)]
pub struct PointClassification {
    /// Sample point id (shared with its shoreline segment).
    pub id: u32,
    /// The 16 input ray lengths.
    pub rays: RaySet,
    /// Longest single ray (meters); `None` iff all rays absent.
    pub max_fetch: Option<f64>,
    /// Direction of the longest ray.
    pub max_fetch_direction: Option<CompassDirection>,
    /// Per-quadrant counts and means (NE, SE, SW, NW storage order).
    pub quadrants: [QuadrantStats; 4],
    /// Greatest quadrant mean after the single-ray override.
    pub max_quad_fetch: Option<f64>,
    /// Quadrant holding `max_quad_fetch` after the override.
    pub max_quad_direction: Option<Quadrant>,
    /// Exposure band of `max_quad_fetch`.
    pub exposure: ExposureCode,
    /// Last quadrant (in SE, SW, NE, NW check order) with exactly one ray.
    pub quad_count_one: Option<Quadrant>,
    /// Set to [`SECOND_HIGHEST_NOTE`] when the override replaced the
    /// maximum quadrant fetch.
    pub override_note: Option<&'static str>,
    /// Maximum quadrant fetch before the override.
    pub original_max_quad_fetch: Option<f64>,
    /// Maximum quadrant before the override.
    pub original_max_quad_direction: Option<Quadrant>,
    /// Exposure band before the override.
    pub original_exposure: ExposureCode,
}

/// Classify one sample point's rays.
///
/// The ray set must already be validated (non-negative, finite). Points
/// with no rays at all are classified "point misplacement" and carried
/// through, never dropped.
pub fn classify_rays(id: u32, rays: &RaySet, thresholds: &ExposureThresholds) -> PointClassification {
    let quadrants = quadrant_stats(rays);
    let (max_fetch_direction, max_fetch) = match rays.max_ray() {
        Some((d, m)) => (Some(d), Some(m)),
        None => (None, None),
    };

    if rays.is_empty() {
        let exposure = thresholds.classify(None);
        return PointClassification {
            id,
            rays: *rays,
            max_fetch: None,
            max_fetch_direction: None,
            quadrants,
            max_quad_fetch: None,
            max_quad_direction: None,
            exposure,
            quad_count_one: None,
            override_note: None,
            original_max_quad_fetch: None,
            original_max_quad_direction: None,
            original_exposure: exposure,
        };
    }

    let mut max_quad_fetch = max_quadrant_mean(&quadrants);
    let mut max_quad_direction = max_quadrant_direction(&quadrants, max_quad_fetch);
    let mut exposure = thresholds.classify(Some(max_quad_fetch));

    // Pre-override values, captured once before the count-one checks.
    let original_max_quad_fetch = Some(max_quad_fetch);
    let original_max_quad_direction = max_quad_direction;
    let original_exposure = exposure;

    let mut quad_count_one = None;
    let mut override_note = None;

    // A quadrant mean backed by a single ray is not representative of
    // quadrant fetch; when such a mean is the maximum, fall back to the
    // second-highest mean. Checked quadrant by quadrant in SE, SW, NE,
    // NW order; every match re-resolves direction and band, so the last
    // matching quadrant determines the final state.
    for quadrant in COUNT_ONE_CHECK_ORDER {
        if quadrants[quadrant.index()].count != 1 {
            continue;
        }
        quad_count_one = Some(quadrant);
        if round_mean(quadrants[quadrant.index()].mean) == round_mean(max_quad_fetch) {
            override_note = Some(SECOND_HIGHEST_NOTE);
            max_quad_fetch = second_highest_mean(&quadrants);
            max_quad_direction = max_quadrant_direction(&quadrants, max_quad_fetch);
            exposure = thresholds.classify(Some(max_quad_fetch));
        }
    }

    PointClassification {
        id,
        rays: *rays,
        max_fetch,
        max_fetch_direction,
        quadrants,
        max_quad_fetch: Some(max_quad_fetch),
        max_quad_direction,
        exposure,
        quad_count_one,
        override_note,
        original_max_quad_fetch,
        original_max_quad_direction,
        original_exposure,
    }
}
