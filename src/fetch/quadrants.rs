//! Quadrant ray statistics and maximum-quadrant resolution.

use crate::types::{Quadrant, MAX_QUAD_OVERWRITE_ORDER};

use super::rays::RaySet;

/// Ray statistics for one quadrant of one sample point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadrantStats {
    /// Which quadrant these statistics describe.
    pub quadrant: Quadrant,
    /// Number of the quadrant's 5 directions with a ray value.
    pub count: usize,
    /// Arithmetic mean of the present ray lengths; 0.0 when count = 0.
    pub mean: f64,
}

/// Decimal places used when comparing quadrant means for equality.
///
/// The classification stores means to 4 decimal places, so every
/// "mean equals maximum" test goes through this rounding.
pub const MEAN_ROUND_DECIMALS: i32 = 4;

/// Round to the mean-comparison precision (4 decimal places).
#[inline]
pub fn round_mean(value: f64) -> f64 {
    let scale = 10f64.powi(MEAN_ROUND_DECIMALS);
    (value * scale).round() / scale
}

/// Compute count and mean for every quadrant of a ray set.
///
/// Returned in storage order (NE, SE, SW, NW). Boundary cardinals
/// contribute to both of their quadrants.
pub fn quadrant_stats(rays: &RaySet) -> [QuadrantStats; 4] {
    let mut stats = [QuadrantStats {
        quadrant: Quadrant::Ne,
        count: 0,
        mean: 0.0,
    }; 4];

    for quadrant in Quadrant::all() {
        let mut count = 0usize;
        let mut sum = 0.0f64;
        for direction in quadrant.directions() {
            if let Some(length) = rays.get(direction) {
                count += 1;
                sum += length;
            }
        }
        stats[quadrant.index()] = QuadrantStats {
            quadrant,
            count,
            mean: if count > 0 { sum / count as f64 } else { 0.0 },
        };
    }

    stats
}

/// The greatest of the four quadrant means.
pub fn max_quadrant_mean(stats: &[QuadrantStats; 4]) -> f64 {
    stats.iter().fold(0.0f64, |acc, s| acc.max(s.mean))
}

/// Resolve which quadrant holds a given maximum mean.
///
/// Evaluates NE, SW, SE, NW in that fixed order and overwrites the result
/// on every rounded-equality match, so when several quadrants tie the
/// last match in that order wins. This reproduces the sequential
/// overwrite the classification bands were calibrated against.
pub fn max_quadrant_direction(stats: &[QuadrantStats; 4], max_mean: f64) -> Option<Quadrant> {
    let target = round_mean(max_mean);
    let mut winner = None;
    for quadrant in MAX_QUAD_OVERWRITE_ORDER {
        if round_mean(stats[quadrant.index()].mean) == target {
            winner = Some(quadrant);
        }
    }
    winner
}

/// Second-largest of the four quadrant means, duplicates retained.
///
/// Sorting ascending and taking the third element means a duplicated
/// maximum yields the maximum itself.
pub fn second_highest_mean(stats: &[QuadrantStats; 4]) -> f64 {
    let mut means = [
        stats[0].mean,
        stats[1].mean,
        stats[2].mean,
        stats[3].mean,
    ];
    means.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    means[2]
}
