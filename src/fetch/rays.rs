//! Per-point ray length records.

use crate::types::{CompassDirection, DIRECTION_COUNT};

use super::FetchError;

/// Ray lengths for one sample point, one entry per compass direction.
///
/// `None` means the ray found no open water (or was never computed); a
/// present value is the ray's open-water length in meters and is always
/// non-negative.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RaySet {
    lengths: [Option<f64>; DIRECTION_COUNT],
}

impl RaySet {
    /// Empty ray set (all directions absent).
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a raw direction-indexed array, rejecting negative and
    /// non-finite lengths.
    pub fn from_lengths(lengths: [Option<f64>; DIRECTION_COUNT]) -> Result<Self, FetchError> {
        let set = Self { lengths };
        set.validate()?;
        Ok(set)
    }

    /// Set one direction's open-water length.
    pub fn set(&mut self, direction: CompassDirection, meters: f64) -> Result<(), FetchError> {
        if !meters.is_finite() || meters < 0.0 {
            return Err(FetchError::InvalidRayLength {
                direction,
                meters,
            });
        }
        self.lengths[direction.index()] = Some(meters);
        Ok(())
    }

    /// Clear one direction (no open water).
    pub fn clear(&mut self, direction: CompassDirection) {
        self.lengths[direction.index()] = None;
    }

    /// Open-water length for one direction.
    #[inline]
    pub fn get(&self, direction: CompassDirection) -> Option<f64> {
        self.lengths[direction.index()]
    }

    /// Iterate all 16 directions with their lengths.
    pub fn iter(&self) -> impl Iterator<Item = (CompassDirection, Option<f64>)> + '_ {
        CompassDirection::all().map(move |d| (d, self.get(d)))
    }

    /// True when no direction has a value.
    pub fn is_empty(&self) -> bool {
        self.lengths.iter().all(Option::is_none)
    }

    /// Number of directions with a value.
    pub fn present_count(&self) -> usize {
        self.lengths.iter().filter(|l| l.is_some()).count()
    }

    /// Longest ray and its direction.
    ///
    /// Scans in compass order; on an exact tie the first direction wins.
    /// Returns `None` iff all 16 directions are absent.
    pub fn max_ray(&self) -> Option<(CompassDirection, f64)> {
        let mut best: Option<(CompassDirection, f64)> = None;
        for (direction, length) in self.iter() {
            if let Some(length) = length {
                match best {
                    Some((_, b)) if length <= b => {}
                    _ => best = Some((direction, length)),
                }
            }
        }
        best
    }

    /// Check every present length is finite and non-negative.
    pub fn validate(&self) -> Result<(), FetchError> {
        for (direction, length) in self.iter() {
            if let Some(meters) = length {
                if !meters.is_finite() || meters < 0.0 {
                    return Err(FetchError::InvalidRayLength { direction, meters });
                }
            }
        }
        Ok(())
    }
}
