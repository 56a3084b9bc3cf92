//! Bearing-distance ray construction.

use geo::{Coord, Line};

use crate::types::CompassDirection;

use super::ArcError;

/// Default maximum ray length in meters.
pub const DEFAULT_RAY_LENGTH_M: f64 = 10_000.0;

/// Rays must exceed this length (meters) so that the "high" exposure
/// band stays reachable.
pub const HIGH_FETCH_CAPTURE_MIN_M: f64 = 3_219.0;

/// One directional ray from a sample point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    /// Compass direction of the ray.
    pub direction: CompassDirection,
    /// Ray geometry, from the sample point outward.
    pub line: Line<f64>,
}

impl Ray {
    /// Full (unclipped) length of the ray in meters.
    pub fn length_m(&self) -> f64 {
        (self.line.dx().powi(2) + self.line.dy().powi(2)).sqrt()
    }
}

/// Builds 16-direction ray fans of a fixed maximum length.
#[derive(Clone, Copy, Debug)]
pub struct RayCaster {
    length_m: f64,
}

impl RayCaster {
    /// Create a caster with the given maximum ray length.
    ///
    /// Lengths at or under [`HIGH_FETCH_CAPTURE_MIN_M`] are rejected:
    /// shorter rays cannot distinguish "high" exposure from "moderate".
    pub fn new(length_m: f64) -> Result<Self, ArcError> {
        if !length_m.is_finite() || length_m <= HIGH_FETCH_CAPTURE_MIN_M {
            return Err(ArcError::RayTooShort {
                meters: length_m,
                minimum: HIGH_FETCH_CAPTURE_MIN_M,
            });
        }
        Ok(Self { length_m })
    }

    /// Default 10 km caster.
    pub fn default_length() -> Self {
        Self {
            length_m: DEFAULT_RAY_LENGTH_M,
        }
    }

    /// Configured maximum ray length in meters.
    pub fn length_m(&self) -> f64 {
        self.length_m
    }

    /// Build the 16-direction fan around an origin.
    ///
    /// Planar bearing geometry: east = sin(azimuth), north = cos(azimuth),
    /// azimuths clockwise from grid north.
    pub fn fan(&self, origin: Coord<f64>) -> Vec<Ray> {
        CompassDirection::all()
            .map(|direction| {
                let (east, north) = direction.unit_vector();
                Ray {
                    direction,
                    line: Line::new(
                        origin,
                        Coord {
                            x: origin.x + east * self.length_m,
                            y: origin.y + north * self.length_m,
                        },
                    ),
                }
            })
            .collect()
    }
}
