//! The 16-point compass used for fetch rays.
//!
//! Each shoreline sample point gets one ray per compass direction. The
//! direction set, its labels, and its azimuths live in a single table so
//! ray construction, table I/O, and classification all agree on the same
//! enumeration.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Number of compass directions in the ray fan.
pub const DIRECTION_COUNT: usize = 16;

/// One of the 16 compass directions, in compass order starting at north.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum CompassDirection {
    N,
    Nne,
    Ne,
    Ene,
    E,
    Ese,
    Se,
    Sse,
    S,
    Ssw,
    Sw,
    Wsw,
    W,
    Wnw,
    Nw,
    Nnw,
}

/// Direction table: (direction, lowercase label, azimuth in degrees
/// clockwise from north).
const DIRECTION_TABLE: [(CompassDirection, &str, f64); DIRECTION_COUNT] = [
    (CompassDirection::N, "n", 0.0),
    (CompassDirection::Nne, "nne", 22.5),
    (CompassDirection::Ne, "ne", 45.0),
    (CompassDirection::Ene, "ene", 67.5),
    (CompassDirection::E, "e", 90.0),
    (CompassDirection::Ese, "ese", 112.5),
    (CompassDirection::Se, "se", 135.0),
    (CompassDirection::Sse, "sse", 157.5),
    (CompassDirection::S, "s", 180.0),
    (CompassDirection::Ssw, "ssw", 202.5),
    (CompassDirection::Sw, "sw", 225.0),
    (CompassDirection::Wsw, "wsw", 247.5),
    (CompassDirection::W, "w", 270.0),
    (CompassDirection::Wnw, "wnw", 292.5),
    (CompassDirection::Nw, "nw", 315.0),
    (CompassDirection::Nnw, "nnw", 337.5),
];

/// Error parsing a compass direction label.
#[derive(Debug, Error)]
#[error("Unknown compass direction: {0}")]
pub struct ParseDirectionError(pub String);

impl CompassDirection {
    /// All 16 directions in compass order (N first, clockwise).
    pub fn all() -> impl Iterator<Item = CompassDirection> {
        DIRECTION_TABLE.iter().map(|&(d, _, _)| d)
    }

    /// Index of this direction in compass order (N = 0 ... NNW = 15).
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Direction at a given compass-order index.
    ///
    /// # Panics
    /// Panics if `index >= 16`.
    pub fn from_index(index: usize) -> Self {
        DIRECTION_TABLE[index].0
    }

    /// Lowercase label used in attribute tables ("n", "nne", ...).
    pub fn label(self) -> &'static str {
        DIRECTION_TABLE[self.index()].1
    }

    /// Azimuth in degrees clockwise from north.
    pub fn azimuth_degrees(self) -> f64 {
        DIRECTION_TABLE[self.index()].2
    }

    /// Planar unit vector (east, north) for this direction.
    ///
    /// Azimuths are measured clockwise from north, so east = sin(az),
    /// north = cos(az).
    pub fn unit_vector(self) -> (f64, f64) {
        let az = self.azimuth_degrees().to_radians();
        (az.sin(), az.cos())
    }
}

impl fmt::Display for CompassDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CompassDirection {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        DIRECTION_TABLE
            .iter()
            .find(|(_, label, _)| *label == lower)
            .map(|&(d, _, _)| d)
            .ok_or_else(|| ParseDirectionError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_covers_full_circle() {
        let azimuths: Vec<f64> = CompassDirection::all()
            .map(|d| d.azimuth_degrees())
            .collect();
        assert_eq!(azimuths.len(), DIRECTION_COUNT);

        // 22.5 degree spacing, starting at north
        for (i, az) in azimuths.iter().enumerate() {
            assert_eq!(*az, i as f64 * 22.5);
        }
    }

    #[test]
    fn test_index_round_trip() {
        for d in CompassDirection::all() {
            assert_eq!(CompassDirection::from_index(d.index()), d);
        }
    }

    #[test]
    fn test_label_round_trip() {
        for d in CompassDirection::all() {
            let parsed: CompassDirection = d.label().parse().unwrap();
            assert_eq!(parsed, d);
        }
        assert!("north".parse::<CompassDirection>().is_err());
    }

    #[test]
    fn test_unit_vectors() {
        let (e, n) = CompassDirection::N.unit_vector();
        assert!(e.abs() < 1e-12);
        assert!((n - 1.0).abs() < 1e-12);

        let (e, n) = CompassDirection::E.unit_vector();
        assert!((e - 1.0).abs() < 1e-12);
        assert!(n.abs() < 1e-12);

        let (e, n) = CompassDirection::Sw.unit_vector();
        assert!((e + std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);
        assert!((n + std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);
    }
}
