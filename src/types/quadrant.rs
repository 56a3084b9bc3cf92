//! Compass quadrants for quadrant-averaged fetch.
//!
//! Each quadrant is built from 5 of the 16 directional rays. The four
//! cardinal directions (N, E, S, W) each belong to two quadrants; the
//! overlap is deliberate and the downstream exposure bands are calibrated
//! to it, so it must not be "fixed".

use std::fmt;

use super::direction::CompassDirection;

/// One of the four 90-degree compass quadrants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Quadrant {
    Ne,
    Se,
    Sw,
    Nw,
}

/// Evaluation order for resolving the maximum quadrant: each quadrant in
/// turn overwrites the result on an equality match, so the last match in
/// this order wins.
pub const MAX_QUAD_OVERWRITE_ORDER: [Quadrant; 4] =
    [Quadrant::Ne, Quadrant::Sw, Quadrant::Se, Quadrant::Nw];

/// Evaluation order for the single-ray (count = 1) override check.
pub const COUNT_ONE_CHECK_ORDER: [Quadrant; 4] =
    [Quadrant::Se, Quadrant::Sw, Quadrant::Ne, Quadrant::Nw];

impl Quadrant {
    /// All four quadrants, NE first.
    pub fn all() -> impl Iterator<Item = Quadrant> {
        [Quadrant::Ne, Quadrant::Se, Quadrant::Sw, Quadrant::Nw].into_iter()
    }

    /// Storage index (NE = 0, SE = 1, SW = 2, NW = 3).
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Quadrant::Ne => 0,
            Quadrant::Se => 1,
            Quadrant::Sw => 2,
            Quadrant::Nw => 3,
        }
    }

    /// The 5 member directions of this quadrant.
    ///
    /// Boundary cardinals are shared: N and E belong to NE, E and S to SE,
    /// S and W to SW, W and N to NW.
    pub fn directions(self) -> [CompassDirection; 5] {
        use CompassDirection::*;
        match self {
            Quadrant::Ne => [N, Nne, Ne, Ene, E],
            Quadrant::Se => [E, Ese, Se, Sse, S],
            Quadrant::Sw => [S, Ssw, Sw, Wsw, W],
            Quadrant::Nw => [N, Nnw, Nw, Wnw, W],
        }
    }

    /// Uppercase label used in attribute tables ("NE", "SE", ...).
    pub fn label(self) -> &'static str {
        match self {
            Quadrant::Ne => "NE",
            Quadrant::Se => "SE",
            Quadrant::Sw => "SW",
            Quadrant::Nw => "NW",
        }
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
