//! Shoreline sampling: split points, segments, and segment midpoints.
//!
//! The shoreline polyline is split every `spacing` meters (no split at
//! either end); each resulting segment's midpoint becomes the fetch
//! sample point, and segment and point share a sequential id.

use geo::{Coord, EuclideanLength, LineString};

use super::ArcError;

/// One split shoreline piece with its sample point.
#[derive(Clone, Debug, PartialEq)]
pub struct SampledSegment {
    /// Sequential 1-based id, shared by segment and sample point.
    pub id: u32,
    /// Piece geometry.
    pub line: LineString<f64>,
    /// Piece length in meters.
    pub length_m: f64,
    /// Midpoint along the piece (the fetch sample point).
    pub midpoint: Coord<f64>,
}

impl SampledSegment {
    /// First vertex of the piece.
    pub fn start(&self) -> Coord<f64> {
        self.line.0[0]
    }

    /// Last vertex of the piece.
    pub fn end(&self) -> Coord<f64> {
        self.line.0[self.line.0.len() - 1]
    }
}

/// Point a given distance along a polyline (clamped to the ends).
fn point_along(line: &LineString<f64>, distance: f64) -> Coord<f64> {
    if distance <= 0.0 {
        return line.0[0];
    }
    let mut walked = 0.0;
    for seg in line.lines() {
        let len = seg.euclidean_length();
        if walked + len >= distance && len > 0.0 {
            let t = (distance - walked) / len;
            return Coord {
                x: seg.start.x + t * seg.dx(),
                y: seg.start.y + t * seg.dy(),
            };
        }
        walked += len;
    }
    line.0[line.0.len() - 1]
}

/// Split a shoreline polyline every `spacing_m` meters and sample each
/// piece's midpoint.
///
/// No split is generated at the line's endpoints; a shoreline shorter
/// than one spacing yields a single piece. Ids are sequential starting
/// at `first_id`.
pub fn sample_shoreline(
    shoreline: &LineString<f64>,
    spacing_m: f64,
    first_id: u32,
) -> Result<Vec<SampledSegment>, ArcError> {
    if !(spacing_m > 0.0) {
        return Err(ArcError::InvalidSpacing(spacing_m));
    }
    if shoreline.0.len() < 2 {
        return Err(ArcError::DegenerateShoreline);
    }

    let total = shoreline.euclidean_length();
    if !(total > 0.0) {
        return Err(ArcError::DegenerateShoreline);
    }

    // Walk the line, cutting a new piece at every multiple of the
    // spacing that falls strictly inside the line.
    const CUT_EPS: f64 = 1e-9;
    let mut pieces: Vec<Vec<Coord<f64>>> = Vec::new();
    let mut current: Vec<Coord<f64>> = vec![shoreline.0[0]];
    let mut walked = 0.0;
    let mut next_cut = spacing_m;

    for seg in shoreline.lines() {
        let len = seg.euclidean_length();
        while len > 0.0 && next_cut < walked + len - CUT_EPS && next_cut < total - CUT_EPS {
            let t = (next_cut - walked) / len;
            let cut = Coord {
                x: seg.start.x + t * seg.dx(),
                y: seg.start.y + t * seg.dy(),
            };
            current.push(cut);
            pieces.push(std::mem::replace(&mut current, vec![cut]));
            next_cut += spacing_m;
        }
        current.push(seg.end);
        walked += len;
    }
    if current.len() >= 2 {
        pieces.push(current);
    }

    Ok(pieces
        .into_iter()
        .enumerate()
        .map(|(i, coords)| {
            let line = LineString::from(coords);
            let length_m = line.euclidean_length();
            let midpoint = point_along(&line, length_m / 2.0);
            SampledSegment {
                id: first_id + i as u32,
                line,
                length_m,
                midpoint,
            }
        })
        .collect())
}
