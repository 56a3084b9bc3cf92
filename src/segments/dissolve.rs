//! Joining exposure codes onto shoreline segments and dissolving
//! same-code neighbors into runs.

use geo::Coord;
use log::warn;

use crate::fetch::PointClassification;
use crate::types::ExposureCode;

use super::SegmentError;

/// One split shoreline segment, before classification.
#[derive(Clone, Debug, PartialEq)]
pub struct ShorelineSegment {
    /// Stable integer id, shared with the segment's center sample point.
    pub id: u32,
    /// Segment length in meters.
    pub length_m: f64,
    /// First vertex.
    pub start: Coord<f64>,
    /// Last vertex.
    pub end: Coord<f64>,
}

/// A shoreline segment with its exposure code joined on by id.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassifiedSegment {
    /// Segment / sample point id.
    pub id: u32,
    /// Segment length in meters.
    pub length_m: f64,
    /// Exposure code of the segment's sample point.
    pub exposure: ExposureCode,
    /// First vertex.
    pub start: Coord<f64>,
    /// Last vertex.
    pub end: Coord<f64>,
}

/// A maximal contiguous sequence of same-code segments.
#[derive(Clone, Debug, PartialEq)]
pub struct DissolvedRun {
    /// Sequential run id (1-based, in shoreline order).
    pub run_id: u32,
    /// Shared exposure code of the member segments.
    pub exposure: ExposureCode,
    /// Total length in meters.
    pub length_m: f64,
    /// Ids of the member segments, in order.
    pub segment_ids: Vec<u32>,
    /// First vertex of the run.
    pub start: Coord<f64>,
    /// Last vertex of the run.
    pub end: Coord<f64>,
}

/// Join point classifications onto their segments by id.
///
/// Every segment must have a classification; a missing id fails the run.
/// Classifications without a matching segment are skipped with a warning
/// (they can occur when a study-area clip dropped segments but not
/// points).
pub fn join_segments(
    segments: &[ShorelineSegment],
    classifications: &[PointClassification],
) -> Result<Vec<ClassifiedSegment>, SegmentError> {
    let by_id: std::collections::HashMap<u32, &PointClassification> =
        classifications.iter().map(|c| (c.id, c)).collect();

    if classifications.len() > segments.len() {
        warn!(
            "{} classifications have no matching segment",
            classifications.len() - segments.len()
        );
    }

    segments
        .iter()
        .map(|seg| {
            let class = by_id
                .get(&seg.id)
                .ok_or(SegmentError::MissingClassification(seg.id))?;
            Ok(ClassifiedSegment {
                id: seg.id,
                length_m: seg.length_m,
                exposure: class.exposure,
                start: seg.start,
                end: seg.end,
            })
        })
        .collect()
}

fn endpoint_distance(a: Coord<f64>, b: Coord<f64>) -> f64 {
    ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
}

/// Dissolve consecutive same-code segments into runs.
///
/// Segments are taken in input (shoreline) order; a segment extends the
/// current run when it has the same exposure code and starts where the
/// run ends (within `gap_tolerance_m`). A code change or a geometric gap
/// (a water crossing) starts a new run.
pub fn dissolve(segments: &[ClassifiedSegment], gap_tolerance_m: f64) -> Vec<DissolvedRun> {
    let mut runs: Vec<DissolvedRun> = Vec::new();

    for seg in segments {
        let extend = runs.last().map_or(false, |run| {
            run.exposure == seg.exposure
                && endpoint_distance(run.end, seg.start) <= gap_tolerance_m
        });

        if extend {
            let run = runs.last_mut().expect("runs is non-empty when extending");
            run.length_m += seg.length_m;
            run.segment_ids.push(seg.id);
            run.end = seg.end;
        } else {
            runs.push(DissolvedRun {
                run_id: runs.len() as u32 + 1,
                exposure: seg.exposure,
                length_m: seg.length_m,
                segment_ids: vec![seg.id],
                start: seg.start,
                end: seg.end,
            });
        }
    }

    runs
}
