//! The end-to-end analysis pipeline.
//!
//! Four stages in strict sequence, each consuming the previous stage's
//! complete output: per-point classification, id join onto segments,
//! same-code dissolve, small-run flagging. The whole run is a pure
//! function of its inputs; rerunning on identical ray data yields
//! identical records.

use geo::LineString;
use log::info;
use thiserror::Error;

use crate::arcs::{sample_shoreline, ArcError, LandWaterMask, RayCaster};
use crate::config::{AnalysisConfig, ConfigError};
use crate::fetch::{classify_points, FetchError, PointClassification, SamplePoint};
use crate::segments::{
    dissolve, flag_short_runs, join_segments, ClassifiedSegment, DissolvedRun, RunFlag,
    SegmentError, ShorelineSegment,
};

use super::summary::ExposureSummary;

/// Error type for a whole analysis run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Configuration rejected
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Geometry stage failed
    #[error(transparent)]
    Arc(#[from] ArcError),

    /// Classification stage failed
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Segment stage failed
    #[error(transparent)]
    Segment(#[from] SegmentError),
}

/// Complete output of one analysis run.
#[derive(Clone, Debug)]
pub struct AnalysisRun {
    /// Per-point classification records.
    pub points: Vec<PointClassification>,
    /// Segments with exposure codes joined on.
    pub segments: Vec<ClassifiedSegment>,
    /// Dissolved same-code runs.
    pub runs: Vec<DissolvedRun>,
    /// Review flags for short runs.
    pub flags: Vec<RunFlag>,
    /// Per-band point counts.
    pub summary: ExposureSummary,
}

/// Run classification through flagging on precomputed ray data.
///
/// This is the entry point when the ray lengths come from outside (for
/// example a ray table CSV): `points` carry the per-direction open-water
/// lengths and `segments` the matching shoreline pieces, joined by id.
pub fn run_classification(
    points: &[SamplePoint],
    segments: &[ShorelineSegment],
    config: &AnalysisConfig,
) -> Result<AnalysisRun, PipelineError> {
    config.validate()?;

    let classified = classify_points(points, &config.thresholds)?;
    let summary = ExposureSummary::from_points(&classified);
    info!(
        "classified {} points ({} low / {} moderate / {} high / {} misplaced)",
        summary.n_points, summary.low, summary.moderate, summary.high, summary.point_misplacement
    );

    let segments = join_segments(segments, &classified)?;
    let runs = dissolve(&segments, config.endpoint_tolerance_m);
    let flags = flag_short_runs(&runs, &config.flag_params());
    info!(
        "dissolved {} segments into {} runs, {} flagged for review",
        segments.len(),
        runs.len(),
        flags.len()
    );

    Ok(AnalysisRun {
        points: classified,
        segments,
        runs,
        flags,
        summary,
    })
}

/// Run the whole workflow from geometry: sample the shoreline, cast and
/// clip the ray fans against the land/water mask, then classify.
pub fn run_from_geometry(
    shoreline: &LineString<f64>,
    mask: &LandWaterMask,
    config: &AnalysisConfig,
) -> Result<AnalysisRun, PipelineError> {
    run_from_geometry_parts(std::slice::from_ref(shoreline), mask, config)
}

/// [`run_from_geometry`] over a multi-part shoreline.
///
/// Parts are sampled in order with one continuous id sequence, so the
/// output joins against a single segment table.
pub fn run_from_geometry_parts(
    parts: &[LineString<f64>],
    mask: &LandWaterMask,
    config: &AnalysisConfig,
) -> Result<AnalysisRun, PipelineError> {
    config.validate()?;
    let caster = RayCaster::new(config.ray_length_m)?;

    let mut sampled = Vec::new();
    for part in parts {
        let pieces = sample_shoreline(part, config.point_spacing_m, sampled.len() as u32 + 1)?;
        sampled.extend(pieces);
    }
    info!(
        "sampled {} segments from {} shoreline parts at {} m spacing",
        sampled.len(),
        parts.len(),
        config.point_spacing_m
    );

    let points: Vec<SamplePoint> = sampled
        .iter()
        .map(|seg| {
            SamplePoint::new(
                seg.id,
                seg.midpoint.x,
                seg.midpoint.y,
                mask.cast(&caster, seg.midpoint),
            )
        })
        .collect();
    let segments: Vec<ShorelineSegment> = sampled
        .iter()
        .map(|seg| ShorelineSegment {
            id: seg.id,
            length_m: seg.length_m,
            start: seg.start(),
            end: seg.end(),
        })
        .collect();

    run_classification(&points, &segments, config)
}
