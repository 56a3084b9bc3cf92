//! Shoreline segment classification, dissolving, and review flags.
//!
//! Consumes the per-point exposure codes, joins them onto the split
//! shoreline segments by id, dissolves same-code neighbors into runs,
//! and flags short runs whose coding disagrees with their surroundings
//! for manual QC.

mod dissolve;
mod flag;

pub use dissolve::{dissolve, join_segments, ClassifiedSegment, DissolvedRun, ShorelineSegment};
pub use flag::{
    flag_short_runs, FlagParams, NeighborTally, RunFlag, DO_THIS_QC, ENDPOINT_TOLERANCE_M,
    MARSH_ISLAND_COMMENT, SMALL_RUN_MAX_LENGTH_M,
};

use thiserror::Error;

/// Error type for the segment stage.
#[derive(Debug, Error)]
pub enum SegmentError {
    /// A segment id had no classified sample point.
    #[error("Segment {0} has no matching point classification")]
    MissingClassification(u32),
}
