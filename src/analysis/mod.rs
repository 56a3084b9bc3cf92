//! Batch analysis orchestration and summaries.

mod pipeline;
mod summary;

pub use pipeline::{
    run_classification, run_from_geometry, run_from_geometry_parts, AnalysisRun, PipelineError,
};
pub use summary::ExposureSummary;
