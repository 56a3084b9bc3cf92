//! # fetch-rs
//!
//! Shoreline fetch and wave-exposure analysis for coastal geomorphology.
//!
//! This crate provides the building blocks of a shoreline exposure
//! inventory:
//! - Shoreline sampling and 16-direction fetch ray casting against a
//!   land/water mask
//! - Per-point fetch classification (maximum ray, quadrant averages with
//!   the single-ray override, low/moderate/high exposure bands)
//! - Dissolving classified segments into runs and flagging short runs
//!   that disagree with their surroundings for manual QC
//! - Marsh elevation classification from a DEM and tidal datums
//! - Tide station metadata retrieval (NOAA CO-OPS catalog)
//!
//! # Example
//!
//! ```
//! use fetch_rs::{run_classification, AnalysisConfig, RaySet, SamplePoint, ShorelineSegment};
//! use fetch_rs::types::CompassDirection;
//! use geo::Coord;
//!
//! let mut rays = RaySet::new();
//! rays.set(CompassDirection::E, 2500.0).unwrap();
//! rays.set(CompassDirection::Ese, 1800.0).unwrap();
//!
//! let points = vec![SamplePoint::new(1, 12.5, 0.0, rays)];
//! let segments = vec![ShorelineSegment {
//!     id: 1,
//!     length_m: 25.0,
//!     start: Coord { x: 0.0, y: 0.0 },
//!     end: Coord { x: 25.0, y: 0.0 },
//! }];
//!
//! let run = run_classification(&points, &segments, &AnalysisConfig::default()).unwrap();
//! assert_eq!(run.points[0].exposure.label(), "moderate");
//! ```

pub mod analysis;
pub mod arcs;
pub mod config;
pub mod fetch;
pub mod io;
pub mod marsh;
pub mod segments;
pub mod stations;
pub mod types;

// Re-export the main entry points for convenience
pub use analysis::{
    run_classification, run_from_geometry, run_from_geometry_parts, AnalysisRun, ExposureSummary,
    PipelineError,
};
pub use arcs::{sample_shoreline, LandWaterMask, Ray, RayCaster, SampledSegment};
pub use config::AnalysisConfig;
pub use fetch::{
    classify_points, classify_rays, ExposureThresholds, PointClassification, QuadrantStats,
    RaySet, SamplePoint,
};
pub use marsh::{reclassify, ElevationGrid, GridExtent, MarshClass, MarshGrid, TidalDatums};
pub use segments::{
    dissolve, flag_short_runs, join_segments, ClassifiedSegment, DissolvedRun, FlagParams,
    RunFlag, ShorelineSegment,
};
pub use stations::{StationCatalog, TideStation};
pub use types::{CompassDirection, ExposureCode, Quadrant};

#[cfg(feature = "parallel")]
pub use fetch::classify_points_parallel;
