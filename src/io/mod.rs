//! I/O for the analysis inputs and outputs.
//!
//! This module provides:
//! - **Shoreline readers**: shoreline polylines and land/water polygons
//!   from shapefiles
//! - **Ray tables**: the CSV interchange format between the geometry
//!   stage and the classifier (id, x, y, one column per direction)
//! - **Reports**: per-point and per-run classification CSVs in the
//!   established inventory attribute schema, with date-stamped names
//!
//! The DEM raster side lives with the marsh classification in
//! [`crate::marsh`].

mod ray_table;
mod report;
mod shoreline;

pub use ray_table::{read_ray_table, write_ray_table, RayTableError};
pub use report::{dated_name, write_point_report, write_run_report, ReportError};
pub use shoreline::{
    read_land_polygons, read_shoreline, ShorelineFileError, SURFACE_FIELD, SURFACE_LAND,
};
