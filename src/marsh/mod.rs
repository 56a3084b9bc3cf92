//! Marsh elevation classification from a DEM and tidal datums.
//!
//! Loads an elevation raster, optionally crops it to a study area and
//! resamples it onto a target grid, then thresholds every cell into
//! low marsh / high marsh / not marsh from the local tidal datums.
//!
//! # Example
//!
//! ```ignore
//! use fetch_rs::marsh::{reclassify, ElevationGrid, GridExtent, TidalDatums};
//!
//! let dem = ElevationGrid::load("data/topobathy_dem.tif")?;
//! let study = dem.crop(&GridExtent::new(360_000.0, 4_110_000.0, 365_000.0, 4_115_000.0))?;
//! let datums = TidalDatums::new(-0.432, 0.259)?;
//! let marsh = reclassify(&study, &datums)?;
//! println!("{}", marsh.statistics());
//! marsh.write_ascii_grid("outputs/marsh.asc")?;
//! ```

mod classify;
mod grid;

pub use classify::{
    classify_elevation, reclassify, MarshClass, MarshGrid, MarshStatistics, TidalDatums,
    HIGH_MARSH_CODE, LOW_MARSH_CODE, NODATA_CODE, NOT_MARSH_CODE,
};
pub use grid::{ElevationGrid, GridExtent, Resampling, DEFAULT_NODATA};

use thiserror::Error;

/// Error type for marsh raster operations.
#[derive(Debug, Error)]
pub enum MarshError {
    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TIFF decoding error
    #[error("TIFF error: {0}")]
    Tiff(String),

    /// Missing or malformed georeferencing tags
    #[error("Missing geotransform: {0}")]
    MissingGeotransform(String),

    /// Value buffer does not match the declared shape
    #[error("Bad raster dimensions: {width}x{height} with {len} values")]
    BadDimensions {
        /// Declared width.
        width: usize,
        /// Declared height.
        height: usize,
        /// Actual value count.
        len: usize,
    },

    /// Crop extent does not overlap the raster
    #[error("Crop extent does not intersect the raster")]
    EmptyCrop,

    /// Datums out of order or non-finite
    #[error("Invalid tidal datums: mlw {mlw_m}, mhw {mhw_m}")]
    InvalidDatums {
        /// Mean low water.
        mlw_m: f64,
        /// Mean high water.
        mhw_m: f64,
    },

    /// ASCII grid export needs square cells
    #[error("Cannot export non-square cells ({cell_x} x {cell_y}) as ASCII grid")]
    NonSquareCells {
        /// Cell width.
        cell_x: f64,
        /// Cell height.
        cell_y: f64,
    },
}

impl From<tiff::TiffError> for MarshError {
    fn from(e: tiff::TiffError) -> Self {
        MarshError::Tiff(e.to_string())
    }
}
