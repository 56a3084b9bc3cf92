//! Elevation raster access.
//!
//! Loads a digital elevation model from GeoTIFF (pure Rust `tiff` crate,
//! no system dependencies), with the georeferencing taken from the
//! ModelPixelScale and ModelTiepoint tags. Supports cropping to a study
//! area extent and resampling to a target shape so the marsh
//! classification can be aligned with other gridded products.

use std::fs::File;
use std::path::Path;

use tiff::decoder::{Decoder, DecodingResult};
use tiff::tags::Tag;

use super::MarshError;

/// Default no-data value when the source raster does not declare one.
pub const DEFAULT_NODATA: f32 = -9999.0;

/// Resampling method for [`ElevationGrid::resample`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resampling {
    /// Nearest-neighbor (class-preserving).
    Nearest,
    /// Bilinear interpolation of the four surrounding cells.
    Bilinear,
}

/// Planar extent of a raster in map units (meters).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridExtent {
    /// Western edge.
    pub min_x: f64,
    /// Southern edge.
    pub min_y: f64,
    /// Eastern edge.
    pub max_x: f64,
    /// Northern edge.
    pub max_y: f64,
}

impl GridExtent {
    /// Create an extent.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Extent width in map units.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Extent height in map units.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// True when the point lies inside the extent.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    /// Intersection with another extent, if any.
    pub fn intersection(&self, other: &GridExtent) -> Option<GridExtent> {
        let min_x = self.min_x.max(other.min_x);
        let min_y = self.min_y.max(other.min_y);
        let max_x = self.max_x.min(other.max_x);
        let max_y = self.max_y.min(other.max_y);
        (min_x < max_x && min_y < max_y).then_some(GridExtent {
            min_x,
            min_y,
            max_x,
            max_y,
        })
    }
}

/// A single-band elevation raster in a planar CRS.
#[derive(Clone, Debug)]
pub struct ElevationGrid {
    /// Row-major cell values, northernmost row first.
    values: Vec<f32>,
    width: usize,
    height: usize,
    extent: GridExtent,
    nodata: f32,
}

impl ElevationGrid {
    /// Load an elevation grid from a GeoTIFF file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, MarshError> {
        let file = File::open(&path)?;
        let mut decoder = Decoder::new(file)?;

        let (width, height) = decoder.dimensions()?;

        let pixel_scale = decoder
            .get_tag_f64_vec(Tag::Unknown(33550))
            .map_err(|_| MarshError::MissingGeotransform("no ModelPixelScale tag".to_string()))?;
        let tiepoint = decoder
            .get_tag_f64_vec(Tag::Unknown(33922))
            .map_err(|_| MarshError::MissingGeotransform("no ModelTiepoint tag".to_string()))?;
        if pixel_scale.len() < 2 || tiepoint.len() < 6 {
            return Err(MarshError::MissingGeotransform(
                "malformed geotransform tags".to_string(),
            ));
        }

        // ModelTiepoint maps pixel (I, J) to map (X, Y); the common case
        // ties pixel (0, 0) to the raster's northwest corner.
        let origin_x = tiepoint[3] - tiepoint[0] * pixel_scale[0];
        let origin_y = tiepoint[4] + tiepoint[1] * pixel_scale[1];
        let extent = GridExtent {
            min_x: origin_x,
            min_y: origin_y - height as f64 * pixel_scale[1],
            max_x: origin_x + width as f64 * pixel_scale[0],
            max_y: origin_y,
        };

        let nodata = decoder
            .get_tag_ascii_string(Tag::Unknown(42113))
            .ok()
            .and_then(|s| s.trim().trim_end_matches('\0').parse::<f32>().ok())
            .unwrap_or(DEFAULT_NODATA);

        let values: Vec<f32> = match decoder.read_image()? {
            DecodingResult::U8(data) => data.into_iter().map(|v| v as f32).collect(),
            DecodingResult::U16(data) => data.into_iter().map(|v| v as f32).collect(),
            DecodingResult::U32(data) => data.into_iter().map(|v| v as f32).collect(),
            DecodingResult::U64(data) => data.into_iter().map(|v| v as f32).collect(),
            DecodingResult::I8(data) => data.into_iter().map(|v| v as f32).collect(),
            DecodingResult::I16(data) => data.into_iter().map(|v| v as f32).collect(),
            DecodingResult::I32(data) => data.into_iter().map(|v| v as f32).collect(),
            DecodingResult::I64(data) => data.into_iter().map(|v| v as f32).collect(),
            DecodingResult::F32(data) => data,
            DecodingResult::F64(data) => data.into_iter().map(|v| v as f32).collect(),
        };

        Self::from_values(values, width as usize, height as usize, extent, nodata)
    }

    /// Build a grid from raw row-major values (northernmost row first).
    pub fn from_values(
        values: Vec<f32>,
        width: usize,
        height: usize,
        extent: GridExtent,
        nodata: f32,
    ) -> Result<Self, MarshError> {
        if width == 0 || height == 0 || values.len() != width * height {
            return Err(MarshError::BadDimensions {
                width,
                height,
                len: values.len(),
            });
        }
        Ok(Self {
            values,
            width,
            height,
            extent,
            nodata,
        })
    }

    /// Grid dimensions (width, height) in cells.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Planar extent of the grid.
    pub fn extent(&self) -> &GridExtent {
        &self.extent
    }

    /// The grid's no-data value.
    pub fn nodata(&self) -> f32 {
        self.nodata
    }

    /// Cell size (x, y) in map units.
    pub fn cell_size(&self) -> (f64, f64) {
        (
            self.extent.width() / self.width as f64,
            self.extent.height() / self.height as f64,
        )
    }

    /// Raw cell value by row/column.
    pub fn cell(&self, row: usize, col: usize) -> f32 {
        self.values[row * self.width + col]
    }

    /// True when a value is usable (not no-data, not NaN/inf).
    pub fn is_valid(&self, value: f32) -> bool {
        value.is_finite() && (value - self.nodata).abs() > f32::EPSILON
    }

    fn xy_to_cell(&self, x: f64, y: f64) -> Option<(usize, usize)> {
        if !self.extent.contains(x, y) {
            return None;
        }
        let col = ((x - self.extent.min_x) / self.extent.width() * self.width as f64) as usize;
        let row = ((self.extent.max_y - y) / self.extent.height() * self.height as f64) as usize;
        (row < self.height && col < self.width).then_some((row, col))
    }

    /// Elevation at a map coordinate (nearest cell), `None` outside the
    /// extent or over no-data.
    pub fn elevation_at(&self, x: f64, y: f64) -> Option<f64> {
        let (row, col) = self.xy_to_cell(x, y)?;
        let value = self.cell(row, col);
        self.is_valid(value).then_some(value as f64)
    }

    /// Crop to the intersection with a study-area extent.
    ///
    /// Cell alignment is preserved; the crop snaps outward to whole
    /// cells. Fails when the extents do not overlap.
    pub fn crop(&self, bounds: &GridExtent) -> Result<ElevationGrid, MarshError> {
        let clip = self
            .extent
            .intersection(bounds)
            .ok_or(MarshError::EmptyCrop)?;

        let (cell_x, cell_y) = self.cell_size();
        let col0 = ((clip.min_x - self.extent.min_x) / cell_x).floor() as usize;
        let row0 = ((self.extent.max_y - clip.max_y) / cell_y).floor() as usize;
        let col1 = (((clip.max_x - self.extent.min_x) / cell_x).ceil() as usize).min(self.width);
        let row1 = (((self.extent.max_y - clip.min_y) / cell_y).ceil() as usize).min(self.height);

        let width = col1 - col0;
        let height = row1 - row0;
        let mut values = Vec::with_capacity(width * height);
        for row in row0..row1 {
            let start = row * self.width + col0;
            values.extend_from_slice(&self.values[start..start + width]);
        }

        let extent = GridExtent {
            min_x: self.extent.min_x + col0 as f64 * cell_x,
            max_x: self.extent.min_x + col1 as f64 * cell_x,
            min_y: self.extent.max_y - row1 as f64 * cell_y,
            max_y: self.extent.max_y - row0 as f64 * cell_y,
        };

        ElevationGrid::from_values(values, width, height, extent, self.nodata)
    }

    /// Resample to a target shape over the same extent.
    ///
    /// Bilinear interpolation falls back to nearest-neighbor wherever a
    /// surrounding cell is no-data, so invalid values never bleed into
    /// the interpolation.
    pub fn resample(
        &self,
        width: usize,
        height: usize,
        method: Resampling,
    ) -> Result<ElevationGrid, MarshError> {
        if width == 0 || height == 0 {
            return Err(MarshError::BadDimensions {
                width,
                height,
                len: 0,
            });
        }

        let mut values = Vec::with_capacity(width * height);
        for row in 0..height {
            for col in 0..width {
                // Center of the output cell in source cell coordinates
                let src_col = (col as f64 + 0.5) / width as f64 * self.width as f64 - 0.5;
                let src_row = (row as f64 + 0.5) / height as f64 * self.height as f64 - 0.5;
                let value = match method {
                    Resampling::Nearest => self.sample_nearest(src_row, src_col),
                    Resampling::Bilinear => self.sample_bilinear(src_row, src_col),
                };
                values.push(value);
            }
        }

        ElevationGrid::from_values(values, width, height, self.extent, self.nodata)
    }

    fn sample_nearest(&self, src_row: f64, src_col: f64) -> f32 {
        let row = src_row.round().clamp(0.0, (self.height - 1) as f64) as usize;
        let col = src_col.round().clamp(0.0, (self.width - 1) as f64) as usize;
        self.cell(row, col)
    }

    fn sample_bilinear(&self, src_row: f64, src_col: f64) -> f32 {
        let row0 = src_row.floor().clamp(0.0, (self.height - 1) as f64) as usize;
        let col0 = src_col.floor().clamp(0.0, (self.width - 1) as f64) as usize;
        let row1 = (row0 + 1).min(self.height - 1);
        let col1 = (col0 + 1).min(self.width - 1);

        let v00 = self.cell(row0, col0);
        let v01 = self.cell(row0, col1);
        let v10 = self.cell(row1, col0);
        let v11 = self.cell(row1, col1);

        if !self.is_valid(v00) || !self.is_valid(v01) || !self.is_valid(v10) || !self.is_valid(v11)
        {
            return self.sample_nearest(src_row, src_col);
        }

        let t = (src_row - row0 as f64).clamp(0.0, 1.0);
        let s = (src_col - col0 as f64).clamp(0.0, 1.0);
        ((1.0 - t) * (1.0 - s) * v00 as f64
            + (1.0 - t) * s * v01 as f64
            + t * (1.0 - s) * v10 as f64
            + t * s * v11 as f64) as f32
    }
}
