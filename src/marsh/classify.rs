//! Marsh elevation classification.
//!
//! Thresholds a DEM into marsh classes from the local tidal datums: low
//! marsh sits between mean low water and mean high water, high marsh
//! between mean high water and an upper bound half a tidal range above
//! it.

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Deserialize;

use super::grid::{ElevationGrid, GridExtent};
use super::MarshError;

/// Tidal datums (meters relative to the DEM's vertical datum).
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
pub struct TidalDatums {
    /// Mean low water.
    pub mlw_m: f64,
    /// Mean high water.
    pub mhw_m: f64,
}

impl TidalDatums {
    /// Create datums; mean high water must exceed mean low water.
    pub fn new(mlw_m: f64, mhw_m: f64) -> Result<Self, MarshError> {
        let datums = Self { mlw_m, mhw_m };
        if !datums.is_valid() {
            return Err(MarshError::InvalidDatums { mlw_m, mhw_m });
        }
        Ok(datums)
    }

    /// True when the datums are finite and ordered.
    pub fn is_valid(&self) -> bool {
        self.mlw_m.is_finite() && self.mhw_m.is_finite() && self.mhw_m > self.mlw_m
    }

    /// Tidal range (mhw - mlw) in meters.
    pub fn range_m(&self) -> f64 {
        self.mhw_m - self.mlw_m
    }

    /// Upper bound of high marsh: mhw plus half the tidal range.
    pub fn upper_marsh_bound_m(&self) -> f64 {
        self.mhw_m + self.range_m() / 2.0
    }
}

/// Marsh class of one DEM cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarshClass {
    /// Below low marsh, above high marsh, or upland.
    NotMarsh,
    /// Between mean high water and the upper marsh bound.
    HighMarsh,
    /// Between mean low water and mean high water.
    LowMarsh,
    /// Source cell had no elevation data.
    NoData,
}

/// Exported cell code for the not-marsh class.
pub const NOT_MARSH_CODE: i32 = 0;
/// Exported cell code for high marsh.
pub const HIGH_MARSH_CODE: i32 = 1;
/// Exported cell code for low marsh.
pub const LOW_MARSH_CODE: i32 = 2;
/// Exported cell code for no-data cells.
pub const NODATA_CODE: i32 = -1;

impl MarshClass {
    /// Integer code used in exported rasters.
    pub fn code(self) -> i32 {
        match self {
            MarshClass::NotMarsh => NOT_MARSH_CODE,
            MarshClass::HighMarsh => HIGH_MARSH_CODE,
            MarshClass::LowMarsh => LOW_MARSH_CODE,
            MarshClass::NoData => NODATA_CODE,
        }
    }
}

impl fmt::Display for MarshClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MarshClass::NotMarsh => "not marsh",
            MarshClass::HighMarsh => "high marsh",
            MarshClass::LowMarsh => "low marsh",
            MarshClass::NoData => "nodata",
        };
        f.write_str(name)
    }
}

/// Classify one elevation against the tidal datums.
pub fn classify_elevation(elevation_m: f64, datums: &TidalDatums) -> MarshClass {
    if elevation_m >= datums.mlw_m && elevation_m <= datums.mhw_m {
        MarshClass::LowMarsh
    } else if elevation_m > datums.mhw_m && elevation_m <= datums.upper_marsh_bound_m() {
        MarshClass::HighMarsh
    } else {
        MarshClass::NotMarsh
    }
}

/// A reclassified marsh raster.
#[derive(Clone, Debug)]
pub struct MarshGrid {
    classes: Vec<MarshClass>,
    width: usize,
    height: usize,
    extent: GridExtent,
}

impl MarshGrid {
    /// Grid dimensions (width, height) in cells.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Planar extent of the grid.
    pub fn extent(&self) -> &GridExtent {
        &self.extent
    }

    /// Class of one cell by row/column.
    pub fn class(&self, row: usize, col: usize) -> MarshClass {
        self.classes[row * self.width + col]
    }

    /// Count cells per class.
    pub fn statistics(&self) -> MarshStatistics {
        let mut stats = MarshStatistics {
            width: self.width,
            height: self.height,
            not_marsh: 0,
            high_marsh: 0,
            low_marsh: 0,
            nodata: 0,
        };
        for class in &self.classes {
            match class {
                MarshClass::NotMarsh => stats.not_marsh += 1,
                MarshClass::HighMarsh => stats.high_marsh += 1,
                MarshClass::LowMarsh => stats.low_marsh += 1,
                MarshClass::NoData => stats.nodata += 1,
            }
        }
        stats
    }

    /// Write the grid as an ESRI ASCII raster.
    ///
    /// Requires square cells (the format has a single cellsize).
    pub fn write_ascii_grid<P: AsRef<Path>>(&self, path: P) -> Result<(), MarshError> {
        let cell_x = self.extent.width() / self.width as f64;
        let cell_y = self.extent.height() / self.height as f64;
        if (cell_x - cell_y).abs() > 1e-6 * cell_x.max(cell_y) {
            return Err(MarshError::NonSquareCells { cell_x, cell_y });
        }

        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);

        writeln!(writer, "ncols {}", self.width)?;
        writeln!(writer, "nrows {}", self.height)?;
        writeln!(writer, "xllcorner {}", self.extent.min_x)?;
        writeln!(writer, "yllcorner {}", self.extent.min_y)?;
        writeln!(writer, "cellsize {}", cell_x)?;
        writeln!(writer, "NODATA_value {}", NODATA_CODE)?;
        for row in 0..self.height {
            let mut line = String::with_capacity(self.width * 3);
            for col in 0..self.width {
                if col > 0 {
                    line.push(' ');
                }
                line.push_str(&self.class(row, col).code().to_string());
            }
            writeln!(writer, "{}", line)?;
        }

        Ok(())
    }
}

/// Cell counts per marsh class.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MarshStatistics {
    /// Grid width in cells.
    pub width: usize,
    /// Grid height in cells.
    pub height: usize,
    /// Cells classified not-marsh.
    pub not_marsh: usize,
    /// Cells classified high marsh.
    pub high_marsh: usize,
    /// Cells classified low marsh.
    pub low_marsh: usize,
    /// Cells with no elevation data.
    pub nodata: usize,
}

impl fmt::Display for MarshStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Marsh Classification Statistics:")?;
        writeln!(f, "  Dimensions: {}x{} cells", self.width, self.height)?;
        writeln!(f, "  Low marsh:  {}", self.low_marsh)?;
        writeln!(f, "  High marsh: {}", self.high_marsh)?;
        writeln!(f, "  Not marsh:  {}", self.not_marsh)?;
        writeln!(f, "  NoData:     {}", self.nodata)
    }
}

/// Reclassify an elevation grid into marsh classes.
pub fn reclassify(grid: &ElevationGrid, datums: &TidalDatums) -> Result<MarshGrid, MarshError> {
    if !datums.is_valid() {
        return Err(MarshError::InvalidDatums {
            mlw_m: datums.mlw_m,
            mhw_m: datums.mhw_m,
        });
    }

    let (width, height) = grid.dimensions();
    let mut classes = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            let value = grid.cell(row, col);
            let class = if grid.is_valid(value) {
                classify_elevation(value as f64, datums)
            } else {
                MarshClass::NoData
            };
            classes.push(class);
        }
    }

    Ok(MarshGrid {
        classes,
        width,
        height,
        extent: *grid.extent(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marsh::grid::DEFAULT_NODATA;

    const TOL: f64 = 1e-10;

    /// Chesapeake (Poquoson) datums used throughout the original study.
    fn datums() -> TidalDatums {
        TidalDatums::new(-0.432, 0.259).unwrap()
    }

    #[test]
    fn test_upper_bound() {
        let d = datums();
        // 0.259 + (0.259 - (-0.432)) / 2 = 0.6045
        assert!((d.upper_marsh_bound_m() - 0.6045).abs() < TOL);
        assert!((d.range_m() - 0.691).abs() < TOL);
    }

    #[test]
    fn test_classify_bands() {
        let d = datums();
        assert_eq!(classify_elevation(-1.0, &d), MarshClass::NotMarsh);
        assert_eq!(classify_elevation(-0.432, &d), MarshClass::LowMarsh);
        assert_eq!(classify_elevation(0.0, &d), MarshClass::LowMarsh);
        assert_eq!(classify_elevation(0.259, &d), MarshClass::LowMarsh);
        assert_eq!(classify_elevation(0.26, &d), MarshClass::HighMarsh);
        assert_eq!(classify_elevation(0.6045, &d), MarshClass::HighMarsh);
        assert_eq!(classify_elevation(0.61, &d), MarshClass::NotMarsh);
        assert_eq!(classify_elevation(5.0, &d), MarshClass::NotMarsh);
    }

    #[test]
    fn test_invalid_datums_rejected() {
        assert!(TidalDatums::new(0.5, -0.5).is_err());
        assert!(TidalDatums::new(0.0, f64::NAN).is_err());
    }

    #[test]
    fn test_reclassify_grid() {
        let values = vec![
            -2.0, 0.0, //
            0.5, DEFAULT_NODATA,
        ];
        let grid = ElevationGrid::from_values(
            values,
            2,
            2,
            GridExtent::new(0.0, 0.0, 2.0, 2.0),
            DEFAULT_NODATA,
        )
        .unwrap();

        let marsh = reclassify(&grid, &datums()).unwrap();
        assert_eq!(marsh.class(0, 0), MarshClass::NotMarsh);
        assert_eq!(marsh.class(0, 1), MarshClass::LowMarsh);
        assert_eq!(marsh.class(1, 0), MarshClass::HighMarsh);
        assert_eq!(marsh.class(1, 1), MarshClass::NoData);

        let stats = marsh.statistics();
        assert_eq!(stats.low_marsh, 1);
        assert_eq!(stats.high_marsh, 1);
        assert_eq!(stats.not_marsh, 1);
        assert_eq!(stats.nodata, 1);
    }

    #[test]
    fn test_ascii_grid_export() {
        let values = vec![0.0, 0.5, -2.0, DEFAULT_NODATA];
        let grid = ElevationGrid::from_values(
            values,
            2,
            2,
            GridExtent::new(100.0, 200.0, 102.0, 202.0),
            DEFAULT_NODATA,
        )
        .unwrap();
        let marsh = reclassify(&grid, &datums()).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("marsh.asc");
        marsh.write_ascii_grid(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("ncols 2"));
        assert!(text.contains("xllcorner 100"));
        assert!(text.contains("NODATA_value -1"));
        // Row order: north first; codes low=2 high=1 not=0 nodata=-1
        let rows: Vec<&str> = text.lines().skip(6).collect();
        assert_eq!(rows, vec!["2 1", "0 -1"]);
    }
}
