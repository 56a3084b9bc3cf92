//! Shoreline and land/water shapefile readers.
//!
//! Two vector inputs feed the analysis: the shoreline itself (polyline
//! shapefile, in the working planar CRS) and the study area's land/water
//! polygons, where each polygon's `surface` attribute says whether it is
//! land or water. Only the land polygons go into the clipping mask.

use std::path::Path;

use geo::{Coord, LineString, Polygon};
use log::info;
use shapefile::dbase::FieldValue;
use shapefile::{PolygonRing, Reader, Shape};
use thiserror::Error;

/// Attribute field naming the polygon surface type.
pub const SURFACE_FIELD: &str = "surface";

/// `surface` value marking a land polygon.
pub const SURFACE_LAND: &str = "land";

/// Error type for shoreline file operations.
#[derive(Debug, Error)]
pub enum ShorelineFileError {
    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Shapefile parsing error
    #[error("Shapefile error: {0}")]
    Shapefile(String),

    /// No usable geometry found
    #[error("No {0} features found in shapefile")]
    Empty(&'static str),
}

impl From<shapefile::Error> for ShorelineFileError {
    fn from(e: shapefile::Error) -> Self {
        ShorelineFileError::Shapefile(e.to_string())
    }
}

/// Read shoreline polylines from a shapefile.
///
/// Every part of every polyline feature becomes one `LineString`.
pub fn read_shoreline<P: AsRef<Path>>(path: P) -> Result<Vec<LineString<f64>>, ShorelineFileError> {
    let mut reader = Reader::from_path(path)?;
    let mut lines = Vec::new();

    for result in reader.iter_shapes_and_records() {
        let (shape, _record) = result?;
        if let Shape::Polyline(polyline) = shape {
            for part in polyline.parts() {
                if part.len() >= 2 {
                    let coords: Vec<Coord<f64>> =
                        part.iter().map(|p| Coord { x: p.x, y: p.y }).collect();
                    lines.push(LineString::from(coords));
                }
            }
        }
    }

    if lines.is_empty() {
        return Err(ShorelineFileError::Empty("polyline"));
    }
    info!("read {} shoreline parts", lines.len());
    Ok(lines)
}

/// Read the land polygons of a land/water shapefile.
///
/// Features whose `surface` attribute equals "land" (case-insensitive)
/// are kept; everything else is water and ignored. Outer rings become
/// polygon exteriors, inner rings holes on the preceding exterior.
pub fn read_land_polygons<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<Polygon<f64>>, ShorelineFileError> {
    let mut reader = Reader::from_path(path)?;
    let mut polygons = Vec::new();

    for result in reader.iter_shapes_and_records() {
        let (shape, record) = result?;

        let surface = match record.get(SURFACE_FIELD) {
            Some(FieldValue::Character(Some(s))) => s.trim().to_ascii_lowercase(),
            _ => String::new(),
        };
        if surface != SURFACE_LAND {
            continue;
        }

        if let Shape::Polygon(polygon) = shape {
            let feature_start = polygons.len();
            for ring in polygon.rings() {
                let coords: Vec<Coord<f64>> = ring
                    .points()
                    .iter()
                    .map(|p| Coord { x: p.x, y: p.y })
                    .collect();
                match ring {
                    PolygonRing::Outer(_) => {
                        polygons.push(Polygon::new(LineString::from(coords), vec![]));
                    }
                    PolygonRing::Inner(_) => {
                        // Attach the hole to this feature's latest exterior
                        if polygons.len() > feature_start {
                            if let Some(outer) = polygons.last_mut() {
                                outer.interiors_push(LineString::from(coords));
                            }
                        }
                    }
                }
            }
        }
    }

    if polygons.is_empty() {
        return Err(ShorelineFileError::Empty("land polygon"));
    }
    info!("read {} land polygons", polygons.len());
    Ok(polygons)
}
