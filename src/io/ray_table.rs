//! Ray table I/O.
//!
//! The interchange format between the geometry stage and the classifier
//! is a flat CSV table, one row per sample point: id, planar x/y, and
//! one column per compass direction holding that ray's open-water length
//! in meters. An empty cell means the ray found no water.
//!
//! ```text
//! ID,x,y,n,nne,ne,ene,e,ese,se,sse,s,ssw,sw,wsw,w,wnw,nw,nnw
//! 1,370100.0,4100250.0,,,152.3,890.1,1204.7,,,,,,,,,,,
//! 2,370125.0,4100250.0,88.0,,,,,,,,,,,,,,,
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use crate::fetch::{FetchError, RaySet, SamplePoint};
use crate::types::{CompassDirection, DIRECTION_COUNT};

/// Error type for ray table files.
#[derive(Debug, Error)]
pub enum RayTableError {
    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed header or cell
    #[error("Line {line}: {message}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// What went wrong.
        message: String,
    },

    /// Header is missing a required column
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// A cell held an invalid ray length
    #[error(transparent)]
    InvalidRay(#[from] FetchError),
}

fn parse_error(line: usize, message: impl Into<String>) -> RayTableError {
    RayTableError::Parse {
        line,
        message: message.into(),
    }
}

/// Read sample points from a ray table CSV.
///
/// Columns are matched by header name (case-insensitive); `ID`, `x`,
/// and `y` are required along with all 16 direction columns. Empty
/// direction cells become absent rays.
pub fn read_ray_table<P: AsRef<Path>>(path: P) -> Result<Vec<SamplePoint>, RayTableError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut lines = reader.lines().enumerate();

    let header = loop {
        match lines.next() {
            Some((n, line)) => {
                let line = line?;
                let trimmed = line.trim();
                if trimmed.is_empty() || trimmed.starts_with('#') {
                    continue;
                }
                break (n + 1, trimmed.to_string());
            }
            None => return Err(parse_error(0, "empty ray table")),
        }
    };

    let columns: Vec<String> = header
        .1
        .split(',')
        .map(|c| c.trim().to_ascii_lowercase())
        .collect();
    let find = |name: &str| -> Result<usize, RayTableError> {
        columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| RayTableError::MissingColumn(name.to_string()))
    };

    let id_col = find("id")?;
    let x_col = find("x")?;
    let y_col = find("y")?;
    let mut dir_cols = [0usize; DIRECTION_COUNT];
    for direction in CompassDirection::all() {
        dir_cols[direction.index()] = find(direction.label())?;
    }

    let mut points = Vec::new();
    for (n, line) in lines {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let cells: Vec<&str> = trimmed.split(',').map(str::trim).collect();

        let cell = |col: usize| -> Result<&str, RayTableError> {
            cells
                .get(col)
                .copied()
                .ok_or_else(|| parse_error(n + 1, format!("missing column {}", col + 1)))
        };

        let id: u32 = cell(id_col)?
            .parse()
            .map_err(|e| parse_error(n + 1, format!("bad id: {}", e)))?;
        let x: f64 = cell(x_col)?
            .parse()
            .map_err(|e| parse_error(n + 1, format!("bad x: {}", e)))?;
        let y: f64 = cell(y_col)?
            .parse()
            .map_err(|e| parse_error(n + 1, format!("bad y: {}", e)))?;

        let mut rays = RaySet::new();
        for direction in CompassDirection::all() {
            let raw = cell(dir_cols[direction.index()])?;
            if raw.is_empty() {
                continue;
            }
            let meters: f64 = raw
                .parse()
                .map_err(|e| parse_error(n + 1, format!("bad {} ray: {}", direction, e)))?;
            rays.set(direction, meters)?;
        }

        points.push(SamplePoint::new(id, x, y, rays));
    }

    Ok(points)
}

/// Write sample points as a ray table CSV.
pub fn write_ray_table<P: AsRef<Path>>(
    path: P,
    points: &[SamplePoint],
) -> Result<(), RayTableError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    let mut header = String::from("ID,x,y");
    for direction in CompassDirection::all() {
        header.push(',');
        header.push_str(direction.label());
    }
    writeln!(writer, "{}", header)?;

    for point in points {
        let mut row = format!("{},{},{}", point.id, point.x, point.y);
        for direction in CompassDirection::all() {
            row.push(',');
            if let Some(meters) = point.rays.get(direction) {
                row.push_str(&format!("{:.4}", meters));
            }
        }
        writeln!(writer, "{}", row)?;
    }

    Ok(())
}
