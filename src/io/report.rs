//! Classified result reports.
//!
//! Writes the per-point and per-run classification tables as CSV for the
//! downstream geodatabase join. Column names follow the attribute schema
//! of the existing regional inventories (NE_Count, MaxQFetch,
//! MxQExpCode, ...), so the output drops into the established QC
//! workflow unchanged.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::Local;
use thiserror::Error;

use crate::fetch::PointClassification;
use crate::segments::{DissolvedRun, RunFlag};
use crate::types::{CompassDirection, Quadrant};

/// Error type for report writing.
#[derive(Debug, Error)]
pub enum ReportError {
    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Date-stamped file name in the inventory convention
/// (`<base>_<MM_DD_YYYY>.<ext>`).
pub fn dated_name(base: &str, extension: &str) -> String {
    format!(
        "{}_{}.{}",
        base,
        Local::now().format("%m_%d_%Y"),
        extension
    )
}

fn opt_f64(value: Option<f64>) -> String {
    value.map(|v| format!("{:.4}", v)).unwrap_or_default()
}

fn opt_quad(value: Option<Quadrant>) -> &'static str {
    value.map(Quadrant::label).unwrap_or("")
}

/// Write the per-point classification table.
pub fn write_point_report<P: AsRef<Path>>(
    path: P,
    points: &[PointClassification],
) -> Result<(), ReportError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    let mut header = String::from("ID");
    for direction in CompassDirection::all() {
        header.push(',');
        header.push_str(direction.label());
    }
    header.push_str(
        ",maxFetch,maxDir,NE_Count,SE_Count,SW_Count,NW_Count,\
         NE_Mean,SE_Mean,SW_Mean,NW_Mean,\
         MaxQFetch,MaxQuadDir,MxQExpCode,QuadCnt1,OneIsMax,\
         MxQFetchOld,MaxQDirO,MxQExpCodeO",
    );
    writeln!(writer, "{}", header)?;

    for point in points {
        let mut row = point.id.to_string();
        for direction in CompassDirection::all() {
            row.push(',');
            row.push_str(&opt_f64(point.rays.get(direction)));
        }
        row.push(',');
        row.push_str(&opt_f64(point.max_fetch));
        row.push(',');
        row.push_str(point.max_fetch_direction.map(|d| d.label()).unwrap_or(""));
        for quadrant in [Quadrant::Ne, Quadrant::Se, Quadrant::Sw, Quadrant::Nw] {
            row.push(',');
            row.push_str(&point.quadrants[quadrant.index()].count.to_string());
        }
        for quadrant in [Quadrant::Ne, Quadrant::Se, Quadrant::Sw, Quadrant::Nw] {
            row.push(',');
            row.push_str(&format!("{:.4}", point.quadrants[quadrant.index()].mean));
        }
        row.push(',');
        row.push_str(&opt_f64(point.max_quad_fetch));
        row.push(',');
        row.push_str(opt_quad(point.max_quad_direction));
        row.push(',');
        row.push_str(point.exposure.label());
        row.push(',');
        row.push_str(opt_quad(point.quad_count_one));
        row.push(',');
        row.push_str(point.override_note.unwrap_or(""));
        row.push(',');
        row.push_str(&opt_f64(point.original_max_quad_fetch));
        row.push(',');
        row.push_str(opt_quad(point.original_max_quad_direction));
        row.push(',');
        row.push_str(point.original_exposure.label());
        writeln!(writer, "{}", row)?;
    }

    Ok(())
}

/// Write the dissolved-run table with any review flags joined on.
pub fn write_run_report<P: AsRef<Path>>(
    path: P,
    runs: &[DissolvedRun],
    flags: &[RunFlag],
) -> Result<(), ReportError> {
    let flags_by_run: HashMap<u32, &RunFlag> = flags.iter().map(|f| (f.run_id, f)).collect();

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    writeln!(
        writer,
        "runID,MxQExpCode,length_m,n_segments,low,moderate,high,comment,doThis"
    )?;

    for run in runs {
        let flag = flags_by_run.get(&run.run_id);
        let (low, moderate, high) = flag
            .map(|f| (f.tally.low, f.tally.moderate, f.tally.high))
            .unwrap_or((0, 0, 0));
        writeln!(
            writer,
            "{},{},{:.4},{},{},{},{},{},{}",
            run.run_id,
            run.exposure.label(),
            run.length_m,
            run.segment_ids.len(),
            low,
            moderate,
            high,
            flag.and_then(|f| f.comment.as_deref()).unwrap_or(""),
            flag.and_then(|f| f.do_this).unwrap_or(""),
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::{classify_rays, ExposureThresholds, RaySet};
    use crate::segments::{flag_short_runs, FlagParams};
    use crate::types::CompassDirection::*;
    use crate::types::ExposureCode;
    use geo::Coord;

    #[test]
    fn test_dated_name_shape() {
        let name = dated_name("Worcester_exposure_points", "csv");
        assert!(name.starts_with("Worcester_exposure_points_"));
        assert!(name.ends_with(".csv"));
        // MM_DD_YYYY adds 10 characters plus separators
        assert_eq!(name.len(), "Worcester_exposure_points_".len() + 10 + 4);
    }

    #[test]
    fn test_point_report_round_values() {
        let mut rays = RaySet::new();
        rays.set(E, 1500.0).unwrap();
        rays.set(Se, 900.0).unwrap();
        let classified = vec![classify_rays(11, &rays, &ExposureThresholds::default())];

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("points.csv");
        write_point_report(&path, &classified).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("ID,n,nne"));
        assert!(header.contains("MxQExpCodeO"));

        let row = lines.next().unwrap();
        assert!(row.starts_with("11,"));
        assert!(row.contains("1500.0000"));
        assert!(row.contains(",moderate"));
    }

    #[test]
    fn test_run_report_includes_flags() {
        let runs = vec![
            DissolvedRun {
                run_id: 1,
                exposure: ExposureCode::Moderate,
                length_m: 100.0,
                segment_ids: vec![1, 2],
                start: Coord { x: 0.0, y: 0.0 },
                end: Coord { x: 100.0, y: 0.0 },
            },
            DissolvedRun {
                run_id: 2,
                exposure: ExposureCode::Low,
                length_m: 10.0,
                segment_ids: vec![3],
                start: Coord { x: 100.0, y: 0.0 },
                end: Coord { x: 110.0, y: 0.0 },
            },
            DissolvedRun {
                run_id: 3,
                exposure: ExposureCode::Moderate,
                length_m: 80.0,
                segment_ids: vec![4],
                start: Coord { x: 110.0, y: 0.0 },
                end: Coord { x: 190.0, y: 0.0 },
            },
        ];
        let flags = flag_short_runs(&runs, &FlagParams::default());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("runs.csv");
        write_run_report(&path, &runs, &flags).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let short_row = text.lines().find(|l| l.starts_with("2,")).unwrap();
        assert!(short_row.contains("change to moderate"));
        let long_row = text.lines().find(|l| l.starts_with("1,")).unwrap();
        assert!(long_row.ends_with(",,"));
    }
}
