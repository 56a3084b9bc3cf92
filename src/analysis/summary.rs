//! Run-level summaries of the classification output.

use std::fmt;

use crate::fetch::PointClassification;
use crate::types::ExposureCode;

/// Point counts per exposure band for one analysis run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExposureSummary {
    /// Total points classified.
    pub n_points: usize,
    /// Points classified "low".
    pub low: usize,
    /// Points classified "moderate".
    pub moderate: usize,
    /// Points classified "high".
    pub high: usize,
    /// Points with no ray data at all.
    pub point_misplacement: usize,
    /// Points where the single-ray override replaced the quadrant max.
    pub overrides: usize,
}

impl ExposureSummary {
    /// Tally a batch of classified points.
    pub fn from_points(points: &[PointClassification]) -> Self {
        let mut summary = Self {
            n_points: points.len(),
            ..Self::default()
        };
        for point in points {
            match point.exposure {
                ExposureCode::Low => summary.low += 1,
                ExposureCode::Moderate => summary.moderate += 1,
                ExposureCode::High => summary.high += 1,
                ExposureCode::PointMisplacement => summary.point_misplacement += 1,
            }
            if point.override_note.is_some() {
                summary.overrides += 1;
            }
        }
        summary
    }
}

impl fmt::Display for ExposureSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Exposure Summary ({} points)", self.n_points)?;
        writeln!(f, "  Low:               {}", self.low)?;
        writeln!(f, "  Moderate:          {}", self.moderate)?;
        writeln!(f, "  High:              {}", self.high)?;
        writeln!(f, "  Point misplacement: {}", self.point_misplacement)?;
        writeln!(f, "  Single-ray overrides: {}", self.overrides)
    }
}
