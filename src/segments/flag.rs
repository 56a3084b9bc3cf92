//! Small-segment review flags.
//!
//! Short dissolved runs whose exposure code differs from their
//! surroundings are usually artifacts of the point spacing rather than
//! real exposure changes. This pass finds runs at or under a length
//! threshold, tallies the codes of the runs touching their endpoints,
//! and attaches advisory comments. It never changes an exposure code;
//! a human applies (or rejects) the suggestion.

use crate::types::ExposureCode;

use super::dissolve::DissolvedRun;

/// Runs at or under this length are candidates for review (meters).
pub const SMALL_RUN_MAX_LENGTH_M: f64 = 25.1;

/// Endpoint proximity that counts as adjacency (meters).
pub const ENDPOINT_TOLERANCE_M: f64 = 0.25;

/// Advisory action when neighbor evidence is ambiguous.
pub const DO_THIS_QC: &str = "qc";

/// Advisory comment for short runs with no differing neighbor at all.
pub const MARSH_ISLAND_COMMENT: &str = "marsh island?";

/// Parameters of the flagging pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlagParams {
    /// Maximum run length considered "small" (meters).
    pub max_length_m: f64,
    /// Endpoint tolerance for neighbor detection (meters).
    pub endpoint_tolerance_m: f64,
}

impl Default for FlagParams {
    fn default() -> Self {
        Self {
            max_length_m: SMALL_RUN_MAX_LENGTH_M,
            endpoint_tolerance_m: ENDPOINT_TOLERANCE_M,
        }
    }
}

/// Neighbor-run counts per exposure band.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NeighborTally {
    /// Adjacent runs coded "low".
    pub low: u32,
    /// Adjacent runs coded "moderate".
    pub moderate: u32,
    /// Adjacent runs coded "high".
    pub high: u32,
}

impl NeighborTally {
    fn add(&mut self, code: ExposureCode) {
        match code {
            ExposureCode::Low => self.low += 1,
            ExposureCode::Moderate => self.moderate += 1,
            ExposureCode::High => self.high += 1,
            // The misplacement sentinel never participates in the tally.
            ExposureCode::PointMisplacement => {}
        }
    }

    /// Count for one of the three bands.
    pub fn get(&self, code: ExposureCode) -> u32 {
        match code {
            ExposureCode::Low => self.low,
            ExposureCode::Moderate => self.moderate,
            ExposureCode::High => self.high,
            ExposureCode::PointMisplacement => 0,
        }
    }
}

/// Review flag for one short run.
#[derive(Clone, Debug, PartialEq)]
pub struct RunFlag {
    /// Id of the flagged run.
    pub run_id: u32,
    /// The run's own exposure code.
    pub exposure: ExposureCode,
    /// Run length in meters.
    pub length_m: f64,
    /// Neighbor-run counts per band.
    pub tally: NeighborTally,
    /// "change to <code>" or "marsh island?" when set.
    pub comment: Option<String>,
    /// "qc" when neighbor evidence is ambiguous.
    pub do_this: Option<&'static str>,
}

fn coords_close(a: geo::Coord<f64>, b: geo::Coord<f64>, tolerance: f64) -> bool {
    (a.x - b.x).powi(2) + (a.y - b.y).powi(2) <= tolerance * tolerance
}

fn runs_adjacent(a: &DissolvedRun, b: &DissolvedRun, tolerance: f64) -> bool {
    for pa in [a.start, a.end] {
        for pb in [b.start, b.end] {
            if coords_close(pa, pb, tolerance) {
                return true;
            }
        }
    }
    false
}

/// Flag every run at or under the small-run length threshold.
///
/// For each short run the codes of the runs sharing an endpoint (the run
/// itself excluded) are tallied per band, then the rules are evaluated
/// for low, moderate, and high in that order, each later match
/// overwriting the earlier:
///
/// - exactly two neighbors of one band → comment "change to <band>",
/// - exactly one neighbor of a band that differs from the run's own
///   code → doThis "qc".
///
/// A short run matching neither rule (no differing neighbor found, for
/// example when isolated by water gaps) is commented "marsh island?".
pub fn flag_short_runs(runs: &[DissolvedRun], params: &FlagParams) -> Vec<RunFlag> {
    let mut flags = Vec::new();

    for (i, run) in runs.iter().enumerate() {
        if run.length_m > params.max_length_m {
            continue;
        }

        let mut tally = NeighborTally::default();
        for (j, other) in runs.iter().enumerate() {
            if i != j && runs_adjacent(run, other, params.endpoint_tolerance_m) {
                tally.add(other.exposure);
            }
        }

        let mut comment: Option<String> = None;
        let mut do_this: Option<&'static str> = None;
        for code in ExposureCode::bands() {
            match tally.get(code) {
                2 => comment = Some(format!("change to {}", code)),
                1 if run.exposure != code => do_this = Some(DO_THIS_QC),
                _ => {}
            }
        }

        if comment.is_none() && do_this.is_none() {
            comment = Some(MARSH_ISLAND_COMMENT.to_string());
        }

        flags.push(RunFlag {
            run_id: run.run_id,
            exposure: run.exposure,
            length_m: run.length_m,
            tally,
            comment,
            do_this,
        });
    }

    flags
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Coord;

    fn run(run_id: u32, x0: f64, x1: f64, exposure: ExposureCode) -> DissolvedRun {
        DissolvedRun {
            run_id,
            exposure,
            length_m: x1 - x0,
            segment_ids: vec![run_id],
            start: Coord { x: x0, y: 0.0 },
            end: Coord { x: x1, y: 0.0 },
        }
    }

    #[test]
    fn test_change_to_comment_when_flanked_by_same_code() {
        // 10 m low run between two moderate runs
        let runs = vec![
            run(1, 0.0, 100.0, ExposureCode::Moderate),
            run(2, 100.0, 110.0, ExposureCode::Low),
            run(3, 110.0, 300.0, ExposureCode::Moderate),
        ];
        let flags = flag_short_runs(&runs, &FlagParams::default());

        assert_eq!(flags.len(), 1);
        let flag = &flags[0];
        assert_eq!(flag.run_id, 2);
        assert_eq!(flag.tally.moderate, 2);
        assert_eq!(flag.comment.as_deref(), Some("change to moderate"));
        assert!(flag.do_this.is_none());
    }

    #[test]
    fn test_qc_when_one_differing_neighbor() {
        // 10 m low run between a moderate run and a gap-separated low run
        let runs = vec![
            run(1, 0.0, 100.0, ExposureCode::Moderate),
            run(2, 100.0, 110.0, ExposureCode::Low),
            // 5 m water gap before the next run
            run(3, 115.0, 300.0, ExposureCode::Low),
        ];
        let flags = flag_short_runs(&runs, &FlagParams::default());

        let flag = &flags[0];
        assert_eq!(flag.tally.moderate, 1);
        assert_eq!(flag.tally.low, 0);
        assert_eq!(flag.do_this, Some(DO_THIS_QC));
        assert!(flag.comment.is_none());
    }

    #[test]
    fn test_marsh_island_when_isolated() {
        let runs = vec![
            run(1, 0.0, 100.0, ExposureCode::Moderate),
            // Isolated 20 m run, gaps on both sides
            run(2, 150.0, 170.0, ExposureCode::Low),
            run(3, 220.0, 300.0, ExposureCode::Moderate),
        ];
        let flags = flag_short_runs(&runs, &FlagParams::default());

        let flag = &flags[0];
        assert_eq!(flag.tally, NeighborTally::default());
        assert_eq!(flag.comment.as_deref(), Some(MARSH_ISLAND_COMMENT));
        assert!(flag.do_this.is_none());
    }

    #[test]
    fn test_long_runs_not_flagged() {
        let runs = vec![
            run(1, 0.0, 100.0, ExposureCode::Low),
            run(2, 100.0, 200.0, ExposureCode::High),
        ];
        assert!(flag_short_runs(&runs, &FlagParams::default()).is_empty());
    }

    #[test]
    fn test_boundary_length_is_flagged() {
        let runs = vec![
            run(1, 0.0, 100.0, ExposureCode::Moderate),
            run(2, 100.0, 125.1, ExposureCode::Low),
            run(3, 125.1, 300.0, ExposureCode::Moderate),
        ];
        let flags = flag_short_runs(&runs, &FlagParams::default());
        assert_eq!(flags.len(), 1);
        assert_eq!(flags[0].comment.as_deref(), Some("change to moderate"));
    }

    #[test]
    fn test_qc_with_matching_neighbor_on_other_side() {
        // Short low run: moderate on one side, low (its own code, left
        // unmerged by a junction) on the other. One differing neighbor
        // -> qc.
        let runs = vec![
            run(1, 0.0, 100.0, ExposureCode::Moderate),
            run(2, 100.0, 110.0, ExposureCode::Low),
            run(3, 110.0, 300.0, ExposureCode::Low),
        ];
        let flags = flag_short_runs(&runs, &FlagParams::default());

        let flag = &flags[0];
        assert_eq!(flag.tally.moderate, 1);
        assert_eq!(flag.tally.low, 1);
        // low == own code, so only the moderate neighbor drives the rule
        assert_eq!(flag.do_this, Some(DO_THIS_QC));
        assert!(flag.comment.is_none());
    }
}
