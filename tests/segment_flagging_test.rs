//! Integration tests for dissolving and small-segment flagging.

use fetch_rs::segments::{
    dissolve, flag_short_runs, ClassifiedSegment, FlagParams, MARSH_ISLAND_COMMENT,
};
use fetch_rs::types::ExposureCode;
use geo::Coord;

const GAP_TOL: f64 = 0.25;

/// Chain of segments along the x axis; each entry is (length, code).
fn chain(entries: &[(f64, ExposureCode)]) -> Vec<ClassifiedSegment> {
    let mut x = 0.0;
    entries
        .iter()
        .enumerate()
        .map(|(i, &(length, exposure))| {
            let seg = ClassifiedSegment {
                id: i as u32 + 1,
                length_m: length,
                exposure,
                start: Coord { x, y: 0.0 },
                end: Coord {
                    x: x + length,
                    y: 0.0,
                },
            };
            x += length;
            seg
        })
        .collect()
}

#[test]
fn short_run_flanked_by_same_code_gets_change_comment() {
    use ExposureCode::*;
    // 10 m low run between two moderate stretches
    let segments = chain(&[(100.0, Moderate), (10.0, Low), (120.0, Moderate)]);
    let runs = dissolve(&segments, GAP_TOL);
    assert_eq!(runs.len(), 3);

    let flags = flag_short_runs(&runs, &FlagParams::default());
    assert_eq!(flags.len(), 1);
    assert_eq!(flags[0].run_id, 2);
    assert_eq!(flags[0].tally.moderate, 2);
    assert_eq!(flags[0].comment.as_deref(), Some("change to moderate"));
    assert!(flags[0].do_this.is_none());
}

#[test]
fn short_run_with_one_differing_neighbor_gets_qc() {
    use ExposureCode::*;
    // Moderate | 10 m low | high: two differing single neighbors, the
    // later band (high) drives the overwrite but the value is "qc"
    // either way.
    let segments = chain(&[(100.0, Moderate), (10.0, Low), (120.0, High)]);
    let runs = dissolve(&segments, GAP_TOL);
    let flags = flag_short_runs(&runs, &FlagParams::default());

    assert_eq!(flags.len(), 1);
    assert_eq!(flags[0].tally.moderate, 1);
    assert_eq!(flags[0].tally.high, 1);
    assert_eq!(flags[0].do_this, Some("qc"));
    assert!(flags[0].comment.is_none());
}

#[test]
fn dissolve_merges_before_flagging() {
    use ExposureCode::*;
    // Three consecutive 10 m moderate segments merge into one 30 m run,
    // which is then too long to flag.
    let segments = chain(&[
        (100.0, Low),
        (10.0, Moderate),
        (10.0, Moderate),
        (10.0, Moderate),
        (100.0, Low),
    ]);
    let runs = dissolve(&segments, GAP_TOL);
    assert_eq!(runs.len(), 3);
    assert_eq!(runs[1].length_m, 30.0);
    assert_eq!(runs[1].segment_ids, vec![2, 3, 4]);

    let flags = flag_short_runs(&runs, &FlagParams::default());
    assert!(flags.is_empty());
}

#[test]
fn isolated_short_run_is_marsh_island() {
    use ExposureCode::*;
    let mut segments = chain(&[(100.0, Moderate), (10.0, Low), (120.0, Moderate)]);
    // Pull the short segment away from its neighbors (an island)
    segments[1].start = Coord { x: 500.0, y: 500.0 };
    segments[1].end = Coord { x: 510.0, y: 500.0 };
    segments[2].start = segments[0].end;

    let runs = dissolve(&segments, GAP_TOL);
    // The island breaks the sequence: three runs, the short one with no
    // neighbor within tolerance.
    assert_eq!(runs.len(), 3);

    let flags = flag_short_runs(&runs, &FlagParams::default());
    assert_eq!(flags.len(), 1);
    assert_eq!(flags[0].comment.as_deref(), Some(MARSH_ISLAND_COMMENT));
    assert!(flags[0].do_this.is_none());
}

#[test]
fn misplacement_neighbors_do_not_enter_tally() {
    use ExposureCode::*;
    let segments = chain(&[
        (100.0, PointMisplacement),
        (10.0, Low),
        (120.0, PointMisplacement),
    ]);
    let runs = dissolve(&segments, GAP_TOL);
    let flags = flag_short_runs(&runs, &FlagParams::default());

    assert_eq!(flags.len(), 1);
    assert_eq!(flags[0].tally.low, 0);
    assert_eq!(flags[0].tally.moderate, 0);
    assert_eq!(flags[0].tally.high, 0);
    assert_eq!(flags[0].comment.as_deref(), Some(MARSH_ISLAND_COMMENT));
}

#[test]
fn flags_are_advisory_only() {
    use ExposureCode::*;
    let segments = chain(&[(100.0, Moderate), (10.0, Low), (120.0, Moderate)]);
    let runs = dissolve(&segments, GAP_TOL);
    let before: Vec<ExposureCode> = runs.iter().map(|r| r.exposure).collect();

    let _flags = flag_short_runs(&runs, &FlagParams::default());
    let after: Vec<ExposureCode> = runs.iter().map(|r| r.exposure).collect();
    assert_eq!(before, after);
}

#[test]
fn custom_length_threshold() {
    use ExposureCode::*;
    let segments = chain(&[(100.0, Moderate), (40.0, Low), (120.0, Moderate)]);
    let runs = dissolve(&segments, GAP_TOL);

    // 40 m run is not small at the default threshold
    assert!(flag_short_runs(&runs, &FlagParams::default()).is_empty());

    let params = FlagParams {
        max_length_m: 50.0,
        ..FlagParams::default()
    };
    let flags = flag_short_runs(&runs, &params);
    assert_eq!(flags.len(), 1);
    assert_eq!(flags[0].comment.as_deref(), Some("change to moderate"));
}
