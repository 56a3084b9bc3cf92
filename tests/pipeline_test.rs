//! End-to-end test of the geometry-through-flags pipeline on synthetic
//! study areas.

use fetch_rs::analysis::run_from_geometry;
use fetch_rs::arcs::LandWaterMask;
use fetch_rs::config::AnalysisConfig;
use fetch_rs::types::ExposureCode;
use geo::{polygon, LineString};

/// Square island of the given side length with its southwest corner at
/// the origin. The island is land; everything around it is open water.
fn island(side: f64) -> (LineString<f64>, LandWaterMask) {
    let ring = vec![
        (0.0, 0.0),
        (side, 0.0),
        (side, side),
        (0.0, side),
        (0.0, 0.0),
    ];
    let shoreline = LineString::from(ring);
    let mask = LandWaterMask::from_polygons(vec![polygon![
        (x: 0.0, y: 0.0),
        (x: side, y: 0.0),
        (x: side, y: side),
        (x: 0.0, y: side),
        (x: 0.0, y: 0.0),
    ]]);
    (shoreline, mask)
}

#[test]
fn island_in_open_water_is_high_everywhere() {
    let (shoreline, mask) = island(400.0);
    let config = AnalysisConfig::default();

    let run = run_from_geometry(&shoreline, &mask, &config).unwrap();

    // 1600 m perimeter at 25 m spacing
    assert_eq!(run.points.len(), 64);
    assert_eq!(run.segments.len(), 64);

    for point in &run.points {
        assert_eq!(
            point.exposure,
            ExposureCode::High,
            "point {} should be high exposure, got {}",
            point.id,
            point.exposure
        );
        // Open water on the seaward side: the longest ray runs the full
        // configured length
        assert!(point.max_fetch.unwrap() > 9000.0);
    }

    // One contiguous same-code run around the island, nothing to flag
    assert_eq!(run.runs.len(), 1);
    assert_eq!(run.runs[0].segment_ids.len(), 64);
    assert!(run.flags.is_empty());
    assert_eq!(run.summary.high, 64);
    assert_eq!(run.summary.n_points, 64);
}

#[test]
fn landlocked_shoreline_is_point_misplacement() {
    // A stray shoreline piece deep inside a 30 km land mass: every ray
    // stays over land.
    let shoreline = LineString::from(vec![(0.0, 0.0), (50.0, 0.0)]);
    let mask = LandWaterMask::from_polygons(vec![polygon![
        (x: -15_000.0, y: -15_000.0),
        (x: 15_000.0, y: -15_000.0),
        (x: 15_000.0, y: 15_000.0),
        (x: -15_000.0, y: 15_000.0),
        (x: -15_000.0, y: -15_000.0),
    ]]);

    let run = run_from_geometry(&shoreline, &mask, &AnalysisConfig::default()).unwrap();

    assert_eq!(run.points.len(), 2);
    for point in &run.points {
        assert_eq!(point.exposure, ExposureCode::PointMisplacement);
        assert!(point.max_fetch.is_none());
        assert!(point.rays.is_empty());
    }
    assert_eq!(run.summary.point_misplacement, 2);

    // The two misplaced segments dissolve into one 50 m run; too long
    // for the small-segment pass.
    assert_eq!(run.runs.len(), 1);
    assert!(run.flags.is_empty());
}

#[test]
fn channel_clips_rays_at_the_far_shore() {
    // A 500 m wide channel between two land slabs. Points on the south
    // slab's north edge see exactly the channel width to the north; the
    // cross-channel rays are clipped at the far shore.
    let shoreline = LineString::from(vec![(-1000.0, 0.0), (1000.0, 0.0)]);
    let mask = LandWaterMask::from_polygons(vec![
        // South slab, thick enough that no ray exits it
        polygon![
            (x: -30_000.0, y: -30_000.0),
            (x: 30_000.0, y: -30_000.0),
            (x: 30_000.0, y: 0.0),
            (x: -30_000.0, y: 0.0),
            (x: -30_000.0, y: -30_000.0),
        ],
        // North slab across the channel
        polygon![
            (x: -30_000.0, y: 500.0),
            (x: 30_000.0, y: 500.0),
            (x: 30_000.0, y: 30_000.0),
            (x: -30_000.0, y: 30_000.0),
            (x: -30_000.0, y: 500.0),
        ],
    ]);

    let run = run_from_geometry(&shoreline, &mask, &AnalysisConfig::default()).unwrap();
    assert_eq!(run.points.len(), 80);

    use fetch_rs::types::CompassDirection;
    for point in &run.points {
        assert_ne!(point.exposure, ExposureCode::PointMisplacement);
        // North ray stops at the far shore
        let north = point.rays.get(CompassDirection::N).unwrap();
        assert!((north - 500.0).abs() < 1.0);
        // The diagonal toward the far shore is the channel width over
        // cos(45 degrees)
        let ne = point.rays.get(CompassDirection::Ne).unwrap();
        assert!((ne - 500.0 * std::f64::consts::SQRT_2).abs() < 1.0);
        // Southward rays run over land only
        assert!(point.rays.get(CompassDirection::S).is_none());
    }
}
