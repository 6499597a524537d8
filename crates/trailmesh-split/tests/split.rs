use trailmesh_geom::{closest_point, Line3, Point3};
use trailmesh_model::{PipelineConfig, Trail, TrailId};
use trailmesh_split::{execute_split, SplitPointInput, TrailSplitOperation, ValidationFailure};

fn straight_trail(length_deg: f64) -> Trail {
    let line = Line3::new(vec![Point3::new_2d(-105.3, 40.0), Point3::new_2d(-105.3 + length_deg, 40.0)])
        .unwrap();
    Trail::from_geometry(TrailId::new(), "Straight Trail", "boulder", "test", line, None)
}

/// S3-style crossing scenario collapsed to a single trail: splitting a
/// straight trail at one interior point yields exactly two segments whose
/// combined length matches the original within tolerance.
#[test]
fn crossing_split_preserves_total_length() {
    let original = straight_trail(0.2);
    let mid = closest_point(&original.geometry, Point3::new_2d(-105.2, 40.0));
    let op = TrailSplitOperation {
        original: original.clone(),
        split_points: vec![SplitPointInput { lng: mid.lng, lat: mid.lat, distance_along_m: 0.0 }],
    };
    let config = PipelineConfig::default();
    let outcome = execute_split(&op, &config).unwrap();
    assert_eq!(outcome.segments.len(), 2);
    let total: f64 = outcome.segments.iter().map(|s| s.length_km).sum();
    assert!((total - original.length_km).abs() / original.length_km < 0.01);
}

/// S5: when every candidate segment falls below the minimum segment
/// length, the split is rejected outright rather than committing slivers.
#[test]
fn split_below_minimum_segment_length_is_rejected() {
    let original = straight_trail(0.1);
    let mid = closest_point(&original.geometry, Point3::new_2d(-105.25, 40.0));
    let op = TrailSplitOperation {
        original: original.clone(),
        split_points: vec![SplitPointInput { lng: mid.lng, lat: mid.lat, distance_along_m: 0.0 }],
    };
    let mut config = PipelineConfig::default();
    // Each resulting segment is ~5.5km; set the floor far above that so
    // both segments are discarded as slivers before validation runs.
    config.min_segment_length_meters = 10_000.0;
    let result = execute_split(&op, &config);
    assert!(matches!(result, Err(ValidationFailure::NoSegmentsSurvived)));
}
