use trailmesh_detect::detect_intersections;
use trailmesh_geom::{Line3, Point3};
use trailmesh_model::{IntersectionKind, PipelineConfig, Trail, TrailId};

fn trail(name: &str, pts: &[(f64, f64)]) -> Trail {
    let line = Line3::new(pts.iter().map(|&(x, y)| Point3::new_2d(x, y)).collect()).unwrap();
    Trail::from_geometry(TrailId::new(), name, "boulder", "test", line, None)
}

/// S1: two disjoint trails produce no intersection points.
#[test]
fn disjoint_trails_produce_nothing() {
    let a = trail("north loop", &[(-105.3, 40.0), (-105.3, 40.1)]);
    let b = trail("south loop", &[(-104.0, 38.0), (-104.0, 38.1)]);
    let config = PipelineConfig::default();
    assert!(detect_intersections(&[a, b], &config).is_empty());
}

/// S2: two trails that meet exactly at a shared vertex produce one
/// crossing-kind intersection at that vertex.
#[test]
fn shared_vertex_meeting_is_detected() {
    let a = trail("trail-a", &[(-105.3, 40.0), (-105.2, 40.0)]);
    let b = trail("trail-b", &[(-105.2, 40.0), (-105.2, 40.1)]);
    let config = PipelineConfig::default();
    let found = detect_intersections(&[a, b], &config);
    assert_eq!(found.len(), 1);
    let distance = trailmesh_geom::geodesic_distance_m(found[0].point, Point3::new_2d(-105.2, 40.0));
    assert!(distance < 0.01, "expected the shared vertex, got {distance}m away");
}

/// S3: two trails crossing in an X produce exactly one crossing point.
#[test]
fn crossing_x_produces_one_point() {
    let a = trail("north-south", &[(-105.25, 39.9), (-105.25, 40.1)]);
    let b = trail("east-west", &[(-105.3, 40.0), (-105.2, 40.0)]);
    let config = PipelineConfig::default();
    let found = detect_intersections(&[a, b], &config);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].kind, IntersectionKind::Crossing);
    assert_eq!(found[0].trail_ids.len(), 2);
}

/// S4: a spur trail whose endpoint lands within the default 3m
/// T-intersection tolerance of another trail's interior is detected as a
/// `TEndpoint`, not a `Crossing`.
#[test]
fn t_intersection_at_default_tolerance_is_detected() {
    let through = trail("through-trail", &[(-105.3, 40.0), (-105.2, 40.0)]);
    // ~2m north of the through-trail's interior (1 degree lat ~= 111km,
    // so 2m ~= 1.8e-5 degrees).
    let spur = trail("spur-trail", &[(-105.25, 40.000018), (-105.25, 40.05)]);
    let config = PipelineConfig::default();
    let found = detect_intersections(&[through, spur], &config);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].kind, IntersectionKind::TEndpoint);
}

/// Near-duplicate crossing points collapse into a single clustered point
/// whose `trail_ids` union every contributing trail.
#[test]
fn near_duplicate_points_across_three_trails_cluster_together() {
    let a = trail("a", &[(-105.25, 39.9), (-105.25, 40.1)]);
    let b = trail("b", &[(-105.3, 40.0), (-105.2, 40.0)]);
    // c crosses a at almost the same point as b does, within clustering
    // radius of the a-b crossing.
    let c = trail("c", &[(-105.3, 40.00000005), (-105.2, 40.00000005)]);
    let config = PipelineConfig::default();
    let found = detect_intersections(&[a, b, c], &config);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].trail_ids.len(), 3);
}
