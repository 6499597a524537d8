use trailmesh_dedup::deduplicate;
use trailmesh_geom::{Line3, Point3};
use trailmesh_manager::{IntegrityReport, SplitManager};
use trailmesh_model::{PipelineConfig, Trail, TrailId};
use trailmesh_staging::StagingNamespace;

fn trail(name: &str, pts: &[(f64, f64)]) -> Trail {
    let line = Line3::new(pts.iter().map(|&(x, y)| Point3::new_2d(x, y)).collect()).unwrap();
    Trail::from_geometry(TrailId::new(), name, "boulder", "test", line, None)
}

/// Three recordings of the same physical trail (identical geometry, so
/// the length tie-break falls through to name) collapse to the one whose
/// name sorts first, and the run still passes the manager's integrity
/// gate (deletions are matched by tracking, not by length conservation).
#[test]
fn three_duplicate_recordings_collapse_to_one_survivor() {
    let mut ns = StagingNamespace::create("run").unwrap();
    let points = &[(-105.3, 40.0), (-105.2, 40.0)];
    let survivor = trail("Bear Peak Trail", points);
    let survivor_id = survivor.trail_id;
    ns.insert_trail_untracked(survivor);
    ns.insert_trail_untracked(trail("Bear Peak Trail (GPS 2)", points));
    ns.insert_trail_untracked(trail("Bear Peak Trail (GPS 3)", points));

    let mut manager = SplitManager::new(PipelineConfig::default());
    let deleted = deduplicate(&mut ns, &mut manager, "dedup");

    assert_eq!(deleted.len(), 2);
    assert_eq!(ns.trail_count(), 1);
    assert!(ns.get_trail(&survivor_id).is_some());
    assert_eq!(manager.validate_geometry_integrity(&ns), IntegrityReport::Ok);
}

/// A trail that strictly contains a much shorter one (e.g. a segment
/// already split out) is not treated as a duplicate of it.
#[test]
fn contained_trail_is_not_deduplicated() {
    let mut ns = StagingNamespace::create("run").unwrap();
    ns.insert_trail_untracked(trail("Full Loop", &[(-105.3, 40.0), (-105.2, 40.0)]));
    ns.insert_trail_untracked(trail("Full Loop Segment", &[(-105.26, 40.0), (-105.24, 40.0)]));

    let mut manager = SplitManager::new(PipelineConfig::default());
    let deleted = deduplicate(&mut ns, &mut manager, "dedup");
    assert!(deleted.is_empty());
    assert_eq!(ns.trail_count(), 2);
}
