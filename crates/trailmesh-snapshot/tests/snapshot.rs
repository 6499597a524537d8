use trailmesh_geom::{Line3, Point3};
use trailmesh_model::{Edge, EdgeId, Node, NodeId, NodeType, PipelineConfig, Trail, TrailId};
use trailmesh_snapshot::{export, SnapshotReader, SCHEMA_VERSION};
use trailmesh_staging::StagingNamespace;

fn sample_namespace() -> StagingNamespace {
    let mut ns = StagingNamespace::create("run").unwrap();
    let line = Line3::new(vec![
        Point3::new(-105.3, 40.0, Some(1800.0)),
        Point3::new(-105.2, 40.0, Some(1820.0)),
    ])
    .unwrap();
    let trail = Trail::from_geometry(TrailId::new(), "Bear Peak Trail", "boulder", "osm", line.clone(), None);
    let trail_id = trail.trail_id;
    ns.insert_trail_untracked(trail);
    ns.set_region_metadata("region", "boulder");

    let node_a = Node { node_id: NodeId(0), point: line.first(), node_type: NodeType::Endpoint, connected_trail_ids: vec![trail_id] };
    let node_b = Node { node_id: NodeId(1), point: line.last(), node_type: NodeType::Endpoint, connected_trail_ids: vec![trail_id] };
    let edge = Edge {
        edge_id: EdgeId(0),
        source_node: NodeId(0),
        target_node: NodeId(1),
        trail_id,
        trail_name: "Bear Peak Trail".into(),
        distance_km: 1.0,
        elevation_gain_m: 20.0,
        elevation_loss_m: 0.0,
        geometry: Line3::new(vec![node_a.point, node_b.point]).unwrap(),
    };
    ns.set_graph(vec![node_a, node_b], vec![edge]);
    ns
}

#[test]
fn export_then_open_round_trips_structure_and_version() {
    let ns = sample_namespace();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("network.sqlite3");
    export(&ns, &path, &PipelineConfig::default()).unwrap();

    let reader = SnapshotReader::open(&path).unwrap();
    assert_eq!(reader.schema_version().unwrap(), SCHEMA_VERSION);
    assert_eq!(reader.trail_count().unwrap(), 1);
    assert_eq!(reader.node_count().unwrap(), 2);
    assert_eq!(reader.edge_count().unwrap(), 1);
}

#[test]
fn export_over_size_budget_is_rejected_and_file_removed() {
    let ns = sample_namespace();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("oversized.sqlite3");
    let mut config = PipelineConfig::default();
    config.max_snapshot_size_mb = 0.0;

    assert!(export(&ns, &path, &config).is_err());
    assert!(!path.exists());
}

#[test]
fn reader_rejects_unrecognized_schema_version() {
    let ns = sample_namespace();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stale_version.sqlite3");
    export(&ns, &path, &PipelineConfig::default()).unwrap();

    let conn = rusqlite::Connection::open(&path).unwrap();
    conn.execute("UPDATE schema_version SET version = 1", []).unwrap();
    drop(conn);

    assert!(SnapshotReader::open(&path).is_err());
}
