use std::path::Path;

use anyhow::{bail, Context as _, Result};
use rusqlite::{params, Connection};
use trailmesh_model::{NodeType, PipelineConfig};
use trailmesh_staging::StagingNamespace;

use crate::geojson::to_geojson;
use crate::schema::{CREATE_TABLES_SQL, SCHEMA_DESCRIPTION, SCHEMA_VERSION};

/// Writes `ns` to a self-contained SQLite file at `path` (spec.md §4.H).
/// Every row is inserted inside one transaction; the file is removed and
/// an error returned if the resulting size exceeds
/// `config.max_snapshot_size_mb` (a `ResourceLimit` failure, spec.md §7).
pub fn export(ns: &StagingNamespace, path: &Path, config: &PipelineConfig) -> Result<()> {
    if path.exists() {
        std::fs::remove_file(path).with_context(|| format!("removing stale snapshot at {path:?}"))?;
    }
    let mut conn = Connection::open(path).with_context(|| format!("opening snapshot at {path:?}"))?;
    conn.execute_batch(CREATE_TABLES_SQL)?;

    let tx = conn.transaction()?;
    write_trails(&tx, ns)?;
    write_nodes(&tx, ns)?;
    write_edges(&tx, ns)?;
    write_region_metadata(&tx, ns)?;
    tx.execute(
        "INSERT INTO schema_version (version, description) VALUES (?1, ?2)",
        params![SCHEMA_VERSION, SCHEMA_DESCRIPTION],
    )?;
    tx.commit()?;
    conn.close().map_err(|(_, err)| err)?;

    let size_mb = std::fs::metadata(path)?.len() as f64 / (1024.0 * 1024.0);
    if size_mb > config.max_snapshot_size_mb {
        std::fs::remove_file(path).ok();
        bail!("snapshot size {size_mb:.2} MB exceeds budget of {:.2} MB", config.max_snapshot_size_mb);
    }
    tracing::info!(path = %path.display(), size_mb, "snapshot exported");
    Ok(())
}

fn write_trails(tx: &rusqlite::Transaction, ns: &StagingNamespace) -> Result<()> {
    let mut stmt = tx.prepare(
        "INSERT INTO trails (trail_id, name, region, trail_type, surface, difficulty, geometry_geojson, \
         length_km, elevation_gain_m, elevation_loss_m, elevation_min_m, elevation_max_m, elevation_avg_m, \
         source, original_trail_id) VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9,?10,?11,?12,?13,?14,?15)",
    )?;
    for trail in ns.trails() {
        stmt.execute(params![
            trail.trail_id.to_string(),
            &trail.name,
            &trail.region,
            &trail.trail_type,
            &trail.surface,
            &trail.difficulty,
            to_geojson(&trail.geometry),
            trail.length_km,
            trail.elevation.gain_m,
            trail.elevation.loss_m,
            trail.elevation.min_m,
            trail.elevation.max_m,
            trail.elevation.avg_m,
            &trail.source,
            trail.original_trail_id.map(|id| id.to_string()),
        ])?;
    }
    Ok(())
}

fn write_nodes(tx: &rusqlite::Transaction, ns: &StagingNamespace) -> Result<()> {
    let mut stmt = tx.prepare(
        "INSERT INTO routing_nodes (node_id, lng, lat, elevation_m, node_type, connected_trail_ids) \
         VALUES (?1,?2,?3,?4,?5,?6)",
    )?;
    for node in ns.nodes() {
        let node_type = match node.node_type {
            NodeType::Intersection => "intersection",
            NodeType::Endpoint => "endpoint",
        };
        let connected: Vec<String> = node.connected_trail_ids.iter().map(|id| id.to_string()).collect();
        stmt.execute(params![
            node.node_id.0 as i64,
            node.point.lng,
            node.point.lat,
            node.point.elevation,
            node_type,
            serde_json::to_string(&connected)?,
        ])?;
    }
    Ok(())
}

fn write_edges(tx: &rusqlite::Transaction, ns: &StagingNamespace) -> Result<()> {
    let mut stmt = tx.prepare(
        "INSERT INTO routing_edges (edge_id, source_node, target_node, trail_id, trail_name, distance_km, \
         elevation_gain_m, elevation_loss_m, geometry_geojson) VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9)",
    )?;
    for edge in ns.edges() {
        stmt.execute(params![
            edge.edge_id.0 as i64,
            edge.source_node.0 as i64,
            edge.target_node.0 as i64,
            edge.trail_id.to_string(),
            &edge.trail_name,
            edge.distance_km,
            edge.elevation_gain_m,
            edge.elevation_loss_m,
            to_geojson(&edge.geometry),
        ])?;
    }
    Ok(())
}

fn write_region_metadata(tx: &rusqlite::Transaction, ns: &StagingNamespace) -> Result<()> {
    let mut stmt = tx.prepare("INSERT INTO region_metadata (key, value) VALUES (?1, ?2)")?;
    for (key, value) in ns.region_metadata() {
        stmt.execute(params![key, value])?;
    }
    Ok(())
}
