use std::collections::HashSet;
use std::path::Path;

use anyhow::{bail, Context as _, Result};
use rusqlite::Connection;

use crate::schema::SCHEMA_VERSION;

const REQUIRED_TABLES: &[(&str, &[&str])] = &[
    ("trails", &["trail_id", "name", "region", "geometry_geojson", "length_km", "elevation_gain_m", "elevation_loss_m"]),
    ("routing_nodes", &["node_id", "lng", "lat", "node_type", "connected_trail_ids"]),
    ("routing_edges", &["edge_id", "source_node", "target_node", "trail_id", "distance_km"]),
    ("region_metadata", &["key", "value"]),
    ("schema_version", &["version", "description"]),
];

/// A validated handle onto an exported snapshot file.
///
/// Construction performs the structural post-check spec.md §4.H
/// describes: every required table and column is present, the recorded
/// `schema_version` is one this reader recognizes, and a coordinate/
/// elevation range sample passes. A `SnapshotReader` in hand is always
/// structurally sound — callers never have to re-check it.
pub struct SnapshotReader {
    conn: Connection,
}

impl SnapshotReader {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).with_context(|| format!("opening snapshot at {path:?}"))?;
        let reader = Self { conn };
        reader.check_structure()?;
        reader.check_schema_version()?;
        reader.check_sample_ranges()?;
        Ok(reader)
    }

    fn check_structure(&self) -> Result<()> {
        for (table, columns) in REQUIRED_TABLES {
            let mut stmt = self.conn.prepare(&format!("PRAGMA table_info({table})"))?;
            let found: HashSet<String> = stmt
                .query_map([], |row| row.get::<_, String>(1))?
                .collect::<rusqlite::Result<_>>()
                .with_context(|| format!("reading columns of table {table:?}"))?;
            if found.is_empty() {
                bail!("snapshot is missing required table {table:?}");
            }
            for column in *columns {
                if !found.contains(*column) {
                    bail!("table {table:?} is missing required column {column:?}");
                }
            }
        }
        Ok(())
    }

    fn check_schema_version(&self) -> Result<()> {
        let version = self.schema_version()?;
        if version != SCHEMA_VERSION {
            bail!("unrecognized snapshot schema_version {version}; this reader only recognizes {SCHEMA_VERSION}");
        }
        Ok(())
    }

    /// Samples every `routing_nodes` row against spec.md §4.H's range
    /// constraints (lat ∈ [−90, 90], lng ∈ [−180, 180], elevation ∈
    /// [−500, 9000]).
    fn check_sample_ranges(&self) -> Result<()> {
        let mut stmt = self.conn.prepare("SELECT lat, lng, elevation_m FROM routing_nodes")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, f64>(0)?, row.get::<_, f64>(1)?, row.get::<_, Option<f64>>(2)?))
        })?;
        for row in rows {
            let (lat, lng, elevation) = row?;
            if !(-90.0..=90.0).contains(&lat) {
                bail!("node latitude {lat} out of range");
            }
            if !(-180.0..=180.0).contains(&lng) {
                bail!("node longitude {lng} out of range");
            }
            if let Some(e) = elevation {
                if !(-500.0..=9000.0).contains(&e) {
                    bail!("node elevation {e} out of range");
                }
            }
        }
        Ok(())
    }

    pub fn schema_version(&self) -> Result<i64> {
        self.conn.query_row("SELECT version FROM schema_version", [], |row| row.get(0)).map_err(Into::into)
    }

    pub fn trail_count(&self) -> Result<i64> {
        self.conn.query_row("SELECT COUNT(*) FROM trails", [], |row| row.get(0)).map_err(Into::into)
    }

    pub fn node_count(&self) -> Result<i64> {
        self.conn.query_row("SELECT COUNT(*) FROM routing_nodes", [], |row| row.get(0)).map_err(Into::into)
    }

    pub fn edge_count(&self) -> Result<i64> {
        self.conn.query_row("SELECT COUNT(*) FROM routing_edges", [], |row| row.get(0)).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_file_missing_required_tables() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.sqlite3");
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch("CREATE TABLE trails (trail_id TEXT PRIMARY KEY);").unwrap();
        drop(conn);
        assert!(SnapshotReader::open(&path).is_err());
    }
}
