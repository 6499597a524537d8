//! Schema-versioned embedded-file snapshot export and read-back (spec.md
//! §4.H): a self-contained SQLite file with `trails`, `routing_nodes`,
//! `routing_edges`, `region_metadata`, and `schema_version` tables,
//! geometry serialized as GeoJSON text preserving Z.

mod geojson;
mod reader;
mod schema;
mod writer;

pub use geojson::{from_geojson, to_geojson};
pub use reader::SnapshotReader;
pub use schema::{SCHEMA_DESCRIPTION, SCHEMA_VERSION};
pub use writer::export;
