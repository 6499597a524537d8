/// Current snapshot schema version (spec.md §4.H, §6): monotonically
/// increasing, stamped into the `schema_version` table on every export. A
/// reader must reject any version it does not recognize.
pub const SCHEMA_VERSION: i64 = 14;

pub const SCHEMA_DESCRIPTION: &str =
    "trailmesh snapshot v14: trails, routing_nodes, routing_edges, region_metadata";

pub(crate) const CREATE_TABLES_SQL: &str = "
CREATE TABLE trails (
    trail_id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    region TEXT NOT NULL,
    trail_type TEXT,
    surface TEXT,
    difficulty TEXT,
    geometry_geojson TEXT NOT NULL,
    length_km REAL NOT NULL,
    elevation_gain_m REAL NOT NULL,
    elevation_loss_m REAL NOT NULL,
    elevation_min_m REAL,
    elevation_max_m REAL,
    elevation_avg_m REAL,
    source TEXT NOT NULL,
    original_trail_id TEXT
);

CREATE TABLE routing_nodes (
    node_id INTEGER PRIMARY KEY,
    lng REAL NOT NULL,
    lat REAL NOT NULL,
    elevation_m REAL,
    node_type TEXT NOT NULL,
    connected_trail_ids TEXT NOT NULL
);

CREATE TABLE routing_edges (
    edge_id INTEGER PRIMARY KEY,
    source_node INTEGER NOT NULL,
    target_node INTEGER NOT NULL,
    trail_id TEXT NOT NULL,
    trail_name TEXT NOT NULL,
    distance_km REAL NOT NULL,
    elevation_gain_m REAL NOT NULL,
    elevation_loss_m REAL NOT NULL,
    geometry_geojson TEXT NOT NULL
);

CREATE TABLE region_metadata (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);

CREATE TABLE schema_version (
    version INTEGER NOT NULL,
    description TEXT NOT NULL
);
";
