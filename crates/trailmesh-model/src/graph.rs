use serde::{Deserialize, Serialize};
use trailmesh_geom::{Line3, Point3};

use crate::ids::{EdgeId, NodeId, TrailId};

/// Whether a routing-graph node sits at a genuine trail intersection or at
/// a dangling/terminal endpoint. Determined solely by how many distinct
/// trail ids converge there (spec.md §4.G step 2) — never by spatial
/// degree alone, which is what the shared-trail invariant exists to guard
/// against (see `trailmesh-graph`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeType {
    Intersection,
    Endpoint,
}

/// A vertex of the routing graph.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub node_id: NodeId,
    pub point: Point3,
    pub node_type: NodeType,
    pub connected_trail_ids: Vec<TrailId>,
}

impl Node {
    pub fn classify(connected_trail_ids: &[TrailId]) -> NodeType {
        if connected_trail_ids.len() >= 2 {
            NodeType::Intersection
        } else {
            NodeType::Endpoint
        }
    }
}

/// A routable link between two nodes, derived from exactly one trail (or
/// trail segment). `source_node != target_node` always; both referenced
/// nodes share `trail_id` in their `connected_trail_ids` (the shared-trail
/// invariant, spec.md §3/§4.G/§8-4).
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
    pub edge_id: EdgeId,
    pub source_node: NodeId,
    pub target_node: NodeId,
    pub trail_id: TrailId,
    pub trail_name: String,
    pub distance_km: f64,
    pub elevation_gain_m: f64,
    pub elevation_loss_m: f64,
    pub geometry: Line3,
}
