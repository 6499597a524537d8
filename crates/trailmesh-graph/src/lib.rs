//! Routing graph synthesis (spec.md §4.G): clusters trail endpoints into
//! nodes, synthesizes one edge per node pair connected by a shared trail
//! identity, and builds a CSR adjacency index over the result.
//!
//! Two nodes are connected in the output iff they share a `trail_id` —
//! never by spatial proximity alone. That's the invariant guarding
//! against the historical failure mode of joining unrelated endpoints.

mod adjacency;
mod edges;
mod endpoints;

pub use adjacency::AdjacencyIndex;
pub use edges::build_edges;
pub use endpoints::{build_nodes, EndpointIndex};

use trailmesh_model::{Edge, Node, PipelineConfig, Trail};

/// The full synthesized routing graph: nodes, edges, and the adjacency
/// index built over them.
pub struct RoutingGraph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub adjacency: AdjacencyIndex,
}

/// Runs the full node/edge synthesis pass over a post-split trail set
/// (spec.md §4.G).
pub fn synthesize(trails: &[Trail], config: &PipelineConfig) -> RoutingGraph {
    let (nodes, index) = build_nodes(trails, config.intersection_tolerance_meters);
    let edges = build_edges(trails, &nodes, &index);
    let adjacency = AdjacencyIndex::build(nodes.len(), &edges);
    tracing::info!(nodes = nodes.len(), edges = edges.len(), "routing graph synthesized");
    RoutingGraph { nodes, edges, adjacency }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trailmesh_geom::{Line3, Point3};
    use trailmesh_model::{NodeType, Trail, TrailId};

    fn trail(name: &str, pts: &[(f64, f64)]) -> Trail {
        let line = Line3::new(pts.iter().map(|&(x, y)| Point3::new_2d(x, y)).collect()).unwrap();
        Trail::from_geometry(TrailId::new(), name, "r", "test", line, None)
    }

    #[test]
    fn star_junction_of_three_trails_is_one_intersection_node() {
        let spokes = vec![
            trail("north", &[(-105.25, 40.0), (-105.25, 40.1)]),
            trail("east", &[(-105.25, 40.0), (-105.15, 40.0)]),
            trail("west", &[(-105.25, 40.0), (-105.35, 40.0)]),
        ];
        let config = PipelineConfig::default();
        let graph = synthesize(&spokes, &config);

        let hub = graph.nodes.iter().find(|n| n.node_type == NodeType::Intersection).unwrap();
        assert_eq!(hub.connected_trail_ids.len(), 3);
        assert_eq!(graph.edges.len(), 3);
        assert_eq!(graph.adjacency.neighbors(hub.node_id).len(), 3);
    }

    #[test]
    fn single_isolated_trail_yields_two_endpoints_one_edge() {
        let trails = vec![trail("solo", &[(-105.3, 40.0), (-105.2, 40.0)])];
        let config = PipelineConfig::default();
        let graph = synthesize(&trails, &config);
        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(graph.edges.len(), 1);
        assert!(graph.nodes.iter().all(|n| n.node_type == NodeType::Endpoint));
    }
}
