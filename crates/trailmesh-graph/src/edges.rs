use std::collections::HashMap;

use trailmesh_geom::Line3;
use trailmesh_model::{Edge, EdgeId, Node, NodeId, Trail};

use crate::endpoints::EndpointIndex;

/// Synthesizes one edge per node pair connected by at least one trail
/// (spec.md §4.G step 4).
///
/// Groups trails by the unordered pair of nodes their own two endpoints
/// were clustered into; a trail whose endpoints land in the same node is
/// a self-loop and is rejected outright. When more than one trail
/// connects the same node pair, only one edge is still emitted — its
/// `trail_id`/`trail_name`/`distance_km`/elevation are taken from the
/// lexicographically-first shared trail id, but the edge still only
/// connects nodes that share that id (the shared-trail invariant holds
/// by construction: every trail contributing to a group is, itself, one
/// of the trails spanning that exact node pair).
pub fn build_edges(trails: &[Trail], nodes: &[Node], index: &EndpointIndex) -> Vec<Edge> {
    let mut groups: HashMap<(NodeId, NodeId), Vec<&Trail>> = HashMap::new();
    for trail in trails {
        let start = index.node_for(trail.trail_id, true);
        let end = index.node_for(trail.trail_id, false);
        if start == end {
            tracing::warn!(trail_id = %trail.trail_id, "rejecting self-loop edge");
            continue;
        }
        let key = if start.0 <= end.0 { (start, end) } else { (end, start) };
        groups.entry(key).or_default().push(trail);
    }

    let mut keys: Vec<(NodeId, NodeId)> = groups.keys().copied().collect();
    keys.sort_by_key(|(a, b)| (a.0, b.0));

    let mut edges = Vec::with_capacity(keys.len());
    for (edge_idx, key) in keys.into_iter().enumerate() {
        let members = &groups[&key];
        let primary = members.iter().min_by_key(|t| t.trail_id.to_string()).expect("group is never empty");
        let (source_node, target_node) = key;
        edges.push(Edge {
            edge_id: EdgeId(edge_idx as u32),
            source_node,
            target_node,
            trail_id: primary.trail_id,
            trail_name: primary.name.clone(),
            distance_km: primary.length_km,
            elevation_gain_m: primary.elevation.gain_m,
            elevation_loss_m: primary.elevation.loss_m,
            geometry: edge_geometry(nodes, source_node, target_node),
        });
    }
    edges
}

/// The straight line between two node points — an exporter-level
/// simplification of the true parent-trail geometry (spec.md §4.G step
/// 4: `distance_km` still comes from the trail segment, not this line).
fn edge_geometry(nodes: &[Node], source: NodeId, target: NodeId) -> Line3 {
    let source_point = nodes[source.0 as usize].point;
    let target_point = nodes[target.0 as usize].point;
    Line3::new(vec![source_point, target_point]).expect("distinct node points form a valid line")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoints::build_nodes;
    use trailmesh_geom::Point3;
    use trailmesh_model::{Trail, TrailId};

    fn trail(name: &str, pts: &[(f64, f64)]) -> Trail {
        let line = Line3::new(pts.iter().map(|&(x, y)| Point3::new_2d(x, y)).collect()).unwrap();
        Trail::from_geometry(TrailId::new(), name, "r", "test", line, None)
    }

    #[test]
    fn one_edge_per_simple_trail() {
        let t = trail("Spur", &[(-105.3, 40.0), (-105.2, 40.0)]);
        let (nodes, index) = build_nodes(&[t.clone()], 2.0);
        let edges = build_edges(&[t.clone()], &nodes, &index);
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].trail_id, t.trail_id);
        assert_ne!(edges[0].source_node, edges[0].target_node);
    }

    #[test]
    fn parallel_trails_between_same_nodes_collapse_to_one_edge() {
        let pts = &[(-105.3, 40.0), (-105.2, 40.0)];
        let older = trail("Ridge Trail", pts);
        let newer = trail("Ridge Trail Reroute", pts);
        let trails = vec![older.clone(), newer.clone()];
        let (nodes, index) = build_nodes(&trails, 2.0);
        let edges = build_edges(&trails, &nodes, &index);
        assert_eq!(edges.len(), 1);
        let expected_primary = [older.trail_id, newer.trail_id].into_iter().min_by_key(|id| id.to_string()).unwrap();
        assert_eq!(edges[0].trail_id, expected_primary);
    }

    #[test]
    fn self_loop_trail_produces_no_edge() {
        let t = trail(
            "Loop",
            &[(-105.3, 40.0), (-105.25, 40.05), (-105.2, 40.0), (-105.25, 39.95), (-105.3, 40.0)],
        );
        let (nodes, index) = build_nodes(&[t.clone()], 2.0);
        let edges = build_edges(&[t], &nodes, &index);
        assert!(edges.is_empty());
    }

    #[test]
    fn shared_trail_invariant_holds_for_every_edge() {
        let a = trail("a", &[(-105.3, 40.0), (-105.2, 40.0)]);
        let b = trail("b", &[(-105.2, 40.0), (-105.2, 40.1)]);
        let trails = vec![a, b];
        let (nodes, index) = build_edges_input(&trails);
        let edges = build_edges(&trails, &nodes, &index);
        for edge in &edges {
            let source = nodes.iter().find(|n| n.node_id == edge.source_node).unwrap();
            let target = nodes.iter().find(|n| n.node_id == edge.target_node).unwrap();
            assert!(source.connected_trail_ids.contains(&edge.trail_id));
            assert!(target.connected_trail_ids.contains(&edge.trail_id));
        }
    }

    fn build_edges_input(trails: &[Trail]) -> (Vec<Node>, EndpointIndex) {
        build_nodes(trails, 2.0)
    }
}
