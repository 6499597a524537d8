use std::collections::HashMap;

use ordered_float::OrderedFloat;
use trailmesh_geom::{geodesic_distance_m, Point3};
use trailmesh_model::{Node, NodeId, Trail, TrailId};

/// One trail endpoint, before clustering.
#[derive(Clone, Copy)]
struct EndpointCandidate {
    point: Point3,
    trail_id: TrailId,
    is_start: bool,
}

/// Maps each trail's start/end endpoint to the node it was clustered
/// into, so edge synthesis can look up a trail's two endpoint nodes
/// without re-running the spatial search.
pub struct EndpointIndex {
    index: HashMap<(TrailId, bool), NodeId>,
}

impl EndpointIndex {
    pub fn node_for(&self, trail_id: TrailId, is_start: bool) -> NodeId {
        self.index[&(trail_id, is_start)]
    }
}

/// Emits an endpoint candidate for both ends of every trail, clusters
/// them by spatial equality within `tolerance_m`, and assigns dense node
/// ids in deterministic (lat ASC, lng ASC) order (spec.md §4.G steps
/// 1–3). Greedy single-pass clustering against each cluster's first
/// member, the same convention as `trailmesh-detect`'s intersection-point
/// clustering.
pub fn build_nodes(trails: &[Trail], tolerance_m: f64) -> (Vec<Node>, EndpointIndex) {
    let mut candidates = Vec::with_capacity(trails.len() * 2);
    for trail in trails {
        candidates.push(EndpointCandidate { point: trail.geometry.first(), trail_id: trail.trail_id, is_start: true });
        candidates.push(EndpointCandidate { point: trail.geometry.last(), trail_id: trail.trail_id, is_start: false });
    }
    candidates.sort_by(|a, b| {
        OrderedFloat(a.point.lng)
            .cmp(&OrderedFloat(b.point.lng))
            .then(OrderedFloat(a.point.lat).cmp(&OrderedFloat(b.point.lat)))
    });

    let mut clusters: Vec<(Point3, Vec<EndpointCandidate>)> = Vec::new();
    'outer: for candidate in candidates {
        for cluster in clusters.iter_mut() {
            if geodesic_distance_m(cluster.0, candidate.point) <= tolerance_m {
                cluster.1.push(candidate);
                continue 'outer;
            }
        }
        clusters.push((candidate.point, vec![candidate]));
    }

    clusters.sort_by(|a, b| {
        OrderedFloat(a.0.lat).cmp(&OrderedFloat(b.0.lat)).then(OrderedFloat(a.0.lng).cmp(&OrderedFloat(b.0.lng)))
    });

    let mut index = HashMap::new();
    let mut nodes = Vec::with_capacity(clusters.len());
    for (node_idx, (point, members)) in clusters.into_iter().enumerate() {
        let node_id = NodeId(node_idx as u32);
        let mut trail_ids: Vec<TrailId> = members.iter().map(|m| m.trail_id).collect();
        trail_ids.sort_by_key(|id| id.to_string());
        trail_ids.dedup();
        let node_type = Node::classify(&trail_ids);
        for member in &members {
            index.insert((member.trail_id, member.is_start), node_id);
        }
        nodes.push(Node { node_id, point, node_type, connected_trail_ids: trail_ids });
    }
    (nodes, EndpointIndex { index })
}
