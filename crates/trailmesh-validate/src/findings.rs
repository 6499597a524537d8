use trailmesh_model::{EdgeId, NodeId, NodeType, TrailId};

/// One problem found by a [`crate::validate`] pass. Every check runs
/// regardless of whether an earlier one found something, so a caller sees
/// every problem in one run rather than stopping at the first (spec.md
/// §4.I: a separate, read-only pass — not a gate that aborts the
/// pipeline).
#[derive(Clone, Debug, PartialEq)]
pub enum ValidationFinding {
    /// An edge references a node id that has no corresponding row.
    DanglingEdgeReference { edge_id: EdgeId, missing_node: NodeId },
    /// A node is not referenced by any edge (spec.md §4.I "connectivity").
    OrphanNode { node_id: NodeId },
    /// An edge's `distance_km` is not strictly positive.
    NonPositiveEdgeLength { edge_id: EdgeId, distance_km: f64 },
    /// A node's `node_type` disagrees with `Node::classify` on its own
    /// `connected_trail_ids`.
    NodeTypeMismatch { node_id: NodeId, recorded: NodeType, expected: NodeType },
    /// A trail whose geometry carries elevation is missing one of
    /// gain/loss/min/max/avg.
    MissingElevationForThreeDTrail { trail_id: TrailId },
    /// The sum of post-split trail lengths diverges from the sum of
    /// pre-split trail lengths by more than the configured tolerance.
    AggregateLengthConservationViolated { pre_split_km: f64, post_split_km: f64, diff_pct: f64, tolerance_pct: f64 },
}
