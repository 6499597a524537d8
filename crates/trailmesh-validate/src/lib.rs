//! Read-only post-run validation over a staged trail network (spec.md
//! §4.I): referential integrity, connectivity, positive edge length, node
//! typing, elevation presence for 3D trails, and whole-set length
//! conservation against the pre-split input. Unlike the manager's
//! integrity gate, this never rolls anything back — it only reports.

mod findings;

pub use findings::ValidationFinding;

use std::collections::HashSet;

use trailmesh_model::{Node, NodeId, PipelineConfig};
use trailmesh_staging::StagingNamespace;

/// Runs every spec.md §4.I check over `ns` and returns every finding, in
/// a fixed check order (so output is deterministic given deterministic
/// input). `pre_split_total_length_km` is the sum of trail lengths before
/// any splitting occurred, supplied by the caller (the validator itself
/// is not the source of truth for the original trail set).
pub fn validate(ns: &StagingNamespace, pre_split_total_length_km: f64, config: &PipelineConfig) -> Vec<ValidationFinding> {
    let mut findings = Vec::new();
    check_referential_and_length(ns, &mut findings);
    check_connectivity(ns, &mut findings);
    check_node_typing(ns, &mut findings);
    check_elevation_presence(ns, &mut findings);
    check_aggregate_length(ns, pre_split_total_length_km, config, &mut findings);
    findings
}

fn node_exists(nodes: &[Node], id: NodeId) -> bool {
    nodes.iter().any(|n| n.node_id == id)
}

fn check_referential_and_length(ns: &StagingNamespace, findings: &mut Vec<ValidationFinding>) {
    for edge in ns.edges() {
        if !node_exists(ns.nodes(), edge.source_node) {
            findings.push(ValidationFinding::DanglingEdgeReference { edge_id: edge.edge_id, missing_node: edge.source_node });
        }
        if !node_exists(ns.nodes(), edge.target_node) {
            findings.push(ValidationFinding::DanglingEdgeReference { edge_id: edge.edge_id, missing_node: edge.target_node });
        }
        if edge.distance_km <= 0.0 {
            findings.push(ValidationFinding::NonPositiveEdgeLength { edge_id: edge.edge_id, distance_km: edge.distance_km });
        }
    }
}

fn check_connectivity(ns: &StagingNamespace, findings: &mut Vec<ValidationFinding>) {
    let touched: HashSet<NodeId> =
        ns.edges().iter().flat_map(|e| [e.source_node, e.target_node]).collect();
    for node in ns.nodes() {
        if !touched.contains(&node.node_id) {
            findings.push(ValidationFinding::OrphanNode { node_id: node.node_id });
        }
    }
}

fn check_node_typing(ns: &StagingNamespace, findings: &mut Vec<ValidationFinding>) {
    for node in ns.nodes() {
        let expected = Node::classify(&node.connected_trail_ids);
        if node.node_type != expected {
            findings.push(ValidationFinding::NodeTypeMismatch { node_id: node.node_id, recorded: node.node_type, expected });
        }
    }
}

fn check_elevation_presence(ns: &StagingNamespace, findings: &mut Vec<ValidationFinding>) {
    for trail in ns.trails() {
        if trail.geometry.has_elevation() {
            let complete = trail.elevation.min_m.is_some() && trail.elevation.max_m.is_some() && trail.elevation.avg_m.is_some();
            if !complete {
                findings.push(ValidationFinding::MissingElevationForThreeDTrail { trail_id: trail.trail_id });
            }
        }
    }
}

fn check_aggregate_length(
    ns: &StagingNamespace,
    pre_split_total_length_km: f64,
    config: &PipelineConfig,
    findings: &mut Vec<ValidationFinding>,
) {
    if pre_split_total_length_km <= 0.0 {
        return;
    }
    let post_split_km: f64 = ns.trails().map(|t| t.length_km).sum();
    let diff_pct = 100.0 * (post_split_km - pre_split_total_length_km).abs() / pre_split_total_length_km;
    if diff_pct > config.validation_tolerance_percentage {
        tracing::warn!(diff_pct, "aggregate length conservation violated against pre-split input");
        findings.push(ValidationFinding::AggregateLengthConservationViolated {
            pre_split_km: pre_split_total_length_km,
            post_split_km,
            diff_pct,
            tolerance_pct: config.validation_tolerance_percentage,
        });
    }
}
