//! Intersection detection over a staged batch of trails: candidate-pair
//! search, crossing detection, T/Y endpoint-near-trail detection, and
//! clustering of near-duplicate hits into a deterministic output order.

mod candidates;
mod cluster;
mod crossing;
mod endpoint;

pub use candidates::{candidate_pairs, CandidatePair, DEFAULT_BATCH_SIZE};
pub use cluster::{cluster, sort_deterministic};
pub use crossing::detect_crossings;
pub use endpoint::detect_endpoint_near_trail;

use trailmesh_model::{IntersectionPoint, PipelineConfig, Trail};

/// Runs the full detection pass over `trails`: candidate-pair search,
/// both intersection regimes (spec.md §4.C), near-duplicate clustering at
/// half the tightest configured tolerance, then deterministic ordering.
pub fn detect_intersections(trails: &[Trail], config: &PipelineConfig) -> Vec<IntersectionPoint> {
    let pad_degrees = config.snap_tolerance_degrees.max(1e-5);
    let pairs = candidate_pairs(trails, config, pad_degrees);

    let mut points = detect_crossings(trails, &pairs);
    points.extend(detect_endpoint_near_trail(trails, &pairs, config));

    let cluster_radius_m = config
        .intersection_tolerance_meters
        .min(config.t_intersection_tolerance_meters)
        / 2.0;
    cluster(points, cluster_radius_m)
}
