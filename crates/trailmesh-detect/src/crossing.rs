use trailmesh_geom::intersection;
use trailmesh_model::{IntersectionKind, IntersectionPoint, Trail};

use crate::candidates::CandidatePair;

/// Emits a `Crossing` intersection point for every point-like geometric
/// intersection between the two trails in `pair` (spec.md §4.C regime 1).
/// Endpoint-on-endpoint or endpoint-on-interior touches are reported here
/// too — they are legitimate `ST_Intersects` hits, distinguished from the
/// T/Y near-miss regime (`crate::endpoint`) only by already lying exactly
/// on the other trail rather than merely nearby.
pub fn detect_crossings(trails: &[Trail], pairs: &[CandidatePair]) -> Vec<IntersectionPoint> {
    let mut out = Vec::new();
    for pair in pairs {
        let (a, b) = (&trails[pair.a], &trails[pair.b]);
        for hit in intersection(&a.geometry, &b.geometry) {
            out.push(IntersectionPoint::new(
                hit.point,
                IntersectionKind::Crossing,
                vec![a.trail_id, b.trail_id],
            ));
        }
    }
    out
}
