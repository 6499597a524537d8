use trailmesh_geom::{closest_point, geodesic_distance_m};
use trailmesh_model::{IntersectionKind, IntersectionPoint, PipelineConfig, Trail};

use crate::candidates::CandidatePair;

/// Emits a `TEndpoint`/`YEndpoint` intersection point for every trail
/// endpoint that lies near — but not already on — another trail's
/// interior (spec.md §4.C regime 2).
///
/// Checked over the same candidate pairs as the crossing regime, plus
/// each trail against itself (for the `YEndpoint` case: an endpoint near
/// its own trail's interior, e.g. an almost-closed loop).
pub fn detect_endpoint_near_trail(
    trails: &[Trail],
    pairs: &[CandidatePair],
    config: &PipelineConfig,
) -> Vec<IntersectionPoint> {
    let mut out = Vec::new();
    let tol = config.t_intersection_tolerance_meters;

    for pair in pairs {
        check_endpoints(trails, pair.a, pair.b, tol, &mut out);
        check_endpoints(trails, pair.b, pair.a, tol, &mut out);
    }
    for (i, trail) in trails.iter().enumerate() {
        check_endpoints(trails, i, i, tol, &mut out);
    }
    out
}

/// Checks both endpoints of `trails[from]` against `trails[onto]`.
fn check_endpoints(trails: &[Trail], from: usize, onto: usize, tol_m: f64, out: &mut Vec<IntersectionPoint>) {
    let a = &trails[from];
    let b = &trails[onto];
    for endpoint in [a.geometry.first(), a.geometry.last()] {
        if from == onto {
            // Y case: only the opposite endpoint can be "near" this
            // trail's own interior (comparing an endpoint to itself is
            // always a zero-distance no-op).
            let other_end = if geodesic_distance_m(endpoint, a.geometry.first()) < 1e-6 {
                a.geometry.last()
            } else {
                a.geometry.first()
            };
            if geodesic_distance_m(endpoint, other_end) < 1e-6 {
                continue;
            }
        }
        let projected = closest_point(&b.geometry, endpoint);
        let distance = geodesic_distance_m(endpoint, projected);
        let already_on = distance < 1e-3; // effectively coincident: not a near-miss
        let is_own_endpoint = from == onto
            && (geodesic_distance_m(projected, b.geometry.first()) < 1e-3
                || geodesic_distance_m(projected, b.geometry.last()) < 1e-3);
        if already_on || is_own_endpoint {
            continue;
        }
        if distance <= tol_m {
            let kind = if from == onto { IntersectionKind::YEndpoint } else { IntersectionKind::TEndpoint };
            out.push(IntersectionPoint::new(projected, kind, vec![a.trail_id, b.trail_id]));
        }
    }
}
