use trailmesh_geom::{shared_length_m, SpatialIndex};
use trailmesh_model::Trail;

/// Default duplicate-candidate search radius (spec.md §4.F: `ST_DWithin ≤
/// 100 m`).
pub const CANDIDATE_SEARCH_RADIUS_M: f64 = 100.0;

/// Minimum trail length considered for deduplication (spec.md §4.F).
pub const MIN_CANDIDATE_LENGTH_M: f64 = 10.0;

/// A pair of trail indices found to be geometric duplicates, with the
/// evidence used to decide that (spec.md §4.F metric).
#[derive(Clone, Copy, Debug)]
pub struct DuplicatePair {
    pub a: usize,
    pub b: usize,
    pub overlap_ratio: f64,
    pub centroid_distance_m: f64,
}

/// Finds every pair of trails that are geometric duplicates of each other:
/// bbox-overlapping within [`CANDIDATE_SEARCH_RADIUS_M`], both at least
/// [`MIN_CANDIDATE_LENGTH_M`] long, neither strictly containing the other,
/// and meeting the overlap-ratio threshold from spec.md §4.F:
/// `overlap_ratio > 0.8`, or (`distance < 5 m` and `overlap_ratio > 0.5`).
pub fn duplicate_pairs(trails: &[Trail]) -> Vec<DuplicatePair> {
    let pad_degrees = CANDIDATE_SEARCH_RADIUS_M / 111_000.0;
    let boxes: Vec<_> = trails
        .iter()
        .enumerate()
        .map(|(i, t)| {
            trailmesh_geom::BoundingBox::new(i, (t.bbox.min_lng, t.bbox.min_lat), (t.bbox.max_lng, t.bbox.max_lat))
        })
        .collect();
    let index = SpatialIndex::build(boxes);

    let mut seen = std::collections::HashSet::new();
    let mut pairs = Vec::new();
    for (i, trail) in trails.iter().enumerate() {
        if trail.length_km * 1000.0 < MIN_CANDIDATE_LENGTH_M {
            continue;
        }
        let hits = index.query((trail.bbox.min_lng, trail.bbox.min_lat), (trail.bbox.max_lng, trail.bbox.max_lat), pad_degrees);
        for hit in hits {
            let j = hit.idx;
            if j == i || !seen.insert((i.min(j), i.max(j))) {
                continue;
            }
            let other = &trails[j];
            if other.length_km * 1000.0 < MIN_CANDIDATE_LENGTH_M {
                continue;
            }
            if strictly_contains(trail, other) || strictly_contains(other, trail) {
                continue;
            }

            let distance_m = centroid_distance_m(trail, other);
            if distance_m > CANDIDATE_SEARCH_RADIUS_M {
                continue;
            }

            let overlap_ratio = overlap_ratio(trail, other);
            let is_duplicate = overlap_ratio > 0.8 || (distance_m < 5.0 && overlap_ratio > 0.5);
            if is_duplicate {
                pairs.push(DuplicatePair {
                    a: i.min(j),
                    b: i.max(j),
                    overlap_ratio,
                    centroid_distance_m: distance_m,
                });
            }
        }
    }
    pairs
}

/// `area(intersection) / min(area(a), area(b))`, using
/// [`shared_length_m`] as the linestring proxy for area (spec.md §4.F).
fn overlap_ratio(a: &Trail, b: &Trail) -> f64 {
    let tol_m = CANDIDATE_SEARCH_RADIUS_M / 10.0;
    let shared_a = shared_length_m(&a.geometry, &b.geometry, tol_m);
    let shared_b = shared_length_m(&b.geometry, &a.geometry, tol_m);
    let shared = shared_a.min(shared_b);
    let shorter_m = (a.length_km * 1000.0).min(b.length_km * 1000.0);
    if shorter_m <= 0.0 {
        0.0
    } else {
        shared / shorter_m
    }
}

/// `true` when `outer`'s bounding box fully encloses `inner`'s and nearly
/// all of `inner`'s length lies on `outer` while the reverse is far from
/// true — the exact-containment exclusion from spec.md §4.F / §9 Open
/// Question 2 (resolved: no containment buffer).
fn strictly_contains(outer: &Trail, inner: &Trail) -> bool {
    let o = outer.bbox;
    let i = inner.bbox;
    let bbox_contains =
        o.min_lng <= i.min_lng && o.min_lat <= i.min_lat && o.max_lng >= i.max_lng && o.max_lat >= i.max_lat;
    if !bbox_contains || inner.length_km >= outer.length_km {
        return false;
    }
    let tol_m = CANDIDATE_SEARCH_RADIUS_M / 10.0;
    let inner_on_outer = shared_length_m(&inner.geometry, &outer.geometry, tol_m);
    inner_on_outer / (inner.length_km * 1000.0).max(1e-9) > 0.99
}

fn centroid_distance_m(a: &Trail, b: &Trail) -> f64 {
    let ca = trailmesh_geom::Point3::new_2d(
        (a.bbox.min_lng + a.bbox.max_lng) / 2.0,
        (a.bbox.min_lat + a.bbox.max_lat) / 2.0,
    );
    let cb = trailmesh_geom::Point3::new_2d(
        (b.bbox.min_lng + b.bbox.max_lng) / 2.0,
        (b.bbox.min_lat + b.bbox.max_lat) / 2.0,
    );
    trailmesh_geom::geodesic_distance_m(ca, cb)
}

/// Picks the surviving representative of a duplicate component: longest
/// first, then lexicographic name, then lexicographic id (spec.md §4.F).
pub fn pick_representative<'a>(trails: &[&'a Trail]) -> &'a Trail {
    trails
        .iter()
        .copied()
        .max_by(|a, b| {
            a.length_km
                .total_cmp(&b.length_km)
                .then_with(|| b.name.cmp(&a.name))
                .then_with(|| b.trail_id.to_string().cmp(&a.trail_id.to_string()))
        })
        .expect("component always has at least one member")
}
