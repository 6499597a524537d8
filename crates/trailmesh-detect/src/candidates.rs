use trailmesh_geom::SpatialIndex;
use trailmesh_model::{PipelineConfig, Trail};

/// An unordered candidate pair of trail indices (into the caller's slice),
/// worth a full geometric intersection check.
#[derive(Clone, Copy, Debug)]
pub struct CandidatePair {
    pub a: usize,
    pub b: usize,
    pub proximity_m: f64,
}

/// Default cap on candidate pairs processed per batch — bounds memory on
/// a very dense corpus (spec.md §4.C: "batched (cap per pass) to bound
/// memory"). Purely a chunking knob; does not change which pairs are
/// found, only how many are held in memory as an intermediate `Vec` at
/// once.
pub const DEFAULT_BATCH_SIZE: usize = 4096;

/// Finds every pair of trails whose padded bounding boxes overlap, using
/// the bbox R-tree the same way the deduplicator and staging store do
/// (`trailmesh-geom::SpatialIndex`). Pairs are returned sorted by
/// proximity ascending (spec.md §5: "split operations processed... by
/// pair proximity ascending").
pub fn candidate_pairs(trails: &[Trail], config: &PipelineConfig, pad_degrees: f64) -> Vec<CandidatePair> {
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
        if trail.length_km * 1000.0 < config.min_trail_length_meters {
            continue;
        }
        let hits = index.query((trail.bbox.min_lng, trail.bbox.min_lat), (trail.bbox.max_lng, trail.bbox.max_lat), pad_degrees);
        for hit in hits {
            let j = hit.idx;
            if j == i || !seen.insert(ordered_pair(i, j)) {
                continue;
            }
            let other = &trails[j];
            if other.length_km * 1000.0 < config.min_trail_length_meters {
                continue;
            }
            if contains(trail, other) || contains(other, trail) {
                continue;
            }
            let proximity_m = centroid_distance_m(trail, other);
            pairs.push(CandidatePair { a: i.min(j), b: i.max(j), proximity_m });
        }
    }
    pairs.sort_by(|a, b| a.proximity_m.total_cmp(&b.proximity_m));
    pairs
}

fn ordered_pair(i: usize, j: usize) -> (usize, usize) {
    (i.min(j), i.max(j))
}

/// `true` if `outer`'s bounding box fully encloses `inner`'s and `inner`
/// is substantially shorter — a cheap proxy for "topologically contained"
/// (spec.md §4.C exclusion rule) without a full point-in-polygon sweep,
/// since trails are linestrings rather than areal features.
fn contains(outer: &Trail, inner: &Trail) -> bool {
    let outer_box = outer.bbox;
    let inner_box = inner.bbox;
    let bbox_contains = outer_box.min_lng <= inner_box.min_lng
        && outer_box.min_lat <= inner_box.min_lat
        && outer_box.max_lng >= inner_box.max_lng
        && outer_box.max_lat >= inner_box.max_lat;
    bbox_contains && inner.length_km < outer.length_km * 0.05
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
