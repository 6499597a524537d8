use ordered_float::OrderedFloat;
use trailmesh_geom::geodesic_distance_m;
use trailmesh_model::IntersectionPoint;

/// Collapses near-duplicate intersection points within `radius_m` of each
/// other into one, unioning their `trail_ids` (spec.md §4.C: "Near-duplicate
/// intersection points within a clustering radius (default `tol/2`)
/// collapse to one"). Greedy single-pass clustering: sorted input, then a
/// point joins the most recently opened cluster if within radius, else
/// starts a new one. Adequate because points are pre-sorted by location.
pub fn cluster(mut points: Vec<IntersectionPoint>, radius_m: f64) -> Vec<IntersectionPoint> {
    sort_deterministic(&mut points);

    let mut clusters: Vec<IntersectionPoint> = Vec::new();
    'outer: for point in points {
        for cluster in clusters.iter_mut() {
            if geodesic_distance_m(cluster.point, point.point) <= radius_m && cluster.kind == point.kind {
                cluster.trail_ids.extend(point.trail_ids);
                cluster.trail_ids.sort_by_key(|id| id.to_string());
                cluster.trail_ids.dedup();
                continue 'outer;
            }
        }
        clusters.push(point);
    }
    sort_deterministic(&mut clusters);
    clusters
}

/// Sorts by (lng, lat, kind, smallest trail id) for deterministic output
/// ordering (spec.md §4.C).
pub fn sort_deterministic(points: &mut [IntersectionPoint]) {
    points.sort_by(|a, b| {
        OrderedFloat(a.point.lng)
            .cmp(&OrderedFloat(b.point.lng))
            .then(OrderedFloat(a.point.lat).cmp(&OrderedFloat(b.point.lat)))
            .then(a.kind.cmp(&b.kind))
            .then(smallest_id(a).cmp(&smallest_id(b)))
    });
}

fn smallest_id(point: &IntersectionPoint) -> String {
    point.trail_ids.iter().map(|id| id.to_string()).min().unwrap_or_default()
}
