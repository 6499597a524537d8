use std::collections::HashMap;

use trailmesh_geom::{length_geodesic, line_locate};
use trailmesh_model::{IntersectionPoint, Trail, TrailId};
use trailmesh_split::{SplitPointInput, TrailSplitOperation};

/// Groups detected intersection points by the trail(s) they fall on and
/// turns each group into one [`TrailSplitOperation`] against that trail's
/// current geometry.
///
/// `points` must already be in the detector's deterministic (lng, lat,
/// kind, trail id) order (spec.md §4.C) — the order in which trails are
/// first touched while walking that list gives the "pair proximity
/// ascending" operation order spec.md §5 requires, with ties (two trails
/// first touched by the very same point) broken lexicographically by
/// trail id.
pub fn build_split_operations(
    trails: &HashMap<TrailId, Trail>,
    points: &[IntersectionPoint],
) -> Vec<TrailSplitOperation> {
    let mut order: Vec<TrailId> = Vec::new();
    let mut by_trail: HashMap<TrailId, Vec<SplitPointInput>> = HashMap::new();

    for point in points {
        let mut touched = point.trail_ids.clone();
        touched.sort_by_key(|id| id.to_string());
        for trail_id in touched {
            let Some(trail) = trails.get(&trail_id) else { continue };
            let t = line_locate(&trail.geometry, point.point);
            let distance_along_m = t * length_geodesic(&trail.geometry);
            by_trail
                .entry(trail_id)
                .or_insert_with(|| {
                    order.push(trail_id);
                    Vec::new()
                })
                .push(SplitPointInput { lng: point.point.lng, lat: point.point.lat, distance_along_m });
        }
    }

    order
        .into_iter()
        .map(|trail_id| {
            let original = trails[&trail_id].clone();
            let split_points = by_trail.remove(&trail_id).expect("every ordered id has entries");
            TrailSplitOperation { original, split_points }
        })
        .collect()
}
