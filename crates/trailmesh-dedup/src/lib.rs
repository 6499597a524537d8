//! Geometric trail deduplication (spec.md §4.F): find pairs of trails
//! that are the same path recorded twice, group them into connected
//! components, and delete every member but one representative per
//! component.

mod candidates;
mod unionfind;

pub use candidates::{duplicate_pairs, pick_representative, DuplicatePair, CANDIDATE_SEARCH_RADIUS_M, MIN_CANDIDATE_LENGTH_M};
pub use unionfind::UnionFind;

use serde_json::json;
use trailmesh_manager::SplitManager;
use trailmesh_model::{OpKind, OpResult, TrailId};
use trailmesh_staging::StagingNamespace;

/// Runs one deduplication pass over every trail currently in `ns`:
/// finds duplicate pairs, groups them into connected components, and
/// deletes every non-representative member of each component inside one
/// transaction per component, logging each deletion via `manager` with
/// `op_kind=delete` and metadata naming the surviving representative
/// (spec.md §4.F final step). Returns the ids deleted.
pub fn deduplicate(ns: &mut StagingNamespace, manager: &mut SplitManager, service_name: &str) -> Vec<TrailId> {
    let mut ids: Vec<TrailId> = ns.trails().map(|t| t.trail_id).collect();
    ids.sort_by_key(|id| id.to_string());
    let trails: Vec<_> = ids.iter().map(|id| ns.get_trail(id).unwrap().clone()).collect();

    let pairs = duplicate_pairs(&trails);
    if pairs.is_empty() {
        return Vec::new();
    }

    let mut uf = UnionFind::new(trails.len());
    for pair in &pairs {
        uf.union(pair.a, pair.b);
    }

    let mut deleted = Vec::new();
    for component in uf.components() {
        let member_trails: Vec<&trailmesh_model::Trail> = component.iter().map(|&i| &trails[i]).collect();
        let representative = pick_representative(&member_trails);
        let representative_id = representative.trail_id;

        {
            let mut tx = ns.begin();
            for &i in &component {
                let trail = &trails[i];
                if trail.trail_id == representative_id {
                    continue;
                }
                tx.delete_trail(&trail.trail_id, Some(representative_id));
            }
            tx.commit();
        }

        for &i in &component {
            let trail = &trails[i];
            if trail.trail_id == representative_id {
                continue;
            }
            let metadata = json!({ "surviving_representative": representative_id.to_string() });
            let result = OpResult::success(trail.length_km, 0.0, 0);
            manager.notify(ns, service_name, OpKind::Delete, trail.trail_id, trail.name.clone(), result, Some(metadata));
            deleted.push(trail.trail_id);
        }
    }
    deleted
}
