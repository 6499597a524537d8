use std::collections::HashMap;

use trailmesh_model::{GeometryTrackingRecord, Trail, TrailId};

use crate::namespace::StagingNamespace;

/// An in-flight mutation against a [`StagingNamespace`]'s trail table.
///
/// RAII rollback guard: if neither [`Transaction::commit`] nor
/// [`Transaction::rollback`] is called before this value is dropped, the
/// trail table and tracking record are restored to their pre-transaction
/// state automatically. This is how spec.md §4.D/§4.E's "atomic, rolls
/// back on failure" requirement is enforced without every call site
/// remembering to undo partial writes by hand.
pub struct Transaction<'a> {
    ns: &'a mut StagingNamespace,
    trails_before: HashMap<TrailId, Trail>,
    tracking_before: GeometryTrackingRecord,
    finished: bool,
}

impl<'a> Transaction<'a> {
    pub(crate) fn new(ns: &'a mut StagingNamespace) -> Self {
        let trails_before = ns.trails.clone();
        let tracking_before = ns.tracking.clone();
        Self { ns, trails_before, tracking_before, finished: false }
    }

    pub fn insert_trail(&mut self, trail: Trail, inserted_by: &str, replacement_of: Option<TrailId>) {
        self.ns.tracking.record_insert(trail.trail_id, inserted_by, replacement_of);
        self.ns.trails.insert(trail.trail_id, trail);
    }

    /// Deletes `id`. `replacement_of` should be `Some(survivor_id)` when
    /// the caller already knows the row that accounts for this deletion
    /// (e.g. a deduplication collapse onto an existing representative);
    /// pass `None` when a matching insert (e.g. a split segment) will
    /// follow in this same transaction.
    pub fn delete_trail(&mut self, id: &TrailId, replacement_of: Option<TrailId>) -> Option<Trail> {
        self.ns.tracking.record_delete(*id, replacement_of);
        self.ns.trails.remove(id)
    }

    pub fn get_trail(&self, id: &TrailId) -> Option<&Trail> {
        self.ns.trails.get(id)
    }

    /// Commits: the mutations made so far become permanent.
    pub fn commit(mut self) {
        self.finished = true;
    }

    /// Explicitly rolls back, restoring the trail table and tracking
    /// record to their state when [`StagingNamespace::begin`] was called.
    /// Equivalent to letting the guard drop without committing.
    pub fn rollback(mut self) {
        self.restore();
        self.finished = true;
    }

    fn restore(&mut self) {
        self.ns.trails = std::mem::take(&mut self.trails_before);
        self.ns.tracking = std::mem::take(&mut self.tracking_before);
    }
}

impl Drop for Transaction<'_> {
    fn drop(&mut self) {
        if !self.finished {
            self.restore();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trailmesh_geom::{Line3, Point3};

    fn sample_trail() -> Trail {
        let line = Line3::new(vec![Point3::new_2d(0.0, 0.0), Point3::new_2d(0.0, 1.0)]).unwrap();
        Trail::from_geometry(TrailId::new(), "t", "r", "s", line, None)
    }

    #[test]
    fn commit_persists_mutation() {
        let mut ns = StagingNamespace::create("ns").unwrap();
        let trail = sample_trail();
        let id = trail.trail_id;
        {
            let mut tx = ns.begin();
            tx.insert_trail(trail, "test", None);
            tx.commit();
        }
        assert!(ns.get_trail(&id).is_some());
    }

    #[test]
    fn drop_without_commit_rolls_back() {
        let mut ns = StagingNamespace::create("ns").unwrap();
        let trail = sample_trail();
        let id = trail.trail_id;
        {
            let mut tx = ns.begin();
            tx.insert_trail(trail, "test", None);
            // tx dropped here without commit
        }
        assert!(ns.get_trail(&id).is_none());
        assert!(ns.tracking().unmatched_deletions().is_empty());
    }

    #[test]
    fn explicit_rollback_undoes_delete() {
        let mut ns = StagingNamespace::create("ns").unwrap();
        let trail = sample_trail();
        let id = trail.trail_id;
        ns.insert_trail_untracked(trail);
        {
            let mut tx = ns.begin();
            tx.delete_trail(&id, None);
            tx.rollback();
        }
        assert!(ns.get_trail(&id).is_some());
    }
}
