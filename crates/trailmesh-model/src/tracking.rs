use std::collections::HashMap;

use crate::ids::TrailId;

/// One row of the geometry tracking record: which trail id was inserted,
/// by which service, and (if it is a split segment) which trail it
/// replaces.
#[derive(Clone, Debug)]
pub struct TrackingRow {
    pub trail_id: TrailId,
    pub inserted_by: String,
    pub replacement_of: Option<TrailId>,
}

/// Maps `trail_id -> record index` into a flat `Vec<TrackingRow>`, per the
/// Design Note in spec.md §9 ("cyclic references → break via indices"):
/// this keeps no direct references back to `Trail` values, only ids.
///
/// Tracks every insert and every delete for the duration of a run; the
/// final integrity check ([`Self::unmatched_deletions`]) is the
/// authoritative definition of "no silent loss" (spec.md §8-2).
#[derive(Clone, Debug, Default)]
pub struct GeometryTrackingRecord {
    rows: Vec<TrackingRow>,
    index: HashMap<TrailId, usize>,
    deleted: Vec<TrailId>,
    replaced: std::collections::HashSet<TrailId>,
}

impl GeometryTrackingRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_insert(&mut self, trail_id: TrailId, inserted_by: impl Into<String>, replacement_of: Option<TrailId>) {
        if let Some(replaced) = replacement_of {
            self.replaced.insert(replaced);
        }
        let idx = self.rows.len();
        self.rows.push(TrackingRow { trail_id, inserted_by: inserted_by.into(), replacement_of });
        self.index.insert(trail_id, idx);
    }

    /// Records a deletion. `replacement_of` should be `Some(trail_id)` when
    /// the caller already knows what the deletion is matched against —
    /// either a fresh split segment (recorded moments later via
    /// [`Self::record_insert`]) or, for a deduplication collapse, the
    /// surviving representative row that already exists and will not be
    /// (re-)inserted. Passing `None` defers the match entirely to a later
    /// [`Self::record_insert`] call.
    pub fn record_delete(&mut self, trail_id: TrailId, replacement_of: Option<TrailId>) {
        self.deleted.push(trail_id);
        if replacement_of.is_some() {
            self.replaced.insert(trail_id);
        }
    }

    pub fn row(&self, trail_id: &TrailId) -> Option<&TrackingRow> {
        self.index.get(trail_id).map(|&i| &self.rows[i])
    }

    /// Every deleted trail id that has no matching insert with
    /// `replacement_of == Some(deleted)`. A non-empty result is an
    /// `IntegrityViolation` (spec.md §7).
    pub fn unmatched_deletions(&self) -> Vec<TrailId> {
        self.deleted.iter().filter(|id| !self.replaced.contains(id)).copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delete_without_insert_is_unmatched() {
        let mut record = GeometryTrackingRecord::new();
        let deleted = TrailId::new();
        record.record_delete(deleted, None);
        assert_eq!(record.unmatched_deletions(), vec![deleted]);
    }

    #[test]
    fn delete_with_matching_segment_insert_is_matched() {
        let mut record = GeometryTrackingRecord::new();
        let original = TrailId::new();
        record.record_insert(TrailId::new(), "splitter", Some(original));
        record.record_delete(original, None);
        assert!(record.unmatched_deletions().is_empty());
    }

    #[test]
    fn delete_with_known_survivor_is_matched_immediately() {
        let mut record = GeometryTrackingRecord::new();
        let duplicate = TrailId::new();
        let survivor = TrailId::new();
        record.record_delete(duplicate, Some(survivor));
        assert!(record.unmatched_deletions().is_empty());
    }
}
