use std::collections::HashMap;

use anyhow::{bail, Result};
use trailmesh_geom::{BoundingBox, SpatialIndex};
use trailmesh_model::{GeometryTrackingRecord, SplitOperationLog, Trail, TrailId};

use crate::transaction::Transaction;

/// Validates a staging namespace identifier once, at construction, so the
/// rest of this crate never has to interpolate or re-check it (Design
/// Note, spec.md §9: "ad-hoc SQL building → parameterized templates" — the
/// namespace name is an identifier, not a value).
fn validate_identifier(name: &str) -> Result<()> {
    if name.is_empty() {
        bail!("staging namespace name must not be empty");
    }
    if !name.chars().next().unwrap().is_ascii_alphabetic() {
        bail!("staging namespace name must start with a letter: {name:?}");
    }
    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        bail!("staging namespace name must be alphanumeric/underscore only: {name:?}");
    }
    Ok(())
}

/// The owned, isolated working area in which all pipeline mutations occur
/// (spec.md §4.B). Exclusively owned by one pipeline run — concurrent runs
/// must construct distinct namespaces, never share one.
#[derive(Debug, Default)]
pub struct StagingNamespace {
    name: String,
    pub(crate) trails: HashMap<TrailId, Trail>,
    pub(crate) intersection_points: Vec<trailmesh_model::IntersectionPoint>,
    pub(crate) nodes: Vec<trailmesh_model::Node>,
    pub(crate) edges: Vec<trailmesh_model::Edge>,
    pub(crate) operation_log: Vec<SplitOperationLog>,
    pub(crate) region_metadata: HashMap<String, String>,
    pub(crate) tracking: GeometryTrackingRecord,
    next_op_id: u64,
}

impl StagingNamespace {
    /// Creates a new, empty namespace. Fails if `name` is not a valid
    /// identifier.
    pub fn create(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        validate_identifier(&name)?;
        Ok(Self { name, ..Default::default() })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Drops every row in every table. The namespace itself remains usable
    /// afterward (mirrors a `DROP ... CASCADE` followed by re-creation).
    pub fn clear(&mut self) {
        self.trails.clear();
        self.intersection_points.clear();
        self.nodes.clear();
        self.edges.clear();
        self.operation_log.clear();
        self.region_metadata.clear();
        self.tracking = GeometryTrackingRecord::new();
    }

    pub fn insert_trail_untracked(&mut self, trail: Trail) {
        self.trails.insert(trail.trail_id, trail);
    }

    pub fn get_trail(&self, id: &TrailId) -> Option<&Trail> {
        self.trails.get(id)
    }

    pub fn trail_count(&self) -> usize {
        self.trails.len()
    }

    pub fn trails(&self) -> impl Iterator<Item = &Trail> {
        self.trails.values()
    }

    /// Bounded-row cursor paging over trails, ordered by `trail_id` for
    /// determinism. `after` excludes ids at or before the given id.
    pub fn scan(&self, after: Option<&TrailId>, limit: usize) -> Vec<&Trail> {
        let mut ids: Vec<&TrailId> = self.trails.keys().collect();
        ids.sort_by_key(|id| id.to_string());
        let start = match after {
            Some(a) => ids.partition_point(|id| id.to_string() <= a.to_string()),
            None => 0,
        };
        ids[start..].iter().take(limit).map(|id| &self.trails[*id]).collect()
    }

    /// Builds a bounding-box spatial index over the current trail set, for
    /// the detector's and deduplicator's candidate-pair searches.
    pub fn spatial_index(&self) -> (Vec<TrailId>, SpatialIndex) {
        let mut ids: Vec<TrailId> = self.trails.keys().copied().collect();
        ids.sort_by_key(|id| id.to_string());
        let boxes = ids
            .iter()
            .enumerate()
            .map(|(i, id)| {
                let bbox = self.trails[id].bbox;
                BoundingBox::new(i, (bbox.min_lng, bbox.min_lat), (bbox.max_lng, bbox.max_lat))
            })
            .collect();
        (ids, SpatialIndex::build(boxes))
    }

    pub fn intersection_points(&self) -> &[trailmesh_model::IntersectionPoint] {
        &self.intersection_points
    }

    pub fn set_intersection_points(&mut self, points: Vec<trailmesh_model::IntersectionPoint>) {
        self.intersection_points = points;
    }

    pub fn nodes(&self) -> &[trailmesh_model::Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[trailmesh_model::Edge] {
        &self.edges
    }

    pub fn set_graph(&mut self, nodes: Vec<trailmesh_model::Node>, edges: Vec<trailmesh_model::Edge>) {
        self.nodes = nodes;
        self.edges = edges;
    }

    pub fn operation_log(&self) -> &[SplitOperationLog] {
        &self.operation_log
    }

    pub fn next_op_id(&mut self) -> u64 {
        self.next_op_id += 1;
        self.next_op_id
    }

    pub fn push_log(&mut self, log: SplitOperationLog) {
        self.operation_log.push(log);
    }

    pub fn tracking(&self) -> &GeometryTrackingRecord {
        &self.tracking
    }

    pub fn tracking_mut(&mut self) -> &mut GeometryTrackingRecord {
        &mut self.tracking
    }

    pub fn set_region_metadata(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.region_metadata.insert(key.into(), value.into());
    }

    pub fn region_metadata(&self) -> &HashMap<String, String> {
        &self.region_metadata
    }

    /// Opens a transaction over this namespace's trail table. All writes
    /// made through the returned [`Transaction`] are rolled back unless
    /// [`Transaction::commit`] is called before it is dropped.
    pub fn begin(&mut self) -> Transaction<'_> {
        Transaction::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_name() {
        assert!(StagingNamespace::create("").is_err());
    }

    #[test]
    fn rejects_non_identifier_name() {
        assert!(StagingNamespace::create("bad; drop table").is_err());
    }

    #[test]
    fn accepts_simple_name() {
        assert!(StagingNamespace::create("run_2026_07_28").is_ok());
    }

    #[test]
    fn scan_pages_deterministically() {
        let mut ns = StagingNamespace::create("ns").unwrap();
        for i in 0..5 {
            let id = TrailId::new();
            let line = trailmesh_geom::Line3::new(vec![
                trailmesh_geom::Point3::new_2d(0.0, i as f64),
                trailmesh_geom::Point3::new_2d(0.0, i as f64 + 1.0),
            ])
            .unwrap();
            ns.insert_trail_untracked(Trail::from_geometry(id, format!("t{i}"), "r", "s", line, None));
        }
        let first_page = ns.scan(None, 2);
        assert_eq!(first_page.len(), 2);
        let last_id = first_page[1].trail_id;
        let second_page = ns.scan(Some(&last_id), 2);
        assert_eq!(second_page.len(), 2);
        assert!(second_page[0].trail_id != first_page[0].trail_id);
    }
}
