use rstar::{RTree, RTreeObject, AABB};

/// An axis-aligned bounding box tagged with the index of the owning item in
/// some external `Vec`. The `RTreeObject` impl is the same
/// bulk-load-then-query pattern used throughout this codebase's spatial
/// lookups (detector candidate pairs, staging-store trail index,
/// deduplicator bbox search).
#[derive(Debug, Clone, Copy)]
pub struct BoundingBox {
    pub idx: usize,
    pub min: (f64, f64),
    pub max: (f64, f64),
}

impl BoundingBox {
    pub fn new(idx: usize, min: (f64, f64), max: (f64, f64)) -> Self {
        Self { idx, min, max }
    }
}

impl RTreeObject for BoundingBox {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners([self.min.0, self.min.1], [self.max.0, self.max.1])
    }
}

/// A bulk-loaded R-tree over a fixed set of bounding boxes, built once and
/// queried many times by every O(n²)-avoiding search in this workspace
/// (intersection candidate pairs, T/Y endpoint-near-trail checks,
/// deduplication candidates).
#[derive(Debug, Clone)]
pub struct SpatialIndex {
    tree: RTree<BoundingBox>,
}

impl SpatialIndex {
    pub fn build(boxes: Vec<BoundingBox>) -> Self {
        Self { tree: RTree::bulk_load(boxes) }
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Items whose bounding box intersects the envelope
    /// `(min_lng, min_lat)..(max_lng, max_lat)`, expanded by `pad` degrees
    /// on every side (used to turn a tolerance in meters into a coarse
    /// degree pad before the exact geodesic check).
    pub fn query(&self, min: (f64, f64), max: (f64, f64), pad: f64) -> impl Iterator<Item = &BoundingBox> {
        let envelope = AABB::from_corners([min.0 - pad, min.1 - pad], [max.0 + pad, max.1 + pad]);
        self.tree.locate_in_envelope_intersecting(&envelope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_finds_overlapping_box() {
        let idx = SpatialIndex::build(vec![
            BoundingBox::new(0, (0.0, 0.0), (1.0, 1.0)),
            BoundingBox::new(1, (5.0, 5.0), (6.0, 6.0)),
        ]);
        let hits: Vec<_> = idx.query((0.5, 0.5), (0.5, 0.5), 0.1).collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].idx, 0);
    }
}
