use serde::{Deserialize, Serialize};
use trailmesh_geom::Point3;

use crate::ids::TrailId;

/// The kind of intersection point the detector found.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IntersectionKind {
    /// Two distinct trails cross at an interior point of both.
    Crossing,
    /// An endpoint of one trail lies near the interior of a distinct trail.
    TEndpoint,
    /// An endpoint of a trail lies near the interior of the *same* trail
    /// (a loop that nearly closes, or a near-duplicate path).
    YEndpoint,
}

/// A candidate split point produced by the detector. Exists only for the
/// duration of a pipeline run (spec.md §3) — never persisted past the
/// staging namespace it was detected in.
#[derive(Clone, Debug, PartialEq)]
pub struct IntersectionPoint {
    pub point: Point3,
    pub kind: IntersectionKind,
    pub trail_ids: Vec<TrailId>,
}

impl IntersectionPoint {
    pub fn new(point: Point3, kind: IntersectionKind, mut trail_ids: Vec<TrailId>) -> Self {
        trail_ids.sort_by_key(|id| id.to_string());
        trail_ids.dedup();
        Self { point, kind, trail_ids }
    }
}
