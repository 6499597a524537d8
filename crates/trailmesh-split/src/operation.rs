use trailmesh_model::{Trail, TrailId};

/// One split point on the original trail, in the shape the detector
/// (`trailmesh-detect`) emits.
#[derive(Clone, Copy, Debug)]
pub struct SplitPointInput {
    pub lng: f64,
    pub lat: f64,
    pub distance_along_m: f64,
}

/// A single trail to split at an ordered set of points, inside one
/// transaction (spec.md §4.D).
#[derive(Clone, Debug)]
pub struct TrailSplitOperation {
    pub original: Trail,
    pub split_points: Vec<SplitPointInput>,
}

/// The committed result of a successful split: the replacement segments,
/// ready for the central split manager to insert in place of the
/// original.
#[derive(Clone, Debug)]
pub struct SplitOutcome {
    pub original_trail_id: TrailId,
    pub original_length_km: f64,
    pub segments: Vec<Trail>,
}

impl SplitOutcome {
    pub fn new(original_trail_id: TrailId, original_length_km: f64, segments: Vec<Trail>) -> Self {
        Self { original_trail_id, original_length_km, segments }
    }

    pub fn total_length_km(&self) -> f64 {
        self.segments.iter().map(|s| s.length_km).sum()
    }
}
