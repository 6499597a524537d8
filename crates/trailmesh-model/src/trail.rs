use serde::{Deserialize, Serialize};
use trailmesh_geom::Line3;

use crate::ids::TrailId;

/// Non-negative elevation statistics for a trail's geometry, in meters.
///
/// `min ≤ avg ≤ max` whenever all three are present (spec.md §3 invariant).
/// 2D trails carry `None` in every field; 3D trails populate all of them.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ElevationStats {
    pub gain_m: f64,
    pub loss_m: f64,
    pub min_m: Option<f64>,
    pub max_m: Option<f64>,
    pub avg_m: Option<f64>,
}

impl ElevationStats {
    pub const ZERO: Self = Self { gain_m: 0.0, loss_m: 0.0, min_m: None, max_m: None, avg_m: None };

    /// Computes gain/loss/min/max/avg from a 3D line's elevation channel.
    /// Returns [`Self::ZERO`] (with `min/max/avg = None`) for a 2D line.
    pub fn from_line(line: &Line3) -> Self {
        let elevations: Vec<f64> = line.points().iter().filter_map(|p| p.elevation).collect();
        if elevations.len() < line.len() {
            return Self::ZERO;
        }
        let (mut gain, mut loss) = (0.0, 0.0);
        for w in elevations.windows(2) {
            let d = w[1] - w[0];
            if d > 0.0 {
                gain += d;
            } else {
                loss += -d;
            }
        }
        let min_m = elevations.iter().cloned().fold(f64::INFINITY, f64::min);
        let max_m = elevations.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let avg_m = elevations.iter().sum::<f64>() / elevations.len() as f64;
        Self { gain_m: gain, loss_m: loss, min_m: Some(min_m), max_m: Some(max_m), avg_m: Some(avg_m) }
    }

    /// Redistributes gain/loss proportionally to `fraction` of the
    /// original trail's length, for a segment produced by a split
    /// (spec.md §4.D step 3). `min/max/avg` are not meaningful per-segment
    /// without re-walking that segment's own geometry, so callers should
    /// prefer [`Self::from_line`] on the segment itself when available.
    pub fn scaled(&self, fraction: f64) -> Self {
        Self {
            gain_m: self.gain_m * fraction,
            loss_m: self.loss_m * fraction,
            min_m: self.min_m,
            max_m: self.max_m,
            avg_m: self.avg_m,
        }
    }
}

/// Axis-aligned bounding box in lng/lat.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub min_lng: f64,
    pub min_lat: f64,
    pub max_lng: f64,
    pub max_lat: f64,
}

impl BBox {
    pub fn from_line(line: &Line3) -> Self {
        let mut bbox = Self {
            min_lng: f64::INFINITY,
            min_lat: f64::INFINITY,
            max_lng: f64::NEG_INFINITY,
            max_lat: f64::NEG_INFINITY,
        };
        for p in line.points() {
            bbox.min_lng = bbox.min_lng.min(p.lng);
            bbox.min_lat = bbox.min_lat.min(p.lat);
            bbox.max_lng = bbox.max_lng.max(p.lng);
            bbox.max_lat = bbox.max_lat.max(p.lat);
        }
        bbox
    }

    pub fn intersects(&self, other: &BBox) -> bool {
        self.min_lng <= other.max_lng
            && self.max_lng >= other.min_lng
            && self.min_lat <= other.max_lat
            && self.max_lat >= other.min_lat
    }
}

/// A trail row: a named, regioned polyline plus derived metrics.
///
/// `original_trail_id` is `None` iff this row has never been split; `Some`
/// marks it as a segment produced by splitting that id (spec.md §3).
///
/// Not `serde`-derived: `geometry` has no JSON representation at this
/// layer (the snapshot exporter serializes it to GeoJSON text explicitly,
/// see `trailmesh-snapshot`).
#[derive(Clone, Debug)]
pub struct Trail {
    pub trail_id: TrailId,
    pub name: String,
    pub region: String,
    pub trail_type: Option<String>,
    pub surface: Option<String>,
    pub difficulty: Option<String>,
    pub geometry: Line3,
    pub length_km: f64,
    pub elevation: ElevationStats,
    pub bbox: BBox,
    pub source: String,
    pub original_trail_id: Option<TrailId>,
}

impl Trail {
    /// Builds a trail row from geometry and metadata, deriving
    /// `length_km`, `elevation`, and `bbox`. Panics only on the
    /// caller-side invariant that `geometry` is already a valid `Line3`
    /// (enforced at construction by [`trailmesh_geom::Line3::new`]).
    pub fn from_geometry(
        trail_id: TrailId,
        name: impl Into<String>,
        region: impl Into<String>,
        source: impl Into<String>,
        geometry: Line3,
        original_trail_id: Option<TrailId>,
    ) -> Self {
        let length_km = trailmesh_geom::length_geodesic(&geometry) / 1000.0;
        let elevation = ElevationStats::from_line(&geometry);
        let bbox = BBox::from_line(&geometry);
        Self {
            trail_id,
            name: name.into(),
            region: region.into(),
            trail_type: None,
            surface: None,
            difficulty: None,
            geometry,
            length_km,
            elevation,
            bbox,
            source: source.into(),
            original_trail_id,
        }
    }

    /// `true` when every invariant from spec.md §3 holds.
    pub fn is_valid(&self) -> bool {
        if self.length_km <= 0.0 || self.elevation.gain_m < 0.0 || self.elevation.loss_m < 0.0 {
            return false;
        }
        if let (Some(min), Some(avg), Some(max)) =
            (self.elevation.min_m, self.elevation.avg_m, self.elevation.max_m)
        {
            if !(min <= avg && avg <= max) {
                return false;
            }
        }
        self.geometry.len() >= 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trailmesh_geom::{Line3, Point3};

    #[test]
    fn elevation_stats_from_3d_line() {
        let line = Line3::new(vec![
            Point3::new(0.0, 0.0, Some(1800.0)),
            Point3::new(0.0, 0.01, Some(1820.0)),
            Point3::new(0.0, 0.02, Some(1810.0)),
        ])
        .unwrap();
        let stats = ElevationStats::from_line(&line);
        assert_eq!(stats.gain_m, 20.0);
        assert_eq!(stats.loss_m, 10.0);
        assert_eq!(stats.min_m, Some(1800.0));
        assert_eq!(stats.max_m, Some(1820.0));
    }

    #[test]
    fn elevation_stats_none_for_2d_line() {
        let line = Line3::new(vec![Point3::new_2d(0.0, 0.0), Point3::new_2d(0.0, 1.0)]).unwrap();
        let stats = ElevationStats::from_line(&line);
        assert_eq!(stats.min_m, None);
    }

    #[test]
    fn trail_from_geometry_has_positive_length() {
        let line = Line3::new(vec![Point3::new_2d(-105.3, 40.0), Point3::new_2d(-105.2, 40.0)]).unwrap();
        let trail = Trail::from_geometry(TrailId::new(), "Test", "boulder", "test", line, None);
        assert!(trail.length_km > 0.0);
        assert!(trail.is_valid());
    }
}
