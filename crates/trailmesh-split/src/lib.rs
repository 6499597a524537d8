//! Atomic trail splitter (spec.md §4.D).
//!
//! This crate performs one split in isolation — geometry in, validated
//! segments or a reason to reject, out. It never touches a
//! [`trailmesh_staging::StagingNamespace`] directly; the central split
//! manager (`trailmesh-manager`) owns wiring the outcome into a
//! transaction, matching the Design Note in spec.md §9 ("explicit
//! context" rather than a mutable singleton reaching into storage itself).

mod operation;
mod state;
mod validate;

pub use operation::{SplitOutcome, SplitPointInput, TrailSplitOperation};
pub use state::OperationState;
pub use validate::ValidationFailure;

use trailmesh_geom::{split_by_point, Point3};
use trailmesh_model::{ElevationStats, PipelineConfig, Trail, TrailId};

/// Executes one [`TrailSplitOperation`] end to end: order/dedupe the split
/// points, iteratively split, discard slivers, validate, and produce
/// either the replacement segments or the specific reason validation
/// failed. Never mutates any shared state — purely a function of its
/// inputs, so the central split manager can retry, log, and roll back
/// around it without this crate knowing about transactions at all.
pub fn execute_split(
    op: &TrailSplitOperation,
    config: &PipelineConfig,
) -> Result<SplitOutcome, ValidationFailure> {
    let mut state = OperationState::Pending;
    tracing::trace!(trail_id = %op.original.trail_id, state = ?state, "split operation starting");

    state = OperationState::Splitting;
    tracing::trace!(state = ?state, "splitting geometry");
    let raw_segments = split_geometry(op);

    state = OperationState::Validating;
    tracing::trace!(state = ?state, "validating segments");
    let kept: Vec<trailmesh_geom::Line3> = raw_segments
        .into_iter()
        .filter(|seg| trailmesh_geom::length_geodesic(seg) >= config.min_segment_length_meters)
        .collect();

    if let Err(failure) = validate::validate(&op.original.geometry, &kept, config) {
        tracing::warn!(trail_id = %op.original.trail_id, reason = %failure, "split validation failed, rolling back");
        return Err(failure);
    }

    state = OperationState::Committing;
    tracing::trace!(state = ?state, "committing segments");
    let total_length_m: f64 = kept.iter().map(trailmesh_geom::length_geodesic).sum();
    let segments: Vec<Trail> = kept
        .into_iter()
        .enumerate()
        .map(|(i, geometry)| build_segment(op, geometry, i, total_length_m))
        .collect();

    Ok(SplitOutcome::new(op.original.trail_id, op.original.length_km, segments))
}

fn split_geometry(op: &TrailSplitOperation) -> Vec<trailmesh_geom::Line3> {
    let mut points = op.split_points.clone();
    points.sort_by(|a, b| a.distance_along_m.total_cmp(&b.distance_along_m));
    points.dedup_by(|a, b| (a.distance_along_m - b.distance_along_m).abs() < 1e-3);

    let mut current = op.original.geometry.clone();
    let mut out = Vec::with_capacity(points.len() + 1);
    for p in &points {
        let target = Point3::new(p.lng, p.lat, None);
        let cp = trailmesh_geom::closest_point(&current, target);
        let parts = split_by_point(&current, cp);
        match parts.len() {
            2 => {
                out.push(parts[0].clone());
                current = parts[1].clone();
            }
            _ => {
                // Point landed at an endpoint of the current remainder —
                // no-op split, keep accumulating with the same remainder.
                continue;
            }
        }
    }
    out.push(current);
    out
}

fn build_segment(
    op: &TrailSplitOperation,
    geometry: trailmesh_geom::Line3,
    index: usize,
    total_length_m: f64,
) -> Trail {
    let seg_length_m = trailmesh_geom::length_geodesic(&geometry);
    let fraction = if total_length_m > 0.0 { seg_length_m / total_length_m } else { 0.0 };
    let elevation = ElevationStats::from_line(&geometry);
    let elevation = if elevation.min_m.is_some() {
        elevation
    } else {
        op.original.elevation.scaled(fraction)
    };

    let name = if index == 0 {
        op.original.name.clone()
    } else {
        format!("{} Segment {}", op.original.name, index + 1)
    };

    let mut segment = Trail::from_geometry(
        TrailId::new(),
        name,
        op.original.region.clone(),
        op.original.source.clone(),
        geometry,
        Some(op.original.trail_id),
    );
    segment.elevation = elevation;
    segment.trail_type = op.original.trail_type.clone();
    segment.surface = op.original.surface.clone();
    segment.difficulty = op.original.difficulty.clone();
    segment
}

#[cfg(test)]
mod tests {
    use super::*;
    use trailmesh_geom::{Line3, Point3};

    fn straight_trail(length_deg: f64) -> Trail {
        let line =
            Line3::new(vec![Point3::new_2d(-105.3, 40.0), Point3::new_2d(-105.3 + length_deg, 40.0)])
                .unwrap();
        Trail::from_geometry(TrailId::new(), "Straight Trail", "boulder", "test", line, None)
    }

    #[test]
    fn single_interior_point_yields_two_named_segments() {
        let original = straight_trail(0.1);
        let mid = trailmesh_geom::closest_point(&original.geometry, Point3::new_2d(-105.25, 40.0));
        let op = TrailSplitOperation {
            original: original.clone(),
            split_points: vec![SplitPointInput { lng: mid.lng, lat: mid.lat, distance_along_m: 0.0 }],
        };
        let config = PipelineConfig::default();
        let outcome = execute_split(&op, &config).unwrap();
        assert_eq!(outcome.segments.len(), 2);
        assert_eq!(outcome.segments[0].name, "Straight Trail");
        assert_eq!(outcome.segments[1].name, "Straight Trail Segment 2");
        for seg in &outcome.segments {
            assert_eq!(seg.original_trail_id, Some(original.trail_id));
        }
    }

    #[test]
    fn length_is_conserved_within_tolerance() {
        let original = straight_trail(0.1);
        let mid = trailmesh_geom::closest_point(&original.geometry, Point3::new_2d(-105.25, 40.0));
        let op = TrailSplitOperation {
            original: original.clone(),
            split_points: vec![SplitPointInput { lng: mid.lng, lat: mid.lat, distance_along_m: 0.0 }],
        };
        let config = PipelineConfig::default();
        let outcome = execute_split(&op, &config).unwrap();
        let total: f64 = outcome.segments.iter().map(|s| s.length_km).sum();
        let diff_pct = 100.0 * (total - original.length_km).abs() / original.length_km;
        assert!(diff_pct <= config.validation_tolerance_percentage);
    }

    #[test]
    fn split_point_at_endpoint_produces_single_segment() {
        let original = straight_trail(0.1);
        let start = original.geometry.first();
        let op = TrailSplitOperation {
            original: original.clone(),
            split_points: vec![SplitPointInput { lng: start.lng, lat: start.lat, distance_along_m: 0.0 }],
        };
        let config = PipelineConfig::default();
        let outcome = execute_split(&op, &config).unwrap();
        assert_eq!(outcome.segments.len(), 1);
    }
}
