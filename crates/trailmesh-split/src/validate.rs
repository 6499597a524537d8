use std::fmt;

use trailmesh_geom::{coverage_difference, length_geodesic, Line3};
use trailmesh_model::PipelineConfig;

/// The specific reason a split was rejected (spec.md §4.D step 4/5). Never
/// propagates past the central split manager — it is recorded verbatim in
/// the failing [`trailmesh_model::SplitOperationLog`] row's `error` field.
#[derive(Clone, Debug, PartialEq)]
pub enum ValidationFailure {
    LengthNotConserved { expected_km: f64, actual_km: f64, tolerance_km: f64 },
    CoverageGap { uncovered_length_m: f64, uncovered_area: f64 },
    SegmentsOverlap { overlap_m: f64 },
    NoSegmentsSurvived,
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationFailure::LengthNotConserved { expected_km, actual_km, tolerance_km } => write!(
                f,
                "length not conserved: expected {expected_km:.6} km, got {actual_km:.6} km (tolerance {tolerance_km:.6} km)"
            ),
            ValidationFailure::CoverageGap { uncovered_length_m, uncovered_area } => write!(
                f,
                "coverage gap: {uncovered_length_m:.3} m uncovered (area {uncovered_area:.9})"
            ),
            ValidationFailure::SegmentsOverlap { overlap_m } => {
                write!(f, "segments overlap by {overlap_m:.3} m")
            }
            ValidationFailure::NoSegmentsSurvived => {
                write!(f, "every candidate segment was below the minimum segment length")
            }
        }
    }
}

/// Runs the length/coverage/continuity checks of spec.md §4.D step 4
/// against a set of candidate segments for `original`. Returns the first
/// violation found, in the order the spec lists them.
pub fn validate(original: &Line3, segments: &[Line3], config: &PipelineConfig) -> Result<(), ValidationFailure> {
    if segments.is_empty() {
        return Err(ValidationFailure::NoSegmentsSurvived);
    }

    let original_m = length_geodesic(original);
    let total_m: f64 = segments.iter().map(length_geodesic).sum();
    let tolerance_m = config
        .validation_tolerance_meters
        .max(config.validation_tolerance_percentage / 100.0 * original_m);
    if (total_m - original_m).abs() > tolerance_m {
        return Err(ValidationFailure::LengthNotConserved {
            expected_km: original_m / 1000.0,
            actual_km: total_m / 1000.0,
            tolerance_km: tolerance_m / 1000.0,
        });
    }

    let coverage = coverage_difference(original, segments);
    if coverage.uncovered_length_m > 1e-3 || coverage.uncovered_area > 1e-6 {
        return Err(ValidationFailure::CoverageGap {
            uncovered_length_m: coverage.uncovered_length_m,
            uncovered_area: coverage.uncovered_area,
        });
    }

    let overlap_m = max_pairwise_overlap_m(segments);
    if overlap_m > 1e-3 {
        return Err(ValidationFailure::SegmentsOverlap { overlap_m });
    }

    Ok(())
}

/// Largest interior overlap (in meters of arc) between any two segments.
///
/// Adjacent segments are expected to touch at exactly one shared boundary
/// point — that is not an overlap. This samples each segment's *interior*
/// (excluding both endpoints) and checks whether the sample also projects
/// onto the *interior* of another segment; a genuine overlap produces a
/// run of such samples, while a correct shared-boundary touch contributes
/// none (it only ever occurs exactly at an endpoint, which is excluded).
fn max_pairwise_overlap_m(segments: &[Line3]) -> f64 {
    const SAMPLES: usize = 16;
    const INTERIOR_TOL: f64 = 0.02; // stay clear of the shared endpoint
    const ON_LINE_TOL_M: f64 = 0.05; // 5 cm: "lies on the other segment"

    let mut worst = 0.0f64;
    for i in 0..segments.len() {
        for j in (i + 1)..segments.len() {
            let (a, b) = (&segments[i], &segments[j]);
            let a_len = length_geodesic(a);
            let mut overlap_len = 0.0;
            for k in 1..SAMPLES {
                let t = k as f64 / SAMPLES as f64;
                let p = trailmesh_geom::line_interpolate(a, t);
                let u = trailmesh_geom::line_locate(b, p);
                if u <= INTERIOR_TOL || u >= 1.0 - INTERIOR_TOL {
                    continue;
                }
                let cp = trailmesh_geom::closest_point(b, p);
                if trailmesh_geom::geodesic_distance_m(p, cp) <= ON_LINE_TOL_M {
                    overlap_len += a_len / SAMPLES as f64;
                }
            }
            worst = worst.max(overlap_len);
        }
    }
    worst
}

#[cfg(test)]
mod tests {
    use super::*;
    use trailmesh_geom::{split_by_point, Point3};

    fn line(points: &[(f64, f64)]) -> Line3 {
        Line3::new(points.iter().map(|&(x, y)| Point3::new_2d(x, y)).collect()).unwrap()
    }

    #[test]
    fn accepts_clean_split() {
        let whole = line(&[(-105.3, 40.0), (-105.2, 40.0)]);
        let mid = trailmesh_geom::closest_point(&whole, Point3::new_2d(-105.25, 40.0));
        let segments = split_by_point(&whole, mid);
        let config = PipelineConfig::default();
        assert!(validate(&whole, &segments, &config).is_ok());
    }

    #[test]
    fn rejects_length_violation() {
        let whole = line(&[(-105.3, 40.0), (-105.2, 40.0)]);
        // Fabricate a faulty "0.8x length" segment set: one segment that
        // covers only 80% of the original's arc.
        let short_end = trailmesh_geom::line_interpolate(&whole, 0.8);
        let faulty = line(&[(whole.first().lng, whole.first().lat), (short_end.lng, short_end.lat)]);
        let config = PipelineConfig::default();
        let result = validate(&whole, &[faulty], &config);
        assert!(matches!(result, Err(ValidationFailure::LengthNotConserved { .. })));
    }
}
