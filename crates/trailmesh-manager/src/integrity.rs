use trailmesh_model::{OpKind, PipelineConfig, RunSummary, TrailId};
use trailmesh_staging::StagingNamespace;

/// Outcome of [`crate::SplitManager::validate_geometry_integrity`].
#[derive(Clone, Debug, PartialEq)]
pub enum IntegrityReport {
    Ok,
    UnmatchedDeletions(Vec<TrailId>),
    AggregateLengthViolation { diff_pct: f64, tolerance_pct: f64 },
}

impl IntegrityReport {
    pub fn is_ok(&self) -> bool {
        matches!(self, IntegrityReport::Ok)
    }
}

pub(crate) fn check(ns: &StagingNamespace, summary: &RunSummary, config: &PipelineConfig) -> IntegrityReport {
    let unmatched = ns.tracking().unmatched_deletions();
    if !unmatched.is_empty() {
        tracing::error!(count = unmatched.len(), "unmatched deletions at end of run");
        return IntegrityReport::UnmatchedDeletions(unmatched.to_vec());
    }

    // Length conservation only applies to operations that redistribute a
    // trail's own arc length across replacement rows (splits); a delete
    // notification has no "conserved length" to measure against, so it is
    // excluded here rather than read as a 100% length loss.
    let split_logs = ns.operation_log().iter().filter(|log| log.op_kind == OpKind::Split);
    let total_original_km: f64 = split_logs.clone().map(|log| log.result.original_length_km).sum();
    let split_diff_km: f64 = split_logs.map(|log| log.result.length_diff_km).sum();
    if total_original_km > 0.0 {
        let diff_pct = 100.0 * split_diff_km / total_original_km;
        if diff_pct > config.validation_tolerance_percentage {
            tracing::error!(diff_pct, "aggregate length conservation violated");
            return IntegrityReport::AggregateLengthViolation {
                diff_pct,
                tolerance_pct: config.validation_tolerance_percentage,
            };
        }
    }

    IntegrityReport::Ok
}
