use trailmesh_model::{OpKind, OpResult, RunSummary, SplitOperationLog, Trail, TrailId};
use trailmesh_split::{execute_split, TrailSplitOperation, ValidationFailure};
use trailmesh_staging::StagingNamespace;

use crate::integrity::IntegrityReport;

/// Owned context mediating every mutation to a [`StagingNamespace`]'s
/// trail table (spec.md §4.E). Not `Sync` — a run owns exactly one of
/// these, single-threaded, matching the teacher's non-parallel mutation
/// convention for stateful builders.
pub struct SplitManager {
    config: trailmesh_model::PipelineConfig,
    summary: RunSummary,
    next_op_id: u64,
}

impl SplitManager {
    pub fn new(config: trailmesh_model::PipelineConfig) -> Self {
        Self { config, summary: RunSummary::new(), next_op_id: 0 }
    }

    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    fn take_op_id(&mut self) -> u64 {
        self.next_op_id += 1;
        self.next_op_id
    }

    /// Forwards one split operation to `trailmesh-split`, commits the
    /// replacement segments in place of the original inside a single
    /// transaction on success, and logs the outcome either way. Never
    /// returns an `Err` for a geometrically-rejected split — that is a
    /// logged, counted outcome, not a manager failure (spec.md §4.D: a
    /// failed split rolls back its own transaction and is recorded).
    pub fn split(
        &mut self,
        ns: &mut StagingNamespace,
        op: TrailSplitOperation,
        service_name: &str,
    ) -> Result<(), ValidationFailure> {
        let original_id = op.original.trail_id;
        let original_name = op.original.name.clone();
        let original_length_km = op.original.length_km;

        match execute_split(&op, &self.config) {
            Ok(outcome) => {
                let total_length_km = outcome.total_length_km();
                let segments_created = outcome.segments.len() as u32;
                {
                    let mut tx = ns.begin();
                    tx.delete_trail(&original_id, None);
                    for segment in outcome.segments {
                        tx.insert_trail(segment, service_name, Some(original_id));
                    }
                    tx.commit();
                }
                let result = OpResult::success(original_length_km, total_length_km, segments_created);
                tracing::info!(trail_id = %original_id, segments_created, "split committed");
                self.log(ns, service_name, OpKind::Split, original_id, original_name, result, None);
                Ok(())
            }
            Err(failure) => {
                tracing::warn!(trail_id = %original_id, reason = %failure, "split rejected");
                let result = OpResult::failure(original_length_km, failure.to_string());
                self.log(ns, service_name, OpKind::Split, original_id, original_name, result, None);
                Err(failure)
            }
        }
    }

    /// Records a notification from another service about a mutation this
    /// manager did not itself perform (insert/delete/snap/merge — spec.md
    /// §4.E: "accepts ... notifications from other services for logging").
    /// The caller is responsible for having already made the corresponding
    /// change to `ns`; this only logs and counts it.
    pub fn notify(
        &mut self,
        ns: &mut StagingNamespace,
        service_name: &str,
        kind: OpKind,
        trail_id: TrailId,
        trail_name: impl Into<String>,
        result: OpResult,
        metadata: Option<serde_json::Value>,
    ) {
        self.log(ns, service_name, kind, trail_id, trail_name.into(), result, metadata);
    }

    fn log(
        &mut self,
        ns: &mut StagingNamespace,
        service_name: &str,
        kind: OpKind,
        trail_id: TrailId,
        trail_name: String,
        result: OpResult,
        metadata: Option<serde_json::Value>,
    ) {
        let log = SplitOperationLog {
            op_id: self.take_op_id(),
            timestamp: 0,
            service_name: service_name.to_string(),
            op_kind: kind,
            original_trail_id: trail_id,
            original_trail_name: trail_name,
            result,
            metadata,
        };
        self.summary.record(&log);
        ns.push_log(log);
    }

    /// End-of-pipeline integrity gate (spec.md §4.E): every deletion must
    /// be matched by at least one replacement insert, and the aggregate
    /// length difference across all logged operations must stay within
    /// `validation_tolerance_percentage` of the total length processed.
    /// The caller is expected to roll back any containing outer
    /// transaction when this reports a failure.
    pub fn validate_geometry_integrity(&self, ns: &StagingNamespace) -> IntegrityReport {
        integrity::check(ns, &self.summary, &self.config)
    }

    pub fn insert_untracked(&mut self, ns: &mut StagingNamespace, trail: Trail, service_name: &str) {
        let id = trail.trail_id;
        let name = trail.name.clone();
        let length_km = trail.length_km;
        {
            let mut tx = ns.begin();
            tx.insert_trail(trail, service_name, None);
            tx.commit();
        }
        let result = OpResult::success(length_km, length_km, 1);
        self.log(ns, service_name, OpKind::Insert, id, name, result, None);
    }
}
