use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::log::{OpKind, SplitOperationLog};

/// Aggregate counters the central split manager accumulates over a run
/// (spec.md §4.E: "maintains running counters"). Built incrementally via
/// [`RunSummary::record`], one call per logged operation.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RunSummary {
    pub total_operations: u64,
    pub successful_operations: u64,
    pub failed_operations: u64,
    pub by_kind: HashMap<String, u64>,
    pub by_service: HashMap<String, u64>,
    pub cumulative_length_diff_km: f64,
}

impl RunSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, log: &SplitOperationLog) {
        self.total_operations += 1;
        if log.result.ok {
            self.successful_operations += 1;
        } else {
            self.failed_operations += 1;
        }
        *self.by_kind.entry(log.op_kind.as_str().to_string()).or_insert(0) += 1;
        *self.by_service.entry(log.service_name.clone()).or_insert(0) += 1;
        self.cumulative_length_diff_km += log.result.length_diff_km;
    }

    pub fn success_rate(&self) -> f64 {
        if self.total_operations == 0 {
            1.0
        } else {
            self.successful_operations as f64 / self.total_operations as f64
        }
    }

    pub fn count_for_kind(&self, kind: OpKind) -> u64 {
        self.by_kind.get(kind.as_str()).copied().unwrap_or(0)
    }
}
