use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ids::TrailId;

/// Which kind of mutation a [`SplitOperationLog`] row records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OpKind {
    Split,
    Snap,
    Merge,
    Delete,
    Insert,
}

impl OpKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OpKind::Split => "split",
            OpKind::Snap => "snap",
            OpKind::Merge => "merge",
            OpKind::Delete => "delete",
            OpKind::Insert => "insert",
        }
    }
}

/// Outcome of one operation, with the length-conservation accounting
/// spec.md §8-1 is checked against.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OpResult {
    pub ok: bool,
    pub segments_created: u32,
    pub original_length_km: f64,
    pub total_length_km: f64,
    pub length_diff_km: f64,
    pub length_diff_pct: f64,
    pub error: Option<String>,
}

impl OpResult {
    pub fn success(original_length_km: f64, total_length_km: f64, segments_created: u32) -> Self {
        let length_diff_km = (total_length_km - original_length_km).abs();
        let length_diff_pct = if original_length_km > 0.0 {
            100.0 * length_diff_km / original_length_km
        } else {
            0.0
        };
        Self {
            ok: true,
            segments_created,
            original_length_km,
            total_length_km,
            length_diff_km,
            length_diff_pct,
            error: None,
        }
    }

    pub fn failure(original_length_km: f64, reason: impl Into<String>) -> Self {
        Self {
            ok: false,
            segments_created: 0,
            original_length_km,
            total_length_km: 0.0,
            length_diff_km: 0.0,
            length_diff_pct: 0.0,
            error: Some(reason.into()),
        }
    }
}

/// An append-only record of a single mutation the central split manager
/// performed (or was notified of). `timestamp` is supplied by the caller
/// at construction time — this crate never reads the system clock
/// directly, so a pipeline run stays reproducible in tests.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SplitOperationLog {
    pub op_id: u64,
    pub timestamp: i64,
    pub service_name: String,
    pub op_kind: OpKind,
    pub original_trail_id: TrailId,
    pub original_trail_name: String,
    pub result: OpResult,
    pub metadata: Option<Value>,
}
