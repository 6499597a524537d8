use std::fmt;

/// The closed error taxonomy from spec.md §7.
///
/// Plain `Debug`/`Display` enum rather than a `thiserror`-derived type —
/// matches this workspace's existing error style (see `trailmesh-geom`'s
/// lack of a dedicated error type and the general pattern of enumerated,
/// non-`std::error::Error` variants used for internal, recoverable
/// conditions). Boundary functions still return `anyhow::Result` and wrap
/// a `PipelineError` with `.context(...)` as needed.
#[derive(Clone, Debug, PartialEq)]
pub enum PipelineError {
    /// Malformed geometry, missing required columns, unknown region.
    /// Recovered at batch boundary by skipping the row.
    InputInvalid(String),
    /// Split length/coverage/continuity violated. Operation rolled back.
    OperationValidationFailure(String),
    /// End-of-run geometry-tracking mismatch: a delete without a matched
    /// insert. Fatal to the run.
    IntegrityViolation(String),
    /// Snapshot size over budget, or staging disk exhausted. Fatal.
    ResourceLimit(String),
    /// Database connection lost or unexpected exception. Fatal.
    SystemFault(String),
}

impl PipelineError {
    /// `true` for errors that are recoverable at an operation boundary
    /// (spec.md §7 propagation rules) — everything except
    /// `IntegrityViolation`, `ResourceLimit`, and `SystemFault`.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, PipelineError::InputInvalid(_) | PipelineError::OperationValidationFailure(_))
    }
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::InputInvalid(msg) => write!(f, "input invalid: {msg}"),
            PipelineError::OperationValidationFailure(msg) => write!(f, "operation validation failure: {msg}"),
            PipelineError::IntegrityViolation(msg) => write!(f, "integrity violation: {msg}"),
            PipelineError::ResourceLimit(msg) => write!(f, "resource limit exceeded: {msg}"),
            PipelineError::SystemFault(msg) => write!(f, "system fault: {msg}"),
        }
    }
}

impl std::error::Error for PipelineError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_failure_is_recoverable() {
        assert!(PipelineError::OperationValidationFailure("x".into()).is_recoverable());
    }

    #[test]
    fn integrity_violation_is_fatal() {
        assert!(!PipelineError::IntegrityViolation("x".into()).is_recoverable());
    }
}
