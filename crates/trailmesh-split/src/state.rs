/// Per-operation state machine from spec.md §4.D.
///
/// Initial state is `Pending`; terminal states are not represented here
/// (the caller's `Result<SplitOutcome, ValidationFailure>` return *is* the
/// `Ok`/`Failed` terminal state) — this enum only covers the in-flight
/// states that are worth tracing through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperationState {
    Pending,
    Splitting,
    Validating,
    Committing,
    RollingBack,
}
