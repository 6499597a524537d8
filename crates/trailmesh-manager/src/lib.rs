//! Central split manager (spec.md §4.E): the single place every mutation
//! to the trail table is logged, counted, and gated before it commits.
//!
//! Modeled as an owned context (`SplitManager`) rather than the
//! process-wide singleton spec.md describes literally — construct one per
//! pipeline run, or a fresh one per test case. Nothing here reaches into
//! global state; every method takes the `StagingNamespace` it mutates
//! explicitly.

mod integrity;
mod manager;

pub use integrity::IntegrityReport;
pub use manager::SplitManager;
