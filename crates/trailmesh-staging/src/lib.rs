//! Owned, transactional working namespace for one trail-network pipeline
//! run (spec.md §4.B).
//!
//! Modeled as an explicit value rather than a global/singleton schema, per
//! Design Note spec.md §9: concurrent runs construct distinct
//! [`StagingNamespace`] values instead of sharing process-wide state.

mod namespace;
mod transaction;

pub use namespace::StagingNamespace;
pub use transaction::Transaction;
