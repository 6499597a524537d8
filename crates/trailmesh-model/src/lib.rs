//! Shared entity types for the trail-network construction pipeline.
//!
//! Every other crate in this workspace parses untyped input into these
//! record types at the boundary and works with them exclusively from then
//! on (Design Note, spec.md §9: "dynamic row shapes → tagged variants").

mod config;
mod error;
mod graph;
mod ids;
mod intersection;
mod log;
mod summary;
mod trail;
mod tracking;

pub use config::PipelineConfig;
pub use error::PipelineError;
pub use graph::{Edge, Node, NodeType};
pub use ids::{EdgeId, NodeId, TrailId};
pub use intersection::{IntersectionKind, IntersectionPoint};
pub use log::{OpKind, OpResult, SplitOperationLog};
pub use summary::RunSummary;
pub use trail::{BBox, ElevationStats, Trail};
pub use tracking::{GeometryTrackingRecord, TrackingRow};
