//! Top-level orchestration wiring every component crate into one pipeline
//! run (spec.md §2 data flow: raw trails → intersection points → atomic
//! splits → deduplication → nodes/edges → snapshot file, with the
//! validator running last against the staged result).
//!
//! No CLI front end lives here (spec.md §1 lists it as an external
//! collaborator) — a caller supplies trails and a config and gets back
//! the staged namespace plus every operation/validation outcome.

mod plan;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Result;

use trailmesh_manager::SplitManager;
use trailmesh_model::{PipelineConfig, PipelineError, RunSummary, Trail};
use trailmesh_staging::StagingNamespace;
use trailmesh_validate::ValidationFinding;

pub use plan::build_split_operations;

/// Everything a pipeline run produces: the staged namespace (trails,
/// graph, operation log), the central manager's run summary, every
/// validator finding, and the snapshot file path when one was requested.
pub struct PipelineOutput {
    pub namespace: StagingNamespace,
    pub summary: RunSummary,
    pub validation_findings: Vec<ValidationFinding>,
    pub snapshot_path: Option<PathBuf>,
}

/// Runs the full construction pipeline over `source_trails` inside a
/// fresh namespace named `namespace_name`.
///
/// Order of operations matches spec.md §2/§5: ingest, detect
/// intersections, split, deduplicate, synthesize the routing graph, run
/// the end-of-run integrity gate, optionally export a snapshot, then run
/// the read-only validator. A failed integrity gate aborts the run
/// (spec.md §4.E: "fails the whole run ... when any deletion lacks a
/// replacement or when any length-conservation guarantee is violated in
/// aggregate") before anything is exported.
pub fn run_pipeline(
    source_trails: Vec<Trail>,
    config: &PipelineConfig,
    namespace_name: &str,
    snapshot_path: Option<&Path>,
) -> Result<PipelineOutput> {
    let mut ns = StagingNamespace::create(namespace_name)?;
    let mut manager = SplitManager::new(*config);

    for trail in source_trails {
        manager.insert_untracked(&mut ns, trail, "ingest");
    }
    let pre_split_total_length_km: f64 = ns.trails().map(|t| t.length_km).sum();
    tracing::info!(trail_count = ns.trail_count(), pre_split_total_length_km, "ingest complete");

    let pre_split_trails: Vec<Trail> = ns.trails().cloned().collect();
    let intersections = trailmesh_detect::detect_intersections(&pre_split_trails, config);
    tracing::info!(count = intersections.len(), "intersections detected");
    ns.set_intersection_points(intersections.clone());

    let trail_map: HashMap<_, _> = ns.trails().map(|t| (t.trail_id, t.clone())).collect();
    let ops = plan::build_split_operations(&trail_map, &intersections);
    for op in ops {
        let trail_id = op.original.trail_id;
        if manager.split(&mut ns, op, "detector").is_err() {
            tracing::warn!(trail_id = %trail_id, "split operation failed, original trail retained");
        }
    }

    let deleted = trailmesh_dedup::deduplicate(&mut ns, &mut manager, "dedup");
    tracing::info!(deleted = deleted.len(), "deduplication complete");

    let post_dedup_trails: Vec<Trail> = ns.trails().cloned().collect();
    let graph = trailmesh_graph::synthesize(&post_dedup_trails, config);
    ns.set_graph(graph.nodes, graph.edges);

    let integrity = manager.validate_geometry_integrity(&ns);
    if !integrity.is_ok() {
        return Err(PipelineError::IntegrityViolation(format!("{integrity:?}")).into());
    }

    let snapshot_path = match snapshot_path {
        Some(path) => {
            trailmesh_snapshot::export(&ns, path, config)?;
            Some(path.to_path_buf())
        }
        None => None,
    };

    let validation_findings = trailmesh_validate::validate(&ns, pre_split_total_length_km, config);
    if !validation_findings.is_empty() {
        tracing::warn!(count = validation_findings.len(), "post-run validation reported findings");
    }

    Ok(PipelineOutput { namespace: ns, summary: manager.summary().clone(), validation_findings, snapshot_path })
}
