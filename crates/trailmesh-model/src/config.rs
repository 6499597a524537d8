use serde::{Deserialize, Serialize};

/// Tunable parameters shared by the detector, splitter, synthesizer, and
/// exporter (spec.md §6). This is a plain data object — loading it from a
/// file or environment is the CLI collaborator's concern, not this
/// workspace's (spec.md §1).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Used by the detector and synthesizer for crossing/cluster tolerance.
    pub intersection_tolerance_meters: f64,
    /// Used by the T/Y detector.
    pub t_intersection_tolerance_meters: f64,
    /// Splitter discard threshold for a produced segment.
    pub min_segment_length_meters: f64,
    /// Pre-snap coordinate normalization precision.
    pub coordinate_round_decimals: u32,
    /// Pre-intersection snap tolerance, in degrees.
    pub snap_tolerance_degrees: f64,
    pub validation_tolerance_meters: f64,
    pub validation_tolerance_percentage: f64,
    /// Hard cap on the exported snapshot file; exceeding it is fatal.
    pub max_snapshot_size_mb: f64,
    /// Output-only simplification tolerance; never affects in-memory
    /// geometry during splitting.
    pub simplify_tolerance: f64,
    /// Minimum trail length considered by the detector (suppresses
    /// slivers, spec.md §4.C).
    pub min_trail_length_meters: f64,
    /// Per-operation timeout before a split is treated as a failure.
    pub operation_timeout_seconds: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            intersection_tolerance_meters: 2.0,
            t_intersection_tolerance_meters: 3.0,
            min_segment_length_meters: 5.0,
            coordinate_round_decimals: 6,
            snap_tolerance_degrees: 1e-4,
            validation_tolerance_meters: 1.0,
            validation_tolerance_percentage: 0.1,
            max_snapshot_size_mb: 512.0,
            simplify_tolerance: 0.001,
            min_trail_length_meters: 5.0,
            operation_timeout_seconds: 30,
        }
    }
}

impl PipelineConfig {
    /// Clamps `intersection_tolerance_meters` into the documented
    /// 0.5–10.0 m range (spec.md §6); out-of-range values from an
    /// upstream config loader are normalized here rather than rejected,
    /// since the loader — not this crate — owns user-facing validation.
    pub fn normalized(mut self) -> Self {
        self.intersection_tolerance_meters = self.intersection_tolerance_meters.clamp(0.5, 10.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_spec() {
        let cfg = PipelineConfig::default();
        assert_eq!(cfg.intersection_tolerance_meters, 2.0);
        assert_eq!(cfg.min_segment_length_meters, 5.0);
        assert_eq!(cfg.validation_tolerance_percentage, 0.1);
    }

    #[test]
    fn normalized_clamps_tolerance() {
        let mut cfg = PipelineConfig::default();
        cfg.intersection_tolerance_meters = 50.0;
        assert_eq!(cfg.normalized().intersection_tolerance_meters, 10.0);
    }
}
