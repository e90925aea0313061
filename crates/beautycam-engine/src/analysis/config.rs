//! Configuration for the analysis pipeline.

use serde::{Deserialize, Serialize};

/// Tunables for one analysis session.
///
/// Defaults match the shipped product behavior; the recompute interval is
/// the only value hosts commonly adjust (slower devices raise it).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Brightness (out of 255) below which a pixel counts as a spot
    /// (default: 70.0)
    pub spot_brightness_threshold: f64,

    /// Observation window before scores freeze, in milliseconds
    /// (default: 4000)
    pub stabilize_after_ms: u64,

    /// Minimum wall-clock time between full recomputations, in
    /// milliseconds (default: 100). Rendering happens every frame
    /// regardless; only the pixel sampling is rate-limited.
    pub recompute_interval_ms: u64,

    /// Inclusive range the frozen overall-health verdict is drawn from
    /// (default: 70..=80)
    pub frozen_health_min: u32,
    pub frozen_health_max: u32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            spot_brightness_threshold: 70.0,
            stabilize_after_ms: 4_000,
            recompute_interval_ms: 100,
            frozen_health_min: 70,
            frozen_health_max: 80,
        }
    }
}

impl AnalysisConfig {
    /// Override the recompute throttle.
    pub fn with_recompute_interval(mut self, interval_ms: u64) -> Self {
        self.recompute_interval_ms = interval_ms;
        self
    }

    /// Override the observation window.
    pub fn with_stabilize_after(mut self, window_ms: u64) -> Self {
        self.stabilize_after_ms = window_ms;
        self
    }
}
