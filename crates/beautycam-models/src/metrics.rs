//! Skin feature metrics emitted by the analysis engine.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Upper bound for every non-health feature score.
pub const FEATURE_SCORE_CAP: f64 = 30.0;

/// Normalized skin-condition scores for one analyzed frame.
///
/// `spots`, `wrinkles`, `acne` and `dark_circles` are bounded to
/// `[0, 30]`; `overall_health` to `[0, 100]`. The record is the engine's
/// externally visible output and is consumed by the overlay UI.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeatureMetrics {
    /// Dark-pixel density across the whole face
    pub spots: f64,
    /// Mean horizontal micro-contrast on forehead and under-eye regions
    pub wrinkles: f64,
    /// Dark-pixel density on the cheeks
    pub acne: f64,
    /// Under-eye darkness intensity
    pub dark_circles: f64,
    /// Aggregate health score shown as the final verdict
    pub overall_health: f64,
}

impl FeatureMetrics {
    /// The all-zero, full-health record shown while no face is tracked.
    pub const fn baseline() -> Self {
        Self {
            spots: 0.0,
            wrinkles: 0.0,
            acne: 0.0,
            dark_circles: 0.0,
            overall_health: 100.0,
        }
    }

    /// True when every score sits inside its documented bounds.
    pub fn in_bounds(&self) -> bool {
        let feature_ok = |v: f64| (0.0..=FEATURE_SCORE_CAP).contains(&v);
        feature_ok(self.spots)
            && feature_ok(self.wrinkles)
            && feature_ok(self.acne)
            && feature_ok(self.dark_circles)
            && (0.0..=100.0).contains(&self.overall_health)
    }
}

impl Default for FeatureMetrics {
    fn default() -> Self {
        Self::baseline()
    }
}

/// Where the current session sits in its stabilization lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum StabilizationPhase {
    /// No face tracked; metrics sit at the baseline
    NoFace,
    /// Face tracked, scores recomputed live inside the observation window
    Live,
    /// Observation window elapsed; scores frozen for the rest of the session
    Frozen,
}

impl std::fmt::Display for StabilizationPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StabilizationPhase::NoFace => write!(f, "no_face"),
            StabilizationPhase::Live => write!(f, "live"),
            StabilizationPhase::Frozen => write!(f, "frozen"),
        }
    }
}

/// Per-frame result handed to the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisOutput {
    /// Current metrics (live, frozen, or baseline)
    pub metrics: FeatureMetrics,
    /// True iff the detector reported at least one tracked face this frame
    pub face_detected: bool,
    /// Session lifecycle phase, for UI banners and progress display
    pub phase: StabilizationPhase,
}

impl AnalysisOutput {
    /// Output emitted while no face is tracked.
    pub const fn no_face() -> Self {
        Self {
            metrics: FeatureMetrics::baseline(),
            face_detected: false,
            phase: StabilizationPhase::NoFace,
        }
    }
}

impl Default for AnalysisOutput {
    fn default() -> Self {
        Self::no_face()
    }
}
