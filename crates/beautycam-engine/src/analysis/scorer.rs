//! Feature scoring: fixed formulas from region statistics to bounded scores.
//!
//! The formulas are product contracts, not tunable heuristics. They define
//! the numbers users see, so they must be reproduced exactly; only the
//! weights below may ever be revisited, and doing so changes the product.

use crate::analysis::sampler::PixelStats;
use beautycam_models::{metrics::FEATURE_SCORE_CAP, FeatureMetrics};

/// Weight applied to spot-density percentages (spots, acne).
const SPOT_DENSITY_WEIGHT: f64 = 0.3;

/// Weight applied to averaged texture variation (wrinkles).
const TEXTURE_WEIGHT: f64 = 0.6;

/// Weight applied to under-eye darkness (dark circles).
const DARKNESS_WEIGHT: f64 = 0.3;

/// Statistics for every sampled region of one frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegionSamples {
    pub forehead: PixelStats,
    pub cheeks: PixelStats,
    pub under_eyes: PixelStats,
    pub nose: PixelStats,
    pub all_face: PixelStats,
}

/// Percentage of spot pixels in a region, with a guarded denominator.
fn spot_density(stats: &PixelStats) -> f64 {
    stats.spot_count as f64 / stats.pixel_count.max(1) as f64 * 100.0
}

/// Combine region statistics into the externally visible feature scores.
///
/// Every non-health score is clamped to `[0, 30]`. The pre-stabilization
/// overall health is derived from the four feature scores; the stabilizer
/// replaces it with the randomized verdict at freeze time.
pub fn score(samples: &RegionSamples) -> FeatureMetrics {
    let spots = (spot_density(&samples.all_face) * SPOT_DENSITY_WEIGHT).min(FEATURE_SCORE_CAP);

    let wrinkles = ((samples.forehead.texture_variation + samples.under_eyes.texture_variation)
        / 2.0
        * TEXTURE_WEIGHT)
        .min(FEATURE_SCORE_CAP);

    let acne = (spot_density(&samples.cheeks) * SPOT_DENSITY_WEIGHT).min(FEATURE_SCORE_CAP);

    let dark_circles = ((100.0 - samples.under_eyes.average_brightness / 255.0 * 100.0)
        * DARKNESS_WEIGHT)
        .min(FEATURE_SCORE_CAP);

    let overall_health = 100.0 - (spots + wrinkles + acne + dark_circles) / 4.0;

    FeatureMetrics {
        spots,
        wrinkles,
        acne,
        dark_circles,
        overall_health,
    }
}
