//! Per-frame skin-feature analysis pipeline.
//!
//! One analyzer owns one tracked-face session and is driven synchronously,
//! once per delivered frame:
//!
//! ```text
//! Frame + Landmarks
//!     │
//!     ▼
//! ┌──────────────────┐
//! │ Region Catalog    │ ← landmark indices per facial region
//! └────────┬─────────┘
//!          ▼
//! ┌──────────────────┐
//! │ Pixel Sampler     │ ← per-region pixel statistics (throttled)
//! └────────┬─────────┘
//!          ▼
//! ┌──────────────────┐
//! │ Feature Scorer    │ ← bounded spot/wrinkle/acne/dark-circle scores
//! └────────┬─────────┘
//!          ▼
//! ┌──────────────────┐
//! │ Stabilizer        │ ← live window, then frozen verdict
//! └────────┬─────────┘
//!          ▼
//!   AnalysisOutput
//! ```
//!
//! Pixel sampling dominates the cycle cost, so recomputation is throttled
//! to the configured interval while the last output is re-emitted on every
//! intervening frame. Face loss resets the session immediately, throttle
//! included.

pub mod config;
pub mod regions;
pub mod sampler;
pub mod scorer;
pub mod stabilizer;

pub use config::AnalysisConfig;
pub use regions::FaceRegion;
pub use sampler::{sample_region, PixelStats};
pub use scorer::{score, RegionSamples};
pub use stabilizer::Stabilizer;


use beautycam_models::{AnalysisOutput, LandmarkSet, StabilizationPhase};
use rand::rngs::StdRng;
use rand::Rng;
use tracing::{debug, info, warn};

use crate::error::EngineResult;
use crate::frame::FrameBuffer;

/// Counters for one analyzer's lifetime, for logging and host diagnostics.
#[derive(Debug, Clone, Default)]
pub struct AnalyzerStats {
    /// Frames delivered to the analyzer
    pub frames_seen: u64,
    /// Frames that ran the full sample-and-score path
    pub frames_analyzed: u64,
    /// Face-bearing frames answered from the last computed output
    pub frames_throttled: u64,
    /// Frames skipped because of an input defect
    pub frames_skipped: u64,
    /// Sessions started (face acquired after a no-face gap)
    pub sessions_started: u64,
}

impl AnalyzerStats {
    /// Fraction of face-bearing frames answered without recomputation.
    pub fn throttle_ratio(&self) -> f64 {
        let considered = self.frames_analyzed + self.frames_throttled;
        if considered > 0 {
            self.frames_throttled as f64 / considered as f64
        } else {
            0.0
        }
    }
}

/// Per-session analysis pipeline.
///
/// Owns the stabilization state for one tracked face. Not shared between
/// sessions; a host tearing its context down calls [`FrameAnalyzer::reset`]
/// or drops the analyzer.
#[derive(Debug)]
pub struct FrameAnalyzer<R: Rng = StdRng> {
    config: AnalysisConfig,
    stabilizer: Stabilizer<R>,
    last_output: AnalysisOutput,
    last_computed_ms: Option<u64>,
    stats: AnalyzerStats,
}

impl FrameAnalyzer<StdRng> {
    /// Create an analyzer with an OS-seeded generator for the frozen verdict.
    pub fn new(config: AnalysisConfig) -> Self {
        let stabilizer = Stabilizer::new(&config);
        Self::with_stabilizer(config, stabilizer)
    }
}

impl<R: Rng> FrameAnalyzer<R> {
    /// Create an analyzer with a caller-supplied generator (tests).
    pub fn with_rng(config: AnalysisConfig, rng: R) -> Self {
        let stabilizer = Stabilizer::with_rng(&config, rng);
        Self::with_stabilizer(config, stabilizer)
    }

    fn with_stabilizer(config: AnalysisConfig, stabilizer: Stabilizer<R>) -> Self {
        Self {
            config,
            stabilizer,
            last_output: AnalysisOutput::no_face(),
            last_computed_ms: None,
            stats: AnalyzerStats::default(),
        }
    }

    /// Analyze one delivered frame.
    ///
    /// `landmarks` is the detector's result for this frame (`None` or an
    /// empty set means no tracked face). `timestamp_ms` is the host's
    /// frame clock; the engine keeps no clock of its own.
    ///
    /// Always returns an output suitable for rendering: fresh metrics on
    /// recompute frames, the previous output on throttled or defective
    /// frames, the frozen record after stabilization, and the baseline
    /// whenever no face is present. Input defects are logged and never
    /// escape this call.
    pub fn analyze(
        &mut self,
        frame: &FrameBuffer<'_>,
        landmarks: Option<&LandmarkSet>,
        timestamp_ms: u64,
    ) -> AnalysisOutput {
        self.stats.frames_seen += 1;

        let landmarks = match landmarks {
            Some(set) if !set.is_empty() => set,
            _ => {
                // Face loss is a state transition, not an error.
                self.stabilizer.reset();
                self.last_computed_ms = None;
                self.last_output = AnalysisOutput::no_face();
                return self.last_output;
            }
        };

        if self.stabilizer.phase() == StabilizationPhase::NoFace {
            self.stats.sessions_started += 1;
        }
        self.stabilizer.note_face(timestamp_ms);

        // Frozen sessions re-emit the verdict without touching pixels.
        if let Some(frozen) = self.stabilizer.frozen_metrics() {
            self.last_output = AnalysisOutput {
                metrics: frozen,
                face_detected: true,
                phase: StabilizationPhase::Frozen,
            };
            return self.last_output;
        }

        // Recompute throttle: redraw every frame, sample periodically.
        if let Some(last) = self.last_computed_ms {
            if timestamp_ms.saturating_sub(last) < self.config.recompute_interval_ms {
                self.stats.frames_throttled += 1;
                return self.last_output;
            }
        }

        match self.sample_regions(frame, landmarks) {
            Ok(samples) => {
                self.stats.frames_analyzed += 1;
                self.last_computed_ms = Some(timestamp_ms);
                let metrics = self.stabilizer.apply(timestamp_ms, scorer::score(&samples));
                self.last_output = AnalysisOutput {
                    metrics,
                    face_detected: true,
                    phase: self.stabilizer.phase(),
                };
                self.last_output
            }
            Err(error) => {
                // Defects are fatal to this frame only: keep the last good
                // metrics and leave the session running.
                warn!(%error, timestamp_ms, "frame analysis skipped");
                self.stats.frames_skipped += 1;
                self.last_output = AnalysisOutput {
                    metrics: self.last_output.metrics,
                    face_detected: true,
                    phase: self.stabilizer.phase(),
                };
                self.last_output
            }
        }
    }

    /// Tear the session down (host context destroyed, camera stopped).
    ///
    /// Synchronous: state and scratch are gone when this returns.
    pub fn reset(&mut self) {
        self.stabilizer.reset();
        self.last_computed_ms = None;
        self.last_output = AnalysisOutput::no_face();
    }

    /// Output emitted for the most recent frame.
    pub fn last_output(&self) -> AnalysisOutput {
        self.last_output
    }

    /// Lifetime counters.
    pub fn stats(&self) -> &AnalyzerStats {
        &self.stats
    }

    /// Active configuration.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Log a one-line summary of this analyzer's activity.
    pub fn log_summary(&self) {
        info!(
            frames_seen = self.stats.frames_seen,
            frames_analyzed = self.stats.frames_analyzed,
            frames_throttled = self.stats.frames_throttled,
            frames_skipped = self.stats.frames_skipped,
            sessions = self.stats.sessions_started,
            throttle_ratio = format!("{:.1}%", self.stats.throttle_ratio() * 100.0),
            "analyzer summary"
        );
    }

    fn sample_regions(
        &self,
        frame: &FrameBuffer<'_>,
        landmarks: &LandmarkSet,
    ) -> EngineResult<RegionSamples> {
        let threshold = self.config.spot_brightness_threshold;
        let mut samples = RegionSamples::default();

        for region in FaceRegion::BASE.into_iter().chain([FaceRegion::AllFace]) {
            let polygon = region.polygon(landmarks, frame.width(), frame.height())?;
            let stats = sampler::sample_region(frame, &polygon, threshold);
            debug!(
                region = %region,
                pixels = stats.pixel_count,
                spots = stats.spot_count,
                brightness = stats.average_brightness,
                texture = stats.texture_variation,
                "region sampled"
            );
            match region {
                FaceRegion::Forehead => samples.forehead = stats,
                FaceRegion::Cheeks => samples.cheeks = stats,
                FaceRegion::UnderEyes => samples.under_eyes = stats,
                FaceRegion::Nose => samples.nose = stats,
                FaceRegion::AllFace => samples.all_face = stats,
            }
        }

        Ok(samples)
    }
}
