#![deny(unreachable_patterns)]
//! Per-frame skin-feature inference engine for BeautyCam.
//!
//! This crate turns a video frame plus a facial landmark set into bounded
//! skin-condition metrics:
//! - Region catalog mapping landmark indices to facial polygons
//! - Pixel sampler producing per-region statistics
//! - Feature scorer with fixed, product-defined formulas
//! - Stabilization controller freezing scores into a session verdict
//!
//! Camera capture, the landmark detector and overlay rendering live in the
//! host; the engine is synchronous and driven once per delivered frame.

pub mod analysis;
pub mod error;
pub mod frame;

pub use analysis::{
    AnalysisConfig, AnalyzerStats, FaceRegion, FrameAnalyzer, PixelStats, RegionSamples,
    Stabilizer,
};
pub use error::{EngineError, EngineResult};
pub use frame::{FrameBuffer, PixelFormat};

// Interface types shared with the host
pub use beautycam_models::{
    AnalysisOutput, FeatureMetrics, LandmarkSet, NormalizedPoint, StabilizationPhase,
};
