//! Shared data models for the BeautyCam analysis engine.
//!
//! This crate provides Serde-serializable types for:
//! - Normalized facial landmarks delivered by the detector
//! - Skin feature metrics emitted once per analyzed frame
//! - The per-session stabilization phase exposed to the UI

pub mod landmarks;
pub mod metrics;

// Re-export common types
pub use landmarks::{LandmarkSet, NormalizedPoint, FACE_MESH_LANDMARKS};
pub use metrics::{AnalysisOutput, FeatureMetrics, StabilizationPhase};
