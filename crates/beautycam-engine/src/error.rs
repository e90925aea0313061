//! Error types for frame analysis.

use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur while analyzing a frame.
///
/// All of these are input defects: the pipeline recovers by skipping the
/// current frame's recomputation and retaining the last emitted metrics.
/// None of them is fatal to the session.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("landmark index {index} out of range for set of {len} points")]
    LandmarkOutOfRange { index: usize, len: usize },

    #[error("region {region} has {points} points, need at least 3 for a polygon")]
    DegenerateRegion { region: String, points: usize },

    #[error("pixel buffer holds {actual} bytes, expected {expected} for the frame dimensions")]
    BufferSizeMismatch { expected: usize, actual: usize },

    #[error("invalid frame dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}

impl EngineError {
    /// Create a degenerate-region error.
    pub fn degenerate_region(region: impl Into<String>, points: usize) -> Self {
        Self::DegenerateRegion {
            region: region.into(),
            points,
        }
    }

    /// Create a buffer size mismatch error.
    pub fn buffer_mismatch(expected: usize, actual: usize) -> Self {
        Self::BufferSizeMismatch { expected, actual }
    }
}
