//! Facial landmark types delivered by the external detector.
//!
//! Landmarks arrive once per frame as an ordered sequence of points
//! normalized to the frame dimensions. Indices are stable identifiers
//! assigned by the detector; the engine addresses regions by index and
//! never retains a set beyond the frame it was delivered with.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Number of landmark slots a full face mesh provides.
///
/// The region catalog references indices up to 467, so any set shorter
/// than this cannot cover every region.
pub const FACE_MESH_LANDMARKS: usize = 468;

/// A single tracked facial keypoint, normalized to `[0, 1]` relative to
/// frame width and height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NormalizedPoint {
    /// Horizontal position (0.0 = left edge, 1.0 = right edge)
    pub x: f64,
    /// Vertical position (0.0 = top edge, 1.0 = bottom edge)
    pub y: f64,
    /// Optional depth coordinate from 3-D detectors; ignored by the engine
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
}

impl NormalizedPoint {
    /// Create a 2-D point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: None }
    }

    /// Scale into pixel space for a frame of the given dimensions.
    #[inline]
    pub fn to_pixel(&self, width: u32, height: u32) -> (f64, f64) {
        (self.x * width as f64, self.y * height as f64)
    }
}

/// Ordered, index-addressable set of landmarks for one tracked face.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct LandmarkSet {
    points: Vec<NormalizedPoint>,
}

impl LandmarkSet {
    /// Wrap a point sequence produced by the detector.
    pub fn new(points: Vec<NormalizedPoint>) -> Self {
        Self { points }
    }

    /// Build a set from raw `(x, y)` pairs.
    pub fn from_xy(pairs: &[(f64, f64)]) -> Self {
        Self {
            points: pairs
                .iter()
                .map(|&(x, y)| NormalizedPoint::new(x, y))
                .collect(),
        }
    }

    /// Landmark at `index`, or `None` when the detector delivered fewer points.
    pub fn get(&self, index: usize) -> Option<&NormalizedPoint> {
        self.points.get(index)
    }

    /// Number of landmark slots in this set.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when the detector delivered no points at all.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// True when every catalog region can be resolved against this set.
    pub fn has_full_mesh(&self) -> bool {
        self.points.len() >= FACE_MESH_LANDMARKS
    }

    /// All points in detector order.
    pub fn points(&self) -> &[NormalizedPoint] {
        &self.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_pixel_scales_by_frame_size() {
        let p = NormalizedPoint::new(0.5, 0.25);
        assert_eq!(p.to_pixel(640, 480), (320.0, 120.0));
    }

    #[test]
    fn test_get_out_of_range() {
        let set = LandmarkSet::from_xy(&[(0.1, 0.2), (0.3, 0.4)]);
        assert!(set.get(1).is_some());
        assert!(set.get(2).is_none());
    }

    #[test]
    fn test_full_mesh_threshold() {
        let set = LandmarkSet::new(vec![NormalizedPoint::new(0.5, 0.5); FACE_MESH_LANDMARKS]);
        assert!(set.has_full_mesh());
        let short = LandmarkSet::new(vec![NormalizedPoint::new(0.5, 0.5); 68]);
        assert!(!short.has_full_mesh());
    }

    #[test]
    fn test_landmark_set_exposes_a_schema() {
        let schema = schemars::schema_for!(LandmarkSet);
        let json = serde_json::to_value(&schema).unwrap();
        assert!(json["properties"]["points"].is_object());
    }

    #[test]
    fn test_z_is_optional_in_serde() {
        let json = r#"{"points":[{"x":0.1,"y":0.2},{"x":0.3,"y":0.4,"z":0.05}]}"#;
        let set: LandmarkSet = serde_json::from_str(json).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.get(0).unwrap().z, None);
        assert_eq!(set.get(1).unwrap().z, Some(0.05));
    }
}
