//! Region catalog: facial regions as closed polygons over landmark indices.
//!
//! Index lists target the 468-point face mesh delivered by the detector.
//! They are product constants: changing them changes pixel counts and
//! therefore every downstream density score.

use crate::error::{EngineError, EngineResult};
use beautycam_models::LandmarkSet;
use serde::{Deserialize, Serialize};

/// Forehead band: crown arc down across both brow tops.
const FOREHEAD: &[usize] = &[
    10, 338, 297, 332, 284, 298, 333, 299, 337, 151, 108, 69, 104, 68, 54, 103, 67, 109,
];

/// Both cheeks, traced as left then right lobe.
const CHEEKS: &[usize] = &[
    50, 117, 118, 119, 120, 47, 126, 209, 129, 203, 205, 425, 423, 358, 429, 355, 277, 349, 348,
    347, 346, 280,
];

/// Infraorbital areas under both eyes.
const UNDER_EYES: &[usize] = &[
    226, 31, 228, 230, 232, 233, 245, 244, 243, 133, 362, 463, 464, 465, 453, 451, 449, 448, 261,
    446,
];

/// Nose bridge and nostril outline.
const NOSE: &[usize] = &[
    168, 6, 197, 195, 5, 4, 45, 220, 115, 48, 64, 98, 97, 2, 326, 327, 294, 278, 344, 440, 275,
];

/// A named facial sub-area sampled by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaceRegion {
    Forehead,
    Cheeks,
    UnderEyes,
    Nose,
    /// Union of the four base regions. Defined as the concatenation of
    /// their index lists; duplicate indices are kept on purpose so the
    /// sampled geometry matches the scored geometry exactly.
    AllFace,
}

impl FaceRegion {
    /// The four directly defined regions, in catalog order.
    pub const BASE: [FaceRegion; 4] = [
        FaceRegion::Forehead,
        FaceRegion::Cheeks,
        FaceRegion::UnderEyes,
        FaceRegion::Nose,
    ];

    /// Landmark indices describing this region's closed polygon.
    pub fn landmark_indices(&self) -> Vec<usize> {
        match self {
            FaceRegion::Forehead => FOREHEAD.to_vec(),
            FaceRegion::Cheeks => CHEEKS.to_vec(),
            FaceRegion::UnderEyes => UNDER_EYES.to_vec(),
            FaceRegion::Nose => NOSE.to_vec(),
            FaceRegion::AllFace => [FOREHEAD, CHEEKS, UNDER_EYES, NOSE].concat(),
        }
    }

    /// Resolve this region against a landmark set into pixel-space points.
    ///
    /// Fails with `LandmarkOutOfRange` when the set is shorter than the
    /// catalog expects; the caller treats that as a per-frame defect.
    pub fn polygon(
        &self,
        landmarks: &LandmarkSet,
        width: u32,
        height: u32,
    ) -> EngineResult<Vec<(f64, f64)>> {
        let indices = self.landmark_indices();
        if indices.len() < 3 {
            return Err(EngineError::degenerate_region(self.to_string(), indices.len()));
        }
        indices
            .iter()
            .map(|&index| {
                landmarks
                    .get(index)
                    .map(|p| p.to_pixel(width, height))
                    .ok_or(EngineError::LandmarkOutOfRange {
                        index,
                        len: landmarks.len(),
                    })
            })
            .collect()
    }
}

impl std::fmt::Display for FaceRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FaceRegion::Forehead => write!(f, "forehead"),
            FaceRegion::Cheeks => write!(f, "cheeks"),
            FaceRegion::UnderEyes => write!(f, "under_eyes"),
            FaceRegion::Nose => write!(f, "nose"),
            FaceRegion::AllFace => write!(f, "all_face"),
        }
    }
}
