//! Body landmarks as delivered by the external pose estimator.
//!
//! Landmarks arrive as an indexed array whose layout is fixed by the
//! estimator (33-point body topology). Only the indices below are read.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const NOSE: usize = 0;
pub const LEFT_SHOULDER: usize = 11;
pub const RIGHT_SHOULDER: usize = 12;
pub const LEFT_ELBOW: usize = 13;
pub const RIGHT_ELBOW: usize = 14;
pub const LEFT_WRIST: usize = 15;
pub const RIGHT_WRIST: usize = 16;
pub const LEFT_HIP: usize = 23;
pub const RIGHT_HIP: usize = 24;
pub const LEFT_KNEE: usize = 25;
pub const RIGHT_KNEE: usize = 26;
pub const LEFT_ANKLE: usize = 27;
pub const RIGHT_ANKLE: usize = 28;

/// Landmarks used to build the person's bounding box.
pub const BODY_OUTLINE: [usize; 7] = [
    NOSE,
    LEFT_SHOULDER,
    RIGHT_SHOULDER,
    LEFT_HIP,
    RIGHT_HIP,
    LEFT_ANKLE,
    RIGHT_ANKLE,
];

/// A single body keypoint in normalized `[0,1]` frame coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    /// Estimator confidence that the point is visible.
    #[serde(default)]
    pub visibility: f32,
}

impl Landmark {
    pub const fn new(x: f32, y: f32, visibility: f32) -> Self {
        Self { x, y, visibility }
    }

    pub fn is_visible(&self, threshold: f32) -> bool {
        self.visibility > threshold
    }
}

/// Flip a frame horizontally so it lines up with a mirrored preview.
pub fn mirrored(frame: &[Landmark]) -> Vec<Landmark> {
    frame
        .iter()
        .map(|lm| Landmark::new(1.0 - lm.x, lm.y, lm.visibility))
        .collect()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FrameDocument {
    Bare(Vec<Landmark>),
    Wrapped {
        #[serde(rename = "poseLandmarks", default)]
        pose_landmarks: Option<Vec<Landmark>>,
    },
}

/// Parse one estimator frame from JSON.
///
/// Accepts either a bare array of landmarks or an object carrying them under
/// `poseLandmarks`. An object without landmarks is a frame with no subject
/// and yields an empty vector.
pub fn parse_frame(json: &str) -> Result<Vec<Landmark>> {
    let doc: FrameDocument =
        serde_json::from_str(json).map_err(|e| Error::InvalidLandmarks(e.to_string()))?;
    Ok(match doc {
        FrameDocument::Bare(points) => points,
        FrameDocument::Wrapped { pose_landmarks } => pose_landmarks.unwrap_or_default(),
    })
}

/// Read and parse a landmark frame from disk.
pub fn load_frame(path: &std::path::Path) -> Result<Vec<Landmark>> {
    let content = std::fs::read_to_string(path)?;
    parse_frame(&content)
}
