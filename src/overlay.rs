//! Draw-command geometry for the overlays around the guide.

use crate::geometry::clamp;
use crate::landmarks::{self, Landmark};
use crate::ratio::{AspectRatio, project_mask};
use crate::types::{Point, Segment, Size};

/// Joints drawn only above this visibility.
pub const SKELETON_MIN_VISIBILITY: f32 = 0.5;

pub const SKELETON_CONNECTIONS: [(usize, usize); 12] = [
    (landmarks::LEFT_SHOULDER, landmarks::RIGHT_SHOULDER),
    (landmarks::LEFT_SHOULDER, landmarks::LEFT_ELBOW),
    (landmarks::LEFT_ELBOW, landmarks::LEFT_WRIST),
    (landmarks::RIGHT_SHOULDER, landmarks::RIGHT_ELBOW),
    (landmarks::RIGHT_ELBOW, landmarks::RIGHT_WRIST),
    (landmarks::LEFT_SHOULDER, landmarks::LEFT_HIP),
    (landmarks::RIGHT_SHOULDER, landmarks::RIGHT_HIP),
    (landmarks::LEFT_HIP, landmarks::RIGHT_HIP),
    (landmarks::LEFT_HIP, landmarks::LEFT_KNEE),
    (landmarks::LEFT_KNEE, landmarks::LEFT_ANKLE),
    (landmarks::RIGHT_HIP, landmarks::RIGHT_KNEE),
    (landmarks::RIGHT_KNEE, landmarks::RIGHT_ANKLE),
];

pub const SKELETON_KEYPOINTS: [usize; 12] = [
    landmarks::LEFT_SHOULDER,
    landmarks::RIGHT_SHOULDER,
    landmarks::LEFT_ELBOW,
    landmarks::RIGHT_ELBOW,
    landmarks::LEFT_WRIST,
    landmarks::RIGHT_WRIST,
    landmarks::LEFT_HIP,
    landmarks::RIGHT_HIP,
    landmarks::LEFT_KNEE,
    landmarks::RIGHT_KNEE,
    landmarks::LEFT_ANKLE,
    landmarks::RIGHT_ANKLE,
];

/// Rule-of-thirds lines inside the framed area: two vertical, then two
/// horizontal. Uses the same projection as the ratio mask so the grid lines
/// up with what gets captured.
pub fn grid_lines(viewport: Size, ratio: AspectRatio) -> [Segment; 4] {
    let inner = project_mask(viewport, ratio).inner_rect(viewport);
    let (w, h) = (inner.width(), inner.height());
    let x1 = inner.left + w / 3.0;
    let x2 = inner.left + w * 2.0 / 3.0;
    let y1 = inner.top + h / 3.0;
    let y2 = inner.top + h * 2.0 / 3.0;
    [
        Segment::new(Point::new(x1, inner.top), Point::new(x1, inner.bottom)),
        Segment::new(Point::new(x2, inner.top), Point::new(x2, inner.bottom)),
        Segment::new(Point::new(inner.left, y1), Point::new(inner.right, y1)),
        Segment::new(Point::new(inner.left, y2), Point::new(inner.right, y2)),
    ]
}

fn to_pixels(lm: &Landmark, frame: Size) -> Point {
    Point::new(lm.x * frame.width, lm.y * frame.height)
}

/// Bone segments in `frame` pixels whose two ends are both visible.
pub fn skeleton_segments(landmarks: &[Landmark], frame: Size) -> Vec<Segment> {
    SKELETON_CONNECTIONS
        .iter()
        .filter_map(|&(a, b)| {
            let (p, q) = (landmarks.get(a)?, landmarks.get(b)?);
            (p.is_visible(SKELETON_MIN_VISIBILITY) && q.is_visible(SKELETON_MIN_VISIBILITY))
                .then(|| Segment::new(to_pixels(p, frame), to_pixels(q, frame)))
        })
        .collect()
}

/// Visible joints in `frame` pixels.
pub fn skeleton_keypoints(landmarks: &[Landmark], frame: Size) -> Vec<Point> {
    SKELETON_KEYPOINTS
        .iter()
        .filter_map(|&i| landmarks.get(i))
        .filter(|lm| lm.is_visible(SKELETON_MIN_VISIBILITY))
        .map(|lm| to_pixels(lm, frame))
        .collect()
}

/// Spirit-level reading from device orientation angles in degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LevelReading {
    /// Bubble center along the level bar, in percent.
    pub bubble_position: f32,
    pub is_level: bool,
}

impl LevelReading {
    const MAX_ROLL: f32 = 45.0;
    const TRAVEL: f32 = 40.0;

    /// `beta` is front-back tilt (90 when upright), `gamma` left-right roll.
    pub fn from_orientation(beta: f32, gamma: f32) -> Self {
        let roll = clamp(gamma, -Self::MAX_ROLL, Self::MAX_ROLL);
        Self {
            bubble_position: 50.0 + roll / Self::MAX_ROLL * Self::TRAVEL,
            is_level: gamma.abs() < 3.0 && (beta - 90.0).abs() < 10.0,
        }
    }
}
