//! Scoring how well a detected person sits inside the guide.
//!
//! The person's box is built from the nose, shoulders, hips and ankles and
//! compared with the guide's box in normalized frame coordinates. Overlap is
//! measured against the person's box: the question is how much of the
//! person is inside the guide, not how much of the guide is filled.

use serde::{Deserialize, Serialize};

use crate::geometry::{bounding_box, overlap_ratio};
use crate::guide::GuideModel;
use crate::landmarks::{self, Landmark};
use crate::types::Size;

pub const MIN_LANDMARK_VISIBILITY: f32 = 0.3;
pub const MIN_SHOULDER_VISIBILITY: f32 = 0.5;
pub const PERFECT_OVERLAP: f32 = 0.6;
pub const PARTIAL_OVERLAP: f32 = 0.3;
pub const MAX_HORIZONTAL_OFFSET: f32 = 0.08;
pub const MAX_VERTICAL_OFFSET: f32 = 0.1;
pub const MAX_SHOULDER_TILT: f32 = 0.03;

/// Alignment thresholds, all in normalized frame units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignmentConfig {
    pub min_landmark_visibility: f32,
    pub min_shoulder_visibility: f32,
    pub perfect_overlap: f32,
    pub partial_overlap: f32,
    pub max_horizontal_offset: f32,
    pub max_vertical_offset: f32,
    pub max_shoulder_tilt: f32,
}

impl Default for AlignmentConfig {
    fn default() -> Self {
        Self {
            min_landmark_visibility: MIN_LANDMARK_VISIBILITY,
            min_shoulder_visibility: MIN_SHOULDER_VISIBILITY,
            perfect_overlap: PERFECT_OVERLAP,
            partial_overlap: PARTIAL_OVERLAP,
            max_horizontal_offset: MAX_HORIZONTAL_OFFSET,
            max_vertical_offset: MAX_VERTICAL_OFFSET,
            max_shoulder_tilt: MAX_SHOULDER_TILT,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Horizontal {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Vertical {
    Up,
    Down,
}

/// Directions name where the person has to move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Classification {
    NoPerson,
    Perfect,
    PartialLevel,
    PartialHorizontal(Horizontal),
    PartialVertical(Vertical),
    PartialFineTune,
    DetectedOffGuide,
}

/// Highlight applied to the guide outline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameState {
    None,
    Perfect,
    Partial,
    Detected,
}

impl Classification {
    pub fn frame_state(&self) -> FrameState {
        match self {
            Classification::NoPerson => FrameState::None,
            Classification::Perfect => FrameState::Perfect,
            Classification::PartialLevel
            | Classification::PartialHorizontal(_)
            | Classification::PartialVertical(_)
            | Classification::PartialFineTune => FrameState::Partial,
            Classification::DetectedOffGuide => FrameState::Detected,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hint {
    PlacePerson,
    TakeShot,
    LevelCamera,
    Move(Horizontal),
    MoveVertical(Vertical),
    FineTune,
    StepIntoGuide,
    MoveTowardGuide,
}

impl std::fmt::Display for Hint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Hint::PlacePerson => "Place a person in the frame",
            Hint::TakeShot => "Perfect! Take the shot now!",
            Hint::LevelCamera => "Level the camera",
            Hint::Move(Horizontal::Right) => "Move a little to the right",
            Hint::Move(Horizontal::Left) => "Move a little to the left",
            Hint::MoveVertical(Vertical::Down) => "Move down",
            Hint::MoveVertical(Vertical::Up) => "Move up",
            Hint::FineTune => "Fine-tune the framing a little",
            Hint::StepIntoGuide => "Step into the guide",
            Hint::MoveTowardGuide => "Move toward the guide",
        };
        write!(f, "{}", s)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AlignmentResult {
    pub classification: Classification,
    /// `None` means feedback is hidden.
    pub hint: Option<Hint>,
}

impl AlignmentResult {
    /// Nothing to report: no guide, or the guide is being edited.
    pub const NEUTRAL: AlignmentResult = AlignmentResult {
        classification: Classification::NoPerson,
        hint: None,
    };

    const NO_PERSON: AlignmentResult = AlignmentResult {
        classification: Classification::NoPerson,
        hint: Some(Hint::PlacePerson),
    };

    fn new(classification: Classification, hint: Hint) -> Self {
        Self {
            classification,
            hint: Some(hint),
        }
    }

    /// Only a perfect alignment marks the shot as ready.
    pub fn is_ready(&self) -> bool {
        self.classification == Classification::Perfect
    }

    pub fn hint_text(&self) -> Option<String> {
        self.hint.map(|h| h.to_string())
    }
}

/// Classify one estimator frame against the guide.
pub fn evaluate(
    landmarks: &[Landmark],
    guide: &GuideModel,
    viewport: Size,
    edit_mode: bool,
    config: &AlignmentConfig,
) -> AlignmentResult {
    if edit_mode || !guide.guide_type().is_visible() {
        return AlignmentResult::NEUTRAL;
    }

    let (Some(left_shoulder), Some(right_shoulder)) = (
        landmarks.get(landmarks::LEFT_SHOULDER),
        landmarks.get(landmarks::RIGHT_SHOULDER),
    ) else {
        return AlignmentResult::NO_PERSON;
    };
    if left_shoulder.visibility < config.min_shoulder_visibility
        || right_shoulder.visibility < config.min_shoulder_visibility
    {
        return AlignmentResult::NO_PERSON;
    }

    let outline = landmarks::BODY_OUTLINE
        .iter()
        .filter_map(|&i| landmarks.get(i));
    let Some(person) = bounding_box(outline, config.min_landmark_visibility) else {
        return AlignmentResult::NO_PERSON;
    };

    let Some(guide_box) = guide.normalized_bounds(viewport) else {
        return AlignmentResult::NEUTRAL;
    };

    let overlap = overlap_ratio(&person, &guide_box);
    let person_center = person.center();
    let guide_center = guide_box.center();
    let horizontal = (person_center.x - guide_center.x).abs();
    let vertical = (person_center.y - guide_center.y).abs();
    let is_level = (left_shoulder.y - right_shoulder.y).abs() < config.max_shoulder_tilt;

    log::trace!(
        "overlap={overlap:.3} dx={horizontal:.3} dy={vertical:.3} level={is_level}"
    );

    if overlap > config.perfect_overlap
        && horizontal < config.max_horizontal_offset
        && vertical < config.max_vertical_offset
        && is_level
    {
        return AlignmentResult::new(Classification::Perfect, Hint::TakeShot);
    }

    if overlap > config.partial_overlap {
        if !is_level {
            return AlignmentResult::new(Classification::PartialLevel, Hint::LevelCamera);
        }
        if horizontal > config.max_horizontal_offset {
            let direction = if person_center.x < guide_center.x {
                Horizontal::Right
            } else {
                Horizontal::Left
            };
            return AlignmentResult::new(
                Classification::PartialHorizontal(direction),
                Hint::Move(direction),
            );
        }
        if vertical > config.max_vertical_offset {
            let direction = if person_center.y < guide_center.y {
                Vertical::Down
            } else {
                Vertical::Up
            };
            return AlignmentResult::new(
                Classification::PartialVertical(direction),
                Hint::MoveVertical(direction),
            );
        }
        return AlignmentResult::new(Classification::PartialFineTune, Hint::FineTune);
    }

    if overlap > 0.0 {
        AlignmentResult::new(Classification::DetectedOffGuide, Hint::StepIntoGuide)
    } else {
        AlignmentResult::new(Classification::DetectedOffGuide, Hint::MoveTowardGuide)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guide::{GuidePlacement, GuideType};

    fn body(cx: f32, top: f32, bottom: f32, tilt: f32) -> Vec<Landmark> {
        let mut lms = vec![Landmark::default(); 33];
        let shoulder_y = top + (bottom - top) * 0.2;
        lms[landmarks::NOSE] = Landmark::new(cx, top, 0.9);
        lms[landmarks::LEFT_SHOULDER] = Landmark::new(cx - 0.08, shoulder_y, 0.9);
        lms[landmarks::RIGHT_SHOULDER] = Landmark::new(cx + 0.08, shoulder_y + tilt, 0.9);
        lms[landmarks::LEFT_HIP] = Landmark::new(cx - 0.05, (top + bottom) / 2.0, 0.9);
        lms[landmarks::RIGHT_HIP] = Landmark::new(cx + 0.05, (top + bottom) / 2.0, 0.9);
        lms[landmarks::LEFT_ANKLE] = Landmark::new(cx - 0.04, bottom, 0.9);
        lms[landmarks::RIGHT_ANKLE] = Landmark::new(cx + 0.04, bottom, 0.9);
        lms
    }

    /// Centered portrait guide. At scale 2.0 it covers x 0.15..0.85 and
    /// y 0.2..0.8; at 1.0, x 0.325..0.675 and y 0.35..0.65.
    fn portrait(scale: f32) -> (GuideModel, Size) {
        let mut model = GuideModel::default();
        model.select_type(GuideType::Portrait);
        model.set_placement(GuidePlacement::new(50.0, 50.0, scale));
        (model, Size::new(400.0, 933.333_3))
    }

    fn run_at(lms: &[Landmark], scale: f32) -> AlignmentResult {
        let (model, viewport) = portrait(scale);
        evaluate(lms, &model, viewport, false, &AlignmentConfig::default())
    }

    fn run(lms: &[Landmark]) -> AlignmentResult {
        run_at(lms, 2.0)
    }

    #[test]
    fn centered_person_is_perfect() {
        let result = run(&body(0.5, 0.3, 0.7, 0.0));
        assert_eq!(result.classification, Classification::Perfect);
        assert!(result.is_ready());
        assert_eq!(result.hint, Some(Hint::TakeShot));
    }

    #[test]
    fn tilted_shoulders_ask_for_level() {
        let result = run(&body(0.5, 0.3, 0.7, 0.05));
        assert_eq!(result.classification, Classification::PartialLevel);
        assert!(!result.is_ready());
    }

    #[test]
    fn offset_person_gets_a_direction() {
        let result = run(&body(0.38, 0.3, 0.7, 0.0));
        assert_eq!(
            result.classification,
            Classification::PartialHorizontal(Horizontal::Right)
        );
        assert_eq!(result.hint_text().as_deref(), Some("Move a little to the right"));

        let result = run(&body(0.62, 0.3, 0.7, 0.0));
        assert_eq!(
            result.classification,
            Classification::PartialHorizontal(Horizontal::Left)
        );
    }

    #[test]
    fn high_person_moves_down() {
        let result = run(&body(0.5, 0.18, 0.6, 0.0));
        assert_eq!(
            result.classification,
            Classification::PartialVertical(Vertical::Down)
        );
    }

    #[test]
    fn small_offsets_need_fine_tuning() {
        // Centered, but taller than the guide.
        let result = run_at(&body(0.5, 0.1, 0.9, 0.0), 1.0);
        assert_eq!(result.classification, Classification::PartialFineTune);
    }

    #[test]
    fn off_guide_person() {
        let result = run(&body(0.1, 0.02, 0.25, 0.0));
        assert_eq!(result.classification, Classification::DetectedOffGuide);
        assert_eq!(result.hint, Some(Hint::StepIntoGuide));

        let result = run(&body(0.1, 0.02, 0.15, 0.0));
        assert_eq!(result.hint, Some(Hint::MoveTowardGuide));
    }

    #[test]
    fn hidden_shoulder_means_no_person() {
        let mut lms = body(0.5, 0.3, 0.7, 0.0);
        lms[landmarks::RIGHT_SHOULDER].visibility = 0.4;
        let result = run(&lms);
        assert_eq!(result.classification, Classification::NoPerson);
        assert_eq!(result.hint, Some(Hint::PlacePerson));
    }

    #[test]
    fn too_few_points_means_no_person() {
        let mut lms = body(0.5, 0.3, 0.7, 0.0);
        for i in [
            landmarks::NOSE,
            landmarks::LEFT_HIP,
            landmarks::RIGHT_HIP,
            landmarks::LEFT_ANKLE,
            landmarks::RIGHT_ANKLE,
        ] {
            lms[i].visibility = 0.2;
        }
        assert_eq!(run(&lms).classification, Classification::NoPerson);
    }

    #[test]
    fn short_frame_means_no_person() {
        let lms = body(0.5, 0.3, 0.7, 0.0);
        assert_eq!(run(&lms[..12]).classification, Classification::NoPerson);
        assert_eq!(run(&[]).classification, Classification::NoPerson);
    }

    #[test]
    fn edit_mode_is_neutral() {
        let (model, viewport) = portrait(2.0);
        let lms = body(0.5, 0.3, 0.7, 0.0);
        let result = evaluate(&lms, &model, viewport, true, &AlignmentConfig::default());
        assert_eq!(result, AlignmentResult::NEUTRAL);
        assert!(result.hint_text().is_none());
    }

    #[test]
    fn frame_states() {
        assert_eq!(Classification::Perfect.frame_state(), FrameState::Perfect);
        assert_eq!(Classification::PartialLevel.frame_state(), FrameState::Partial);
        assert_eq!(
            Classification::DetectedOffGuide.frame_state(),
            FrameState::Detected
        );
        assert_eq!(Classification::NoPerson.frame_state(), FrameState::None);
    }

    #[test]
    fn config_overrides_take_defaults_for_missing_fields() {
        let config: AlignmentConfig = serde_json::from_str(r#"{"max_shoulder_tilt": 0.1}"#).unwrap();
        assert_eq!(config.max_shoulder_tilt, 0.1);
        assert_eq!(config.perfect_overlap, PERFECT_OVERLAP);
    }
}
