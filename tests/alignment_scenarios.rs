//! End-to-end alignment scenarios through the public session API.

use guide_frame::{
    AlignmentConfig, AlignmentResult, Classification, GuidePlacement, GuideType, Landmark,
    MemoryStore, SavedPlacements, Session, Size, landmarks, overlap_ratio,
};

/// A 350x1400 preview with the portrait guide at scale 1.5 gives a guide box
/// of x 0.2..0.8, y 0.35..0.65.
const VIEWPORT: Size = Size::new(350.0, 1400.0);

fn session() -> Session<MemoryStore> {
    let mut saved = SavedPlacements::default();
    saved.portrait = GuidePlacement::new(50.0, 50.0, 1.5);
    let mut session = Session::new(MemoryStore::new(saved), AlignmentConfig::default());
    session.select_guide(GuideType::Portrait);
    session
}

/// Person box x 0.42..0.58, y 0.2192..0.6808: center (0.5, 0.45) with 65% of
/// it inside the guide.
fn standing_person(right_shoulder_y: f32) -> Vec<Landmark> {
    let mut lms = vec![Landmark::new(0.0, 0.0, 0.05); 33];
    lms[landmarks::NOSE] = Landmark::new(0.5, 0.2192, 0.95);
    lms[landmarks::LEFT_SHOULDER] = Landmark::new(0.42, 0.30, 0.9);
    lms[landmarks::RIGHT_SHOULDER] = Landmark::new(0.58, right_shoulder_y, 0.9);
    lms[landmarks::LEFT_HIP] = Landmark::new(0.45, 0.5, 0.8);
    lms[landmarks::RIGHT_HIP] = Landmark::new(0.55, 0.5, 0.8);
    lms[landmarks::LEFT_ANKLE] = Landmark::new(0.46, 0.6808, 0.7);
    lms[landmarks::RIGHT_ANKLE] = Landmark::new(0.54, 0.6808, 0.7);
    lms
}

#[test]
fn scenario_geometry_matches_description() {
    let s = session();
    let guide = s.guide().normalized_bounds(VIEWPORT).unwrap();
    assert!((guide.center().x - 0.5).abs() < 1e-5);
    assert!((guide.center().y - 0.5).abs() < 1e-5);

    let lms = standing_person(0.30);
    let person = guide_frame::bounding_box(&lms, 0.3).unwrap();
    assert!((person.center().y - 0.45).abs() < 1e-4);
    assert!((overlap_ratio(&person, &guide) - 0.65).abs() < 1e-3);
}

#[test]
fn level_centered_person_is_perfect() {
    let result = session().evaluate(&standing_person(0.30), VIEWPORT);
    assert_eq!(result.classification, Classification::Perfect);
    assert!(result.is_ready());
}

#[test]
fn tilted_shoulders_need_correction_whatever_the_overlap() {
    let s = session();
    let result = s.evaluate(&standing_person(0.35), VIEWPORT);
    assert_eq!(result.classification, Classification::PartialLevel);
    assert_eq!(result.hint_text().as_deref(), Some("Level the camera"));
    assert!(!result.is_ready());
}

#[test]
fn empty_frame_is_no_person() {
    let result = session().evaluate(&[], VIEWPORT);
    assert_eq!(result.classification, Classification::NoPerson);
    assert!(result.hint.is_some());
}

#[test]
fn no_guide_is_neutral() {
    let mut s = session();
    s.select_guide(GuideType::None);
    let result = s.evaluate(&standing_person(0.30), VIEWPORT);
    assert_eq!(result, AlignmentResult::NEUTRAL);
}

#[test]
fn editing_suppresses_feedback() {
    let mut s = session();
    s.set_edit_mode(true);
    assert_eq!(
        s.evaluate(&standing_person(0.30), VIEWPORT),
        AlignmentResult::NEUTRAL
    );

    s.set_edit_mode(false);
    assert!(s.evaluate(&standing_person(0.30), VIEWPORT).is_ready());
}

#[test]
fn degenerate_viewport_does_not_score() {
    let result = session().evaluate(&standing_person(0.30), Size::new(0.0, 0.0));
    assert!(!result.is_ready());
}

#[test]
fn stricter_thresholds_change_the_verdict() {
    let config = AlignmentConfig {
        perfect_overlap: 0.7,
        ..AlignmentConfig::default()
    };
    let mut saved = SavedPlacements::default();
    saved.portrait = GuidePlacement::new(50.0, 50.0, 1.5);
    let mut s = Session::new(MemoryStore::new(saved), config);
    s.select_guide(GuideType::Portrait);

    let result = s.evaluate(&standing_person(0.30), VIEWPORT);
    assert_eq!(result.classification, Classification::PartialFineTune);
}
