//! The silhouette guide: which type is shown, where it sits and how big it
//! is.

use serde::{Deserialize, Serialize};

use crate::geometry::clamp;
use crate::types::{Point, Rect, Size};

/// Closest the guide center may come to a viewport edge, in percent.
pub const POSITION_MIN: f32 = 10.0;
pub const POSITION_MAX: f32 = 90.0;
pub const SCALE_MIN: f32 = 0.5;
pub const SCALE_MAX: f32 = 2.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuideType {
    #[default]
    None,
    Portrait,
    Couple,
    Group,
}

impl GuideType {
    pub const ALL: [GuideType; 4] = [
        GuideType::None,
        GuideType::Portrait,
        GuideType::Couple,
        GuideType::Group,
    ];

    /// Unscaled silhouette size in pixels. `None` has no silhouette.
    pub fn default_size(&self) -> Option<Size> {
        match self {
            GuideType::None => None,
            GuideType::Portrait => Some(Size::new(140.0, 280.0)),
            GuideType::Couple => Some(Size::new(220.0, 280.0)),
            GuideType::Group => Some(Size::new(300.0, 220.0)),
        }
    }

    /// `(top, bottom)` corner radii of the silhouette outline, in unscaled
    /// pixels.
    pub fn corner_radii(&self) -> (f32, f32) {
        match self {
            GuideType::None => (0.0, 0.0),
            GuideType::Portrait | GuideType::Couple => (70.0, 50.0),
            GuideType::Group => (20.0, 20.0),
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            GuideType::None => "none",
            GuideType::Portrait => "portrait",
            GuideType::Couple => "couple",
            GuideType::Group => "group",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.key() == key)
    }

    pub fn is_visible(&self) -> bool {
        *self != GuideType::None
    }
}

impl std::fmt::Display for GuideType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            GuideType::None => "None",
            GuideType::Portrait => "Portrait",
            GuideType::Couple => "Couple",
            GuideType::Group => "Group",
        };
        write!(f, "{}", s)
    }
}

/// Guide center in viewport percent plus a scale on the default size.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GuidePlacement {
    pub x: f32,
    pub y: f32,
    pub scale: f32,
}

impl Default for GuidePlacement {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl GuidePlacement {
    pub const DEFAULT: GuidePlacement = GuidePlacement {
        x: 50.0,
        y: 50.0,
        scale: 1.0,
    };

    /// Build a placement, clamping every field into range.
    pub fn new(x: f32, y: f32, scale: f32) -> Self {
        Self {
            x: clamp_position(x),
            y: clamp_position(y),
            scale: clamp_scale(scale),
        }
    }

    pub fn clamped(self) -> Self {
        Self::new(self.x, self.y, self.scale)
    }
}

pub fn clamp_position(v: f32) -> f32 {
    clamp(v, POSITION_MIN, POSITION_MAX)
}

pub fn clamp_scale(v: f32) -> f32 {
    clamp(v, SCALE_MIN, SCALE_MAX)
}

/// Last committed placement for each guide type that has one.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct SavedPlacements {
    pub portrait: GuidePlacement,
    pub couple: GuidePlacement,
    pub group: GuidePlacement,
}

impl SavedPlacements {
    /// Every record pulled back into range.
    pub fn clamped(self) -> Self {
        Self {
            portrait: self.portrait.clamped(),
            couple: self.couple.clamped(),
            group: self.group.clamped(),
        }
    }

    pub fn get(&self, guide: GuideType) -> Option<GuidePlacement> {
        match guide {
            GuideType::None => None,
            GuideType::Portrait => Some(self.portrait),
            GuideType::Couple => Some(self.couple),
            GuideType::Group => Some(self.group),
        }
    }

    /// Record `placement` for `guide`. Returns `false` for `GuideType::None`.
    pub fn set(&mut self, guide: GuideType, placement: GuidePlacement) -> bool {
        let slot = match guide {
            GuideType::None => return false,
            GuideType::Portrait => &mut self.portrait,
            GuideType::Couple => &mut self.couple,
            GuideType::Group => &mut self.group,
        };
        *slot = placement.clamped();
        true
    }
}

#[derive(Clone, Debug, Default)]
pub struct GuideModel {
    guide_type: GuideType,
    placement: GuidePlacement,
    saved: SavedPlacements,
}

impl GuideModel {
    /// Stores are not trusted to hand back in-range records.
    pub fn new(saved: SavedPlacements) -> Self {
        Self {
            saved: saved.clamped(),
            ..Default::default()
        }
    }

    pub fn guide_type(&self) -> GuideType {
        self.guide_type
    }

    pub fn placement(&self) -> GuidePlacement {
        self.placement
    }

    pub fn saved(&self) -> &SavedPlacements {
        &self.saved
    }

    /// Switch to `guide` and load its saved placement.
    pub fn select_type(&mut self, guide: GuideType) {
        self.guide_type = guide;
        self.placement = self
            .saved
            .get(guide)
            .map(GuidePlacement::clamped)
            .unwrap_or_default();
    }

    /// Replace the live placement. Values are clamped; nothing is saved.
    pub fn set_placement(&mut self, placement: GuidePlacement) {
        self.placement = placement.clamped();
    }

    pub fn reset(&mut self) {
        self.placement = GuidePlacement::DEFAULT;
    }

    /// Copy the live placement into the saved map for the active type.
    /// Returns `false` only when no guide is selected; an unchanged
    /// placement still counts as committed.
    pub fn commit(&mut self) -> bool {
        self.saved.set(self.guide_type, self.placement)
    }

    /// Guide rectangle in viewport pixels.
    ///
    /// `None` when no guide is shown or the viewport has no area.
    pub fn pixel_bounds(&self, viewport: Size) -> Option<Rect> {
        let size = self.guide_type.default_size()?;
        if viewport.is_degenerate() {
            return None;
        }
        let center = Point::new(
            self.placement.x / 100.0 * viewport.width,
            self.placement.y / 100.0 * viewport.height,
        );
        Some(Rect::from_center_size(
            center,
            size.width * self.placement.scale,
            size.height * self.placement.scale,
        ))
    }

    /// [`Self::pixel_bounds`] in the `[0,1]` space landmarks use.
    pub fn normalized_bounds(&self, viewport: Size) -> Option<Rect> {
        self.pixel_bounds(viewport).map(|r| r.scale_down(viewport))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placement_is_clamped_on_construction() {
        let p = GuidePlacement::new(-20.0, 150.0, 9.0);
        assert_eq!(p, GuidePlacement::new(10.0, 90.0, 2.0));
        assert_eq!(GuidePlacement::new(50.0, 50.0, 0.1).scale, 0.5);
    }

    #[test]
    fn pixel_bounds_follow_placement() {
        let mut model = GuideModel::default();
        model.select_type(GuideType::Portrait);
        model.set_placement(GuidePlacement::new(25.0, 50.0, 2.0));

        let rect = model.pixel_bounds(Size::new(800.0, 600.0)).unwrap();
        assert_eq!(rect.center(), Point::new(200.0, 300.0));
        assert_eq!(rect.width(), 280.0);
        assert_eq!(rect.height(), 560.0);
    }

    #[test]
    fn no_bounds_without_guide_or_viewport() {
        let mut model = GuideModel::default();
        assert!(model.pixel_bounds(Size::new(800.0, 600.0)).is_none());

        model.select_type(GuideType::Group);
        assert!(model.pixel_bounds(Size::new(0.0, 600.0)).is_none());
        assert!(model.pixel_bounds(Size::new(800.0, 600.0)).is_some());
    }

    #[test]
    fn selecting_a_type_loads_its_saved_placement() {
        let mut saved = SavedPlacements::default();
        saved.set(GuideType::Couple, GuidePlacement::new(30.0, 70.0, 1.5));
        let mut model = GuideModel::new(saved);

        model.select_type(GuideType::Couple);
        assert_eq!(model.placement(), GuidePlacement::new(30.0, 70.0, 1.5));

        model.select_type(GuideType::Portrait);
        assert_eq!(model.placement(), GuidePlacement::DEFAULT);
    }

    #[test]
    fn out_of_range_saved_records_are_clamped() {
        let saved = SavedPlacements {
            portrait: GuidePlacement {
                x: 500.0,
                y: -40.0,
                scale: 9.0,
            },
            ..Default::default()
        };
        let mut model = GuideModel::new(saved);
        assert_eq!(
            model.saved().portrait,
            GuidePlacement::new(90.0, 10.0, 2.0)
        );

        model.select_type(GuideType::Portrait);
        assert_eq!(model.placement(), GuidePlacement::new(90.0, 10.0, 2.0));
    }

    #[test]
    fn commit_ignores_none() {
        let mut model = GuideModel::default();
        assert!(!model.commit());

        model.select_type(GuideType::Group);
        model.set_placement(GuidePlacement::new(20.0, 20.0, 0.75));
        assert!(model.commit());
        assert_eq!(
            model.saved().get(GuideType::Group),
            Some(GuidePlacement::new(20.0, 20.0, 0.75))
        );
        // Nothing moved, but the release still counts as a commit.
        assert!(model.commit());
    }
}
