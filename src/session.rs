//! The app-wide framing state, owned in one place.
//!
//! A [`Session`] ties the guide, the active gesture, the aspect ratio and
//! edit mode together and is the only code that talks to the placement
//! store. Placements are written when a gesture ends, on reset, and when
//! edit mode is left mid-gesture; never during a gesture.

use crate::alignment::{AlignmentConfig, AlignmentResult, evaluate};
use crate::guide::{GuideModel, GuidePlacement, GuideType};
use crate::interaction::{GestureTarget, Interaction};
use crate::landmarks::Landmark;
use crate::overlay::grid_lines;
use crate::ratio::{AspectRatio, CropRect, Margins, project_crop, project_mask};
use crate::store::PlacementStore;
use crate::types::{Point, Rect, Segment, Size};

pub struct Session<S: PlacementStore> {
    guide: GuideModel,
    interaction: Interaction,
    ratio: AspectRatio,
    edit_mode: bool,
    config: AlignmentConfig,
    store: S,
}

impl<S: PlacementStore> Session<S> {
    /// Read saved placements once. A failing store starts from defaults.
    pub fn new(mut store: S, config: AlignmentConfig) -> Self {
        let saved = store.load().unwrap_or_else(|e| {
            log::warn!("Failed to load guide positions: {}, using defaults", e);
            Default::default()
        });
        Self {
            guide: GuideModel::new(saved),
            interaction: Interaction::Idle,
            ratio: AspectRatio::default(),
            edit_mode: false,
            config,
            store,
        }
    }

    pub fn guide(&self) -> &GuideModel {
        &self.guide
    }

    pub fn guide_type(&self) -> GuideType {
        self.guide.guide_type()
    }

    pub fn placement(&self) -> GuidePlacement {
        self.guide.placement()
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn ratio(&self) -> AspectRatio {
        self.ratio
    }

    pub fn edit_mode(&self) -> bool {
        self.edit_mode
    }

    pub fn config(&self) -> &AlignmentConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Switch guides. Any edit in progress is abandoned first.
    pub fn select_guide(&mut self, guide: GuideType) {
        self.interaction = Interaction::Idle;
        self.edit_mode = false;
        self.guide.select_type(guide);
        log::debug!("Guide set to {}", guide.key());
    }

    pub fn set_ratio(&mut self, ratio: AspectRatio) {
        self.ratio = ratio;
    }

    /// Enter or leave edit mode. Edit mode needs a visible guide; leaving it
    /// finishes any gesture still in flight.
    pub fn set_edit_mode(&mut self, enabled: bool) {
        let enabled = enabled && self.guide.guide_type().is_visible();
        if !enabled {
            self.gesture_end();
        }
        self.edit_mode = enabled;
    }

    pub fn toggle_edit_mode(&mut self) {
        self.set_edit_mode(!self.edit_mode);
    }

    /// Put the guide back at the center at its default size and save it.
    pub fn reset_guide(&mut self) {
        self.interaction = Interaction::Idle;
        self.guide.reset();
        self.persist();
    }

    pub fn gesture_start(&mut self, point: Point, target: GestureTarget) -> bool {
        if !self.edit_mode {
            return false;
        }
        let placement = self.guide.placement();
        self.interaction.start(point, target, &placement)
    }

    pub fn gesture_move(&mut self, point: Point, viewport: Size) -> bool {
        let mut placement = self.guide.placement();
        let changed = self.interaction.update(point, viewport, &mut placement);
        if changed {
            self.guide.set_placement(placement);
        }
        changed
    }

    /// Finish the gesture and save the placement if a drag or resize was
    /// active. Safe to call repeatedly.
    pub fn gesture_end(&mut self) {
        if self.interaction.end() {
            self.persist();
        }
    }

    /// Best effort: a failed write is logged and the session carries on.
    fn persist(&mut self) {
        if !self.guide.commit() {
            return;
        }
        if let Err(e) = self.store.save(self.guide.saved()) {
            log::warn!("Failed to save guide positions: {}", e);
        }
    }

    pub fn evaluate(&self, landmarks: &[Landmark], viewport: Size) -> AlignmentResult {
        evaluate(landmarks, &self.guide, viewport, self.edit_mode, &self.config)
    }

    pub fn guide_bounds(&self, viewport: Size) -> Option<Rect> {
        self.guide.pixel_bounds(viewport)
    }

    pub fn mask(&self, viewport: Size) -> Margins {
        project_mask(viewport, self.ratio)
    }

    pub fn grid(&self, viewport: Size) -> [Segment; 4] {
        grid_lines(viewport, self.ratio)
    }

    pub fn crop(&self, native_width: u32, native_height: u32) -> CropRect {
        project_crop(native_width, native_height, self.ratio)
    }
}
