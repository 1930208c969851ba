//! Pointer gestures that move and resize the guide.
//!
//! Every move is computed against the placement captured when the gesture
//! started, never against the previous move, so a long stream of small
//! moves cannot drift.

use crate::guide::{GuidePlacement, clamp_position, clamp_scale};
use crate::types::{Point, Rect, Size};

/// Pixels of horizontal pointer travel per 1.0 of scale.
pub const RESIZE_SENSITIVITY_PX: f32 = 100.0;

/// Pointer distance from the resize corner that still grabs it.
pub const HANDLE_TOLERANCE_PX: f32 = 12.0;

/// What a pointer-down landed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureTarget {
    Guide,
    ResizeHandle,
    EditToggle,
    Outside,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSession {
    pub anchor: Point,
    pub start_x: f32,
    pub start_y: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResizeSession {
    pub anchor: Point,
    pub start_scale: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum Interaction {
    #[default]
    Idle,
    Dragging(DragSession),
    Resizing(ResizeSession),
}

impl Interaction {
    pub fn is_idle(&self) -> bool {
        matches!(self, Interaction::Idle)
    }

    /// Begin a gesture at `point`. Returns whether one started.
    ///
    /// Ignored while another gesture is active and for targets that are not
    /// part of the guide.
    pub fn start(&mut self, point: Point, target: GestureTarget, placement: &GuidePlacement) -> bool {
        if !self.is_idle() {
            return false;
        }
        *self = match target {
            GestureTarget::ResizeHandle => Interaction::Resizing(ResizeSession {
                anchor: point,
                start_scale: placement.scale,
            }),
            GestureTarget::Guide => Interaction::Dragging(DragSession {
                anchor: point,
                start_x: placement.x,
                start_y: placement.y,
            }),
            GestureTarget::EditToggle | GestureTarget::Outside => return false,
        };
        log::debug!("Gesture started: {:?}", self);
        true
    }

    /// Apply the pointer at `point` to `placement`. Returns whether the
    /// placement changed.
    pub fn update(&self, point: Point, viewport: Size, placement: &mut GuidePlacement) -> bool {
        let before = *placement;
        match self {
            Interaction::Idle => return false,
            Interaction::Dragging(drag) => {
                if viewport.is_degenerate() {
                    return false;
                }
                let delta = point - drag.anchor;
                placement.x = clamp_position(drag.start_x + delta.x / viewport.width * 100.0);
                placement.y = clamp_position(drag.start_y + delta.y / viewport.height * 100.0);
            }
            Interaction::Resizing(resize) => {
                let delta = point.x - resize.anchor.x;
                placement.scale = clamp_scale(resize.start_scale + delta / RESIZE_SENSITIVITY_PX);
            }
        }
        *placement != before
    }

    /// Finish the gesture. Returns `true` when a drag or resize was active,
    /// meaning the placement should be persisted.
    pub fn end(&mut self) -> bool {
        let was_active = !self.is_idle();
        *self = Interaction::Idle;
        if was_active {
            log::debug!("Gesture ended");
        }
        was_active
    }
}

/// Classify a pointer-down at `pos` against the guide's pixel rectangle.
///
/// The bottom-right corner is the resize handle; anywhere else inside the
/// guide drags it.
pub fn hit_test(pos: Point, guide: &Rect) -> GestureTarget {
    let corner = Point::new(guide.right, guide.bottom);
    let d = pos - corner;
    if (d.x * d.x + d.y * d.y).sqrt() < HANDLE_TOLERANCE_PX {
        return GestureTarget::ResizeHandle;
    }
    if guide.contains(pos) {
        return GestureTarget::Guide;
    }
    GestureTarget::Outside
}
