//! # guide-frame
//!
//! Positioning and alignment engine for a camera framing guide.
//!
//! This crate provides:
//! - **Ratio projection**: letterbox/pillarbox margins for the live preview and
//!   the crop rectangle applied to a captured frame
//! - **Guide model**: a movable, resizable body silhouette with one saved
//!   placement per guide type
//! - **Interaction**: a drag/resize state machine driven by pointer events
//! - **Alignment**: classifies pose landmarks against the guide and produces a
//!   directional hint
//!
//! Everything here is pure geometry and state; drawing, camera access and the
//! pose model itself live outside the library.
//!
//! ## Quick Start
//!
//! ```rust
//! use guide_frame::{
//!     AlignmentConfig, GestureTarget, GuideType, MemoryStore, Point, Session, Size,
//! };
//!
//! let mut session = Session::new(MemoryStore::default(), AlignmentConfig::default());
//! session.select_guide(GuideType::Portrait);
//!
//! // Drag the guide 40px to the right in a 400x800 preview.
//! let viewport = Size::new(400.0, 800.0);
//! session.set_edit_mode(true);
//! session.gesture_start(Point::new(200.0, 400.0), GestureTarget::Guide);
//! session.gesture_move(Point::new(240.0, 400.0), viewport);
//! session.gesture_end();
//! session.set_edit_mode(false);
//! assert!((session.placement().x - 60.0).abs() < 1e-4);
//!
//! // Score a frame from the pose estimator.
//! let result = session.evaluate(&[], viewport);
//! assert!(!result.is_ready());
//! ```

pub mod alignment;
pub mod capture;
pub mod config;
mod error;
pub mod geometry;
pub mod guide;
pub mod interaction;
pub mod landmarks;
pub mod overlay;
pub mod ratio;
pub mod session;
pub mod store;
mod types;

pub use alignment::{
    AlignmentConfig, AlignmentResult, Classification, FrameState, Hint, Horizontal, Vertical,
};
pub use error::{Error, Result};
pub use geometry::{bounding_box, clamp, overlap_ratio};
pub use guide::{GuideModel, GuidePlacement, GuideType, SavedPlacements};
pub use interaction::{GestureTarget, Interaction, hit_test};
pub use landmarks::Landmark;
pub use overlay::LevelReading;
pub use ratio::{AspectRatio, CropRect, Margins, MaskLayout, project_crop, project_mask};
pub use session::Session;
pub use store::{JsonFileStore, MemoryStore, PlacementStore};
pub use types::{Point, Rect, Segment, Size};
