//! Aspect-ratio projection for the live preview mask and the capture crop.
//!
//! Both the preview and the capture run the same comparison: when the target
//! ratio is narrower than the container, height binds and the sides are
//! masked (pillarbox); otherwise width binds and the top and bottom are
//! masked (letterbox).

use serde::{Deserialize, Serialize};

use crate::types::{Rect, Size};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AspectRatio {
    #[serde(rename = "1:1")]
    Square,
    #[default]
    #[serde(rename = "3:4")]
    R3_4,
    #[serde(rename = "9:16")]
    R9_16,
    #[serde(rename = "full")]
    Full,
}

impl AspectRatio {
    pub const ALL: [AspectRatio; 4] = [
        AspectRatio::Square,
        AspectRatio::R3_4,
        AspectRatio::R9_16,
        AspectRatio::Full,
    ];

    /// `(width, height)` of the ratio, or `None` for the unconstrained `full`.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        match self {
            AspectRatio::Square => Some((1, 1)),
            AspectRatio::R3_4 => Some((3, 4)),
            AspectRatio::R9_16 => Some((9, 16)),
            AspectRatio::Full => None,
        }
    }

    pub fn target_ratio(&self) -> Option<f32> {
        self.dimensions().map(|(w, h)| w as f32 / h as f32)
    }

    /// Stable key used by persisted settings.
    pub fn key(&self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::R3_4 => "3:4",
            AspectRatio::R9_16 => "9:16",
            AspectRatio::Full => "full",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.key() == key)
    }
}

impl std::fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AspectRatio::Full => "Full",
            other => other.key(),
        };
        write!(f, "{}", s)
    }
}

/// Which axis a mask covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MaskLayout {
    None,
    Pillarbox,
    Letterbox,
}

/// Masked bands around the framed area, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Margins {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

impl Margins {
    pub const ZERO: Margins = Margins {
        top: 0.0,
        bottom: 0.0,
        left: 0.0,
        right: 0.0,
    };

    pub fn layout(&self) -> MaskLayout {
        if self.left > 0.0 {
            MaskLayout::Pillarbox
        } else if self.top > 0.0 {
            MaskLayout::Letterbox
        } else {
            MaskLayout::None
        }
    }

    /// The visible framed area inside a viewport of `viewport` size.
    pub fn inner_rect(&self, viewport: Size) -> Rect {
        Rect::new(
            self.left,
            self.top,
            viewport.width - self.right,
            viewport.height - self.bottom,
        )
    }
}

/// Pixel rectangle cut out of a native camera frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Margins that letterbox or pillarbox `viewport` to `ratio`.
pub fn project_mask(viewport: Size, ratio: AspectRatio) -> Margins {
    let Some(target) = ratio.target_ratio() else {
        return Margins::ZERO;
    };
    if viewport.is_degenerate() {
        return Margins::ZERO;
    }

    if target < viewport.aspect() {
        let target_width = viewport.height * target;
        let side = (viewport.width - target_width) / 2.0;
        Margins {
            left: side,
            right: side,
            ..Margins::ZERO
        }
    } else {
        let target_height = viewport.width / target;
        let band = (viewport.height - target_height) / 2.0;
        Margins {
            top: band,
            bottom: band,
            ..Margins::ZERO
        }
    }
}

/// Crop rectangle on a `width`×`height` native frame for `ratio`.
///
/// `full` and empty frames yield the whole frame.
pub fn project_crop(width: u32, height: u32, ratio: AspectRatio) -> CropRect {
    let full = CropRect {
        x: 0,
        y: 0,
        width,
        height,
    };
    let Some(target) = ratio.target_ratio() else {
        return full;
    };
    if width == 0 || height == 0 {
        return full;
    }

    let (w, h) = (width as f32, height as f32);
    if target < w / h {
        let crop_w = ((h * target).round() as u32).clamp(1, width);
        CropRect {
            x: (width - crop_w) / 2,
            y: 0,
            width: crop_w,
            height,
        }
    } else {
        let crop_h = ((w / target).round() as u32).clamp(1, height);
        CropRect {
            x: 0,
            y: (height - crop_h) / 2,
            width,
            height: crop_h,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn framed_ratio(viewport: Size, m: &Margins) -> f32 {
        (viewport.width - m.left - m.right) / (viewport.height - m.top - m.bottom)
    }

    #[test]
    fn mask_matches_ratio_for_many_viewports() {
        let viewports = [
            Size::new(390.0, 844.0),
            Size::new(844.0, 390.0),
            Size::new(1000.0, 1000.0),
            Size::new(1920.0, 1080.0),
            Size::new(300.0, 533.0),
        ];
        for viewport in viewports {
            for ratio in [AspectRatio::Square, AspectRatio::R3_4, AspectRatio::R9_16] {
                let m = project_mask(viewport, ratio);
                let expected = ratio.target_ratio().unwrap();
                assert!(
                    (framed_ratio(viewport, &m) - expected).abs() < 1e-3,
                    "{viewport:?} {ratio}"
                );
                assert!(m.left == 0.0 || m.top == 0.0, "{viewport:?} {ratio}");
                assert_eq!(m.left, m.right);
                assert_eq!(m.top, m.bottom);
            }
        }
    }

    #[test]
    fn narrow_target_pillarboxes() {
        let m = project_mask(Size::new(1920.0, 1080.0), AspectRatio::R3_4);
        assert_eq!(m.layout(), MaskLayout::Pillarbox);
        assert!((m.left - 555.0).abs() < 1e-3);
        assert_eq!(m.top, 0.0);
    }

    #[test]
    fn wide_target_letterboxes() {
        let m = project_mask(Size::new(390.0, 844.0), AspectRatio::Square);
        assert_eq!(m.layout(), MaskLayout::Letterbox);
        assert!((m.top - 227.0).abs() < 1e-3);
        assert_eq!(m.left, 0.0);
    }

    #[test]
    fn equal_ratios_take_the_letterbox_branch_with_zero_band() {
        let m = project_mask(Size::new(300.0, 400.0), AspectRatio::R3_4);
        assert_eq!(m, Margins::ZERO);
    }

    #[test]
    fn full_and_degenerate_have_no_mask() {
        assert_eq!(
            project_mask(Size::new(1280.0, 720.0), AspectRatio::Full),
            Margins::ZERO
        );
        assert_eq!(
            project_mask(Size::new(0.0, 720.0), AspectRatio::Square),
            Margins::ZERO
        );
    }

    #[test]
    fn crop_on_native_frame() {
        let crop = project_crop(1920, 1080, AspectRatio::R3_4);
        assert_eq!(
            crop,
            CropRect {
                x: 555,
                y: 0,
                width: 810,
                height: 1080
            }
        );

        let crop = project_crop(1080, 1920, AspectRatio::Square);
        assert_eq!(
            crop,
            CropRect {
                x: 0,
                y: 420,
                width: 1080,
                height: 1080
            }
        );
    }

    #[test]
    fn crop_full_is_whole_frame() {
        let crop = project_crop(1280, 720, AspectRatio::Full);
        assert_eq!(
            crop,
            CropRect {
                x: 0,
                y: 0,
                width: 1280,
                height: 720
            }
        );
    }

    #[test]
    fn keys_round_trip() {
        for ratio in AspectRatio::ALL {
            assert_eq!(AspectRatio::from_key(ratio.key()), Some(ratio));
        }
        assert_eq!(AspectRatio::Full.to_string(), "Full");
        assert_eq!(AspectRatio::R9_16.to_string(), "9:16");
    }
}
