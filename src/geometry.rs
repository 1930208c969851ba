//! Pure geometry shared by the projector, the guide model and the evaluator.

use crate::landmarks::Landmark;
use crate::types::Rect;

/// Fewest qualifying points that still describe a body.
pub const MIN_BOX_POINTS: usize = 3;

/// Saturate `v` into `[lo, hi]`. NaN saturates to `lo`.
pub fn clamp(v: f32, lo: f32, hi: f32) -> f32 {
    if v.is_nan() {
        return lo;
    }
    v.max(lo).min(hi)
}

/// Bounding box of the landmarks whose visibility exceeds `min_visibility`.
///
/// Returns `None` when fewer than [`MIN_BOX_POINTS`] landmarks qualify; that
/// means "insufficient data", not an empty region.
pub fn bounding_box<'a, I>(landmarks: I, min_visibility: f32) -> Option<Rect>
where
    I: IntoIterator<Item = &'a Landmark>,
{
    let mut count = 0;
    let mut rect = Rect::new(f32::MAX, f32::MAX, f32::MIN, f32::MIN);

    for lm in landmarks.into_iter().filter(|lm| lm.is_visible(min_visibility)) {
        rect.left = rect.left.min(lm.x);
        rect.right = rect.right.max(lm.x);
        rect.top = rect.top.min(lm.y);
        rect.bottom = rect.bottom.max(lm.y);
        count += 1;
    }

    (count >= MIN_BOX_POINTS).then_some(rect)
}

/// Fraction of `a` covered by `b`: `area(a ∩ b) / area(a)`.
///
/// Always in `[0,1]`; zero when the rectangles are disjoint or `a` has no
/// area.
pub fn overlap_ratio(a: &Rect, b: &Rect) -> f32 {
    let area = a.area();
    if area <= 0.0 {
        return 0.0;
    }
    match a.intersection(b) {
        Some(overlap) => clamp(overlap.area() / area, 0.0, 1.0),
        None => 0.0,
    }
}
