//! Cutting a captured frame down to the selected aspect ratio.

use std::path::Path;

use image::DynamicImage;

use crate::error::Result;
use crate::ratio::{AspectRatio, project_crop};

/// Crop `frame` to `ratio` at native resolution, flipped horizontally when
/// `mirror` is set.
pub fn crop_to_ratio(frame: &DynamicImage, ratio: AspectRatio, mirror: bool) -> DynamicImage {
    let crop = project_crop(frame.width(), frame.height(), ratio);
    let cropped = frame.crop_imm(crop.x, crop.y, crop.width, crop.height);
    if mirror { cropped.fliph() } else { cropped }
}

pub fn save(image: &DynamicImage, path: &Path) -> Result<()> {
    image.save(path)?;
    log::info!("Saved capture to {:?}", path);
    Ok(())
}
