//! Preview rendering - guide overlays and before/after stacks

use image::{imageops, Rgba, RgbaImage};

use crate::guides::GuidePositions;

/// Color of the guide lines
pub const GUIDE_COLOR: Rgba<u8> = Rgba([255, 0, 0, 255]);

/// Transparent color used for padding
const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Draw a 1px vertical line for every guide, from the top down to `line_height`.
///
/// Lines are clipped to the image; guides beyond the right edge draw nothing.
/// `line_height` is normally `sprite_height * num_rows`.
pub fn draw_guides(
    image: &RgbaImage,
    guides: &GuidePositions,
    line_height: u32,
    color: Rgba<u8>,
) -> RgbaImage {
    let mut overlay = image.clone();
    let bottom = line_height.min(overlay.height());

    for &x in guides.as_slice() {
        if x >= overlay.width() {
            continue;
        }
        for y in 0..bottom {
            overlay.put_pixel(x, y, color);
        }
    }

    overlay
}

/// Stack `processed` directly under `original`.
///
/// The result is as wide as the wider of the two, with transparent padding.
pub fn stack_preview(original: &RgbaImage, processed: &RgbaImage) -> RgbaImage {
    let width = original.width().max(processed.width());
    let height = original.height().saturating_add(processed.height());
    let mut canvas = RgbaImage::from_pixel(width, height, TRANSPARENT);

    imageops::replace(&mut canvas, original, 0, 0);
    imageops::replace(&mut canvas, processed, 0, original.height() as i64);
    canvas
}
