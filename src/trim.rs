//! Transparent border trimming for the packed sheet

use image::{imageops, RgbaImage};

use crate::scan::{opaque_bounds, PixelRect};

/// Margin used when trimming a sheet with rows of `sprite_height`.
pub fn default_margin(sprite_height: u32) -> u32 {
    sprite_height / 2
}

/// Region [`trim_transparent_border`] would keep, or `None` for a fully
/// transparent image.
///
/// The opaque bounding box is widened by `margin_px` on the left and right
/// only (clamped to the image); top and bottom stay tight.
pub fn trim_region(image: &RgbaImage, margin_px: u32) -> Option<PixelRect> {
    let bounds = opaque_bounds(image)?;
    let left = bounds.x.saturating_sub(margin_px);
    let right = bounds.right().saturating_add(margin_px).min(image.width());
    Some(PixelRect { x: left, y: bounds.y, width: right - left, height: bounds.height })
}

/// Crop away the transparent border, keeping a horizontal margin.
///
/// An image without any opaque pixel is returned unchanged.
///
/// ```
/// use image::{Rgba, RgbaImage};
/// use spriteregrid::trim::trim_transparent_border;
///
/// let mut image = RgbaImage::new(100, 40);
/// image.put_pixel(50, 10, Rgba([0, 0, 0, 255]));
/// image.put_pixel(60, 20, Rgba([0, 0, 0, 255]));
///
/// let trimmed = trim_transparent_border(image, 5);
/// assert_eq!(trimmed.dimensions(), (21, 11));
/// ```
pub fn trim_transparent_border(image: RgbaImage, margin_px: u32) -> RgbaImage {
    match trim_region(&image, margin_px) {
        Some(rect) => imageops::crop_imm(&image, rect.x, rect.y, rect.width, rect.height).to_image(),
        None => image,
    }
}
