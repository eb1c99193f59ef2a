//! Sprite extraction - isolates the opaque span of one section of one row

use image::{imageops, RgbaImage};

use crate::guides::Section;
use crate::scan::{find_opaque_column, ScanDirection};

/// A sprite cut out of a section.
#[derive(Debug, Clone)]
pub struct ExtractedSprite {
    /// Pixels from the first to the last opaque column, full row height
    pub pixels: RgbaImage,
    /// Column of the first opaque pixel, relative to the section start
    pub offset_x: u32,
    /// Exclusive end minus start; always at least 1
    pub width: u32,
}

/// Crop the visible part of `(start_x, row * h) .. (end_x, (row + 1) * h)`.
///
/// The rectangle is clamped to the image, so the region may be narrower or
/// shorter than requested (or empty when nothing of it is on the sheet).
/// Columns in the region stay relative to `start_x`.
pub fn crop_section(
    source: &RgbaImage,
    start_x: u32,
    end_x: u32,
    row: u32,
    sprite_height: u32,
) -> RgbaImage {
    let width = end_x.saturating_sub(start_x);
    let top = row.saturating_mul(sprite_height);

    if start_x >= source.width() || top >= source.height() || width == 0 {
        return RgbaImage::new(0, 0);
    }

    let visible_w = width.min(source.width() - start_x);
    let visible_h = sprite_height.min(source.height() - top);
    imageops::crop_imm(source, start_x, top, visible_w, visible_h).to_image()
}

/// Extract the sprite sitting between `start_x` and `end_x` on `row`.
///
/// The section is scanned left to right for the first opaque column and
/// right to left for the last one; the sprite is the span between them at
/// full row height. Returns `None` when the section holds no opaque pixel.
///
/// # Examples
///
/// ```
/// use image::{Rgba, RgbaImage};
/// use spriteregrid::extract::extract_sprite;
///
/// let mut sheet = RgbaImage::new(40, 8);
/// for x in 25..30 {
///     sheet.put_pixel(x, 3, Rgba([255, 255, 255, 255]));
/// }
///
/// let sprite = extract_sprite(&sheet, 20, 40, 0, 8).unwrap();
/// assert_eq!(sprite.offset_x, 5);
/// assert_eq!(sprite.width, 5);
/// assert_eq!(sprite.pixels.dimensions(), (5, 8));
///
/// assert!(extract_sprite(&sheet, 0, 20, 0, 8).is_none());
/// ```
pub fn extract_sprite(
    source: &RgbaImage,
    start_x: u32,
    end_x: u32,
    row: u32,
    sprite_height: u32,
) -> Option<ExtractedSprite> {
    let region = crop_section(source, start_x, end_x, row, sprite_height);

    let sprite_start = find_opaque_column(&region, ScanDirection::Ascending, 0)?;
    let sprite_end = find_opaque_column(&region, ScanDirection::Descending, 1)?;
    let width = sprite_end - sprite_start;

    let visible = imageops::crop_imm(&region, sprite_start, 0, width, region.height()).to_image();
    let pixels = if visible.height() == sprite_height {
        visible
    } else {
        // Rows below the sheet read as transparent
        let mut padded = RgbaImage::new(width, sprite_height);
        imageops::replace(&mut padded, &visible, 0, 0);
        padded
    };
    Some(ExtractedSprite { pixels, offset_x: sprite_start, width })
}

/// Convenience wrapper taking a [`Section`] instead of raw bounds.
pub fn extract_section(
    source: &RgbaImage,
    section: &Section,
    row: u32,
    sprite_height: u32,
) -> Option<ExtractedSprite> {
    extract_sprite(source, section.start_x, section.end_x, row, sprite_height)
}
