//! Alpha-channel scanning - finds opaque columns and bounding boxes
//!
//! A pixel counts as opaque when its alpha channel is non-zero. Every search
//! here uses that single predicate so the scanner and the trimmer agree on
//! what "empty" means.

use image::{GenericImageView, Rgba};

/// Direction in which columns are visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanDirection {
    /// Left to right, starting at column 0
    Ascending,
    /// Right to left, starting at column `width - 1`
    Descending,
}

/// An axis-aligned pixel rectangle, end-exclusive on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    /// Exclusive right edge.
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }
}

#[inline]
fn is_opaque(pixel: &Rgba<u8>) -> bool {
    pixel[3] > 0
}

fn column_has_opaque<I>(region: &I, x: u32) -> bool
where
    I: GenericImageView<Pixel = Rgba<u8>>,
{
    (0..region.height()).any(|y| is_opaque(&region.get_pixel(x, y)))
}

/// Find the first column, in `direction` order, holding a pixel with alpha > 0.
///
/// Each column is checked top to bottom; only the column index matters, so
/// which row triggered the hit is irrelevant. `offset` is added to the index
/// before it is returned, which lets callers turn the last opaque column into
/// an exclusive end bound (`offset = 1`).
///
/// Returns `None` for a fully transparent or zero-sized region.
///
/// # Examples
///
/// ```
/// use image::{Rgba, RgbaImage};
/// use spriteregrid::scan::{find_opaque_column, ScanDirection};
///
/// let mut region = RgbaImage::new(8, 4);
/// region.put_pixel(2, 3, Rgba([255, 0, 0, 255]));
/// region.put_pixel(5, 0, Rgba([0, 255, 0, 10]));
///
/// assert_eq!(find_opaque_column(&region, ScanDirection::Ascending, 0), Some(2));
/// assert_eq!(find_opaque_column(&region, ScanDirection::Descending, 1), Some(6));
/// ```
pub fn find_opaque_column<I>(region: &I, direction: ScanDirection, offset: u32) -> Option<u32>
where
    I: GenericImageView<Pixel = Rgba<u8>>,
{
    let width = region.width();
    let hit = match direction {
        ScanDirection::Ascending => (0..width).find(|&x| column_has_opaque(region, x)),
        ScanDirection::Descending => (0..width).rev().find(|&x| column_has_opaque(region, x)),
    };
    hit.map(|x| x + offset)
}

/// Compute the tightest rectangle containing every pixel with alpha > 0.
///
/// Returns `None` when the image has no opaque pixel at all.
pub fn opaque_bounds<I>(image: &I) -> Option<PixelRect>
where
    I: GenericImageView<Pixel = Rgba<u8>>,
{
    let (width, height) = image.dimensions();
    let mut min_x = u32::MAX;
    let mut min_y = u32::MAX;
    let mut max_x = 0;
    let mut max_y = 0;
    let mut found = false;

    for y in 0..height {
        for x in 0..width {
            if is_opaque(&image.get_pixel(x, y)) {
                found = true;
                min_x = min_x.min(x);
                min_y = min_y.min(y);
                max_x = max_x.max(x);
                max_y = max_y.max(y);
            }
        }
    }

    if !found {
        return None;
    }

    Some(PixelRect { x: min_x, y: min_y, width: max_x - min_x + 1, height: max_y - min_y + 1 })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    const OPAQUE: Rgba<u8> = Rgba([10, 20, 30, 255]);

    #[test]
    fn test_transparent_region_has_no_column() {
        let region = RgbaImage::new(16, 16);
        assert_eq!(find_opaque_column(&region, ScanDirection::Ascending, 0), None);
        assert_eq!(find_opaque_column(&region, ScanDirection::Descending, 1), None);
    }

    #[test]
    fn test_zero_width_region() {
        let region = RgbaImage::new(0, 16);
        assert_eq!(find_opaque_column(&region, ScanDirection::Ascending, 0), None);
        assert_eq!(find_opaque_column(&region, ScanDirection::Descending, 0), None);
    }

    #[test]
    fn test_ascending_finds_leftmost_column() {
        let mut region = RgbaImage::new(10, 5);
        region.put_pixel(7, 0, OPAQUE);
        region.put_pixel(3, 4, OPAQUE);
        assert_eq!(find_opaque_column(&region, ScanDirection::Ascending, 0), Some(3));
    }

    #[test]
    fn test_descending_finds_rightmost_column_with_offset() {
        let mut region = RgbaImage::new(10, 5);
        region.put_pixel(7, 0, OPAQUE);
        region.put_pixel(3, 4, OPAQUE);
        assert_eq!(find_opaque_column(&region, ScanDirection::Descending, 0), Some(7));
        assert_eq!(find_opaque_column(&region, ScanDirection::Descending, 1), Some(8));
    }

    #[test]
    fn test_faint_alpha_counts_as_opaque() {
        let mut region = RgbaImage::new(4, 4);
        region.put_pixel(1, 1, Rgba([0, 0, 0, 1]));
        assert_eq!(find_opaque_column(&region, ScanDirection::Ascending, 0), Some(1));
    }

    #[test]
    fn test_colored_but_transparent_pixels_ignored() {
        // Colour channels are irrelevant; only alpha decides
        let region = RgbaImage::from_pixel(4, 4, Rgba([255, 255, 255, 0]));
        assert_eq!(find_opaque_column(&region, ScanDirection::Ascending, 0), None);
    }

    #[test]
    fn test_single_column_hit_both_directions() {
        let mut region = RgbaImage::new(9, 3);
        region.put_pixel(4, 2, OPAQUE);
        let start = find_opaque_column(&region, ScanDirection::Ascending, 0).unwrap();
        let end = find_opaque_column(&region, ScanDirection::Descending, 1).unwrap();
        assert_eq!((start, end), (4, 5));
    }

    #[test]
    fn test_start_never_exceeds_end() {
        let mut region = RgbaImage::new(12, 6);
        for (x, y) in [(2, 1), (9, 5), (5, 0), (11, 3)] {
            region.put_pixel(x, y, OPAQUE);
            let start = find_opaque_column(&region, ScanDirection::Ascending, 0).unwrap();
            let end = find_opaque_column(&region, ScanDirection::Descending, 0).unwrap();
            assert!(start <= end, "start {} > end {}", start, end);
        }
    }

    #[test]
    fn test_scan_is_relative_to_region() {
        let mut image = RgbaImage::new(20, 4);
        image.put_pixel(12, 1, OPAQUE);
        let region = image.view(10, 0, 5, 4).to_image();
        assert_eq!(find_opaque_column(&region, ScanDirection::Ascending, 0), Some(2));
    }

    #[test]
    fn test_opaque_bounds_empty() {
        let image = RgbaImage::new(8, 8);
        assert_eq!(opaque_bounds(&image), None);
    }

    #[test]
    fn test_opaque_bounds_tight() {
        let mut image = RgbaImage::new(10, 10);
        image.put_pixel(2, 7, OPAQUE);
        image.put_pixel(6, 3, OPAQUE);
        let rect = opaque_bounds(&image).unwrap();
        assert_eq!(rect, PixelRect { x: 2, y: 3, width: 5, height: 5 });
        assert_eq!(rect.right(), 7);
        assert_eq!(rect.bottom(), 8);
    }
}
