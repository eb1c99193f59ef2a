//! Uniform grid slicing - cuts a sheet into equal square cells

use image::{imageops, RgbaImage};

/// Split `image` into `cell_size` squares, row-major.
///
/// Partial cells along the right and bottom edges are dropped, so the grid is
/// `width / cell_size` columns by `height / cell_size` rows.
///
/// ```
/// use image::RgbaImage;
/// use spriteregrid::slice::slice_uniform;
///
/// let sheet = RgbaImage::new(130, 64);
/// let cells = slice_uniform(&sheet, 32);
/// assert_eq!(cells.len(), 2);
/// assert_eq!(cells[0].len(), 4);
/// ```
pub fn slice_uniform(image: &RgbaImage, cell_size: u32) -> Vec<Vec<RgbaImage>> {
    if cell_size == 0 {
        return Vec::new();
    }

    let cols = image.width() / cell_size;
    let rows = image.height() / cell_size;

    (0..rows)
        .map(|row| {
            (0..cols)
                .map(|col| {
                    imageops::crop_imm(image, col * cell_size, row * cell_size, cell_size, cell_size)
                        .to_image()
                })
                .collect()
        })
        .collect()
}
