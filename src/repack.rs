//! Grid repacking - centres every extracted sprite in a fixed-width cell
//!
//! The output canvas has one cell per section and keeps the source height,
//! so row `r` of the sheet lands on row `r` of the canvas.

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use log::debug;
use serde::Serialize;

use crate::extract::extract_section;
use crate::guides::GuidePositions;

/// Transparent color used for the canvas background
const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// How extracted sprites are sized before placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpriteSizing {
    /// Keep the extracted width and row height
    #[default]
    Native,
    /// Resize every sprite (nearest-neighbour) to exactly this size
    Fixed { width: u32, height: u32 },
}

/// Where one sprite ended up on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Placement {
    pub row: u32,
    pub section: usize,
    /// Absolute x of the sprite's first opaque column on the source sheet
    pub source_x: u32,
    /// Paste position on the canvas (may be negative if the cell is too narrow)
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

/// Left edge of a sprite of `sprite_width` centred in cell `index`.
///
/// The margin is floored, so odd leftovers put the extra pixel on the right.
pub fn centered_x(index: usize, cell_width: u32, sprite_width: u32) -> i64 {
    let cell_origin = index as i64 * cell_width as i64;
    let margin = (cell_width as i64 - sprite_width as i64).div_euclid(2);
    cell_origin + margin
}

/// Repack the sheet into `max_width`-wide cells.
///
/// See [`repack_with_report`] for the placement list.
pub fn repack(
    source: &RgbaImage,
    guides: &GuidePositions,
    num_rows: u32,
    sprite_height: u32,
    max_width: u32,
    sizing: SpriteSizing,
) -> RgbaImage {
    repack_with_report(source, guides, num_rows, sprite_height, max_width, sizing).0
}

/// Repack the sheet and report where each sprite was placed.
///
/// The canvas is `max_width * sections` by `source.height()` and starts fully
/// transparent. Each sprite is re-extracted from its section, optionally
/// resized, and composited at
/// `(section * max_width + floor((max_width - w) / 2), row * sprite_height)`.
/// Transparent sprite pixels never erase what is already on the canvas, and
/// anything falling outside the canvas is clipped. Empty sections leave their
/// cell transparent.
pub fn repack_with_report(
    source: &RgbaImage,
    guides: &GuidePositions,
    num_rows: u32,
    sprite_height: u32,
    max_width: u32,
    sizing: SpriteSizing,
) -> (RgbaImage, Vec<Placement>) {
    let sections = guides.sections(source.width());
    let section_count = u32::try_from(sections.len()).unwrap_or(u32::MAX);
    let canvas_width = max_width.saturating_mul(section_count);
    let mut canvas = RgbaImage::from_pixel(canvas_width, source.height(), TRANSPARENT);
    let mut placements = Vec::new();

    for row in 0..num_rows {
        for section in &sections {
            let Some(sprite) = extract_section(source, section, row, sprite_height) else {
                continue;
            };

            let pixels = match sizing {
                SpriteSizing::Native => sprite.pixels,
                SpriteSizing::Fixed { width, height } => {
                    imageops::resize(&sprite.pixels, width, height, FilterType::Nearest)
                }
            };

            let x = centered_x(section.index, max_width, pixels.width());
            let y = row as i64 * sprite_height as i64;
            imageops::overlay(&mut canvas, &pixels, x, y);

            let placement = Placement {
                row,
                section: section.index,
                source_x: section.start_x + sprite.offset_x,
                x,
                y,
                width: pixels.width(),
                height: pixels.height(),
            };
            debug!("placed {:?}", placement);
            placements.push(placement);
        }
    }

    (canvas, placements)
}
