//! Maximum sprite width across every row and section

use image::RgbaImage;
use log::debug;

use crate::extract::extract_section;
use crate::guides::GuidePositions;

/// Widest sprite found anywhere on the sheet, floored at `minimum_cell`.
///
/// Every section of every row in `0..num_rows` is extracted. Empty sections
/// are skipped. When nothing is found, or the widest sprite is narrower than
/// `minimum_cell`, `minimum_cell` is returned, so the result is never smaller
/// than the configured cell size.
pub fn resolve_max_width(
    source: &RgbaImage,
    guides: &GuidePositions,
    num_rows: u32,
    sprite_height: u32,
    minimum_cell: u32,
) -> u32 {
    let sections = guides.sections(source.width());
    let mut widest: Option<u32> = None;

    for row in 0..num_rows {
        for section in &sections {
            if let Some(sprite) = extract_section(source, section, row, sprite_height) {
                widest = Some(widest.map_or(sprite.width, |w| w.max(sprite.width)));
            }
        }
    }

    let resolved = widest.map_or(minimum_cell, |w| w.max(minimum_cell));
    debug!(
        "max sprite width {:?} over {} rows x {} sections, resolved cell width {}",
        widest,
        num_rows,
        sections.len(),
        resolved
    );
    resolved
}
