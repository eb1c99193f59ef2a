//! Full processing pass: extract, resolve, repack, trim
//!
//! Every request regenerates the packed sheet from scratch. Extraction runs
//! twice per section (once while resolving the cell width, once while
//! repacking); both passes read the same guide snapshot so the result only
//! depends on the inputs.

use image::RgbaImage;
use log::{info, warn};

use crate::error::RegridError;
use crate::guides::{GridConfig, GuidePositions};
use crate::repack::{repack_with_report, Placement, SpriteSizing};
use crate::resolve::resolve_max_width;
use crate::trim::{default_margin, trim_transparent_border};

/// Post-processing applied after repacking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrimMode {
    /// Keep the full canvas
    Disabled,
    /// Trim to the opaque box plus this horizontal margin
    Margin(u32),
}

/// Options for one processing pass beyond the grid itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessOptions {
    pub trim: TrimMode,
}

impl ProcessOptions {
    /// Trimming with the default margin of half the sprite height.
    pub fn for_grid(config: &GridConfig) -> Self {
        Self { trim: TrimMode::Margin(default_margin(config.sprite_height)) }
    }
}

/// Result of a processing pass.
#[derive(Debug, Clone)]
pub struct PackedSheet {
    /// Final image (trimmed unless trimming was disabled)
    pub image: RgbaImage,
    /// Canvas size before trimming
    pub untrimmed_size: (u32, u32),
    /// Width of every cell
    pub cell_width: u32,
    /// Number of sections per row
    pub sections: usize,
    /// Where each sprite was placed on the untrimmed canvas
    pub placements: Vec<Placement>,
}

/// Sprite sizing policy selected by the grid config.
pub fn sizing_for(config: &GridConfig) -> SpriteSizing {
    if config.resize_sprites {
        SpriteSizing::Fixed { width: config.sprite_height, height: config.sprite_height }
    } else {
        SpriteSizing::Native
    }
}

/// Run the whole pipeline with the default trim margin.
pub fn process(
    source: &RgbaImage,
    guides: &GuidePositions,
    config: &GridConfig,
) -> Result<PackedSheet, RegridError> {
    process_with(source, guides, config, &ProcessOptions::for_grid(config))
}

/// Run the whole pipeline.
///
/// The config is validated before any pixel is touched. The minimum cell width
/// is the sprite height, so cells never collapse below the configured size.
pub fn process_with(
    source: &RgbaImage,
    guides: &GuidePositions,
    config: &GridConfig,
    options: &ProcessOptions,
) -> Result<PackedSheet, RegridError> {
    config.validate()?;

    let snapshot = guides.clone();
    if let Some(outside) = snapshot.as_slice().iter().find(|&&g| g > source.width()) {
        warn!("guide at x={} lies beyond the sheet width {}", outside, source.width());
    }

    let cell_width = resolve_max_width(
        source,
        &snapshot,
        config.num_rows,
        config.sprite_height,
        config.sprite_height,
    );

    let (canvas, placements) = repack_with_report(
        source,
        &snapshot,
        config.num_rows,
        config.sprite_height,
        cell_width,
        sizing_for(config),
    );
    let untrimmed_size = canvas.dimensions();

    let image = match options.trim {
        TrimMode::Disabled => canvas,
        TrimMode::Margin(margin) => trim_transparent_border(canvas, margin),
    };

    info!(
        "packed {} sprites into {} cells of width {} ({}x{} -> {}x{})",
        placements.len(),
        snapshot.section_count(),
        cell_width,
        untrimmed_size.0,
        untrimmed_size.1,
        image.width(),
        image.height()
    );

    Ok(PackedSheet {
        image,
        untrimmed_size,
        cell_width,
        sections: snapshot.section_count(),
        placements,
    })
}
