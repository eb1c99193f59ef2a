//! Image loading, PNG output, and output path generation

use image::RgbaImage;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type for image I/O
#[derive(Debug, Error)]
pub enum OutputError {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Image decoding or encoding error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Decode an image file of any supported format into RGBA.
///
/// Sources without an alpha channel are converted, so every pixel the core
/// sees carries alpha.
pub fn load_image(path: &Path) -> Result<RgbaImage, OutputError> {
    let decoded = image::open(path)?;
    Ok(decoded.to_rgba8())
}

/// Save an RGBA image to a PNG file.
///
/// # Arguments
///
/// * `image` - The image to save
/// * `path` - The output file path
///
/// # Returns
///
/// * `Ok(())` on success
/// * `Err(OutputError)` on failure
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<(), OutputError> {
    // Create parent directories if they don't exist
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    image.save_with_format(path, image::ImageFormat::Png)?;
    Ok(())
}

/// Generate `{input_stem}_{suffix}.png` next to the input file.
///
/// | Input | Suffix | Output |
/// |-------|--------|--------|
/// | `sheet.png` | `packed` | `sheet_packed.png` |
/// | `art/hero.gif` | `preview` | `art/hero_preview.png` |
pub fn default_output_path(input: &Path, suffix: &str) -> PathBuf {
    let input_stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("output");
    let file_name = format!("{}_{}.png", input_stem, suffix);
    match input.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join(file_name),
        _ => PathBuf::from(file_name),
    }
}

/// Path for the cell at (`row`, `col`) when slicing `input` into `dir`.
pub fn cell_output_path(dir: &Path, input: &Path, row: usize, col: usize) -> PathBuf {
    let input_stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("cell");
    dir.join(format!("{}_{}_{}.png", input_stem, row, col))
}
