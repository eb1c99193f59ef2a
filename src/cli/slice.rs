//! CLI dispatch for the `sregrid slice` command.

use std::path::Path;
use std::process::ExitCode;

use crate::config::CliOverrides;
use crate::output::{cell_output_path, load_image, save_png};
use crate::slice::slice_uniform;

use super::{load_settings, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Execute the slice command.
pub fn run_slice(
    input: &Path,
    size: Option<u32>,
    output_dir: Option<&Path>,
    config_path: Option<&Path>,
) -> ExitCode {
    let config = match load_settings(config_path, &CliOverrides::default()) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let cell_size = size.unwrap_or(config.grid.sprite_height);
    if cell_size == 0 {
        eprintln!("Error: --size must be greater than zero");
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    let source = match load_image(input) {
        Ok(img) => img,
        Err(e) => {
            eprintln!("Error: Cannot read '{}': {}", input.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let dir = match output_dir {
        Some(d) => d.to_path_buf(),
        None => input.parent().map(Path::to_path_buf).unwrap_or_default(),
    };

    let cells = slice_uniform(&source, cell_size);
    if cells.is_empty() {
        eprintln!(
            "Warning: {}x{} sheet is smaller than one {}px cell",
            source.width(),
            source.height(),
            cell_size
        );
    }

    let mut written = 0;
    for (row, row_cells) in cells.iter().enumerate() {
        for (col, cell) in row_cells.iter().enumerate() {
            let path = cell_output_path(&dir, input, row, col);
            if let Err(e) = save_png(cell, &path) {
                eprintln!("Error: Cannot write '{}': {}", path.display(), e);
                return ExitCode::from(EXIT_ERROR);
            }
            written += 1;
        }
    }

    println!("Saved {} cells of {}px to {}", written, cell_size, dir.display());
    ExitCode::from(EXIT_SUCCESS)
}
