//! CLI dispatch for the `sregrid preview` command.

use std::path::Path;
use std::process::ExitCode;

use crate::config::CliOverrides;
use crate::output::{default_output_path, load_image, save_png};
use crate::preview::{draw_guides, GUIDE_COLOR};

use super::{load_settings, EXIT_ERROR, EXIT_SUCCESS};

/// Execute the preview command.
pub fn run_preview(
    input: &Path,
    output: Option<&Path>,
    config_path: Option<&Path>,
    overrides: &CliOverrides,
) -> ExitCode {
    let config = match load_settings(config_path, overrides) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let source = match load_image(input) {
        Ok(img) => img,
        Err(e) => {
            eprintln!("Error: Cannot read '{}': {}", input.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let grid = config.grid_config();
    let line_height = grid.sprite_height.saturating_mul(grid.num_rows);
    let overlay = draw_guides(&source, &config.guide_positions(), line_height, GUIDE_COLOR);

    let output_path =
        output.map(Path::to_path_buf).unwrap_or_else(|| default_output_path(input, "guides"));
    if let Err(e) = save_png(&overlay, &output_path) {
        eprintln!("Error: Cannot write '{}': {}", output_path.display(), e);
        return ExitCode::from(EXIT_ERROR);
    }

    println!("Saved: {}", output_path.display());
    ExitCode::from(EXIT_SUCCESS)
}
