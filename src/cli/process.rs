//! CLI dispatch for the `sregrid process` command.

use std::path::Path;
use std::process::ExitCode;

use serde::Serialize;

use crate::config::{CliOverrides, RegridConfig};
use crate::output::{default_output_path, load_image, save_png};
use crate::pipeline::{process_with, PackedSheet, ProcessOptions, TrimMode};
use crate::preview::stack_preview;
use crate::repack::Placement;

use super::{load_settings, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

#[derive(Serialize)]
struct ProcessSummary<'a> {
    output: String,
    cell_width: u32,
    sections: usize,
    untrimmed: [u32; 2],
    size: [u32; 2],
    placements: &'a [Placement],
}

fn trim_mode(config: &RegridConfig) -> TrimMode {
    if config.trim.enabled {
        TrimMode::Margin(config.trim_margin())
    } else {
        TrimMode::Disabled
    }
}

/// Execute the process command.
pub fn run_process(
    input: &Path,
    output: Option<&Path>,
    config_path: Option<&Path>,
    overrides: &CliOverrides,
    preview: Option<&Path>,
    json: bool,
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
    let guides = config.guide_positions();
    let options = ProcessOptions { trim: trim_mode(&config) };

    let packed = match process_with(&source, &guides, &grid, &options) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {}", e);
            let code = if e.is_config_error() { EXIT_INVALID_ARGS } else { EXIT_ERROR };
            return ExitCode::from(code);
        }
    };

    let output_path = output.map(Path::to_path_buf).unwrap_or_else(|| default_output_path(input, "packed"));
    if let Err(e) = save_png(&packed.image, &output_path) {
        eprintln!("Error: Cannot write '{}': {}", output_path.display(), e);
        return ExitCode::from(EXIT_ERROR);
    }

    if let Some(preview_path) = preview {
        let stacked = stack_preview(&source, &packed.image);
        if let Err(e) = save_png(&stacked, preview_path) {
            eprintln!("Error: Cannot write '{}': {}", preview_path.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
    }

    if json {
        print_summary_json(&packed, &output_path.display().to_string());
    } else {
        println!(
            "Saved: {} ({}x{}, {} sprites, cell width {})",
            output_path.display(),
            packed.image.width(),
            packed.image.height(),
            packed.placements.len(),
            packed.cell_width
        );
    }

    ExitCode::from(EXIT_SUCCESS)
}

fn print_summary_json(packed: &PackedSheet, output: &str) {
    let summary = ProcessSummary {
        output: output.to_string(),
        cell_width: packed.cell_width,
        sections: packed.sections,
        untrimmed: [packed.untrimmed_size.0, packed.untrimmed_size.1],
        size: [packed.image.width(), packed.image.height()],
        placements: &packed.placements,
    };
    match serde_json::to_string_pretty(&summary) {
        Ok(text) => println!("{}", text),
        Err(e) => eprintln!("Error: {}", e),
    }
}
