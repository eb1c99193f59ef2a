//! CLI dispatch for the `sregrid guides` command.
//!
//! Read-only: shows how the current guides cut each row and what the
//! extractor finds in every section.

use std::path::Path;
use std::process::ExitCode;

use image::RgbaImage;
use serde::Serialize;

use crate::config::CliOverrides;
use crate::extract::extract_section;
use crate::guides::{GridConfig, GuidePositions};
use crate::output::load_image;
use crate::resolve::resolve_max_width;

use super::{load_settings, EXIT_ERROR, EXIT_SUCCESS};

/// What one section of one row holds.
#[derive(Debug, Serialize, PartialEq)]
struct SectionReport {
    row: u32,
    section: usize,
    start_x: u32,
    end_x: u32,
    /// `[start, end)` of the sprite on the sheet, if any
    sprite: Option<[u32; 2]>,
}

#[derive(Serialize)]
struct GuidesReport {
    width: u32,
    height: u32,
    guides: Vec<u32>,
    boundaries: Vec<u32>,
    cell_width: u32,
    sections: Vec<SectionReport>,
}

fn build_report(source: &RgbaImage, guides: &GuidePositions, grid: &GridConfig) -> GuidesReport {
    let mut sections = Vec::new();
    for row in 0..grid.num_rows {
        for section in guides.sections(source.width()) {
            let sprite = extract_section(source, &section, row, grid.sprite_height).map(|s| {
                let start = section.start_x + s.offset_x;
                [start, start + s.width]
            });
            sections.push(SectionReport {
                row,
                section: section.index,
                start_x: section.start_x,
                end_x: section.end_x,
                sprite,
            });
        }
    }

    GuidesReport {
        width: source.width(),
        height: source.height(),
        guides: guides.as_slice().to_vec(),
        boundaries: guides.boundaries(source.width()),
        cell_width: resolve_max_width(
            source,
            guides,
            grid.num_rows,
            grid.sprite_height,
            grid.sprite_height,
        ),
        sections,
    }
}

/// Execute the guides command.
pub fn run_guides(
    input: &Path,
    config_path: Option<&Path>,
    overrides: &CliOverrides,
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

    let report = build_report(&source, &config.guide_positions(), &config.grid_config());

    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
    } else {
        print_report_text(&report);
    }

    ExitCode::from(EXIT_SUCCESS)
}

fn print_report_text(report: &GuidesReport) {
    println!("Sheet: {}x{}", report.width, report.height);
    println!(
        "Guides: {}",
        report.guides.iter().map(|g| g.to_string()).collect::<Vec<_>>().join(", ")
    );
    println!("Cell width: {}", report.cell_width);
    for s in &report.sections {
        match s.sprite {
            Some([start, end]) => println!(
                "  row {} section {} [{}..{}): sprite {}..{} ({} px)",
                s.row,
                s.section,
                s.start_x,
                s.end_x,
                start,
                end,
                end - start
            ),
            None => {
                println!("  row {} section {} [{}..{}): empty", s.row, s.section, s.start_x, s.end_x)
            }
        }
    }
}
