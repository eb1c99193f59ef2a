//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod guides;
mod preview;
mod process;
mod slice;

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config::{resolve_config, CliOverrides, RegridConfig};

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Spriteregrid - repack a sprite sheet into a uniform grid
#[derive(Parser)]
#[command(name = "sregrid")]
#[command(about = "Spriteregrid - detect sprites between column guides and repack them into a uniform grid")]
#[command(version)]
pub struct Cli {
    /// Log pipeline details to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Grid settings shared by every sheet command
#[derive(Args, Debug, Clone, Default)]
pub struct GridArgs {
    /// Path to regrid.toml (default: discovered from the current directory)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Row height in pixels; also the default guide spacing
    #[arg(long)]
    pub height: Option<u32>,

    /// Number of column guides
    #[arg(long)]
    pub columns: Option<u32>,

    /// Number of rows to scan
    #[arg(long)]
    pub rows: Option<u32>,

    /// Explicit guide positions, comma separated (e.g. "64,128,192")
    #[arg(long, value_delimiter = ',')]
    pub guides: Option<Vec<u32>>,
}

impl GridArgs {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            sprite_height: self.height,
            columns: self.columns,
            rows: self.rows,
            guides: self.guides.clone(),
            ..Default::default()
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Repack a sprite sheet into uniform cells and save it as PNG
    Process {
        /// Input sprite sheet (any format the image decoder supports)
        input: PathBuf,

        /// Output PNG (default: {input}_packed.png)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        grid: GridArgs,

        /// Resize every sprite to height x height before packing
        #[arg(long)]
        resize: bool,

        /// Keep the full canvas instead of trimming the transparent border
        #[arg(long)]
        no_trim: bool,

        /// Horizontal margin kept when trimming (default: half the row height)
        #[arg(long)]
        margin: Option<u32>,

        /// Also write the original stacked above the result to this path
        #[arg(long)]
        preview: Option<PathBuf>,

        /// Print a JSON summary of the placements to stdout
        #[arg(long)]
        json: bool,
    },
    /// List sections and detected sprite bounds without writing an image
    Guides {
        /// Input sprite sheet
        input: PathBuf,

        #[command(flatten)]
        grid: GridArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Cut the sheet into equal square cells
    Slice {
        /// Input sprite sheet
        input: PathBuf,

        /// Cell size in pixels (default: configured row height)
        #[arg(long)]
        size: Option<u32>,

        /// Output directory (default: next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Path to regrid.toml
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Render the sheet with its column guides drawn in
    Preview {
        /// Input sprite sheet
        input: PathBuf,

        /// Output PNG (default: {input}_guides.png)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        grid: GridArgs,
    },
}

/// Initialise logging: warnings by default, debug with `--verbose`.
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .try_init();
}

/// Load regrid.toml and apply command-line overrides, reporting failures.
pub(crate) fn load_settings(
    path: Option<&Path>,
    overrides: &CliOverrides,
) -> Result<RegridConfig, ExitCode> {
    resolve_config(path, overrides).map_err(|e| {
        eprintln!("Error: {}", e);
        ExitCode::from(EXIT_INVALID_ARGS)
    })
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Process { input, output, grid, resize, no_trim, margin, preview, json } => {
            let mut overrides = grid.overrides();
            if resize {
                overrides.resize_sprites = Some(true);
            }
            if no_trim {
                overrides.trim = Some(false);
            }
            overrides.margin = margin;
            process::run_process(
                &input,
                output.as_deref(),
                grid.config.as_deref(),
                &overrides,
                preview.as_deref(),
                json,
            )
        }
        Commands::Guides { input, grid, json } => {
            guides::run_guides(&input, grid.config.as_deref(), &grid.overrides(), json)
        }
        Commands::Slice { input, size, output, config } => {
            slice::run_slice(&input, size, output.as_deref(), config.as_deref())
        }
        Commands::Preview { input, output, grid } => preview::run_preview(
            &input,
            output.as_deref(),
            grid.config.as_deref(),
            &grid.overrides(),
        ),
    }
}
