//! Configuration loading and discovery for `regrid.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::RegridConfig;
use log::debug;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the configuration file searched for
pub const CONFIG_FILE_NAME: &str = "regrid.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse regrid.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override row height
    pub sprite_height: Option<u32>,
    /// Override interior guide count
    pub columns: Option<u32>,
    /// Override scanned row count
    pub rows: Option<u32>,
    /// Explicit guide positions
    pub guides: Option<Vec<u32>>,
    /// Force fixed sprite size
    pub resize_sprites: Option<bool>,
    /// Enable or disable trimming
    pub trim: Option<bool>,
    /// Override trim margin
    pub margin: Option<u32>,
}

/// Find regrid.toml by walking up from the current working directory.
///
/// Search order:
/// 1. Walk up from current directory looking for regrid.toml
/// 2. Check XDG_CONFIG_HOME/spriteregrid/regrid.toml (or ~/.config/spriteregrid/regrid.toml)
pub fn find_config() -> Option<PathBuf> {
    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_config_from(cwd) {
            return Some(path);
        }
    }

    find_xdg_config()
}

/// Find regrid.toml in the XDG config directory.
pub fn find_xdg_config() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    let config_path = xdg_config.join("spriteregrid").join(CONFIG_FILE_NAME);
    if config_path.exists() {
        Some(config_path)
    } else {
        None
    }
}

/// Find regrid.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from a regrid.toml file.
///
/// If a path is provided, loads from that file. Otherwise, uses `find_config()`
/// to locate the config file. If no config file is found, returns the default
/// configuration.
///
/// # Example
/// ```ignore
/// let config = load_config(Some(Path::new("art/regrid.toml")))?;
/// ```
pub fn load_config(path: Option<&Path>) -> Result<RegridConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => {
            debug!("loading config from {}", p.display());
            load_config_file(&p)
        }
        None => Ok(RegridConfig::default()),
    }
}

/// Load configuration from a specific file path.
fn load_config_file(path: &Path) -> Result<RegridConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: RegridConfig = toml::from_str(&contents)?;
    validated(config)
}

fn validated(config: RegridConfig) -> Result<RegridConfig, ConfigError> {
    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }
    Ok(config)
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values. Explicit guides
/// set the column count to match. A column count that no longer matches the
/// configured guides drops them, so evenly spaced defaults are regenerated.
pub fn merge_cli_overrides(config: &mut RegridConfig, overrides: &CliOverrides) {
    if let Some(sprite_height) = overrides.sprite_height {
        config.grid.sprite_height = sprite_height;
    }

    if let Some(rows) = overrides.rows {
        config.grid.rows = rows;
    }

    if let Some(columns) = overrides.columns {
        config.grid.columns = columns;
    }

    if let Some(ref guides) = overrides.guides {
        config.guides.positions = Some(guides.clone());
        if overrides.columns.is_none() {
            config.grid.columns = guides.len() as u32;
        }
    }

    let stale = config
        .guides
        .positions
        .as_ref()
        .is_some_and(|p| p.len() != config.grid.columns as usize);
    if stale && overrides.guides.is_none() {
        config.guides.positions = None;
    }

    if let Some(resize) = overrides.resize_sprites {
        config.grid.resize_sprites = resize;
    }

    if let Some(trim) = overrides.trim {
        config.trim.enabled = trim;
    }

    if let Some(margin) = overrides.margin {
        config.trim.margin = Some(margin);
    }
}

/// Load the configuration and apply CLI overrides, validating the result.
pub fn resolve_config(
    path: Option<&Path>,
    overrides: &CliOverrides,
) -> Result<RegridConfig, ConfigError> {
    let mut config = load_config(path)?;
    merge_cli_overrides(&mut config, overrides);
    validated(config)
}
