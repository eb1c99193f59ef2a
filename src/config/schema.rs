//! Configuration schema types for `regrid.toml`
//!
//! Defines the structure and validation rules for sheet processing settings.

use serde::{Deserialize, Serialize};

use crate::guides::{GridConfig, GuidePositions};
use crate::trim::default_margin;

/// Grid layout section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridSection {
    /// Row height; also the default spacing between guides
    #[serde(default = "default_sprite_height")]
    pub sprite_height: u32,
    /// Number of interior guides
    #[serde(default = "default_count")]
    pub columns: u32,
    /// Number of rows scanned
    #[serde(default = "default_count")]
    pub rows: u32,
    /// Resize every sprite to `sprite_height x sprite_height` before packing
    #[serde(default)]
    pub resize_sprites: bool,
}

impl Default for GridSection {
    fn default() -> Self {
        Self {
            sprite_height: default_sprite_height(),
            columns: default_count(),
            rows: default_count(),
            resize_sprites: false,
        }
    }
}

fn default_sprite_height() -> u32 {
    64
}

fn default_count() -> u32 {
    4
}

/// Explicit guide placement
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GuidesSection {
    /// Guide x positions; evenly spaced defaults are used when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub positions: Option<Vec<u32>>,
}

/// Trimming of the packed output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrimSection {
    /// Trim the transparent border after packing
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Horizontal margin kept around the opaque area (default: half the sprite height)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin: Option<u32>,
}

impl Default for TrimSection {
    fn default() -> Self {
        Self { enabled: true, margin: None }
    }
}

fn default_true() -> bool {
    true
}

/// Root configuration structure for `regrid.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegridConfig {
    #[serde(default)]
    pub grid: GridSection,
    #[serde(default)]
    pub guides: GuidesSection,
    #[serde(default)]
    pub trim: TrimSection,
}

/// Validation error for configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "grid.sprite_height")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "regrid.toml: '{}' {}", self.field, self.message)
    }
}

impl RegridConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        for (field, value) in [
            ("grid.sprite_height", self.grid.sprite_height),
            ("grid.columns", self.grid.columns),
            ("grid.rows", self.grid.rows),
        ] {
            if value == 0 {
                errors.push(ConfigValidationError {
                    field: field.to_string(),
                    message: "must be a positive integer".to_string(),
                });
            }
        }

        for (field, value) in [("grid.columns", self.grid.columns), ("grid.rows", self.grid.rows)] {
            if self.grid.sprite_height.checked_mul(value).is_none() {
                errors.push(ConfigValidationError {
                    field: field.to_string(),
                    message: format!("times grid.sprite_height exceeds {} pixels", u32::MAX),
                });
            }
        }

        if let Some(ref positions) = self.guides.positions {
            if positions.len() != self.grid.columns as usize {
                errors.push(ConfigValidationError {
                    field: "guides.positions".to_string(),
                    message: format!(
                        "has {} entries but grid.columns is {}",
                        positions.len(),
                        self.grid.columns
                    ),
                });
            }
        }

        errors
    }

    /// Grid settings as the processing core sees them.
    pub fn grid_config(&self) -> GridConfig {
        GridConfig {
            sprite_height: self.grid.sprite_height,
            num_columns: self.grid.columns,
            num_rows: self.grid.rows,
            resize_sprites: self.grid.resize_sprites,
        }
    }

    /// Configured guides, or evenly spaced defaults.
    pub fn guide_positions(&self) -> GuidePositions {
        match self.guides.positions {
            Some(ref positions) => GuidePositions::new(positions.clone()),
            None => GuidePositions::evenly_spaced(self.grid.sprite_height, self.grid.columns),
        }
    }

    /// Trim margin, falling back to half the sprite height.
    pub fn trim_margin(&self) -> u32 {
        self.trim.margin.unwrap_or_else(|| default_margin(self.grid.sprite_height))
    }
}
