//! Top-level error type for processing requests

use thiserror::Error;

use crate::config::ConfigError;
use crate::guides::GridConfigError;
use crate::output::OutputError;

/// Anything that stops a processing request.
///
/// Empty sections and fully transparent sheets are not errors; they surface
/// as `None` from extraction and as fallbacks in width resolution.
#[derive(Debug, Error)]
pub enum RegridError {
    /// Grid settings were malformed
    #[error("Invalid grid settings: {0}")]
    Grid(#[from] GridConfigError),
    /// Loading or saving an image failed
    #[error(transparent)]
    Output(#[from] OutputError),
    /// The configuration file could not be used
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Processing was requested before any sheet was loaded
    #[error("No sprite sheet loaded")]
    NoImage,
}

impl RegridError {
    /// Whether the error stems from user-supplied settings rather than I/O.
    pub fn is_config_error(&self) -> bool {
        matches!(self, RegridError::Grid(_) | RegridError::Config(_))
    }
}
