//! Spriteregrid - Library for repacking sprite sheets into uniform grids
//!
//! This library provides functionality to:
//! - Find each sprite's opaque horizontal extent between column guides
//! - Resolve a shared cell width across every row and section
//! - Repack sprites centred in fixed-width cells and trim the result
//! - Keep editor state (grid entries, draggable guides) for interactive front ends

pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod guides;
pub mod output;
pub mod pipeline;
pub mod preview;
pub mod repack;
pub mod resolve;
pub mod scan;
pub mod session;
pub mod slice;
pub mod trim;

pub use error::RegridError;
pub use guides::{GridConfig, GuidePositions};
pub use pipeline::{process, process_with, PackedSheet};
