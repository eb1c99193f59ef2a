//! Editor session - the state an interactive front end keeps between actions
//!
//! A GUI owns one `EditorSession`: it feeds text entries into
//! [`EditorSession::apply_entries`], forwards canvas drag events to the
//! guides, and calls [`EditorSession::process`] when the user asks for the
//! packed sheet. Failed requests leave the session exactly as it was.

use std::path::{Path, PathBuf};

use image::RgbaImage;
use log::debug;

use crate::error::RegridError;
use crate::guides::{GridConfig, GuideDrag, GuidePositions};
use crate::output::load_image;
use crate::pipeline::{process_with, PackedSheet, ProcessOptions, TrimMode};
use crate::preview::{draw_guides, GUIDE_COLOR};
use crate::slice::slice_uniform;

/// Loaded sheet plus the grid and guide state around it.
#[derive(Debug, Default)]
pub struct EditorSession {
    source_path: Option<PathBuf>,
    original: Option<RgbaImage>,
    config: GridConfig,
    guides: GuidePositions,
    drag: GuideDrag,
    trim: Option<TrimMode>,
    last_output: Option<PackedSheet>,
}

impl EditorSession {
    /// Start a session with evenly spaced guides for `config`.
    pub fn new(config: GridConfig) -> Self {
        Self {
            guides: GuidePositions::evenly_spaced(config.sprite_height, config.num_columns),
            config,
            ..Default::default()
        }
    }

    /// Start a session with explicit guides (e.g. from a config file).
    pub fn with_guides(config: GridConfig, guides: GuidePositions) -> Self {
        Self { config, guides, ..Default::default() }
    }

    /// Override the trim applied by [`process`](Self::process).
    ///
    /// When unset, the margin is half the current sprite height.
    pub fn set_trim(&mut self, trim: TrimMode) {
        self.trim = Some(trim);
    }

    /// Load a sheet from disk. The previous sheet is kept on failure.
    pub fn load(&mut self, path: &Path) -> Result<(), RegridError> {
        let image = load_image(path)?;
        debug!("loaded {} ({}x{})", path.display(), image.width(), image.height());
        self.set_image(image);
        self.source_path = Some(path.to_path_buf());
        Ok(())
    }

    /// Replace the sheet with an in-memory image.
    pub fn set_image(&mut self, image: RgbaImage) {
        self.original = Some(image);
        self.source_path = None;
        self.last_output = None;
    }

    pub fn image(&self) -> Option<&RgbaImage> {
        self.original.as_ref()
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn guides(&self) -> &GuidePositions {
        &self.guides
    }

    /// Live guides for the drag collaborator.
    pub fn guides_mut(&mut self) -> &mut GuidePositions {
        &mut self.guides
    }

    /// Press on the canvas: start dragging the guide near `x`, if any.
    pub fn press(&mut self, x: u32, tolerance: u32) -> Option<usize> {
        let index = self.guides.guide_near(x, tolerance)?;
        self.drag.begin(index);
        Some(index)
    }

    /// Pointer motion while a guide is held.
    pub fn motion(&mut self, x: i64) -> Option<u32> {
        self.drag.drag_to(&mut self.guides, x)
    }

    /// Pointer release.
    pub fn release(&mut self) {
        self.drag.end();
    }

    /// Apply the raw sprite height, column, and row entries.
    ///
    /// Guides are regenerated only when the column count changes. On a
    /// malformed entry nothing is modified. Returns whether guides were
    /// regenerated.
    pub fn apply_entries(
        &mut self,
        sprite_height: &str,
        num_columns: &str,
        num_rows: &str,
    ) -> Result<bool, RegridError> {
        let parsed = GridConfig::from_entries(sprite_height, num_columns, num_rows)?;
        self.config = parsed.with_resize(self.config.resize_sprites);
        Ok(self.guides.sync_to_columns(&self.config))
    }

    pub fn set_resize_sprites(&mut self, resize: bool) {
        self.config.resize_sprites = resize;
    }

    /// The sheet with guide lines drawn over it, if a sheet is loaded.
    pub fn guide_overlay(&self) -> Option<RgbaImage> {
        let image = self.original.as_ref()?;
        let line_height = self.config.sprite_height.saturating_mul(self.config.num_rows);
        Some(draw_guides(image, &self.guides, line_height, GUIDE_COLOR))
    }

    /// Square cells of `sprite_height`, row-major.
    pub fn uniform_cells(&self) -> Vec<Vec<RgbaImage>> {
        match self.original {
            Some(ref image) => slice_uniform(image, self.config.sprite_height),
            None => Vec::new(),
        }
    }

    /// Run the full pipeline on the loaded sheet.
    ///
    /// The result is kept as [`last_output`](Self::last_output) on success;
    /// on failure the previous output stays in place.
    pub fn process(&mut self) -> Result<&PackedSheet, RegridError> {
        let image = self.original.as_ref().ok_or(RegridError::NoImage)?;
        let options = match self.trim {
            Some(trim) => ProcessOptions { trim },
            None => ProcessOptions::for_grid(&self.config),
        };
        let packed = process_with(image, &self.guides, &self.config, &options)?;
        Ok(&*self.last_output.insert(packed))
    }

    pub fn last_output(&self) -> Option<&PackedSheet> {
        self.last_output.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn sheet() -> RgbaImage {
        let mut image = RgbaImage::new(128, 64);
        for y in 10..50 {
            for x in 20..40 {
                image.put_pixel(x, y, Rgba([0, 0, 0, 255]));
            }
        }
        image
    }

    #[test]
    fn test_new_session_has_default_guides() {
        let session = EditorSession::new(GridConfig::default());
        assert_eq!(session.guides().as_slice(), &[0, 64, 128, 192]);
        assert!(session.image().is_none());
    }

    #[test]
    fn test_process_without_image() {
        let mut session = EditorSession::new(GridConfig::default());
        assert!(matches!(session.process(), Err(RegridError::NoImage)));
    }

    #[test]
    fn test_apply_entries_regenerates_on_count_change() {
        let mut session = EditorSession::new(GridConfig::default());
        session.guides_mut().set(1, 80);

        assert!(!session.apply_entries("64", "4", "4").unwrap());
        assert_eq!(session.guides().as_slice(), &[0, 80, 128, 192]);

        assert!(session.apply_entries("64", "6", "4").unwrap());
        assert_eq!(session.guides().as_slice(), &[0, 64, 128, 192, 256, 320]);
    }

    #[test]
    fn test_apply_entries_error_leaves_state() {
        let mut session = EditorSession::new(GridConfig::default());
        session.set_resize_sprites(true);
        session.guides_mut().set(0, 5);

        let err = session.apply_entries("abc", "2", "2").unwrap_err();
        assert!(err.is_config_error());
        assert_eq!(session.config().sprite_height, 64);
        assert_eq!(session.config().num_columns, 4);
        assert_eq!(session.guides().as_slice(), &[5, 64, 128, 192]);

        session.apply_entries("32", "4", "1").unwrap();
        assert!(session.config().resize_sprites, "resize flag survives entry changes");
    }

    #[test]
    fn test_press_motion_release() {
        let mut session = EditorSession::new(GridConfig { num_columns: 2, ..Default::default() });
        assert_eq!(session.press(62, 4), Some(1));
        assert_eq!(session.motion(70), Some(70));
        assert_eq!(session.motion(-1), None);
        session.release();
        assert_eq!(session.motion(90), None);
        assert_eq!(session.guides().as_slice(), &[0, 70]);
        assert_eq!(session.press(30, 4), None);
    }

    #[test]
    fn test_process_keeps_last_output() {
        let config = GridConfig::new(64, 1, 1).unwrap();
        let mut session = EditorSession::with_guides(config, GuidePositions::new(vec![64]));
        session.set_image(sheet());

        let width = session.process().unwrap().cell_width;
        assert_eq!(width, 64);
        assert!(session.last_output().is_some());

        // A failing request keeps the previous output
        session.config = GridConfig { num_rows: 0, ..config };
        assert!(session.process().is_err());
        assert!(session.last_output().is_some());
    }

    #[test]
    fn test_trim_override() {
        let config = GridConfig::new(64, 1, 1).unwrap();
        let mut session = EditorSession::with_guides(config, GuidePositions::new(vec![64]));
        session.set_image(sheet());
        session.set_trim(TrimMode::Disabled);

        let packed = session.process().unwrap();
        assert_eq!(packed.image.dimensions(), (128, 64));
    }

    #[test]
    fn test_guide_overlay_and_cells() {
        let mut session = EditorSession::new(GridConfig { num_columns: 2, num_rows: 1, ..Default::default() });
        assert!(session.guide_overlay().is_none());
        session.set_image(sheet());

        let overlay = session.guide_overlay().unwrap();
        assert_eq!(*overlay.get_pixel(64, 63), GUIDE_COLOR);

        let cells = session.uniform_cells();
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].len(), 2);
    }
}
