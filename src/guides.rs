//! Column guides and grid configuration
//!
//! Guides are vertical lines the artist drags across the sheet. Together with
//! the implicit edges `0` and `image_width` they cut every row into sections,
//! each of which is expected to hold at most one sprite.

use thiserror::Error;

/// Error raised when grid settings are malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridConfigError {
    /// A text entry could not be parsed as an integer
    #[error("{field} must be a whole number, got '{value}'")]
    NotAnInteger { field: &'static str, value: String },
    /// A value parsed but is zero or negative
    #[error("{field} must be greater than zero")]
    NonPositive { field: &'static str },
    /// The grid it describes does not fit in 32-bit pixel coordinates
    #[error("{field} times sprite height exceeds {max} pixels")]
    TooLarge { field: &'static str, max: u32 },
}

/// Row height, guide count, row count, and the sprite sizing policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridConfig {
    /// Height of one row; also the default spacing between guides
    pub sprite_height: u32,
    /// Number of interior guides
    pub num_columns: u32,
    /// Number of rows scanned from the top of the sheet
    pub num_rows: u32,
    /// Force every extracted sprite to `sprite_height x sprite_height` before packing
    pub resize_sprites: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { sprite_height: 64, num_columns: 4, num_rows: 4, resize_sprites: false }
    }
}

impl GridConfig {
    /// Build a config, rejecting zero values.
    pub fn new(sprite_height: u32, num_columns: u32, num_rows: u32) -> Result<Self, GridConfigError> {
        let config = Self { sprite_height, num_columns, num_rows, resize_sprites: false };
        config.validate()?;
        Ok(config)
    }

    /// Parse the three raw text entries an editor exposes.
    ///
    /// Surrounding whitespace is ignored. Negative numbers parse but are
    /// reported as [`GridConfigError::NonPositive`].
    pub fn from_entries(
        sprite_height: &str,
        num_columns: &str,
        num_rows: &str,
    ) -> Result<Self, GridConfigError> {
        Self::new(
            parse_entry("sprite height", sprite_height)?,
            parse_entry("number of columns", num_columns)?,
            parse_entry("number of rows", num_rows)?,
        )
    }

    /// Builder-style toggle for the fixed sprite size policy.
    pub fn with_resize(mut self, resize_sprites: bool) -> Self {
        self.resize_sprites = resize_sprites;
        self
    }

    /// Check that every dimension is positive and the grid fits in `u32` pixels.
    pub fn validate(&self) -> Result<(), GridConfigError> {
        if self.sprite_height == 0 {
            return Err(GridConfigError::NonPositive { field: "sprite height" });
        }
        if self.num_columns == 0 {
            return Err(GridConfigError::NonPositive { field: "number of columns" });
        }
        if self.num_rows == 0 {
            return Err(GridConfigError::NonPositive { field: "number of rows" });
        }
        if self.sprite_height.checked_mul(self.num_columns).is_none() {
            return Err(GridConfigError::TooLarge { field: "number of columns", max: u32::MAX });
        }
        if self.sprite_height.checked_mul(self.num_rows).is_none() {
            return Err(GridConfigError::TooLarge { field: "number of rows", max: u32::MAX });
        }
        Ok(())
    }
}

fn parse_entry(field: &'static str, raw: &str) -> Result<u32, GridConfigError> {
    let trimmed = raw.trim();
    let value: i64 = trimmed
        .parse()
        .map_err(|_| GridConfigError::NotAnInteger { field, value: trimmed.to_string() })?;
    if value <= 0 {
        return Err(GridConfigError::NonPositive { field });
    }
    u32::try_from(value).map_err(|_| GridConfigError::NotAnInteger { field, value: trimmed.to_string() })
}

/// One section of one row: the slice the scanner searches for a sprite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    /// Position of the section within its row, left to right
    pub index: usize,
    pub start_x: u32,
    pub end_x: u32,
}

impl Section {
    /// Width between the two boundaries (zero when they coincide or cross).
    pub fn width(&self) -> u32 {
        self.end_x.saturating_sub(self.start_x)
    }
}

/// Horizontal guide positions, in the order the user placed them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuidePositions {
    positions: Vec<u32>,
}

impl GuidePositions {
    pub fn new(positions: Vec<u32>) -> Self {
        Self { positions }
    }

    /// Default layout: guide `i` sits at `sprite_height * i`.
    ///
    /// Positions saturate at `u32::MAX`.
    ///
    /// ```
    /// use spriteregrid::guides::GuidePositions;
    ///
    /// let guides = GuidePositions::evenly_spaced(64, 4);
    /// assert_eq!(guides.as_slice(), &[0, 64, 128, 192]);
    /// ```
    pub fn evenly_spaced(sprite_height: u32, num_columns: u32) -> Self {
        Self { positions: (0..num_columns).map(|i| sprite_height.saturating_mul(i)).collect() }
    }

    /// Bring the guides in line with `config.num_columns`.
    ///
    /// Guides are regenerated from scratch only when the count differs;
    /// otherwise any dragged positions are kept. Returns whether a
    /// regeneration happened.
    pub fn sync_to_columns(&mut self, config: &GridConfig) -> bool {
        if self.positions.len() == config.num_columns as usize {
            return false;
        }
        *self = Self::evenly_spaced(config.sprite_height, config.num_columns);
        true
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.positions
    }

    pub fn get(&self, index: usize) -> Option<u32> {
        self.positions.get(index).copied()
    }

    /// Move one guide. Returns `false` if the index is out of range.
    pub fn set(&mut self, index: usize, x: u32) -> bool {
        match self.positions.get_mut(index) {
            Some(slot) => {
                *slot = x;
                true
            }
            None => false,
        }
    }

    /// Number of sections each row is split into.
    pub fn section_count(&self) -> usize {
        self.positions.len() + 1
    }

    /// Sorted guides with `0` prepended and `image_width` appended.
    ///
    /// ```
    /// use spriteregrid::guides::GuidePositions;
    ///
    /// let guides = GuidePositions::new(vec![128, 64]);
    /// assert_eq!(guides.boundaries(200), vec![0, 64, 128, 200]);
    /// ```
    pub fn boundaries(&self, image_width: u32) -> Vec<u32> {
        let mut sorted = self.positions.clone();
        sorted.sort_unstable();

        let mut boundaries = Vec::with_capacity(sorted.len() + 2);
        boundaries.push(0);
        boundaries.extend(sorted);
        boundaries.push(image_width);
        boundaries
    }

    /// Adjacent boundary pairs, one [`Section`] per pair.
    pub fn sections(&self, image_width: u32) -> Vec<Section> {
        self.boundaries(image_width)
            .windows(2)
            .enumerate()
            .map(|(index, pair)| Section { index, start_x: pair[0], end_x: pair[1] })
            .collect()
    }

    /// Index of the guide closest to `x`, if one lies within `tolerance` pixels.
    pub fn guide_near(&self, x: u32, tolerance: u32) -> Option<usize> {
        self.positions
            .iter()
            .enumerate()
            .map(|(i, &g)| (i, g.abs_diff(x)))
            .filter(|&(_, distance)| distance <= tolerance)
            .min_by_key(|&(_, distance)| distance)
            .map(|(i, _)| i)
    }
}

/// Drag state for one guide at a time.
///
/// Mirrors press / motion / release events from an interactive canvas.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GuideDrag {
    active: Option<usize>,
}

impl GuideDrag {
    /// Start dragging the guide at `index`.
    pub fn begin(&mut self, index: usize) {
        self.active = Some(index);
    }

    /// Move the active guide to `x`.
    ///
    /// Negative positions are ignored and the guide stays where it was.
    /// Returns the new position when the guide actually moved.
    pub fn drag_to(&mut self, guides: &mut GuidePositions, x: i64) -> Option<u32> {
        let index = self.active?;
        let x = u32::try_from(x).ok()?;
        guides.set(index, x).then_some(x)
    }

    /// Release the active guide.
    pub fn end(&mut self) {
        self.active = None;
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }
}
