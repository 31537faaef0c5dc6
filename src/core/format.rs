use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::ScanError;

/// Logical grid description of a card, independent of any image.
///
/// Margins and spacing are expressed in reference units: the card's physical
/// width spans `reference_width` units and its height `reference_height`
/// units, whatever the pixel size of the photo.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CardFormat {
    pub columns: usize,
    pub rows: usize,
    pub reference_width: f64,
    pub reference_height: f64,
    pub top_margin: f64,
    pub left_margin: f64,
    pub columns_spacing: f64,
    pub rows_spacing: f64,
    /// Gray level in `[0, 1]` below which a sample counts as a hole.
    pub threshold: f64,
    /// Side of the square averaging window; unset means single-pixel sampling.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_radius: Option<u32>,
    /// Emit exported row bit strings right-to-left.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reverse: Option<bool>,
}

/// How a single grid cell is read from the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleStrategy {
    /// The pixel under the truncated coordinate.
    Point,
    /// Mean gray over an `n x n` block anchored at the coordinate.
    Box(u32),
}

/// Upper bound on `columns * rows`; real cards stay far below it.
pub const MAX_GRID_CELLS: usize = 1 << 16;

impl CardFormat {
    /// Check the invariants every sampling pass relies on.
    pub fn validate(&self) -> Result<(), ScanError> {
        if self.columns == 0 || self.rows == 0 {
            return Err(ScanError::InvalidFormat(format!(
                "grid must have at least one column and row (got {}x{})",
                self.columns, self.rows
            )));
        }
        let cells = self.columns.checked_mul(self.rows);
        if cells.is_none_or(|cells| cells > MAX_GRID_CELLS) {
            return Err(ScanError::InvalidFormat(format!(
                "grid {}x{} exceeds {MAX_GRID_CELLS} cells",
                self.columns, self.rows
            )));
        }
        for (name, value) in [
            ("reference_width", self.reference_width),
            ("reference_height", self.reference_height),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ScanError::InvalidFormat(format!(
                    "{name} must be a positive number (got {value})"
                )));
            }
        }
        for (name, value) in [
            ("top_margin", self.top_margin),
            ("left_margin", self.left_margin),
            ("columns_spacing", self.columns_spacing),
            ("rows_spacing", self.rows_spacing),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ScanError::InvalidFormat(format!(
                    "{name} must be non-negative (got {value})"
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(ScanError::InvalidFormat(format!(
                "threshold must lie in [0, 1] (got {})",
                self.threshold
            )));
        }
        if self.sample_radius == Some(0) {
            return Err(ScanError::InvalidFormat(
                "sample_radius must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn strategy(&self) -> SampleStrategy {
        match self.sample_radius {
            None | Some(0) | Some(1) => SampleStrategy::Point,
            Some(n) => SampleStrategy::Box(n),
        }
    }

    pub fn is_reversed(&self) -> bool {
        self.reverse.unwrap_or(false)
    }

    /// Read a standalone format record (the `format` object of a deck file).
    pub fn load(path: &Path) -> Result<Self, ScanError> {
        let raw = fs::read_to_string(path).map_err(|source| ScanError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let format: CardFormat =
            serde_json::from_str(&raw).map_err(|source| ScanError::FormatRecord {
                path: path.to_path_buf(),
                source,
            })?;
        format.validate()?;
        Ok(format)
    }
}
