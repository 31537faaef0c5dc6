//! Shared clap helper types for CLI commands.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use punchscan::{CardFormat, CardGeometry, PresetRegistry};

/// Where a command takes its starting card format from.
#[derive(Args, Debug, Clone)]
pub struct FormatSourceArgs {
    /// Named format preset (see `punchscan preset list`).
    #[arg(long, conflicts_with = "format_file")]
    pub preset: Option<String>,
    /// JSON file holding a single card format record.
    #[arg(long = "format-file")]
    pub format_file: Option<PathBuf>,
}

impl FormatSourceArgs {
    /// Resolve to a format, falling back to the default preset.
    pub fn resolve(&self) -> Result<CardFormat> {
        if let Some(path) = &self.format_file {
            return CardFormat::load(path)
                .with_context(|| format!("failed to load card format {}", path.display()));
        }
        let name = self.preset.as_deref().unwrap_or(PresetRegistry::DEFAULT);
        let preset = PresetRegistry::get(name)?;
        Ok(preset.format())
    }

    pub fn is_set(&self) -> bool {
        self.preset.is_some() || self.format_file.is_some()
    }
}

/// Card rectangle edges in image pixels. Unset edges keep their value.
#[derive(Args, Debug, Clone, Default)]
pub struct GeometryArgs {
    #[arg(long, allow_negative_numbers = true)]
    pub top: Option<i32>,
    #[arg(long, allow_negative_numbers = true)]
    pub left: Option<i32>,
    #[arg(long, allow_negative_numbers = true)]
    pub right: Option<i32>,
    #[arg(long, allow_negative_numbers = true)]
    pub bottom: Option<i32>,
}

impl GeometryArgs {
    pub fn apply(&self, geometry: &mut CardGeometry) {
        if let Some(top) = self.top {
            geometry.top = top;
        }
        if let Some(left) = self.left {
            geometry.left = left;
        }
        if let Some(right) = self.right {
            geometry.right = right;
        }
        if let Some(bottom) = self.bottom {
            geometry.bottom = bottom;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.top.is_none() && self.left.is_none() && self.right.is_none() && self.bottom.is_none()
    }
}

/// Per-field card format overrides.
#[derive(Args, Debug, Clone, Default)]
pub struct FormatOverrideArgs {
    #[arg(long)]
    pub columns: Option<usize>,
    #[arg(long)]
    pub rows: Option<usize>,
    #[arg(long = "reference-width")]
    pub reference_width: Option<f64>,
    #[arg(long = "reference-height")]
    pub reference_height: Option<f64>,
    #[arg(long = "top-margin")]
    pub top_margin: Option<f64>,
    #[arg(long = "left-margin")]
    pub left_margin: Option<f64>,
    #[arg(long = "columns-spacing")]
    pub columns_spacing: Option<f64>,
    #[arg(long = "rows-spacing")]
    pub rows_spacing: Option<f64>,
    /// Gray level in [0, 1] below which a cell is a hole.
    #[arg(long)]
    pub threshold: Option<f64>,
    /// Average an N x N block per cell instead of a single pixel.
    #[arg(long = "sample-radius")]
    pub sample_radius: Option<u32>,
    /// Export row bit strings right-to-left.
    #[arg(long)]
    pub reverse: Option<bool>,
}

impl FormatOverrideArgs {
    /// Apply overrides and check the result is still a usable format.
    pub fn apply(&self, format: &mut CardFormat) -> Result<()> {
        if let Some(value) = self.columns {
            format.columns = value;
        }
        if let Some(value) = self.rows {
            format.rows = value;
        }
        if let Some(value) = self.reference_width {
            format.reference_width = value;
        }
        if let Some(value) = self.reference_height {
            format.reference_height = value;
        }
        if let Some(value) = self.top_margin {
            format.top_margin = value;
        }
        if let Some(value) = self.left_margin {
            format.left_margin = value;
        }
        if let Some(value) = self.columns_spacing {
            format.columns_spacing = value;
        }
        if let Some(value) = self.rows_spacing {
            format.rows_spacing = value;
        }
        if let Some(value) = self.threshold {
            format.threshold = value;
        }
        if self.sample_radius.is_some() {
            format.sample_radius = self.sample_radius;
        }
        if self.reverse.is_some() {
            format.reverse = self.reverse;
        }
        format.validate()?;
        Ok(())
    }
}
