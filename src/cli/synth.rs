//! Synthetic card photos (`punchscan synth`).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use punchscan::{SynthOptions, TranslationTable, render_synthetic_card};

use crate::cli::common::{FormatSourceArgs, GeometryArgs};

/// Arguments for `punchscan synth`.
#[derive(Args, Debug)]
pub struct SynthArgs {
    /// Text to punch, one character per column.
    #[arg(long)]
    pub text: String,
    /// Output image path; the extension selects the encoder.
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,
    #[command(flatten)]
    pub format: FormatSourceArgs,
    /// Canvas width in pixels.
    #[arg(long)]
    pub width: Option<u32>,
    /// Canvas height in pixels.
    #[arg(long)]
    pub height: Option<u32>,
    /// Card placement on the canvas; unset edges keep the default layout.
    #[command(flatten)]
    pub geometry: GeometryArgs,
}

/// Render the card and write it to disk.
pub fn handle(args: SynthArgs) -> Result<()> {
    let format = args.format.resolve()?;
    let mut options = SynthOptions::default();
    if let Some(width) = args.width {
        options.width = width;
    }
    if let Some(height) = args.height {
        options.height = height;
    }
    args.geometry.apply(&mut options.geometry);

    let image = render_synthetic_card(
        &args.text,
        &format,
        &options,
        TranslationTable::keypunch029(),
    )?;
    image
        .save(&args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    let g = options.geometry;
    println!(
        "Wrote {} (card at top {} left {} right {} bottom {})",
        args.output.display(),
        g.top,
        g.left,
        g.right,
        g.bottom
    );
    Ok(())
}
