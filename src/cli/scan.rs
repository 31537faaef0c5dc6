//! Decoding commands (`punchscan scan ...`).

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::{Args, Subcommand};
use log::{error, info};
use punchscan::{CardGeometry, CardScan, TranslationTable, load_rgb, scan_image};

use crate::cli::common::{FormatOverrideArgs, FormatSourceArgs, GeometryArgs};
use crate::cli::utils::{card_index, emit, load_deck};

/// Supported `punchscan scan` subcommands.
#[derive(Subcommand, Debug)]
pub enum ScanCommand {
    /// Decode one card of a deck.
    Card(ScanCardArgs),
    /// Decode every card of a deck, one word per line.
    Deck(ScanDeckArgs),
    /// Decode a single image without a deck file.
    Image(ScanImageArgs),
}

/// Output toggles shared by the scan commands.
#[derive(Args, Debug, Clone, Default)]
pub struct ScanOutputArgs {
    /// Append the ASCII card diagram.
    #[arg(long)]
    pub diagram: bool,
    /// Append the per-row bit strings.
    #[arg(long)]
    pub bits: bool,
    /// Write output to this path instead of stdout (`-` for stdout).
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
}

/// Arguments for `punchscan scan card`.
#[derive(Args, Debug)]
pub struct ScanCardArgs {
    /// Deck file to read.
    pub deck: PathBuf,
    /// 1-based index of the card to decode.
    #[arg(short = 'i', long = "index")]
    pub index: usize,
    #[command(flatten)]
    pub output: ScanOutputArgs,
}

/// Arguments for `punchscan scan deck`.
#[derive(Args, Debug)]
pub struct ScanDeckArgs {
    /// Deck file to read.
    pub deck: PathBuf,
    #[command(flatten)]
    pub output: ScanOutputArgs,
}

/// Arguments for `punchscan scan image`.
#[derive(Args, Debug)]
pub struct ScanImageArgs {
    /// Card photo to decode.
    pub image: PathBuf,
    #[command(flatten)]
    pub geometry: GeometryArgs,
    #[command(flatten)]
    pub source: FormatSourceArgs,
    #[command(flatten)]
    pub format: FormatOverrideArgs,
    #[command(flatten)]
    pub output: ScanOutputArgs,
}

/// Execute a scan command.
pub fn handle(command: ScanCommand) -> Result<()> {
    match command {
        ScanCommand::Card(args) => card(args),
        ScanCommand::Deck(args) => deck(args),
        ScanCommand::Image(args) => image(args),
    }
}

fn card(args: ScanCardArgs) -> Result<()> {
    let deck = load_deck(args.deck.as_path())?;
    let index = card_index(args.index, &deck)?;
    let card = deck.get(index)?;
    let scan = card
        .scan()
        .with_context(|| format!("failed to scan card {}", args.index))?;
    info!(
        "card {}: {} hole(s) across {} column(s)",
        args.index,
        scan.matrix.hole_count(),
        scan.matrix.column_count()
    );
    let text = render_scan(&scan, &args.output);
    emit(args.output.output.as_deref(), &text)
}

fn deck(args: ScanDeckArgs) -> Result<()> {
    let deck = load_deck(args.deck.as_path())?;
    let mut text = String::new();
    let mut failures = 0usize;
    for (idx, result) in deck.scan_all().into_iter().enumerate() {
        match result {
            Ok(scan) => text.push_str(&render_scan(&scan, &args.output)),
            Err(err) => {
                error!("card {}: {err}", idx + 1);
                failures += 1;
                text.push('\n');
            }
        }
    }
    emit(args.output.output.as_deref(), &text)?;
    if failures > 0 {
        return Err(anyhow!(
            "{failures} of {} card(s) could not be scanned",
            deck.len()
        ));
    }
    Ok(())
}

fn image(args: ScanImageArgs) -> Result<()> {
    let mut format = args.source.resolve()?;
    args.format.apply(&mut format)?;
    let mut geometry = CardGeometry::default();
    args.geometry.apply(&mut geometry);
    let photo = load_rgb(&args.image)?;
    let scan = scan_image(&photo, &geometry, &format, TranslationTable::keypunch029())?;
    let text = render_scan(&scan, &args.output);
    emit(args.output.output.as_deref(), &text)
}

fn render_scan(scan: &CardScan, output: &ScanOutputArgs) -> String {
    let mut text = format!("{}\n", scan.word);
    if output.diagram {
        text.push_str(&scan.diagram);
        text.push('\n');
    }
    if output.bits {
        for row in &scan.bits {
            text.push_str(row);
            text.push('\n');
        }
    }
    text
}
