//! Card-level operations (`punchscan card ...`).

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::cli::common::{FormatOverrideArgs, FormatSourceArgs, GeometryArgs};
use crate::cli::utils::{card_index, load_deck, save_deck};

/// Supported `punchscan card` subcommands.
#[derive(Subcommand, Debug)]
pub enum CardCommand {
    /// Show a card's geometry and format.
    Show(CardShowArgs),
    /// Edit a card's geometry and format fields.
    Set(CardSetArgs),
}

/// Arguments for `punchscan card show`.
#[derive(Args, Debug)]
pub struct CardShowArgs {
    /// Deck file to read.
    pub deck: PathBuf,
    /// 1-based index.
    #[arg(short = 'i', long = "index")]
    pub index: usize,
}

/// Arguments for `punchscan card set`.
#[derive(Args, Debug)]
pub struct CardSetArgs {
    /// Deck file to modify.
    pub deck: PathBuf,
    /// 1-based index of the card to edit.
    #[arg(short = 'i', long = "index")]
    pub index: usize,
    #[command(flatten)]
    pub geometry: GeometryArgs,
    /// Replace the whole format before applying field overrides.
    #[command(flatten)]
    pub source: FormatSourceArgs,
    #[command(flatten)]
    pub format: FormatOverrideArgs,
}

/// Execute a card command.
pub fn handle(command: CardCommand) -> Result<()> {
    match command {
        CardCommand::Show(args) => show(args),
        CardCommand::Set(args) => set(args),
    }
}

fn show(args: CardShowArgs) -> Result<()> {
    let deck = load_deck(args.deck.as_path())?;
    let index = card_index(args.index, &deck)?;
    let card = deck.get(index)?;
    let g = &card.geometry;
    let f = &card.format;
    println!("Card {} of {}", args.index, deck.len());
    println!("Image: {}", card.path.display());
    println!(
        "Geometry: top {} left {} right {} bottom {} ({}x{} px)",
        g.top,
        g.left,
        g.right,
        g.bottom,
        g.width(),
        g.height()
    );
    println!("Grid: {} columns x {} rows", f.columns, f.rows);
    println!(
        "Reference: {} x {}",
        f.reference_width, f.reference_height
    );
    println!("Margins: top {} left {}", f.top_margin, f.left_margin);
    println!(
        "Spacing: columns {} rows {}",
        f.columns_spacing, f.rows_spacing
    );
    println!("Threshold: {}", f.threshold);
    println!("Sampling: {:?}", f.strategy());
    if f.is_reversed() {
        println!("Row export: reversed");
    }
    Ok(())
}

fn set(args: CardSetArgs) -> Result<()> {
    let mut deck = load_deck(args.deck.as_path())?;
    let index = card_index(args.index, &deck)?;
    let replacement = if args.source.is_set() {
        Some(args.source.resolve()?)
    } else {
        None
    };
    let card = deck.get_mut(index)?;
    args.geometry.apply(&mut card.geometry);
    let mut format = replacement.unwrap_or_else(|| card.format.clone());
    args.format.apply(&mut format)?;
    card.format = format;
    if card.geometry.is_degenerate() && !args.geometry.is_empty() {
        log::warn!(
            "card {} geometry {}x{} has no area; scans will report no holes",
            args.index,
            card.geometry.width(),
            card.geometry.height()
        );
    }
    save_deck(&deck, &args.deck)?;
    println!("Updated card {} in {}", args.index, args.deck.display());
    Ok(())
}
