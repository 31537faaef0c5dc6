//! Deck lifecycle commands (`punchscan deck ...`).

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::{Args, Subcommand};
use punchscan::{Card, Deck};

use crate::cli::common::FormatSourceArgs;
use crate::cli::utils::{card_index, load_deck, save_deck};

/// Supported `punchscan deck` subcommands.
#[derive(Subcommand, Debug)]
pub enum DeckCommand {
    /// Create a deck with one card per image.
    Init(DeckInitArgs),
    /// Append images to an existing deck.
    Add(DeckAddArgs),
    /// Remove a card by index.
    Remove(DeckRemoveArgs),
    /// Show deck summary.
    Info(DeckInfoArgs),
    /// Print the SHA-256 fingerprint of the deck parameters.
    Hash(DeckHashArgs),
}

/// Arguments for `punchscan deck init`.
#[derive(Args, Debug)]
pub struct DeckInitArgs {
    /// Output deck path (JSON).
    pub deck: PathBuf,
    /// Card images, in deck order.
    #[arg(required = true)]
    pub images: Vec<PathBuf>,
    #[command(flatten)]
    pub format: FormatSourceArgs,
    /// Overwrite an existing deck file.
    #[arg(long)]
    pub force: bool,
}

/// Arguments for `punchscan deck add`.
#[derive(Args, Debug)]
pub struct DeckAddArgs {
    /// Deck file to modify.
    pub deck: PathBuf,
    /// Card images to append.
    #[arg(required = true)]
    pub images: Vec<PathBuf>,
    #[command(flatten)]
    pub format: FormatSourceArgs,
}

/// Arguments for `punchscan deck remove`.
#[derive(Args, Debug)]
pub struct DeckRemoveArgs {
    /// Deck file to modify.
    pub deck: PathBuf,
    /// 1-based index of the card to remove.
    #[arg(short = 'i', long = "index")]
    pub index: usize,
}

/// Arguments for `punchscan deck info`.
#[derive(Args, Debug)]
pub struct DeckInfoArgs {
    /// Deck file to inspect.
    pub deck: PathBuf,
}

/// Arguments for `punchscan deck hash`.
#[derive(Args, Debug)]
pub struct DeckHashArgs {
    /// Deck file to hash.
    pub deck: PathBuf,
}

/// Execute a deck command.
pub fn handle(command: DeckCommand) -> Result<()> {
    match command {
        DeckCommand::Init(args) => init(args),
        DeckCommand::Add(args) => add(args),
        DeckCommand::Remove(args) => remove(args),
        DeckCommand::Info(args) => info(args),
        DeckCommand::Hash(args) => hash(args),
    }
}

fn init(args: DeckInitArgs) -> Result<()> {
    if args.deck.exists() && !args.force {
        return Err(anyhow!(
            "{} already exists; pass --force to overwrite",
            args.deck.display()
        ));
    }
    let format = args.format.resolve()?;
    let deck = Deck::from_paths_with(args.images, &format);
    save_deck(&deck, &args.deck)?;
    println!(
        "Created deck {} with {} card(s)",
        args.deck.display(),
        deck.len()
    );
    Ok(())
}

fn add(args: DeckAddArgs) -> Result<()> {
    let mut deck = load_deck(args.deck.as_path())?;
    let format = args.format.resolve()?;
    let count = args.images.len();
    for image in args.images {
        deck.add(Card::new(image, format.clone()));
    }
    save_deck(&deck, &args.deck)?;
    println!("Added {} card(s) to {}", count, args.deck.display());
    Ok(())
}

fn remove(args: DeckRemoveArgs) -> Result<()> {
    let mut deck = load_deck(args.deck.as_path())?;
    let index = card_index(args.index, &deck)?;
    let card = deck.remove(index)?;
    save_deck(&deck, &args.deck)?;
    println!(
        "Removed card {} ({}) from {}",
        args.index,
        card.path.display(),
        args.deck.display()
    );
    Ok(())
}

fn info(args: DeckInfoArgs) -> Result<()> {
    let deck = load_deck(args.deck.as_path())?;
    println!("Deck: {}", args.deck.display());
    println!("Cards: {}", deck.len());
    for (idx, card) in deck.cards().iter().enumerate() {
        let g = &card.geometry;
        let state = if g.is_degenerate() {
            "uncalibrated"
        } else {
            "calibrated"
        };
        println!(
            "{:>4}  {}  [{},{} -> {},{}] {}x{} {}",
            idx + 1,
            card.path.display(),
            g.left,
            g.top,
            g.right,
            g.bottom,
            card.format.columns,
            card.format.rows,
            state
        );
    }
    Ok(())
}

fn hash(args: DeckHashArgs) -> Result<()> {
    let deck = load_deck(args.deck.as_path())?;
    println!("{}", deck.fingerprint()?);
    Ok(())
}
