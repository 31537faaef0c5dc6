//! Convenience helpers shared across command handlers.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use punchscan::Deck;

/// Persist a string either to a file or stdout when `-` is provided.
pub fn write_output(path: &Path, content: &str) -> Result<()> {
    if path.as_os_str() == "-" {
        io::stdout().write_all(content.as_bytes())?;
        return Ok(());
    }
    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}

/// Print to stdout, or write to `output` when one is given.
pub fn emit(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => write_output(path, content),
        None => {
            print!("{content}");
            Ok(())
        }
    }
}

/// Load a deck file, attaching path context to any error.
pub fn load_deck(path: &Path) -> Result<Deck> {
    Deck::load(path).with_context(|| format!("failed to read deck {}", path.display()))
}

pub fn save_deck(deck: &Deck, path: &Path) -> Result<()> {
    deck.save(path)
        .with_context(|| format!("failed to write deck {}", path.display()))
}

/// Convert a 1-based CLI index into a deck position.
pub fn card_index(index: usize, deck: &Deck) -> Result<usize> {
    if index == 0 || index > deck.len() {
        return Err(anyhow!(
            "card index {} out of range 1..{}",
            index,
            deck.len()
        ));
    }
    Ok(index - 1)
}
