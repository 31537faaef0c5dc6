//! Command-line interface wiring for the `punchscan` binary.
//!
//! This module owns the clap definitions and delegates execution to
//! specialized submodules that encapsulate each command family.

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use log::LevelFilter;

pub mod card;
pub mod common;
pub mod deck;
pub mod preset;
pub mod scan;
pub mod synth;
pub mod utils;

/// Parsed CLI entrypoint for the `punchscan` binary.
#[derive(Parser, Debug)]
#[command(
    name = "punchscan",
    version,
    about = "Decode photographed punch cards into text"
)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,
    /// Only report errors.
    #[arg(short = 'q', long = "quiet", global = true, conflicts_with = "verbose")]
    pub quiet: bool,
    /// Top-level command to execute.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Log level implied by the verbosity flags; `RUST_LOG` still overrides it.
    pub fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

/// High-level command families made available to end users.
#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(subcommand)]
    Deck(deck::DeckCommand),
    #[command(subcommand)]
    Card(card::CardCommand),
    #[command(subcommand)]
    Scan(scan::ScanCommand),
    #[command(subcommand)]
    Preset(preset::PresetCommand),
    /// Render a synthetic card photo for calibration and testing.
    Synth(synth::SynthArgs),
}

/// Execute the requested command.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Deck(cmd) => deck::handle(cmd),
        Command::Card(cmd) => card::handle(cmd),
        Command::Scan(cmd) => scan::handle(cmd),
        Command::Preset(cmd) => preset::handle(cmd),
        Command::Synth(args) => synth::handle(args),
    }
}
