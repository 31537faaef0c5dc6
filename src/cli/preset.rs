//! Format preset discovery commands (`punchscan preset ...`).

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use punchscan::PresetRegistry;

/// Preset subcommands.
#[derive(Subcommand, Debug)]
pub enum PresetCommand {
    /// List all built-in format presets.
    List,
    /// Print a preset as a JSON format record usable with `--format-file`.
    Show(PresetShowArgs),
}

/// Arguments for `punchscan preset show`.
#[derive(Args, Debug)]
pub struct PresetShowArgs {
    /// Preset name to display.
    pub name: String,
}

/// Execute a preset command.
pub fn handle(command: PresetCommand) -> Result<()> {
    match command {
        PresetCommand::List => list(),
        PresetCommand::Show(args) => show(args),
    }
}

fn list() -> Result<()> {
    println!("Available presets:");
    for preset in PresetRegistry::list() {
        let marker = if preset.name == PresetRegistry::DEFAULT {
            " (default)"
        } else {
            ""
        };
        println!("  - {}{}: {}", preset.name, marker, preset.description);
    }
    Ok(())
}

fn show(args: PresetShowArgs) -> Result<()> {
    let preset = PresetRegistry::get(&args.name)
        .with_context(|| format!("preset '{}' not found", args.name))?;
    let json = serde_json::to_string_pretty(&preset.format())?;
    println!("{json}");
    Ok(())
}
