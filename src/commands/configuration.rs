use anyhow::{Context, Result};
use colored::*;

use crate::cli::ConfigCommands;
use crate::config::{config_path, REFINE_COMMAND_ENV};
use crate::Settings;

pub fn handle_config(action: &ConfigCommands) -> Result<()> {
    match action {
        ConfigCommands::Show => {
            let settings = Settings::load()?;
            let rendered =
                toml::to_string_pretty(&settings).context("Failed to serialize settings")?;
            print!("{}", rendered);
            if !settings.refiner().is_configured() {
                eprintln!(
                    "{}: no refine command set; configure [refine] or {}",
                    "Note".cyan(),
                    REFINE_COMMAND_ENV
                );
            }
        }
        ConfigCommands::Path => {
            println!("{}", config_path()?.display());
        }
        ConfigCommands::Init { force } => {
            let path = config_path()?;
            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at {} (use --force to overwrite)",
                    path.display()
                );
            }
            Settings::default().save_to(&path)?;
            println!("{} Wrote default config to {}", "✓".green(), path.display());
        }
    }
    Ok(())
}
