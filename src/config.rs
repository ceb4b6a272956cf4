//! Settings loaded from `config.toml`
//!
//! The config lives in `~/.cleandraft/config.toml`, or under
//! `CLEANDRAFT_BASE_DIR` when that is set. A missing file means defaults.

use anyhow::{Context, Result};
use dirs::home_dir;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::refine::CommandRefiner;
use crate::strip::MarkupOptions;

pub const BASE_DIR_ENV: &str = "CLEANDRAFT_BASE_DIR";
pub const REFINE_COMMAND_ENV: &str = "CLEANDRAFT_REFINE_COMMAND";

/// External command used by `cleandraft refine`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefineConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    pub args: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub options: MarkupOptions,
    pub refine: RefineConfig,
}

impl Settings {
    /// Load from the default location and apply environment overrides
    pub fn load() -> Result<Self> {
        let mut settings = Self::load_from(&config_path()?)?;
        settings.apply_env();
        Ok(settings)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        toml::from_str(&contents).with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {:?}", path))?;
        Ok(())
    }

    fn apply_env(&mut self) {
        if let Ok(command) = env::var(REFINE_COMMAND_ENV) {
            if !command.trim().is_empty() {
                self.refine.command = Some(command);
            }
        }
    }

    pub fn refiner(&self) -> CommandRefiner {
        CommandRefiner::new(self.refine.command.clone(), self.refine.args.clone())
    }
}

pub fn base_dir() -> Result<PathBuf> {
    if let Ok(custom_dir) = env::var(BASE_DIR_ENV) {
        return Ok(PathBuf::from(custom_dir));
    }
    Ok(home_dir()
        .context("Could not find home directory")?
        .join(".cleandraft"))
}

pub fn config_path() -> Result<PathBuf> {
    Ok(base_dir()?.join("config.toml"))
}
