//! Structured logging setup
//!
//! Logging is off unless `CLEANDRAFT_LOG_LEVEL` is set. Output always goes to
//! stderr so it never mixes with cleaned text on stdout.

use anyhow::Result;
use std::env;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

pub const LOG_LEVEL_ENV: &str = "CLEANDRAFT_LOG_LEVEL";

#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Filter directive, e.g. `debug` or `cleandraft=trace`
    pub level: String,
    pub format: LogFormat,
    pub colored: bool,
    /// Include file and line of each event
    pub with_location: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
    Compact,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "error".to_string(),
            format: LogFormat::Compact,
            colored: is_terminal::IsTerminal::is_terminal(&std::io::stderr()),
            with_location: false,
        }
    }
}

fn env_flag(name: &str) -> Option<bool> {
    env::var(name)
        .ok()
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

impl LogConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let level = env::var(LOG_LEVEL_ENV).unwrap_or(defaults.level);

        let format = match env::var("CLEANDRAFT_LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            Ok("pretty") => LogFormat::Pretty,
            _ => LogFormat::Compact,
        };

        Self {
            level,
            format,
            colored: env_flag("CLEANDRAFT_LOG_COLOR").unwrap_or(defaults.colored),
            with_location: env_flag("CLEANDRAFT_LOG_LOCATION").unwrap_or(false),
        }
    }

    /// Whether the user asked for logging at all
    pub fn requested() -> bool {
        env::var(LOG_LEVEL_ENV).is_ok()
    }
}

/// Install the global tracing subscriber
pub fn init_logging(config: LogConfig) -> Result<()> {
    let env_filter = EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("error"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(config.colored)
        .with_file(config.with_location)
        .with_line_number(config.with_location);

    match config.format {
        LogFormat::Json => subscriber
            .json()
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize JSON logging: {}", e))?,
        LogFormat::Pretty => subscriber
            .pretty()
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize pretty logging: {}", e))?,
        LogFormat::Compact => subscriber
            .compact()
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize compact logging: {}", e))?,
    }

    info!(level = %config.level, format = ?config.format, "Logging initialized");
    Ok(())
}

/// Record how a command went
pub fn log_command_execution<T>(command_name: &str, duration_ms: u64, result: &Result<T>) {
    match result {
        Ok(_) => info!(
            command = command_name,
            duration_ms = duration_ms,
            "Command completed successfully"
        ),
        Err(e) => error!(
            command = command_name,
            duration_ms = duration_ms,
            error = %e,
            "Command failed"
        ),
    }
}
