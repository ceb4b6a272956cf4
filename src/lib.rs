//! CleanDraft - strip Markdown down to clean plain text
//!
//! The heart of the crate is [`strip_markdown`], a deterministic pipeline of
//! rule-based rewrites controlled by [`MarkupOptions`], and
//! [`calculate_stats`], which reports word count and reading time for the
//! result. Both are pure functions and safe to call from anywhere.
//!
//! # Quick Start
//!
//! ```
//! use cleandraft::{calculate_stats, strip_markdown, MarkupOptions};
//!
//! let clean = strip_markdown("# Title\n**Bold** [link](https://example.com)", &MarkupOptions::default());
//! assert_eq!(clean, "Title\nBold link");
//!
//! let stats = calculate_stats(&clean);
//! assert_eq!(stats.words, 3);
//! ```
//!
//! # Modules
//!
//! - [`strip`]: the Markdown stripping pipeline
//! - [`stats`]: word, character and read-time statistics
//! - [`refine`]: optional external refinement with local fallback
//! - [`config`]: settings from `config.toml`
//! - [`history`]: recently cleaned and refined sessions
//! - [`logging`]: tracing subscriber setup

pub mod cli;
pub mod commands;
pub mod config;
pub mod error_help;
pub mod history;
pub mod logging;
pub mod refine;
pub mod stats;
pub mod strip;

pub use cli::{Cli, Commands, ConfigCommands, HistoryCommands};
pub use config::Settings;
pub use history::{HistoryItem, HistoryTracker};
pub use logging::{init_logging, log_command_execution, LogConfig};
pub use refine::{
    refine_or_strip, CommandRefiner, ProcessingStatus, RefineError, RefineOutcome, Refiner,
};
pub use stats::{calculate_stats, TextStats};
pub use strip::{strip_markdown, MarkupOptions};
