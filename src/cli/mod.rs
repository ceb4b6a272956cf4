//! Command-line interface definitions and parsing

use clap::{Args, Parser, Subcommand};

use crate::strip::MarkupOptions;

#[derive(Parser)]
#[command(name = "cleandraft")]
#[command(version)]
#[command(about = "CleanDraft - Strip Markdown down to clean plain text")]
#[command(after_help = "EXAMPLES:
  cleandraft strip \"# Title **bold**\"      # Strip an argument
  cat notes.md | cleandraft strip --flatten-lists
  cleandraft strip -i notes.md -o notes.txt
  cleandraft stats -i notes.md --json
  cleandraft refine -i draft.md            # Refine, falling back to strip
  cleandraft history                       # Recent sessions

Rule defaults come from config.toml (see 'cleandraft config path').")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Strip Markdown formatting from text
    #[command(alias = "s")]
    Strip {
        /// Text to clean (reads stdin when omitted)
        text: Option<String>,
        #[command(flatten)]
        io: IoArgs,
        #[command(flatten)]
        rules: RuleArgs,
        /// Print word count and read time to stderr
        #[arg(long = "stats")]
        stats: bool,
    },
    /// Show word count, character count and read time
    #[command(alias = "st")]
    Stats {
        /// Text to measure (reads stdin when omitted)
        text: Option<String>,
        /// Read input from a file
        #[arg(short = 'i', long = "input", value_name = "PATH")]
        input: Option<String>,
        /// Emit JSON instead of a summary line
        #[arg(long = "json")]
        json: bool,
    },
    /// Polish text with the configured refine command, falling back to strip
    #[command(alias = "r")]
    Refine {
        /// Text to refine (reads stdin when omitted)
        text: Option<String>,
        #[command(flatten)]
        io: IoArgs,
        #[command(flatten)]
        rules: RuleArgs,
    },
    /// Recall recent sessions
    #[command(alias = "h")]
    History {
        #[command(subcommand)]
        action: Option<HistoryCommands>,
    },
    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum HistoryCommands {
    /// List recent sessions, newest first
    #[command(alias = "ls")]
    List {
        /// Maximum number of sessions to show
        #[arg(short = 'n', long = "limit", default_value_t = 20)]
        limit: usize,
    },
    /// Print the output of a session (or its input with --input)
    Show {
        /// Session id or id prefix
        id: String,
        /// Print the original input instead of the output
        #[arg(long = "input")]
        input: bool,
    },
    /// Delete a session
    #[command(alias = "rm")]
    Delete {
        /// Session id or id prefix
        id: String,
    },
    /// Delete every session
    Clear,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective settings
    Show,
    /// Print the config file location
    Path,
    /// Write a config file with default settings
    Init {
        /// Overwrite an existing file
        #[arg(long = "force")]
        force: bool,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct IoArgs {
    /// Read input from a file
    #[arg(short = 'i', long = "input", value_name = "PATH")]
    pub input: Option<String>,
    /// Write output to a file instead of stdout
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<String>,
    /// Suppress status messages
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,
    /// Do not save this session to history
    #[arg(long = "no-history")]
    pub no_history: bool,
}

/// Per-invocation overrides for the configured strip rules
#[derive(Args, Debug, Clone, Default)]
pub struct RuleArgs {
    /// Reduce links to their label
    #[arg(long, overrides_with = "keep_links")]
    pub remove_links: bool,
    /// Keep link markup (currently links are reduced regardless)
    #[arg(long, overrides_with = "remove_links")]
    pub keep_links: bool,
    /// Delete fenced code blocks including their content
    #[arg(long, overrides_with = "keep_code_blocks")]
    pub remove_code_blocks: bool,
    /// Keep code content, dropping only the fences
    #[arg(long, overrides_with = "remove_code_blocks")]
    pub keep_code_blocks: bool,
    /// Strip list markers from line starts
    #[arg(long, overrides_with = "keep_lists")]
    pub flatten_lists: bool,
    /// Leave list markers alone
    #[arg(long, overrides_with = "flatten_lists")]
    pub keep_lists: bool,
    /// Delete image markup entirely
    #[arg(long, overrides_with = "keep_images")]
    pub remove_images: bool,
    /// Leave image markup untouched
    #[arg(long, overrides_with = "remove_images")]
    pub keep_images: bool,
    /// Only trim trailing whitespace, keep blank lines as they are
    #[arg(long, overrides_with = "collapse_spacing")]
    pub preserve_spacing: bool,
    /// Collapse blank-line runs and trim the document
    #[arg(long, overrides_with = "preserve_spacing")]
    pub collapse_spacing: bool,
}

fn toggle(enable: bool, disable: bool, current: bool) -> bool {
    if enable {
        true
    } else if disable {
        false
    } else {
        current
    }
}

impl RuleArgs {
    /// Layer these flags over the configured options
    pub fn apply(&self, base: MarkupOptions) -> MarkupOptions {
        MarkupOptions {
            remove_links: toggle(self.remove_links, self.keep_links, base.remove_links),
            remove_code_blocks: toggle(
                self.remove_code_blocks,
                self.keep_code_blocks,
                base.remove_code_blocks,
            ),
            flatten_lists: toggle(self.flatten_lists, self.keep_lists, base.flatten_lists),
            remove_images: toggle(self.remove_images, self.keep_images, base.remove_images),
            preserve_spacing: toggle(
                self.preserve_spacing,
                self.collapse_spacing,
                base.preserve_spacing,
            ),
        }
    }
}
