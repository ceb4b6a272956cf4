use anyhow::Result;
use clap::Parser;
use std::env;
use std::time::Instant;

use cleandraft::commands::{
    handle_config, handle_history, handle_refine, handle_stats, handle_strip,
};
use cleandraft::{
    config, error_help, init_logging, log_command_execution, Cli, Commands, HistoryTracker,
    LogConfig, Settings,
};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine, the real environment still applies
    let _ = dotenvy::dotenv();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            if let clap::error::ErrorKind::InvalidSubcommand = e.kind() {
                if let Some(cmd) = env::args().nth(1) {
                    eprintln!(
                        "{}",
                        error_help::format_command_typo(&cmd, error_help::COMMANDS)
                    );
                    std::process::exit(1);
                }
            }
            e.exit();
        }
    };

    if LogConfig::requested() {
        init_logging(LogConfig::from_env())?;
    }

    let Some(command) = cli.command else {
        use clap::CommandFactory;
        Cli::command().print_help()?;
        return Ok(());
    };

    let history = HistoryTracker::new(&config::base_dir()?);

    let start = Instant::now();
    let (name, result) = match command {
        Commands::Strip {
            text,
            io,
            rules,
            stats,
        } => (
            "strip",
            Settings::load().and_then(|settings| {
                handle_strip(&settings, &history, text.as_deref(), &io, &rules, stats)
            }),
        ),
        Commands::Stats { text, input, json } => (
            "stats",
            handle_stats(text.as_deref(), input.as_deref(), json),
        ),
        Commands::Refine { text, io, rules } => {
            let result = match Settings::load() {
                Ok(settings) => {
                    handle_refine(&settings, &history, text.as_deref(), &io, &rules).await
                }
                Err(e) => Err(e),
            };
            ("refine", result)
        }
        Commands::History { action } => ("history", handle_history(&history, action.as_ref())),
        Commands::Config { action } => ("config", handle_config(&action)),
    };

    log_command_execution(name, start.elapsed().as_millis() as u64, &result);
    result
}
