use anyhow::Result;
use colored::*;

use super::common::{read_input, write_output};
use crate::cli::{IoArgs, RuleArgs};
use crate::{refine_or_strip, HistoryTracker, ProcessingStatus, Settings};

/// Handle the refine command - polish text externally, or strip it locally
pub async fn handle_refine(
    settings: &Settings,
    history: &HistoryTracker,
    text: Option<&str>,
    io_args: &IoArgs,
    rules: &RuleArgs,
) -> Result<()> {
    let input = read_input(text, io_args.input.as_deref())?;
    let options = rules.apply(settings.options);
    let refiner = settings.refiner();

    let outcome = refine_or_strip(&refiner, &input, &options).await;
    if let Some(err) = &outcome.error {
        if !io_args.quiet {
            eprintln!(
                "{}: refinement failed ({}), used local strip instead",
                "Warning".yellow(),
                err
            );
        }
    }

    write_output(io_args, &outcome.text, "Refined text")?;

    // Only a completed refinement is worth keeping as a session
    if outcome.status == ProcessingStatus::Completed && !io_args.no_history {
        history.record(&input, &outcome.text)?;
    }
    Ok(())
}
