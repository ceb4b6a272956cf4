use anyhow::{Context, Result};

use super::common::read_input;
use crate::calculate_stats;

pub fn handle_stats(text: Option<&str>, input: Option<&str>, json: bool) -> Result<()> {
    let content = read_input(text, input)?;
    let stats = calculate_stats(&content);

    if json {
        let rendered =
            serde_json::to_string_pretty(&stats).context("Failed to serialize statistics")?;
        println!("{}", rendered);
    } else {
        println!("{}", stats.summary());
    }
    Ok(())
}
