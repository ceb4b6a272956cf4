//! Friendlier messages for command-line mistakes

use colored::*;
use fuzzy_matcher::{skim::SkimMatcherV2, FuzzyMatcher};

pub const COMMANDS: &[&str] = &["strip", "s", "stats", "st", "refine", "r", "history", "h", "config"];

/// Closest known command to `command`, if any is a reasonable match
pub fn suggest_command<'a>(command: &str, available_commands: &[&'a str]) -> Option<&'a str> {
    let matcher = SkimMatcherV2::default();
    available_commands
        .iter()
        .filter(|cmd| cmd.len() > 2)
        .filter_map(|&cmd| matcher.fuzzy_match(cmd, command).map(|score| (cmd, score)))
        .filter(|(_, score)| *score > 20)
        .max_by_key(|(_, score)| *score)
        .map(|(cmd, _)| cmd)
}

/// Format a command typo error with suggestions
pub fn format_command_typo(command: &str, available_commands: &[&str]) -> String {
    let mut message = format!("Error: Unknown command '{}'\n\n", command)
        .red()
        .to_string();

    if let Some(suggestion) = suggest_command(command, available_commands) {
        message.push_str(
            &format!("Did you mean '{}'?\n\n", suggestion)
                .yellow()
                .to_string(),
        );
    }

    message.push_str("Available commands:\n");
    for cmd in available_commands.iter().filter(|cmd| cmd.len() > 2) {
        message.push_str(&format!("  {}\n", cmd));
    }

    message.push_str(&format!(
        "\nRun '{}' for more information\n",
        "cleandraft --help".cyan()
    ));

    message
}
