use anyhow::Result;
use colored::*;
use tracing::debug;

use super::common::{read_input, write_output};
use crate::cli::{IoArgs, RuleArgs};
use crate::{calculate_stats, strip_markdown, HistoryTracker, Settings};

/// Handle the strip command - remove Markdown formatting from text
pub fn handle_strip(
    settings: &Settings,
    history: &HistoryTracker,
    text: Option<&str>,
    io_args: &IoArgs,
    rules: &RuleArgs,
    show_stats: bool,
) -> Result<()> {
    let input = read_input(text, io_args.input.as_deref())?;
    let options = rules.apply(settings.options);
    debug!(?options, input_len = input.len(), "Stripping markdown");

    let cleaned = strip_markdown(&input, &options);
    write_output(io_args, &cleaned, "Cleaned text")?;

    if !io_args.no_history {
        history.record(&input, &cleaned)?;
    }

    if show_stats {
        eprintln!("{}", calculate_stats(&cleaned).summary().dimmed());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_strip_to_file_with_overrides() {
        let temp_dir = TempDir::new().unwrap();
        let history = HistoryTracker::new(temp_dir.path());
        let out = temp_dir.path().join("out.txt");

        let mut settings = Settings::default();
        settings.options.flatten_lists = true;
        let rules = RuleArgs {
            keep_images: true,
            ..RuleArgs::default()
        };
        let io_args = IoArgs {
            output: Some(out.to_string_lossy().into_owned()),
            quiet: true,
            ..IoArgs::default()
        };

        let input = "# Notes\n- **a**\n![i](x.png)";
        handle_strip(&settings, &history, Some(input), &io_args, &rules, false).unwrap();

        assert_eq!(fs::read_to_string(&out).unwrap(), "Notes\na\n![i](x.png)");

        let recent = history.get_recent(10).unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].input, input);
        assert_eq!(recent[0].output, "Notes\na\n![i](x.png)");
    }

    #[test]
    fn test_no_history_flag() {
        let temp_dir = TempDir::new().unwrap();
        let history = HistoryTracker::new(temp_dir.path());
        let io_args = IoArgs {
            output: Some(temp_dir.path().join("out.txt").to_string_lossy().into_owned()),
            quiet: true,
            no_history: true,
            ..IoArgs::default()
        };

        handle_strip(
            &Settings::default(),
            &history,
            Some("**text**"),
            &io_args,
            &RuleArgs::default(),
            false,
        )
        .unwrap();
        assert!(history.get_recent(10).unwrap().is_empty());
    }
}
