use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Read, Write};

use crate::cli::IoArgs;

/// Resolve command input: the positional argument, then `--input`, then stdin
pub fn read_input(text: Option<&str>, input: Option<&str>) -> Result<String> {
    if let Some(text) = text {
        return Ok(text.to_string());
    }

    if let Some(path) = input {
        return fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file: {}", path));
    }

    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read from stdin")?;
    Ok(buffer)
}

/// Send content to `--output` when given, otherwise to stdout
pub fn write_output(io_args: &IoArgs, content: &str, description: &str) -> Result<()> {
    if let Some(path) = &io_args.output {
        fs::write(path, content).with_context(|| format!("Failed to write output file: {}", path))?;
        if !io_args.quiet {
            eprintln!("{} written to '{}'", description, path);
        }
        return Ok(());
    }

    let mut stdout = io::stdout().lock();
    stdout
        .write_all(content.as_bytes())
        .context("Failed to write to stdout")?;
    if !content.ends_with('\n') {
        writeln!(stdout)?;
    }
    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_argument_wins_over_file() {
        let input = read_input(Some("inline"), Some("/does/not/exist")).unwrap();
        assert_eq!(input, "inline");
    }

    #[test]
    fn test_read_input_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("notes.md");
        fs::write(&path, "# Notes").unwrap();

        let input = read_input(None, path.to_str()).unwrap();
        assert_eq!(input, "# Notes");
    }

    #[test]
    fn test_missing_input_file() {
        let err = read_input(None, Some("/definitely/missing.md")).unwrap_err();
        assert!(err.to_string().contains("Failed to read input file"));
    }

    #[test]
    fn test_write_output_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.txt");
        let io_args = IoArgs {
            output: Some(path.to_string_lossy().into_owned()),
            quiet: true,
            ..IoArgs::default()
        };

        write_output(&io_args, "clean text", "Cleaned text").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "clean text");
    }
}
