//! Recent cleaning sessions
//!
//! Keeps the newest sessions first in `history.json` under the base
//! directory, capped at [`MAX_ENTRIES`], so earlier input and output can be
//! recalled later.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

pub const MAX_ENTRIES: usize = 20;

const TITLE_CHARS: usize = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryItem {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub input: String,
    pub output: String,
    pub title: String,
}

impl HistoryItem {
    pub fn new(input: &str, output: &str) -> Self {
        Self {
            id: Uuid::new_v4().simple().to_string(),
            timestamp: Utc::now(),
            input: input.to_string(),
            output: output.to_string(),
            title: Self::make_title(input),
        }
    }

    /// First 30 characters of the input, with `...` when cut short
    fn make_title(input: &str) -> String {
        let mut title: String = input.chars().take(TITLE_CHARS).collect();
        if input.chars().count() > TITLE_CHARS {
            title.push_str("...");
        }
        title
    }

    pub fn short_id(&self) -> &str {
        &self.id[..self.id.len().min(8)]
    }

    pub fn display(&self) {
        use colored::*;

        let timestamp = self.timestamp.format("%Y-%m-%d %H:%M:%S");
        // Titles may hold newlines from the raw input
        let title = self.title.replace('\n', " ");
        println!(
            "{} {} {}",
            self.short_id().bold(),
            timestamp.to_string().dimmed(),
            title
        );
    }
}

pub struct HistoryTracker {
    history_file: PathBuf,
    max_entries: usize,
}

impl HistoryTracker {
    pub fn new(base_dir: &Path) -> Self {
        Self {
            history_file: base_dir.join("history.json"),
            max_entries: MAX_ENTRIES,
        }
    }

    /// Save a session. Blank input is not worth recalling and is skipped.
    pub fn record(&self, input: &str, output: &str) -> Result<Option<HistoryItem>> {
        if input.trim().is_empty() {
            return Ok(None);
        }

        let item = HistoryItem::new(input, output);
        let mut history = self.load_history()?;
        history.insert(0, item.clone());
        history.truncate(self.max_entries);
        self.save_history(&history)?;

        debug!(id = %item.id, entries = history.len(), "Recorded history item");
        Ok(Some(item))
    }

    pub fn get_recent(&self, limit: usize) -> Result<Vec<HistoryItem>> {
        Ok(self.load_history()?.into_iter().take(limit).collect())
    }

    /// Look up an item by its id or any unique-enough prefix of it
    pub fn find(&self, id: &str) -> Result<Option<HistoryItem>> {
        if id.is_empty() {
            return Ok(None);
        }
        Ok(self
            .load_history()?
            .into_iter()
            .find(|item| item.id.starts_with(id)))
    }

    /// Remove the item matching `id`, returning it when found
    pub fn delete(&self, id: &str) -> Result<Option<HistoryItem>> {
        if id.is_empty() {
            return Ok(None);
        }
        let mut history = self.load_history()?;
        let Some(index) = history.iter().position(|item| item.id.starts_with(id)) else {
            return Ok(None);
        };
        let removed = history.remove(index);
        self.save_history(&history)?;
        Ok(Some(removed))
    }

    pub fn clear(&self) -> Result<()> {
        self.save_history(&[])
    }

    fn load_history(&self) -> Result<Vec<HistoryItem>> {
        if !self.history_file.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.history_file)
            .with_context(|| format!("Failed to read history file: {:?}", self.history_file))?;

        serde_json::from_str(&content).with_context(|| "Failed to parse history file")
    }

    fn save_history(&self, history: &[HistoryItem]) -> Result<()> {
        if let Some(parent) = self.history_file.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }

        let content =
            serde_json::to_string_pretty(history).with_context(|| "Failed to serialize history")?;

        fs::write(&self.history_file, content)
            .with_context(|| format!("Failed to write history file: {:?}", self.history_file))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_record_and_recall() {
        let temp_dir = TempDir::new().unwrap();
        let tracker = HistoryTracker::new(temp_dir.path());

        let item = tracker.record("# Title", "Title").unwrap().unwrap();
        let history = tracker.get_recent(10).unwrap();
        assert_eq!(history, vec![item.clone()]);

        let found = tracker.find(item.short_id()).unwrap().unwrap();
        assert_eq!(found.input, "# Title");
        assert_eq!(found.output, "Title");
    }

    #[test]
    fn test_newest_first_and_capped() {
        let temp_dir = TempDir::new().unwrap();
        let tracker = HistoryTracker::new(temp_dir.path());

        for i in 0..25 {
            tracker.record(&format!("input {}", i), "out").unwrap();
        }

        let history = tracker.get_recent(100).unwrap();
        assert_eq!(history.len(), MAX_ENTRIES);
        assert_eq!(history[0].input, "input 24");
        assert_eq!(history[MAX_ENTRIES - 1].input, "input 5");
    }

    #[test]
    fn test_title_truncation() {
        let short = HistoryItem::new("short input", "");
        assert_eq!(short.title, "short input");

        let exact = "a".repeat(30);
        assert_eq!(HistoryItem::new(&exact, "").title, exact);

        let long = "The quick brown fox jumps over the lazy dog";
        assert_eq!(
            HistoryItem::new(long, "").title,
            "The quick brown fox jumps over..."
        );

        let wide = "é".repeat(31);
        assert_eq!(
            HistoryItem::new(&wide, "").title,
            format!("{}...", "é".repeat(30))
        );
    }

    #[test]
    fn test_blank_input_is_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let tracker = HistoryTracker::new(temp_dir.path());

        assert!(tracker.record("  \n\t", "").unwrap().is_none());
        assert!(tracker.get_recent(10).unwrap().is_empty());
    }

    #[test]
    fn test_delete() {
        let temp_dir = TempDir::new().unwrap();
        let tracker = HistoryTracker::new(temp_dir.path());

        let first = tracker.record("first", "1").unwrap().unwrap();
        let second = tracker.record("second", "2").unwrap().unwrap();

        let removed = tracker.delete(&first.id).unwrap().unwrap();
        assert_eq!(removed.input, "first");

        let history = tracker.get_recent(10).unwrap();
        assert_eq!(history, vec![second]);
        assert!(tracker.delete(&first.id).unwrap().is_none());
        assert!(tracker.delete("").unwrap().is_none());
    }

    #[test]
    fn test_clear() {
        let temp_dir = TempDir::new().unwrap();
        let tracker = HistoryTracker::new(temp_dir.path());

        tracker.record("text", "text").unwrap();
        tracker.clear().unwrap();
        assert!(tracker.get_recent(10).unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("history.json"), "not json").unwrap();

        let tracker = HistoryTracker::new(temp_dir.path());
        let err = tracker.get_recent(10).unwrap_err();
        assert!(err.to_string().contains("Failed to parse history file"));
    }
}
