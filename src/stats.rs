//! Size and readability statistics for cleaned text

use serde::{Deserialize, Serialize};

/// Average reading speed used for the read-time estimate
pub const WORDS_PER_MINUTE: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TextStats {
    pub words: usize,
    /// Length of the untrimmed input, in characters
    pub chars: usize,
    /// Estimated reading time in whole minutes, rounded up
    pub read_time: usize,
}

/// Count words and characters and estimate reading time.
///
/// Zero words reads in zero minutes; anything else rounds up to the next
/// whole minute.
pub fn calculate_stats(text: &str) -> TextStats {
    let words = text.split_whitespace().count();
    TextStats {
        words,
        chars: text.chars().count(),
        read_time: words.div_ceil(WORDS_PER_MINUTE),
    }
}

impl TextStats {
    pub fn summary(&self) -> String {
        format!(
            "{} words, {} characters, {} min read",
            self.words, self.chars, self.read_time
        )
    }
}
