//! Markdown stripping pipeline
//!
//! Converts lightweight Markdown into plain text through a fixed sequence of
//! pattern-based rewrite stages. Some stages always run, others are gated by
//! a [`MarkupOptions`] flag. Every stage sees the output of the one before
//! it, so the order in [`STAGES`] is part of the behavior.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Rule toggles for [`strip_markdown`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkupOptions {
    /// Reduce `[label](target)` to `label`. Links are currently reduced
    /// whether or not this is set.
    pub remove_links: bool,
    /// Drop fenced code blocks with their content instead of just the fences
    pub remove_code_blocks: bool,
    /// Strip bullet and ordered list markers from line starts
    pub flatten_lists: bool,
    /// Delete `![alt](target)` entirely
    pub remove_images: bool,
    /// Only trim trailing whitespace per line instead of collapsing blank runs
    pub preserve_spacing: bool,
}

impl Default for MarkupOptions {
    fn default() -> Self {
        Self {
            remove_links: true,
            remove_code_blocks: false,
            flatten_lists: false,
            remove_images: true,
            preserve_spacing: true,
        }
    }
}

// Thematic breaks: a line made only of one repeated marker character.
// `$` only sits before `\n`, so a CRLF line end needs its `\r` spelled out.
static HORIZONTAL_RULE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*(?:(?:-[ \t]*)+|(?:_[ \t]*)+|(?:\*[ \t]*)+)\r?$").unwrap()
});

static HEADER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^#+\s+(.*)$").unwrap());

// Horizontal whitespace only, so a quote never swallows the blank lines above it.
// A bare `>` continuation line becomes an empty line.
static BLOCKQUOTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*>(?:[ \t]+(.*))?\r?$").unwrap());

static FENCED_BLOCK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)```.*?```").unwrap());

static OPENING_FENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)```[a-z]*\n").unwrap());

const CLOSING_FENCE: &str = "\n```";

static INLINE_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`]+)`").unwrap());

// One alternation per marker width so an opener only pairs with the same marker
static STRONG: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*|__(.*?)__").unwrap());

static EMPHASIS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*(.*?)\*|_(.*?)_").unwrap());

static IMAGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"!\[.*?\]\(.*?\)").unwrap());

// The optional `!` lets image syntax be matched and handed back untouched
static LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(!?)\[(.*?)\]\(.*?\)").unwrap());

static BULLET_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^(\s*)[*+-]\s+").unwrap());

static ORDERED_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^(\s*)\d+\.\s+").unwrap());

static BLANK_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").unwrap());

/// A single named rewrite in the pipeline
pub struct Stage {
    pub name: &'static str,
    pub apply: fn(&str, &MarkupOptions) -> String,
}

/// Pipeline stages in application order. Never reorder.
pub static STAGES: [Stage; 10] = [
    Stage {
        name: "horizontal_rules",
        apply: horizontal_rules,
    },
    Stage {
        name: "headers",
        apply: headers,
    },
    Stage {
        name: "blockquotes",
        apply: blockquotes,
    },
    Stage {
        name: "code_blocks",
        apply: code_blocks,
    },
    Stage {
        name: "inline_code",
        apply: inline_code,
    },
    Stage {
        name: "emphasis",
        apply: emphasis,
    },
    Stage {
        name: "images",
        apply: images,
    },
    Stage {
        name: "links",
        apply: links,
    },
    Stage {
        name: "lists",
        apply: lists,
    },
    Stage {
        name: "spacing",
        apply: spacing,
    },
];

/// Names of the pipeline stages, in the order they run
pub fn stage_names() -> impl Iterator<Item = &'static str> {
    STAGES.iter().map(|stage| stage.name)
}

/// Strip Markdown syntax from `source`, keeping the readable content.
///
/// Total and deterministic: malformed markup degrades to best-effort text.
/// An unterminated fence, for instance, is left for the later stages to
/// treat as ordinary text. Empty input short-circuits to an empty string.
pub fn strip_markdown(source: &str, options: &MarkupOptions) -> String {
    if source.is_empty() {
        return String::new();
    }

    STAGES.iter().fold(source.to_string(), |text, stage| {
        let next = (stage.apply)(&text, options);
        trace!(
            stage = stage.name,
            before = text.len(),
            after = next.len(),
            "Applied strip stage"
        );
        next
    })
}

fn horizontal_rules(text: &str, _options: &MarkupOptions) -> String {
    HORIZONTAL_RULE.replace_all(text, "").into_owned()
}

fn headers(text: &str, _options: &MarkupOptions) -> String {
    HEADER.replace_all(text, "$1").into_owned()
}

fn blockquotes(text: &str, _options: &MarkupOptions) -> String {
    BLOCKQUOTE.replace_all(text, "$1").into_owned()
}

fn code_blocks(text: &str, options: &MarkupOptions) -> String {
    if options.remove_code_blocks {
        FENCED_BLOCK.replace_all(text, "").into_owned()
    } else {
        // Only the first opening fence goes, every closing fence goes
        OPENING_FENCE
            .replacen(text, 1, "")
            .replace(CLOSING_FENCE, "")
    }
}

fn inline_code(text: &str, _options: &MarkupOptions) -> String {
    INLINE_CODE.replace_all(text, "$1").into_owned()
}

fn emphasis(text: &str, _options: &MarkupOptions) -> String {
    let text = STRONG.replace_all(text, "${1}${2}");
    EMPHASIS.replace_all(&text, "${1}${2}").into_owned()
}

fn images(text: &str, options: &MarkupOptions) -> String {
    if options.remove_images {
        IMAGE.replace_all(text, "").into_owned()
    } else {
        text.to_string()
    }
}

fn links(text: &str, _options: &MarkupOptions) -> String {
    LINK.replace_all(text, |caps: &Captures| {
        if caps[1].is_empty() {
            caps[2].to_string()
        } else {
            caps[0].to_string()
        }
    })
    .into_owned()
}

fn lists(text: &str, options: &MarkupOptions) -> String {
    if !options.flatten_lists {
        return text.to_string();
    }
    let text = BULLET_MARKER.replace_all(text, "$1");
    ORDERED_MARKER.replace_all(&text, "$1").into_owned()
}

fn spacing(text: &str, options: &MarkupOptions) -> String {
    if options.preserve_spacing {
        text.split('\n')
            .map(str::trim_end)
            .collect::<Vec<_>>()
            .join("\n")
    } else {
        BLANK_RUN.replace_all(text, "\n\n").trim().to_string()
    }
}
