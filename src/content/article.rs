//! Article model

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use std::collections::HashMap;

/// Words a reader gets through in a minute, unless configured otherwise
pub const DEFAULT_WORDS_PER_MINUTE: usize = 200;

/// A single blog article, materialized from its source file on every read
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Article {
    /// URL-safe identifier, the file name without its extension
    pub slug: String,

    pub title: String,

    /// Date exactly as written in the header
    pub date: String,

    /// Parsed form of `date`, used for ordering and display
    #[serde(skip)]
    pub published: DateTime<FixedOffset>,

    pub description: Option<String>,
    pub excerpt: Option<String>,

    /// Raw Markdown body
    pub content: String,

    /// e.g. "3 min read"
    pub reading_time: String,

    /// Name of the file within the content store
    pub source: String,

    /// Custom front-matter fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Article {
    /// Summary line for listings: description, then excerpt
    pub fn summary(&self) -> Option<&str> {
        self.description.as_deref().or(self.excerpt.as_deref())
    }

    /// Number of whitespace-separated words in the body
    pub fn word_count(&self) -> usize {
        word_count(&self.content)
    }
}

/// Whitespace-delimited token count
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Estimated reading time for `text`, formatted as "N min read".
///
/// Non-empty text always reads as at least one minute.
pub fn reading_time(text: &str, words_per_minute: usize) -> String {
    let words_per_minute = words_per_minute.max(1);
    let minutes = word_count(text).div_ceil(words_per_minute).max(1);
    format!("{} min read", minutes)
}
