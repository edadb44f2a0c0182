//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::talks::Talk;
use crate::terminal::ScriptEntry;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub content_dir: String,
    pub public_dir: String,

    // Writing
    /// File extensions recognized as articles, without the leading dot
    pub extensions: Vec<String>,
    pub words_per_minute: usize,
    #[serde(default)]
    pub highlight: HighlightConfig,

    // Date format (Moment.js style)
    pub date_format: String,

    // Speaking engagements; empty means the built-in catalog
    #[serde(default)]
    pub talks: Vec<Talk>,

    // Terminal widget script; empty means the built-in script
    #[serde(default)]
    pub terminal: Vec<ScriptEntry>,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Folio".to_string(),
            description: String::new(),
            author: "John Doe".to_string(),
            language: "en".to_string(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),

            content_dir: "content/blog".to_string(),
            public_dir: "public".to_string(),

            extensions: vec!["mdx".to_string()],
            words_per_minute: 200,
            highlight: HighlightConfig::default(),

            date_format: "MMMM D, YYYY".to_string(),

            talks: Vec::new(),
            terminal: Vec::new(),
            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        if config.words_per_minute == 0 {
            anyhow::bail!("words_per_minute must be greater than zero");
        }
        Ok(config)
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub enable: bool,
    /// Name of a syntect built-in theme
    pub theme: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enable: true,
            theme: "base16-ocean.dark".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.content_dir, "content/blog");
        assert_eq!(config.extensions, vec!["mdx"]);
        assert_eq!(config.words_per_minute, 200);
        assert!(config.talks.is_empty());
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: Juan's Site
author: Juan
extensions: [mdx, md]
highlight:
  theme: InspiredGitHub
talks:
  - id: rustconf
    title: Ownership in Practice
    description: A talk.
    event: RustConf
    date: "2024-09-10"
    featured: true
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "Juan's Site");
        assert_eq!(config.extensions, vec!["mdx", "md"]);
        assert_eq!(config.highlight.theme, "InspiredGitHub");
        assert!(config.highlight.enable);
        assert_eq!(config.talks.len(), 1);
        assert!(config.talks[0].featured);
        assert!(config.talks[0].tags.is_empty());
    }

    #[test]
    fn test_load_rejects_zero_reading_speed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("_config.yml");
        fs::write(&path, "words_per_minute: 0\n").unwrap();
        assert!(SiteConfig::load(&path).is_err());
    }
}
