//! Front-matter parsing

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Why a metadata header could not be read
#[derive(Error, Debug)]
pub enum FrontMatterError {
    #[error("YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unterminated {0} block")]
    Unterminated(&'static str),
}

/// Accepts a string, or a bare number (`date: 2024`), as a string
fn scalar_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct ScalarString;

    impl<'de> Visitor<'de> for ScalarString {
        type Value = Option<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a number")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value))
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }
    }

    deserializer.deserialize_any(ScalarString)
}

/// Metadata header of an article
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: Option<String>,
    #[serde(deserialize_with = "scalar_as_string")]
    pub date: Option<String>,
    pub description: Option<String>,
    pub excerpt: Option<String>,

    /// Additional custom fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse(content: &str) -> Result<(Self, &str), FrontMatterError> {
        let content = content.trim_start_matches('\u{feff}').trim_start();

        if content.starts_with("---") {
            return Self::parse_yaml(content);
        }

        if content.starts_with("+++") {
            return Self::parse_toml(content);
        }

        if let Some(rest) = content.strip_prefix(";;;") {
            return Self::parse_json(rest);
        }

        // No front-matter found
        Ok((FrontMatter::default(), content))
    }

    fn parse_yaml(content: &str) -> Result<(Self, &str), FrontMatterError> {
        let rest = &content[3..]; // Skip opening ---
        let rest = rest.trim_start_matches(['\n', '\r']);

        let Some((yaml_content, remaining)) = split_block(rest, "---") else {
            // No closing ---, treat as no front-matter
            return Ok((FrontMatter::default(), content));
        };

        if yaml_content.trim().is_empty() {
            return Ok((FrontMatter::default(), remaining));
        }

        // A leading `---` is also a Markdown thematic break; only treat the
        // block as metadata when it has at least one `key: value` line.
        if !yaml_content.lines().any(looks_like_yaml_key) {
            return Ok((FrontMatter::default(), content));
        }

        let fm = serde_yaml::from_str::<FrontMatter>(yaml_content)?;
        Ok((fm, remaining))
    }

    fn parse_toml(content: &str) -> Result<(Self, &str), FrontMatterError> {
        let rest = content[3..].trim_start_matches(['\n', '\r']);
        let (toml_content, remaining) =
            split_block(rest, "+++").ok_or(FrontMatterError::Unterminated("TOML"))?;

        // TOML has a native date type; flatten it to its string form first.
        let mut table: toml::Table = toml::from_str(toml_content)?;
        for (_, value) in table.iter_mut() {
            if let toml::Value::Datetime(dt) = value {
                *value = toml::Value::String(dt.to_string());
            }
        }

        let fm: FrontMatter = toml::Value::Table(table).try_into()?;
        Ok((fm, remaining))
    }

    fn parse_json(rest: &str) -> Result<(Self, &str), FrontMatterError> {
        let end_pos = rest
            .find(";;;")
            .ok_or(FrontMatterError::Unterminated("JSON"))?;
        let json_content = rest[..end_pos].trim();
        let remaining = rest[end_pos + 3..].trim_start_matches(['\n', '\r']);

        let fm: FrontMatter = serde_json::from_str(json_content)?;
        Ok((fm, remaining))
    }

    /// Parse the date string into a timestamp
    pub fn parse_date(&self) -> Option<DateTime<FixedOffset>> {
        self.date.as_deref().and_then(parse_date_string)
    }
}

/// Split `rest` at the first line consisting of `fence`
fn split_block<'a>(rest: &'a str, fence: &str) -> Option<(&'a str, &'a str)> {
    // An empty block has its closing fence on the very first line
    let (block, after) = if rest.starts_with(fence) {
        ("", &rest[fence.len()..])
    } else {
        let marker = format!("\n{}", fence);
        let end_pos = rest.find(&marker)?;
        (&rest[..end_pos], &rest[end_pos + marker.len()..])
    };
    // Drop whatever is left of the fence line
    let after = match after.find('\n') {
        Some(nl) => &after[nl + 1..],
        None => "",
    };
    Some((block, after.trim_start_matches(['\n', '\r'])))
}

/// Whether a line has the shape of a YAML `key: value` entry
fn looks_like_yaml_key(line: &str) -> bool {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return false;
    }
    let Some(colon_pos) = trimmed.find(':') else {
        return false;
    };
    let key = &trimmed[..colon_pos];
    let is_valid_key = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        && !matches!(key, "http" | "https" | "ftp");
    let after_colon = &trimmed[colon_pos + 1..];
    is_valid_key && (after_colon.is_empty() || after_colon.starts_with(' '))
}

/// Parse a date string in various formats.
///
/// Values without an offset are taken as UTC so that ordering does not
/// depend on the machine's local timezone.
pub fn parse_date_string(s: &str) -> Option<DateTime<FixedOffset>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt);
    }

    let utc = FixedOffset::east_opt(0)?;
    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(DateTime::<Utc>::from_naive_utc_and_offset(dt, Utc).with_timezone(&utc));
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            let dt = d.and_hms_opt(0, 0, 0)?;
            return Some(DateTime::<Utc>::from_naive_utc_and_offset(dt, Utc).with_timezone(&utc));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: "Hello"
date: "2024-01-01"
description: First post
excerpt: A short teaser
cover: /img/hello.png
---

This is the content.
"#;

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Hello"));
        assert_eq!(fm.date.as_deref(), Some("2024-01-01"));
        assert_eq!(fm.description.as_deref(), Some("First post"));
        assert_eq!(fm.excerpt.as_deref(), Some("A short teaser"));
        assert_eq!(
            fm.extra.get("cover").and_then(|v| v.as_str()),
            Some("/img/hello.png")
        );
        assert_eq!(remaining, "This is the content.\n");
    }

    #[test]
    fn test_unquoted_yaml_date() {
        let content = "---\ntitle: Bare\ndate: 2024-03-15\n---\nbody";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.date.as_deref(), Some("2024-03-15"));
        assert_eq!(remaining, "body");
    }

    #[test]
    fn test_parse_toml_frontmatter() {
        let content = "+++\ntitle = \"Toml\"\ndate = 2023-06-01\n+++\n\nBody here.";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Toml"));
        assert_eq!(fm.date.as_deref(), Some("2023-06-01"));
        assert_eq!(remaining, "Body here.");
    }

    #[test]
    fn test_parse_json_frontmatter() {
        let content = ";;;\n{\"title\": \"Json\", \"date\": \"2022-02-02\"}\n;;;\nBody.";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Json"));
        assert_eq!(remaining, "Body.");
    }

    #[test]
    fn test_unterminated_toml_is_an_error() {
        let content = "+++\ntitle = \"x\"\n";
        assert!(matches!(
            FrontMatter::parse(content),
            Err(FrontMatterError::Unterminated("TOML"))
        ));
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        let content = "---\ntitle: [unclosed\n---\nbody";
        assert!(matches!(
            FrontMatter::parse(content),
            Err(FrontMatterError::Yaml(_))
        ));
    }

    #[test]
    fn test_markdown_separator_not_yaml() {
        let content = r#"
---

Some random text with markdown lists:
- Item 1
- Item 2

---
More content here.
"#;

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, None);
        assert!(remaining.contains("Some random text"));
    }

    #[test]
    fn test_content_with_url_not_yaml() {
        let content = "---\nCheck out https://example.com/path\n---\nMore.";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, None);
        assert!(remaining.contains("https://example.com"));
    }

    #[test]
    fn test_empty_yaml_block() {
        let (fm, remaining) = FrontMatter::parse("---\n---\nbody").unwrap();
        assert_eq!(fm, FrontMatter::default());
        assert_eq!(remaining, "body");
    }

    #[test]
    fn test_crlf_yaml_frontmatter() {
        let content = "---\r\ntitle: Windows\r\ndate: 2024-02-02\r\n---\r\nBody text.\r\n";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("Windows"));
        assert_eq!(fm.date.as_deref(), Some("2024-02-02"));
        assert_eq!(remaining, "Body text.\r\n");
    }

    #[test]
    fn test_parse_date_formats() {
        let d = parse_date_string("2024-01-15").unwrap();
        assert_eq!(d.format("%Y-%m-%d %H:%M").to_string(), "2024-01-15 00:00");

        let d = parse_date_string("2024/01/15 10:30:00").unwrap();
        assert_eq!(d.format("%H:%M").to_string(), "10:30");

        let d = parse_date_string("2024-01-15T10:30:00+02:00").unwrap();
        assert_eq!(d.offset().local_minus_utc(), 2 * 3600);

        assert!(parse_date_string("yesterday").is_none());
    }
}
