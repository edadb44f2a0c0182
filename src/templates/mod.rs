//! Built-in site templates using the Tera template engine
//!
//! Templates are embedded in the binary. Autoescaping is off: every string
//! that reaches a template is escaped while building the context, and
//! rendered article HTML is inserted as is.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::helpers::format_date_str;

/// Template renderer with the embedded site templates
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        // Context strings are escaped up front
        tera.autoescape_on(vec![]);

        // Register all templates
        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            ("index.html", include_str!("site/index.html")),
            ("blog.html", include_str!("site/blog.html")),
            ("article.html", include_str!("site/article.html")),
            ("talks.html", include_str!("site/talks.html")),
            ("404.html", include_str!("site/404.html")),
            // Partials
            (
                "partials/article_card.html",
                include_str!("site/partials/article_card.html"),
            ),
            (
                "partials/talk_card.html",
                include_str!("site/partials/talk_card.html"),
            ),
        ])?;

        // Custom filters
        tera.register_filter("truncate_chars", truncate_chars_filter);
        tera.register_filter("date_format", date_format_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: truncate by character count.
///
/// Input is already HTML-escaped, so an entity counts as one character and
/// is never cut in half.
fn truncate_chars_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("truncate_chars", "value", String, value);
    let length = match args.get("length") {
        Some(val) => tera::try_get_value!("truncate_chars", "length", usize, val),
        None => 150,
    };
    let omission = match args.get("omission") {
        Some(val) => tera::try_get_value!("truncate_chars", "omission", String, val),
        None => "…".to_string(),
    };

    match truncate_escaped(&s, length) {
        Some(truncated) => Ok(tera::Value::String(format!(
            "{}{}",
            truncated.trim_end(),
            omission
        ))),
        None => Ok(tera::Value::String(s)),
    }
}

/// Prefix of `s` holding `length` visible characters, or `None` if `s` is
/// already short enough
fn truncate_escaped(s: &str, length: usize) -> Option<&str> {
    let mut count = 0;
    let mut chars = s.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if count == length {
            return Some(&s[..i]);
        }
        // Swallow the rest of an entity like `&amp;` or `&#39;`
        if c == '&' {
            if let Some(end) = s[i..].find(';').filter(|&end| end <= 8) {
                while chars.next_if(|&(j, _)| j <= i + end).is_some() {}
            }
        }
        count += 1;
    }

    None
}

/// Tera filter: format a front-matter date string with a Moment.js format
fn date_format_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("date_format", "value", String, value);
    let format = match args.get("format") {
        Some(val) => tera::try_get_value!("date_format", "format", String, val),
        None => "YYYY-MM-DD".to_string(),
    };

    Ok(tera::Value::String(format_date_str(&s, &format)))
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub author: String,
    pub description: String,
    pub language: String,
    pub date_format: String,
    pub home_url: String,
    pub blog_url: String,
    pub talks_url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArticleData {
    pub slug: String,
    pub title: String,
    pub date: String,
    pub url: String,
    pub reading_time: String,
    pub summary: Option<String>,
    pub excerpt: Option<String>,
    /// Rendered body, only filled for the article page itself
    pub html: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NavArticle {
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TalkData {
    pub id: String,
    pub title: String,
    pub event: String,
    pub date: String,
    pub location: Option<String>,
    pub video: Option<String>,
    pub slides: Option<String>,
    pub tags: Vec<String>,
    pub featured: bool,
    /// Description split on blank lines
    pub paragraphs: Vec<String>,
}
