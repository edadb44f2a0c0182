//! Content loader - turns one store file into an [`Article`]

use std::path::Path;

use super::article::{reading_time, DEFAULT_WORDS_PER_MINUTE};
use super::{Article, ContentError, ContentStore, FrontMatter};
use crate::config::SiteConfig;

/// Parses article files and derives their computed fields
#[derive(Debug, Clone)]
pub struct ArticleLoader {
    extensions: Vec<String>,
    words_per_minute: usize,
}

impl Default for ArticleLoader {
    fn default() -> Self {
        Self {
            extensions: vec!["mdx".to_string()],
            words_per_minute: DEFAULT_WORDS_PER_MINUTE,
        }
    }
}

impl ArticleLoader {
    pub fn new(extensions: Vec<String>, words_per_minute: usize) -> Self {
        let extensions = extensions
            .into_iter()
            .map(|e| e.trim_start_matches('.').to_string())
            .collect();
        Self {
            extensions,
            words_per_minute,
        }
    }

    pub fn from_config(config: &SiteConfig) -> Self {
        Self::new(config.extensions.clone(), config.words_per_minute)
    }

    /// Recognized file extensions, in lookup order
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Slug of a store file, or `None` when the extension is not an article one
    pub fn slug_for(&self, name: &str) -> Option<String> {
        self.extension_rank(name)?;
        Path::new(name)
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }

    /// Position of the file's extension in lookup order; lower wins
    pub fn extension_rank(&self, name: &str) -> Option<usize> {
        let ext = Path::new(name).extension()?.to_str()?;
        self.extensions.iter().position(|e| e == ext)
    }

    /// Candidate file names for a slug, one per recognized extension
    pub fn file_names(&self, slug: &str) -> impl Iterator<Item = String> + '_ {
        let slug = slug.to_string();
        self.extensions
            .iter()
            .map(move |ext| format!("{}.{}", slug, ext))
    }

    /// Load a single article by file name
    pub fn load<S: ContentStore + ?Sized>(
        &self,
        store: &S,
        name: &str,
    ) -> Result<Article, ContentError> {
        let raw = store.read_file(name)?;
        self.parse(name, &raw)
    }

    /// Build an article from the raw text of `name`
    pub fn parse(&self, name: &str, raw: &str) -> Result<Article, ContentError> {
        let (fm, body) = FrontMatter::parse(raw).map_err(|e| ContentError::FrontMatter {
            file: name.to_string(),
            message: e.to_string(),
        })?;

        let slug = Path::new(name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(name)
            .to_string();

        let date = fm.date.clone().ok_or_else(|| ContentError::MissingField {
            file: name.to_string(),
            field: "date",
        })?;
        let published = fm.parse_date().ok_or_else(|| ContentError::InvalidDate {
            file: name.to_string(),
            value: date.clone(),
        })?;

        let title = fm
            .title
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| ContentError::MissingField {
                file: name.to_string(),
                field: "title",
            })?;

        if body.trim().is_empty() {
            return Err(ContentError::EmptyContent(name.to_string()));
        }

        tracing::debug!("Loaded article {} ({})", slug, name);

        Ok(Article {
            slug,
            title,
            date,
            published,
            description: fm.description,
            excerpt: fm.excerpt,
            content: body.to_string(),
            reading_time: reading_time(body, self.words_per_minute),
            source: name.to_string(),
            extra: fm.extra,
        })
    }
}
