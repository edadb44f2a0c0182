//! folio-rs: a portfolio and blog site engine
//!
//! Articles are Markdown files with a metadata header, read straight from a
//! content directory on every request. Talks come from the site config, and
//! a scripted terminal widget can be played in a real terminal or embedded
//! as a still frame in the generated home page.

pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod talks;
pub mod templates;
pub mod terminal;

use anyhow::Result;
use std::path::{Path, PathBuf};

use content::{ArticleLoader, Collection, FsStore, MarkdownRenderer};
use talks::TalkCatalog;
use terminal::TerminalScript;

/// Name of the site configuration file
pub const CONFIG_FILE: &str = "_config.yml";

/// A site rooted at a directory
#[derive(Debug, Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Directory holding article files
    pub content_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
}

impl Site {
    /// Open a site from a directory; a missing config file means defaults
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            tracing::debug!("Loading config from {:?}", config_path);
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    pub fn with_config(base_dir: PathBuf, config: config::SiteConfig) -> Self {
        let content_dir = base_dir.join(&config.content_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Self {
            config,
            base_dir,
            content_dir,
            public_dir,
        }
    }

    /// Articles of this site, read from the content directory
    pub fn collection(&self) -> Collection<FsStore> {
        Collection::new(
            FsStore::new(&self.content_dir),
            ArticleLoader::from_config(&self.config),
        )
    }

    pub fn talks(&self) -> TalkCatalog {
        TalkCatalog::from_config(&self.config)
    }

    pub fn terminal_script(&self) -> TerminalScript {
        TerminalScript::from_config(&self.config)
    }

    pub fn markdown(&self) -> MarkdownRenderer {
        MarkdownRenderer::from_config(&self.config.highlight)
    }

    /// Generate the static site
    pub fn generate(&self) -> Result<()> {
        commands::generate::run(self)
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }

    /// Create a new article
    pub fn new_article(&self, title: &str, slug: Option<&str>) -> Result<PathBuf> {
        commands::new::create_article(self, title, slug)
    }
}
