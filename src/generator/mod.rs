//! Generator module - writes the static site using the built-in Tera templates

use anyhow::{Context as _, Result};
use chrono::Datelike;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::path::{Path, PathBuf};
use tera::Context;

use crate::content::{html_escape, Article, MarkdownRenderer};
use crate::helpers::{article_url, url_for};
use crate::talks::{Talk, TalkCatalog};
use crate::templates::{ArticleData, NavArticle, SiteData, TalkData, TemplateRenderer};
use crate::terminal::{prompt_for, render_frame, Phase, TerminalScript, TerminalSession, Timing};
use crate::Site;

/// How many articles the home page shows
const HOME_ARTICLES: usize = 3;

/// Summary of one generation run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GenerateReport {
    pub articles: usize,
    pub talks: usize,
    pub files: Vec<PathBuf>,
}

/// Static site generator
pub struct Generator {
    site: Site,
    renderer: TemplateRenderer,
    markdown: MarkdownRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(site: &Site) -> Result<Self> {
        Ok(Self {
            site: site.clone(),
            renderer: TemplateRenderer::new()?,
            markdown: MarkdownRenderer::from_config(&site.config.highlight),
        })
    }

    /// Generate the entire site. `articles` must already be in listing order.
    pub fn generate(&self, articles: &[Article], talks: &TalkCatalog) -> Result<GenerateReport> {
        fs::create_dir_all(&self.site.public_dir)?;

        let site_data = self.build_site_data();
        let mut report = GenerateReport {
            articles: articles.len(),
            talks: talks.list_all().len(),
            files: Vec::new(),
        };

        let cards: Vec<ArticleData> = articles.iter().map(|a| self.article_card(a)).collect();
        let featured: Vec<TalkData> = talks.list_featured().into_iter().map(talk_data).collect();
        let others: Vec<TalkData> = talks.list_others().into_iter().map(talk_data).collect();

        // Home page
        let mut context = self.create_base_context(&site_data);
        context.insert("articles", &cards[..cards.len().min(HOME_ARTICLES)]);
        context.insert("featured_talks", &featured);
        context.insert("terminal", &html_escape(&self.terminal_preview()));
        report.files.push(self.write_page("index.html", &context, "")?);

        // Blog index
        let mut context = self.create_base_context(&site_data);
        context.insert("articles", &cards);
        report.files.push(self.write_page("blog.html", &context, "blog")?);

        // Article pages
        for (i, article) in articles.iter().enumerate() {
            let path = self.generate_article_page(articles, i, &site_data)?;
            tracing::debug!("Generated {:?} for {}", path, article.slug);
            report.files.push(path);
        }

        // Talks
        let mut context = self.create_base_context(&site_data);
        context.insert("featured_talks", &featured);
        context.insert("other_talks", &others);
        report.files.push(self.write_page("talks.html", &context, "talks")?);

        // Not found
        let context = self.create_base_context(&site_data);
        let html = self.renderer.render("404.html", &context)?;
        let path = self.site.public_dir.join("404.html");
        write_file(&path, &html)?;
        report.files.push(path);

        tracing::info!(
            "Generated {} files ({} articles, {} talks)",
            report.files.len(),
            report.articles,
            report.talks
        );

        Ok(report)
    }

    fn generate_article_page(
        &self,
        articles: &[Article],
        index: usize,
        site_data: &SiteData,
    ) -> Result<PathBuf> {
        let article = &articles[index];
        let mut data = self.article_card(article);
        data.html = self
            .markdown
            .render(&article.content)
            .with_context(|| format!("Failed to render {}", article.source))?;

        let newer = index
            .checked_sub(1)
            .and_then(|i| articles.get(i))
            .map(|a| self.nav(a));
        let older = articles.get(index + 1).map(|a| self.nav(a));

        let mut context = self.create_base_context(site_data);
        context.insert("article", &data);
        context.insert("newer", &newer);
        context.insert("older", &older);

        self.write_page("article.html", &context, &format!("blog/{}", article.slug))
    }

    /// Build site data for templates
    fn build_site_data(&self) -> SiteData {
        let config = &self.site.config;
        SiteData {
            title: html_escape(&config.title),
            author: html_escape(&config.author),
            description: html_escape(&config.description),
            language: html_escape(&config.language),
            date_format: config.date_format.clone(),
            home_url: url_for(config, ""),
            blog_url: url_for(config, "blog/"),
            talks_url: url_for(config, "talks/"),
        }
    }

    /// Create a base context with common variables
    fn create_base_context(&self, site_data: &SiteData) -> Context {
        let mut context = Context::new();
        context.insert("site", site_data);
        context.insert("current_year", &chrono::Utc::now().year().to_string());
        context
    }

    fn article_card(&self, article: &Article) -> ArticleData {
        ArticleData {
            slug: article.slug.clone(),
            title: html_escape(&article.title),
            date: html_escape(&article.date),
            url: article_url(&self.site.config, &article.slug),
            reading_time: article.reading_time.clone(),
            summary: article.summary().map(html_escape),
            excerpt: article.excerpt.as_deref().map(html_escape),
            html: String::new(),
        }
    }

    fn nav(&self, article: &Article) -> NavArticle {
        NavArticle {
            title: html_escape(&article.title),
            url: article_url(&self.site.config, &article.slug),
        }
    }

    /// First command of the terminal script with its response, as a still frame
    fn terminal_preview(&self) -> String {
        let script = TerminalScript::from_config(&self.site.config);
        let mut session = TerminalSession::new(script, Timing::default());
        let mut rng = StdRng::seed_from_u64(0);
        while session.phase() != Phase::Holding {
            session.advance(&mut rng);
        }
        render_frame(&prompt_for(&self.site.config.author), &session, false)
    }

    /// Render `template` to `<dir>/index.html` under the public directory
    fn write_page(&self, template: &str, context: &Context, dir: &str) -> Result<PathBuf> {
        let html = self.renderer.render(template, context)?;
        let path = self.site.public_dir.join(dir).join("index.html");
        write_file(&path, &html)?;
        Ok(path)
    }
}

fn talk_data(talk: &Talk) -> TalkData {
    TalkData {
        id: html_escape(&talk.id),
        title: html_escape(&talk.title),
        event: html_escape(&talk.event),
        date: html_escape(&talk.date),
        location: talk.location.as_deref().map(html_escape),
        video: talk.video.as_deref().map(html_escape),
        slides: talk.slides.as_deref().map(html_escape),
        tags: talk.tags.iter().map(|t| html_escape(t)).collect(),
        featured: talk.featured,
        paragraphs: talk
            .description
            .split("\n\n")
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(html_escape)
            .collect(),
    }
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents).with_context(|| format!("Failed to write {:?}", path))?;
    Ok(())
}
