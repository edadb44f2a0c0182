//! Markdown rendering with syntax highlighting

use anyhow::Result;
use lazy_static::lazy_static;
use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use regex::Regex;
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::{styled_line_to_highlighted_html, IncludeBackground};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use crate::config::HighlightConfig;

/// Language used for fences without a tag
const DEFAULT_LANG: &str = "plaintext";

lazy_static! {
    static ref TITLE_RE: Regex = Regex::new(r#"(title|filename)="([^"]*)""#).unwrap();
    static ref LINES_RE: Regex = Regex::new(r"\{([\d,\s-]*)\}").unwrap();
}

/// Parsed info string of a fenced code block, e.g. ```` ```rust {2,4-6} title="main.rs" ````
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeMeta {
    pub lang: String,
    pub title: Option<String>,
    /// 1-based inclusive line ranges to emphasize
    pub highlighted: Vec<(usize, usize)>,
}

impl CodeMeta {
    pub fn parse(info: &str) -> Self {
        let mut title = None;
        let mut rest = info.to_string();

        // Quoted values may contain braces or spaces, so strip them first.
        // `filename=` is accepted but not displayed.
        if let Some(caps) = TITLE_RE.captures(info) {
            if &caps[1] == "title" {
                title = Some(caps[2].to_string());
            }
            rest = TITLE_RE.replace_all(&rest, "").into_owned();
        }

        let mut highlighted = Vec::new();
        if let Some(caps) = LINES_RE.captures(&rest) {
            highlighted = parse_line_ranges(&caps[1]);
        }
        let rest = LINES_RE.replace_all(&rest, " ");

        // Whatever word is left first is the language
        let lang = rest
            .split_whitespace()
            .next()
            .unwrap_or(DEFAULT_LANG)
            .to_string();

        Self {
            lang,
            title,
            highlighted,
        }
    }

    /// Whether the 1-based `line` is emphasized
    pub fn is_highlighted(&self, line: usize) -> bool {
        self.highlighted
            .iter()
            .any(|&(start, end)| (start..=end).contains(&line))
    }
}

/// Parse "1,3-5" into [(1, 1), (3, 5)], ignoring junk
fn parse_line_ranges(ranges: &str) -> Vec<(usize, usize)> {
    ranges.split(',')
        .filter_map(|part| {
            let part = part.trim();
            match part.split_once('-') {
                Some((a, b)) => {
                    let a = a.trim().parse::<usize>().ok()?;
                    let b = b.trim().parse::<usize>().ok()?;
                    Some((a.min(b), a.max(b)))
                }
                None => part.parse::<usize>().ok().map(|n| (n, n)),
            }
        })
        .filter(|&(start, _)| start > 0)
        .collect()
}

/// Markdown renderer with syntax highlighting
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
    highlight: bool,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self::with_options("base16-ocean.dark", true)
    }

    /// Create with custom settings
    pub fn with_options(theme: &str, highlight: bool) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: theme.to_string(),
            highlight,
        }
    }

    pub fn from_config(config: &HighlightConfig) -> Self {
        let renderer = Self::with_options(&config.theme, config.enable);
        if config.enable && !renderer.theme_set.themes.contains_key(&config.theme) {
            tracing::warn!(
                "Unknown highlight theme {:?}, falling back to a built-in one",
                config.theme
            );
        }
        renderer
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> Result<String> {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_HEADING_ATTRIBUTES
            | Options::ENABLE_GFM;
        let parser = Parser::new_ext(markdown, options);

        let mut events: Vec<Event> = Vec::new();
        let mut code_block: Option<CodeMeta> = None;
        let mut code_block_content = String::new();

        // Code blocks are buffered and replaced by one HTML event each;
        // everything else passes through untouched
        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    code_block = Some(match kind {
                        CodeBlockKind::Fenced(info) => CodeMeta::parse(&info),
                        CodeBlockKind::Indented => CodeMeta::parse(""),
                    });
                    code_block_content.clear();
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some(meta) = code_block.take() {
                        let block = self.render_code_block(&code_block_content, &meta)?;
                        events.push(Event::Html(CowStr::from(block)));
                    }
                }
                Event::Text(text) if code_block.is_some() => {
                    code_block_content.push_str(&text);
                }
                _ => events.push(event),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());

        Ok(html_output)
    }

    fn theme(&self) -> Option<&Theme> {
        self.theme_set
            .themes
            .get(&self.theme_name)
            .or_else(|| self.theme_set.themes.values().next())
    }

    /// Render one fenced block as a `<figure>` with one `<span class="line">` per line
    fn render_code_block(&self, code: &str, meta: &CodeMeta) -> Result<String> {
        // Plain escaped lines when highlighting is off or no theme loaded
        let lines = match (self.highlight, self.theme()) {
            (true, Some(theme)) => self.highlight_lines(code, &meta.lang, theme)?,
            _ => code.lines().map(html_escape).collect(),
        };

        let mut body = String::with_capacity(code.len() * 2);
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                body.push('\n');
            }
            let class = if meta.is_highlighted(i + 1) {
                "line line--highlighted"
            } else {
                "line"
            };
            // An empty span would collapse the line
            let line = if line.is_empty() { " " } else { line.as_str() };
            body.push_str(&format!(r#"<span class="{}">{}</span>"#, class, line));
        }

        let lang = html_escape(&meta.lang);
        let title = meta
            .title
            .as_ref()
            .map(|t| format!(r#" data-title="{}""#, html_escape(t)))
            .unwrap_or_default();
        // Theme background on the <pre>, as syntect's own output does
        let style = match (self.highlight, self.theme().and_then(|t| t.settings.background)) {
            (true, Some(bg)) => format!(
                r#" style="background-color:#{:02x}{:02x}{:02x};""#,
                bg.r, bg.g, bg.b
            ),
            _ => String::new(),
        };

        Ok(format!(
            r#"<figure data-code-block><pre data-language="{lang}"{title}{style}><code data-language="{lang}">{body}</code></pre></figure>"#
        ))
    }

    /// Highlight `code` line by line; each entry is the inner HTML of one line
    fn highlight_lines(&self, code: &str, lang: &str, theme: &Theme) -> Result<Vec<String>> {
        // "rust", "rs" and file extensions all resolve; unknown is plain text
        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let mut highlighter = HighlightLines::new(syntax, theme);
        let mut lines = Vec::new();

        for line in LinesWithEndings::from(code) {
            let ranges = highlighter.highlight_line(line, &self.syntax_set)?;
            // Line breaks are added by the caller
            let trimmed: Vec<_> = ranges
                .into_iter()
                .map(|(style, text)| (style, text.trim_end_matches(['\n', '\r'])))
                .filter(|(_, text)| !text.is_empty())
                .collect();
            lines.push(styled_line_to_highlighted_html(
                &trimmed,
                IncludeBackground::No,
            )?);
        }

        Ok(lines)
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Simple HTML escaping
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic_markdown() {
        let renderer = MarkdownRenderer::new();
        let html = renderer
            .render("# Hello World\n\nThis is a *test* with [a link](/about).")
            .unwrap();
        assert!(html.contains("<h1>Hello World</h1>"));
        assert!(html.contains("<em>test</em>"));
        assert!(html.contains(r#"<a href="/about">a link</a>"#));
    }

    #[test]
    fn test_render_lists_and_images() {
        let renderer = MarkdownRenderer::new();
        let html = renderer
            .render("- one\n- two\n\n![alt text](/img/a.png)")
            .unwrap();
        assert!(html.contains("<li>one</li>"));
        assert!(html.contains(r#"<img src="/img/a.png" alt="alt text" />"#));
    }

    #[test]
    fn test_render_code_block() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```rust\nfn main() {}\n```").unwrap();
        assert!(html.contains(r#"data-language="rust""#));
        assert!(html.contains(r#"<span class="line">"#));
        assert!(html.contains("style=\"color:"));
        assert!(!html.contains("```"));
    }

    #[test]
    fn test_line_highlight_annotations() {
        let renderer = MarkdownRenderer::with_options("base16-ocean.dark", false);
        let md = "```python {2}\na = 1\nb = 2\nc = 3\n```";
        let html = renderer.render(md).unwrap();
        assert!(html.contains(r#"<span class="line">a = 1</span>"#));
        assert!(html.contains(r#"<span class="line line--highlighted">b = 2</span>"#));
        assert!(html.contains(r#"<span class="line">c = 3</span>"#));
    }

    #[test]
    fn test_untagged_block_is_plaintext_and_escaped() {
        let renderer = MarkdownRenderer::with_options("base16-ocean.dark", false);
        let html = renderer.render("```\n<div>\n\nend\n```").unwrap();
        assert!(html.contains(r#"data-language="plaintext""#));
        assert!(html.contains("&lt;div&gt;"));
        // Empty lines keep a placeholder so they still take up height
        assert!(html.contains(r#"<span class="line"> </span>"#));
    }

    #[test]
    fn test_code_meta_parse() {
        let meta = CodeMeta::parse(r#"ts {1,3-5} title="app.ts""#);
        assert_eq!(meta.lang, "ts");
        assert_eq!(meta.title.as_deref(), Some("app.ts"));
        assert_eq!(meta.highlighted, vec![(1, 1), (3, 5)]);
        assert!(meta.is_highlighted(4));
        assert!(!meta.is_highlighted(2));

        let meta = CodeMeta::parse(r#"js{2} filename="x.js""#);
        assert_eq!(meta.lang, "js");
        assert_eq!(meta.title, None);
        assert_eq!(meta.highlighted, vec![(2, 2)]);

        let meta = CodeMeta::parse("");
        assert_eq!(meta.lang, "plaintext");
        assert!(meta.highlighted.is_empty());
    }

    #[test]
    fn test_render_is_deterministic() {
        let renderer = MarkdownRenderer::new();
        let md = "Intro\n\n```go {1}\npackage main\n```\n";
        assert_eq!(renderer.render(md).unwrap(), renderer.render(md).unwrap());
    }
}
