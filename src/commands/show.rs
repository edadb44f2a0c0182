//! Show a single article

use anyhow::Result;
use std::io::Write;

use crate::helpers::format_date_str;
use crate::Site;

/// Print one article's metadata, or its rendered HTML
pub fn run(site: &Site, slug: &str, html: bool) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_article(site, slug, html, &mut out)
}

pub fn write_article<W: Write>(site: &Site, slug: &str, html: bool, out: &mut W) -> Result<()> {
    let collection = site.collection();
    let Some(article) = collection.get_by_slug(slug)? else {
        anyhow::bail!("No such article: {}", slug);
    };

    if html {
        let rendered = site.markdown().render(&article.content)?;
        write!(out, "{}", rendered)?;
        return Ok(());
    }

    writeln!(out, "{}", article.title)?;
    writeln!(
        out,
        "{} · {}",
        format_date_str(&article.date, &site.config.date_format),
        article.reading_time
    )?;
    if let Some(summary) = article.summary() {
        writeln!(out, "\n{}", summary)?;
    }

    let (newer, older) = collection.neighbors(&article.slug)?;
    if let Some(newer) = newer {
        writeln!(out, "\nNewer: {} [{}]", newer.title, newer.slug)?;
    }
    if let Some(older) = older {
        writeln!(out, "Older: {} [{}]", older.title, older.slug)?;
    }

    Ok(())
}
