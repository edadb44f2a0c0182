//! List site content

use anyhow::Result;
use std::io::Write;

use crate::helpers::format_date_str;
use crate::Site;

/// List site content by type
pub fn run(site: &Site, content_type: &str) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_listing(site, content_type, &mut out)
}

/// Write the listing for `content_type` to `out`
pub fn write_listing<W: Write>(site: &Site, content_type: &str, out: &mut W) -> Result<()> {
    match content_type {
        "article" | "articles" | "post" | "posts" => {
            let articles = site.collection().list_all()?;
            writeln!(out, "Articles ({}):", articles.len())?;
            for article in articles {
                writeln!(
                    out,
                    "  {} - {} [{}] ({})",
                    format_date_str(&article.date, "YYYY-MM-DD"),
                    article.title,
                    article.slug,
                    article.reading_time
                )?;
            }
        }
        "talk" | "talks" => {
            let talks = site.talks();
            writeln!(out, "Talks ({}):", talks.list_all().len())?;
            for talk in talks.list_all() {
                let star = if talk.featured { "*" } else { " " };
                writeln!(out, " {}{} - {} @ {}", star, talk.date, talk.title, talk.event)?;
            }
        }
        "featured" => {
            let talks = site.talks();
            let featured = talks.list_featured();
            writeln!(out, "Featured talks ({}):", featured.len())?;
            for talk in featured {
                writeln!(out, "  {} - {} @ {}", talk.date, talk.title, talk.event)?;
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: articles, talks, featured",
                content_type
            );
        }
    }

    Ok(())
}
