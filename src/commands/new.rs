//! Create a new article

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::Site;

/// Scaffold `<content_dir>/<slug>.<ext>` with a metadata header
pub fn create_article(site: &Site, title: &str, slug: Option<&str>) -> Result<PathBuf> {
    let slug = match slug {
        Some(s) => slug::slugify(s),
        None => slug::slugify(title),
    };
    if slug.is_empty() {
        anyhow::bail!("Cannot derive a slug from {:?}", title);
    }

    let ext = site
        .config
        .extensions
        .first()
        .map(|e| e.trim_start_matches('.'))
        .unwrap_or("mdx");

    fs::create_dir_all(&site.content_dir)?;
    let file_path = site.content_dir.join(format!("{}.{}", slug, ext));

    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let now = chrono::Local::now();
    let header = serde_yaml::to_string(&Scaffold {
        title,
        date: now.format("%Y-%m-%d").to_string(),
        description: "",
    })?;
    let content = format!("---\n{}---\n\nWrite here.\n", header);

    fs::write(&file_path, content)?;
    tracing::info!("Created: {:?}", file_path);

    Ok(file_path)
}

#[derive(serde::Serialize)]
struct Scaffold<'a> {
    title: &'a str,
    date: String,
    description: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_article_is_loadable() {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::new(dir.path()).unwrap();

        let path = create_article(&site, "Ownership: A Field Guide", None).unwrap();
        assert!(path.ends_with("ownership-a-field-guide.mdx"));

        let article = site
            .collection()
            .get_by_slug("ownership-a-field-guide")
            .unwrap()
            .unwrap();
        assert_eq!(article.title, "Ownership: A Field Guide");
        assert_eq!(article.reading_time, "1 min read");
    }

    #[test]
    fn test_new_article_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let site = Site::new(dir.path()).unwrap();
        create_article(&site, "Twice", None).unwrap();
        assert!(create_article(&site, "Twice", None).is_err());
        assert!(create_article(&site, "Again", Some("twice")).is_err());
    }
}
