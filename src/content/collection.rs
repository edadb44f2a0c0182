//! Collection accessor - listing and lookup over a content store

use indexmap::map::Entry;
use indexmap::IndexMap;
use std::cmp::Ordering;

use super::{Article, ArticleLoader, ContentError, ContentStore};

/// Read-only view of all articles in a store.
///
/// Nothing is cached: every call goes back to the store.
pub struct Collection<S> {
    store: S,
    loader: ArticleLoader,
}

impl<S: ContentStore> Collection<S> {
    pub fn new(store: S, loader: ArticleLoader) -> Self {
        Self { store, loader }
    }

    /// All articles, newest first.
    ///
    /// Articles sharing a date are ordered by slug. Files that fail to load
    /// are logged and skipped. When two files map to one slug, the one whose
    /// extension comes first wins, as in [`Collection::get_by_slug`].
    pub fn list_all(&self) -> Result<Vec<Article>, ContentError> {
        let mut files: IndexMap<String, (usize, String)> = IndexMap::new();

        for name in self.store.list_files()? {
            let (Some(slug), Some(rank)) =
                (self.loader.slug_for(&name), self.loader.extension_rank(&name))
            else {
                continue;
            };
            match files.entry(slug) {
                Entry::Vacant(entry) => {
                    entry.insert((rank, name));
                }
                Entry::Occupied(mut entry) => {
                    if rank < entry.get().0 {
                        let (_, shadowed) = entry.insert((rank, name));
                        tracing::warn!("Ignoring {}: shadowed by {}", shadowed, entry.get().1);
                    } else {
                        tracing::warn!("Ignoring {}: shadowed by {}", name, entry.get().1);
                    }
                }
            }
        }

        let mut articles = Vec::with_capacity(files.len());
        for (_, name) in files.into_values() {
            match self.loader.load(&self.store, &name) {
                Ok(article) => articles.push(article),
                Err(e) => {
                    tracing::warn!("Skipping {}: {}", name, e);
                }
            }
        }

        articles.sort_by(newest_first);
        Ok(articles)
    }

    /// Look up one article. A slug with no file behind it is `Ok(None)`.
    pub fn get_by_slug(&self, slug: &str) -> Result<Option<Article>, ContentError> {
        if !is_plain_slug(slug) {
            tracing::debug!("Rejected slug {:?}", slug);
            return Ok(None);
        }

        for name in self.loader.file_names(slug) {
            match self.loader.load(&self.store, &name) {
                Ok(article) => return Ok(Some(article)),
                Err(e) if e.is_not_found() => continue,
                Err(e) => return Err(e),
            }
        }

        Ok(None)
    }

    /// The (newer, older) articles around `slug` in listing order
    pub fn neighbors(
        &self,
        slug: &str,
    ) -> Result<(Option<Article>, Option<Article>), ContentError> {
        let mut articles = self.list_all()?;
        let Some(pos) = articles.iter().position(|a| a.slug == slug) else {
            return Ok((None, None));
        };

        let older = if pos + 1 < articles.len() {
            Some(articles.remove(pos + 1))
        } else {
            None
        };
        let newer = if pos > 0 {
            Some(articles.remove(pos - 1))
        } else {
            None
        };

        Ok((newer, older))
    }
}

/// Sort order for listings: date descending, then slug ascending
fn newest_first(a: &Article, b: &Article) -> Ordering {
    b.published
        .cmp(&a.published)
        .then_with(|| a.slug.cmp(&b.slug))
}

/// A slug must name a file directly inside the store
fn is_plain_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.contains(['/', '\\'])
        && !slug.contains("..")
        && !slug.starts_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::MemoryStore;

    fn article_text(title: &str, date: &str) -> String {
        format!(
            "---\ntitle: {}\ndate: \"{}\"\n---\n\nBody of {}.",
            title, date, title
        )
    }

    fn sample_store() -> MemoryStore {
        MemoryStore::new()
            .with_file("older.mdx", article_text("Older", "2023-02-01"))
            .with_file("newest.mdx", article_text("Newest", "2024-06-01"))
            .with_file("middle-b.mdx", article_text("Middle B", "2024-01-01"))
            .with_file("middle-a.mdx", article_text("Middle A", "2024-01-01"))
            .with_file("notes.txt", "not an article")
    }

    #[test]
    fn test_list_all_is_newest_first_with_slug_ties() {
        let collection = Collection::new(sample_store(), ArticleLoader::default());
        let slugs: Vec<_> = collection
            .list_all()
            .unwrap()
            .into_iter()
            .map(|a| a.slug)
            .collect();
        assert_eq!(slugs, vec!["newest", "middle-a", "middle-b", "older"]);
    }

    #[test]
    fn test_list_all_dates_are_non_increasing() {
        let collection = Collection::new(sample_store(), ArticleLoader::default());
        let articles = collection.list_all().unwrap();
        for pair in articles.windows(2) {
            assert!(pair[0].published >= pair[1].published);
        }
    }

    #[test]
    fn test_list_all_skips_malformed_articles() {
        let store = sample_store().with_file("broken.mdx", "---\ntitle: Broken\n---\nno date");
        let collection = Collection::new(store, ArticleLoader::default());
        let articles = collection.list_all().unwrap();
        assert_eq!(articles.len(), 4);
        assert!(articles.iter().all(|a| a.slug != "broken"));
    }

    #[test]
    fn test_get_by_slug() {
        let collection = Collection::new(sample_store(), ArticleLoader::default());
        let article = collection.get_by_slug("middle-a").unwrap().unwrap();
        assert_eq!(article.slug, "middle-a");
        assert_eq!(article.title, "Middle A");
    }

    #[test]
    fn test_get_by_slug_missing_is_none() {
        let collection = Collection::new(sample_store(), ArticleLoader::default());
        assert!(collection.get_by_slug("does-not-exist").unwrap().is_none());
        assert!(collection.get_by_slug("").unwrap().is_none());
        assert!(collection.get_by_slug("../secrets").unwrap().is_none());
        // Wrong extension is not an article
        assert!(collection.get_by_slug("notes").unwrap().is_none());
    }

    #[test]
    fn test_get_by_slug_malformed_is_error() {
        let store = MemoryStore::new().with_file("broken.mdx", "---\ntitle: Broken\n---\nbody");
        let collection = Collection::new(store, ArticleLoader::default());
        assert!(collection.get_by_slug("broken").is_err());
    }

    #[test]
    fn test_get_by_slug_tries_each_extension() {
        let store = MemoryStore::new().with_file("plain.md", article_text("Plain", "2024-01-01"));
        let loader = ArticleLoader::new(vec!["mdx".into(), "md".into()], 200);
        let collection = Collection::new(store, loader);
        assert_eq!(collection.get_by_slug("plain").unwrap().unwrap().source, "plain.md");
    }

    #[test]
    fn test_one_article_per_slug_across_extensions() {
        let store = MemoryStore::new()
            .with_file("post.md", article_text("From MD", "2024-01-01"))
            .with_file("post.mdx", article_text("From MDX", "2024-01-01"))
            .with_file("other.md", article_text("Other", "2023-01-01"));
        let loader = ArticleLoader::new(vec!["mdx".into(), "md".into()], 200);
        let collection = Collection::new(store, loader);

        let articles = collection.list_all().unwrap();
        let found: Vec<_> = articles
            .iter()
            .map(|a| (a.slug.as_str(), a.title.as_str()))
            .collect();
        assert_eq!(found, vec![("post", "From MDX"), ("other", "Other")]);

        let post = collection.get_by_slug("post").unwrap().unwrap();
        assert_eq!(post, articles[0]);
    }

    #[test]
    fn test_neighbors() {
        let collection = Collection::new(sample_store(), ArticleLoader::default());

        let (newer, older) = collection.neighbors("middle-a").unwrap();
        assert_eq!(newer.unwrap().slug, "newest");
        assert_eq!(older.unwrap().slug, "middle-b");

        let (newer, older) = collection.neighbors("newest").unwrap();
        assert!(newer.is_none());
        assert_eq!(older.unwrap().slug, "middle-a");

        let (newer, older) = collection.neighbors("ghost").unwrap();
        assert!(newer.is_none() && older.is_none());
    }
}
