//! Content module - articles, their stores, loading and rendering

mod article;
mod collection;
mod error;
mod frontmatter;
mod loader;
mod markdown;
mod store;

pub use article::{reading_time, word_count, Article, DEFAULT_WORDS_PER_MINUTE};
pub use collection::Collection;
pub use error::{ContentError, StoreError};
pub use frontmatter::{parse_date_string, FrontMatter, FrontMatterError};
pub use loader::ArticleLoader;
pub use markdown::{html_escape, CodeMeta, MarkdownRenderer};
pub use store::{ContentStore, FsStore, MemoryStore};
