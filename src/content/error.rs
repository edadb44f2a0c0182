//! Error types for the content pipeline

use thiserror::Error;

/// Errors raised by a [`ContentStore`](super::ContentStore)
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("IO error on {name}: {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised while loading a single article
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("No such article: {0}")]
    NotFound(String),

    #[error("{file}: missing required field `{field}`")]
    MissingField { file: String, field: &'static str },

    #[error("{file}: unparseable date `{value}`")]
    InvalidDate { file: String, value: String },

    #[error("{0}: article body is empty")]
    EmptyContent(String),

    #[error("{file}: invalid front-matter: {message}")]
    FrontMatter { file: String, message: String },

    #[error(transparent)]
    Io(StoreError),
}

impl From<StoreError> for ContentError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(name) => ContentError::NotFound(name),
            other => ContentError::Io(other),
        }
    }
}

impl ContentError {
    /// Whether this error means the article simply does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, ContentError::NotFound(_))
    }
}
