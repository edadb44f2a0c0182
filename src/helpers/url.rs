//! URL helper functions

use crate::config::SiteConfig;

/// Generate a URL with the root path
///
/// # Examples
/// ```ignore
/// url_for(&config, "/blog/") // -> "/portfolio/blog/"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    let root = config.root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Site-relative URL of an article page
pub fn article_url(config: &SiteConfig, slug: &str) -> String {
    url_for(config, &format!("blog/{}/", encode_url(slug)))
}

/// Percent-encode one path segment
pub fn encode_url(segment: &str) -> String {
    percent_encoding::utf8_percent_encode(segment, SEGMENT).to_string()
}

/// Everything but unreserved URL characters
const SEGMENT: &percent_encoding::AsciiSet = &percent_encoding::NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SiteConfig {
        SiteConfig {
            root: "/portfolio/".to_string(),
            ..SiteConfig::default()
        }
    }

    #[test]
    fn test_url_for() {
        let config = test_config();
        assert_eq!(url_for(&config, "/talks/"), "/portfolio/talks/");
        assert_eq!(url_for(&config, ""), "/portfolio/");
        assert_eq!(url_for(&SiteConfig::default(), "blog/"), "/blog/");
    }

    #[test]
    fn test_article_url_encodes_slug() {
        let config = SiteConfig::default();
        assert_eq!(article_url(&config, "hello-world"), "/blog/hello-world/");
        assert_eq!(article_url(&config, "año nuevo"), "/blog/a%C3%B1o%20nuevo/");
    }
}
