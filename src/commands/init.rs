//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::config::SiteConfig;
use crate::CONFIG_FILE;

const DEFAULT_CONFIG: &str = r#"# Site
title: My Portfolio
description: ''
author: John Doe
language: en

# URL
url: http://example.com
root: /

# Directory
content_dir: content/blog
public_dir: public

# Writing
extensions: [mdx]
words_per_minute: 200
highlight:
  enable: true
  theme: base16-ocean.dark

# Dates are shown with Moment.js tokens
date_format: MMMM D, YYYY

# Speaking engagements; leave empty for the built-in list
talks: []

# Terminal widget script; leave empty for the built-in one
terminal: []
"#;

const HELLO_ARTICLE: &str = r#"---
title: "Hello World"
date: "{{ date }}"
description: "The first article on this site."
---

Welcome! Articles live in `content/blog` as Markdown files with a small
metadata header.

```rust {2}
fn main() {
    println!("Hello, world!");
}
```
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join(CONFIG_FILE);
    if config_path.exists() {
        anyhow::bail!("{:?} already contains a site", target_dir);
    }

    let defaults = SiteConfig::default();
    let content_dir = target_dir.join(&defaults.content_dir);
    fs::create_dir_all(&content_dir)?;

    fs::write(&config_path, DEFAULT_CONFIG)?;
    tracing::debug!("Wrote {:?}", config_path);

    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
    let hello = HELLO_ARTICLE.replace("{{ date }}", &today);
    fs::write(content_dir.join("hello-world.mdx"), hello)?;

    Ok(())
}
