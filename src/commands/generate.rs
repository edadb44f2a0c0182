//! Generate static files

use anyhow::Result;
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode};
use std::sync::mpsc::channel;
use std::time::Duration;

use crate::generator::{GenerateReport, Generator};
use crate::{Site, CONFIG_FILE};

/// Generate the static site
pub fn run(site: &Site) -> Result<()> {
    build(site).map(|_| ())
}

/// Load every article and talk, then write the site
pub fn build(site: &Site) -> Result<GenerateReport> {
    let start = std::time::Instant::now();

    let articles = site.collection().list_all()?;
    let talks = site.talks();
    tracing::info!(
        "Loaded {} articles and {} talks",
        articles.len(),
        talks.list_all().len()
    );

    let report = Generator::new(site)?.generate(&articles, &talks)?;

    let duration = start.elapsed();
    tracing::info!("Generated in {:.2}s", duration.as_secs_f64());

    Ok(report)
}

/// Watch the content directory and config, regenerating on change
pub async fn watch(site: &Site) -> Result<()> {
    let (tx, rx) = channel();
    let mut debouncer = new_debouncer(Duration::from_millis(300), tx)?;

    if site.content_dir.exists() {
        debouncer
            .watcher()
            .watch(&site.content_dir, RecursiveMode::NonRecursive)?;
    }
    let config_path = site.base_dir.join(CONFIG_FILE);
    if config_path.exists() {
        debouncer
            .watcher()
            .watch(&config_path, RecursiveMode::NonRecursive)?;
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    let base_dir = site.base_dir.clone();
    tokio::task::spawn_blocking(move || {
        for result in rx {
            match result {
                Ok(events) => {
                    tracing::info!("{} file(s) changed, regenerating...", events.len());
                    // Re-read the config too; it may be what changed
                    match Site::new(&base_dir).and_then(|site| run(&site)) {
                        Ok(()) => {}
                        Err(e) => tracing::error!("Generation failed: {}", e),
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            }
        }
    })
    .await?;

    Ok(())
}
