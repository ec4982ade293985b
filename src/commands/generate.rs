//! Generate static files

use anyhow::{bail, Result};
use notify::Watcher;
use std::sync::mpsc::{channel, RecvTimeoutError};
use std::time::{Duration, Instant};

use crate::content::loader::ContentLoader;
use crate::generator::{BuildReport, Generator};
use crate::Site;

/// Minimum pause between two rebuilds in watch mode
const DEBOUNCE: Duration = Duration::from_millis(500);

/// Generate the static site, failing if any page could not be built
pub fn run(site: &Site) -> Result<()> {
    let report = build(site)?;

    if !report.is_success() {
        for (route, err) in &report.failed {
            tracing::error!("{}: {}", route, err);
        }
        bail!(
            "{} page(s) failed to build, {} written",
            report.failed.len(),
            report.written.len()
        );
    }

    Ok(())
}

/// Load content and write every page, returning the per-page report
pub fn build(site: &Site) -> Result<BuildReport> {
    let start = Instant::now();

    let loader = ContentLoader::new(site);
    let (posts, pages) = loader.load()?;
    tracing::info!("Loaded {} posts and {} pages", posts.len(), pages.len());

    let report = Generator::new(site)?.generate(posts, pages)?;

    tracing::info!("Generated in {:.2}s", start.elapsed().as_secs_f64());
    Ok(report)
}

/// Watch the source directory and config file, regenerating on change
pub async fn watch(site: &Site) -> Result<()> {
    let (tx, rx) = channel();

    let mut watcher = notify::recommended_watcher(move |res| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;

    watcher.watch(&site.source_dir, notify::RecursiveMode::Recursive)?;

    let config_path = site.base_dir.join("_config.yml");
    if config_path.exists() {
        watcher.watch(&config_path, notify::RecursiveMode::NonRecursive)?;
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    let mut last_rebuild = Instant::now();

    loop {
        match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(_event) => {
                if last_rebuild.elapsed() > DEBOUNCE {
                    tracing::info!("File changed, regenerating...");
                    // Config edits take effect on the next build
                    match Site::new(&site.base_dir).and_then(|site| run(&site)) {
                        Ok(()) => tracing::info!("Regenerated"),
                        Err(e) => tracing::error!("Generation failed: {:#}", e),
                    }
                    last_rebuild = Instant::now();
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    Ok(())
}
