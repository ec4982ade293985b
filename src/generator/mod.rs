//! Generator module - writes the static site using the built-in Tera templates

mod feed;

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::compose::{compose, PageContent};
use crate::content::loader::is_markdown_file;
use crate::content::{ContentRecord, ContentStore};
use crate::error::MalformedContentError;
use crate::listing::{order_by, OrderBy};
use crate::nav::{NavigationShell, ShellChrome};
use crate::routes::{Route, RouteTable};
use crate::templates::TemplateRenderer;
use crate::Site;

pub use feed::atom_feed;

/// Outcome of one build
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Routes written to the public directory
    pub written: Vec<Route>,
    /// Pages skipped because their content could not be composed
    pub failed: Vec<(Route, MalformedContentError)>,
}

impl BuildReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Static site generator
pub struct Generator {
    site: Site,
    renderer: TemplateRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(site: &Site) -> Result<Self> {
        let renderer = TemplateRenderer::new(&site.config)?;

        Ok(Self {
            site: site.clone(),
            renderer,
        })
    }

    /// Generate the entire site
    ///
    /// Route collisions abort before anything is written. A page whose
    /// content is malformed is logged, recorded in the report and skipped.
    pub fn generate(&self, posts: ContentStore, pages: ContentStore) -> Result<BuildReport> {
        let config = &self.site.config;

        let routes = RouteTable::build(&posts, &pages)?;
        let order: OrderBy = config
            .order_by
            .parse()
            .with_context(|| format!("Invalid order_by '{}'", config.order_by))?;

        let posts = order_by(posts.into_records(), order);
        let pages = pages.into_records();

        fs::create_dir_all(&self.site.public_dir)
            .with_context(|| format!("Failed to create {:?}", self.site.public_dir))?;

        // Copy source assets (images, css, etc.)
        self.copy_source_assets()?;

        let chrome = ShellChrome::from_config(config);
        let date_format = config.date_format.as_str();
        let mut report = BuildReport::default();

        // Only posts that compose make it into the index, neighbour links and feed
        let posts = self.publishable_posts(&mut report, &chrome, posts, date_format);

        self.write_page(
            &mut report,
            &chrome,
            Route::index(),
            PageContent::index(&posts, date_format),
        )?;

        for (position, record) in posts.iter().enumerate() {
            if let Some(content) = PageContent::for_post(&posts, position, date_format) {
                self.write_page(&mut report, &chrome, Route::for_slug(record.slug()), content)?;
            }
        }

        for page in &pages {
            self.write_page(
                &mut report,
                &chrome,
                Route::for_slug(page.slug()),
                PageContent::for_page(page, date_format),
            )?;
        }

        self.write_page(&mut report, &chrome, Route::not_found(), PageContent::NotFound)?;

        if config.feed.enable {
            let path = self.site.public_dir.join("atom.xml");
            fs::write(&path, atom_feed(config, &posts))
                .with_context(|| format!("Failed to write {:?}", path))?;
            tracing::debug!("Generated: {:?}", path);
        }

        tracing::info!(
            "Wrote {} of {} routes ({} failed)",
            report.written.len(),
            routes.len(),
            report.failed.len()
        );

        Ok(report)
    }

    /// Drop posts whose own page cannot be composed, recording them as failed
    fn publishable_posts(
        &self,
        report: &mut BuildReport,
        chrome: &ShellChrome,
        posts: Vec<ContentRecord>,
        date_format: &str,
    ) -> Vec<ContentRecord> {
        let shell = NavigationShell::mount(chrome.clone());
        let verdicts: Vec<Option<MalformedContentError>> = posts
            .iter()
            .enumerate()
            .map(|(position, record)| {
                let route = Route::for_slug(record.slug());
                PageContent::for_post(&posts, position, date_format)
                    .and_then(|content| compose(&shell.layout_context(route), &content).err())
            })
            .collect();

        posts
            .into_iter()
            .zip(verdicts)
            .filter_map(|(record, verdict)| match verdict {
                None => Some(record),
                Some(e) => {
                    let route = Route::for_slug(record.slug());
                    tracing::error!("Skipping {}: {}", route, e);
                    report.failed.push((route, e));
                    None
                }
            })
            .collect()
    }

    /// Compose, render and write one page from a freshly mounted shell
    fn write_page(
        &self,
        report: &mut BuildReport,
        chrome: &ShellChrome,
        route: Route,
        content: PageContent,
    ) -> Result<()> {
        let shell = NavigationShell::mount(chrome.clone());

        let output = match compose(&shell.layout_context(route.clone()), &content) {
            Ok(output) => output,
            Err(e) => {
                tracing::error!("Skipping {}: {}", route, e);
                report.failed.push((route, e));
                return Ok(());
            }
        };

        let html = self
            .renderer
            .render(&output)
            .with_context(|| format!("Failed to render {}", route))?;

        let output_path = self.site.public_dir.join(route.output_file());
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&output_path, html)
            .with_context(|| format!("Failed to write {:?}", output_path))?;

        tracing::debug!("Generated: {:?}", output_path);
        report.written.push(route);
        Ok(())
    }

    /// Copy non-markdown files from the source directory
    fn copy_source_assets(&self) -> Result<()> {
        let source_dir = &self.site.source_dir;
        if !source_dir.exists() {
            return Ok(());
        }

        for entry in WalkDir::new(source_dir)
            .follow_links(true)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_private(e.path()))
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() || is_markdown_file(path) {
                continue;
            }

            let relative = path.strip_prefix(source_dir)?;
            let dest = self.site.public_dir.join(relative);

            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }

            fs::copy(path, &dest).with_context(|| format!("Failed to copy {:?}", path))?;
        }

        Ok(())
    }
}

/// `_drafts`, `_posts`, `.git` and friends never reach the public directory
fn is_private(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.starts_with('_') || n.starts_with('.'))
        .unwrap_or(false)
}
