//! Content loader - reads posts and pages from the source directory

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use super::{ContentStore, FrontMatter, MarkdownRenderer, RawContent};
use crate::Site;

/// Directory under the source directory holding blog posts
pub const POSTS_DIR: &str = "_posts";

/// Loads content from the source directory
pub struct ContentLoader<'a> {
    site: &'a Site,
    renderer: MarkdownRenderer,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(site: &'a Site) -> Self {
        let highlight = &site.config.highlight;
        let renderer = MarkdownRenderer::with_options(&highlight.theme, highlight.line_number);
        Self { site, renderer }
    }

    /// Load posts and pages into stores, failing on slug collisions
    pub fn load(&self) -> Result<(ContentStore, ContentStore)> {
        let excerpt_length = self.site.config.excerpt_length;
        let posts = ContentStore::load(self.load_posts()?, excerpt_length)?;
        let pages = ContentStore::load(self.load_pages()?, excerpt_length)?;
        Ok((posts, pages))
    }

    /// Raw entries for every post under source/_posts
    pub fn load_posts(&self) -> Result<Vec<RawContent>> {
        let posts_dir = self.site.source_dir.join(POSTS_DIR);
        if !posts_dir.exists() {
            return Ok(Vec::new());
        }

        let mut posts = Vec::new();
        for path in markdown_files(&posts_dir, false) {
            match self.load_entry(&posts_dir, &path) {
                Ok(Some(raw)) => posts.push(raw),
                Ok(None) => tracing::debug!("Skipping unpublished post {:?}", path),
                Err(e) => tracing::warn!("Failed to load post {:?}: {:#}", path, e),
            }
        }

        Ok(posts)
    }

    /// Raw entries for standalone pages (markdown outside `_` directories)
    pub fn load_pages(&self) -> Result<Vec<RawContent>> {
        let source_dir = &self.site.source_dir;
        if !source_dir.exists() {
            return Ok(Vec::new());
        }

        let mut pages = Vec::new();
        for path in markdown_files(source_dir, true) {
            match self.load_entry(source_dir, &path) {
                Ok(Some(raw)) => pages.push(raw),
                Ok(None) => tracing::debug!("Skipping unpublished page {:?}", path),
                Err(e) => tracing::warn!("Failed to load page {:?}: {:#}", path, e),
            }
        }

        Ok(pages)
    }

    /// Read, split and render one file. `None` for unpublished entries.
    fn load_entry(&self, base: &Path, path: &Path) -> Result<Option<RawContent>> {
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        let (front_matter, body) = FrontMatter::parse(&content)?;

        if !front_matter.published && !self.site.config.render_drafts {
            return Ok(None);
        }

        let relative = relative_path(base, path);
        let html = self.renderer.render(body)?;

        Ok(Some(RawContent::new(relative, front_matter, html)))
    }
}

/// Markdown files below `dir`, sorted by path for deterministic builds
fn markdown_files(dir: &Path, skip_underscore_dirs: bool) -> Vec<std::path::PathBuf> {
    WalkDir::new(dir)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            !(skip_underscore_dirs
                && entry.depth() > 0
                && entry.file_type().is_dir()
                && is_hidden_name(entry.file_name().to_str()))
        })
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.is_file() && is_markdown_file(p))
        .collect()
}

fn is_hidden_name(name: Option<&str>) -> bool {
    name.map(|n| n.starts_with('_') || n.starts_with('.'))
        .unwrap_or(false)
}

/// `/`-separated path of `path` relative to `base`
fn relative_path(base: &Path, path: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Check if a file is a markdown file
pub fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ContentError;

    fn write(base: &Path, relative: &str, content: &str) {
        let path = base.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn site_in(dir: &Path) -> Site {
        Site::new(dir).unwrap()
    }

    #[test]
    fn test_load_posts_and_pages() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source");
        write(
            &source,
            "_posts/hello-world.md",
            "---\ntitle: Hello\ndate: 2021-06-01\n---\n\nFirst **post**.",
        );
        write(
            &source,
            "_posts/2021/road-trip/index.md",
            "---\ndate: 2021-08-01\n---\nOn the road.",
        );
        write(&source, "about.md", "---\ntitle: About Me\n---\nHi there.");
        write(&source, "_drafts/wip.md", "Not a page.");
        write(&source, "notes.txt", "Not markdown.");

        let site = site_in(dir.path());
        let loader = ContentLoader::new(&site);

        let posts = loader.load_posts().unwrap();
        let paths: Vec<_> = posts.iter().map(|p| p.path.as_str()).collect();
        assert_eq!(paths, vec!["2021/road-trip/index.md", "hello-world.md"]);
        assert!(posts[1].body.contains("<strong>post</strong>"));

        let pages = loader.load_pages().unwrap();
        let paths: Vec<_> = pages.iter().map(|p| p.path.as_str()).collect();
        assert_eq!(paths, vec!["about.md"]);

        let (posts, pages) = loader.load().unwrap();
        assert!(posts.get("2021/road-trip").is_some());
        assert_eq!(posts.get("hello-world").unwrap().title(), "Hello");
        assert_eq!(pages.get("about").unwrap().title(), "About Me");
    }

    #[test]
    fn test_unpublished_posts_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source");
        write(&source, "_posts/draft.md", "---\ntitle: WIP\npublished: false\n---\nSoon.");
        write(&source, "_posts/live.md", "---\ntitle: Live\n---\nNow.");

        let mut site = site_in(dir.path());
        let posts = ContentLoader::new(&site).load_posts().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].path, "live.md");

        site.config.render_drafts = true;
        let posts = ContentLoader::new(&site).load_posts().unwrap();
        assert_eq!(posts.len(), 2);
    }

    #[test]
    fn test_duplicate_slug_aborts_load() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source");
        write(&source, "_posts/My Post.md", "One");
        write(&source, "_posts/my-post.md", "Two");

        let site = site_in(dir.path());
        let err = ContentLoader::new(&site).load().unwrap_err();
        let content_err = err.downcast_ref::<ContentError>().unwrap();
        assert!(matches!(content_err, ContentError::DuplicateSlug { slug, .. } if slug == "my-post"));
    }

    #[test]
    fn test_missing_source_dir_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let site = site_in(dir.path());
        let (posts, pages) = ContentLoader::new(&site).load().unwrap();
        assert!(posts.is_empty());
        assert!(pages.is_empty());
    }
}
