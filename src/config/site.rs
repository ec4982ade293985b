//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub source_dir: String,
    pub public_dir: String,

    // Writing
    pub new_post_name: String,
    pub default_layout: String,
    pub render_drafts: bool,
    #[serde(default)]
    pub highlight: HighlightConfig,

    // Listing
    /// Maximum excerpt length in characters when a post has no description
    pub excerpt_length: usize,
    /// Index ordering, e.g. `-date` (newest first) or `title`
    pub order_by: String,

    // Date format (Moment.js style)
    pub date_format: String,

    // Layout chrome
    /// Sidebar navigation links, in display order (label -> path)
    pub menu: IndexMap<String, String>,
    /// Contact address shown as "Get In Touch"
    pub contact: Option<String>,
    /// Avatar image path shown at the top of the sidebar
    pub avatar: Option<String>,

    #[serde(default)]
    pub feed: FeedConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        let mut menu = IndexMap::new();
        menu.insert("Blog".to_string(), "/".to_string());
        menu.insert("About Me".to_string(), "/about/".to_string());

        Self {
            title: "Folio".to_string(),
            description: String::new(),
            author: "John Doe".to_string(),
            language: "en".to_string(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),

            source_dir: "source".to_string(),
            public_dir: "public".to_string(),

            new_post_name: ":title.md".to_string(),
            default_layout: "post".to_string(),
            render_drafts: false,
            highlight: HighlightConfig::default(),

            excerpt_length: 140,
            order_by: "-date".to_string(),

            date_format: "MMMM DD, YYYY".to_string(),

            menu,
            contact: None,
            avatar: None,

            feed: FeedConfig::default(),
            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {:?}", path))?;
        Ok(config)
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub line_number: bool,
    /// Syntect theme name
    pub theme: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            line_number: false,
            theme: "InspiredGitHub".to_string(),
        }
    }
}

/// Atom feed configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub enable: bool,
    pub limit: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            enable: true,
            limit: 20,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.title, "Folio");
        assert_eq!(config.excerpt_length, 140);
        assert_eq!(config.order_by, "-date");
        let links: Vec<_> = config.menu.iter().collect();
        assert_eq!(links[0], (&"Blog".to_string(), &"/".to_string()));
        assert_eq!(links[1], (&"About Me".to_string(), &"/about/".to_string()));
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: Michael's Blog
author: Michael
contact: hello@example.com
excerpt_length: 80
menu:
  Writing: /
  Projects: /projects/
  About: /about/
feed:
  enable: false
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "Michael's Blog");
        assert_eq!(config.contact.as_deref(), Some("hello@example.com"));
        assert_eq!(config.excerpt_length, 80);
        assert!(!config.feed.enable);
        assert_eq!(config.feed.limit, 20);
        let names: Vec<_> = config.menu.keys().cloned().collect();
        assert_eq!(names, vec!["Writing", "Projects", "About"]);
        // Untouched fields keep their defaults
        assert_eq!(config.date_format, "MMMM DD, YYYY");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("_config.yml");
        fs::write(&path, "title: On Disk\nroot: /blog/\n").unwrap();

        let config = SiteConfig::load(&path).unwrap();
        assert_eq!(config.title, "On Disk");
        assert_eq!(config.root, "/blog/");
    }
}
