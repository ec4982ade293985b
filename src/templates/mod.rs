//! Built-in site templates using the Tera template engine
//!
//! Templates are embedded in the binary. The only input they receive is a
//! composed [`RenderableOutput`] plus a few site-wide settings.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::compose::RenderableOutput;
use crate::config::SiteConfig;
use crate::helpers::url_for;

/// Site-wide values available to every template as `site`
#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub url: String,
    pub root: String,
    pub language: String,
    pub description: String,
    pub feed: bool,
}

impl SiteData {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            url: config.url.clone(),
            root: config.root.clone(),
            language: config.language.clone(),
            description: config.description.clone(),
            feed: config.feed.enable,
        }
    }
}

/// Template renderer with the embedded site templates
pub struct TemplateRenderer {
    tera: Tera,
    site: SiteData,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new(config: &SiteConfig) -> Result<Self> {
        let mut tera = Tera::default();

        // Page bodies are already HTML; templates escape text fields explicitly
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            ("index.html", include_str!("site/index.html")),
            ("post.html", include_str!("site/post.html")),
            ("page.html", include_str!("site/page.html")),
            ("404.html", include_str!("site/404.html")),
            (
                "partials/sidebar.html",
                include_str!("site/partials/sidebar.html"),
            ),
            ("partials/nav.html", include_str!("site/partials/nav.html")),
        ])?;

        let root = config.root.clone();
        tera.register_filter(
            "url_for",
            move |value: &tera::Value, _args: &HashMap<String, tera::Value>| {
                let path = tera::try_get_value!("url_for", "value", String, value);
                Ok(tera::Value::String(url_for(&root, &path)))
            },
        );

        Ok(Self {
            tera,
            site: SiteData::from_config(config),
        })
    }

    /// Render a composed page
    pub fn render(&self, output: &RenderableOutput) -> Result<String> {
        let mut context = Context::new();
        context.insert("site", &self.site);
        context.insert("page", output);
        Ok(self.tera.render(output.template, &context)?)
    }
}
