//! Raw entries and the immutable records built from them

use chrono::NaiveDate;
use std::cell::OnceCell;

use super::fallback;
use super::FrontMatter;

/// An entry as yielded by the content loader
#[derive(Debug, Clone, PartialEq)]
pub struct RawContent {
    /// Path relative to the content directory, `/`-separated
    pub path: String,
    pub front_matter: FrontMatter,
    /// Rendered body (HTML)
    pub body: String,
}

impl RawContent {
    pub fn new(path: impl Into<String>, front_matter: FrontMatter, body: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            front_matter,
            body: body.into(),
        }
    }
}

/// A loaded content entry. Never mutated after creation.
#[derive(Debug, Clone)]
pub struct ContentRecord {
    slug: String,
    source: String,
    title: Option<String>,
    date: Option<NaiveDate>,
    description: Option<String>,
    layout: Option<String>,
    body: String,
    excerpt_length: usize,
    excerpt: OnceCell<String>,
}

impl ContentRecord {
    pub(crate) fn from_raw(raw: RawContent, slug: String, excerpt_length: usize) -> Self {
        let date = raw.front_matter.parse_date();
        let RawContent {
            path,
            front_matter,
            body,
        } = raw;

        Self {
            slug,
            source: path,
            title: front_matter.title,
            date,
            description: front_matter.description,
            layout: front_matter.layout,
            body,
            excerpt_length,
            excerpt: OnceCell::new(),
        }
    }

    /// Unique, URL-safe identifier
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Source path the record was loaded from
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Display title, falling back to the slug
    pub fn title(&self) -> &str {
        fallback::title(self.title.as_deref(), &self.slug)
    }

    /// Publish date, `None` when absent or unparseable
    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    /// Description, falling back to the excerpt
    pub fn description(&self) -> &str {
        fallback::description(self.description.as_deref(), || self.excerpt())
    }

    /// Plain-text excerpt of the body, computed on first use
    pub fn excerpt(&self) -> &str {
        self.excerpt
            .get_or_init(|| fallback::excerpt(&self.body, self.excerpt_length))
    }

    /// Layout requested in front-matter, if any
    pub fn layout(&self) -> Option<&str> {
        self.layout.as_deref()
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    #[cfg(test)]
    pub(crate) fn excerpt_computed(&self) -> bool {
        self.excerpt.get().is_some()
    }
}

// The memoized excerpt is derived data and does not take part in equality
impl PartialEq for ContentRecord {
    fn eq(&self, other: &Self) -> bool {
        self.slug == other.slug
            && self.source == other.source
            && self.title == other.title
            && self.date == other.date
            && self.description == other.description
            && self.layout == other.layout
            && self.body == other.body
            && self.excerpt_length == other.excerpt_length
    }
}

impl Eq for ContentRecord {}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: Option<&str>, description: Option<&str>, body: &str) -> ContentRecord {
        let fm = FrontMatter {
            title: title.map(String::from),
            description: description.map(String::from),
            date: Some("2021-06-01".to_string()),
            ..Default::default()
        };
        ContentRecord::from_raw(
            RawContent::new("hello-world.md", fm, body),
            "hello-world".to_string(),
            fallback::DEFAULT_EXCERPT_LENGTH,
        )
    }

    #[test]
    fn test_fields_from_front_matter() {
        let r = record(Some("Hello"), Some("Greetings"), "<p>Body</p>");
        assert_eq!(r.slug(), "hello-world");
        assert_eq!(r.source(), "hello-world.md");
        assert_eq!(r.title(), "Hello");
        assert_eq!(r.date(), NaiveDate::from_ymd_opt(2021, 6, 1));
        assert_eq!(r.description(), "Greetings");
    }

    #[test]
    fn test_excerpt_not_computed_when_description_given() {
        let r = record(None, Some("Given"), "<p>Body text</p>");
        assert_eq!(r.description(), "Given");
        assert!(!r.excerpt_computed());
    }

    #[test]
    fn test_excerpt_computed_once_on_demand() {
        let r = record(None, None, "<p>Body text</p>");
        assert!(!r.excerpt_computed());
        assert_eq!(r.title(), "hello-world");
        assert_eq!(r.description(), "Body text");
        assert!(r.excerpt_computed());
    }

    #[test]
    fn test_equality_ignores_excerpt_cache() {
        let a = record(None, None, "<p>Body text</p>");
        let b = a.clone();
        let _ = a.excerpt();
        assert_eq!(a, b);
    }
}
