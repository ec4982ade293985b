//! Atom feed

use crate::config::SiteConfig;
use crate::content::ContentRecord;
use crate::helpers::{date_xml, escape_xml, full_url_for};
use crate::routes::Route;

/// Used for `<updated>` when no post carries a date
const EPOCH: &str = "1970-01-01T00:00:00Z";

/// Render the Atom feed for posts already in listing order
///
/// Timestamps come from post dates only, so identical content yields an
/// identical feed.
pub fn atom_feed(config: &SiteConfig, posts: &[ContentRecord]) -> String {
    let posts: Vec<_> = posts.iter().take(config.feed.limit).collect();
    let updated = posts
        .iter()
        .filter_map(|p| p.date())
        .max()
        .map(|d| date_xml(&d))
        .unwrap_or_else(|| EPOCH.to_string());
    let home = full_url_for(config, "/");

    let mut feed = String::new();
    feed.push_str(r#"<?xml version="1.0" encoding="utf-8"?>"#);
    feed.push('\n');
    feed.push_str(r#"<feed xmlns="http://www.w3.org/2005/Atom">"#);
    feed.push('\n');
    feed.push_str(&format!("  <title>{}</title>\n", escape_xml(&config.title)));
    if !config.description.is_empty() {
        feed.push_str(&format!(
            "  <subtitle>{}</subtitle>\n",
            escape_xml(&config.description)
        ));
    }
    feed.push_str(&format!(
        "  <link href=\"{}\" rel=\"self\"/>\n",
        escape_xml(&full_url_for(config, "/atom.xml"))
    ));
    feed.push_str(&format!("  <link href=\"{}\"/>\n", escape_xml(&home)));
    feed.push_str(&format!("  <updated>{}</updated>\n", updated));
    feed.push_str(&format!("  <id>{}</id>\n", escape_xml(&home)));
    feed.push_str(&format!(
        "  <author><name>{}</name></author>\n",
        escape_xml(&config.author)
    ));

    for post in posts {
        let link = escape_xml(&full_url_for(config, Route::for_slug(post.slug()).as_str()));
        let date = post
            .date()
            .map(|d| date_xml(&d))
            .unwrap_or_else(|| EPOCH.to_string());

        feed.push_str("  <entry>\n");
        feed.push_str(&format!("    <title>{}</title>\n", escape_xml(post.title())));
        feed.push_str(&format!("    <link href=\"{}\"/>\n", link));
        feed.push_str(&format!("    <id>{}</id>\n", link));
        if post.date().is_some() {
            feed.push_str(&format!("    <published>{}</published>\n", date));
        }
        feed.push_str(&format!("    <updated>{}</updated>\n", date));
        feed.push_str(&format!(
            "    <summary>{}</summary>\n",
            escape_xml(post.description())
        ));
        feed.push_str("  </entry>\n");
    }

    feed.push_str("</feed>\n");
    feed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{load, FrontMatter, RawContent};
    use crate::listing::order;

    fn posts() -> Vec<ContentRecord> {
        let entry = |path: &str, title: &str, date: Option<&str>| {
            let fm = FrontMatter {
                title: Some(title.to_string()),
                date: date.map(String::from),
                ..Default::default()
            };
            RawContent::new(path, fm, "<p>Fish &amp; chips.</p>")
        };
        order(
            load(vec![
                entry("old.md", "Old", Some("2020-01-01")),
                entry("new.md", "New <3", Some("2021-06-01")),
                entry("undated.md", "Undated", None),
            ])
            .unwrap(),
        )
    }

    fn config() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.url = "https://example.com".to_string();
        config
    }

    #[test]
    fn test_atom_feed() {
        let feed = atom_feed(&config(), &posts());

        assert!(feed.contains("<updated>2021-06-01T00:00:00Z</updated>"));
        assert!(feed.contains("<title>New &lt;3</title>"));
        assert!(feed.contains(r#"<link href="https://example.com/new/"/>"#));
        assert!(feed.contains("<summary>Fish &amp; chips.</summary>"));
        assert!(feed.find("/new/").unwrap() < feed.find("/old/").unwrap());
        assert!(feed.find("/old/").unwrap() < feed.find("/undated/").unwrap());
    }

    #[test]
    fn test_atom_feed_limit() {
        let mut config = config();
        config.feed.limit = 1;
        let feed = atom_feed(&config, &posts());
        assert_eq!(feed.matches("<entry>").count(), 1);
        assert!(!feed.contains("/old/"));
    }
}
