//! Fallback policy for missing front-matter fields
//!
//! Applied in order, first non-blank value wins:
//!
//! - title: front-matter `title`, then the slug
//! - description: front-matter `description`, then the excerpt
//! - excerpt: text before a `<!-- more -->` marker, then the body's plain
//!   text cut on a word boundary
//!
//! Excerpts are plain text: tags are stripped and entities decoded, so
//! they must be escaped again wherever they end up in markup.

use lazy_static::lazy_static;
use regex::Regex;

/// Marker separating a hand-picked excerpt from the rest of the body
pub const MORE_MARKER: &str = "<!-- more -->";

/// Default excerpt length, in characters
pub const DEFAULT_EXCERPT_LENGTH: usize = 140;

lazy_static! {
    static ref TAG_RE: Regex = Regex::new(r"(?s)<!--.*?-->|<[^>]*>").unwrap();
    static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").unwrap();
    static ref ENTITY_RE: Regex =
        Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z]+);").unwrap();
}

/// Display title of an entry
pub fn title<'a>(explicit: Option<&'a str>, slug: &'a str) -> &'a str {
    non_blank(explicit).unwrap_or(slug)
}

/// Description of an entry; `excerpt` is only called when needed
pub fn description<'a>(explicit: Option<&'a str>, excerpt: impl FnOnce() -> &'a str) -> &'a str {
    match non_blank(explicit) {
        Some(description) => description,
        None => excerpt(),
    }
}

/// Plain-text excerpt of a rendered HTML body
pub fn excerpt(html: &str, max_chars: usize) -> String {
    if let Some((before, _)) = html.split_once(MORE_MARKER) {
        return plain_text(before);
    }
    truncate_words(&plain_text(html), max_chars)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Strip tags and comments, decode entities, collapse whitespace
fn plain_text(html: &str) -> String {
    let stripped = TAG_RE.replace_all(html, " ");
    let decoded = ENTITY_RE.replace_all(&stripped, |caps: &regex::Captures| {
        decode_entity(&caps[1]).unwrap_or_else(|| caps[0].to_string())
    });
    WHITESPACE_RE.replace_all(&decoded, " ").trim().to_string()
}

/// Character for an entity name such as `amp`, `#39` or `#x2F`
fn decode_entity(name: &str) -> Option<String> {
    let c = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => ' ',
        _ => {
            let code = match name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => name.strip_prefix('#')?.parse().ok()?,
            };
            char::from_u32(code)?
        }
    };
    Some(c.to_string())
}

/// Cut to at most `max_chars` characters, preferring a word boundary
fn truncate_words(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let cut: String = text.chars().take(max_chars).collect();
    let at_boundary = text
        .chars()
        .nth(max_chars)
        .map(char::is_whitespace)
        .unwrap_or(true);

    let kept = if at_boundary {
        cut.as_str()
    } else {
        match cut.rfind(char::is_whitespace) {
            Some(pos) if pos > 0 => &cut[..pos],
            _ => cut.as_str(),
        }
    };

    format!("{}…", kept.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_title_falls_back_to_slug() {
        assert_eq!(title(Some("Hello"), "hello-world"), "Hello");
        assert_eq!(title(None, "second-post"), "second-post");
        assert_eq!(title(Some("   "), "second-post"), "second-post");
    }

    #[test]
    fn test_description_is_lazy() {
        let calls = Cell::new(0);
        let excerpt = || {
            calls.set(calls.get() + 1);
            "from body"
        };
        assert_eq!(description(Some("Given"), excerpt), "Given");
        assert_eq!(calls.get(), 0);

        let excerpt = || {
            calls.set(calls.get() + 1);
            "from body"
        };
        assert_eq!(description(None, excerpt), "from body");
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_excerpt_strips_markup() {
        let html = "<h2>Intro</h2>\n<p>Some <em>styled</em>   text.</p>";
        assert_eq!(excerpt(html, 140), "Intro Some styled text.");
    }

    #[test]
    fn test_excerpt_truncates_on_word_boundary() {
        let html = "<p>The quick brown fox jumps over the lazy dog</p>";
        assert_eq!(excerpt(html, 12), "The quick…");
        // Cutting exactly at a space keeps the whole last word
        assert_eq!(excerpt(html, 15), "The quick brown…");
    }

    #[test]
    fn test_excerpt_single_long_word() {
        assert_eq!(excerpt("<p>Supercalifragilistic</p>", 5), "Super…");
    }

    #[test]
    fn test_excerpt_uses_more_marker() {
        let html = "<p>Hand picked.</p>\n<!-- more -->\n<p>Hidden rest of the post.</p>";
        assert_eq!(excerpt(html, 3), "Hand picked.");
    }

    #[test]
    fn test_excerpt_decodes_entities_before_truncating() {
        let html = "<p>Fish &amp; chips &lt;3 &#39;tis &#x2014; &copy;</p>";
        assert_eq!(excerpt(html, 140), "Fish & chips <3 'tis \u{2014} &copy;");
        // Never cut inside an entity
        assert_eq!(excerpt("<p>Salt &amp; vinegar</p>", 6), "Salt &…");
    }

    #[test]
    fn test_excerpt_counts_characters_not_bytes() {
        let html = "<p>héllo wörld ünïcode</p>";
        assert_eq!(excerpt(html, 11), "héllo wörld…");
    }
}
