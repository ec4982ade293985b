//! Slug derivation
//!
//! A slug comes from the explicit `slug` front-matter field when present,
//! otherwise from the entry's path relative to its content directory. Each
//! path segment is lower-cased and runs of whitespace or characters that are
//! not URL-safe collapse to a single hyphen.

/// Derive the slug for an entry from its relative path and optional override
///
/// ```ignore
/// derive_slug("Hello World.md", None)       // -> "hello-world"
/// derive_slug("2021/trip/index.md", None)   // -> "2021/trip"
/// derive_slug("x.md", Some("My Custom"))    // -> "my-custom"
/// ```
pub fn derive_slug(path: &str, explicit: Option<&str>) -> String {
    if let Some(explicit) = explicit.filter(|s| !s.trim().is_empty()) {
        return normalize(explicit);
    }

    let path = path.replace('\\', "/");
    let mut segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    if let Some(last) = segments.pop() {
        let stem = match last.rsplit_once('.') {
            Some((stem, _ext)) if !stem.is_empty() => stem,
            _ => last,
        };
        // `post/index.md` is addressed by its directory
        if stem != "index" || segments.is_empty() {
            segments.push(stem);
        }
    }

    normalize(&segments.join("/"))
}

/// Normalize a slug, segment by segment. Idempotent.
pub fn normalize(input: &str) -> String {
    input
        .split('/')
        .map(::slug::slugify)
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_from_filename() {
        assert_eq!(derive_slug("hello-world.md", None), "hello-world");
        assert_eq!(derive_slug("Second Post.markdown", None), "second-post");
        assert_eq!(derive_slug("What's New?.md", None), "what-s-new");
    }

    #[test]
    fn test_derive_from_nested_path() {
        assert_eq!(derive_slug("2021/My Trip.md", None), "2021/my-trip");
        assert_eq!(derive_slug("2021\\notes.md", None), "2021/notes");
    }

    #[test]
    fn test_index_file_uses_directory() {
        assert_eq!(derive_slug("road-trip/index.md", None), "road-trip");
        assert_eq!(derive_slug("index.md", None), "index");
    }

    #[test]
    fn test_explicit_override_wins() {
        assert_eq!(derive_slug("draft-1.md", Some("Launch Day")), "launch-day");
        // Blank overrides are ignored
        assert_eq!(derive_slug("draft-1.md", Some("  ")), "draft-1");
    }

    #[test]
    fn test_invalid_characters_collapse() {
        assert_eq!(normalize("  Rust   &  WebAssembly!! "), "rust-webassembly");
        assert_eq!(normalize("a//b"), "a/b");
        assert_eq!(normalize("!!!"), "");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for input in ["Hello World", "2021/My Trip", "ÜBER café", "--a--b--"] {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "input {:?}", input);
        }
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let a = derive_slug("Some Post.md", None);
        let b = derive_slug("Some Post.md", None);
        assert_eq!(a, b);
    }
}
