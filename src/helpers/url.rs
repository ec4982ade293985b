//! URL helper functions

use crate::config::SiteConfig;

/// Prefix a root-relative path with the configured root
///
/// # Examples
/// ```ignore
/// url_for("/blog/", "/about/") // -> "/blog/about/"
/// ```
pub fn url_for(root: &str, path: &str) -> String {
    if is_external(path) {
        return path.to_string();
    }

    let root = root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Generate a full URL including the domain
///
/// # Examples
/// ```ignore
/// full_url_for(&config, "/about/") // -> "https://example.com/blog/about/"
/// ```
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    if is_external(path) {
        return path.to_string();
    }
    let base = config.url.trim_end_matches('/');
    format!("{}{}", base, url_for(&config.root, path))
}

/// Absolute or protocol-relative links are left alone
fn is_external(path: &str) -> bool {
    path.starts_with("http://")
        || path.starts_with("https://")
        || path.starts_with("//")
        || path.starts_with("mailto:")
}
