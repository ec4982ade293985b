//! Routes and the site-wide route registry

use indexmap::map::Entry;
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

use crate::content::ContentStore;
use crate::error::{ContentError, MalformedContentError};

/// A root-relative path that the site's links can point at
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Route(String);

impl Route {
    /// Route of the post listing
    pub fn index() -> Self {
        Self("/".to_string())
    }

    /// Route of the not-found page
    pub fn not_found() -> Self {
        Self("/404.html".to_string())
    }

    /// Route for a slug: `my-post` -> `/my-post/`
    pub fn for_slug(slug: &str) -> Self {
        Self(format!("/{}/", slug.trim_matches('/')))
    }

    /// Validate an arbitrary path
    pub fn parse(path: &str) -> Result<Self, MalformedContentError> {
        if path.starts_with('/') {
            Ok(Self(path.to_string()))
        } else {
            Err(MalformedContentError::InvalidRoute(path.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File the route is written to, relative to the public directory
    pub fn output_file(&self) -> PathBuf {
        let path = self.0.trim_start_matches('/');
        if path.is_empty() || path.ends_with('/') {
            PathBuf::from(path).join("index.html")
        } else {
            PathBuf::from(path)
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Every route of the site with a description of what owns it
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: IndexMap<Route, String>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the table for a site: reserved routes, then posts, then pages
    pub fn build(posts: &ContentStore, pages: &ContentStore) -> Result<Self, ContentError> {
        let mut table = Self::new();
        table.register(Route::index(), "post index")?;
        table.register(Route::not_found(), "not-found page")?;

        for record in posts.records().chain(pages.records()) {
            table.register(Route::for_slug(record.slug()), record.source())?;
        }

        Ok(table)
    }

    /// Claim a route, failing if something already owns it
    pub fn register(&mut self, route: Route, owner: &str) -> Result<(), ContentError> {
        match self.routes.entry(route) {
            Entry::Occupied(existing) => Err(ContentError::DuplicateSlug {
                slug: existing.key().to_string(),
                first: existing.get().clone(),
                second: owner.to_string(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(owner.to_string());
                Ok(())
            }
        }
    }

    pub fn contains(&self, route: &Route) -> bool {
        self.routes.contains_key(route)
    }

    /// Routes in registration order with their owners
    pub fn iter(&self) -> impl Iterator<Item = (&Route, &str)> {
        self.routes.iter().map(|(route, owner)| (route, owner.as_str()))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{FrontMatter, RawContent};

    fn store(paths: &[&str]) -> ContentStore {
        let entries = paths
            .iter()
            .map(|p| RawContent::new(*p, FrontMatter::default(), "<p>x</p>"))
            .collect();
        ContentStore::load(entries, 140).unwrap()
    }

    #[test]
    fn test_route_shapes() {
        assert_eq!(Route::for_slug("my-post-slug").as_str(), "/my-post-slug/");
        assert_eq!(Route::for_slug("2021/trip").as_str(), "/2021/trip/");
        assert!(Route::parse("about").is_err());
        assert_eq!(Route::parse("/about").unwrap().as_str(), "/about");
    }

    #[test]
    fn test_output_files() {
        assert_eq!(Route::index().output_file(), PathBuf::from("index.html"));
        assert_eq!(
            Route::for_slug("hello").output_file(),
            PathBuf::from("hello/index.html")
        );
        assert_eq!(Route::not_found().output_file(), PathBuf::from("404.html"));
    }

    #[test]
    fn test_build_site_routes() {
        let table = RouteTable::build(&store(&["a.md", "b.md"]), &store(&["about.md"])).unwrap();
        let routes: Vec<_> = table.iter().map(|(r, _)| r.as_str()).collect();
        assert_eq!(routes, vec!["/", "/404.html", "/a/", "/b/", "/about/"]);
    }

    #[test]
    fn test_page_colliding_with_post_fails() {
        let err = RouteTable::build(&store(&["about.md"]), &store(&["About.md"])).unwrap_err();
        assert_eq!(
            err,
            ContentError::DuplicateSlug {
                slug: "/about/".to_string(),
                first: "about.md".to_string(),
                second: "About.md".to_string(),
            }
        );
    }

    #[test]
    fn test_reserved_route_cannot_be_claimed_twice() {
        let mut table = RouteTable::new();
        table.register(Route::index(), "post index").unwrap();
        assert!(table.register(Route::index(), "home.md").is_err());
        assert!(table.contains(&Route::index()));
        assert_eq!(table.len(), 1);
    }
}
