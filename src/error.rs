//! Error types for the content pipeline
//!
//! Structural errors ([`ContentError`]) abort the whole build. Composition
//! errors ([`MalformedContentError`]) only fail the page they belong to.

use thiserror::Error;

/// Errors raised while loading content and registering routes
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContentError {
    #[error("Duplicate slug '{slug}': {first} and {second} resolve to the same route")]
    DuplicateSlug {
        slug: String,
        first: String,
        second: String,
    },

    #[error("Entry {path} has no usable characters to build a slug from")]
    EmptySlug { path: String },
}

/// A page could not be composed because its content is missing required data
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedContentError {
    #[error("Page {route}: missing required field '{field}'")]
    MissingField { route: String, field: &'static str },

    #[error("Invalid route '{0}': routes must start with '/'")]
    InvalidRoute(String),
}
