//! Content module - loads entries, derives slugs and holds the records

pub mod fallback;
mod frontmatter;
pub mod loader;
mod markdown;
mod record;
pub mod slug;
mod store;

pub use frontmatter::FrontMatter;
pub use markdown::MarkdownRenderer;
pub use record::{ContentRecord, RawContent};
pub use store::{load, ContentStore};
