//! Page composer
//!
//! [`compose`] joins a layout context and page content into a
//! [`RenderableOutput`]. It reads nothing but its arguments, so the same
//! inputs always produce the same output.

use serde::Serialize;

use crate::content::ContentRecord;
use crate::error::MalformedContentError;
use crate::helpers::{date_iso, format_date};
use crate::nav::{LayoutContext, SidebarState};
use crate::routes::Route;

/// A post as shown in the index listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingEntry {
    pub title: String,
    pub route: String,
    pub date: Option<PageDate>,
    pub description: String,
}

/// A date with its machine-readable and display forms
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageDate {
    pub iso: String,
    pub display: String,
}

/// Link to a neighbouring post
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostLink {
    pub title: String,
    pub route: String,
}

/// The content of one page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageContent {
    Index {
        title: String,
        entries: Vec<ListingEntry>,
    },
    Post {
        title: String,
        date: Option<PageDate>,
        description: String,
        body: String,
        newer: Option<PostLink>,
        older: Option<PostLink>,
    },
    Page {
        title: String,
        description: String,
        body: String,
    },
    NotFound,
}

impl PageContent {
    /// Listing of already ordered posts
    pub fn index(records: &[ContentRecord], date_format: &str) -> Self {
        PageContent::Index {
            title: "All posts".to_string(),
            entries: records
                .iter()
                .map(|record| ListingEntry {
                    title: record.title().to_string(),
                    route: Route::for_slug(record.slug()).to_string(),
                    date: page_date(record, date_format),
                    description: record.description().to_string(),
                })
                .collect(),
        }
    }

    /// Post at `position` of the ordered listing, linked to its neighbours
    pub fn post(records: &[ContentRecord], position: usize, date_format: &str) -> Option<Self> {
        let record = records.get(position)?;
        let link = |r: &ContentRecord| PostLink {
            title: r.title().to_string(),
            route: Route::for_slug(r.slug()).to_string(),
        };

        Some(PageContent::Post {
            title: record.title().to_string(),
            date: page_date(record, date_format),
            description: record.description().to_string(),
            body: record.body().to_string(),
            newer: position
                .checked_sub(1)
                .and_then(|i| records.get(i))
                .map(link),
            older: records.get(position + 1).map(link),
        })
    }

    /// Standalone page
    pub fn page(record: &ContentRecord) -> Self {
        PageContent::Page {
            title: record.title().to_string(),
            description: record.description().to_string(),
            body: record.body().to_string(),
        }
    }

    /// Content for the post at `position`, honouring a `layout: page` override
    pub fn for_post(records: &[ContentRecord], position: usize, date_format: &str) -> Option<Self> {
        let record = records.get(position)?;
        match record.layout() {
            Some("page") => Some(PageContent::page(record)),
            _ => PageContent::post(records, position, date_format),
        }
    }

    /// Content for a standalone page, honouring a `layout: post` override
    ///
    /// A page shown as a post carries its date but no neighbour links.
    pub fn for_page(record: &ContentRecord, date_format: &str) -> Self {
        match record.layout() {
            Some("post") => PageContent::post(std::slice::from_ref(record), 0, date_format)
                .unwrap_or_else(|| PageContent::page(record)),
            _ => PageContent::page(record),
        }
    }

    /// Page title shown in the document head
    pub fn title(&self) -> &str {
        match self {
            PageContent::Index { title, .. }
            | PageContent::Post { title, .. }
            | PageContent::Page { title, .. } => title,
            PageContent::NotFound => "404: Not Found",
        }
    }

    /// Template used to render this kind of page
    pub fn template(&self) -> &'static str {
        match self {
            PageContent::Index { .. } => "index.html",
            PageContent::Post { .. } => "post.html",
            PageContent::Page { .. } => "page.html",
            PageContent::NotFound => "404.html",
        }
    }
}

fn page_date(record: &ContentRecord, date_format: &str) -> Option<PageDate> {
    record.date().map(|date| PageDate {
        iso: date_iso(&date),
        display: format_date(&date, date_format),
    })
}

/// Navigation link with its active flag resolved for the current page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub label: String,
    pub route: String,
    pub active: bool,
}

/// A fully composed page, ready for the template renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderableOutput {
    pub route: Route,
    pub template: &'static str,
    pub document_title: String,
    pub description: Option<String>,
    pub sidebar: SidebarState,
    pub site_title: String,
    pub author: String,
    pub avatar: Option<String>,
    pub contact: Option<String>,
    pub nav: Vec<NavItem>,
    pub content: PageContent,
}

/// Compose one page
pub fn compose(
    layout: &LayoutContext,
    content: &PageContent,
) -> Result<RenderableOutput, MalformedContentError> {
    validate(layout, content)?;

    let chrome = &layout.chrome;
    let nav = chrome
        .links
        .iter()
        .map(|link| NavItem {
            label: link.label.clone(),
            route: link.route.clone(),
            active: link.route == layout.route.as_str(),
        })
        .collect();

    let description = match content {
        PageContent::Post { description, .. } | PageContent::Page { description, .. } => {
            Some(description.clone())
        }
        PageContent::Index { .. } | PageContent::NotFound => None,
    };

    Ok(RenderableOutput {
        route: layout.route.clone(),
        template: content.template(),
        document_title: format!("{} | {}", content.title(), chrome.site_title),
        description,
        sidebar: layout.navigation,
        site_title: chrome.site_title.clone(),
        author: chrome.author.clone(),
        avatar: chrome.avatar.clone(),
        contact: chrome.contact.clone(),
        nav,
        content: content.clone(),
    })
}

/// Reject content missing what a page needs to be addressable and readable
fn validate(layout: &LayoutContext, content: &PageContent) -> Result<(), MalformedContentError> {
    let route = layout.route.as_str();
    let require = |value: &str, field: &'static str| {
        if value.trim().is_empty() {
            Err(MalformedContentError::MissingField {
                route: route.to_string(),
                field,
            })
        } else {
            Ok(())
        }
    };

    match content {
        PageContent::Index { title, entries } => {
            require(title, "title")?;
            for entry in entries {
                require(&entry.route, "entry.route")?;
                Route::parse(&entry.route)?;
                require(&entry.title, "entry.title")?;
            }
        }
        PageContent::Post {
            title,
            body,
            newer,
            older,
            ..
        } => {
            require(title, "title")?;
            require(body, "body")?;
            for link in newer.iter().chain(older.iter()) {
                Route::parse(&link.route)?;
            }
        }
        PageContent::Page { title, body, .. } => {
            require(title, "title")?;
            require(body, "body")?;
        }
        PageContent::NotFound => {}
    }

    Ok(())
}
