//! List site content

use anyhow::{bail, Result};

use crate::content::loader::ContentLoader;
use crate::helpers::date_iso;
use crate::listing::{order_by, OrderBy};
use crate::routes::RouteTable;
use crate::Site;

/// Render the listing for `content_type` as lines of text
pub fn list(site: &Site, content_type: &str) -> Result<Vec<String>> {
    let (posts, pages) = ContentLoader::new(site).load()?;
    let mut lines = Vec::new();

    match content_type {
        "post" | "posts" => {
            let order: OrderBy = site.config.order_by.parse()?;
            let posts = order_by(posts.into_records(), order);
            lines.push(format!("Posts ({}):", posts.len()));
            for post in &posts {
                let date = post
                    .date()
                    .map(|d| date_iso(&d))
                    .unwrap_or_else(|| "----------".to_string());
                lines.push(format!("  {}  {} [{}]", date, post.title(), post.source()));
            }
        }
        "page" | "pages" => {
            lines.push(format!("Pages ({}):", pages.len()));
            for page in pages.records() {
                lines.push(format!("  {} [{}]", page.title(), page.source()));
            }
        }
        "route" | "routes" => {
            let routes = RouteTable::build(&posts, &pages)?;
            lines.push(format!("Routes ({}):", routes.len()));
            for (route, owner) in routes.iter() {
                lines.push(format!("  {}  <- {}", route, owner));
            }
        }
        _ => bail!(
            "Unknown type: {}. Available: post, page, route",
            content_type
        ),
    }

    Ok(lines)
}

/// List site content by type
pub fn run(site: &Site, content_type: &str) -> Result<()> {
    for line in list(site, content_type)? {
        println!("{}", line);
    }
    Ok(())
}
