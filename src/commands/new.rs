//! Create a new post or page

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::content::loader::POSTS_DIR;
use crate::Site;

/// Create a new post, page or draft and return its path
///
/// Posts and drafts go to `source/_posts`; a draft is a post with
/// `published: false`. Pages go to `source/<slug>/index.md`.
pub fn create_post(site: &Site, title: &str, layout: &str, path: Option<&str>) -> Result<PathBuf> {
    let now = chrono::Local::now();
    let slug = ::slug::slugify(title);

    let file_path = match (layout, path) {
        (_, Some(p)) => site.source_dir.join(format!("{}.md", p.trim_end_matches(".md"))),
        ("page", None) => site.source_dir.join(&slug).join("index.md"),
        ("post" | "draft", None) => {
            let filename = site
                .config
                .new_post_name
                .replace(":title", &slug)
                .replace(":year", &now.format("%Y").to_string())
                .replace(":month", &now.format("%m").to_string())
                .replace(":day", &now.format("%d").to_string())
                .replace(":i_month", &now.format("%-m").to_string())
                .replace(":i_day", &now.format("%-d").to_string());
            site.source_dir.join(POSTS_DIR).join(filename)
        }
        (other, None) => bail!("Unknown layout: {}. Available: post, page, draft", other),
    };

    if file_path.exists() {
        bail!("File already exists: {:?}", file_path);
    }

    let scaffold_path = site.base_dir.join("scaffolds").join(format!("{}.md", layout));
    let scaffold = if scaffold_path.exists() {
        fs::read_to_string(&scaffold_path)
            .with_context(|| format!("Failed to read {:?}", scaffold_path))?
    } else {
        default_scaffold(layout).to_string()
    };

    let content = scaffold
        .replace("{{ title }}", &yaml_string(title))
        .replace("{{ date }}", &now.format("%Y-%m-%d %H:%M:%S").to_string());

    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content).with_context(|| format!("Failed to write {:?}", file_path))?;

    tracing::info!("Created: {:?}", file_path);
    Ok(file_path)
}

fn default_scaffold(layout: &str) -> &'static str {
    match layout {
        "page" => "---\ntitle: {{ title }}\n---\n",
        "draft" => "---\ntitle: {{ title }}\npublished: false\n---\n",
        _ => "---\ntitle: {{ title }}\ndate: {{ date }}\n---\n",
    }
}

/// Quote a title when it would not survive as a plain YAML scalar
fn yaml_string(value: &str) -> String {
    let needs_quotes = value.contains(": ")
        || value.contains(" #")
        || value.starts_with(|c: char| "!&*[]{}|>'\"%@`#,?-".contains(c));
    if needs_quotes {
        format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
    } else {
        value.to_string()
    }
}
