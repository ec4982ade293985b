//! Initialize a new site

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;

const CONFIG: &str = r#"# Site
title: Folio
description: ''
author: John Doe
language: en

# URL
url: http://example.com
root: /

# Directory
source_dir: source
public_dir: public

# Writing
new_post_name: :title.md
default_layout: post
render_drafts: false
highlight:
  line_number: false
  theme: InspiredGitHub

# Listing
order_by: -date
excerpt_length: 140
date_format: MMMM DD, YYYY

# Layout
menu:
  Blog: /
  About Me: /about/
# contact: you@example.com
# avatar: /images/avatar.png

feed:
  enable: true
  limit: 20
"#;

const POST_SCAFFOLD: &str = r#"---
title: {{ title }}
date: {{ date }}
---
"#;

const PAGE_SCAFFOLD: &str = r#"---
title: {{ title }}
---
"#;

const DRAFT_SCAFFOLD: &str = r#"---
title: {{ title }}
published: false
---
"#;

const ABOUT_PAGE: &str = r#"---
title: About Me
---

Write something about yourself here.
"#;

const STYLESHEET: &str = r#"*, *::before, *::after { box-sizing: border-box; }
body { margin: 0; font-family: system-ui, sans-serif; line-height: 1.6; color: #1f2937; }
a { color: inherit; }
.sr-only { position: absolute; width: 1px; height: 1px; overflow: hidden; clip: rect(0, 0, 0, 0); }

.shell { min-height: 100vh; }
.sidebar { display: flex; flex-direction: column; gap: 1.5rem; padding: 2rem 1.5rem; }
.avatar { margin: 0; text-align: center; }
.avatar img { width: 6rem; height: 6rem; border-radius: 50%; }
.nav { display: flex; flex-direction: column; gap: .25rem; }
.nav-link { padding: .5rem .75rem; border-radius: .375rem; text-decoration: none; }
.nav-link.active { background: #f3f4f6; font-weight: 600; }
.contact { margin-top: auto; }

.sidebar-mobile { display: none; }
.shell[data-sidebar="open"] .sidebar-mobile { display: block; position: fixed; inset: 0; z-index: 40; }
.sidebar-overlay { position: absolute; inset: 0; background: rgba(75, 85, 99, .75); }
.sidebar-panel { position: relative; width: 18rem; max-width: 80%; height: 100%; background: #fff; }
.sidebar-close { position: absolute; top: .5rem; right: .5rem; border: 0; background: none; font-size: 1.5rem; }
.sidebar-desktop { display: none; }
.topbar { padding: .5rem; }
.sidebar-open { border: 0; background: none; font-size: 1.5rem; }
.content { max-width: 48rem; margin: 0 auto; padding: 1.5rem; }

@media (min-width: 768px) {
  .shell[data-sidebar="open"] .sidebar-mobile { display: none; }
  .sidebar-desktop { display: block; position: fixed; top: 0; bottom: 0; width: 16rem; border-right: 1px solid #e5e7eb; }
  .main-column { padding-left: 16rem; }
  .topbar { display: none; }
}

.post-list { list-style: none; padding: 0; }
.post-list li { margin-bottom: 2rem; }
.post-list a { text-decoration: none; }
.post-date { color: #6b7280; font-size: .875rem; margin: 0; }
.post-nav { display: flex; justify-content: space-between; margin-top: 3rem; }
.prose pre { padding: 1rem; overflow-x: auto; border-radius: .375rem; }
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join("_config.yml");
    if config_path.exists() {
        bail!("A site already exists in {:?}", target_dir);
    }

    let source_dir = target_dir.join("source");
    fs::create_dir_all(source_dir.join("_posts"))
        .with_context(|| format!("Failed to create {:?}", source_dir))?;
    fs::create_dir_all(source_dir.join("css"))?;
    fs::create_dir_all(target_dir.join("scaffolds"))?;

    fs::write(&config_path, CONFIG)?;

    fs::write(target_dir.join("scaffolds/post.md"), POST_SCAFFOLD)?;
    fs::write(target_dir.join("scaffolds/page.md"), PAGE_SCAFFOLD)?;
    fs::write(target_dir.join("scaffolds/draft.md"), DRAFT_SCAFFOLD)?;

    let today = chrono::Local::now().format("%Y-%m-%d");
    let sample_post = format!(
        r#"---
title: Hello World
date: {}
---

Welcome to your new blog! This is your very first post.

<!-- more -->

## Quick Start

### Create a new post

```bash
$ folio new "My New Post"
```

### Run server

```bash
$ folio server
```

### Generate static files

```bash
$ folio generate
```
"#,
        today
    );

    fs::write(source_dir.join("_posts/hello-world.md"), sample_post)?;
    fs::write(source_dir.join("about.md"), ABOUT_PAGE)?;
    fs::write(source_dir.join("css/site.css"), STYLESHEET)?;

    Ok(())
}
