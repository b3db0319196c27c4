//! Create a new post

use anyhow::Result;
use std::fs;

use crate::Blog;

/// Create a new markdown post under the content root
pub fn run(blog: &Blog, title: &str, path: Option<&str>) -> Result<()> {
    let now = chrono::Local::now();

    let filename = if let Some(p) = path {
        format!("{}.md", p.trim_end_matches(".md"))
    } else {
        format!("{}.md", slug::slugify(title))
    };

    let file_path = blog.content_dir.join(&filename);
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let content = format!(
        r#"---
title: {}
date: {}
description:
tags: []
---
"#,
        title,
        now.format("%Y-%m-%d %H:%M:%S")
    );

    fs::write(&file_path, content)?;

    println!("Created: {:?}", file_path);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_post_parses_back() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("content")).unwrap();
        let blog = Blog::new(dir.path()).unwrap();

        run(&blog, "Hello World", None).unwrap();

        let report = crate::content::ContentLoader::new(&blog).load().unwrap();
        assert_eq!(report.records.len(), 1);
        let record = report.get("/hello-world/").unwrap();
        assert_eq!(record.title.as_deref(), Some("Hello World"));
        assert!(record.is_sortable());
    }

    #[test]
    fn test_new_post_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("content")).unwrap();
        let blog = Blog::new(dir.path()).unwrap();

        run(&blog, "Same Title", None).unwrap();
        assert!(run(&blog, "Same Title", None).is_err());
    }
}
