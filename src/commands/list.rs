//! List site content

use anyhow::Result;

use crate::content::{ContentLoader, Timeline};
use crate::Blog;

/// List site content by type
pub fn run(blog: &Blog, content_type: &str) -> Result<()> {
    let loader = ContentLoader::new(blog);

    match content_type {
        "post" | "posts" => {
            let report = loader.load()?;
            let timeline = Timeline::build(&report.records);

            println!("Posts ({}):", timeline.len());
            for post in timeline.entries() {
                let date = post
                    .date
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_default();
                println!("  {} - {} [{}]", date, post.display_title(), post.source_path);
            }

            let hidden: Vec<_> = report.records.iter().filter(|r| !r.is_sortable()).collect();
            if !hidden.is_empty() {
                println!("Hidden from the index ({}):", hidden.len());
                for post in hidden {
                    println!("  {} [{}]", post.display_title(), post.source_path);
                }
            }
        }
        "tag" | "tags" => {
            let report = loader.load()?;
            let mut tags: std::collections::HashMap<String, usize> =
                std::collections::HashMap::new();
            for post in &report.records {
                for tag in &post.tags {
                    *tags.entry(tag.clone()).or_insert(0) += 1;
                }
            }
            println!("Tags ({}):", tags.len());
            let mut tags: Vec<_> = tags.into_iter().collect();
            tags.sort_by(|a, b| b.1.cmp(&a.1));
            for (tag, count) in tags {
                println!("  {} ({})", tag, count);
            }
        }
        _ => {
            anyhow::bail!("Unknown type: {}. Available: post, tag", content_type);
        }
    }

    Ok(())
}
