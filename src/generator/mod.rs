//! Generator module - renders the site into the public directory

use anyhow::Result;
use std::fs;
use tera::Context;
use walkdir::WalkDir;

use crate::content::{ContentRecord, LoadReport, Timeline};
use crate::templates::{NavRef, PaginationData, PostEntry, TemplateRenderer};
use crate::Blog;

/// Stylesheet shipped with the embedded theme
const THEME_CSS: &str = include_str!("../templates/theme/site.css");

/// Static site generator using the embedded theme
pub struct Generator {
    blog: Blog,
    renderer: TemplateRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(blog: &Blog) -> Result<Self> {
        let renderer = TemplateRenderer::new()?;
        Ok(Self {
            blog: blog.clone(),
            renderer,
        })
    }

    /// Render the entire site from one build's records.
    ///
    /// Renderers only see the data handed to them here; nothing below this
    /// call reads the content root.
    pub fn generate(&self, report: &LoadReport, timeline: &Timeline) -> Result<()> {
        fs::create_dir_all(&self.blog.public_dir)?;

        self.copy_theme_assets()?;
        self.copy_content_assets()?;

        // Post pages first: a root-level index.md would otherwise clobber
        // the homepage listing rather than the other way around.
        self.generate_post_pages(report, timeline)?;
        self.generate_index_pages(timeline)?;
        self.generate_feed(timeline)?;

        Ok(())
    }

    /// Create a base context with common variables
    fn base_context(&self) -> Context {
        let mut context = Context::new();
        context.insert("config", &self.blog.config);
        context
    }

    /// Absolute URL path for a slug, under the configured root
    fn url_for(&self, slug: &str) -> String {
        format!("{}{}", self.blog.config.root.trim_end_matches('/'), slug)
    }

    fn post_entry(&self, record: &ContentRecord) -> PostEntry {
        PostEntry {
            title: record.display_title().to_string(),
            date: record
                .date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            url: self.url_for(&record.slug),
            tags: record.tags.join(", "),
        }
    }

    /// Generate the homepage list view, paginated
    fn generate_index_pages(&self, timeline: &Timeline) -> Result<()> {
        let per_page = self.blog.config.per_page;
        let posts = timeline.entries();
        // An empty site still gets page 1, which renders the explicit
        // no-content notice.
        let total_pages = posts.len().div_ceil(per_page).max(1);

        let root = self.blog.config.root.trim_end_matches('/');
        let page_url = |n: usize| {
            if n <= 1 {
                format!("{}/", root)
            } else {
                format!("{}/page/{}/", root, n)
            }
        };

        for page_num in 1..=total_pages {
            let start = (page_num - 1) * per_page;
            let end = (start + per_page).min(posts.len());
            let page_posts: Vec<PostEntry> =
                posts[start..end].iter().map(|p| self.post_entry(p)).collect();

            let pagination = PaginationData {
                per_page,
                total: total_pages,
                current: page_num,
                current_url: page_url(page_num),
                prev_link: if page_num > 1 {
                    page_url(page_num - 1)
                } else {
                    String::new()
                },
                next_link: if page_num < total_pages {
                    page_url(page_num + 1)
                } else {
                    String::new()
                },
            };

            let mut context = self.base_context();
            context.insert("page_posts", &page_posts);
            context.insert("pagination", &pagination);
            context.insert("is_home", &true);

            let html = self.renderer.render("index.html", &context)?;

            let output_path = if page_num == 1 {
                self.blog.public_dir.join("index.html")
            } else {
                self.blog
                    .public_dir
                    .join(format!("page/{}/index.html", page_num))
            };

            if let Some(parent) = output_path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&output_path, html)?;
            tracing::debug!("Generated: {:?}", output_path);
        }

        Ok(())
    }

    /// Generate one detail page per record.
    ///
    /// Dateless records render too; they are reachable by slug, just absent
    /// from the list view and every navigation chain.
    fn generate_post_pages(&self, report: &LoadReport, timeline: &Timeline) -> Result<()> {
        for record in &report.records {
            let (previous, next) = timeline.neighbors(&record.slug);

            let mut context = self.base_context();
            context.insert("page_title", record.display_title());
            if let Some(date) = record.date {
                context.insert("page_date", &date.format("%Y-%m-%d").to_string());
            }
            context.insert("page_content", &record.body_html);
            context.insert("page_slug", &record.slug);
            context.insert(
                "page_description",
                record.description.as_deref().unwrap_or(&record.excerpt),
            );

            if let Some(prev) = previous {
                context.insert(
                    "prev_post",
                    &NavRef {
                        title: prev.display_title().to_string(),
                        url: self.url_for(&prev.slug),
                    },
                );
            }
            if let Some(next) = next {
                context.insert(
                    "next_post",
                    &NavRef {
                        title: next.display_title().to_string(),
                        url: self.url_for(&next.slug),
                    },
                );
            }

            let html = self.renderer.render("post.html", &context)?;

            let clean_path = record.slug.trim_matches('/');
            let output_path = self.blog.public_dir.join(clean_path).join("index.html");
            if let Some(parent) = output_path.parent() {
                fs::create_dir_all(parent)
                    .map_err(|e| anyhow::anyhow!("Failed to create dir {:?}: {}", parent, e))?;
            }
            fs::write(&output_path, &html)
                .map_err(|e| anyhow::anyhow!("Failed to write {:?}: {}", output_path, e))?;
            tracing::debug!("Generated post: {:?}", output_path);
        }

        Ok(())
    }

    /// Generate the RSS feed from the same ordered sequence as the list view
    fn generate_feed(&self, timeline: &Timeline) -> Result<()> {
        let config = &self.blog.config;
        let site_url = config.url.trim_end_matches('/');

        let mut feed = String::new();
        feed.push_str(r#"<?xml version="1.0" encoding="utf-8"?>"#);
        feed.push('\n');
        feed.push_str(r#"<rss version="2.0"><channel>"#);
        feed.push('\n');
        feed.push_str(&format!("  <title>{}</title>\n", escape_xml(&config.title)));
        feed.push_str(&format!("  <link>{}/</link>\n", site_url));
        feed.push_str(&format!(
            "  <description>{}</description>\n",
            escape_xml(&config.description)
        ));
        feed.push_str(&format!(
            "  <language>{}</language>\n",
            escape_xml(&config.language)
        ));

        for record in timeline.entries().iter().take(config.feed.limit) {
            let link = format!("{}{}", site_url, record.slug);
            feed.push_str("  <item>\n");
            feed.push_str(&format!(
                "    <title>{}</title>\n",
                escape_xml(record.display_title())
            ));
            feed.push_str(&format!("    <link>{}</link>\n", link));
            feed.push_str(&format!("    <guid>{}</guid>\n", link));
            if let Some(date) = record.date {
                feed.push_str(&format!("    <pubDate>{}</pubDate>\n", date.to_rfc2822()));
            }
            let description = record.description.as_deref().unwrap_or(&record.excerpt);
            feed.push_str(&format!(
                "    <description>{}</description>\n",
                escape_xml(description)
            ));
            feed.push_str("  </item>\n");
        }

        feed.push_str("</channel></rss>\n");

        let output_path = self.blog.public_dir.join(&config.feed.path);
        fs::write(&output_path, feed)?;
        tracing::info!("Generated {}", config.feed.path);

        Ok(())
    }

    /// Write the embedded theme assets
    fn copy_theme_assets(&self) -> Result<()> {
        let css_path = self.blog.public_dir.join("css").join("site.css");
        if let Some(parent) = css_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(css_path, THEME_CSS)?;
        Ok(())
    }

    /// Copy non-markdown content files (the avatar, post images) through to
    /// the public directory, preserving relative paths
    fn copy_content_assets(&self) -> Result<()> {
        let content_dir = &self.blog.content_dir;
        if !content_dir.exists() {
            return Ok(());
        }

        for entry in WalkDir::new(content_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let ext = path.extension().and_then(|e| e.to_str());
            if matches!(ext, Some("md") | Some("markdown")) {
                continue;
            }

            let relative = path.strip_prefix(content_dir)?;
            let dest = self.blog.public_dir.join(relative);

            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &dest)?;
        }

        Ok(())
    }
}

/// Escape XML special characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentLoader;
    use std::fs;

    fn build_site(posts: &[(&str, &str)]) -> (tempfile::TempDir, Blog) {
        let dir = tempfile::tempdir().unwrap();
        let content_dir = dir.path().join("content");
        for (name, body) in posts {
            let path = content_dir.join(name);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, body).unwrap();
        }
        let blog = Blog::new(dir.path()).unwrap();

        let report = ContentLoader::new(&blog).load().unwrap();
        let timeline = Timeline::build(&report.records);
        Generator::new(&blog)
            .unwrap()
            .generate(&report, &timeline)
            .unwrap();

        (dir, blog)
    }

    #[test]
    fn test_generates_list_posts_and_feed() {
        let (_dir, blog) = build_site(&[
            (
                "jan.md",
                "---\ntitle: January\ndate: 2024-01-01\ntags: [winter]\n---\n\nJan body.\n",
            ),
            (
                "mar.md",
                "---\ntitle: March\ndate: 2024-03-01\n---\n\nMar body.\n",
            ),
            (
                "feb.md",
                "---\ntitle: February\ndate: 2024-02-01\n---\n\nFeb body.\n",
            ),
        ]);

        let index = fs::read_to_string(blog.public_dir.join("index.html")).unwrap();
        // newest first
        let mar_pos = index.find("March").unwrap();
        let feb_pos = index.find("February").unwrap();
        let jan_pos = index.find("January").unwrap();
        assert!(mar_pos < feb_pos && feb_pos < jan_pos);
        assert!(index.contains("winter"));

        // middle post links both neighbors
        let feb = fs::read_to_string(blog.public_dir.join("feb/index.html")).unwrap();
        assert!(feb.contains(r#"href="/mar/" rel="prev""#));
        assert!(feb.contains(r#"href="/jan/" rel="next""#));

        // ends have a single empty slot
        let mar = fs::read_to_string(blog.public_dir.join("mar/index.html")).unwrap();
        assert!(!mar.contains("rel=\"prev\""));
        assert!(mar.contains(r#"href="/feb/" rel="next""#));

        let feed = fs::read_to_string(blog.public_dir.join("rss.xml")).unwrap();
        assert!(feed.contains("<rss version=\"2.0\">"));
        let mar_item = feed.find("<title>March</title>").unwrap();
        let feb_item = feed.find("<title>February</title>").unwrap();
        assert!(mar_item < feb_item);
    }

    #[test]
    fn test_empty_site_renders_notice_page() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("content")).unwrap();
        let blog = Blog::new(dir.path()).unwrap();

        let report = ContentLoader::new(&blog).load().unwrap();
        let timeline = Timeline::build(&report.records);
        Generator::new(&blog)
            .unwrap()
            .generate(&report, &timeline)
            .unwrap();

        let index = fs::read_to_string(blog.public_dir.join("index.html")).unwrap();
        assert!(index.contains("No blog posts found"));
    }

    #[test]
    fn test_dateless_post_rendered_without_nav() {
        let (_dir, blog) = build_site(&[
            ("dated.md", "---\ntitle: Dated\ndate: 2024-01-01\n---\n\nx\n"),
            ("undated.md", "---\ntitle: Undated\n---\n\ny\n"),
        ]);

        // absent from the list view
        let index = fs::read_to_string(blog.public_dir.join("index.html")).unwrap();
        assert!(!index.contains("Undated"));

        // still reachable at its slug, with both nav slots empty
        let undated = fs::read_to_string(blog.public_dir.join("undated/index.html")).unwrap();
        assert!(undated.contains("Undated"));
        assert!(!undated.contains("rel=\"prev\""));
        assert!(!undated.contains("rel=\"next\""));
    }

    #[test]
    fn test_pagination_splits_list() {
        let posts: Vec<(String, String)> = (1..=12)
            .map(|i| {
                (
                    format!("post-{:02}.md", i),
                    format!("---\ntitle: Post {}\ndate: 2024-01-{:02}\n---\n\nbody\n", i, i),
                )
            })
            .collect();
        let posts: Vec<(&str, &str)> = posts
            .iter()
            .map(|(n, b)| (n.as_str(), b.as_str()))
            .collect();

        let (_dir, blog) = build_site(&posts);

        let page1 = fs::read_to_string(blog.public_dir.join("index.html")).unwrap();
        let page2 = fs::read_to_string(blog.public_dir.join("page/2/index.html")).unwrap();
        // 12 posts, 10 per page: the two oldest land on page 2
        assert!(page1.contains("Post 12"));
        assert!(!page1.contains("Post 01"));
        assert!(page2.contains("Post 01"));
        assert!(page1.contains("Older →"));
        assert!(page2.contains("← Newer"));
    }

    #[test]
    fn test_feed_escapes_markup() {
        let (_dir, blog) = build_site(&[(
            "amp.md",
            "---\ntitle: Fish & Chips <deluxe>\ndate: 2024-01-01\n---\n\nbody\n",
        )]);

        let feed = fs::read_to_string(blog.public_dir.join("rss.xml")).unwrap();
        assert!(feed.contains("Fish &amp; Chips &lt;deluxe&gt;"));
        assert!(!feed.contains("<deluxe>"));
    }
}
