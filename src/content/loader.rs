//! Content loader - builds the record set from the content root

use anyhow::Result;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use super::{slug_for_path, ContentRecord, FrontMatter, MarkdownRenderer};
use crate::content::record::record_id;
use crate::content::markdown;
use crate::error::{BuildError, BuildWarning};
use crate::Blog;

/// Loads posts from the content root
pub struct ContentLoader<'a> {
    blog: &'a Blog,
    renderer: MarkdownRenderer,
}

/// Result of one load pass: every record that could be built, plus the
/// non-fatal conditions hit along the way.
#[derive(Debug)]
pub struct LoadReport {
    pub records: Vec<ContentRecord>,
    pub warnings: Vec<BuildWarning>,
}

impl LoadReport {
    /// Look up a record by slug. Works for dateless records too; being
    /// excluded from the timeline does not make a record unreachable.
    pub fn get(&self, slug: &str) -> Option<&ContentRecord> {
        self.records.iter().find(|r| r.slug == slug)
    }
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(blog: &'a Blog) -> Self {
        Self {
            blog,
            renderer: MarkdownRenderer::new(),
        }
    }

    /// Load all posts from the content root.
    ///
    /// Fatal: unreadable content root, slug collision. Per-record parse
    /// failures are warnings; the build carries on without that record or,
    /// for a bad date, with the record excluded from ordered views.
    pub fn load(&self) -> Result<LoadReport> {
        let root = &self.blog.content_dir;

        fs::read_dir(root).map_err(|e| BuildError::ContentSourceUnavailable {
            path: root.clone(),
            source: e,
        })?;

        let mut records: Vec<ContentRecord> = Vec::new();
        let mut warnings: Vec<BuildWarning> = Vec::new();
        // slug -> source_path, for collision reporting
        let mut seen: HashMap<String, String> = HashMap::new();

        // Sorted traversal keeps discovery order reproducible across
        // rebuilds, which the stable date sort depends on.
        for entry in WalkDir::new(root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() || !is_markdown_file(path) {
                continue;
            }

            let (record, warning) = match self.load_record(path) {
                Ok(loaded) => loaded,
                Err(e) => {
                    tracing::warn!("Failed to load post {:?}: {}", path, e);
                    continue;
                }
            };

            if let Some(first) = seen.get(&record.slug) {
                return Err(BuildError::DuplicateSlug {
                    slug: record.slug.clone(),
                    first: first.clone(),
                    second: record.source_path.clone(),
                }
                .into());
            }
            seen.insert(record.slug.clone(), record.source_path.clone());

            if let Some(warning) = warning {
                tracing::warn!("{}", warning);
                warnings.push(warning);
            }
            records.push(record);
        }

        Ok(LoadReport { records, warnings })
    }

    /// Load a single post from a file
    fn load_record(&self, path: &Path) -> Result<(ContentRecord, Option<BuildWarning>)> {
        let content = fs::read_to_string(path)?;
        let (fm, body) = FrontMatter::parse(&content)?;

        let source_path = path
            .strip_prefix(&self.blog.content_dir)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/");

        let slug = slug_for_path(&source_path);

        let date = fm.parse_date();
        let warning = if date.is_none() {
            Some(BuildWarning::UnparseableDate {
                source_path: source_path.clone(),
                value: fm.date.clone(),
            })
        } else {
            None
        };

        let body_html = self.renderer.render(body)?;
        let excerpt = markdown::excerpt(&body_html, self.blog.config.excerpt_length);

        let record = ContentRecord {
            id: record_id(&source_path),
            source_path: source_path.clone(),
            full_source: path.to_path_buf(),
            slug,
            title: fm.title,
            date,
            description: fm.description,
            tags: fm.tags,
            excerpt,
            body_html,
        };

        Ok((record, warning))
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn site_with_posts(posts: &[(&str, &str)]) -> (tempfile::TempDir, Blog) {
        let dir = tempfile::tempdir().unwrap();
        let content_dir = dir.path().join("content");
        for (name, body) in posts {
            let path = content_dir.join(name);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, body).unwrap();
        }
        let blog = Blog::new(dir.path()).unwrap();
        (dir, blog)
    }

    #[test]
    fn test_load_posts() {
        let (_dir, blog) = site_with_posts(&[
            (
                "hello.md",
                "---\ntitle: Hello\ndate: 2024-01-15\ntags: [a, b]\n---\n\nBody text.\n",
            ),
            (
                "2024/trip.md",
                "---\ntitle: Trip\ndate: 2024-02-01\n---\n\nWent somewhere.\n",
            ),
        ]);

        let report = ContentLoader::new(&blog).load().unwrap();
        assert_eq!(report.records.len(), 2);
        assert!(report.warnings.is_empty());

        let hello = report.get("/hello/").unwrap();
        assert_eq!(hello.title.as_deref(), Some("Hello"));
        assert_eq!(hello.tags, vec!["a", "b"]);
        assert!(hello.body_html.contains("Body text."));
        assert_eq!(hello.source_path, "hello.md");

        assert!(report.get("/2024/trip/").is_some());
    }

    #[test]
    fn test_missing_date_warns_but_keeps_record() {
        let (_dir, blog) = site_with_posts(&[
            ("dated.md", "---\ntitle: Dated\ndate: 2024-01-01\n---\n\nx\n"),
            ("undated.md", "---\ntitle: Undated\n---\n\ny\n"),
        ]);

        let report = ContentLoader::new(&blog).load().unwrap();
        assert_eq!(report.records.len(), 2);
        assert_eq!(report.warnings.len(), 1);

        let undated = report.get("/undated/").unwrap();
        assert!(undated.date.is_none());
        assert!(!undated.is_sortable());
    }

    #[test]
    fn test_duplicate_slug_is_fatal() {
        let (_dir, blog) = site_with_posts(&[
            ("hello.md", "---\ntitle: A\ndate: 2024-01-01\n---\n\nx\n"),
            ("hello/index.md", "---\ntitle: B\ndate: 2024-01-02\n---\n\ny\n"),
        ]);

        let err = ContentLoader::new(&blog).load().unwrap_err();
        let err = err.downcast::<BuildError>().unwrap();
        assert!(matches!(err, BuildError::DuplicateSlug { .. }));
    }

    #[test]
    fn test_missing_content_root_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        // no content/ directory at all
        let blog = Blog::new(dir.path()).unwrap();

        let err = ContentLoader::new(&blog).load().unwrap_err();
        let err = err.downcast::<BuildError>().unwrap();
        assert!(matches!(err, BuildError::ContentSourceUnavailable { .. }));
    }

    #[test]
    fn test_stable_discovery_order() {
        let (_dir, blog) = site_with_posts(&[
            ("a.md", "---\ntitle: A\ndate: 2024-01-01\n---\n\nx\n"),
            ("b.md", "---\ntitle: B\ndate: 2024-01-01\n---\n\ny\n"),
        ]);

        let report = ContentLoader::new(&blog).load().unwrap();
        let slugs: Vec<_> = report.records.iter().map(|r| r.slug.as_str()).collect();
        assert_eq!(slugs, vec!["/a/", "/b/"]);
    }
}
