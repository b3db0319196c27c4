//! Content record model

use chrono::{DateTime, Local};
use serde::Serialize;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::PathBuf;

/// Normalized in-memory representation of one markdown post.
///
/// Records are immutable for the duration of one build and rebuilt from
/// scratch on the next.
#[derive(Debug, Clone, Serialize)]
pub struct ContentRecord {
    /// Opaque identifier, stable across rebuilds for a given source file
    pub id: String,

    /// Source file path, relative to the content root
    pub source_path: String,

    /// Full source file path
    pub full_source: PathBuf,

    /// Derived URL path; unique across all records
    pub slug: String,

    /// Post title; rendering falls back to the slug when absent
    pub title: Option<String>,

    /// Publication date. `None` means the front-matter date was missing or
    /// unparseable; such records never enter date-sorted views.
    pub date: Option<DateTime<Local>>,

    /// Optional front-matter description
    pub description: Option<String>,

    /// Post tags, in front-matter order
    pub tags: Vec<String>,

    /// Derived plain-text excerpt, capped at the configured length
    pub excerpt: String,

    /// Rendered HTML body; opaque to the pipeline
    pub body_html: String,
}

impl ContentRecord {
    /// Title shown to readers, falling back to the slug
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.slug)
    }

    /// Whether the record can appear in date-ordered views
    pub fn is_sortable(&self) -> bool {
        self.date.is_some()
    }
}

/// Derive the stable record id for a source path.
///
/// `DefaultHasher::new()` uses fixed keys, so the id survives rebuilds as
/// long as the file does not move.
pub fn record_id(source_path: &str) -> String {
    let mut hasher = DefaultHasher::new();
    source_path.hash(&mut hasher);
    format!("{:016x}", hasher.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_stable() {
        assert_eq!(record_id("posts/hello.md"), record_id("posts/hello.md"));
        assert_ne!(record_id("posts/hello.md"), record_id("posts/other.md"));
    }

    #[test]
    fn test_display_title_falls_back_to_slug() {
        let record = ContentRecord {
            id: record_id("untitled.md"),
            source_path: "untitled.md".to_string(),
            full_source: PathBuf::from("untitled.md"),
            slug: "/untitled/".to_string(),
            title: None,
            date: None,
            description: None,
            tags: Vec::new(),
            excerpt: String::new(),
            body_html: String::new(),
        };
        assert_eq!(record.display_title(), "/untitled/");
    }
}
