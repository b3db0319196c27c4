//! Ordering and navigation index
//!
//! Builds the date-descending sequence of posts and the previous/next
//! adjacency used by post navigation. Rebuilt from scratch on every build;
//! nothing here survives across builds.

use super::ContentRecord;

/// The ordered view over a build's content records.
///
/// `previous` of an entry is the immediately preceding element of the
/// date-descending sequence (the newer neighbor); `next` is the immediately
/// following element (the older neighbor). The newest entry has no
/// `previous`, the oldest no `next`.
pub struct Timeline {
    entries: Vec<ContentRecord>,
}

impl Timeline {
    /// Build the ordered sequence from the full record set.
    ///
    /// Records without a parseable date are omitted entirely; they appear in
    /// no list view and no navigation chain, but remain addressable by slug
    /// through the load report. Equal dates keep discovery order (the sort
    /// is stable), so navigation links are reproducible across rebuilds.
    pub fn build(records: &[ContentRecord]) -> Self {
        let mut entries: Vec<ContentRecord> = records
            .iter()
            .filter(|r| r.is_sortable())
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.date.cmp(&a.date));
        Self { entries }
    }

    /// All entries, newest first
    pub fn entries(&self) -> &[ContentRecord] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, slug: &str) -> Option<usize> {
        self.entries.iter().position(|r| r.slug == slug)
    }

    /// The newer neighbor, if any
    pub fn previous(&self, slug: &str) -> Option<&ContentRecord> {
        let pos = self.position(slug)?;
        if pos > 0 {
            Some(&self.entries[pos - 1])
        } else {
            None
        }
    }

    /// The older neighbor, if any
    pub fn next(&self, slug: &str) -> Option<&ContentRecord> {
        let pos = self.position(slug)?;
        self.entries.get(pos + 1)
    }

    /// Both navigation edges for a slug. A slug outside the sequence (a
    /// dateless record, or an unknown slug) has neither.
    pub fn neighbors(&self, slug: &str) -> (Option<&ContentRecord>, Option<&ContentRecord>) {
        (self.previous(slug), self.next(slug))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::record::record_id;
    use std::path::PathBuf;

    fn record(name: &str, date: Option<&str>) -> ContentRecord {
        let source_path = format!("{}.md", name);
        ContentRecord {
            id: record_id(&source_path),
            source_path: source_path.clone(),
            full_source: PathBuf::from(&source_path),
            slug: format!("/{}/", name),
            title: Some(name.to_string()),
            date: date.and_then(|d| {
                crate::content::FrontMatter {
                    date: Some(d.to_string()),
                    ..Default::default()
                }
                .parse_date()
            }),
            description: None,
            tags: Vec::new(),
            excerpt: String::new(),
            body_html: String::new(),
        }
    }

    #[test]
    fn test_sorted_date_descending_with_full_chain() {
        // discovery order: Jan, Mar, Feb
        let records = vec![
            record("jan", Some("2024-01-01")),
            record("mar", Some("2024-03-01")),
            record("feb", Some("2024-02-01")),
        ];
        let timeline = Timeline::build(&records);

        let slugs: Vec<_> = timeline.entries().iter().map(|r| r.slug.as_str()).collect();
        assert_eq!(slugs, vec!["/mar/", "/feb/", "/jan/"]);

        assert!(timeline.previous("/mar/").is_none());
        assert_eq!(timeline.next("/mar/").unwrap().slug, "/feb/");
        assert_eq!(timeline.previous("/feb/").unwrap().slug, "/mar/");
        assert_eq!(timeline.next("/feb/").unwrap().slug, "/jan/");
        assert_eq!(timeline.previous("/jan/").unwrap().slug, "/feb/");
        assert!(timeline.next("/jan/").is_none());
    }

    #[test]
    fn test_equal_dates_keep_discovery_order() {
        let records = vec![
            record("a", Some("2024-01-01")),
            record("b", Some("2024-01-01")),
        ];
        let timeline = Timeline::build(&records);

        let slugs: Vec<_> = timeline.entries().iter().map(|r| r.slug.as_str()).collect();
        assert_eq!(slugs, vec!["/a/", "/b/"]);
    }

    #[test]
    fn test_dateless_records_excluded_but_not_lost() {
        let records = vec![
            record("dated", Some("2024-01-01")),
            record("undated", None),
        ];
        let timeline = Timeline::build(&records);

        assert_eq!(timeline.len(), records.len() - 1);
        assert!(timeline.entries().iter().all(|r| r.slug != "/undated/"));

        // outside the sequence: no navigation edges at all
        let (prev, next) = timeline.neighbors("/undated/");
        assert!(prev.is_none());
        assert!(next.is_none());
    }

    #[test]
    fn test_single_entry_has_no_neighbors() {
        let records = vec![record("only", Some("2024-01-01"))];
        let timeline = Timeline::build(&records);
        let (prev, next) = timeline.neighbors("/only/");
        assert!(prev.is_none());
        assert!(next.is_none());
    }

    #[test]
    fn test_empty_set() {
        let timeline = Timeline::build(&[]);
        assert!(timeline.is_empty());
    }
}
