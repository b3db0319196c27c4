//! Build error taxonomy

use std::path::PathBuf;
use thiserror::Error;

/// Fatal build conditions; any of these aborts the build.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The content root could not be read at all.
    #[error("content root {path:?} is unavailable: {source}")]
    ContentSourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Two source files resolved to the same slug. Picking one silently
    /// would corrupt every navigation link pointing at the other.
    #[error("duplicate slug \"{slug}\": {first} and {second} resolve to the same URL")]
    DuplicateSlug {
        slug: String,
        first: String,
        second: String,
    },
}

/// Per-record conditions reported as warnings. The record survives and stays
/// reachable at its slug, but is excluded from date-ordered views.
#[derive(Debug, Clone, Error)]
pub enum BuildWarning {
    #[error("{source_path}: date {value:?} is missing or unparseable; post hidden from the index")]
    UnparseableDate {
        source_path: String,
        value: Option<String>,
    },
}
