//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub language: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub content_dir: String,
    pub public_dir: String,

    // List view
    pub per_page: usize,

    /// Character cap for derived excerpts
    pub excerpt_length: usize,

    // Sidebar biography
    pub author: AuthorConfig,
    pub social: SocialConfig,

    // Collaborators
    pub comments: CommentsConfig,
    pub feed: FeedConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "My Blog".to_string(),
            description: String::new(),
            language: "en".to_string(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),

            content_dir: "content".to_string(),
            public_dir: "public".to_string(),

            per_page: 10,
            excerpt_length: 160,

            author: AuthorConfig::default(),
            social: SocialConfig::default(),
            comments: CommentsConfig::default(),
            feed: FeedConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// Author shown in the sidebar biography
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorConfig {
    pub name: String,
    /// One-line summary under the author name
    pub summary: String,
    /// Avatar asset path, relative to the content root
    pub avatar: String,
}

impl Default for AuthorConfig {
    fn default() -> Self {
        Self {
            name: "John Doe".to_string(),
            summary: String::new(),
            avatar: "images/avatar.png".to_string(),
        }
    }
}

/// Social links for the sidebar biography. Empty entries are not rendered.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SocialConfig {
    pub github: String,
    pub twitter: String,
    pub linkedin: String,
    pub facebook: String,
}

/// Third-party comment widget (utterances). Disabled while `repo` is empty.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CommentsConfig {
    /// GitHub repository the discussion threads live in
    pub repo: String,
    /// Visual theme passed through to the widget
    pub theme: String,
}

/// RSS feed settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub path: String,
    pub limit: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            path: "rss.xml".to_string(),
            limit: 20,
        }
    }
}
