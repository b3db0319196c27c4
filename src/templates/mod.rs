//! Built-in theme templates using the Tera template engine
//!
//! The theme is embedded in the binary; renderers receive their data as
//! explicit context values, never by querying content themselves.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::content::markdown::strip_html;

/// One entry of the homepage list view
#[derive(Debug, Clone, Serialize)]
pub struct PostEntry {
    /// Resolved title (already fallen back to the slug when untitled)
    pub title: String,
    /// Date as `YYYY-MM-DD`; templates reformat for display
    pub date: String,
    /// Absolute URL path under the site root
    pub url: String,
    /// Tags joined by `", "`
    pub tags: String,
}

/// A previous/next navigation target
#[derive(Debug, Clone, Serialize)]
pub struct NavRef {
    pub title: String,
    pub url: String,
}

/// Pagination state for the list view
#[derive(Debug, Clone, Serialize)]
pub struct PaginationData {
    pub per_page: usize,
    pub total: usize,
    pub current: usize,
    pub current_url: String,
    /// Empty when on the first page
    pub prev_link: String,
    /// Empty when on the last page
    pub next_link: String,
}

/// Template renderer with the embedded theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all theme templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Post bodies arrive pre-rendered; escaping them again would mangle
        // the markup, so autoescaping stays off and the feed escapes at the
        // XML boundary instead.
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("theme/layout.html")),
            ("index.html", include_str!("theme/index.html")),
            ("post.html", include_str!("theme/post.html")),
            (
                "partials/head.html",
                include_str!("theme/partials/head.html"),
            ),
            ("partials/bio.html", include_str!("theme/partials/bio.html")),
            (
                "partials/pager.html",
                include_str!("theme/partials/pager.html"),
            ),
        ])?;

        tera.register_filter("strip_html", strip_html_filter);
        tera.register_filter("truncate_chars", truncate_chars_filter);
        tera.register_filter("date_format", date_format_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: strip HTML tags
fn strip_html_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("strip_html", "value", String, value);
    Ok(tera::Value::String(strip_html(&s)))
}

/// Tera filter: truncate by character count
fn truncate_chars_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("truncate_chars", "value", String, value);
    let length = match args.get("length") {
        Some(val) => tera::try_get_value!("truncate_chars", "length", usize, val),
        None => 160,
    };

    if s.chars().count() <= length {
        Ok(tera::Value::String(s))
    } else {
        let truncated: String = s.chars().take(length).collect();
        Ok(tera::Value::String(format!("{}…", truncated.trim_end())))
    }
}

/// Tera filter: format a `YYYY-MM-DD` date string for display
fn date_format_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("date_format", "value", String, value);
    let format = match args.get("format") {
        Some(val) => tera::try_get_value!("date_format", "format", String, val),
        None => "YYYY-MM-DD".to_string(),
    };

    if let Ok(date) = chrono::NaiveDate::parse_from_str(&s, "%Y-%m-%d") {
        let formatted = match format.as_str() {
            // "May 30, 2023"
            "LL" => date.format("%B %d, %Y").to_string(),
            "DD-MM-YYYY" => date.format("%d-%m-%Y").to_string(),
            _ => s,
        };
        return Ok(tera::Value::String(formatted));
    }

    // not a date we understand, return as-is
    Ok(tera::Value::String(s))
}
