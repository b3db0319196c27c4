//! Slug assignment - maps source paths to URL paths

/// Derive the slug for a markdown file from its path relative to the
/// content root.
///
/// The extension is dropped and directory separators are kept as path
/// segments, so `2024/trip.md` becomes `/2024/trip/`. An `index` stem
/// collapses to its parent directory, matching the usual pretty-URL layout.
///
/// The mapping must be injective; the loader rejects collisions (which the
/// `index` rule makes possible: `hello.md` vs `hello/index.md`).
pub fn slug_for_path(source_path: &str) -> String {
    let without_ext = source_path
        .trim_end_matches(".markdown")
        .trim_end_matches(".md");

    let dir_path = if without_ext == "index" {
        ""
    } else {
        without_ext.strip_suffix("/index").unwrap_or(without_ext)
    };

    let trimmed = dir_path.trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{}/", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_file() {
        assert_eq!(slug_for_path("hello-world.md"), "/hello-world/");
        assert_eq!(slug_for_path("notes.markdown"), "/notes/");
    }

    #[test]
    fn test_nested_path_keeps_segments() {
        assert_eq!(slug_for_path("2024/japan-trip.md"), "/2024/japan-trip/");
        assert_eq!(slug_for_path("a/b/c.md"), "/a/b/c/");
    }

    #[test]
    fn test_index_collapses_to_directory() {
        assert_eq!(slug_for_path("hello/index.md"), "/hello/");
        assert_eq!(slug_for_path("index.md"), "/");
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(slug_for_path("x/y.md"), slug_for_path("x/y.md"));
    }

    #[test]
    fn test_known_collision_shape() {
        // the pair the loader's duplicate check exists for
        assert_eq!(slug_for_path("hello.md"), slug_for_path("hello/index.md"));
    }
}
