//! Base-path normalization.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Canonical path of the site root.
pub const ROOT: &str = "/";

/// Strip `base_path` from the front of `path`.
///
/// A path equal to the base path maps to [`ROOT`]. Paths that do not start
/// with the base path (external URLs, already canonical paths) come back
/// unchanged.
///
/// The prefix is stripped once, so normalizing twice only gives the same
/// result when the remainder does not itself start with the base path:
/// `/api-docs/api-docs` normalizes to `/api-docs`, and that to `/`.
pub fn normalize<'a>(path: &'a str, base_path: &str) -> &'a str {
    match path.strip_prefix(base_path) {
        Some("") => ROOT,
        Some(rest) => rest,
        None => path,
    }
}

/// The prefix a site is deployed under, e.g. `/api-docs`.
///
/// Stored without a trailing slash; the empty string means the site is
/// served from the domain root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct BasePath(String);

impl BasePath {
    /// Build a base path from configuration input.
    ///
    /// Accepts `api-docs`, `/api-docs` and `/api-docs/` alike. Blank input
    /// and `/` mean root.
    pub fn new(raw: &str) -> Self {
        let trimmed = raw.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            Self::root()
        } else if trimmed.starts_with('/') {
            Self(trimmed.to_string())
        } else {
            Self(format!("/{trimmed}"))
        }
    }

    /// Base path of a site served from the domain root.
    pub fn root() -> Self {
        Self(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Canonical in-app form of `path`. See [`normalize`].
    pub fn normalize<'a>(&self, path: &'a str) -> &'a str {
        normalize(path, &self.0)
    }

    /// Whether a link to `href` is the current page. See [`crate::is_active`].
    pub fn is_active(&self, current_path: &str, href: &str) -> bool {
        crate::resolve::is_active(current_path, href, &self.0)
    }

    /// Public URL of an in-app route.
    ///
    /// The root route maps to the base path itself, so `/api-docs` rather
    /// than `/api-docs/`.
    pub fn join(&self, route: &str) -> String {
        let route = route.trim_start_matches('/');
        match (self.is_root(), route.is_empty()) {
            (true, true) => ROOT.to_string(),
            (false, true) => self.0.clone(),
            (_, false) => format!("{}/{}", self.0, route),
        }
    }
}

impl From<String> for BasePath {
    fn from(raw: String) -> Self {
        Self::new(&raw)
    }
}

impl From<&str> for BasePath {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<BasePath> for String {
    fn from(base: BasePath) -> Self {
        base.0
    }
}

impl AsRef<str> for BasePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BasePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            f.write_str(ROOT)
        } else {
            f.write_str(&self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "/api-docs";

    #[test]
    fn strips_base_path_prefix() {
        assert_eq!(normalize("/api-docs/books", BASE), "/books");
        assert_eq!(normalize("/api-docs/guides/setup", BASE), "/guides/setup");
    }

    #[test]
    fn bare_base_path_is_root() {
        assert_eq!(normalize("/api-docs", BASE), "/");
        assert_eq!(normalize("/api-docs/", BASE), "/");
    }

    #[test]
    fn leaves_foreign_paths_alone() {
        assert_eq!(normalize("/books", BASE), "/books");
        assert_eq!(
            normalize("https://github.com/x/y", BASE),
            "https://github.com/x/y"
        );
        assert_eq!(normalize("", BASE), "");
        assert_eq!(normalize("/", BASE), "/");
    }

    #[test]
    fn empty_base_path_keeps_routes() {
        assert_eq!(normalize("/books", ""), "/books");
        assert_eq!(normalize("/", ""), "/");
        assert_eq!(normalize("", ""), "/");
    }

    #[test]
    fn remainder_matches_suffix_of_prefixed_paths() {
        let bases = ["", "/api-docs", "/docs/v2"];
        let suffixes = ["", "/", "/books", "/a/b/c", "?tab=1", "-beta"];

        for base in bases {
            for suffix in suffixes {
                let path = format!("{base}{suffix}");
                let expected = if suffix.is_empty() { "/" } else { suffix };
                assert_eq!(normalize(&path, base), expected, "path {path:?}");
            }
        }
    }

    #[test]
    fn normalization_is_idempotent() {
        let paths = [
            "",
            "/",
            "/api-docs",
            "/api-docs/",
            "/api-docs/books",
            "/books",
            "https://github.com/x/y",
            "/other/api-docs",
        ];

        for path in paths {
            let once = normalize(path, BASE);
            assert_eq!(normalize(once, BASE), once, "path {path:?}");
        }
    }

    #[test]
    fn strips_base_path_once() {
        let once = normalize("/api-docs/api-docs", BASE);

        assert_eq!(once, "/api-docs");
        assert_eq!(normalize(once, BASE), "/");
    }

    #[test]
    fn base_path_from_config_input() {
        assert_eq!(BasePath::new("/api-docs").as_str(), "/api-docs");
        assert_eq!(BasePath::new("/api-docs/").as_str(), "/api-docs");
        assert_eq!(BasePath::new("api-docs").as_str(), "/api-docs");
        assert_eq!(BasePath::new("  /api-docs  ").as_str(), "/api-docs");
        assert!(BasePath::new("/").is_root());
        assert!(BasePath::new("").is_root());
    }

    #[test]
    fn joins_routes() {
        let base = BasePath::new("/api-docs");
        assert_eq!(base.join("/"), "/api-docs");
        assert_eq!(base.join(""), "/api-docs");
        assert_eq!(base.join("/books"), "/api-docs/books");
        assert_eq!(base.join("guides/setup"), "/api-docs/guides/setup");

        let root = BasePath::root();
        assert_eq!(root.join("/"), "/");
        assert_eq!(root.join("/books"), "/books");
    }

    #[test]
    fn joined_routes_normalize_back() {
        let base = BasePath::new("/api-docs");
        for route in ["/", "/books", "/guides/setup"] {
            assert_eq!(base.normalize(&base.join(route)), route);
        }
    }

    #[test]
    fn displays_root_as_slash() {
        assert_eq!(BasePath::root().to_string(), "/");
        assert_eq!(BasePath::new("/api-docs").to_string(), "/api-docs");
    }
}
