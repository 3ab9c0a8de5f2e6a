//! Menu entries and their resolved link attributes.

use serde::{Deserialize, Serialize};

use crate::path::BasePath;

/// `target` value that opens a link in a new browsing context.
pub const NEW_CONTEXT: &str = "_blank";

/// `rel` value that keeps a new browsing context from reaching back into
/// the page through `window.opener` or the `Referer` header.
pub const ISOLATED_REL: &str = "noopener noreferrer";

/// A navigation entry as configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Display text
    pub label: String,

    /// In-app path (usually with the base path) or external URL
    pub href: String,

    /// Browsing context for the link, e.g. `_blank`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,

    /// Nested entries, used for directory sections
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MenuItem>,
}

impl MenuItem {
    pub fn new(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: href.into(),
            target: None,
            children: Vec::new(),
        }
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn with_children(mut self, children: Vec<MenuItem>) -> Self {
        self.children = children;
        self
    }

    /// Whether the link opens a new browsing context.
    pub fn opens_new_context(&self) -> bool {
        self.target.as_deref() == Some(NEW_CONTEXT)
    }

    /// `rel` attribute the link must carry, if any.
    pub fn rel(&self) -> Option<&'static str> {
        self.opens_new_context().then_some(ISOLATED_REL)
    }

    /// Resolve this entry against the page at `current_path`.
    pub fn resolve(&self, current_path: &str, base: &BasePath) -> ResolvedLink {
        let children = resolve_menu(&self.children, current_path, base);
        let expanded = children.iter().any(|c| c.active || c.expanded);

        ResolvedLink {
            label: self.label.clone(),
            href: self.href.clone(),
            active: base.is_active(current_path, &self.href),
            expanded,
            target: self.target.clone(),
            rel: self.rel(),
            children,
        }
    }
}

/// A menu entry ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedLink {
    pub label: String,
    pub href: String,
    /// Entry points at the current page
    pub active: bool,
    /// Some descendant points at the current page
    pub expanded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rel: Option<&'static str>,
    pub children: Vec<ResolvedLink>,
}

/// Resolve every entry of a menu against the page at `current_path`.
///
/// Order is preserved. Pass `""` when the current path is unknown.
pub fn resolve_menu(
    items: &[MenuItem],
    current_path: &str,
    base: &BasePath,
) -> Vec<ResolvedLink> {
    items
        .iter()
        .map(|item| item.resolve(current_path, base))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn menu() -> Vec<MenuItem> {
        vec![
            MenuItem::new("Home", "/api-docs"),
            MenuItem::new("Authentication", "/api-docs/authentication"),
            MenuItem::new("Books", "/api-docs/books"),
            MenuItem::new("Authors", "/api-docs/authors"),
            MenuItem::new("GitHub", "https://github.com/joseph-eccles/api-docs")
                .with_target("_blank"),
        ]
    }

    fn active_labels(links: &[ResolvedLink]) -> Vec<&str> {
        links
            .iter()
            .filter(|l| l.active)
            .map(|l| l.label.as_str())
            .collect()
    }

    #[test]
    fn marks_only_current_page_active() {
        let base = BasePath::new("/api-docs");
        let links = resolve_menu(&menu(), "/api-docs/books", &base);

        assert_eq!(active_labels(&links), vec!["Books"]);
    }

    #[test]
    fn marks_home_on_root_and_empty_path() {
        let base = BasePath::new("/api-docs");

        let links = resolve_menu(&menu(), "/api-docs", &base);
        assert_eq!(active_labels(&links), vec!["Home"]);

        let links = resolve_menu(&menu(), "", &base);
        assert_eq!(active_labels(&links), vec!["Home"]);
    }

    #[test]
    fn unknown_page_has_no_active_entry() {
        let base = BasePath::new("/api-docs");
        let links = resolve_menu(&menu(), "/api-docs/404", &base);

        assert!(active_labels(&links).is_empty());
    }

    #[test]
    fn new_context_links_are_isolated() {
        let base = BasePath::new("/api-docs");

        for link in resolve_menu(&menu(), "/api-docs", &base) {
            if link.target.as_deref() == Some(NEW_CONTEXT) {
                assert_eq!(link.rel, Some(ISOLATED_REL), "{}", link.label);
            } else {
                assert_eq!(link.rel, None, "{}", link.label);
            }
        }
    }

    #[test]
    fn other_targets_are_not_isolated() {
        let item = MenuItem::new("Docs", "/api-docs").with_target("_self");

        assert!(!item.opens_new_context());
        assert_eq!(item.rel(), None);
    }

    #[test]
    fn preserves_order_and_hrefs() {
        let base = BasePath::new("/api-docs");
        let links = resolve_menu(&menu(), "/api-docs/books", &base);

        let hrefs: Vec<&str> = links.iter().map(|l| l.href.as_str()).collect();
        assert_eq!(
            hrefs,
            vec![
                "/api-docs",
                "/api-docs/authentication",
                "/api-docs/books",
                "/api-docs/authors",
                "https://github.com/joseph-eccles/api-docs",
            ]
        );
    }

    #[test]
    fn expands_sections_holding_the_current_page() {
        let base = BasePath::new("/api-docs");
        let items = vec![
            MenuItem::new("Home", "/api-docs"),
            MenuItem::new("Guides", "/api-docs/guides").with_children(vec![
                MenuItem::new("Setup", "/api-docs/guides/setup"),
                MenuItem::new("Deploy", "/api-docs/guides/deploy"),
            ]),
        ];

        let links = resolve_menu(&items, "/api-docs/guides/setup", &base);

        assert!(!links[1].active);
        assert!(links[1].expanded);
        assert!(links[1].children[0].active);
        assert!(!links[1].children[1].active);
        assert!(!links[0].expanded);
    }

    #[test]
    fn deserializes_menu_config() {
        #[derive(Deserialize)]
        struct Config {
            menu: Vec<MenuItem>,
        }

        let config: Config = toml::from_str(
            r#"
[[menu]]
label = "Home"
href = "/api-docs"

[[menu]]
label = "GitHub"
href = "https://github.com/joseph-eccles/api-docs"
target = "_blank"
"#,
        )
        .unwrap();

        assert_eq!(config.menu.len(), 2);
        assert_eq!(config.menu[0], MenuItem::new("Home", "/api-docs"));
        assert!(config.menu[1].opens_new_context());
    }
}
