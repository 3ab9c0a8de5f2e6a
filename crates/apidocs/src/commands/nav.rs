//! Print the sidebar menu as resolved for one route.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{bail, Context, Result};
use apidocs_nav::{resolve_menu, ResolvedLink};

use crate::config::load_config;

/// Run the nav command.
pub fn run(config_path: &Path, current_path: &str, json: bool) -> Result<()> {
    let config = load_config(config_path)?;

    if config.menu.is_empty() {
        bail!("No [[menu]] entries in {}", config_path.display());
    }

    let base = &config.site.base_path;
    tracing::debug!("Resolving {} against base path {}", current_path, base);

    let links = resolve_menu(&config.menu, current_path, base);

    if json {
        let out = serde_json::to_string_pretty(&links).context("Failed to serialize menu")?;
        println!("{}", out);
    } else {
        print!("{}", format_links(&links));
    }

    Ok(())
}

/// One line per entry: a marker (`*` active, `+` holds the active page),
/// the label, the href and any link attributes.
fn format_links(links: &[ResolvedLink]) -> String {
    let mut out = String::new();
    write_links(&mut out, links, 0);
    out
}

fn write_links(out: &mut String, links: &[ResolvedLink], depth: usize) {
    for link in links {
        let marker = if link.active {
            '*'
        } else if link.expanded {
            '+'
        } else {
            ' '
        };

        let mut line = format!("{marker} {}{}  {}", "  ".repeat(depth), link.label, link.href);
        if let Some(target) = &link.target {
            let _ = write!(line, "  target={target}");
        }
        if let Some(rel) = link.rel {
            let _ = write!(line, "  rel=\"{rel}\"");
        }

        out.push_str(line.trim_end());
        out.push('\n');

        write_links(out, &link.children, depth + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apidocs_nav::{BasePath, MenuItem};
    use pretty_assertions::assert_eq;

    fn menu() -> Vec<MenuItem> {
        vec![
            MenuItem::new("Home", "/api-docs"),
            MenuItem::new("Guides", "/api-docs/guides")
                .with_children(vec![MenuItem::new("Setup", "/api-docs/guides/setup")]),
            MenuItem::new("GitHub", "https://github.com/joseph-eccles/api-docs")
                .with_target("_blank"),
        ]
    }

    #[test]
    fn formats_resolved_menu() {
        let links = resolve_menu(&menu(), "/api-docs/guides/setup", &BasePath::new("/api-docs"));

        assert_eq!(
            format_links(&links),
            "  Home  /api-docs\n\
             + Guides  /api-docs/guides\n\
             *   Setup  /api-docs/guides/setup\n  \
             GitHub  https://github.com/joseph-eccles/api-docs  target=_blank  rel=\"noopener noreferrer\"\n"
        );
    }

    #[test]
    fn marks_home_on_root() {
        let links = resolve_menu(&menu(), "/api-docs/", &BasePath::new("/api-docs"));

        let out = format_links(&links);

        assert!(out.starts_with("* Home  /api-docs\n"));
        assert_eq!(out.matches('*').count(), 1);
    }

    #[test]
    fn serializes_links_as_json() {
        let links = resolve_menu(&menu(), "/api-docs", &BasePath::new("/api-docs"));

        let json = serde_json::to_value(&links).unwrap();

        assert_eq!(json[0]["active"], true);
        assert_eq!(json[2]["rel"], "noopener noreferrer");
        assert!(json[0].get("rel").is_none());
    }
}
