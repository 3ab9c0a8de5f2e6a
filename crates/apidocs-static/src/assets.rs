//! Asset pipeline for CSS, JavaScript and public files.

use std::fs;
use std::io;
use std::path::Path;

use walkdir::WalkDir;

/// Asset pipeline utilities.
pub struct AssetPipeline;

impl AssetPipeline {
    /// Generate the main CSS file.
    pub fn generate_css() -> String {
        DEFAULT_CSS.to_string()
    }

    /// Generate the main JavaScript file.
    pub fn generate_js() -> String {
        DEFAULT_JS.to_string()
    }

    /// Minify CSS using lightningcss.
    pub fn minify_css(css: &str) -> Result<String, String> {
        use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

        let stylesheet = StyleSheet::parse(css, ParserOptions::default())
            .map_err(|e| format!("CSS parse error: {}", e))?;

        let minified = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                ..Default::default()
            })
            .map_err(|e| format!("CSS minify error: {}", e))?;

        Ok(minified.code)
    }

    /// Copy every file under `src` into `dest`, keeping relative paths.
    ///
    /// Files are copied byte for byte; images are not resized or
    /// re-encoded. Returns the number of files copied.
    pub fn copy_dir(src: &Path, dest: &Path) -> io::Result<usize> {
        let mut count = 0;

        for entry in WalkDir::new(src).follow_links(true) {
            let entry = entry.map_err(io::Error::other)?;
            if !entry.file_type().is_file() {
                continue;
            }

            let relative = entry.path().strip_prefix(src).map_err(io::Error::other)?;
            let target = dest.join(relative);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
            count += 1;
        }

        Ok(count)
    }
}

const DEFAULT_CSS: &str = r#"/* apidocs theme */

:root {
  --sidebar-width: 16rem;
  --toc-width: 13rem;
  --content-max-width: 50rem;
  --sidebar-bg: #1f2937;
  --sidebar-fg: #ffffff;
  --sidebar-hover: #374151;
  --active-bg: #3b82f6;
  --fg: #111827;
  --muted-fg: #6b7280;
  --border: #e5e7eb;
  --link: #2563eb;
  --radius: 0.25rem;
}

* {
  box-sizing: border-box;
}

body {
  margin: 0;
  font-family: system-ui, -apple-system, "Segoe UI", sans-serif;
  color: var(--fg);
  line-height: 1.6;
}

.layout {
  display: flex;
  height: 100vh;
}

/* Sidebar */
.sidebar {
  display: flex;
  flex-direction: column;
  flex-shrink: 0;
  width: var(--sidebar-width);
  height: 100%;
  background: var(--sidebar-bg);
  color: var(--sidebar-fg);
}

.sidebar-header {
  padding: 1rem;
}

.sidebar-logo {
  color: inherit;
  text-decoration: none;
}

.sidebar-logo img {
  max-width: 100%;
  max-height: 3rem;
}

.sidebar-title {
  font-size: 1.125rem;
  font-weight: 600;
}

.nav-list,
.nav-children {
  list-style: none;
  margin: 0;
}

.nav-list {
  flex: 1;
  overflow-y: auto;
  padding: 1rem;
}

.nav-children {
  padding: 0.25rem 0 0 1rem;
}

.nav-item {
  margin-bottom: 0.5rem;
}

.nav-item a {
  display: block;
  padding: 0.5rem;
  border-radius: var(--radius);
  color: inherit;
  text-decoration: none;
  transition: background-color 0.15s;
}

.nav-item a:hover {
  background: var(--sidebar-hover);
}

.nav-item.active > a {
  background: var(--active-bg);
}

/* Main content */
.main-content {
  flex: 1;
  display: flex;
  gap: 2rem;
  padding: 1.5rem;
  overflow-y: auto;
}

.doc {
  flex: 1;
  min-width: 0;
  max-width: var(--content-max-width);
}

.doc h1 {
  font-size: 2rem;
  margin: 0 0 1.5rem;
}

.doc h2 {
  font-size: 1.5rem;
  margin: 2rem 0 1rem;
  padding-bottom: 0.25rem;
  border-bottom: 1px solid var(--border);
}

.doc h3 {
  font-size: 1.25rem;
  margin: 1.5rem 0 0.75rem;
}

.doc a {
  color: var(--link);
}

.doc table {
  border-collapse: collapse;
  margin-bottom: 1rem;
}

.doc th,
.doc td {
  border: 1px solid var(--border);
  padding: 0.375rem 0.75rem;
  text-align: left;
}

.doc :not(pre) > code {
  font-size: 0.875em;
  background: #f3f4f6;
  padding: 0.125rem 0.375rem;
  border-radius: var(--radius);
}

.doc pre {
  overflow-x: auto;
  border-radius: 0.375rem;
  margin: 0 0 1rem;
  padding: 1rem;
}

.doc pre:not([class*="language-"]) {
  background: #272822;
  color: #f8f8f2;
}

/* Table of contents */
.toc {
  flex-shrink: 0;
  width: var(--toc-width);
  position: sticky;
  top: 0;
  align-self: flex-start;
  font-size: 0.875rem;
}

.toc h2 {
  font-size: 0.75rem;
  text-transform: uppercase;
  letter-spacing: 0.05em;
  color: var(--muted-fg);
}

.toc ul {
  list-style: none;
  padding: 0;
}

.toc a {
  color: var(--muted-fg);
  text-decoration: none;
}

.toc a:hover {
  color: var(--fg);
}

.toc-level-3 {
  padding-left: 1rem;
}

.toc-level-4 {
  padding-left: 2rem;
}

/* Top bar, mobile only */
.topbar {
  display: none;
  align-items: center;
  gap: 0.75rem;
  padding: 0.75rem 1rem;
  background: var(--sidebar-bg);
  color: var(--sidebar-fg);
}

.topbar-title {
  color: inherit;
  font-weight: 600;
  text-decoration: none;
}

.menu-btn {
  background: none;
  border: none;
  color: inherit;
  font-size: 1.25rem;
  cursor: pointer;
}

@media (max-width: 768px) {
  .topbar {
    display: flex;
  }

  .layout {
    height: auto;
  }

  .sidebar {
    display: none;
    position: fixed;
    top: 3rem;
    bottom: 0;
    left: 0;
    z-index: 50;
    height: auto;
  }

  .sidebar.open {
    display: flex;
  }

  .toc {
    display: none;
  }
}
"#;

const DEFAULT_JS: &str = r#"// apidocs runtime
(function() {
  'use strict';

  const menuBtn = document.querySelector('.menu-btn');
  const sidebar = document.querySelector('.sidebar');

  if (menuBtn && sidebar) {
    menuBtn.addEventListener('click', () => {
      sidebar.classList.toggle('open');
    });
  }
})();
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn generates_css() {
        let css = AssetPipeline::generate_css();
        assert!(css.contains(":root"));
        assert!(css.contains(".nav-item.active > a"));
        assert!(css.contains(".main-content"));
    }

    #[test]
    fn generates_js() {
        let js = AssetPipeline::generate_js();
        assert!(js.contains("addEventListener"));
        assert!(js.contains("'open'"));
    }

    #[test]
    fn minifies_css() {
        let css = r#"
.button {
    background-color: blue;
    padding: 10px;
}
        "#;

        let minified = AssetPipeline::minify_css(css).unwrap();

        assert!(!minified.contains('\n'));
        assert!(minified.contains(".button"));
    }

    #[test]
    fn minifies_default_theme() {
        let css = AssetPipeline::generate_css();

        let minified = AssetPipeline::minify_css(&css).unwrap();

        assert!(minified.len() < css.len());
    }

    #[test]
    fn copies_public_files() {
        let temp = tempdir().unwrap();
        let public = temp.path().join("public");
        let out = temp.path().join("out");

        fs::create_dir_all(public.join("images")).unwrap();
        fs::write(public.join("logo.svg"), "<svg/>").unwrap();
        fs::write(public.join("images/cover.png"), [0x89, b'P', b'N', b'G']).unwrap();

        let copied = AssetPipeline::copy_dir(&public, &out).unwrap();

        assert_eq!(copied, 2);
        assert_eq!(fs::read_to_string(out.join("logo.svg")).unwrap(), "<svg/>");
        assert_eq!(
            fs::read(out.join("images/cover.png")).unwrap(),
            vec![0x89, b'P', b'N', b'G']
        );
    }
}
