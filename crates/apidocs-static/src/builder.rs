//! Static site builder.

use std::collections::HashMap;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;
use walkdir::WalkDir;

use apidocs_mdx::{parse_mdx, ParsedDoc};
use apidocs_nav::{resolve_menu, BasePath, MenuItem};

use crate::assets::AssetPipeline;
use crate::highlight::{Highlighter, PrismConfig, PrismHighlighter};
use crate::render::render_markdown;
use crate::templates::{Context, Sidebar, TemplateEngine, TocEntry};

/// Sidebar header settings.
#[derive(Debug, Clone)]
pub struct SidebarConfig {
    /// Text shown when there is no logo
    pub title: String,

    /// Logo path relative to the site root, or an absolute URL
    pub logo: Option<String>,
}

impl Default for SidebarConfig {
    fn default() -> Self {
        Self {
            title: "API Docs".to_string(),
            logo: None,
        }
    }
}

/// Configuration for building a static site.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Source docs directory
    pub docs_dir: PathBuf,

    /// Output directory
    pub output_dir: PathBuf,

    /// Directory copied verbatim into the output root
    pub public_dir: Option<PathBuf>,

    /// Minify CSS output
    pub minify: bool,

    /// Prefix the site is deployed under
    pub base_path: BasePath,

    /// Site title
    pub title: String,

    /// Sidebar header
    pub sidebar: SidebarConfig,

    /// Sidebar menu; derived from the page tree when empty
    pub menu: Vec<MenuItem>,

    /// Paths to CSS stylesheets to include
    pub styles: Vec<String>,

    /// Code highlighting
    pub highlight: PrismConfig,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            docs_dir: PathBuf::from("docs"),
            output_dir: PathBuf::from("out"),
            public_dir: None,
            minify: true,
            base_path: BasePath::root(),
            title: "API Docs".to_string(),
            sidebar: SidebarConfig::default(),
            menu: vec![],
            styles: vec![],
            highlight: PrismConfig::default(),
        }
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of pages generated
    pub pages: usize,

    /// Number of code blocks rendered
    pub code_blocks: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to read docs directory: {0}")]
    ReadError(String),

    #[error("Failed to parse MDX: {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("Route '/{route}' is produced by both {first} and {second}")]
    DuplicateRoute {
        route: String,
        first: String,
        second: String,
    },

    #[error("Slug '{slug}' in {path} must stay inside the output directory")]
    InvalidSlug { path: String, slug: String },

    #[error("Failed to render template: {0}")]
    TemplateError(String),

    #[error("Failed to write output: {0}")]
    WriteError(String),
}

/// A page to be built.
#[derive(Debug)]
struct PageInfo {
    /// Source file path
    source_path: PathBuf,

    /// Relative path from docs dir
    relative_path: PathBuf,

    /// In-app route without slashes at either end, `""` for the root
    route: String,

    /// Public URL including the base path
    url: String,

    /// Output path
    output_path: PathBuf,

    /// Parsed document
    doc: ParsedDoc,
}

impl PageInfo {
    fn title(&self) -> String {
        if let Some(title) = self.doc.title() {
            return title.to_string();
        }

        match self.route.rsplit('/').next() {
            Some("") | None => "Home".to_string(),
            Some(segment) => capitalize(segment),
        }
    }

    /// Directory of the source file, with `/` separators.
    fn section(&self) -> String {
        self.relative_path
            .parent()
            .map(path_to_route)
            .unwrap_or_default()
    }

    /// Whether this page is the `index` of its directory.
    fn is_section_index(&self) -> bool {
        self.relative_path
            .file_stem()
            .and_then(|s| s.to_str())
            .is_some_and(is_index_stem)
    }
}

/// Static site builder.
pub struct StaticBuilder {
    config: BuildConfig,
    highlighter: Box<dyn Highlighter>,
    templates: TemplateEngine,
}

impl StaticBuilder {
    /// Create a new static builder.
    pub fn new(config: BuildConfig) -> Self {
        let highlighter = Box::new(PrismHighlighter::new(config.highlight.clone()));

        Self {
            config,
            highlighter,
            templates: TemplateEngine::new(),
        }
    }

    /// Replace the code highlighter.
    pub fn with_highlighter(mut self, highlighter: impl Highlighter + 'static) -> Self {
        self.highlighter = Box::new(highlighter);
        self
    }

    /// Build the static site.
    pub async fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        // Ensure output directory exists
        fs::create_dir_all(&self.config.output_dir)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        self.copy_public()?;

        let pages = self.discover_pages()?;
        tracing::info!("Found {} pages", pages.len());

        let menu = if self.config.menu.is_empty() {
            self.derive_menu(&pages)
        } else {
            self.config.menu.clone()
        };

        // Render pages in parallel
        let results: Vec<Result<usize, BuildError>> = pages
            .par_iter()
            .map(|page| self.build_page(page, &menu))
            .collect();

        let mut code_blocks = 0;
        for result in results {
            code_blocks += result?;
        }

        self.build_not_found(&menu)?;
        self.generate_assets()?;

        let duration = start.elapsed();

        Ok(BuildResult {
            pages: pages.len(),
            code_blocks,
            duration_ms: duration.as_millis() as u64,
            output_dir: self.config.output_dir.clone(),
        })
    }

    /// Copy the public directory into the output root.
    fn copy_public(&self) -> Result<(), BuildError> {
        let Some(public_dir) = &self.config.public_dir else {
            return Ok(());
        };

        if !public_dir.is_dir() {
            tracing::debug!("No public directory at {}", public_dir.display());
            return Ok(());
        }

        let count = AssetPipeline::copy_dir(public_dir, &self.config.output_dir)
            .map_err(|e| BuildError::WriteError(format!("{}: {}", public_dir.display(), e)))?;
        tracing::info!("Copied {} public files", count);

        Ok(())
    }

    /// Discover all MDX pages in the docs directory.
    fn discover_pages(&self) -> Result<Vec<PageInfo>, BuildError> {
        let mut pages = Vec::new();

        if !self.config.docs_dir.exists() {
            return Err(BuildError::ReadError(format!(
                "Docs directory not found: {}",
                self.config.docs_dir.display()
            )));
        }

        for entry in WalkDir::new(&self.config.docs_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();

            if !path.is_file() {
                continue;
            }

            let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
            if ext != "mdx" && ext != "md" {
                continue;
            }

            let content = fs::read_to_string(path)
                .map_err(|e| BuildError::ReadError(format!("{}: {}", path.display(), e)))?;

            let doc = parse_mdx(&content).map_err(|e| BuildError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

            let relative_path = path
                .strip_prefix(&self.config.docs_dir)
                .unwrap_or(path)
                .to_path_buf();

            let slug = doc.frontmatter.as_ref().and_then(|f| f.slug.as_deref());
            let route = route_for(&relative_path, slug).ok_or_else(|| BuildError::InvalidSlug {
                path: path.display().to_string(),
                slug: slug.unwrap_or_default().to_string(),
            })?;
            let url = self.config.base_path.join(&route);
            let output_path = self.output_path(&route);

            tracing::debug!("{} -> {}", relative_path.display(), url);

            pages.push(PageInfo {
                source_path: path.to_path_buf(),
                relative_path,
                route,
                url,
                output_path,
                doc,
            });
        }

        let mut seen: HashMap<&str, &Path> = HashMap::new();
        for page in &pages {
            if let Some(first) = seen.insert(&page.route, &page.source_path) {
                return Err(BuildError::DuplicateRoute {
                    route: page.route.clone(),
                    first: first.display().to_string(),
                    second: page.source_path.display().to_string(),
                });
            }
        }

        pages.sort_by(|a, b| {
            let order_a = a.doc.order().unwrap_or(i32::MAX);
            let order_b = b.doc.order().unwrap_or(i32::MAX);
            order_a.cmp(&order_b).then_with(|| a.route.cmp(&b.route))
        });

        Ok(pages)
    }

    fn output_path(&self, route: &str) -> PathBuf {
        if route.is_empty() {
            self.config.output_dir.join("index.html")
        } else {
            self.config.output_dir.join(route).join("index.html")
        }
    }

    /// Build a menu from the page tree.
    ///
    /// Top-level pages become entries; each directory becomes a section
    /// whose link is the directory's index page, or its first page when it
    /// has no index. Entries keep page order.
    fn derive_menu(&self, pages: &[PageInfo]) -> Vec<MenuItem> {
        let mut menu: Vec<MenuItem> = Vec::new();
        let mut sections: HashMap<String, usize> = HashMap::new();
        let mut indexed: Vec<bool> = Vec::new();

        for page in pages {
            if !page.doc.in_nav() {
                continue;
            }

            let section = page.section();
            if section.is_empty() {
                menu.push(MenuItem::new(page.title(), &page.url));
                indexed.push(true);
                continue;
            }

            let index = *sections.entry(section.clone()).or_insert_with(|| {
                let name = section.rsplit('/').next().unwrap_or(&section);
                menu.push(MenuItem::new(capitalize(name), &page.url));
                indexed.push(false);
                menu.len() - 1
            });

            if page.is_section_index() {
                menu[index].label = page.title();
                menu[index].href = page.url.clone();
                indexed[index] = true;
            } else {
                menu[index]
                    .children
                    .push(MenuItem::new(page.title(), &page.url));
            }
        }

        for (item, indexed) in menu.iter_mut().zip(indexed) {
            if !indexed {
                if let Some(first) = item.children.first() {
                    item.href = first.href.clone();
                }
            }
        }

        menu
    }

    /// Build a single page, returning the number of code blocks it holds.
    fn build_page(&self, page: &PageInfo, menu: &[MenuItem]) -> Result<usize, BuildError> {
        let _span = tracing::debug_span!("page", url = %page.url).entered();

        let content = render_markdown(&page.doc.content, self.highlighter.as_ref());
        let highlighted = !page.doc.code_blocks.is_empty();

        let toc = page
            .doc
            .toc
            .iter()
            .map(|e| TocEntry {
                title: e.title.clone(),
                id: e.id.clone(),
                level: e.level,
            })
            .collect();

        let context = Context {
            title: page.title(),
            site_title: self.config.title.clone(),
            description: page.doc.description().map(str::to_string),
            content,
            sidebar: self.sidebar(menu, &page.url),
            toc,
            stylesheets: self.stylesheets(highlighted),
            scripts: self.scripts(highlighted),
        };

        let html = self
            .templates
            .render_page("doc.html", &context)
            .map_err(|e| BuildError::TemplateError(format!("{}: {}", page.source_path.display(), e)))?;

        write_file(&page.output_path, html)?;
        tracing::debug!("Wrote {}", page.output_path.display());

        Ok(page.doc.code_blocks.len())
    }

    /// Build `404.html` in the output root.
    fn build_not_found(&self, menu: &[MenuItem]) -> Result<(), BuildError> {
        let current = self.config.base_path.join("404");

        let context = Context {
            title: "Page not found".to_string(),
            site_title: self.config.title.clone(),
            description: None,
            content: String::new(),
            sidebar: self.sidebar(menu, &current),
            toc: vec![],
            stylesheets: self.stylesheets(false),
            scripts: self.scripts(false),
        };

        let html = self
            .templates
            .render_page("404.html", &context)
            .map_err(|e| BuildError::TemplateError(e.to_string()))?;

        write_file(&self.config.output_dir.join("404.html"), html)
    }

    fn sidebar(&self, menu: &[MenuItem], current_path: &str) -> Sidebar {
        let base = &self.config.base_path;

        Sidebar {
            title: self.config.sidebar.title.clone(),
            logo: self.config.sidebar.logo.as_deref().map(|logo| {
                if is_absolute_url(logo) {
                    logo.to_string()
                } else {
                    base.join(logo)
                }
            }),
            home: base.join(""),
            links: resolve_menu(menu, current_path, base),
        }
    }

    fn stylesheets(&self, highlighted: bool) -> Vec<String> {
        let base = &self.config.base_path;
        let mut stylesheets = if highlighted {
            self.highlighter.stylesheets()
        } else {
            vec![]
        };

        stylesheets.push(base.join("assets/main.css"));
        stylesheets.extend(
            self.config
                .styles
                .iter()
                .map(|s| base.join(&format!("assets/{}", style_file_name(s)))),
        );
        stylesheets
    }

    fn scripts(&self, highlighted: bool) -> Vec<String> {
        let mut scripts = if highlighted {
            self.highlighter.scripts()
        } else {
            vec![]
        };

        scripts.push(self.config.base_path.join("assets/main.js"));
        scripts
    }

    /// Generate static assets.
    fn generate_assets(&self) -> Result<(), BuildError> {
        let assets_dir = self.config.output_dir.join("assets");
        fs::create_dir_all(&assets_dir).map_err(|e| BuildError::WriteError(e.to_string()))?;

        let css = AssetPipeline::generate_css();
        let css = if self.config.minify {
            AssetPipeline::minify_css(&css).unwrap_or_else(|e| {
                tracing::warn!("{}, writing unminified CSS", e);
                css
            })
        } else {
            css
        };
        write_file(&assets_dir.join("main.css"), css)?;

        write_file(&assets_dir.join("main.js"), AssetPipeline::generate_js())?;

        // Copy configured stylesheets
        for style_path in &self.config.styles {
            let source_path = PathBuf::from(style_path);
            if source_path.exists() {
                let content = fs::read_to_string(&source_path).map_err(|e| {
                    BuildError::ReadError(format!("Failed to read stylesheet: {}", e))
                })?;
                write_file(&assets_dir.join(style_file_name(style_path)), content)?;
                tracing::info!("Copied stylesheet from {}", style_path);
            } else {
                tracing::warn!("Stylesheet not found: {}", style_path);
            }
        }

        Ok(())
    }
}

/// In-app route of a page.
///
/// `books.mdx` is served at `books`; an `index` or `page` file is served at
/// its directory. A frontmatter slug replaces the derived route, and is
/// rejected (`None`) when it would climb out of the output directory.
fn route_for(relative: &Path, slug: Option<&str>) -> Option<String> {
    if let Some(slug) = slug {
        return slug_route(slug);
    }

    let route = path_to_route(&relative.with_extension(""));
    let route = match route.rsplit_once('/') {
        Some((dir, stem)) if is_index_stem(stem) => dir.to_string(),
        None if is_index_stem(&route) => String::new(),
        _ => route,
    };
    Some(route)
}

/// Only plain `/`-separated names are accepted.
fn slug_route(slug: &str) -> Option<String> {
    let route = slug.trim_matches('/');
    if route.is_empty() {
        return Some(String::new());
    }

    let plain = route
        .split('/')
        .all(|s| !s.is_empty() && s != "." && s != "..")
        && Path::new(route)
            .components()
            .all(|c| matches!(c, Component::Normal(_)));

    plain.then(|| route.to_string())
}

fn path_to_route(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn is_index_stem(stem: &str) -> bool {
    stem == "index" || stem == "page"
}

fn is_absolute_url(href: &str) -> bool {
    href.starts_with("http://") || href.starts_with("https://") || href.starts_with("//")
}

fn style_file_name(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|f| f.to_str())
        .unwrap_or("style.css")
}

fn write_file(path: &Path, contents: impl AsRef<[u8]>) -> Result<(), BuildError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| BuildError::WriteError(e.to_string()))?;
    }

    fs::write(path, contents)
        .map_err(|e| BuildError::WriteError(format!("{}: {}", path.display(), e)))
}

/// Capitalize first letter of a string.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
