//! `docs.toml` loading.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use apidocs_nav::{BasePath, MenuItem};
use apidocs_static::{BuildConfig, PrismConfig, SidebarConfig};
use serde::Deserialize;

/// Configuration file structure (docs.toml).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct ConfigFile {
    pub site: SiteSettings,
    pub sidebar: SidebarSettings,
    pub highlight: PrismConfig,
    pub build: BuildSettings,
    pub menu: Vec<MenuItem>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteSettings {
    pub title: String,
    pub base_path: BasePath,
    pub dir: PathBuf,
    pub output: PathBuf,
    pub public: PathBuf,
    /// Paths to CSS stylesheets to include
    pub styles: Vec<String>,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            title: "API Docs".to_string(),
            base_path: BasePath::root(),
            dir: PathBuf::from("docs"),
            output: PathBuf::from("out"),
            public: PathBuf::from("public"),
            styles: vec![],
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct SidebarSettings {
    /// Falls back to the site title
    pub title: Option<String>,
    pub logo: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct BuildSettings {
    pub minify: bool,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self { minify: true }
    }
}

impl ConfigFile {
    /// Builder configuration described by this file.
    pub fn build_config(&self) -> BuildConfig {
        BuildConfig {
            docs_dir: self.site.dir.clone(),
            output_dir: self.site.output.clone(),
            public_dir: Some(self.site.public.clone()),
            minify: self.build.minify,
            base_path: self.site.base_path.clone(),
            title: self.site.title.clone(),
            sidebar: SidebarConfig {
                title: self
                    .sidebar
                    .title
                    .clone()
                    .unwrap_or_else(|| self.site.title.clone()),
                logo: self.sidebar.logo.clone(),
            },
            menu: self.menu.clone(),
            styles: self.site.styles.clone(),
            highlight: self.highlight.clone(),
        }
    }
}

/// Load configuration from `path` if it exists.
/// Returns an error if the config file exists but is malformed.
pub fn load_config(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        tracing::debug!("No config at {}, using defaults", path.display());
        return Ok(ConfigFile::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config = parse_config(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    tracing::info!("Loaded config from {}", path.display());

    Ok(config)
}

fn parse_config(content: &str) -> Result<ConfigFile, toml::de::Error> {
    toml::from_str(content)
}
