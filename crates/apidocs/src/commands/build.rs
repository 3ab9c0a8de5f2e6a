//! Static site build command.

use std::path::{Path, PathBuf};

use anyhow::Result;
use apidocs_nav::BasePath;
use apidocs_static::StaticBuilder;

use crate::config::load_config;

/// Run the build command.
pub async fn run(
    config_path: &Path,
    output: Option<PathBuf>,
    minify: Option<bool>,
    base_path: Option<String>,
) -> Result<()> {
    tracing::info!("Building static site...");

    let mut config = load_config(config_path)?.build_config();

    if let Some(output) = output {
        config.output_dir = output;
    }
    if let Some(minify) = minify {
        config.minify = minify;
    }
    if let Some(base_path) = base_path {
        config.base_path = BasePath::new(&base_path);
    }

    tracing::info!("Base path: {}", config.base_path);

    let result = StaticBuilder::new(config).build().await?;

    tracing::info!(
        "Built {} pages with {} code blocks in {}ms",
        result.pages,
        result.code_blocks,
        result.duration_ms
    );

    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}
