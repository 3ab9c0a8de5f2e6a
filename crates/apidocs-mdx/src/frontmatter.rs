//! Frontmatter extraction and parsing.

use serde::Deserialize;

/// Parsed frontmatter from an MDX page.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Frontmatter {
    /// Page title, falls back to the first `#` heading
    #[serde(default)]
    pub title: Option<String>,

    /// Page description for the `<meta>` tag
    #[serde(default)]
    pub description: Option<String>,

    /// Order in navigation (lower = first)
    #[serde(default)]
    pub order: Option<i32>,

    /// Whether to show in a navigation derived from the page tree
    #[serde(default = "default_true")]
    pub nav: bool,

    /// Route override, e.g. `reference/books`
    #[serde(default)]
    pub slug: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Default for Frontmatter {
    fn default() -> Self {
        Self {
            title: None,
            description: None,
            order: None,
            nav: true,
            slug: None,
        }
    }
}

/// Split a page into its frontmatter and body.
///
/// The block must open on the first non-blank line and close with a line
/// holding only `---`. Pages without a block return `None` and the source
/// unchanged.
pub fn extract_frontmatter(source: &str) -> Result<(Option<Frontmatter>, &str), FrontmatterError> {
    let Some(block) = opening_delimiter(source) else {
        return Ok((None, source));
    };

    let mut offset = 0;
    for line in block.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let frontmatter = parse_yaml(block[..offset].trim())?;
            let body = &block[offset + line.len()..];
            return Ok((Some(frontmatter), body.trim_start()));
        }
        offset += line.len();
    }

    Err(FrontmatterError::Unclosed)
}

/// Text after the opening `---` line, if the page starts with one.
fn opening_delimiter(source: &str) -> Option<&str> {
    let (first, rest) = source.trim_start().split_once('\n')?;
    (first.trim_end() == "---").then_some(rest)
}

fn parse_yaml(yaml: &str) -> Result<Frontmatter, FrontmatterError> {
    if yaml.is_empty() {
        return Ok(Frontmatter::default());
    }

    serde_yaml::from_str(yaml).map_err(|e| FrontmatterError::InvalidYaml(e.to_string()))
}

/// Errors that can occur when parsing frontmatter.
#[derive(Debug, thiserror::Error)]
pub enum FrontmatterError {
    #[error("Frontmatter block is never closed with a `---` line")]
    Unclosed,

    #[error("Frontmatter is not valid YAML: {0}")]
    InvalidYaml(String),
}
