//! Code highlighting.
//!
//! Highlighting happens in the browser with Prism. At build time a code block
//! becomes `<pre class="language-x"><code class="language-x">` holding the
//! escaped source, and the page loads the Prism theme, the Prism core and
//! one component script per extra grammar.

use std::collections::HashSet;
use std::fmt;

use apidocs_mdx::Language;
use serde::Deserialize;

/// Prism 1.29 on cdnjs.
pub const DEFAULT_PRISM_CDN: &str = "https://cdnjs.cloudflare.com/ajax/libs/prism/1.29.0";

/// Grammars bundled in `prism.min.js`.
const CORE_LANGUAGES: &[&str] = &["markup", "css", "clike", "javascript"];

/// A fragment of HTML ready to be embedded in a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markup(String);

impl Markup {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Errors that can occur when highlighting a code block.
#[derive(Debug, thiserror::Error)]
pub enum HighlightError {
    #[error("Unsupported language '{0}'")]
    UnsupportedLanguage(String),
}

/// Turns source code into presentation markup.
pub trait Highlighter: Send + Sync {
    /// Highlight `code` written in `language` (a fence tag such as `ts`).
    ///
    /// An empty language means plain text and is never an error.
    fn highlight(&self, code: &str, language: &str) -> Result<Markup, HighlightError>;

    /// Stylesheet URLs the markup depends on.
    fn stylesheets(&self) -> Vec<String> {
        Vec::new()
    }

    /// Script URLs the markup depends on, in load order.
    fn scripts(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Escaped code in a bare `<pre><code>`.
pub fn plain_markup(code: &str) -> Markup {
    Markup(format!(
        "<pre><code>{}</code></pre>",
        escape_html(trim_final_newline(code))
    ))
}

/// Prism settings from `[highlight]` in `docs.toml`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PrismConfig {
    /// Grammars to load on top of the Prism core
    pub languages: Vec<String>,

    /// Theme name, e.g. `okaidia`; `default` for the stock theme
    pub theme: String,

    /// Base URL Prism files are loaded from
    pub cdn: String,
}

impl Default for PrismConfig {
    fn default() -> Self {
        Self {
            languages: vec![
                "jsx".to_string(),
                "typescript".to_string(),
                "javascript".to_string(),
            ],
            theme: "okaidia".to_string(),
            cdn: DEFAULT_PRISM_CDN.to_string(),
        }
    }
}

/// Highlighter emitting markup for client-side Prism.
#[derive(Debug, Clone)]
pub struct PrismHighlighter {
    config: PrismConfig,
    /// Component grammars in dependency order
    components: Vec<String>,
}

impl PrismHighlighter {
    pub fn new(config: PrismConfig) -> Self {
        let mut components = Vec::new();
        let mut seen = HashSet::new();

        for name in &config.languages {
            if let Some(grammar) = Language::from_info(name).prism_name() {
                push_with_dependencies(grammar, &mut components, &mut seen);
            }
        }

        Self { config, components }
    }

    /// Whether blocks in `grammar` (a Prism name) will be highlighted.
    pub fn supports(&self, grammar: &str) -> bool {
        CORE_LANGUAGES.contains(&grammar) || self.components.iter().any(|c| c == grammar)
    }

    fn cdn(&self) -> &str {
        self.config.cdn.trim_end_matches('/')
    }
}

impl Default for PrismHighlighter {
    fn default() -> Self {
        Self::new(PrismConfig::default())
    }
}

impl Highlighter for PrismHighlighter {
    fn highlight(&self, code: &str, language: &str) -> Result<Markup, HighlightError> {
        let parsed = Language::from_info(language);
        let Some(grammar) = parsed.prism_name() else {
            return Ok(plain_markup(code));
        };

        if !self.supports(grammar) {
            return Err(HighlightError::UnsupportedLanguage(language.to_string()));
        }

        Ok(Markup(format!(
            r#"<pre class="language-{grammar}"><code class="language-{grammar}">{}</code></pre>"#,
            escape_html(trim_final_newline(code))
        )))
    }

    fn stylesheets(&self) -> Vec<String> {
        let theme = match self.config.theme.as_str() {
            "" | "default" => "prism".to_string(),
            name => format!("prism-{name}"),
        };
        vec![format!("{}/themes/{theme}.min.css", self.cdn())]
    }

    fn scripts(&self) -> Vec<String> {
        let mut scripts = vec![format!("{}/prism.min.js", self.cdn())];
        scripts.extend(
            self.components
                .iter()
                .map(|c| format!("{}/components/prism-{c}.min.js", self.cdn())),
        );
        scripts
    }
}

/// Grammars a Prism component extends, which must load before it.
fn dependencies(grammar: &str) -> &'static [&'static str] {
    match grammar {
        "jsx" => &["markup", "javascript"],
        "tsx" => &["jsx", "typescript"],
        "typescript" => &["javascript"],
        "javascript" => &["clike"],
        _ => &[],
    }
}

fn push_with_dependencies(grammar: &str, out: &mut Vec<String>, seen: &mut HashSet<String>) {
    if CORE_LANGUAGES.contains(&grammar) || !seen.insert(grammar.to_string()) {
        return;
    }

    for dep in dependencies(grammar) {
        push_with_dependencies(dep, out, seen);
    }
    out.push(grammar.to_string());
}

fn trim_final_newline(code: &str) -> &str {
    code.strip_suffix('\n').unwrap_or(code)
}

/// Escape HTML special characters including single quotes.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
