//! Code block languages.

/// Language of a code block, keyed by its Prism grammar.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Language {
    Tsx,
    Jsx,
    TypeScript,
    JavaScript,
    Markup,
    Css,
    Json,
    Bash,
    Yaml,
    Toml,
    Rust,
    Python,
    Sql,
    /// No language given, or an explicit plain-text tag
    #[default]
    Plain,
    /// Anything else, lowercased as written
    Other(String),
}

impl Language {
    /// Parse language from a code fence info string or a `language` prop.
    ///
    /// Only the first token counts, so `ts title="client.ts"` is TypeScript.
    pub fn from_info(info: &str) -> Self {
        let lang = info
            .split(|c: char| c.is_whitespace() || c == ',' || c == '{')
            .next()
            .unwrap_or("");
        let lang = lang.strip_prefix("language-").unwrap_or(lang);

        match lang.to_lowercase().as_str() {
            "tsx" => Self::Tsx,
            "jsx" => Self::Jsx,
            "ts" | "typescript" => Self::TypeScript,
            "js" | "javascript" | "mjs" | "cjs" => Self::JavaScript,
            "html" | "xml" | "svg" | "markup" => Self::Markup,
            "css" => Self::Css,
            "json" => Self::Json,
            "bash" | "sh" | "shell" | "zsh" => Self::Bash,
            "yaml" | "yml" => Self::Yaml,
            "toml" => Self::Toml,
            "rust" | "rs" => Self::Rust,
            "python" | "py" => Self::Python,
            "sql" => Self::Sql,
            "" | "text" | "txt" | "plain" | "plaintext" => Self::Plain,
            other => Self::Other(other.to_string()),
        }
    }

    /// Prism grammar name, `None` for plain text.
    pub fn prism_name(&self) -> Option<&str> {
        let name = match self {
            Self::Tsx => "tsx",
            Self::Jsx => "jsx",
            Self::TypeScript => "typescript",
            Self::JavaScript => "javascript",
            Self::Markup => "markup",
            Self::Css => "css",
            Self::Json => "json",
            Self::Bash => "bash",
            Self::Yaml => "yaml",
            Self::Toml => "toml",
            Self::Rust => "rust",
            Self::Python => "python",
            Self::Sql => "sql",
            Self::Plain => return None,
            Self::Other(name) => name.as_str(),
        };
        Some(name)
    }

    pub fn is_plain(&self) -> bool {
        *self == Self::Plain
    }
}

/// A code block found in a page.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeBlock {
    /// Language from the fence info string
    pub language: Language,

    /// Source code content
    pub source: String,

    /// Line in the processed page body where the block starts (1-indexed)
    pub line: usize,
}

impl CodeBlock {
    pub fn new(language: Language, source: String, line: usize) -> Self {
        Self {
            language,
            source,
            line,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_language() {
        assert_eq!(Language::from_info("tsx"), Language::Tsx);
        assert_eq!(Language::from_info("jsx"), Language::Jsx);
        assert_eq!(Language::from_info("typescript"), Language::TypeScript);
        assert_eq!(Language::from_info("ts title=\"client.ts\""), Language::TypeScript);
        assert_eq!(Language::from_info("js"), Language::JavaScript);
        assert_eq!(Language::from_info("JSON"), Language::Json);
        assert_eq!(Language::from_info("language-sh"), Language::Bash);
        assert_eq!(Language::from_info("rust,ignore"), Language::Rust);
        assert_eq!(Language::from_info(""), Language::Plain);
        assert_eq!(
            Language::from_info("Haskell"),
            Language::Other("haskell".to_string())
        );
    }

    #[test]
    fn maps_to_prism_names() {
        assert_eq!(Language::from_info("ts").prism_name(), Some("typescript"));
        assert_eq!(Language::from_info("html").prism_name(), Some("markup"));
        assert_eq!(Language::from_info("haskell").prism_name(), Some("haskell"));
        assert_eq!(Language::from_info("text").prism_name(), None);
    }
}
