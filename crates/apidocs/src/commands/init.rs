//! Initialize documentation in a project.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command.
pub async fn run(config_path: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing apidocs...");

    let docs_dir = Path::new("docs");

    if docs_dir.exists() && !yes {
        tracing::warn!("docs/ directory already exists. Use --yes to overwrite.");
        return Ok(());
    }

    scaffold(config_path, docs_dir, yes)?;

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'apidocs build' to export the site.");

    Ok(())
}

fn scaffold(config_path: &Path, docs_dir: &Path, overwrite: bool) -> Result<()> {
    fs::create_dir_all(docs_dir).context("Failed to create docs directory")?;

    let files = [
        (config_path.to_path_buf(), DEFAULT_CONFIG),
        (docs_dir.join("index.mdx"), DEFAULT_INDEX),
        (docs_dir.join("books.mdx"), DEFAULT_BOOKS),
    ];

    for (path, contents) in files {
        if path.exists() && !overwrite {
            tracing::debug!("Keeping existing {}", path.display());
            continue;
        }

        fs::write(&path, contents)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!("Created {}", path.display());
    }

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# apidocs configuration

[site]
# Page title suffix
title = "API Docs"

# Prefix the site is deployed under ("" for the domain root)
base_path = "/api-docs"

# Source directory for documentation
dir = "docs"

# Output directory for the exported site
output = "out"

# Copied verbatim into the output root
public = "public"

[sidebar]
title = "API Docs"

[highlight]
languages = ["jsx", "typescript", "javascript", "bash"]
theme = "okaidia"

[build]
minify = true

[[menu]]
label = "Home"
href = "/api-docs"

[[menu]]
label = "Books"
href = "/api-docs/books"

[[menu]]
label = "GitHub"
href = "https://github.com/your-org/your-api"
target = "_blank"
"#;

const DEFAULT_INDEX: &str = r#"---
title: Home
order: 1
---

# Welcome

This site documents the HTTP API. Pick a resource from the sidebar.

## Base URL

```bash
curl https://api.example.com/v1
```
"#;

const DEFAULT_BOOKS: &str = r#"---
title: Books
order: 2
---
import CodeBlock from "../components/CodeBlock";

# Books

## List books

```bash
curl https://api.example.com/v1/books
```

## Create a book

<CodeBlock language="typescript" code={`
const book = await client.books.create({
  title: "Dune",
  author: "Frank Herbert",
});
`} />
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config;
    use tempfile::tempdir;

    #[test]
    fn scaffolds_project() {
        let temp = tempdir().unwrap();
        let config_path = temp.path().join("docs.toml");
        let docs_dir = temp.path().join("docs");

        scaffold(&config_path, &docs_dir, false).unwrap();

        assert!(docs_dir.join("index.mdx").exists());
        assert!(docs_dir.join("books.mdx").exists());

        let config = load_config(&config_path).unwrap();
        assert_eq!(config.site.base_path.as_str(), "/api-docs");
        assert_eq!(config.menu.len(), 3);
        assert!(config.menu[2].opens_new_context());
    }

    #[test]
    fn keeps_existing_files() {
        let temp = tempdir().unwrap();
        let config_path = temp.path().join("docs.toml");
        let docs_dir = temp.path().join("docs");
        fs::create_dir_all(&docs_dir).unwrap();
        fs::write(docs_dir.join("index.mdx"), "# Mine\n").unwrap();

        scaffold(&config_path, &docs_dir, false).unwrap();

        assert_eq!(
            fs::read_to_string(docs_dir.join("index.mdx")).unwrap(),
            "# Mine\n"
        );
    }

    #[tokio::test]
    async fn scaffolded_site_builds() {
        let temp = tempdir().unwrap();
        let config_path = temp.path().join("docs.toml");
        let docs_dir = temp.path().join("docs");
        scaffold(&config_path, &docs_dir, false).unwrap();

        let mut config = load_config(&config_path).unwrap().build_config();
        config.docs_dir = docs_dir;
        config.output_dir = temp.path().join("out");
        config.public_dir = None;

        let result = apidocs_static::StaticBuilder::new(config.clone())
            .build()
            .await
            .unwrap();

        assert_eq!(result.pages, 2);
        assert_eq!(result.code_blocks, 3);

        let books = fs::read_to_string(config.output_dir.join("books/index.html")).unwrap();
        assert!(books.contains(r#"aria-current="page">Books</a>"#));
        assert!(books.contains(r#"<code class="language-typescript">const book"#));
    }
}
