//! MDX document parser.

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};

use crate::codeblock::{CodeBlock, Language};
use crate::frontmatter::{extract_frontmatter, Frontmatter, FrontmatterError};
use crate::jsx::{lower_code_block_elements, strip_esm};
use crate::slug::Slugger;

/// A parsed MDX document.
#[derive(Debug, Clone)]
pub struct ParsedDoc {
    /// Parsed frontmatter (if present)
    pub frontmatter: Option<Frontmatter>,

    /// Markdown body: frontmatter and ESM removed, `<CodeBlock>` lowered
    pub content: String,

    /// Extracted code blocks
    pub code_blocks: Vec<CodeBlock>,

    /// Table of contents entries
    pub toc: Vec<TocEntry>,
}

impl ParsedDoc {
    /// Title from frontmatter, else the first level-1 heading.
    pub fn title(&self) -> Option<&str> {
        self.frontmatter
            .as_ref()
            .and_then(|f| f.title.as_deref())
            .or_else(|| {
                self.toc
                    .iter()
                    .find(|e| e.level == 1)
                    .map(|e| e.title.as_str())
            })
    }

    pub fn description(&self) -> Option<&str> {
        self.frontmatter
            .as_ref()
            .and_then(|f| f.description.as_deref())
    }

    /// Whether the page belongs in a navigation derived from the page tree.
    pub fn in_nav(&self) -> bool {
        self.frontmatter.as_ref().map_or(true, |f| f.nav)
    }

    pub fn order(&self) -> Option<i32> {
        self.frontmatter.as_ref().and_then(|f| f.order)
    }
}

/// A table of contents entry.
#[derive(Debug, Clone, PartialEq)]
pub struct TocEntry {
    /// Heading text
    pub title: String,
    /// Anchor ID
    pub id: String,
    /// Heading level (1-6)
    pub level: u8,
}

/// Errors that can occur when parsing MDX.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Frontmatter error: {0}")]
    Frontmatter(#[from] FrontmatterError),
}

/// Markdown extensions enabled for every page.
pub fn markdown_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
}

/// Parse an MDX document.
///
/// Extracts frontmatter, code blocks, and generates a table of contents.
pub fn parse_mdx(source: &str) -> Result<ParsedDoc, ParseError> {
    let (frontmatter, body) = extract_frontmatter(source)?;
    let content = lower_code_block_elements(&strip_esm(body));

    let mut code_blocks = Vec::new();
    let mut toc = Vec::new();
    let mut slugger = Slugger::new();

    let mut current_code_block: Option<(Language, String, usize)> = None;
    let mut current_heading: Option<(u8, String)> = None;

    for (event, range) in Parser::new_ext(&content, markdown_options()).into_offset_iter() {
        match event {
            Event::Start(Tag::CodeBlock(kind)) => {
                let language = match &kind {
                    CodeBlockKind::Fenced(info) => Language::from_info(info),
                    CodeBlockKind::Indented => Language::Plain,
                };
                let line = content[..range.start].matches('\n').count() + 1;
                current_code_block = Some((language, String::new(), line));
            }

            Event::End(TagEnd::CodeBlock) => {
                if let Some((language, source, line)) = current_code_block.take() {
                    code_blocks.push(CodeBlock::new(language, source, line));
                }
            }

            Event::Start(Tag::Heading { level, .. }) => {
                current_heading = Some((level as u8, String::new()));
            }

            Event::End(TagEnd::Heading(_)) => {
                if let Some((level, title)) = current_heading.take() {
                    let id = slugger.slug(&title);
                    toc.push(TocEntry { title, id, level });
                }
            }

            Event::Text(text) | Event::Code(text) => {
                if let Some((_, ref mut source, _)) = current_code_block {
                    source.push_str(&text);
                } else if let Some((_, ref mut heading_text)) = current_heading {
                    heading_text.push_str(&text);
                }
            }

            _ => {}
        }
    }

    Ok(ParsedDoc {
        frontmatter,
        content,
        code_blocks,
        toc,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_complete_mdx() {
        let source = r#"---
title: Books
description: Manage the book catalogue
order: 4
---
import CodeBlock from "../components/CodeBlock";

# Books

List every book.

```bash
curl https://api.example.com/books
```

## Create a book

<CodeBlock language="typescript" code={`
await client.books.create({ title: "Dune" });
`} />
"#;

        let doc = parse_mdx(source).unwrap();

        let fm = doc.frontmatter.as_ref().unwrap();
        assert_eq!(fm.title.as_deref(), Some("Books"));
        assert_eq!(doc.description(), Some("Manage the book catalogue"));
        assert_eq!(doc.order(), Some(4));

        assert!(!doc.content.contains("import CodeBlock"));
        assert!(!doc.content.contains("<CodeBlock"));

        assert_eq!(doc.code_blocks.len(), 2);
        assert_eq!(doc.code_blocks[0].language, Language::Bash);
        assert_eq!(
            doc.code_blocks[0].source,
            "curl https://api.example.com/books\n"
        );
        assert_eq!(doc.code_blocks[1].language, Language::TypeScript);
        assert!(doc.code_blocks[1].source.contains("books.create"));

        assert_eq!(
            doc.toc,
            vec![
                TocEntry {
                    title: "Books".to_string(),
                    id: "books".to_string(),
                    level: 1,
                },
                TocEntry {
                    title: "Create a book".to_string(),
                    id: "create-a-book".to_string(),
                    level: 2,
                },
            ]
        );
    }

    #[test]
    fn parses_without_frontmatter() {
        let source = "# Just Markdown\n\nNo frontmatter.";

        let doc = parse_mdx(source).unwrap();

        assert!(doc.frontmatter.is_none());
        assert_eq!(doc.title(), Some("Just Markdown"));
        assert!(doc.in_nav());
        assert_eq!(doc.toc.len(), 1);
    }

    #[test]
    fn frontmatter_title_wins_over_heading() {
        let doc = parse_mdx("---\ntitle: Home\n---\n# Welcome").unwrap();

        assert_eq!(doc.title(), Some("Home"));
    }

    #[test]
    fn heading_with_inline_code() {
        let doc = parse_mdx("## The `books` endpoint").unwrap();

        assert_eq!(doc.toc[0].title, "The books endpoint");
        assert_eq!(doc.toc[0].id, "the-books-endpoint");
    }

    #[test]
    fn repeated_headings_get_unique_ids() {
        let doc = parse_mdx("## Example\n\n## Example\n").unwrap();

        let ids: Vec<&str> = doc.toc.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["example", "example-1"]);
    }

    #[test]
    fn records_code_block_lines() {
        let source = "# Title\n\n```js\nlet a = 1;\n```\n\ntext\n\n    indented\n";

        let doc = parse_mdx(source).unwrap();

        assert_eq!(doc.code_blocks.len(), 2);
        assert_eq!(doc.code_blocks[0].line, 3);
        assert_eq!(doc.code_blocks[1].language, Language::Plain);
        assert_eq!(doc.code_blocks[1].source, "indented\n");
    }

    #[test]
    fn reports_frontmatter_errors() {
        let result = parse_mdx("---\ntitle: Broken\n");

        assert!(matches!(result, Err(ParseError::Frontmatter(_))));
    }
}
