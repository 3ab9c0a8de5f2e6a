//! MDX page parsing.
//!
//! Pages are Markdown with an optional YAML frontmatter block, ESM
//! `import`/`export` statements and `<CodeBlock>` elements. ESM is dropped,
//! `<CodeBlock>` elements are lowered to fenced code so every snippet takes
//! the same highlighting path, and headings are collected for the table of
//! contents.

pub mod codeblock;
pub mod frontmatter;
pub mod jsx;
pub mod parser;
pub mod slug;

pub use codeblock::{CodeBlock, Language};
pub use frontmatter::{extract_frontmatter, Frontmatter, FrontmatterError};
pub use jsx::{lower_code_block_elements, strip_esm, JsxElement, PropValue};
pub use parser::{markdown_options, parse_mdx, ParseError, ParsedDoc, TocEntry};
pub use slug::{slugify, Slugger};
