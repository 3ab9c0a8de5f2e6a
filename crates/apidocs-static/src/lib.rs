//! Static site export for apidocs.
//!
//! Renders a directory of MDX pages into plain HTML files under a base path:
//! a sidebar whose active entry is resolved per page, a main content pane,
//! and code blocks marked up for syntax highlighting.

pub mod assets;
pub mod builder;
pub mod highlight;
pub mod render;
pub mod templates;

pub use builder::{BuildConfig, BuildError, BuildResult, SidebarConfig, StaticBuilder};
pub use highlight::{HighlightError, Highlighter, Markup, PrismConfig, PrismHighlighter};
pub use render::render_markdown;
