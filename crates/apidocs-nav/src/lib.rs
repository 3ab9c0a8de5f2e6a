//! Active-route resolution for documentation sidebars.
//!
//! Sites exported under a deployment prefix (`/api-docs`) see routes with and
//! without that prefix depending on where they come from. This crate strips
//! the prefix from both the current route and each menu entry before
//! comparing them, and resolves the link attributes the sidebar renders.
//!
//! Everything here is pure: the current path and the base path are always
//! explicit arguments.

pub mod menu;
pub mod path;
pub mod resolve;

pub use menu::{resolve_menu, MenuItem, ResolvedLink, ISOLATED_REL, NEW_CONTEXT};
pub use path::{normalize, BasePath, ROOT};
pub use resolve::is_active;
