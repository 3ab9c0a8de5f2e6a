//! Active-link resolution.

use crate::path::{normalize, ROOT};

/// Whether a navigation entry pointing at `item_href` is the page at
/// `current_path`.
///
/// Both sides are normalized against `base_path` first. Some routers report
/// the root as `""` instead of `/`, so an entry for the root also matches an
/// empty current path. Callers pass `""` when no current path is known.
pub fn is_active(current_path: &str, item_href: &str, base_path: &str) -> bool {
    let current = normalize(current_path, base_path);
    let item = normalize(item_href, base_path);

    current == item || (item == ROOT && current.is_empty())
}
