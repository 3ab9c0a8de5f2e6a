//! Heading anchors.

use std::collections::{HashMap, HashSet};

/// Convert a heading to a URL-safe slug.
pub fn slugify(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c
            } else if c.is_whitespace() || c == '-' || c == '_' {
                '-'
            } else {
                '\0'
            }
        })
        .filter(|c| *c != '\0')
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Hands out unique anchors for the headings of one page.
///
/// Repeated headings get `-1`, `-2`, ... suffixes in document order, so
/// anything walking the same headings in the same order gets the same ids.
/// A suffix never reuses an id already handed out.
#[derive(Debug, Default)]
pub struct Slugger {
    counts: HashMap<String, usize>,
    used: HashSet<String>,
}

impl Slugger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slug(&mut self, text: &str) -> String {
        let mut base = slugify(text);
        if base.is_empty() {
            base = "section".to_string();
        }

        let count = self.counts.entry(base.clone()).or_insert(0);
        let mut slug = if *count == 0 {
            base.clone()
        } else {
            format!("{base}-{count}")
        };
        while self.used.contains(&slug) {
            *count += 1;
            slug = format!("{base}-{count}");
        }
        *count += 1;

        self.used.insert(slug.clone());
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_works() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("API Reference"), "api-reference");
        assert_eq!(slugify("GET /books/{id}"), "get-booksid");
        assert_eq!(slugify("  Multiple   Spaces  "), "multiple-spaces");
    }

    #[test]
    fn dedupes_repeated_headings() {
        let mut slugger = Slugger::new();

        assert_eq!(slugger.slug("Example"), "example");
        assert_eq!(slugger.slug("Example"), "example-1");
        assert_eq!(slugger.slug("Response"), "response");
        assert_eq!(slugger.slug("Example"), "example-2");
    }

    #[test]
    fn suffixes_skip_ids_already_taken() {
        let mut slugger = Slugger::new();

        let ids: Vec<String> = ["Example", "Example", "Example 1"]
            .iter()
            .map(|h| slugger.slug(h))
            .collect();
        assert_eq!(ids, vec!["example", "example-1", "example-1-1"]);

        let mut slugger = Slugger::new();

        let ids: Vec<String> = ["Example 1", "Example", "Example"]
            .iter()
            .map(|h| slugger.slug(h))
            .collect();
        assert_eq!(ids, vec!["example-1", "example", "example-2"]);
    }

    #[test]
    fn falls_back_for_symbol_only_headings() {
        let mut slugger = Slugger::new();

        assert_eq!(slugger.slug("???"), "section");
        assert_eq!(slugger.slug("!!!"), "section-1");
    }
}
