//! Heading anchors and table of contents.

use std::collections::HashMap;

/// Table of contents entry.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TocEntry {
    /// Heading level (2-6).
    pub level: u8,
    /// Heading text.
    pub title: String,
    /// Anchor ID.
    pub id: String,
}

/// Generates unique heading anchors within one document.
#[derive(Debug, Default)]
pub(crate) struct AnchorGenerator {
    seen: HashMap<String, usize>,
}

impl AnchorGenerator {
    /// Slugify `text` and make it unique among anchors issued so far.
    ///
    /// Repeated headings get `-1`, `-2`, ... suffixes, like GitHub.
    pub(crate) fn anchor(&mut self, text: &str) -> String {
        let base = match slugify(text) {
            s if s.is_empty() => "section".to_owned(),
            s => s,
        };
        let count = self.seen.entry(base.clone()).or_insert(0);
        let id = if *count == 0 {
            base
        } else {
            format!("{base}-{count}")
        };
        *count += 1;
        id
    }
}

/// Lowercase, keep alphanumerics, turn whitespace and dashes into single dashes.
fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;
    for c in text.trim().chars() {
        if c.is_alphanumeric() || c == '_' {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else if c.is_whitespace() || c == '-' {
            pending_dash = true;
        }
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Getting Started"), "getting-started");
        assert_eq!(slugify("  API: v2 (beta)  "), "api-v2-beta");
        assert_eq!(slugify("snake_case--and  dashes"), "snake_case-and-dashes");
        assert_eq!(slugify("Überblick"), "überblick");
    }

    #[test]
    fn test_anchor_deduplicates() {
        let mut anchors = AnchorGenerator::default();

        assert_eq!(anchors.anchor("Intro"), "intro");
        assert_eq!(anchors.anchor("Intro"), "intro-1");
        assert_eq!(anchors.anchor("intro"), "intro-2");
        assert_eq!(anchors.anchor("Other"), "other");
    }

    #[test]
    fn test_anchor_for_symbol_only_heading() {
        let mut anchors = AnchorGenerator::default();

        assert_eq!(anchors.anchor("!!!"), "section");
        assert_eq!(anchors.anchor("???"), "section-1");
    }
}
