//! YAML front matter in markdown documents.
//!
//! A document may start with a block delimited by `---` lines:
//!
//! ```text
//! ---
//! title: Getting Started
//! description: First steps
//! ---
//! # Hello
//! ```
//!
//! The block is parsed as a YAML mapping. Malformed blocks never fail a
//! render: the metadata comes back empty and the body is kept.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_yaml::Value;

/// Metadata parsed from a front matter block.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PageMetadata {
    /// Display title, overriding the document identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Page description for the HTML `<meta>` tag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Every other top-level key.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl PageMetadata {
    /// Whether no key was recognized or kept.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.extra.is_empty()
    }
}

/// Split `text` into the raw YAML block and the body.
///
/// Returns `(None, text)` when there is no opening delimiter on the first
/// line or no closing delimiter after it. A leading UTF-8 BOM is skipped.
#[must_use]
pub fn split_front_matter(text: &str) -> (Option<&str>, &str) {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let Some((first, rest)) = split_line(text) else {
        return (None, text);
    };
    if !is_delimiter(first) {
        return (None, text);
    }

    let mut remaining = rest;
    while let Some((line, after)) = split_line(remaining) {
        if is_delimiter(line) {
            let yaml_len = rest.len() - remaining.len();
            return (Some(&rest[..yaml_len]), after);
        }
        remaining = after;
    }

    (None, text)
}

/// Parse front matter from `text`, returning metadata and body.
#[must_use]
pub fn parse_front_matter(text: &str) -> (PageMetadata, &str) {
    let (yaml, body) = split_front_matter(text);
    let metadata = yaml.map(parse_metadata).unwrap_or_default();
    (metadata, body)
}

fn parse_metadata(yaml: &str) -> PageMetadata {
    let value: Value = match serde_yaml::from_str(yaml) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(error = %e, "Ignoring malformed front matter");
            return PageMetadata::default();
        }
    };

    let mapping = match value {
        Value::Mapping(mapping) => mapping,
        Value::Null => return PageMetadata::default(),
        _ => {
            tracing::warn!("Ignoring front matter that is not a mapping");
            return PageMetadata::default();
        }
    };

    let mut metadata = PageMetadata::default();
    for (key, value) in mapping {
        let Value::String(key) = key else {
            continue;
        };
        match key.as_str() {
            "title" => metadata.title = scalar_to_string(&value),
            "description" => metadata.description = scalar_to_string(&value),
            _ => match serde_json::to_value(&value) {
                Ok(json) => {
                    metadata.extra.insert(key, json);
                }
                Err(e) => tracing::debug!(key = %key, error = %e, "Skipping front matter value"),
            },
        }
    }
    metadata
}

/// Strings pass through; numbers and booleans are stringified.
fn scalar_to_string(value: &Value) -> Option<String> {
    let s = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    (!s.is_empty()).then_some(s)
}

fn split_line(text: &str) -> Option<(&str, &str)> {
    if text.is_empty() {
        return None;
    }
    Some(match text.find('\n') {
        Some(i) => (&text[..i], &text[i + 1..]),
        None => (text, ""),
    })
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end() == "---"
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_title_and_body() {
        let (meta, body) = parse_front_matter("---\ntitle: Hello\n---\n# Hi");

        assert_eq!(meta.title.as_deref(), Some("Hello"));
        assert_eq!(body, "# Hi");
    }

    #[test]
    fn test_no_front_matter() {
        let text = "# Just markdown\n\nBody";
        let (meta, body) = parse_front_matter(text);

        assert!(meta.is_empty());
        assert_eq!(body, text);
    }

    #[test]
    fn test_delimiter_must_be_first_line() {
        let text = "\n---\ntitle: Hello\n---\nBody";
        let (meta, body) = parse_front_matter(text);

        assert!(meta.is_empty());
        assert_eq!(body, text);
    }

    #[test]
    fn test_unclosed_block_is_body() {
        let text = "---\ntitle: Hello\n\n# Body";
        let (meta, body) = parse_front_matter(text);

        assert!(meta.is_empty());
        assert_eq!(body, text);
    }

    #[test]
    fn test_invalid_yaml_keeps_body() {
        let (meta, body) = parse_front_matter("---\ntitle: [unclosed\n---\nBody text\n");

        assert!(meta.is_empty());
        assert_eq!(body, "Body text\n");
    }

    #[test]
    fn test_non_mapping_yaml_is_ignored() {
        let (meta, body) = parse_front_matter("---\n- a\n- b\n---\nBody");

        assert!(meta.is_empty());
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_empty_block() {
        let (meta, body) = parse_front_matter("---\n---\nBody");

        assert!(meta.is_empty());
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_numeric_and_bool_titles_are_stringified() {
        let (meta, _) = parse_front_matter("---\ntitle: 42\n---\n");
        assert_eq!(meta.title.as_deref(), Some("42"));

        let (meta, _) = parse_front_matter("---\ntitle: true\n---\n");
        assert_eq!(meta.title.as_deref(), Some("true"));
    }

    #[test]
    fn test_empty_and_null_titles_are_ignored() {
        let (meta, _) = parse_front_matter("---\ntitle: \"\"\n---\n");
        assert_eq!(meta.title, None);

        let (meta, _) = parse_front_matter("---\ntitle:\n---\n");
        assert_eq!(meta.title, None);
    }

    #[test]
    fn test_description_and_extra_keys() {
        let (meta, body) = parse_front_matter(
            "---\ntitle: Guide\ndescription: How to\ntags: [a, b]\nweight: 3\n---\nText",
        );

        assert_eq!(meta.description.as_deref(), Some("How to"));
        assert_eq!(meta.extra.get("tags"), Some(&serde_json::json!(["a", "b"])));
        assert_eq!(meta.extra.get("weight"), Some(&serde_json::json!(3)));
        assert_eq!(body, "Text");
    }

    #[test]
    fn test_crlf_and_bom() {
        let (meta, body) = parse_front_matter("\u{feff}---\r\ntitle: Win\r\n---\r\nBody\r\n");

        assert_eq!(meta.title.as_deref(), Some("Win"));
        assert_eq!(body, "Body\r\n");
    }

    #[test]
    fn test_closing_delimiter_at_end_of_text() {
        let (yaml, body) = split_front_matter("---\ntitle: x\n---");

        assert_eq!(yaml, Some("title: x\n"));
        assert_eq!(body, "");
    }

    #[test]
    fn test_metadata_serializes_flat() {
        let (meta, _) = parse_front_matter("---\ntitle: T\nauthor: me\n---\n");
        let json = serde_json::to_value(&meta).unwrap();

        assert_eq!(json, serde_json::json!({ "title": "T", "author": "me" }));
    }
}
