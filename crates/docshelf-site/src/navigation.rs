//! Navigation list built from one directory scan.

use std::collections::HashMap;

use docshelf_storage::{DocumentFile, DocumentFormat, Storage};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Bytes escaped in a URL path segment: everything except RFC 3986
/// unreserved characters.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// One document in the sidebar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavItem {
    /// Document identifier (file name minus extension).
    pub id: String,
    /// Source file name relative to the document directory.
    pub path: String,
    /// Source format.
    pub format: DocumentFormat,
}

impl NavItem {
    /// URL path of the document page, with the identifier percent-encoded
    /// as a single path segment.
    #[must_use]
    pub fn href(&self) -> String {
        format!("/docs/{}", utf8_percent_encode(&self.id, SEGMENT))
    }
}

/// Ordered list of documents available for display.
///
/// Each identifier appears once. When `x.md` and `x.html` both exist the
/// markdown file wins, matching resolution order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NavigationList {
    items: Vec<NavItem>,
}

impl NavigationList {
    /// Build a list from scanned files, keeping their order.
    #[must_use]
    pub fn from_files(files: Vec<DocumentFile>) -> Self {
        let mut items: Vec<NavItem> = Vec::with_capacity(files.len());
        let mut index: HashMap<String, usize> = HashMap::new();

        for file in files {
            let item = NavItem {
                id: file.slug,
                path: file.file_name,
                format: file.format,
            };
            match index.get(&item.id) {
                Some(&i) => {
                    if precedence(item.format) < precedence(items[i].format) {
                        items[i] = item;
                    }
                }
                None => {
                    index.insert(item.id.clone(), items.len());
                    items.push(item);
                }
            }
        }

        Self { items }
    }

    /// Items in display order.
    #[must_use]
    pub fn items(&self) -> &[NavItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Find an item by identifier.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&NavItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NavItem> {
        self.items.iter()
    }
}

impl<'a> IntoIterator for &'a NavigationList {
    type Item = &'a NavItem;
    type IntoIter = std::slice::Iter<'a, NavItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Scan storage into a navigation list.
///
/// Scan failures are logged and degrade to an empty list so that the
/// site keeps serving.
pub fn scan(storage: &dyn Storage) -> NavigationList {
    match storage.scan() {
        Ok(files) => {
            let list = NavigationList::from_files(files);
            tracing::debug!(documents = list.len(), "Scanned document directory");
            list
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to scan documents, serving an empty catalog");
            NavigationList::default()
        }
    }
}

fn precedence(format: DocumentFormat) -> usize {
    DocumentFormat::ALL
        .iter()
        .position(|f| *f == format)
        .unwrap_or(usize::MAX)
}

#[cfg(test)]
mod tests {
    use docshelf_storage::{FsStorage, MockStorage, StorageErrorKind};
    use pretty_assertions::assert_eq;

    use super::*;

    fn files(names: &[&str]) -> Vec<DocumentFile> {
        names
            .iter()
            .filter_map(|name| DocumentFile::from_file_name(name))
            .collect()
    }

    #[test]
    fn test_from_files_keeps_order() {
        let list = NavigationList::from_files(files(&["b.md", "a.html", "c.md"]));
        let ids: Vec<&str> = list.iter().map(|item| item.id.as_str()).collect();

        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_collision_prefers_markdown() {
        let list = NavigationList::from_files(files(&["x.html", "y.md", "x.md"]));

        assert_eq!(list.len(), 2);
        let x = list.get("x").unwrap();
        assert_eq!(x.format, DocumentFormat::Markdown);
        assert_eq!(x.path, "x.md");
        assert_eq!(list.items()[0].id, "x");
    }

    #[test]
    fn test_collision_keeps_markdown_seen_first() {
        let list = NavigationList::from_files(files(&["x.md", "x.html"]));

        assert_eq!(list.len(), 1);
        assert_eq!(list.get("x").unwrap().format, DocumentFormat::Markdown);
    }

    #[test]
    fn test_href() {
        let list = NavigationList::from_files(files(&["getting-started.md"]));

        assert_eq!(list.items()[0].href(), "/docs/getting-started");
    }

    #[test]
    fn test_href_encodes_reserved_characters() {
        let list =
            NavigationList::from_files(files(&["c#.md", "100%.md", "what? now.md", "v1..2.md"]));
        let hrefs: Vec<String> = list.iter().map(NavItem::href).collect();

        assert_eq!(
            hrefs,
            vec!["/docs/c%23", "/docs/100%25", "/docs/what%3F%20now", "/docs/v1..2"]
        );
    }

    #[test]
    fn test_href_encodes_non_ascii_as_utf8() {
        let list = NavigationList::from_files(files(&["café.md"]));

        assert_eq!(list.items()[0].href(), "/docs/caf%C3%A9");
    }

    #[test]
    fn test_scan_filters_extensions() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.md"), "# A").unwrap();
        std::fs::write(dir.path().join("b.html"), "<p>B</p>").unwrap();
        std::fs::write(dir.path().join("c.txt"), "C").unwrap();

        let storage = FsStorage::new(dir.path().to_path_buf());
        let list = scan(&storage);
        let paths: Vec<&str> = list.iter().map(|item| item.path.as_str()).collect();

        assert_eq!(paths, vec!["a.md", "b.html"]);
    }

    #[test]
    fn test_scan_missing_dir_creates_it() {
        let dir = tempfile::tempdir().unwrap();
        let docs = dir.path().join("docs");

        let list = scan(&FsStorage::new(docs.clone()));

        assert!(list.is_empty());
        assert!(docs.is_dir());
    }

    #[test]
    fn test_scan_error_degrades_to_empty() {
        let storage = MockStorage::new()
            .with_file("a.md", "# A")
            .with_scan_error(StorageErrorKind::PermissionDenied);

        assert!(scan(&storage).is_empty());
    }
}
