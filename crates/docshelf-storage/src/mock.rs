//! Mock storage implementation for testing.
//!
//! Provides [`MockStorage`] for unit testing without filesystem access.

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::storage::{DocumentFile, Storage, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Mock";

#[derive(Debug)]
struct MockFile {
    content: Vec<u8>,
    mtime: f64,
}

/// Mock storage for testing.
///
/// Stores files in memory, keyed by file name. Files can be added with the
/// builder methods or changed while a test runs with [`set_file`](Self::set_file)
/// and [`remove_file`](Self::remove_file). Every successful or failed
/// [`read`](Storage::read) is counted, so cache behavior can be asserted.
///
/// # Example
///
/// ```ignore
/// use docshelf_storage::{MockStorage, Storage};
///
/// let storage = MockStorage::new()
///     .with_file("guide.md", "---\ntitle: Guide\n---\nBody");
///
/// let files = storage.scan().unwrap();
/// let content = storage.read("guide.md").unwrap();
/// ```
#[derive(Debug, Default)]
pub struct MockStorage {
    files: RwLock<BTreeMap<String, MockFile>>,
    scan_error: RwLock<Option<StorageErrorKind>>,
    read_errors: RwLock<HashMap<String, StorageErrorKind>>,
    reads: AtomicUsize,
}

impl MockStorage {
    /// Create a new empty mock storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file with content and a zero mtime.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_file(self, file_name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        self.set_file(file_name, content);
        self
    }

    /// Set modification time for an existing file.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_mtime(self, file_name: &str, mtime: f64) -> Self {
        if let Some(file) = self.files.write().unwrap().get_mut(file_name) {
            file.mtime = mtime;
        }
        self
    }

    /// Make every subsequent `scan()` fail with the given kind.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_scan_error(self, kind: StorageErrorKind) -> Self {
        *self.scan_error.write().unwrap() = Some(kind);
        self
    }

    /// Make every subsequent `read()` of `file_name` fail with the given kind.
    ///
    /// The file still shows up in `scan()` and `exists()`.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_read_error(self, file_name: impl Into<String>, kind: StorageErrorKind) -> Self {
        self.read_errors
            .write()
            .unwrap()
            .insert(file_name.into(), kind);
        self
    }

    /// Insert or replace a file.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn set_file(&self, file_name: impl Into<String>, content: impl Into<Vec<u8>>) {
        let mut files = self.files.write().unwrap();
        let name = file_name.into();
        let mtime = files.get(&name).map_or(0.0, |f| f.mtime + 1.0);
        files.insert(
            name,
            MockFile {
                content: content.into(),
                mtime,
            },
        );
    }

    /// Remove a file.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn remove_file(&self, file_name: &str) {
        self.files.write().unwrap().remove(file_name);
    }

    /// Number of `read()` calls so far.
    #[must_use]
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl Storage for MockStorage {
    fn scan(&self) -> Result<Vec<DocumentFile>, StorageError> {
        if let Some(kind) = *self.scan_error.read().unwrap() {
            return Err(StorageError::new(kind).with_backend(BACKEND));
        }
        Ok(self
            .files
            .read()
            .unwrap()
            .keys()
            .filter_map(|name| DocumentFile::from_file_name(name))
            .collect())
    }

    fn read(&self, file_name: &str) -> Result<Vec<u8>, StorageError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if let Some(&kind) = self.read_errors.read().unwrap().get(file_name) {
            return Err(StorageError::new(kind)
                .with_path(file_name)
                .with_backend(BACKEND));
        }
        self.files
            .read()
            .unwrap()
            .get(file_name)
            .map(|f| f.content.clone())
            .ok_or_else(|| StorageError::not_found(file_name).with_backend(BACKEND))
    }

    fn exists(&self, file_name: &str) -> bool {
        self.files.read().unwrap().contains_key(file_name)
    }

    fn mtime(&self, file_name: &str) -> Result<f64, StorageError> {
        self.files
            .read()
            .unwrap()
            .get(file_name)
            .map(|f| f.mtime)
            .ok_or_else(|| StorageError::not_found(file_name).with_backend(BACKEND))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_scan_and_read() {
        let storage = MockStorage::new()
            .with_file("a.md", "# A")
            .with_file("b.html", "<p>B</p>")
            .with_file("c.txt", "C");

        let files = storage.scan().unwrap();
        let names: Vec<_> = files.iter().map(|f| f.file_name.as_str()).collect();

        assert_eq!(names, vec!["a.md", "b.html"]);
        assert_eq!(storage.read("a.md").unwrap(), b"# A".to_vec());
        assert_eq!(storage.read_count(), 1);
    }

    #[test]
    fn test_mock_scan_error() {
        let storage = MockStorage::new().with_scan_error(StorageErrorKind::PermissionDenied);

        let err = storage.scan().unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::PermissionDenied);
    }

    #[test]
    fn test_mock_read_error() {
        let storage = MockStorage::new()
            .with_file("a.md", "# A")
            .with_read_error("a.md", StorageErrorKind::PermissionDenied);

        let err = storage.read("a.md").unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::PermissionDenied);
        assert!(storage.exists("a.md"));
        assert_eq!(storage.scan().unwrap().len(), 1);
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn test_mock_set_file_bumps_mtime() {
        let storage = MockStorage::new()
            .with_file("a.md", "v1")
            .with_mtime("a.md", 10.0);

        storage.set_file("a.md", "v2");

        assert_eq!(storage.mtime("a.md").unwrap(), 11.0);
        assert_eq!(storage.read("a.md").unwrap(), b"v2".to_vec());
    }

    #[test]
    fn test_mock_remove_file() {
        let storage = MockStorage::new().with_file("a.md", "v1");

        storage.remove_file("a.md");

        assert!(!storage.exists("a.md"));
        assert!(storage.read("a.md").unwrap_err().is_not_found());
    }
}
