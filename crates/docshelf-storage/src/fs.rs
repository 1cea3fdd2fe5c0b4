//! Filesystem storage implementation.
//!
//! Provides [`FsStorage`] for reading documents from a single flat directory
//! on the local filesystem.

use std::fs;
use std::path::PathBuf;
use std::time::UNIX_EPOCH;

use crate::storage::{DocumentFile, Storage, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Filesystem storage implementation.
///
/// Lists `*.md` and `*.html` files directly inside `source_dir`.
/// Subdirectories and hidden files are ignored. The directory is created on
/// the first scan if it does not exist yet.
///
/// # Example
///
/// ```ignore
/// use std::path::PathBuf;
/// use docshelf_storage::{FsStorage, Storage};
///
/// let storage = FsStorage::new(PathBuf::from("docs"));
/// let files = storage.scan()?;
/// ```
#[derive(Debug)]
pub struct FsStorage {
    /// Root directory for document storage.
    source_dir: PathBuf,
}

impl FsStorage {
    /// Create a new filesystem storage rooted at `source_dir`.
    #[must_use]
    pub fn new(source_dir: PathBuf) -> Self {
        Self { source_dir }
    }

    /// Create the document directory if it does not exist.
    ///
    /// Returns `true` if the directory was created by this call.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the directory cannot be created.
    pub fn ensure_dir(&self) -> Result<bool, StorageError> {
        if self.source_dir.is_dir() {
            return Ok(false);
        }
        fs::create_dir_all(&self.source_dir).map_err(|e| {
            StorageError::io(e, Some(self.source_dir.clone())).with_backend(BACKEND)
        })?;
        tracing::info!(dir = %self.source_dir.display(), "Created document directory");
        Ok(true)
    }

    /// Validate that a file name stays inside the document directory.
    ///
    /// Rejects separators and leading dots (which covers `..`) to prevent
    /// path traversal (e.g., `../../etc/passwd`).
    fn validate_file_name(file_name: &str) -> Result<(), StorageError> {
        let escapes = file_name.is_empty()
            || file_name.contains(['/', '\\'])
            || file_name.starts_with('.');
        if escapes {
            return Err(StorageError::new(StorageErrorKind::InvalidPath)
                .with_path(file_name)
                .with_backend(BACKEND));
        }
        Ok(())
    }

    /// Resolve a validated file name to its full path.
    fn full_path(&self, file_name: &str) -> Result<PathBuf, StorageError> {
        Self::validate_file_name(file_name)?;
        Ok(self.source_dir.join(file_name))
    }
}

impl Storage for FsStorage {
    fn scan(&self) -> Result<Vec<DocumentFile>, StorageError> {
        if self.ensure_dir()? {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.source_dir).map_err(|e| {
            StorageError::io(e, Some(self.source_dir.clone())).with_backend(BACKEND)
        })?;

        let mut files: Vec<DocumentFile> = entries
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let name = entry.file_name();
                let Some(name) = name.to_str() else {
                    tracing::debug!(name = ?name, "Skipping non UTF-8 file name");
                    return None;
                };
                if name.starts_with('.') {
                    return None;
                }
                // Follows symlinks, so a linked document still counts as a file.
                if !entry.path().is_file() {
                    return None;
                }
                DocumentFile::from_file_name(name)
            })
            .collect();

        files.sort_by(|a, b| a.file_name.cmp(&b.file_name));
        Ok(files)
    }

    fn read(&self, file_name: &str) -> Result<Vec<u8>, StorageError> {
        let full_path = self.full_path(file_name)?;
        fs::read(&full_path).map_err(|e| StorageError::io(e, Some(full_path)).with_backend(BACKEND))
    }

    fn exists(&self, file_name: &str) -> bool {
        self.full_path(file_name).is_ok_and(|path| path.is_file())
    }

    fn mtime(&self, file_name: &str) -> Result<f64, StorageError> {
        let full_path = self.full_path(file_name)?;
        let metadata = fs::metadata(&full_path)
            .map_err(|e| StorageError::io(e, Some(full_path.clone())).with_backend(BACKEND))?;
        let modified = metadata
            .modified()
            .map_err(|e| StorageError::io(e, Some(full_path)).with_backend(BACKEND))?;
        Ok(modified
            .duration_since(UNIX_EPOCH)
            .map_or(0.0, |d| d.as_secs_f64()))
    }
}
