//! Storage trait and error types.
//!
//! Provides the core [`Storage`] trait for listing and reading document files,
//! along with [`StorageError`] for unified error handling across backends.
//!
//! # File Name Convention
//!
//! All path parameters in Storage methods are **file names** inside the flat
//! document directory (e.g. `"guide.md"`, `"notes.html"`), never nested paths.
//! The identifier used in URLs is the file name minus its extension.

use std::path::PathBuf;

/// Recognized document formats.
///
/// The declaration order is the resolution order: when `x.md` and `x.html`
/// both exist, the markdown file wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DocumentFormat {
    /// Markdown source (`.md`), may carry a front-matter block.
    Markdown,
    /// Pre-rendered HTML (`.html`).
    Html,
}

impl DocumentFormat {
    /// All formats in resolution order.
    pub const ALL: [Self; 2] = [Self::Markdown, Self::Html];

    /// File extension without the leading dot.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::Html => "html",
        }
    }

    /// Short lowercase name, used in API responses and logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Markdown => "markdown",
            Self::Html => "html",
        }
    }

    /// Build the file name backing `slug` in this format.
    #[must_use]
    pub fn file_name(self, slug: &str) -> String {
        format!("{slug}.{}", self.extension())
    }

    /// Split a file name into its identifier and format.
    ///
    /// Returns `None` when the extension is not recognized. Matching is
    /// case-sensitive, so `README.MD` is ignored.
    #[must_use]
    pub fn split_file_name(file_name: &str) -> Option<(&str, Self)> {
        Self::ALL.into_iter().find_map(|format| {
            file_name
                .strip_suffix(format.extension())
                .and_then(|rest| rest.strip_suffix('.'))
                .map(|slug| (slug, format))
        })
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A document file found by [`Storage::scan`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentFile {
    /// File name inside the document directory (e.g., "guide.md").
    pub file_name: String,
    /// Identifier derived from the file name (e.g., "guide").
    pub slug: String,
    /// Format derived from the extension.
    pub format: DocumentFormat,
}

impl DocumentFile {
    /// Classify a file name.
    ///
    /// Returns `None` for unrecognized extensions and for names that would
    /// produce an empty identifier (e.g., `.md`).
    #[must_use]
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let (slug, format) = DocumentFormat::split_file_name(file_name)?;
        if slug.is_empty() {
            return None;
        }
        Some(Self {
            file_name: file_name.to_owned(),
            slug: slug.to_owned(),
            format,
        })
    }
}

/// Semantic error categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageErrorKind {
    /// Resource does not exist.
    NotFound,
    /// Permission denied.
    PermissionDenied,
    /// Invalid file name (path separators, parent components).
    InvalidPath,
    /// Other/unknown error category.
    Other,
}

/// Storage error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct StorageError {
    /// Semantic error category.
    pub kind: StorageErrorKind,
    /// Path context (if applicable).
    pub path: Option<PathBuf>,
    /// Backend identifier (e.g., "Fs", "Mock").
    pub backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StorageError {
    /// Create a new storage error.
    #[must_use]
    pub fn new(kind: StorageErrorKind) -> Self {
        Self {
            kind,
            path: None,
            backend: None,
            source: None,
        }
    }

    /// Attach path context.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Create a not found error with path.
    #[must_use]
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::new(StorageErrorKind::NotFound).with_path(path)
    }

    /// Create a storage error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, path: Option<PathBuf>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => StorageErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => StorageErrorKind::PermissionDenied,
            _ => StorageErrorKind::Other,
        };
        let mut error = Self::new(kind).with_source(err);
        if let Some(p) = path {
            error = error.with_path(p);
        }
        error
    }

    /// Whether this error means the document does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.kind == StorageErrorKind::NotFound
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message (path: /foo/bar)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            StorageErrorKind::NotFound => "Not found",
            StorageErrorKind::PermissionDenied => "Permission denied",
            StorageErrorKind::InvalidPath => "Invalid path",
            StorageErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }

        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Storage abstraction for a flat directory of documents.
///
/// Implementations decide how file names map onto their backing store.
/// They do not parse document content; front matter and formats beyond the
/// extension are the site layer's concern.
pub trait Storage: Send + Sync {
    /// List every recognized document file.
    ///
    /// A missing document directory is not an error: backends that can
    /// create it do so and return an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the listing itself fails (e.g., permission
    /// denied).
    fn scan(&self) -> Result<Vec<DocumentFile>, StorageError>;

    /// Read the raw bytes of a document file.
    ///
    /// # Arguments
    ///
    /// * `file_name` - File name inside the document directory (e.g., "guide.md")
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the file doesn't exist or can't be read.
    fn read(&self, file_name: &str) -> Result<Vec<u8>, StorageError>;

    /// Check if a document file exists and is a regular file.
    ///
    /// Returns `false` on errors (treats errors as "doesn't exist").
    fn exists(&self, file_name: &str) -> bool;

    /// Get modification time as seconds since Unix epoch.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the file doesn't exist or mtime can't be retrieved.
    fn mtime(&self, file_name: &str) -> Result<f64, StorageError>;
}
