//! Document and page types.

use std::sync::Arc;

use docshelf_renderer::TocEntry;
use docshelf_storage::{DocumentFormat, StorageError};

use crate::front_matter::PageMetadata;
use crate::navigation::NavigationList;

/// A resolved document, read from storage.
#[derive(Clone, Debug)]
pub struct DocumentEntry {
    /// Identifier (file name minus extension).
    pub id: String,
    /// Source file name relative to the document directory.
    pub source_path: String,
    pub format: DocumentFormat,
    /// Front matter metadata. Always empty for HTML documents.
    pub metadata: PageMetadata,
    /// Content after the front matter block.
    pub body: String,
    /// Source modification time (Unix timestamp, `0.0` if unknown).
    pub mtime: f64,
}

impl DocumentEntry {
    /// Display title: the front matter title, or the identifier.
    #[must_use]
    pub fn title(&self) -> &str {
        self.metadata.title.as_deref().unwrap_or(&self.id)
    }
}

/// Body of a composed page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PageBody {
    /// Markdown source handed to the renderer.
    Markdown(String),
    /// HTML injected verbatim.
    TrustedHtml(String),
    /// HTML shown as escaped source.
    UntrustedHtml(String),
}

impl PageBody {
    /// The unrendered body text.
    #[must_use]
    pub fn source(&self) -> &str {
        match self {
            Self::Markdown(s) | Self::TrustedHtml(s) | Self::UntrustedHtml(s) => s,
        }
    }
}

/// A document combined with the navigation it was rendered against.
#[derive(Clone, Debug)]
pub struct RenderedPage {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub format: DocumentFormat,
    pub body: PageBody,
    pub metadata: PageMetadata,
    pub navigation: Arc<NavigationList>,
    pub source_path: String,
    pub source_mtime: f64,
}

/// Result of rendering a page.
#[derive(Clone, Debug)]
pub struct PageRenderResult {
    pub page: RenderedPage,
    /// Displayable HTML for the page body.
    pub html: String,
    /// Table of contents entries (empty for HTML documents).
    pub toc: Vec<TocEntry>,
}

/// Error returned when page rendering fails.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// No document backs the identifier, or the identifier is invalid.
    #[error("Document not found: {0}")]
    NotFound(String),
    /// The document exists but could not be read.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl RenderError {
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_falls_back_to_id() {
        let mut entry = DocumentEntry {
            id: "intro".to_owned(),
            source_path: "intro.md".to_owned(),
            format: DocumentFormat::Markdown,
            metadata: PageMetadata::default(),
            body: String::new(),
            mtime: 0.0,
        };
        assert_eq!(entry.title(), "intro");

        entry.metadata.title = Some("Introduction".to_owned());
        assert_eq!(entry.title(), "Introduction");
    }

    #[test]
    fn test_render_error_display() {
        let err = RenderError::NotFound("missing".to_owned());

        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Document not found: missing");
    }
}
