//! Identifier to document resolution.

use docshelf_storage::{DocumentFormat, Storage};

use crate::front_matter::{PageMetadata, parse_front_matter};
use crate::page::{DocumentEntry, RenderError};

/// Whether `id` can name a document.
///
/// Identifiers are a single URL path segment and a plain file stem: no
/// separators and no leading dot, which also rules out `.` and `..`.
/// Dots inside a stem (`v1..2`) are fine.
#[must_use]
pub fn is_valid_identifier(id: &str) -> bool {
    !id.is_empty() && !id.starts_with('.') && !id.contains(['/', '\\', '\0'])
}

/// Resolve an identifier to a document.
///
/// Tries `{id}.md` first, then `{id}.html`. A candidate that is not a
/// regular file (e.g., a directory named `x.md`) counts as absent. Markdown
/// front matter is split off the body; HTML content is the body as-is.
///
/// # Errors
///
/// Returns [`RenderError::NotFound`] if the identifier is invalid or no
/// file backs it, and [`RenderError::Storage`] if a file exists but cannot
/// be read.
pub fn resolve(storage: &dyn Storage, id: &str) -> Result<DocumentEntry, RenderError> {
    if !is_valid_identifier(id) {
        return Err(RenderError::NotFound(id.to_owned()));
    }

    for format in DocumentFormat::ALL {
        let file_name = format.file_name(id);
        if !storage.exists(&file_name) {
            continue;
        }
        // Removed between the check and the read: same as absent.
        let content = match storage.read(&file_name) {
            Ok(content) => content,
            Err(e) if e.is_not_found() => continue,
            Err(e) => return Err(e.into()),
        };

        let mtime = storage.mtime(&file_name).unwrap_or_else(|e| {
            tracing::debug!(file = %file_name, error = %e, "No mtime for document");
            0.0
        });

        let (metadata, body) = {
            let text = String::from_utf8_lossy(&content);
            match format {
                DocumentFormat::Markdown => {
                    let (metadata, body) = parse_front_matter(&text);
                    (metadata, body.to_owned())
                }
                DocumentFormat::Html => (PageMetadata::default(), text.into_owned()),
            }
        };

        return Ok(DocumentEntry {
            id: id.to_owned(),
            source_path: file_name,
            format,
            metadata,
            body,
            mtime,
        });
    }

    Err(RenderError::NotFound(id.to_owned()))
}
