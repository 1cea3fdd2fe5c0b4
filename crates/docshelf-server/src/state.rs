//! Application state.
//!
//! Shared state for all request handlers.

use std::sync::Arc;

use docshelf_site::Site;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Document catalog and page renderer.
    pub(crate) site: Arc<Site>,
    /// Title shown in the page header.
    pub(crate) site_title: String,
    /// Application version for `ETag` computation.
    pub(crate) version: String,
}
