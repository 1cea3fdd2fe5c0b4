//! Site facade: navigation and page rendering over a staleness window.
//!
//! # Thread Safety
//!
//! `Site` is shared as `Arc<Site>` between request handlers:
//! - Cached pages and navigation are handed out as `Arc` clones
//! - Stale entries are served immediately while one background thread
//!   re-renders them
//! - `invalidate()` drops every cached entry

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use docshelf_renderer::{DEFAULT_THEME, MarkdownRenderer, SyntaxHighlighter};
use docshelf_storage::Storage;

use crate::composer;
use crate::navigation::{self, NavigationList};
use crate::page::{PageRenderResult, RenderError};
use crate::page_cache::{Lookup, StaleCache};
use crate::resolver;

/// Cache key for the navigation list.
const NAVIGATION_KEY: &str = "";

/// Configuration for [`Site`].
#[derive(Clone, Debug)]
pub struct SiteConfig {
    /// Staleness window. Zero disables caching.
    pub revalidate: Duration,
    /// Inject HTML documents verbatim instead of showing their source.
    pub trust_html: bool,
    /// Syntect theme for code blocks. `None` disables highlighting.
    pub highlight_theme: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            revalidate: Duration::from_secs(10),
            trust_html: false,
            highlight_theme: Some(DEFAULT_THEME.to_owned()),
        }
    }
}

/// What a background refresh re-renders.
enum Refresh {
    Navigation,
    Page(String),
}

/// Documentation site over a [`Storage`] backend.
pub struct Site {
    storage: Arc<dyn Storage>,
    renderer: MarkdownRenderer,
    trust_html: bool,
    revalidate: Duration,
    navigation: StaleCache<NavigationList>,
    pages: StaleCache<PageRenderResult>,
}

impl Site {
    /// Create a new site with storage and configuration.
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>, config: SiteConfig) -> Self {
        let mut renderer = MarkdownRenderer::new();
        if let Some(theme) = &config.highlight_theme {
            renderer = renderer.with_highlighter(Arc::new(SyntaxHighlighter::new(theme)));
        }

        Self {
            storage,
            renderer,
            trust_html: config.trust_html,
            revalidate: config.revalidate,
            navigation: StaleCache::new(config.revalidate),
            pages: StaleCache::new(config.revalidate),
        }
    }

    /// Staleness window.
    #[must_use]
    pub fn revalidate(&self) -> Duration {
        self.revalidate
    }

    #[must_use]
    pub fn trust_html(&self) -> bool {
        self.trust_html
    }

    /// Get the navigation list.
    ///
    /// Never fails: scan errors yield an empty list.
    #[must_use]
    pub fn navigation(self: &Arc<Self>) -> Arc<NavigationList> {
        match self.navigation.lookup(NAVIGATION_KEY) {
            Lookup::Fresh(list) => list,
            Lookup::Stale { value, refresh } => {
                if refresh {
                    self.spawn_refresh(Refresh::Navigation);
                }
                value
            }
            Lookup::Miss => {
                let list = Arc::new(navigation::scan(self.storage.as_ref()));
                self.navigation.insert(NAVIGATION_KEY, Arc::clone(&list));
                list
            }
        }
    }

    /// Render the document with identifier `id`.
    ///
    /// Within the staleness window the cached page is returned without
    /// touching storage. Not-found results are never cached.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::NotFound`] if no document backs `id` and
    /// [`RenderError::Storage`] if the document cannot be read.
    pub fn render(self: &Arc<Self>, id: &str) -> Result<Arc<PageRenderResult>, RenderError> {
        if !resolver::is_valid_identifier(id) {
            return Err(RenderError::NotFound(id.to_owned()));
        }

        match self.pages.lookup(id) {
            Lookup::Fresh(page) => Ok(page),
            Lookup::Stale { value, refresh } => {
                if refresh {
                    self.spawn_refresh(Refresh::Page(id.to_owned()));
                }
                Ok(value)
            }
            Lookup::Miss => {
                let page = Arc::new(self.render_uncached(id)?);
                self.pages.insert(id, Arc::clone(&page));
                Ok(page)
            }
        }
    }

    /// Resolve, compose and render `id` without consulting the page cache.
    ///
    /// # Errors
    ///
    /// Same as [`render`](Self::render).
    pub fn render_uncached(self: &Arc<Self>, id: &str) -> Result<PageRenderResult, RenderError> {
        let entry = resolver::resolve(self.storage.as_ref(), id)?;
        let page = composer::compose(entry, self.navigation(), self.trust_html);
        Ok(composer::render_page(page, &self.renderer))
    }

    /// Drop all cached pages and navigation.
    pub fn invalidate(&self) {
        self.navigation.clear();
        self.pages.clear();
    }

    fn spawn_refresh(self: &Arc<Self>, refresh: Refresh) {
        let site = Arc::clone(self);
        let key = match &refresh {
            Refresh::Navigation => NAVIGATION_KEY.to_owned(),
            Refresh::Page(id) => id.clone(),
        };

        let spawned = thread::Builder::new()
            .name("docshelf-refresh".to_owned())
            .spawn(move || site.run_refresh(refresh));

        if let Err(e) = spawned {
            tracing::warn!(key = %key, error = %e, "Failed to start background refresh");
            match key.as_str() {
                NAVIGATION_KEY => self.navigation.release(&key),
                _ => self.pages.release(&key),
            }
        }
    }

    fn run_refresh(self: &Arc<Self>, refresh: Refresh) {
        match refresh {
            Refresh::Navigation => {
                let list = navigation::scan(self.storage.as_ref());
                self.navigation.insert(NAVIGATION_KEY, Arc::new(list));
                tracing::debug!("Refreshed navigation");
            }
            Refresh::Page(id) => match self.render_uncached(&id) {
                Ok(page) => {
                    self.pages.insert(id.as_str(), Arc::new(page));
                    tracing::debug!(id = %id, "Refreshed page");
                }
                Err(RenderError::NotFound(_)) => {
                    self.pages.remove(&id);
                    tracing::debug!(id = %id, "Dropped page for removed document");
                }
                Err(e) => {
                    tracing::warn!(id = %id, error = %e, "Background refresh failed, keeping stale page");
                    self.pages.release(&id);
                }
            },
        }
    }
}
