//! HTTP server for the docshelf documentation site.
//!
//! This crate serves documents from one flat directory as HTML pages that
//! share a header, a sidebar and a layout:
//! - `/` lists every document
//! - `/docs/{id}` renders one document
//! - `/api/navigation` and `/api/pages/{id}` expose the same data as JSON
//! - `/static/style.css` is the embedded stylesheet
//!
//! # Quick Start
//!
//! ```ignore
//! use docshelf_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig::default();
//!     run_server(config).await.unwrap();
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Browser ──HTTP──► axum router (docshelf-server)
//!                        │
//!                        ├─► HTML routes ──► Site ──► template shell
//!                        ├─► API routes  ──► Site ──► JSON
//!                        └─► Static CSS (embedded)
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod state;
mod static_files;
mod template;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use docshelf_renderer::DEFAULT_THEME;
use docshelf_site::{Site, SiteConfig};
use docshelf_storage::{FsStorage, Storage};

pub use error::ServerError;
use state::AppState;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Documentation source directory.
    pub source_dir: PathBuf,
    /// Title shown in the page header.
    pub site_title: String,
    /// Staleness window for rendered pages. Zero disables caching.
    pub revalidate: Duration,
    /// Inject HTML documents verbatim.
    pub trust_html: bool,
    /// Syntect theme (`None` disables highlighting).
    pub highlight_theme: Option<String>,
    /// Application version (part of every `ETag`).
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7979,
            source_dir: PathBuf::from("docs"),
            site_title: "Documentation".to_owned(),
            revalidate: Duration::from_secs(10),
            trust_html: false,
            highlight_theme: Some(DEFAULT_THEME.to_owned()),
            version: String::new(),
        }
    }
}

/// Run the server until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn run_server(config: ServerConfig) -> std::io::Result<()> {
    let storage: Arc<dyn Storage> = Arc::new(FsStorage::new(config.source_dir.clone()));

    let site_config = SiteConfig {
        revalidate: config.revalidate,
        trust_html: config.trust_html,
        highlight_theme: config.highlight_theme.clone(),
    };
    let site = Arc::new(Site::new(storage, site_config));

    let state = Arc::new(AppState {
        site,
        site_title: config.site_title.clone(),
        version: config.version.clone(),
    });

    let app = app::create_router(state);

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        source_dir = %config.source_dir.display(),
        revalidate_secs = config.revalidate.as_secs(),
        "Starting server"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from docshelf config.
#[must_use]
pub fn server_config_from_config(config: &docshelf_config::Config, version: String) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        source_dir: config.docs_resolved.source_dir.clone(),
        site_title: config.site.title.clone(),
        revalidate: config.site.revalidate_duration(),
        trust_html: config.docs_resolved.trust_html,
        highlight_theme: config.site.highlight_theme().map(str::to_owned),
        version,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_server_config_from_default_config() {
        let config = docshelf_config::Config::default();

        let server = server_config_from_config(&config, "1.2.3".to_owned());

        assert_eq!(server.host, "127.0.0.1");
        assert_eq!(server.port, 7979);
        assert_eq!(server.site_title, "Documentation");
        assert_eq!(server.revalidate, Duration::from_secs(10));
        assert!(!server.trust_html);
        assert_eq!(server.highlight_theme.as_deref(), Some(DEFAULT_THEME));
        assert_eq!(server.version, "1.2.3");
    }
}
