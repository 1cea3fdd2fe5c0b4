//! `docshelf serve` command implementation.

use std::path::PathBuf;

use clap::Args;
use docshelf_config::{CliSettings, Config};
use docshelf_renderer::bundled_themes;
use docshelf_server::{run_server, server_config_from_config};
use docshelf_storage::FsStorage;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover docshelf.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Document directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Staleness window in seconds, 0 disables caching (overrides config).
    #[arg(long, env = "DOCSHELF_REVALIDATE")]
    revalidate: Option<u64>,

    /// Render `.html` documents verbatim instead of escaping them.
    #[arg(long)]
    trust_html: bool,

    /// Enable verbose output (request and cache logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServeArgs {
    fn cli_settings(&self) -> CliSettings {
        CliSettings {
            host: self.host.clone(),
            port: self.port,
            source_dir: self.source_dir.clone(),
            revalidate: self.revalidate,
            trust_html: self.trust_html.then_some(true),
        }
    }

    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self, version: &str) -> Result<(), CliError> {
        let output = Output::new();

        let config = Config::load(self.config.as_deref(), Some(&self.cli_settings()))?;
        check_highlight_theme(config.site.highlight_theme())?;

        let source_dir = &config.docs_resolved.source_dir;
        if FsStorage::new(source_dir.clone()).ensure_dir()? {
            output.warning(&format!(
                "Created empty document directory {} (run `docshelf init` for a sample page)",
                source_dir.display()
            ));
        }

        output.info(&format!(
            "Starting server on http://{}:{}",
            config.server.host, config.server.port
        ));
        output.field("Source directory", &source_dir.display().to_string());
        if config.site.revalidate == 0 {
            output.field("Page cache", "disabled");
        } else {
            output.field("Page cache", &format!("{}s", config.site.revalidate));
        }
        if config.docs_resolved.trust_html {
            output.field("HTML documents", "trusted (rendered verbatim)");
        } else {
            output.field("HTML documents", "escaped");
        }

        let server_config = server_config_from_config(&config, version.to_owned());
        run_server(server_config)
            .await
            .map_err(|e| CliError::Server(e.to_string()))?;

        Ok(())
    }
}

/// Reject a `site.highlight_theme` that syntect does not bundle.
fn check_highlight_theme(theme: Option<&str>) -> Result<(), CliError> {
    let Some(theme) = theme else {
        return Ok(());
    };
    let themes = bundled_themes();
    if themes.iter().any(|t| t == theme) {
        return Ok(());
    }
    Err(CliError::Validation(format!(
        "Unknown site.highlight_theme '{theme}'. Available themes: {}",
        themes.join(", ")
    )))
}
