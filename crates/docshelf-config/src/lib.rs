//! Configuration management for docshelf.
//!
//! Parses `docshelf.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `server.host`
//! - `docs.source_dir`

mod expand;

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "docshelf.toml";

/// Upper bound for `site.revalidate`, in seconds.
pub const MAX_REVALIDATE_SECS: u64 = 86_400;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override docs source directory.
    pub source_dir: Option<PathBuf>,
    /// Override staleness window in seconds.
    pub revalidate: Option<u64>,
    /// Override HTML trust flag.
    pub trust_html: Option<bool>,
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Documentation configuration (paths are relative strings from TOML).
    docs: DocsConfigRaw,
    /// Site presentation and caching.
    pub site: SiteConfig,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7979,
        }
    }
}

/// Raw docs configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    source_dir: Option<String>,
    trust_html: Option<bool>,
}

/// Resolved documentation configuration with absolute paths.
#[derive(Debug, Default)]
pub struct DocsConfig {
    /// Directory holding `*.md` and `*.html` documents.
    pub source_dir: PathBuf,
    /// Inject HTML documents verbatim.
    pub trust_html: bool,
}

/// Site presentation and caching configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Title shown in the header.
    pub title: String,
    /// Staleness window in seconds. `0` disables caching.
    pub revalidate: u64,
    /// Syntect theme for code blocks. Empty disables highlighting.
    pub highlight_theme: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Documentation".to_owned(),
            revalidate: 10,
            highlight_theme: "InspiredGitHub".to_owned(),
        }
    }
}

impl SiteConfig {
    /// Staleness window as a duration.
    #[must_use]
    pub fn revalidate_duration(&self) -> Duration {
        Duration::from_secs(self.revalidate)
    }

    /// Highlight theme, or `None` when highlighting is disabled.
    #[must_use]
    pub fn highlight_theme(&self) -> Option<&str> {
        Some(self.highlight_theme.as_str()).filter(|theme| !theme.is_empty())
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`server.host`").
        field: String,
        /// Error message (e.g., "${`DOCSHELF_HOST`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `docshelf.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values. The result is
    /// validated again after overrides.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(source_dir) = &settings.source_dir {
            self.docs_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(revalidate) = settings.revalidate {
            self.site.revalidate = revalidate;
        }
        if let Some(trust_html) = settings.trust_html {
            self.docs_resolved.trust_html = trust_html;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        Self::discover_config_from(&std::env::current_dir().ok()?)
    }

    /// Search for config file in `start` and its parents.
    fn discover_config_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.is_file() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            server: ServerConfig::default(),
            docs: DocsConfigRaw::default(),
            site: SiteConfig::default(),
            docs_resolved: DocsConfig {
                source_dir: base.join("docs"),
                trust_html: false,
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.host, "server.host")?;

        // Port 0 would bind a random port
        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }

        require_non_empty(&self.site.title, "site.title")?;

        if self.site.revalidate > MAX_REVALIDATE_SECS {
            return Err(ConfigError::Validation(format!(
                "site.revalidate cannot exceed {MAX_REVALIDATE_SECS} seconds"
            )));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.server.host = expand::expand_env(&self.server.host, "server.host")?;

        if let Some(ref source_dir) = self.docs.source_dir {
            self.docs.source_dir = Some(expand::expand_env(source_dir, "docs.source_dir")?);
        }

        Ok(())
    }

    /// Resolve relative paths against the config file's directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.docs_resolved = DocsConfig {
            source_dir: config_dir.join(self.docs.source_dir.as_deref().unwrap_or("docs")),
            trust_html: self.docs.trust_html.unwrap_or(false),
        };
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 7979);
        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/test/docs"));
        assert!(!config.docs_resolved.trust_html);
        assert_eq!(config.site.title, "Documentation");
        assert_eq!(config.site.revalidate, 10);
        assert_eq!(config.site.highlight_theme(), Some("InspiredGitHub"));
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();

        assert_eq!(config.server.port, 7979);
        assert_eq!(config.site.revalidate_duration(), Duration::from_secs(10));
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[server]
host = "0.0.0.0"
port = 9000

[docs]
source_dir = "pages"
trust_html = true

[site]
title = "AIML Cookbook"
revalidate = 60
highlight_theme = "base16-ocean.dark"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/project/pages"));
        assert!(config.docs_resolved.trust_html);
        assert_eq!(config.site.title, "AIML Cookbook");
        assert_eq!(config.site.revalidate, 60);
        assert_eq!(config.site.highlight_theme(), Some("base16-ocean.dark"));
    }

    #[test]
    fn test_empty_theme_disables_highlighting() {
        let config: Config = toml::from_str("[site]\nhighlight_theme = \"\"\n").unwrap();

        assert_eq!(config.site.highlight_theme(), None);
    }

    #[test]
    fn test_unknown_field_type_is_parse_error() {
        let result: Result<Config, _> = toml::from_str("[server]\nport = \"eighty\"\n");

        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_file_resolves_relative_to_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[docs]\nsource_dir = \"content\"\n").unwrap();

        let config = Config::load(Some(path.as_path()), None).unwrap();

        assert_eq!(config.docs_resolved.source_dir, dir.path().join("content"));
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");

        let err = Config::load(Some(path.as_path()), None).unwrap_err();

        assert!(matches!(err, ConfigError::NotFound(p) if p == path));
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[server\nport = 1").unwrap();

        let err = Config::load(Some(path.as_path()), None).unwrap_err();

        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_discover_config_in_parent() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(CONFIG_FILENAME), "").unwrap();

        let found = Config::discover_config_from(&nested);

        assert_eq!(found, Some(dir.path().join(CONFIG_FILENAME)));
    }

    #[test]
    fn test_discover_ignores_directory_named_like_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join(CONFIG_FILENAME)).unwrap();

        let found = Config::discover_config_from(dir.path());

        assert_ne!(found, Some(dir.path().join(CONFIG_FILENAME)));
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.apply_cli_settings(&CliSettings {
            host: Some("0.0.0.0".to_owned()),
            port: Some(8080),
            source_dir: Some(PathBuf::from("/elsewhere")),
            revalidate: Some(0),
            trust_html: Some(true),
        });

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/elsewhere"));
        assert_eq!(config.site.revalidate, 0);
        assert!(config.docs_resolved.trust_html);
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(config.server.port, 7979);
        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/test/docs"));
        assert_eq!(config.site.revalidate, 10);
    }

    #[test]
    fn test_cli_overrides_are_validated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "").unwrap();
        let settings = CliSettings {
            revalidate: Some(MAX_REVALIDATE_SECS + 1),
            ..CliSettings::default()
        };

        let err = Config::load(Some(path.as_path()), Some(&settings)).unwrap_err();

        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_expand_env_vars_server_host() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("DOCSHELF_TEST_CONFIG_HOST", "10.0.0.1");
        }
        let mut config: Config =
            toml::from_str("[server]\nhost = \"${DOCSHELF_TEST_CONFIG_HOST}\"\n").unwrap();
        config.expand_env_vars().unwrap();
        unsafe {
            std::env::remove_var("DOCSHELF_TEST_CONFIG_HOST");
        }

        assert_eq!(config.server.host, "10.0.0.1");
    }

    #[test]
    fn test_expand_env_vars_source_dir_default() {
        let mut config: Config = toml::from_str(
            "[docs]\nsource_dir = \"${DOCSHELF_TEST_UNSET_DOCS:-content}\"\n",
        )
        .unwrap();
        config.expand_env_vars().unwrap();
        config.resolve_paths(Path::new("/srv"));

        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/srv/content"));
    }

    #[test]
    fn test_expand_env_vars_missing_required_var() {
        let mut config: Config =
            toml::from_str("[server]\nhost = \"${DOCSHELF_TEST_NEVER_SET}\"\n").unwrap();

        let err = config.expand_env_vars().unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { ref field, .. } if field == "server.host"));
    }

    #[test]
    fn test_validate_default_config_passes() {
        assert!(Config::default_with_base(Path::new("/test")).validate().is_ok());
    }

    #[test]
    fn test_validate_server_host_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.server.host = String::new();

        let err = config.validate().unwrap_err();

        assert_eq!(err.to_string(), "Configuration error: server.host cannot be empty");
    }

    #[test]
    fn test_validate_server_port_zero() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.server.port = 0;

        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_validate_site_title_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.site.title = "  ".to_owned();

        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_validate_revalidate_bounds() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.site.revalidate = MAX_REVALIDATE_SECS;
        assert!(config.validate().is_ok());

        config.site.revalidate = MAX_REVALIDATE_SECS + 1;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }
}
