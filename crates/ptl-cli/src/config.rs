//! Configuration for the `ptl` binary
//!
//! Loaded from a TOML file; every section and key is optional.
//!
//! ```toml
//! [logging]
//! level = "debug"
//! format = "json"
//!
//! [loaders]
//! file = true
//! http = true
//! http_timeout_secs = 10
//!
//! [output]
//! format = "json"
//! ```

use anyhow::{bail, Context};
use ptl_loader::{FileSchemeLoader, LoaderRegistry};
use ptl_template::TemplateFormat;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable overriding the log level
pub(crate) const LOG_ENV: &str = "PTL_LOG";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Config {
    /// Logging settings
    pub(crate) logging: LoggingConfig,
    /// Scheme loaders to register
    pub(crate) loaders: LoadersConfig,
    /// Output settings
    pub(crate) output: OutputConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct LoggingConfig {
    /// Filter directive (trace, debug, info, warn, error, or an env-filter string)
    pub(crate) level: String,
    /// Output format
    pub(crate) format: LogFormat,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum LogFormat {
    /// Human-readable single line
    #[default]
    Compact,
    /// JSON structured
    Json,
}

/// Loader registration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct LoadersConfig {
    /// Register the `file` loader
    pub(crate) file: bool,
    /// Register the `http`/`https` loader (requires the `http` feature)
    pub(crate) http: bool,
    /// Per-request timeout for the HTTP loader
    pub(crate) http_timeout_secs: u64,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct OutputConfig {
    /// `yaml` or `json`
    pub(crate) format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Compact,
        }
    }
}

impl Default for LoadersConfig {
    fn default() -> Self {
        Self {
            file: true,
            http: false,
            http_timeout_secs: 30,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "yaml".to_string(),
        }
    }
}

impl Config {
    /// Load from file, or defaults when no path is given
    pub(crate) fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut config = match path {
            Some(path) => {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read config file {}", path.display()))?;
                Self::from_toml(&content)
                    .with_context(|| format!("invalid config file {}", path.display()))?
            }
            None => Self::default(),
        };
        config.apply_env();
        Ok(config)
    }

    /// Parse TOML content
    pub(crate) fn from_toml(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    fn apply_env(&mut self) {
        self.override_log_level(std::env::var(LOG_ENV).ok());
    }

    /// Blank values leave the configured level in place
    fn override_log_level(&mut self, level: Option<String>) {
        if let Some(level) = level.filter(|l| !l.trim().is_empty()) {
            self.logging.level = level;
        }
    }

    /// Configured output format
    pub(crate) fn output_format(&self) -> anyhow::Result<TemplateFormat> {
        self.output
            .format
            .parse()
            .map_err(|e: String| anyhow::anyhow!(e))
    }

    /// Build the loader registry in a fixed order: file, then http
    pub(crate) fn registry(&self) -> anyhow::Result<LoaderRegistry> {
        let mut registry = LoaderRegistry::new();

        if self.loaders.file {
            registry.register(FileSchemeLoader::new());
        }

        if self.loaders.http {
            #[cfg(feature = "http")]
            registry.register(ptl_loader::HttpSchemeLoader::with_timeout(
                std::time::Duration::from_secs(self.loaders.http_timeout_secs),
            ));
            #[cfg(not(feature = "http"))]
            bail!("http loader enabled in config but ptl was built without the `http` feature");
        }

        if registry.is_empty() {
            bail!("no template loaders enabled");
        }
        Ok(registry)
    }
}
