//! Client configuration with builder pattern
//!
//! Settings are layered: built-in defaults, then the config file at
//! `<config_dir>/dictionary-cli/config.toml`, then `DICTIONARY_*` environment
//! variables (a `.env` file is read first), then command-line flags.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const ENV_PREFIX: &str = "DICTIONARY_";
const CONFIG_DIR_NAME: &str = "dictionary-cli";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Effective configuration for one run of the client
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL of the dictionary server (scheme, host and port)
    pub server_url: String,
    pub request_timeout: Duration,
    /// Redraw period of the sync progress indicator
    pub progress_interval: Duration,
    /// Where to read the bootstrap document from (`-` for stdin)
    pub bootstrap_path: Option<PathBuf>,
    /// Answer every confirmation with yes
    pub assume_yes: bool,
    pub color: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:8080".to_string(),
            request_timeout: Duration::from_secs(60),
            progress_interval: Duration::from_millis(500),
            bootstrap_path: None,
            assume_yes: false,
            color: true,
        }
    }
}

/// On-disk shape of `config.toml`; every key is optional
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub server_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub progress_interval_ms: Option<u64>,
    pub bootstrap_path: Option<PathBuf>,
    pub assume_yes: Option<bool>,
    pub color: Option<bool>,
}

/// Values given on the command line, applied last
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub server_url: Option<String>,
    pub bootstrap_path: Option<PathBuf>,
    pub assume_yes: bool,
    pub no_color: bool,
}

impl ClientConfig {
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Default location of the config file, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Resolve the full configuration for this process
    pub fn load(config_path: Option<&Path>, overrides: &CliOverrides) -> Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            log::debug!("Loaded environment from {}", path.display());
        }

        let mut builder = Self::builder();

        let path = config_path.map(Path::to_path_buf).or_else(Self::default_path);
        if let Some(path) = path {
            if path.exists() {
                builder = builder.with_file(read_file_config(&path)?);
                log::debug!("Applied config file {}", path.display());
            } else if config_path.is_some() {
                anyhow::bail!("Config file does not exist: {}", path.display());
            }
        }

        let config = builder
            .with_env(|key| std::env::var(key).ok())?
            .with_overrides(overrides)
            .build();

        log::debug!("Effective configuration: {:?}", config);
        Ok(config)
    }
}

fn read_file_config(path: &Path) -> Result<FileConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("Failed to parse config file: {}", path.display()))
}

fn parse_bool(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("expected a boolean, got '{}'", other),
    }
}

/// Builder for [`ClientConfig`]
///
/// Each configuration layer is applied on top of the previous one, so call
/// order decides precedence.
#[derive(Debug, Clone, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn server_url(mut self, url: impl Into<String>) -> Self {
        self.config.server_url = url.into();
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    pub fn progress_interval(mut self, interval: Duration) -> Self {
        self.config.progress_interval = interval;
        self
    }

    pub fn bootstrap_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.bootstrap_path = Some(path.into());
        self
    }

    pub fn assume_yes(mut self, yes: bool) -> Self {
        self.config.assume_yes = yes;
        self
    }

    pub fn color(mut self, color: bool) -> Self {
        self.config.color = color;
        self
    }

    /// Layer the keys present in `config.toml`
    pub fn with_file(mut self, file: FileConfig) -> Self {
        if let Some(url) = file.server_url {
            self = self.server_url(url);
        }
        if let Some(secs) = file.request_timeout_secs {
            self = self.request_timeout(Duration::from_secs(secs));
        }
        if let Some(ms) = file.progress_interval_ms {
            self = self.progress_interval(Duration::from_millis(ms));
        }
        if let Some(path) = file.bootstrap_path {
            self = self.bootstrap_path(path);
        }
        if let Some(yes) = file.assume_yes {
            self = self.assume_yes(yes);
        }
        if let Some(color) = file.color {
            self = self.color(color);
        }
        self
    }

    /// Layer `DICTIONARY_*` variables read through the given lookup
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |name: &str| lookup(&format!("{}{}", ENV_PREFIX, name));

        if let Some(url) = var("SERVER_URL") {
            self = self.server_url(url);
        }
        if let Some(secs) = var("REQUEST_TIMEOUT_SECS") {
            let secs: u64 = secs
                .parse()
                .with_context(|| format!("Invalid {}REQUEST_TIMEOUT_SECS: {}", ENV_PREFIX, secs))?;
            self = self.request_timeout(Duration::from_secs(secs));
        }
        if let Some(ms) = var("PROGRESS_INTERVAL_MS") {
            let ms: u64 = ms
                .parse()
                .with_context(|| format!("Invalid {}PROGRESS_INTERVAL_MS: {}", ENV_PREFIX, ms))?;
            self = self.progress_interval(Duration::from_millis(ms));
        }
        if let Some(path) = var("BOOTSTRAP") {
            self = self.bootstrap_path(path);
        }
        if let Some(yes) = var("ASSUME_YES") {
            let yes = parse_bool(&yes)
                .with_context(|| format!("Invalid {}ASSUME_YES: {}", ENV_PREFIX, yes))?;
            self = self.assume_yes(yes);
        }
        if let Some(color) = var("COLOR") {
            let color = parse_bool(&color)
                .with_context(|| format!("Invalid {}COLOR: {}", ENV_PREFIX, color))?;
            self = self.color(color);
        }
        Ok(self)
    }

    /// Layer command-line flags; a flag only ever turns its setting on
    pub fn with_overrides(mut self, overrides: &CliOverrides) -> Self {
        if let Some(url) = &overrides.server_url {
            self = self.server_url(url.clone());
        }
        if let Some(path) = &overrides.bootstrap_path {
            self = self.bootstrap_path(path.clone());
        }
        if overrides.assume_yes {
            self = self.assume_yes(true);
        }
        if overrides.no_color {
            self = self.color(false);
        }
        self
    }

    pub fn build(self) -> ClientConfig {
        self.config
    }
}
