//! Client Configuration
//!
//! Configuration for the chat client, with an optional TOML file at
//! `~/.config/sarufi/tui.toml`.
//!
//! # Configuration Priority
//!
//! Values are loaded with the following priority (highest first):
//! 1. CLI arguments (applied by the caller through [`ConfigOverrides`])
//! 2. Environment variables
//! 3. TOML configuration file
//! 4. Default values
//!
//! The API key is the exception: it is read from `SARUFI_API_KEY` only and
//! never from the file.
//!
//! # Example Configuration
//!
//! ```toml
//! [gateway]
//! base_url = "https://developers.sarufi.io"
//! channel = "general"
//! request_timeout_secs = 30
//!
//! [display]
//! wrap_width = 50
//! tick_ms = 100
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::view::DEFAULT_WRAP_WIDTH;

/// Environment variable holding the API key
pub const API_KEY_VAR: &str = "SARUFI_API_KEY";

/// Sarufi developer API root
pub const DEFAULT_BASE_URL: &str = "https://developers.sarufi.io";

/// Messaging channel sent with every conversation request
pub const DEFAULT_CHANNEL: &str = "general";

const DEFAULT_TICK_MS: u64 = 100;

/// Tracks where a configuration value came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Value from command-line argument
    Cli,
    /// Value from environment variable
    Env,
    /// Value from TOML configuration file
    File,
    /// Default value
    Default,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cli => write!(f, "CLI"),
            Self::Env => write!(f, "environment"),
            Self::File => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

// =============================================================================
// TOML Configuration Structures
// =============================================================================

/// Gateway section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayToml {
    /// API root URL
    pub base_url: Option<String>,

    /// Messaging channel
    pub channel: Option<String>,

    /// Per-request timeout in seconds (0 = no timeout)
    pub request_timeout_secs: Option<u64>,
}

/// Display section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayToml {
    /// Transcript wrap width in characters
    pub wrap_width: Option<usize>,

    /// Spinner tick interval in milliseconds
    pub tick_ms: Option<u64>,
}

/// Top-level TOML configuration structure
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientToml {
    /// Gateway configuration section
    pub gateway: GatewayToml,

    /// Display configuration section
    pub display: DisplayToml,
}

// =============================================================================
// Main Configuration Struct
// =============================================================================

/// Resolved client configuration
#[derive(Clone)]
pub struct ClientConfig {
    /// Sarufi API key, from `SARUFI_API_KEY`
    pub api_key: String,

    /// API root URL
    pub base_url: String,

    /// Messaging channel
    pub channel: String,

    /// Transcript wrap width in characters
    pub wrap_width: usize,

    /// Spinner tick interval
    pub tick_interval: Duration,

    /// Per-request timeout; `None` waits indefinitely
    pub request_timeout: Option<Duration>,

    /// Path to the config file that was loaded (if any)
    pub config_file_path: Option<PathBuf>,

    source: ConfigSource,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("channel", &self.channel)
            .field("wrap_width", &self.wrap_width)
            .field("tick_interval", &self.tick_interval)
            .field("request_timeout", &self.request_timeout)
            .field("config_file_path", &self.config_file_path)
            .field("source", &self.source)
            .finish()
    }
}

impl ClientConfig {
    /// Defaults around the given API key
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            channel: DEFAULT_CHANNEL.to_string(),
            wrap_width: DEFAULT_WRAP_WIDTH,
            tick_interval: Duration::from_millis(DEFAULT_TICK_MS),
            request_timeout: None,
            config_file_path: None,
            source: ConfigSource::Default,
        }
    }

    /// Get the primary source of this configuration
    #[must_use]
    pub fn source(&self) -> ConfigSource {
        self.source
    }

    /// Check values that would make the client unusable
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first bad value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("base_url must not be empty".into()));
        }
        if self.channel.trim().is_empty() {
            return Err(ConfigError::Invalid("channel must not be empty".into()));
        }
        if self.wrap_width == 0 {
            return Err(ConfigError::Invalid("wrap_width must be at least 1".into()));
        }
        if self.tick_interval.is_zero() {
            return Err(ConfigError::Invalid("tick_ms must be at least 1".into()));
        }
        Ok(())
    }
}

// =============================================================================
// Configuration Loading
// =============================================================================

/// Get the default configuration file path
///
/// Returns `$XDG_CONFIG_HOME/sarufi/tui.toml` or
/// `~/.config/sarufi/tui.toml` if `XDG_CONFIG_HOME` is not set.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("sarufi").join("tui.toml"))
}

/// Load configuration from the default file and the process environment
///
/// # Errors
///
/// Returns [`ConfigError::MissingCredential`] when `SARUFI_API_KEY` is unset
/// or empty, and a file error if the config file exists but cannot be
/// read or parsed. A missing config file is not an error.
pub fn load_config() -> Result<ClientConfig, ConfigError> {
    load_config_from_path(default_config_path())
}

/// Load configuration from a specific path and the process environment
///
/// # Errors
///
/// See [`load_config`].
pub fn load_config_from_path(path: Option<PathBuf>) -> Result<ClientConfig, ConfigError> {
    load_config_with(path.as_deref(), |name| std::env::var(name).ok())
}

/// Load configuration with a custom environment lookup
///
/// # Errors
///
/// See [`load_config`].
pub fn load_config_with<F>(path: Option<&Path>, lookup: F) -> Result<ClientConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let api_key = lookup(API_KEY_VAR)
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
        .ok_or(ConfigError::MissingCredential { var: API_KEY_VAR })?;

    let mut config = ClientConfig::new(api_key);

    if let Some(config_path) = path {
        if config_path.exists() {
            let toml_content =
                std::fs::read_to_string(config_path).map_err(|e| ConfigError::Read {
                    path: config_path.to_path_buf(),
                    source: e,
                })?;

            let toml_config: ClientToml = toml::from_str(&toml_content)?;
            apply_toml_config(&mut config, &toml_config);
            config.config_file_path = Some(config_path.to_path_buf());
            config.source = ConfigSource::File;

            tracing::info!(
                path = %config_path.display(),
                "Loaded configuration from file"
            );
        } else {
            tracing::debug!(
                path = %config_path.display(),
                "Config file not found, using defaults"
            );
        }
    }

    apply_env_config(&mut config, &lookup);
    config.validate()?;

    Ok(config)
}

fn apply_toml_config(config: &mut ClientConfig, toml: &ClientToml) {
    if let Some(ref url) = toml.gateway.base_url {
        config.base_url.clone_from(url);
    }
    if let Some(ref channel) = toml.gateway.channel {
        config.channel.clone_from(channel);
    }
    if let Some(secs) = toml.gateway.request_timeout_secs {
        config.request_timeout = timeout_from_secs(secs);
    }

    if let Some(width) = toml.display.wrap_width {
        config.wrap_width = width;
    }
    if let Some(ms) = toml.display.tick_ms {
        config.tick_interval = Duration::from_millis(ms);
    }
}

fn apply_env_config<F>(config: &mut ClientConfig, lookup: &F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup("SARUFI_BASE_URL").filter(|v| !v.trim().is_empty()) {
        config.base_url = url;
        config.source = ConfigSource::Env;
    }
    if let Some(width) = parse_env::<usize, _>(lookup, "SARUFI_WRAP_WIDTH") {
        config.wrap_width = width;
        config.source = ConfigSource::Env;
    }
    if let Some(ms) = parse_env::<u64, _>(lookup, "SARUFI_TICK_MS") {
        config.tick_interval = Duration::from_millis(ms);
        config.source = ConfigSource::Env;
    }
    if let Some(secs) = parse_env::<u64, _>(lookup, "SARUFI_REQUEST_TIMEOUT_SECS") {
        config.request_timeout = timeout_from_secs(secs);
        config.source = ConfigSource::Env;
    }
}

/// Parse a numeric variable, ignoring values that do not parse
fn parse_env<T, F>(lookup: &F, name: &str) -> Option<T>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(name)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(var = name, value = %raw, "Ignoring unparseable environment value");
            None
        }
    }
}

fn timeout_from_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then_some(Duration::from_secs(secs))
}

// =============================================================================
// CLI Override Support
// =============================================================================

/// Builder for applying CLI overrides to configuration
///
/// Use this after [`load_config`] to apply command-line argument overrides.
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    /// API root override
    pub base_url: Option<String>,

    /// Wrap width override
    pub wrap_width: Option<usize>,

    /// Tick interval override (milliseconds)
    pub tick_ms: Option<u64>,
}

impl ConfigOverrides {
    /// Create a new empty set of overrides
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set API root override
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set wrap width override
    #[must_use]
    pub fn with_wrap_width(mut self, width: usize) -> Self {
        self.wrap_width = Some(width);
        self
    }

    /// Set tick interval override
    #[must_use]
    pub fn with_tick_ms(mut self, ms: u64) -> Self {
        self.tick_ms = Some(ms);
        self
    }

    /// Whether any override is set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.base_url.is_none() && self.wrap_width.is_none() && self.tick_ms.is_none()
    }

    /// Apply overrides to a configuration and re-validate it
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if an override makes the
    /// configuration unusable.
    pub fn apply(&self, config: &mut ClientConfig) -> Result<(), ConfigError> {
        if self.is_empty() {
            return Ok(());
        }
        config.source = ConfigSource::Cli;

        if let Some(ref url) = self.base_url {
            config.base_url.clone_from(url);
        }
        if let Some(width) = self.wrap_width {
            config.wrap_width = width;
        }
        if let Some(ms) = self.tick_ms {
            config.tick_interval = Duration::from_millis(ms);
        }

        config.validate()
    }
}
