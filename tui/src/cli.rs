//! Command line arguments

use std::path::PathBuf;

use clap::Parser;
use sarufi_chat_core::{
    default_config_path, load_config_from_path, ClientConfig, ConfigError, ConfigOverrides,
};

/// Sarufi TUI - chat with your Sarufi bots from the terminal
///
/// The API key is read from the SARUFI_API_KEY environment variable.
#[derive(Parser, Debug, Default)]
#[command(name = "sarufi-tui")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Sarufi API root
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Transcript wrap width in characters
    #[arg(long, value_name = "COLUMNS")]
    pub wrap_width: Option<usize>,

    /// Spinner tick interval in milliseconds
    #[arg(long, value_name = "MS")]
    pub tick_ms: Option<u64>,

    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl Args {
    /// Config file to read: `--config`, or the default location
    #[must_use]
    pub fn config_path(&self) -> Option<PathBuf> {
        self.config.clone().or_else(default_config_path)
    }

    /// Flags that override loaded configuration
    #[must_use]
    pub fn overrides(&self) -> ConfigOverrides {
        let mut overrides = ConfigOverrides::new();
        if let Some(ref url) = self.base_url {
            overrides = overrides.with_base_url(url.clone());
        }
        if let Some(width) = self.wrap_width {
            overrides = overrides.with_wrap_width(width);
        }
        if let Some(ms) = self.tick_ms {
            overrides = overrides.with_tick_ms(ms);
        }
        overrides
    }

    /// Load configuration from file and environment, then apply the flags
    ///
    /// # Errors
    ///
    /// Propagates any [`ConfigError`], including a missing credential.
    pub fn load_config(&self) -> Result<ClientConfig, ConfigError> {
        let mut config = load_config_from_path(self.config_path())?;
        self.overrides().apply(&mut config)?;
        Ok(config)
    }
}
