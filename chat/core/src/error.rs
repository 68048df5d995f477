//! Error Types
//!
//! Two families of failures exist: configuration problems found before the
//! UI starts (always fatal) and gateway failures found while talking to
//! Sarufi (captured as data and shown in place of the current screen).

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The API credential is not set in the environment
    #[error("{var} not found, kindly add the key to your environment")]
    MissingCredential {
        /// Name of the environment variable that was checked
        var: &'static str,
    },

    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    Read {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Errors returned by a [`RemoteBotGateway`](crate::gateway::RemoteBotGateway)
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The request never produced a response (DNS, TLS, connection reset...)
    #[error("request to Sarufi failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Sarufi answered with a non-success status
    #[error("Sarufi returned {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Error detail from the response body, or the status reason
        message: String,
    },

    /// The response body is not the JSON we expected
    #[error("unexpected response from Sarufi: {0}")]
    Decode(#[from] serde_json::Error),

    /// The reply decoded, but does not have the shape its bot kind requires
    #[error("malformed bot reply: {0}")]
    MalformedReply(String),
}
