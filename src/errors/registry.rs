//! Pool registry and upstream transport errors.

use thiserror::Error;

/// Errors that can occur while talking to the upstream pool-data service
/// or while managing the in-memory inventory.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The upstream answered with a non-success HTTP status.
    #[error("upstream returned status {status} for {url}")]
    Status { status: u16, url: String },

    /// The upstream could not be reached at all (connect, DNS, timeout).
    #[error("transport failure reaching upstream: {0}")]
    Transport(#[from] reqwest::Error),

    /// The upstream payload could not be decoded into the expected shape.
    #[error("failed to decode upstream payload: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configured extractor endpoint is not a valid URL.
    #[error("invalid extractor endpoint: {0}")]
    Endpoint(#[from] url::ParseError),

    /// A required environment variable is missing.
    #[error("missing environment variable {name}")]
    MissingEnv { name: String },

    /// A configuration value could not be parsed.
    #[error("invalid configuration value for {name}: '{value}'")]
    InvalidConfig { name: String, value: String },
}
