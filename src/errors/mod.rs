//! Error handling for the extractor client.
//!
//! The error system is organized into domain-specific error types:
//!
//! - **`RegistryError`**: upstream transport and payload decoding failures
//!   raised by the pool registry and its HTTP source
//! - **`GraphError`**: token graph lookup and indexing failures
//!
//! The `ExtractorError` enum serves as the top-level error type that
//! encompasses all errors from the library and its dependencies, with
//! automatic conversion from the domain-specific errors and from external
//! library errors.
//!
//! Two outcomes are deliberately *not* errors anywhere in this crate:
//!
//! - a non-success status on an on-demand pool fetch means "no pools for this
//!   pair/token" and is swallowed inside the registry
//! - HTTP 422 on token resolution means "no such token" and surfaces as
//!   `Ok(None)` rather than as an error variant

pub mod graph;
pub mod registry;

// Re-export all error types for convenience
pub use graph::GraphError;
pub use registry::RegistryError;

/// Main result type for the library
pub type Result<T> = std::result::Result<T, ExtractorError>;

/// Top-level error enum that encompasses all possible errors in the
/// extractor client.
///
/// This enum serves as the unified error type for the entire library,
/// providing automatic conversion from the domain-specific errors and from
/// external dependencies.
#[derive(Debug, thiserror::Error)]
pub enum ExtractorError {
    /// Error in the pool registry or upstream communication.
    #[error("Registry operation failed: {0}")]
    Registry(#[from] RegistryError),

    /// Error in token graph operations.
    #[error("Graph operation failed: {0}")]
    Graph(#[from] GraphError),

    /// Network communication error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON serialization or deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error for cases not covered by specific error types.
    #[error("Generic error: {0}")]
    Other(#[from] anyhow::Error),
}
