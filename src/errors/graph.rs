//! Token graph lookup and indexing errors.

use thiserror::Error;

/// Errors that can occur during token graph operations
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("no vertex for token identity {identity}")]
    VertexNotFound { identity: String },

    #[error("invalid vertex index: {index}")]
    InvalidVertexIndex { index: usize },

    #[error("invalid edge index: {index}")]
    InvalidEdgeIndex { index: usize },

    #[error("edge {edge} does not touch vertex {vertex}")]
    DetachedVertex { edge: usize, vertex: usize },
}
