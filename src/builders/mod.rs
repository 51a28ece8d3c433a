//! Builder components composing the registry, normalizer and graph.

pub mod graph;

// Re-export builder types for convenience
pub use graph::TokenGraphBuilder;
