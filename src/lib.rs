//! Extractor Client Library
//!
//! Pool-data acquisition and routing-graph construction for a decentralized
//! exchange aggregator. This library maintains a continuously refreshed
//! in-memory snapshot of the liquidity pools an upstream extractor service
//! knows for one chain, serves on-demand lookups for pairs not yet known,
//! and assembles the token graph and pool inventory a route-search component
//! consumes.
//!
//! # Architecture Overview
//!
//! The library is organized into several key modules:
//!
//! - **`identity`**: canonical token identities and order-independent pair keys
//! - **`token`**: token metadata records and opaque pool snapshots
//! - **`registry`**: the pool inventory, its refresh loop and on-demand fetches
//! - **`graph`**: the derived token adjacency graph
//! - **`builders`**: candidate expansion and usable-pool set assembly
//! - **`config`**: connection settings and per-chain base-token tables
//! - **`errors`**: domain error types and the unified `ExtractorError`
//!
//! # Core Concepts
//!
//! - **Pair key**: the commutative key grouping pools between two token
//!   identities, so one fetch serves queries issued in either token order
//! - **Full refresh**: the periodic wholesale replacement of the inventory;
//!   failures keep the previous snapshot (stale is better than empty)
//! - **On-demand fetch**: a lazily triggered lookup for a pair or token not
//!   yet known, deduplicated so each pair has at most one fetch in flight
//! - **Token graph**: vertices are token identities, edges are pools; two
//!   pools between the same pair are two parallel edges
//!
//! # Consistency Model
//!
//! Readers always observe a complete inventory snapshot, never a mix of old
//! and new state. On-demand results are eventually consistent: a query may
//! return a subset of the usable pools while fetches settle, and callers
//! poll again rather than block.

pub mod builders;
pub mod config;
pub mod errors;
pub mod graph;
pub mod identity;
pub mod registry;
pub mod token;

// Re-export the main Result type and error enum for convenience
pub use errors::{ExtractorError, Result};

// Re-export the primary entry points for convenience
pub use builders::TokenGraphBuilder;
pub use config::{BaseTokenConfig, ExtractorConfig};
pub use registry::{ExtractorHttpClient, PoolRegistry, RefreshHandle, TokenResolution};

// Type aliases for commonly used complex types
pub type PoolsById = std::collections::HashMap<String, token::PoolRecord>;

// Module-specific result types for better ergonomics
pub type RegistryResult<T> = std::result::Result<T, errors::RegistryError>;
pub type GraphResult<T> = std::result::Result<T, errors::GraphError>;
