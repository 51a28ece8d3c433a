//! Pool registry: the in-memory inventory of known pools and tokens.
//!
//! The registry keeps a continuously refreshed snapshot of every liquidity
//! pool the upstream extractor knows for one chain, serves on-demand lookups
//! for pairs not yet known with at-most-one-in-flight-request-per-pair
//! semantics, and resolves token metadata lazily. Module layout:
//!
//! - **`source`**: the upstream service seam (`PoolDataSource`) and its
//!   reqwest implementation
//! - **`inventory`**: the map state swapped wholesale on refresh
//! - **`core`**: the registry itself, its refresh loop and fetch operations

pub mod core;
pub mod inventory;
pub mod source;

#[cfg(test)]
pub(crate) mod testing;

// Re-export all public types for convenience
pub use core::{PoolRegistry, RefreshHandle, RegistryStats, TokenResolution};
pub use inventory::PoolInventory;
pub use source::{ExtractorHttpClient, PoolDataSource, SourceResult};
