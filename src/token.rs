//! Token metadata records and opaque pool snapshots.
//!
//! These are the serde models of what the upstream pool-data service ships:
//! token metadata blocks and pool records. Pool internals (reserves, fee,
//! protocol specifics) are carried through untouched; this crate only reads
//! the two constituent tokens, the unique pool identifier, and a rough
//! liquidity figure for graph edge weights.

use crate::config::BaseTokenConfig;
use crate::identity::{PairKey, TokenIdentity, TokenRef, NATIVE_ADDRESS};
use serde::{Deserialize, Serialize};

/// Normalized metadata for one token identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    /// Chain this token lives on. Upstream payloads may omit it; the registry
    /// stamps the configured chain id on ingestion.
    #[serde(default)]
    pub chain_id: u64,
    /// Contract address, or the native sentinel address for native assets.
    pub address: String,
    pub symbol: String,
    pub decimals: u8,
    /// Native assets have no contract; they are distinct identities from
    /// their wrapped counterparts.
    #[serde(default)]
    pub is_native: bool,
}

impl Token {
    pub fn new(chain_id: u64, address: String, symbol: String, decimals: u8) -> Self {
        Self {
            chain_id,
            address,
            symbol,
            decimals,
            is_native: false,
        }
    }

    /// The native asset record for a chain, available synchronously with no
    /// network access.
    pub fn native(chain_id: u64) -> Self {
        let (symbol, decimals) = native_currency(chain_id);
        Self {
            chain_id,
            address: NATIVE_ADDRESS.to_string(),
            symbol: symbol.to_string(),
            decimals,
            is_native: true,
        }
    }

    pub fn identity(&self) -> TokenIdentity {
        crate::identity::identity(&TokenRef::Token(self.clone()))
    }

    /// Resolve the native form to the chain's configured wrapped-native
    /// token; non-native tokens are already their own wrapped form. Falls
    /// back to the token itself when no wrapped-native is configured.
    pub fn wrapped(&self, bases: &BaseTokenConfig) -> Token {
        if self.is_native {
            if let Some(wrapped) = &bases.wrapped_native {
                return wrapped.clone();
            }
        }
        self.clone()
    }

    /// Same record with the chain id stamped on.
    pub fn with_chain(mut self, chain_id: u64) -> Self {
        self.chain_id = chain_id;
        self
    }
}

/// The pool body as shipped by the upstream: identity, the two constituent
/// tokens, and state we pass through without reinterpretation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolSnapshot {
    pub address: String,
    /// Protocol / pool implementation name, e.g. "UniswapV2" or "SushiSwapV3".
    pub protocol: String,
    #[serde(default)]
    pub fee: f64,
    pub token0: Token,
    pub token1: Token,
    /// Reserves as decimal strings; values can exceed u128.
    #[serde(default)]
    pub reserve0: String,
    #[serde(default)]
    pub reserve1: String,
}

/// One discovered liquidity pool, grouped under its pair key in the
/// inventory. A pair may be served by several records (different protocols
/// or fee tiers).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolRecord {
    pub pool: PoolSnapshot,
}

impl PoolRecord {
    /// Unique identifier of this pool across protocols. Two records with the
    /// same id are the same venue, however they were discovered.
    pub fn unique_id(&self) -> String {
        format!(
            "{}:{}",
            self.pool.protocol,
            self.pool.address.to_lowercase()
        )
    }

    /// Pair key derived from the pool's own constituent token addresses.
    pub fn pair_key(&self) -> PairKey {
        crate::identity::pair_key(
            &TokenRef::Address(self.pool.token0.address.clone()),
            &TokenRef::Address(self.pool.token1.address.clone()),
        )
    }

    /// Rough liquidity figure used as a graph edge weight. Unparsable or
    /// absent reserves count as zero.
    pub fn liquidity_estimate(&self) -> f64 {
        let r0 = self.pool.reserve0.parse::<f64>().unwrap_or(0.0);
        let r1 = self.pool.reserve1.parse::<f64>().unwrap_or(0.0);
        r0 + r1
    }
}

/// Native currency table for the supported chains. Unknown chain ids get a
/// generic placeholder so resolution stays total.
fn native_currency(chain_id: u64) -> (&'static str, u8) {
    match chain_id {
        1 | 10 | 8453 | 42161 | 59144 | 534352 => ("ETH", 18),
        56 => ("BNB", 18),
        100 => ("XDAI", 18),
        137 => ("POL", 18),
        250 => ("FTM", 18),
        42220 => ("CELO", 18),
        43114 => ("AVAX", 18),
        _ => ("NATIVE", 18),
    }
}
