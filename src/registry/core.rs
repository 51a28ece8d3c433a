//! Core pool registry implementation.
//!
//! The registry owns the only mutable shared state in the crate: the pool
//! inventory and the in-flight pair set. All mutation goes through its
//! methods. Locks are never held across an await; every network call runs
//! first and the result is merged under a short write-lock critical section.
//!
//! Per-pair lifecycle: unknown, then fetching (at most one on-demand fetch in
//! flight per pair), then known until the next full refresh resets the whole
//! inventory.

use crate::config::{BaseTokenConfig, ExtractorConfig};
use crate::errors::RegistryError;
use crate::identity::{self, PairKey, TokenIdentity, TokenRef, NATIVE_IDENTITY};
use crate::registry::inventory::PoolInventory;
use crate::registry::source::PoolDataSource;
use crate::token::{PoolRecord, Token};
use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Outcome of a token lookup: resolved from cache (or the native table)
/// without suspending, or deferred to a background metadata fetch.
pub enum TokenResolution {
    /// Resolved synchronously.
    Resolved(Token),
    /// A metadata fetch is running; `Ok(None)` means the upstream reported
    /// the token does not exist.
    Pending(JoinHandle<std::result::Result<Option<Token>, RegistryError>>),
}

/// Handle to the periodic refresh task. Aborting it stops the loop; the
/// inventory stays readable afterwards.
pub struct RefreshHandle {
    task: JoinHandle<()>,
}

impl RefreshHandle {
    /// Stop the refresh loop.
    pub fn shutdown(self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// A point-in-time sample of inventory statistics, taken under one read
/// guard so the numbers are mutually consistent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryStats {
    pub token_count: usize,
    pub pool_count: usize,
}

/// Removes its pair key from the in-flight set on drop, so the entry is
/// released even when the caller drops the fetch future mid-flight.
struct InFlightGuard<'a> {
    in_flight: &'a Mutex<HashSet<PairKey>>,
    key: PairKey,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.in_flight.lock().remove(&self.key);
    }
}

/// The in-memory inventory of known pools and tokens for one chain,
/// refreshed wholesale on a timer and augmented on demand.
pub struct PoolRegistry {
    chain_id: u64,
    refresh_interval: Duration,
    bases: BaseTokenConfig,
    source: Arc<dyn PoolDataSource>,
    inventory: RwLock<PoolInventory>,
    in_flight: Mutex<HashSet<PairKey>>,
}

impl PoolRegistry {
    /// Create an empty registry. Nothing is fetched until `refresh_all` runs
    /// or an on-demand lookup misses.
    pub fn new(config: &ExtractorConfig, source: Arc<dyn PoolDataSource>) -> Self {
        Self {
            chain_id: config.chain_id,
            refresh_interval: config.refresh_interval,
            bases: config.bases.clone(),
            source,
            inventory: RwLock::new(PoolInventory::new()),
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// The base-token tables this registry was configured with.
    pub fn bases(&self) -> &BaseTokenConfig {
        &self.bases
    }

    /// Fetch the complete pool set and replace the inventory wholesale.
    ///
    /// The replacement inventory is built off to the side; readers observe
    /// either the complete old state or the complete new state, never a mix.
    /// On any failure the existing inventory is left untouched.
    pub async fn refresh_all(&self) -> std::result::Result<(), RegistryError> {
        let pools = self.source.all_pools(self.chain_id).await?;
        let rebuilt = PoolInventory::from_pools(self.chain_id, pools);

        tracing::info!(
            chain_id = self.chain_id,
            tokens = rebuilt.token_count(),
            pools = rebuilt.pool_count(),
            "Pool inventory refreshed"
        );

        let mut inventory = self.inventory.write();
        *inventory = rebuilt;
        Ok(())
    }

    /// Launch the periodic full-refresh task. The first refresh runs
    /// immediately; afterwards the loop reschedules every configured
    /// interval regardless of success or failure, logging errors and keeping
    /// the previous snapshot on failure.
    pub fn start_refresh_loop(self: &Arc<Self>) -> RefreshHandle {
        let registry = Arc::clone(self);
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(registry.refresh_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if let Err(e) = registry.refresh_all().await {
                    tracing::error!(
                        chain_id = registry.chain_id,
                        error = %e,
                        "Pool refresh failed; keeping previous snapshot"
                    );
                }
            }
        });
        RefreshHandle { task }
    }

    /// Fetch pools for a pair unless it is already known or already being
    /// fetched.
    ///
    /// The known-pair check runs before deduplication, so a pair is fetched
    /// at most once until a full refresh clears it. The in-flight entry
    /// lives exactly as long as the fetch, success or failure, and is
    /// released even if the caller drops the future mid-fetch. Results merge
    /// additively under the *requested* pair key; a failed or non-success
    /// response means "no pools for this pair" and leaves the pair eligible
    /// for a later retry.
    pub async fn fetch_pair_if_unknown(
        &self,
        t0: &TokenRef,
        t1: &TokenRef,
    ) -> Option<Vec<PoolRecord>> {
        let key = identity::pair_key(t0, t1);
        if self.inventory.read().pools(&key).is_some() {
            return None;
        }
        if !self.in_flight.lock().insert(key.clone()) {
            tracing::debug!(pair = %key, "Pair fetch already in flight");
            return None;
        }
        let _guard = InFlightGuard {
            in_flight: &self.in_flight,
            key: key.clone(),
        };

        let result = self
            .source
            .pools_between(
                &identity::request_address(t0),
                &identity::request_address(t1),
            )
            .await;

        match result {
            Ok(pools) => {
                let mut inventory = self.inventory.write();
                for pool in &pools {
                    inventory.merge_pool_at(self.chain_id, &key, pool.clone());
                }
                drop(inventory);
                tracing::debug!(pair = %key, count = pools.len(), "On-demand pair fetch merged");
                Some(pools)
            }
            Err(e) => {
                tracing::warn!(
                    pair = %key,
                    error = %e,
                    "On-demand pair fetch failed; treating as no pools"
                );
                None
            }
        }
    }

    /// Fetch every pool touching one token and merge each into its own
    /// pair entry. Failures degrade to "no pools", never an error.
    pub async fn fetch_token_pools(&self, token: &TokenRef) -> Option<Vec<PoolRecord>> {
        let address = identity::request_address(token);
        match self.source.pools_for_token(&address).await {
            Ok(pools) => {
                let mut inventory = self.inventory.write();
                for pool in &pools {
                    inventory.merge_pool(self.chain_id, pool.clone());
                }
                drop(inventory);
                tracing::debug!(
                    token = %address,
                    count = pools.len(),
                    "Token neighborhood fetch merged"
                );
                Some(pools)
            }
            Err(e) => {
                tracing::warn!(
                    token = %address,
                    error = %e,
                    "Token neighborhood fetch failed; treating as no pools"
                );
                None
            }
        }
    }

    /// Resolve token metadata for an address.
    ///
    /// The native sentinel resolves synchronously from the per-chain table;
    /// cached identities resolve synchronously from the inventory. Anything
    /// else spawns a metadata fetch and returns `Pending`; callers must
    /// treat that as a deferred result. A successful fetch is cached; a
    /// "token does not exist" outcome (`Ok(None)`) is never cached, so a
    /// later call may legitimately retry it.
    pub fn resolve_token(self: &Arc<Self>, address: &str) -> TokenResolution {
        let id = identity::identity(&TokenRef::Address(address.to_string()));
        if id.as_str() == NATIVE_IDENTITY {
            return TokenResolution::Resolved(Token::native(self.chain_id));
        }
        if let Some(token) = self.inventory.read().token(&id).cloned() {
            return TokenResolution::Resolved(token);
        }

        let registry = Arc::clone(self);
        let address = address.to_string();
        let task = tokio::spawn(async move {
            let fetched = registry.source.token(&address).await?;
            match fetched {
                Some(token) => {
                    let token = token.with_chain(registry.chain_id);
                    registry
                        .inventory
                        .write()
                        .note_token(registry.chain_id, &token);
                    tracing::debug!(address = %address, symbol = %token.symbol, "Token resolved and cached");
                    Ok(Some(token))
                }
                None => {
                    tracing::debug!(address = %address, "Upstream reports no such token");
                    Ok(None)
                }
            }
        });
        TokenResolution::Pending(task)
    }

    // ================================
    // Read accessors
    // ================================

    /// Cached token metadata for an identity, if known.
    pub fn token(&self, id: &TokenIdentity) -> Option<Token> {
        self.inventory.read().token(id).cloned()
    }

    /// Whether any pools are recorded under this pair key.
    pub fn known_pair(&self, key: &PairKey) -> bool {
        self.inventory.read().pools(key).is_some()
    }

    /// Pool records currently resident for a pair key. Empty when unknown.
    pub fn pools_for_pair(&self, key: &PairKey) -> Vec<PoolRecord> {
        self.inventory
            .read()
            .pools(key)
            .cloned()
            .unwrap_or_default()
    }

    /// Consistent token/pool counts sampled under one read guard.
    pub fn stats(&self) -> RegistryStats {
        let inventory = self.inventory.read();
        RegistryStats {
            token_count: inventory.token_count(),
            pool_count: inventory.pool_count(),
        }
    }

    pub fn last_refresh(&self) -> Option<DateTime<Utc>> {
        self.inventory.read().last_refresh()
    }
}
