//! In-memory pool inventory.
//!
//! `PoolInventory` holds everything the registry knows: token metadata keyed
//! by identity and pool records grouped by pair key. A full refresh builds a
//! whole new inventory off to the side and installs it in one step; on-demand
//! fetches augment the live one additively. The struct itself carries no
//! locking; the registry owns synchronization.

use crate::identity::{PairKey, TokenIdentity, TokenRef};
use crate::token::{PoolRecord, Token};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct PoolInventory {
    token_map: HashMap<TokenIdentity, Token>,
    pool_map: HashMap<PairKey, Vec<PoolRecord>>,
    last_refresh: Option<DateTime<Utc>>,
}

impl PoolInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a fresh inventory from a full pool snapshot. Token metadata is
    /// collected from the pools' constituent tokens, stamped with the
    /// configured chain id.
    pub fn from_pools(chain_id: u64, pools: Vec<PoolRecord>) -> Self {
        let mut inventory = Self::new();
        for pool in pools {
            let key = pool.pair_key();
            inventory.note_tokens(chain_id, &pool);
            inventory.pool_map.entry(key).or_default().push(pool);
        }
        inventory.last_refresh = Some(Utc::now());
        inventory
    }

    /// Additively merge one pool under an explicit pair key.
    ///
    /// Append-only with one guard: a pool whose `unique_id` already sits
    /// under this key is skipped, so replaying a fetch or racing a full
    /// refresh cannot double-insert a venue. Returns whether the pool was
    /// actually added.
    pub fn merge_pool_at(&mut self, chain_id: u64, key: &PairKey, pool: PoolRecord) -> bool {
        let id = pool.unique_id();
        let duplicate = self
            .pool_map
            .get(key)
            .map(|entries| entries.iter().any(|existing| existing.unique_id() == id))
            .unwrap_or(false);
        if duplicate {
            return false;
        }
        self.note_tokens(chain_id, &pool);
        self.pool_map.entry(key.clone()).or_default().push(pool);
        true
    }

    /// Additively merge one pool under its own pair key.
    pub fn merge_pool(&mut self, chain_id: u64, pool: PoolRecord) -> bool {
        let key = pool.pair_key();
        self.merge_pool_at(chain_id, &key, pool)
    }

    /// Record token metadata if this identity is not known yet.
    pub fn note_token(&mut self, chain_id: u64, token: &Token) {
        let id = crate::identity::identity(&TokenRef::Address(token.address.clone()));
        self.token_map
            .entry(id)
            .or_insert_with(|| token.clone().with_chain(chain_id));
    }

    fn note_tokens(&mut self, chain_id: u64, pool: &PoolRecord) {
        self.note_token(chain_id, &pool.pool.token0);
        self.note_token(chain_id, &pool.pool.token1);
    }

    pub fn token(&self, id: &TokenIdentity) -> Option<&Token> {
        self.token_map.get(id)
    }

    pub fn pools(&self, key: &PairKey) -> Option<&Vec<PoolRecord>> {
        self.pool_map.get(key)
    }

    pub fn token_count(&self) -> usize {
        self.token_map.len()
    }

    /// Number of pool records across all pair entries.
    pub fn pool_count(&self) -> usize {
        self.pool_map.values().map(Vec::len).sum()
    }

    pub fn last_refresh(&self) -> Option<DateTime<Utc>> {
        self.last_refresh
    }
}
