//! Test doubles for the upstream pool-data source.
//!
//! `MockSource` stands in for the extractor service: canned responses, call
//! counters, and an optional per-call delay for exercising in-flight
//! deduplication. A `None` canned response models an upstream failure
//! (status 500).

use crate::errors::RegistryError;
use crate::registry::source::{PoolDataSource, SourceResult};
use crate::token::{PoolRecord, PoolSnapshot, Token};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub(crate) fn test_token(address: &str, symbol: &str) -> Token {
    Token::new(1, address.to_string(), symbol.to_string(), 18)
}

pub(crate) fn test_pool(protocol: &str, address: &str, t0: &Token, t1: &Token) -> PoolRecord {
    PoolRecord {
        pool: PoolSnapshot {
            address: address.to_string(),
            protocol: protocol.to_string(),
            fee: 0.003,
            token0: t0.clone(),
            token1: t1.clone(),
            reserve0: "1000000".to_string(),
            reserve1: "1000000".to_string(),
        },
    }
}

#[derive(Default)]
pub(crate) struct MockSource {
    pub all_pools_response: Mutex<Option<Vec<PoolRecord>>>,
    pub pools_between_response: Mutex<Option<Vec<PoolRecord>>>,
    pub pools_for_token_response: Mutex<Option<Vec<PoolRecord>>>,
    /// Lower-case address to metadata; `Some(None)` models HTTP 422,
    /// a missing key models an upstream failure.
    pub tokens: Mutex<HashMap<String, Option<Token>>>,
    pub delay: Mutex<Option<Duration>>,

    pub all_pools_calls: AtomicUsize,
    pub pools_between_calls: AtomicUsize,
    pub pools_for_token_calls: AtomicUsize,
    pub token_calls: AtomicUsize,
}

impl MockSource {
    pub fn with_all_pools(pools: Vec<PoolRecord>) -> Self {
        let source = Self::default();
        *source.all_pools_response.lock() = Some(pools);
        source
    }

    pub fn with_pools_between(pools: Vec<PoolRecord>) -> Self {
        let source = Self::default();
        *source.pools_between_response.lock() = Some(pools);
        source
    }

    fn failure(endpoint: &str) -> RegistryError {
        RegistryError::Status {
            status: 500,
            url: format!("mock://{endpoint}"),
        }
    }

    async fn maybe_delay(&self) {
        let delay = *self.delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl PoolDataSource for MockSource {
    async fn all_pools(&self, _chain_id: u64) -> SourceResult<Vec<PoolRecord>> {
        self.all_pools_calls.fetch_add(1, Ordering::SeqCst);
        self.maybe_delay().await;
        self.all_pools_response
            .lock()
            .clone()
            .ok_or_else(|| Self::failure("pools-json"))
    }

    async fn pools_between(&self, _addr0: &str, _addr1: &str) -> SourceResult<Vec<PoolRecord>> {
        self.pools_between_calls.fetch_add(1, Ordering::SeqCst);
        self.maybe_delay().await;
        self.pools_between_response
            .lock()
            .clone()
            .ok_or_else(|| Self::failure("pools-between"))
    }

    async fn pools_for_token(&self, _address: &str) -> SourceResult<Vec<PoolRecord>> {
        self.pools_for_token_calls.fetch_add(1, Ordering::SeqCst);
        self.maybe_delay().await;
        self.pools_for_token_response
            .lock()
            .clone()
            .ok_or_else(|| Self::failure("pools-for-token"))
    }

    async fn token(&self, address: &str) -> SourceResult<Option<Token>> {
        self.token_calls.fetch_add(1, Ordering::SeqCst);
        self.maybe_delay().await;
        match self.tokens.lock().get(&address.to_lowercase()) {
            Some(entry) => Ok(entry.clone()),
            None => Err(Self::failure("token")),
        }
    }
}
