//! Token graph builder: candidate expansion and usable-pool discovery.
//!
//! This is the query-side composition of the registry and the identity
//! normalizer: given two tokens of interest, expand them against the chain's
//! base-token tables, collect every pool already resident for any unordered
//! candidate pair, and hand route search a deduplicated pool set (or a full
//! adjacency graph built from it).

use crate::graph::TokenGraph;
use crate::identity::{self, TokenRef};
use crate::registry::PoolRegistry;
use crate::token::{PoolRecord, Token};
use crate::PoolsById;
use itertools::Itertools;
use std::collections::HashMap;
use std::sync::Arc;

/// Builds usable pool sets and token graphs on top of a shared registry.
///
/// Candidate expansion uses the base-token tables the registry was
/// configured with ([`crate::config::ExtractorConfig::with_bases`]).
pub struct TokenGraphBuilder {
    registry: Arc<PoolRegistry>,
}

impl TokenGraphBuilder {
    pub fn new(registry: Arc<PoolRegistry>) -> Self {
        Self { registry }
    }

    /// The pools currently usable for routing between `t0` and `t1`, keyed
    /// by pool unique id.
    ///
    /// Schedules an on-demand fetch for the direct pair without awaiting it,
    /// then unions whatever is already resident for every unordered pair in
    /// the expanded candidate set. Never suspends; may legitimately return
    /// an empty map while fetches are still settling; callers that need
    /// completeness poll again later. Upstream failures only ever shrink the
    /// result, they never surface here.
    pub fn usable_pools(&self, t0: &Token, t1: &Token) -> PoolsById {
        {
            let registry = Arc::clone(&self.registry);
            let a = TokenRef::Token(t0.clone());
            let b = TokenRef::Token(t1.clone());
            tokio::spawn(async move {
                registry.fetch_pair_if_unknown(&a, &b).await;
            });
        }

        let candidates = identity::expand_base_candidates(
            self.registry.bases(),
            self.registry.chain_id(),
            t0,
            t1,
        );

        let mut pools: HashMap<String, PoolRecord> = HashMap::new();
        for (i, j) in (0..candidates.len()).tuple_combinations::<(_, _)>() {
            let key = identity::pair_key_of(&candidates[i].identity(), &candidates[j].identity());
            for pool in self.registry.pools_for_pair(&key) {
                pools.insert(pool.unique_id(), pool);
            }
        }

        tracing::debug!(
            candidates = candidates.len(),
            pools = pools.len(),
            "Usable pool set assembled"
        );
        pools
    }

    /// Fetch every candidate pair that is still unknown and wait for the
    /// fetches to settle. Returns the number of pool records merged.
    ///
    /// `usable_pools` never waits; callers that need a complete answer can
    /// warm the candidate neighborhood first and query again. Fetches run
    /// concurrently and still deduplicate through the registry's in-flight
    /// set.
    pub async fn warm_candidates(&self, t0: &Token, t1: &Token) -> usize {
        let candidates = identity::expand_base_candidates(
            self.registry.bases(),
            self.registry.chain_id(),
            t0,
            t1,
        );
        let pairs: Vec<(TokenRef, TokenRef)> = (0..candidates.len())
            .tuple_combinations::<(_, _)>()
            .map(|(i, j)| {
                (
                    TokenRef::Token(candidates[i].clone()),
                    TokenRef::Token(candidates[j].clone()),
                )
            })
            .collect();

        let fetches = pairs
            .iter()
            .map(|(a, b)| self.registry.fetch_pair_if_unknown(a, b));
        futures::future::join_all(fetches)
            .await
            .into_iter()
            .flatten()
            .map(|pools| pools.len())
            .sum()
    }

    /// Build the token adjacency graph for a pool set.
    pub fn build_graph<I>(&self, pools: I) -> TokenGraph
    where
        I: IntoIterator<Item = PoolRecord>,
    {
        TokenGraph::from_pools(pools)
    }
}
