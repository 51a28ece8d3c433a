//! Token identity normalization and order-independent pair keys.
//!
//! Token references arrive in several textual encodings: checksummed or
//! lower-case contract addresses, and a reserved sentinel address standing in
//! for the chain's native coin. This module collapses all of them into one
//! canonical, comparable representation (`TokenIdentity`) and derives the
//! commutative `PairKey` used as the sole key into the pool inventory.
//!
//! Everything here is pure: no I/O, no shared state, no failure paths.

use crate::config::BaseTokenConfig;
use crate::token::Token;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical lower-case identity of a chain's native asset.
pub const NATIVE_IDENTITY: &str = "0xeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee";

/// Mixed-case form of the native sentinel, used in upstream request paths.
pub const NATIVE_ADDRESS: &str = "0xEeeeeEeeeEeEeeEeEeEeeEEEeeeeEeeeeeeeEEeE";

/// A token reference as callers hand it to us: either a raw address string or
/// a resolved token record. Collapsed immediately by [`identity`]; downstream
/// code never re-inspects the variant.
#[derive(Debug, Clone)]
pub enum TokenRef {
    /// A contract address in any casing (or the native sentinel address).
    Address(String),
    /// A resolved token record, possibly marked native.
    Token(Token),
}

impl From<Token> for TokenRef {
    fn from(token: Token) -> Self {
        TokenRef::Token(token)
    }
}

impl From<&str> for TokenRef {
    fn from(address: &str) -> Self {
        TokenRef::Address(address.to_string())
    }
}

/// Canonical, case-insensitive identity of one token.
///
/// Two token references denote the same entity iff their identities are
/// equal. Native assets and their wrapped counterparts are distinct
/// identities.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TokenIdentity(String);

impl TokenIdentity {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_native(&self) -> bool {
        self.0 == NATIVE_IDENTITY
    }
}

impl fmt::Display for TokenIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Order-independent composite key for an unordered token pair.
///
/// The two identities are concatenated in ascending lexicographic order, so
/// `pair_key(a, b) == pair_key(b, a)` holds by construction. This is what
/// allows one fetch to serve queries issued in either token order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PairKey(String);

impl PairKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Collapse a token reference into its canonical identity.
///
/// Raw addresses are lower-cased; resolved tokens marked native map to the
/// fixed sentinel identity, all others to their lower-cased contract address.
pub fn identity(token: &TokenRef) -> TokenIdentity {
    match token {
        TokenRef::Address(address) => TokenIdentity(address.to_lowercase()),
        TokenRef::Token(t) if t.is_native => TokenIdentity(NATIVE_IDENTITY.to_string()),
        TokenRef::Token(t) => TokenIdentity(t.address.to_lowercase()),
    }
}

/// Build the commutative pair key for two token references.
pub fn pair_key(t0: &TokenRef, t1: &TokenRef) -> PairKey {
    pair_key_of(&identity(t0), &identity(t1))
}

/// Build the commutative pair key for two already-normalized identities.
pub fn pair_key_of(id0: &TokenIdentity, id1: &TokenIdentity) -> PairKey {
    if id0 <= id1 {
        PairKey(format!("{}{}", id0.0, id1.0))
    } else {
        PairKey(format!("{}{}", id1.0, id0.0))
    }
}

/// The address to place in an upstream request path for this reference.
///
/// Native tokens have no contract address; the upstream expects the
/// mixed-case sentinel in their place.
pub fn request_address(token: &TokenRef) -> String {
    match token {
        TokenRef::Address(address) => address.clone(),
        TokenRef::Token(t) if t.is_native => NATIVE_ADDRESS.to_string(),
        TokenRef::Token(t) => t.address.clone(),
    }
}

/// Expand a pair of tokens of interest into the full candidate set of
/// intermediate-hop tokens for route search.
///
/// The candidate list is, in construction order: the chain's native asset,
/// `t0` and `t1` in wrapped form, the configured common base tokens, and any
/// additional bases registered for either wrapped address. The list is then
/// sorted by identity and adjacent duplicates are removed, yielding a
/// deterministic, duplicate-free sequence for the same inputs.
pub fn expand_base_candidates(
    bases: &BaseTokenConfig,
    chain_id: u64,
    t0: &Token,
    t1: &Token,
) -> Vec<Token> {
    let wrapped0 = t0.wrapped(bases);
    let wrapped1 = t1.wrapped(bases);

    let mut candidates = vec![Token::native(chain_id), wrapped0.clone(), wrapped1.clone()];
    candidates.extend(bases.common_bases.iter().cloned());
    for wrapped in [&wrapped0, &wrapped1] {
        candidates.extend(bases.additional_for(&wrapped.address).iter().cloned());
    }

    candidates.sort_by(|a, b| a.identity().cmp(&b.identity()));
    candidates.dedup_by(|a, b| a.identity() == b.identity());
    candidates
}
