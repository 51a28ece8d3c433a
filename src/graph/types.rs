//! Core types for the token graph.
//!
//! - Type aliases for vertex and edge identifiers
//! - Token vertex representation
//! - Pool edge representation

use crate::identity::TokenIdentity;
use crate::token::PoolRecord;

/// Type alias for vertex identifiers within the graph
pub type VertexId = usize;

/// Type alias for edge identifiers within the graph
pub type EdgeId = usize;

/// A token vertex: one canonical token identity and the edges incident to it.
#[derive(Debug, Clone)]
pub struct TokenVertex {
    identity: TokenIdentity,
    edges: Vec<EdgeId>,
}

impl TokenVertex {
    pub fn new(identity: TokenIdentity) -> Self {
        Self {
            identity,
            edges: Vec::new(),
        }
    }

    pub fn identity(&self) -> &TokenIdentity {
        &self.identity
    }

    /// Edges incident to this vertex, in insertion order.
    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub(crate) fn attach_edge(&mut self, edge: EdgeId) {
        self.edges.push(edge);
    }
}

/// A pool edge connecting two token vertices.
///
/// Every pool is its own edge: two pools between the same pair are two
/// parallel edges, because different fee tiers and implementations yield
/// different effective prices and route search must consider all of them.
#[derive(Debug, Clone)]
pub struct PoolEdge {
    pool: PoolRecord,
    vertices: [VertexId; 2],
    liquidity: f64,
}

impl PoolEdge {
    pub fn new(pool: PoolRecord, vertices: [VertexId; 2]) -> Self {
        let liquidity = pool.liquidity_estimate();
        Self {
            pool,
            vertices,
            liquidity,
        }
    }

    pub fn pool(&self) -> &PoolRecord {
        &self.pool
    }

    pub fn vertices(&self) -> [VertexId; 2] {
        self.vertices
    }

    /// Liquidity-derived weight for route scoring.
    pub fn liquidity(&self) -> f64 {
        self.liquidity
    }

    /// The opposite endpoint of this edge, in O(1).
    ///
    /// `vertex` must be an endpoint of this edge (asserted in debug builds);
    /// `TokenGraph::neighbor` is the checked variant.
    pub fn neighbor(&self, vertex: VertexId) -> VertexId {
        debug_assert!(self.touches(vertex), "vertex {vertex} is not an endpoint");
        if vertex == self.vertices[0] {
            self.vertices[1]
        } else {
            self.vertices[0]
        }
    }

    pub fn touches(&self, vertex: VertexId) -> bool {
        self.vertices[0] == vertex || self.vertices[1] == vertex
    }
}
