//! Core token graph implementation.
//!
//! The `TokenGraph` is a derived structure: built from the pool inventory on
//! demand (per query or after a full refresh), read by route search, and
//! never mutated in place by callers; rebuild or discard.

use super::types::{EdgeId, PoolEdge, TokenVertex, VertexId};
use crate::errors::{GraphError, Result};
use crate::identity::{self, TokenIdentity, TokenRef};
use crate::token::{PoolRecord, Token};
use std::collections::HashMap;

/// Adjacency graph of token vertices connected by pool edges.
#[derive(Debug, Default)]
pub struct TokenGraph {
    vertices: Vec<TokenVertex>,
    edges: Vec<PoolEdge>,
    identity_to_vertex: HashMap<TokenIdentity, VertexId>,
}

impl TokenGraph {
    /// Create a new empty token graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from a set of pool records.
    ///
    /// Each pool resolves-or-creates a vertex per constituent token identity
    /// and contributes exactly one edge. Pools sharing a pair produce
    /// parallel edges.
    pub fn from_pools<I>(pools: I) -> Self
    where
        I: IntoIterator<Item = PoolRecord>,
    {
        let mut graph = Self::new();
        for pool in pools {
            graph.add_pool(pool);
        }
        tracing::debug!(
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            "Token graph built"
        );
        graph
    }

    /// Resolve-or-create the vertex for a token identity.
    pub fn add_vertex(&mut self, identity: TokenIdentity) -> VertexId {
        if let Some(&existing) = self.identity_to_vertex.get(&identity) {
            return existing;
        }
        let vertex_id = self.vertices.len();
        self.vertices.push(TokenVertex::new(identity.clone()));
        self.identity_to_vertex.insert(identity, vertex_id);
        vertex_id
    }

    /// Attach one pool as a new edge, creating endpoint vertices as needed.
    pub fn add_pool(&mut self, pool: PoolRecord) -> EdgeId {
        let id0 = identity::identity(&TokenRef::Address(pool.pool.token0.address.clone()));
        let id1 = identity::identity(&TokenRef::Address(pool.pool.token1.address.clone()));
        let v0 = self.add_vertex(id0);
        let v1 = self.add_vertex(id1);

        let edge_id = self.edges.len();
        self.edges.push(PoolEdge::new(pool, [v0, v1]));
        self.vertices[v0].attach_edge(edge_id);
        self.vertices[v1].attach_edge(edge_id);
        edge_id
    }

    // ================================
    // Query Methods
    // ================================

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Find the vertex for a token identity.
    pub fn find_vertex(&self, identity: &TokenIdentity) -> Result<VertexId> {
        self.identity_to_vertex
            .get(identity)
            .copied()
            .ok_or_else(|| {
                GraphError::VertexNotFound {
                    identity: identity.to_string(),
                }
                .into()
            })
    }

    pub fn vertex(&self, vertex_id: VertexId) -> Result<&TokenVertex> {
        self.vertices
            .get(vertex_id)
            .ok_or_else(|| GraphError::InvalidVertexIndex { index: vertex_id }.into())
    }

    pub fn edge(&self, edge_id: EdgeId) -> Result<&PoolEdge> {
        self.edges
            .get(edge_id)
            .ok_or_else(|| GraphError::InvalidEdgeIndex { index: edge_id }.into())
    }

    /// All edges in the graph, one per pool record.
    pub fn all_edges(&self) -> &[PoolEdge] {
        &self.edges
    }

    // ================================
    // Navigation Methods
    // ================================

    /// The edges incident to a vertex.
    pub fn edges_of(&self, vertex_id: VertexId) -> Result<&[EdgeId]> {
        Ok(self.vertex(vertex_id)?.edges())
    }

    /// The opposite endpoint of an edge, checked against the graph.
    pub fn neighbor(&self, edge_id: EdgeId, vertex_id: VertexId) -> Result<VertexId> {
        let edge = self.edge(edge_id)?;
        if !edge.touches(vertex_id) {
            return Err(GraphError::DetachedVertex {
                edge: edge_id,
                vertex: vertex_id,
            }
            .into());
        }
        Ok(edge.neighbor(vertex_id))
    }

    /// Look up the vertices for a base-token list, preserving order.
    ///
    /// Bases with no liquidity in this graph come back as `None`; route
    /// search skips them.
    pub fn base_vertices(&self, bases: &[Token]) -> Vec<Option<VertexId>> {
        bases
            .iter()
            .map(|token| self.identity_to_vertex.get(&token.identity()).copied())
            .collect()
    }
}
