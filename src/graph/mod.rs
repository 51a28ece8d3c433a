//! Token adjacency graph for route discovery.
//!
//! This module provides the graph structure a route-search component
//! consumes: vertices are canonical token identities, edges are pool records
//! annotated with their two endpoint vertices and a liquidity-derived
//! weight. The graph is rebuilt from the pool inventory whenever needed and
//! is never mutated in place by its consumers.

pub mod core;
pub mod types;

// Re-export all public types for convenience
pub use core::TokenGraph;
pub use types::{EdgeId, PoolEdge, TokenVertex, VertexId};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{PoolRecord, PoolSnapshot, Token};

    fn token(address: &str, symbol: &str) -> Token {
        Token::new(1, address.to_string(), symbol.to_string(), 18)
    }

    fn pool(protocol: &str, address: &str, t0: &Token, t1: &Token, reserve: &str) -> PoolRecord {
        PoolRecord {
            pool: PoolSnapshot {
                address: address.to_string(),
                protocol: protocol.to_string(),
                fee: 0.003,
                token0: t0.clone(),
                token1: t1.clone(),
                reserve0: reserve.to_string(),
                reserve1: reserve.to_string(),
            },
        }
    }

    #[test]
    fn test_from_pools_builds_vertices_and_edges() {
        let a = token("0x0000000000000000000000000000000000000001", "AAA");
        let b = token("0x0000000000000000000000000000000000000002", "BBB");
        let c = token("0x0000000000000000000000000000000000000003", "CCC");

        let graph = TokenGraph::from_pools(vec![
            pool("UniswapV2", "0xp1", &a, &b, "1000"),
            pool("UniswapV2", "0xp2", &b, &c, "1000"),
        ]);

        assert_eq!(graph.vertex_count(), 3);
        assert_eq!(graph.edge_count(), 2);

        let vb = graph.find_vertex(&b.identity()).unwrap();
        assert_eq!(graph.edges_of(vb).unwrap().len(), 2);
    }

    #[test]
    fn test_vertex_dedup_across_pools() {
        let a = token("0x0000000000000000000000000000000000000001", "AAA");
        // Same token, different casing: one vertex.
        let a_upper = token("0x0000000000000000000000000000000000000001".to_uppercase().as_str(), "AAA");
        let b = token("0x0000000000000000000000000000000000000002", "BBB");
        let c = token("0x0000000000000000000000000000000000000003", "CCC");

        let graph = TokenGraph::from_pools(vec![
            pool("UniswapV2", "0xp1", &a, &b, "1000"),
            pool("UniswapV2", "0xp2", &a_upper, &c, "1000"),
        ]);
        assert_eq!(graph.vertex_count(), 3);
    }

    #[test]
    fn test_parallel_edges_preserved() {
        let a = token("0x0000000000000000000000000000000000000001", "AAA");
        let b = token("0x0000000000000000000000000000000000000002", "BBB");

        // Two venues for the same pair: two distinct edges.
        let graph = TokenGraph::from_pools(vec![
            pool("UniswapV2", "0xp1", &a, &b, "1000"),
            pool("UniswapV3", "0xp2", &a, &b, "5000"),
        ]);

        assert_eq!(graph.vertex_count(), 2);
        assert_eq!(graph.edge_count(), 2);

        let va = graph.find_vertex(&a.identity()).unwrap();
        let edges = graph.edges_of(va).unwrap();
        assert_eq!(edges.len(), 2);
        assert_ne!(
            graph.edge(edges[0]).unwrap().pool().unique_id(),
            graph.edge(edges[1]).unwrap().pool().unique_id()
        );
    }

    #[test]
    fn test_neighbor_lookup() {
        let a = token("0x0000000000000000000000000000000000000001", "AAA");
        let b = token("0x0000000000000000000000000000000000000002", "BBB");

        let graph = TokenGraph::from_pools(vec![pool("UniswapV2", "0xp1", &a, &b, "1000")]);
        let va = graph.find_vertex(&a.identity()).unwrap();
        let vb = graph.find_vertex(&b.identity()).unwrap();
        let edge = graph.edges_of(va).unwrap()[0];

        assert_eq!(graph.neighbor(edge, va).unwrap(), vb);
        assert_eq!(graph.neighbor(edge, vb).unwrap(), va);

        // A vertex the edge does not touch is rejected.
        assert!(graph.neighbor(edge, 99).is_err());
    }

    #[test]
    #[should_panic(expected = "not an endpoint")]
    fn test_edge_neighbor_asserts_endpoint_in_debug() {
        let a = token("0x0000000000000000000000000000000000000001", "AAA");
        let b = token("0x0000000000000000000000000000000000000002", "BBB");
        let graph = TokenGraph::from_pools(vec![pool("UniswapV2", "0xp1", &a, &b, "1000")]);
        graph.all_edges()[0].neighbor(99);
    }

    #[test]
    fn test_edge_liquidity_weight() {
        let a = token("0x0000000000000000000000000000000000000001", "AAA");
        let b = token("0x0000000000000000000000000000000000000002", "BBB");
        let graph = TokenGraph::from_pools(vec![pool("UniswapV2", "0xp1", &a, &b, "2500")]);
        assert_eq!(graph.all_edges()[0].liquidity(), 5000.0);
    }

    #[test]
    fn test_base_vertices_preserve_order_and_gaps() {
        let a = token("0x0000000000000000000000000000000000000001", "AAA");
        let b = token("0x0000000000000000000000000000000000000002", "BBB");
        let unlisted = token("0x00000000000000000000000000000000000000ff", "ZZZ");

        let graph = TokenGraph::from_pools(vec![pool("UniswapV2", "0xp1", &a, &b, "1000")]);
        let vertices = graph.base_vertices(&[b.clone(), unlisted, a.clone()]);

        assert_eq!(vertices.len(), 3);
        assert_eq!(vertices[0], Some(graph.find_vertex(&b.identity()).unwrap()));
        assert_eq!(vertices[1], None);
        assert_eq!(vertices[2], Some(graph.find_vertex(&a.identity()).unwrap()));
    }

    #[test]
    fn test_find_vertex_missing_is_error() {
        let graph = TokenGraph::new();
        let missing = token("0x0000000000000000000000000000000000000001", "AAA");
        assert!(graph.find_vertex(&missing.identity()).is_err());
        assert!(graph.vertex(0).is_err());
        assert!(graph.edge(0).is_err());
    }
}
