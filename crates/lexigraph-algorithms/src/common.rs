//! Shared utilities for graph algorithms
//!
//! Provides a read-only, optimized view of the graph topology for algorithm execution.

use std::collections::HashMap;

/// Node Identifier type (u64)
pub type NodeId = u64;

/// A dense, integer-indexed view of an undirected graph using Compressed Sparse Row (CSR) format.
///
/// Every undirected edge `{u, v}` is stored twice, once in each endpoint's
/// neighbor slice. Edges whose endpoints are not part of the view are dropped,
/// which makes it cheap to project a subgraph (e.g. a single category).
#[derive(Debug, Clone)]
pub struct GraphView {
    /// Number of nodes
    pub node_count: usize,
    /// Mapping from dense index (0..N) back to NodeId
    pub index_to_node: Vec<NodeId>,
    /// Mapping from NodeId to dense index
    pub node_to_index: HashMap<NodeId, usize>,

    /// Offsets into `targets`. Size = node_count + 1
    pub offsets: Vec<usize>,
    /// Contiguous array of neighbor node indices
    pub targets: Vec<usize>,
}

impl GraphView {
    /// Build an undirected view over `nodes`, keeping only edges with both
    /// endpoints in `nodes`. Dense indices follow the order of `nodes`.
    pub fn undirected<I>(nodes: &[NodeId], edges: I) -> Self
    where
        I: IntoIterator<Item = (NodeId, NodeId)>,
    {
        let node_count = nodes.len();
        let index_to_node = nodes.to_vec();
        let mut node_to_index = HashMap::with_capacity(node_count);
        for (idx, &node_id) in nodes.iter().enumerate() {
            node_to_index.insert(node_id, idx);
        }

        // Adjacency lists first, flattened to CSR below
        let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); node_count];
        for (u, v) in edges {
            let (Some(&u_idx), Some(&v_idx)) = (node_to_index.get(&u), node_to_index.get(&v)) else {
                continue;
            };
            if u_idx == v_idx {
                continue;
            }
            adjacency[u_idx].push(v_idx);
            adjacency[v_idx].push(u_idx);
        }

        Self::from_adjacency_list(index_to_node, node_to_index, adjacency)
    }

    /// Helper to create GraphView from adjacency lists (test support)
    pub fn from_adjacency_list(
        index_to_node: Vec<NodeId>,
        node_to_index: HashMap<NodeId, usize>,
        adjacency: Vec<Vec<usize>>,
    ) -> Self {
        let node_count = index_to_node.len();
        let mut offsets = Vec::with_capacity(node_count + 1);
        let mut targets = Vec::new();

        offsets.push(0);
        for neighbors in adjacency {
            targets.extend(neighbors);
            offsets.push(targets.len());
        }

        GraphView {
            node_count,
            index_to_node,
            node_to_index,
            offsets,
            targets,
        }
    }

    /// Get the degree of a node (by index)
    pub fn degree(&self, idx: usize) -> usize {
        self.offsets[idx + 1] - self.offsets[idx]
    }

    /// Get neighbors of a node (by index)
    pub fn neighbors(&self, idx: usize) -> &[usize] {
        let start = self.offsets[idx];
        let end = self.offsets[idx + 1];
        &self.targets[start..end]
    }

    /// Number of undirected edges in the view
    pub fn edge_count(&self) -> usize {
        self.targets.len() / 2
    }
}
