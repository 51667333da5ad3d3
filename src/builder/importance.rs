//! Degree-based importance scores

use crate::graph::{Edge, Node, NodeId};
use rustc_hash::FxHashMap;

/// Importance given to every node when all degrees are equal
pub const UNIFORM_IMPORTANCE: u8 = 50;

/// Incident-edge count per node. Every node in `nodes` gets an entry, even
/// with degree 0.
pub fn degree_counts(nodes: &[Node], edges: &[Edge]) -> FxHashMap<NodeId, usize> {
    let mut degrees: FxHashMap<NodeId, usize> = nodes.iter().map(|n| (n.id, 0)).collect();
    for edge in edges {
        *degrees.entry(edge.from).or_insert(0) += 1;
        *degrees.entry(edge.to).or_insert(0) += 1;
    }
    degrees
}

/// Scale degrees onto [1, 100]: `1 + floor((d - min) / (max - min) * 99)`.
/// When every node has the same degree, all scores are 50.
pub fn score_importance(nodes: &mut [Node], degrees: &FxHashMap<NodeId, usize>) {
    let degree_of = |id: NodeId| degrees.get(&id).copied().unwrap_or(0);

    let Some(min) = nodes.iter().map(|n| degree_of(n.id)).min() else {
        return;
    };
    let max = nodes.iter().map(|n| degree_of(n.id)).max().unwrap_or(min);

    for node in nodes.iter_mut() {
        node.importance = if max == min {
            UNIFORM_IMPORTANCE
        } else {
            let scaled = (degree_of(node.id) - min) as f64 / (max - min) as f64 * 99.0;
            1 + scaled as u8
        };
    }
}
