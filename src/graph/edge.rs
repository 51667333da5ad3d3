//! Edge implementation for the vocabulary graph
//!
//! Edges are stored as `from -> to` but are semantically undirected.

use super::types::NodeId;
use serde::{Deserialize, Serialize};

/// How an edge came to exist. Not part of the serialized document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EdgeKind {
    /// Same-category pair above the similarity threshold
    #[default]
    Similarity,
    /// Connectivity repair link between an island and the main component
    Rescue,
    /// Cross-category link between two hubs
    HubLink,
}

/// An edge in the vocabulary graph.
///
/// Equality covers the serialized fields only; `kind` does not survive a
/// save/load cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    /// Source node
    pub from: NodeId,

    /// Target node
    pub to: NodeId,

    /// Visual distance; shorter means more similar
    pub length: u32,

    #[serde(skip)]
    pub kind: EdgeKind,
}

impl Edge {
    pub fn new(from: NodeId, to: NodeId, length: u32, kind: EdgeKind) -> Self {
        Edge {
            from,
            to,
            length,
            kind,
        }
    }

    /// Check if this edge connects two specific nodes (in either direction)
    pub fn connects(&self, node1: NodeId, node2: NodeId) -> bool {
        (self.from == node1 && self.to == node2) || (self.from == node2 && self.to == node1)
    }

    /// Check if this edge touches a node
    pub fn touches(&self, node: NodeId) -> bool {
        self.from == node || self.to == node
    }

    /// The unordered endpoint pair, smaller id first
    pub fn key(&self) -> (NodeId, NodeId) {
        if self.from <= self.to {
            (self.from, self.to)
        } else {
            (self.to, self.from)
        }
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from && self.to == other.to && self.length == other.length
    }
}

impl Eq for Edge {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_connects_either_direction() {
        let edge = Edge::new(NodeId::new(4), NodeId::new(2), 120, EdgeKind::Similarity);
        assert!(edge.connects(NodeId::new(2), NodeId::new(4)));
        assert!(edge.connects(NodeId::new(4), NodeId::new(2)));
        assert!(!edge.connects(NodeId::new(2), NodeId::new(3)));
        assert!(edge.touches(NodeId::new(4)));
        assert_eq!(edge.key(), (NodeId::new(2), NodeId::new(4)));
    }

    #[test]
    fn test_kind_is_not_serialized() {
        let edge = Edge::new(NodeId::new(1), NodeId::new(2), 50, EdgeKind::Rescue);
        let json = serde_json::to_value(&edge).unwrap();
        assert_eq!(json, serde_json::json!({ "from": 1, "to": 2, "length": 50 }));

        let back: Edge = serde_json::from_value(json).unwrap();
        assert_eq!(back.kind, EdgeKind::Similarity);
        assert_eq!(back, edge);
    }

    #[test]
    fn test_equality_ignores_kind() {
        let a = Edge::new(NodeId::new(1), NodeId::new(3), 190, EdgeKind::HubLink);
        assert_eq!(a, Edge::new(NodeId::new(1), NodeId::new(3), 190, EdgeKind::Similarity));
        assert_ne!(a, Edge::new(NodeId::new(1), NodeId::new(3), 191, EdgeKind::HubLink));
        assert_ne!(a, Edge::new(NodeId::new(3), NodeId::new(1), 190, EdgeKind::HubLink));
    }
}
