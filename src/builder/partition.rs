//! Category grouping over the enumerated node list

use crate::graph::{Category, Node, NodeId};
use indexmap::IndexMap;
use std::collections::HashMap;

/// Node positions grouped by category.
///
/// A position is an index into the node slice and, equally, a row of the
/// similarity matrix. Groups keep first-seen category order and list
/// positions in ascending order.
#[derive(Debug, Clone, Default)]
pub struct CategoryPartition {
    groups: IndexMap<Category, Vec<usize>>,
    positions: HashMap<NodeId, usize>,
}

impl CategoryPartition {
    pub fn new(nodes: &[Node]) -> Self {
        let mut groups: IndexMap<Category, Vec<usize>> = IndexMap::new();
        let mut positions = HashMap::with_capacity(nodes.len());
        for (pos, node) in nodes.iter().enumerate() {
            groups.entry(node.category.clone()).or_default().push(pos);
            positions.insert(node.id, pos);
        }
        Self { groups, positions }
    }

    /// Non-empty categories with their member positions
    pub fn groups(&self) -> impl Iterator<Item = (&Category, &[usize])> {
        self.groups.iter().map(|(c, p)| (c, p.as_slice()))
    }

    pub fn category_count(&self) -> usize {
        self.groups.len()
    }

    /// Position of a node id, if it belongs to the partitioned slice
    pub fn position(&self, id: NodeId) -> Option<usize> {
        self.positions.get(&id).copied()
    }
}
