//! Connected components
//!
//! Breadth-first component discovery over an undirected [`GraphView`].

use super::common::{GraphView, NodeId};
use std::collections::{HashMap, VecDeque};

/// Result of connected component discovery
#[derive(Debug, Clone)]
pub struct ComponentsResult {
    /// Components in discovery order; members in BFS visit order
    pub components: Vec<Vec<NodeId>>,
    /// Map of NodeId -> position in `components`
    pub node_component: HashMap<NodeId, usize>,
}

impl ComponentsResult {
    /// Number of components found
    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Index of the largest component. Ties go to the component discovered first.
    pub fn largest(&self) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (idx, component) in self.components.iter().enumerate() {
            match best {
                Some(b) if self.components[b].len() >= component.len() => {}
                _ => best = Some(idx),
            }
        }
        best
    }
}

/// Connected Components (BFS)
///
/// Nodes are scanned in dense index order; each node not yet visited seeds a
/// new component which is expanded with an explicit frontier queue until the
/// frontier empties. Iterative, so deep graphs cannot overflow the stack.
pub fn connected_components(view: &GraphView) -> ComponentsResult {
    let n = view.node_count;
    let mut visited = vec![false; n];
    let mut frontier = VecDeque::new();

    let mut components = Vec::new();
    let mut node_component = HashMap::with_capacity(n);

    for seed in 0..n {
        if visited[seed] {
            continue;
        }

        let component_id = components.len();
        let mut members = Vec::new();

        visited[seed] = true;
        frontier.push_back(seed);

        while let Some(current) = frontier.pop_front() {
            let node_id = view.index_to_node[current];
            members.push(node_id);
            node_component.insert(node_id, component_id);

            for &next in view.neighbors(current) {
                if !visited[next] {
                    visited[next] = true;
                    frontier.push_back(next);
                }
            }
        }

        components.push(members);
    }

    ComponentsResult {
        components,
        node_component,
    }
}
