//! Reachability
//!
//! Unweighted breadth-first traversal used to verify connectivity.

use super::common::{GraphView, NodeId};
use std::collections::VecDeque;

/// Breadth-First Search from `source`, returning every reachable node in visit order.
///
/// Returns an empty vector when `source` is not part of the view.
pub fn bfs_reachable(view: &GraphView, source: NodeId) -> Vec<NodeId> {
    let Some(&source_idx) = view.node_to_index.get(&source) else {
        return Vec::new();
    };

    let mut visited = vec![false; view.node_count];
    let mut queue = VecDeque::new();
    let mut reached = Vec::new();

    visited[source_idx] = true;
    queue.push_back(source_idx);

    while let Some(current_idx) = queue.pop_front() {
        reached.push(view.index_to_node[current_idx]);
        for &next_idx in view.neighbors(current_idx) {
            if !visited[next_idx] {
                visited[next_idx] = true;
                queue.push_back(next_idx);
            }
        }
    }

    reached
}

/// True when every node in the view is reachable from the first one.
/// Empty and single-node views are trivially connected.
pub fn is_connected(view: &GraphView) -> bool {
    match view.index_to_node.first() {
        None => true,
        Some(&first) => bfs_reachable(view, first).len() == view.node_count,
    }
}
