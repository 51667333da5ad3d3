//! Per-category connectivity repair
//!
//! After the similarity edges are in, a category may fall apart into several
//! components. The largest component becomes the main one; every other
//! component (an island) gets exactly one rescue edge to it, chosen as the
//! most similar (island node, main node) pair regardless of the similarity
//! threshold. The island then joins the main membership so later islands can
//! attach through it.

use super::length::edge_length;
use super::partition::CategoryPartition;
use super::{BuildError, BuildResult};
use crate::config::GraphConfig;
use crate::graph::{Category, Edge, EdgeKind, Node, NodeId};
use lexigraph_algorithms::{connected_components, GraphView, SimilarityMatrix};
use tracing::debug;

/// Rescue links use no similarity floor
const RESCUE_THRESHOLD: f64 = 0.0;

/// One rescue edge and why it was chosen
#[derive(Debug, Clone, PartialEq)]
pub struct RescueLink {
    pub category: Category,
    pub island: NodeId,
    pub main: NodeId,
    pub similarity: f64,
    /// Number of nodes the island brought into the main component
    pub island_size: usize,
}

/// Add rescue edges so every category is connected using same-category edges.
///
/// Returns the links added, in category order then island discovery order.
pub fn repair_connectivity(
    nodes: &[Node],
    partition: &CategoryPartition,
    edges: &mut Vec<Edge>,
    matrix: &SimilarityMatrix,
    config: &GraphConfig,
) -> BuildResult<Vec<RescueLink>> {
    let mut rescues = Vec::new();

    for (category, members) in partition.groups() {
        if members.len() <= 1 {
            continue;
        }

        let ids: Vec<u64> = members.iter().map(|&p| nodes[p].id.as_u64()).collect();
        // Only edges with both endpoints in this category survive the projection
        let view = GraphView::undirected(&ids, edges.iter().map(|e| (e.from.as_u64(), e.to.as_u64())));
        let components = connected_components(&view);
        if components.len() <= 1 {
            continue;
        }

        let main_idx = components
            .largest()
            .ok_or_else(|| BuildError::InvariantViolation(format!("category '{}' has no components", category)))?;

        let to_positions = |component: &[u64]| -> BuildResult<Vec<usize>> {
            let mut positions = component
                .iter()
                .map(|&id| {
                    partition.position(NodeId::new(id)).ok_or_else(|| {
                        BuildError::InvariantViolation(format!("node {} missing from partition", id))
                    })
                })
                .collect::<BuildResult<Vec<usize>>>()?;
            positions.sort_unstable();
            Ok(positions)
        };

        let mut main = to_positions(&components.components[main_idx])?;
        debug!(
            "Category '{}' has {} components; main component holds {} of {} nodes",
            category,
            components.len(),
            main.len(),
            members.len()
        );

        for (idx, island) in components.components.iter().enumerate() {
            if idx == main_idx {
                continue;
            }
            let island = to_positions(island)?;

            let (island_pos, main_pos, similarity) = best_pair(&island, &main, matrix).ok_or_else(|| {
                BuildError::InvariantViolation(format!(
                    "no rescue pair between island of {} and main component of {} in category '{}'",
                    island.len(),
                    main.len(),
                    category
                ))
            })?;

            let (a, b) = (nodes[island_pos].id, nodes[main_pos].id);
            let (from, to) = if a < b { (a, b) } else { (b, a) };
            edges.push(Edge::new(
                from,
                to,
                edge_length(similarity, RESCUE_THRESHOLD, config),
                EdgeKind::Rescue,
            ));

            rescues.push(RescueLink {
                category: category.clone(),
                island: a,
                main: b,
                similarity,
                island_size: island.len(),
            });

            main.extend_from_slice(&island);
            main.sort_unstable();
        }
    }

    Ok(rescues)
}

/// Most similar (island, main) pair.
///
/// Both slices are ascending, and only a strictly greater similarity replaces
/// the current best, so ties resolve to the lowest (island, main) position pair.
fn best_pair(island: &[usize], main: &[usize], matrix: &SimilarityMatrix) -> Option<(usize, usize, f64)> {
    let mut best: Option<(usize, usize, f64)> = None;
    for &i in island {
        for &m in main {
            let similarity = matrix.get(i, m);
            match best {
                Some((_, _, s)) if similarity <= s => {}
                _ => best = Some((i, m, similarity)),
            }
        }
    }
    best
}
