//! Hub selection and cross-category hub links

use super::length::edge_length;
use super::partition::CategoryPartition;
use crate::config::GraphConfig;
use crate::graph::{Edge, EdgeKind, Node, NodeId};
use lexigraph_algorithms::SimilarityMatrix;
use rustc_hash::FxHashMap;

/// Mark the highest-degree node of each non-empty category as its hub.
///
/// Ties go to the lowest node id. Returns hub positions in category order.
pub fn select_hubs(
    nodes: &mut [Node],
    partition: &CategoryPartition,
    degrees: &FxHashMap<NodeId, usize>,
) -> Vec<usize> {
    let mut hubs = Vec::with_capacity(partition.category_count());

    for (_, members) in partition.groups() {
        let mut best: Option<(usize, usize)> = None;
        for &pos in members {
            let degree = degrees.get(&nodes[pos].id).copied().unwrap_or(0);
            let replace = match best {
                None => true,
                Some((best_pos, best_degree)) => {
                    degree > best_degree || (degree == best_degree && nodes[pos].id < nodes[best_pos].id)
                }
            };
            if replace {
                best = Some((pos, degree));
            }
        }

        if let Some((pos, _)) = best {
            nodes[pos].is_hub = true;
            hubs.push(pos);
        }
    }

    hubs
}

/// A hub link together with the similarity that justified it
#[derive(Debug, Clone, PartialEq)]
pub struct HubLink {
    pub edge: Edge,
    pub similarity: f64,
}

/// Link every pair of hubs from different categories whose similarity
/// exceeds `config.hub_similarity_threshold`. No cross-category connectivity
/// is promised.
pub fn link_hubs(
    nodes: &[Node],
    hubs: &[usize],
    matrix: &SimilarityMatrix,
    config: &GraphConfig,
) -> Vec<HubLink> {
    let threshold = config.hub_similarity_threshold;
    let mut links = Vec::new();

    for (a, &i) in hubs.iter().enumerate() {
        for &j in &hubs[a + 1..] {
            if nodes[i].category == nodes[j].category {
                continue;
            }
            let similarity = matrix.get(i, j);
            if similarity > threshold {
                links.push(HubLink {
                    edge: Edge::new(
                        nodes[i].id,
                        nodes[j].id,
                        edge_length(similarity, threshold, config),
                        EdgeKind::HubLink,
                    ),
                    similarity,
                });
            }
        }
    }

    links
}
