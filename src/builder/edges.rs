//! Same-category similarity edges

use super::length::edge_length;
use super::partition::CategoryPartition;
use crate::config::GraphConfig;
use crate::graph::{Edge, EdgeKind, Node};
use lexigraph_algorithms::SimilarityMatrix;

/// Link every same-category pair whose similarity exceeds
/// `config.similarity_threshold`.
///
/// Each unordered pair is visited once (`i < j`), so no pair is linked twice.
/// Cross-category pairs are never considered here. `from` is always the
/// earlier node.
pub fn intra_category_edges(
    nodes: &[Node],
    partition: &CategoryPartition,
    matrix: &SimilarityMatrix,
    config: &GraphConfig,
) -> Vec<Edge> {
    let threshold = config.similarity_threshold;
    let mut edges = Vec::new();

    for (_, members) in partition.groups() {
        for (a, &i) in members.iter().enumerate() {
            for &j in &members[a + 1..] {
                let similarity = matrix.get(i, j);
                if similarity > threshold {
                    edges.push(Edge::new(
                        nodes[i].id,
                        nodes[j].id,
                        edge_length(similarity, threshold, config),
                        EdgeKind::Similarity,
                    ));
                }
            }
        }
    }

    edges
}
