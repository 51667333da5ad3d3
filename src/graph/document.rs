//! The flat node/edge document produced by a build and read by the server

use super::edge::Edge;
use super::node::Node;
use super::types::{Category, NodeId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::info;

/// Document I/O errors
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed graph document: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type GraphResult<T> = Result<T, GraphError>;

/// `{ "nodes": [...], "edges": [...] }`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphDocument {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

/// Per-category summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryStats {
    pub category: Category,
    pub nodes: usize,
    /// Edges with both endpoints in this category
    pub edges: usize,
    /// Label of the category hub, if one has been designated
    pub hub: Option<String>,
}

/// Whole-document summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphStatistics {
    pub node_count: usize,
    pub edge_count: usize,
    pub cross_category_edges: usize,
    pub categories: Vec<CategoryStats>,
}

impl GraphDocument {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    /// Read a document from a JSON file
    pub fn load(path: impl AsRef<Path>) -> GraphResult<Self> {
        let raw = fs::read_to_string(path.as_ref())?;
        let document: GraphDocument = serde_json::from_str(&raw)?;
        info!(
            "Loaded graph document from {:?} ({} nodes, {} edges)",
            path.as_ref(),
            document.nodes.len(),
            document.edges.len()
        );
        Ok(document)
    }

    /// Write the document as pretty-printed JSON.
    ///
    /// Readers never observe a half-written document; see [`write_atomically`].
    pub fn save(&self, path: impl AsRef<Path>) -> GraphResult<()> {
        let path = path.as_ref();
        let json = self.to_json_pretty()?;
        write_atomically(path, json.as_bytes())?;

        info!("Saved graph document to {:?}", path);
        Ok(())
    }

    pub fn to_json_pretty(&self) -> GraphResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Look up a node by id
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        // Ids are dense and 1-based, so try the direct slot first
        let slot = (id.as_u64() as usize).checked_sub(1);
        match slot.and_then(|i| self.nodes.get(i)) {
            Some(node) if node.id == id => Some(node),
            _ => self.nodes.iter().find(|n| n.id == id),
        }
    }

    /// Nodes whose id is in `ids`, in document order. Unknown ids are ignored.
    pub fn nodes_by_ids(&self, ids: &[NodeId]) -> Vec<&Node> {
        let wanted: HashSet<NodeId> = ids.iter().copied().collect();
        self.nodes.iter().filter(|n| wanted.contains(&n.id)).collect()
    }

    /// Hub nodes in document order
    pub fn hubs(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| n.is_hub)
    }

    pub fn stats(&self) -> GraphStatistics {
        let mut categories: IndexMap<&Category, CategoryStats> = IndexMap::new();
        for node in &self.nodes {
            let entry = categories.entry(&node.category).or_insert_with(|| CategoryStats {
                category: node.category.clone(),
                nodes: 0,
                edges: 0,
                hub: None,
            });
            entry.nodes += 1;
            if node.is_hub {
                entry.hub = Some(node.label.clone());
            }
        }

        let mut cross_category_edges = 0;
        for edge in &self.edges {
            let (Some(from), Some(to)) = (self.node(edge.from), self.node(edge.to)) else {
                continue;
            };
            if from.category == to.category {
                if let Some(entry) = categories.get_mut(&from.category) {
                    entry.edges += 1;
                }
            } else {
                cross_category_edges += 1;
            }
        }

        GraphStatistics {
            node_count: self.nodes.len(),
            edge_count: self.edges.len(),
            cross_category_edges,
            categories: categories.into_values().collect(),
        }
    }
}

/// Write `contents` to a temp file in `path`'s directory, then rename it over
/// `path`. The temp file is removed if any step fails.
pub(crate) fn write_atomically(path: &Path, contents: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
