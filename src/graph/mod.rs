//! Vocabulary graph data model
//!
//! - Nodes: one per vocabulary term, 1-based dense ids
//! - Edges: undirected links stored as `from -> to` with a visual length
//! - Document: the flat `{nodes, edges}` artifact written by a build

pub mod document;
pub mod edge;
pub mod node;
pub mod types;

// Re-export main types
pub use document::{CategoryStats, GraphDocument, GraphError, GraphResult, GraphStatistics};
pub use edge::{Edge, EdgeKind};
pub use node::Node;
pub use types::{Category, NodeId};
