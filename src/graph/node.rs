//! Node implementation for the vocabulary graph

use super::types::{Category, NodeId};
use serde::{Deserialize, Serialize};

/// A vocabulary term as a graph node
///
/// `importance` and `is_hub` are derived by the builder; a freshly created
/// node carries 0 and `false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Unique, 1-based identifier
    pub id: NodeId,

    /// The term text
    pub label: String,

    /// Free-text details copied from the vocabulary, opaque to the builder
    pub details: String,

    /// Category the term belongs to
    pub category: Category,

    /// Normalized degree score in [1, 100] (50 when all degrees are equal)
    pub importance: u8,

    /// Whether this node is its category's hub
    #[serde(rename = "isHub")]
    pub is_hub: bool,
}

impl Node {
    /// Create a new node with derived fields at their initial values
    pub fn new(
        id: NodeId,
        label: impl Into<String>,
        details: impl Into<String>,
        category: impl Into<Category>,
    ) -> Self {
        Node {
            id,
            label: label.into(),
            details: details.into(),
            category: category.into(),
            importance: 0,
            is_hub: false,
        }
    }

    /// Check if node belongs to a specific category
    pub fn in_category(&self, category: &Category) -> bool {
        &self.category == category
    }
}
