//! Vocabulary input
//!
//! `{ "<category>": [ { "term": "...", "details": "..." }, ... ], ... }`
//!
//! Category order and term order are kept exactly as written: node ids are
//! assigned by walking categories, then terms, in that order.

use crate::graph::{Category, Node, NodeId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

/// Vocabulary errors
#[derive(Error, Debug)]
pub enum VocabError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed vocabulary: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Empty term at position {index} in category '{category}'")]
    EmptyTerm { category: String, index: usize },
}

pub type VocabResult<T> = Result<T, VocabError>;

/// A single vocabulary entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermRecord {
    pub term: String,
    #[serde(default)]
    pub details: String,
}

impl TermRecord {
    pub fn new(term: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            details: details.into(),
        }
    }
}

/// Ordered mapping from category name to its terms
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vocabulary {
    categories: IndexMap<String, Vec<TermRecord>>,
}

impl Vocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a term to `category`, creating the category at the end if new
    pub fn push(&mut self, category: impl Into<String>, record: TermRecord) {
        self.categories.entry(category.into()).or_default().push(record);
    }

    /// Add a category with no terms. Empty categories are skipped by the builder.
    pub fn add_category(&mut self, category: impl Into<String>) {
        self.categories.entry(category.into()).or_default();
    }

    /// Parse and validate a JSON vocabulary
    pub fn from_json_str(raw: &str) -> VocabResult<Self> {
        let vocab: Vocabulary = serde_json::from_str(raw)?;
        vocab.validate()?;
        Ok(vocab)
    }

    /// Load a JSON vocabulary file
    pub fn from_path(path: impl AsRef<Path>) -> VocabResult<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let vocab = Self::from_json_str(&raw)?;
        info!(
            "Loaded vocabulary from {:?}: {} categories, {} terms",
            path.as_ref(),
            vocab.category_count(),
            vocab.term_count()
        );
        Ok(vocab)
    }

    /// Blank terms are rejected; duplicate terms only warn, since nodes are
    /// identified by id rather than by label.
    pub fn validate(&self) -> VocabResult<()> {
        let mut seen: HashMap<&str, &str> = HashMap::new();
        for (category, terms) in &self.categories {
            for (index, record) in terms.iter().enumerate() {
                if record.term.trim().is_empty() {
                    return Err(VocabError::EmptyTerm {
                        category: category.clone(),
                        index,
                    });
                }
                if let Some(first) = seen.insert(record.term.as_str(), category.as_str()) {
                    warn!(
                        "Duplicate term '{}' in category '{}' (first seen in '{}')",
                        record.term, category, first
                    );
                }
            }
        }
        Ok(())
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn term_count(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.term_count() == 0
    }

    /// Categories in input order
    pub fn categories(&self) -> impl Iterator<Item = (&str, &[TermRecord])> {
        self.categories.iter().map(|(c, t)| (c.as_str(), t.as_slice()))
    }

    /// Create one node per term, ids starting at 1 in enumeration order
    pub fn enumerate_nodes(&self) -> Vec<Node> {
        let mut nodes = Vec::with_capacity(self.term_count());
        let mut next_id = 1u64;
        for (category, terms) in &self.categories {
            let category = Category::new(category.as_str());
            for record in terms {
                nodes.push(Node::new(
                    NodeId::new(next_id),
                    record.term.as_str(),
                    record.details.as_str(),
                    category.clone(),
                ));
                next_id += 1;
            }
        }
        nodes
    }

    /// Term strings in enumeration order, aligned with `enumerate_nodes`
    pub fn term_list(&self) -> Vec<String> {
        self.categories
            .values()
            .flat_map(|terms| terms.iter().map(|r| r.term.clone()))
            .collect()
    }
}
