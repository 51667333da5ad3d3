//! Lexigraph
//!
//! Builds a vocabulary graph for visual exploration: one node per term, edges
//! between semantically similar terms of the same category, a hub per
//! category, and links between hubs of related categories.
//!
//! # Pipeline
//!
//! 1. Vocabulary → nodes (ids 1..=N in file order)
//! 2. One embedding per term
//! 3. Pairwise cosine similarity
//! 4. Same-category edges above the similarity threshold
//! 5. Connectivity repair so every category is one component
//! 6. Degree-based importance
//! 7. Hub selection and cross-category hub links
//!
//! ## Example Usage
//!
//! ```rust
//! use lexigraph::builder::{GraphBuilder, NoopObserver};
//! use lexigraph::config::GraphConfig;
//! use lexigraph::vocab::{TermRecord, Vocabulary};
//! use std::sync::Arc;
//!
//! let mut vocab = Vocabulary::new();
//! vocab.push("network", TermRecord::new("TCP", "reliable transport"));
//! vocab.push("network", TermRecord::new("UDP", "datagram transport"));
//!
//! let builder = GraphBuilder::new(GraphConfig::default())
//!     .unwrap()
//!     .with_observer(Arc::new(NoopObserver));
//! let vectors = vec![vec![1.0, 0.1], vec![1.0, 0.2]];
//! let doc = builder.build_from_vectors(&vocab, &vectors).unwrap();
//!
//! assert_eq!(doc.node_count(), 2);
//! assert_eq!(doc.edge_count(), 1);
//! assert_eq!(doc.hubs().count(), 1);
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod builder;
pub mod config;
pub mod embed;
pub mod flashcard;
pub mod graph;
pub mod http;
pub mod vocab;

// Re-export main types for convenience
pub use builder::{BuildError, BuildObserver, BuildResult, GraphBuilder, TracingObserver};
pub use config::{AppConfig, ConfigError, EmbeddingConfig, GraphConfig, ServerConfig};
pub use embed::{EmbedError, EmbeddingClient, EmbeddingProvider, LLMProvider, PrecomputedEmbeddings};
pub use flashcard::{Flashcard, FlashcardError, FlashcardStore, FlashcardWord};
pub use graph::{Category, Edge, EdgeKind, GraphDocument, GraphError, Node, NodeId};
pub use http::{AppState, HttpServer};
pub use vocab::{TermRecord, VocabError, Vocabulary};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
