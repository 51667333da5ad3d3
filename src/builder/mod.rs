//! Graph construction pipeline
//!
//! Stages, each consuming the previous stage's output:
//!
//! 1. enumerate nodes from the vocabulary (ids 1..=N)
//! 2. embed every term with one provider call
//! 3. cosine similarity matrix, computed once and shared by every stage below
//! 4. same-category edges above the similarity threshold
//! 5. connectivity repair (rescue edges) per category
//! 6. importance from degree, before hub links exist
//! 7. one hub per category (highest degree, lowest id on ties)
//! 8. hub links across categories above the hub threshold
//!
//! A build is all-or-nothing: any failure returns an error and no document.

pub mod edges;
pub mod hubs;
pub mod importance;
pub mod length;
pub mod observer;
pub mod partition;
pub mod repair;

use crate::config::{ConfigError, GraphConfig};
use crate::embed::{EmbedError, EmbeddingProvider};
use crate::graph::{Edge, GraphDocument, Node, NodeId};
use crate::vocab::Vocabulary;
use lexigraph_algorithms::{cosine_similarity_matrix, SimilarityError, SimilarityMatrix};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::info;

pub use edges::intra_category_edges;
pub use hubs::{link_hubs, select_hubs, HubLink};
pub use importance::{degree_counts, score_importance, UNIFORM_IMPORTANCE};
pub use length::edge_length;
pub use observer::{BuildObserver, BuildStage, NoopObserver, StageReport, TracingObserver};
pub use partition::CategoryPartition;
pub use repair::{repair_connectivity, RescueLink};

/// Build errors
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Embedding failed: {0}")]
    Embed(#[from] EmbedError),

    #[error("Similarity computation failed: {0}")]
    Similarity(#[from] SimilarityError),

    #[error("Similarity matrix covers {matrix} terms but the graph has {nodes} nodes")]
    MatrixSize { matrix: usize, nodes: usize },

    #[error("Invariant violated: {0}")]
    InvariantViolation(String),
}

pub type BuildResult<T> = Result<T, BuildError>;

/// Runs the pipeline with one immutable configuration
pub struct GraphBuilder {
    config: GraphConfig,
    observer: Arc<dyn BuildObserver>,
}

impl GraphBuilder {
    /// Create a builder; the configuration is validated up front
    pub fn new(config: GraphConfig) -> BuildResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            observer: Arc::new(TracingObserver),
        })
    }

    pub fn with_observer(mut self, observer: Arc<dyn BuildObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Full build: enumerate, embed through `provider`, then construct the graph
    pub async fn build(
        &self,
        vocab: &Vocabulary,
        provider: &dyn EmbeddingProvider,
    ) -> BuildResult<GraphDocument> {
        let nodes = self.enumerate(vocab);
        let terms = vocab.term_list();

        let started = Instant::now();
        let vectors = if terms.is_empty() {
            Vec::new()
        } else {
            info!("Embedding {} terms with provider '{}'", terms.len(), provider.name());
            provider.embed(&terms).await?
        };
        check_vector_count(terms.len(), vectors.len())?;
        self.report(BuildStage::Embedding, nodes.len(), 0, vectors.len(), started);

        self.build_from_embeddings(nodes, &vectors)
    }

    /// Build from vectors already aligned with the vocabulary's enumeration order
    pub fn build_from_vectors(&self, vocab: &Vocabulary, vectors: &[Vec<f32>]) -> BuildResult<GraphDocument> {
        let nodes = self.enumerate(vocab);
        check_vector_count(nodes.len(), vectors.len())?;
        self.build_from_embeddings(nodes, vectors)
    }

    /// Stages 4-8 over `nodes`, where node at position `i` is row `i` of `matrix`
    pub fn build_with_similarity(
        &self,
        mut nodes: Vec<Node>,
        matrix: &SimilarityMatrix,
    ) -> BuildResult<GraphDocument> {
        if matrix.len() != nodes.len() {
            return Err(BuildError::MatrixSize {
                matrix: matrix.len(),
                nodes: nodes.len(),
            });
        }

        let partition = CategoryPartition::new(&nodes);

        let started = Instant::now();
        let mut edges = intra_category_edges(&nodes, &partition, matrix, &self.config);
        self.report(BuildStage::IntraCategoryEdges, nodes.len(), edges.len(), edges.len(), started);

        let started = Instant::now();
        let rescues = repair_connectivity(&nodes, &partition, &mut edges, matrix, &self.config)?;
        for link in &rescues {
            self.observer.on_rescue(link);
        }
        self.report(BuildStage::ConnectivityRepair, nodes.len(), edges.len(), rescues.len(), started);

        // Importance and hubs read the degree before hub links are added
        let started = Instant::now();
        let degrees = degree_counts(&nodes, &edges);
        score_importance(&mut nodes, &degrees);
        self.report(BuildStage::Importance, nodes.len(), edges.len(), 0, started);

        let started = Instant::now();
        let hubs = select_hubs(&mut nodes, &partition, &degrees);
        for &pos in &hubs {
            self.observer.on_hub_selected(&nodes[pos]);
        }
        self.report(BuildStage::HubSelection, nodes.len(), edges.len(), hubs.len(), started);

        let started = Instant::now();
        let links = link_hubs(&nodes, &hubs, matrix, &self.config);
        for link in &links {
            if let (Some(a), Some(b)) = (partition.position(link.edge.from), partition.position(link.edge.to)) {
                self.observer.on_hub_link(&nodes[a], &nodes[b], link);
            }
        }
        let added = links.len();
        edges.extend(links.into_iter().map(|l| l.edge));
        self.report(BuildStage::HubLinking, nodes.len(), edges.len(), added, started);

        check_edges(&partition, &edges)?;
        Ok(GraphDocument::new(nodes, edges))
    }

    fn enumerate(&self, vocab: &Vocabulary) -> Vec<Node> {
        let started = Instant::now();
        let nodes = vocab.enumerate_nodes();
        self.report(BuildStage::Nodes, nodes.len(), 0, nodes.len(), started);
        nodes
    }

    fn build_from_embeddings(&self, nodes: Vec<Node>, vectors: &[Vec<f32>]) -> BuildResult<GraphDocument> {
        let started = Instant::now();
        let matrix = cosine_similarity_matrix(vectors)?;
        self.report(BuildStage::Similarity, nodes.len(), 0, matrix.len(), started);

        self.build_with_similarity(nodes, &matrix)
    }

    fn report(&self, stage: BuildStage, nodes: usize, edges: usize, added: usize, started: Instant) {
        self.observer.on_stage_complete(&StageReport {
            stage,
            nodes,
            edges,
            added,
            elapsed: started.elapsed(),
        });
    }
}

fn check_vector_count(expected: usize, got: usize) -> BuildResult<()> {
    if expected != got {
        return Err(EmbedError::CountMismatch { expected, got }.into());
    }
    Ok(())
}

/// Every edge joins two known, distinct nodes, and no unordered pair repeats
fn check_edges(partition: &CategoryPartition, edges: &[Edge]) -> BuildResult<()> {
    let mut seen: HashSet<(NodeId, NodeId)> = HashSet::with_capacity(edges.len());
    for edge in edges {
        if partition.position(edge.from).is_none() || partition.position(edge.to).is_none() {
            return Err(BuildError::InvariantViolation(format!(
                "edge {} -> {} references an unknown node",
                edge.from, edge.to
            )));
        }
        if edge.from == edge.to {
            return Err(BuildError::InvariantViolation(format!("self-loop on {}", edge.from)));
        }
        if !seen.insert(edge.key()) {
            return Err(BuildError::InvariantViolation(format!(
                "duplicate edge between {} and {}",
                edge.from, edge.to
            )));
        }
    }
    Ok(())
}
