//! Stage-boundary hooks for a build

use super::hubs::HubLink;
use super::repair::RescueLink;
use crate::graph::Node;
use std::fmt;
use std::time::Duration;
use tracing::{debug, info};

/// Pipeline stages, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildStage {
    Nodes,
    Embedding,
    Similarity,
    IntraCategoryEdges,
    ConnectivityRepair,
    Importance,
    HubSelection,
    HubLinking,
}

impl BuildStage {
    pub const ALL: [BuildStage; 8] = [
        BuildStage::Nodes,
        BuildStage::Embedding,
        BuildStage::Similarity,
        BuildStage::IntraCategoryEdges,
        BuildStage::ConnectivityRepair,
        BuildStage::Importance,
        BuildStage::HubSelection,
        BuildStage::HubLinking,
    ];

    /// 1-based position in the pipeline
    pub fn step(&self) -> usize {
        BuildStage::ALL.iter().position(|s| s == self).map_or(0, |p| p + 1)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BuildStage::Nodes => "nodes",
            BuildStage::Embedding => "embedding",
            BuildStage::Similarity => "similarity",
            BuildStage::IntraCategoryEdges => "intra-category edges",
            BuildStage::ConnectivityRepair => "connectivity repair",
            BuildStage::Importance => "importance",
            BuildStage::HubSelection => "hub selection",
            BuildStage::HubLinking => "hub linking",
        }
    }
}

impl fmt::Display for BuildStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What a finished stage produced
#[derive(Debug, Clone, PartialEq)]
pub struct StageReport {
    pub stage: BuildStage,
    /// Nodes in the graph so far
    pub nodes: usize,
    /// Edges in the graph so far
    pub edges: usize,
    /// Items this stage added (edges, hubs, vectors...)
    pub added: usize,
    pub elapsed: Duration,
}

/// Receives progress as a build moves through its stages.
///
/// Observers never influence the result.
pub trait BuildObserver: Send + Sync {
    fn on_stage_complete(&self, report: &StageReport);

    fn on_rescue(&self, _link: &RescueLink) {}

    fn on_hub_selected(&self, _hub: &Node) {}

    fn on_hub_link(&self, _from: &Node, _to: &Node, _link: &HubLink) {}
}

/// Logs every stage through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl BuildObserver for TracingObserver {
    fn on_stage_complete(&self, report: &StageReport) {
        info!(
            "Step {}/{}: {} done in {:?} (+{}, {} nodes, {} edges)",
            report.stage.step(),
            BuildStage::ALL.len(),
            report.stage,
            report.elapsed,
            report.added,
            report.nodes,
            report.edges
        );
    }

    fn on_rescue(&self, link: &RescueLink) {
        debug!(
            "  - rescue in '{}': {} <-> {} (similarity {:.2}, island of {})",
            link.category, link.island, link.main, link.similarity, link.island_size
        );
    }

    fn on_hub_selected(&self, hub: &Node) {
        info!("  - hub of '{}': {}", hub.category, hub.label);
    }

    fn on_hub_link(&self, from: &Node, to: &Node, link: &HubLink) {
        info!("  - hub link: {} <-> {} (similarity {:.2})", from.label, to.label, link.similarity);
    }
}

/// Ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl BuildObserver for NoopObserver {
    fn on_stage_complete(&self, _report: &StageReport) {}
}
