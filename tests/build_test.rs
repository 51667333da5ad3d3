//! Graph construction properties over whole builds

use lexigraph::builder::{edge_length, GraphBuilder, NoopObserver};
use lexigraph::config::GraphConfig;
use lexigraph::graph::{Category, EdgeKind, GraphDocument, Node, NodeId};
use lexigraph::vocab::{TermRecord, Vocabulary};
use lexigraph_algorithms::{is_connected, GraphView, SimilarityMatrix};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use std::sync::Arc;

fn builder(config: GraphConfig) -> GraphBuilder {
    GraphBuilder::new(config)
        .unwrap()
        .with_observer(Arc::new(NoopObserver))
}

fn random_vocab(rng: &mut StdRng) -> Vocabulary {
    let mut vocab = Vocabulary::new();
    for c in 0..6 {
        let category = format!("category-{}", c);
        vocab.add_category(category.clone());
        // category-2 stays empty
        let size = if c == 2 { 0 } else { rng.gen_range(1..10) };
        for t in 0..size {
            vocab.push(category.clone(), TermRecord::new(format!("term-{}-{}", c, t), ""));
        }
    }
    vocab
}

fn random_vectors(rng: &mut StdRng, count: usize) -> Vec<Vec<f32>> {
    (0..count)
        .map(|_| {
            let mut v: Vec<f32> = (0..8).map(|_| rng.gen_range(-1.0..1.0)).collect();
            v[0] += 2.0;
            v
        })
        .collect()
}

fn random_build(seed: u64, config: GraphConfig) -> (Vocabulary, GraphDocument) {
    let mut rng = StdRng::seed_from_u64(seed);
    let vocab = random_vocab(&mut rng);
    let vectors = random_vectors(&mut rng, vocab.term_count());
    let doc = builder(config).build_from_vectors(&vocab, &vectors).unwrap();
    (vocab, doc)
}

fn category_of(doc: &GraphDocument) -> HashMap<NodeId, Category> {
    doc.nodes.iter().map(|n| (n.id, n.category.clone())).collect()
}

#[test]
fn test_build_is_deterministic() {
    for seed in 0..5 {
        let (_, first) = random_build(seed, GraphConfig::default());
        let (_, second) = random_build(seed, GraphConfig::default());
        assert_eq!(first.to_json_pretty().unwrap(), second.to_json_pretty().unwrap());
    }
}

#[test]
fn test_node_ids_dense_and_ordered() {
    let (vocab, doc) = random_build(7, GraphConfig::default());
    assert_eq!(doc.node_count(), vocab.term_count());
    for (i, node) in doc.nodes.iter().enumerate() {
        assert_eq!(node.id, NodeId::new(i as u64 + 1));
    }
}

#[test]
fn test_every_category_connected() {
    // A high threshold leaves many islands for the repair stage
    for seed in 0..10 {
        let (_, doc) = random_build(seed, GraphConfig::default().with_similarity_threshold(0.95));
        let categories = category_of(&doc);

        let mut members: HashMap<&Category, Vec<u64>> = HashMap::new();
        for node in &doc.nodes {
            members.entry(&node.category).or_default().push(node.id.as_u64());
        }

        for (category, ids) in members {
            let edges = doc
                .edges
                .iter()
                .filter(|e| e.kind != EdgeKind::HubLink)
                .filter(|e| &categories[&e.from] == category && &categories[&e.to] == category)
                .map(|e| (e.from.as_u64(), e.to.as_u64()));
            let view = GraphView::undirected(&ids, edges);
            assert!(is_connected(&view), "seed {} category {} is split", seed, category);
        }
    }
}

#[test]
fn test_importance_bounds() {
    for seed in 0..10 {
        let (_, doc) = random_build(seed, GraphConfig::default());
        for node in &doc.nodes {
            assert!((1..=100).contains(&node.importance), "importance {}", node.importance);
        }
    }
}

#[test]
fn test_hub_uniqueness() {
    for seed in 0..10 {
        let (vocab, doc) = random_build(seed, GraphConfig::default());
        for (category, terms) in vocab.categories() {
            let hubs = doc
                .nodes
                .iter()
                .filter(|n| n.category.as_str() == category && n.is_hub)
                .count();
            assert_eq!(hubs, usize::from(!terms.is_empty()), "category {}", category);
        }
    }
}

#[test]
fn test_edge_kinds_respect_categories() {
    for seed in 0..10 {
        let (_, doc) = random_build(seed, GraphConfig::default().with_hub_similarity_threshold(0.0));
        let categories = category_of(&doc);
        let hubs: Vec<NodeId> = doc.hubs().map(|n| n.id).collect();

        for edge in &doc.edges {
            assert!(edge.length > 0);
            match edge.kind {
                EdgeKind::Similarity | EdgeKind::Rescue => {
                    assert_eq!(categories[&edge.from], categories[&edge.to]);
                    assert!(edge.from < edge.to);
                }
                EdgeKind::HubLink => {
                    assert_ne!(categories[&edge.from], categories[&edge.to]);
                    assert!(hubs.contains(&edge.from) && hubs.contains(&edge.to));
                }
            }
        }
    }
}

/// network: A, B, C, D; security: E
fn scenario_nodes() -> Vec<Node> {
    vec![
        Node::new(NodeId::new(1), "A", "", "network"),
        Node::new(NodeId::new(2), "B", "", "network"),
        Node::new(NodeId::new(3), "C", "", "network"),
        Node::new(NodeId::new(4), "D", "", "network"),
        Node::new(NodeId::new(5), "E", "", "security"),
    ]
}

fn scenario_matrix() -> SimilarityMatrix {
    SimilarityMatrix::from_fn(5, |i, j| match (i, j) {
        (0, 1) => 0.9,
        (2, 3) => 0.8,
        (1, 2) => 0.5,
        (1, 4) => 0.85,
        _ => 0.2,
    })
}

#[test]
fn test_two_islands_joined_by_one_rescue_edge() {
    let config = GraphConfig::default();
    let doc = builder(config.clone())
        .build_with_similarity(scenario_nodes(), &scenario_matrix())
        .unwrap();

    let network: Vec<_> = doc
        .edges
        .iter()
        .filter(|e| e.kind != EdgeKind::HubLink)
        .collect();
    assert_eq!(network.len(), 3);

    let rescue: Vec<_> = network.iter().filter(|e| e.kind == EdgeKind::Rescue).collect();
    assert_eq!(rescue.len(), 1);
    assert!(rescue[0].connects(NodeId::new(2), NodeId::new(3)));
    assert_eq!(rescue[0].length, edge_length(0.5, 0.0, &config));
    assert_eq!(rescue[0].length, 125);
}

#[test]
fn test_single_node_category_and_hub_link() {
    let config = GraphConfig::default();
    let doc = builder(config.clone())
        .build_with_similarity(scenario_nodes(), &scenario_matrix())
        .unwrap();

    let e = doc.node(NodeId::new(5)).unwrap();
    assert!(e.is_hub);
    assert!(!doc.edges.iter().any(|edge| edge.touches(e.id) && edge.kind != EdgeKind::HubLink));

    // B and C both have degree 2; the lower id wins
    let hubs: Vec<&str> = doc.hubs().map(|n| n.label.as_str()).collect();
    assert_eq!(hubs, vec!["B", "E"]);

    let links: Vec<_> = doc.edges.iter().filter(|e| e.kind == EdgeKind::HubLink).collect();
    assert_eq!(links.len(), 1);
    assert!(links[0].connects(NodeId::new(2), NodeId::new(5)));
    assert_eq!(links[0].length, edge_length(0.85, 0.70, &config));

    // Degrees before hub links: A=1 B=2 C=2 D=1 E=0
    let importance: Vec<u8> = doc.nodes.iter().map(|n| n.importance).collect();
    assert_eq!(importance, vec![50, 100, 100, 50, 1]);
}

#[test]
fn test_uniform_degree_gives_uniform_importance() {
    let nodes = vec![
        Node::new(NodeId::new(1), "a", "", "x"),
        Node::new(NodeId::new(2), "b", "", "y"),
        Node::new(NodeId::new(3), "c", "", "z"),
    ];
    let matrix = SimilarityMatrix::from_fn(3, |_, _| 0.1);
    let doc = builder(GraphConfig::default())
        .build_with_similarity(nodes, &matrix)
        .unwrap();

    assert!(doc.edges.is_empty());
    assert!(doc.nodes.iter().all(|n| n.importance == 50 && n.is_hub));
}

#[test]
fn test_document_json_shape() {
    let doc = builder(GraphConfig::default())
        .build_with_similarity(scenario_nodes(), &scenario_matrix())
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&doc.to_json_pretty().unwrap()).unwrap();

    let node = value["nodes"][1].as_object().unwrap();
    let mut keys: Vec<_> = node.keys().map(String::as_str).collect();
    keys.sort();
    assert_eq!(keys, vec!["category", "details", "id", "importance", "isHub", "label"]);
    assert_eq!(node["isHub"], serde_json::json!(true));

    let edge = value["edges"][0].as_object().unwrap();
    let mut keys: Vec<_> = edge.keys().map(String::as_str).collect();
    keys.sort();
    assert_eq!(keys, vec!["from", "length", "to"]);
}

#[test]
fn test_saved_document_round_trips() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("data.json");
    let (_, doc) = random_build(3, GraphConfig::default());

    doc.save(&path).unwrap();
    let loaded = GraphDocument::load(&path).unwrap();
    assert_eq!(loaded.nodes, doc.nodes);
    assert_eq!(loaded.edge_count(), doc.edge_count());
}
