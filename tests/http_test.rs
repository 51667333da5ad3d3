//! In-process tests of the HTTP routes

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use lexigraph::flashcard::FlashcardStore;
use lexigraph::graph::{Edge, EdgeKind, GraphDocument, Node, NodeId};
use lexigraph::http::{router, AppState};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

fn graph() -> GraphDocument {
    let mut tcp = Node::new(NodeId::new(1), "TCP", "transport", "network");
    tcp.is_hub = true;
    tcp.importance = 100;
    let mut udp = Node::new(NodeId::new(2), "UDP", "datagram", "network");
    udp.importance = 1;
    let mut aes = Node::new(NodeId::new(3), "AES", "cipher", "security");
    aes.is_hub = true;
    aes.importance = 1;
    GraphDocument::new(
        vec![tcp, udp, aes],
        vec![Edge::new(NodeId::new(1), NodeId::new(2), 80, EdgeKind::Similarity)],
    )
}

fn app(dir: &TempDir) -> Router {
    let store = FlashcardStore::open(dir.path().join("flashcards.json"));
    router(AppState::new(graph(), store), None)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn test_data_returns_document() {
    let dir = TempDir::new().unwrap();
    let (status, body) = send(&app(&dir), "GET", "/api/data", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::to_value(graph()).unwrap());
    assert_eq!(body["edges"][0], json!({"from": 1, "to": 2, "length": 80}));
}

#[tokio::test]
async fn test_data_is_document_bytes() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir);

    for _ in 0..2 {
        let request = Request::builder().uri("/api/data").body(Body::empty()).unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.headers()["content-type"], "application/json");
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], serde_json::to_vec(&graph()).unwrap().as_slice());
    }
}

#[tokio::test]
async fn test_nodes_filter_by_id() {
    let dir = TempDir::new().unwrap();
    let (status, body) = send(&app(&dir), "POST", "/api/nodes", Some(json!({"ids": [3, 1, 42]}))).await;

    assert_eq!(status, StatusCode::OK);
    let labels: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["label"].as_str().unwrap())
        .collect();
    assert_eq!(labels, vec!["TCP", "AES"]);
}

#[tokio::test]
async fn test_flashcard_lifecycle() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir);

    let (status, body) = send(&app, "GET", "/api/flashcards", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, created) = send(
        &app,
        "POST",
        "/api/flashcards",
        Some(json!({"ids": [2, 1], "name": "transport"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], json!(1));
    assert_eq!(created["name"], json!("transport"));
    assert_eq!(
        created["words"],
        json!([
            {"id": 1, "label": "TCP", "details": "transport"},
            {"id": 2, "label": "UDP", "details": "datagram"}
        ])
    );

    let (status, updated) = send(
        &app,
        "PUT",
        "/api/flashcards/1/content",
        Some(json!({"ids": [3], "name": ""})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], json!("transport"));
    assert_eq!(updated["words"][0]["label"], json!("AES"));

    let (status, _) = send(&app, "DELETE", "/api/flashcards/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send(&app, "GET", "/api/flashcards", None).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_flashcard_default_name() {
    let dir = TempDir::new().unwrap();
    let (status, created) = send(&app(&dir), "POST", "/api/flashcards", Some(json!({"ids": [1]}))).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], json!("new flashcard"));
}

#[tokio::test]
async fn test_unknown_flashcard_is_not_found() {
    let dir = TempDir::new().unwrap();
    let app = app(&dir);

    let (status, body) = send(&app, "DELETE", "/api/flashcards/9", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains('9'));

    let (status, _) = send(&app, "PUT", "/api/flashcards/9/content", Some(json!({"ids": []}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_flashcards_persist_to_disk() {
    let dir = TempDir::new().unwrap();
    send(&app(&dir), "POST", "/api/flashcards", Some(json!({"ids": [1]}))).await;

    let reopened = FlashcardStore::open(dir.path().join("flashcards.json"));
    assert_eq!(reopened.len(), 1);
}

#[tokio::test]
async fn test_status() {
    let dir = TempDir::new().unwrap();
    let (status, body) = send(&app(&dir), "GET", "/api/status", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("healthy"));
    assert_eq!(body["version"], json!(lexigraph::VERSION));
    assert_eq!(body["graph"]["nodes"], json!(3));
    assert_eq!(body["graph"]["edges"], json!(1));
}

#[tokio::test]
async fn test_static_fallback() {
    let dir = TempDir::new().unwrap();
    let static_dir = dir.path().join("frontend");
    std::fs::create_dir(&static_dir).unwrap();
    std::fs::write(static_dir.join("index.html"), "<html>lexigraph</html>").unwrap();

    let store = FlashcardStore::open(dir.path().join("flashcards.json"));
    let app = router(AppState::new(graph(), store), Some(static_dir));

    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"<html>lexigraph</html>");
}
