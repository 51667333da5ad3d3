//! HTTP handlers for the graph and flashcard API

use super::server::AppState;
use crate::flashcard::FlashcardError;
use crate::graph::{Node, NodeId};
use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

/// Body of `POST /api/nodes`
#[derive(Deserialize)]
pub struct NodeFilterRequest {
    #[serde(default)]
    pub ids: Vec<NodeId>,
}

/// Body of flashcard create/update requests
#[derive(Deserialize)]
pub struct FlashcardRequest {
    #[serde(default)]
    pub ids: Vec<NodeId>,
    pub name: Option<String>,
}

impl FlashcardRequest {
    /// A blank name counts as no name
    fn name(&self) -> Option<String> {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string)
    }
}

impl IntoResponse for FlashcardError {
    fn into_response(self) -> Response {
        let status = match self {
            FlashcardError::NotFound(_) => StatusCode::NOT_FOUND,
            FlashcardError::Io(_) | FlashcardError::Serialization(_) => {
                error!("Flashcard store failure: {}", self);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// The graph document verbatim
pub async fn data_handler(State(state): State<AppState>) -> Response {
    Json(state.graph.as_ref()).into_response()
}

/// Node records for the requested ids, in document order
pub async fn nodes_handler(
    State(state): State<AppState>,
    Json(payload): Json<NodeFilterRequest>,
) -> impl IntoResponse {
    let nodes: Vec<Node> = state.graph.nodes_by_ids(&payload.ids).into_iter().cloned().collect();
    Json(nodes)
}

pub async fn list_flashcards_handler(State(state): State<AppState>) -> Response {
    let store = state.flashcards.read().await;
    Json(store.list()).into_response()
}

pub async fn create_flashcard_handler(
    State(state): State<AppState>,
    Json(payload): Json<FlashcardRequest>,
) -> Result<impl IntoResponse, FlashcardError> {
    info!("Creating flashcard from {} ids", payload.ids.len());
    let mut store = state.flashcards.write().await;
    let card = store.create(payload.name(), &payload.ids, &state.graph)?;
    Ok((StatusCode::CREATED, Json(card)))
}

pub async fn update_flashcard_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(payload): Json<FlashcardRequest>,
) -> Result<impl IntoResponse, FlashcardError> {
    let mut store = state.flashcards.write().await;
    let card = store.update_content(id, payload.name(), &payload.ids, &state.graph)?;
    Ok(Json(card))
}

pub async fn delete_flashcard_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, FlashcardError> {
    let mut store = state.flashcards.write().await;
    store.delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for system status
pub async fn status_handler(State(state): State<AppState>) -> impl IntoResponse {
    let flashcards = state.flashcards.read().await.len();
    Json(json!({
        "status": "healthy",
        "version": crate::VERSION,
        "graph": {
            "nodes": state.graph.node_count(),
            "edges": state.graph.edge_count(),
        },
        "flashcards": flashcards,
    }))
}
