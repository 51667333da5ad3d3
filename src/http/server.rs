//! HTTP server for the graph viewer and flashcard API

use super::handler::{
    create_flashcard_handler, data_handler, delete_flashcard_handler, list_flashcards_handler,
    nodes_handler, status_handler, update_flashcard_handler,
};
use crate::flashcard::FlashcardStore;
use crate::graph::GraphDocument;
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tracing::info;

/// Shared handler state: the graph is read-only for the life of the process
#[derive(Clone)]
pub struct AppState {
    pub graph: Arc<GraphDocument>,
    pub flashcards: Arc<RwLock<FlashcardStore>>,
}

impl AppState {
    pub fn new(graph: GraphDocument, flashcards: FlashcardStore) -> Self {
        Self {
            graph: Arc::new(graph),
            flashcards: Arc::new(RwLock::new(flashcards)),
        }
    }
}

/// Build the application router; `static_dir`, if given, serves everything
/// that is not an API route
pub fn router(state: AppState, static_dir: Option<PathBuf>) -> Router {
    let api = Router::new()
        .route("/api/data", get(data_handler))
        .route("/api/nodes", post(nodes_handler))
        .route(
            "/api/flashcards",
            get(list_flashcards_handler).post(create_flashcard_handler),
        )
        .route("/api/flashcards/:id/content", put(update_flashcard_handler))
        .route("/api/flashcards/:id", delete(delete_flashcard_handler))
        .route("/api/status", get(status_handler));

    let app = match static_dir {
        Some(dir) => api.fallback_service(ServeDir::new(dir)),
        None => api,
    };

    app.layer(CorsLayer::permissive()).with_state(state)
}

/// HTTP server serving the graph document, flashcards and static frontend
pub struct HttpServer {
    state: AppState,
    address: String,
    port: u16,
    static_dir: Option<PathBuf>,
}

impl HttpServer {
    pub fn new(state: AppState, address: impl Into<String>, port: u16) -> Self {
        Self {
            state,
            address: address.into(),
            port,
            static_dir: None,
        }
    }

    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = Some(dir.into());
        self
    }

    /// Start the HTTP server
    pub async fn start(&self) -> Result<(), Box<dyn std::error::Error>> {
        let app = router(self.state.clone(), self.static_dir.clone());

        let addr = format!("{}:{}", self.address, self.port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;

        info!("Graph viewer available at http://{}", addr);
        if let Some(dir) = &self.static_dir {
            info!("Serving static files from {:?}", dir);
        }

        axum::serve(listener, app).await?;

        Ok(())
    }
}
