//! HTTP server exposing the flow API

use super::handler::{graph_handler, overview_handler, pivot_handler, status_handler};
use crate::dataset::Dataset;
use crate::palette::Palette;
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

/// Shared state: the dataset and its palette.
///
/// Both are immutable and every downstream computation is a pure function,
/// so concurrent requests need no locking.
pub struct AppState {
    pub dataset: Dataset,
    pub palette: Palette,
}

/// Build the API router. Exposed separately from the server so tests can
/// drive it without binding a socket.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/status", get(status_handler))
        .route("/api/graph", get(graph_handler))
        .route("/api/pivot", get(pivot_handler))
        .route("/api/overview", get(overview_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// HTTP server managing the flow API
pub struct HttpServer {
    state: Arc<AppState>,
    port: u16,
}

impl HttpServer {
    pub fn new(state: Arc<AppState>, port: u16) -> Self {
        Self { state, port }
    }

    /// Bind and serve until shutdown
    pub async fn start(&self) -> Result<(), Box<dyn std::error::Error>> {
        let app = router(Arc::clone(&self.state));

        let addr = format!("0.0.0.0:{}", self.port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;

        info!("flow API available at http://localhost:{}", self.port);

        axum::serve(listener, app).await?;

        Ok(())
    }
}
