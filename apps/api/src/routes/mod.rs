pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    http::Uri,
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::analysis::handlers;
use crate::errors::AppError;
use crate::state::AppState;

async fn api_not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No API route for {uri}"))
}

/// API routes under `/api`, the health probe, and the browser client as a
/// static fallback.
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/gemini", post(handlers::handle_analyze))
        .fallback(api_not_found);

    let client = ServeDir::new(&state.config.static_dir);

    Router::new()
        .route("/health", get(health::health_handler))
        .nest("/api", api)
        .fallback_service(client)
        .layer(DefaultBodyLimit::max(state.config.max_body_bytes))
        .with_state(state)
}
