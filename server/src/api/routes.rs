use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::AppState;

use super::handlers;

async fn health_check() -> &'static str {
    "ok"
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/", get(handlers::list_todos))
        .route("/toggle-todo/", post(handlers::toggle_todo))
        .route("/static/{*path}", get(handlers::static_file))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
