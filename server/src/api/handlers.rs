use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use uuid::Uuid;

use crate::domain::TodoFilter;
use crate::external;
use crate::pagination::Page;
use crate::render::{render_list_page, ListPage};
use crate::storage::Store;
use crate::AppState;

use super::models::{ListQuery, ToggleRequest, ToggleResponse};

pub async fn list_todos(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Response {
    match build_list_page(&state, &query).await {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to render todo list");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html("<h1>Something went wrong</h1>".to_string()),
            )
                .into_response()
        }
    }
}

async fn build_list_page(state: &AppState, query: &ListQuery) -> anyhow::Result<String> {
    let mut store = state.store.lock().await;

    // Empty database: populate from the external source before rendering.
    // A failed import is logged and the page renders empty.
    if store.is_empty()? {
        if let Err(e) = external::seed_store(&mut store, &state.client, &state.config.api_url).await
        {
            tracing::error!(error = %e, "error fetching external data");
        }
    }

    let filter = TodoFilter::from_param(query.filter.as_deref());
    let stats = store.stats()?;
    let page = Page::resolve(query.page.as_deref(), store.count(filter)?);
    let todos = store.list_page(filter, page.per_page, page.offset())?;

    Ok(render_list_page(&ListPage {
        todos: &todos,
        stats,
        filter,
        next_page: page.next_number(),
    }))
}

pub async fn toggle_todo(State(state): State<AppState>, body: Bytes) -> Response {
    let mut store = state.store.lock().await;
    let (status, payload) = apply_toggle(&mut store, &body);
    (status, Json(payload)).into_response()
}

/// Decode, validate, and apply one toggle request
fn apply_toggle(store: &mut Store, body: &[u8]) -> (StatusCode, ToggleResponse) {
    let Ok(request) = serde_json::from_slice::<ToggleRequest>(body) else {
        tracing::error!("invalid JSON data in toggle request");
        return (StatusCode::BAD_REQUEST, ToggleResponse::error("Invalid JSON"));
    };

    let Some(todo_id) = request.todo_id.filter(|id| !id.is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            ToggleResponse::error("Missing todo_id"),
        );
    };

    let uuid = match Uuid::parse_str(&todo_id) {
        Ok(uuid) => uuid,
        Err(e) => {
            tracing::error!(error = %e, "unexpected error toggling todo completion");
            return (StatusCode::BAD_REQUEST, ToggleResponse::error(e.to_string()));
        }
    };

    match store.toggle(&uuid) {
        Ok(Some(completed)) => (StatusCode::OK, ToggleResponse::ok(completed)),
        Ok(None) => {
            tracing::warn!(%uuid, "attempted to toggle a todo that does not exist");
            (
                StatusCode::NOT_FOUND,
                ToggleResponse::error("Todo not found"),
            )
        }
        Err(e) => {
            tracing::error!(error = %e, "unexpected error toggling todo completion");
            (StatusCode::BAD_REQUEST, ToggleResponse::error(e.to_string()))
        }
    }
}

/// Serve stylesheet and WASM bundle files from the static directory
pub async fn static_file(State(state): State<AppState>, Path(path): Path<String>) -> Response {
    // Reject traversal before touching the filesystem
    if path.split('/').any(|part| part == ".." || part.is_empty()) {
        return StatusCode::NOT_FOUND.into_response();
    }

    let full_path = state.config.static_dir.join(&path);
    match tokio::fs::read(&full_path).await {
        Ok(content) => {
            let mime_type = mime_guess::from_path(&full_path).first_or_octet_stream();
            ([(header::CONTENT_TYPE, mime_type.to_string())], content).into_response()
        }
        Err(_) => StatusCode::NOT_FOUND.into_response(),
    }
}
