//! Request Layer
//!
//! Async wrappers over the browser fetch API. One request at a time per
//! activation, no queueing, no timeout.

use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

use crate::models::{ToggleRequest, ToggleResponse};

const TOGGLE_URL: &str = "/toggle-todo/";

/// Fetch a server-rendered page and return its body as text
pub async fn fetch_page(url: &str) -> Result<String, String> {
    let window = web_sys::window().ok_or("no window")?;
    let response: Response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| js_error("request failed", e))?
        .into();

    read_body_text(&response).await
}

/// Request a completion flip for one todo and decode the acknowledgment
pub async fn toggle_todo(todo_id: &str) -> Result<ToggleResponse, String> {
    let body =
        serde_json::to_string(&ToggleRequest { todo_id }).map_err(|e| e.to_string())?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_body(&JsValue::from_str(&body));

    let request = Request::new_with_str_and_init(TOGGLE_URL, &opts)
        .map_err(|e| js_error("failed to build request", e))?;

    let headers = request.headers();
    headers
        .set("Content-Type", "application/json")
        .map_err(|e| js_error("failed to set header", e))?;
    headers
        .set("X-Requested-With", "XMLHttpRequest")
        .map_err(|e| js_error("failed to set header", e))?;

    let window = web_sys::window().ok_or("no window")?;
    let response: Response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| js_error("request failed", e))?
        .into();

    let text = read_body_text(&response).await?;
    serde_json::from_str(&text).map_err(|e| format!("failed to parse response: {e}"))
}

async fn read_body_text(response: &Response) -> Result<String, String> {
    let promise = response
        .text()
        .map_err(|e| js_error("failed to read response", e))?;
    JsFuture::from(promise)
        .await
        .map_err(|e| js_error("failed to read response", e))?
        .as_string()
        .ok_or_else(|| "response body is not text".to_string())
}

fn js_error(context: &str, value: JsValue) -> String {
    let detail = value
        .as_string()
        .or_else(|| js_sys::JSON::stringify(&value).ok().map(String::from));
    match detail {
        Some(detail) => format!("{context}: {detail}"),
        None => context.to_string(),
    }
}
