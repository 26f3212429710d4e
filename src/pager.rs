//! Load More Pager
//!
//! Fetches the next server-rendered page and splices its task nodes into
//! the live list. The continuation token lives on the control itself; when
//! the fetched page carries no control the list is exhausted and the live
//! control is hidden.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{console, Document, DomParser, Event, SupportedType, Url};

use crate::api;
use crate::dom;

/// Attach the click handler when the control is present on the page
pub fn install(document: &Document) {
    let Some(button) = document.get_element_by_id(dom::LOAD_MORE_ID) else {
        return;
    };

    let handler = Closure::<dyn FnMut(Event)>::new(|event: Event| {
        event.prevent_default();
        wasm_bindgen_futures::spawn_local(async {
            if let Err(err) = load_next_page().await {
                console::error_2(&"Error loading more tasks:".into(), &err.into());
            }
        });
    });
    let _ = button
        .add_event_listener_with_callback("click", handler.as_ref().unchecked_ref());
    handler.forget();
}

/// One pager activation: fetch, splice, advance or retire the control.
/// Any failure leaves the page untouched.
async fn load_next_page() -> Result<(), String> {
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;

    let button = document
        .get_element_by_id(dom::LOAD_MORE_ID)
        .ok_or("load-more control missing")?;
    let container = document
        .get_element_by_id(dom::TASK_CONTAINER_ID)
        .ok_or("task container missing")?;

    let next_page = button
        .get_attribute(dom::NEXT_PAGE_ATTR)
        .ok_or("load-more control has no continuation token")?;

    // Current URL with the page parameter swapped for the token, keeping
    // any other parameters (e.g. the active filter).
    let href = window
        .location()
        .href()
        .map_err(|_| "cannot read current location")?;
    let url = Url::new(&href).map_err(|_| "cannot parse current location")?;
    url.search_params().set("page", &next_page);

    let html = api::fetch_page(&url.href()).await?;

    let parser = DomParser::new().map_err(|_| "cannot create parser")?;
    let fetched = parser
        .parse_from_string(&html, SupportedType::TextHtml)
        .map_err(|_| "cannot parse fetched page")?;

    let new_tasks = fetched
        .get_element_by_id(dom::TASK_CONTAINER_ID)
        .ok_or("fetched page has no task container")?;

    container
        .insert_adjacent_html("beforeend", &new_tasks.inner_html())
        .map_err(|_| "cannot append fetched tasks")?;

    // Advance the token, or retire the control when the list is exhausted.
    let next_token = fetched
        .get_element_by_id(dom::LOAD_MORE_ID)
        .and_then(|el| el.get_attribute(dom::NEXT_PAGE_ATTR));
    match next_token {
        Some(token) => button
            .set_attribute(dom::NEXT_PAGE_ATTR, &token)
            .map_err(|_| "cannot update continuation token")?,
        None => dom::hide(&button),
    }

    Ok(())
}
