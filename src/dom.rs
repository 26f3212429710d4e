//! DOM Contract
//!
//! The ids, attributes and classes the server-rendered markup exposes,
//! plus small element helpers shared by both handlers.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

/// Container holding the task entries
pub const TASK_CONTAINER_ID: &str = "task-container";
/// The load-more control
pub const LOAD_MORE_ID: &str = "load-more";
/// Continuation token attribute on the load-more control
pub const NEXT_PAGE_ATTR: &str = "data-next-page";
/// Task identifier attribute on the checkbox
pub const TODO_ID_ATTR: &str = "data-todo-id";
/// State class denoting a completed task
pub const COMPLETED_CLASS: &str = "completed";

pub const CHECKBOX_SELECTOR: &str = ".check";
pub const TASK_SELECTOR: &str = ".task";
pub const TITLE_SELECTOR: &str = ".title";

pub fn document() -> Option<Document> {
    web_sys::window().and_then(|window| window.document())
}

/// Take an element out of the tab/interaction flow by hiding it
pub fn hide(element: &Element) {
    if let Some(element) = element.dyn_ref::<HtmlElement>() {
        let _ = element.style().set_property("display", "none");
    }
}
