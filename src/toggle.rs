//! Completion Toggle
//!
//! A single delegated click listener on the task container. Clicks that do
//! not land on a checkbox are ignored; for the rest, the completed state
//! classes flip only after the server acknowledges the change.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{console, Document, Element, Event};

use crate::api;
use crate::dom;
use crate::models::ToggleResponse;

/// Attach the delegated listener to the task container
pub fn install(document: &Document) {
    let Some(container) = document.get_element_by_id(dom::TASK_CONTAINER_ID) else {
        return;
    };

    let handler = Closure::<dyn FnMut(Event)>::new(|event: Event| {
        let Some(checkbox) = delegated_checkbox(&event) else {
            return;
        };
        let Some(todo_id) = checkbox.get_attribute(dom::TODO_ID_ATTR) else {
            return;
        };

        wasm_bindgen_futures::spawn_local(async move {
            match api::toggle_todo(&todo_id).await {
                Ok(response) => match toggle_outcome(response) {
                    Ok(()) => flip_completed(&checkbox),
                    Err(error) => console::error_2(&"Error:".into(), &error.into()),
                },
                Err(err) => console::error_2(&"Request failed:".into(), &err.into()),
            }
        });
    });
    let _ = container
        .add_event_listener_with_callback("click", handler.as_ref().unchecked_ref());
    handler.forget();
}

/// Resolve a click to the checkbox it landed on, if any
fn delegated_checkbox(event: &Event) -> Option<Element> {
    let target = event.target()?;
    let element = target.dyn_into::<Element>().ok()?;
    element.closest(dom::CHECKBOX_SELECTOR).ok().flatten()
}

/// Interpret the server acknowledgment: only `success` flips the UI
fn toggle_outcome(response: ToggleResponse) -> Result<(), String> {
    if response.success {
        Ok(())
    } else {
        Err(response
            .error
            .unwrap_or_else(|| "unknown error".to_string()))
    }
}

/// Flip the completed class on the checkbox and its sibling title
fn flip_completed(checkbox: &Element) {
    let _ = checkbox.class_list().toggle(dom::COMPLETED_CLASS);

    let title = checkbox
        .closest(dom::TASK_SELECTOR)
        .ok()
        .flatten()
        .and_then(|task| task.query_selector(dom::TITLE_SELECTOR).ok().flatten());
    if let Some(title) = title {
        let _ = title.class_list().toggle(dom::COMPLETED_CLASS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_flips() {
        let response = ToggleResponse {
            success: true,
            completed: Some(true),
            error: None,
        };
        assert_eq!(toggle_outcome(response), Ok(()));
    }

    #[test]
    fn test_rejection_reports_server_error() {
        let response = ToggleResponse {
            success: false,
            completed: None,
            error: Some("Todo not found".to_string()),
        };
        assert_eq!(toggle_outcome(response), Err("Todo not found".to_string()));
    }

    #[test]
    fn test_rejection_without_detail() {
        let response = ToggleResponse {
            success: false,
            completed: None,
            error: None,
        };
        assert_eq!(toggle_outcome(response), Err("unknown error".to_string()));
    }
}
