use serde::{Deserialize, Serialize};

/// Query parameters accepted by the list view. Both arrive as raw strings
/// and are validated leniently further down.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
    pub filter: Option<String>,
}

/// Body of `POST /toggle-todo/`
#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub todo_id: Option<String>,
}

/// Acknowledgment for a toggle request
#[derive(Debug, PartialEq, Serialize)]
pub struct ToggleResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ToggleResponse {
    pub fn ok(completed: bool) -> Self {
        Self {
            success: true,
            completed: Some(completed),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            completed: None,
            error: Some(message.into()),
        }
    }
}
