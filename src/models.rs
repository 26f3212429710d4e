//! Wire Types
//!
//! Request and response bodies for the toggle endpoint (matches the server).

use serde::{Deserialize, Serialize};

/// Body of `POST /toggle-todo/`
#[derive(Debug, Serialize)]
pub struct ToggleRequest<'a> {
    pub todo_id: &'a str,
}

/// Server acknowledgment for a toggle
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ToggleResponse {
    pub success: bool,
    #[serde(default)]
    pub completed: Option<bool>,
    #[serde(default)]
    pub error: Option<String>,
}
