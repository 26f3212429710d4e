//! Domain Layer
//!
//! Core entities and the list filter rules. No storage or HTTP concerns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One to-do entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    pub uuid: Uuid,
    /// Identifier assigned by the external source; drives list ordering
    pub api_id: i64,
    pub user_id: i64,
    pub title: String,
    /// Avatar slot for the owning user, stored as text
    pub image: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Todo {
    pub fn new(api_id: i64, user_id: i64, title: String, image: String, completed: bool) -> Self {
        let now = Utc::now();
        Self {
            uuid: Uuid::new_v4(),
            api_id,
            user_id,
            title,
            image,
            completed,
            created_at: now,
            updated_at: now,
        }
    }
}

/// List filter taken from the `filter` query parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TodoFilter {
    #[default]
    All,
    /// Uncompleted entries only
    Todo,
    /// Completed entries only
    Complete,
}

impl TodoFilter {
    /// Unknown or missing values fall back to `All`
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("todo") => Self::Todo,
            Some("complete") => Self::Complete,
            _ => Self::All,
        }
    }

    pub fn as_param(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Todo => "todo",
            Self::Complete => "complete",
        }
    }
}

/// Store-wide counts shown in the list header, independent of the filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub total: i64,
    pub completed: i64,
    pub uncompleted: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_parses_known_values() {
        assert_eq!(TodoFilter::from_param(Some("todo")), TodoFilter::Todo);
        assert_eq!(TodoFilter::from_param(Some("complete")), TodoFilter::Complete);
        assert_eq!(TodoFilter::from_param(Some("all")), TodoFilter::All);
    }

    #[test]
    fn test_filter_defaults_to_all() {
        assert_eq!(TodoFilter::from_param(None), TodoFilter::All);
        assert_eq!(
            TodoFilter::from_param(Some("non-existent-filter")),
            TodoFilter::All
        );
    }

    #[test]
    fn test_new_todo_starts_with_matching_timestamps() {
        let todo = Todo::new(1, 7, "Buy milk".to_string(), "3".to_string(), false);
        assert_eq!(todo.created_at, todo.updated_at);
        assert!(!todo.completed);
    }
}
