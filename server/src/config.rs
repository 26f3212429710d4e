//! Server Configuration
//!
//! Environment-driven settings with defaults. The CLI overrides the bind
//! address and database path on top of these.

use std::path::PathBuf;

/// Default seed source; serves the `{userId, id, title, completed}` shape
pub const DEFAULT_API_URL: &str = "https://jsonplaceholder.typicode.com/todos";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_DATABASE_PATH: &str = "todos.db";
const DEFAULT_STATIC_DIR: &str = "static";

#[derive(Debug, Clone)]
pub struct Config {
    /// External source used to seed an empty database
    pub api_url: String,
    pub bind_addr: String,
    pub database_path: PathBuf,
    pub static_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            api_url: lookup("TODO_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            database_path: lookup("DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_PATH)),
            static_dir: lookup("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR)),
        }
    }
}
