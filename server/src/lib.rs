//! Todos Server
//!
//! Layered architecture:
//! - domain: Core entities and filter rules
//! - storage: SQLite persistence
//! - external: Seed import from the external todo source
//! - pagination: Page window arithmetic
//! - render: Server-side HTML for the list pages
//! - api: HTTP surface (routes and handlers)

use std::sync::Arc;

use tokio::sync::Mutex;

pub mod api;
pub mod config;
pub mod domain;
pub mod external;
pub mod pagination;
pub mod render;
pub mod storage;

use config::Config;
use storage::Store;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Mutex<Store>>,
    pub config: Arc<Config>,
    pub client: reqwest::Client,
}

impl AppState {
    pub fn new(store: Store, config: Config) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            config: Arc::new(config),
            client: reqwest::Client::new(),
        }
    }
}
