//! External Seed Source
//!
//! Imports the initial todo set from the external JSON API. Transient
//! upstream failures (5xx, transport) are retried with exponential
//! backoff; anything else fails immediately.

use std::collections::HashMap;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use rand::Rng;
use serde::Deserialize;

use crate::domain::Todo;
use crate::storage::Store;

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);
const MAX_ATTEMPTS: u32 = 3;
const BACKOFF_FACTOR_MS: u64 = 300;
const RETRY_STATUSES: [u16; 4] = [500, 502, 503, 504];
/// Avatar slots available in the stylesheet
const AVATAR_SLOTS: i64 = 7;

/// One record as served by the external source
#[derive(Debug, Clone, Deserialize)]
pub struct ApiTodo {
    #[serde(rename = "userId")]
    pub user_id: i64,
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
}

fn should_retry(status: u16) -> bool {
    RETRY_STATUSES.contains(&status)
}

fn backoff_delay(attempt: u32) -> Duration {
    Duration::from_millis(BACKOFF_FACTOR_MS * 2u64.saturating_pow(attempt))
}

/// Fetch the full todo set from the external source
pub async fn fetch_todos_from_api(client: &reqwest::Client, url: &str) -> Result<Vec<ApiTodo>> {
    let mut attempt = 0;
    loop {
        match client.get(url).timeout(FETCH_TIMEOUT).send().await {
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    return response.json().await.context("decoding todo payload");
                }
                if !should_retry(status.as_u16()) || attempt + 1 >= MAX_ATTEMPTS {
                    bail!("todo source returned {status}");
                }
                tracing::warn!(%status, attempt, "todo source failed, retrying");
            }
            Err(err) => {
                if attempt + 1 >= MAX_ATTEMPTS {
                    return Err(err).context("requesting todo source");
                }
                tracing::warn!(error = %err, attempt, "todo source unreachable, retrying");
            }
        }
        attempt += 1;
        tokio::time::sleep(backoff_delay(attempt)).await;
    }
}

/// Build rows from source records. Each distinct user keeps one randomly
/// chosen avatar slot across all of their todos.
pub fn build_todos(records: &[ApiTodo]) -> Vec<Todo> {
    let mut rng = rand::thread_rng();
    let mut user_avatars: HashMap<i64, String> = HashMap::new();
    let mut todos = Vec::with_capacity(records.len());

    for record in records {
        let image = user_avatars
            .entry(record.user_id)
            .or_insert_with(|| rng.gen_range(1..=AVATAR_SLOTS).to_string())
            .clone();
        todos.push(Todo::new(
            record.id,
            record.user_id,
            record.title.clone(),
            image,
            record.completed,
        ));
    }
    todos
}

/// Fetch and import the seed set. Callers decide whether a failure is
/// fatal; the list view treats it as not.
pub async fn seed_store(store: &mut Store, client: &reqwest::Client, url: &str) -> Result<usize> {
    let records = fetch_todos_from_api(client, url).await?;
    let inserted = store.insert_todos(&build_todos(&records))?;
    tracing::info!(count = inserted, "seeded todos from external source");
    Ok(inserted)
}
