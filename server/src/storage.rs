//! SQLite Persistence
//!
//! Owns the `todos` table. All list queries order by `api_id` ascending so
//! pages are stable across requests.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use crate::domain::{Stats, Todo, TodoFilter};

/// Parse an RFC3339 timestamp string into a DateTime<Utc>
fn parse_rfc3339(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("opening database at {}", path.display()))?;
        Self::init(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory().context("opening in-memory database")?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS todos (
                uuid TEXT PRIMARY KEY,
                api_id INTEGER NOT NULL UNIQUE,
                user_id INTEGER NOT NULL,
                title TEXT NOT NULL,
                image TEXT NOT NULL,
                completed INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )
        .context("creating todos table")?;
        Ok(Self { conn })
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.count(TodoFilter::All)? == 0)
    }

    pub fn count(&self, filter: TodoFilter) -> Result<i64> {
        let sql = format!("SELECT COUNT(*) FROM todos{}", filter_clause(filter));
        self.conn
            .query_row(&sql, [], |row| row.get(0))
            .context("counting todos")
    }

    pub fn stats(&self) -> Result<Stats> {
        let (total, completed) = self
            .conn
            .query_row(
                "SELECT COUNT(*), COALESCE(SUM(completed), 0) FROM todos",
                [],
                |row| Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?)),
            )
            .context("reading todo counts")?;
        Ok(Stats {
            total,
            completed,
            uncompleted: total - completed,
        })
    }

    /// One page of the filtered list, ordered by `api_id` ascending
    pub fn list_page(&self, filter: TodoFilter, limit: i64, offset: i64) -> Result<Vec<Todo>> {
        let sql = format!(
            "SELECT uuid, api_id, user_id, title, image, completed, created_at, updated_at
             FROM todos{} ORDER BY api_id ASC LIMIT ?1 OFFSET ?2",
            filter_clause(filter)
        );
        let mut stmt = self.conn.prepare(&sql).context("preparing page query")?;
        let rows = stmt
            .query_map(params![limit, offset], row_to_todo)
            .context("querying todos page")?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .context("loading todos page")
    }

    /// Bulk insert, used by seeding. All rows land in one transaction.
    pub fn insert_todos(&mut self, todos: &[Todo]) -> Result<usize> {
        let tx = self.conn.transaction().context("starting insert")?;
        {
            let mut stmt = tx
                .prepare(
                    "INSERT INTO todos
                     (uuid, api_id, user_id, title, image, completed, created_at, updated_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                )
                .context("preparing insert")?;
            for todo in todos {
                stmt.execute(params![
                    todo.uuid.to_string(),
                    todo.api_id,
                    todo.user_id,
                    todo.title,
                    todo.image,
                    todo.completed,
                    todo.created_at.to_rfc3339(),
                    todo.updated_at.to_rfc3339(),
                ])
                .with_context(|| format!("inserting todo {}", todo.api_id))?;
            }
        }
        tx.commit().context("committing insert")?;
        Ok(todos.len())
    }

    /// Flip one todo's completion and return the new value.
    /// `None` when no row carries that uuid.
    pub fn toggle(&mut self, uuid: &Uuid) -> Result<Option<bool>> {
        let tx = self.conn.transaction().context("starting toggle")?;
        let current: Option<bool> = tx
            .query_row(
                "SELECT completed FROM todos WHERE uuid = ?1",
                params![uuid.to_string()],
                |row| row.get(0),
            )
            .optional()
            .context("reading completion state")?;

        let Some(current) = current else {
            return Ok(None);
        };

        let next = !current;
        tx.execute(
            "UPDATE todos SET completed = ?1, updated_at = ?2 WHERE uuid = ?3",
            params![next, Utc::now().to_rfc3339(), uuid.to_string()],
        )
        .context("updating completion state")?;
        tx.commit().context("committing toggle")?;
        Ok(Some(next))
    }
}

fn filter_clause(filter: TodoFilter) -> &'static str {
    match filter {
        TodoFilter::All => "",
        TodoFilter::Todo => " WHERE completed = 0",
        TodoFilter::Complete => " WHERE completed = 1",
    }
}

fn row_to_todo(row: &rusqlite::Row) -> rusqlite::Result<Todo> {
    let uuid_str: String = row.get(0)?;
    let uuid = Uuid::parse_str(&uuid_str).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })?;
    let created_at_str: String = row.get(6)?;
    let updated_at_str: String = row.get(7)?;
    Ok(Todo {
        uuid,
        api_id: row.get(1)?,
        user_id: row.get(2)?,
        title: row.get(3)?,
        image: row.get(4)?,
        completed: row.get(5)?,
        created_at: parse_rfc3339(&created_at_str).unwrap_or_else(Utc::now),
        updated_at: parse_rfc3339(&updated_at_str).unwrap_or_else(Utc::now),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(todos: &[Todo]) -> Store {
        let mut store = Store::open_in_memory().expect("Failed to open test store");
        store.insert_todos(todos).expect("Failed to seed test store");
        store
    }

    fn sample(api_id: i64, completed: bool) -> Todo {
        Todo::new(api_id, 1, format!("Todo {api_id}"), "3".to_string(), completed)
    }

    #[test]
    fn test_insert_and_count() {
        let store = store_with(&[sample(1, false), sample(2, true)]);
        assert_eq!(store.count(TodoFilter::All).unwrap(), 2);
        assert!(!store.is_empty().unwrap());
    }

    #[test]
    fn test_filtered_counts() {
        let store = store_with(&[sample(1, false), sample(2, true), sample(3, true)]);
        assert_eq!(store.count(TodoFilter::Todo).unwrap(), 1);
        assert_eq!(store.count(TodoFilter::Complete).unwrap(), 2);
    }

    #[test]
    fn test_stats() {
        let store = store_with(&[sample(1, false), sample(2, true)]);
        let stats = store.stats().unwrap();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.uncompleted, 1);
    }

    #[test]
    fn test_list_page_orders_by_api_id() {
        let store = store_with(&[sample(10, false), sample(2, false), sample(5, true)]);
        let todos = store.list_page(TodoFilter::All, 20, 0).unwrap();
        let api_ids: Vec<i64> = todos.iter().map(|t| t.api_id).collect();
        assert_eq!(api_ids, vec![2, 5, 10]);
    }

    #[test]
    fn test_list_page_window() {
        let todos: Vec<Todo> = (0..25).map(|i| sample(i, false)).collect();
        let store = store_with(&todos);

        let first = store.list_page(TodoFilter::All, 20, 0).unwrap();
        assert_eq!(first.len(), 20);

        let second = store.list_page(TodoFilter::All, 20, 20).unwrap();
        assert_eq!(second.len(), 5);
        assert_eq!(second[0].api_id, 20);
    }

    #[test]
    fn test_list_page_respects_filter() {
        let store = store_with(&[sample(1, false), sample(2, true)]);
        let open = store.list_page(TodoFilter::Todo, 20, 0).unwrap();
        assert_eq!(open.len(), 1);
        assert!(!open[0].completed);
    }

    #[test]
    fn test_toggle_flips_and_persists() {
        let seed = sample(1, false);
        let uuid = seed.uuid;
        let mut store = store_with(&[seed]);

        assert_eq!(store.toggle(&uuid).unwrap(), Some(true));
        assert_eq!(store.count(TodoFilter::Complete).unwrap(), 1);

        assert_eq!(store.toggle(&uuid).unwrap(), Some(false));
        assert_eq!(store.count(TodoFilter::Complete).unwrap(), 0);
    }

    #[test]
    fn test_toggle_unknown_uuid() {
        let mut store = store_with(&[sample(1, false)]);
        assert_eq!(store.toggle(&Uuid::new_v4()).unwrap(), None);
    }

    #[test]
    fn test_roundtrip_preserves_fields() {
        let seed = sample(42, true);
        let store = store_with(&[seed.clone()]);
        let loaded = &store.list_page(TodoFilter::All, 20, 0).unwrap()[0];
        assert_eq!(loaded.uuid, seed.uuid);
        assert_eq!(loaded.title, seed.title);
        assert_eq!(loaded.image, seed.image);
        assert!(loaded.completed);
    }

    #[test]
    fn test_open_creates_file() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("todos.db");
        {
            let mut store = Store::open(&path).expect("Failed to open store");
            store.insert_todos(&[sample(1, false)]).unwrap();
        }
        let store = Store::open(&path).expect("Failed to reopen store");
        assert_eq!(store.count(TodoFilter::All).unwrap(), 1);
    }
}
