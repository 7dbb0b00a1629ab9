//! SQLite-backed document store.
//!
//! Documents are stored as JSON bodies keyed by the flat path string.
//! Live subscriptions are served by an in-process notification hub, so
//! clients sharing one store instance observe each other's writes. One
//! lock guards both the connection and the hub: a write and its
//! notification form a single critical section, so the hub value can
//! never regress behind the database.

use super::{DocPath, DocUpdate, DocWatch, DocumentStore, StoreError};
use crate::model::SubmissionRecord;
use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;
use tokio::sync::watch;

const DOCUMENTS_SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS documents (
    path        TEXT PRIMARY KEY,
    body        TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);
";

struct Inner {
    conn: Connection,
    hub: HashMap<String, watch::Sender<DocUpdate>>,
}

pub struct SqliteStore {
    inner: Mutex<Inner>,
}

impl SqliteStore {
    /// Open a file-backed store.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        Self::init_connection(&conn)?;
        Ok(Self {
            inner: Mutex::new(Inner {
                conn,
                hub: HashMap::new(),
            }),
        })
    }

    /// Create an in-memory store (for testing and ephemeral runs).
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        Self::init_connection(&conn)?;
        Ok(Self {
            inner: Mutex::new(Inner {
                conn,
                hub: HashMap::new(),
            }),
        })
    }

    fn init_connection(conn: &Connection) -> Result<(), StoreError> {
        // WAL mode for file-backed DBs (no-op for in-memory)
        let _ = conn.execute("PRAGMA journal_mode = WAL", []);
        conn.execute_batch(DOCUMENTS_SCHEMA)?;
        Ok(())
    }

    fn read_record(conn: &Connection, key: &str) -> Result<Option<SubmissionRecord>, StoreError> {
        let body: Option<String> = conn
            .query_row(
                "SELECT body FROM documents WHERE path = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        match body {
            None => Ok(None),
            Some(body) => {
                let record =
                    serde_json::from_str(&body).map_err(|e| StoreError::Malformed {
                        path: key.to_string(),
                        detail: e.to_string(),
                    })?;
                Ok(Some(record))
            }
        }
    }
}

#[async_trait]
impl DocumentStore for SqliteStore {
    async fn load(&self, path: &DocPath) -> Result<Option<SubmissionRecord>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Self::read_record(&inner.conn, &path.key())
    }

    async fn save(&self, path: &DocPath, record: &SubmissionRecord) -> Result<(), StoreError> {
        let key = path.key();
        let body = serde_json::to_string(record).map_err(|e| StoreError::Malformed {
            path: key.clone(),
            detail: e.to_string(),
        })?;
        let inner = self.inner.lock().unwrap();
        inner.conn.execute(
            "INSERT INTO documents (path, body, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(path) DO UPDATE SET body = excluded.body,
                                             updated_at = excluded.updated_at",
            params![key, body, Utc::now().to_rfc3339()],
        )?;
        // Notify under the same lock so subscribers observe writes in
        // commit order.
        if let Some(tx) = inner.hub.get(&key) {
            tx.send_replace(Ok(Some(record.clone())));
        }
        Ok(())
    }

    async fn watch(&self, path: &DocPath) -> Result<DocWatch, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let Inner { conn, hub } = &mut *inner;
        match hub.entry(path.key()) {
            // An existing channel already tracks the database: every
            // write notifies it inside the same critical section.
            Entry::Occupied(entry) => Ok(DocWatch::new(entry.get().subscribe())),
            Entry::Vacant(entry) => {
                let current = Self::read_record(conn, entry.key())?;
                let (tx, rx) = watch::channel(Ok(current));
                entry.insert(tx);
                Ok(DocWatch::new(rx))
            }
        }
    }
}
