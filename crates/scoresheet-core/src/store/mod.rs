//! Document store abstraction.
//!
//! The core depends only on point-read, whole-document upsert and
//! live-subscribe, keyed by the compound evaluations path. Backends are
//! injected as `Arc<dyn DocumentStore>` so the sync layer stays testable
//! without a live external service.

pub mod memory;
pub mod sqlite;

use crate::model::SubmissionRecord;
use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::watch;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Compound document key: `(namespace, app_instance_id, "public", "data",
/// "evaluations", submission_id)`, one document per submission.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocPath {
    pub namespace: String,
    pub app_instance_id: String,
    pub submission_id: String,
}

impl DocPath {
    pub fn evaluations(
        namespace: impl Into<String>,
        app_instance_id: impl Into<String>,
        submission_id: impl Into<String>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            app_instance_id: app_instance_id.into(),
            submission_id: submission_id.into(),
        }
    }

    /// Flat key used by backends for addressing and notification fan-out.
    pub fn key(&self) -> String {
        format!(
            "{}/{}/public/data/evaluations/{}",
            self.namespace, self.app_instance_id, self.submission_id
        )
    }
}

/// Store failures. Cloneable so an error can ride a subscription channel
/// to every listener. All variants are recoverable by user retry.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("malformed document at {path}: {detail}")]
    Malformed { path: String, detail: String },

    #[error("backend error: {0}")]
    Backend(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        StoreError::Backend(e.to_string())
    }
}

/// A single emission from a live subscription: the current record,
/// `None` for an absent document, or a store failure.
pub type DocUpdate = Result<Option<SubmissionRecord>, StoreError>;

/// Cancellable live subscription to one document.
///
/// The first call to [`DocWatch::next`] yields the state current at
/// subscribe time; later calls wait for writes. Rapid successive writes
/// may coalesce into one emission carrying the latest state.
pub struct DocWatch {
    rx: Option<watch::Receiver<DocUpdate>>,
    primed: bool,
}

impl DocWatch {
    pub(crate) fn new(rx: watch::Receiver<DocUpdate>) -> Self {
        Self {
            rx: Some(rx),
            primed: false,
        }
    }

    /// Next update. Returns `None` once cancelled or after the backend
    /// dropped the notification channel.
    pub async fn next(&mut self) -> Option<DocUpdate> {
        let rx = self.rx.as_mut()?;
        if !self.primed {
            self.primed = true;
            return Some(rx.borrow().clone());
        }
        if rx.changed().await.is_err() {
            return None;
        }
        let update = rx.borrow_and_update().clone();
        Some(update)
    }

    /// Cancel the subscription. Idempotent; safe to call on teardown paths
    /// that may run more than once.
    pub fn cancel(&mut self) {
        self.rx = None;
    }

    pub fn is_cancelled(&self) -> bool {
        self.rx.is_none()
    }
}

/// Backend contract: point-read, whole-document upsert, live-subscribe.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Point read of the current record, `None` if the document is absent.
    async fn load(&self, path: &DocPath) -> Result<Option<SubmissionRecord>, StoreError>;

    /// Whole-document upsert. Listeners subscribed to `path` observe the
    /// new state.
    async fn save(&self, path: &DocPath, record: &SubmissionRecord) -> Result<(), StoreError>;

    /// Live subscription to `path`; the first emission carries current
    /// state (or absence).
    async fn watch(&self, path: &DocPath) -> Result<DocWatch, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doc_path_key_layout() {
        let path = DocPath::evaluations("artifacts", "hackathon-2026", "Team-X");
        assert_eq!(
            path.key(),
            "artifacts/hackathon-2026/public/data/evaluations/Team-X"
        );
    }

    #[tokio::test]
    async fn doc_watch_cancel_is_idempotent() {
        let (_tx, rx) = watch::channel::<DocUpdate>(Ok(None));
        let mut w = DocWatch::new(rx);
        assert!(!w.is_cancelled());
        w.cancel();
        w.cancel();
        assert!(w.is_cancelled());
        assert!(w.next().await.is_none());
    }
}
