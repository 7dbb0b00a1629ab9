//! In-memory document store.
//!
//! Backs tests and ephemeral single-process runs. Each document key owns
//! a watch channel; saves publish the new record to every subscriber.

use super::{DocPath, DocUpdate, DocWatch, DocumentStore, StoreError};
use crate::model::SubmissionRecord;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use tokio::sync::watch;

struct Entry {
    current: Option<SubmissionRecord>,
    tx: watch::Sender<DocUpdate>,
}

impl Entry {
    fn absent() -> Self {
        let (tx, _rx) = watch::channel(Ok(None));
        Self { current: None, tx }
    }
}

#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Entry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn load(&self, path: &DocPath) -> Result<Option<SubmissionRecord>, StoreError> {
        let entries = self.entries.lock().unwrap();
        Ok(entries.get(&path.key()).and_then(|e| e.current.clone()))
    }

    async fn save(&self, path: &DocPath, record: &SubmissionRecord) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().unwrap();
        let entry = entries.entry(path.key()).or_insert_with(Entry::absent);
        entry.current = Some(record.clone());
        entry.tx.send_replace(Ok(Some(record.clone())));
        Ok(())
    }

    async fn watch(&self, path: &DocPath) -> Result<DocWatch, StoreError> {
        let mut entries = self.entries.lock().unwrap();
        let entry = entries.entry(path.key()).or_insert_with(Entry::absent);
        // The channel value always tracks `current`, so a fresh receiver's
        // first borrow is the state at subscribe time.
        Ok(DocWatch::new(entry.tx.subscribe()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::JudgeEvaluation;
    use chrono::Utc;
    use std::collections::BTreeMap;

    fn record_with(judge: &str) -> SubmissionRecord {
        let mut record = SubmissionRecord::default();
        record.evaluations.insert(
            judge.to_string(),
            JudgeEvaluation {
                scores: BTreeMap::from([(1, 8.0)]),
                comments: String::new(),
                total_score: 12.0,
                judge_identity: judge.to_string(),
                submitted_at: Utc::now(),
                team_leader_name: None,
            },
        );
        record
    }

    fn path(submission: &str) -> DocPath {
        DocPath::evaluations("artifacts", "app-1", submission)
    }

    #[tokio::test]
    async fn load_absent_is_none() {
        let store = MemoryStore::new();
        assert_eq!(store.load(&path("Team-X")).await.unwrap(), None);
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let store = MemoryStore::new();
        let record = record_with("judge-a");
        store.save(&path("Team-X"), &record).await.unwrap();
        assert_eq!(store.load(&path("Team-X")).await.unwrap(), Some(record));
    }

    #[tokio::test]
    async fn watch_emits_current_state_first_then_changes() {
        let store = MemoryStore::new();
        let mut w = store.watch(&path("Team-X")).await.unwrap();
        assert_eq!(w.next().await.unwrap().unwrap(), None);

        let record = record_with("judge-a");
        store.save(&path("Team-X"), &record).await.unwrap();
        assert_eq!(w.next().await.unwrap().unwrap(), Some(record));
    }

    #[tokio::test]
    async fn watch_after_save_sees_existing_document() {
        let store = MemoryStore::new();
        let record = record_with("judge-a");
        store.save(&path("Team-X"), &record).await.unwrap();

        let mut w = store.watch(&path("Team-X")).await.unwrap();
        assert_eq!(w.next().await.unwrap().unwrap(), Some(record));
    }

    #[tokio::test]
    async fn documents_are_isolated_by_path() {
        let store = MemoryStore::new();
        store
            .save(&path("Team-X"), &record_with("judge-a"))
            .await
            .unwrap();
        assert_eq!(store.load(&path("Team-Y")).await.unwrap(), None);
    }
}
