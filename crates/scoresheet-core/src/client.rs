//! Evaluation store client.
//!
//! Wraps an injected [`DocumentStore`] and scopes it to the evaluations
//! path prefix. All read-modify-write merging for judge sub-records lives
//! here; the form controller never touches raw documents.

use crate::model::{JudgeEvaluation, SubmissionRecord};
use crate::store::{DocPath, DocUpdate, DocWatch, DocumentStore, StoreError};
use std::sync::Arc;

/// Namespace half of the compound document key, fixed per deployment.
#[derive(Debug, Clone)]
pub struct StorePrefix {
    pub namespace: String,
    pub app_instance_id: String,
}

impl StorePrefix {
    pub fn new(namespace: impl Into<String>, app_instance_id: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            app_instance_id: app_instance_id.into(),
        }
    }
}

/// One emission from an [`EvaluationSubscription`], tagged with the
/// submission id it originated from so stale updates can be detected
/// after the active submission changed.
#[derive(Debug)]
pub struct RecordSnapshot {
    pub submission_id: String,
    pub update: DocUpdate,
}

/// Cancellable live subscription to one submission's record.
pub struct EvaluationSubscription {
    submission_id: String,
    watch: DocWatch,
}

impl EvaluationSubscription {
    pub fn submission_id(&self) -> &str {
        &self.submission_id
    }

    /// Next snapshot; `None` once cancelled or the backend went away.
    pub async fn next(&mut self) -> Option<RecordSnapshot> {
        let update = self.watch.next().await?;
        Some(RecordSnapshot {
            submission_id: self.submission_id.clone(),
            update,
        })
    }

    /// Idempotent.
    pub fn cancel(&mut self) {
        self.watch.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.watch.is_cancelled()
    }
}

/// Client for the shared evaluation documents, one submission at a time.
#[derive(Clone)]
pub struct EvaluationStore {
    store: Arc<dyn DocumentStore>,
    prefix: StorePrefix,
}

impl EvaluationStore {
    pub fn new(store: Arc<dyn DocumentStore>, prefix: StorePrefix) -> Self {
        Self { store, prefix }
    }

    fn path(&self, submission_id: &str) -> DocPath {
        DocPath::evaluations(
            self.prefix.namespace.clone(),
            self.prefix.app_instance_id.clone(),
            submission_id,
        )
    }

    /// Establish a live subscription. The caller owns exactly one at a
    /// time and must cancel it before subscribing to another submission.
    pub async fn subscribe(
        &self,
        submission_id: &str,
    ) -> Result<EvaluationSubscription, StoreError> {
        let watch = self.store.watch(&self.path(submission_id)).await?;
        Ok(EvaluationSubscription {
            submission_id: submission_id.to_string(),
            watch,
        })
    }

    /// Point read of the latest record, used immediately before a save to
    /// minimize lost updates from other judges saving concurrently.
    pub async fn load_current(
        &self,
        submission_id: &str,
    ) -> Result<Option<SubmissionRecord>, StoreError> {
        self.store.load(&self.path(submission_id)).await
    }

    /// Insert or replace this judge's sub-record in the latest known
    /// record and write the whole document back.
    ///
    /// The read-modify-write is best effort, not a serializable
    /// transaction: two judges saving near-simultaneously can both read
    /// before either writes, and the first write's unrelated sibling data
    /// may be lost. Accepted limitation.
    pub async fn save_evaluation(
        &self,
        submission_id: &str,
        judge_identity: &str,
        evaluation: JudgeEvaluation,
    ) -> Result<(), StoreError> {
        let mut record = self
            .load_current(submission_id)
            .await?
            .unwrap_or_default();
        record
            .evaluations
            .insert(judge_identity.to_string(), evaluation);
        self.store.save(&self.path(submission_id), &record).await?;
        tracing::debug!(
            submission = submission_id,
            judge = judge_identity,
            judges = record.evaluations.len(),
            "evaluation saved"
        );
        Ok(())
    }
}
