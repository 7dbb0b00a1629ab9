//! Form state controller.
//!
//! Owns the transient form state for exactly one judge and orchestrates
//! subscription, scoring and save. Remote snapshots flow in one direction
//! only: they populate local state when their origin submission id still
//! matches the active one, which keeps a save's own echo and late
//! emissions from superseded subscriptions from looping back.

use crate::client::{EvaluationStore, EvaluationSubscription, RecordSnapshot};
use crate::criteria::{self, clamp_score};
use crate::identity::IdentityProvider;
use crate::model::{CriterionId, JudgeEvaluation, RawScores};
use crate::scoring;
use crate::store::StoreError;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

/// Lifecycle of the form with respect to the remote store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    NoSubmission,
    Loading,
    LoadedEmpty,
    LoadedWithData,
    Saving,
    SaveSucceeded,
    SaveFailed,
    LoadError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Info,
    Success,
    Error,
}

/// User-visible status line. Every load/save outcome updates it; no
/// failure is silently swallowed.
#[derive(Debug, Clone)]
pub struct StatusLine {
    pub message: String,
    pub tone: StatusTone,
}

/// Save rejections and failures. The form also reflects each of these in
/// its phase and status line; the error value is for programmatic callers.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("no submission id entered")]
    EmptySubmissionId,

    #[error("judge identity not ready")]
    IdentityNotReady,

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub struct EvaluationForm {
    store: EvaluationStore,
    identity: Arc<dyn IdentityProvider>,
    phase: FormPhase,
    status: StatusLine,
    submission_id: String,
    team_leader_name: String,
    scores: RawScores,
    comments: String,
    subscription: Option<EvaluationSubscription>,
}

impl EvaluationForm {
    pub fn new(store: EvaluationStore, identity: Arc<dyn IdentityProvider>) -> Self {
        Self {
            store,
            identity,
            phase: FormPhase::NoSubmission,
            status: StatusLine {
                message: "Enter a submission id to load data.".to_string(),
                tone: StatusTone::Info,
            },
            submission_id: String::new(),
            team_leader_name: String::new(),
            scores: RawScores::new(),
            comments: String::new(),
            subscription: None,
        }
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn status(&self) -> &StatusLine {
        &self.status
    }

    pub fn submission_id(&self) -> &str {
        &self.submission_id
    }

    pub fn scores(&self) -> &RawScores {
        &self.scores
    }

    pub fn comments(&self) -> &str {
        &self.comments
    }

    pub fn team_leader_name(&self) -> &str {
        &self.team_leader_name
    }

    pub fn weighted_scores(&self) -> BTreeMap<CriterionId, f64> {
        scoring::weighted_scores(&self.scores)
    }

    pub fn total_score(&self) -> f64 {
        scoring::total_score(&self.scores)
    }

    /// Switch the active submission. Cancels any prior subscription first
    /// so no stale callbacks can apply to a superseded id. An empty id
    /// returns the form to `NoSubmission` with fields retained as-is.
    pub async fn select_submission(&mut self, submission_id: &str) {
        self.cancel_subscription();
        self.submission_id = submission_id.trim().to_string();

        if self.submission_id.is_empty() {
            self.phase = FormPhase::NoSubmission;
            self.set_status(StatusTone::Info, "Enter a submission id to load data.");
            return;
        }

        self.phase = FormPhase::Loading;
        self.set_status(StatusTone::Info, "Loading evaluation data...");
        match self.store.subscribe(&self.submission_id).await {
            Ok(sub) => self.subscription = Some(sub),
            Err(e) => {
                tracing::warn!(submission = %self.submission_id, error = %e, "subscribe failed");
                self.phase = FormPhase::LoadError;
                self.set_status(
                    StatusTone::Error,
                    format!("Could not load evaluation data: {e}"),
                );
            }
        }
    }

    /// Await the next snapshot from the active subscription. Returns
    /// `None` when there is no subscription or it has been cancelled.
    /// The driver loop feeds the result to [`Self::apply_snapshot`].
    pub async fn next_remote_change(&mut self) -> Option<RecordSnapshot> {
        self.subscription.as_mut()?.next().await
    }

    /// Apply a remote snapshot to local state, guarded by origin id:
    /// snapshots from any submission other than the active one are
    /// dropped, so a late emission for "Team-X" cannot mutate the form
    /// after the judge switched to "Team-Y".
    pub fn apply_snapshot(&mut self, snapshot: RecordSnapshot) {
        if snapshot.submission_id != self.submission_id {
            tracing::debug!(
                origin = %snapshot.submission_id,
                active = %self.submission_id,
                "ignoring snapshot from superseded subscription"
            );
            return;
        }

        match snapshot.update {
            Err(e) => {
                // Prior local state stays untouched so nothing is lost.
                self.phase = FormPhase::LoadError;
                self.set_status(
                    StatusTone::Error,
                    format!("Could not load evaluation data: {e}"),
                );
            }
            Ok(None) => {
                self.clear_fields();
                self.phase = FormPhase::LoadedEmpty;
                self.set_status(
                    StatusTone::Info,
                    "Submission not found. You can begin a new evaluation.",
                );
            }
            Ok(Some(record)) => {
                let mine = self
                    .identity
                    .judge_identity()
                    .and_then(|judge| record.evaluations.get(&judge).cloned());
                match mine {
                    Some(eval) => self.populate_from(eval),
                    None => {
                        self.clear_fields();
                        self.phase = FormPhase::LoadedEmpty;
                        self.set_status(
                            StatusTone::Info,
                            "No previous evaluation found for this submission. You can begin a new one.",
                        );
                    }
                }
            }
        }
    }

    /// Set one criterion's score, clamped into [0, 10]. Ids outside the
    /// catalog are ignored. Local-only; no phase transition.
    pub fn set_score(&mut self, id: CriterionId, value: f64) {
        if criteria::by_id(id).is_none() {
            tracing::debug!(criterion = id, "ignoring score for unknown criterion");
            return;
        }
        self.scores.insert(id, clamp_score(value));
    }

    /// Local-only; no phase transition.
    pub fn set_comments(&mut self, text: impl Into<String>) {
        self.comments = text.into();
    }

    /// Local-only; no phase transition.
    pub fn set_team_leader_name(&mut self, name: impl Into<String>) {
        self.team_leader_name = name.into();
    }

    /// Save this judge's evaluation into the shared record.
    ///
    /// Empty submission id is rejected synchronously without I/O; a not
    /// yet settled identity is a transient rejection ("wait and save
    /// again"). Local edits are preserved in every outcome, and the live
    /// subscription delivers the echo of a successful write.
    pub async fn save(&mut self) -> Result<(), SaveError> {
        if self.submission_id.is_empty() {
            self.set_status(StatusTone::Error, "Enter a submission id to save.");
            return Err(SaveError::EmptySubmissionId);
        }
        let Some(judge) = self.identity.judge_identity() else {
            self.set_status(
                StatusTone::Info,
                "Authentication not ready. Wait a moment and save again.",
            );
            return Err(SaveError::IdentityNotReady);
        };

        self.phase = FormPhase::Saving;
        self.set_status(StatusTone::Info, "Saving evaluation...");

        let evaluation = JudgeEvaluation {
            scores: self.scores.clone(),
            comments: self.comments.clone(),
            total_score: self.total_score(),
            judge_identity: judge.clone(),
            submitted_at: Utc::now(),
            team_leader_name: if self.team_leader_name.is_empty() {
                None
            } else {
                Some(self.team_leader_name.clone())
            },
        };

        match self
            .store
            .save_evaluation(&self.submission_id, &judge, evaluation)
            .await
        {
            Ok(()) => {
                self.phase = FormPhase::SaveSucceeded;
                self.set_status(StatusTone::Success, "Evaluation saved successfully.");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(submission = %self.submission_id, error = %e, "save failed");
                self.phase = FormPhase::SaveFailed;
                self.set_status(StatusTone::Error, format!("Could not save evaluation: {e}"));
                Err(e.into())
            }
        }
    }

    fn populate_from(&mut self, eval: JudgeEvaluation) {
        // Remote values pass through the same clamp as local input; the
        // stored total is discarded and recomputed from raw scores.
        self.scores = eval
            .scores
            .into_iter()
            .filter(|(id, _)| criteria::by_id(*id).is_some())
            .map(|(id, v)| (id, clamp_score(v)))
            .collect();
        self.comments = eval.comments;
        self.team_leader_name = eval.team_leader_name.unwrap_or_default();
        self.phase = FormPhase::LoadedWithData;
        self.set_status(StatusTone::Success, "Evaluation loaded successfully.");
    }

    fn clear_fields(&mut self) {
        self.scores.clear();
        self.comments.clear();
        self.team_leader_name.clear();
    }

    fn cancel_subscription(&mut self) {
        if let Some(sub) = self.subscription.as_mut() {
            sub.cancel();
        }
        self.subscription = None;
    }

    fn set_status(&mut self, tone: StatusTone, message: impl Into<String>) {
        self.status = StatusLine {
            message: message.into(),
            tone,
        };
    }
}
