//! scoresheet-core: real-time judged evaluation sheets.
//!
//! A judge picks a submission id, scores it against a fixed weighted
//! criteria catalog and saves the result into a shared document store.
//! Every judge owns one sub-record inside the submission's document;
//! saves merge into the latest record so concurrent judges never clobber
//! each other. Live subscriptions push remote changes back into the form.

pub mod client;
pub mod config;
pub mod criteria;
pub mod form;
pub mod identity;
pub mod model;
pub mod scoring;
pub mod store;

pub use client::{EvaluationStore, EvaluationSubscription, RecordSnapshot, StorePrefix};
pub use form::{EvaluationForm, FormPhase, SaveError, StatusTone};
pub use identity::IdentityProvider;
pub use model::{JudgeEvaluation, SubmissionRecord};
pub use store::{DocPath, DocumentStore, StoreError};
