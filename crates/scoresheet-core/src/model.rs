//! Wire-shape data model for submission records.
//!
//! Field names serialize in camelCase to stay compatible with documents
//! written by earlier deployments of the evaluation sheet.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Stable criterion id, 1..N within the compiled-in catalog.
pub type CriterionId = u32;

/// Raw per-criterion scores as entered by the judge. Values are clamped
/// into [0, 10] at the point of entry and never stored out of range.
pub type RawScores = BTreeMap<CriterionId, f64>;

/// One entry of the scoring catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct Criterion {
    pub id: CriterionId,
    pub name: &'static str,
    pub description: &'static str,
    /// Weight in (0, 1]. Catalog weights sum to ~1.0 for a 100-point scale.
    pub weight: f64,
}

/// One judge's evaluation of one submission.
///
/// Owned exclusively by a single judge identity and overwritten wholesale
/// on every save by that judge. `total_score` is persisted for readers of
/// the raw document but is always recomputed locally on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JudgeEvaluation {
    #[serde(default)]
    pub scores: RawScores,
    #[serde(default)]
    pub comments: String,
    pub total_score: f64,
    pub judge_identity: String,
    pub submitted_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_leader_name: Option<String>,
}

/// The full shared document for one submission: all judges' evaluations,
/// keyed by judge identity. Read fully, mutated minimally, written back
/// fully on each save so sibling judges' entries survive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    #[serde(default)]
    pub evaluations: BTreeMap<String, JudgeEvaluation>,
}
