//! Score aggregation.
//!
//! Pure projections from raw scores to weighted scores and a total; no
//! I/O, deterministic, recomputed on every edit and on every load (the
//! persisted total is never trusted).

use crate::criteria::CATALOG;
use crate::model::{CriterionId, RawScores};
use std::collections::BTreeMap;

/// Weighted score per catalog criterion: `score * weight * 10`.
/// Criteria missing from `raw` count as 0; entries in `raw` for ids
/// outside the catalog are ignored.
pub fn weighted_scores(raw: &RawScores) -> BTreeMap<CriterionId, f64> {
    CATALOG
        .iter()
        .map(|c| {
            let score = raw.get(&c.id).copied().unwrap_or(0.0);
            (c.id, score * c.weight * 10.0)
        })
        .collect()
}

/// Sum of weighted scores, on a 100-point scale.
pub fn total_score(raw: &RawScores) -> f64 {
    weighted_scores(raw).values().sum()
}
