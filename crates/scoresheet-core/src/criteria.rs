//! Fixed scoring catalog.
//!
//! The catalog is compiled in and immutable at runtime; it is the single
//! source of truth for the scoring math in [`crate::scoring`].

use crate::model::{Criterion, CriterionId};

pub const CATALOG: [Criterion; 7] = [
    Criterion {
        id: 1,
        name: "Problem Statement Clarity",
        description: "How well the problem and its significance are defined in the PPT/video.",
        weight: 0.15,
    },
    Criterion {
        id: 2,
        name: "Innovation & Originality",
        description: "Novelty of the idea and differentiation from existing solutions.",
        weight: 0.20,
    },
    Criterion {
        id: 3,
        name: "Relevance to Theme / Track",
        description: "Alignment of the idea with the hackathon theme/problem statement.",
        weight: 0.10,
    },
    Criterion {
        id: 4,
        name: "Solution Approach & Feasibility",
        description: "Practicality, technical soundness, and completeness of the proposed solution.",
        weight: 0.20,
    },
    Criterion {
        id: 5,
        name: "Impact & Scalability",
        description: "Potential reach, benefits, and long-term sustainability.",
        weight: 0.15,
    },
    Criterion {
        id: 6,
        name: "Presentation Quality (PPT)",
        description: "Visual clarity, structure, adherence to template/logos.",
        weight: 0.10,
    },
    Criterion {
        id: 7,
        name: "Video Quality & Communication",
        description: "Clarity of narration, visuals, time management, and engagement.",
        weight: 0.10,
    },
];

/// Scores run on a 0..=10 scale with 0.5 steps in the UI.
pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 10.0;

pub fn by_id(id: CriterionId) -> Option<&'static Criterion> {
    CATALOG.iter().find(|c| c.id == id)
}

/// Clamp a raw score into the valid range. NaN maps to 0 so a garbled
/// input can never poison the aggregate.
pub fn clamp_score(value: f64) -> f64 {
    if value.is_nan() {
        MIN_SCORE
    } else {
        value.clamp(MIN_SCORE, MAX_SCORE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_ids_are_stable_and_unique() {
        for (i, c) in CATALOG.iter().enumerate() {
            assert_eq!(c.id, (i + 1) as CriterionId);
        }
    }

    #[test]
    fn catalog_weights_sum_to_one() {
        let sum: f64 = CATALOG.iter().map(|c| c.weight).sum();
        assert!((sum - 1.0).abs() < 1e-9, "weights sum to {sum}");
    }

    #[test]
    fn clamp_bounds() {
        assert_eq!(clamp_score(-3.0), 0.0);
        assert_eq!(clamp_score(15.0), 10.0);
        assert_eq!(clamp_score(7.5), 7.5);
        assert_eq!(clamp_score(f64::NAN), 0.0);
    }

    #[test]
    fn lookup_by_id() {
        assert_eq!(by_id(2).unwrap().name, "Innovation & Originality");
        assert!(by_id(0).is_none());
        assert!(by_id(8).is_none());
    }
}
