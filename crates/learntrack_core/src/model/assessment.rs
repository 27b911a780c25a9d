//! Assessment record.
//!
//! # Responsibility
//! - Hold one dated evaluation of a student: scores plus written feedback.
//! - Provide the field-overwrite primitive used by the per-date upsert.
//!
//! # Invariants
//! - `id` is stable and survives every overwrite.
//! - At most one assessment per calendar date within a student; enforced by
//!   `repo::assessment_repo`, not here.

use crate::model::scores::AssessmentScores;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable assessment identifier.
pub type AssessmentId = Uuid;

/// Stable student identifier.
pub type StudentId = Uuid;

/// Coach-written feedback attached to an assessment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub strengths: String,
    pub improvements: String,
    pub next_steps: String,
}

/// One dated evaluation of one student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub id: AssessmentId,
    pub student_id: StudentId,
    /// Instant of the assessment; only its calendar date matters for the
    /// one-per-day rule.
    pub date: DateTime<Utc>,
    pub scores: AssessmentScores,
    pub feedback: Feedback,
}

impl Assessment {
    /// Creates an assessment with every indicator unrated and empty feedback.
    pub fn empty(id: AssessmentId, student_id: StudentId, date: DateTime<Utc>) -> Self {
        Self {
            id,
            student_id,
            date,
            scores: AssessmentScores::empty(),
            feedback: Feedback::default(),
        }
    }

    /// Replaces date, scores and feedback with `source`'s values.
    ///
    /// `id` and `student_id` are kept.
    pub fn overwrite_from(&mut self, source: &Assessment) {
        self.date = source.date;
        self.scores = source.scores.clone();
        self.feedback = source.feedback.clone();
    }
}
