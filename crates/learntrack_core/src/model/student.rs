//! Student profile record.
//!
//! # Invariants
//! - A student exclusively owns its assessments.
//! - `assessments` keeps insertion order; chronological views are derived.

use crate::model::assessment::{Assessment, AssessmentId, StudentId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    pub grade: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub assessments: Vec<Assessment>,
}

impl Student {
    pub fn new(
        id: StudentId,
        name: impl Into<String>,
        grade: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            grade: grade.into(),
            created_at,
            assessments: Vec::new(),
        }
    }

    pub fn assessment(&self, id: AssessmentId) -> Option<&Assessment> {
        self.assessments.iter().find(|assessment| assessment.id == id)
    }
}
