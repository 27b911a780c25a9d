//! Assessment collection operations over in-memory students.
//!
//! # Responsibility
//! - Reconcile a saved assessment with any record already on the same
//!   calendar date (`upsert_assessment`).
//! - Provide by-date, by-id and chronological lookups.
//! - Cascade student removal to the student's assessments.
//!
//! # Invariants
//! - After an upsert the student holds exactly one assessment for the saved
//!   calendar date.
//! - An upsert grows the collection by at most one record.
//! - Record ids survive overwrites; the surviving record on a date collision
//!   keeps the id of the record that was already on that date.
//! - Failed operations leave the collection unchanged.

use crate::model::assessment::{Assessment, AssessmentId, StudentId};
use crate::model::calendar::{same_calendar_day, DayPolicy};
use crate::model::student::Student;
use chrono::{DateTime, Utc};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Semantic failure of a collection operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    StudentNotFound(StudentId),
    AssessmentNotFound(AssessmentId),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StudentNotFound(id) => write!(f, "student not found: {id}"),
            Self::AssessmentNotFound(id) => write!(f, "assessment not found: {id}"),
        }
    }
}

impl Error for RepoError {}

/// How an upsert reconciled the incoming assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertAction {
    /// No record on that date and nothing being edited; appended as new.
    Appended,
    /// An existing record (same date, or the edited one) was overwritten.
    Overwritten,
    /// The edited record moved onto a date that already had a record: that
    /// record was overwritten and the edited one removed.
    MergedIntoExisting { removed: AssessmentId },
}

/// Result of `upsert_assessment`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpsertOutcome {
    /// The record as stored after the upsert.
    pub assessment: Assessment,
    pub action: UpsertAction,
    /// Stale same-date duplicates dropped while enforcing one-per-day.
    pub dropped_duplicates: Vec<AssessmentId>,
}

pub fn find_student(students: &[Student], student_id: StudentId) -> RepoResult<&Student> {
    students
        .iter()
        .find(|student| student.id == student_id)
        .ok_or(RepoError::StudentNotFound(student_id))
}

fn find_student_mut(
    students: &mut [Student],
    student_id: StudentId,
) -> RepoResult<&mut Student> {
    students
        .iter_mut()
        .find(|student| student.id == student_id)
        .ok_or(RepoError::StudentNotFound(student_id))
}

/// Finds the student's assessment on the calendar date of `date`.
///
/// With stale duplicates present, the first one in insertion order wins.
pub fn find_by_date(
    students: &[Student],
    student_id: StudentId,
    date: DateTime<Utc>,
    policy: DayPolicy,
) -> RepoResult<Option<&Assessment>> {
    let student = find_student(students, student_id)?;
    Ok(student
        .assessments
        .iter()
        .find(|assessment| same_calendar_day(assessment.date, date, policy)))
}

pub fn find_by_id(
    students: &[Student],
    student_id: StudentId,
    assessment_id: AssessmentId,
) -> RepoResult<Option<&Assessment>> {
    Ok(find_student(students, student_id)?.assessment(assessment_id))
}

/// Assessments sorted newest first.
///
/// The sort is stable: assessments with identical instants keep insertion
/// order, so the earlier-inserted one ranks first.
pub fn newest_first(assessments: &[Assessment]) -> Vec<&Assessment> {
    let mut sorted: Vec<&Assessment> = assessments.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
}

/// Most recent assessment, ties broken by insertion order.
pub fn latest_assessment(assessments: &[Assessment]) -> Option<&Assessment> {
    newest_first(assessments).into_iter().next()
}

/// Up to `limit` most recent assessments, newest first.
pub fn recent_assessments(assessments: &[Assessment], limit: usize) -> Vec<&Assessment> {
    let mut sorted = newest_first(assessments);
    sorted.truncate(limit);
    sorted
}

/// Saves `incoming` into the student's collection, keeping one record per
/// calendar date.
///
/// `editing` names the record the caller opened for editing, if any. When it is
/// `None` but `incoming.id` already exists in the collection, that record is
/// treated as the one being edited.
///
/// Reconciliation:
/// 1. A record already on `incoming`'s date that is the edited record (or no
///    record is being edited) is overwritten in place. When the edited record
///    is one of several stale records on that date, it is the one kept.
/// 2. A record already on the date that differs from the edited record is
///    overwritten and the edited record is removed.
/// 3. With no record on the date, the edited record is overwritten in place,
///    otherwise `incoming` is appended.
///
/// # Errors
/// - `StudentNotFound` when `student_id` is unknown.
/// - `AssessmentNotFound` when `editing` names a record the student does not
///   have.
pub fn upsert_assessment(
    students: &mut [Student],
    student_id: StudentId,
    incoming: &Assessment,
    editing: Option<AssessmentId>,
    policy: DayPolicy,
) -> RepoResult<UpsertOutcome> {
    let student = find_student_mut(students, student_id)?;
    let assessments = &mut student.assessments;

    let edited_index = match editing {
        Some(id) => Some(
            assessments
                .iter()
                .position(|assessment| assessment.id == id)
                .ok_or(RepoError::AssessmentNotFound(id))?,
        ),
        None => assessments
            .iter()
            .position(|assessment| assessment.id == incoming.id),
    };
    // An edited record already on the date wins over other same-date duplicates.
    let on_date_index = match edited_index {
        Some(edited) if same_calendar_day(assessments[edited].date, incoming.date, policy) => {
            Some(edited)
        }
        _ => assessments
            .iter()
            .position(|assessment| same_calendar_day(assessment.date, incoming.date, policy)),
    };

    let (target_index, action) = match (on_date_index, edited_index) {
        (Some(on_date), Some(edited)) if on_date != edited => (
            on_date,
            UpsertAction::MergedIntoExisting {
                removed: assessments[edited].id,
            },
        ),
        (Some(on_date), _) => (on_date, UpsertAction::Overwritten),
        (None, Some(edited)) => (edited, UpsertAction::Overwritten),
        (None, None) => {
            let mut appended = incoming.clone();
            appended.student_id = student_id;
            assessments.push(appended);
            (assessments.len() - 1, UpsertAction::Appended)
        }
    };

    if action != UpsertAction::Appended {
        assessments[target_index].overwrite_from(incoming);
    }
    let target_id = assessments[target_index].id;

    let mut dropped_duplicates = Vec::new();
    assessments.retain(|assessment| {
        if assessment.id == target_id {
            return true;
        }
        if let UpsertAction::MergedIntoExisting { removed } = action {
            if assessment.id == removed {
                return false;
            }
        }
        if same_calendar_day(assessment.date, incoming.date, policy) {
            dropped_duplicates.push(assessment.id);
            return false;
        }
        true
    });

    let assessment = assessments
        .iter()
        .find(|assessment| assessment.id == target_id)
        .cloned()
        .ok_or(RepoError::AssessmentNotFound(target_id))?;

    Ok(UpsertOutcome {
        assessment,
        action,
        dropped_duplicates,
    })
}

/// Removes a student together with all of its assessments.
pub fn remove_student(students: &mut Vec<Student>, student_id: StudentId) -> RepoResult<Student> {
    let index = students
        .iter()
        .position(|student| student.id == student_id)
        .ok_or(RepoError::StudentNotFound(student_id))?;
    Ok(students.remove(index))
}

#[cfg(test)]
mod tests {
    use super::{latest_assessment, newest_first, recent_assessments};
    use crate::model::assessment::Assessment;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn at(n: u128, month: u32, day: u32, hour: u32) -> Assessment {
        Assessment::empty(
            Uuid::from_u128(n),
            Uuid::from_u128(999),
            Utc.with_ymd_and_hms(2024, month, day, hour, 0, 0).unwrap(),
        )
    }

    #[test]
    fn newest_first_sorts_descending_by_instant() {
        let list = vec![at(1, 3, 1, 9), at(2, 5, 1, 9), at(3, 4, 1, 9)];
        let ids: Vec<u128> = newest_first(&list)
            .into_iter()
            .map(|assessment| assessment.id.as_u128())
            .collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn identical_instants_keep_insertion_order() {
        let list = vec![at(1, 3, 1, 9), at(2, 6, 1, 9), at(3, 6, 1, 9)];
        let latest = latest_assessment(&list).expect("non-empty list");
        assert_eq!(latest.id.as_u128(), 2);
    }

    #[test]
    fn recent_assessments_caps_the_count() {
        let list = vec![at(1, 1, 1, 9), at(2, 2, 1, 9), at(3, 3, 1, 9)];
        assert_eq!(recent_assessments(&list, 2).len(), 2);
        assert_eq!(recent_assessments(&list, 10).len(), 3);
        assert!(latest_assessment(&[]).is_none());
    }
}
