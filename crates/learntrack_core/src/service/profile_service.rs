//! Student profile use-case service.
//!
//! # Responsibility
//! - Own the in-memory student collection for one local client.
//! - Run student and assessment use-cases and persist after every mutation.
//!
//! # Invariants
//! - The in-memory collection is the source of truth. A failed save is
//!   reported to the caller but does not roll back in-memory state; the next
//!   successful save (or `flush`) persists it.
//! - A store that cannot be read opens as an empty collection.
//! - Drafts returned by `begin_assessment` are not part of the collection
//!   until `save_assessment` commits them.

use crate::model::assessment::{Assessment, AssessmentId, StudentId};
use crate::model::calendar::DayPolicy;
use crate::model::student::Student;
use crate::repo::assessment_repo::{
    self, RepoError, UpsertAction, UpsertOutcome,
};
use crate::repo::student_store::{StoreError, StudentStore};
use crate::service::collaborators::{Clock, IdGenerator, SystemClock, UuidV4Generator};
use chrono::{DateTime, NaiveDate, Utc};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for profile use-cases.
#[derive(Debug)]
pub enum ProfileServiceError {
    /// Named student field is blank after trim.
    InvalidStudentField(&'static str),
    StudentNotFound(StudentId),
    AssessmentNotFound(AssessmentId),
    /// In-memory state changed but could not be written to the store.
    Persist(StoreError),
}

impl Display for ProfileServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidStudentField(field) => write!(f, "student {field} must not be blank"),
            Self::StudentNotFound(id) => write!(f, "student not found: {id}"),
            Self::AssessmentNotFound(id) => write!(f, "assessment not found: {id}"),
            Self::Persist(err) => write!(f, "failed to persist students: {err}"),
        }
    }
}

impl Error for ProfileServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Persist(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ProfileServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::StudentNotFound(id) => Self::StudentNotFound(id),
            RepoError::AssessmentNotFound(id) => Self::AssessmentNotFound(id),
        }
    }
}

pub type ServiceResult<T> = Result<T, ProfileServiceError>;

/// Profile service facade over a student store.
pub struct ProfileService<S, C = SystemClock, G = UuidV4Generator>
where
    S: StudentStore,
    C: Clock,
    G: IdGenerator,
{
    store: S,
    clock: C,
    ids: G,
    day_policy: DayPolicy,
    students: Vec<Student>,
}

impl<S: StudentStore> ProfileService<S> {
    /// Opens the service with the wall clock and random ids.
    pub fn open(store: S, day_policy: DayPolicy) -> Self {
        Self::with_collaborators(store, SystemClock, UuidV4Generator, day_policy)
    }
}

impl<S, C, G> ProfileService<S, C, G>
where
    S: StudentStore,
    C: Clock,
    G: IdGenerator,
{
    /// Opens the service, loading the current collection from `store`.
    ///
    /// # Side effects
    /// - Emits `store_load` events. A load failure is logged at `warn` and the
    ///   service starts from an empty collection.
    pub fn with_collaborators(store: S, clock: C, ids: G, day_policy: DayPolicy) -> Self {
        let students = match store.load() {
            Ok(students) => {
                info!(
                    "event=store_load module=service status=ok students={}",
                    students.len()
                );
                students
            }
            Err(err) => {
                warn!(
                    "event=store_load module=service status=error fallback=empty error={}",
                    err
                );
                Vec::new()
            }
        };

        Self {
            store,
            clock,
            ids,
            day_policy,
            students,
        }
    }

    pub fn day_policy(&self) -> DayPolicy {
        self.day_policy
    }

    /// Calendar date of the clock's current instant.
    pub fn today(&self) -> NaiveDate {
        self.day_policy.calendar_day(self.clock.now())
    }

    /// All students in insertion order.
    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn student(&self, student_id: StudentId) -> ServiceResult<&Student> {
        Ok(assessment_repo::find_student(&self.students, student_id)?)
    }

    /// Creates one student from trimmed name and grade.
    ///
    /// # Errors
    /// - `InvalidStudentField` when name or grade is blank; nothing changes.
    /// - `Persist` when the store write fails; the student stays in memory.
    pub fn add_student(
        &mut self,
        name: impl Into<String>,
        grade: impl Into<String>,
    ) -> ServiceResult<Student> {
        let name = normalize_field(name.into(), "name")?;
        let grade = normalize_field(grade.into(), "grade")?;

        let student = Student::new(self.ids.new_id(), name, grade, self.clock.now());
        self.students.push(student.clone());
        info!(
            "event=student_add module=service status=ok student_id={}",
            student.id
        );

        self.persist()?;
        Ok(student)
    }

    /// Deletes a student and all of its assessments.
    pub fn remove_student(&mut self, student_id: StudentId) -> ServiceResult<Student> {
        let removed = assessment_repo::remove_student(&mut self.students, student_id)?;
        info!(
            "event=student_remove module=service status=ok student_id={} assessments={}",
            removed.id,
            removed.assessments.len()
        );

        self.persist()?;
        Ok(removed)
    }

    /// Starts an empty assessment for a student.
    ///
    /// The draft is dated `date`, or the clock's current instant when `None`.
    pub fn begin_assessment(
        &self,
        student_id: StudentId,
        date: Option<DateTime<Utc>>,
    ) -> ServiceResult<Assessment> {
        let student = self.student(student_id)?;
        let date = date.unwrap_or_else(|| self.clock.now());
        Ok(Assessment::empty(self.ids.new_id(), student.id, date))
    }

    /// Returns an editable copy of a stored assessment.
    pub fn begin_edit(
        &self,
        student_id: StudentId,
        assessment_id: AssessmentId,
    ) -> ServiceResult<Assessment> {
        self.assessment(student_id, assessment_id).cloned()
    }

    /// Commits a draft through the one-per-day upsert and persists.
    ///
    /// `editing` is the id of the stored assessment the draft was opened from.
    ///
    /// # Errors
    /// - `StudentNotFound` / `AssessmentNotFound`; the collection is unchanged.
    /// - `Persist` when the store write fails; the upsert stays in memory.
    pub fn save_assessment(
        &mut self,
        student_id: StudentId,
        draft: &Assessment,
        editing: Option<AssessmentId>,
    ) -> ServiceResult<UpsertOutcome> {
        let outcome = assessment_repo::upsert_assessment(
            &mut self.students,
            student_id,
            draft,
            editing,
            self.day_policy,
        )?;

        info!(
            "event=assessment_upsert module=service status=ok student_id={} assessment_id={} action={} dropped_duplicates={}",
            student_id,
            outcome.assessment.id,
            action_name(outcome.action),
            outcome.dropped_duplicates.len()
        );

        self.persist()?;
        Ok(outcome)
    }

    pub fn assessment(
        &self,
        student_id: StudentId,
        assessment_id: AssessmentId,
    ) -> ServiceResult<&Assessment> {
        assessment_repo::find_by_id(&self.students, student_id, assessment_id)?
            .ok_or(ProfileServiceError::AssessmentNotFound(assessment_id))
    }

    /// The student's assessment on the calendar date of `date`, if any.
    pub fn find_by_date(
        &self,
        student_id: StudentId,
        date: DateTime<Utc>,
    ) -> ServiceResult<Option<&Assessment>> {
        Ok(assessment_repo::find_by_date(
            &self.students,
            student_id,
            date,
            self.day_policy,
        )?)
    }

    pub fn latest_assessment(&self, student_id: StudentId) -> ServiceResult<Option<&Assessment>> {
        let student = self.student(student_id)?;
        Ok(assessment_repo::latest_assessment(&student.assessments))
    }

    /// Up to `limit` most recent assessments, newest first.
    pub fn recent_assessments(
        &self,
        student_id: StudentId,
        limit: usize,
    ) -> ServiceResult<Vec<&Assessment>> {
        let student = self.student(student_id)?;
        Ok(assessment_repo::recent_assessments(&student.assessments, limit))
    }

    /// Writes the current in-memory collection to the store.
    pub fn flush(&self) -> ServiceResult<()> {
        self.persist()
    }

    fn persist(&self) -> ServiceResult<()> {
        match self.store.save(&self.students) {
            Ok(()) => {
                info!(
                    "event=store_save module=service status=ok students={}",
                    self.students.len()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=store_save module=service status=error students={} error={}",
                    self.students.len(),
                    err
                );
                Err(ProfileServiceError::Persist(err))
            }
        }
    }
}

fn normalize_field(value: String, field: &'static str) -> ServiceResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ProfileServiceError::InvalidStudentField(field));
    }
    Ok(trimmed.to_string())
}

fn action_name(action: UpsertAction) -> &'static str {
    match action {
        UpsertAction::Appended => "appended",
        UpsertAction::Overwritten => "overwritten",
        UpsertAction::MergedIntoExisting { .. } => "merged",
    }
}
