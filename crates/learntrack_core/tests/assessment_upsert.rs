use chrono::{DateTime, TimeZone, Utc};
use learntrack_core::repo::assessment_repo::{find_by_date, remove_student, upsert_assessment};
use learntrack_core::{Assessment, DayPolicy, IndicatorKey, Rating, RepoError, Student, UpsertAction};
use uuid::Uuid;

const STUDENT: u128 = 1;
const OTHER_STUDENT: u128 = 2;

fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, day, hour, 0, 0).unwrap()
}

fn students() -> Vec<Student> {
    let created_at = at(1, 8);
    vec![
        Student::new(Uuid::from_u128(STUDENT), "Lin", "Grade 5", created_at),
        Student::new(Uuid::from_u128(OTHER_STUDENT), "Zhao", "Grade 6", created_at),
    ]
}

fn draft(id: u128, date: DateTime<Utc>, one_star: i64) -> Assessment {
    let mut assessment = Assessment::empty(Uuid::from_u128(id), Uuid::from_u128(STUDENT), date);
    assessment
        .scores
        .set_rating(IndicatorKey::OneStar, Rating::from_value(one_star).unwrap());
    assessment
}

fn assessments(students: &[Student]) -> &[Assessment] {
    &students[0].assessments
}

#[test]
fn first_save_on_a_date_appends() {
    let mut students = students();

    let outcome = upsert_assessment(
        &mut students,
        Uuid::from_u128(STUDENT),
        &draft(10, at(3, 9), 3),
        None,
        DayPolicy::Utc,
    )
    .unwrap();

    assert_eq!(outcome.action, UpsertAction::Appended);
    assert!(outcome.dropped_duplicates.is_empty());
    assert_eq!(assessments(&students).len(), 1);
    assert_eq!(assessments(&students)[0].id, Uuid::from_u128(10));
}

#[test]
fn new_draft_on_an_existing_date_overwrites_and_keeps_the_stored_id() {
    let mut students = students();
    let student_id = Uuid::from_u128(STUDENT);
    upsert_assessment(&mut students, student_id, &draft(10, at(3, 9), 3), None, DayPolicy::Utc)
        .unwrap();

    let outcome = upsert_assessment(
        &mut students,
        student_id,
        &draft(11, at(3, 17), 5),
        None,
        DayPolicy::Utc,
    )
    .unwrap();

    assert_eq!(outcome.action, UpsertAction::Overwritten);
    assert_eq!(assessments(&students).len(), 1);
    let stored = &assessments(&students)[0];
    assert_eq!(stored.id, Uuid::from_u128(10));
    assert_eq!(stored.date, at(3, 17));
    assert_eq!(stored.scores.rating(IndicatorKey::OneStar).value(), 5);
}

#[test]
fn saving_the_same_draft_twice_is_idempotent() {
    let mut students = students();
    let student_id = Uuid::from_u128(STUDENT);
    let incoming = draft(10, at(3, 9), 4);

    upsert_assessment(&mut students, student_id, &incoming, None, DayPolicy::Utc).unwrap();
    let after_first = students.clone();
    upsert_assessment(&mut students, student_id, &incoming, None, DayPolicy::Utc).unwrap();

    assert_eq!(students, after_first);
}

#[test]
fn editing_in_place_keeps_the_record() {
    let mut students = students();
    let student_id = Uuid::from_u128(STUDENT);
    upsert_assessment(&mut students, student_id, &draft(10, at(3, 9), 2), None, DayPolicy::Utc)
        .unwrap();

    let mut edited = assessments(&students)[0].clone();
    edited.feedback.strengths = "clear notes".to_string();
    let outcome = upsert_assessment(
        &mut students,
        student_id,
        &edited,
        Some(edited.id),
        DayPolicy::Utc,
    )
    .unwrap();

    assert_eq!(outcome.action, UpsertAction::Overwritten);
    assert_eq!(assessments(&students).len(), 1);
    assert_eq!(assessments(&students)[0].feedback.strengths, "clear notes");
}

#[test]
fn editing_onto_a_free_date_moves_the_record() {
    let mut students = students();
    let student_id = Uuid::from_u128(STUDENT);
    upsert_assessment(&mut students, student_id, &draft(10, at(3, 9), 2), None, DayPolicy::Utc)
        .unwrap();

    let mut edited = assessments(&students)[0].clone();
    edited.date = at(5, 9);
    let outcome = upsert_assessment(
        &mut students,
        student_id,
        &edited,
        Some(edited.id),
        DayPolicy::Utc,
    )
    .unwrap();

    assert_eq!(outcome.action, UpsertAction::Overwritten);
    assert_eq!(assessments(&students).len(), 1);
    assert_eq!(assessments(&students)[0].id, Uuid::from_u128(10));
    assert_eq!(assessments(&students)[0].date, at(5, 9));
}

#[test]
fn editing_onto_an_occupied_date_merges_into_the_existing_record() {
    let mut students = students();
    let student_id = Uuid::from_u128(STUDENT);
    upsert_assessment(&mut students, student_id, &draft(10, at(3, 9), 2), None, DayPolicy::Utc)
        .unwrap();
    upsert_assessment(&mut students, student_id, &draft(20, at(4, 9), 3), None, DayPolicy::Utc)
        .unwrap();

    let mut edited = students[0].assessment(Uuid::from_u128(20)).unwrap().clone();
    edited.date = at(3, 15);
    edited
        .scores
        .set_rating(IndicatorKey::OneStar, Rating::from_value(5).unwrap());
    let outcome = upsert_assessment(
        &mut students,
        student_id,
        &edited,
        Some(edited.id),
        DayPolicy::Utc,
    )
    .unwrap();

    assert_eq!(
        outcome.action,
        UpsertAction::MergedIntoExisting {
            removed: Uuid::from_u128(20)
        }
    );
    assert_eq!(assessments(&students).len(), 1);
    let survivor = &assessments(&students)[0];
    assert_eq!(survivor.id, Uuid::from_u128(10));
    assert_eq!(survivor.date, at(3, 15));
    assert_eq!(survivor.scores.rating(IndicatorKey::OneStar).value(), 5);
    assert_eq!(outcome.assessment, *survivor);
}

#[test]
fn stale_same_date_duplicates_are_dropped() {
    let mut students = students();
    let student_id = Uuid::from_u128(STUDENT);
    students[0].assessments.push(draft(10, at(3, 9), 1));
    students[0].assessments.push(draft(11, at(3, 12), 2));
    students[0].assessments.push(draft(12, at(4, 12), 2));

    let outcome = upsert_assessment(
        &mut students,
        student_id,
        &draft(30, at(3, 18), 4),
        None,
        DayPolicy::Utc,
    )
    .unwrap();

    assert_eq!(outcome.action, UpsertAction::Overwritten);
    assert_eq!(outcome.dropped_duplicates, vec![Uuid::from_u128(11)]);
    let ids: Vec<Uuid> = assessments(&students).iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![Uuid::from_u128(10), Uuid::from_u128(12)]);
}

#[test]
fn editing_a_later_same_date_duplicate_keeps_the_edited_record() {
    let mut students = students();
    let student_id = Uuid::from_u128(STUDENT);
    students[0].assessments.push(draft(10, at(1, 8), 1));
    students[0].assessments.push(draft(11, at(1, 12), 2));

    let mut edited = students[0].assessment(Uuid::from_u128(11)).unwrap().clone();
    edited.feedback.improvements = "show working".to_string();
    let outcome = upsert_assessment(
        &mut students,
        student_id,
        &edited,
        Some(edited.id),
        DayPolicy::Utc,
    )
    .unwrap();

    assert_eq!(outcome.action, UpsertAction::Overwritten);
    assert_eq!(outcome.assessment.id, Uuid::from_u128(11));
    assert_eq!(outcome.dropped_duplicates, vec![Uuid::from_u128(10)]);
    assert_eq!(assessments(&students).len(), 1);
    let survivor = &assessments(&students)[0];
    assert_eq!(survivor.id, Uuid::from_u128(11));
    assert_eq!(survivor.feedback.improvements, "show working");
}

#[test]
fn collection_grows_by_at_most_one_per_upsert() {
    let mut students = students();
    let student_id = Uuid::from_u128(STUDENT);
    let dates = [at(3, 9), at(3, 20), at(4, 9), at(2, 9), at(4, 23), at(5, 1)];

    for (n, date) in dates.into_iter().enumerate() {
        let before = assessments(&students).len();
        upsert_assessment(
            &mut students,
            student_id,
            &draft(100 + n as u128, date, 3),
            None,
            DayPolicy::Utc,
        )
        .unwrap();
        assert!(assessments(&students).len() <= before + 1);
    }

    assert_eq!(assessments(&students).len(), 4);
}

#[test]
fn day_policy_decides_what_counts_as_the_same_date() {
    let policy = DayPolicy::from_offset_minutes(8 * 60).unwrap();
    let mut students = students();
    let student_id = Uuid::from_u128(STUDENT);

    // 2024-06-03 20:00 UTC and 2024-06-04 02:00 UTC are both June 4th at +08:00.
    upsert_assessment(&mut students, student_id, &draft(10, at(3, 20), 2), None, policy).unwrap();
    let outcome =
        upsert_assessment(&mut students, student_id, &draft(11, at(4, 2), 4), None, policy)
            .unwrap();

    assert_eq!(outcome.action, UpsertAction::Overwritten);
    assert_eq!(assessments(&students).len(), 1);

    let found = find_by_date(&students, student_id, at(4, 10), policy)
        .unwrap()
        .unwrap();
    assert_eq!(found.id, Uuid::from_u128(10));
    assert!(find_by_date(&students, student_id, at(3, 10), policy)
        .unwrap()
        .is_none());
}

#[test]
fn unknown_student_leaves_collection_unchanged() {
    let mut students = students();
    let before = students.clone();
    let missing = Uuid::from_u128(404);

    let err = upsert_assessment(&mut students, missing, &draft(10, at(3, 9), 3), None, DayPolicy::Utc)
        .unwrap_err();

    assert_eq!(err, RepoError::StudentNotFound(missing));
    assert_eq!(students, before);
}

#[test]
fn unknown_edited_record_leaves_collection_unchanged() {
    let mut students = students();
    let student_id = Uuid::from_u128(STUDENT);
    upsert_assessment(&mut students, student_id, &draft(10, at(3, 9), 3), None, DayPolicy::Utc)
        .unwrap();
    let before = students.clone();
    let missing = Uuid::from_u128(404);

    let err = upsert_assessment(
        &mut students,
        student_id,
        &draft(11, at(4, 9), 3),
        Some(missing),
        DayPolicy::Utc,
    )
    .unwrap_err();

    assert_eq!(err, RepoError::AssessmentNotFound(missing));
    assert_eq!(students, before);
}

#[test]
fn upsert_only_touches_the_target_student() {
    let mut students = students();
    students[1].assessments.push(draft(50, at(3, 9), 1));
    let other_before = students[1].clone();

    upsert_assessment(
        &mut students,
        Uuid::from_u128(STUDENT),
        &draft(10, at(3, 9), 3),
        None,
        DayPolicy::Utc,
    )
    .unwrap();

    assert_eq!(students[1], other_before);
}

#[test]
fn remove_student_cascades_and_spares_others() {
    let mut students = students();
    students[0].assessments.push(draft(10, at(3, 9), 3));
    students[1].assessments.push(draft(50, at(3, 9), 1));
    let other_before = students[1].clone();

    let removed = remove_student(&mut students, Uuid::from_u128(STUDENT)).unwrap();

    assert_eq!(removed.assessments.len(), 1);
    assert_eq!(students, vec![other_before]);
    assert_eq!(
        remove_student(&mut students, Uuid::from_u128(STUDENT)).unwrap_err(),
        RepoError::StudentNotFound(Uuid::from_u128(STUDENT))
    );
}
