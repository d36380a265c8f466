use chrono::NaiveDate;

use zenith::{
    core::store::RecordStore,
    core::validate::{ValidationError, validate_session, validate_test},
    record::{Goals, MistakeCounts, SessionDraft, Target, TestDraft},
    types::{MistakeKind, Subject, Temperament},
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("date")
}

fn session_draft(subject: Subject, topic: &str, attempted: u32, correct: u32) -> SessionDraft {
    let mut mistakes = MistakeCounts::new();
    mistakes.add(MistakeKind::Concept, attempted.saturating_sub(correct));
    SessionDraft {
        subject,
        topic: topic.to_string(),
        attempted,
        correct,
        mistakes,
    }
}

fn test_draft(name: &str, marks: u32, total: u32) -> TestDraft {
    TestDraft {
        name: name.to_string(),
        date: date(2026, 3, 10),
        marks,
        total,
        temperament: Temperament::Calm,
        analysis: String::new(),
    }
}

#[test]
fn sessions_prepend_and_assign_unique_ids() {
    let mut store = RecordStore::new();
    let first = store.create_session(session_draft(Subject::Physics, "Kinematics", 10, 7));
    let second = store.create_session(session_draft(Subject::Chemistry, "Solutions", 5, 5));
    let third = store.create_session(session_draft(Subject::Maths, "Trigonometry", 8, 6));

    assert_eq!(store.sessions().len(), 3);
    let ids: Vec<_> = store.sessions().iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![third, second, first]);
    assert_ne!(first, second);
    assert_ne!(second, third);
    assert!(store.sessions().iter().all(|s| s.ts_ms > 0));
}

#[test]
fn sessions_filter_by_subject() {
    let mut store = RecordStore::new();
    store.create_session(session_draft(Subject::Physics, "Kinematics", 10, 7));
    store.create_session(session_draft(Subject::Chemistry, "Solutions", 5, 5));
    store.create_session(session_draft(Subject::Physics, "Optics", 8, 4));

    let physics = store.sessions_for(Subject::Physics);
    assert_eq!(physics.len(), 2);
    assert!(physics.iter().all(|s| s.subject == Subject::Physics));
    assert!(store.sessions_for(Subject::Maths).is_empty());
}

#[test]
fn syllabus_tables_cover_each_subject() {
    assert_eq!(zenith::syllabus::topics(Subject::Physics).len(), 20);
    assert_eq!(zenith::syllabus::topics(Subject::Chemistry).len(), 20);
    assert_eq!(zenith::syllabus::topics(Subject::Maths).len(), 14);

    assert!(zenith::syllabus::is_known_topic(Subject::Physics, "Kinematics"));
    assert!(!zenith::syllabus::is_known_topic(Subject::Maths, "Kinematics"));
    assert_eq!(Subject::Physics.name(), "Physics");
}

#[test]
fn delete_session_is_idempotent() {
    let mut store = RecordStore::new();
    let id = store.create_session(session_draft(Subject::Physics, "Optics", 4, 2));
    let keep = store.create_session(session_draft(Subject::Physics, "Gravitation", 6, 6));

    store.delete_session(id);
    assert_eq!(store.sessions().len(), 1);
    store.delete_session(id);
    assert_eq!(store.sessions().len(), 1);
    assert_eq!(store.sessions()[0].id, keep);
}

#[test]
fn store_keeps_unbalanced_mistake_counts() {
    // The store trusts callers; only the validator rejects this draft.
    let mut mistakes = MistakeCounts::new();
    mistakes.add(MistakeKind::Calc, 5);
    let draft = SessionDraft {
        subject: Subject::Maths,
        topic: "Integral Calculus".to_string(),
        attempted: 10,
        correct: 9,
        mistakes,
    };

    assert_eq!(
        validate_session(&draft),
        Err(ValidationError::MistakeSumMismatch {
            allocated: 5,
            expected: 1,
        })
    );

    let mut store = RecordStore::new();
    store.create_session(draft);
    let stored = &store.sessions()[0];
    assert_eq!(stored.attempted, 10);
    assert_eq!(stored.correct, 9);
    assert_eq!(stored.mistakes.total(), 5);
    assert_eq!(stored.mistakes.get(MistakeKind::Calc), 5);
}

#[test]
fn tests_prepend_and_delete() {
    let mut store = RecordStore::new();
    let first = store.create_test(test_draft("Mock 1", 180, 300));
    let second = store.create_test(test_draft("Mock 2", 340, 300));

    let ids: Vec<_> = store.tests().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![second, first]);

    store.delete_test(first);
    store.delete_test(first);
    assert_eq!(store.tests().len(), 1);
    assert_eq!(store.tests()[0].name, "Mock 2");
}

#[test]
fn targets_append_toggle_and_delete() {
    let mut store = RecordStore::new();
    let a = Target::new(date(2026, 3, 10), "Revise rotational motion");
    let b = Target::new(date(2026, 3, 10), "40 organic chemistry questions");
    let a_id = a.id;
    let b_id = b.id;

    store.add_target(a);
    store.add_target(b);
    let ids: Vec<_> = store.targets().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![a_id, b_id]);
    assert!(store.targets().iter().all(|t| !t.completed));

    store.set_target_completed(a_id, true);
    assert!(store.targets()[0].completed);
    assert!(!store.targets()[1].completed);

    // Unknown ids are silent no-ops.
    store.set_target_completed(uuid::Uuid::new_v4(), true);
    store.delete_target(uuid::Uuid::new_v4());
    assert_eq!(store.targets().len(), 2);

    store.delete_target(b_id);
    assert_eq!(store.targets().len(), 1);
    assert_eq!(store.targets_on(date(2026, 3, 10)).len(), 1);
    assert!(store.targets_on(date(2026, 3, 11)).is_empty());
}

#[test]
fn goals_default_and_replace_wholesale() {
    let mut store = RecordStore::new();
    for subject in Subject::ALL {
        assert_eq!(store.goals().get(subject), Goals::DEFAULT_DAILY);
    }

    let mut goals = Goals::default();
    goals.set(Subject::Physics, 50);
    goals.set(Subject::Maths, 20);
    store.set_goals(goals);

    assert_eq!(store.goals().get(Subject::Physics), 50);
    assert_eq!(store.goals().get(Subject::Chemistry), 30);
    assert_eq!(store.goals().get(Subject::Maths), 20);
}

#[test]
fn snapshot_round_trips() {
    let mut store = RecordStore::new();
    store.create_session(session_draft(Subject::Physics, "Electrostatics", 12, 9));
    store.create_test(test_draft("Full mock", 212, 300));
    store.add_target(Target::new(date(2026, 3, 12), "Error notebook review"));

    let snapshot = store.export_snapshot();
    let restored = RecordStore::from_snapshot(snapshot.clone());
    assert_eq!(restored.export_snapshot(), snapshot);
}

#[test]
fn validate_session_rejects_bad_drafts() {
    let ok = session_draft(Subject::Physics, "Kinematics", 10, 7);
    assert_eq!(validate_session(&ok), Ok(()));

    let mut empty_topic = ok.clone();
    empty_topic.topic = "  ".to_string();
    assert_eq!(validate_session(&empty_topic), Err(ValidationError::EmptyTopic));

    let mut nothing_attempted = ok.clone();
    nothing_attempted.attempted = 0;
    nothing_attempted.correct = 0;
    nothing_attempted.mistakes = MistakeCounts::new();
    assert_eq!(
        validate_session(&nothing_attempted),
        Err(ValidationError::NoQuestionsAttempted)
    );

    let mut too_many_correct = ok.clone();
    too_many_correct.correct = 11;
    assert_eq!(
        validate_session(&too_many_correct),
        Err(ValidationError::CorrectExceedsAttempted {
            attempted: 10,
            correct: 11,
        })
    );
}

#[test]
fn validate_test_allows_marks_above_total() {
    assert_eq!(validate_test(&test_draft("Mock", 320, 300)), Ok(()));
    assert_eq!(
        validate_test(&test_draft("", 100, 300)),
        Err(ValidationError::EmptyTestName)
    );
    assert_eq!(
        validate_test(&test_draft("Mock", 0, 0)),
        Err(ValidationError::ZeroTotalMarks)
    );
}
