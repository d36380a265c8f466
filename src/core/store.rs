use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    record::{Goals, Session, SessionDraft, Target, TestDraft, TestResult},
    types::{RecordId, Subject, now_ms},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct StoreSnapshot {
    pub sessions: Vec<Session>,
    pub tests: Vec<TestResult>,
    pub targets: Vec<Target>,
    pub goals: Goals,
}

/// Authoritative in-memory record collections.
///
/// Sessions and tests are kept newest first; targets keep append order.
/// Mutations on missing ids are silent no-ops, and no cross-field
/// invariants are enforced here — callers opt into
/// [`crate::core::validate`] before mutating.
#[derive(Debug, Default)]
pub struct RecordStore {
    sessions: Vec<Session>,
    tests: Vec<TestResult>,
    targets: Vec<Target>,
    goals: Goals,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: StoreSnapshot) -> Self {
        Self {
            sessions: snapshot.sessions,
            tests: snapshot.tests,
            targets: snapshot.targets,
            goals: snapshot.goals,
        }
    }

    pub fn export_snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            sessions: self.sessions.clone(),
            tests: self.tests.clone(),
            targets: self.targets.clone(),
            goals: self.goals.clone(),
        }
    }

    pub fn create_session(&mut self, draft: SessionDraft) -> RecordId {
        let id = Uuid::new_v4();
        self.sessions.insert(
            0,
            Session {
                id,
                ts_ms: now_ms(),
                subject: draft.subject,
                topic: draft.topic,
                attempted: draft.attempted,
                correct: draft.correct,
                mistakes: draft.mistakes,
            },
        );
        id
    }

    pub fn delete_session(&mut self, id: RecordId) {
        self.sessions.retain(|s| s.id != id);
    }

    pub fn create_test(&mut self, draft: TestDraft) -> RecordId {
        let id = Uuid::new_v4();
        self.tests.insert(
            0,
            TestResult {
                id,
                ts_ms: now_ms(),
                name: draft.name,
                date: draft.date,
                marks: draft.marks,
                total: draft.total,
                temperament: draft.temperament,
                analysis: draft.analysis,
            },
        );
        id
    }

    pub fn delete_test(&mut self, id: RecordId) {
        self.tests.retain(|t| t.id != id);
    }

    pub fn add_target(&mut self, target: Target) {
        self.targets.push(target);
    }

    pub fn set_target_completed(&mut self, id: RecordId, completed: bool) {
        if let Some(target) = self.targets.iter_mut().find(|t| t.id == id) {
            target.completed = completed;
        }
    }

    pub fn delete_target(&mut self, id: RecordId) {
        self.targets.retain(|t| t.id != id);
    }

    pub fn set_goals(&mut self, goals: Goals) {
        self.goals = goals;
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn tests(&self) -> &[TestResult] {
        &self.tests
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn goals(&self) -> &Goals {
        &self.goals
    }

    pub fn sessions_for(&self, subject: Subject) -> Vec<&Session> {
        self.sessions
            .iter()
            .filter(|s| s.subject == subject)
            .collect()
    }

    pub fn targets_on(&self, date: NaiveDate) -> Vec<&Target> {
        self.targets.iter().filter(|t| t.date == date).collect()
    }
}
