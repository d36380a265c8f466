//! Domain records, insert drafts, and goal types.

use chrono::NaiveDate;
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{EpochMs, MistakeKind, RecordId, Subject, Temperament, now_ms};

/// Per-category mistake counts for one session.
///
/// Absent categories count as zero. The store does not require the counts
/// to sum to `attempted - correct`; see [`crate::core::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct MistakeCounts(HashMap<MistakeKind, u32>);

impl MistakeCounts {
    /// Empty counts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count recorded for `kind`.
    pub fn get(&self, kind: MistakeKind) -> u32 {
        self.0.get(&kind).copied().unwrap_or(0)
    }

    /// Sets the count for `kind`, dropping the entry when zero.
    pub fn set(&mut self, kind: MistakeKind, count: u32) {
        if count == 0 {
            self.0.remove(&kind);
        } else {
            self.0.insert(kind, count);
        }
    }

    /// Adds `n` to the count for `kind`.
    pub fn add(&mut self, kind: MistakeKind, n: u32) {
        let next = self.get(kind).saturating_add(n);
        self.set(kind, next);
    }

    /// Sum of all category counts.
    pub fn total(&self) -> u32 {
        self.0.values().sum()
    }

    /// Iterates over non-zero `(category, count)` entries.
    pub fn iter(&self) -> impl Iterator<Item = (MistakeKind, u32)> + '_ {
        self.0.iter().map(|(k, v)| (*k, *v))
    }
}

impl FromIterator<(MistakeKind, u32)> for MistakeCounts {
    fn from_iter<I: IntoIterator<Item = (MistakeKind, u32)>>(iter: I) -> Self {
        let mut counts = Self::new();
        for (kind, count) in iter {
            counts.add(kind, count);
        }
        counts
    }
}

/// One logged practice block for a subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Stable record identifier.
    pub id: RecordId,
    /// Creation instant in epoch milliseconds.
    pub ts_ms: EpochMs,
    /// Subject the block belongs to.
    pub subject: Subject,
    /// Topic label, normally one of [`crate::syllabus::topics`].
    pub topic: String,
    /// Questions attempted.
    pub attempted: u32,
    /// Questions answered correctly.
    pub correct: u32,
    /// Mistake categorization for incorrect answers.
    pub mistakes: MistakeCounts,
}

/// Insert payload used to create a new [`Session`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionDraft {
    /// Subject the block belongs to.
    pub subject: Subject,
    /// Topic label.
    pub topic: String,
    /// Questions attempted.
    pub attempted: u32,
    /// Questions answered correctly.
    pub correct: u32,
    /// Mistake categorization for incorrect answers.
    pub mistakes: MistakeCounts,
}

/// One mock-test score record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestResult {
    /// Stable record identifier.
    pub id: RecordId,
    /// Creation instant in epoch milliseconds.
    pub ts_ms: EpochMs,
    /// Test name.
    pub name: String,
    /// Calendar date the test was taken, independent of `ts_ms`.
    pub date: NaiveDate,
    /// Marks scored. May exceed `total`; not enforced.
    pub marks: u32,
    /// Maximum marks.
    pub total: u32,
    /// Temperament during the test.
    pub temperament: Temperament,
    /// Free-text analysis, possibly empty.
    pub analysis: String,
}

/// Insert payload used to create a new [`TestResult`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestDraft {
    /// Test name.
    pub name: String,
    /// Calendar date the test was taken.
    pub date: NaiveDate,
    /// Marks scored.
    pub marks: u32,
    /// Maximum marks.
    pub total: u32,
    /// Temperament during the test.
    pub temperament: Temperament,
    /// Free-text analysis, possibly empty.
    pub analysis: String,
}

/// One planner to-do item bound to a calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    /// Stable record identifier.
    pub id: RecordId,
    /// Creation instant in epoch milliseconds.
    pub ts_ms: EpochMs,
    /// Calendar date the item is planned for.
    pub date: NaiveDate,
    /// Item text.
    pub text: String,
    /// Completion flag, toggled after creation.
    pub completed: bool,
}

impl Target {
    /// Builds a pending target for `date`, assigning a fresh id and timestamp.
    pub fn new(date: NaiveDate, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            ts_ms: now_ms(),
            date,
            text: text.into(),
            completed: false,
        }
    }
}

/// Daily question-count goals per subject.
///
/// A singleton record replaced wholesale on edit; subjects missing from a
/// persisted copy fall back to [`Goals::DEFAULT_DAILY`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Goals(HashMap<Subject, u32>);

impl Goals {
    /// Default daily goal per subject.
    pub const DEFAULT_DAILY: u32 = 30;

    /// Daily goal for `subject`.
    pub fn get(&self, subject: Subject) -> u32 {
        self.0
            .get(&subject)
            .copied()
            .unwrap_or(Self::DEFAULT_DAILY)
    }

    /// Sets the daily goal for `subject`.
    pub fn set(&mut self, subject: Subject, goal: u32) {
        self.0.insert(subject, goal);
    }
}

impl Default for Goals {
    fn default() -> Self {
        Self(
            Subject::ALL
                .iter()
                .map(|s| (*s, Self::DEFAULT_DAILY))
                .collect(),
        )
    }
}
