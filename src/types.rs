//! Shared primitive types, enums, and local-day helpers.

use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique record identifier, random per creation.
pub type RecordId = Uuid;
/// Wall-clock timestamp in milliseconds since the Unix epoch.
pub type EpochMs = u64;

/// Exam subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Subject {
    /// Physics.
    Physics,
    /// Chemistry.
    Chemistry,
    /// Mathematics.
    Maths,
}

impl Subject {
    /// All subjects in display order.
    pub const ALL: [Subject; 3] = [Subject::Physics, Subject::Chemistry, Subject::Maths];

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            Subject::Physics => "Physics",
            Subject::Chemistry => "Chemistry",
            Subject::Maths => "Maths",
        }
    }
}

/// Mistake category assigned to incorrect answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MistakeKind {
    /// Missing or misunderstood concept.
    Concept,
    /// Failed formula recall.
    Formula,
    /// Calculation or algebra slip.
    Calc,
    /// Misread the question.
    Read,
    /// Rushed under time pressure.
    Panic,
    /// Overthought a straightforward question.
    Overthink,
}

impl MistakeKind {
    /// All categories in display order.
    pub const ALL: [MistakeKind; 6] = [
        MistakeKind::Concept,
        MistakeKind::Formula,
        MistakeKind::Calc,
        MistakeKind::Read,
        MistakeKind::Panic,
        MistakeKind::Overthink,
    ];

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            MistakeKind::Concept => "Concept Gap",
            MistakeKind::Formula => "Formula Recall",
            MistakeKind::Calc => "Calculation/Algebra",
            MistakeKind::Read => "Misread Question",
            MistakeKind::Panic => "Time Pressure",
            MistakeKind::Overthink => "Overthinking",
        }
    }
}

/// Self-reported temperament during a mock test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Temperament {
    /// Calm.
    Calm,
    /// Anxious.
    Anxious,
    /// Focused.
    Focused,
    /// Fatigued.
    Fatigued,
}

/// Current wall-clock time in epoch milliseconds.
pub fn now_ms() -> EpochMs {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Today's date on the local wall clock.
///
/// Every day-boundary decision in the crate (streaks, activity windows,
/// per-day focus statistics) goes through the local calendar day.
pub fn today_local() -> NaiveDate {
    Local::now().date_naive()
}

/// Local calendar day containing an epoch-millisecond timestamp.
pub fn local_day_of(ts_ms: EpochMs) -> NaiveDate {
    DateTime::from_timestamp_millis(ts_ms as i64)
        .map(|dt| dt.with_timezone(&Local).date_naive())
        .unwrap_or_default()
}
