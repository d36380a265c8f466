//! Pure cross-field validation, applied by callers before store mutation.
//!
//! The store itself accepts whatever it is given; these checks mirror the
//! conditions under which an entry form would refuse to save.

use thiserror::Error;

use crate::record::{SessionDraft, TestDraft};

/// Rejection reasons for [`validate_session`] and [`validate_test`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// `correct` exceeds `attempted`.
    #[error("correct count {correct} exceeds attempted count {attempted}")]
    CorrectExceedsAttempted {
        /// Questions attempted.
        attempted: u32,
        /// Questions correct.
        correct: u32,
    },
    /// Mistake counts do not account for every incorrect answer.
    #[error("mistake counts sum to {allocated} but {expected} answers were incorrect")]
    MistakeSumMismatch {
        /// Sum of the supplied mistake counts.
        allocated: u32,
        /// Expected sum, `attempted - correct`.
        expected: u32,
    },
    /// No questions attempted.
    #[error("a session must attempt at least one question")]
    NoQuestionsAttempted,
    /// Empty topic label.
    #[error("topic must not be empty")]
    EmptyTopic,
    /// Empty test name.
    #[error("test name must not be empty")]
    EmptyTestName,
    /// Zero maximum marks.
    #[error("test total marks must be positive")]
    ZeroTotalMarks,
}

/// Checks a session draft against the entry-form invariants.
pub fn validate_session(draft: &SessionDraft) -> Result<(), ValidationError> {
    if draft.topic.trim().is_empty() {
        return Err(ValidationError::EmptyTopic);
    }
    if draft.attempted == 0 {
        return Err(ValidationError::NoQuestionsAttempted);
    }
    if draft.correct > draft.attempted {
        return Err(ValidationError::CorrectExceedsAttempted {
            attempted: draft.attempted,
            correct: draft.correct,
        });
    }
    let expected = draft.attempted - draft.correct;
    let allocated = draft.mistakes.total();
    if allocated != expected {
        return Err(ValidationError::MistakeSumMismatch {
            allocated,
            expected,
        });
    }
    Ok(())
}

/// Checks a test draft. `marks > total` is deliberately allowed.
pub fn validate_test(draft: &TestDraft) -> Result<(), ValidationError> {
    if draft.name.trim().is_empty() {
        return Err(ValidationError::EmptyTestName);
    }
    if draft.total == 0 {
        return Err(ValidationError::ZeroTotalMarks);
    }
    Ok(())
}
