//! Pure derived aggregations over record snapshots.
//!
//! All functions are side-effect free, O(n) full recomputes over small
//! inputs; nothing here caches or maintains incremental state.

use chrono::{Days, NaiveDate};

use crate::{
    record::{MistakeCounts, Session, TestResult},
    types::{Subject, local_day_of},
};

/// Number of trailing calendar days covered by [`recent_activity`].
pub const ACTIVITY_WINDOW_DAYS: u64 = 7;

/// Session count for one calendar day of the trailing activity window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayActivity {
    /// The calendar day.
    pub date: NaiveDate,
    /// Sessions logged on that day.
    pub sessions: usize,
}

/// Fraction of attempted questions answered correctly, in `[0, 1]`.
///
/// Zero when the session set attempted nothing.
pub fn accuracy(sessions: &[Session]) -> f64 {
    let attempted = total_attempted(sessions);
    if attempted == 0 {
        return 0.0;
    }
    total_correct(sessions) as f64 / attempted as f64
}

/// Total questions attempted across `sessions`.
pub fn total_attempted(sessions: &[Session]) -> u64 {
    sessions.iter().map(|s| u64::from(s.attempted)).sum()
}

/// Total questions answered correctly across `sessions`.
pub fn total_correct(sessions: &[Session]) -> u64 {
    sessions.iter().map(|s| u64::from(s.correct)).sum()
}

/// Questions attempted for `subject` on the local calendar day `day`.
pub fn attempted_on(sessions: &[Session], subject: Subject, day: NaiveDate) -> u64 {
    sessions
        .iter()
        .filter(|s| s.subject == subject && local_day_of(s.ts_ms) == day)
        .map(|s| u64::from(s.attempted))
        .sum()
}

/// Category-wise mistake totals across `sessions`.
pub fn mistake_distribution(sessions: &[Session]) -> MistakeCounts {
    let mut totals = MistakeCounts::new();
    for session in sessions {
        for (kind, count) in session.mistakes.iter() {
            totals.add(kind, count);
        }
    }
    totals
}

/// Session counts for the trailing seven calendar days ending at `today`,
/// oldest day first.
pub fn recent_activity(sessions: &[Session], today: NaiveDate) -> Vec<DayActivity> {
    (0..ACTIVITY_WINDOW_DAYS)
        .rev()
        .filter_map(|back| today.checked_sub_days(Days::new(back)))
        .map(|date| DayActivity {
            date,
            sessions: sessions
                .iter()
                .filter(|s| local_day_of(s.ts_ms) == date)
                .count(),
        })
        .collect()
}

/// Number of mock tests taken.
pub fn tests_taken(tests: &[TestResult]) -> usize {
    tests.len()
}
