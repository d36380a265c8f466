//! Consecutive-day visit streak logic.
//!
//! Evaluated once per application start against the local calendar day.

use chrono::{Days, NaiveDate};

use crate::persist::{KvStore, PersistResult, keys};

/// Persisted streak counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StreakState {
    /// Local calendar date of the last recorded visit.
    pub last_visit: Option<NaiveDate>,
    /// Consecutive-day visit count.
    pub count: u32,
}

impl StreakState {
    /// Applies one startup evaluation against `today`.
    ///
    /// A repeat visit on the same day leaves the state unchanged; a visit
    /// the day after the last one extends the streak; anything else (a gap
    /// of two or more days, or a first-ever visit) resets it to one.
    pub fn advance(&self, today: NaiveDate) -> StreakState {
        let yesterday = today.checked_sub_days(Days::new(1));
        match self.last_visit {
            Some(last) if last == today => *self,
            Some(last) if Some(last) == yesterday => StreakState {
                last_visit: Some(today),
                count: self.count.saturating_add(1),
            },
            _ => StreakState {
                last_visit: Some(today),
                count: 1,
            },
        }
    }
}

/// Loads persisted streak state, tolerating missing or malformed values.
pub fn load(kv: &dyn KvStore) -> StreakState {
    let count = match kv.get(keys::STREAK) {
        Ok(Some(raw)) => match raw.trim().parse::<u32>() {
            Ok(count) => count,
            Err(err) => {
                tracing::warn!(key = keys::STREAK, %err, "discarding corrupt streak count");
                0
            }
        },
        Ok(None) => 0,
        Err(err) => {
            tracing::warn!(key = keys::STREAK, %err, "storage read failed");
            0
        }
    };

    let last_visit = match kv.get(keys::LAST_VISIT) {
        Ok(Some(raw)) => match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(err) => {
                tracing::warn!(key = keys::LAST_VISIT, %err, "discarding corrupt visit date");
                None
            }
        },
        Ok(None) => None,
        Err(err) => {
            tracing::warn!(key = keys::LAST_VISIT, %err, "storage read failed");
            None
        }
    };

    StreakState { last_visit, count }
}

/// Persists `state` under the streak keys.
pub fn save(kv: &mut dyn KvStore, state: &StreakState) -> PersistResult<()> {
    kv.set(keys::STREAK, &state.count.to_string())?;
    if let Some(last) = state.last_visit {
        kv.set(keys::LAST_VISIT, &last.format("%Y-%m-%d").to_string())?;
    }
    Ok(())
}

/// Startup check-in: load, advance to `today`, persist when changed.
///
/// Returns the current streak count. A failed write is logged and the
/// advanced in-memory state is still returned.
pub fn check_in(kv: &mut dyn KvStore, today: NaiveDate) -> u32 {
    let prev = load(kv);
    let next = prev.advance(today);
    if next != prev {
        if let Err(err) = save(kv, &next) {
            tracing::warn!(%err, "failed to persist streak state");
        }
    }
    next.count
}
