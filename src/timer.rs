//! Focus-timer state machine and per-day accumulated study seconds.
//!
//! The timer itself is synchronous and tick-driven; the runtime loop
//! supplies the one-second cadence. Each tick writes the whole day's
//! statistics through to storage immediately — ticks are already limited
//! to one per second, so these writes bypass the debounce that collection
//! flushes go through.

use chrono::NaiveDate;
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::persist::{KvStore, PersistResult, keys};
use crate::types::Subject;

/// Minimum configurable focus duration in minutes.
pub const MIN_FOCUS_MINUTES: u32 = 1;
/// Maximum configurable focus duration in minutes.
pub const MAX_FOCUS_MINUTES: u32 = 480;
/// Default focus duration in minutes.
pub const DEFAULT_FOCUS_MINUTES: u32 = 60;

/// Accumulated focus seconds per subject for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct DayStats(HashMap<Subject, u64>);

impl DayStats {
    /// Empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulated seconds for `subject`.
    pub fn seconds(&self, subject: Subject) -> u64 {
        self.0.get(&subject).copied().unwrap_or(0)
    }

    /// Adds `secs` to the accumulated time for `subject`.
    pub fn add(&mut self, subject: Subject, secs: u64) {
        *self.0.entry(subject).or_insert(0) += secs;
    }
}

/// Outcome of one whole-second tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Timer is not running; nothing happened.
    Idle,
    /// One second elapsed and was recorded.
    Running,
    /// The countdown just reached zero and the timer stopped.
    Finished,
}

/// Subject-scoped countdown timer with per-day study-time accounting.
#[derive(Debug)]
pub struct FocusTimer {
    subject: Subject,
    duration_secs: u32,
    remaining_secs: u32,
    running: bool,
    stats_day: NaiveDate,
    stats: DayStats,
}

impl FocusTimer {
    /// Creates a stopped timer for `subject` at the default duration,
    /// resuming `today`'s accumulated statistics from `kv`.
    pub fn new(subject: Subject, kv: &dyn KvStore, today: NaiveDate) -> Self {
        Self {
            subject,
            duration_secs: DEFAULT_FOCUS_MINUTES * 60,
            remaining_secs: DEFAULT_FOCUS_MINUTES * 60,
            running: false,
            stats_day: today,
            stats: load_day_stats(kv, today),
        }
    }

    /// Active subject.
    pub fn subject(&self) -> Subject {
        self.subject
    }

    /// Switches the active subject. Ignored while the timer runs.
    pub fn set_subject(&mut self, subject: Subject) {
        if !self.running {
            self.subject = subject;
        }
    }

    /// Configured duration in minutes.
    pub fn duration_minutes(&self) -> u32 {
        self.duration_secs / 60
    }

    /// Sets the duration, clamped to
    /// [`MIN_FOCUS_MINUTES`]..=[`MAX_FOCUS_MINUTES`].
    ///
    /// Remaining time resets to the new duration unless the timer runs.
    pub fn set_duration_minutes(&mut self, minutes: u32) {
        let clamped = minutes.clamp(MIN_FOCUS_MINUTES, MAX_FOCUS_MINUTES);
        self.duration_secs = clamped * 60;
        if !self.running {
            self.remaining_secs = self.duration_secs;
        }
    }

    /// Seconds left on the countdown.
    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    /// True while the countdown is active.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Starts the countdown. No-op when already running or expired.
    pub fn start(&mut self) {
        if self.remaining_secs > 0 {
            self.running = true;
        }
    }

    /// Pauses the countdown. Idempotent.
    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Stops the countdown and restores the full duration.
    pub fn reset(&mut self) {
        self.running = false;
        self.remaining_secs = self.duration_secs;
    }

    /// Accumulated seconds studied today for `subject`.
    pub fn day_seconds(&self, subject: Subject) -> u64 {
        self.stats.seconds(subject)
    }

    /// Snapshot of today's per-subject statistics.
    pub fn day_stats(&self) -> DayStats {
        self.stats.clone()
    }

    /// Advances the countdown by one second.
    ///
    /// While running: decrements remaining time, credits one second to the
    /// active subject for `today`, and writes the day's statistics through
    /// to `kv`. A write failure is logged and the in-memory statistics
    /// stay authoritative. Crossing a day boundary mid-run switches the
    /// accounting to the new day's statistics.
    pub fn tick(&mut self, kv: &mut dyn KvStore, today: NaiveDate) -> Tick {
        if !self.running {
            return Tick::Idle;
        }
        if today != self.stats_day {
            self.stats_day = today;
            self.stats = load_day_stats(&*kv, today);
        }

        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        self.stats.add(self.subject, 1);
        if let Err(err) = save_day_stats(kv, today, &self.stats) {
            tracing::warn!(%err, "failed to persist day statistics");
        }

        if self.remaining_secs == 0 {
            self.running = false;
            Tick::Finished
        } else {
            Tick::Running
        }
    }
}

/// Reads accumulated statistics for `day`, falling back to zeroes on a
/// missing key or corrupt value.
pub fn load_day_stats(kv: &dyn KvStore, day: NaiveDate) -> DayStats {
    let key = keys::day_stats(day);
    match kv.get(&key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(stats) => stats,
            Err(err) => {
                tracing::warn!(key = %key, %err, "discarding corrupt day statistics");
                DayStats::new()
            }
        },
        Ok(None) => DayStats::new(),
        Err(err) => {
            tracing::warn!(key = %key, %err, "storage read failed");
            DayStats::new()
        }
    }
}

/// Writes accumulated statistics for `day`.
pub fn save_day_stats(kv: &mut dyn KvStore, day: NaiveDate, stats: &DayStats) -> PersistResult<()> {
    let payload = serde_json::to_string(stats)?;
    kv.set(&keys::day_stats(day), &payload)
}
