//! Key-value persistence abstraction, key schema, and hydration.

/// In-memory backend for tests and ephemeral sessions.
pub mod memory;
/// SQLite-backed durable backend.
pub mod sqlite;

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::core::store::{RecordStore, StoreSnapshot};

/// Errors surfaced by [`KvStore`] implementations.
#[derive(Debug, Error)]
pub enum PersistError {
    /// Underlying SQLite failure.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// Serialization failure.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
    /// Any other backend failure.
    #[error("{0}")]
    Message(String),
}

/// Result alias for persistence operations.
pub type PersistResult<T> = Result<T, PersistError>;

/// Flat durable store of UTF-8 string keys and values.
pub trait KvStore: Send {
    /// Reads the value stored under `key`.
    fn get(&self, key: &str) -> PersistResult<Option<String>>;
    /// Writes `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> PersistResult<()>;
    /// Deletes `key` if present.
    fn remove(&mut self, key: &str) -> PersistResult<()>;
}

/// Persisted key names and builders.
pub mod keys {
    use chrono::NaiveDate;

    /// Sessions collection.
    pub const SESSIONS: &str = "zenith_sessions";
    /// Test results collection.
    pub const TESTS: &str = "zenith_tests";
    /// Targets collection.
    pub const TARGETS: &str = "zenith_targets";
    /// Goals singleton.
    pub const GOALS: &str = "zenith_goals";
    /// Streak counter, stored as a stringified integer.
    pub const STREAK: &str = "zenith_streak";
    /// Last visit date, stored as a raw `YYYY-MM-DD` string.
    pub const LAST_VISIT: &str = "zenith_last_visit";

    /// Per-day focus statistics key.
    pub fn day_stats(day: NaiveDate) -> String {
        format!("zenith_stats_{}", day.format("%Y-%m-%d"))
    }
}

/// Logical persisted collection, used for flush accounting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// The sessions array.
    Sessions,
    /// The test results array.
    Tests,
    /// The targets array.
    Targets,
    /// The goals object.
    Goals,
}

impl Collection {
    /// All collections.
    pub const ALL: [Collection; 4] = [
        Collection::Sessions,
        Collection::Tests,
        Collection::Targets,
        Collection::Goals,
    ];

    /// Persisted key for this collection.
    pub fn key(&self) -> &'static str {
        match self {
            Collection::Sessions => keys::SESSIONS,
            Collection::Tests => keys::TESTS,
            Collection::Targets => keys::TARGETS,
            Collection::Goals => keys::GOALS,
        }
    }
}

/// Serializes one collection's current value for its key.
pub fn encode_collection(
    store: &RecordStore,
    collection: Collection,
) -> serde_json::Result<String> {
    match collection {
        Collection::Sessions => serde_json::to_string(store.sessions()),
        Collection::Tests => serde_json::to_string(store.tests()),
        Collection::Targets => serde_json::to_string(store.targets()),
        Collection::Goals => serde_json::to_string(store.goals()),
    }
}

/// Loads a [`RecordStore`] from `kv`.
///
/// A missing key, an unreadable backend, or a corrupt value falls back to
/// that collection's default so hydration never fails the application.
pub fn hydrate(kv: &dyn KvStore) -> RecordStore {
    RecordStore::from_snapshot(StoreSnapshot {
        sessions: read_or_default(kv, keys::SESSIONS),
        tests: read_or_default(kv, keys::TESTS),
        targets: read_or_default(kv, keys::TARGETS),
        goals: read_or_default(kv, keys::GOALS),
    })
}

fn read_or_default<T: DeserializeOwned + Default>(kv: &dyn KvStore, key: &str) -> T {
    match kv.get(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(key, %err, "discarding corrupt persisted value");
                T::default()
            }
        },
        Ok(None) => T::default(),
        Err(err) => {
            tracing::warn!(key, %err, "storage read failed, starting from default");
            T::default()
        }
    }
}
