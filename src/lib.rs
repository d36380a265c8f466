//! Single-user exam-prep study tracking: authoritative in-memory records
//! with debounced key-value persistence.
//!
//! # Examples
//!
//! In-memory usage with [`core::store::RecordStore`]:
//! ```
//! use zenith::{
//!     core::store::RecordStore,
//!     record::{MistakeCounts, SessionDraft},
//!     types::Subject,
//! };
//!
//! let mut store = RecordStore::new();
//! let id = store.create_session(SessionDraft {
//!     subject: Subject::Physics,
//!     topic: "Kinematics".to_string(),
//!     attempted: 10,
//!     correct: 7,
//!     mistakes: MistakeCounts::new(),
//! });
//! assert_eq!(store.sessions()[0].id, id);
//! ```
//!
//! Runtime usage with SQLite persistence:
//! ```no_run
//! use zenith::{
//!     persist::{self, sqlite::SqliteKvStore},
//!     record::{MistakeCounts, SessionDraft},
//!     runtime::handle::{RuntimeConfig, spawn_zenith},
//!     types::Subject,
//! };
//!
//! # #[tokio::main]
//! # async fn main() {
//! let kv = SqliteKvStore::open("zenith.db").expect("open sqlite");
//! let store = persist::hydrate(&kv);
//! let handle = spawn_zenith(store, Box::new(kv), RuntimeConfig::default());
//! let _id = handle
//!     .create_session(SessionDraft {
//!         subject: Subject::Maths,
//!         topic: "Vector Algebra".to_string(),
//!         attempted: 20,
//!         correct: 16,
//!         mistakes: MistakeCounts::new(),
//!     })
//!     .await
//!     .expect("create");
//! handle.shutdown().await.expect("shutdown");
//! # }
//! ```

/// Authoritative in-memory store and validation layer.
pub mod core;
/// Persistence abstraction, key schema, and backends.
pub mod persist;
/// Domain records, insert drafts, and goal types.
pub mod record;
/// Single-writer async runtime and event stream APIs.
pub mod runtime;
/// Pure derived aggregations over record snapshots.
pub mod stats;
/// Consecutive-day visit streak logic.
pub mod streak;
/// Subject syllabus tables.
pub mod syllabus;
/// Focus-timer state machine and day statistics.
pub mod timer;
/// Shared primitive types and enums.
pub mod types;
