//! Runtime event stream payloads.

use crate::persist::Collection;
use crate::types::{RecordId, Subject};

/// Events emitted from the single-writer runtime loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZenithEvent {
    /// A session was logged.
    SessionCreated {
        /// Created session id.
        id: RecordId,
    },
    /// A session was removed.
    SessionDeleted {
        /// Removed session id.
        id: RecordId,
    },
    /// A mock-test result was logged.
    TestCreated {
        /// Created test id.
        id: RecordId,
    },
    /// A mock-test result was removed.
    TestDeleted {
        /// Removed test id.
        id: RecordId,
    },
    /// A planner target was added.
    TargetAdded {
        /// Added target id.
        id: RecordId,
    },
    /// A target's completion flag changed.
    TargetUpdated {
        /// Updated target id.
        id: RecordId,
    },
    /// A planner target was removed.
    TargetDeleted {
        /// Removed target id.
        id: RecordId,
    },
    /// The goals object was replaced.
    GoalsReplaced,
    /// A collection was written through to storage.
    Flushed {
        /// The collection that was written.
        collection: Collection,
    },
    /// The focus countdown reached zero.
    TimerFinished {
        /// Subject that was being tracked.
        subject: Subject,
    },
}
