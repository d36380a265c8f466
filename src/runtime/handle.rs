use std::sync::Arc;

use thiserror::Error;
use tokio::{
    sync::{Mutex, broadcast, mpsc, oneshot},
    time::{Duration, Instant, Interval, MissedTickBehavior, interval, sleep_until},
};

use crate::{
    core::store::{RecordStore, StoreSnapshot},
    persist::{self, Collection, KvStore},
    record::{Goals, Session, SessionDraft, Target, TestDraft, TestResult},
    streak,
    timer::{DayStats, FocusTimer, Tick},
    types::{RecordId, Subject, today_local},
};

use super::events::ZenithEvent;

/// Errors surfaced by [`ZenithHandle`] calls.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The runtime task has stopped.
    #[error("runtime channel closed")]
    ChannelClosed,
}

/// Tunables for the runtime loop.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Quiet period before a mutated collection is written through.
    pub debounce_ms: u64,
    /// Command channel capacity.
    pub cmd_queue_bound: usize,
    /// Broadcast event buffer capacity.
    pub events_capacity: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 500,
            cmd_queue_bound: 256,
            events_capacity: 1024,
        }
    }
}

/// Point-in-time view of the focus timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerSnapshot {
    /// Active subject.
    pub subject: Subject,
    /// Configured duration in minutes.
    pub duration_minutes: u32,
    /// Seconds left on the countdown.
    pub remaining_secs: u32,
    /// True while the countdown is active.
    pub running: bool,
    /// Today's accumulated per-subject statistics.
    pub today: DayStats,
}

/// Cloneable handle to the single-writer runtime loop.
pub struct ZenithHandle {
    cmd_tx: mpsc::Sender<Command>,
    events_tx: broadcast::Sender<ZenithEvent>,
}

impl Clone for ZenithHandle {
    fn clone(&self) -> Self {
        Self {
            cmd_tx: self.cmd_tx.clone(),
            events_tx: self.events_tx.clone(),
        }
    }
}

enum Command {
    CreateSession {
        draft: SessionDraft,
        resp: oneshot::Sender<RecordId>,
    },
    DeleteSession {
        id: RecordId,
        resp: oneshot::Sender<()>,
    },
    CreateTest {
        draft: TestDraft,
        resp: oneshot::Sender<RecordId>,
    },
    DeleteTest {
        id: RecordId,
        resp: oneshot::Sender<()>,
    },
    AddTarget {
        target: Target,
        resp: oneshot::Sender<()>,
    },
    SetTargetCompleted {
        id: RecordId,
        completed: bool,
        resp: oneshot::Sender<()>,
    },
    DeleteTarget {
        id: RecordId,
        resp: oneshot::Sender<()>,
    },
    SetGoals {
        goals: Goals,
        resp: oneshot::Sender<()>,
    },
    Sessions {
        resp: oneshot::Sender<Vec<Session>>,
    },
    Tests {
        resp: oneshot::Sender<Vec<TestResult>>,
    },
    Targets {
        resp: oneshot::Sender<Vec<Target>>,
    },
    GoalsQuery {
        resp: oneshot::Sender<Goals>,
    },
    Snapshot {
        resp: oneshot::Sender<StoreSnapshot>,
    },
    StreakCheckIn {
        resp: oneshot::Sender<u32>,
    },
    TimerConfigure {
        subject: Option<Subject>,
        minutes: Option<u32>,
        resp: oneshot::Sender<()>,
    },
    TimerStart {
        resp: oneshot::Sender<()>,
    },
    TimerPause {
        resp: oneshot::Sender<()>,
    },
    TimerReset {
        resp: oneshot::Sender<()>,
    },
    TimerState {
        resp: oneshot::Sender<TimerSnapshot>,
    },
    Flush {
        resp: oneshot::Sender<()>,
    },
    Shutdown {
        resp: oneshot::Sender<()>,
    },
}

type SharedKv = Arc<Mutex<Box<dyn KvStore>>>;

/// Spawns the single-writer runtime loop and returns its handle.
///
/// The loop owns the store, the storage backend, the per-collection
/// debounce deadlines, and the focus timer. Each mutation schedules a
/// trailing-debounce write of the whole collection; timer ticks write the
/// day's statistics through immediately.
pub fn spawn_zenith(store: RecordStore, kv: Box<dyn KvStore>, config: RuntimeConfig) -> ZenithHandle {
    let (cmd_tx, mut cmd_rx) = mpsc::channel::<Command>(config.cmd_queue_bound);
    let (events_tx, _) = broadcast::channel::<ZenithEvent>(config.events_capacity);

    let timer = FocusTimer::new(Subject::Physics, &*kv, today_local());
    let events_tx_loop = events_tx.clone();

    tokio::spawn(async move {
        let kv: SharedKv = Arc::new(Mutex::new(kv));
        let mut store = store;
        let mut timer = timer;
        let mut deadlines: [Option<Instant>; 4] = [None; 4];

        let mut tick_interval = interval(Duration::from_secs(1));
        tick_interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            let next_deadline = deadlines.iter().flatten().min().copied();

            tokio::select! {
                cmd = cmd_rx.recv() => {
                    let Some(cmd) = cmd else {
                        flush_pending(&kv, &store, &mut deadlines, &events_tx_loop, true).await;
                        break;
                    };
                    let done = handle_command(
                        cmd,
                        &mut store,
                        &mut timer,
                        &kv,
                        &events_tx_loop,
                        &config,
                        &mut deadlines,
                        &mut tick_interval,
                    ).await;
                    if done {
                        break;
                    }
                }
                _ = sleep_until(next_deadline.unwrap_or_else(Instant::now)), if next_deadline.is_some() => {
                    flush_pending(&kv, &store, &mut deadlines, &events_tx_loop, false).await;
                }
                _ = tick_interval.tick(), if timer.is_running() => {
                    let outcome = {
                        let mut guard = kv.lock().await;
                        timer.tick(&mut **guard, today_local())
                    };
                    if outcome == Tick::Finished {
                        let _ = events_tx_loop.send(ZenithEvent::TimerFinished {
                            subject: timer.subject(),
                        });
                    }
                }
            }
        }
    });

    ZenithHandle { cmd_tx, events_tx }
}

impl ZenithHandle {
    /// Subscribes to the runtime event stream.
    pub fn subscribe(&self) -> broadcast::Receiver<ZenithEvent> {
        self.events_tx.subscribe()
    }

    /// Logs a session and returns its assigned id.
    pub async fn create_session(&self, draft: SessionDraft) -> Result<RecordId, RuntimeError> {
        self.request(|resp| Command::CreateSession { draft, resp })
            .await
    }

    /// Removes a session. Missing ids are a no-op.
    pub async fn delete_session(&self, id: RecordId) -> Result<(), RuntimeError> {
        self.request(|resp| Command::DeleteSession { id, resp }).await
    }

    /// Logs a mock-test result and returns its assigned id.
    pub async fn create_test(&self, draft: TestDraft) -> Result<RecordId, RuntimeError> {
        self.request(|resp| Command::CreateTest { draft, resp }).await
    }

    /// Removes a mock-test result. Missing ids are a no-op.
    pub async fn delete_test(&self, id: RecordId) -> Result<(), RuntimeError> {
        self.request(|resp| Command::DeleteTest { id, resp }).await
    }

    /// Adds a caller-built planner target.
    pub async fn add_target(&self, target: Target) -> Result<(), RuntimeError> {
        self.request(|resp| Command::AddTarget { target, resp }).await
    }

    /// Sets a target's completion flag. Missing ids are a no-op.
    pub async fn set_target_completed(
        &self,
        id: RecordId,
        completed: bool,
    ) -> Result<(), RuntimeError> {
        self.request(|resp| Command::SetTargetCompleted { id, completed, resp })
            .await
    }

    /// Removes a planner target. Missing ids are a no-op.
    pub async fn delete_target(&self, id: RecordId) -> Result<(), RuntimeError> {
        self.request(|resp| Command::DeleteTarget { id, resp }).await
    }

    /// Replaces the goals object wholesale.
    pub async fn set_goals(&self, goals: Goals) -> Result<(), RuntimeError> {
        self.request(|resp| Command::SetGoals { goals, resp }).await
    }

    /// Current sessions, newest first.
    pub async fn sessions(&self) -> Result<Vec<Session>, RuntimeError> {
        self.request(|resp| Command::Sessions { resp }).await
    }

    /// Current test results, newest first.
    pub async fn tests(&self) -> Result<Vec<TestResult>, RuntimeError> {
        self.request(|resp| Command::Tests { resp }).await
    }

    /// Current targets in append order.
    pub async fn targets(&self) -> Result<Vec<Target>, RuntimeError> {
        self.request(|resp| Command::Targets { resp }).await
    }

    /// Current goals.
    pub async fn goals(&self) -> Result<Goals, RuntimeError> {
        self.request(|resp| Command::GoalsQuery { resp }).await
    }

    /// Full snapshot of every collection.
    pub async fn snapshot(&self) -> Result<StoreSnapshot, RuntimeError> {
        self.request(|resp| Command::Snapshot { resp }).await
    }

    /// Runs the once-per-start streak evaluation and returns the count.
    pub async fn streak_check_in(&self) -> Result<u32, RuntimeError> {
        self.request(|resp| Command::StreakCheckIn { resp }).await
    }

    /// Reconfigures the focus timer's subject and/or duration.
    pub async fn timer_configure(
        &self,
        subject: Option<Subject>,
        minutes: Option<u32>,
    ) -> Result<(), RuntimeError> {
        self.request(|resp| Command::TimerConfigure { subject, minutes, resp })
            .await
    }

    /// Starts the focus countdown.
    pub async fn timer_start(&self) -> Result<(), RuntimeError> {
        self.request(|resp| Command::TimerStart { resp }).await
    }

    /// Pauses the focus countdown. Idempotent.
    pub async fn timer_pause(&self) -> Result<(), RuntimeError> {
        self.request(|resp| Command::TimerPause { resp }).await
    }

    /// Stops the countdown and restores the full duration.
    pub async fn timer_reset(&self) -> Result<(), RuntimeError> {
        self.request(|resp| Command::TimerReset { resp }).await
    }

    /// Current focus-timer state.
    pub async fn timer_state(&self) -> Result<TimerSnapshot, RuntimeError> {
        self.request(|resp| Command::TimerState { resp }).await
    }

    /// Writes every pending collection through immediately.
    pub async fn flush(&self) -> Result<(), RuntimeError> {
        self.request(|resp| Command::Flush { resp }).await
    }

    /// Flushes pending writes and stops the runtime loop.
    pub async fn shutdown(&self) -> Result<(), RuntimeError> {
        self.request(|resp| Command::Shutdown { resp }).await
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> Command,
    ) -> Result<T, RuntimeError> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(build(tx))
            .await
            .map_err(|_| RuntimeError::ChannelClosed)?;
        rx.await.map_err(|_| RuntimeError::ChannelClosed)
    }
}

#[allow(clippy::too_many_arguments)]
async fn handle_command(
    cmd: Command,
    store: &mut RecordStore,
    timer: &mut FocusTimer,
    kv: &SharedKv,
    events_tx: &broadcast::Sender<ZenithEvent>,
    config: &RuntimeConfig,
    deadlines: &mut [Option<Instant>; 4],
    tick_interval: &mut Interval,
) -> bool {
    match cmd {
        Command::CreateSession { draft, resp } => {
            let id = store.create_session(draft);
            mark_dirty(deadlines, Collection::Sessions, config.debounce_ms);
            let _ = events_tx.send(ZenithEvent::SessionCreated { id });
            let _ = resp.send(id);
        }
        Command::DeleteSession { id, resp } => {
            store.delete_session(id);
            mark_dirty(deadlines, Collection::Sessions, config.debounce_ms);
            let _ = events_tx.send(ZenithEvent::SessionDeleted { id });
            let _ = resp.send(());
        }
        Command::CreateTest { draft, resp } => {
            let id = store.create_test(draft);
            mark_dirty(deadlines, Collection::Tests, config.debounce_ms);
            let _ = events_tx.send(ZenithEvent::TestCreated { id });
            let _ = resp.send(id);
        }
        Command::DeleteTest { id, resp } => {
            store.delete_test(id);
            mark_dirty(deadlines, Collection::Tests, config.debounce_ms);
            let _ = events_tx.send(ZenithEvent::TestDeleted { id });
            let _ = resp.send(());
        }
        Command::AddTarget { target, resp } => {
            let id = target.id;
            store.add_target(target);
            mark_dirty(deadlines, Collection::Targets, config.debounce_ms);
            let _ = events_tx.send(ZenithEvent::TargetAdded { id });
            let _ = resp.send(());
        }
        Command::SetTargetCompleted { id, completed, resp } => {
            store.set_target_completed(id, completed);
            mark_dirty(deadlines, Collection::Targets, config.debounce_ms);
            let _ = events_tx.send(ZenithEvent::TargetUpdated { id });
            let _ = resp.send(());
        }
        Command::DeleteTarget { id, resp } => {
            store.delete_target(id);
            mark_dirty(deadlines, Collection::Targets, config.debounce_ms);
            let _ = events_tx.send(ZenithEvent::TargetDeleted { id });
            let _ = resp.send(());
        }
        Command::SetGoals { goals, resp } => {
            store.set_goals(goals);
            mark_dirty(deadlines, Collection::Goals, config.debounce_ms);
            let _ = events_tx.send(ZenithEvent::GoalsReplaced);
            let _ = resp.send(());
        }
        Command::Sessions { resp } => {
            let _ = resp.send(store.sessions().to_vec());
        }
        Command::Tests { resp } => {
            let _ = resp.send(store.tests().to_vec());
        }
        Command::Targets { resp } => {
            let _ = resp.send(store.targets().to_vec());
        }
        Command::GoalsQuery { resp } => {
            let _ = resp.send(store.goals().clone());
        }
        Command::Snapshot { resp } => {
            let _ = resp.send(store.export_snapshot());
        }
        Command::StreakCheckIn { resp } => {
            let count = {
                let mut guard = kv.lock().await;
                streak::check_in(&mut **guard, today_local())
            };
            let _ = resp.send(count);
        }
        Command::TimerConfigure { subject, minutes, resp } => {
            if let Some(subject) = subject {
                timer.set_subject(subject);
            }
            if let Some(minutes) = minutes {
                timer.set_duration_minutes(minutes);
            }
            let _ = resp.send(());
        }
        Command::TimerStart { resp } => {
            timer.start();
            // Align the first tick a full second after the start command.
            tick_interval.reset();
            let _ = resp.send(());
        }
        Command::TimerPause { resp } => {
            timer.pause();
            let _ = resp.send(());
        }
        Command::TimerReset { resp } => {
            timer.reset();
            let _ = resp.send(());
        }
        Command::TimerState { resp } => {
            let _ = resp.send(TimerSnapshot {
                subject: timer.subject(),
                duration_minutes: timer.duration_minutes(),
                remaining_secs: timer.remaining_secs(),
                running: timer.is_running(),
                today: timer.day_stats(),
            });
        }
        Command::Flush { resp } => {
            flush_pending(kv, store, deadlines, events_tx, true).await;
            let _ = resp.send(());
        }
        Command::Shutdown { resp } => {
            flush_pending(kv, store, deadlines, events_tx, true).await;
            let _ = resp.send(());
            return true;
        }
    }

    false
}

fn mark_dirty(deadlines: &mut [Option<Instant>; 4], collection: Collection, debounce_ms: u64) {
    deadlines[collection as usize] = Some(Instant::now() + Duration::from_millis(debounce_ms));
}

/// Writes every due collection through to storage.
///
/// With `force`, every pending collection is written regardless of its
/// deadline. A failed write is logged and dropped; the in-memory state
/// stays authoritative and the next mutation schedules a fresh write.
async fn flush_pending(
    kv: &SharedKv,
    store: &RecordStore,
    deadlines: &mut [Option<Instant>; 4],
    events_tx: &broadcast::Sender<ZenithEvent>,
    force: bool,
) {
    let now = Instant::now();

    for collection in Collection::ALL {
        let due = match deadlines[collection as usize] {
            Some(deadline) => force || deadline <= now,
            None => false,
        };
        if !due {
            continue;
        }
        deadlines[collection as usize] = None;

        let payload = match persist::encode_collection(store, collection) {
            Ok(payload) => payload,
            Err(err) => {
                tracing::warn!(key = collection.key(), %err, "failed to serialize collection");
                continue;
            }
        };

        let kv_ref = Arc::clone(kv);
        let result = tokio::task::spawn_blocking(move || {
            let mut kv = kv_ref.blocking_lock();
            kv.set(collection.key(), &payload)
        })
        .await;

        match result {
            Ok(Ok(())) => {
                let _ = events_tx.send(ZenithEvent::Flushed { collection });
            }
            Ok(Err(err)) => {
                tracing::warn!(
                    key = collection.key(),
                    %err,
                    "storage write failed, keeping in-memory state",
                );
            }
            Err(err) => {
                tracing::warn!(key = collection.key(), %err, "storage write task failed");
            }
        }
    }
}
