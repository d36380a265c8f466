use std::time::Duration;

use chrono::NaiveDate;
use tokio::time;

use zenith::{
    persist::{self, keys, memory::MemoryKv},
    record::{MistakeCounts, Session, SessionDraft, Target},
    runtime::handle::{RuntimeConfig, spawn_zenith},
    types::Subject,
};

fn draft(topic: &str) -> SessionDraft {
    SessionDraft {
        subject: Subject::Chemistry,
        topic: topic.to_string(),
        attempted: 10,
        correct: 8,
        mistakes: MistakeCounts::new(),
    }
}

/// Lets the runtime task drain any work made ready by a clock advance.
async fn settle() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}

/// Waits for `n` storage writes without advancing the paused clock.
///
/// Writes land on the blocking pool, so this polls in real time while the
/// test task stays runnable.
async fn wait_for_writes(kv: &MemoryKv, n: u64) {
    for _ in 0..1000 {
        if kv.write_count() >= n {
            return;
        }
        tokio::task::yield_now().await;
        std::thread::sleep(Duration::from_millis(1));
    }
    panic!("expected {n} writes, saw {}", kv.write_count());
}

#[tokio::test(start_paused = true)]
async fn burst_of_edits_persists_once_with_final_state() {
    let kv = MemoryKv::new();
    let handle = spawn_zenith(
        persist::hydrate(&kv),
        Box::new(kv.clone()),
        RuntimeConfig::default(),
    );

    // Mutations at t=0, t=100ms, t=200ms, all inside the 500ms window.
    handle.create_session(draft("Equilibrium")).await.expect("create");
    time::advance(Duration::from_millis(100)).await;
    handle.create_session(draft("Hydrocarbons")).await.expect("create");
    time::advance(Duration::from_millis(100)).await;
    handle.create_session(draft("Biomolecules")).await.expect("create");

    // At t=699ms the trailing deadline (200 + 500) has not fired yet.
    time::advance(Duration::from_millis(499)).await;
    settle().await;
    assert_eq!(kv.write_count(), 0);

    time::advance(Duration::from_millis(2)).await;
    wait_for_writes(&kv, 1).await;

    assert_eq!(kv.write_count(), 1);
    let payload = kv.value(keys::SESSIONS).expect("payload");
    let persisted: Vec<Session> = serde_json::from_str(&payload).expect("parse");
    assert_eq!(persisted.len(), 3);
    assert_eq!(persisted[0].topic, "Biomolecules");

    // Nothing further is pending.
    time::advance(Duration::from_millis(600)).await;
    settle().await;
    assert_eq!(kv.write_count(), 1);

    handle.shutdown().await.expect("shutdown");
}

#[tokio::test(start_paused = true)]
async fn collections_debounce_independently() {
    let kv = MemoryKv::new();
    let handle = spawn_zenith(
        persist::hydrate(&kv),
        Box::new(kv.clone()),
        RuntimeConfig::default(),
    );

    handle.create_session(draft("Solutions")).await.expect("create");
    time::advance(Duration::from_millis(300)).await;
    let date = NaiveDate::from_ymd_opt(2026, 4, 9).expect("date");
    handle
        .add_target(Target::new(date, "Two mock papers"))
        .await
        .expect("add target");

    // Sessions flush at t=500 while the targets deadline is still pending.
    time::advance(Duration::from_millis(201)).await;
    wait_for_writes(&kv, 1).await;
    assert!(kv.value(keys::SESSIONS).is_some());
    assert!(kv.value(keys::TARGETS).is_none());

    // Targets flush at their own t=800 deadline.
    time::advance(Duration::from_millis(300)).await;
    wait_for_writes(&kv, 2).await;
    assert!(kv.value(keys::TARGETS).is_some());

    handle.shutdown().await.expect("shutdown");
}

#[tokio::test(start_paused = true)]
async fn shutdown_flushes_pending_burst() {
    let kv = MemoryKv::new();
    let handle = spawn_zenith(
        persist::hydrate(&kv),
        Box::new(kv.clone()),
        RuntimeConfig::default(),
    );

    handle.create_session(draft("Chemical Kinetics")).await.expect("create");
    // Well inside the debounce window; shutdown must not lose the edit.
    time::advance(Duration::from_millis(50)).await;
    handle.shutdown().await.expect("shutdown");

    assert_eq!(kv.write_count(), 1);
    let payload = kv.value(keys::SESSIONS).expect("payload");
    let persisted: Vec<Session> = serde_json::from_str(&payload).expect("parse");
    assert_eq!(persisted.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn rapid_toggles_persist_only_the_last_state() {
    let kv = MemoryKv::new();
    let handle = spawn_zenith(
        persist::hydrate(&kv),
        Box::new(kv.clone()),
        RuntimeConfig::default(),
    );

    let date = NaiveDate::from_ymd_opt(2026, 4, 9).expect("date");
    let target = Target::new(date, "Revise coordination compounds");
    let id = target.id;
    handle.add_target(target).await.expect("add");

    for completed in [true, false, true] {
        time::advance(Duration::from_millis(50)).await;
        handle
            .set_target_completed(id, completed)
            .await
            .expect("toggle");
    }

    time::advance(Duration::from_millis(501)).await;
    wait_for_writes(&kv, 1).await;

    assert_eq!(kv.write_count(), 1);
    let payload = kv.value(keys::TARGETS).expect("payload");
    let persisted: Vec<Target> = serde_json::from_str(&payload).expect("parse");
    assert_eq!(persisted.len(), 1);
    assert!(persisted[0].completed);

    handle.shutdown().await.expect("shutdown");
}
