//! ExpirySweeper tests
//!
//! Run on a paused tokio clock so interval ticks are deterministic.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use clicklink::errors::{ClicklinkError, Result};
use clicklink::services::{CodeGenerator, ExpirySweeper, LinkService, SweepTarget};
use clicklink::storage::LinkStore;
use uuid::Uuid;

/// Fails on the listed calls (1-based), panics on `panic_on`, otherwise removes one entry
struct ScriptedTarget {
    calls: AtomicUsize,
    fail_on: Vec<usize>,
    panic_on: Option<usize>,
}

impl ScriptedTarget {
    fn new(fail_on: Vec<usize>, panic_on: Option<usize>) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail_on,
            panic_on,
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SweepTarget for ScriptedTarget {
    fn sweep(&self) -> Result<usize> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.panic_on == Some(call) {
            panic!("scripted sweep panic");
        }
        if self.fail_on.contains(&call) {
            return Err(ClicklinkError::configuration("scripted failure"));
        }
        Ok(1)
    }
}

#[tokio::test(start_paused = true)]
async fn test_ticks_on_interval() {
    let target = Arc::new(ScriptedTarget::new(vec![], None));
    let sweeper = ExpirySweeper::start(Arc::clone(&target), Duration::from_secs(2));

    tokio::time::sleep(Duration::from_millis(1_500)).await;
    assert_eq!(target.calls(), 0);

    tokio::time::sleep(Duration::from_secs(6)).await;
    assert_eq!(target.calls(), 3);

    let stats = sweeper.stats();
    assert_eq!(stats.ticks(), 3);
    assert_eq!(stats.removed(), 3);
    assert_eq!(stats.failures(), 0);

    sweeper.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_failed_and_panicking_ticks_do_not_stop_schedule() {
    let target = Arc::new(ScriptedTarget::new(vec![1, 3], Some(2)));
    let sweeper = ExpirySweeper::start(Arc::clone(&target), Duration::from_secs(1));

    tokio::time::sleep(Duration::from_millis(5_500)).await;

    let stats = sweeper.stats();
    assert_eq!(target.calls(), 5);
    assert_eq!(stats.ticks(), 5);
    assert_eq!(stats.failures(), 3);
    assert_eq!(stats.removed(), 2);

    sweeper.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_stops_further_ticks() {
    let target = Arc::new(ScriptedTarget::new(vec![], None));
    let sweeper = ExpirySweeper::start(Arc::clone(&target), Duration::from_secs(1));

    tokio::time::sleep(Duration::from_millis(2_500)).await;
    sweeper.shutdown().await;
    let calls = target.calls();
    assert_eq!(calls, 2);

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(target.calls(), calls);
}

#[tokio::test(start_paused = true)]
async fn test_dropping_handle_stops_task() {
    let target = Arc::new(ScriptedTarget::new(vec![], None));
    let sweeper = ExpirySweeper::start(Arc::clone(&target), Duration::from_secs(1));
    drop(sweeper);

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(target.calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_interval_is_clamped_to_one_second() {
    let target = Arc::new(ScriptedTarget::new(vec![], None));
    let sweeper = ExpirySweeper::start(Arc::clone(&target), Duration::from_millis(10));
    assert_eq!(sweeper.interval(), Duration::from_secs(1));

    tokio::time::sleep(Duration::from_millis(500)).await;
    assert_eq!(target.calls(), 0);

    sweeper.shutdown().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_sweeps_expired_links_from_service() {
    let service = Arc::new(
        LinkService::new(
            Arc::new(LinkStore::new()),
            CodeGenerator::new(8).unwrap(),
            "MyLink",
            Duration::from_millis(100),
        )
        .unwrap(),
    );
    let owner = Uuid::new_v4();
    for i in 0..3 {
        service
            .create(Some(owner), &format!("https://example.com/{}", i), 1)
            .unwrap();
    }

    let sweeper = ExpirySweeper::start(Arc::clone(&service), Duration::from_secs(1));
    tokio::time::sleep(Duration::from_millis(1_500)).await;

    assert_eq!(service.link_count(), 0);
    assert_eq!(sweeper.stats().removed(), 3);
    sweeper.shutdown().await;
}
