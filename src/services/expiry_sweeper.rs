//! Background expiry sweeper
//!
//! Periodically removes expired links so that codes nobody opens again do
//! not stay in memory until the owner lists or edits their links.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use crate::errors::Result;
use crate::services::link_service::LinkService;

/// Shortest accepted interval between two sweeps
pub const MIN_SWEEP_INTERVAL: Duration = Duration::from_secs(1);

/// Something that can drop its expired entries in one pass
pub trait SweepTarget: Send + Sync + 'static {
    fn sweep(&self) -> Result<usize>;
}

impl SweepTarget for LinkService {
    fn sweep(&self) -> Result<usize> {
        Ok(self.cleanup_expired_now())
    }
}

/// Counters describing what the sweeper has done so far
#[derive(Debug, Default)]
pub struct SweepStats {
    ticks: AtomicU64,
    removed: AtomicU64,
    failures: AtomicU64,
}

impl SweepStats {
    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }

    pub fn removed(&self) -> u64 {
        self.removed.load(Ordering::Relaxed)
    }

    pub fn failures(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }
}

/// Handle to the running sweep task
///
/// Dropping the handle closes the stop channel, which ends the task as well.
pub struct ExpirySweeper {
    interval: Duration,
    stats: Arc<SweepStats>,
    stop_tx: watch::Sender<bool>,
    handle: Option<JoinHandle<()>>,
}

impl ExpirySweeper {
    /// Spawn the sweep loop on the current tokio runtime
    ///
    /// The first sweep runs one interval after start. Intervals below
    /// [`MIN_SWEEP_INTERVAL`] are raised to it.
    pub fn start<T: SweepTarget>(target: Arc<T>, interval: Duration) -> Self {
        let interval = interval.max(MIN_SWEEP_INTERVAL);
        let stats = Arc::new(SweepStats::default());
        let (stop_tx, stop_rx) = watch::channel(false);

        let handle = tokio::spawn(run_loop(target, interval, Arc::clone(&stats), stop_rx));
        info!("ExpirySweeper: started with interval {:?}", interval);

        Self {
            interval,
            stats,
            stop_tx,
            handle: Some(handle),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn stats(&self) -> Arc<SweepStats> {
        Arc::clone(&self.stats)
    }

    /// Ask the loop to stop; returns immediately
    pub fn stop(&self) {
        let _ = self.stop_tx.send(true);
    }

    /// Stop the loop and wait for the task to finish
    pub async fn shutdown(mut self) {
        self.stop();
        if let Some(handle) = self.handle.take()
            && let Err(e) = handle.await
        {
            warn!("ExpirySweeper: task ended abnormally: {}", e);
        }
        info!("ExpirySweeper: stopped");
    }
}

async fn run_loop<T: SweepTarget>(
    target: Arc<T>,
    interval: Duration,
    stats: Arc<SweepStats>,
    mut stop_rx: watch::Receiver<bool>,
) {
    let mut ticker = tokio::time::interval_at(Instant::now() + interval, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            changed = stop_rx.changed() => {
                if changed.is_err() || *stop_rx.borrow() {
                    debug!("ExpirySweeper: stop requested");
                    break;
                }
            }
            _ = ticker.tick() => run_tick(target.as_ref(), &stats),
        }
    }
}

/// One sweep; failures and panics are counted and logged, never propagated
fn run_tick<T: SweepTarget + ?Sized>(target: &T, stats: &SweepStats) {
    stats.ticks.fetch_add(1, Ordering::Relaxed);

    match panic::catch_unwind(AssertUnwindSafe(|| target.sweep())) {
        Ok(Ok(0)) => debug!("ExpirySweeper: nothing to remove"),
        Ok(Ok(removed)) => {
            stats.removed.fetch_add(removed as u64, Ordering::Relaxed);
            info!("ExpirySweeper: removed {} expired links", removed);
        }
        Ok(Err(e)) => {
            stats.failures.fetch_add(1, Ordering::Relaxed);
            warn!("ExpirySweeper: sweep failed: {}", e);
        }
        Err(_) => {
            stats.failures.fetch_add(1, Ordering::Relaxed);
            error!("ExpirySweeper: sweep panicked, continuing with next tick");
        }
    }
}
