//! Table-driven refresh scheduler: one independent timer task per panel.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

use crate::panel::Panel;
use crate::sink::DisplaySink;

pub struct Scheduler {
    panels: Vec<Panel>,
}

impl Scheduler {
    pub fn new(panels: Vec<Panel>) -> Self {
        Self { panels }
    }

    /// Spawn one timer task per panel and return a handle for shutdown.
    ///
    /// Each panel ticks once immediately (so every panel is painted at
    /// startup) and then every `interval`. Cancelling `shutdown` stops the
    /// timers and abandons in-flight provider calls without waiting on them.
    pub fn start(self, sink: Arc<dyn DisplaySink>, shutdown: CancellationToken) -> SchedulerHandle {
        let tracker = TaskTracker::new();

        for panel in self.panels {
            let interval_ms = panel.interval.as_millis() as u64;
            tracing::debug!(panel = %panel.name, interval_ms, "starting panel timer");
            tracker.spawn(drive_panel(panel, sink.clone(), shutdown.clone()));
        }
        tracker.close();

        SchedulerHandle { tracker }
    }
}

/// Handle to the running panel timers.
pub struct SchedulerHandle {
    tracker: TaskTracker,
}

impl SchedulerHandle {
    /// Wait for every panel timer to wind down after cancellation.
    pub async fn wait(&self) {
        self.tracker.wait().await;
    }
}

async fn drive_panel(panel: Panel, sink: Arc<dyn DisplaySink>, shutdown: CancellationToken) {
    let mut ticker = tokio::time::interval(panel.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    // Highest tick sequence published so far. Publishing happens under this
    // lock, so a slow response can never overwrite a fresher one.
    let latest_published = Arc::new(Mutex::new(0u64));
    let mut next_seq: u64 = 0;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                next_seq += 1;
                spawn_refresh(&panel, next_seq, &sink, &latest_published, &shutdown);
            }
            () = shutdown.cancelled() => {
                tracing::debug!(panel = %panel.name, "panel timer stopped");
                break;
            }
        }
    }
}

// Each tick refreshes in its own task so a slow provider response never
// delays the panel's next tick, and overlapping refreshes stay independent.
fn spawn_refresh(
    panel: &Panel,
    seq: u64,
    sink: &Arc<dyn DisplaySink>,
    latest_published: &Arc<Mutex<u64>>,
    shutdown: &CancellationToken,
) {
    let name = panel.name.clone();
    let op = panel.op.clone();
    let sink = sink.clone();
    let latest_published = latest_published.clone();
    let shutdown = shutdown.clone();

    tokio::spawn(async move {
        tokio::select! {
            update = op() => {
                let mut latest = latest_published.lock();
                if seq <= *latest {
                    tracing::debug!(panel = %name, seq, "discarding stale refresh");
                    return;
                }
                *latest = seq;
                sink.publish(&name, update);
            }
            () = shutdown.cancelled() => {
                tracing::debug!(panel = %name, seq, "abandoning in-flight refresh");
            }
        }
    });
}
