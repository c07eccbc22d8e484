//! Per-timer polling loops
//!
//! Every running timer gets its own loop. A loop owns a copy of the values it
//! needs to compute elapsed time and a cancellation token; it never reads the
//! registry. Between ticks it waits on whichever comes first: the next tick
//! or cancellation.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use super::{ElapsedUpdate, Sink, SinkSet};
use crate::clock::Clock;

/// Inputs of the elapsed-time formula for one running interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElapsedBase {
    /// Time accrued by earlier intervals
    pub accumulated: Duration,
    /// Start of the current interval
    pub started_at: Instant,
}

impl ElapsedBase {
    /// Total elapsed at `now`. A `now` before `started_at` counts as zero.
    pub fn at(&self, now: Instant) -> Duration {
        self.accumulated + now.saturating_duration_since(self.started_at)
    }
}

/// Spawns and feeds the polling loops.
pub struct UpdateBroadcaster {
    clock: Arc<dyn Clock>,
    interval: Duration,
    sinks: Arc<SinkSet>,
}

impl UpdateBroadcaster {
    pub fn new(clock: Arc<dyn Clock>, interval: Duration) -> Self {
        Self {
            clock,
            interval,
            sinks: Arc::new(SinkSet::new()),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn subscribe(&self, sink: Arc<dyn Sink>) {
        self.sinks.subscribe(sink);
    }

    /// Spawn the polling loop for one running interval.
    ///
    /// The first report is one interval after the spawn. The loop ends once
    /// `cancel` fires; a tick that is already publishing finishes first.
    pub fn spawn(
        &self,
        label: Arc<str>,
        base: ElapsedBase,
        cancel: CancellationToken,
    ) -> JoinHandle<()> {
        let clock = Arc::clone(&self.clock);
        let sinks = Arc::clone(&self.sinks);
        let period = self.interval;

        tokio::spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => break,
                    _ = ticker.tick() => {
                        let update = ElapsedUpdate::new(Arc::clone(&label), base.at(clock.now()));
                        sinks.publish(&update);
                    }
                }
            }

            tracing::debug!(label = %label, "Update loop exited");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::SystemClock;
    use crate::updates::ChannelSink;

    #[test]
    fn elapsed_base_adds_accumulated_time() {
        let started_at = Instant::now();
        let base = ElapsedBase {
            accumulated: Duration::from_secs(10),
            started_at,
        };
        assert_eq!(base.at(started_at), Duration::from_secs(10));
        assert_eq!(
            base.at(started_at + Duration::from_millis(1500)),
            Duration::from_millis(11_500)
        );
    }

    #[test]
    fn elapsed_base_ignores_instants_before_start() {
        let started_at = Instant::now() + Duration::from_secs(5);
        let base = ElapsedBase {
            accumulated: Duration::from_secs(2),
            started_at,
        };
        assert_eq!(base.at(Instant::now()), Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn loop_reports_until_cancelled() {
        let broadcaster = UpdateBroadcaster::new(Arc::new(SystemClock), Duration::from_millis(500));
        let (sink, mut rx) = ChannelSink::channel();
        broadcaster.subscribe(Arc::new(sink));

        let cancel = CancellationToken::new();
        let base = ElapsedBase {
            accumulated: Duration::from_secs(60),
            started_at: Instant::now(),
        };
        let handle = broadcaster.spawn(Arc::from("a"), base, cancel.clone());

        time::sleep(Duration::from_millis(1250)).await;
        cancel.cancel();
        handle.await.unwrap();

        let mut reports = Vec::new();
        while let Ok(update) = rx.try_recv() {
            reports.push(update.elapsed);
        }
        assert_eq!(
            reports,
            vec![Duration::from_millis(60_500), Duration::from_millis(61_000)]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn cancelling_twice_is_harmless() {
        let broadcaster = UpdateBroadcaster::new(Arc::new(SystemClock), Duration::from_millis(100));
        let cancel = CancellationToken::new();
        let base = ElapsedBase {
            accumulated: Duration::ZERO,
            started_at: Instant::now(),
        };
        let handle = broadcaster.spawn(Arc::from("a"), base, cancel.clone());

        cancel.cancel();
        cancel.cancel();
        handle.await.unwrap();
        assert!(cancel.is_cancelled());
    }
}
