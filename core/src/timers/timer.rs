//! A single named stopwatch
//!
//! A `Timer` is either stopped or running. While running it owns exactly one
//! update loop, tied to it by a cancellation token created for that interval.
//!
//! # Lifecycle
//!
//! 1. Created stopped with zero elapsed
//! 2. `resume` records the interval start and spawns the update loop
//! 3. `pause` cancels the loop, folds the interval into `accumulated`
//! 4. Repeat 2-3 as often as needed; elapsed keeps growing

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::TimerError;
use crate::clock::Clock;
use crate::updates::{ElapsedBase, UpdateBroadcaster};

/// Externally visible timer state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerState {
    Stopped,
    Running,
}

impl fmt::Display for TimerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimerState::Stopped => f.pad("stopped"),
            TimerState::Running => f.pad("running"),
        }
    }
}

/// The current running interval and its update loop
#[derive(Debug)]
struct RunningInterval {
    base: ElapsedBase,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

#[derive(Debug)]
pub struct Timer {
    label: Arc<str>,
    /// Time accrued by all finished intervals
    accumulated: Duration,
    running: Option<RunningInterval>,
}

impl Timer {
    pub fn new(label: impl Into<Arc<str>>) -> Self {
        Self {
            label: label.into(),
            accumulated: Duration::ZERO,
            running: None,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn state(&self) -> TimerState {
        if self.running.is_some() {
            TimerState::Running
        } else {
            TimerState::Stopped
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Time accrued by finished intervals only
    pub fn accumulated(&self) -> Duration {
        self.accumulated
    }

    /// Total elapsed as observed by `clock`
    pub fn elapsed(&self, clock: &dyn Clock) -> Duration {
        match &self.running {
            Some(run) => run.base.at(clock.now()),
            None => self.accumulated,
        }
    }

    /// Begin a running interval and spawn its update loop.
    ///
    /// Fails with `NotStopped` if an interval is already open; the existing
    /// loop is left alone.
    pub fn resume(
        &mut self,
        clock: &dyn Clock,
        broadcaster: &UpdateBroadcaster,
    ) -> Result<(), TimerError> {
        if self.running.is_some() {
            return Err(TimerError::NotStopped {
                label: self.label.to_string(),
            });
        }

        let base = ElapsedBase {
            accumulated: self.accumulated,
            started_at: clock.now(),
        };
        let cancel = CancellationToken::new();
        let task = broadcaster.spawn(Arc::clone(&self.label), base, cancel.clone());

        self.running = Some(RunningInterval { base, cancel, task });
        Ok(())
    }

    /// Close the running interval.
    ///
    /// The loop is cancelled before the final elapsed is read. Returns the
    /// total elapsed and the loop's handle; the caller should await it to be
    /// sure no report for this interval is still in flight.
    pub fn pause(&mut self, clock: &dyn Clock) -> Result<(Duration, JoinHandle<()>), TimerError> {
        let Some(run) = self.running.take() else {
            return Err(TimerError::NotRunning {
                label: self.label.to_string(),
            });
        };

        run.cancel.cancel();
        let total = run.base.at(clock.now());
        // Never shrink, even if the clock misbehaves.
        self.accumulated = total.max(self.accumulated);

        Ok((self.accumulated, run.task))
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        if let Some(run) = self.running.take() {
            run.cancel.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn broadcaster(clock: &Arc<ManualClock>) -> UpdateBroadcaster {
        UpdateBroadcaster::new(
            Arc::clone(clock) as Arc<dyn Clock>,
            Duration::from_millis(500),
        )
    }

    #[tokio::test]
    async fn new_timer_is_stopped_with_zero_elapsed() {
        let clock = Arc::new(ManualClock::new());
        let timer = Timer::new("tea");
        assert_eq!(timer.state(), TimerState::Stopped);
        assert_eq!(timer.elapsed(clock.as_ref()), Duration::ZERO);
        assert_eq!(timer.label(), "tea");
    }

    #[tokio::test]
    async fn elapsed_accumulates_across_intervals() {
        let clock = Arc::new(ManualClock::new());
        let updates = broadcaster(&clock);
        let mut timer = Timer::new("tea");

        timer.resume(clock.as_ref(), &updates).unwrap();
        clock.advance(Duration::from_secs(3));
        assert_eq!(timer.elapsed(clock.as_ref()), Duration::from_secs(3));

        let (total, task) = timer.pause(clock.as_ref()).unwrap();
        task.await.unwrap();
        assert_eq!(total, Duration::from_secs(3));

        // Stopped time does not count
        clock.advance(Duration::from_secs(100));
        assert_eq!(timer.elapsed(clock.as_ref()), Duration::from_secs(3));

        timer.resume(clock.as_ref(), &updates).unwrap();
        clock.advance(Duration::from_secs(2));
        let (total, task) = timer.pause(clock.as_ref()).unwrap();
        task.await.unwrap();
        assert_eq!(total, Duration::from_secs(5));
        assert_eq!(timer.accumulated(), Duration::from_secs(5));
    }

    #[tokio::test]
    async fn resume_while_running_is_rejected() {
        let clock = Arc::new(ManualClock::new());
        let updates = broadcaster(&clock);
        let mut timer = Timer::new("tea");

        timer.resume(clock.as_ref(), &updates).unwrap();
        let err = timer.resume(clock.as_ref(), &updates).unwrap_err();
        assert_eq!(
            err,
            TimerError::NotStopped {
                label: "tea".to_string()
            }
        );
        assert!(timer.is_running());
    }

    #[tokio::test]
    async fn pause_while_stopped_is_rejected() {
        let clock = Arc::new(ManualClock::new());
        let mut timer = Timer::new("tea");
        let err = timer.pause(clock.as_ref()).unwrap_err();
        assert!(matches!(err, TimerError::NotRunning { .. }));
        assert_eq!(timer.accumulated(), Duration::ZERO);
    }

    #[tokio::test]
    async fn dropping_a_running_timer_ends_its_loop() {
        let clock = Arc::new(ManualClock::new());
        let updates = broadcaster(&clock);
        let mut timer = Timer::new("tea");
        timer.resume(clock.as_ref(), &updates).unwrap();

        let cancel = timer.running.as_ref().unwrap().cancel.clone();
        drop(timer);
        assert!(cancel.is_cancelled());
    }
}
