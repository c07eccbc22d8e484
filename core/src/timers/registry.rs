//! Timer registry
//!
//! Owns every [`Timer`] and serializes all transitions behind one async
//! mutex. Callers never hold a timer; they get [`TimerStatus`] snapshots.
//!
//! Each transition checks state and applies the change with no await point
//! in between, so a failed call leaves nothing half-applied. `stop` and
//! `remove` then wait for the update loop to exit while still holding the
//! lock, so a following `restart` cannot overlap the old loop.

use std::sync::Arc;
use std::time::Duration;

use hashbrown::HashMap;
use tempo_types::TimerSettings;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use super::{Timer, TimerError, TimerState};
use crate::clock::{Clock, SystemClock};
use crate::updates::{ElapsedFields, Sink, UpdateBroadcaster};

/// Point-in-time view of one timer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerStatus {
    pub label: String,
    pub state: TimerState,
    pub elapsed: Duration,
}

impl TimerStatus {
    fn of(timer: &Timer, clock: &dyn Clock) -> Self {
        Self {
            label: timer.label().to_string(),
            state: timer.state(),
            elapsed: timer.elapsed(clock),
        }
    }

    pub fn fields(&self) -> ElapsedFields {
        ElapsedFields::from_duration(self.elapsed)
    }
}

pub struct TimerRegistry {
    clock: Arc<dyn Clock>,
    broadcaster: UpdateBroadcaster,
    timers: Mutex<HashMap<String, Timer>>,
}

impl TimerRegistry {
    /// Registry on the system clock
    pub fn new(settings: &TimerSettings) -> Self {
        Self::with_clock(Arc::new(SystemClock), settings.poll_interval())
    }

    pub fn with_clock(clock: Arc<dyn Clock>, poll_interval: Duration) -> Self {
        let broadcaster = UpdateBroadcaster::new(Arc::clone(&clock), poll_interval);
        Self {
            clock,
            broadcaster,
            timers: Mutex::new(HashMap::new()),
        }
    }

    pub fn poll_interval(&self) -> Duration {
        self.broadcaster.interval()
    }

    /// Register a display sink for every timer's updates
    pub fn subscribe(&self, sink: Arc<dyn Sink>) {
        self.broadcaster.subscribe(sink);
    }

    // ─── Lookup ─────────────────────────────────────────────────────────────

    pub async fn get(&self, label: &str) -> Result<TimerStatus, TimerError> {
        let timers = self.timers.lock().await;
        timers
            .get(label)
            .map(|t| TimerStatus::of(t, self.clock.as_ref()))
            .ok_or_else(|| not_found(label))
    }

    /// All timers, sorted by label
    pub async fn list(&self) -> Vec<TimerStatus> {
        let timers = self.timers.lock().await;
        let mut statuses: Vec<_> = timers
            .values()
            .map(|t| TimerStatus::of(t, self.clock.as_ref()))
            .collect();
        statuses.sort_by(|a, b| a.label.cmp(&b.label));
        statuses
    }

    pub async fn len(&self) -> usize {
        self.timers.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn running_count(&self) -> usize {
        let timers = self.timers.lock().await;
        timers.values().filter(|t| t.is_running()).count()
    }

    // ─── Membership ─────────────────────────────────────────────────────────

    /// Add a stopped timer with zero elapsed
    pub async fn create(&self, label: &str) -> Result<TimerStatus, TimerError> {
        validate_label(label)?;
        let mut timers = self.timers.lock().await;
        if timers.contains_key(label) {
            return Err(TimerError::DuplicateLabel {
                label: label.to_string(),
            });
        }

        let timer = Timer::new(label);
        let status = TimerStatus::of(&timer, self.clock.as_ref());
        timers.insert(label.to_string(), timer);
        tracing::debug!(label, "Timer created");
        Ok(status)
    }

    /// Remove a timer, stopping it first if it runs. Returns its final elapsed.
    pub async fn remove(&self, label: &str) -> Result<Duration, TimerError> {
        let mut timers = self.timers.lock().await;
        let mut timer = timers.remove(label).ok_or_else(|| not_found(label))?;

        let elapsed = match timer.pause(self.clock.as_ref()) {
            Ok((elapsed, task)) => {
                join_update_loop(label, task).await;
                elapsed
            }
            Err(_) => timer.accumulated(),
        };

        tracing::debug!(label, elapsed_ms = elapsed.as_millis() as u64, "Timer removed");
        Ok(elapsed)
    }

    // ─── Transitions ────────────────────────────────────────────────────────

    /// Create and run a brand-new timer.
    ///
    /// A running label fails with `AlreadyRunning`; a stopped one with
    /// `UseRestart`, since `start` never resumes or resets an existing timer.
    pub async fn start(&self, label: &str) -> Result<(), TimerError> {
        validate_label(label)?;
        let mut timers = self.timers.lock().await;
        if let Some(existing) = timers.get(label) {
            return Err(match existing.state() {
                TimerState::Running => TimerError::AlreadyRunning {
                    label: label.to_string(),
                },
                TimerState::Stopped => TimerError::UseRestart {
                    label: label.to_string(),
                },
            });
        }

        let mut timer = Timer::new(label);
        timer.resume(self.clock.as_ref(), &self.broadcaster)?;
        timers.insert(label.to_string(), timer);
        tracing::debug!(label, "Timer started");
        Ok(())
    }

    /// Stop a running timer and return its total elapsed.
    ///
    /// Once this returns, no further update for the stopped interval reaches
    /// any sink.
    pub async fn stop(&self, label: &str) -> Result<Duration, TimerError> {
        let mut timers = self.timers.lock().await;
        let timer = timers.get_mut(label).ok_or_else(|| TimerError::NotRunning {
            label: label.to_string(),
        })?;

        let (elapsed, task) = timer.pause(self.clock.as_ref())?;
        join_update_loop(label, task).await;

        tracing::debug!(label, elapsed_ms = elapsed.as_millis() as u64, "Timer stopped");
        Ok(elapsed)
    }

    /// Resume a stopped timer, continuing from its accumulated elapsed
    pub async fn restart(&self, label: &str) -> Result<(), TimerError> {
        let mut timers = self.timers.lock().await;
        let timer = timers.get_mut(label).ok_or_else(|| TimerError::NotStopped {
            label: label.to_string(),
        })?;

        timer.resume(self.clock.as_ref(), &self.broadcaster)?;
        tracing::debug!(
            label,
            accumulated_ms = timer.accumulated().as_millis() as u64,
            "Timer restarted"
        );
        Ok(())
    }

    /// Stop every running timer. Returns how many were running.
    pub async fn shutdown(&self) -> usize {
        let mut timers = self.timers.lock().await;
        let mut loops: Vec<(String, JoinHandle<()>)> = Vec::new();

        for (label, timer) in timers.iter_mut() {
            if let Ok((_, task)) = timer.pause(self.clock.as_ref()) {
                loops.push((label.clone(), task));
            }
        }

        let stopped = loops.len();
        for (label, task) in loops {
            join_update_loop(&label, task).await;
        }

        tracing::info!(stopped, total = timers.len(), "Timer registry shut down");
        stopped
    }
}

fn validate_label(label: &str) -> Result<(), TimerError> {
    if label.trim().is_empty() {
        Err(TimerError::EmptyLabel)
    } else {
        Ok(())
    }
}

fn not_found(label: &str) -> TimerError {
    TimerError::NotFound {
        label: label.to_string(),
    }
}

/// Wait for a cancelled update loop to finish its last tick.
async fn join_update_loop(label: &str, task: JoinHandle<()>) {
    if let Err(err) = task.await {
        if err.is_panic() {
            tracing::warn!(label, "Update loop panicked");
        } else {
            tracing::warn!(label, error = %err, "Update loop ended abnormally");
        }
    }
}
