//! Display sinks

use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, RwLock};

use thiserror::Error;
use tokio::sync::mpsc;

use super::ElapsedUpdate;

/// Errors a sink may report back to the update loop.
///
/// The loop logs them and carries on; they never stop a timer.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("sink is closed")]
    Closed,

    #[error("failed to write update")]
    Io(#[from] std::io::Error),

    #[error("update rejected: {0}")]
    Rejected(String),
}

/// Receiver of elapsed-time updates.
pub trait Sink: Send + Sync {
    fn publish(&self, update: &ElapsedUpdate) -> Result<(), SinkError>;
}

impl<F> Sink for F
where
    F: Fn(&ElapsedUpdate) -> Result<(), SinkError> + Send + Sync,
{
    fn publish(&self, update: &ElapsedUpdate) -> Result<(), SinkError> {
        self(update)
    }
}

/// Forwards updates over an unbounded channel.
///
/// Lets a renderer consume updates on its own task instead of inside the
/// update loop.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<ElapsedUpdate>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::UnboundedSender<ElapsedUpdate>) -> Self {
        Self { tx }
    }

    /// Create a sink together with the receiving end.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ElapsedUpdate>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Sink for ChannelSink {
    fn publish(&self, update: &ElapsedUpdate) -> Result<(), SinkError> {
        self.tx.send(update.clone()).map_err(|_| SinkError::Closed)
    }
}

/// The set of subscribed sinks, shared by every update loop.
#[derive(Default)]
pub struct SinkSet {
    sinks: RwLock<Vec<Arc<dyn Sink>>>,
}

impl SinkSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, sink: Arc<dyn Sink>) {
        let mut sinks = self.sinks.write().unwrap_or_else(|e| e.into_inner());
        sinks.push(sink);
    }

    /// Deliver `update` to every sink. Returns the number of sinks that failed.
    pub fn publish(&self, update: &ElapsedUpdate) -> usize {
        // Snapshot so a sink can subscribe another sink without deadlocking.
        let sinks: Vec<Arc<dyn Sink>> = match self.sinks.read() {
            Ok(s) => s.clone(),
            Err(e) => e.into_inner().clone(),
        };

        let mut failed = 0;
        for sink in &sinks {
            // A panicking sink counts as a failed delivery; the loop must survive it.
            match panic::catch_unwind(AssertUnwindSafe(|| sink.publish(update))) {
                Ok(Ok(())) => {}
                Ok(Err(err)) => {
                    failed += 1;
                    tracing::warn!(
                        label = %update.label,
                        error = %err,
                        "Sink failed to accept elapsed update"
                    );
                }
                Err(_) => {
                    failed += 1;
                    tracing::warn!(label = %update.label, "Sink panicked on elapsed update");
                }
            }
        }
        failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::Duration;

    fn update(label: &str, secs: u64) -> ElapsedUpdate {
        ElapsedUpdate::new(Arc::from(label), Duration::from_secs(secs))
    }

    #[test]
    fn closure_sinks_receive_updates() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = Arc::clone(&seen);
        let set = SinkSet::new();
        set.subscribe(Arc::new(move |u: &ElapsedUpdate| -> Result<(), SinkError> {
            seen_clone.lock().unwrap().push(u.formatted());
            Ok(())
        }));

        assert_eq!(set.publish(&update("a", 75)), 0);
        assert_eq!(*seen.lock().unwrap(), vec!["00:01:15".to_string()]);
    }

    #[test]
    fn failing_sink_does_not_block_others() {
        let seen = Arc::new(Mutex::new(0usize));
        let seen_clone = Arc::clone(&seen);
        let set = SinkSet::new();
        set.subscribe(Arc::new(|_: &ElapsedUpdate| -> Result<(), SinkError> {
            Err(SinkError::Rejected("display gone".to_string()))
        }));
        set.subscribe(Arc::new(move |_: &ElapsedUpdate| -> Result<(), SinkError> {
            *seen_clone.lock().unwrap() += 1;
            Ok(())
        }));

        assert_eq!(set.publish(&update("a", 1)), 1);
        assert_eq!(set.publish(&update("a", 2)), 1);
        assert_eq!(*seen.lock().unwrap(), 2);
    }

    #[test]
    fn panicking_sink_counts_as_failure() {
        let (channel, mut rx) = ChannelSink::channel();
        let set = SinkSet::new();
        set.subscribe(Arc::new(|_: &ElapsedUpdate| -> Result<(), SinkError> {
            panic!("display crashed")
        }));
        set.subscribe(Arc::new(channel));

        assert_eq!(set.publish(&update("a", 1)), 1);
        assert_eq!(set.publish(&update("a", 2)), 1);
        assert_eq!(rx.try_recv().unwrap().elapsed, Duration::from_secs(1));
        assert_eq!(rx.try_recv().unwrap().elapsed, Duration::from_secs(2));
    }

    #[test]
    fn channel_sink_reports_closed_receiver() {
        let (sink, rx) = ChannelSink::channel();
        assert!(sink.publish(&update("a", 1)).is_ok());
        drop(rx);
        assert!(matches!(sink.publish(&update("a", 2)), Err(SinkError::Closed)));
    }
}
