//! Elapsed-time updates
//!
//! This module provides:
//! - **Elapsed values**: [`ElapsedUpdate`] and its `HH:MM:SS` breakdown
//! - **Sinks**: the boundary through which updates leave the engine
//! - **Broadcaster**: the per-timer polling loops that feed the sinks
//!
//! Sinks may be invoked from any runtime worker thread. Moving an update onto
//! a UI thread is the sink's business; [`ChannelSink`] is the usual way.

mod broadcaster;
mod elapsed;
mod sink;

pub use broadcaster::{ElapsedBase, UpdateBroadcaster};
pub use elapsed::{ElapsedFields, ElapsedUpdate};
pub use sink::{ChannelSink, Sink, SinkError, SinkSet};
