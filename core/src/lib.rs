pub mod clock;
pub mod context;
pub mod timers;
pub mod updates;

// Re-exports for convenience
pub use clock::{Clock, ManualClock, SystemClock};
pub use context::{AppConfig, ConfigError};
pub use tempo_types::{DisplaySettings, TimerSettings};
pub use timers::{Timer, TimerError, TimerRegistry, TimerState, TimerStatus};
pub use updates::{
    ChannelSink, ElapsedBase, ElapsedFields, ElapsedUpdate, Sink, SinkError, SinkSet,
    UpdateBroadcaster,
};
