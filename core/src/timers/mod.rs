//! Timer system
//!
//! This module provides:
//! - **Timer**: one named stopwatch and its running/stopped state machine
//! - **Registry**: label → timer map and the command surface used by front ends
//!
//! # Transitions
//!
//! | Operation | From      | To        | Otherwise                          |
//! |-----------|-----------|-----------|------------------------------------|
//! | `start`   | (absent)  | Running   | `AlreadyRunning` / `UseRestart`    |
//! | `stop`    | Running   | Stopped   | `NotRunning`                       |
//! | `restart` | Stopped   | Running   | `NotStopped`                       |

mod error;
mod registry;
mod timer;


pub use error::TimerError;
pub use registry::{TimerRegistry, TimerStatus};
pub use timer::{Timer, TimerState};
