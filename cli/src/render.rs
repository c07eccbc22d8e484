//! Terminal rendering of live updates
//!
//! Updates arrive over a channel from the update loops and are drawn here,
//! on a single task, as `Timer '<label>': HH:MM:SS` on the current line.

use std::io::{self, Write};

use tempo_core::ElapsedUpdate;
use tokio::sync::mpsc::UnboundedReceiver;

/// The live line for one update (no carriage return)
pub fn live_line(update: &ElapsedUpdate) -> String {
    format!("Timer '{}': {}", update.label, update.formatted())
}

/// Drain updates until every sender is gone.
pub async fn run(mut rx: UnboundedReceiver<ElapsedUpdate>, live: bool) {
    while let Some(update) = rx.recv().await {
        if !live {
            continue;
        }

        let mut stdout = io::stdout().lock();
        let written = write!(stdout, "\r{}", live_line(&update)).and_then(|_| stdout.flush());
        if let Err(err) = written {
            tracing::debug!(error = %err, "Failed to draw live update");
        }
    }
    tracing::debug!("Renderer stopped");
}
