use std::sync::Arc;

use tempo_core::{AppConfig, ChannelSink, TimerRegistry};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::render;

#[derive(Default)]
pub struct BackgroundTasks {
    pub renderer: Option<JoinHandle<()>>,
}

impl BackgroundTasks {
    pub fn abort_all(&mut self) {
        if let Some(handle) = self.renderer.take() {
            handle.abort();
        }
    }
}

/// Holds all shared state for the CLI application.
/// This is a lightweight container - timer logic lives in the registry.
#[derive(Clone)]
pub struct CliContext {
    pub config: Arc<AppConfig>,
    pub registry: Arc<TimerRegistry>,
    pub tasks: Arc<Mutex<BackgroundTasks>>,
}

impl CliContext {
    pub fn new(config: AppConfig) -> Self {
        let registry = TimerRegistry::new(&config.timers);
        Self {
            config: Arc::new(config),
            registry: Arc::new(registry),
            tasks: Arc::new(Mutex::new(BackgroundTasks::default())),
        }
    }

    /// Subscribe the terminal renderer and run it on its own task.
    pub async fn spawn_renderer(&self) {
        let (sink, rx) = ChannelSink::channel();
        self.registry.subscribe(Arc::new(sink));

        let live = self.config.display.live_updates;
        let handle = tokio::spawn(render::run(rx, live));

        let mut tasks = self.tasks.lock().await;
        if let Some(previous) = tasks.renderer.replace(handle) {
            previous.abort();
        }
    }

    /// Stop all timers and background work.
    pub async fn shutdown(&self) -> usize {
        let stopped = self.registry.shutdown().await;
        self.tasks.lock().await.abort_all();
        stopped
    }
}
