//! Actor Coordinator - wires up the watch-mode actors.
//!
//! The Coordinator is a thin orchestrator that:
//! - Creates the rebuild signal channel
//! - Wires the watcher to the rebuild loop
//! - Runs both until shutdown

mod runtime;
mod watch_paths;

use std::sync::Arc;

use anyhow::Result;
use crossbeam::channel::Receiver;

use super::build::BuildActor;
use super::fs::FsActor;
use crate::config::AppConfig;
use crate::icons::IconTable;
use crate::reload::{Notifier, rebuild_channel};

/// Coordinator - wires up and runs the actor system.
pub struct Coordinator {
    config: Arc<AppConfig>,
    icons: Arc<IconTable>,
    notifier: Notifier,
    shutdown_rx: Option<Receiver<()>>,
}

impl Coordinator {
    pub fn new(config: Arc<AppConfig>, icons: Arc<IconTable>, notifier: Notifier) -> Self {
        Self {
            config,
            icons,
            notifier,
            shutdown_rx: None,
        }
    }

    /// Set shutdown signal receiver.
    pub fn with_shutdown_signal(mut self, rx: Receiver<()>) -> Self {
        self.shutdown_rx = Some(rx);
        self
    }

    /// Run the actor system.
    pub async fn run(mut self) -> Result<()> {
        let (signal, signal_rx) = rebuild_channel();

        let watch_paths = watch_paths::collect_watch_paths(&self.config);
        let fs_actor = FsActor::new(watch_paths, &self.config.paths.output, signal)
            .map_err(|e| anyhow::anyhow!("watcher failed: {}", e))?;

        let build_actor = BuildActor::new(
            signal_rx,
            Arc::clone(&self.config),
            Arc::clone(&self.icons),
            self.notifier.clone(),
        );

        crate::debug!("actor"; "start");
        let shutdown_rx = self.shutdown_rx.take();
        runtime::run_actors(fs_actor, build_actor, shutdown_rx).await;

        crate::debug!("actor"; "stopped");
        Ok(())
    }
}
