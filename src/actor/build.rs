//! Build Actor - rebuild loop for watch mode.
//!
//! Consumes coalesced rebuild signals one at a time, re-runs the whole
//! pipeline on the blocking pool and tells every preview session to reload.
//!
//! ```text
//!            signal                 ok
//!   Idle ─────────────► Building ───────► Idle
//!    ▲                     │ err
//!    │      signal         ▼
//!    └────────────── ServingStale
//! ```
//!
//! A failed rebuild never stops the loop: the previous output stays on disk
//! and keeps being served until a later rebuild succeeds.

use std::sync::Arc;
use std::time::Instant;

use crate::cli::build::build_site;
use crate::config::AppConfig;
use crate::icons::IconTable;
use crate::logger::{status_error, status_success};
use crate::reload::{Notifier, RebuildReceiver};

/// Where the rebuild loop currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebuildState {
    Idle,
    Building,
    /// Last rebuild failed; the previous output is still served.
    ServingStale,
}

/// Build Actor - one rebuild at a time
pub struct BuildActor {
    rx: RebuildReceiver,
    config: Arc<AppConfig>,
    icons: Arc<IconTable>,
    notifier: Notifier,
    state: RebuildState,
}

impl BuildActor {
    /// Starts `Idle`: the initial build already succeeded.
    pub fn new(
        rx: RebuildReceiver,
        config: Arc<AppConfig>,
        icons: Arc<IconTable>,
        notifier: Notifier,
    ) -> Self {
        Self {
            rx,
            config,
            icons,
            notifier,
            state: RebuildState::Idle,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> RebuildState {
        self.state
    }

    /// Run until every signal producer is gone.
    pub async fn run(mut self) {
        while self.rx.recv().await.is_some() {
            self.rebuild().await;
        }
        crate::debug!("build"; "rebuild loop stopped");
    }

    /// One full attempt, then a reload broadcast regardless of outcome.
    pub(crate) async fn rebuild(&mut self) {
        self.state = RebuildState::Building;
        crate::debug!("build"; "rebuilding");

        let config = Arc::clone(&self.config);
        let icons = Arc::clone(&self.icons);
        let started = Instant::now();
        let result = tokio::task::spawn_blocking(move || build_site(&config, &icons)).await;

        let reason = match result {
            Ok(Ok(tree)) => {
                self.state = RebuildState::Idle;
                let page = tree
                    .page
                    .strip_prefix(&self.config.paths.root)
                    .unwrap_or(&tree.page);
                status_success(&format!(
                    "rebuilt {} in {}ms",
                    page.display(),
                    started.elapsed().as_millis()
                ));
                "rebuilt"
            }
            Ok(Err(e)) => {
                self.state = RebuildState::ServingStale;
                let stage = e.stage();
                status_error(
                    &format!("{stage} failed, serving previous build"),
                    &format!("{:#}", anyhow::Error::from(e)),
                );
                "rebuild failed"
            }
            Err(e) => {
                self.state = RebuildState::ServingStale;
                status_error("build task aborted, serving previous build", &e.to_string());
                "rebuild failed"
            }
        };

        let sessions = self.notifier.reload(reason);
        crate::debug!("reload"; "notified {} session(s)", sessions);
    }
}
