//! FileSystem Actor
//!
//! Watches the profile, theme and asset roots and fires a coalesced
//! [`RebuildSignal`] once changes settle.
//!
//! Architecture:
//! ```text
//! notify (sync) → bridge thread → Debouncer (trailing edge) → RebuildSignal
//! ```

use std::path::{Path, PathBuf};

use notify::RecommendedWatcher;
use tokio::sync::mpsc;

use crate::reload::RebuildSignal;

// Pure timing and deduplication.
mod debouncer;
// Watch root attach/re-attach lifecycle.
mod watch_roots;

#[cfg(test)]
mod tests;

use debouncer::Debouncer;
use watch_roots::WatchRoots;

/// Buffered notify events between the bridge thread and the actor.
const EVENT_BUFFER: usize = 64;

/// FileSystem Actor - watches for source changes
pub struct FsActor {
    /// Channel to receive notify events (sync -> async bridge)
    notify_rx: std::sync::mpsc::Receiver<notify::Result<notify::Event>>,
    /// Watcher handle (must be kept alive)
    watcher: RecommendedWatcher,
    watch_roots: WatchRoots,
    signal: RebuildSignal,
    debouncer: Debouncer,
}

impl FsActor {
    /// Start watching `paths` immediately.
    ///
    /// Missing roots are reported as warnings and re-attached once they
    /// appear. Changes under `output` are ignored so writes from a rebuild
    /// never trigger another one.
    pub fn new(paths: Vec<PathBuf>, output: &Path, signal: RebuildSignal) -> notify::Result<Self> {
        // notify has no async API
        let (notify_tx, notify_rx) = std::sync::mpsc::channel();

        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = notify_tx.send(res);
        })?;

        let mut watch_roots = WatchRoots::new(paths);
        for warning in watch_roots.attach_existing(&mut watcher) {
            crate::log!("warning"; "{:#}", anyhow::Error::from(warning));
        }
        crate::debug!("watch"; "{} root(s) attached", watch_roots.attached_count());

        Ok(Self {
            notify_rx,
            watcher,
            watch_roots,
            signal,
            debouncer: Debouncer::new().ignoring(output),
        })
    }

    /// Run the actor event loop until the rebuild loop goes away.
    pub async fn run(self) {
        let notify_rx = self.notify_rx;
        let signal = self.signal;
        let mut debouncer = self.debouncer;
        let mut watcher = self.watcher;
        let mut watch_roots = self.watch_roots;

        let (async_tx, mut async_rx) = mpsc::channel::<notify::Event>(EVENT_BUFFER);

        std::thread::spawn(move || {
            while let Ok(result) = notify_rx.recv() {
                match result {
                    Ok(event) => {
                        if async_tx.blocking_send(event).is_err() {
                            break; // Receiver dropped
                        }
                    }
                    Err(e) => crate::log!("watch"; "notify error: {}", e),
                }
            }
        });

        debounce_loop(&mut async_rx, &mut debouncer, &signal, || {
            watch_roots.maintain(&mut watcher);
        })
        .await;

        crate::debug!("watch"; "stopped");
    }
}

/// Feed events into the debouncer and fire `signal` whenever a window closes.
///
/// `tick` runs on every timer wake-up, before readiness is checked.
/// Returns when the event source or the signal's receiver is gone.
async fn debounce_loop(
    events: &mut mpsc::Receiver<notify::Event>,
    debouncer: &mut Debouncer,
    signal: &RebuildSignal,
    mut tick: impl FnMut(),
) {
    loop {
        tokio::select! {
            biased;
            event = events.recv() => {
                let Some(event) = event else { break };
                debouncer.add_event(&event);
            }
            _ = tokio::time::sleep(debouncer.sleep_duration()) => {
                tick();
                let Some(paths) = debouncer.take_if_ready() else {
                    continue;
                };
                if signal.is_closed() {
                    break;
                }
                crate::debug!("watch"; "{}", describe_changes(&paths));
                if !signal.fire() {
                    crate::debug!("watch"; "rebuild already pending");
                }
            }
        }
    }
}

/// One-line summary such as `changed: profile.toml (+2 more)`.
fn describe_changes(paths: &[PathBuf]) -> String {
    let first = paths
        .first()
        .and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    match paths.len() {
        0 | 1 => format!("changed: {first}"),
        n => format!("changed: {first} (+{} more)", n - 1),
    }
}
