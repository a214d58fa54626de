use std::time::Duration;

use crossbeam::channel::Receiver;

use crate::actor::build::BuildActor;
use crate::actor::fs::FsActor;

/// How often the shutdown channel is polled.
const SHUTDOWN_POLL: Duration = Duration::from_millis(100);

/// Upper bound on waiting for an in-flight rebuild at shutdown.
const DRAIN_TIMEOUT: Duration = Duration::from_millis(500);

/// Run both actors until shutdown, or until either one exits.
pub(super) async fn run_actors(
    fs: FsActor,
    build: BuildActor,
    shutdown_rx: Option<Receiver<()>>,
) {
    let mut fs_handle = tokio::spawn(async move { fs.run().await });
    let mut build_handle = tokio::spawn(async move { build.run().await });

    tokio::select! {
        _ = wait_for_shutdown(shutdown_rx) => {
            crate::debug!("actor"; "shutdown signal received");
        }
        _ = &mut fs_handle => crate::debug!("actor"; "watcher exited"),
        _ = &mut build_handle => crate::debug!("actor"; "rebuild loop exited"),
    }

    // Dropping the watcher closes the signal channel, which ends the
    // rebuild loop once any in-flight build is done.
    fs_handle.abort();
    let _ = tokio::time::timeout(DRAIN_TIMEOUT, build_handle).await;
}

/// Resolve once the crossbeam shutdown channel fires. Never resolves without one.
async fn wait_for_shutdown(shutdown_rx: Option<Receiver<()>>) {
    let Some(rx) = shutdown_rx else {
        return std::future::pending().await;
    };
    // Poll-based since crossbeam has no async receive
    while rx.try_recv().is_err() {
        tokio::time::sleep(SHUTDOWN_POLL).await;
    }
}
