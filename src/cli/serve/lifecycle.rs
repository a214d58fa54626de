//! Server lifecycle management.

use crate::{
    actor::Coordinator, config::AppConfig, core::register_server, icons::IconTable, log,
    reload::Notifier,
};
use anyhow::{Result, anyhow};
use crossbeam::channel::{Receiver, Sender};
use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
    thread::{self, JoinHandle},
    time::Duration,
};
use tiny_http::Server;

/// Maximum number of port binding attempts.
const MAX_PORT_RETRIES: u16 = 10;

/// Bind to the specified interface and port, with automatic port retry.
pub fn bind_with_retry(interface: IpAddr, base_port: u16) -> Result<(Server, SocketAddr)> {
    let mut last_error = None;

    for offset in 0..MAX_PORT_RETRIES {
        let Some(port) = base_port.checked_add(offset) else {
            break;
        };
        let addr = SocketAddr::new(interface, port);

        match Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    log!("serve"; "port {} in use, using {} instead", base_port, port);
                }
                let addr = server.server_addr().to_ip().unwrap_or(addr);
                return Ok((server, addr));
            }
            Err(e) => last_error = Some(e),
        }
    }

    Err(anyhow!(
        "Failed to bind after {} attempts starting at port {}: {}",
        MAX_PORT_RETRIES,
        base_port,
        last_error.map(|e| e.to_string()).unwrap_or_default()
    ))
}

/// Register server for graceful shutdown.
///
/// When Ctrl+C is pressed, the handler installed in `main` unblocks the
/// server and notifies the actors.
pub fn register_server_for_shutdown(server: Arc<Server>, shutdown_tx: Sender<()>) {
    register_server(server, shutdown_tx);
}

/// Everything the watch actors need, moved onto their thread.
pub struct ActorContext {
    pub config: Arc<AppConfig>,
    pub icons: Arc<IconTable>,
    pub notifier: Notifier,
}

/// Spawn the watcher and rebuild loop on a dedicated runtime thread.
pub fn spawn_actors(context: ActorContext, shutdown_rx: Receiver<()>) -> JoinHandle<()> {
    thread::spawn(move || run_actor_system(context, shutdown_rx))
}

fn run_actor_system(context: ActorContext, shutdown_rx: Receiver<()>) {
    let rt = match tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            log!("error"; "failed to start watch runtime: {}", e);
            return;
        }
    };

    rt.block_on(async {
        let coordinator = Coordinator::new(context.config, context.icons, context.notifier)
            .with_shutdown_signal(shutdown_rx);

        if let Err(e) = coordinator.run().await {
            log!("error"; "{:#}", e);
        }
    });
}

/// Wait for actor system to shutdown gracefully (max 2 seconds).
pub fn wait_for_shutdown(handle: JoinHandle<()>) {
    for _ in 0..40 {
        if handle.is_finished() {
            let _ = handle.join();
            return;
        }
        thread::sleep(Duration::from_millis(50));
    }
}
