//! Live reload push listener.
//!
//! A plain TCP listener next to the HTTP server. Every accepted connection is
//! subscribed to the [`Notifier`] and handed to its own [`PreviewSession`]
//! thread, which completes the WebSocket handshake.
//!
//! [`PreviewSession`]: super::session::PreviewSession

use std::io;
use std::net::{IpAddr, SocketAddr, TcpListener};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::{Context, Result, anyhow};

use super::session;
use crate::reload::Notifier;

/// Maximum number of port binding attempts.
const MAX_PORT_RETRIES: u16 = 10;

/// How often the non-blocking acceptor checks for connections and shutdown.
const ACCEPT_POLL: Duration = Duration::from_millis(100);

/// Bind the push listener, trying the next ports if `base_port` is busy.
pub fn bind_listener(interface: IpAddr, base_port: u16) -> Result<(TcpListener, SocketAddr)> {
    let mut last_error = None;

    for offset in 0..MAX_PORT_RETRIES {
        let Some(port) = base_port.checked_add(offset) else {
            break;
        };
        match TcpListener::bind(SocketAddr::new(interface, port)) {
            Ok(listener) => {
                let addr = listener.local_addr()?;
                if offset > 0 {
                    let port = addr.port();
                    crate::log!("serve"; "push port {} in use, using {} instead", base_port, port);
                }
                return Ok((listener, addr));
            }
            Err(e) => last_error = Some(e),
        }
    }

    Err(anyhow!(
        "Failed to bind live reload listener after {} attempts starting at port {}: {}",
        MAX_PORT_RETRIES,
        base_port,
        last_error.map(|e| e.to_string()).unwrap_or_default()
    ))
}

/// Accept push connections until shutdown is requested.
pub fn spawn_acceptor(listener: TcpListener, notifier: Notifier) -> Result<JoinHandle<()>> {
    listener
        .set_nonblocking(true)
        .context("failed to configure live reload listener")?;

    thread::Builder::new()
        .name("push-acceptor".into())
        .spawn(move || accept_loop(&listener, &notifier))
        .context("failed to spawn live reload acceptor")
}

fn accept_loop(listener: &TcpListener, notifier: &Notifier) {
    while !crate::core::is_shutdown() {
        match listener.accept() {
            Ok((stream, addr)) => {
                // Accepted sockets may inherit non-blocking mode.
                let _ = stream.set_nonblocking(false);

                // Subscribe before the handshake so no reload is missed.
                let rx = notifier.subscribe();
                let spawned = thread::Builder::new()
                    .name("preview-session".into())
                    .spawn(move || match session::handshake(stream, rx) {
                        Ok(session) => session.run(),
                        Err(e) => crate::debug!("reload"; "{}: {:#}", addr, e),
                    });
                if let Err(e) = spawned {
                    crate::log!("reload"; "failed to spawn preview session: {}", e);
                    continue;
                }
                let total = notifier.session_count();
                crate::debug!("reload"; "session connected from {} ({} total)", addr, total);
            }
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => thread::sleep(ACCEPT_POLL),
            Err(e) => {
                crate::log!("reload"; "accept error: {}", e);
                thread::sleep(ACCEPT_POLL);
            }
        }
    }
}
