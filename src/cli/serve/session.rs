//! Preview sessions: one WebSocket per browser tab.
//!
//! Each session owns a broadcast receiver and a dedicated thread; nothing
//! else tracks it. The loop alternates between draining the broadcast and a
//! short timed read of the socket, so a session ends as soon as the tab sends
//! Close or drops the connection, when a send fails, or when the broadcast
//! closes (server shutting down).

use std::io::{self, Read, Write};
use std::net::TcpStream;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::sync::broadcast::{self, error::TryRecvError};
use tungstenite::WebSocket;
use tungstenite::protocol::Message;

use crate::reload::HotReloadMessage;

/// Upper bound on how long a session waits on its socket per loop turn.
/// Also bounds reload latency.
pub const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Complete the WebSocket handshake on `stream` and prepare it for polling.
///
/// The handshake runs blocking; the read timeout is set afterwards.
pub fn handshake(
    stream: TcpStream,
    rx: broadcast::Receiver<HotReloadMessage>,
) -> Result<PreviewSession<TcpStream>> {
    let ws = tungstenite::accept(stream).map_err(|e| anyhow::anyhow!("handshake failed: {e}"))?;
    ws.get_ref()
        .set_read_timeout(Some(POLL_INTERVAL))
        .context("failed to set session read timeout")?;
    Ok(PreviewSession::new(ws, rx))
}

/// One connected browser tab awaiting reload events.
///
/// The underlying stream must time out or be non-blocking on reads.
pub struct PreviewSession<S: Read + Write> {
    ws: WebSocket<S>,
    rx: broadcast::Receiver<HotReloadMessage>,
}

impl<S: Read + Write> PreviewSession<S> {
    pub fn new(ws: WebSocket<S>, rx: broadcast::Receiver<HotReloadMessage>) -> Self {
        Self { ws, rx }
    }

    /// Push `connected`, then every broadcast message, until either side goes away.
    pub fn run(mut self) {
        if self.send(&HotReloadMessage::connected()).is_err() {
            return;
        }

        loop {
            let pending = match self.rx.try_recv() {
                Ok(message) => Some(message),
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Lagged(skipped)) => {
                    crate::debug!("reload"; "session lagged by {}", skipped);
                    Some(HotReloadMessage::reload("lagged"))
                }
                Err(TryRecvError::Closed) => {
                    let _ = self.ws.close(None);
                    let _ = self.ws.flush();
                    break;
                }
            };

            if let Some(message) = pending
                && self.send(&message).is_err()
            {
                crate::debug!("reload"; "session disconnected");
                break;
            }

            if !self.client_alive() {
                crate::debug!("reload"; "session closed by client");
                break;
            }
        }
    }

    /// Wait up to one poll interval for a client frame.
    ///
    /// Returns `false` once the client sent Close or the connection failed.
    fn client_alive(&mut self) -> bool {
        match self.ws.read() {
            Ok(Message::Close(_)) => {
                // Queued close reply goes out on flush.
                let _ = self.ws.flush();
                false
            }
            Ok(_) => true,
            Err(tungstenite::Error::Io(e))
                if matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut) =>
            {
                true
            }
            Err(_) => false,
        }
    }

    fn send(&mut self, message: &HotReloadMessage) -> tungstenite::Result<()> {
        self.ws.send(Message::Text(message.to_json().into()))
    }
}
