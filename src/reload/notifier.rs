//! Fan-out of reload events to every connected preview session.

use tokio::sync::broadcast;

use super::HotReloadMessage;

/// Buffered messages per session before it is considered lagged.
const BROADCAST_CAPACITY: usize = 16;

/// Broadcast handle shared by the rebuild loop and the HTTP server.
///
/// Each preview session holds its own receiver; there is no shared list of
/// sockets. Dropping every `Notifier` closes all sessions.
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: broadcast::Sender<HotReloadMessage>,
}

impl Notifier {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self { tx }
    }

    /// Register a new session.
    pub fn subscribe(&self) -> broadcast::Receiver<HotReloadMessage> {
        self.tx.subscribe()
    }

    /// Ask every session to reload. Returns how many were notified.
    pub fn reload(&self, reason: &str) -> usize {
        // Err only means nobody is listening.
        self.tx
            .send(HotReloadMessage::reload(reason))
            .unwrap_or_default()
    }

    pub fn session_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reload_without_sessions() {
        let notifier = Notifier::new();
        assert_eq!(notifier.reload("rebuilt"), 0);
    }

    #[test]
    fn test_every_session_receives_one_reload() {
        let notifier = Notifier::new();
        let mut a = notifier.subscribe();
        let mut b = notifier.subscribe();
        assert_eq!(notifier.session_count(), 2);

        assert_eq!(notifier.reload("rebuilt"), 2);

        let expected = HotReloadMessage::reload("rebuilt");
        assert_eq!(a.try_recv().unwrap(), expected);
        assert_eq!(b.try_recv().unwrap(), expected);
        assert!(a.try_recv().is_err());
    }

    #[test]
    fn test_dropped_session_is_not_counted() {
        let notifier = Notifier::new();
        let a = notifier.subscribe();
        drop(a);
        assert_eq!(notifier.session_count(), 0);
        assert_eq!(notifier.reload("rebuilt"), 0);
    }
}
