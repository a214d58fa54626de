//! Coalescing rebuild trigger.
//!
//! A single-slot channel: firing while a signal is already pending is a
//! no-op, so bursts of changes collapse into one rebuild and the producer
//! never blocks.

use tokio::sync::mpsc;

/// Producer side, held by the watcher.
#[derive(Debug, Clone)]
pub struct RebuildSignal {
    tx: mpsc::Sender<()>,
}

/// Consumer side, held by the rebuild loop.
pub type RebuildReceiver = mpsc::Receiver<()>;

/// Create a connected signal pair.
pub fn rebuild_channel() -> (RebuildSignal, RebuildReceiver) {
    let (tx, rx) = mpsc::channel(1);
    (RebuildSignal { tx }, rx)
}

impl RebuildSignal {
    /// Request a rebuild.
    ///
    /// Returns `false` when the signal was dropped, either because one is
    /// already pending or because the receiver is gone.
    pub fn fire(&self) -> bool {
        self.tx.try_send(()).is_ok()
    }

    /// Whether the rebuild loop has stopped.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excess_fires_coalesce() {
        let (signal, mut rx) = rebuild_channel();

        assert!(signal.fire());
        assert!(!signal.fire());
        assert!(!signal.fire());

        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_slot_frees_after_consume() {
        let (signal, mut rx) = rebuild_channel();

        assert!(signal.fire());
        rx.try_recv().unwrap();
        assert!(signal.fire());
    }

    #[test]
    fn test_closed_receiver() {
        let (signal, rx) = rebuild_channel();
        drop(rx);
        assert!(signal.is_closed());
        assert!(!signal.fire());
    }
}
