use std::sync::Arc;

use tokio::sync::broadcast;

use crate::app::WatchError;
use crate::domain::Program;

/// Notifications raised by the poll loop.
#[derive(Debug, Clone)]
pub enum WatcherEvent {
    /// A program identity appeared that was absent from the previous snapshot.
    Begun(Program),
    /// A program identity from the previous snapshot is no longer on the air.
    Finished(Program),
    /// The update cycle failed; the poll loop has terminated.
    Error(Arc<WatchError>),
}

pub(crate) struct EventBus {
    tx: broadcast::Sender<WatcherEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        // Buffer 64 events; a subscriber that falls behind loses the oldest
        // notifications rather than stalling the poll loop.
        let (tx, _) = broadcast::channel(64);
        Self { tx }
    }

    /// Best-effort, non-blocking. A send with no live subscribers is not an
    /// error.
    pub fn publish(&self, event: WatcherEvent) {
        let _ = self.tx.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<WatcherEvent> {
        self.tx.subscribe()
    }
}
