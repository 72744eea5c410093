//! In-process event publisher
//!
//! Fans feed events out to every subscriber over a `tokio` broadcast channel.

use feed_core::FeedEvent;
use tokio::sync::broadcast;

/// Feed event publisher
#[derive(Debug, Clone)]
pub struct Publisher {
    sender: broadcast::Sender<FeedEvent>,
}

impl Publisher {
    /// Events buffered per subscriber before the slowest one starts lagging
    pub const DEFAULT_BUFFER: usize = 256;

    #[must_use]
    pub fn new(buffer: usize) -> Self {
        let (sender, _) = broadcast::channel(buffer.max(1));
        Self { sender }
    }

    /// Publish an event, returning how many subscribers received it
    ///
    /// Publishing with no subscribers is not an error.
    pub fn publish(&self, event: FeedEvent) -> usize {
        let event_type = event.event_type();
        match self.sender.send(event) {
            Ok(receivers) => {
                tracing::debug!(event_type, receivers, "Published event");
                receivers
            }
            Err(_) => {
                tracing::trace!(event_type, "No subscribers for event");
                0
            }
        }
    }

    /// Subscribe to events published from now on
    pub fn subscribe(&self) -> broadcast::Receiver<FeedEvent> {
        self.sender.subscribe()
    }

    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for Publisher {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BUFFER)
    }
}
