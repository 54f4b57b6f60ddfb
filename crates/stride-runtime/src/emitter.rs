//! Broadcast-based emitter for [`RunEvent`] dispatch.

use tokio::sync::broadcast;

use stride_core::events::RunEvent;

/// Default broadcast channel capacity.
const DEFAULT_CAPACITY: usize = 256;

/// Non-blocking run-event fanout.
///
/// `emit` never awaits; a receiver that falls behind the channel capacity
/// sees a lag error rather than slowing the run down. Emitting with no
/// subscribers is fine; events are observability, not control flow.
pub struct EventEmitter {
    tx: broadcast::Sender<RunEvent>,
}

impl EventEmitter {
    /// Create an emitter with the default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create an emitter with a custom channel capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Emit an event to all subscribers; returns how many received it.
    pub fn emit(&self, event: RunEvent) -> usize {
        self.tx.send(event).unwrap_or(0)
    }

    /// Subscribe to events emitted after this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<RunEvent> {
        self.tx.subscribe()
    }

    /// Number of live subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventEmitter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stride_core::events::BaseEvent;

    fn started(run_id: &str) -> RunEvent {
        RunEvent::RunStarted {
            base: BaseEvent::now(run_id),
        }
    }

    #[test]
    fn emit_with_no_subscribers_is_ok() {
        let emitter = EventEmitter::new();
        assert_eq!(emitter.emit(started("r1")), 0);
    }

    #[tokio::test]
    async fn emit_and_receive() {
        let emitter = EventEmitter::new();
        let mut rx = emitter.subscribe();

        assert_eq!(emitter.emit(started("r1")), 1);
        let event = rx.recv().await.unwrap();
        assert_eq!(event.run_id(), "r1");
        assert_eq!(event.event_type(), "run_started");
    }

    #[tokio::test]
    async fn multiple_subscribers_all_receive() {
        let emitter = EventEmitter::new();
        let mut rx1 = emitter.subscribe();
        let mut rx2 = emitter.subscribe();
        assert_eq!(emitter.subscriber_count(), 2);

        assert_eq!(emitter.emit(started("r1")), 2);
        assert_eq!(rx1.recv().await.unwrap().run_id(), "r1");
        assert_eq!(rx2.recv().await.unwrap().run_id(), "r1");
    }

    #[tokio::test]
    async fn slow_receiver_lags() {
        let emitter = EventEmitter::with_capacity(1);
        let mut rx = emitter.subscribe();

        let _ = emitter.emit(started("r1"));
        let _ = emitter.emit(started("r2"));

        assert!(rx.recv().await.is_err());
    }
}
