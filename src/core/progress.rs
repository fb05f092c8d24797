use crate::domain::model::ProgressEvent;
use tokio::sync::broadcast;

/// Broadcast side of the import-progress channel. Emitting with no listeners
/// is fine; long-running commands fire ticks into the void when nobody cares.
#[derive(Clone)]
pub struct ProgressSender {
    tx: broadcast::Sender<ProgressEvent>,
}

impl ProgressSender {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        ProgressSender { tx }
    }

    pub fn emit(&self, current: usize, total: usize, message: impl Into<String>) {
        let event = ProgressEvent {
            current,
            total,
            message: message.into(),
        };
        // A send error only means there are no subscribers right now.
        let _ = self.tx.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ProgressEvent> {
        self.tx.subscribe()
    }
}

impl Default for ProgressSender {
    fn default() -> Self {
        Self::new(64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscriber_receives_events_in_order() {
        let sender = ProgressSender::new(16);
        let mut rx = sender.subscribe();

        sender.emit(1, 3, "one");
        sender.emit(3, 3, "done");

        let first = rx.recv().await.unwrap();
        assert_eq!(first.current, 1);
        assert_eq!(first.total, 3);
        assert_eq!(first.message, "one");

        let last = rx.recv().await.unwrap();
        assert_eq!(last.current, last.total);
    }

    #[test]
    fn test_emit_without_subscribers_does_not_panic() {
        let sender = ProgressSender::new(4);
        sender.emit(1, 1, "nobody listening");
    }
}
