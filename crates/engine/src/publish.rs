use super::UpdateEvent;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::mpsc::unbounded_channel;

/// Multicast diff fan-out.
///
/// Every subscriber gets its own unbounded channel, so publishing
/// never blocks the engine's critical section: a slow or disconnected
/// client buffers or drops independently and can never stall a tick.
/// Subscribers whose receiver is gone are pruned on the next publish.
#[derive(Debug, Default)]
pub struct Publisher {
    outlets: Vec<UnboundedSender<UpdateEvent>>,
}

impl Publisher {
    /// Registers a subscriber. The provided snapshot is delivered as
    /// the first item so late joiners never miss the baseline; every
    /// later event arrives in emission order, identical for all
    /// subscribers.
    pub fn subscribe(&mut self, snapshot: UpdateEvent) -> UnboundedReceiver<UpdateEvent> {
        let (tx, rx) = unbounded_channel();
        let _ = tx.send(snapshot);
        self.outlets.push(tx);
        log::debug!("[publisher] subscriber joined, audience {}", self.outlets.len());
        rx
    }
    /// Fans an event out to every live subscriber, dropping dead ones.
    pub fn publish(&mut self, event: UpdateEvent) {
        log::debug!("[publisher] {}", event);
        self.outlets.retain(|outlet| outlet.send(event.clone()).is_ok());
    }
    /// Number of registered subscribers, dead or alive.
    pub fn audience(&self) -> usize {
        self.outlets.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ColumnAction;

    fn snapshot() -> UpdateEvent {
        UpdateEvent::FullState {
            columns: Vec::new(),
            number_of_rows: 6,
            players: Default::default(),
        }
    }

    #[test]
    fn subscribers_get_the_snapshot_first() {
        let mut publisher = Publisher::default();
        let mut rx = publisher.subscribe(snapshot());
        assert_eq!(rx.try_recv().ok(), Some(snapshot()));
        assert!(rx.try_recv().is_err());
    }
    #[test]
    fn events_arrive_in_emission_order() {
        let mut publisher = Publisher::default();
        let mut rx = publisher.subscribe(snapshot());
        publisher.publish(UpdateEvent::columns(vec![0], ColumnAction::Add));
        publisher.publish(UpdateEvent::columns(vec![1], ColumnAction::Delete));
        let _ = rx.try_recv();
        assert_eq!(
            rx.try_recv().ok(),
            Some(UpdateEvent::columns(vec![0], ColumnAction::Add))
        );
        assert_eq!(
            rx.try_recv().ok(),
            Some(UpdateEvent::columns(vec![1], ColumnAction::Delete))
        );
    }
    #[test]
    fn dead_subscribers_are_pruned() {
        let mut publisher = Publisher::default();
        let rx = publisher.subscribe(snapshot());
        drop(rx);
        let mut live = publisher.subscribe(snapshot());
        publisher.publish(UpdateEvent::columns(vec![2], ColumnAction::Clear));
        assert_eq!(publisher.audience(), 1);
        let _ = live.try_recv();
        assert!(live.try_recv().is_ok());
    }
}
