//! Fire-and-forget notifications about bills.
//!
//! Handlers publish on an in-process broadcast channel and never wait for a
//! receiver. Delivery to the outside world is up to whoever subscribes.

use tokio::sync::broadcast;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BillEvent {
    Created {
        bill_id: Uuid,
        owner_id: String,
        owner_name: String,
        title: String,
        total_amount: i64,
    },
}

#[derive(Clone)]
pub struct Notifier {
    tx: broadcast::Sender<BillEvent>,
}

impl Notifier {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<BillEvent> {
        self.tx.subscribe()
    }

    /// Publishes `event`. Having no subscriber is not an error.
    pub fn publish(&self, event: BillEvent) {
        let _ = self.tx.send(event);
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(256)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_receive_published_events() {
        let notifier = Notifier::default();
        let mut rx = notifier.subscribe();
        let event = BillEvent::Created {
            bill_id: Uuid::new_v4(),
            owner_id: "u1".to_string(),
            owner_name: "alice".to_string(),
            title: "Kim wedding".to_string(),
            total_amount: 10_000,
        };
        notifier.publish(event.clone());
        assert_eq!(rx.recv().await.unwrap(), event);
    }

    #[test]
    fn publishing_without_subscribers_is_fine() {
        Notifier::new(0).publish(BillEvent::Created {
            bill_id: Uuid::new_v4(),
            owner_id: "u1".to_string(),
            owner_name: "alice".to_string(),
            title: "t".to_string(),
            total_amount: 0,
        });
    }
}
