//! PickupHub — real-time pickup alerts for staff
//!
//! Every placed order is published here after its transaction commits; staff
//! consoles subscribe over SSE and render the pickup queue without polling.

use serde::Serialize;
use tokio::sync::broadcast;

/// Broadcast channel capacity — enough to buffer bursts while a console connects
const BROADCAST_CAPACITY: usize = 256;

/// Event pushed to staff consoles when an order enters the pickup queue
#[derive(Debug, Clone, Serialize)]
pub struct PickupEvent {
    pub order_id: i64,
    pub claim_code: String,
    pub total_amount: f64,
    pub item_count: i64,
}

#[derive(Clone)]
pub struct PickupHub {
    tx: broadcast::Sender<PickupEvent>,
}

impl Default for PickupHub {
    fn default() -> Self {
        let (tx, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self { tx }
    }
}

impl PickupHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a placed order (send errors just mean no console is listening)
    pub fn publish(&self, event: PickupEvent) {
        let _ = self.tx.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PickupEvent> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(order_id: i64) -> PickupEvent {
        PickupEvent {
            order_id,
            claim_code: "ABCD2345".into(),
            total_amount: 85.5,
            item_count: 5,
        }
    }

    #[tokio::test]
    async fn subscribers_receive_published_events() {
        let hub = PickupHub::new();
        let mut rx = hub.subscribe();
        hub.publish(event(1));
        let received = rx.recv().await.unwrap();
        assert_eq!(received.order_id, 1);
    }

    #[test]
    fn publish_without_subscribers_is_silent() {
        let hub = PickupHub::new();
        hub.publish(event(2));
    }
}
