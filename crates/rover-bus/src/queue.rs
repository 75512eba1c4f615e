use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// A published message as stored for delivery: topic, pre-serialized JSON
/// header, and the binary payload. Shared across subscriber queues via Arc.
#[derive(Debug)]
pub struct Message {
    pub topic: String,
    pub header_json: Vec<u8>,
    pub payload: Vec<u8>,
}

/// Bounded per-subscriber send queue.
///
/// `push` never blocks: when the queue is full the oldest entry is dropped
/// in favor of the newest. Capacity 1 gives conflate delivery (the
/// subscriber always sees the most recently published message).
pub struct SendQueue {
    inner: Mutex<VecDeque<Arc<Message>>>,
    capacity: usize,
    notify: Notify,
}

impl SendQueue {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            inner: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
            notify: Notify::new(),
        }
    }

    /// Enqueue a message, dropping the oldest entry if full.
    ///
    /// Returns true if an older message was dropped.
    pub fn push(&self, msg: Arc<Message>) -> bool {
        let dropped = {
            let mut queue = self.inner.lock().unwrap_or_else(|e| e.into_inner());
            let dropped = if queue.len() == self.capacity {
                queue.pop_front();
                true
            } else {
                false
            };
            queue.push_back(msg);
            dropped
        };
        self.notify.notify_one();
        dropped
    }

    /// Dequeue the next message, waiting until one is available.
    pub async fn pop(&self) -> Arc<Message> {
        loop {
            // notify_one stores a permit when nobody is waiting, so a push
            // between this check and notified().await is not lost.
            if let Some(msg) = self
                .inner
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .pop_front()
            {
                return msg;
            }
            self.notify.notified().await;
        }
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(topic: &str, seq: u8) -> Arc<Message> {
        Arc::new(Message {
            topic: topic.to_string(),
            header_json: vec![seq],
            payload: vec![],
        })
    }

    #[tokio::test]
    async fn test_push_pop_in_order() {
        let queue = SendQueue::new(4);
        assert!(!queue.push(msg("a", 1)));
        assert!(!queue.push(msg("a", 2)));
        assert_eq!(queue.pop().await.header_json, vec![1]);
        assert_eq!(queue.pop().await.header_json, vec![2]);
        assert!(queue.is_empty());
    }

    #[tokio::test]
    async fn test_full_queue_drops_oldest() {
        let queue = SendQueue::new(2);
        assert!(!queue.push(msg("a", 1)));
        assert!(!queue.push(msg("a", 2)));
        assert!(queue.push(msg("a", 3)));

        // 1 was dropped; 2 and 3 remain in order.
        assert_eq!(queue.pop().await.header_json, vec![2]);
        assert_eq!(queue.pop().await.header_json, vec![3]);
    }

    #[tokio::test]
    async fn test_conflate_keeps_only_newest() {
        let queue = SendQueue::new(1);
        queue.push(msg("a", 1));
        queue.push(msg("a", 2));
        queue.push(msg("a", 3));

        assert_eq!(queue.len(), 1);
        assert_eq!(queue.pop().await.header_json, vec![3]);
    }

    #[tokio::test]
    async fn test_conflate_spans_topics() {
        // One queue per subscriber: conflation is across every topic the
        // subscription matches, not per topic.
        let queue = SendQueue::new(1);
        queue.push(msg("video.annotated", 1));
        queue.push(msg("drive.cmd", 2));

        let got = queue.pop().await;
        assert_eq!(got.topic, "drive.cmd");
        assert!(queue.is_empty());
    }

    #[tokio::test]
    async fn test_pop_wakes_on_push() {
        let queue = Arc::new(SendQueue::new(1));
        let queue_clone = queue.clone();

        let waiter = tokio::spawn(async move { queue_clone.pop().await });

        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        queue.push(msg("a", 9));

        let got = tokio::time::timeout(std::time::Duration::from_secs(5), waiter)
            .await
            .expect("pop timed out")
            .unwrap();
        assert_eq!(got.header_json, vec![9]);
    }

    #[tokio::test]
    async fn test_zero_capacity_clamps_to_one() {
        let queue = SendQueue::new(0);
        queue.push(msg("a", 1));
        assert_eq!(queue.len(), 1);
    }
}
