use crate::message::{Header, SubscribeRequest};
use crate::queue::{Message, SendQueue};
use crate::{BusError, framing};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio::net::{TcpListener, ToSocketAddrs};
use tokio::task::JoinHandle;

const SUBSCRIBE_TIMEOUT: Duration = Duration::from_secs(5);

struct SubscriberHandle {
    addr: SocketAddr,
    prefix: String,
    queue: Arc<SendQueue>,
    writer_task: JoinHandle<()>,
}

type SubscriberMap = Arc<RwLock<HashMap<u64, SubscriberHandle>>>;

/// Publisher side of the bus: one producer, zero or more subscribers.
///
/// A background task accepts connections; each client sends one JSON
/// subscribe request (topic prefix + delivery mode) and then only reads.
/// Every subscriber gets its own bounded queue and writer task, so a slow
/// or dead consumer never delays `publish` or the other subscribers.
pub struct Hub {
    subscribers: SubscriberMap,
    _accept_task: JoinHandle<()>,
    local_addr: SocketAddr,
}

impl Hub {
    /// Bind a TCP listener and start accepting subscriber connections.
    pub async fn bind(addr: impl ToSocketAddrs) -> Result<Self, BusError> {
        let listener = TcpListener::bind(addr).await?;
        let local_addr = listener.local_addr()?;

        let subscribers: SubscriberMap = Arc::new(RwLock::new(HashMap::new()));
        let subscribers_clone = subscribers.clone();
        let next_id = AtomicU64::new(0);

        // Spawn accept loop
        let accept_task = tokio::spawn(async move {
            loop {
                match listener.accept().await {
                    Ok((stream, addr)) => {
                        let id = next_id.fetch_add(1, Ordering::Relaxed);
                        let subscribers = subscribers_clone.clone();
                        tokio::spawn(async move {
                            if let Err(e) = register_subscriber(id, stream, addr, subscribers).await
                            {
                                log::warn!("Rejecting subscriber {}: {}", addr, e);
                            }
                        });
                    }
                    Err(e) => {
                        log::warn!("Accept error: {}", e);
                        // Backoff to prevent CPU spin on persistent errors
                        tokio::time::sleep(Duration::from_millis(100)).await;
                    }
                }
            }
        });

        Ok(Self {
            subscribers,
            _accept_task: accept_task,
            local_addr,
        })
    }

    /// Publish a message to every subscriber whose prefix matches `topic`.
    ///
    /// Never blocks on subscriber sockets: the message is enqueued on each
    /// matching subscriber's bounded queue (dropping that subscriber's
    /// oldest pending message when full) and the writer tasks take it from
    /// there. Individual subscriber failures never surface here.
    pub fn publish(&self, topic: &str, header: &Header, payload: Vec<u8>) -> Result<(), BusError> {
        if topic.len() > framing::MAX_TOPIC_SIZE as usize {
            return Err(BusError::MessageTooLarge(topic.len() as u32));
        }

        let header_json = serde_json::to_vec(header)?;
        let msg = Arc::new(Message {
            topic: topic.to_string(),
            header_json,
            payload,
        });

        let subscribers = self.subscribers.read().unwrap_or_else(|e| e.into_inner());
        for (id, sub) in subscribers.iter() {
            if msg.topic.starts_with(&sub.prefix) && sub.queue.push(msg.clone()) {
                log::debug!(
                    "Subscriber {} ({}) lagging on {}, dropped oldest",
                    id,
                    sub.addr,
                    msg.topic
                );
            }
        }

        Ok(())
    }

    /// Return the number of currently connected subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }

    /// Return the local address the hub is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }
}

impl Drop for Hub {
    fn drop(&mut self) {
        self._accept_task.abort();
        let mut subscribers = self.subscribers.write().unwrap_or_else(|e| e.into_inner());
        for (_, sub) in subscribers.drain() {
            sub.writer_task.abort();
        }
    }
}

/// Read the subscribe request, then install the subscriber's queue and
/// writer task. The writer removes its own map entry on the first failed
/// write, so a closed connection is detected within one delivery attempt.
async fn register_subscriber(
    id: u64,
    stream: tokio::net::TcpStream,
    addr: SocketAddr,
    subscribers: SubscriberMap,
) -> Result<(), BusError> {
    let (mut read_half, mut write_half) = stream.into_split();

    let request_bytes = tokio::time::timeout(
        SUBSCRIBE_TIMEOUT,
        framing::read_part(&mut read_half, framing::MAX_HEADER_SIZE),
    )
    .await
    .map_err(|_| BusError::InvalidSubscribe("timed out".to_string()))??;

    let request: SubscribeRequest = serde_json::from_slice(&request_bytes)
        .map_err(|e| BusError::InvalidSubscribe(e.to_string()))?;

    let queue = Arc::new(SendQueue::new(request.mode.depth()));

    let queue_clone = queue.clone();
    let subscribers_for_cleanup = subscribers.clone();
    let writer_task = tokio::spawn(async move {
        loop {
            let msg = queue_clone.pop().await;
            if let Err(e) =
                framing::write_message(&mut write_half, &msg.topic, &msg.header_json, &msg.payload)
                    .await
            {
                log::warn!("Subscriber {} ({}) disconnected: {}", id, addr, e);
                subscribers_for_cleanup
                    .write()
                    .unwrap_or_else(|e| e.into_inner())
                    .remove(&id);
                break;
            }
        }
    });

    log::debug!(
        "Subscriber {} ({}) registered: prefix={:?} mode={:?}",
        id,
        addr,
        request.prefix,
        request.mode
    );

    subscribers
        .write()
        .unwrap_or_else(|e| e.into_inner())
        .insert(
            id,
            SubscriberHandle {
                addr,
                prefix: request.prefix,
                queue,
                writer_task,
            },
        );

    Ok(())
}
