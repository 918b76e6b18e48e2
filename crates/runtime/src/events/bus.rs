//! Topic-based event bus implementation.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};

use super::types::Event;

/// Hierarchical topic key (`inventory.stackChanged`).
///
/// Subscribers match topics by exact string.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Topic(Cow<'static, str>);

impl Topic {
    /// Stack count changes of any inventory entry.
    pub const STACK_CHANGED: Topic = Topic(Cow::Borrowed("inventory.stackChanged"));

    /// Completed pickups.
    pub const PICKUP_COLLECTED: Topic = Topic(Cow::Borrowed("inventory.pickupCollected"));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Topic-based event bus
///
/// Channels are created lazily, one `broadcast` channel per topic, on first
/// subscription. Publishing is best-effort: events published while a topic
/// has no live subscriber are dropped.
///
/// Cloning the bus shares the underlying channels.
#[derive(Clone)]
pub struct EventBus {
    channels: Arc<RwLock<HashMap<Topic, broadcast::Sender<Event>>>>,
    capacity: usize,
}

impl EventBus {
    pub const DEFAULT_CAPACITY: usize = 64;

    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            channels: Arc::new(RwLock::new(HashMap::new())),
            // broadcast channels require a non-zero capacity
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Publishes `event` on `topic`, returning how many subscribers it reached.
    ///
    /// Subscribers cancelled before or during the publish are simply not
    /// counted.
    pub fn publish(&self, topic: &Topic, event: Event) -> usize {
        let channels = self.channels.read().unwrap_or_else(PoisonError::into_inner);
        let Some(tx) = channels.get(topic) else {
            tracing::trace!(target: "runtime::events", %topic, "no channel for topic");
            return 0;
        };

        match tx.send(event) {
            Ok(receivers) => receivers,
            Err(_) => {
                // No subscribers for this topic - this is normal, not an error
                tracing::trace!(target: "runtime::events", %topic, "no subscribers for topic");
                0
            }
        }
    }

    /// Subscribe to a specific topic
    ///
    /// The returned handle only receives events published after this call.
    pub fn subscribe(&self, topic: Topic) -> Subscription {
        let receiver = {
            let mut channels = self.channels.write().unwrap_or_else(PoisonError::into_inner);
            channels
                .entry(topic.clone())
                .or_insert_with(|| broadcast::channel(self.capacity).0)
                .subscribe()
        };
        tracing::debug!(target: "runtime::events", %topic, "subscribed");

        Subscription {
            topic,
            receiver: Some(receiver),
        }
    }

    /// Number of live subscriptions on `topic`.
    pub fn subscriber_count(&self, topic: &Topic) -> usize {
        self.channels
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(topic)
            .map_or(0, broadcast::Sender::receiver_count)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let topics: Vec<Topic> = self
            .channels
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        f.debug_struct("EventBus")
            .field("capacity", &self.capacity)
            .field("topics", &topics)
            .finish()
    }
}

/// Scoped handle to one topic's event stream.
///
/// Cancelling is idempotent and safe at any time, including while another
/// thread publishes. Dropping the handle cancels it.
#[derive(Debug)]
pub struct Subscription {
    topic: Topic,
    receiver: Option<broadcast::Receiver<Event>>,
}

impl Subscription {
    pub fn topic(&self) -> &Topic {
        &self.topic
    }

    pub fn is_cancelled(&self) -> bool {
        self.receiver.is_none()
    }

    /// Returns the next buffered event without waiting.
    ///
    /// `None` when nothing is buffered or the subscription is cancelled.
    pub fn try_next(&mut self) -> Option<Event> {
        loop {
            let receiver = self.receiver.as_mut()?;
            match receiver.try_recv() {
                Ok(event) => return Some(event),
                Err(TryRecvError::Empty) => return None,
                Err(TryRecvError::Lagged(skipped)) => self.report_lag(skipped),
                Err(TryRecvError::Closed) => {
                    self.receiver = None;
                    return None;
                }
            }
        }
    }

    /// Returns every buffered event, in publish order.
    pub fn drain(&mut self) -> Vec<Event> {
        std::iter::from_fn(|| self.try_next()).collect()
    }

    /// Waits for the next event. `None` once cancelled.
    pub async fn next(&mut self) -> Option<Event> {
        loop {
            let receiver = self.receiver.as_mut()?;
            match receiver.recv().await {
                Ok(event) => return Some(event),
                Err(RecvError::Lagged(skipped)) => self.report_lag(skipped),
                Err(RecvError::Closed) => {
                    self.receiver = None;
                    return None;
                }
            }
        }
    }

    /// Stops delivery. Buffered events are discarded.
    pub fn cancel(&mut self) {
        if self.receiver.take().is_some() {
            tracing::debug!(target: "runtime::events", topic = %self.topic, "subscription cancelled");
        }
    }

    fn report_lag(&self, skipped: u64) {
        tracing::warn!(
            target: "runtime::events",
            topic = %self.topic,
            skipped,
            "subscriber lagged, events dropped"
        );
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}
