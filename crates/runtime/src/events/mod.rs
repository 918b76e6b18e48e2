//! Topic-based event bus for inventory notifications.
//!
//! Events are published to hierarchical string topics, and consumers
//! subscribe only to the topics they need. Every subscription is a scoped
//! handle: cancel it (or drop it) when the observing view goes away.

mod bus;
mod types;

pub use bus::{EventBus, Subscription, Topic};
pub use types::{Event, PickupCollected};
