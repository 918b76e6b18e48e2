//! Event payloads for the inventory topics.

use inventory_core::{ActorId, InstanceId, PickupBundle, StackChange};
use serde::{Deserialize, Serialize};

use super::bus::Topic;

/// Event wrapper carrying a typed payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// One entry's stack count changed (created, merged, drained or removed).
    StackChanged(StackChange),

    /// A pickup was resolved and granted into the collector's inventory.
    PickupCollected(PickupCollected),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::StackChanged(_) => Topic::STACK_CHANGED,
            Event::PickupCollected(_) => Topic::PICKUP_COLLECTED,
        }
    }

    pub fn as_stack_change(&self) -> Option<&StackChange> {
        match self {
            Event::StackChanged(change) => Some(change),
            _ => None,
        }
    }
}

/// Summary of a completed pickup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickupCollected {
    pub collector: ActorId,
    pub target: ActorId,
    pub bundle: PickupBundle,
    /// Entries that received the items, in template order.
    pub entries: Vec<InstanceId>,
}
