//! Replication records exchanged between an authoritative inventory and its
//! replicas.
//!
//! The authority appends one [`EntryOp`] per committed change to its
//! [`ReplicationLog`] (the dirty set) and periodically ships the pending ops
//! as a sequence-numbered [`ReplicationDiff`]. Replicas apply diffs in order
//! through a [`ReplicaCursor`]; late joiners start from an
//! [`InventorySnapshot`]. Applying either one yields the same
//! [`StackChange`](crate::StackChange) records the authority produced, so both
//! sides notify their observers identically.

mod apply;
mod collection;
mod error;
mod log;

pub use error::ReplicationError;
pub use log::{ReplicaCursor, ReplicationLog};

use crate::inventory::{InventoryList, StackChange};
use crate::item::StatTags;
use crate::types::{ActorId, InstanceId, ItemKey};

/// One replicated entry mutation, carrying absolute values.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EntryOp {
    Added {
        id: InstanceId,
        definition: ItemKey,
        count: u32,
        stat_tags: StatTags,
    },
    StackChanged {
        id: InstanceId,
        count: u32,
    },
    Removed {
        id: InstanceId,
    },
}

impl EntryOp {
    /// Describes an already-applied change for replicas.
    ///
    /// Must be called after the change is applied to `list`, so that created
    /// entries can ship the stat tags their creation hooks produced.
    pub fn describe(change: &StackChange, list: &InventoryList) -> Self {
        if change.is_removal() {
            return Self::Removed { id: change.entry };
        }
        if change.is_creation() {
            let stat_tags = list
                .instance(change.entry)
                .map(|instance| instance.stat_tags().clone())
                .unwrap_or_default();
            return Self::Added {
                id: change.entry,
                definition: change.definition.clone(),
                count: change.new_count,
                stat_tags,
            };
        }
        Self::StackChanged {
            id: change.entry,
            count: change.new_count,
        }
    }

    pub fn entry(&self) -> InstanceId {
        match self {
            Self::Added { id, .. } | Self::StackChanged { id, .. } | Self::Removed { id } => *id,
        }
    }
}

/// Ordered, sequence-numbered ops taken from an authority's log.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReplicationDiff {
    pub owner: ActorId,
    /// Sequence number of `ops[0]`; later ops follow contiguously.
    pub first_sequence: u64,
    pub ops: Vec<EntryOp>,
}

impl ReplicationDiff {
    /// Sequence number of the last op, or `first_sequence - 1` when empty.
    pub fn last_sequence(&self) -> u64 {
        (self.first_sequence + self.ops.len() as u64).saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

/// Replicated state of a single entry.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntrySnapshot {
    pub id: InstanceId,
    pub definition: ItemKey,
    pub count: u32,
    pub stat_tags: StatTags,
}

/// Full list state at a given sequence number, for replicas joining late or
/// recovering from a gap.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InventorySnapshot {
    pub owner: ActorId,
    pub sequence: u64,
    pub entries: Vec<EntrySnapshot>,
}

impl InventoryList {
    pub fn snapshot(&self, sequence: u64) -> InventorySnapshot {
        InventorySnapshot {
            owner: self.owner,
            sequence,
            entries: self
                .entries
                .iter()
                .map(|entry| EntrySnapshot {
                    id: entry.id(),
                    definition: entry.key().clone(),
                    count: entry.stack_count(),
                    stat_tags: entry.instance().stat_tags().clone(),
                })
                .collect(),
        }
    }
}
