//! Deterministic inventory rules shared by the runtime and content tooling.
//!
//! `inventory-core` defines the item model (definitions composed from
//! fragments, per-instance stat tags), the inventory list state machine and
//! the replication records exchanged between an authority and its replicas.
//! Nothing here performs I/O or owns a notification channel: every mutation
//! returns a [`StackChange`] and the embedding runtime decides where it goes.
pub mod config;
pub mod error;
pub mod inventory;
pub mod item;
pub mod pickup;
pub mod replication;
pub mod types;

pub use config::InventoryConfig;
pub use error::{DomainError, ErrorSeverity};
pub use inventory::{CountProblem, InventoryEntry, InventoryError, InventoryList, Missing, StackChange};
pub use item::{
    EquippableFragment, Fragment, FragmentHook, FragmentKind, FragmentVariant, IconFragment,
    ItemDefinition, ItemInstance, ItemOracle, PickupDisplayFragment, SetStatsFragment, StatTags,
};
pub use pickup::{
    AttachedComponent, Collectable, CollectableComponent, DecorComponent, Interaction,
    InteractionTarget, PickupBundle, PickupError, PickupPolicy, PickupTemplate, WorldActor,
    resolve_collectable, resolve_collectable_with,
};
pub use replication::{
    EntryOp, EntrySnapshot, InventorySnapshot, ReplicaCursor, ReplicationDiff, ReplicationError,
    ReplicationLog,
};
pub use types::{ActorId, EntryRef, InstanceId, ItemKey, NetRole};
