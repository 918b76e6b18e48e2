//! Runtime hosting for replicated inventories.
//!
//! This crate wires the deterministic `inventory-core` rules to a
//! notification bus, a replication link and the observers that render
//! inventory state. Consumers build a [`Session`], spawn inventories on it,
//! feed it interactions (authority) or replication packets (replica), and
//! subscribe to [`Topic`]s to react to changes.
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the inventories of one peer and its builder
//! - [`inventory`] holds the component that owns a list and publishes changes
//! - [`events`] provides the topic-based event bus and scoped subscriptions
//! - [`replication`] encodes diffs and snapshots for the wire
//! - [`pickup`] resolves interactions into granted items
//! - [`oracle`] adapts loaded content to the core oracle trait
//! - [`view`] contains the grid and toast observers
pub mod api;
pub mod events;
pub mod inventory;
pub mod oracle;
pub mod pickup;
pub mod replication;
pub mod session;
pub mod view;

pub use api::{RegistryError, Result, RuntimeError};
pub use events::{Event, EventBus, PickupCollected, Subscription, Topic};
pub use inventory::InventoryComponent;
pub use oracle::ItemRegistry;
pub use pickup::{PickupOutcome, PickupSystem};
pub use replication::{
    ReplicationPacket, decode_diff, decode_packet, decode_snapshot, encode_diff, encode_packet,
    encode_snapshot,
};
pub use session::{Session, SessionBuilder};
pub use view::{InventoryGridView, Tile, TileViewModel, Toast, ToastFeed, ViewError};
