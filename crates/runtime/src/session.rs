//! Session host: the inventories one peer holds, and how they are driven.
//!
//! A listen-server session owns authoritative inventories; a client session
//! owns replicas fed by the authority's diffs. Both publish on the same kind
//! of bus, so observers are written once for either side.

use std::collections::BTreeMap;
use std::sync::Arc;

use inventory_core::{
    ActorId, Interaction, InventoryConfig, InventorySnapshot, ItemOracle, NetRole,
    ReplicationDiff, ReplicationError, StackChange,
};
use tracing::info;

use crate::api::{Result, RuntimeError};
use crate::events::EventBus;
use crate::inventory::InventoryComponent;
use crate::pickup::{PickupOutcome, PickupSystem};
use crate::replication::ReplicationPacket;

pub struct Session {
    config: InventoryConfig,
    role: NetRole,
    items: Arc<dyn ItemOracle>,
    bus: EventBus,
    pickups: PickupSystem,
    inventories: BTreeMap<ActorId, InventoryComponent>,
}

impl Session {
    /// Create a new session builder
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    pub fn config(&self) -> &InventoryConfig {
        &self.config
    }

    pub fn role(&self) -> NetRole {
        self.role
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn items(&self) -> &Arc<dyn ItemOracle> {
        &self.items
    }

    /// Creates the inventory of `owner` with this session's role.
    pub fn spawn_inventory(&mut self, owner: ActorId) -> Result<&mut InventoryComponent> {
        if self.inventories.contains_key(&owner) {
            return Err(RuntimeError::DuplicateInventory(owner));
        }
        info!(target: "runtime::session", %owner, role = %self.role, "inventory spawned");
        let component =
            InventoryComponent::with_role(owner, self.role, Arc::clone(&self.items), self.bus.clone());
        Ok(self.inventories.entry(owner).or_insert(component))
    }

    pub fn inventory(&self, owner: ActorId) -> Option<&InventoryComponent> {
        self.inventories.get(&owner)
    }

    pub fn inventory_mut(&mut self, owner: ActorId) -> Option<&mut InventoryComponent> {
        self.inventories.get_mut(&owner)
    }

    pub fn inventories(&self) -> impl Iterator<Item = &InventoryComponent> {
        self.inventories.values()
    }

    /// Handles an interaction delivered by the world: the collector's
    /// inventory receives whatever the target grants.
    pub fn interact(&mut self, interaction: Interaction<'_>) -> Result<PickupOutcome> {
        let inventory = self
            .inventories
            .get_mut(&interaction.collector)
            .ok_or(RuntimeError::UnknownInventory(interaction.collector))?;
        self.pickups.collect(interaction, inventory)
    }

    /// Diffs of every dirty inventory, ordered by owner.
    pub fn take_replication_diffs(&mut self) -> Vec<ReplicationDiff> {
        self.inventories
            .values_mut()
            .filter_map(InventoryComponent::take_replication_diff)
            .collect()
    }

    pub fn snapshots(&self) -> Vec<InventorySnapshot> {
        self.inventories.values().map(InventoryComponent::snapshot).collect()
    }

    pub fn apply_replication(&mut self, diff: &ReplicationDiff) -> Result<Vec<StackChange>> {
        self.inventories
            .get_mut(&diff.owner)
            .ok_or(RuntimeError::UnknownInventory(diff.owner))?
            .apply_replication(diff)
    }

    /// Applies a snapshot, spawning the replica inventory for late joiners.
    pub fn apply_snapshot(&mut self, snapshot: &InventorySnapshot) -> Result<Vec<StackChange>> {
        if self.role.is_authority() {
            return Err(ReplicationError::Unauthorized {
                owner: snapshot.owner,
            }
            .into());
        }
        let spawned = !self.inventories.contains_key(&snapshot.owner);
        if spawned {
            self.spawn_inventory(snapshot.owner)?;
        }
        let result = self
            .inventories
            .get_mut(&snapshot.owner)
            .ok_or(RuntimeError::UnknownInventory(snapshot.owner))?
            .apply_snapshot(snapshot);
        if result.is_err() && spawned {
            self.inventories.remove(&snapshot.owner);
        }
        result
    }

    pub fn apply_packet(&mut self, packet: &ReplicationPacket) -> Result<Vec<StackChange>> {
        match packet {
            ReplicationPacket::Diff(diff) => self.apply_replication(diff),
            ReplicationPacket::Snapshot(snapshot) => self.apply_snapshot(snapshot),
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("config", &self.config)
            .field("role", &self.role)
            .field("bus", &self.bus)
            .field("inventories", &self.inventories.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

pub struct SessionBuilder {
    config: InventoryConfig,
    role: NetRole,
    items: Option<Arc<dyn ItemOracle>>,
    bus: Option<EventBus>,
}

impl SessionBuilder {
    fn new() -> Self {
        Self {
            config: InventoryConfig::default(),
            role: NetRole::Authority,
            items: None,
            bus: None,
        }
    }

    /// Override inventory configuration
    pub fn config(mut self, config: InventoryConfig) -> Self {
        self.config = config;
        self
    }

    pub fn role(mut self, role: NetRole) -> Self {
        self.role = role;
        self
    }

    pub fn items(mut self, items: Arc<dyn ItemOracle>) -> Self {
        self.items = Some(items);
        self
    }

    /// Share an existing bus instead of creating one from the configuration.
    pub fn bus(mut self, bus: EventBus) -> Self {
        self.bus = Some(bus);
        self
    }

    pub fn build(self) -> Result<Session> {
        let items = self.items.ok_or(RuntimeError::MissingRegistry)?;
        let bus = self
            .bus
            .unwrap_or_else(|| EventBus::with_capacity(self.config.bus_capacity));
        let pickups = PickupSystem::new(self.config.pickup_policy, bus.clone());

        Ok(Session {
            config: self.config,
            role: self.role,
            items,
            bus,
            pickups,
            inventories: BTreeMap::new(),
        })
    }
}
