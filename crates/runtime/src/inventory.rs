//! Inventory component: one actor's list plus its replication role.
//!
//! Every path that changes a list, authoritative mutation or replicated
//! apply, ends in [`InventoryComponent::commit`], which is the only place
//! stack changes are published. Observers therefore see the same events on
//! the authority and on every replica.

use std::sync::Arc;

use inventory_core::{
    ActorId, EntryOp, InstanceId, InventoryError, InventoryList, InventorySnapshot, ItemKey,
    ItemOracle, NetRole, PickupBundle, ReplicaCursor, ReplicationDiff, ReplicationError,
    ReplicationLog, StackChange,
};
use tracing::debug;

use crate::api::Result;
use crate::events::{Event, EventBus, Topic};

pub struct InventoryComponent {
    list: InventoryList,
    role: NetRole,
    items: Arc<dyn ItemOracle>,
    bus: EventBus,
    /// Ops committed since the last diff (authority only).
    log: ReplicationLog,
    /// Last applied authority sequence (replica only).
    cursor: ReplicaCursor,
}

impl InventoryComponent {
    pub fn authority(owner: ActorId, items: Arc<dyn ItemOracle>, bus: EventBus) -> Self {
        Self::with_role(owner, NetRole::Authority, items, bus)
    }

    pub fn replica(owner: ActorId, items: Arc<dyn ItemOracle>, bus: EventBus) -> Self {
        Self::with_role(owner, NetRole::Replica, items, bus)
    }

    pub fn with_role(
        owner: ActorId,
        role: NetRole,
        items: Arc<dyn ItemOracle>,
        bus: EventBus,
    ) -> Self {
        Self {
            list: InventoryList::new(owner),
            role,
            items,
            bus,
            log: ReplicationLog::new(),
            cursor: ReplicaCursor::new(),
        }
    }

    pub fn owner(&self) -> ActorId {
        self.list.owner()
    }

    pub fn role(&self) -> NetRole {
        self.role
    }

    pub fn list(&self) -> &InventoryList {
        &self.list
    }

    pub fn items(&self) -> &Arc<dyn ItemOracle> {
        &self.items
    }

    /// Fails with `Unauthorized` unless this component is the authority.
    pub fn ensure_authority(&self) -> std::result::Result<(), InventoryError> {
        if self.role.is_authority() {
            Ok(())
        } else {
            Err(InventoryError::Unauthorized {
                owner: self.owner(),
                role: self.role,
            })
        }
    }

    /// Adds `count` units of `key`, returning the entry that received them.
    pub fn add_entry(&mut self, key: &ItemKey, count: u32) -> Result<InstanceId> {
        self.ensure_authority()?;
        let change = self.list.add_entry(self.items.as_ref(), key, count)?;
        let entry = change.entry;
        self.commit(&[change]);
        Ok(entry)
    }

    pub fn remove_entry(&mut self, entry: InstanceId, count: u32) -> Result<StackChange> {
        self.ensure_authority()?;
        let change = self.list.remove_entry(entry, count)?;
        self.commit(std::slice::from_ref(&change));
        Ok(change)
    }

    pub fn consume_by_definition(&mut self, key: &ItemKey, count: u32) -> Result<Vec<StackChange>> {
        self.ensure_authority()?;
        let changes = self.list.consume_by_definition(key, count)?;
        self.commit(&changes);
        Ok(changes)
    }

    /// Adds every template of `bundle`, all or nothing.
    ///
    /// Returns the receiving entry of each template, in template order.
    /// Templates landing on the same entry publish one net change.
    pub fn add_bundle(&mut self, bundle: &PickupBundle) -> Result<Vec<InstanceId>> {
        self.ensure_authority()?;
        let mut staged = self.list.clone();
        let steps = bundle
            .templates
            .iter()
            .map(|template| staged.add_entry(self.items.as_ref(), &template.definition, template.count))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let entries: Vec<InstanceId> = steps.iter().map(|change| change.entry).collect();

        self.list = staged;
        self.commit(&StackChange::coalesce(steps));
        Ok(entries)
    }

    /// Whether ops are waiting to be shipped to replicas.
    pub fn is_dirty(&self) -> bool {
        self.log.is_dirty()
    }

    /// Drains the ops committed since the previous call.
    pub fn take_replication_diff(&mut self) -> Option<ReplicationDiff> {
        if !self.role.is_authority() {
            return None;
        }
        self.log.take(self.owner())
    }

    /// Full state at the latest committed (or applied) sequence.
    pub fn snapshot(&self) -> InventorySnapshot {
        let sequence = match self.role {
            NetRole::Authority => self.log.last_sequence(),
            NetRole::Replica => self.cursor.applied(),
        };
        self.list.snapshot(sequence)
    }

    /// Applies an authority diff, publishing the same changes the authority did.
    ///
    /// Ops already applied are skipped; a sequence gap is rejected and leaves
    /// the replica untouched until a snapshot repairs it.
    pub fn apply_replication(&mut self, diff: &ReplicationDiff) -> Result<Vec<StackChange>> {
        self.ensure_replica_of(diff.owner)?;
        let ops = self.cursor.admit(diff)?;
        if ops.is_empty() {
            debug!(
                target: "runtime::replication",
                owner = %self.owner(),
                sequence = diff.last_sequence(),
                "diff already applied"
            );
            return Ok(Vec::new());
        }

        let changes = self.list.apply_ops(ops, self.items.as_ref())?;
        self.cursor.advance(diff.last_sequence());
        self.commit(&changes);
        Ok(changes)
    }

    /// Replaces the replica state with `snapshot`, publishing net differences.
    pub fn apply_snapshot(&mut self, snapshot: &InventorySnapshot) -> Result<Vec<StackChange>> {
        self.ensure_replica_of(snapshot.owner)?;
        let changes = self.list.apply_snapshot(snapshot, self.items.as_ref())?;
        self.cursor.reset(snapshot.sequence);
        self.commit(&changes);
        Ok(changes)
    }

    fn ensure_replica_of(&self, owner: ActorId) -> std::result::Result<(), ReplicationError> {
        if self.role.is_authority() {
            return Err(ReplicationError::Unauthorized {
                owner: self.owner(),
            });
        }
        if owner != self.owner() {
            return Err(ReplicationError::OwnerMismatch {
                expected: self.owner(),
                received: owner,
            });
        }
        Ok(())
    }

    /// Single emission point for every applied change.
    fn commit(&mut self, changes: &[StackChange]) {
        for change in changes {
            if self.role.is_authority() {
                self.log.record(EntryOp::describe(change, &self.list));
            }

            let receivers = self
                .bus
                .publish(&Topic::STACK_CHANGED, Event::StackChanged(change.clone()));
            debug!(
                target: "runtime::inventory",
                owner = %change.owner,
                role = %self.role,
                entry = %change.entry,
                definition = %change.definition,
                previous = change.previous_count,
                new = change.new_count,
                receivers,
                "stack changed"
            );
        }
    }
}

impl std::fmt::Debug for InventoryComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InventoryComponent")
            .field("list", &self.list)
            .field("role", &self.role)
            .field("log", &self.log)
            .field("cursor", &self.cursor)
            .finish_non_exhaustive()
    }
}
