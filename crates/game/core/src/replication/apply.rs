use crate::inventory::{InventoryEntry, InventoryList, StackChange};
use crate::item::{ItemInstance, ItemOracle};

use super::collection::diff_collection;
use super::error::ReplicationError;
use super::{EntryOp, EntrySnapshot, InventorySnapshot};

impl InventoryList {
    /// Applies replicated ops in order, all or nothing.
    ///
    /// Returns one change per op, identical to the change the authority
    /// produced when it committed the same mutation.
    pub fn apply_ops(
        &mut self,
        ops: &[EntryOp],
        oracle: &dyn ItemOracle,
    ) -> Result<Vec<StackChange>, ReplicationError> {
        let mut staged = self.clone();
        let changes = ops
            .iter()
            .map(|op| staged.apply_op(op, oracle))
            .collect::<Result<Vec<_>, _>>()?;
        *self = staged;
        Ok(changes)
    }

    /// Replaces the list with `snapshot`, returning a change for every entry
    /// whose count differs: removals first, then updates, then additions.
    pub fn apply_snapshot(
        &mut self,
        snapshot: &InventorySnapshot,
        oracle: &dyn ItemOracle,
    ) -> Result<Vec<StackChange>, ReplicationError> {
        if snapshot.owner != self.owner {
            return Err(ReplicationError::OwnerMismatch {
                expected: self.owner,
                received: snapshot.owner,
            });
        }

        let entries = snapshot
            .entries
            .iter()
            .map(|entry| self.restore_entry(entry, oracle))
            .collect::<Result<Vec<_>, _>>()?;

        let current = self.snapshot(0).entries;
        let delta = diff_collection(
            &current,
            &snapshot.entries,
            |entry| entry.id,
            |prev, next| {
                (prev.count != next.count)
                    .then(|| self.change(next.id, &next.definition, prev.count, next.count))
            },
        );

        let mut changes = Vec::new();
        changes.extend(
            delta
                .removed
                .iter()
                .map(|(id, prev)| self.change(*id, &prev.definition, prev.count, 0)),
        );
        changes.extend(delta.updated);
        changes.extend(
            delta
                .added
                .iter()
                .map(|next| self.change(next.id, &next.definition, 0, next.count)),
        );

        let highest = snapshot.entries.iter().map(|entry| entry.id.0).max();
        self.entries = entries;
        if let Some(highest) = highest {
            self.next_instance = self.next_instance.max(highest + 1);
        }
        Ok(changes)
    }

    fn apply_op(
        &mut self,
        op: &EntryOp,
        oracle: &dyn ItemOracle,
    ) -> Result<StackChange, ReplicationError> {
        match op {
            EntryOp::Added {
                id,
                definition,
                count,
                stat_tags,
            } => {
                if self.position(*id).is_some() {
                    return Err(ReplicationError::DuplicateEntry(*id));
                }
                let entry = self.restore_entry(
                    &EntrySnapshot {
                        id: *id,
                        definition: definition.clone(),
                        count: *count,
                        stat_tags: stat_tags.clone(),
                    },
                    oracle,
                )?;
                self.entries.push(entry);
                self.next_instance = self.next_instance.max(id.0 + 1);
                Ok(self.change(*id, definition, 0, *count))
            }
            EntryOp::StackChanged { id, count } => {
                if *count == 0 {
                    return Err(ReplicationError::EmptyStack(*id));
                }
                let index = self
                    .position(*id)
                    .ok_or(ReplicationError::UnknownEntry(*id))?;
                let entry = &mut self.entries[index];
                let previous = entry.stack_count();
                entry.set_stack_count(*count);
                let key = entry.key().clone();
                Ok(self.change(*id, &key, previous, *count))
            }
            EntryOp::Removed { id } => {
                let index = self
                    .position(*id)
                    .ok_or(ReplicationError::UnknownEntry(*id))?;
                let removed = self.entries.remove(index);
                Ok(self.change(*id, removed.key(), removed.stack_count(), 0))
            }
        }
    }

    fn restore_entry(
        &self,
        entry: &EntrySnapshot,
        oracle: &dyn ItemOracle,
    ) -> Result<InventoryEntry, ReplicationError> {
        if entry.count == 0 {
            return Err(ReplicationError::EmptyStack(entry.id));
        }
        let definition =
            oracle
                .definition(&entry.definition)
                .ok_or_else(|| ReplicationError::UnknownDefinition {
                    id: entry.id,
                    definition: entry.definition.clone(),
                })?;
        let instance = ItemInstance::restore(entry.id, definition, entry.stat_tags.clone());
        Ok(InventoryEntry::new(instance, entry.count))
    }
}
