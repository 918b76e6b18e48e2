use std::sync::Arc;

use crate::item::{ItemDefinition, ItemInstance, ItemOracle};
use crate::types::{ActorId, InstanceId, ItemKey};

use super::change::StackChange;
use super::entry::InventoryEntry;
use super::error::{CountProblem, InventoryError};

/// Ordered entries possessed by one actor.
///
/// Entries keep insertion order, so the first matching entry is always the
/// oldest one. The list itself does not check authority; the component that
/// owns it does, before calling any mutating method.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InventoryList {
    pub(crate) owner: ActorId,
    pub(crate) entries: Vec<InventoryEntry>,
    pub(crate) next_instance: u64,
}

/// Where an accepted `add_entry` lands.
enum AddTarget {
    Merge { index: usize, new_count: u32 },
    Create,
}

impl InventoryList {
    pub fn new(owner: ActorId) -> Self {
        Self {
            owner,
            entries: Vec::new(),
            next_instance: 1,
        }
    }

    pub fn owner(&self) -> ActorId {
        self.owner
    }

    pub fn entries(&self) -> &[InventoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, id: InstanceId) -> Option<&InventoryEntry> {
        self.entries.iter().find(|entry| entry.id() == id)
    }

    pub fn instance(&self, id: InstanceId) -> Option<&ItemInstance> {
        self.entry(id).map(InventoryEntry::instance)
    }

    pub fn instances(&self) -> impl Iterator<Item = &ItemInstance> {
        self.entries.iter().map(InventoryEntry::instance)
    }

    /// Oldest entry holding `key`.
    pub fn find_first_by_definition(&self, key: &ItemKey) -> Option<&InventoryEntry> {
        self.entries.iter().find(|entry| entry.key() == key)
    }

    pub fn total_count_by_definition(&self, key: &ItemKey) -> u64 {
        self.entries
            .iter()
            .filter(|entry| entry.key() == key)
            .map(|entry| u64::from(entry.stack_count()))
            .sum()
    }

    /// Checks that `add_entry(key, count)` would succeed without applying it.
    pub fn can_add(
        &self,
        oracle: &dyn ItemOracle,
        key: &ItemKey,
        count: u32,
    ) -> Result<(), InventoryError> {
        self.plan_add(oracle, key, count).map(|_| ())
    }

    /// Adds `count` units of `key`, merging into the oldest matching entry
    /// when the definition is stackable.
    pub fn add_entry(
        &mut self,
        oracle: &dyn ItemOracle,
        key: &ItemKey,
        count: u32,
    ) -> Result<StackChange, InventoryError> {
        let (definition, target) = self.plan_add(oracle, key, count)?;

        match target {
            AddTarget::Merge { index, new_count } => {
                let entry = &mut self.entries[index];
                let previous = entry.stack_count();
                entry.set_stack_count(new_count);
                let id = entry.id();
                Ok(self.change(id, key, previous, new_count))
            }
            AddTarget::Create => {
                let id = self.allocate_id();
                let instance = ItemInstance::create(id, definition);
                self.entries.push(InventoryEntry::new(instance, count));
                Ok(self.change(id, key, 0, count))
            }
        }
    }

    /// Removes `count` units from one entry, deleting it (and its instance)
    /// when the stack reaches zero.
    pub fn remove_entry(
        &mut self,
        id: InstanceId,
        count: u32,
    ) -> Result<StackChange, InventoryError> {
        let index = self
            .position(id)
            .ok_or_else(|| InventoryError::unknown_entry(id))?;
        if count == 0 {
            return Err(InventoryError::InvalidCount {
                requested: count,
                problem: CountProblem::Zero,
            });
        }

        let previous = self.entries[index].stack_count();
        if count > previous {
            return Err(InventoryError::InvalidCount {
                requested: count,
                problem: CountProblem::ExceedsStack {
                    available: previous,
                },
            });
        }

        let key = self.entries[index].key().clone();
        let new_count = previous - count;
        if new_count == 0 {
            self.entries.remove(index);
        } else {
            self.entries[index].set_stack_count(new_count);
        }

        Ok(self.change(id, &key, previous, new_count))
    }

    /// Removes `count` units of `key` across matching entries, oldest first.
    ///
    /// All or nothing: when fewer than `count` units are held the list is left
    /// untouched. Returns one change per affected entry.
    pub fn consume_by_definition(
        &mut self,
        key: &ItemKey,
        count: u32,
    ) -> Result<Vec<StackChange>, InventoryError> {
        if count == 0 {
            return Err(InventoryError::InvalidCount {
                requested: count,
                problem: CountProblem::Zero,
            });
        }

        let available = self.total_count_by_definition(key);
        if available < u64::from(count) {
            return Err(InventoryError::InsufficientQuantity {
                definition: key.clone(),
                requested: count,
                available,
            });
        }

        let mut remaining = count;
        let mut plan = Vec::new();
        for entry in self.entries.iter().filter(|entry| entry.key() == key) {
            if remaining == 0 {
                break;
            }
            let take = remaining.min(entry.stack_count());
            plan.push((entry.id(), take));
            remaining -= take;
        }

        plan.into_iter()
            .map(|(id, take)| self.remove_entry(id, take))
            .collect()
    }

    pub(crate) fn position(&self, id: InstanceId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id() == id)
    }

    pub(crate) fn change(
        &self,
        entry: InstanceId,
        key: &ItemKey,
        previous_count: u32,
        new_count: u32,
    ) -> StackChange {
        StackChange {
            owner: self.owner,
            entry,
            definition: key.clone(),
            previous_count,
            new_count,
        }
    }

    fn allocate_id(&mut self) -> InstanceId {
        let id = InstanceId(self.next_instance);
        self.next_instance += 1;
        id
    }

    fn plan_add(
        &self,
        oracle: &dyn ItemOracle,
        key: &ItemKey,
        count: u32,
    ) -> Result<(Arc<ItemDefinition>, AddTarget), InventoryError> {
        if count == 0 {
            return Err(InventoryError::InvalidCount {
                requested: count,
                problem: CountProblem::Zero,
            });
        }

        let definition = oracle.resolve(key)?;
        if !definition.stackable {
            return Ok((definition, AddTarget::Create));
        }

        let Some(index) = self.entries.iter().position(|entry| entry.key() == key) else {
            return Ok((definition, AddTarget::Create));
        };

        let new_count = self.entries[index]
            .stack_count()
            .checked_add(count)
            .ok_or(InventoryError::InvalidCount {
                requested: count,
                problem: CountProblem::Overflow,
            })?;

        Ok((definition, AddTarget::Merge { index, new_count }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::Missing;
    use crate::inventory::fixtures::TestItems;
    use crate::item::StatTags;

    const PLAYER: ActorId = ActorId(1);

    fn key(name: &str) -> ItemKey {
        ItemKey::new(name)
    }

    #[test]
    fn stackable_adds_merge_into_one_entry() {
        let items = TestItems::standard();
        let mut list = InventoryList::new(PLAYER);

        let first = list.add_entry(&items, &key("Rock"), 1).unwrap();
        let second = list.add_entry(&items, &key("Rock"), 2).unwrap();

        assert_eq!(list.len(), 1);
        assert_eq!(first.counts(), (0, 1));
        assert_eq!(second.counts(), (1, 3));
        assert_eq!(first.entry, second.entry);
        assert_eq!(list.entries()[0].stack_count(), 3);
    }

    #[test]
    fn stack_count_is_mirrored_into_quantity_tag() {
        let items = TestItems::standard();
        let mut list = InventoryList::new(PLAYER);

        let change = list.add_entry(&items, &key("Rock"), 4).unwrap();
        list.remove_entry(change.entry, 1).unwrap();

        let instance = list.instance(change.entry).unwrap();
        assert_eq!(instance.stat(StatTags::QUANTITY), 3);
        assert_eq!(instance.quantity(), 3);
    }

    #[test]
    fn unique_items_create_separate_entries_and_run_hooks() {
        let items = TestItems::standard();
        let mut list = InventoryList::new(PLAYER);

        let a = list.add_entry(&items, &key("Sword"), 1).unwrap();
        let b = list.add_entry(&items, &key("Sword"), 1).unwrap();

        assert_ne!(a.entry, b.entry);
        assert_eq!(list.len(), 2);
        assert_eq!(list.instance(a.entry).unwrap().stat("durability"), 100);
        assert_eq!(list.total_count_by_definition(&key("Sword")), 2);
    }

    #[test]
    fn add_rejects_unknown_definition_and_zero_count() {
        let items = TestItems::standard();
        let mut list = InventoryList::new(PLAYER);

        let err = list.add_entry(&items, &key("Dragon"), 1).unwrap_err();
        assert_eq!(err, InventoryError::NotFound(Missing::Definition(key("Dragon"))));

        let err = list.add_entry(&items, &key("Rock"), 0).unwrap_err();
        assert!(matches!(
            err,
            InventoryError::InvalidCount {
                problem: CountProblem::Zero,
                ..
            }
        ));
        assert!(list.is_empty());
    }

    #[test]
    fn add_rejects_overflow_without_mutating() {
        let items = TestItems::standard();
        let mut list = InventoryList::new(PLAYER);
        list.add_entry(&items, &key("Rock"), u32::MAX).unwrap();

        let err = list.add_entry(&items, &key("Rock"), 1).unwrap_err();
        assert!(matches!(
            err,
            InventoryError::InvalidCount {
                problem: CountProblem::Overflow,
                ..
            }
        ));
        assert_eq!(list.entries()[0].stack_count(), u32::MAX);
    }

    #[test]
    fn remove_to_zero_deletes_entry() {
        let items = TestItems::standard();
        let mut list = InventoryList::new(PLAYER);
        let added = list.add_entry(&items, &key("Potion"), 2).unwrap();

        let change = list.remove_entry(added.entry, 2).unwrap();
        assert_eq!(change.counts(), (2, 0));
        assert!(change.is_removal());
        assert!(list.entry(added.entry).is_none());
    }

    #[test]
    fn remove_validates_entry_and_count() {
        let items = TestItems::standard();
        let mut list = InventoryList::new(PLAYER);
        let added = list.add_entry(&items, &key("Potion"), 2).unwrap();

        let err = list.remove_entry(InstanceId(99), 1).unwrap_err();
        assert!(err.is_not_found());

        let err = list.remove_entry(added.entry, 3).unwrap_err();
        assert_eq!(
            err,
            InventoryError::InvalidCount {
                requested: 3,
                problem: CountProblem::ExceedsStack { available: 2 },
            }
        );
        assert_eq!(list.entry(added.entry).unwrap().stack_count(), 2);
    }

    #[test]
    fn consume_insufficient_leaves_state_unchanged() {
        let items = TestItems::standard();
        let mut list = InventoryList::new(PLAYER);
        list.add_entry(&items, &key("Rock"), 3).unwrap();
        let before = list.clone();

        let err = list.consume_by_definition(&key("Rock"), 5).unwrap_err();
        assert_eq!(
            err,
            InventoryError::InsufficientQuantity {
                definition: key("Rock"),
                requested: 5,
                available: 3,
            }
        );
        assert_eq!(list, before);
        assert_eq!(list.entries()[0].stack_count(), 3);
    }

    #[test]
    fn consume_spans_entries_oldest_first() {
        let items = TestItems::standard();
        let mut list = InventoryList::new(PLAYER);
        let first = list.add_entry(&items, &key("Sword"), 1).unwrap().entry;
        let second = list.add_entry(&items, &key("Sword"), 1).unwrap().entry;
        let third = list.add_entry(&items, &key("Sword"), 1).unwrap().entry;

        let changes = list.consume_by_definition(&key("Sword"), 2).unwrap();

        let touched: Vec<_> = changes.iter().map(|c| (c.entry, c.counts())).collect();
        assert_eq!(touched, vec![(first, (1, 0)), (second, (1, 0))]);
        assert_eq!(list.len(), 1);
        assert!(list.entry(third).is_some());
    }

    #[test]
    fn consume_partially_drains_oldest_stack() {
        let items = TestItems::standard();
        let mut list = InventoryList::new(PLAYER);
        let rock = list.add_entry(&items, &key("Rock"), 5).unwrap().entry;

        let changes = list.consume_by_definition(&key("Rock"), 2).unwrap();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].counts(), (5, 3));
        assert_eq!(list.entry(rock).unwrap().stack_count(), 3);
    }

    #[test]
    fn entry_ids_are_never_reused() {
        let items = TestItems::standard();
        let mut list = InventoryList::new(PLAYER);
        let first = list.add_entry(&items, &key("Rock"), 1).unwrap().entry;
        list.remove_entry(first, 1).unwrap();

        let again = list.add_entry(&items, &key("Rock"), 1).unwrap().entry;
        assert_ne!(first, again);
    }

    /// Totals always equal added minus removed, over a long pseudo-random run.
    #[test]
    fn totals_track_adds_minus_removes() {
        let items = TestItems::standard();
        let mut list = InventoryList::new(PLAYER);
        let keys = [key("Rock"), key("Sword"), key("Potion")];
        let mut expected = [0u64; 3];
        let mut seed: u64 = 0x2545_f491_4f6c_dd1d;

        for _ in 0..500 {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let which = (seed >> 33) as usize % keys.len();
            let amount = ((seed >> 40) % 4) as u32 + 1;

            if seed & 1 == 0 {
                let change = list.add_entry(&items, &keys[which], amount).unwrap();
                assert_eq!(change.delta(), i64::from(amount));
                expected[which] += u64::from(amount);
            } else if let Some(entry) = list.find_first_by_definition(&keys[which]) {
                let id = entry.id();
                let take = amount.min(entry.stack_count());
                let change = list.remove_entry(id, take).unwrap();
                assert_eq!(change.delta(), -i64::from(take));
                expected[which] -= u64::from(take);
            }

            for (index, key) in keys.iter().enumerate() {
                assert_eq!(list.total_count_by_definition(key), expected[index]);
            }
            assert!(list.entries().iter().all(|entry| entry.stack_count() >= 1));
        }
    }
}
