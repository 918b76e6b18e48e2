use crate::item::ItemInstance;
use crate::types::{InstanceId, ItemKey};

/// Row of an inventory list: an owned instance and its stack count.
///
/// The stack count is always mirrored into the instance's quantity stat tag,
/// so renderers can read it without knowing about entries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InventoryEntry {
    instance: ItemInstance,
    stack_count: u32,
}

impl InventoryEntry {
    pub(crate) fn new(mut instance: ItemInstance, stack_count: u32) -> Self {
        debug_assert!(stack_count >= 1, "entries hold at least one unit");
        instance.mirror_quantity(stack_count);
        Self {
            instance,
            stack_count,
        }
    }

    pub fn id(&self) -> InstanceId {
        self.instance.id()
    }

    pub fn key(&self) -> &ItemKey {
        self.instance.key()
    }

    pub fn instance(&self) -> &ItemInstance {
        &self.instance
    }

    pub fn stack_count(&self) -> u32 {
        self.stack_count
    }

    pub(crate) fn set_stack_count(&mut self, stack_count: u32) {
        debug_assert!(stack_count >= 1, "entries hold at least one unit");
        self.stack_count = stack_count;
        self.instance.mirror_quantity(stack_count);
    }
}
