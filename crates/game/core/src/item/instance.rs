use std::sync::Arc;

use crate::types::{InstanceId, ItemKey};

use super::definition::ItemDefinition;
use super::fragment::{FragmentHook, FragmentVariant};
use super::stat_tags::StatTags;

/// One concrete possessed stack of an item.
///
/// Owned by the inventory entry that created it. The definition is shared
/// and read-only; the stat tags are the instance's own mutable state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemInstance {
    id: InstanceId,
    definition: Arc<ItemDefinition>,
    stat_tags: StatTags,
}

impl ItemInstance {
    /// Builds a fresh instance and runs every fragment's creation hook once,
    /// in declaration order.
    pub fn create(id: InstanceId, definition: Arc<ItemDefinition>) -> Self {
        let mut instance = Self {
            id,
            definition: Arc::clone(&definition),
            stat_tags: StatTags::new(),
        };
        for fragment in &definition.fragments {
            fragment.on_instance_created(&mut instance);
        }
        instance
    }

    /// Rebuilds an instance whose state was derived elsewhere (on the
    /// authority). Creation hooks are not run again.
    pub fn restore(id: InstanceId, definition: Arc<ItemDefinition>, stat_tags: StatTags) -> Self {
        Self {
            id,
            definition,
            stat_tags,
        }
    }

    pub fn id(&self) -> InstanceId {
        self.id
    }

    pub fn definition(&self) -> &Arc<ItemDefinition> {
        &self.definition
    }

    pub fn key(&self) -> &ItemKey {
        &self.definition.key
    }

    pub fn stat_tags(&self) -> &StatTags {
        &self.stat_tags
    }

    pub fn stat_tags_mut(&mut self) -> &mut StatTags {
        &mut self.stat_tags
    }

    pub fn stat(&self, tag: &str) -> i64 {
        self.stat_tags.get(tag)
    }

    /// Stack count as mirrored into the reserved quantity tag.
    pub fn quantity(&self) -> u32 {
        u32::try_from(self.stat_tags.get(StatTags::QUANTITY)).unwrap_or(u32::MAX)
    }

    pub fn fragment<T: FragmentVariant>(&self) -> Option<&T> {
        self.definition.fragment::<T>()
    }

    pub(crate) fn mirror_quantity(&mut self, count: u32) {
        self.stat_tags.set(StatTags::QUANTITY, i64::from(count));
    }
}
