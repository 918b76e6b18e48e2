//! [`inventory_core::ItemOracle`] backed by an in-memory map.
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::sync::Arc;

use inventory_core::{ItemDefinition, ItemKey, ItemOracle};

use crate::api::RegistryError;

/// Item definition registry, populated once and read-only afterwards.
#[derive(Debug, Default)]
pub struct ItemRegistry {
    definitions: BTreeMap<ItemKey, Arc<ItemDefinition>>,
}

impl ItemRegistry {
    /// Builds the registry, rejecting duplicate keys.
    pub fn from_definitions(
        definitions: impl IntoIterator<Item = ItemDefinition>,
    ) -> Result<Self, RegistryError> {
        let mut map = BTreeMap::new();
        for definition in definitions {
            match map.entry(definition.key.clone()) {
                Entry::Occupied(_) => {
                    return Err(RegistryError::DuplicateDefinition(definition.key));
                }
                Entry::Vacant(slot) => {
                    slot.insert(Arc::new(definition));
                }
            }
        }

        tracing::info!(
            target: "runtime::oracle",
            definitions = map.len(),
            "item registry ready"
        );
        Ok(Self { definitions: map })
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Display name for `key`, falling back to the key itself.
    pub fn display_name<'a>(&'a self, key: &'a ItemKey) -> &'a str {
        self.definitions
            .get(key)
            .map_or(key.as_str(), |definition| definition.display_name.as_str())
    }
}

impl ItemOracle for ItemRegistry {
    fn definition(&self, key: &ItemKey) -> Option<Arc<ItemDefinition>> {
        self.definitions.get(key).cloned()
    }

    fn all_definitions(&self) -> Vec<Arc<ItemDefinition>> {
        self.definitions.values().cloned().collect()
    }
}
