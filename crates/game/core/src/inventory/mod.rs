//! Inventory list state machine.
//!
//! [`InventoryList`] is the bookkeeping for one actor's possessed items. Every
//! mutation, authoritative or replica-applied, returns the [`StackChange`]
//! records describing its net effect so the owner can publish them from a
//! single place.

mod change;
mod entry;
mod error;
mod list;

pub use change::StackChange;
pub use entry::InventoryEntry;
pub use error::{CountProblem, InventoryError, Missing};
pub use list::InventoryList;

#[cfg(test)]
pub(crate) mod fixtures {
    use std::collections::BTreeMap;
    use std::sync::Arc;

    use crate::item::{IconFragment, ItemDefinition, ItemOracle, SetStatsFragment};
    use crate::types::ItemKey;

    /// In-memory oracle for unit tests.
    pub struct TestItems(BTreeMap<ItemKey, Arc<ItemDefinition>>);

    impl TestItems {
        pub fn new(definitions: impl IntoIterator<Item = ItemDefinition>) -> Self {
            Self(
                definitions
                    .into_iter()
                    .map(|def| (def.key.clone(), Arc::new(def)))
                    .collect(),
            )
        }

        /// Rock (stackable), Sword (unique, with durability) and Potion (stackable).
        pub fn standard() -> Self {
            Self::new([
                ItemDefinition::new("Rock", "Rock").with_fragment(IconFragment {
                    brush: "icons/rock.png".into(),
                }),
                ItemDefinition::new("Sword", "Iron Sword")
                    .with_stackable(false)
                    .with_fragment(SetStatsFragment::default().with_stat("durability", 100)),
                ItemDefinition::new("Potion", "Health Potion"),
            ])
        }
    }

    impl ItemOracle for TestItems {
        fn definition(&self, key: &ItemKey) -> Option<Arc<ItemDefinition>> {
            self.0.get(key).cloned()
        }

        fn all_definitions(&self) -> Vec<Arc<ItemDefinition>> {
            self.0.values().cloned().collect()
        }
    }
}
