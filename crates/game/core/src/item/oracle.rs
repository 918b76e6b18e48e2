use std::sync::Arc;

use crate::inventory::{InventoryError, Missing};
use crate::types::ItemKey;

use super::definition::ItemDefinition;

/// Read-only source of item definitions.
///
/// Implementations are populated once during startup and never mutated
/// afterwards, so concurrent reads are always safe.
pub trait ItemOracle: Send + Sync {
    fn definition(&self, key: &ItemKey) -> Option<Arc<ItemDefinition>>;

    /// Returns all item definitions available in this oracle.
    fn all_definitions(&self) -> Vec<Arc<ItemDefinition>>;

    /// Resolves `key`, failing with `NotFound` when it is not registered.
    fn resolve(&self, key: &ItemKey) -> Result<Arc<ItemDefinition>, InventoryError> {
        self.definition(key)
            .ok_or_else(|| InventoryError::NotFound(Missing::Definition(key.clone())))
    }
}
