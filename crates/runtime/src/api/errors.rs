//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from the inventory core, replication and the item registry
//! so hosts can bubble them up with consistent context.
use thiserror::Error;

use inventory_core::{
    ActorId, DomainError, ErrorSeverity, InventoryError, ItemKey, PickupError, ReplicationError,
};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Inventory(#[from] InventoryError),

    #[error(transparent)]
    Replication(#[from] ReplicationError),

    #[error(transparent)]
    Pickup(#[from] PickupError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("replication payload codec failed")]
    Codec(#[source] bincode::Error),

    #[error("session requires an item registry before building")]
    MissingRegistry,

    #[error("no inventory registered for {0}")]
    UnknownInventory(ActorId),

    #[error("inventory for {0} already exists")]
    DuplicateInventory(ActorId),

    #[error("{collector} cannot collect into the inventory of {owner}")]
    CollectorMismatch { collector: ActorId, owner: ActorId },
}

impl RuntimeError {
    /// Severity of the underlying failure, used to pick a log level.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Inventory(e) => e.severity(),
            Self::Replication(e) => e.severity(),
            Self::Pickup(e) => e.severity(),
            Self::Registry(_) | Self::MissingRegistry => ErrorSeverity::Internal,
            Self::Codec(_) => ErrorSeverity::Internal,
            Self::UnknownInventory(_)
            | Self::DuplicateInventory(_)
            | Self::CollectorMismatch { .. } => ErrorSeverity::Validation,
        }
    }
}

impl From<bincode::Error> for RuntimeError {
    fn from(error: bincode::Error) -> Self {
        Self::Codec(error)
    }
}

/// Errors raised while building the item registry.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("item definition `{0}` registered twice")]
    DuplicateDefinition(ItemKey),
}
