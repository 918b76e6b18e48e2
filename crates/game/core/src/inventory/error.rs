use core::fmt;

use crate::error::{DomainError, ErrorSeverity};
use crate::types::{ActorId, InstanceId, ItemKey, NetRole};

/// Errors produced by inventory list mutations.
///
/// A returned error always means the list was left unchanged.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InventoryError {
    #[error("{0} not found")]
    NotFound(Missing),

    #[error("inventory of {owner} cannot be mutated by a {role} component")]
    Unauthorized { owner: ActorId, role: NetRole },

    #[error("invalid count {requested}: {problem}")]
    InvalidCount { requested: u32, problem: CountProblem },

    #[error("requested {requested} of `{definition}` but only {available} available")]
    InsufficientQuantity {
        definition: ItemKey,
        requested: u32,
        available: u64,
    },
}

/// What a `NotFound` error failed to find.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Missing {
    Definition(ItemKey),
    Entry(InstanceId),
}

impl fmt::Display for Missing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Missing::Definition(key) => write!(f, "item definition `{}`", key),
            Missing::Entry(id) => write!(f, "inventory entry {}", id),
        }
    }
}

/// Why a count was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CountProblem {
    /// Counts must be at least one.
    Zero,
    /// Removing more than the entry holds.
    ExceedsStack { available: u32 },
    /// The resulting stack would not fit the counter.
    Overflow,
}

impl fmt::Display for CountProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CountProblem::Zero => f.write_str("count must be at least 1"),
            CountProblem::ExceedsStack { available } => {
                write!(f, "entry only holds {}", available)
            }
            CountProblem::Overflow => f.write_str("stack count overflow"),
        }
    }
}

impl InventoryError {
    pub(crate) fn unknown_definition(key: &ItemKey) -> Self {
        Self::NotFound(Missing::Definition(key.clone()))
    }

    pub(crate) fn unknown_entry(id: InstanceId) -> Self {
        Self::NotFound(Missing::Entry(id))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl DomainError for InventoryError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InsufficientQuantity { .. } => ErrorSeverity::Recoverable,
            Self::NotFound(_) | Self::Unauthorized { .. } | Self::InvalidCount { .. } => {
                ErrorSeverity::Validation
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "inventory.not_found",
            Self::Unauthorized { .. } => "inventory.unauthorized",
            Self::InvalidCount { .. } => "inventory.invalid_count",
            Self::InsufficientQuantity { .. } => "inventory.insufficient_quantity",
        }
    }
}
