use crate::error::{DomainError, ErrorSeverity};
use crate::types::{ActorId, InstanceId, ItemKey};

/// Errors raised while a replica applies authority state.
///
/// Application is atomic: on error the replica keeps its previous state.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ReplicationError {
    #[error("inventory of {owner} is authoritative and does not accept replicated state")]
    Unauthorized { owner: ActorId },

    #[error("replication payload for {received} delivered to inventory of {expected}")]
    OwnerMismatch { expected: ActorId, received: ActorId },

    #[error("replication gap: expected sequence {expected}, received {received}")]
    SequenceGap { expected: u64, received: u64 },

    #[error("replicated op references unknown entry {0}")]
    UnknownEntry(InstanceId),

    #[error("replicated entry {0} already exists")]
    DuplicateEntry(InstanceId),

    #[error("replicated entry {id} uses unregistered definition `{definition}`")]
    UnknownDefinition { id: InstanceId, definition: ItemKey },

    #[error("replicated entry {0} carries an empty stack")]
    EmptyStack(InstanceId),
}

impl DomainError for ReplicationError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::SequenceGap { .. } => ErrorSeverity::Recoverable,
            Self::Unauthorized { .. } => ErrorSeverity::Validation,
            Self::OwnerMismatch { .. }
            | Self::UnknownEntry(_)
            | Self::DuplicateEntry(_)
            | Self::UnknownDefinition { .. }
            | Self::EmptyStack(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized { .. } => "replication.unauthorized",
            Self::OwnerMismatch { .. } => "replication.owner_mismatch",
            Self::SequenceGap { .. } => "replication.sequence_gap",
            Self::UnknownEntry(_) => "replication.unknown_entry",
            Self::DuplicateEntry(_) => "replication.duplicate_entry",
            Self::UnknownDefinition { .. } => "replication.unknown_definition",
            Self::EmptyStack(_) => "replication.empty_stack",
        }
    }
}
