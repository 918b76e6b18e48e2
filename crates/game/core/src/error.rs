//! Common error infrastructure for inventory-core.
//!
//! Domain-specific errors (`InventoryError`, `ReplicationError`, `PickupError`)
//! live next to the operations they validate. This module only provides the
//! shared classification used by callers to pick a recovery strategy.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each subsystem has its own error enum with specific variants
//! - **No partial application**: A returned error means state was left untouched
//! - **Severity Classification**: Errors are categorized for logging and recovery

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: The same request may succeed later (e.g. more items arrive)
/// - **Validation**: Invalid input that should be rejected without retry
/// - **Internal**: Unexpected state inconsistencies that require investigation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry once the world changes.
    ///
    /// Examples: not enough items to consume, replication diff arrived early
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: unknown definition, zero count, mutation from a replica
    Validation,

    /// Internal error - unexpected state inconsistency.
    ///
    /// Examples: replica received a diff for another owner, duplicate entry ids
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all inventory-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait DomainError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Useful for error categorization, metrics and assertions in tests.
    fn error_code(&self) -> &'static str;
}
