//! Common error infrastructure for arena-core.
//!
//! Domain-specific errors (e.g., `ActionError`, `EffectError`) are defined in
//! their respective modules alongside the operations they validate. This module
//! provides the shared classification they all implement.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each operation family has its own error type
//! - **Severity Classification**: Errors are categorized for recovery strategies
//! - **No Booleans**: Rejected operations always say why they were rejected

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: The caller may pick a different action and retry
/// - **Validation**: Invalid input that should be rejected without retry
/// - **Internal**: Unexpected state inconsistencies that require investigation
/// - **Fatal**: Unrecoverable errors indicating corrupted battle state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry with an alternative action.
    ///
    /// Examples: insufficient MP, skill on cooldown
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: attacking an ally, healing another creature with a normal heal
    Validation,

    /// Internal error - unexpected state inconsistency.
    Internal,

    /// Fatal error - battle cannot continue.
    ///
    /// Examples: no creature can ever reach a full gauge
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all arena-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
