//! Common error infrastructure for defense-core.
//!
//! The combat core degrades gracefully: almost nothing it does can fail, and
//! the few lookups that can (card tables, unit ids) report through typed errors
//! that callers log and skip. Domain-specific errors live next to the code that
//! produces them; this module only holds the shared classification.

use crate::unit::UnitId;

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the tick can continue, the offending input is skipped
/// - **Validation**: invalid input that should be rejected without retry
/// - **Internal**: unexpected state inconsistencies that require investigation
/// - **Fatal**: unrecoverable errors indicating corrupted simulation state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Skip the offending input and keep simulating.
    ///
    /// Examples: unknown card level, missing hazard target
    Recoverable,

    /// Invalid input, should not retry without changes.
    ///
    /// Examples: unparsable card table
    Validation,

    /// Unexpected state inconsistency.
    Internal,

    /// Simulation state corrupted, cannot continue.
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

/// Common trait for all defense-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Unit the error refers to, if any.
    fn unit(&self) -> Option<UnitId> {
        None
    }

    /// Returns a static string identifier for this error variant.
    ///
    /// Used as a structured field in log lines and in tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
