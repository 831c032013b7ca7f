//! Common error infrastructure for game-core.
//!
//! Domain-specific errors (`ActionError`, `SpellTableError`, `RosterError`)
//! live next to the code that raises them. This module holds what they share.
//!
//! None of these errors mutate state: every check runs before the resolver
//! touches a combatant, so a rejected action leaves the battle exactly as it was.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the same actor may pick another action this turn
/// - **Validation**: malformed input that should be fixed, not retried as-is
/// - **Internal**: an inconsistency between session and scheduler
/// - **Fatal**: data that cannot start a battle at all
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - retry with an alternative action.
    ///
    /// Examples: not enough willpower for the chosen spell
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: unknown spell, dead target
    Validation,

    /// Internal error - unexpected state inconsistency.
    Internal,

    /// Fatal error - the battle cannot be constructed or continued.
    ///
    /// Examples: empty roster side, malformed spell catalog
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

/// Common trait for all game-core errors.
///
/// Gives the runtime a uniform way to decide whether a rejected decision can
/// simply be asked for again.
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
