//! Error types for rule registration, rule application and configuration.
//!
//! Registration errors are fatal at startup. Rule errors never escape a
//! dispatch: the dispatcher logs them and skips the failing rule.

use crate::id::RuleId;
use thiserror::Error;

/// Errors raised while building a rule registry.
///
/// # Examples
///
/// ```rust
/// use ascension::{RegistryError, RuleId};
///
/// let err = RegistryError::DuplicateId(RuleId::new("card_price_up"));
/// assert_eq!(err.to_string(), "Duplicate rule id: card_price_up");
/// ```
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RegistryError {
    /// A rule with the same id is already registered.
    #[error("Duplicate rule id: {0}")]
    DuplicateId(RuleId),
}

/// Errors raised by a single rule's predicate or transform.
///
/// The dispatcher pairs these with the failing rule's id when it logs them.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RuleError {
    /// The transform received an entity of a kind it cannot handle.
    #[error("expected a {expected} entity, found {found}")]
    EntityMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// A damage transform ran against a monster without a damage list.
    #[error("monster has no damage list")]
    MissingDamage,

    /// The transformed value does not fit in the host's integer range.
    #[error("value overflowed the integer range")]
    Overflow,

    /// Failure reported by a host-supplied transform.
    #[error("{0}")]
    Custom(String),

    /// A predicate or transform panicked. Holds the panic message.
    #[error("rule panicked: {0}")]
    Panicked(String),
}

/// Errors raised while loading difficulty configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration document could not be parsed.
    #[error("Invalid difficulty configuration: {0}")]
    Parse(#[from] serde_json::Error),
}
