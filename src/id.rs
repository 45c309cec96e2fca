//! Identifier module.
//!
//! Provides the identifier types used across the engine:
//! - `RuleId` and `SharedKey`, interned string identifiers backed by `Arc<str>`
//! - `EntityId`, the opaque identity token a host hands out per entity instance

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::sync::Arc;

macro_rules! interned_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
        pub struct $name(Arc<str>);

        impl $name {
            /// Create a new identifier from a string slice.
            pub fn new(s: &str) -> Self {
                Self(Arc::from(s))
            }

            /// Get the string representation of this identifier.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(Arc::from(s))
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                self.0.as_ref().serialize(serializer)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                Ok(Self::from(s))
            }
        }
    };
}

interned_id!(
    /// Unique identifier of a modifier rule.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ascension::RuleId;
    ///
    /// let id: RuleId = "card_price_up".into();
    /// assert_eq!(id.as_str(), "card_price_up");
    /// assert_eq!(id, RuleId::new("card_price_up"));
    /// ```
    RuleId
);

interned_id!(
    /// Name of a value in the shared cross-rule table.
    SharedKey
);

/// Stable identity of one host entity instance.
///
/// Two monsters with identical stats still carry different `EntityId`s.
/// The engine never inspects the number; it only compares tokens.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u64);

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
