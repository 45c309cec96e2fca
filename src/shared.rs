//! Shared cross-rule state.
//!
//! A small table of named integers written by rules and read by the host's
//! own systems (for example room selection). Writes overwrite; the last
//! writer in a run wins.

use crate::id::SharedKey;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Name of the elite-replacement probability read by room selection.
pub const SPECIAL_BATTLE_CHANCE: &str = "specialBattleChance";

/// Named values shared between rules and the host.
///
/// # Examples
///
/// ```rust
/// use ascension::{SharedKey, SharedState};
///
/// let mut shared = SharedState::new();
/// let key = SharedKey::new("specialBattleChance");
///
/// shared.set(key.clone(), 10);
/// shared.set(key.clone(), 20);
/// assert_eq!(shared.get(&key), Some(20));
/// assert_eq!(shared.get(&SharedKey::new("missing")), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SharedState {
    values: HashMap<SharedKey, i64>,
}

impl SharedState {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite a value.
    pub fn set(&mut self, key: impl Into<SharedKey>, value: i64) {
        self.values.insert(key.into(), value);
    }

    /// Read a value, `None` if nothing wrote it this run.
    pub fn get(&self, key: &SharedKey) -> Option<i64> {
        self.values.get(key).copied()
    }

    /// Whether anything wrote `key` this run.
    pub fn contains_key(&self, key: &SharedKey) -> bool {
        self.values.contains_key(key)
    }

    /// Remove every value. Called at run boundaries.
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Number of values written this run.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether nothing was written this run.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overwrite_not_accumulate() {
        let mut shared = SharedState::new();
        shared.set(SPECIAL_BATTLE_CHANCE, 20);
        shared.set(SPECIAL_BATTLE_CHANCE, 20);
        assert_eq!(shared.get(&SharedKey::new(SPECIAL_BATTLE_CHANCE)), Some(20));
        assert_eq!(shared.len(), 1);
    }

    #[test]
    fn test_clear() {
        let mut shared = SharedState::new();
        shared.set("a", 1);
        shared.clear();
        assert!(shared.is_empty());
        assert!(!shared.contains_key(&SharedKey::new("a")));
    }

    #[test]
    fn test_snapshot_json() {
        let mut shared = SharedState::new();
        shared.set(SPECIAL_BATTLE_CHANCE, 20);
        let json = serde_json::to_value(&shared).unwrap();
        assert_eq!(json["values"][SPECIAL_BATTLE_CHANCE], 20);
    }
}
