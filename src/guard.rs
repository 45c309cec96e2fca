//! Application guard module.
//!
//! Some host events may fire more than once for the same entity instance.
//! The guard remembers which idempotency-scoped rules already ran against
//! which entity so that compounding bonuses are applied once per run.

use crate::id::{EntityId, RuleId};
use std::collections::{HashMap, HashSet};

/// Per-entity record of applied idempotency-scoped rules.
///
/// Unknown identities always read as "not yet applied".
///
/// # Examples
///
/// ```rust
/// use ascension::{ApplicationGuard, EntityId, RuleId};
///
/// let mut guard = ApplicationGuard::new();
/// let rule = RuleId::new("elite_flat_health");
///
/// assert!(!guard.has_applied(EntityId(1), &rule));
/// guard.mark_applied(EntityId(1), rule.clone());
/// assert!(guard.has_applied(EntityId(1), &rule));
/// assert!(!guard.has_applied(EntityId(2), &rule));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ApplicationGuard {
    applied: HashMap<EntityId, HashSet<RuleId>>,
}

impl ApplicationGuard {
    /// Create an empty guard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `rule` already ran against `entity` this run.
    pub fn has_applied(&self, entity: EntityId, rule: &RuleId) -> bool {
        self.applied
            .get(&entity)
            .is_some_and(|rules| rules.contains(rule))
    }

    /// Record that `rule` ran against `entity`.
    pub fn mark_applied(&mut self, entity: EntityId, rule: RuleId) {
        self.applied.entry(entity).or_default().insert(rule);
    }

    /// Drop every entry for an entity the host destroyed.
    pub fn forget(&mut self, entity: EntityId) {
        self.applied.remove(&entity);
    }

    /// Drop every entry. Called at run boundaries.
    pub fn clear(&mut self) {
        self.applied.clear();
    }

    /// Number of entities with at least one recorded application.
    pub fn tracked_entities(&self) -> usize {
        self.applied.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rules_are_tracked_separately() {
        let mut guard = ApplicationGuard::new();
        let flat = RuleId::new("elite_flat_health");
        let pct = RuleId::new("non_boss_health_up");

        guard.mark_applied(EntityId(3), flat.clone());
        assert!(guard.has_applied(EntityId(3), &flat));
        assert!(!guard.has_applied(EntityId(3), &pct));
    }

    #[test]
    fn test_forget_entity() {
        let mut guard = ApplicationGuard::new();
        let rule = RuleId::new("monster_health_up");
        guard.mark_applied(EntityId(1), rule.clone());
        guard.mark_applied(EntityId(2), rule.clone());

        guard.forget(EntityId(1));
        assert!(!guard.has_applied(EntityId(1), &rule));
        assert!(guard.has_applied(EntityId(2), &rule));
        assert_eq!(guard.tracked_entities(), 1);
    }

    #[test]
    fn test_clear() {
        let mut guard = ApplicationGuard::new();
        guard.mark_applied(EntityId(1), RuleId::new("boss_health_up"));
        guard.clear();
        assert_eq!(guard.tracked_entities(), 0);
    }

    #[test]
    fn test_forget_unknown_is_noop() {
        let mut guard = ApplicationGuard::new();
        guard.forget(EntityId(99));
        assert_eq!(guard.tracked_entities(), 0);
    }
}
