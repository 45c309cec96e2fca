//! Rule registry module.
//!
//! Provides `RuleRegistry`, the ordered collection of all modifier rules,
//! indexed by event kind. Each per-event list is kept sorted by threshold
//! ascending, ties in registration order.

use crate::entity::EventKind;
use crate::error::RegistryError;
use crate::id::RuleId;
use crate::rule::ModifierRule;
use std::collections::{HashMap, HashSet};

/// Ordered, event-indexed collection of modifier rules.
///
/// # Examples
///
/// ```rust
/// use ascension::{EventKind, ModifierRule, RegistryError, RuleRegistry};
/// use ascension::transform::RaisePurgeCost;
///
/// let purge = |id: &str, level: u8| {
///     ModifierRule::new(id, level, EventKind::ShopInit, RaisePurgeCost::new(25))
/// };
///
/// let mut registry = RuleRegistry::new();
/// registry.register(purge("late", 54))?;
/// registry.register(purge("early", 23))?;
///
/// let order: Vec<&str> = registry
///     .rules_for(EventKind::ShopInit)
///     .iter()
///     .map(|r| r.id().as_str())
///     .collect();
/// assert_eq!(order, vec!["early", "late"]);
///
/// let dup = registry.register(purge("early", 1));
/// assert!(matches!(dup, Err(RegistryError::DuplicateId(_))));
/// # Ok::<(), RegistryError>(())
/// ```
#[derive(Debug, Default)]
pub struct RuleRegistry {
    by_event: HashMap<EventKind, Vec<ModifierRule>>,
    ids: HashSet<RuleId>,
}

impl RuleRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a list of rules, failing on the first duplicate id.
    pub fn from_rules(
        rules: impl IntoIterator<Item = ModifierRule>,
    ) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for rule in rules {
            registry.register(rule)?;
        }
        Ok(registry)
    }

    /// Register a rule.
    ///
    /// The rule is inserted after every rule of the same event whose
    /// threshold is lower or equal, which keeps ties in registration order.
    pub fn register(&mut self, rule: ModifierRule) -> Result<(), RegistryError> {
        if self.ids.contains(rule.id()) {
            return Err(RegistryError::DuplicateId(rule.id().clone()));
        }
        self.ids.insert(rule.id().clone());

        tracing::debug!(
            rule = %rule.id(),
            min_level = rule.min_level(),
            event = %rule.event(),
            "registered rule"
        );

        let rules = self.by_event.entry(rule.event()).or_default();
        let at = rules.partition_point(|r| r.min_level() <= rule.min_level());
        rules.insert(at, rule);
        Ok(())
    }

    /// All rules for `event`, threshold ascending.
    pub fn rules_for(&self, event: EventKind) -> &[ModifierRule] {
        self.by_event.get(&event).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether a rule with this id is registered.
    pub fn contains(&self, id: &RuleId) -> bool {
        self.ids.contains(id)
    }

    /// Total number of registered rules.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether no rule is registered.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Event kinds that have at least one rule, in `EventKind` order.
    pub fn event_kinds(&self) -> Vec<EventKind> {
        EventKind::ALL
            .into_iter()
            .filter(|kind| !self.rules_for(*kind).is_empty())
            .collect()
    }

    /// Every registered rule, grouped by event kind then threshold.
    pub fn iter(&self) -> impl Iterator<Item = &ModifierRule> {
        EventKind::ALL
            .into_iter()
            .flat_map(move |kind| self.rules_for(kind).iter())
    }
}
