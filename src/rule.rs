//! Modifier rule module.
//!
//! A `ModifierRule` is the declarative unit of the engine: a threshold, the
//! event it listens to, a predicate, a transform, and an idempotency scope.
//! Rules are immutable once built.

use crate::entity::{Entity, EventKind};
use crate::error::RuleError;
use crate::id::RuleId;
use crate::predicate::{self, Predicate};
use crate::transform::{Mutation, RuleTransform};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

/// Whether re-applying a rule to the same entity must be prevented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum IdempotencyScope {
    /// Safe to apply every time the event fires.
    #[default]
    None,
    /// Applied at most once per entity identity for the current run.
    PerEntityPerRun,
}

/// A threshold-gated rule bound to one event kind.
///
/// # Examples
///
/// ```rust
/// use ascension::{EventKind, IdempotencyScope, ModifierRule};
/// use ascension::entity::MonsterCategory;
/// use ascension::numeric::Scale;
/// use ascension::predicate::monster_in;
/// use ascension::transform::ScaleHealth;
///
/// let rule = ModifierRule::new(
///     "boss_health_up",
///     36,
///     EventKind::MonsterInit,
///     ScaleHealth::new(Scale::percent(110)),
/// )
/// .when(monster_in(&[MonsterCategory::Boss]))
/// .guarded();
///
/// assert_eq!(rule.min_level(), 36);
/// assert_eq!(rule.scope(), IdempotencyScope::PerEntityPerRun);
/// assert_eq!(rule.describe(), "[36] boss_health_up: health ×1.10 on MonsterInit");
/// ```
pub struct ModifierRule {
    id: RuleId,
    min_level: u8,
    event: EventKind,
    predicate: Predicate,
    transform: Box<dyn RuleTransform>,
    scope: IdempotencyScope,
}

impl ModifierRule {
    /// Create a rule that matches every entity of its event and is not guarded.
    pub fn new(
        id: impl Into<RuleId>,
        min_level: u8,
        event: EventKind,
        transform: impl RuleTransform + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            min_level,
            event,
            predicate: predicate::always(),
            transform: Box::new(transform),
            scope: IdempotencyScope::None,
        }
    }

    /// Restrict the rule to entities matching `predicate`.
    pub fn when(mut self, predicate: Predicate) -> Self {
        self.predicate = predicate;
        self
    }

    /// Mark the rule as applying at most once per entity per run.
    pub fn guarded(mut self) -> Self {
        self.scope = IdempotencyScope::PerEntityPerRun;
        self
    }

    /// Get the rule's unique id.
    pub fn id(&self) -> &RuleId {
        &self.id
    }

    /// Get the lowest ascension level at which the rule applies.
    pub fn min_level(&self) -> u8 {
        self.min_level
    }

    /// Get the event kind the rule listens to.
    pub fn event(&self) -> EventKind {
        self.event
    }

    /// Get the rule's idempotency scope.
    pub fn scope(&self) -> IdempotencyScope {
        self.scope
    }

    /// Whether the rule's predicate accepts `entity`.
    ///
    /// A panicking predicate is caught and reported as
    /// [`RuleError::Panicked`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::sync::Arc;
    /// use ascension::{Entity, EventKind, ModifierRule, RuleError};
    /// use ascension::entity::Shop;
    /// use ascension::transform::RaisePurgeCost;
    ///
    /// let rule = ModifierRule::new("purge", 23, EventKind::ShopInit, RaisePurgeCost::new(25))
    ///     .when(Arc::new(|entity: &Entity| entity.as_monster().unwrap().max_health > 0));
    ///
    /// let shop = Entity::Shop(Shop { purge_cost: 75 });
    /// assert!(matches!(rule.matches(&shop), Err(RuleError::Panicked(_))));
    /// ```
    pub fn matches(&self, entity: &Entity) -> Result<bool, RuleError> {
        contain(|| Ok((self.predicate)(entity)))
    }

    /// Run the rule's transform against `entity`.
    ///
    /// A panicking transform is caught and reported as
    /// [`RuleError::Panicked`].
    pub fn transform(&self, entity: &Entity) -> Result<Mutation, RuleError> {
        contain(|| self.transform.apply(entity))
    }

    /// Description of the rule's transform.
    pub fn description(&self) -> String {
        self.transform.description()
    }

    /// One-line summary: threshold, id, effect and event.
    pub fn describe(&self) -> String {
        format!(
            "[{}] {}: {} on {}",
            self.min_level,
            self.id,
            self.transform.description(),
            self.event
        )
    }
}

/// Run `f`, turning a panic into `RuleError::Panicked`.
///
/// Predicates and transforms only read the entity they are given, so no
/// shared state is left half-written when one unwinds.
fn contain<T>(f: impl FnOnce() -> Result<T, RuleError>) -> Result<T, RuleError> {
    panic::catch_unwind(AssertUnwindSafe(f)).unwrap_or_else(|payload| {
        Err(RuleError::Panicked(panic_message(payload.as_ref())))
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

impl fmt::Debug for ModifierRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModifierRule")
            .field("id", &self.id)
            .field("min_level", &self.min_level)
            .field("event", &self.event)
            .field("transform", &self.transform.description())
            .field("scope", &self.scope)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Monster, MonsterCategory, Shop};
    use crate::predicate::monster_in;
    use crate::transform::{FnTransform, RaiseDamage, RaisePurgeCost};
    use std::sync::Arc;

    #[test]
    fn test_defaults() {
        let rule =
            ModifierRule::new("purge_cost_up", 23, EventKind::ShopInit, RaisePurgeCost::new(25));
        assert_eq!(rule.id().as_str(), "purge_cost_up");
        assert_eq!(rule.event(), EventKind::ShopInit);
        assert_eq!(rule.scope(), IdempotencyScope::None);
        assert_eq!(rule.matches(&Entity::Shop(Shop { purge_cost: 75 })), Ok(true));
    }

    #[test]
    fn test_predicate_filters() {
        let rule = ModifierRule::new(
            "elite_damage_up",
            32,
            EventKind::PreBattleAction,
            RaiseDamage::new(1),
        )
        .when(monster_in(&[MonsterCategory::Elite]));

        let elite = Entity::Monster(Monster::new("Sentry", MonsterCategory::Elite, 38));
        let normal = Entity::Monster(Monster::new("Byrd", MonsterCategory::Normal, 25));
        assert_eq!(rule.matches(&elite), Ok(true));
        assert_eq!(rule.matches(&normal), Ok(false));
    }

    #[test]
    fn test_transform_runs() {
        let rule =
            ModifierRule::new("purge_cost_up", 23, EventKind::ShopInit, RaisePurgeCost::new(25));
        let mutation = rule.transform(&Entity::Shop(Shop { purge_cost: 75 })).unwrap();
        assert_eq!(mutation, Mutation::Replace(Entity::Shop(Shop { purge_cost: 100 })));
    }

    #[test]
    fn test_debug_output() {
        let rule =
            ModifierRule::new("purge_cost_up", 23, EventKind::ShopInit, RaisePurgeCost::new(25));
        let debug = format!("{:?}", rule);
        assert!(debug.contains("purge_cost_up"));
        assert!(debug.contains("purge cost +25"));
    }

    #[test]
    fn test_panicking_predicate_is_contained() {
        let rule =
            ModifierRule::new("purge_cost_up", 23, EventKind::ShopInit, RaisePurgeCost::new(25))
                .when(Arc::new(|entity: &Entity| {
                    entity.as_monster().expect("not a monster").max_health > 0
                }));

        let err = rule.matches(&Entity::Shop(Shop { purge_cost: 75 })).unwrap_err();
        assert_eq!(err, RuleError::Panicked("not a monster".to_string()));
    }

    #[test]
    fn test_panicking_transform_is_contained() {
        let rule = ModifierRule::new(
            "broken",
            0,
            EventKind::ShopInit,
            FnTransform::new("broken", |_: &Entity| -> Result<Mutation, RuleError> {
                panic!("cost table missing {}", 3)
            }),
        );

        let err = rule.transform(&Entity::Shop(Shop { purge_cost: 75 })).unwrap_err();
        assert_eq!(err, RuleError::Panicked("cost table missing 3".to_string()));
    }
}
