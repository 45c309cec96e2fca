//! Entity predicates.
//!
//! A predicate decides whether a rule applies to one entity. The built-in
//! predicates never fail: an entity of the wrong shape simply does not match.
//! A host predicate that panics is caught by [`ModifierRule::matches`] and
//! the rule is skipped for that event.
//!
//! [`ModifierRule::matches`]: crate::rule::ModifierRule::matches

use crate::entity::{Entity, MonsterCategory, PriceCategory, RoomKind, ZoneId};
use std::sync::Arc;

/// Shared, thread-safe entity predicate.
pub type Predicate = Arc<dyn Fn(&Entity) -> bool + Send + Sync>;

/// Matches every entity.
pub fn always() -> Predicate {
    Arc::new(|_: &Entity| true)
}

/// Matches any monster.
pub fn any_monster() -> Predicate {
    Arc::new(|entity: &Entity| entity.as_monster().is_some())
}

/// Matches monsters whose category is one of `categories`.
///
/// # Examples
///
/// ```rust
/// use ascension::predicate::monster_in;
/// use ascension::entity::{Entity, Monster, MonsterCategory};
///
/// let non_boss = monster_in(&[MonsterCategory::Normal, MonsterCategory::Elite]);
/// let elite = Entity::Monster(Monster::new("Gremlin Nob", MonsterCategory::Elite, 82));
/// let boss = Entity::Monster(Monster::new("The Guardian", MonsterCategory::Boss, 240));
///
/// assert!(non_boss(&elite));
/// assert!(!non_boss(&boss));
/// ```
pub fn monster_in(categories: &[MonsterCategory]) -> Predicate {
    let categories = categories.to_vec();
    Arc::new(move |entity: &Entity| {
        entity
            .as_monster()
            .is_some_and(|m| categories.contains(&m.category))
    })
}

/// Matches price queries of the given category.
pub fn price_of(category: PriceCategory) -> Predicate {
    Arc::new(move |entity: &Entity| entity.as_price().is_some_and(|p| p.category == category))
}

/// Matches room entries whose kind is not `excluded`.
pub fn room_except(excluded: RoomKind) -> Predicate {
    Arc::new(move |entity: &Entity| entity.as_room().is_some_and(|r| r.kind != excluded))
}

/// Matches the very first floor of `zone`.
///
/// Floor indices only grow during a run, so this matches once per run.
pub fn run_start_in(zone: ZoneId) -> Predicate {
    Arc::new(move |entity: &Entity| {
        entity
            .as_run_start()
            .is_some_and(|start| start.floor <= 1 && start.zone == zone)
    })
}

/// Matches when both predicates match.
pub fn both(a: Predicate, b: Predicate) -> Predicate {
    Arc::new(move |entity: &Entity| a(entity) && b(entity))
}
