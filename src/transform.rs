//! Rule transforms module.
//!
//! A transform is the pure half of a rule: it reads one entity and returns
//! the mutation to apply. Transforms never see the difficulty state; all
//! gating lives in the rule's threshold and predicate.

use crate::entity::{Entity, Monster, Player};
use crate::error::RuleError;
use crate::id::SharedKey;
use crate::numeric::{add_flat, Scale};

/// The effect a transform asks the dispatcher to perform.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    /// Replace the context's entity with this value.
    Replace(Entity),
    /// Overwrite a named value in the shared cross-rule table.
    SetShared { key: SharedKey, value: i64 },
}

/// Trait for rule transforms.
///
/// # Examples
///
/// ```rust
/// use ascension::transform::{Mutation, RuleTransform, ScalePrice};
/// use ascension::numeric::Scale;
/// use ascension::entity::{Entity, PriceCategory, PriceQuery};
///
/// let transform = ScalePrice::new(Scale::percent(110));
/// let query = Entity::Price(PriceQuery { category: PriceCategory::Card, result: 50 });
///
/// match transform.apply(&query).unwrap() {
///     Mutation::Replace(Entity::Price(p)) => assert_eq!(p.result, 55),
///     other => panic!("unexpected mutation: {:?}", other),
/// }
/// ```
pub trait RuleTransform: Send + Sync {
    /// Compute the mutation for `entity`.
    fn apply(&self, entity: &Entity) -> Result<Mutation, RuleError>;

    /// Human-readable description, recorded in dispatch reports.
    fn description(&self) -> String;
}

fn mismatch(expected: &'static str, entity: &Entity) -> RuleError {
    RuleError::EntityMismatch {
        expected,
        found: entity.kind_name(),
    }
}

fn expect_monster(entity: &Entity) -> Result<&Monster, RuleError> {
    entity.as_monster().ok_or_else(|| mismatch("monster", entity))
}

/// Percentage health increase, rounded up.
///
/// `max_health` and `current_health` are each scaled from their own
/// prior value; they are not kept proportional to each other.
#[derive(Debug, Clone)]
pub struct ScaleHealth {
    scale: Scale,
}

impl ScaleHealth {
    /// Scale both health values by `scale`, rounding up.
    pub fn new(scale: Scale) -> Self {
        Self { scale }
    }
}

impl RuleTransform for ScaleHealth {
    fn apply(&self, entity: &Entity) -> Result<Mutation, RuleError> {
        let mut monster = expect_monster(entity)?.clone();
        monster.max_health = self
            .scale
            .apply_ceil(monster.max_health)
            .ok_or(RuleError::Overflow)?;
        monster.current_health = self
            .scale
            .apply_ceil(monster.current_health)
            .ok_or(RuleError::Overflow)?;
        Ok(Mutation::Replace(Entity::Monster(monster)))
    }

    fn description(&self) -> String {
        format!("health {}", self.scale)
    }
}

/// Flat health increase on both `max_health` and `current_health`.
#[derive(Debug, Clone)]
pub struct AddHealth {
    amount: i32,
}

impl AddHealth {
    /// Add `amount` to both health values.
    pub fn new(amount: i32) -> Self {
        Self { amount }
    }
}

impl RuleTransform for AddHealth {
    fn apply(&self, entity: &Entity) -> Result<Mutation, RuleError> {
        let mut monster = expect_monster(entity)?.clone();
        monster.max_health = add_flat(monster.max_health, self.amount).ok_or(RuleError::Overflow)?;
        monster.current_health =
            add_flat(monster.current_health, self.amount).ok_or(RuleError::Overflow)?;
        Ok(Mutation::Replace(Entity::Monster(monster)))
    }

    fn description(&self) -> String {
        format!("health +{}", self.amount)
    }
}

/// Flat increase of every strictly positive damage base.
///
/// Entries with `base <= 0` are non-damaging moves and stay untouched.
#[derive(Debug, Clone)]
pub struct RaiseDamage {
    amount: i32,
}

impl RaiseDamage {
    /// Add `amount` to every positive damage base.
    pub fn new(amount: i32) -> Self {
        Self { amount }
    }
}

impl RuleTransform for RaiseDamage {
    fn apply(&self, entity: &Entity) -> Result<Mutation, RuleError> {
        let mut monster = expect_monster(entity)?.clone();
        let damage = monster.damage.as_mut().ok_or(RuleError::MissingDamage)?;
        for hit in damage.iter_mut().filter(|d| d.base > 0) {
            hit.base = add_flat(hit.base, self.amount).ok_or(RuleError::Overflow)?;
        }
        Ok(Mutation::Replace(Entity::Monster(monster)))
    }

    fn description(&self) -> String {
        format!("damage +{}", self.amount)
    }
}

/// Flat increase of the shop's card-removal cost.
#[derive(Debug, Clone)]
pub struct RaisePurgeCost {
    amount: i32,
}

impl RaisePurgeCost {
    /// Add `amount` to the purge cost.
    pub fn new(amount: i32) -> Self {
        Self { amount }
    }
}

impl RuleTransform for RaisePurgeCost {
    fn apply(&self, entity: &Entity) -> Result<Mutation, RuleError> {
        let Entity::Shop(shop) = entity else {
            return Err(mismatch("shop", entity));
        };
        let mut shop = *shop;
        shop.purge_cost = add_flat(shop.purge_cost, self.amount).ok_or(RuleError::Overflow)?;
        Ok(Mutation::Replace(Entity::Shop(shop)))
    }

    fn description(&self) -> String {
        format!("purge cost +{}", self.amount)
    }
}

/// Percentage increase of a price query's result, rounded up.
#[derive(Debug, Clone)]
pub struct ScalePrice {
    scale: Scale,
}

impl ScalePrice {
    /// Scale the queried price by `scale`, rounding up.
    pub fn new(scale: Scale) -> Self {
        Self { scale }
    }
}

impl RuleTransform for ScalePrice {
    fn apply(&self, entity: &Entity) -> Result<Mutation, RuleError> {
        let mut query = *entity.as_price().ok_or_else(|| mismatch("price", entity))?;
        query.result = self.scale.apply_ceil(query.result).ok_or(RuleError::Overflow)?;
        Ok(Mutation::Replace(Entity::Price(query)))
    }

    fn description(&self) -> String {
        format!("price {}", self.scale)
    }
}

/// Decrease of the player's max health.
///
/// Max health never drops below 1 and current health is capped at the
/// new maximum. Accepts a bare player or the player inside a run start.
#[derive(Debug, Clone)]
pub struct ReduceMaxHealth {
    amount: i32,
}

impl ReduceMaxHealth {
    /// Lower the player's max health by `amount`.
    pub fn new(amount: i32) -> Self {
        Self { amount }
    }

    fn reduce(&self, mut player: Player) -> Player {
        player.max_health = player.max_health.saturating_sub(self.amount).max(1);
        player.current_health = player.current_health.min(player.max_health);
        player
    }
}

impl RuleTransform for ReduceMaxHealth {
    fn apply(&self, entity: &Entity) -> Result<Mutation, RuleError> {
        match entity {
            Entity::Player(player) => Ok(Mutation::Replace(Entity::Player(self.reduce(*player)))),
            Entity::RunStart(start) => {
                let mut start = start.clone();
                start.player = self.reduce(start.player);
                Ok(Mutation::Replace(Entity::RunStart(start)))
            }
            other => Err(mismatch("player", other)),
        }
    }

    fn description(&self) -> String {
        format!("max health -{}", self.amount)
    }
}

/// Overwrite a named shared value. The entity itself is left alone.
#[derive(Debug, Clone)]
pub struct SetShared {
    key: SharedKey,
    value: i64,
}

impl SetShared {
    /// Write `value` under `key` in the shared table.
    pub fn new(key: impl Into<SharedKey>, value: i64) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

impl RuleTransform for SetShared {
    fn apply(&self, _entity: &Entity) -> Result<Mutation, RuleError> {
        Ok(Mutation::SetShared {
            key: self.key.clone(),
            value: self.value,
        })
    }

    fn description(&self) -> String {
        format!("{} = {}", self.key, self.value)
    }
}

/// A transform backed by a host-supplied closure.
///
/// # Examples
///
/// ```rust
/// use ascension::transform::{FnTransform, Mutation, RuleTransform};
/// use ascension::entity::{Entity, Shop};
///
/// let halve = FnTransform::new("purge cost /2", |entity: &Entity| match entity {
///     Entity::Shop(shop) => Ok(Mutation::Replace(Entity::Shop(Shop {
///         purge_cost: shop.purge_cost / 2,
///     }))),
///     _ => Err(ascension::RuleError::Custom("not a shop".into())),
/// });
///
/// assert_eq!(halve.description(), "purge cost /2");
/// assert!(halve.apply(&Entity::Shop(Shop { purge_cost: 100 })).is_ok());
/// ```
pub struct FnTransform<F> {
    description: String,
    func: F,
}

impl<F> FnTransform<F>
where
    F: Fn(&Entity) -> Result<Mutation, RuleError> + Send + Sync,
{
    /// Wrap `func`, reporting it as `description`.
    pub fn new(description: impl Into<String>, func: F) -> Self {
        Self {
            description: description.into(),
            func,
        }
    }
}

impl<F> RuleTransform for FnTransform<F>
where
    F: Fn(&Entity) -> Result<Mutation, RuleError> + Send + Sync,
{
    fn apply(&self, entity: &Entity) -> Result<Mutation, RuleError> {
        (self.func)(entity)
    }

    fn description(&self) -> String {
        self.description.clone()
    }
}
