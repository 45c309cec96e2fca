//! Entity and event module.
//!
//! These are the neutral shapes the host's hook points are translated into
//! before dispatch: the attributes a rule may read or replace, wrapped in an
//! [`EventContext`] together with the event kind and the entity's identity.

use crate::id::EntityId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle moments the engine can be invoked at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventKind {
    /// A monster's health is initialised.
    MonsterInit,
    /// Just before a monster's first action in battle.
    PreBattleAction,
    /// A shop is initialised.
    ShopInit,
    /// The host computed a relic price.
    GetRelicPrice,
    /// The host computed a card price.
    GetCardPrice,
    /// The player rested at a rest site.
    RestUsed,
    /// Floor probabilities are initialised.
    LevelChancesInit,
    /// The player entered a monster room.
    MonsterRoomEntry,
}

impl EventKind {
    /// Every event kind, in declaration order.
    pub const ALL: [EventKind; 8] = [
        EventKind::MonsterInit,
        EventKind::PreBattleAction,
        EventKind::ShopInit,
        EventKind::GetRelicPrice,
        EventKind::GetCardPrice,
        EventKind::RestUsed,
        EventKind::LevelChancesInit,
        EventKind::MonsterRoomEntry,
    ];
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Monster tier. Most monster rules are restricted to one or two tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MonsterCategory {
    Normal,
    Elite,
    Boss,
}

/// One damage instance of a monster move.
///
/// A base of zero or less marks a non-damaging move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Damage {
    pub base: i32,
}

impl Damage {
    /// Create a damage instance with the given base.
    pub fn new(base: i32) -> Self {
        Self { base }
    }
}

/// A monster as seen at `MonsterInit` and `PreBattleAction`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Monster {
    /// Display name, only used in logs.
    pub name: String,
    pub category: MonsterCategory,
    pub max_health: i32,
    pub current_health: i32,
    /// Ordered damage instances. `None` when the host exposed no move list.
    pub damage: Option<Vec<Damage>>,
}

impl Monster {
    /// Create a monster at full health with an empty damage list.
    pub fn new(name: impl Into<String>, category: MonsterCategory, health: i32) -> Self {
        Self {
            name: name.into(),
            category,
            max_health: health,
            current_health: health,
            damage: Some(Vec::new()),
        }
    }

    /// Replace the damage list with the given bases.
    pub fn with_damage(mut self, bases: impl IntoIterator<Item = i32>) -> Self {
        self.damage = Some(bases.into_iter().map(Damage::new).collect());
        self
    }

    /// Damage bases in order, or an empty list when there is none.
    pub fn damage_bases(&self) -> Vec<i32> {
        self.damage
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|d| d.base)
            .collect()
    }
}

/// The player's health, as seen at `RestUsed` and `LevelChancesInit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub max_health: i32,
    pub current_health: i32,
}

impl Player {
    /// Create a player at full health.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ascension::entity::Player;
    ///
    /// let player = Player::new(80);
    /// assert_eq!(player.current_health, 80);
    /// ```
    pub fn new(max_health: i32) -> Self {
        Self {
            max_health,
            current_health: max_health,
        }
    }
}

/// A shop as seen at `ShopInit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shop {
    pub purge_cost: i32,
}

/// What a price query is pricing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceCategory {
    Relic,
    Card,
}

/// A price query whose result is itself the value being transformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuery {
    pub category: PriceCategory,
    pub result: i32,
}

/// Kind of monster room the player entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomKind {
    Monster,
    MonsterElite,
    MonsterBoss,
}

/// A room entry as seen at `MonsterRoomEntry`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomEntry {
    pub kind: RoomKind,
}

/// Name of a dungeon zone, e.g. `"Exordium"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ZoneId(pub String);

impl ZoneId {
    /// Create a zone id from its name.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ascension::entity::ZoneId;
    ///
    /// let zone = ZoneId::new("Exordium");
    /// assert_eq!(zone.as_str(), "Exordium");
    /// ```
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the zone's name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Floor position and player at `LevelChancesInit`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStart {
    /// Floor index within the run. The first floor is 0 or 1 depending on the host.
    pub floor: i32,
    pub zone: ZoneId,
    pub player: Player,
}

/// The mutable attributes exposed at one hook point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Entity {
    Monster(Monster),
    Player(Player),
    Shop(Shop),
    Price(PriceQuery),
    Room(RoomEntry),
    RunStart(RunStart),
}

impl Entity {
    /// Short lowercase name of the variant, used in errors and logs.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Entity::Monster(_) => "monster",
            Entity::Player(_) => "player",
            Entity::Shop(_) => "shop",
            Entity::Price(_) => "price",
            Entity::Room(_) => "room",
            Entity::RunStart(_) => "run start",
        }
    }

    /// Get the monster, if this entity is one.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ascension::Entity;
    /// use ascension::entity::{Monster, MonsterCategory, Shop};
    ///
    /// let monster = Entity::Monster(Monster::new("Byrd", MonsterCategory::Normal, 25));
    /// assert_eq!(monster.as_monster().map(|m| m.max_health), Some(25));
    /// assert!(Entity::Shop(Shop { purge_cost: 75 }).as_monster().is_none());
    /// ```
    pub fn as_monster(&self) -> Option<&Monster> {
        match self {
            Entity::Monster(m) => Some(m),
            _ => None,
        }
    }

    /// Get the price query, if this entity is one.
    pub fn as_price(&self) -> Option<&PriceQuery> {
        match self {
            Entity::Price(p) => Some(p),
            _ => None,
        }
    }

    /// Get the room entry, if this entity is one.
    pub fn as_room(&self) -> Option<&RoomEntry> {
        match self {
            Entity::Room(r) => Some(r),
            _ => None,
        }
    }

    /// Get the run-start snapshot, if this entity is one.
    pub fn as_run_start(&self) -> Option<&RunStart> {
        match self {
            Entity::RunStart(r) => Some(r),
            _ => None,
        }
    }
}

/// One event occurrence handed to the dispatcher.
///
/// # Examples
///
/// ```rust
/// use ascension::{EntityId, EventContext, EventKind};
/// use ascension::entity::{Monster, MonsterCategory};
///
/// let monster = Monster::new("Cultist", MonsterCategory::Normal, 50);
/// let ctx = EventContext::monster(EventKind::MonsterInit, EntityId(1), monster);
/// assert_eq!(ctx.kind, EventKind::MonsterInit);
/// assert_eq!(ctx.identity, Some(EntityId(1)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventContext {
    /// Which lifecycle moment fired.
    pub kind: EventKind,
    /// The attributes rules may read and replace.
    pub entity: Entity,
    /// Identity of the underlying host entity, when it has one.
    pub identity: Option<EntityId>,
}

impl EventContext {
    /// Create a context for an entity without a tracked identity.
    pub fn new(kind: EventKind, entity: Entity) -> Self {
        Self {
            kind,
            entity,
            identity: None,
        }
    }

    /// Attach an identity token.
    pub fn with_identity(mut self, identity: EntityId) -> Self {
        self.identity = Some(identity);
        self
    }

    /// Create a context for a monster with a tracked identity.
    pub fn monster(kind: EventKind, identity: EntityId, monster: Monster) -> Self {
        Self::new(kind, Entity::Monster(monster)).with_identity(identity)
    }

    /// Create a price-query context whose result starts at `base`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ascension::{EventContext, EventKind};
    /// use ascension::entity::PriceCategory;
    ///
    /// let ctx = EventContext::price(EventKind::GetRelicPrice, PriceCategory::Relic, 150);
    /// assert_eq!(ctx.entity.as_price().map(|p| p.result), Some(150));
    /// assert_eq!(ctx.identity, None);
    /// ```
    pub fn price(kind: EventKind, category: PriceCategory, base: i32) -> Self {
        Self::new(
            kind,
            Entity::Price(PriceQuery {
                category,
                result: base,
            }),
        )
    }
}
