//! Host hook surface.
//!
//! `Ascension` is what a host calls at each lifecycle point. Each hook wraps
//! the host's native data into an [`EventContext`], dispatches it, and writes
//! the result back: in place for mutations, as a return value for price
//! queries.

use crate::difficulty::DifficultyState;
use crate::dispatcher::{Dispatcher, RunState};
use crate::entity::{
    Entity, EventContext, EventKind, Monster, Player, PriceCategory, RoomEntry, RoomKind, RunStart,
    Shop, ZoneId,
};
use crate::error::RegistryError;
use crate::id::{EntityId, SharedKey};
use crate::registry::RuleRegistry;
use crate::report::DispatchReport;
use crate::rules;

/// Engine facade owning the rule set and the current run's state.
///
/// # Examples
///
/// ```rust
/// use ascension::{Ascension, DifficultyState};
/// use ascension::entity::Player;
///
/// let mut engine = Ascension::standard()?;
/// engine.start_run(DifficultyState::new(true, 49));
///
/// assert_eq!(engine.card_price(50), 55);
///
/// let mut player = Player::new(80);
/// engine.rest_used(&mut player);
/// assert_eq!(player.max_health, 79);
/// # Ok::<(), ascension::RegistryError>(())
/// ```
#[derive(Debug, Default)]
pub struct Ascension {
    dispatcher: Dispatcher,
    state: RunState,
}

impl Ascension {
    /// Create an engine over `registry`. Hard mode is off until `start_run`.
    pub fn new(registry: RuleRegistry) -> Self {
        Self {
            dispatcher: Dispatcher::new(registry),
            state: RunState::default(),
        }
    }

    /// Create an engine over the standard rule catalogue.
    pub fn standard() -> Result<Self, RegistryError> {
        Ok(Self::new(rules::standard_registry()?))
    }

    /// Begin a run. Clears the application guard and shared table.
    pub fn start_run(&mut self, difficulty: DifficultyState) {
        tracing::debug!(
            enabled = difficulty.enabled(),
            level = difficulty.level(),
            "starting run"
        );
        self.state.start_run(difficulty);
    }

    /// End the current run. Clears all run state and turns hard mode off.
    pub fn end_run(&mut self) {
        tracing::debug!(
            tracked = self.state.guard().tracked_entities(),
            "ending run"
        );
        self.state.end_run();
    }

    /// Forget guard entries for an entity the host destroyed.
    pub fn forget_entity(&mut self, entity: EntityId) {
        self.state.forget_entity(entity);
    }

    /// Get the current run's difficulty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ascension::{Ascension, DifficultyState};
    ///
    /// let mut engine = Ascension::standard()?;
    /// assert!(!engine.difficulty().enabled());
    ///
    /// engine.start_run(DifficultyState::new(true, 120));
    /// assert_eq!(engine.difficulty().level(), 100);
    /// # Ok::<(), ascension::RegistryError>(())
    /// ```
    pub fn difficulty(&self) -> DifficultyState {
        self.state.difficulty()
    }

    /// Get the current run's state (difficulty, guard, shared table).
    pub fn state(&self) -> &RunState {
        &self.state
    }

    /// Get the dispatcher and, through it, the registered rules.
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Read a shared value written by a rule this run.
    pub fn shared(&self, key: &SharedKey) -> Option<i64> {
        self.state.shared().get(key)
    }

    /// Dispatch a raw context, returning the result and its breakdown.
    pub fn dispatch(&mut self, context: EventContext) -> (EventContext, DispatchReport) {
        self.dispatcher.dispatch_traced(&mut self.state, context)
    }

    fn run(&mut self, context: EventContext) -> Entity {
        self.dispatcher.dispatch(&mut self.state, context).entity
    }

    fn monster_event(&mut self, kind: EventKind, id: EntityId, monster: &mut Monster) {
        let ctx = EventContext::monster(kind, id, monster.clone());
        if let Entity::Monster(updated) = self.run(ctx) {
            *monster = updated;
        }
    }

    /// Monster health initialisation.
    pub fn monster_init(&mut self, id: EntityId, monster: &mut Monster) {
        self.monster_event(EventKind::MonsterInit, id, monster);
    }

    /// Just before a monster's first action in battle.
    pub fn pre_battle(&mut self, id: EntityId, monster: &mut Monster) {
        self.monster_event(EventKind::PreBattleAction, id, monster);
    }

    /// Shop initialisation.
    pub fn shop_init(&mut self, shop: &mut Shop) {
        let ctx = EventContext::new(EventKind::ShopInit, Entity::Shop(*shop));
        if let Entity::Shop(updated) = self.run(ctx) {
            *shop = updated;
        }
    }

    fn price(&mut self, kind: EventKind, category: PriceCategory, base: i32) -> i32 {
        match self.run(EventContext::price(kind, category, base)) {
            Entity::Price(query) => query.result,
            _ => base,
        }
    }

    /// Replacement for a computed relic price.
    pub fn relic_price(&mut self, base: i32) -> i32 {
        self.price(EventKind::GetRelicPrice, PriceCategory::Relic, base)
    }

    /// Replacement for a computed card price.
    pub fn card_price(&mut self, base: i32) -> i32 {
        self.price(EventKind::GetCardPrice, PriceCategory::Card, base)
    }

    /// After the player rests at a rest site.
    pub fn rest_used(&mut self, player: &mut Player) {
        let ctx = EventContext::new(EventKind::RestUsed, Entity::Player(*player));
        if let Entity::Player(updated) = self.run(ctx) {
            *player = updated;
        }
    }

    /// Floor probabilities are initialised for `floor` in `zone`.
    pub fn level_chances_init(&mut self, floor: i32, zone: &ZoneId, player: &mut Player) {
        let start = RunStart {
            floor,
            zone: zone.clone(),
            player: *player,
        };
        let ctx = EventContext::new(EventKind::LevelChancesInit, Entity::RunStart(start));
        if let Entity::RunStart(updated) = self.run(ctx) {
            *player = updated.player;
        }
    }

    /// The player enters a monster room of `kind`.
    pub fn monster_room_entry(&mut self, kind: RoomKind) {
        self.run(EventContext::new(
            EventKind::MonsterRoomEntry,
            Entity::Room(RoomEntry { kind }),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::MonsterCategory;
    use crate::shared::SPECIAL_BATTLE_CHANCE;

    fn engine(level: i64) -> Ascension {
        let mut engine = Ascension::standard().unwrap();
        engine.start_run(DifficultyState::new(true, level));
        engine
    }

    #[test]
    fn test_default_engine_is_inert() {
        let mut engine = Ascension::standard().unwrap();
        assert_eq!(engine.card_price(50), 50);
    }

    #[test]
    fn test_shop_init() {
        let mut engine = engine(54);
        let mut shop = Shop { purge_cost: 75 };
        engine.shop_init(&mut shop);
        assert_eq!(shop.purge_cost, 125);
    }

    #[test]
    fn test_relic_price() {
        assert_eq!(engine(24).relic_price(150), 150);
        assert_eq!(engine(25).relic_price(150), 165);
        // ceil(165 × 1.15) = ceil(189.75)
        assert_eq!(engine(84).relic_price(150), 190);
    }

    #[test]
    fn test_pre_battle_tiers() {
        let mut engine = engine(72);
        let mut boss = Monster::new("Slime Boss", MonsterCategory::Boss, 140).with_damage([35, 0]);
        engine.pre_battle(EntityId(1), &mut boss);
        // boss_damage_up and monster_damage_up
        assert_eq!(boss.damage_bases(), vec![37, 0]);
    }

    #[test]
    fn test_end_run_clears_shared() {
        let mut engine = engine(78);
        engine.monster_room_entry(RoomKind::Monster);
        let key = SharedKey::new(SPECIAL_BATTLE_CHANCE);
        assert_eq!(engine.shared(&key), Some(20));

        engine.end_run();
        assert_eq!(engine.shared(&key), None);
        assert!(!engine.difficulty().enabled());
    }

    #[test]
    fn test_forget_entity_allows_reuse_of_identity() {
        let mut engine = engine(59);
        let mut first = Monster::new("Gremlin Nob", MonsterCategory::Elite, 82);
        engine.monster_init(EntityId(9), &mut first);
        assert_eq!(first.max_health, 92);

        engine.forget_entity(EntityId(9));
        let mut second = Monster::new("Lagavulin", MonsterCategory::Elite, 109);
        engine.monster_init(EntityId(9), &mut second);
        assert_eq!(second.max_health, 119);
    }
}
