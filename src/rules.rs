//! Standard ascension rule catalogue.
//!
//! Seventeen rules, each unlocked at a fixed ascension level. Health rules
//! are guarded per monster; everything else is safe to re-apply.

use crate::entity::{EventKind, MonsterCategory, PriceCategory, RoomKind, ZoneId};
use crate::error::RegistryError;
use crate::numeric::Scale;
use crate::predicate::{any_monster, monster_in, price_of, room_except, run_start_in};
use crate::registry::RuleRegistry;
use crate::rule::ModifierRule;
use crate::shared::SPECIAL_BATTLE_CHANCE;
use crate::transform::{
    AddHealth, RaiseDamage, RaisePurgeCost, ReduceMaxHealth, ScaleHealth, ScalePrice, SetShared,
};

/// Zone a run starts in.
pub const STARTING_ZONE: &str = "Exordium";

/// Normal monsters deal +1 damage.
pub const NORMAL_DAMAGE_UP: &str = "normal_damage_up";
/// Card removal costs 25 more.
pub const PURGE_COST_UP: &str = "purge_cost_up";
/// Relics cost 10% more.
pub const RELIC_PRICE_UP: &str = "relic_price_up";
/// Resting costs 1 max health.
pub const REST_MAX_HEALTH_DOWN: &str = "rest_max_health_down";
/// Elites deal +1 damage.
pub const ELITE_DAMAGE_UP: &str = "elite_damage_up";
/// Bosses have 10% more health.
pub const BOSS_HEALTH_UP: &str = "boss_health_up";
/// The player starts with 5 less max health.
pub const STARTING_MAX_HEALTH_DOWN: &str = "starting_max_health_down";
/// Bosses deal +1 damage.
pub const BOSS_DAMAGE_UP: &str = "boss_damage_up";
/// Cards cost 10% more.
pub const CARD_PRICE_UP: &str = "card_price_up";
/// Card removal costs another 25 more.
pub const PURGE_COST_UP_II: &str = "purge_cost_up_ii";
/// Elites have 10 more health.
pub const ELITE_FLAT_HEALTH: &str = "elite_flat_health";
/// Normal monsters and elites have 10% more health.
pub const NON_BOSS_HEALTH_UP: &str = "non_boss_health_up";
/// All monsters have 15% more health.
pub const MONSTER_HEALTH_UP: &str = "monster_health_up";
/// All monsters deal +1 damage.
pub const MONSTER_DAMAGE_UP: &str = "monster_damage_up";
/// Non-elite monster rooms may become special battles.
pub const SPECIAL_BATTLE_CHANCE_UP: &str = "special_battle_chance";
/// Relics cost another 15% more.
pub const RELIC_PRICE_UP_II: &str = "relic_price_up_ii";
/// Cards cost another 15% more.
pub const CARD_PRICE_UP_II: &str = "card_price_up_ii";

/// Flat health added to elites.
pub const ELITE_FLAT_HEALTH_BONUS: i32 = 10;
/// Max health lost at the start of a run.
pub const STARTING_MAX_HEALTH_LOSS: i32 = 5;
/// Special battle chance written on non-elite monster rooms.
pub const SPECIAL_BATTLE_CHANCE_PERCENT: i64 = 20;

/// Build the seventeen standard rules in catalogue order.
pub fn standard_rules() -> Vec<ModifierRule> {
    use EventKind::*;
    use MonsterCategory::*;

    vec![
        ModifierRule::new(NORMAL_DAMAGE_UP, 21, PreBattleAction, RaiseDamage::new(1))
            .when(monster_in(&[Normal])),
        ModifierRule::new(PURGE_COST_UP, 23, ShopInit, RaisePurgeCost::new(25)),
        ModifierRule::new(
            RELIC_PRICE_UP,
            25,
            GetRelicPrice,
            ScalePrice::new(Scale::percent(110)),
        )
        .when(price_of(PriceCategory::Relic)),
        ModifierRule::new(REST_MAX_HEALTH_DOWN, 28, RestUsed, ReduceMaxHealth::new(1)),
        ModifierRule::new(ELITE_DAMAGE_UP, 32, PreBattleAction, RaiseDamage::new(1))
            .when(monster_in(&[Elite])),
        ModifierRule::new(
            BOSS_HEALTH_UP,
            36,
            MonsterInit,
            ScaleHealth::new(Scale::percent(110)),
        )
        .when(monster_in(&[Boss]))
        .guarded(),
        ModifierRule::new(
            STARTING_MAX_HEALTH_DOWN,
            39,
            LevelChancesInit,
            ReduceMaxHealth::new(STARTING_MAX_HEALTH_LOSS),
        )
        .when(run_start_in(ZoneId::new(STARTING_ZONE))),
        ModifierRule::new(BOSS_DAMAGE_UP, 44, PreBattleAction, RaiseDamage::new(1))
            .when(monster_in(&[Boss])),
        ModifierRule::new(
            CARD_PRICE_UP,
            49,
            GetCardPrice,
            ScalePrice::new(Scale::percent(110)),
        )
        .when(price_of(PriceCategory::Card)),
        ModifierRule::new(PURGE_COST_UP_II, 54, ShopInit, RaisePurgeCost::new(25)),
        ModifierRule::new(
            ELITE_FLAT_HEALTH,
            59,
            MonsterInit,
            AddHealth::new(ELITE_FLAT_HEALTH_BONUS),
        )
        .when(monster_in(&[Elite]))
        .guarded(),
        ModifierRule::new(
            NON_BOSS_HEALTH_UP,
            61,
            MonsterInit,
            ScaleHealth::new(Scale::percent(110)),
        )
        .when(monster_in(&[Normal, Elite]))
        .guarded(),
        ModifierRule::new(
            MONSTER_HEALTH_UP,
            67,
            MonsterInit,
            ScaleHealth::new(Scale::percent(115)),
        )
        .when(any_monster())
        .guarded(),
        ModifierRule::new(MONSTER_DAMAGE_UP, 72, PreBattleAction, RaiseDamage::new(1))
            .when(any_monster()),
        ModifierRule::new(
            SPECIAL_BATTLE_CHANCE_UP,
            78,
            MonsterRoomEntry,
            SetShared::new(SPECIAL_BATTLE_CHANCE, SPECIAL_BATTLE_CHANCE_PERCENT),
        )
        .when(room_except(RoomKind::MonsterElite)),
        ModifierRule::new(
            RELIC_PRICE_UP_II,
            84,
            GetRelicPrice,
            ScalePrice::new(Scale::percent(115)),
        )
        .when(price_of(PriceCategory::Relic)),
        ModifierRule::new(
            CARD_PRICE_UP_II,
            90,
            GetCardPrice,
            ScalePrice::new(Scale::percent(115)),
        )
        .when(price_of(PriceCategory::Card)),
    ]
}

/// A registry holding the standard rules.
pub fn standard_registry() -> Result<RuleRegistry, RegistryError> {
    RuleRegistry::from_rules(standard_rules())
}
