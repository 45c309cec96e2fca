use ascension::entity::{Monster, MonsterCategory, Player, RoomKind, Shop, ZoneId};
use ascension::numeric::Scale;
use ascension::rules::{self, STARTING_ZONE};
use ascension::*;

fn engine_at(level: i64) -> Ascension {
    let mut engine = Ascension::standard().unwrap();
    engine.start_run(DifficultyState::new(true, level));
    engine
}

fn special_battle_chance() -> SharedKey {
    SharedKey::new(SPECIAL_BATTLE_CHANCE)
}

/// Hard mode off means no rule ever fires, whatever the level.
#[test]
fn test_hard_mode_off_card_price_unchanged() {
    let mut engine = Ascension::standard().unwrap();
    engine.start_run(DifficultyState::new(false, 90));
    assert_eq!(engine.card_price(50), 50);
}

#[test]
fn test_card_price_at_level_49() {
    let mut engine = engine_at(49);
    assert_eq!(engine.card_price(50), 55);
    assert_eq!(engine_at(48).card_price(50), 50);
}

/// Price rules are pure functions of the query and are re-applied every time.
#[test]
fn test_price_queries_reapply() {
    let mut engine = engine_at(49);
    assert_eq!(engine.card_price(50), 55);
    assert_eq!(engine.card_price(50), 55);
    assert_eq!(engine.card_price(80), 88);
}

/// Starting max health is reduced once, on the first floor of the first zone.
#[test]
fn test_starting_max_health_one_shot() {
    let mut engine = engine_at(39);
    let zone = ZoneId::new(STARTING_ZONE);
    let mut player = Player::new(80);

    engine.level_chances_init(1, &zone, &mut player);
    assert_eq!(player.max_health, 75);

    engine.level_chances_init(2, &zone, &mut player);
    assert_eq!(player.max_health, 75);
}

#[test]
fn test_starting_max_health_other_zone() {
    let mut engine = engine_at(39);
    let mut player = Player::new(80);
    engine.level_chances_init(1, &ZoneId::new("TheCity"), &mut player);
    assert_eq!(player.max_health, 80);
}

#[test]
fn test_special_battle_chance_non_elite_room() {
    let mut engine = engine_at(78);
    engine.monster_room_entry(RoomKind::Monster);
    assert_eq!(engine.shared(&special_battle_chance()), Some(20));
}

#[test]
fn test_special_battle_chance_elite_room_untouched() {
    let mut engine = engine_at(78);
    engine.monster_room_entry(RoomKind::MonsterElite);
    assert_eq!(engine.shared(&special_battle_chance()), None);
}

#[test]
fn test_special_battle_chance_overwrites() {
    let mut engine = engine_at(78);
    engine.monster_room_entry(RoomKind::Monster);
    engine.monster_room_entry(RoomKind::MonsterBoss);
    assert_eq!(engine.shared(&special_battle_chance()), Some(20));
}

/// Re-firing MonsterInit for the same elite adds the flat bonus once.
#[test]
fn test_elite_flat_bonus_applied_once() {
    let mut engine = engine_at(59);
    let mut elite = Monster::new("Gremlin Nob", MonsterCategory::Elite, 100);

    engine.monster_init(EntityId(42), &mut elite);
    assert_eq!(elite.max_health, 110);
    assert_eq!(elite.current_health, 110);

    engine.monster_init(EntityId(42), &mut elite);
    assert_eq!(elite.max_health, 110);
    assert_eq!(elite.current_health, 110);
}

/// Two monsters with identical stats are distinct entities.
#[test]
fn test_guard_is_by_identity_not_value() {
    let mut engine = engine_at(59);
    let mut a = Monster::new("Sentry", MonsterCategory::Elite, 38);
    let mut b = a.clone();

    engine.monster_init(EntityId(1), &mut a);
    engine.monster_init(EntityId(2), &mut b);
    assert_eq!(a.max_health, 48);
    assert_eq!(b.max_health, 48);
}

/// Rules compose in ascending threshold order with rounding at each step.
#[test]
fn test_ordering_composes_step_by_step() {
    let mut engine = engine_at(67);
    let (out, report) = engine.dispatch(EventContext::monster(
        EventKind::MonsterInit,
        EntityId(1),
        Monster::new("Cultist", MonsterCategory::Normal, 100),
    ));

    let step_one = Scale::percent(110).apply_ceil(100).unwrap();
    let expected = Scale::percent(115).apply_ceil(step_one).unwrap();
    assert_eq!(expected, 127);
    assert_eq!(out.entity.as_monster().map(|m| m.max_health), Some(expected));
    assert_eq!(
        report.applied_ids(),
        vec![rules::NON_BOSS_HEALTH_UP, rules::MONSTER_HEALTH_UP]
    );
}

#[test]
fn test_elite_at_67_stacks_flat_then_percent() {
    let mut engine = engine_at(67);
    let mut elite = Monster::new("Lagavulin", MonsterCategory::Elite, 100);
    engine.monster_init(EntityId(3), &mut elite);
    // 100 + 10 = 110, ×1.10 = 121, ×1.15 = ceil(139.15)
    assert_eq!(elite.max_health, 140);
}

#[test]
fn test_boss_health_at_36() {
    let mut engine = engine_at(36);
    let mut boss = Monster::new("The Guardian", MonsterCategory::Boss, 100);
    engine.monster_init(EntityId(7), &mut boss);
    assert_eq!(boss.max_health, 110);
    assert_eq!(boss.current_health, 110);

    let mut normal = Monster::new("Cultist", MonsterCategory::Normal, 100);
    engine.monster_init(EntityId(8), &mut normal);
    assert_eq!(normal.max_health, 100);
}

/// Bosses skip the non-boss rule: ×1.10 at 36, then ×1.15 at 67.
#[test]
fn test_boss_health_at_67() {
    let mut engine = engine_at(67);
    let mut boss = Monster::new("Hexaghost", MonsterCategory::Boss, 100);
    engine.monster_init(EntityId(7), &mut boss);
    // ceil(110 × 1.15) = ceil(126.5)
    assert_eq!(boss.max_health, 127);
}

#[test]
fn test_damage_tiers_by_category() {
    let bases = |engine: &mut Ascension, category: MonsterCategory| {
        let mut monster = Monster::new("Sample", category, 40).with_damage([5, 0]);
        engine.pre_battle(EntityId(1), &mut monster);
        monster.damage_bases()
    };

    let mut engine = engine_at(21);
    assert_eq!(bases(&mut engine, MonsterCategory::Normal), vec![6, 0]);
    assert_eq!(bases(&mut engine, MonsterCategory::Elite), vec![5, 0]);
    assert_eq!(bases(&mut engine, MonsterCategory::Boss), vec![5, 0]);

    let mut engine = engine_at(32);
    assert_eq!(bases(&mut engine, MonsterCategory::Normal), vec![6, 0]);
    assert_eq!(bases(&mut engine, MonsterCategory::Elite), vec![6, 0]);
    assert_eq!(bases(&mut engine, MonsterCategory::Boss), vec![5, 0]);

    let mut engine = engine_at(44);
    assert_eq!(bases(&mut engine, MonsterCategory::Boss), vec![6, 0]);
}

/// max and current health are each scaled from their own prior value.
#[test]
fn test_percent_scales_health_independently() {
    let mut engine = engine_at(61);
    let mut monster = Monster::new("Jaw Worm", MonsterCategory::Normal, 100);
    monster.current_health = 57;

    engine.monster_init(EntityId(8), &mut monster);
    assert_eq!(monster.max_health, 110);
    assert_eq!(monster.current_health, 63); // ceil(62.7)
}

#[test]
fn test_damage_rules_skip_non_positive_bases() {
    let mut engine = engine_at(100);
    let mut monster =
        Monster::new("Cultist", MonsterCategory::Normal, 48).with_damage([6, 0, -2, 1]);
    engine.pre_battle(EntityId(4), &mut monster);
    // normal_damage_up and monster_damage_up
    assert_eq!(monster.damage_bases(), vec![8, 0, -2, 3]);
}

/// A transform's result does not depend on the level once it is unlocked.
#[test]
fn test_transforms_ignore_level() {
    for level in 61..=66 {
        let mut engine = engine_at(level);
        let mut monster = Monster::new("Byrd", MonsterCategory::Normal, 100);
        engine.monster_init(EntityId(1), &mut monster);
        assert_eq!(monster.max_health, 110, "level {}", level);
    }
}

#[test]
fn test_failing_rule_leaves_others_running() {
    let mut engine = engine_at(72);
    let mut monster = Monster::new("Mystery", MonsterCategory::Boss, 200);
    monster.damage = None;

    let (out, report) = engine.dispatch(EventContext::monster(
        EventKind::PreBattleAction,
        EntityId(1),
        monster.clone(),
    ));
    assert_eq!(out.entity, Entity::Monster(monster));
    assert_eq!(report.failed.len(), 2);
    assert!(report.failed.iter().all(|(_, msg)| msg == "monster has no damage list"));
}

#[test]
fn test_new_run_resets_guard() {
    let mut engine = engine_at(59);
    let mut first = Monster::new("Gremlin Nob", MonsterCategory::Elite, 82);
    engine.monster_init(EntityId(1), &mut first);
    assert_eq!(first.max_health, 92);

    engine.end_run();
    engine.start_run(DifficultyState::new(true, 59));

    let mut second = Monster::new("Gremlin Nob", MonsterCategory::Elite, 82);
    engine.monster_init(EntityId(1), &mut second);
    assert_eq!(second.max_health, 92);
}

#[test]
fn test_out_of_range_level_is_clamped() {
    let mut engine = engine_at(250);
    assert_eq!(engine.difficulty().level(), MAX_LEVEL);
    assert_eq!(engine.card_price(100), 127); // 110, then ceil(126.5)
}

#[test]
fn test_shop_and_rest_thresholds() {
    let mut engine = engine_at(28);
    let mut shop = Shop { purge_cost: 75 };
    engine.shop_init(&mut shop);
    assert_eq!(shop.purge_cost, 100);

    let mut player = Player {
        max_health: 70,
        current_health: 70,
    };
    engine.rest_used(&mut player);
    assert_eq!(player.max_health, 69);
    assert_eq!(player.current_health, 69);
}

#[test]
fn test_duplicate_catalogue_registration_fails() {
    let mut registry = rules::standard_registry().unwrap();
    let err = rules::standard_rules()
        .into_iter()
        .try_for_each(|rule| registry.register(rule))
        .unwrap_err();
    assert_eq!(err, RegistryError::DuplicateId(RuleId::new(rules::NORMAL_DAMAGE_UP)));
}

#[test]
fn test_difficulty_from_json_drives_engine() {
    let difficulty = DifficultyState::from_json(r#"{ "enabled": true, "level": 25 }"#).unwrap();
    let mut engine = Ascension::standard().unwrap();
    engine.start_run(difficulty);
    assert_eq!(engine.relic_price(150), 165);
}

#[test]
fn test_report_serializes() {
    let mut engine = engine_at(49);
    let (_, report) = engine.dispatch(EventContext::price(
        EventKind::GetCardPrice,
        ascension::entity::PriceCategory::Card,
        50,
    ));
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["event"], "GetCardPrice");
    assert_eq!(json["applied"][0]["rule"], rules::CARD_PRICE_UP);
}
