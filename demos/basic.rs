//! Walkthrough: one short run at a high ascension level
//!
//! This example demonstrates:
//! - Starting a run from a JSON difficulty configuration
//! - Calling the host hooks at each lifecycle point
//! - Reading the dispatch breakdown and the shared table

use ascension::entity::{Monster, MonsterCategory, Player, RoomKind, Shop, ZoneId};
use ascension::rules::STARTING_ZONE;
use ascension::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let mut engine = Ascension::standard()?;
    let difficulty = DifficultyState::from_json(r#"{ "enabled": true, "level": 78 }"#)?;
    engine.start_run(difficulty);
    println!("Run started at ascension {}", engine.difficulty().level());

    let zone = ZoneId::new(STARTING_ZONE);
    let mut player = Player::new(80);
    engine.level_chances_init(1, &zone, &mut player);
    println!("Starting max HP: {}", player.max_health);

    engine.monster_room_entry(RoomKind::Monster);
    println!(
        "Special battle chance: {:?}",
        engine.shared(&SharedKey::new(SPECIAL_BATTLE_CHANCE))
    );

    let (ctx, report) = engine.dispatch(EventContext::monster(
        EventKind::MonsterInit,
        EntityId(1),
        Monster::new("Gremlin Nob", MonsterCategory::Elite, 82).with_damage([14, 0]),
    ));
    println!("\n=== MonsterInit breakdown ===");
    for applied in &report.applied {
        println!("  {}: {}", applied.rule, applied.description);
    }
    let mut nob = match ctx.entity {
        Entity::Monster(monster) => monster,
        other => return Err(format!("unexpected entity {:?}", other).into()),
    };
    println!("Gremlin Nob HP: {}/{}", nob.current_health, nob.max_health);

    engine.pre_battle(EntityId(1), &mut nob);
    println!("Gremlin Nob damage: {:?}", nob.damage_bases());
    engine.forget_entity(EntityId(1));

    let mut shop = Shop { purge_cost: 75 };
    engine.shop_init(&mut shop);
    println!("\nPurge cost: {}", shop.purge_cost);
    println!("Card (50) costs {}", engine.card_price(50));
    println!("Relic (150) costs {}", engine.relic_price(150));

    engine.rest_used(&mut player);
    println!("Max HP after resting: {}", player.max_health);

    engine.end_run();
    Ok(())
}
