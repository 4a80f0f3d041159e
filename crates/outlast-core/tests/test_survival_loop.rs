//! Integration tests for the full tick pipeline.
//!
//! Exercises: InputSnapshot → Player::update (move, act, vitals)
//! → World::tick (prune, enemy AI) through `SimulationEngine`.

use outlast_core::prelude::*;

// ── Helpers ────────────────────────────────────────────────────────────

fn arena(spawn: Vec2) -> SimulationEngine {
    let mut config = SimConfig::default();
    config.world.width = 1000.0;
    config.world.height = 1000.0;
    config.world.spawn = Some(spawn);
    SimulationEngine::new(config).expect("arena config is valid")
}

fn add_tree(engine: &mut SimulationEngine, x: f32, y: f32, health: f32) -> u32 {
    let id = engine.world.next_id();
    let inset = engine.config().world.harvestable_collision_inset;
    engine.world.add_harvestable(Harvestable::new(
        id,
        HarvestableKind::Tree,
        Vec2::new(x, y),
        60.0,
        health,
        inset,
    ));
    id
}

fn add_wall(engine: &mut SimulationEngine, col: i32, row: i32) {
    let id = engine.world.next_id();
    engine.world.add_structure(Structure::new(
        id,
        StructureKind::WoodWall,
        GridCell { col, row },
        50.0,
        200.0,
    ));
}

fn add_wolf(engine: &mut SimulationEngine, x: f32, y: f32) -> u32 {
    let id = engine.world.next_id();
    let enemy = Enemy::new(id, Vec2::new(x, y), &engine.config().enemy);
    engine.world.add_enemy(enemy);
    id
}

fn craft_wall(engine: &mut SimulationEngine) -> usize {
    engine.player.inventory.add(ResourceKind::Wood, 50);
    let slot = engine.craft(0).expect("wood wall recipe");
    engine.select_slot(slot);
    slot
}

// ── Movement ───────────────────────────────────────────────────────────

#[test]
fn forward_walks_toward_pointer() {
    let mut engine = arena(Vec2::new(500.0, 500.0));
    let input = InputSnapshot::idle(Vec2::new(900.0, 500.0)).with_forward();

    engine.update(0.1, &input);

    let p = engine.player();
    assert!((p.position.x - 522.0).abs() < 0.01, "x={}", p.position.x);
    assert!((p.position.y - 500.0).abs() < 0.01);
    assert_eq!(p.facing, 0.0);
}

#[test]
fn slides_along_wall_in_same_tick() {
    let mut engine = arena(Vec2::new(75.0, 100.0));
    // Wall column at x in [100, 150], y in [50, 200]
    for row in 1..4 {
        add_wall(&mut engine, 2, row);
    }
    // Facing 45 degrees: forward pushes into the wall on X and along it on Y
    let input = InputSnapshot::idle(Vec2::new(175.0, 200.0)).with_forward();

    engine.update(0.1, &input);

    let p = engine.player();
    assert!((p.position.x - 75.0).abs() < 0.001, "x blocked, got {}", p.position.x);
    assert!(p.position.y > 110.0, "y slides, got {}", p.position.y);
}

#[test]
fn player_never_leaves_world() {
    let mut engine = arena(Vec2::new(10.0, 10.0));
    let input = InputSnapshot::idle(Vec2::new(-100.0, -100.0)).with_forward();
    for _ in 0..20 {
        engine.update(0.1, &input);
    }
    assert_eq!(engine.player().position, Vec2::new(0.0, 0.0));
}

// ── Gathering ──────────────────────────────────────────────────────────

#[test]
fn depleted_tree_removed_by_world_tick_not_by_attack() {
    let mut engine = arena(Vec2::new(500.0, 500.0));
    let tree = add_tree(&mut engine, 560.0, 500.0, 25.0);
    let combat = engine.config().combat.clone();

    let outcome = engine.player.attack(&mut engine.world, 560.0, 500.0, &combat);

    assert!(matches!(outcome, AttackOutcome::Gathered { .. }));
    assert!(engine.world().harvestable(tree).unwrap().health <= 0.0);

    let report = engine.update(0.016, &InputSnapshot::idle(Vec2::new(560.0, 500.0)));

    assert_eq!(report.pruned.harvestables, 1);
    assert!(engine.world().harvestable(tree).is_none());
    assert_eq!(engine.player().inventory.count(ResourceKind::Wood), 10);
}

#[test]
fn holding_primary_gathers_on_cooldown() {
    let mut engine = arena(Vec2::new(500.0, 500.0));
    add_tree(&mut engine, 560.0, 500.0, 1000.0);
    let input = InputSnapshot::idle(Vec2::new(560.0, 500.0)).with_primary();

    // One second of held swinging at 0.5s cooldown
    for _ in 0..10 {
        engine.update(0.1, &input);
    }

    assert_eq!(engine.player().inventory.count(ResourceKind::Wood), 20);
}

// ── Building ───────────────────────────────────────────────────────────

#[test]
fn build_with_primary_places_and_consumes() {
    let mut engine = arena(Vec2::new(500.0, 500.0));
    let slot = craft_wall(&mut engine);
    let input = InputSnapshot::idle(Vec2::new(620.0, 520.0)).with_primary();

    let report = engine.update(0.016, &input);

    assert!(matches!(report.action, Some(ActionOutcome::Build(Ok(_)))));
    assert_eq!(engine.world().structures.len(), 1);
    assert!(engine.player().hotbar.get(slot).is_none());
    // Placement uses the short cooldown and does not raise the swing flag
    assert!((engine.player().attack_cooldown - 0.2).abs() < 0.001);
    assert!(!engine.player().is_attacking());
}

#[test]
fn occupied_cell_always_rejects_and_keeps_item() {
    let mut engine = arena(Vec2::new(500.0, 500.0));
    add_wall(&mut engine, 12, 10);
    let slot = craft_wall(&mut engine);
    engine.player.inventory.add(ResourceKind::Wood, 500);

    for target in [Vec2::new(601.0, 501.0), Vec2::new(649.0, 549.0)] {
        let item = engine.player().hotbar.get(slot).cloned().unwrap();
        let building = engine.config().building.clone();
        let result = engine
            .player
            .place_structure(&mut engine.world, target.x, target.y, &item, &building);
        assert_eq!(result, Err(PlacementRejection::Occupied));
    }

    assert_eq!(engine.world().structures.len(), 1);
    assert!(engine.player().hotbar.get(slot).is_some());
    assert_eq!(engine.player().inventory.count(ResourceKind::Wood), 500);
}

#[test]
fn build_at_world_edge_stays_inside() {
    let mut engine = arena(Vec2::new(25.0, 100.0));
    let slot = craft_wall(&mut engine);

    let report = engine.update(0.016, &InputSnapshot::idle(Vec2::new(-10.0, 100.0)).with_primary());

    assert_eq!(
        report.action,
        Some(ActionOutcome::Build(Err(PlacementRejection::OutOfBounds)))
    );
    assert!(engine.world().structures.is_empty());
    assert!(engine.player().hotbar.get(slot).is_some());
}

#[test]
fn placed_wall_blocks_movement() {
    let mut engine = arena(Vec2::new(500.0, 525.0));
    craft_wall(&mut engine);
    // Place the wall in the cell to the east: [550, 600] x [500, 550]
    engine.update(0.016, &InputSnapshot::idle(Vec2::new(575.0, 525.0)).with_primary());
    assert_eq!(engine.world().structures.len(), 1);

    let walk = InputSnapshot::idle(Vec2::new(900.0, 525.0)).with_forward();
    for _ in 0..20 {
        engine.update(0.1, &walk);
    }

    let p = engine.player();
    assert!(p.position.x + p.radius <= 550.0 + 0.01, "x={}", p.position.x);
}

// ── Enemies ────────────────────────────────────────────────────────────

#[test]
fn wolf_notices_player_within_one_tick() {
    let mut engine = arena(Vec2::new(500.0, 500.0));
    let wolf = add_wolf(&mut engine, 750.0, 500.0);

    engine.update(0.016, &InputSnapshot::idle(Vec2::new(600.0, 500.0)));

    let enemy = engine.world().enemy(wolf).unwrap();
    assert_eq!(enemy.state, EnemyState::Chase);
    assert_eq!(enemy.target, Some(Target::Player));
}

#[test]
fn wolf_hunts_down_idle_player() {
    let mut engine = arena(Vec2::new(500.0, 500.0));
    add_wolf(&mut engine, 700.0, 500.0);
    let input = InputSnapshot::idle(Vec2::new(600.0, 500.0));

    let mut died_at = None;
    for tick in 0..2000 {
        let report = engine.update(0.1, &input);
        if report.player_died {
            died_at = Some(tick);
            break;
        }
    }

    assert!(died_at.is_some(), "wolf never killed the player");
    assert!(engine.player().dead);
    assert_eq!(engine.player().health, 0.0);
    // Paused from now on
    assert!(engine.update(0.1, &input).paused);
}

#[test]
fn killed_wolf_is_pruned() {
    let mut engine = arena(Vec2::new(500.0, 500.0));
    let wolf = add_wolf(&mut engine, 560.0, 500.0);
    engine.world.enemies[0].health = 30.0;
    let combat = engine.config().combat.clone();

    let outcome = engine.player.attack(&mut engine.world, 560.0, 500.0, &combat);
    assert_eq!(outcome, AttackOutcome::HitEnemy { target: wolf });

    let report = engine.update(0.016, &InputSnapshot::idle(Vec2::new(560.0, 500.0)));
    assert_eq!(report.pruned.enemies, 1);
    assert!(engine.world().enemy(wolf).is_none());
}

// ── Configuration ─────────────────────────────────────────────────────

#[test]
fn inverted_wander_range_is_rejected_up_front() {
    let mut config = SimConfig::default();
    config.enemy.wander_timer_min = 6.0;

    match SimulationEngine::new(config) {
        Err(outlast_core::config::ConfigError::Invalid(msg)) => assert!(msg.contains("wander")),
        other => panic!("expected an invalid-config error, got {:?}", other.map(|_| ())),
    }
}

// ── Survival & respawn ────────────────────────────────────────────────

#[test]
fn starvation_eventually_kills() {
    let mut config = SimConfig::default();
    config.survival.hunger_decay = 50.0;
    config.survival.starvation_damage = 40.0;
    let mut engine = SimulationEngine::new(config).unwrap();
    let input = InputSnapshot::idle(Vec2::new(0.0, 0.0));

    let mut ticks = 0;
    while !engine.player().dead && ticks < 1000 {
        engine.update(0.1, &input);
        let p = engine.player();
        assert!(p.hunger >= 0.0 && p.hunger <= 100.0);
        assert!(p.thirst >= 0.0 && p.thirst <= 100.0);
        ticks += 1;
    }

    assert!(engine.player().dead);
    assert_eq!(engine.player().hunger, 0.0);
}

#[test]
fn respawn_loses_items_but_structures_stay() {
    let mut engine = arena(Vec2::new(500.0, 500.0));
    craft_wall(&mut engine);
    engine.update(0.016, &InputSnapshot::idle(Vec2::new(620.0, 520.0)).with_primary());
    engine.player.inventory.add(ResourceKind::Stone, 40);
    engine.player.take_damage(500.0);
    assert!(engine.player().dead);

    engine.respawn();

    let p = engine.player();
    assert!(!p.dead);
    assert_eq!(p.position, Vec2::new(500.0, 500.0));
    assert_eq!((p.health, p.hunger, p.thirst), (100.0, 100.0, 100.0));
    assert!(p.inventory.is_empty());
    assert_eq!(p.hotbar.occupied(), 1);
    assert_eq!(p.hotbar.get(0), Some(&Item::starting_tool()));
    assert_eq!(engine.world().structures.len(), 1);
    assert!(!engine.update(0.1, &InputSnapshot::default()).paused);
}
