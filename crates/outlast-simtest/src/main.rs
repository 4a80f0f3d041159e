//! Outlast Headless Simulation Harness
//!
//! Drives the survival core through scripted scenarios and checks the
//! invariants a renderer would rely on. No window, no input devices.
//!
//! Usage:
//!   cargo run -p outlast-simtest
//!   cargo run -p outlast-simtest -- --verbose
//!   cargo run -p outlast-simtest -- --seed 7 --config tuning.json --dump

use outlast_core::config::format_cost;
use outlast_core::prelude::*;

const FRAME: f32 = 1.0 / 60.0;

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

impl TestResult {
    fn new(name: &str, passed: bool, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed,
            detail: detail.into(),
        }
    }
}

struct Options {
    verbose: bool,
    dump: bool,
    seed: Option<u64>,
    config_path: Option<String>,
}

fn parse_args() -> Result<Options, String> {
    let mut options = Options {
        verbose: false,
        dump: false,
        seed: None,
        config_path: None,
    };

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--verbose" => options.verbose = true,
            "--dump" => options.dump = true,
            "--seed" => {
                let value = args.next().ok_or("--seed needs a value")?;
                let seed = value
                    .parse()
                    .map_err(|e| format!("bad --seed '{}': {}", value, e))?;
                options.seed = Some(seed);
            }
            "--config" => {
                options.config_path = Some(args.next().ok_or("--config needs a path")?);
            }
            other => return Err(format!("unknown argument '{}'", other)),
        }
    }

    Ok(options)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let options = match parse_args() {
        Ok(o) => o,
        Err(e) => {
            eprintln!("error: {}", e);
            eprintln!("usage: outlast-simtest [--verbose] [--seed N] [--config path] [--dump]");
            std::process::exit(2);
        }
    };
    let verbose = options.verbose;
    println!("=== Outlast Simulation Harness ===\n");

    let mut results = Vec::new();

    // 0. Configuration
    let config = match load_config(&options) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(2);
        }
    };
    results.extend(validate_config(&config, verbose));

    // 1. World generation
    results.extend(validate_generation(&config, verbose));

    // 2. Hunger, thirst and starvation
    results.extend(validate_survival(&config, verbose));

    // 3. Gathering
    results.extend(validate_gathering(&config, verbose));

    // 4. Crafting and building
    results.extend(validate_building(&config, verbose));

    // 5. Wolf AI
    results.extend(validate_enemy_ai(&config, verbose));

    // 6. Long scripted run over a generated world
    let (soak, engine) = validate_soak(&config, verbose);
    results.extend(soak);

    if options.dump {
        match serde_json::to_string_pretty(&engine.snapshot()) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("snapshot dump failed: {}", e),
        }
    }

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

fn load_config(options: &Options) -> Result<SimConfig, String> {
    let mut config = match &options.config_path {
        Some(path) => SimConfig::load(path).map_err(|e| format!("{}: {}", path, e))?,
        None => SimConfig::default(),
    };
    if let Some(seed) = options.seed {
        config.seed = seed;
    }
    Ok(config)
}

/// Fresh engine with an empty world and the player at the spawn point.
fn empty_engine(config: &SimConfig) -> SimulationEngine {
    SimulationEngine::new(config.clone()).unwrap_or_else(|e| {
        eprintln!("error: {}", e);
        std::process::exit(2);
    })
}

fn spawn_tree(engine: &mut SimulationEngine, offset: Vec2, health: f32) -> u32 {
    let id = engine.world.next_id();
    let position = engine.player().position + offset;
    let inset = engine.config().world.harvestable_collision_inset;
    let size = engine.config().generation.tree.size;
    engine.world.add_harvestable(Harvestable::new(
        id,
        HarvestableKind::Tree,
        position,
        size,
        health,
        inset,
    ));
    id
}

/// Swing at `target` until the cooldown allows it once, returning the outcome.
fn swing_at(engine: &mut SimulationEngine, target: Vec2) -> Option<ActionOutcome> {
    let input = InputSnapshot::idle(target).with_primary();
    for _ in 0..120 {
        if let Some(action) = engine.update(FRAME, &input).action {
            return Some(action);
        }
    }
    None
}

// ── 0. Configuration ────────────────────────────────────────────────────

fn validate_config(config: &SimConfig, verbose: bool) -> Vec<TestResult> {
    println!("--- Configuration ---");
    let mut results = Vec::new();

    results.push(match config.validate() {
        Ok(()) => TestResult::new("config_valid", true, format!("seed {}", config.seed)),
        Err(e) => TestResult::new("config_valid", false, e.to_string()),
    });

    let round_trip = config
        .to_json_pretty()
        .and_then(|json| SimConfig::from_json_str(&json));
    results.push(TestResult::new(
        "config_json_round_trip",
        round_trip.is_ok(),
        match &round_trip {
            Ok(c) => format!("{} recipes survive", c.recipes.len()),
            Err(e) => e.to_string(),
        },
    ));

    if verbose {
        for recipe in &config.recipes {
            println!("  recipe {} -> {} [{}]", recipe.name, recipe.item_id, format_cost(&recipe.cost));
        }
    }

    results
}

// ── 1. Generation ───────────────────────────────────────────────────────

fn validate_generation(config: &SimConfig, verbose: bool) -> Vec<TestResult> {
    println!("--- World Generation ---");
    let mut results = Vec::new();

    let mut engine = empty_engine(config);
    let summary = engine.generate();
    let world = engine.world();
    let params = &config.generation;

    let max_trees = (params.forest_clusters * params.trees_per_forest.1) as usize;
    let min_trees = (params.forest_clusters * params.trees_per_forest.0) as usize;
    results.push(TestResult::new(
        "gen_tree_count",
        summary.trees >= min_trees && summary.trees <= max_trees,
        format!("{} trees (expected {}..={})", summary.trees, min_trees, max_trees),
    ));

    let max_rocks = (params.rock_fields * params.rocks_per_field.1) as usize;
    let min_rocks = (params.rock_fields * params.rocks_per_field.0) as usize;
    results.push(TestResult::new(
        "gen_rock_count",
        summary.rocks >= min_rocks && summary.rocks <= max_rocks,
        format!("{} rocks/ore (expected {}..={})", summary.rocks, min_rocks, max_rocks),
    ));

    results.push(TestResult::new(
        "gen_enemy_count",
        summary.enemies == params.enemy_count as usize,
        format!("{} wolves", summary.enemies),
    ));

    let outside = world
        .harvestables
        .iter()
        .map(|h| h.position)
        .chain(world.enemies.iter().map(|e| e.position))
        .filter(|p| !world.contains(*p))
        .count();
    results.push(TestResult::new(
        "gen_inside_bounds",
        outside == 0,
        format!("{} objects outside the world", outside),
    ));

    let ore = world
        .harvestables
        .iter()
        .filter(|h| h.kind == HarvestableKind::MetalOre)
        .count();
    if verbose {
        println!("  {} of {} rock nodes are metal ore", ore, summary.rocks);
        if let Some(node) = world.harvestables.first() {
            println!("  first node: {:?} drawn {} at ({:.0}, {:.0})", node.kind, node.color(), node.position.x, node.position.y);
        }
    }

    let mut again = empty_engine(config);
    again.generate();
    let same = again
        .world()
        .harvestables
        .iter()
        .zip(&world.harvestables)
        .all(|(a, b)| a.position == b.position && a.kind == b.kind);
    results.push(TestResult::new(
        "gen_deterministic",
        same && again.world().harvestables.len() == world.harvestables.len(),
        format!("seed {} reproduces the same layout", config.seed),
    ));

    results
}

// ── 2. Survival ─────────────────────────────────────────────────────────

fn validate_survival(config: &SimConfig, verbose: bool) -> Vec<TestResult> {
    println!("--- Survival ---");
    let mut results = Vec::new();
    let survival = &config.survival;
    let max = config.player.max_stat;

    let mut engine = empty_engine(config);
    let idle = InputSnapshot::idle(engine.player().position);
    for _ in 0..600 {
        engine.update(FRAME, &idle);
    }
    let elapsed = engine.sim_time() as f32;
    let p = engine.player();
    let expected_hunger = (max - survival.hunger_decay * elapsed).max(0.0);
    let expected_thirst = (max - survival.thirst_decay * elapsed).max(0.0);
    results.push(TestResult::new(
        "survival_decay_rates",
        (p.hunger - expected_hunger).abs() < 0.05 && (p.thirst - expected_thirst).abs() < 0.05,
        format!(
            "after {:.1}s hunger {:.2} thirst {:.2} (expected {:.2}/{:.2})",
            elapsed, p.hunger, p.thirst, expected_hunger, expected_thirst
        ),
    ));
    results.push(TestResult::new(
        "survival_no_damage_while_fed",
        p.health == max,
        format!("health {:.1}", p.health),
    ));

    // Starve to death on an accelerated clock
    let mut hungry = config.clone();
    hungry.survival.hunger_decay = max;
    hungry.survival.starvation_damage = max / 2.0;
    let mut engine = empty_engine(&hungry);
    let mut ticks = 0;
    let mut vitals_ok = true;
    while !engine.player().dead && ticks < 10_000 {
        engine.update(0.1, &idle);
        let p = engine.player();
        vitals_ok &= (0.0..=max).contains(&p.hunger) && (0.0..=max).contains(&p.thirst);
        ticks += 1;
    }
    results.push(TestResult::new(
        "survival_starvation_kills",
        engine.player().dead && engine.player().health == 0.0,
        format!("dead after {} ticks ({:.1}s)", ticks, engine.sim_time()),
    ));
    results.push(TestResult::new(
        "survival_vitals_clamped",
        vitals_ok,
        "hunger and thirst stayed within 0..=max",
    ));

    let report = engine.update(0.1, &idle.with_forward());
    results.push(TestResult::new(
        "survival_paused_while_dead",
        report.paused && engine.player().position == hungry.world.spawn_point(),
        format!("paused={}", report.paused),
    ));

    engine.respawn();
    let p = engine.player();
    results.push(TestResult::new(
        "survival_respawn_restores",
        !p.dead && p.health == max && p.hunger == max && p.thirst == max && p.inventory.is_empty(),
        format!("health {} hunger {} thirst {}", p.health, p.hunger, p.thirst),
    ));

    if verbose {
        println!("  starvation took {} ticks", ticks);
    }

    results
}

// ── 3. Gathering ────────────────────────────────────────────────────────

fn validate_gathering(config: &SimConfig, verbose: bool) -> Vec<TestResult> {
    println!("--- Gathering ---");
    let mut results = Vec::new();
    let combat = &config.combat;

    let mut engine = empty_engine(config);
    let health = combat.gather_damage * 3.0;
    let offset = Vec2::new(combat.reach * 0.5, 0.0);
    let tree = spawn_tree(&mut engine, offset, health);
    let target = engine.player().position + offset;

    let mut swings = 0;
    while engine.world().harvestable(tree).is_some() && swings < 20 {
        if swing_at(&mut engine, target).is_some() {
            swings += 1;
        }
    }
    // One more tick so the prune after the last hit has happened
    engine.update(FRAME, &InputSnapshot::idle(target));

    let wood = engine.player().inventory.count(ResourceKind::Wood);
    results.push(TestResult::new(
        "gather_tree_depletes",
        engine.world().harvestable(tree).is_none() && swings == 3,
        format!("removed after {} swings", swings),
    ));
    results.push(TestResult::new(
        "gather_yield",
        wood == combat.gather_yield * 3,
        format!("{} wood collected", wood),
    ));

    let far = engine.player().position + Vec2::new(combat.reach * 2.0, 0.0);
    let outcome = swing_at(&mut engine, far);
    results.push(TestResult::new(
        "gather_out_of_reach",
        outcome == Some(ActionOutcome::Attack(AttackOutcome::OutOfReach)),
        format!("{:?}", outcome),
    ));

    if verbose {
        println!("  inventory: {:?}", engine.player().inventory.iter().collect::<Vec<_>>());
    }

    results
}

// ── 4. Crafting & building ──────────────────────────────────────────────

fn validate_building(config: &SimConfig, verbose: bool) -> Vec<TestResult> {
    println!("--- Crafting & Building ---");
    let mut results = Vec::new();
    let building = &config.building;

    let mut engine = empty_engine(config);
    let Some(index) = config.recipes.iter().position(|r| r.output().is_placeable()) else {
        results.push(TestResult::new("craft_recipe_available", false, "no placeable recipe"));
        return results;
    };
    let recipe = config.recipes[index].clone();

    let poor = engine.craft(index);
    results.push(TestResult::new(
        "craft_rejects_shortfall",
        matches!(poor, Err(CraftError::Insufficient(_))),
        match &poor {
            Err(e) => e.to_string(),
            Ok(slot) => format!("unexpectedly crafted into slot {}", slot),
        },
    ));

    for (kind, amount) in &recipe.cost {
        engine.player.inventory.add(*kind, *amount);
    }
    let crafted = engine.craft(index);
    results.push(TestResult::new(
        "craft_consumes_cost",
        crafted.is_ok() && engine.player().inventory.is_empty(),
        format!("{} -> {:?}", recipe.name, crafted),
    ));
    let Ok(slot) = crafted else {
        return results;
    };
    engine.select_slot(slot);

    // One cell east of the cell the player stands in
    let here = GridCell::containing(engine.player().position.x, engine.player().position.y, building.grid_size);
    let cell = GridCell {
        col: here.col + 2,
        row: here.row,
    };
    let center = cell.rect(building.grid_size).center();
    let placed = swing_at(&mut engine, center);
    results.push(TestResult::new(
        "build_places_structure",
        matches!(placed, Some(ActionOutcome::Build(Ok(_))))
            && engine.world().structure_at(cell).is_some()
            && engine.player().hotbar.get(slot).is_none(),
        format!("{:?}", placed),
    ));

    // Same cell again with a fresh item
    for (kind, amount) in &recipe.cost {
        engine.player.inventory.add(*kind, *amount);
    }
    let second = engine.craft(index).ok();
    if let Some(slot) = second {
        engine.select_slot(slot);
    }
    let again = swing_at(&mut engine, center);
    results.push(TestResult::new(
        "build_rejects_occupied",
        again == Some(ActionOutcome::Build(Err(PlacementRejection::Occupied)))
            && engine.world().structures.len() == 1
            && second.is_some_and(|s| engine.player().hotbar.get(s).is_some()),
        format!("{:?}", again),
    ));

    let far = engine.player().position + Vec2::new(building.build_range * 2.0, 0.0);
    let distant = swing_at(&mut engine, far);
    results.push(TestResult::new(
        "build_rejects_out_of_range",
        distant == Some(ActionOutcome::Build(Err(PlacementRejection::OutOfRange))),
        format!("{:?}", distant),
    ));

    // Walk east into the wall
    let walk = InputSnapshot::idle(engine.player().position + Vec2::new(1000.0, 0.0)).with_forward();
    for _ in 0..180 {
        engine.update(FRAME, &walk);
    }
    let wall = cell.rect(building.grid_size);
    let p = engine.player();
    results.push(TestResult::new(
        "build_wall_blocks",
        p.position.x + p.radius <= wall.x + 0.01,
        format!("stopped at x={:.1}, wall face at {:.1}", p.position.x, wall.x),
    ));

    if verbose {
        println!("  structures: {}", engine.world().structures.len());
    }

    results
}

// ── 5. Enemy AI ─────────────────────────────────────────────────────────

fn validate_enemy_ai(config: &SimConfig, verbose: bool) -> Vec<TestResult> {
    println!("--- Wolf AI ---");
    let mut results = Vec::new();
    let enemy_config = &config.enemy;

    let mut engine = empty_engine(config);
    let start = engine.player().position + Vec2::new(enemy_config.near_threshold * 0.8, 0.0);
    let id = engine.world.next_id();
    engine.world.add_enemy(Enemy::new(id, engine.world.clamp_point(start), enemy_config));

    let idle = InputSnapshot::idle(engine.player().position);
    engine.update(FRAME, &idle);
    let state = engine.world().enemy(id).map(|e| e.state);
    results.push(TestResult::new(
        "ai_notices_player",
        state == Some(EnemyState::Chase),
        format!("{:?}", state),
    ));

    let mut reached_attack = false;
    let mut first_bite = None;
    for tick in 0..3000 {
        let report = engine.update(FRAME, &idle);
        if let Some(enemy) = engine.world().enemy(id) {
            reached_attack |= matches!(enemy.state, EnemyState::Attack { .. });
        }
        if first_bite.is_none() && engine.player().health < config.player.max_stat {
            first_bite = Some(tick);
        }
        if report.player_died {
            break;
        }
    }
    results.push(TestResult::new(
        "ai_closes_to_melee",
        reached_attack,
        "wolf entered the attack state",
    ));
    results.push(TestResult::new(
        "ai_bites",
        first_bite.is_some(),
        format!("first damage at tick {:?}", first_bite),
    ));
    results.push(TestResult::new(
        "ai_kills_idle_player",
        engine.player().dead,
        format!("player health {:.1}", engine.player().health),
    ));

    // Far away wolves keep wandering
    let mut engine = empty_engine(config);
    let far = engine.player().position + Vec2::new(enemy_config.far_threshold * 2.0, 0.0);
    let id = engine.world.next_id();
    engine.world.add_enemy(Enemy::new(id, engine.world.clamp_point(far), enemy_config));
    let mut stayed_idle = true;
    for _ in 0..600 {
        engine.update(FRAME, &idle);
        let player = engine.player().position;
        if let Some(enemy) = engine.world().enemy(id) {
            let d = enemy.position.distance(&player);
            if d >= enemy_config.near_threshold {
                stayed_idle &= enemy.state.is_idle();
            }
        }
    }
    results.push(TestResult::new(
        "ai_ignores_distant_player",
        stayed_idle,
        "wolf beyond the notice range never chased",
    ));

    if verbose {
        if let Some(enemy) = engine.world().enemy(id) {
            println!("  distant wolf ended at ({:.0}, {:.0}) {}", enemy.position.x, enemy.position.y, enemy.state.name());
        }
    }

    results
}

// ── 6. Soak ─────────────────────────────────────────────────────────────

fn validate_soak(config: &SimConfig, verbose: bool) -> (Vec<TestResult>, SimulationEngine) {
    println!("--- Soak ---");
    let mut results = Vec::new();

    let mut engine = empty_engine(config);
    engine.generate();

    let mut deaths = 0;
    let mut gathered = 0;
    let mut violations = Vec::new();
    let max = config.player.max_stat;

    for tick in 0..(60 * 120) {
        if engine.player().dead {
            deaths += 1;
            engine.respawn();
        }

        // Wander in a slow spiral, swinging every frame
        let angle = tick as f32 * 0.01;
        let pointer = engine.player().position + Vec2::from_angle(angle) * 100.0;
        let mut input = InputSnapshot::idle(pointer).with_primary();
        input.forward = (tick / 90) % 3 != 0;

        let report = engine.update(FRAME, &input);
        if let Some(ActionOutcome::Attack(AttackOutcome::Gathered { .. })) = report.action {
            gathered += 1;
        }

        let p = engine.player();
        let world = engine.world();
        if !world.contains(p.position) {
            violations.push(format!("tick {}: player outside world", tick));
        }
        if !(0.0..=max).contains(&p.hunger) || !(0.0..=max).contains(&p.thirst) {
            violations.push(format!("tick {}: vitals out of range", tick));
        }
        if let Some(e) = world.enemies.iter().find(|e| !world.contains(e.position)) {
            violations.push(format!("tick {}: wolf {} outside world", tick, e.id));
        }
        if let Some(h) = world.harvestables.iter().find(|h| h.is_depleted()) {
            violations.push(format!("tick {}: depleted node {} survived prune", tick, h.id));
        }
    }

    results.push(TestResult::new(
        "soak_invariants",
        violations.is_empty(),
        match violations.first() {
            Some(v) => format!("{} violations, first: {}", violations.len(), v),
            None => format!("{} ticks clean", engine.tick_count()),
        },
    ));

    if verbose {
        println!(
            "  {:.0}s simulated, {} deaths, {} gathering hits, {} nodes left",
            engine.sim_time(),
            deaths,
            gathered,
            engine.world().harvestables.len()
        );
    }

    (results, engine)
}
