//! Simulation tunables.
//!
//! Every difficulty-relevant constant lives here so tests and the harness can
//! run the same code under different parameter sets. Defaults are the values
//! the game ships with. JSON files may specify any subset of fields; missing
//! fields fall back to the defaults.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::components::{Recipe, ResourceKind};
use crate::geometry::Vec2;

/// Top-level simulation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for generation and wandering
    pub seed: u64,
    /// Upper bound on elapsed seconds consumed by a single tick
    pub max_frame_dt: f32,
    pub world: WorldConfig,
    pub player: PlayerConfig,
    pub survival: SurvivalConfig,
    pub combat: CombatConfig,
    pub building: BuildingConfig,
    pub enemy: EnemyConfig,
    pub generation: GenerationConfig,
    pub recipes: Vec<Recipe>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            max_frame_dt: 0.1,
            world: WorldConfig::default(),
            player: PlayerConfig::default(),
            survival: SurvivalConfig::default(),
            combat: CombatConfig::default(),
            building: BuildingConfig::default(),
            enemy: EnemyConfig::default(),
            generation: GenerationConfig::default(),
            recipes: default_recipes(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub width: f32,
    pub height: f32,
    /// Player spawn point; `None` means the world center
    pub spawn: Option<Vec2>,
    /// How far a harvestable's collision box is shrunk on each side
    pub harvestable_collision_inset: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 3000.0,
            height: 3000.0,
            spawn: None,
            harvestable_collision_inset: 20.0,
        }
    }
}

impl WorldConfig {
    pub fn spawn_point(&self) -> Vec2 {
        self.spawn
            .unwrap_or_else(|| Vec2::new(self.width / 2.0, self.height / 2.0))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub radius: f32,
    /// Movement speed in units per second
    pub speed: f32,
    /// Cap for health, hunger and thirst
    pub max_stat: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            radius: 20.0,
            speed: 220.0,
            max_stat: 100.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SurvivalConfig {
    /// Hunger lost per second
    pub hunger_decay: f32,
    /// Thirst lost per second
    pub thirst_decay: f32,
    /// Health lost per second while hunger or thirst is empty
    pub starvation_damage: f32,
}

impl Default for SurvivalConfig {
    fn default() -> Self {
        Self {
            hunger_decay: 0.5,
            thirst_decay: 0.7,
            starvation_damage: 1.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// Max distance from the player to the pointer for a melee swing
    pub reach: f32,
    /// Pointer tolerance radius when hit-testing targets
    pub hit_radius: f32,
    /// Damage dealt to a harvestable per swing
    pub gather_damage: f32,
    /// Resource units credited per successful gather
    pub gather_yield: u32,
    /// Damage dealt to an enemy per swing
    pub attack_damage: f32,
    /// Distance an enemy is pushed away from the player when hit
    pub knockback: f32,
    /// Seconds between swings
    pub attack_cooldown: f32,
    /// Seconds the swing animation flag stays raised
    pub attack_flash: f32,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            reach: 120.0,
            hit_radius: 10.0,
            gather_damage: 25.0,
            gather_yield: 10,
            attack_damage: 35.0,
            knockback: 30.0,
            attack_cooldown: 0.5,
            attack_flash: 0.2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildingConfig {
    /// Side length of a build grid cell (and of every structure)
    pub grid_size: f32,
    /// Max distance from the player to the target cell's center
    pub build_range: f32,
    /// Seconds between placements
    pub place_cooldown: f32,
    pub structure_health: f32,
}

impl Default for BuildingConfig {
    fn default() -> Self {
        Self {
            grid_size: 50.0,
            build_range: 200.0,
            place_cooldown: 0.2,
            structure_health: 200.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub radius: f32,
    /// Chase speed in units per second
    pub speed: f32,
    pub health: f32,
    /// Damage per bite
    pub contact_damage: f32,
    /// Idle enemies start chasing below this distance
    pub near_threshold: f32,
    /// Chasing enemies give up above this distance
    pub far_threshold: f32,
    /// Chasing enemies start attacking below this distance
    pub melee_threshold: f32,
    /// Seconds between bites
    pub attack_interval: f32,
    /// Delay before the first bite after closing in
    pub attack_windup: f32,
    /// Max wander speed while idle
    pub wander_speed: f32,
    pub wander_timer_min: f32,
    pub wander_timer_max: f32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            radius: 20.0,
            speed: 150.0,
            health: 100.0,
            contact_damage: 10.0,
            near_threshold: 300.0,
            far_threshold: 500.0,
            melee_threshold: 40.0,
            attack_interval: 1.0,
            attack_windup: 0.3,
            wander_speed: 40.0,
            wander_timer_min: 2.0,
            wander_timer_max: 5.0,
        }
    }
}

/// Size and durability of one harvestable kind
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NodeSpec {
    pub size: f32,
    pub health: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub forest_clusters: u32,
    /// Inclusive range of trees per forest
    pub trees_per_forest: (u32, u32),
    /// Max offset of a tree from its forest center
    pub forest_spread: f32,
    pub rock_fields: u32,
    /// Inclusive range of rocks per field
    pub rocks_per_field: (u32, u32),
    pub rock_field_spread: f32,
    /// Probability that a rock-field member is metal ore instead of stone
    pub ore_chance: f64,
    pub enemy_count: u32,
    pub tree: NodeSpec,
    pub rock: NodeSpec,
    pub ore: NodeSpec,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            forest_clusters: 14,
            trees_per_forest: (6, 14),
            forest_spread: 220.0,
            rock_fields: 8,
            rocks_per_field: (4, 9),
            rock_field_spread: 160.0,
            ore_chance: 0.2,
            enemy_count: 10,
            tree: NodeSpec {
                size: 60.0,
                health: 100.0,
            },
            rock: NodeSpec {
                size: 50.0,
                health: 150.0,
            },
            ore: NodeSpec {
                size: 45.0,
                health: 200.0,
            },
        }
    }
}

/// Recipes available from the crafting menu
pub fn default_recipes() -> Vec<Recipe> {
    vec![
        Recipe::new("Wood Wall", "wall_wood", [(ResourceKind::Wood, 50)]),
        Recipe::new(
            "Stone Wall",
            "wall_stone",
            [(ResourceKind::Stone, 50), (ResourceKind::Wood, 10)],
        ),
        Recipe::new("Door", "door_wood", [(ResourceKind::Wood, 30)]),
    ]
}

impl SimConfig {
    /// Parse a JSON document and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check cross-field constraints the type system can't express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(name: &str, value: f32) -> Result<(), ConfigError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid(format!(
                    "{} must be positive, got {}",
                    name, value
                )))
            }
        }

        positive("max_frame_dt", self.max_frame_dt)?;
        positive("world.width", self.world.width)?;
        positive("world.height", self.world.height)?;
        positive("player.radius", self.player.radius)?;
        positive("player.speed", self.player.speed)?;
        positive("player.max_stat", self.player.max_stat)?;
        positive("combat.reach", self.combat.reach)?;
        positive("building.grid_size", self.building.grid_size)?;
        positive("building.structure_health", self.building.structure_health)?;
        positive("enemy.radius", self.enemy.radius)?;
        positive("enemy.health", self.enemy.health)?;

        if let Some(spawn) = self.world.spawn {
            if !(spawn.x.is_finite() && spawn.y.is_finite())
                || spawn.x < 0.0
                || spawn.x > self.world.width
                || spawn.y < 0.0
                || spawn.y > self.world.height
            {
                return Err(ConfigError::Invalid(format!(
                    "spawn ({}, {}) lies outside the world",
                    spawn.x, spawn.y
                )));
            }
        }

        let e = &self.enemy;
        if !(e.melee_threshold < e.near_threshold && e.near_threshold < e.far_threshold) {
            return Err(ConfigError::Invalid(format!(
                "enemy thresholds must satisfy melee < near < far, got {} / {} / {}",
                e.melee_threshold, e.near_threshold, e.far_threshold
            )));
        }
        if e.wander_timer_min <= 0.0 || e.wander_timer_min > e.wander_timer_max {
            return Err(ConfigError::Invalid(format!(
                "wander timer range [{}, {}] is empty",
                e.wander_timer_min, e.wander_timer_max
            )));
        }

        let g = &self.generation;
        if g.trees_per_forest.0 > g.trees_per_forest.1 || g.rocks_per_field.0 > g.rocks_per_field.1 {
            return Err(ConfigError::Invalid(
                "cluster member ranges must be min <= max".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&g.ore_chance) {
            return Err(ConfigError::Invalid(format!(
                "ore_chance must be within [0, 1], got {}",
                g.ore_chance
            )));
        }

        for recipe in &self.recipes {
            if recipe.cost.values().all(|&amount| amount == 0) {
                return Err(ConfigError::Invalid(format!(
                    "recipe '{}' has no cost",
                    recipe.name
                )));
            }
        }

        Ok(())
    }
}

/// Errors that can occur while loading tunables
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Json(e) => write!(f, "Config parse error: {}", e),
            ConfigError::Invalid(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Json(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

/// Total cost of a recipe, for display.
pub fn format_cost(cost: &BTreeMap<ResourceKind, u32>) -> String {
    cost.iter()
        .map(|(kind, amount)| format!("{}:{}", kind, amount))
        .collect::<Vec<_>>()
        .join(", ")
}
