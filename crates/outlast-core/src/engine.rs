//! Simulation engine - main entry point for running the simulation

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, SimConfig};
use crate::generation::{generate_enemies, generate_forests, generate_rock_fields};
use crate::input::InputSnapshot;
use crate::player::{ActionOutcome, CraftError, Player};
use crate::world::{PruneReport, World};

/// What one call to [`SimulationEngine::update`] did
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    /// Seconds actually simulated after clamping
    pub dt: f32,
    pub action: Option<ActionOutcome>,
    pub pruned: PruneReport,
    /// The player crossed zero health during this tick
    pub player_died: bool,
    /// The tick was skipped because the player is dead
    pub paused: bool,
}

/// Counts of what [`SimulationEngine::generate`] placed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationSummary {
    pub trees: usize,
    pub rocks: usize,
    pub enemies: usize,
}

/// Read-only copy of the whole simulation state for presentation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub sim_time: f64,
    pub player: Player,
    pub world: World,
}

/// Main simulation engine
#[derive(Debug, Clone)]
pub struct SimulationEngine {
    /// Resource nodes, structures and enemies
    pub world: World,
    pub player: Player,
    /// Seconds simulated since start
    pub sim_time: f64,
    config: SimConfig,
    rng: StdRng,
    ticks: u64,
}

impl SimulationEngine {
    /// Create an empty world with the player at the spawn point.
    ///
    /// Tunables are validated first; a config that would break the tick
    /// (inverted ranges, non-finite stats) is rejected here.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    fn from_valid(config: SimConfig) -> Self {
        let world = World::new(config.world.width, config.world.height);
        let player = Player::new(config.world.spawn_point(), &config.player);
        Self {
            world,
            player,
            sim_time: 0.0,
            rng: StdRng::seed_from_u64(config.seed),
            config,
            ticks: 0,
        }
    }

    /// Populate the world with forests, rock fields and wolves. Meant to run
    /// once per session.
    pub fn generate(&mut self) -> GenerationSummary {
        let trees = generate_forests(&mut self.world, &self.config, &mut self.rng);
        let rocks = generate_rock_fields(&mut self.world, &self.config, &mut self.rng);
        let enemies = generate_enemies(&mut self.world, &self.config, &mut self.rng);

        let summary = GenerationSummary {
            trees: trees.len(),
            rocks: rocks.len(),
            enemies: enemies.len(),
        };
        log::info!(
            "Generated {}x{} world: {} trees, {} rocks, {} enemies",
            self.world.width,
            self.world.height,
            summary.trees,
            summary.rocks,
            summary.enemies
        );
        summary
    }

    /// Update the simulation by `delta_seconds`.
    ///
    /// The step is clamped to `max_frame_dt` so a long stall can't tunnel
    /// through colliders or dump a burst of starvation damage. While the
    /// player is dead nothing advances.
    pub fn update(&mut self, delta_seconds: f32, input: &InputSnapshot) -> TickReport {
        if self.player.dead {
            return TickReport {
                paused: true,
                ..TickReport::default()
            };
        }

        let dt = clamp_dt(delta_seconds, self.config.max_frame_dt);

        let action = self.player.update(dt, input, &mut self.world, &self.config);
        let pruned = self
            .world
            .tick(dt, &mut self.player, &self.config.enemy, &mut self.rng);

        self.sim_time += dt as f64;
        self.ticks += 1;

        TickReport {
            dt,
            action,
            pruned,
            player_died: self.player.dead,
            paused: false,
        }
    }

    /// Bring the player back after death. Structures stay in the world.
    pub fn respawn(&mut self) {
        self.player.respawn();
    }

    /// Select the active hotbar slot; out-of-range indices are ignored.
    pub fn select_slot(&mut self, slot: usize) -> bool {
        self.player.select_slot(slot)
    }

    /// Craft the recipe at `index` in the configured recipe list.
    pub fn craft(&mut self, index: usize) -> Result<usize, CraftError> {
        let recipe = self
            .config
            .recipes
            .get(index)
            .ok_or(CraftError::UnknownRecipe(index))?;
        self.player.craft(recipe)
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Get current simulation time in seconds
    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    /// Number of ticks that actually advanced the simulation
    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            sim_time: self.sim_time,
            player: self.player.clone(),
            world: self.world.clone(),
        }
    }
}

impl Default for SimulationEngine {
    fn default() -> Self {
        Self::from_valid(SimConfig::default())
    }
}

/// Non-finite or negative steps become zero; large steps are capped.
fn clamp_dt(dt: f32, max: f32) -> f32 {
    if dt.is_finite() && dt > 0.0 {
        dt.min(max)
    } else {
        0.0
    }
}
