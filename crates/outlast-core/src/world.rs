//! The bounded world: resource nodes, structures and enemies.
//!
//! Collections keep insertion order. Collision queries walk them in that
//! order and report the first blocker, so older objects win ties.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::components::{Enemy, GridCell, Harvestable, Structure};
use crate::config::EnemyConfig;
use crate::geometry::{clamp, Rect, Vec2};
use crate::player::Player;
use crate::systems::enemy_ai_system;

/// Anything with a rectangle that blocks movement
pub trait Collider {
    fn collision_rect(&self) -> Rect;
}

impl Collider for Harvestable {
    fn collision_rect(&self) -> Rect {
        Harvestable::collision_rect(self)
    }
}

impl Collider for Structure {
    fn collision_rect(&self) -> Rect {
        self.rect
    }
}

/// Object returned by [`World::query_collision`]
#[derive(Debug, Clone, Copy)]
pub enum Blocker<'a> {
    Harvestable(&'a Harvestable),
    Structure(&'a Structure),
}

impl Blocker<'_> {
    pub fn id(&self) -> u32 {
        match self {
            Blocker::Harvestable(h) => h.id,
            Blocker::Structure(s) => s.id,
        }
    }
}

impl Collider for Blocker<'_> {
    fn collision_rect(&self) -> Rect {
        match self {
            Blocker::Harvestable(h) => Collider::collision_rect(*h),
            Blocker::Structure(s) => Collider::collision_rect(*s),
        }
    }
}

/// Number of objects removed by one prune pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PruneReport {
    pub harvestables: usize,
    pub structures: usize,
    pub enemies: usize,
}

impl PruneReport {
    pub fn total(&self) -> usize {
        self.harvestables + self.structures + self.enemies
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub width: f32,
    pub height: f32,
    pub harvestables: Vec<Harvestable>,
    pub structures: Vec<Structure>,
    pub enemies: Vec<Enemy>,
    next_id: u32,
}

impl World {
    /// Empty world with the given bounds
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            harvestables: Vec::new(),
            structures: Vec::new(),
            enemies: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a fresh object id, unique across all collections.
    pub fn next_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// Clamp a point into `[0, width] x [0, height]`.
    pub fn clamp_point(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            clamp(point.x, 0.0, self.width),
            clamp(point.y, 0.0, self.height),
        )
    }

    pub fn contains(&self, point: Vec2) -> bool {
        self.bounds().contains(point)
    }

    pub fn add_harvestable(&mut self, harvestable: Harvestable) {
        self.harvestables.push(harvestable);
    }

    /// Append a structure. Placement rules are enforced by the caller.
    pub fn add_structure(&mut self, structure: Structure) {
        self.structures.push(structure);
    }

    pub fn add_enemy(&mut self, enemy: Enemy) {
        self.enemies.push(enemy);
    }

    pub fn structure_at(&self, cell: GridCell) -> Option<&Structure> {
        self.structures.iter().find(|s| s.cell == cell)
    }

    pub fn harvestable(&self, id: u32) -> Option<&Harvestable> {
        self.harvestables.iter().find(|h| h.id == id)
    }

    pub fn enemy(&self, id: u32) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id)
    }

    /// First object whose collision box overlaps the circle, harvestables
    /// before structures.
    pub fn query_collision(&self, x: f32, y: f32, radius: f32) -> Option<Blocker<'_>> {
        if let Some(h) = self
            .harvestables
            .iter()
            .find(|h| h.collision_rect().intersects_circle(x, y, radius))
        {
            return Some(Blocker::Harvestable(h));
        }
        self.structures
            .iter()
            .find(|s| s.rect.intersects_circle(x, y, radius))
            .map(Blocker::Structure)
    }

    /// Drop everything whose health has run out.
    pub fn prune(&mut self) -> PruneReport {
        let before = (self.harvestables.len(), self.structures.len(), self.enemies.len());

        self.harvestables.retain(|h| !h.is_depleted());
        self.structures.retain(|s| !s.is_destroyed());
        self.enemies.retain(|e| !e.is_dead());

        PruneReport {
            harvestables: before.0 - self.harvestables.len(),
            structures: before.1 - self.structures.len(),
            enemies: before.2 - self.enemies.len(),
        }
    }

    /// Advance one tick: prune, then run enemy AI against the player.
    pub fn tick(
        &mut self,
        dt: f32,
        player: &mut Player,
        enemy_config: &EnemyConfig,
        rng: &mut impl Rng,
    ) -> PruneReport {
        let pruned = self.prune();
        if pruned.total() > 0 {
            log::debug!(
                "Pruned {} harvestables, {} structures, {} enemies",
                pruned.harvestables,
                pruned.structures,
                pruned.enemies
            );
        }

        let bounds = self.bounds();
        enemy_ai_system(&mut self.enemies, player, bounds, enemy_config, dt, rng);

        pruned
    }
}
