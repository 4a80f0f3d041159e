//! Action resolution - building placement and melee swings.
//!
//! Invalid actions never fail loudly: they leave the world and the player
//! untouched and report why through the returned outcome.

use serde::{Deserialize, Serialize};

use super::Player;
use crate::components::{GridCell, Item, ResourceKind, Structure};
use crate::config::{BuildingConfig, CombatConfig};
use crate::geometry::{circle_rect_intersect, distance, Vec2};
use crate::world::World;

/// Result of one primary action
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ActionOutcome {
    /// Placement attempt; `Ok` carries the new structure's id
    Build(Result<u32, PlacementRejection>),
    Attack(AttackOutcome),
}

/// Why a placement was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlacementRejection {
    /// Cell center is beyond build range
    OutOfRange,
    /// Cell sticks out of the world
    OutOfBounds,
    /// Cell would overlap the player
    OverlapsPlayer,
    /// A structure already sits in that cell
    Occupied,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AttackOutcome {
    /// Hit a resource node and collected from it
    Gathered {
        target: u32,
        resource: ResourceKind,
        amount: u32,
    },
    /// Hit an enemy and knocked it back
    HitEnemy { target: u32 },
    /// Pointer beyond reach
    OutOfReach,
    /// Swung at nothing
    Missed,
}

impl Player {
    /// Place `item` in the grid cell under `(x, y)` and consume it from the
    /// active slot.
    pub fn place_structure(
        &mut self,
        world: &mut World,
        x: f32,
        y: f32,
        item: &Item,
        config: &BuildingConfig,
    ) -> Result<u32, PlacementRejection> {
        let cell = GridCell::containing(x, y, config.grid_size);
        let footprint = cell.rect(config.grid_size);
        let center = footprint.center();
        let bounds = world.bounds();
        let far_corner = Vec2::new(footprint.x + footprint.w, footprint.y + footprint.h);

        let rejection = if distance(self.position.x, self.position.y, center.x, center.y) > config.build_range {
            Some(PlacementRejection::OutOfRange)
        } else if !(bounds.contains(Vec2::new(footprint.x, footprint.y)) && bounds.contains(far_corner)) {
            Some(PlacementRejection::OutOfBounds)
        } else if circle_rect_intersect(self.position.x, self.position.y, self.radius, &footprint) {
            Some(PlacementRejection::OverlapsPlayer)
        } else if world.structure_at(cell).is_some() {
            Some(PlacementRejection::Occupied)
        } else {
            None
        };
        if let Some(reason) = rejection {
            log::debug!("Placement at ({}, {}) rejected: {:?}", cell.col, cell.row, reason);
            return Err(reason);
        }

        let id = world.next_id();
        world.add_structure(Structure::new(
            id,
            item.structure_kind(),
            cell,
            config.grid_size,
            config.structure_health,
        ));
        self.hotbar.take(self.active_slot);

        log::debug!("Placed {:?} #{} at ({}, {})", item.structure_kind(), id, cell.col, cell.row);
        Ok(id)
    }

    /// Swing at `(x, y)`. Resource nodes are checked before enemies and at most
    /// one target is affected.
    pub fn attack(&mut self, world: &mut World, x: f32, y: f32, config: &CombatConfig) -> AttackOutcome {
        if distance(self.position.x, self.position.y, x, y) > config.reach {
            return AttackOutcome::OutOfReach;
        }

        if let Some(node) = world
            .harvestables
            .iter_mut()
            .find(|h| circle_rect_intersect(x, y, config.hit_radius, &h.footprint()))
        {
            node.health -= config.gather_damage;
            self.inventory.add(node.resource, config.gather_yield);
            return AttackOutcome::Gathered {
                target: node.id,
                resource: node.resource,
                amount: config.gather_yield,
            };
        }

        if let Some(enemy) = world
            .enemies
            .iter_mut()
            .find(|e| distance(x, y, e.position.x, e.position.y) < e.radius + config.hit_radius)
        {
            enemy.health -= config.attack_damage;
            let away = (enemy.position - self.position).normalize();
            enemy.position += away * config.knockback;
            return AttackOutcome::HitEnemy { target: enemy.id };
        }

        AttackOutcome::Missed
    }
}
