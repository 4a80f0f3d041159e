//! Trees, rocks and ore nodes.

use serde::{Deserialize, Serialize};

use super::resources::ResourceKind;
use crate::geometry::{Rect, Vec2};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HarvestableKind {
    Tree,
    Rock,
    MetalOre,
}

impl HarvestableKind {
    pub fn resource(&self) -> ResourceKind {
        match self {
            HarvestableKind::Tree => ResourceKind::Wood,
            HarvestableKind::Rock => ResourceKind::Stone,
            HarvestableKind::MetalOre => ResourceKind::Metal,
        }
    }

    /// Display color hint for renderers
    pub fn color(&self) -> &'static str {
        match self {
            HarvestableKind::Tree => "#2d5a27",
            HarvestableKind::Rock => "#5a5a5a",
            HarvestableKind::MetalOre => "#8a6f4e",
        }
    }
}

/// A resource node in the world
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Harvestable {
    pub id: u32,
    pub kind: HarvestableKind,
    /// Center of the node
    pub position: Vec2,
    /// Side length of the drawn footprint
    pub size: f32,
    /// Side length of the blocking box, never larger than `size`
    pub collision_size: f32,
    pub health: f32,
    pub max_health: f32,
    pub resource: ResourceKind,
}

impl Harvestable {
    pub fn new(
        id: u32,
        kind: HarvestableKind,
        position: Vec2,
        size: f32,
        health: f32,
        collision_inset: f32,
    ) -> Self {
        Self {
            id,
            kind,
            position,
            size,
            collision_size: (size - 2.0 * collision_inset).max(0.0),
            health,
            max_health: health,
            resource: kind.resource(),
        }
    }

    /// Display color, fixed by the node kind
    pub fn color(&self) -> &'static str {
        self.kind.color()
    }

    /// Full drawn footprint
    pub fn footprint(&self) -> Rect {
        Rect::centered(self.position, self.size, self.size)
    }

    /// Inset box that blocks movement
    pub fn collision_rect(&self) -> Rect {
        Rect::centered(self.position, self.collision_size, self.collision_size)
    }

    pub fn is_depleted(&self) -> bool {
        self.health <= 0.0
    }
}
