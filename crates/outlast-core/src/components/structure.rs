//! Player-built structures.

use serde::{Deserialize, Serialize};

use crate::geometry::Rect;

/// Structure variant, decided by the placed item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureKind {
    WoodWall,
    StoneWall,
    WoodDoor,
}

impl StructureKind {
    /// Classify an item id such as `wall_stone` or `door_wood`.
    pub fn from_item_id(id: &str) -> Self {
        if id.contains("door") {
            StructureKind::WoodDoor
        } else if id.contains("stone") {
            StructureKind::StoneWall
        } else {
            StructureKind::WoodWall
        }
    }
}

/// Integer coordinates of a build grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCell {
    pub col: i32,
    pub row: i32,
}

impl GridCell {
    /// Cell containing the world point, snapping down.
    pub fn containing(x: f32, y: f32, grid_size: f32) -> Self {
        Self {
            col: (x / grid_size).floor() as i32,
            row: (y / grid_size).floor() as i32,
        }
    }

    /// Cell footprint in world space
    pub fn rect(&self, grid_size: f32) -> Rect {
        Rect::new(
            self.col as f32 * grid_size,
            self.row as f32 * grid_size,
            grid_size,
            grid_size,
        )
    }
}

/// A grid-aligned wall or door
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Structure {
    pub id: u32,
    pub kind: StructureKind,
    pub cell: GridCell,
    /// Top-left corner and size in world space
    pub rect: Rect,
    pub health: f32,
}

impl Structure {
    pub fn new(id: u32, kind: StructureKind, cell: GridCell, grid_size: f32, health: f32) -> Self {
        Self {
            id,
            kind,
            cell,
            rect: cell.rect(grid_size),
            health,
        }
    }

    pub fn is_destroyed(&self) -> bool {
        self.health <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_item_id() {
        assert_eq!(StructureKind::from_item_id("wall_wood"), StructureKind::WoodWall);
        assert_eq!(StructureKind::from_item_id("wall_stone"), StructureKind::StoneWall);
        assert_eq!(StructureKind::from_item_id("door_wood"), StructureKind::WoodDoor);
    }

    #[test]
    fn test_grid_snaps_down() {
        assert_eq!(GridCell::containing(149.9, 50.0, 50.0), GridCell { col: 2, row: 1 });
        assert_eq!(GridCell::containing(-0.1, 0.0, 50.0), GridCell { col: -1, row: 0 });
        let rect = GridCell { col: 2, row: 1 }.rect(50.0);
        assert_eq!(rect, Rect::new(100.0, 50.0, 50.0, 50.0));
    }
}
