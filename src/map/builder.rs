//! Level construction from a parsed grid.

use bevy_ecs::resource::Resource;
use glam::{IVec2, UVec2};
use tracing::debug;

use crate::constants::{mechanics::BONUS_SIZE, MapTile, CELL_SIZE};
use crate::map::parser::LevelGrid;
use crate::systems::collision::Hitbox;
use crate::systems::item::BonusItem;

/// A solid, one-cell wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wall {
    pub hitbox: Hitbox,
}

impl Wall {
    /// Creates the wall covering the given grid cell.
    pub fn at_cell(cell: UVec2) -> Self {
        Self {
            hitbox: Hitbox::new(cell_origin(cell), UVec2::splat(CELL_SIZE)),
        }
    }
}

/// The static layout of one level instance: its walls and its bonus items.
///
/// Walls never change; bonus items are rebuilt (and so become uncollected again)
/// every time the level is rebuilt.
#[derive(Resource, Debug, Clone)]
pub struct Level {
    pub walls: Vec<Wall>,
    pub bonuses: Vec<BonusItem>,
}

impl Level {
    /// Builds the walls and bonus items for a grid, in row-major order.
    pub fn from_grid(grid: &LevelGrid) -> Level {
        let mut walls = Vec::new();
        let mut bonuses = Vec::new();

        for (cell, tile) in grid.cells() {
            match tile {
                MapTile::Wall => walls.push(Wall::at_cell(cell)),
                MapTile::Bonus => {
                    let inset = ((CELL_SIZE - BONUS_SIZE) / 2) as i32;
                    bonuses.push(BonusItem::new(cell_origin(cell) + IVec2::splat(inset)));
                }
                MapTile::Empty => {}
            }
        }

        debug!(walls = walls.len(), bonuses = bonuses.len(), size = ?grid.size(), "Built level");
        Level { walls, bonuses }
    }

    /// How many bonus items are still on the board.
    pub fn remaining_bonuses(&self) -> usize {
        self.bonuses.iter().filter(|bonus| !bonus.collected).count()
    }

    /// True once every bonus item has been collected.
    pub fn all_collected(&self) -> bool {
        self.bonuses.iter().all(|bonus| bonus.collected)
    }
}

/// The pixel position of a cell's top-left corner.
pub fn cell_origin(cell: UVec2) -> IVec2 {
    (cell * CELL_SIZE).as_ivec2()
}
