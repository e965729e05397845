use glam::{IVec2, UVec2};
use mazechase::{
    constants::{mechanics::PLAYER_START, CELL_BONUS, CELL_SIZE, CELL_WALL, RAW_BOARD},
    map::{
        builder::{cell_origin, Level, Wall},
        parser::LevelGrid,
    },
    systems::{hits_wall, Enemy, EnemyKind, Player},
};
use pretty_assertions::assert_eq;
use speculoos::prelude::*;
use strum::IntoEnumIterator;

mod common;

fn builtin_level() -> Level {
    let grid = LevelGrid::parse(&RAW_BOARD).expect("built-in board should parse");
    Level::from_grid(&grid)
}

fn count_cells(code: u8) -> usize {
    RAW_BOARD.iter().flatten().filter(|&&cell| cell == code).count()
}

#[test]
fn test_builtin_level_counts() {
    let level = builtin_level();
    assert_eq!(level.walls.len(), count_cells(CELL_WALL));
    assert_eq!(level.bonuses.len(), count_cells(CELL_BONUS));
    assert_that(&level.bonuses.len()).is_greater_than(0);
    assert_eq!(level.remaining_bonuses(), level.bonuses.len());
    assert_that(&level.all_collected()).is_false();
}

#[test]
fn test_walls_cover_their_cell() {
    let wall = Wall::at_cell(UVec2::new(3, 2));
    assert_eq!(wall.hitbox.position, IVec2::new(120, 80));
    assert_eq!(wall.hitbox.size, UVec2::splat(CELL_SIZE));
    assert_eq!(cell_origin(UVec2::new(19, 14)), IVec2::new(760, 560));
}

#[test]
fn test_bonus_items_are_centred_in_their_cell() {
    let level = builtin_level();
    // The first bonus cell in row-major order is (2, 1).
    assert_eq!(level.bonuses[0].position, IVec2::new(95, 55));
    assert_eq!(level.bonuses[0].center(), IVec2::new(100, 60));
    assert_that(&level.bonuses.iter().any(|bonus| bonus.collected)).is_false();
}

#[test]
fn test_spawns_are_clear_of_walls_and_bonuses() {
    let level = builtin_level();

    let player = Player::new(PLAYER_START);
    assert_that(&hits_wall(&player.hitbox(), &level.walls)).is_false();
    assert_that(&level.bonuses.iter().any(|bonus| bonus.hitbox().overlaps(&player.hitbox()))).is_false();

    for kind in EnemyKind::iter() {
        let enemy = Enemy::new(kind);
        assert_that(&hits_wall(&enemy.hitbox(), &level.walls)).is_false();
        assert_that(&enemy.hitbox().overlaps(&player.hitbox())).is_false();
    }
}

#[test]
fn test_rebuilding_resets_bonuses() {
    let grid = LevelGrid::parse(&common::board_with_bonuses(&[(4, 4)])).expect("board should parse");
    let mut level = Level::from_grid(&grid);
    level.bonuses[0].collect();
    assert_that(&level.all_collected()).is_true();
    assert_eq!(level.remaining_bonuses(), 0);

    let rebuilt = Level::from_grid(&grid);
    assert_that(&rebuilt.bonuses[0].collected).is_false();
    assert_eq!(rebuilt.walls, level.walls);
}
