#![allow(dead_code)]

use bevy_ecs::{
    entity::Entity,
    event::{EventRegistry, Events},
    world::World,
};
use glam::{IVec2, Vec2};
use mazechase::{
    constants::{BOARD_CELL_SIZE, CELL_BONUS, CELL_EMPTY, CELL_WALL},
    error::GameError,
    game::Game,
    map::{builder::Level, parser::LevelGrid},
    systems::{
        command_observer, Enemy, EnemyKind, GameStage, GlobalState, HeldKeys, InputState, LevelNumber, Player,
        ScoreResource,
    },
};

/// A full-size board with a wall border and an empty interior.
pub fn open_board() -> Vec<Vec<u8>> {
    let (width, height) = (BOARD_CELL_SIZE.x as usize, BOARD_CELL_SIZE.y as usize);
    (0..height)
        .map(|row| {
            (0..width)
                .map(|column| {
                    if row == 0 || column == 0 || row == height - 1 || column == width - 1 {
                        CELL_WALL
                    } else {
                        CELL_EMPTY
                    }
                })
                .collect()
        })
        .collect()
}

/// An open board with extra walls at the given `(column, row)` cells.
pub fn board_with_walls(walls: &[(usize, usize)]) -> Vec<Vec<u8>> {
    let mut board = open_board();
    for &(column, row) in walls {
        board[row][column] = CELL_WALL;
    }
    board
}

/// An open board with bonus items at the given `(column, row)` cells.
pub fn board_with_bonuses(bonuses: &[(usize, usize)]) -> Vec<Vec<u8>> {
    let mut board = open_board();
    for &(column, row) in bonuses {
        board[row][column] = CELL_BONUS;
    }
    board
}

/// Builds a world holding every resource the gameplay systems read, but no entities.
pub fn create_test_world(board: &[Vec<u8>]) -> World {
    let grid = LevelGrid::parse(board).expect("test board should parse");
    let mut world = World::new();

    EventRegistry::register_event::<GameError>(&mut world);
    world.add_observer(command_observer);

    world.insert_resource(Level::from_grid(&grid));
    world.insert_resource(grid);
    world.insert_resource(GameStage::default());
    world.insert_resource(ScoreResource::default());
    world.insert_resource(LevelNumber::default());
    world.insert_resource(GlobalState::default());
    world.insert_resource(InputState::default());

    world
}

pub fn spawn_player(world: &mut World, position: IVec2) -> Entity {
    world.spawn(Player::new(position)).id()
}

pub fn spawn_enemy(world: &mut World, kind: EnemyKind, position: Vec2) -> Entity {
    let mut enemy = Enemy::new(kind);
    enemy.position = position;
    world.spawn(enemy).id()
}

pub fn hold(world: &mut World, keys: HeldKeys) {
    world.insert_resource(InputState::new(keys));
}

pub fn player(world: &World, entity: Entity) -> Player {
    world.get::<Player>(entity).expect("player should exist").clone()
}

pub fn enemy(world: &World, entity: Entity) -> Enemy {
    world.get::<Enemy>(entity).expect("enemy should exist").clone()
}

pub fn error_count(world: &World) -> usize {
    world.resource::<Events<GameError>>().len()
}

/// A game on the given board.
pub fn create_game(board: &[Vec<u8>]) -> Game {
    Game::with_board(board).expect("test board should parse")
}

/// Runs `frames` frames with the same keys held.
pub fn run_frames(game: &mut Game, keys: HeldKeys, frames: u32) {
    for _ in 0..frames {
        game.tick(InputState::new(keys));
    }
}

pub fn set_player_position(game: &mut Game, position: IVec2) {
    let mut player = game
        .world
        .query::<&mut Player>()
        .single_mut(&mut game.world)
        .expect("game should have one player");
    player.position = position;
}

pub fn set_enemy_position(game: &mut Game, kind: EnemyKind, position: Vec2) {
    let mut enemies = game.world.query::<&mut Enemy>();
    let mut enemy = enemies
        .iter_mut(&mut game.world)
        .find(|enemy| enemy.kind == kind)
        .expect("game should have this enemy");
    enemy.position = position;
}
