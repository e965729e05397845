use bevy_ecs::event::Events;
use glam::{IVec2, Vec2};
use mazechase::{
    constants::{mechanics::PLAYER_START, timing::LEVEL_TRANSITION_FRAMES},
    error::GameError,
    events::GameCommand,
    formatter,
    game::Game,
    systems::{Enemy, EnemyKind, GameStage, HeldKeys, InputState, Player},
};
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

mod common;

/// Holds right until the first bonus item is picked up, returning the frames it took.
fn walk_right_to_first_bonus(game: &mut Game) -> u32 {
    for frame in 1..=30 {
        game.tick(InputState::new(HeldKeys::RIGHT));
        if game.level().bonuses[0].collected {
            return frame;
        }
    }
    panic!("player never reached the first bonus item");
}

#[test]
fn test_new_game_starts_playing() {
    let mut game = Game::new().expect("built-in board should load");

    assert_eq!(game.stage(), GameStage::Playing);
    assert_eq!(game.score(), 0);
    assert_eq!(game.level_number(), 1);
    assert_that(&game.level().remaining_bonuses()).is_greater_than(0);
    assert_eq!(game.player().map(|player| player.position), Some(PLAYER_START));

    let kinds: Vec<EnemyKind> = game.enemies().iter().map(|enemy| enemy.kind).collect();
    assert_eq!(kinds, vec![EnemyKind::Red, EnemyKind::Orange]);
}

#[test]
fn test_pickup_awards_points_once() {
    // (3, 1) lies on the player's path; (10, 7) keeps the level going.
    let mut game = common::create_game(&common::board_with_bonuses(&[(3, 1), (10, 7)]));

    let frames = walk_right_to_first_bonus(&mut game);
    assert_that(&frames).is_greater_than(1);
    assert_eq!(game.score(), 10);
    assert_eq!(game.player().map(|player| player.score), Some(10));

    // Standing on the collected item awards nothing more.
    common::run_frames(&mut game, HeldKeys::empty(), 5);
    assert_eq!(game.score(), 10);
    assert_eq!(game.stage(), GameStage::Playing);
    assert_eq!(game.level().remaining_bonuses(), 1);
}

#[test]
fn test_level_complete_then_next_level() {
    let mut game = common::create_game(&common::board_with_bonuses(&[(3, 1)]));

    walk_right_to_first_bonus(&mut game);
    assert_eq!(game.stage(), GameStage::LevelComplete { timer: 0 });
    assert_eq!(game.score(), 10);

    let frozen_player = game.player();
    let frozen_enemies = game.enemies();

    common::run_frames(&mut game, HeldKeys::DOWN, LEVEL_TRANSITION_FRAMES - 1);
    assert_eq!(
        game.stage(),
        GameStage::LevelComplete {
            timer: LEVEL_TRANSITION_FRAMES - 1
        }
    );
    assert_eq!(game.player(), frozen_player);
    assert_eq!(game.enemies(), frozen_enemies);

    game.tick(InputState::default());

    assert_eq!(game.stage(), GameStage::Playing);
    assert_eq!(game.level_number(), 2);
    assert_eq!(game.score(), 10);
    assert_eq!(game.level().remaining_bonuses(), 1);
    assert_eq!(game.player().map(|player| player.position), Some(PLAYER_START));

    // Gameplay already ran on the frame the new level started.
    for enemy in game.enemies() {
        assert_that(&enemy.speed).is_equal_to(Enemy::speed_for_level(2));
        assert_that(&enemy.position).is_not_equal_to(enemy.kind.start());
    }
}

#[test]
fn test_level_without_bonuses_never_completes() {
    let mut game = common::create_game(&common::open_board());
    common::run_frames(&mut game, HeldKeys::DOWN, 10);
    assert_eq!(game.stage(), GameStage::Playing);
}

#[test]
fn test_caught_player_freezes_until_restart() {
    let mut game = common::create_game(&common::board_with_bonuses(&[(3, 1), (10, 7)]));
    walk_right_to_first_bonus(&mut game);

    let red = game.enemies()[0].clone();
    common::set_player_position(&mut game, red.position.round().as_ivec2());
    game.tick(InputState::default());
    assert_eq!(game.stage(), GameStage::GameOver);

    let frozen_player = game.player();
    let frozen_enemies = game.enemies();
    let remaining = game.level().remaining_bonuses();

    common::run_frames(&mut game, HeldKeys::LEFT | HeldKeys::UP, 30);
    assert_eq!(game.stage(), GameStage::GameOver);
    assert_eq!(game.player(), frozen_player);
    assert_eq!(game.enemies(), frozen_enemies);
    assert_eq!(game.level().remaining_bonuses(), remaining);
    assert_eq!(game.score(), 10);

    game.command(GameCommand::Restart);

    assert_eq!(game.stage(), GameStage::Playing);
    assert_eq!(game.score(), 0);
    assert_eq!(game.level_number(), 1);
    assert_eq!(game.level().remaining_bonuses(), 2);
    assert_eq!(game.player(), Some(Player::default()));
    assert_eq!(game.enemies(), vec![Enemy::new(EnemyKind::Red), Enemy::new(EnemyKind::Orange)]);
}

#[test]
fn test_enemies_chase_where_the_player_moved_this_frame() {
    let mut game = common::create_game(&common::open_board());
    common::set_player_position(&mut game, IVec2::new(300, 300));
    // 40 across and 42 down: vertical before the player steps right, horizontal after.
    common::set_enemy_position(&mut game, EnemyKind::Red, Vec2::new(260.0, 258.0));

    game.tick(InputState::new(HeldKeys::RIGHT));

    assert_eq!(game.player().map(|player| player.position), Some(IVec2::new(305, 300)));
    let red = game.enemies().into_iter().find(|enemy| enemy.kind == EnemyKind::Red);
    assert_eq!(red.map(|enemy| enemy.heading), Some(IVec2::X));
    assert_eq!(game.stage(), GameStage::Playing);
}

#[test]
fn test_restart_while_playing_is_ignored() {
    let mut game = common::create_game(&common::open_board());
    common::run_frames(&mut game, HeldKeys::RIGHT, 3);

    game.command(GameCommand::Restart);

    assert_eq!(game.stage(), GameStage::Playing);
    assert_eq!(game.player().map(|player| player.position), Some(IVec2::new(65, 50)));
}

#[test]
fn test_exit_command_ends_loop() {
    let mut game = common::create_game(&common::open_board());
    assert_that(&game.tick(InputState::default())).is_false();

    game.command(GameCommand::Exit);

    assert_that(&game.tick(InputState::default())).is_true();
}

#[test]
fn test_system_errors_are_drained() {
    let mut game = common::create_game(&common::open_board());
    let player = game
        .world
        .query_filtered::<bevy_ecs::entity::Entity, bevy_ecs::query::With<Player>>()
        .single(&game.world)
        .expect("game should have one player");
    game.world.despawn(player);

    game.tick(InputState::new(HeldKeys::RIGHT));

    assert_eq!(game.stage(), GameStage::Playing);
    assert_that(&game.world.resource::<Events<GameError>>().is_empty()).is_true();
}

#[test]
fn test_tick_advances_log_frame_counter() {
    let mut game = common::create_game(&common::open_board());
    let before = formatter::frame_count();

    game.tick(InputState::default());

    assert_that(&formatter::frame_count()).is_greater_than(before);
}
