use bevy_ecs::{
    observer::Trigger,
    resource::Resource,
    system::{Query, Res, ResMut},
};
use tracing::{debug, info};

use crate::{
    constants::timing::LEVEL_TRANSITION_FRAMES,
    events::{GameCommand, GameEvent},
    map::{builder::Level, parser::LevelGrid},
    systems::{
        components::{GlobalState, LevelNumber, ScoreResource},
        ghost::Enemy,
        player::Player,
    },
};

/// A resource to track the overall stage of the game from a high-level perspective.
///
/// Exactly one stage is active at a time, so a completed level can never also be lost.
#[derive(Resource, Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum GameStage {
    /// The main gameplay loop is active.
    #[default]
    Playing,
    /// Every bonus item was collected; the banner is up and nothing moves.
    LevelComplete {
        /// Frames spent in this stage so far.
        timer: u32,
    },
    /// The player was caught. Only a restart leaves this stage.
    GameOver,
}

impl GameStage {
    pub fn is_playing(&self) -> bool {
        matches!(self, GameStage::Playing)
    }
}

/// Run condition for the gameplay systems.
pub fn is_playing(stage: Res<GameStage>) -> bool {
    stage.is_playing()
}

/// Rebuilds the level's bonus items and puts the player and enemies back at their spawns.
pub fn reset_level(grid: &LevelGrid, level: &mut Level, players: &mut Query<&mut Player>, enemies: &mut Query<&mut Enemy>) {
    *level = Level::from_grid(grid);
    for mut player in players.iter_mut() {
        *player = Player::default();
    }
    for mut enemy in enemies.iter_mut() {
        let kind = enemy.kind;
        *enemy = Enemy::new(kind);
    }
}

/// Counts down the level-complete pause and starts the next level when it ends.
pub fn stage_system(
    mut stage: ResMut<GameStage>,
    mut level_number: ResMut<LevelNumber>,
    grid: Res<LevelGrid>,
    mut level: ResMut<Level>,
    mut players: Query<&mut Player>,
    mut enemies: Query<&mut Enemy>,
) {
    let GameStage::LevelComplete { timer } = *stage else {
        return;
    };

    let timer = timer + 1;
    if timer < LEVEL_TRANSITION_FRAMES {
        *stage = GameStage::LevelComplete { timer };
        return;
    }

    level_number.0 += 1;
    reset_level(&grid, &mut level, &mut players, &mut enemies);
    *stage = GameStage::Playing;
    info!(level = level_number.0, "Starting next level");
}

/// Handles discrete commands: exiting from any stage, and restarting once the game is over.
#[allow(clippy::too_many_arguments)]
pub fn command_observer(
    event: Trigger<GameEvent>,
    mut state: ResMut<GlobalState>,
    mut stage: ResMut<GameStage>,
    mut score: ResMut<ScoreResource>,
    mut level_number: ResMut<LevelNumber>,
    grid: Res<LevelGrid>,
    mut level: ResMut<Level>,
    mut players: Query<&mut Player>,
    mut enemies: Query<&mut Enemy>,
) {
    let GameEvent::Command(command) = *event;
    match command {
        GameCommand::Exit => {
            info!("Exit requested");
            state.exit = true;
        }
        GameCommand::Restart if *stage == GameStage::GameOver => {
            info!(final_score = score.0, final_level = level_number.0, "Restarting game");
            score.0 = 0;
            level_number.0 = 1;
            reset_level(&grid, &mut level, &mut players, &mut enemies);
            *stage = GameStage::Playing;
        }
        GameCommand::Restart => {
            debug!(stage = ?*stage, "Ignoring restart outside of game over");
        }
    }
}
