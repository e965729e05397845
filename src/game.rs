//! This module contains the main game logic and state.

use bevy_ecs::event::{EventRegistry, Events};
use bevy_ecs::schedule::{ExecutorKind, IntoScheduleConfigs, Schedule};
use bevy_ecs::world::World;
use strum::IntoEnumIterator;
use tracing::{debug, error, info};

use crate::constants::RAW_BOARD;
use crate::error::{GameError, GameResult};
use crate::events::{GameCommand, GameEvent};
use crate::formatter;
use crate::map::{builder::Level, parser::LevelGrid};
use crate::systems::{
    bonus_animation_system, bonus_collection_system, command_observer, enemy_collision_system, enemy_movement_system,
    enemy_speed_system, is_playing, player_movement_system, stage_system, Enemy, EnemyKind, GameStage, GlobalState,
    InputState, LevelNumber, Player, ScoreResource,
};

/// Core game state manager built on the Bevy ECS architecture.
///
/// The `World` holds the level, the session resources and the player/enemy entities;
/// the `Schedule` runs one frame of the simulation in a fixed order. Nothing in here
/// touches SDL, so the whole simulation can be driven headless.
pub struct Game {
    pub world: World,
    pub schedule: Schedule,
}

impl Game {
    /// Creates a game on the built-in board.
    pub fn new() -> GameResult<Game> {
        Self::with_board(&RAW_BOARD)
    }

    /// Creates a game on a board given as rows of raw cell codes.
    ///
    /// # Errors
    ///
    /// Returns `GameError::MapParse` if the board is empty, ragged, or holds unknown codes.
    pub fn with_board<R: AsRef<[u8]>>(rows: &[R]) -> GameResult<Game> {
        let grid = LevelGrid::parse(rows)?;
        Ok(Self::from_grid(grid))
    }

    /// Creates a game on an already parsed grid.
    pub fn from_grid(grid: LevelGrid) -> Game {
        info!(size = ?grid.size(), "Starting game initialization");

        let mut world = World::default();
        let mut schedule = Schedule::default();

        debug!("Setting up ECS event registry and observers");
        Self::setup_ecs(&mut world);

        debug!("Inserting resources into ECS world");
        world.insert_resource(Level::from_grid(&grid));
        world.insert_resource(grid);
        world.insert_resource(GameStage::default());
        world.insert_resource(ScoreResource::default());
        world.insert_resource(LevelNumber::default());
        world.insert_resource(GlobalState::default());
        world.insert_resource(InputState::default());

        debug!("Configuring system execution schedule");
        Self::configure_schedule(&mut schedule);

        debug!("Spawning player and enemies");
        world.spawn(Player::default());
        for kind in EnemyKind::iter() {
            world.spawn(Enemy::new(kind));
        }

        info!("Game initialization completed successfully");
        Game { world, schedule }
    }

    fn setup_ecs(world: &mut World) {
        EventRegistry::register_event::<GameError>(world);
        world.add_observer(command_observer);
    }

    fn configure_schedule(schedule: &mut Schedule) {
        // Everything runs in one fixed order on the calling thread.
        schedule.set_executor_kind(ExecutorKind::SingleThreaded);

        // Gameplay conditions are checked right before each system, so a frame that
        // completes the level or ends the game stops there.
        let gameplay_systems = (
            enemy_speed_system,
            player_movement_system,
            bonus_collection_system,
            enemy_movement_system,
            enemy_collision_system,
        )
            .chain()
            .distributive_run_if(is_playing);

        schedule.add_systems((stage_system, gameplay_systems, bonus_animation_system).chain());
    }

    /// Runs one frame with the given held keys.
    ///
    /// Returns true if the game should exit.
    pub fn tick(&mut self, input: InputState) -> bool {
        self.world.insert_resource(input);
        self.schedule.run(&mut self.world);
        self.report_errors();
        formatter::increment_frame();

        self.world.resource::<GlobalState>().exit
    }

    /// Delivers a discrete command (exit, restart) immediately.
    pub fn command(&mut self, command: GameCommand) {
        self.world.trigger(GameEvent::from(command));
    }

    pub fn stage(&self) -> GameStage {
        *self.world.resource::<GameStage>()
    }

    pub fn score(&self) -> u32 {
        self.world.resource::<ScoreResource>().0
    }

    pub fn level_number(&self) -> u32 {
        self.world.resource::<LevelNumber>().0
    }

    pub fn level(&self) -> &Level {
        self.world.resource::<Level>()
    }

    /// A snapshot of the player, if one exists.
    pub fn player(&mut self) -> Option<Player> {
        self.world.query::<&Player>().iter(&self.world).next().cloned()
    }

    /// Snapshots of every enemy, in spawn order.
    pub fn enemies(&mut self) -> Vec<Enemy> {
        let mut enemies: Vec<Enemy> = self.world.query::<&Enemy>().iter(&self.world).cloned().collect();
        enemies.sort_by_key(|enemy| enemy.kind as u8);
        enemies
    }

    /// Logs and clears every error systems have reported since the last call.
    pub fn report_errors(&mut self) {
        let mut errors = self.world.resource_mut::<Events<GameError>>();
        for error in errors.drain() {
            error!(%error, "System reported an error");
        }
    }
}
