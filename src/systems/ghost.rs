use bevy_ecs::{
    component::Component,
    event::EventWriter,
    system::{Query, Res},
};
use glam::{IVec2, UVec2, Vec2};
use strum_macros::{AsRefStr, EnumIter};
use tracing::debug;

use crate::{
    asset::Asset,
    constants::{
        mechanics::{
            ENEMY_BASE_SPEED, ENEMY_SIZE, ENEMY_SPEED_PER_LEVEL, ORANGE_ENEMY_START, ORANGE_SCATTER_CORNER, RED_ENEMY_START,
            RED_SCATTER_CORNER,
        },
        timing::{ENEMY_ANIMATION_PERIOD, MODE_SWITCH_FRAMES},
    },
    error::GameError,
    map::builder::{Level, Wall},
    systems::{
        collision::{hits_wall, Hitbox},
        components::LevelNumber,
        player::Player,
    },
};

/// Which enemy this is. Fixes its spawn point, scatter corner and sprite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum EnemyKind {
    /// Scatters to the top-right corner.
    Red,
    /// Scatters to the bottom-left corner.
    Orange,
}

impl EnemyKind {
    pub fn start(self) -> Vec2 {
        match self {
            EnemyKind::Red => RED_ENEMY_START,
            EnemyKind::Orange => ORANGE_ENEMY_START,
        }
    }

    pub fn scatter_corner(self) -> Vec2 {
        match self {
            EnemyKind::Red => RED_SCATTER_CORNER,
            EnemyKind::Orange => ORANGE_SCATTER_CORNER,
        }
    }

    pub fn asset(self) -> Asset {
        match self {
            EnemyKind::Red => Asset::GhostRed,
            EnemyKind::Orange => Asset::GhostOrange,
        }
    }
}

/// Enemy behaviour mode. Toggles on a fixed timer, nothing else changes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnemyMode {
    /// Head for the player's current position.
    #[default]
    Chase,
    /// Head for this enemy's fixed corner.
    Scatter,
}

impl EnemyMode {
    pub fn toggled(self) -> Self {
        match self {
            EnemyMode::Chase => EnemyMode::Scatter,
            EnemyMode::Scatter => EnemyMode::Chase,
        }
    }
}

/// A pursuing enemy.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Enemy {
    pub kind: EnemyKind,
    /// Top-left corner, in sub-pixel coordinates.
    pub position: Vec2,
    /// Pixels per frame; set from the level at the start of every frame.
    pub speed: f32,
    pub mode: EnemyMode,
    /// Frames since the last mode switch.
    pub mode_timer: u32,
    /// The unit step taken last frame, zero if the enemy was stuck.
    pub heading: IVec2,
    /// Floating animation counter, wraps at [`ENEMY_ANIMATION_PERIOD`].
    pub animation_frame: u8,
}

impl Enemy {
    pub fn new(kind: EnemyKind) -> Self {
        Self {
            kind,
            position: kind.start(),
            speed: ENEMY_BASE_SPEED,
            mode: EnemyMode::default(),
            mode_timer: 0,
            heading: IVec2::ZERO,
            animation_frame: 0,
        }
    }

    /// Movement per frame on the given level.
    pub fn speed_for_level(level: u32) -> f32 {
        ENEMY_BASE_SPEED + level as f32 * ENEMY_SPEED_PER_LEVEL
    }

    pub fn hitbox(&self) -> Hitbox {
        Self::hitbox_at(self.position)
    }

    fn hitbox_at(position: Vec2) -> Hitbox {
        Hitbox::from_subpixel(position, UVec2::splat(ENEMY_SIZE))
    }

    /// Advances the mode timer, switching mode every [`MODE_SWITCH_FRAMES`] frames.
    pub fn tick_mode(&mut self) {
        self.mode_timer += 1;
        if self.mode_timer >= MODE_SWITCH_FRAMES {
            self.mode = self.mode.toggled();
            self.mode_timer = 0;
            debug!(kind = self.kind.as_ref(), mode = ?self.mode, "Enemy switched mode");
        }
    }

    /// Where the enemy is heading in its current mode.
    pub fn target(&self, player_position: IVec2) -> Vec2 {
        match self.mode {
            EnemyMode::Chase => player_position.as_vec2(),
            EnemyMode::Scatter => self.kind.scatter_corner(),
        }
    }

    /// Takes one greedy step towards `target`.
    ///
    /// The axis with the larger distance is tried first and the other one only if the
    /// first is blocked, so the enemy never moves diagonally. When both are blocked it
    /// stays put.
    pub fn step_towards(&mut self, target: Vec2, walls: &[Wall]) {
        let delta = target - self.position;
        let sign = |d: f32| if d > 0.0 { 1 } else { -1 };

        let horizontal = IVec2::new(sign(delta.x), 0);
        let vertical = IVec2::new(0, sign(delta.y));
        let order = if delta.x.abs() > delta.y.abs() {
            [horizontal, vertical]
        } else {
            [vertical, horizontal]
        };

        for heading in order {
            let candidate = self.position + heading.as_vec2() * self.speed;
            if !hits_wall(&Self::hitbox_at(candidate), walls) {
                self.position = candidate;
                self.heading = heading;
                return;
            }
        }

        self.heading = IVec2::ZERO;
    }

    /// Runs one frame of behaviour: animation, mode timer, then one step.
    pub fn update(&mut self, player_position: IVec2, walls: &[Wall]) {
        self.animation_frame = (self.animation_frame + 1) % ENEMY_ANIMATION_PERIOD;
        self.tick_mode();
        let target = self.target(player_position);
        self.step_towards(target, walls);
    }

    /// Vertical draw offset for the floating animation, in pixels.
    pub fn bob_offset(&self) -> f32 {
        (self.animation_frame as f32 * 0.3).sin()
    }
}

/// Sets every enemy's speed from the current level, before anything moves.
pub fn enemy_speed_system(level: Res<LevelNumber>, mut enemies: Query<&mut Enemy>) {
    let speed = Enemy::speed_for_level(level.0);
    for mut enemy in enemies.iter_mut() {
        enemy.speed = speed;
    }
}

/// Moves every enemy towards its target. Runs after the player has moved, so chasing
/// enemies read this frame's player position.
pub fn enemy_movement_system(
    level: Res<Level>,
    players: Query<&Player>,
    mut enemies: Query<&mut Enemy>,
    mut errors: EventWriter<GameError>,
) {
    let player_position = match players.single() {
        Ok(player) => player.position,
        Err(e) => {
            errors.write(GameError::InvalidState(format!(
                "No/multiple entities queried for enemy movement system: {e}"
            )));
            return;
        }
    };

    for mut enemy in enemies.iter_mut() {
        enemy.update(player_position, &level.walls);
    }
}
