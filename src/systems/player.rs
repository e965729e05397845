use bevy_ecs::{
    component::Component,
    event::EventWriter,
    system::{Query, Res, ResMut},
};
use glam::{IVec2, UVec2};
use tracing::{info, trace};

use crate::{
    constants::{
        mechanics::{BONUS_POINTS, PLAYER_SIZE, PLAYER_SPEED, PLAYER_START},
        timing::PLAYER_ANIMATION_PERIOD,
    },
    error::GameError,
    map::{builder::Level, builder::Wall, direction::Direction},
    systems::{
        collision::{hits_wall, Hitbox},
        components::ScoreResource,
        input::InputState,
        item::BonusItem,
        state::GameStage,
    },
};

/// The player-controlled character.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct Player {
    /// Top-left corner, in whole pixels.
    pub position: IVec2,
    pub direction: Direction,
    /// Points collected by this player instance.
    pub score: u32,
    /// Mouth animation counter, wraps at [`PLAYER_ANIMATION_PERIOD`].
    pub animation_frame: u8,
}

impl Default for Player {
    fn default() -> Self {
        Self::new(PLAYER_START)
    }
}

impl Player {
    pub fn new(position: IVec2) -> Self {
        Self {
            position,
            direction: Direction::Right,
            score: 0,
            animation_frame: 0,
        }
    }

    pub fn hitbox(&self) -> Hitbox {
        Self::hitbox_at(self.position)
    }

    fn hitbox_at(position: IVec2) -> Hitbox {
        Hitbox::new(position, UVec2::splat(PLAYER_SIZE))
    }

    /// Moves by one step of `intent` (components in `-1..=1`), resolving each axis
    /// against the walls separately.
    ///
    /// The horizontal step is tried first and dropped if it would overlap a wall; the
    /// vertical step is then tried from the resulting x. Any non-zero intent turns the
    /// player and advances the animation, even when both steps are blocked.
    pub fn move_by(&mut self, intent: IVec2, walls: &[Wall]) {
        if let Some(direction) = Direction::from_intent(intent) {
            self.direction = direction;
            self.animation_frame = (self.animation_frame + 1) % PLAYER_ANIMATION_PERIOD;
        }

        let step = intent.clamp(IVec2::NEG_ONE, IVec2::ONE) * PLAYER_SPEED;

        let candidate = IVec2::new(self.position.x + step.x, self.position.y);
        if !hits_wall(&Self::hitbox_at(candidate), walls) {
            self.position = candidate;
        }

        let candidate = IVec2::new(self.position.x, self.position.y + step.y);
        if !hits_wall(&Self::hitbox_at(candidate), walls) {
            self.position = candidate;
        }
    }

    /// Collects the first uncollected bonus item the player overlaps.
    ///
    /// At most one item is taken per call; returns whether one was.
    pub fn collect_bonus(&mut self, bonuses: &mut [BonusItem]) -> bool {
        let hitbox = self.hitbox();
        let Some(bonus) = bonuses
            .iter_mut()
            .find(|bonus| !bonus.collected && bonus.hitbox().overlaps(&hitbox))
        else {
            return false;
        };

        bonus.collect();
        self.score += BONUS_POINTS;
        true
    }

    /// Sprite rotation for the current facing.
    pub fn rotation_degrees(&self) -> f64 {
        self.direction.rotation_degrees()
    }

    /// Sprite scale for the mouth animation: shrunk during the first half of the period.
    pub fn mouth_scale(&self) -> f32 {
        if self.animation_frame < PLAYER_ANIMATION_PERIOD / 2 {
            0.8
        } else {
            1.0
        }
    }
}

/// Moves the player according to this frame's held keys.
pub fn player_movement_system(
    input: Res<InputState>,
    level: Res<Level>,
    mut players: Query<&mut Player>,
    mut errors: EventWriter<GameError>,
) {
    let mut player = match players.single_mut() {
        Ok(player) => player,
        Err(e) => {
            errors.write(GameError::InvalidState(format!(
                "No/multiple entities queried for player movement system: {e}"
            )));
            return;
        }
    };

    let intent = input.intent();
    player.move_by(intent, &level.walls);
    trace!(?intent, position = ?player.position, "Player moved");
}

/// Picks up a bonus item under the player and completes the level once none remain.
pub fn bonus_collection_system(
    mut level: ResMut<Level>,
    mut score: ResMut<ScoreResource>,
    mut stage: ResMut<GameStage>,
    mut players: Query<&mut Player>,
    mut errors: EventWriter<GameError>,
) {
    let mut player = match players.single_mut() {
        Ok(player) => player,
        Err(e) => {
            errors.write(GameError::InvalidState(format!(
                "No/multiple entities queried for bonus collection system: {e}"
            )));
            return;
        }
    };

    if !player.collect_bonus(&mut level.bonuses) {
        return;
    }

    score.0 += BONUS_POINTS;
    trace!(score = score.0, remaining = level.remaining_bonuses(), "Bonus collected");

    if level.all_collected() {
        info!(score = score.0, "All bonus items collected");
        *stage = GameStage::LevelComplete { timer: 0 };
    }
}
