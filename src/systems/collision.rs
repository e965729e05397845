use bevy_ecs::event::EventWriter;
use bevy_ecs::system::{Query, ResMut};
use glam::{IVec2, UVec2, Vec2};
use tracing::info;

use crate::error::GameError;
use crate::map::builder::Wall;
use crate::systems::ghost::Enemy;
use crate::systems::player::Player;
use crate::systems::state::GameStage;

/// An axis-aligned rectangle in whole pixels.
///
/// Overlap is half-open: rectangles that only share an edge do not collide, and an
/// empty rectangle never collides with anything. This matches the exact tiling of
/// grid cells, where neighbouring walls touch but never overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hitbox {
    pub position: IVec2,
    pub size: UVec2,
}

impl Hitbox {
    pub const fn new(position: IVec2, size: UVec2) -> Self {
        Self { position, size }
    }

    /// Builds a hitbox from a sub-pixel position, rounding to the nearest pixel.
    pub fn from_subpixel(position: Vec2, size: UVec2) -> Self {
        Self::new(position.round().as_ivec2(), size)
    }

    pub fn is_empty(&self) -> bool {
        self.size.x == 0 || self.size.y == 0
    }

    /// The exclusive bottom-right corner.
    pub fn max(&self) -> IVec2 {
        self.position + self.size.as_ivec2()
    }

    /// True iff the two rectangles share some area.
    pub fn overlaps(&self, other: &Hitbox) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }

        let (a_max, b_max) = (self.max(), other.max());
        self.position.x < b_max.x && other.position.x < a_max.x && self.position.y < b_max.y && other.position.y < a_max.y
    }
}

/// True iff the hitbox overlaps at least one wall.
pub fn hits_wall(hitbox: &Hitbox, walls: &[Wall]) -> bool {
    walls.iter().any(|wall| hitbox.overlaps(&wall.hitbox))
}

/// Ends the game when the player touches any enemy.
///
/// Runs last in the gameplay chain, so both the player and the enemies have already
/// moved this frame.
pub fn enemy_collision_system(
    players: Query<&Player>,
    enemies: Query<&Enemy>,
    mut stage: ResMut<GameStage>,
    mut errors: EventWriter<GameError>,
) {
    let player = match players.single() {
        Ok(player) => player,
        Err(e) => {
            errors.write(GameError::InvalidState(format!(
                "No/multiple entities queried for enemy collision system: {e}"
            )));
            return;
        }
    };

    let player_hitbox = player.hitbox();
    if let Some(enemy) = enemies.iter().find(|enemy| enemy.hitbox().overlaps(&player_hitbox)) {
        info!(kind = ?enemy.kind, position = ?player.position, "Player caught");
        *stage = GameStage::GameOver;
    }
}
