use bevy_ecs::system::ResMut;
use glam::{IVec2, UVec2};

use crate::constants::{mechanics::BONUS_SIZE, timing::BONUS_ANIMATION_PERIOD};
use crate::map::builder::Level;
use crate::systems::collision::Hitbox;

/// A collectible worth a fixed number of points.
///
/// The position never changes after placement; `collected` flips from false to true
/// at most once per level instance.
#[derive(Debug, Clone, PartialEq)]
pub struct BonusItem {
    /// Top-left corner of the item, in pixels.
    pub position: IVec2,
    pub collected: bool,
    /// Cosmetic pulse counter, wraps at [`BONUS_ANIMATION_PERIOD`].
    pub animation_frame: u8,
}

impl BonusItem {
    pub fn new(position: IVec2) -> Self {
        Self {
            position,
            collected: false,
            animation_frame: 0,
        }
    }

    pub fn hitbox(&self) -> Hitbox {
        Hitbox::new(self.position, UVec2::splat(BONUS_SIZE))
    }

    /// The centre of the item, in pixels.
    pub fn center(&self) -> IVec2 {
        self.position + IVec2::splat(BONUS_SIZE as i32 / 2)
    }

    /// Marks the item collected. Returns false if it already was.
    pub fn collect(&mut self) -> bool {
        if self.collected {
            return false;
        }
        self.collected = true;
        true
    }

    /// Pulse strength in `0.0..=1.0`.
    pub fn pulse(&self) -> f32 {
        (self.animation_frame as f32 * 0.05).sin().abs()
    }

    /// Fill colour; only the green channel follows the pulse.
    pub fn color(&self) -> (u8, u8, u8) {
        (255, (182.0 + 30.0 * self.pulse()) as u8, 255)
    }

    /// Alpha of the soft glow drawn around the item.
    pub fn glow_alpha(&self) -> u8 {
        (64.0 * self.pulse()) as u8
    }

    fn advance_animation(&mut self) {
        self.animation_frame = (self.animation_frame + 1) % BONUS_ANIMATION_PERIOD;
    }
}

/// Advances the pulse of every bonus item still on the board.
pub fn bonus_animation_system(mut level: ResMut<Level>) {
    level
        .bonuses
        .iter_mut()
        .filter(|bonus| !bonus.collected)
        .for_each(BonusItem::advance_animation);
}
