use bevy_ecs::resource::Resource;
use bitflags::bitflags;
use glam::IVec2;

bitflags! {
    /// The directional keys currently held down.
    #[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct HeldKeys: u8 {
        const LEFT = 1 << 0;
        const RIGHT = 1 << 1;
        const UP = 1 << 2;
        const DOWN = 1 << 3;
    }
}

/// Directional input sampled once per frame.
#[derive(Resource, Default, Clone, Copy, Debug, PartialEq, Eq)]
pub struct InputState {
    pub held: HeldKeys,
}

impl InputState {
    pub fn new(held: HeldKeys) -> Self {
        Self { held }
    }

    /// Converts the held keys into a movement intent with components in `-1..=1`.
    ///
    /// Each key is checked independently, so with both keys of an axis held the later
    /// check wins: right over left, down over up.
    pub fn intent(&self) -> IVec2 {
        let mut intent = IVec2::ZERO;
        if self.held.contains(HeldKeys::LEFT) {
            intent.x = -1;
        }
        if self.held.contains(HeldKeys::RIGHT) {
            intent.x = 1;
        }
        if self.held.contains(HeldKeys::UP) {
            intent.y = -1;
        }
        if self.held.contains(HeldKeys::DOWN) {
            intent.y = 1;
        }
        intent
    }
}

/// SDL key bindings.
#[cfg(feature = "sdl")]
pub mod bindings {
    use sdl2::keyboard::{KeyboardState, Keycode, Scancode};

    use super::HeldKeys;
    use crate::events::GameCommand;

    /// Maps a key press to a discrete command.
    pub fn command_for(key: Keycode) -> Option<GameCommand> {
        match key {
            Keycode::Escape | Keycode::Q => Some(GameCommand::Exit),
            Keycode::R => Some(GameCommand::Restart),
            _ => None,
        }
    }

    /// Samples the directional keys (arrows and WASD) from the keyboard state.
    pub fn held_keys(keyboard: &KeyboardState) -> HeldKeys {
        let mut held = HeldKeys::empty();
        for (scancodes, key) in [
            ([Scancode::Left, Scancode::A], HeldKeys::LEFT),
            ([Scancode::Right, Scancode::D], HeldKeys::RIGHT),
            ([Scancode::Up, Scancode::W], HeldKeys::UP),
            ([Scancode::Down, Scancode::S], HeldKeys::DOWN),
        ] {
            if scancodes.iter().any(|&scancode| keyboard.is_scancode_pressed(scancode)) {
                held |= key;
            }
        }
        held
    }
}
