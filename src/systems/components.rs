use bevy_ecs::resource::Resource;

#[derive(Resource, Debug, Default)]
pub struct GlobalState {
    pub exit: bool,
}

/// The session score shown in the HUD.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScoreResource(pub u32);

/// The current level, starting at 1. Enemy speed scales with it.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelNumber(pub u32);

impl Default for LevelNumber {
    fn default() -> Self {
        Self(1)
    }
}
