use bevy_ecs::prelude::*;

/// Discrete commands produced by key presses, as opposed to the held
/// directional keys which are sampled every frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameCommand {
    /// Leave the game loop, from any stage.
    Exit,
    /// Start over from level 1. Only honoured once the game is over.
    Restart,
}

#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Command(GameCommand),
}

impl From<GameCommand> for GameEvent {
    fn from(command: GameCommand) -> Self {
        GameEvent::Command(command)
    }
}
