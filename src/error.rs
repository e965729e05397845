//! Centralized error types for the game.
//!
//! The per-frame simulation never fails; these types cover startup
//! (level parsing, asset lookup, SDL setup) and invariant violations
//! reported by systems.

use bevy_ecs::event::Event;

/// Main error type for the game.
///
/// This is the primary error type that should be used in public APIs.
#[derive(thiserror::Error, Debug, Event)]
pub enum GameError {
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    #[error("Map parsing error: {0}")]
    MapParse(#[from] ParseError),

    #[error("SDL error: {0}")]
    Sdl(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

#[derive(thiserror::Error, Debug)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Asset could not be decoded: {name} ({reason})")]
    Decode { name: String, reason: String },
}

/// Error type for level grid parsing.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown cell code {code} at row {row}, column {column}")]
    UnknownCell { code: u8, row: usize, column: usize },

    #[error("Row {row} has {found} cells, expected {expected}")]
    RaggedRow { row: usize, expected: usize, found: usize },

    #[error("Level grid has no cells")]
    Empty,
}

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;
