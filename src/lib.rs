//! Maze-chase game library crate.
//!
//! The simulation (level, player, enemies, stages) builds without any windowing
//! layer; the SDL2 front end lives behind the `sdl` feature.

#[cfg(feature = "sdl")]
pub mod app;
pub mod asset;
pub mod constants;
pub mod error;
pub mod events;
pub mod formatter;
pub mod game;
pub mod logging;
pub mod map;
pub mod systems;
