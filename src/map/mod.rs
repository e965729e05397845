//! This module defines the level grid and the walls and items built from it.

pub mod builder;
pub mod direction;
pub mod parser;
