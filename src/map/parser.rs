//! Map parsing functionality for converting raw cell codes into structured data.

use bevy_ecs::resource::Resource;
use glam::UVec2;

use crate::constants::{MapTile, CELL_BONUS, CELL_EMPTY, CELL_WALL};
use crate::error::ParseError;

/// A rectangular grid of parsed tiles, stored row-major.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct LevelGrid {
    tiles: Vec<MapTile>,
    size: UVec2,
}

/// Parser for converting raw cell codes into map tiles.
pub struct MapTileParser;

impl MapTileParser {
    /// Parses a single cell code into a map tile.
    pub fn parse_cell(code: u8) -> Option<MapTile> {
        match code {
            CELL_EMPTY => Some(MapTile::Empty),
            CELL_WALL => Some(MapTile::Wall),
            CELL_BONUS => Some(MapTile::Bonus),
            _ => None,
        }
    }
}

impl LevelGrid {
    /// Parses rows of raw cell codes.
    ///
    /// # Errors
    ///
    /// Returns an error if the grid is empty, if the rows differ in length, or if a
    /// cell holds a code other than empty, wall or bonus.
    pub fn parse<R: AsRef<[u8]>>(rows: &[R]) -> Result<LevelGrid, ParseError> {
        let width = rows.first().map(|row| row.as_ref().len()).unwrap_or(0);
        if width == 0 {
            return Err(ParseError::Empty);
        }

        let mut tiles = Vec::with_capacity(width * rows.len());
        for (row, codes) in rows.iter().enumerate() {
            let codes = codes.as_ref();
            if codes.len() != width {
                return Err(ParseError::RaggedRow {
                    row,
                    expected: width,
                    found: codes.len(),
                });
            }

            for (column, &code) in codes.iter().enumerate() {
                let tile = MapTileParser::parse_cell(code).ok_or(ParseError::UnknownCell { code, row, column })?;
                tiles.push(tile);
            }
        }

        Ok(LevelGrid {
            tiles,
            size: UVec2::new(width as u32, rows.len() as u32),
        })
    }

    /// The grid dimensions, in cells.
    pub fn size(&self) -> UVec2 {
        self.size
    }

    /// Returns the tile at the given cell, or `None` outside the grid.
    pub fn get(&self, column: u32, row: u32) -> Option<MapTile> {
        if column >= self.size.x || row >= self.size.y {
            return None;
        }
        self.tiles.get((row * self.size.x + column) as usize).copied()
    }

    /// Iterates over every cell as `(cell, tile)` in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (UVec2, MapTile)> + '_ {
        let width = self.size.x;
        self.tiles
            .iter()
            .enumerate()
            .map(move |(i, &tile)| (UVec2::new(i as u32 % width, i as u32 / width), tile))
    }
}
