//! This module contains all the constants used in the game.

use std::time::Duration;

use glam::{IVec2, UVec2, Vec2};

/// The fixed simulation rate, in frames per second.
pub const FRAMES_PER_SECOND: u32 = 60;

pub const LOOP_TIME: Duration = Duration::from_nanos((1_000_000_000.0 / FRAMES_PER_SECOND as f64) as u64);

/// The size of each cell, in pixels.
pub const CELL_SIZE: u32 = 40;
/// The size of the game board, in cells.
pub const BOARD_CELL_SIZE: UVec2 = UVec2::new(20, 15);
/// The size of the window canvas, in pixels. The board fills it exactly.
pub const CANVAS_SIZE: UVec2 = UVec2::new(BOARD_CELL_SIZE.x * CELL_SIZE, BOARD_CELL_SIZE.y * CELL_SIZE);

/// Raw cell code for an empty, walkable cell.
pub const CELL_EMPTY: u8 = 0;
/// Raw cell code for a wall.
pub const CELL_WALL: u8 = 1;
/// Raw cell code for a cell holding a bonus item.
pub const CELL_BONUS: u8 = 2;

/// The raw layout of the game board, one integer code per cell.
pub const RAW_BOARD: [[u8; BOARD_CELL_SIZE.x as usize]; BOARD_CELL_SIZE.y as usize] = [
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
    [1, 0, 2, 2, 2, 2, 2, 2, 2, 1, 1, 2, 2, 2, 2, 2, 2, 0, 0, 1],
    [1, 2, 1, 1, 2, 1, 1, 1, 2, 1, 1, 2, 1, 1, 1, 2, 1, 1, 2, 1],
    [1, 2, 1, 1, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 1, 1, 2, 1],
    [1, 2, 2, 2, 2, 1, 1, 1, 1, 0, 0, 1, 1, 1, 1, 2, 2, 2, 2, 1],
    [1, 1, 1, 1, 2, 1, 0, 0, 0, 0, 0, 0, 0, 0, 1, 2, 1, 1, 1, 1],
    [1, 2, 2, 2, 2, 1, 0, 1, 1, 0, 0, 1, 1, 0, 1, 2, 2, 2, 2, 1],
    [1, 2, 1, 1, 2, 2, 0, 1, 0, 0, 0, 0, 1, 0, 2, 2, 1, 1, 2, 1],
    [1, 2, 1, 1, 2, 1, 0, 1, 1, 1, 1, 1, 1, 0, 1, 2, 1, 1, 2, 1],
    [1, 2, 2, 2, 2, 1, 0, 0, 0, 0, 0, 0, 0, 0, 1, 2, 2, 2, 2, 1],
    [1, 1, 1, 1, 2, 1, 1, 1, 2, 1, 1, 2, 1, 1, 1, 2, 1, 1, 1, 1],
    [1, 2, 2, 2, 2, 2, 2, 2, 2, 1, 1, 2, 2, 2, 2, 2, 2, 2, 2, 1],
    [1, 0, 1, 1, 2, 1, 1, 1, 2, 2, 2, 2, 1, 1, 1, 2, 1, 1, 2, 1],
    [1, 0, 2, 2, 2, 2, 2, 2, 2, 1, 1, 2, 2, 2, 2, 2, 2, 2, 2, 1],
    [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
];

/// An enum representing the different types of tiles on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MapTile {
    /// An empty tile.
    #[default]
    Empty,
    /// A wall tile.
    Wall,
    /// A tile holding a bonus item.
    Bonus,
}

/// Gameplay tuning values.
pub mod mechanics {
    use super::*;

    /// Player hitbox edge length, in pixels.
    pub const PLAYER_SIZE: u32 = 30;
    /// Enemy hitbox edge length, in pixels.
    pub const ENEMY_SIZE: u32 = 30;
    /// Bonus item hitbox edge length, in pixels.
    pub const BONUS_SIZE: u32 = 10;

    /// Player movement per frame, in whole pixels.
    pub const PLAYER_SPEED: i32 = 5;
    /// Enemy movement per frame on level 0, in pixels.
    pub const ENEMY_BASE_SPEED: f32 = 2.0;
    /// Additional enemy movement per frame for every level.
    pub const ENEMY_SPEED_PER_LEVEL: f32 = 0.15;

    /// Points awarded for a single bonus item.
    pub const BONUS_POINTS: u32 = 10;

    /// Where the player spawns, in pixels.
    pub const PLAYER_START: IVec2 = IVec2::new(50, 50);
    /// Where the red enemy spawns, in pixels.
    pub const RED_ENEMY_START: Vec2 = Vec2::new((CANVAS_SIZE.x - 100) as f32, 50.0);
    /// Where the orange enemy spawns, in pixels.
    pub const ORANGE_ENEMY_START: Vec2 = Vec2::new(50.0, (CANVAS_SIZE.y - 100) as f32);

    /// The red enemy scatters towards the top-right corner cell.
    pub const RED_SCATTER_CORNER: Vec2 = Vec2::new((CANVAS_SIZE.x - CELL_SIZE) as f32, 0.0);
    /// The orange enemy scatters towards the bottom-left corner cell.
    pub const ORANGE_SCATTER_CORNER: Vec2 = Vec2::new(0.0, (CANVAS_SIZE.y - CELL_SIZE) as f32);
}

/// Frame-count based timings.
pub mod timing {
    use super::FRAMES_PER_SECOND;

    /// Frames an enemy spends in one mode before switching (5 seconds).
    pub const MODE_SWITCH_FRAMES: u32 = 5 * FRAMES_PER_SECOND;
    /// Frames the level-complete banner stays up before the next level (2 seconds).
    pub const LEVEL_TRANSITION_FRAMES: u32 = 2 * FRAMES_PER_SECOND;

    /// Period of the player's mouth animation.
    pub const PLAYER_ANIMATION_PERIOD: u8 = 30;
    /// Period of the enemies' floating animation.
    pub const ENEMY_ANIMATION_PERIOD: u8 = 20;
    /// Period of the bonus items' pulse animation.
    pub const BONUS_ANIMATION_PERIOD: u8 = 120;
}

/// Presentation values.
pub mod ui {
    /// Window title.
    pub const WINDOW_TITLE: &str = "Maze Chase";
    /// Point size for the score/level line.
    pub const HUD_FONT_SIZE: u16 = 28;
    /// Point size for the large banners.
    pub const BANNER_FONT_SIZE: u16 = 56;
    /// Point size for the game-over detail lines.
    pub const DETAIL_FONT_SIZE: u16 = 38;
    /// Where the HUD text is drawn, in pixels.
    pub const HUD_POSITION: (i32, i32) = (10, 10);

    pub const BLACK: (u8, u8, u8) = (0, 0, 0);
    pub const WHITE: (u8, u8, u8) = (255, 255, 255);
    pub const GRAY: (u8, u8, u8) = (128, 128, 128);
    pub const GREEN: (u8, u8, u8) = (0, 255, 0);
}

#[cfg(test)]
mod tests {
    use super::mechanics::*;
    use super::*;

    #[test]
    fn test_loop_time() {
        // 60 FPS = 16.67ms per frame
        let expected_nanos = (1_000_000_000.0 / 60.0) as u64;
        assert_eq!(LOOP_TIME.as_nanos() as u64, expected_nanos);
    }

    #[test]
    fn test_canvas_size() {
        assert_eq!(CANVAS_SIZE, UVec2::new(800, 600));
    }

    #[test]
    fn test_raw_board_boundaries() {
        let last = RAW_BOARD.len() - 1;
        assert!(RAW_BOARD[0].iter().all(|&c| c == CELL_WALL));
        assert!(RAW_BOARD[last].iter().all(|&c| c == CELL_WALL));
        for row in RAW_BOARD.iter() {
            assert_eq!(row[0], CELL_WALL);
            assert_eq!(row[row.len() - 1], CELL_WALL);
        }
    }

    #[test]
    fn test_raw_board_codes() {
        assert!(RAW_BOARD
            .iter()
            .flatten()
            .all(|&c| matches!(c, CELL_EMPTY | CELL_WALL | CELL_BONUS)));
        assert!(RAW_BOARD.iter().flatten().any(|&c| c == CELL_BONUS));
    }

    #[test]
    fn test_entities_fit_inside_a_cell() {
        assert!(PLAYER_SIZE < CELL_SIZE);
        assert!(ENEMY_SIZE < CELL_SIZE);
        assert!(BONUS_SIZE < CELL_SIZE);
    }

    #[test]
    fn test_scatter_corners_are_on_screen() {
        for corner in [RED_SCATTER_CORNER, ORANGE_SCATTER_CORNER] {
            assert!(corner.x >= 0.0 && corner.x < CANVAS_SIZE.x as f32);
            assert!(corner.y >= 0.0 && corner.y < CANVAS_SIZE.y as f32);
        }
    }

    #[test]
    fn test_timings() {
        assert_eq!(timing::MODE_SWITCH_FRAMES, 300);
        assert_eq!(timing::LEVEL_TRANSITION_FRAMES, 120);
    }
}
