use glam::IVec2;
use strum_macros::AsRefStr;

/// The four cardinal directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    #[default]
    Right,
}

impl Direction {
    /// Picks the facing for a movement intent.
    ///
    /// The horizontal component wins whenever it is non-zero. Returns `None` for a zero intent.
    pub fn from_intent(intent: IVec2) -> Option<Direction> {
        if intent.x > 0 {
            Some(Direction::Right)
        } else if intent.x < 0 {
            Some(Direction::Left)
        } else if intent.y > 0 {
            Some(Direction::Down)
        } else if intent.y < 0 {
            Some(Direction::Up)
        } else {
            None
        }
    }

    /// Counter-clockwise rotation, in degrees, of a sprite drawn facing right.
    pub const fn rotation_degrees(self) -> f64 {
        match self {
            Direction::Right => 0.0,
            Direction::Up => 90.0,
            Direction::Left => 180.0,
            Direction::Down => 270.0,
        }
    }
}
