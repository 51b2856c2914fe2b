use serde::{Deserialize, Serialize};

use super::coord::Coordinate;

/// Direction the snake can travel in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        self.opposite() == other
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Unit step as a (row, column) delta
    pub fn delta(&self) -> Coordinate {
        match self {
            Direction::Up => Coordinate::new(-1, 0),
            Direction::Down => Coordinate::new(1, 0),
            Direction::Left => Coordinate::new(0, -1),
            Direction::Right => Coordinate::new(0, 1),
        }
    }
}
