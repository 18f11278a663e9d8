//! Direction enum for agent movement

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Direction of movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    /// Agents start and reset moving right
    #[default]
    Right,
}

impl Direction {
    /// Unit step on the grid, y grows downwards
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

impl FromStr for Direction {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "up" | "north" => Ok(Direction::Up),
            "down" | "south" => Ok(Direction::Down),
            "left" | "west" => Ok(Direction::Left),
            "right" | "east" => Ok(Direction::Right),
            other => Err(EngineError::InvalidDirection(other.to_string())),
        }
    }
}
