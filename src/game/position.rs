//! Position struct for grid cells

use serde::{Deserialize, Serialize};

use super::direction::Direction;

/// Top-left corner of a cell on the field, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The cell one step away in `direction`. No wrapping: leaving the field
    /// is caught by the boundary check.
    pub fn step(&self, direction: Direction, cell: i32) -> Position {
        let (dx, dy) = direction.delta();
        Position::new(self.x + dx * cell, self.y + dy * cell)
    }

    /// Both coordinates are multiples of `cell`
    pub fn is_aligned(&self, cell: i32) -> bool {
        self.x.rem_euclid(cell) == 0 && self.y.rem_euclid(cell) == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step() {
        let pos = Position::new(100, 100);

        assert_eq!(pos.step(Direction::Up, 20), Position::new(100, 80));
        assert_eq!(pos.step(Direction::Down, 20), Position::new(100, 120));
        assert_eq!(pos.step(Direction::Left, 20), Position::new(80, 100));
        assert_eq!(pos.step(Direction::Right, 20), Position::new(120, 100));
    }

    #[test]
    fn test_step_does_not_wrap() {
        let edge = Position::new(0, 0);
        assert_eq!(edge.step(Direction::Left, 20), Position::new(-20, 0));
        assert_eq!(edge.step(Direction::Up, 20), Position::new(0, -20));
    }

    #[test]
    fn test_is_aligned() {
        assert!(Position::new(40, 480).is_aligned(20));
        assert!(Position::new(-20, 0).is_aligned(20));
        assert!(!Position::new(45, 40).is_aligned(20));
    }
}
