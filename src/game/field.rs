//! Field bounds and cell size

use crate::config::{GameConfig, AGENT_LENGTH_MARGIN, CELL_SIZE, FIELD_HEIGHT, FIELD_WIDTH};

use super::position::Position;

/// The rectangular playfield. Every position in a session is quantized to
/// `cell` on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub width: i32,
    pub height: i32,
    pub cell: i32,
}

impl Field {
    pub fn new(width: i32, height: i32, cell: i32) -> Self {
        Self {
            width,
            height,
            cell,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.field_width, config.field_height, config.cell_size)
    }

    /// Largest x a whole cell can start at
    pub fn max_x(&self) -> i32 {
        self.width - self.cell
    }

    /// Largest y a whole cell can start at
    pub fn max_y(&self) -> i32 {
        self.height - self.cell
    }

    /// Boundary test used for the agent head. The far edges are inclusive,
    /// so a head sitting exactly on `width` or `height` is still inside.
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x <= self.width && pos.y >= 0 && pos.y <= self.height
    }

    /// Upper bound for a requested agent length
    pub fn max_agent_length(&self) -> i32 {
        (self.width - AGENT_LENGTH_MARGIN) / self.cell
    }

    /// Number of whole cells on the field
    pub fn cell_count(&self) -> i32 {
        (self.width / self.cell) * (self.height / self.cell)
    }
}

impl Default for Field {
    fn default() -> Self {
        Self::new(FIELD_WIDTH, FIELD_HEIGHT, CELL_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bounds() {
        let field = Field::default();
        assert_eq!(field.max_x(), 940);
        assert_eq!(field.max_y(), 480);
        assert_eq!(field.max_agent_length(), 43);
        assert_eq!(field.cell_count(), 48 * 25);
    }

    #[test]
    fn test_contains_is_inclusive() {
        let field = Field::default();
        assert!(field.contains(Position::new(0, 0)));
        assert!(field.contains(Position::new(960, 500)));
        assert!(!field.contains(Position::new(980, 100)));
        assert!(!field.contains(Position::new(100, -20)));
        assert!(!field.contains(Position::new(-20, 100)));
        assert!(!field.contains(Position::new(100, 520)));
    }
}
