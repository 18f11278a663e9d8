//! Entities on the field and the trait they share

use std::fmt;

use rand::rngs::StdRng;
use serde::Serialize;

use super::field::Field;
use super::placement::random_position;
use super::position::Position;
use crate::protocol::EntityView;

/// Tag used by the renderer to pick a sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Agent,
    BodySegment,
    Collectible,
    Obstacle,
}

/// What every entity update may touch besides the entity itself
pub struct TickContext<'a> {
    pub field: &'a Field,
    pub rng: &'a mut StdRng,
}

impl<'a> TickContext<'a> {
    pub fn new(field: &'a Field, rng: &'a mut StdRng) -> Self {
        Self { field, rng }
    }
}

/// State shared by every entity variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityState {
    pub position: Position,
    pub destroyed: bool,
    pub edible: bool,
}

impl EntityState {
    pub fn new(position: Position, edible: bool) -> Self {
        Self {
            position,
            destroyed: false,
            edible,
        }
    }
}

/// Capability interface for everything on the field.
///
/// `update` is required: each variant decides what a tick means for it.
pub trait Entity: Send + Sync + fmt::Debug {
    fn kind(&self) -> EntityKind;

    fn state(&self) -> &EntityState;

    fn state_mut(&mut self) -> &mut EntityState;

    /// Advance this entity by one tick
    fn update(&mut self, ctx: &mut TickContext<'_>);

    fn position(&self) -> Position {
        self.state().position
    }

    fn is_edible(&self) -> bool {
        self.state().edible
    }

    fn is_destroyed(&self) -> bool {
        self.state().destroyed
    }

    /// Called when the agent's head lands on this entity. Edible entities
    /// are marked destroyed and deal with it in their next `update`.
    fn on_collision(&mut self) {
        let state = self.state_mut();
        if state.edible {
            state.destroyed = true;
        }
    }

    /// What the render collaborator draws for this entity
    fn view(&self) -> EntityView {
        let position = self.position();
        EntityView {
            kind: self.kind(),
            x: position.x,
            y: position.y,
        }
    }
}

/// An item the agent eats. It never disappears: once eaten it moves to a
/// fresh random cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collectible {
    state: EntityState,
}

impl Collectible {
    pub fn at(position: Position) -> Self {
        Self {
            state: EntityState::new(position, true),
        }
    }
}

impl Entity for Collectible {
    fn kind(&self) -> EntityKind {
        EntityKind::Collectible
    }

    fn state(&self) -> &EntityState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut EntityState {
        &mut self.state
    }

    fn update(&mut self, ctx: &mut TickContext<'_>) {
        if self.state.destroyed {
            self.state.position = random_position(ctx.field, &mut *ctx.rng);
            self.state.destroyed = false;
        }
    }
}

/// A static hazard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Obstacle {
    state: EntityState,
}

impl Obstacle {
    pub fn at(position: Position) -> Self {
        Self {
            state: EntityState::new(position, false),
        }
    }
}

impl Entity for Obstacle {
    fn kind(&self) -> EntityKind {
        EntityKind::Obstacle
    }

    fn state(&self) -> &EntityState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut EntityState {
        &mut self.state
    }

    fn update(&mut self, _ctx: &mut TickContext<'_>) {}
}

/// One trailing unit of the agent's body. The agent moves it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodySegment {
    state: EntityState,
}

impl BodySegment {
    pub fn at(position: Position) -> Self {
        Self {
            state: EntityState::new(position, false),
        }
    }

    pub(crate) fn move_to(&mut self, position: Position) {
        self.state.position = position;
    }
}

impl Entity for BodySegment {
    fn kind(&self) -> EntityKind {
        EntityKind::BodySegment
    }

    fn state(&self) -> &EntityState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut EntityState {
        &mut self.state
    }

    fn update(&mut self, _ctx: &mut TickContext<'_>) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_collectible_respawns_on_grid() {
        let field = Field::default();
        let mut rng = StdRng::seed_from_u64(9);

        for _ in 0..500 {
            let mut item = Collectible::at(Position::new(100, 100));
            item.on_collision();
            assert!(item.is_destroyed());

            item.update(&mut TickContext::new(&field, &mut rng));

            let pos = item.position();
            assert!(!item.is_destroyed());
            assert!(pos.x >= 0 && pos.x <= field.max_x());
            assert!(pos.y >= 0 && pos.y <= field.max_y());
            assert!(pos.is_aligned(field.cell));
        }
    }

    #[test]
    fn test_collectible_stays_put_until_eaten() {
        let field = Field::default();
        let mut rng = StdRng::seed_from_u64(9);
        let mut item = Collectible::at(Position::new(100, 100));

        item.update(&mut TickContext::new(&field, &mut rng));
        assert_eq!(item.position(), Position::new(100, 100));
    }

    #[test]
    fn test_obstacle_is_inert() {
        let field = Field::default();
        let mut rng = StdRng::seed_from_u64(9);
        let mut stone = Obstacle::at(Position::new(200, 40));

        stone.on_collision();
        stone.update(&mut TickContext::new(&field, &mut rng));

        assert!(!stone.is_edible());
        assert!(!stone.is_destroyed());
        assert_eq!(stone.position(), Position::new(200, 40));
    }

    #[test]
    fn test_view() {
        let item = Collectible::at(Position::new(20, 60));
        let view = item.view();
        assert_eq!(view.kind, EntityKind::Collectible);
        assert_eq!((view.x, view.y), (20, 60));
    }
}
