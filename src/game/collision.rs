//! Collision detection logic
//!
//! Every entity occupies exactly one cell of the same size, so two entities
//! overlap iff their top-left corners are equal.

use super::agent::Agent;
use super::entity::Entity;
use super::field::Field;
use super::position::Position;

/// What the agent's head ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Head left the field; treated as hitting itself
    Boundary,
    /// Head landed on one of its own body segments
    SelfBite,
    /// Head landed on `entities[index]`
    Entity { index: usize, edible: bool },
}

impl Outcome {
    pub fn is_edible(&self) -> bool {
        matches!(self, Outcome::Entity { edible: true, .. })
    }
}

/// Result of a collision check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collision {
    pub outcome: Outcome,
    /// Head position at detection time
    pub at: Position,
}

/// Exact-cell overlap
pub fn collide(a: Position, b: Position) -> bool {
    a == b
}

/// Head outside `[0, width] x [0, height]`
pub fn check_boundary(agent: &Agent, field: &Field) -> Option<Collision> {
    agent.is_out_of(field).then(|| Collision {
        outcome: Outcome::Boundary,
        at: agent.head(),
    })
}

/// Head on any body segment
pub fn check_self_bite(agent: &Agent) -> Option<Collision> {
    agent.has_bitten_itself().then(|| Collision {
        outcome: Outcome::SelfBite,
        at: agent.head(),
    })
}

/// Head on `entity`, which sits at `index` in the session's collection
pub fn check_entity(agent: &Agent, index: usize, entity: &dyn Entity) -> Option<Collision> {
    let head = agent.head();
    collide(head, entity.position()).then(|| Collision {
        outcome: Outcome::Entity {
            index,
            edible: entity.is_edible(),
        },
        at: head,
    })
}

/// Head on any non-agent entity, in collection order
pub fn check_entities(agent: &Agent, entities: &[Box<dyn Entity>]) -> Vec<Collision> {
    entities
        .iter()
        .enumerate()
        .filter_map(|(index, entity)| check_entity(agent, index, &**entity))
        .collect()
}

/// All collisions for the current state: boundary, then self-bite, then
/// entities.
///
/// Pure snapshot query. `Session::tick` does not use it: it runs the same
/// checks one at a time and resolves each before the next.
pub fn detect(agent: &Agent, entities: &[Box<dyn Entity>], field: &Field) -> Vec<Collision> {
    let mut collisions = Vec::new();

    collisions.extend(check_boundary(agent, field));
    collisions.extend(check_self_bite(agent));
    collisions.extend(check_entities(agent, entities));

    collisions
}
