//! The player-controlled agent (the snake)

use std::collections::VecDeque;

use tracing::debug;

use super::direction::Direction;
use super::entity::{BodySegment, Entity, EntityKind, EntityState, TickContext};
use super::field::Field;
use super::placement::random_row;
use super::position::Position;
use crate::config::{GROWTH_THRESHOLD, STARTING_LIVES};

/// How a collision was settled for the agent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Ate an item
    Ate,
    /// Lost a life and was reset
    LifeLost,
    /// Hit something with no lives left
    Fatal,
}

/// The agent: a head plus trailing body segments.
///
/// `history[i]` is the cell the head left `i + 1` ticks ago, and segment `i`
/// always sits on `history[i]` after a movement step. History and segments
/// have the same length at every tick boundary.
#[derive(Debug, Clone)]
pub struct Agent {
    state: EntityState,
    lives: u32,
    direction: Direction,
    history: VecDeque<Position>,
    segments: Vec<BodySegment>,
    items_since_growth: u32,
    total_items: u32,
    growth_threshold: u32,
    cell: i32,
}

impl Agent {
    /// Create an agent with `length` body segments laid out in a straight
    /// line to the left of `head`
    pub fn new(head: Position, length: usize, direction: Direction, cell: i32) -> Self {
        let mut agent = Self {
            state: EntityState::new(head, false),
            lives: STARTING_LIVES,
            direction,
            history: VecDeque::with_capacity(length + 1),
            segments: Vec::with_capacity(length + 1),
            items_since_growth: 0,
            total_items: 0,
            growth_threshold: GROWTH_THRESHOLD,
            cell,
        };

        for i in 0..length {
            let pos = agent.trailing_cell(head, i);
            agent.segments.push(BodySegment::at(pos));
            agent.history.push_back(pos);
        }

        agent
    }

    pub fn with_lives(mut self, lives: u32) -> Self {
        self.lives = lives;
        self
    }

    pub fn with_growth_threshold(mut self, threshold: u32) -> Self {
        self.growth_threshold = threshold;
        self
    }

    pub fn head(&self) -> Position {
        self.state.position
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    /// Number of body segments, head excluded
    pub fn length(&self) -> usize {
        self.segments.len()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn segments(&self) -> &[BodySegment] {
        &self.segments
    }

    pub fn history(&self) -> &VecDeque<Position> {
        &self.history
    }

    pub fn items_since_growth(&self) -> u32 {
        self.items_since_growth
    }

    /// Score
    pub fn total_items_eaten(&self) -> u32 {
        self.total_items
    }

    /// Takes effect on the next movement step. Reversal is allowed.
    pub fn change_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Head has left the field
    pub fn is_out_of(&self, field: &Field) -> bool {
        !field.contains(self.head())
    }

    /// Head sits on one of the body segments
    pub fn has_bitten_itself(&self) -> bool {
        let head = self.head();
        self.segments.iter().any(|s| s.position() == head)
    }

    /// Settle a collision with something of the given edibility
    pub fn resolve(&mut self, edible: bool, ctx: &mut TickContext<'_>) -> Resolution {
        if edible {
            self.items_since_growth += 1;
            self.total_items += 1;
            Resolution::Ate
        } else if self.lives == 0 {
            Resolution::Fatal
        } else {
            self.lives -= 1;
            self.reset(ctx);
            Resolution::LifeLost
        }
    }

    /// Put the agent back near the left edge on a random row, moving right,
    /// with the body laid out straight behind the head
    pub fn reset(&mut self, ctx: &mut TickContext<'_>) {
        let length = self.length() as i32;
        let head = Position::new((length + 2) * self.cell, random_row(ctx.field, &mut *ctx.rng));

        self.direction = Direction::Right;
        self.state.position = head;

        for i in 0..self.segments.len() {
            let pos = self.trailing_cell(head, i);
            self.segments[i].move_to(pos);
            self.history[i] = pos;
        }

        debug!("Agent reset to ({}, {}), {} lives left", head.x, head.y, self.lives);
    }

    /// Movement, body sync and growth for one tick. Returns whether the
    /// agent grew.
    pub fn advance(&mut self) -> bool {
        let previous = self.head();
        self.history.push_front(previous);
        self.history.pop_back();

        self.state.position = previous.step(self.direction, self.cell);

        for (segment, pos) in self.segments.iter_mut().zip(self.history.iter()) {
            segment.move_to(*pos);
        }

        if self.items_since_growth >= self.growth_threshold {
            self.items_since_growth = 0;
            self.grow(previous);
            return true;
        }

        false
    }

    /// Add a segment on top of the current tail. Later ticks pull it into
    /// place through the history shift, so the tail overlaps for one tick.
    fn grow(&mut self, previous_head: Position) {
        let tail = self
            .segments
            .last()
            .map(|s| s.position())
            .unwrap_or(previous_head);

        self.segments.push(BodySegment::at(tail));
        self.history.push_back(tail);
    }

    fn trailing_cell(&self, head: Position, index: usize) -> Position {
        Position::new(head.x - (index as i32 + 1) * self.cell, head.y)
    }
}

impl Entity for Agent {
    fn kind(&self) -> EntityKind {
        EntityKind::Agent
    }

    fn state(&self) -> &EntityState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut EntityState {
        &mut self.state
    }

    /// Same step as `advance`. `Session::tick` calls `advance` directly to
    /// learn whether the agent grew.
    fn update(&mut self, _ctx: &mut TickContext<'_>) {
        self.advance();
    }
}
