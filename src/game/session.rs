//! A single game session and its tick engine

use rand::rngs::StdRng;
use serde::Deserialize;
use tracing::{debug, info};

use super::agent::{Agent, Resolution};
use super::collision::{check_boundary, check_entity, check_self_bite, Collision, Outcome};
use super::direction::Direction;
use super::entity::{Collectible, Entity, Obstacle, TickContext};
use super::field::Field;
use super::placement::{random_position, random_row};
use super::position::Position;
use crate::config::{GameConfig, DEFAULT_AGENT_LENGTH, DEFAULT_ITEM_COUNT, DEFAULT_OBSTACLE_COUNT};
use crate::protocol::FrameData;

/// Start-time values as supplied by the player; may be out of range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct StartParams {
    pub agent_length: i32,
    pub obstacle_count: i32,
    pub item_count: i32,
}

/// Start-time values after clamping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedParams {
    /// Total length including the head
    pub agent_length: usize,
    pub obstacle_count: usize,
    pub item_count: usize,
}

impl StartParams {
    pub fn new(agent_length: i32, obstacle_count: i32, item_count: i32) -> Self {
        Self {
            agent_length,
            obstacle_count,
            item_count,
        }
    }

    /// Out-of-range values are silently replaced by defaults. Counts above
    /// the field's cell count are capped to it.
    pub fn clamped(self, field: &Field) -> ValidatedParams {
        let max_count = field.cell_count();
        let agent_length = if self.agent_length <= 1 || self.agent_length > field.max_agent_length()
        {
            DEFAULT_AGENT_LENGTH
        } else {
            self.agent_length
        };
        let obstacle_count = if self.obstacle_count < 0 {
            DEFAULT_OBSTACLE_COUNT
        } else {
            self.obstacle_count
        };
        let item_count = if self.item_count <= 0 {
            DEFAULT_ITEM_COUNT
        } else {
            self.item_count
        };

        ValidatedParams {
            agent_length: agent_length as usize,
            obstacle_count: obstacle_count.min(max_count) as usize,
            item_count: item_count.min(max_count) as usize,
        }
    }
}

impl Default for StartParams {
    fn default() -> Self {
        Self::new(DEFAULT_AGENT_LENGTH, DEFAULT_OBSTACLE_COUNT, DEFAULT_ITEM_COUNT)
    }
}

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Running,
    /// Terminal: lives ran out or the player quit
    Over,
}

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    pub tick: u64,
    pub collisions: Vec<Collision>,
    pub items_eaten: u32,
    pub lives_lost: u32,
    pub grew: bool,
    pub game_over: bool,
}

/// Owns the agent, every other entity and the RNG of one game
pub struct Session {
    field: Field,
    agent: Agent,
    entities: Vec<Box<dyn Entity>>,
    rng: StdRng,
    status: SessionStatus,
    ticks: u64,
}

impl Session {
    /// Build a fresh session: the agent near the left edge moving right,
    /// then obstacles, then collectibles at random cells
    pub fn start(params: StartParams, config: &GameConfig, mut rng: StdRng) -> Self {
        let field = Field::from_config(config);
        let params = params.clamped(&field);

        let head = Position::new(
            (params.agent_length as i32 + 1) * field.cell,
            random_row(&field, &mut rng),
        );
        let agent = Agent::new(head, params.agent_length - 1, Direction::Right, field.cell)
            .with_lives(config.lives)
            .with_growth_threshold(config.growth_threshold);

        let mut entities: Vec<Box<dyn Entity>> =
            Vec::with_capacity(params.obstacle_count + params.item_count);
        for _ in 0..params.obstacle_count {
            entities.push(Box::new(Obstacle::at(random_position(&field, &mut rng))));
        }
        for _ in 0..params.item_count {
            entities.push(Box::new(Collectible::at(random_position(&field, &mut rng))));
        }

        info!(
            "Session started: length {}, {} obstacles, {} items",
            params.agent_length, params.obstacle_count, params.item_count
        );

        Self::from_parts(field, agent, entities, rng)
    }

    /// Assemble a session from prepared pieces
    pub fn from_parts(
        field: Field,
        agent: Agent,
        entities: Vec<Box<dyn Entity>>,
        rng: StdRng,
    ) -> Self {
        Self {
            field,
            agent,
            entities,
            rng,
            status: SessionStatus::Running,
            ticks: 0,
        }
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    pub fn entities(&self) -> &[Box<dyn Entity>] {
        &self.entities
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status == SessionStatus::Over
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Applied by the next movement step
    pub fn change_direction(&mut self, direction: Direction) {
        self.agent.change_direction(direction);
    }

    /// Enter the terminal state; later ticks do nothing
    pub fn end(&mut self) {
        if self.status != SessionStatus::Over {
            info!(
                "Session over after {} ticks, score {}",
                self.ticks,
                self.agent.total_items_eaten()
            );
        }
        self.status = SessionStatus::Over;
    }

    /// Run one tick: collisions, movement, body sync, growth, entity
    /// updates. Returns `None` once the session is over.
    pub fn tick(&mut self) -> Option<TickReport> {
        if self.is_over() {
            return None;
        }

        self.ticks += 1;
        let mut report = TickReport {
            tick: self.ticks,
            ..TickReport::default()
        };

        // Each check sees the state left by the previous resolution, so a
        // reset is visible to every later check of the same tick.
        if let Some(collision) = check_boundary(&self.agent, &self.field) {
            self.resolve(collision, &mut report);
        }
        if let Some(collision) = check_self_bite(&self.agent) {
            self.resolve(collision, &mut report);
        }
        for index in 0..self.entities.len() {
            if let Some(collision) = check_entity(&self.agent, index, &*self.entities[index]) {
                self.resolve(collision, &mut report);
            }
        }

        report.grew = self.agent.advance();
        if report.grew {
            debug!("Agent grew to {} segments", self.agent.length());
        }

        let mut ctx = TickContext::new(&self.field, &mut self.rng);
        for entity in self.entities.iter_mut() {
            entity.update(&mut ctx);
        }

        report.game_over = self.is_over();
        Some(report)
    }

    fn resolve(&mut self, collision: Collision, report: &mut TickReport) {
        report.collisions.push(collision);

        let mut ctx = TickContext::new(&self.field, &mut self.rng);
        match self.agent.resolve(collision.outcome.is_edible(), &mut ctx) {
            Resolution::Ate => {
                report.items_eaten += 1;
                if let Outcome::Entity { index, .. } = collision.outcome {
                    if let Some(entity) = self.entities.get_mut(index) {
                        entity.on_collision();
                    }
                }
                debug!(
                    "Ate item at ({}, {}), score {}",
                    collision.at.x,
                    collision.at.y,
                    self.agent.total_items_eaten()
                );
            }
            Resolution::LifeLost => {
                report.lives_lost += 1;
                info!(
                    "Life lost ({:?}), {} remaining",
                    collision.outcome,
                    self.agent.lives()
                );
            }
            Resolution::Fatal => self.end(),
        }
    }

    /// Snapshot for the render collaborator
    pub fn to_frame(&self) -> FrameData {
        let mut entities = Vec::with_capacity(1 + self.agent.length() + self.entities.len());
        entities.extend(self.entities.iter().map(|e| e.view()));
        entities.extend(self.agent.segments().iter().map(|s| s.view()));
        entities.push(self.agent.view());

        FrameData {
            tick: self.ticks,
            lives: self.agent.lives(),
            score: self.agent.total_items_eaten(),
            length: self.agent.length(),
            direction: self.agent.direction(),
            width: self.field.width,
            height: self.field.height,
            cell: self.field.cell,
            entities,
        }
    }
}
