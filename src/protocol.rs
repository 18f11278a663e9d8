//! Protocol messages for WebSocket communication

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::error::EngineError;
use crate::game::direction::Direction;
use crate::game::entity::EntityKind;
use crate::game::session::StartParams;

/// Start request; absent fields fall back to the configured defaults
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StartRequest {
    pub agent_length: Option<i32>,
    pub obstacle_count: Option<i32>,
    pub item_count: Option<i32>,
}

impl StartRequest {
    pub fn into_params(self, defaults: &GameConfig) -> StartParams {
        StartParams {
            agent_length: self.agent_length.unwrap_or(defaults.agent_length),
            obstacle_count: self.obstacle_count.unwrap_or(defaults.obstacle_count),
            item_count: self.item_count.unwrap_or(defaults.item_count),
        }
    }
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum JsonCommand {
    Start(StartRequest),
    Direction { direction: Direction },
    Pause,
    Quit,
}

/// Messages sent from client to server
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientMessage {
    /// Start (or restart) a session
    Start(StartRequest),
    /// Direction change command
    Direction(Direction),
    /// Informational pause
    Pause,
    /// End the session
    Quit,
    /// Ping to keep connection alive
    Ping,
}

impl ClientMessage {
    /// Parse a client message: a bare word (`up`, `pause`, `start`, ...) or a
    /// JSON object tagged with `type`
    pub fn parse(s: &str) -> Result<Self, EngineError> {
        let s = s.trim();

        if s.starts_with('{') {
            let command: JsonCommand = serde_json::from_str(s)
                .map_err(|e| EngineError::UnknownCommand(e.to_string()))?;
            return Ok(match command {
                JsonCommand::Start(request) => ClientMessage::Start(request),
                JsonCommand::Direction { direction } => ClientMessage::Direction(direction),
                JsonCommand::Pause => ClientMessage::Pause,
                JsonCommand::Quit => ClientMessage::Quit,
            });
        }

        match s.to_lowercase().as_str() {
            "start" => Ok(ClientMessage::Start(StartRequest::default())),
            "pause" | "p" => Ok(ClientMessage::Pause),
            "quit" | "q" => Ok(ClientMessage::Quit),
            "ping" => Ok(ClientMessage::Ping),
            other => other.parse().map(ClientMessage::Direction),
        }
    }
}

/// One drawable entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityView {
    pub kind: EntityKind,
    pub x: i32,
    pub y: i32,
}

/// Everything the renderer needs for one tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameData {
    pub tick: u64,
    pub lives: u32,
    pub score: u32,
    pub length: usize,
    pub direction: Direction,
    pub width: i32,
    pub height: i32,
    pub cell: i32,
    pub entities: Vec<EntityView>,
}

/// Messages sent from server to client
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ServerMessage {
    /// Rendered state after a tick
    Frame { data: FrameData },
    /// Pause was requested; the simulation keeps running
    Paused,
    /// Session reached its terminal state
    GameOver { score: u32, ticks: u64 },
    /// A client message could not be handled
    Error { message: String },
}

impl ServerMessage {
    /// Serialize message to JSON string
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}
