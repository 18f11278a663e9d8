//! Grid snake simulation engine
//!
//! The agent moves one cell per tick across a bounded field, eats
//! collectibles to grow and score, and loses a life on obstacles, the field
//! edge or its own body. `game` holds the engine; `render`, `protocol`, `ws`
//! and `state` are the plumbing that puts it on a WebSocket.

pub mod config;
pub mod error;
pub mod game;
pub mod protocol;
pub mod render;
pub mod state;
pub mod ws;

pub use error::{ConfigError, EngineError};
