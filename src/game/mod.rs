//! Game module

pub mod agent;
pub mod collision;
pub mod controller;
pub mod direction;
pub mod entity;
pub mod field;
pub mod game_loop;
pub mod placement;
pub mod position;
pub mod session;

pub use agent::Agent;
pub use controller::SessionController;
pub use direction::Direction;
pub use entity::{BodySegment, Collectible, Entity, EntityKind, Obstacle};
pub use field::Field;
pub use position::Position;
pub use session::{Session, SessionStatus, StartParams, TickReport};
