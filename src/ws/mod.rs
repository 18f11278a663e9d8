//! WebSocket front end

mod handler;

pub use handler::ws_handler;
