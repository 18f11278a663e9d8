//! Render collaborator
//!
//! The engine hands every frame and lifecycle notice to a `Renderer`. The
//! in-memory implementation fans them out over a tokio broadcast channel, so
//! a WebSocket writer (or a test) can subscribe.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::debug;

use crate::config::BROADCAST_CAPACITY;
use crate::protocol::ServerMessage;

/// Receiver type for rendered messages
pub type RenderReceiver = broadcast::Receiver<Arc<ServerMessage>>;

/// Receives the session's output once per tick
#[async_trait]
pub trait Renderer: Send + Sync {
    /// Present a frame or a lifecycle message
    async fn present(&self, msg: ServerMessage);
}

/// Renderer backed by a tokio broadcast channel
#[derive(Clone)]
pub struct BroadcastRenderer {
    tx: broadcast::Sender<Arc<ServerMessage>>,
}

impl BroadcastRenderer {
    pub fn new() -> Self {
        Self::with_capacity(BROADCAST_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Subscribe to rendered messages
    pub fn subscribe(&self) -> RenderReceiver {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for BroadcastRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Renderer for BroadcastRenderer {
    async fn present(&self, msg: ServerMessage) {
        // send() fails when nobody is subscribed, which is fine
        if let Err(e) = self.tx.send(Arc::new(msg)) {
            debug!("Render send (no receivers): {}", e);
        }
    }
}
