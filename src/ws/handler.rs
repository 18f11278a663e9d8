//! WebSocket handler for client connections
//!
//! Every connection gets its own session task. Frames go out through a
//! `BroadcastRenderer`; client text becomes `SessionCommand`s.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::game::game_loop::{spawn_session_loop, SessionCommand};
use crate::game::SessionController;
use crate::protocol::{ClientMessage, ServerMessage};
use crate::render::{BroadcastRenderer, Renderer};
use crate::state::{AppState, SessionSummary};

/// WebSocket upgrade handler
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle a WebSocket connection
async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection_id = Uuid::new_v4();
    info!("Player {} connected", connection_id);

    let renderer = BroadcastRenderer::with_capacity(state.config.server.broadcast_capacity);
    // Subscribe before the loop starts so the first frame is not missed
    let mut render_rx = renderer.subscribe();
    let controller = SessionController::new(state.config.game.clone(), renderer.clone());
    let session = spawn_session_loop(controller);

    state.sessions.insert(connection_id, SessionSummary::default());

    let (mut sender, mut receiver) = socket.split();

    // Task to forward rendered messages to this client
    let mut send_task = {
        let state = state.clone();

        tokio::spawn(async move {
            loop {
                match render_rx.recv().await {
                    Ok(msg) => {
                        if let Some(mut summary) = state.sessions.get_mut(&connection_id) {
                            summary.observe(&msg);
                        }
                        if sender.send(Message::Text(msg.to_json().into())).await.is_err() {
                            break;
                        }
                    }
                    Err(RecvError::Lagged(n)) => {
                        warn!("Client {} lagged by {} frames", connection_id, n);
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        })
    };

    // Task to turn client messages into session commands
    let mut recv_task = {
        let commands = session.sender();
        let defaults = state.config.game.clone();

        tokio::spawn(async move {
            while let Some(result) = receiver.next().await {
                match result {
                    Ok(Message::Text(text)) => {
                        let command = match ClientMessage::parse(&text) {
                            Ok(ClientMessage::Start(request)) => {
                                SessionCommand::Start(request.into_params(&defaults))
                            }
                            Ok(ClientMessage::Direction(direction)) => {
                                SessionCommand::Direction(direction)
                            }
                            Ok(ClientMessage::Pause) => SessionCommand::Pause,
                            Ok(ClientMessage::Quit) => SessionCommand::Quit,
                            Ok(ClientMessage::Ping) => {
                                debug!("Ping from player {}", connection_id);
                                continue;
                            }
                            Err(e) => {
                                warn!("Player {} sent a bad message: {}", connection_id, e);
                                renderer
                                    .present(ServerMessage::Error { message: e.to_string() })
                                    .await;
                                continue;
                            }
                        };

                        debug!("Player {} command: {:?}", connection_id, command);
                        if commands.send(command).await.is_err() {
                            break;
                        }
                    }
                    Ok(Message::Close(_)) => {
                        info!("Player {} sent close frame", connection_id);
                        break;
                    }
                    Ok(_) => {
                        // Ignore binary, ping, pong frames
                    }
                    Err(e) => {
                        error!("WebSocket error for player {}: {}", connection_id, e);
                        break;
                    }
                }
            }
        })
    };

    // Wait for either task to finish, then stop the other
    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    info!("Player {} disconnected", connection_id);
    state.sessions.remove(&connection_id);
    session.shutdown().await;
}
