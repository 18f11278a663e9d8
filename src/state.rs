//! Application state shared across all handlers

use dashmap::DashMap;
use serde::Serialize;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::protocol::ServerMessage;

/// Latest known state of one connection's session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub tick: u64,
    pub lives: u32,
    pub score: u32,
    pub running: bool,
}

impl SessionSummary {
    /// Fold a rendered message into the summary
    pub fn observe(&mut self, msg: &ServerMessage) {
        match msg {
            ServerMessage::Frame { data } => {
                self.tick = data.tick;
                self.lives = data.lives;
                self.score = data.score;
                self.running = true;
            }
            ServerMessage::GameOver { score, ticks } => {
                self.score = *score;
                self.tick = *ticks;
                self.running = false;
            }
            ServerMessage::Paused | ServerMessage::Error { .. } => {}
        }
    }
}

/// Shared application state
pub struct AppState {
    pub config: AppConfig,
    /// One entry per connected player, keyed by connection UUID
    pub sessions: DashMap<Uuid, SessionSummary>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            sessions: DashMap::new(),
        }
    }

    /// Number of connected players
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Sessions that have not reached their terminal state
    pub fn running_count(&self) -> usize {
        self.sessions.iter().filter(|e| e.value().running).count()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Direction;
    use crate::protocol::FrameData;

    fn frame(tick: u64, lives: u32, score: u32) -> ServerMessage {
        ServerMessage::Frame {
            data: FrameData {
                tick,
                lives,
                score,
                length: 2,
                direction: Direction::Right,
                width: 960,
                height: 500,
                cell: 20,
                entities: Vec::new(),
            },
        }
    }

    #[test]
    fn test_summary_tracks_frames() {
        let mut summary = SessionSummary::default();

        summary.observe(&frame(3, 5, 1));
        assert_eq!(summary, SessionSummary { tick: 3, lives: 5, score: 1, running: true });

        summary.observe(&ServerMessage::GameOver { score: 2, ticks: 9 });
        assert_eq!(summary.score, 2);
        assert!(!summary.running);
    }

    #[test]
    fn test_counts() {
        let state = AppState::default();
        let id = Uuid::new_v4();
        state.sessions.insert(id, SessionSummary::default());
        state.sessions.insert(Uuid::new_v4(), SessionSummary::default());

        if let Some(mut entry) = state.sessions.get_mut(&id) {
            entry.observe(&frame(1, 5, 0));
        }

        assert_eq!(state.session_count(), 2);
        assert_eq!(state.running_count(), 1);
    }
}
