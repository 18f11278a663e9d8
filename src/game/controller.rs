//! Session controller: owns the current session and talks to the renderer

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use super::direction::Direction;
use super::session::{Session, StartParams, TickReport};
use crate::config::GameConfig;
use crate::error::EngineError;
use crate::protocol::ServerMessage;
use crate::render::Renderer;

pub struct SessionController<R: Renderer> {
    config: GameConfig,
    session: Option<Session>,
    renderer: R,
    seeds: StdRng,
}

impl<R: Renderer> SessionController<R> {
    pub fn new(config: GameConfig, renderer: R) -> Self {
        let seeds = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            config,
            session: None,
            renderer,
            seeds,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Fixed period between ticks
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.config.tick_ms)
    }

    /// A session exists and has not reached its terminal state
    pub fn is_running(&self) -> bool {
        self.session.as_ref().is_some_and(|s| !s.is_over())
    }

    /// Drop any previous session and build a new one. The caller restarts
    /// its ticker.
    pub async fn start(&mut self, params: StartParams) {
        if self.session.take().is_some() {
            debug!("Tearing down previous session");
        }

        let rng = StdRng::seed_from_u64(self.seeds.gen());
        let session = Session::start(params, &self.config, rng);
        let frame = session.to_frame();
        self.session = Some(session);

        self.renderer.present(ServerMessage::Frame { data: frame }).await;
    }

    pub fn change_direction(&mut self, direction: Direction) -> Result<(), EngineError> {
        let session = self.session.as_mut().ok_or(EngineError::NoSession)?;
        session.change_direction(direction);
        Ok(())
    }

    /// Tell the renderer; the scheduler keeps running
    pub async fn pause(&self) {
        info!("Pause requested");
        self.renderer.present(ServerMessage::Paused).await;
    }

    /// End the running session through the terminal path
    pub async fn quit(&mut self) -> Result<(), EngineError> {
        let session = self.session.as_mut().ok_or(EngineError::NoSession)?;
        if session.is_over() {
            return Ok(());
        }

        session.end();
        let msg = game_over(session);
        self.renderer.present(msg).await;
        Ok(())
    }

    /// Run one tick and render it. Does nothing without a running session.
    pub async fn tick(&mut self) -> Option<TickReport> {
        let session = self.session.as_mut()?;
        let report = session.tick()?;

        let frame = session.to_frame();
        let over = report.game_over.then(|| game_over(session));

        self.renderer.present(ServerMessage::Frame { data: frame }).await;
        if let Some(msg) = over {
            self.renderer.present(msg).await;
        }

        Some(report)
    }
}

fn game_over(session: &Session) -> ServerMessage {
    ServerMessage::GameOver {
        score: session.agent().total_items_eaten(),
        ticks: session.ticks(),
    }
}
