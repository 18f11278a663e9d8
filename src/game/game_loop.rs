//! Game loop - one task per session, ticking on a fixed period

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, warn};

use super::controller::SessionController;
use super::direction::Direction;
use super::session::StartParams;
use crate::config::COMMAND_CAPACITY;
use crate::render::Renderer;

/// Input delivered to a session task between ticks
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Start(StartParams),
    Direction(Direction),
    Pause,
    Quit,
}

/// Handle to a running session task. Dropping it stops the task once the
/// command channel closes.
pub struct SessionHandle {
    tx: mpsc::Sender<SessionCommand>,
    task: JoinHandle<()>,
}

impl SessionHandle {
    /// Queue a command; it is applied before the next tick
    pub async fn send(&self, command: SessionCommand) -> bool {
        self.tx.send(command).await.is_ok()
    }

    pub fn sender(&self) -> mpsc::Sender<SessionCommand> {
        self.tx.clone()
    }

    /// Close the command channel and wait for the task to finish
    pub async fn shutdown(self) {
        drop(self.tx);
        if let Err(e) = self.task.await {
            warn!("Session task ended abnormally: {}", e);
        }
    }
}

/// Spawn the session task
pub fn spawn_session_loop<R>(controller: SessionController<R>) -> SessionHandle
where
    R: Renderer + 'static,
{
    let (tx, rx) = mpsc::channel(COMMAND_CAPACITY);
    let task = tokio::spawn(run_session_loop(controller, rx));
    SessionHandle { tx, task }
}

/// Drive a controller until its command channel closes.
///
/// Commands and ticks are handled by the same task, so a tick always runs to
/// completion and commands land between ticks. The ticker only fires while
/// a session is running.
pub async fn run_session_loop<R: Renderer>(
    mut controller: SessionController<R>,
    mut commands: mpsc::Receiver<SessionCommand>,
) {
    let mut ticker = interval(controller.tick_period());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            command = commands.recv() => {
                let Some(command) = command else {
                    debug!("Command channel closed, stopping session loop");
                    break;
                };

                match command {
                    SessionCommand::Start(params) => {
                        controller.start(params).await;
                        // First tick one full period after the start
                        ticker.reset();
                    }
                    SessionCommand::Direction(direction) => {
                        if let Err(e) = controller.change_direction(direction) {
                            debug!("Direction ignored: {}", e);
                        }
                    }
                    SessionCommand::Pause => controller.pause().await,
                    SessionCommand::Quit => {
                        if let Err(e) = controller.quit().await {
                            debug!("Quit ignored: {}", e);
                        }
                    }
                }
            }
            _ = ticker.tick(), if controller.is_running() => {
                controller.tick().await;
            }
        }
    }
}
