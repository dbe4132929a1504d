//! Draft session actor.
//!
//! Runs a [`DraftEngine`] on its own tokio task so that callers on any
//! thread can drive it. Commands are processed one at a time, in arrival
//! order, so no two turn advances interleave. Timer ticks arrive on a
//! separate channel and are forwarded only if they belong to the turn
//! that is currently running.
//!
//! ```text
//!  DraftHandle ──commands──▶ ┌──────────────┐ ──DraftEvent──▶ events rx
//!  DraftHandle ──commands──▶ │ DraftSession │
//!                            │  DraftEngine │ ◀──TimerEvent── PickTimer task
//!                            └──────────────┘
//! ```

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

use crate::config::DraftConfig;

use super::engine::{DraftEngine, DraftError, TurnOutcome};
use super::event::{DraftEvent, DraftSnapshot};
use super::participant::FinalRoster;
use super::pool::SelectableItem;
use super::timer::{PickTimer, TimerError, TimerEvent};

/// Maximum queued commands before senders wait.
pub const COMMAND_BUFFER: usize = 32;

/// Reply channel carried by every command.
pub type Reply<T> = oneshot::Sender<T>;

/// Commands accepted by a session.
#[derive(Debug)]
pub enum DraftCommand {
    Configure {
        participants: Vec<String>,
        teams: Vec<String>,
        reply: Reply<Result<(), DraftError>>,
    },
    LoadItems {
        items: Vec<SelectableItem>,
        reply: Reply<Result<(), DraftError>>,
    },
    AssignTeam {
        participant: String,
        team: String,
        reply: Reply<Result<(), DraftError>>,
    },
    Pick {
        item: String,
        reply: Reply<Result<TurnOutcome, DraftError>>,
    },
    Pass {
        reply: Reply<Result<TurnOutcome, DraftError>>,
    },
    StopTimer {
        reply: Reply<()>,
    },
    Snapshot {
        reply: Reply<DraftSnapshot>,
    },
    FinalRosters {
        reply: Reply<Option<Vec<FinalRoster>>>,
    },
}

/// Session errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Draft(#[from] DraftError),

    #[error("draft session has shut down")]
    Closed,
}

/// Cloneable handle for sending commands to a session.
#[derive(Debug, Clone)]
pub struct DraftHandle {
    commands: mpsc::Sender<DraftCommand>,
}

impl DraftHandle {
    async fn request<T>(
        &self,
        build: impl FnOnce(Reply<T>) -> DraftCommand,
    ) -> Result<T, SessionError> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(build(reply))
            .await
            .map_err(|_| SessionError::Closed)?;
        response.await.map_err(|_| SessionError::Closed)
    }

    pub async fn configure(
        &self,
        participants: Vec<String>,
        teams: Vec<String>,
    ) -> Result<(), SessionError> {
        Ok(self
            .request(|reply| DraftCommand::Configure {
                participants,
                teams,
                reply,
            })
            .await??)
    }

    pub async fn load_items(&self, items: Vec<SelectableItem>) -> Result<(), SessionError> {
        Ok(self
            .request(|reply| DraftCommand::LoadItems { items, reply })
            .await??)
    }

    pub async fn assign_team(
        &self,
        participant: impl Into<String>,
        team: impl Into<String>,
    ) -> Result<(), SessionError> {
        let participant = participant.into();
        let team = team.into();
        Ok(self
            .request(|reply| DraftCommand::AssignTeam {
                participant,
                team,
                reply,
            })
            .await??)
    }

    pub async fn pick(&self, item: impl Into<String>) -> Result<TurnOutcome, SessionError> {
        let item = item.into();
        Ok(self
            .request(|reply| DraftCommand::Pick { item, reply })
            .await??)
    }

    pub async fn pass(&self) -> Result<TurnOutcome, SessionError> {
        Ok(self.request(|reply| DraftCommand::Pass { reply }).await??)
    }

    pub async fn stop_timer(&self) -> Result<(), SessionError> {
        self.request(|reply| DraftCommand::StopTimer { reply }).await
    }

    pub async fn snapshot(&self) -> Result<DraftSnapshot, SessionError> {
        self.request(|reply| DraftCommand::Snapshot { reply }).await
    }

    pub async fn final_rosters(&self) -> Result<Option<Vec<FinalRoster>>, SessionError> {
        self.request(|reply| DraftCommand::FinalRosters { reply })
            .await
    }
}

/// Single-writer owner of a draft.
#[derive(Debug)]
pub struct DraftSession {
    engine: DraftEngine<PickTimer, mpsc::UnboundedSender<DraftEvent>>,
    commands: mpsc::Receiver<DraftCommand>,
    timer_events: mpsc::UnboundedReceiver<TimerEvent>,
}

impl DraftSession {
    /// Start a session on the current tokio runtime.
    ///
    /// Returns the command handle and the event stream. The session ends
    /// when every handle has been dropped. Fails if the config does not
    /// validate.
    pub fn spawn(
        config: DraftConfig,
    ) -> Result<(DraftHandle, mpsc::UnboundedReceiver<DraftEvent>), TimerError> {
        let (timer_tx, timer_events) = mpsc::unbounded_channel();
        let (event_tx, events) = mpsc::unbounded_channel();
        let (command_tx, commands) = mpsc::channel(COMMAND_BUFFER);

        let timer = PickTimer::new(&config, timer_tx)?;
        let session = Self {
            engine: DraftEngine::new(config, timer, event_tx),
            commands,
            timer_events,
        };
        tokio::spawn(session.run());

        Ok((
            DraftHandle {
                commands: command_tx,
            },
            events,
        ))
    }

    async fn run(mut self) {
        info!("draft session started");

        loop {
            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(command) => self.handle(command),
                    None => break,
                },
                Some(event) = self.timer_events.recv() => {
                    self.engine.handle_timer(event);
                }
            }
        }

        self.engine.stop_timer();
        info!(phase = %self.engine.phase(), "draft session closed");
    }

    fn handle(&mut self, command: DraftCommand) {
        use DraftCommand::*;

        let engine = &mut self.engine;
        // A dropped reply receiver just means the caller stopped waiting.
        let delivered = match command {
            Configure {
                participants,
                teams,
                reply,
            } => reply.send(engine.configure(participants, teams)).is_ok(),
            LoadItems { items, reply } => reply.send(engine.load_items(items)).is_ok(),
            AssignTeam {
                participant,
                team,
                reply,
            } => reply.send(engine.assign_team(&participant, &team)).is_ok(),
            Pick { item, reply } => reply.send(engine.pick(&item)).is_ok(),
            Pass { reply } => reply.send(engine.pass()).is_ok(),
            StopTimer { reply } => {
                engine.stop_timer();
                reply.send(()).is_ok()
            }
            Snapshot { reply } => reply.send(engine.snapshot()).is_ok(),
            FinalRosters { reply } => reply.send(engine.final_rosters()).is_ok(),
        };

        if !delivered {
            debug!("caller went away before the reply was sent");
        }
    }
}
