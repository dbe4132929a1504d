//! Events produced by a draft.

use tokio::sync::mpsc;
use tracing::warn;

use super::participant::{FinalRoster, Participant};
use super::phase::DraftPhase;
use super::pool::SelectableItem;
use super::sequencer::TurnState;

/// Point-in-time view of a draft, for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftSnapshot {
    pub phase: DraftPhase,
    /// Participants in pick order
    pub participants: Vec<Participant>,
    /// Whoever acts next (team choice or pick)
    pub current_participant: Option<String>,
    pub turn: TurnState,
    pub skip_pending: bool,
    pub available_teams: Vec<String>,
    pub pool: Vec<SelectableItem>,
    pub remaining_seconds: u32,
    pub turn_generation: u64,
}

impl DraftSnapshot {
    pub fn to_json(&self) -> serde_json::Value {
        let participants: Vec<serde_json::Value> =
            self.participants.iter().map(|p| p.to_json()).collect();
        let pool: Vec<serde_json::Value> = self.pool.iter().map(|i| i.to_json()).collect();

        serde_json::json!({
            "phase": self.phase.as_str(),
            "participants": participants,
            "current_participant": self.current_participant,
            "round": self.turn.round,
            "direction": self.turn.direction.as_str(),
            "skip_pending": self.skip_pending,
            "available_teams": self.available_teams,
            "pool": pool,
            "remaining_seconds": self.remaining_seconds,
            "turn_generation": self.turn_generation
        })
    }
}

/// Something the presentation side may want to react to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftEvent {
    StateChanged(DraftSnapshot),
    TimerWarning { generation: u64, remaining: u32 },
    TimerTimeout { generation: u64 },
    DraftComplete(Vec<FinalRoster>),
}

impl DraftEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StateChanged(_) => "state_changed",
            Self::TimerWarning { .. } => "timer_warning",
            Self::TimerTimeout { .. } => "timer_timeout",
            Self::DraftComplete(_) => "draft_complete",
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::StateChanged(snapshot) => serde_json::json!({
                "type": self.as_str(),
                "state": snapshot.to_json()
            }),
            Self::TimerWarning {
                generation,
                remaining,
            } => serde_json::json!({
                "type": self.as_str(),
                "generation": generation,
                "remaining_seconds": remaining
            }),
            Self::TimerTimeout { generation } => serde_json::json!({
                "type": self.as_str(),
                "generation": generation
            }),
            Self::DraftComplete(rosters) => {
                let rosters: Vec<serde_json::Value> =
                    rosters.iter().map(|r| r.to_json()).collect();
                serde_json::json!({
                    "type": self.as_str(),
                    "rosters": rosters
                })
            }
        }
    }
}

/// Destination for draft events.
pub trait EventSink {
    fn emit(&mut self, event: DraftEvent);
}

/// Records events in order.
impl EventSink for Vec<DraftEvent> {
    fn emit(&mut self, event: DraftEvent) {
        self.push(event);
    }
}

impl EventSink for mpsc::UnboundedSender<DraftEvent> {
    fn emit(&mut self, event: DraftEvent) {
        if let Err(err) = self.send(event) {
            warn!(event = err.0.as_str(), "draft event receiver dropped");
        }
    }
}
