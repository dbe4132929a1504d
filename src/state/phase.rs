//! Draft phase state machine.
//!
//! Phases move strictly forward; there are no transitions back.
//!
//! # State Diagram
//!
//! ```text
//! ┌─────────┐  configure   ┌───────────────┐  teams assigned  ┌─────────┐
//! │  Setup  │─────────────▶│ TeamSelection │─────────────────▶│ Picking │
//! └─────────┘              └───────┬───────┘                  └────┬────┘
//!                                  │ teams assigned,               │ pool
//!                                  │ empty pool                    │ exhausted
//!                                  ▼                               ▼
//!                            ┌──────────────────────────────────────────┐
//!                            │                 Complete                 │
//!                            └──────────────────────────────────────────┘
//! ```

use std::fmt;

/// Phase of a draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DraftPhase {
    /// Waiting for participants and teams
    #[default]
    Setup,
    /// Participants choose teams in pick order
    TeamSelection,
    /// Participants pick items in snake order
    Picking,
    /// Pool exhausted; rosters are final
    Complete,
}

impl DraftPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Setup => "setup",
            Self::TeamSelection => "team_selection",
            Self::Picking => "picking",
            Self::Complete => "complete",
        }
    }

    /// Check if picks and passes are accepted.
    pub fn is_picking(&self) -> bool {
        matches!(self, Self::Picking)
    }

    /// Check if the draft is over.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete)
    }

    /// Apply an event, returning the next phase or an error.
    pub fn apply(&self, event: PhaseEvent) -> Result<Self, InvalidTransition> {
        use DraftPhase::*;
        use PhaseEvent::*;

        let invalid = |reason: &'static str| InvalidTransition {
            from: *self,
            event,
            reason,
        };

        match (self, event) {
            (Setup, Configure) => Ok(TeamSelection),
            (_, Configure) => Err(invalid("Draft already configured")),

            (TeamSelection, TeamsAssigned) => Ok(Picking),
            (_, TeamsAssigned) => Err(invalid("Not selecting teams")),

            (Picking, PoolExhausted) | (TeamSelection, PoolExhausted) => Ok(Complete),
            (_, PoolExhausted) => Err(invalid("Pool was never seeded")),
        }
    }
}

impl fmt::Display for DraftPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Phase transition events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseEvent {
    Configure,
    TeamsAssigned,
    PoolExhausted,
}

/// Error when a phase transition is invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid transition from {from} via {event:?}: {reason}")]
pub struct InvalidTransition {
    pub from: DraftPhase,
    pub event: PhaseEvent,
    pub reason: &'static str,
}
