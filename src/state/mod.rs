//! Draft state management.
//!
//! - `phase` - linear phase machine (setup, team selection, picking, complete)
//! - `participant` - coaches and their rosters
//! - `pool` - selectable items and grouped removal
//! - `sequencer` - snake turn order
//! - `timer` - per-turn countdown and clocks
//! - `event` - events produced for the presentation side
//! - `engine` - the draft state machine
//! - `session` - tokio actor that owns an engine
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                           DraftEngine                             │
//! │                                                                   │
//! │  ┌───────────────┐  ┌───────────────┐  ┌───────────────────────┐ │
//! │  │ participants  │  │   ItemPool    │  │     TurnSequencer     │ │
//! │  │ (pick order)  │  │ name → item   │  │ index/direction/round │ │
//! │  │  → roster     │  │ group → items │  │ + pending skip        │ │
//! │  └───────────────┘  └───────────────┘  └───────────────────────┘ │
//! │                                                                   │
//! │  ┌─────────────────────────┐   ┌───────────────────────────────┐ │
//! │  │ TurnClock (reset/stop)  │   │ EventSink (StateChanged, ...) │ │
//! │  └─────────────────────────┘   └───────────────────────────────┘ │
//! │                                                                   │
//! │   Setup ──▶ TeamSelection ──▶ Picking ──▶ Complete                │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust
//! use snake_draft::state::{DraftEngine, SelectableItem, TurnOutcome};
//! use snake_draft::DraftConfig;
//!
//! let mut draft = DraftEngine::manual(DraftConfig::new().with_fixed_order());
//! draft.configure(["Ann", "Ben"], ["Owls", "Bats"]).unwrap();
//! draft.load_items(vec![SelectableItem::new("P1"), SelectableItem::new("P2")]).unwrap();
//! draft.assign_team("Ann", "Bats").unwrap();
//! draft.assign_team("Ben", "Owls").unwrap();
//!
//! draft.pick("P1").unwrap();
//! assert_eq!(draft.pick("P2").unwrap(), TurnOutcome::Complete);
//! ```

pub mod engine;
pub mod event;
pub mod participant;
pub mod phase;
pub mod pool;
pub mod sequencer;
pub mod session;
pub mod timer;

// Re-export commonly used types
pub use engine::{DraftEngine, DraftError, PickRecord, TurnOutcome};
pub use event::{DraftEvent, DraftSnapshot, EventSink};
pub use participant::{FinalRoster, Participant};
pub use phase::{DraftPhase, InvalidTransition, PhaseEvent};
pub use pool::{ItemPool, SelectableItem};
pub use sequencer::{Direction, TurnSequencer, TurnState};
pub use session::{DraftCommand, DraftHandle, DraftSession, SessionError, COMMAND_BUFFER};
pub use timer::{Countdown, ManualClock, PickTimer, TimerError, TimerEvent, TurnClock};
