//! Snake Draft Library
//!
//! This crate provides turn-order state management for fantasy-style drafts:
//! coaches choose teams, then pick players from a shared pool in snake order
//! against a pick clock.
//!
//! # Overview
//!
//! - **Draft Engine** - Phase machine (setup, team selection, picking,
//!   complete) with validated commands and recoverable errors.
//!
//! - **Turn Sequencer** - Snake rotation with the boundary participant
//!   picking twice before the order reverses, plus forced skips.
//!
//! - **Pick Timer** - Per-turn countdown with a warning and an advisory
//!   timeout, tagged by turn so stale ticks are dropped.
//!
//! - **Grouped Items** - "Brother" groups are drafted as one atomic pick and
//!   cost the picker their next turn.
//!
//! - **Session Actor** - A tokio task that owns one engine and serializes
//!   commands from any number of handles.
//!
//! - **Name Lists** - Parsing of pasted lists and plain-text availability
//!   export.
//!
//! # Design Principles
//!
//! 1. **Rejections never mutate** - A failed command leaves the draft as it
//!    was.
//!
//! 2. **No rendering** - Presentation lives elsewhere and consumes events.
//!
//! 3. **Injected clock and randomness** - Tests drive the clock by hand and
//!    seed the shuffle.
//!
//! # Example
//!
//! ```rust
//! use snake_draft::names::parse_items;
//! use snake_draft::state::{DraftEngine, DraftPhase, TurnOutcome};
//! use snake_draft::DraftConfig;
//!
//! let mut draft = DraftEngine::manual(DraftConfig::new().with_fixed_order());
//! draft.configure(["A", "B"], ["T1", "T2"]).unwrap();
//! draft.load_items(parse_items("P1\nP2|g1\nP3|g1\nP4")).unwrap();
//! draft.assign_team("A", "T1").unwrap();
//! draft.assign_team("B", "T2").unwrap();
//! assert_eq!(draft.phase(), DraftPhase::Picking);
//!
//! draft.pick("P1").unwrap();
//! draft.pick("P2").unwrap(); // takes P3 too, and B loses the next turn
//! assert_eq!(draft.current_participant().unwrap().name, "A");
//! assert_eq!(draft.pick("P4").unwrap(), TurnOutcome::Complete);
//! ```

pub mod availability;
pub mod config;
pub mod names;
pub mod state;

pub use config::{ConfigError, DraftConfig};
// Re-export everything from state module at crate root
pub use state::*;
