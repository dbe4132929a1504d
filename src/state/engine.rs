//! Draft engine.
//!
//! Owns everything about one draft: participants in pick order, teams,
//! the item pool, the snake turn state and the per-turn clock. All
//! mutations go through `&mut self`, so a single owner serializes them.
//!
//! Commands that fail leave the draft exactly as it was.

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::config::DraftConfig;

use super::event::{DraftEvent, DraftSnapshot, EventSink};
use super::participant::{FinalRoster, Participant};
use super::phase::{DraftPhase, PhaseEvent};
use super::pool::{ItemPool, SelectableItem};
use super::sequencer::{TurnSequencer, TurnState};
use super::timer::{ManualClock, TimerEvent, TurnClock};

/// Draft errors. All are recoverable; fix the input and retry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DraftError {
    #[error("invalid draft setup: {0}")]
    Configuration(String),

    #[error("team {team} is already assigned to {owner}")]
    AlreadyAssigned { team: String, owner: String },

    #[error("{0} is not available")]
    NotAvailable(String),

    #[error("unknown team: {0}")]
    UnknownTeam(String),

    #[error("it is {expected}'s turn, not {actual}'s")]
    OutOfTurn { expected: String, actual: String },

    #[error("cannot {operation} while the draft is in {phase}")]
    WrongPhase {
        operation: &'static str,
        phase: DraftPhase,
    },
}

/// What happens after a pick or pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Another participant is up
    Next { participant: String, round: u32 },
    /// The pool is empty
    Complete,
}

/// One entry in the pick log. Passes have no items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickRecord {
    /// 1-indexed pick number
    pub number: usize,
    pub round: u32,
    pub participant: String,
    pub items: Vec<String>,
    pub picked_at: DateTime<Utc>,
}

impl PickRecord {
    pub fn is_pass(&self) -> bool {
        self.items.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "number": self.number,
            "round": self.round,
            "participant": self.participant,
            "items": self.items,
            "picked_at": self.picked_at.to_rfc3339()
        })
    }
}

/// Draft state machine.
#[derive(Debug)]
pub struct DraftEngine<C, S> {
    config: DraftConfig,

    phase: DraftPhase,

    /// Participants in pick order (shuffled once at configure time)
    participants: Vec<Participant>,

    /// Team names, in the order given
    teams: Vec<String>,

    /// Index of the participant choosing a team
    team_cursor: usize,

    /// Items loaded before picking starts
    staged: Vec<SelectableItem>,

    /// Items still available while picking
    pool: ItemPool,

    turn: TurnState,

    /// Set by a grouped pick; consumed by the next advance
    skip_next: bool,

    /// Increments every time a picking turn starts
    generation: u64,

    /// False once the clock is stopped; ticks already queued are dropped
    timer_live: bool,

    history: Vec<PickRecord>,

    clock: C,

    sink: S,

    pub created_at: DateTime<Utc>,

    pub completed_at: Option<DateTime<Utc>>,
}

impl DraftEngine<ManualClock, Vec<DraftEvent>> {
    /// Engine with a hand-driven clock that records its events.
    pub fn manual(config: DraftConfig) -> Self {
        let clock = ManualClock::from_config(&config);
        Self::new(config, clock, Vec::new())
    }
}

impl<C: TurnClock, S: EventSink> DraftEngine<C, S> {
    /// Create a draft in the Setup phase.
    pub fn new(config: DraftConfig, clock: C, sink: S) -> Self {
        Self {
            config,
            phase: DraftPhase::Setup,
            participants: Vec::new(),
            teams: Vec::new(),
            team_cursor: 0,
            staged: Vec::new(),
            pool: ItemPool::default(),
            turn: TurnState::start(),
            skip_next: false,
            generation: 0,
            timer_live: false,
            history: Vec::new(),
            clock,
            sink,
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    // Commands

    /// Set participants and teams, fixing the pick order.
    ///
    /// Setup -> TeamSelection. The lists must be the same non-zero length
    /// with unique, non-blank names.
    pub fn configure<P, T>(
        &mut self,
        participants: impl IntoIterator<Item = P>,
        teams: impl IntoIterator<Item = T>,
    ) -> Result<(), DraftError>
    where
        P: Into<String>,
        T: Into<String>,
    {
        let next = self.transition(PhaseEvent::Configure, "configure")?;
        if let Err(err) = self.config.validate() {
            return Err(self.reject(DraftError::Configuration(err.to_string())));
        }

        let mut order = trimmed(participants);
        let teams = trimmed(teams);

        if order.is_empty() {
            return Err(self.reject(DraftError::Configuration(
                "at least one participant is required".to_string(),
            )));
        }
        if order.len() != teams.len() {
            return Err(self.reject(DraftError::Configuration(format!(
                "number of participants ({}) must match number of teams ({})",
                order.len(),
                teams.len()
            ))));
        }
        if let Err(err) = unique_names("participant", &order).and(unique_names("team", &teams)) {
            return Err(self.reject(err));
        }

        if self.config.randomize_order {
            let seed = self.config.shuffle_seed.unwrap_or_else(rand::random);
            order.shuffle(&mut ChaCha8Rng::seed_from_u64(seed));
            debug!(seed, "shuffled pick order");
        }

        self.participants = order.into_iter().map(Participant::new).collect();
        self.teams = teams;
        self.team_cursor = 0;
        self.phase = next;

        info!(
            participants = self.participants.len(),
            order = ?self.participant_names(),
            "draft configured"
        );
        self.publish();
        Ok(())
    }

    /// Stage the items that seed the pool when picking starts.
    ///
    /// Allowed in Setup and TeamSelection; replaces anything staged before.
    pub fn load_items(
        &mut self,
        items: impl IntoIterator<Item = SelectableItem>,
    ) -> Result<(), DraftError> {
        if !matches!(self.phase, DraftPhase::Setup | DraftPhase::TeamSelection) {
            return Err(self.wrong_phase("load items"));
        }

        let items: Vec<SelectableItem> = items.into_iter().collect();
        if let Err(reason) = ItemPool::validate(&items) {
            return Err(self.reject(DraftError::Configuration(reason)));
        }

        debug!(items = items.len(), "staged draft items");
        self.staged = items;
        Ok(())
    }

    /// Assign a team to the participant whose turn it is.
    ///
    /// The last assignment starts the picking phase.
    pub fn assign_team(&mut self, participant: &str, team: &str) -> Result<(), DraftError> {
        if self.phase != DraftPhase::TeamSelection {
            return Err(self.wrong_phase("assign a team"));
        }

        let expected = &self.participants[self.team_cursor].name;
        if expected != participant {
            let err = DraftError::OutOfTurn {
                expected: expected.clone(),
                actual: participant.to_string(),
            };
            return Err(self.reject(err));
        }

        if !self.teams.iter().any(|t| t == team) {
            return Err(self.reject(DraftError::UnknownTeam(team.to_string())));
        }

        if let Some(owner) = self
            .participants
            .iter()
            .find(|p| p.team.as_deref() == Some(team))
        {
            let err = DraftError::AlreadyAssigned {
                team: team.to_string(),
                owner: owner.name.clone(),
            };
            return Err(self.reject(err));
        }

        self.participants[self.team_cursor].team = Some(team.to_string());
        self.team_cursor += 1;
        debug!(participant, team, "team assigned");

        if self.team_cursor == self.participants.len() {
            self.start_picking()?;
        }

        self.publish();
        Ok(())
    }

    /// Draft an item (and its whole group) for the current participant.
    pub fn pick(&mut self, item: &str) -> Result<TurnOutcome, DraftError> {
        if !self.phase.is_picking() {
            return Err(self.wrong_phase("pick"));
        }

        let taken = match self.pool.take(item) {
            Some(taken) => taken,
            None => return Err(self.reject(DraftError::NotAvailable(item.to_string()))),
        };

        let grouped = taken.iter().any(SelectableItem::is_grouped);
        let names: Vec<String> = taken.iter().map(|i| i.name.clone()).collect();
        let participant = &mut self.participants[self.turn.index];
        participant.draft(taken);

        debug!(
            participant = %participant.name,
            items = ?names,
            grouped,
            round = self.turn.round,
            "pick made"
        );

        if grouped {
            self.skip_next = true;
        }
        self.record(names);
        self.end_turn("pick")
    }

    /// Give up the current turn without drafting anything.
    pub fn pass(&mut self) -> Result<TurnOutcome, DraftError> {
        if !self.phase.is_picking() {
            return Err(self.wrong_phase("pass"));
        }

        debug!(
            participant = %self.participants[self.turn.index].name,
            round = self.turn.round,
            "pick passed"
        );
        self.record(Vec::new());
        self.end_turn("pass")
    }

    /// Stop the pick clock without touching draft state.
    pub fn stop_timer(&mut self) {
        self.timer_live = false;
        self.clock.stop();
    }

    /// Forward a timer event if it belongs to the current turn.
    ///
    /// Returns false for ticks from a superseded turn, ticks that were
    /// queued before the clock was stopped, and anything after the draft
    /// has left the picking phase.
    pub fn handle_timer(&mut self, event: TimerEvent) -> bool {
        if !self.phase.is_picking() || !self.timer_live || event.generation() != self.generation
        {
            debug!(
                generation = event.generation(),
                current = self.generation,
                timer_live = self.timer_live,
                phase = %self.phase,
                "ignoring stale timer event"
            );
            return false;
        }

        let event = match event {
            TimerEvent::Warning {
                generation,
                remaining,
            } => DraftEvent::TimerWarning {
                generation,
                remaining,
            },
            TimerEvent::Timeout { generation } => {
                info!(
                    participant = %self.participants[self.turn.index].name,
                    generation,
                    "pick time expired"
                );
                DraftEvent::TimerTimeout { generation }
            }
        };
        self.sink.emit(event);
        true
    }

    // Transitions

    fn start_picking(&mut self) -> Result<(), DraftError> {
        if self.staged.is_empty() {
            info!("no items staged, nothing to pick");
            return self.finish("start picking");
        }

        self.phase = self.transition(PhaseEvent::TeamsAssigned, "start picking")?;
        self.pool = ItemPool::new(std::mem::take(&mut self.staged));
        self.turn = TurnState::start();
        self.skip_next = false;

        info!(items = self.pool.len(), "player draft started");
        self.begin_turn();
        Ok(())
    }

    fn end_turn(&mut self, operation: &'static str) -> Result<TurnOutcome, DraftError> {
        let outcome = if self.pool.is_empty() {
            self.finish(operation)?;
            TurnOutcome::Complete
        } else {
            let sequencer = TurnSequencer::new(self.participants.len());
            self.turn = sequencer.next(self.turn, self.skip_next);
            if self.skip_next {
                debug!(round = self.turn.round, "skipped turn after grouped pick");
            }
            self.skip_next = false;
            self.begin_turn();

            TurnOutcome::Next {
                participant: self.participants[self.turn.index].name.clone(),
                round: self.turn.round,
            }
        };

        self.publish();
        Ok(outcome)
    }

    fn begin_turn(&mut self) {
        self.generation += 1;
        self.timer_live = true;
        self.clock.reset(self.generation);
        debug!(
            participant = %self.participants[self.turn.index].name,
            round = self.turn.round,
            direction = %self.turn.direction,
            generation = self.generation,
            "turn started"
        );
    }

    fn finish(&mut self, operation: &'static str) -> Result<(), DraftError> {
        self.phase = self.transition(PhaseEvent::PoolExhausted, operation)?;
        self.skip_next = false;
        self.timer_live = false;
        self.clock.stop();
        self.completed_at = Some(Utc::now());
        info!(picks = self.history.len(), "draft complete");
        Ok(())
    }

    fn transition(
        &self,
        event: PhaseEvent,
        operation: &'static str,
    ) -> Result<DraftPhase, DraftError> {
        self.phase
            .apply(event)
            .map_err(|_| self.wrong_phase(operation))
    }

    fn record(&mut self, items: Vec<String>) {
        self.history.push(PickRecord {
            number: self.history.len() + 1,
            round: self.turn.round,
            participant: self.participants[self.turn.index].name.clone(),
            items,
            picked_at: Utc::now(),
        });
    }

    /// Emit the new state, plus the final rosters once the draft is over.
    fn publish(&mut self) {
        let snapshot = self.snapshot();
        self.sink.emit(DraftEvent::StateChanged(snapshot));

        if let Some(rosters) = self.final_rosters() {
            self.sink.emit(DraftEvent::DraftComplete(rosters));
        }
    }

    fn wrong_phase(&self, operation: &'static str) -> DraftError {
        self.reject(DraftError::WrongPhase {
            operation,
            phase: self.phase,
        })
    }

    fn reject(&self, err: DraftError) -> DraftError {
        debug!(phase = %self.phase, error = %err, "draft command rejected");
        err
    }

    // Reads

    pub fn config(&self) -> &DraftConfig {
        &self.config
    }

    pub fn phase(&self) -> DraftPhase {
        self.phase
    }

    /// Participants in pick order.
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn participant_names(&self) -> Vec<&str> {
        self.participants.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn participant(&self, name: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.name == name)
    }

    /// Whoever acts next: the team chooser or the picker.
    pub fn current_participant(&self) -> Option<&Participant> {
        match self.phase {
            DraftPhase::TeamSelection => self.participants.get(self.team_cursor),
            DraftPhase::Picking => self.participants.get(self.turn.index),
            DraftPhase::Setup | DraftPhase::Complete => None,
        }
    }

    pub fn turn(&self) -> TurnState {
        self.turn
    }

    pub fn skip_pending(&self) -> bool {
        self.skip_next
    }

    pub fn turn_generation(&self) -> u64 {
        self.generation
    }

    pub fn teams(&self) -> &[String] {
        &self.teams
    }

    /// Teams nobody has chosen yet, in the order given.
    pub fn available_teams(&self) -> Vec<&str> {
        self.teams
            .iter()
            .filter(|t| !self.participants.iter().any(|p| p.team.as_ref() == Some(*t)))
            .map(String::as_str)
            .collect()
    }

    pub fn staged_items(&self) -> &[SelectableItem] {
        &self.staged
    }

    pub fn pool(&self) -> &ItemPool {
        &self.pool
    }

    pub fn history(&self) -> &[PickRecord] {
        &self.history
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.clock.remaining()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Names of the next `count` pickers, current one first.
    ///
    /// Assumes nobody drafts a group in the meantime.
    pub fn upcoming(&self, count: usize) -> Vec<&str> {
        if !self.phase.is_picking() {
            return Vec::new();
        }
        TurnSequencer::new(self.participants.len())
            .order(self.turn, count)
            .map(|s| self.participants[s.index].name.as_str())
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Final rosters in pick order, once the draft is complete.
    pub fn final_rosters(&self) -> Option<Vec<FinalRoster>> {
        if !self.phase.is_terminal() {
            return None;
        }

        Some(
            self.participants
                .iter()
                .map(|p| FinalRoster {
                    participant: p.name.clone(),
                    team: p.team.clone().unwrap_or_default(),
                    items: p.roster_names(),
                })
                .collect(),
        )
    }

    pub fn snapshot(&self) -> DraftSnapshot {
        DraftSnapshot {
            phase: self.phase,
            participants: self.participants.clone(),
            current_participant: self.current_participant().map(|p| p.name.clone()),
            turn: self.turn,
            skip_pending: self.skip_next,
            available_teams: self.available_teams().into_iter().map(String::from).collect(),
            pool: self.pool.items().to_vec(),
            remaining_seconds: self.clock.remaining(),
            turn_generation: self.generation,
        }
    }

    /// Full state including the pick log.
    pub fn to_json(&self) -> serde_json::Value {
        let mut obj = self.snapshot().to_json();
        obj["history"] = serde_json::Value::Array(
            self.history.iter().map(|r| r.to_json()).collect(),
        );
        obj["created_at"] = serde_json::json!(self.created_at.to_rfc3339());
        if let Some(completed_at) = self.completed_at {
            obj["completed_at"] = serde_json::json!(completed_at.to_rfc3339());
        }
        obj
    }
}

fn trimmed<N: Into<String>>(names: impl IntoIterator<Item = N>) -> Vec<String> {
    names
        .into_iter()
        .map(|n| n.into().trim().to_string())
        .collect()
}

fn unique_names(kind: &str, names: &[String]) -> Result<(), DraftError> {
    let mut seen = std::collections::HashSet::new();
    for name in names {
        if name.is_empty() {
            return Err(DraftError::Configuration(format!("{kind} names must not be blank")));
        }
        if !seen.insert(name.as_str()) {
            return Err(DraftError::Configuration(format!("duplicate {kind}: {name}")));
        }
    }
    Ok(())
}
