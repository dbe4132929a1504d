//! Pick timer.
//!
//! Each turn gets a fresh countdown. The countdown fires a warning once when
//! the remaining time reaches the configured threshold, and a timeout once
//! when it reaches zero, then halts. Timeouts are advisory: nothing here
//! changes draft state.
//!
//! Every countdown is tagged with the draft's turn generation so that a tick
//! from a superseded turn can be recognised and ignored downstream.
//!
//! Two clocks implement [`TurnClock`]:
//!
//! - [`ManualClock`] - ticks only when the caller says so (tests, hosts with
//!   their own frame loop).
//! - [`PickTimer`] - a tokio task ticking on wall-clock time.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};

use crate::config::DraftConfig;

/// Events fired by a countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// Remaining time reached the warning threshold
    Warning { generation: u64, remaining: u32 },
    /// Remaining time reached zero
    Timeout { generation: u64 },
}

impl TimerEvent {
    /// Turn generation the countdown was started for.
    pub fn generation(&self) -> u64 {
        match self {
            Self::Warning { generation, .. } | Self::Timeout { generation } => *generation,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

/// Countdown for a single turn, decremented one second per tick.
#[derive(Debug, Clone)]
pub struct Countdown {
    duration: u32,
    warning_at: u32,
    remaining: u32,
    generation: u64,
    /// Bumped on every restart/stop; lets a ticking task notice it is stale
    epoch: u64,
    running: bool,
    warned: bool,
}

impl Countdown {
    /// A stopped countdown. `warning_at == 0` disables the warning.
    pub fn new(duration: u32, warning_at: u32) -> Self {
        Self {
            duration,
            warning_at,
            remaining: duration,
            generation: 0,
            epoch: 0,
            running: false,
            warned: false,
        }
    }

    pub fn from_config(config: &DraftConfig) -> Self {
        Self::new(config.pick_seconds, config.warning_at_seconds)
    }

    /// Start over from the full duration for a new turn.
    pub fn restart(&mut self, generation: u64) -> u64 {
        self.remaining = self.duration;
        self.generation = generation;
        self.running = true;
        self.warned = false;
        self.epoch += 1;
        self.epoch
    }

    /// Halt without firing a timeout.
    pub fn stop(&mut self) {
        self.running = false;
        self.epoch += 1;
    }

    /// Advance by one second.
    pub fn tick(&mut self) -> Option<TimerEvent> {
        if !self.running {
            return None;
        }

        self.remaining = self.remaining.saturating_sub(1);

        if self.remaining == 0 {
            self.running = false;
            return Some(TimerEvent::Timeout {
                generation: self.generation,
            });
        }

        if !self.warned && self.warning_at > 0 && self.remaining == self.warning_at {
            self.warned = true;
            return Some(TimerEvent::Warning {
                generation: self.generation,
                remaining: self.remaining,
            });
        }

        None
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

/// A per-turn clock the draft engine resets and stops.
pub trait TurnClock {
    /// Cancel any running countdown and start a fresh one for `generation`.
    fn reset(&mut self, generation: u64);

    /// Cancel without firing a timeout.
    fn stop(&mut self);

    /// Seconds left on the current countdown.
    fn remaining(&self) -> u32;

    fn is_running(&self) -> bool;
}

/// Clock that only ticks when told to.
#[derive(Debug, Clone)]
pub struct ManualClock {
    countdown: Countdown,
}

impl ManualClock {
    pub fn new(duration: u32, warning_at: u32) -> Self {
        Self {
            countdown: Countdown::new(duration, warning_at),
        }
    }

    pub fn from_config(config: &DraftConfig) -> Self {
        Self {
            countdown: Countdown::from_config(config),
        }
    }

    /// Advance by one second.
    pub fn tick(&mut self) -> Option<TimerEvent> {
        self.countdown.tick()
    }

    /// Advance by several seconds, collecting fired events.
    pub fn advance(&mut self, seconds: u32) -> Vec<TimerEvent> {
        (0..seconds).filter_map(|_| self.tick()).collect()
    }

    pub fn generation(&self) -> u64 {
        self.countdown.generation()
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::from_config(&DraftConfig::default())
    }
}

impl TurnClock for ManualClock {
    fn reset(&mut self, generation: u64) {
        self.countdown.restart(generation);
    }

    fn stop(&mut self) {
        self.countdown.stop();
    }

    fn remaining(&self) -> u32 {
        self.countdown.remaining()
    }

    fn is_running(&self) -> bool {
        self.countdown.is_running()
    }
}

/// Timer errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimerError {
    #[error("pick timer must be created inside a tokio runtime")]
    NoRuntime,

    #[error("pick timer config rejected: {0}")]
    InvalidConfig(String),
}

/// Wall-clock pick timer driven by a tokio task.
///
/// Events are delivered on the channel given at construction. `reset` and
/// `stop` abort the previous task and invalidate its countdown under the
/// same lock the task sends from, so once either returns no event from the
/// old countdown can be delivered.
#[derive(Debug)]
pub struct PickTimer {
    countdown: Arc<Mutex<Countdown>>,
    period: Duration,
    events: mpsc::UnboundedSender<TimerEvent>,
    runtime: tokio::runtime::Handle,
    task: Option<JoinHandle<()>>,
}

impl PickTimer {
    /// Create a stopped timer. Must be called from within a tokio runtime.
    pub fn new(
        config: &DraftConfig,
        events: mpsc::UnboundedSender<TimerEvent>,
    ) -> Result<Self, TimerError> {
        config
            .validate()
            .map_err(|err| TimerError::InvalidConfig(err.to_string()))?;
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| TimerError::NoRuntime)?;
        let period = config.tick_period();

        Ok(Self {
            countdown: Arc::new(Mutex::new(Countdown::from_config(config))),
            period,
            events,
            runtime,
            task: None,
        })
    }

    /// Start a countdown for `generation`. Same as [`TurnClock::reset`].
    pub fn start(&mut self, generation: u64) {
        self.reset(generation);
    }

    fn cancel_task(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    fn spawn(&mut self, epoch: u64) {
        let countdown = Arc::clone(&self.countdown);
        let events = self.events.clone();
        let period = self.period;

        let task = self.runtime.spawn(async move {
            let mut interval =
                tokio::time::interval_at(tokio::time::Instant::now() + period, period);

            loop {
                interval.tick().await;

                let done = {
                    let mut countdown = countdown.lock();
                    if countdown.epoch() != epoch || !countdown.is_running() {
                        true
                    } else {
                        let event = countdown.tick();
                        trace!(
                            generation = countdown.generation(),
                            remaining = countdown.remaining(),
                            "pick timer tick"
                        );
                        match event {
                            Some(event) => {
                                if events.send(event).is_err() {
                                    warn!(
                                        generation = event.generation(),
                                        "timer event receiver dropped, stopping countdown"
                                    );
                                    countdown.stop();
                                    true
                                } else {
                                    event.is_timeout()
                                }
                            }
                            None => false,
                        }
                    }
                };

                if done {
                    break;
                }
            }
        });

        self.task = Some(task);
    }
}

impl TurnClock for PickTimer {
    fn reset(&mut self, generation: u64) {
        self.cancel_task();
        let epoch = self.countdown.lock().restart(generation);
        debug!(generation, "pick timer started");
        self.spawn(epoch);
    }

    fn stop(&mut self) {
        self.cancel_task();
        self.countdown.lock().stop();
        debug!("pick timer stopped");
    }

    fn remaining(&self) -> u32 {
        self.countdown.lock().remaining()
    }

    fn is_running(&self) -> bool {
        self.countdown.lock().is_running()
    }
}

impl Drop for PickTimer {
    fn drop(&mut self) {
        self.cancel_task();
    }
}
