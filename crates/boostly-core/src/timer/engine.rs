//! Timer engine implementation.
//!
//! The timer engine is a tick-driven state machine. It does not use
//! internal threads - the caller is responsible for calling `tick()` once
//! per second.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> (Paused -> Running)* -> [expired] -> Idle
//! ```
//!
//! Expiry is not a resting state: the tick that reaches zero emits
//! `TimerExpired`, reloads the selected mode's duration and lands in `Idle`.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new(TimerMode::Pomodoro);
//! engine.start();
//! // Once per second:
//! let events = engine.tick(); // Contains TimerExpired at zero
//! ```

use serde::{Deserialize, Serialize};

use super::mode::TimerMode;
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    Paused,
}

/// Countdown state machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerEngine {
    /// Selected mode. Only read when a fresh countdown begins.
    mode: TimerMode,
    state: TimerState,
    remaining_secs: u64,
    /// Duration of the current run, for progress.
    total_secs: u64,
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new(TimerMode::default())
    }
}

impl TimerEngine {
    /// Create an idle timer loaded with the mode's full duration.
    pub fn new(mode: TimerMode) -> Self {
        let total_secs = mode.duration_secs();
        Self {
            mode,
            state: TimerState::Idle,
            remaining_secs: total_secs,
            total_secs,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn total_secs(&self) -> u64 {
        self.total_secs
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    /// 0.0 .. 1.0 progress through the current run.
    pub fn progress(&self) -> f64 {
        if self.total_secs == 0 {
            return 0.0;
        }
        let elapsed = self.total_secs.saturating_sub(self.remaining_secs);
        (elapsed as f64 / self.total_secs as f64).clamp(0.0, 1.0)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Select the mode for the next fresh run.
    ///
    /// An idle timer shows the new duration right away; a countdown in
    /// progress keeps its remaining time.
    pub fn set_mode(&mut self, mode: TimerMode) -> Event {
        self.mode = mode;
        if self.state == TimerState::Idle {
            self.reload();
        }
        Event::TimerModeChanged {
            mode,
            duration_secs: mode.duration_secs(),
        }
    }

    pub fn start(&mut self) -> Option<Event> {
        match self.state {
            TimerState::Running => None, // Already running.
            TimerState::Idle => {
                self.reload();
                self.state = TimerState::Running;
                Some(Event::TimerStarted {
                    duration_secs: self.total_secs,
                })
            }
            TimerState::Paused => {
                self.state = TimerState::Running;
                Some(Event::TimerResumed {
                    remaining_secs: self.remaining_secs,
                })
            }
        }
    }

    pub fn pause(&mut self) -> Option<Event> {
        match self.state {
            TimerState::Running => {
                self.state = TimerState::Paused;
                Some(Event::TimerPaused {
                    remaining_secs: self.remaining_secs,
                })
            }
            _ => None,
        }
    }

    pub fn reset(&mut self) -> Event {
        self.state = TimerState::Idle;
        self.reload();
        Event::TimerReset {
            remaining_secs: self.remaining_secs,
        }
    }

    /// Call once per second. Does nothing unless running.
    pub fn tick(&mut self) -> Vec<Event> {
        if self.state != TimerState::Running {
            return Vec::new();
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        let mut events = vec![Event::TimerTick {
            remaining_secs: self.remaining_secs,
            progress: self.progress(),
        }];
        if self.remaining_secs == 0 {
            events.push(Event::TimerExpired);
            self.state = TimerState::Idle;
            self.reload();
        }
        events
    }

    /// Apply up to `secs` ticks, stopping early if the run expires.
    pub fn advance(&mut self, secs: u64) -> Vec<Event> {
        let mut events = Vec::new();
        for _ in 0..secs {
            if self.state != TimerState::Running {
                break;
            }
            events.extend(self.tick());
        }
        events
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn reload(&mut self) {
        self.total_secs = self.mode.duration_secs();
        self.remaining_secs = self.total_secs;
    }
}
