//! The orchestrator.
//!
//! A [`Tracker`] owns one [`AppState`] and one [`TimerEngine`], plus the
//! gateway it persists through and the clock it reads the weekday from.
//! Each public operation runs the task store or timer transition, lets the
//! reward engine react, writes the snapshot through the gateway, and hands
//! back the events for the presentation layer.
//!
//! A failed write is not an error for the caller: the in-memory state stays
//! authoritative and a [`Event::PersistenceFailed`] is appended instead.
//!
//! Other processes may write through the same store while a tracker is
//! alive (a long-running timer in one terminal, task edits in another), so
//! the saved state is re-read before a timer reward is committed.

use crate::clock::Clock;
use crate::error::{PersistenceError, Result};
use crate::events::Event;
use crate::reward;
use crate::state::AppState;
use crate::storage::PersistenceGateway;
use crate::task::{Priority, Task};
use crate::timer::{TimerEngine, TimerMode};

/// Result of a tracker operation: its return value plus emitted events.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<T = ()> {
    pub value: T,
    pub events: Vec<Event>,
}

impl<T> Outcome<T> {
    fn new(value: T, events: Vec<Event>) -> Self {
        Self { value, events }
    }

    /// Whether the snapshot write for this operation failed.
    pub fn persistence_failed(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, Event::PersistenceFailed { .. }))
    }
}

pub struct Tracker<G, C> {
    state: AppState,
    timer: TimerEngine,
    gateway: G,
    clock: C,
    /// The last commit failed; the in-memory state is ahead of the store.
    unsaved: bool,
}

impl<G: PersistenceGateway, C: Clock> Tracker<G, C> {
    /// Load the saved state, or start from the zero-state.
    ///
    /// An unreadable snapshot is logged and replaced by the zero-state; it
    /// is only overwritten on the next mutation.
    pub fn open(gateway: G, clock: C) -> Self {
        let state = match gateway.load() {
            Ok(Some(mut state)) => {
                state.normalize();
                state
            }
            Ok(None) => AppState::default(),
            Err(e) => {
                tracing::warn!(error = %e, "could not load saved state, starting fresh");
                AppState::default()
            }
        };
        Self {
            state,
            timer: TimerEngine::default(),
            gateway,
            clock,
            unsaved: false,
        }
    }

    /// Replace the timer, e.g. with one restored by the caller.
    pub fn with_timer(mut self, timer: TimerEngine) -> Self {
        self.timer = timer;
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn timer(&self) -> &TimerEngine {
        &self.timer
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn gateway_mut(&mut self) -> &mut G {
        &mut self.gateway
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Replace the in-memory state with the saved one.
    ///
    /// Does nothing when the store is empty or while this tracker holds
    /// changes that failed to save.
    pub fn reload(&mut self) -> Result<(), PersistenceError> {
        if self.unsaved {
            return Ok(());
        }
        if let Some(mut state) = self.gateway.load()? {
            state.normalize();
            self.state = state;
        }
        Ok(())
    }

    // ── Tasks ────────────────────────────────────────────────────────

    /// Add a task to the top of the list and return its id.
    pub fn add_task(&mut self, text: &str, priority: Priority) -> Result<Outcome<u64>> {
        let task = self.state.tasks.add(text, priority, self.clock.now_ms())?;
        let id = task.id;
        tracing::debug!(id, "task added");
        let events = vec![Event::TaskAdded {
            id,
            text: task.text.clone(),
            priority,
        }];
        Ok(self.commit(id, events))
    }

    /// Flip a task's completion and apply the reward. Returns the new flag.
    pub fn toggle_done(&mut self, index: usize) -> Result<Outcome<bool>> {
        let task = self.state.tasks.toggle(index)?;
        let (id, done, priority) = (task.id, task.done, task.priority);
        tracing::debug!(id, done, "task toggled");

        let mut events = vec![Event::TaskToggled {
            index,
            id,
            done,
            priority,
        }];
        if done {
            let weekday = self.clock.weekday_index();
            events.extend(reward::on_task_completed(&mut self.state, weekday));
        } else {
            events.extend(reward::on_task_uncompleted(&mut self.state));
        }
        Ok(self.commit(done, events))
    }

    /// Replace a task's text. Blank text is ignored and reports `false`.
    pub fn edit_text(&mut self, index: usize, text: &str) -> Result<Outcome<bool>> {
        if !self.state.tasks.edit_text(index, text)? {
            return Ok(Outcome::new(false, Vec::new()));
        }
        let id = self.task_id(index);
        Ok(self.commit(true, vec![Event::TaskEdited { index, id }]))
    }

    pub fn set_priority(&mut self, index: usize, priority: Priority) -> Result<Outcome<bool>> {
        if !self.state.tasks.set_priority(index, priority)? {
            return Ok(Outcome::new(false, Vec::new()));
        }
        let id = self.task_id(index);
        Ok(self.commit(true, vec![Event::TaskEdited { index, id }]))
    }

    /// Remove a task. Points and productivity already earned are kept.
    pub fn delete_task(&mut self, index: usize) -> Result<Outcome<Task>> {
        let task = self.state.tasks.remove(index)?;
        tracing::debug!(id = task.id, "task deleted");
        let events = vec![Event::TaskDeleted { index, id: task.id }];
        Ok(self.commit(task, events))
    }

    /// Move a task from one position to another. Returns `false` for the
    /// same-index no-op.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<Outcome<bool>> {
        if !self.state.tasks.reorder(from, to)? {
            return Ok(Outcome::new(false, Vec::new()));
        }
        Ok(self.commit(true, vec![Event::TasksReordered { from, to }]))
    }

    // ── Rewards ──────────────────────────────────────────────────────

    pub fn award_points(&mut self, n: u32) -> Outcome {
        let events = reward::award_points(&mut self.state, n);
        self.commit((), events)
    }

    // ── Timer ────────────────────────────────────────────────────────

    pub fn set_timer_mode(&mut self, mode: TimerMode) -> Outcome {
        Outcome::new((), vec![self.timer.set_mode(mode)])
    }

    pub fn start_timer(&mut self) -> Outcome {
        Outcome::new((), self.timer.start().into_iter().collect())
    }

    pub fn pause_timer(&mut self) -> Outcome {
        Outcome::new((), self.timer.pause().into_iter().collect())
    }

    pub fn reset_timer(&mut self) -> Outcome {
        Outcome::new((), vec![self.timer.reset()])
    }

    /// One second elapsed.
    pub fn tick(&mut self) -> Outcome {
        let events = self.timer.tick();
        self.absorb_timer_events(events)
    }

    /// `secs` seconds elapsed while nobody was ticking.
    pub fn advance_timer(&mut self, secs: u64) -> Outcome {
        let events = self.timer.advance(secs);
        self.absorb_timer_events(events)
    }

    // ── Whole-state ──────────────────────────────────────────────────

    /// Wipe everything back to the zero-state.
    pub fn reset(&mut self) -> Outcome {
        tracing::info!("state reset");
        self.state = AppState::default();
        self.commit((), vec![Event::StateReset])
    }

    /// Replace the state with an externally supplied snapshot.
    pub fn import(&mut self, mut state: AppState) -> Outcome {
        state.normalize();
        tracing::info!(tasks = state.tasks.len(), "state imported");
        self.state = state;
        self.commit((), vec![Event::StateReset])
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn absorb_timer_events(&mut self, mut events: Vec<Event>) -> Outcome {
        if !events.iter().any(|e| matches!(e, Event::TimerExpired)) {
            return Outcome::new((), events);
        }
        tracing::info!("focus session complete");
        if let Err(e) = self.reload() {
            tracing::warn!(error = %e, "could not refresh state, rewarding the cached copy");
        }
        events.extend(reward::on_timer_expired(&mut self.state));
        self.commit((), events)
    }

    fn task_id(&self, index: usize) -> u64 {
        self.state.tasks.get(index).map(|t| t.id).unwrap_or_default()
    }

    fn commit<T>(&mut self, value: T, mut events: Vec<Event>) -> Outcome<T> {
        match self.gateway.save(&self.state) {
            Ok(()) => self.unsaved = false,
            Err(e) => {
                tracing::warn!(error = %e, "failed to persist state");
                self.unsaved = true;
                events.push(Event::PersistenceFailed {
                    message: e.to_string(),
                });
            }
        }
        Outcome::new(value, events)
    }
}
