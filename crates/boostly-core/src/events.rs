use serde::{Deserialize, Serialize};

use crate::task::Priority;
use crate::timer::TimerMode;

/// Every state change in the system produces an Event.
/// The presentation layer renders them; the engine never does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    TaskAdded {
        id: u64,
        text: String,
        priority: Priority,
    },
    TaskToggled {
        index: usize,
        id: u64,
        done: bool,
        /// Lets the presentation layer pick a chime per priority.
        priority: Priority,
    },
    TaskEdited {
        index: usize,
        id: u64,
    },
    TaskDeleted {
        index: usize,
        id: u64,
    },
    TasksReordered {
        from: usize,
        to: usize,
    },
    PointsChanged {
        old: u64,
        new: u64,
    },
    LevelUp {
        level: u32,
    },
    ProductivityIncremented {
        weekday_index: usize,
        count: u32,
    },
    TimerStarted {
        duration_secs: u64,
    },
    TimerResumed {
        remaining_secs: u64,
    },
    TimerPaused {
        remaining_secs: u64,
    },
    TimerReset {
        remaining_secs: u64,
    },
    TimerModeChanged {
        mode: TimerMode,
        duration_secs: u64,
    },
    TimerTick {
        remaining_secs: u64,
        progress: f64,
    },
    /// A focus session ran down to zero.
    TimerExpired,
    /// AppState was replaced wholesale (reset or import).
    StateReset,
    /// The snapshot could not be written; in-memory state is still current.
    PersistenceFailed {
        message: String,
    },
}

impl Event {
    /// Per-second ticks are noise for anything but a live display.
    pub fn is_tick(&self) -> bool {
        matches!(self, Event::TimerTick { .. })
    }
}
