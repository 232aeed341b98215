//! # Boostly Core Library
//!
//! This library provides the state engine behind the Boostly productivity
//! tracker: a task list, a points/level reward system, a weekly
//! productivity histogram, and a countdown focus timer. The CLI binary is a
//! thin presentation layer over the same library.
//!
//! ## Architecture
//!
//! - **Task Store**: ordered task list, most recent first
//! - **Reward Engine**: points, experience and levels driven by task
//!   completion and finished focus sessions
//! - **Timer Engine**: a tick-driven state machine; the caller invokes
//!   `tick()` once per second
//! - **Storage**: a persistence gateway (SQLite key-value store or memory)
//!   and TOML-based configuration
//!
//! ## Key Components
//!
//! - [`Tracker`]: owns the state and routes every operation
//! - [`TimerEngine`]: Core timer state machine
//! - [`Database`]: Snapshot persistence
//! - [`Config`]: Application configuration management

pub mod clock;
pub mod error;
pub mod events;
pub mod reward;
pub mod state;
pub mod storage;
pub mod task;
pub mod timer;
pub mod tracker;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{ConfigError, CoreError, PersistenceError, Result, ValidationError};
pub use events::Event;
pub use state::AppState;
pub use storage::{Config, Database, MemoryGateway, PersistenceGateway};
pub use task::{Priority, Task, TaskList};
pub use timer::{format_clock, TimerEngine, TimerMode, TimerState};
pub use tracker::{Outcome, Tracker};
