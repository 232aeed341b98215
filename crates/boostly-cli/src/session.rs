//! Per-invocation tracker session.
//!
//! Each CLI run opens the database, restores the timer saved by the
//! previous run, and catches it up on the seconds that passed while no
//! process was ticking it.

use boostly_core::storage::Database;
use boostly_core::{Config, Event, SystemClock, TimerEngine, Tracker};
use serde::{Deserialize, Serialize};

const TIMER_KEY: &str = "timer_engine";

#[derive(Serialize, Deserialize)]
struct TimerRecord {
    engine: TimerEngine,
    /// Wall-clock time (epoch ms) up to which the running timer was ticked.
    #[serde(default)]
    last_tick_epoch_ms: Option<i64>,
}

pub struct Session {
    pub tracker: Tracker<Database, SystemClock>,
    pub config: Config,
    last_tick_epoch_ms: Option<i64>,
}

impl Session {
    /// Open the tracker and apply elapsed timer seconds.
    ///
    /// Also returns any events caused by the catch-up, such as a session
    /// that expired while nobody was watching.
    pub fn open() -> Result<(Self, Vec<Event>), Box<dyn std::error::Error>> {
        let config = Config::load_or_default();
        let db = Database::open()?;

        let record = load_timer(&db);
        let (engine, anchor) = match record {
            Some(record) => (record.engine, record.last_tick_epoch_ms),
            None => (TimerEngine::new(config.timer.timer_mode()), None),
        };
        let mut tracker = Tracker::open(db, SystemClock).with_timer(engine);
        // `config set timer.*` may have changed the selection since last run.
        let mode = config.timer.timer_mode();
        if tracker.timer().mode() != mode {
            tracker.set_timer_mode(mode);
        }

        let mut session = Self {
            tracker,
            config,
            last_tick_epoch_ms: anchor,
        };
        let events = session.catch_up();
        // Store the new anchor now so an expiry is never paid out twice.
        session.save_timer()?;
        Ok((session, events))
    }

    /// Tick the timer for every whole second since the last recorded tick.
    pub fn catch_up(&mut self) -> Vec<Event> {
        if !self.tracker.timer().is_running() {
            return Vec::new();
        }
        let Some(anchor) = self.last_tick_epoch_ms else {
            return Vec::new();
        };
        let secs = (now_ms().saturating_sub(anchor) / 1000).max(0) as u64;
        self.last_tick_epoch_ms = Some(anchor + secs as i64 * 1000);
        self.tracker.advance_timer(secs).events
    }

    /// Record that a live driver just ticked the timer.
    pub fn mark_ticked(&mut self) {
        self.last_tick_epoch_ms = Some(now_ms());
    }

    /// Store the timer for the next invocation.
    pub fn save_timer(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.last_tick_epoch_ms = if self.tracker.timer().is_running() {
            Some(self.last_tick_epoch_ms.unwrap_or_else(now_ms))
        } else {
            None
        };
        let record = TimerRecord {
            engine: self.tracker.timer().clone(),
            last_tick_epoch_ms: self.last_tick_epoch_ms,
        };
        let json = serde_json::to_string(&record)?;
        self.tracker.gateway().kv_set(TIMER_KEY, &json)?;
        Ok(())
    }
}

fn load_timer(db: &Database) -> Option<TimerRecord> {
    let json = match db.kv_get(TIMER_KEY) {
        Ok(json) => json?,
        Err(e) => {
            tracing::warn!(error = %e, "could not read timer state, starting idle");
            return None;
        }
    };
    match serde_json::from_str::<TimerRecord>(&json) {
        Ok(record) => Some(record),
        Err(e) => {
            tracing::warn!(error = %e, "discarding unreadable timer state");
            None
        }
    }
}

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
